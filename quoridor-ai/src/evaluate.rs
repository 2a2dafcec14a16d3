//! 局面评估函数
//!
//! 三档评估：基础（只看距离差）、中级（加墙数与机动性）、
//! 高级（按对局阶段加权，再加路径数与中央控制）。
//! 所有分值都从被评估玩家的视角给出，正值对该玩家有利

use protocol::{Board, Difficulty, Player, BOARD_CENTER, INITIAL_WALLS};

use crate::pathfinding::PathOracle;

/// 终局哨兵分值：到达目标行时返回 ±WIN_SCORE，量级压过任何启发分
pub const WIN_SCORE: i32 = 99_999;

/// 距离差权重
const DISTANCE_WEIGHT: i32 = 100;
/// 墙数差权重
const WALL_COUNT_WEIGHT: i32 = 10;
/// 路径数差权重
const PATH_COUNT_WEIGHT: i32 = 5;
/// 中央控制权重
const CENTER_WEIGHT: i32 = 2;
/// 机动性（合法落点数）权重
const MOBILITY_WEIGHT: i32 = 3;
/// 高级评估统计路径数时的上限
const PATH_COUNT_CAP: u32 = 5;

/// 对局阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// 开局：墙用得少且双方离目标都还远
    Early,
    /// 中盘
    Mid,
    /// 残局：墙基本用完或胜负将分
    Late,
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 按难度评估局面（从 player 的视角打分）
    pub fn evaluate(
        board: &Board,
        player: Player,
        difficulty: Difficulty,
        oracle: &mut PathOracle,
    ) -> i32 {
        if board.is_goal(player) {
            return WIN_SCORE;
        }
        if board.is_goal(player.opponent()) {
            return -WIN_SCORE;
        }

        match difficulty {
            Difficulty::Easy => Self::evaluate_basic(board, player, oracle),
            Difficulty::Medium => Self::evaluate_intermediate(board, player, oracle),
            // Hard 沿用中级评估（沿袭原有实现的性能取舍）
            Difficulty::Hard => Self::evaluate_intermediate(board, player, oracle),
        }
    }

    /// 基础评估：双方最短距离差
    pub fn evaluate_basic(board: &Board, player: Player, oracle: &mut PathOracle) -> i32 {
        let opponent = player.opponent();
        let my_distance = oracle.distance_score(board, player);
        let opponent_distance = oracle.distance_score(board, opponent);

        (opponent_distance - my_distance) * DISTANCE_WEIGHT
    }

    /// 中级评估：距离差 + 墙数差 + 机动性差
    pub fn evaluate_intermediate(board: &Board, player: Player, oracle: &mut PathOracle) -> i32 {
        let opponent = player.opponent();
        let mut score = Self::evaluate_basic(board, player, oracle);

        let wall_diff =
            board.walls_remaining(player) as i32 - board.walls_remaining(opponent) as i32;
        score += wall_diff * WALL_COUNT_WEIGHT;

        let my_mobility = board.valid_moves(player).len() as i32;
        let opponent_mobility = board.valid_moves(opponent).len() as i32;
        score += (my_mobility - opponent_mobility) * MOBILITY_WEIGHT;

        score
    }

    /// 高级评估：阶段加权墙数 + 路径数 + 中央控制 + 领先/落后修正
    pub fn evaluate_advanced(board: &Board, player: Player, oracle: &mut PathOracle) -> i32 {
        let opponent = player.opponent();

        let my_distance = oracle.distance_score(board, player);
        let opponent_distance = oracle.distance_score(board, opponent);
        let distance_diff = opponent_distance - my_distance;
        let mut score = distance_diff * DISTANCE_WEIGHT;

        // 墙在开局最值钱，残局贬值（x1.5 / x1.0 / x0.5 折算成整数权重）
        let wall_diff =
            board.walls_remaining(player) as i32 - board.walls_remaining(opponent) as i32;
        let phase = Self::game_phase(board, oracle);
        score += wall_diff
            * match phase {
                GamePhase::Early => WALL_COUNT_WEIGHT * 3 / 2,
                GamePhase::Mid => WALL_COUNT_WEIGHT,
                GamePhase::Late => WALL_COUNT_WEIGHT / 2,
            };

        let my_paths = oracle.count_paths(board, player, PATH_COUNT_CAP) as i32;
        let opponent_paths = oracle.count_paths(board, opponent, PATH_COUNT_CAP) as i32;
        score += (my_paths - opponent_paths) * PATH_COUNT_WEIGHT;

        let my_mobility = board.valid_moves(player).len() as i32;
        let opponent_mobility = board.valid_moves(opponent).len() as i32;
        score += (my_mobility - opponent_mobility) * MOBILITY_WEIGHT;

        // 中央控制只在开局有意义
        if phase == GamePhase::Early {
            let my_center = Self::center_control(board, player);
            let opponent_center = Self::center_control(board, opponent);
            score += (my_center - opponent_center) * CENTER_WEIGHT;
        }

        // 领先超过两步给固定奖励；落后超过两步时按保有的路径数补偿
        if distance_diff > 2 {
            score += 20;
        }
        if distance_diff < -2 {
            score += my_paths * 10;
        }

        score
    }

    /// 判断对局阶段：综合双方已用墙数与剩余距离
    pub fn game_phase(board: &Board, oracle: &mut PathOracle) -> GamePhase {
        let total_walls = INITIAL_WALLS as i32 * 2;
        let walls_used = total_walls - board.red_walls as i32 - board.blue_walls as i32;

        let total_distance = oracle.distance_score(board, Player::Red)
            + oracle.distance_score(board, Player::Blue);

        // 用墙不到 30% 且双方距离和大于 10 算开局；
        // 用墙不到 70% 或距离和大于 5 算中盘；其余算残局
        if walls_used * 10 < total_walls * 3 && total_distance > 10 {
            GamePhase::Early
        } else if walls_used * 10 < total_walls * 7 || total_distance > 5 {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    /// 中央控制分：离棋盘中心越近越高
    pub fn center_control(board: &Board, player: Player) -> i32 {
        let pos = board.position(player);
        let manhattan = (pos.y as i32 - BOARD_CENTER as i32).abs()
            + (pos.x as i32 - BOARD_CENTER as i32).abs();
        // 每步跨两格，折算成步数
        let steps_from_center = manhattan / 2;

        (10 - steps_from_center * 2).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Position;

    fn pos(y: u8, x: u8) -> Position {
        Position::new_unchecked(y, x)
    }

    #[test]
    fn test_initial_position_balanced() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        // 完全对称的开局，各档评估都应是 0
        assert_eq!(Evaluator::evaluate_basic(&board, Player::Red, &mut oracle), 0);
        assert_eq!(Evaluator::evaluate_basic(&board, Player::Blue, &mut oracle), 0);
        assert_eq!(
            Evaluator::evaluate_intermediate(&board, Player::Red, &mut oracle),
            0
        );
        assert_eq!(
            Evaluator::evaluate_advanced(&board, Player::Red, &mut oracle),
            0
        );
    }

    #[test]
    fn test_basic_rewards_distance_lead() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        assert!(board.move_piece(Player::Red, pos(14, 8)));

        assert_eq!(
            Evaluator::evaluate_basic(&board, Player::Red, &mut oracle),
            100
        );
        assert_eq!(
            Evaluator::evaluate_basic(&board, Player::Blue, &mut oracle),
            -100
        );
    }

    #[test]
    fn test_terminal_sentinels() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        board.set_position(Player::Red, pos(0, 8));

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(
                Evaluator::evaluate(&board, Player::Red, difficulty, &mut oracle),
                WIN_SCORE
            );
            assert_eq!(
                Evaluator::evaluate(&board, Player::Blue, difficulty, &mut oracle),
                -WIN_SCORE
            );
        }
    }

    #[test]
    fn test_intermediate_wall_term() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        board.blue_walls = 8;

        // 距离与机动性对称抵消，只剩墙数差 2 x 10
        assert_eq!(
            Evaluator::evaluate_intermediate(&board, Player::Red, &mut oracle),
            20
        );
        assert_eq!(
            Evaluator::evaluate_intermediate(&board, Player::Blue, &mut oracle),
            -20
        );
    }

    #[test]
    fn test_intermediate_mobility_term() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        // 红方站在棋盘中央：距离 4、四个方向可走
        board.set_position(Player::Red, pos(8, 8));

        // 距离差 (8-4)x100 + 机动性差 (4-3)x3
        assert_eq!(
            Evaluator::evaluate_intermediate(&board, Player::Red, &mut oracle),
            403
        );
    }

    #[test]
    fn test_hard_reuses_intermediate() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        board.set_position(Player::Red, pos(8, 8));
        board.blue_walls = 7;

        let medium = Evaluator::evaluate(&board, Player::Red, Difficulty::Medium, &mut oracle);
        let hard = Evaluator::evaluate(&board, Player::Red, Difficulty::Hard, &mut oracle);
        assert_eq!(medium, hard);
    }

    #[test]
    fn test_game_phase_transitions() {
        let mut oracle = PathOracle::new();

        // 开局：没用墙、距离和 16
        let board = Board::new();
        assert_eq!(Evaluator::game_phase(&board, &mut oracle), GamePhase::Early);

        // 用了 6 面墙就不再是开局
        let mut board = Board::new();
        board.red_walls = 7;
        board.blue_walls = 7;
        assert_eq!(Evaluator::game_phase(&board, &mut oracle), GamePhase::Mid);

        // 墙基本用完、双方都只差一步：残局
        let mut board = Board::new();
        board.red_walls = 3;
        board.blue_walls = 3;
        board.set_position(Player::Red, pos(2, 8));
        board.set_position(Player::Blue, pos(14, 8));
        assert_eq!(Evaluator::game_phase(&board, &mut oracle), GamePhase::Late);
    }

    #[test]
    fn test_center_control() {
        let mut board = Board::new();
        // 出发点离中心 4 步
        assert_eq!(Evaluator::center_control(&board, Player::Red), 2);

        board.set_position(Player::Red, pos(8, 8));
        assert_eq!(Evaluator::center_control(&board, Player::Red), 10);

        // 角落太远，得分归零
        board.set_position(Player::Red, pos(16, 0));
        assert_eq!(Evaluator::center_control(&board, Player::Red), 0);
    }

    #[test]
    fn test_advanced_scoring_breakdown() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        board.set_position(Player::Red, pos(8, 8));

        // 距离差 4x100 + 领先奖励 20 + 中央控制 (10-2)x2
        // + 机动性 (4-3)x3，路径数与墙数对称抵消
        assert_eq!(
            Evaluator::evaluate_advanced(&board, Player::Red, &mut oracle),
            400 + 20 + 16 + 3
        );
    }

    #[test]
    fn test_advanced_defensive_bonus() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        board.set_position(Player::Blue, pos(12, 8));

        // 红方落后 6 步：距离差 -600、机动性差 -3；
        // 落后超过两步时按保有路径数补偿 +50
        assert_eq!(
            Evaluator::evaluate_advanced(&board, Player::Red, &mut oracle),
            -600 - 3 + 50
        );
    }
}
