//! 走法生成与启发式排序
//!
//! 走子全部纳入候选；放墙位置太多（约 2×15² 个），
//! 只围绕对手最短路径的前几格筛选最有拦截价值的若干面

use protocol::{Board, Move, Player, WallOrientation};

use crate::pathfinding::PathOracle;

/// 只在对手最短路径的前这么多格附近找墙位
const PATH_PREFIX_LEN: usize = 5;

/// 排序时走子启发分的权重
const ORDER_PIECE_WEIGHT: i32 = 10;

/// 排序时放墙启发分的权重
const ORDER_WALL_WEIGHT: i32 = 5;

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成候选走法：全部走子 + 启发式筛选出的放墙
    pub fn generate(
        board: &Board,
        player: Player,
        max_wall_candidates: usize,
        oracle: &mut PathOracle,
    ) -> Vec<Move> {
        let mut moves: Vec<Move> = board
            .valid_moves(player)
            .into_iter()
            .map(|to| Move::Piece { to })
            .collect();

        if board.walls_remaining(player) > 0 {
            moves.extend(Self::wall_candidates(board, player, max_wall_candidates, oracle));
        }

        moves
    }

    /// 在对手最短路径前缀的八邻域内找墙位，按「让对手多绕几步」降序取前 max 个
    fn wall_candidates(
        board: &Board,
        player: Player,
        max_wall_candidates: usize,
        oracle: &mut PathOracle,
    ) -> Vec<Move> {
        let opponent = player.opponent();
        let opponent_path = oracle.shortest_path(board, opponent);
        if opponent_path.len() < 2 {
            return Vec::new();
        }
        let old_distance = (opponent_path.len() - 1) as i32;

        let mut candidates: Vec<(i32, Move)> = Vec::new();
        let mut probe = board.clone();
        let prefix = PATH_PREFIX_LEN.min(opponent_path.len() - 1);

        for cell in &opponent_path[..prefix] {
            for dy in -1..=1i8 {
                for dx in -1..=1i8 {
                    let Some(slot) = cell.offset(dy, dx) else {
                        continue;
                    };

                    for orientation in [WallOrientation::Horizontal, WallOrientation::Vertical] {
                        if !probe.can_place_wall(orientation, slot) {
                            continue;
                        }

                        // 临时放上，复核双方通路后按拦截效果打分
                        probe.insert_wall(orientation, slot);
                        if probe.has_path_to_goal(Player::Red)
                            && probe.has_path_to_goal(Player::Blue)
                        {
                            if let Some(new_distance) = oracle.shortest_distance(&probe, opponent) {
                                let score = new_distance as i32 - old_distance;
                                candidates.push((score, Move::Wall { orientation, at: slot }));
                            }
                        }
                        probe.remove_wall(orientation, slot);
                    }
                }
            }
        }

        // 稳定降序：平分时保持生成顺序
        candidates.sort_by_key(|&(score, _)| std::cmp::Reverse(score));
        candidates.truncate(max_wall_candidates);
        candidates.into_iter().map(|(_, mv)| mv).collect()
    }

    /// 一步前瞻的启发式排序
    ///
    /// 只为提高 Alpha-Beta 剪枝效率重排顺序，不过滤任何走法
    pub fn order_moves(
        board: &Board,
        player: Player,
        moves: Vec<Move>,
        oracle: &mut PathOracle,
    ) -> Vec<Move> {
        let opponent = player.opponent();
        let my_distance = oracle.distance_score(board, player);
        let opponent_distance = oracle.distance_score(board, opponent);
        let prev_pos = board.position(player);

        let mut probe = board.clone();
        let mut scored: Vec<(i32, Move)> = Vec::with_capacity(moves.len());

        for mv in moves {
            let score = match mv {
                Move::Piece { to } => {
                    probe.set_position(player, to);
                    let new_distance = oracle.distance_score(&probe, player);
                    probe.set_position(player, prev_pos);
                    (my_distance - new_distance) * ORDER_PIECE_WEIGHT
                }
                Move::Wall { orientation, at } => {
                    probe.insert_wall(orientation, at);
                    let new_opponent_distance = oracle.distance_score(&probe, opponent);
                    probe.remove_wall(orientation, at);
                    (new_opponent_distance - opponent_distance) * ORDER_WALL_WEIGHT
                }
            };
            scored.push((score, mv));
        }

        scored.sort_by_key(|&(score, _)| std::cmp::Reverse(score));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }

    /// 应用一步棋，返回新棋盘（按分支复制，原棋盘不动）
    pub fn apply_move(board: &Board, player: Player, mv: &Move) -> Board {
        let mut next = board.clone();
        match mv {
            Move::Piece { to } => {
                next.move_piece(player, *to);
            }
            Move::Wall { orientation, at } => {
                next.place_wall(player, *orientation, *at);
            }
        }
        next
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
    fn test_generate_includes_all_piece_moves() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        let moves = MoveGenerator::generate(&board, Player::Red, 10, &mut oracle);
        assert!(moves.contains(&Move::Piece { to: pos(14, 8) }));
        assert!(moves.contains(&Move::Piece { to: pos(16, 6) }));
        assert!(moves.contains(&Move::Piece { to: pos(16, 10) }));

        let piece_count = moves
            .iter()
            .filter(|mv| matches!(mv, Move::Piece { .. }))
            .count();
        assert_eq!(piece_count, 3);
    }

    #[test]
    fn test_wall_candidates_bounded_and_legal() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        let moves = MoveGenerator::generate(&board, Player::Red, 10, &mut oracle);
        let walls: Vec<&Move> = moves
            .iter()
            .filter(|mv| matches!(mv, Move::Wall { .. }))
            .collect();

        assert!(!walls.is_empty());
        assert!(walls.len() <= 10);
        for mv in walls {
            let Move::Wall { orientation, at } = mv else {
                unreachable!()
            };
            assert!(board.can_place_wall(*orientation, *at));
        }
    }

    #[test]
    fn test_wall_candidates_near_opponent_path() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        // 红方的对手是蓝方，蓝方最短路径是第 8 列一路向下
        let opponent_path = oracle.shortest_path(&board, Player::Blue);
        let prefix: Vec<Position> = opponent_path.into_iter().take(5).collect();

        let moves = MoveGenerator::generate(&board, Player::Red, 20, &mut oracle);
        for mv in &moves {
            if let Move::Wall { at, .. } = mv {
                let near = prefix.iter().any(|cell| {
                    (cell.y as i16 - at.y as i16).abs() <= 1
                        && (cell.x as i16 - at.x as i16).abs() <= 1
                });
                assert!(near, "墙位 {at} 离对手路径前缀太远");
            }
        }
    }

    #[test]
    fn test_no_wall_candidates_without_walls() {
        let mut oracle = PathOracle::new();
        let mut board = Board::new();
        board.red_walls = 0;

        let moves = MoveGenerator::generate(&board, Player::Red, 10, &mut oracle);
        assert!(moves.iter().all(|mv| matches!(mv, Move::Piece { .. })));
    }

    #[test]
    fn test_generate_does_not_mutate_board() {
        let mut oracle = PathOracle::new();
        let board = Board::new();
        let before = board.clone();

        MoveGenerator::generate(&board, Player::Red, 20, &mut oracle);
        assert_eq!(board, before);
    }

    #[test]
    fn test_order_moves_prefers_advance() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        // 横着走不缩短距离，向前一步缩短一步
        let moves = vec![
            Move::Piece { to: pos(16, 6) },
            Move::Piece { to: pos(14, 8) },
        ];
        let ordered = MoveGenerator::order_moves(&board, Player::Red, moves, &mut oracle);
        assert_eq!(ordered[0], Move::Piece { to: pos(14, 8) });
    }

    #[test]
    fn test_order_moves_prefers_blocking_wall() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        // (1,7) 逼蓝方绕行，(15,1) 对蓝方毫无影响
        let harmless = Move::Wall {
            orientation: WallOrientation::Horizontal,
            at: pos(15, 1),
        };
        let blocking = Move::Wall {
            orientation: WallOrientation::Horizontal,
            at: pos(1, 7),
        };
        let ordered =
            MoveGenerator::order_moves(&board, Player::Red, vec![harmless, blocking], &mut oracle);
        assert_eq!(ordered[0], blocking);
    }

    #[test]
    fn test_order_moves_stable_on_ties() {
        let mut oracle = PathOracle::new();
        let board = Board::new();

        // 两个横移得分相同，保持原有顺序
        let moves = vec![
            Move::Piece { to: pos(16, 6) },
            Move::Piece { to: pos(16, 10) },
        ];
        let ordered = MoveGenerator::order_moves(&board, Player::Red, moves.clone(), &mut oracle);
        assert_eq!(ordered, moves);
    }

    #[test]
    fn test_order_moves_does_not_mutate_board() {
        let mut oracle = PathOracle::new();
        let board = Board::new();
        let before = board.clone();

        let moves = MoveGenerator::generate(&board, Player::Red, 10, &mut oracle);
        MoveGenerator::order_moves(&board, Player::Red, moves, &mut oracle);
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new();

        let next = MoveGenerator::apply_move(&board, Player::Red, &Move::Piece { to: pos(14, 8) });
        assert_eq!(next.red_pos, pos(14, 8));
        assert_eq!(next.current_turn, Player::Blue);
        // 原棋盘不受影响
        assert_eq!(board.red_pos, pos(16, 8));

        let next = MoveGenerator::apply_move(
            &board,
            Player::Red,
            &Move::Wall {
                orientation: WallOrientation::Vertical,
                at: pos(7, 7),
            },
        );
        assert!(next.vertical_walls.contains(&pos(7, 7)));
        assert_eq!(next.red_walls, 9);
        assert_eq!(next.current_turn, Player::Blue);
    }
}
