//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，深度与候选数由难度决定。
//! 时间预算只在根节点的候选循环里检查：超时就拿当前最好的走法，
//! 递归内部不再看表

use std::time::{Duration, Instant};

use protocol::{Board, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::Evaluator;
use crate::generate::MoveGenerator;
use crate::pathfinding::PathOracle;

// 重导出 Difficulty 以便外部使用
pub use protocol::Difficulty;

/// 默认单步时间预算（毫秒）
const DEFAULT_TIME_LIMIT_MS: u64 = 30_000;

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 最大搜索深度
    pub max_depth: u8,
    /// 是否做启发式走法排序
    pub use_move_ordering: bool,
    /// 放墙候选数上限
    pub max_wall_candidates: usize,
    /// 单步时间预算（毫秒，只在根节点检查）
    pub time_limit_ms: u64,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                max_depth: 2,
                use_move_ordering: false,
                max_wall_candidates: 10,
                time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            },
            Difficulty::Medium => Self {
                difficulty,
                max_depth: 3,
                use_move_ordering: true,
                max_wall_candidates: 15,
                time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            },
            Difficulty::Hard => Self {
                difficulty,
                max_depth: 4,
                use_move_ordering: true,
                max_wall_candidates: 20,
                time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            },
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    /// 引擎执子的阵营，评估始终从这个视角进行
    player: Player,
    oracle: PathOracle,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(player: Player, config: AiConfig) -> Self {
        Self {
            config,
            player,
            oracle: PathOracle::new(),
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(player: Player, difficulty: Difficulty) -> Self {
        Self::new(player, AiConfig::from_difficulty(difficulty))
    }

    /// 引擎执子的阵营
    pub fn player(&self) -> Player {
        self.player
    }

    /// 当前配置
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法
    pub fn search(&mut self, board: &Board) -> Option<Move> {
        self.nodes_searched = 0;
        // 每步搜索前清空路径缓存，限制长对局的内存增长
        self.oracle.clear();

        let start = Instant::now();
        let time_limit = Duration::from_millis(self.config.time_limit_ms);

        let moves = MoveGenerator::generate(
            board,
            self.player,
            self.config.max_wall_candidates,
            &mut self.oracle,
        );
        if moves.is_empty() {
            return None;
        }

        // 有直接获胜的走子就不用搜索了
        if let Some(winning) = moves.iter().find(|mv| mv.is_winning_for(self.player)) {
            return Some(*winning);
        }

        let moves = if self.config.use_move_ordering {
            MoveGenerator::order_moves(board, self.player, moves, &mut self.oracle)
        } else {
            moves
        };

        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for mv in &moves {
            // 超时就停止遍历，返回目前最好的候选
            if start.elapsed() > time_limit {
                break;
            }

            let next = MoveGenerator::apply_move(board, self.player, mv);
            let score = self.minimax(&next, self.config.max_depth - 1, alpha, beta, false);

            if score > best_score {
                best_score = score;
                best_move = Some(*mv);
                alpha = alpha.max(score);
            }
        }

        let stats = self.oracle.stats();
        debug!(
            nodes = self.nodes_searched,
            elapsed_ms = start.elapsed().as_millis() as u64,
            cache_hits = stats.hits,
            cache_probes = stats.probes,
            best = %best_move.map(|mv| mv.to_string()).unwrap_or_default(),
            "搜索完成"
        );

        best_move
    }

    /// Minimax + Alpha-Beta 剪枝
    ///
    /// 评估始终从引擎执子方视角进行；maximizing 只决定该层轮到谁走子
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 || board.is_goal(Player::Red) || board.is_goal(Player::Blue) {
            return Evaluator::evaluate(board, self.player, self.config.difficulty, &mut self.oracle);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };

        let moves = MoveGenerator::generate(
            board,
            mover,
            self.config.max_wall_candidates,
            &mut self.oracle,
        );

        // 正常对局不会出现无子可走；兜底按叶子直接评估，不能崩
        if moves.is_empty() {
            return Evaluator::evaluate(board, self.player, self.config.difficulty, &mut self.oracle);
        }

        let moves = if self.config.use_move_ordering && depth >= 2 {
            MoveGenerator::order_moves(board, mover, moves, &mut self.oracle)
        } else {
            moves
        };

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in &moves {
                let next = MoveGenerator::apply_move(board, mover, mv);
                let score = self.minimax(&next, depth - 1, alpha, beta, false);

                max_eval = max_eval.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break; // Beta 剪枝
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in &moves {
                let next = MoveGenerator::apply_move(board, mover, mv);
                let score = self.minimax(&next, depth - 1, alpha, beta, true);

                min_eval = min_eval.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break; // Alpha 剪枝
                }
            }
            min_eval
        }
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 借用内部的路径预言机（门面查询距离用）
    pub(crate) fn oracle_mut(&mut self) -> &mut PathOracle {
        &mut self.oracle
    }
}
