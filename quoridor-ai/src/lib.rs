//! Quoridor AI 引擎
//!
//! 包含:
//! - 棋盘指纹 (Zobrist 哈希)
//! - 最短路径计算与有界缓存 (Path Oracle)
//! - 走法生成与启发式排序
//! - 分难度的局面评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 对局会话门面 (AiSession)

mod evaluate;
mod generate;
mod pathfinding;
mod search;
mod session;
mod zobrist;

pub use evaluate::{Evaluator, GamePhase, WIN_SCORE};
pub use generate::MoveGenerator;
pub use pathfinding::{OracleStats, PathOracle};
pub use search::{AiConfig, AiEngine, Difficulty};
pub use session::AiSession;
pub use zobrist::ZobristTable;
