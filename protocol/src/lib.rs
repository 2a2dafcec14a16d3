//! Quoridor（步步为营）共享协议库
//!
//! 包含:
//! - 玩家、坐标、棋盘等核心数据结构
//! - 走子与放墙的规则验证（含跳跃、斜跳、墙位合法性）
//! - 走法的线上编码格式 (Notation)
//! - 对局难度与状态摘要类型

mod board;
mod constants;
mod error;
mod message;
mod moves;
mod notation;
mod player;

pub use board::Board;
pub use constants::*;
pub use error::{QuoridorError, Result};
pub use message::{Difficulty, GameSummary};
pub use moves::{Move, WallOrientation};
pub use notation::Notation;
pub use player::{Player, Position};
