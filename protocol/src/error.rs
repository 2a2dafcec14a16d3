//! 错误类型定义

use thiserror::Error;

/// Quoridor 协议错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoridorError {
    /// 无法解析的走法编码
    #[error("Invalid move notation: {input:?}")]
    InvalidNotation { input: String },

    /// 坐标超出棋盘范围
    #[error("Invalid position: ({y}, {x})")]
    InvalidPosition { y: u8, x: u8 },

    /// 未知的墙朝向
    #[error("Unknown wall orientation: {name:?}")]
    UnknownOrientation { name: String },
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, QuoridorError>;
