//! 走法定义

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};

/// 墙的朝向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallOrientation {
    /// 横墙（阻挡上下方向的移动）
    Horizontal,
    /// 竖墙（阻挡左右方向的移动）
    Vertical,
}

impl WallOrientation {
    /// 获取线上协议中的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            WallOrientation::Horizontal => "horizontal",
            WallOrientation::Vertical => "vertical",
        }
    }

    /// 从线上协议名称解析
    pub fn parse(s: &str) -> Option<WallOrientation> {
        match s {
            "horizontal" => Some(WallOrientation::Horizontal),
            "vertical" => Some(WallOrientation::Vertical),
            _ => None,
        }
    }
}

/// 一步棋：走子或放墙
///
/// 值对象，相等性与哈希按结构比较
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// 走子（单步、跳跃或斜跳后的落点）
    Piece {
        /// 落点（偶数坐标棋子格）
        to: Position,
    },
    /// 放墙
    Wall {
        /// 朝向
        orientation: WallOrientation,
        /// 墙位（奇数坐标）
        at: Position,
    },
}

impl Move {
    /// 该步是否让玩家立即获胜（走子到达目标行）
    pub fn is_winning_for(&self, player: Player) -> bool {
        matches!(self, Move::Piece { to } if to.y == player.goal_row())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Piece { to } => write!(f, "Move({},{})", to.y, to.x),
            Move::Wall { orientation, at } => {
                write!(f, "Wall({},{},{})", orientation.as_str(), at.y, at.x)
            }
        }
    }
}
