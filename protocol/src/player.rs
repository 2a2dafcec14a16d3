//! 玩家与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::{BLUE_GOAL_ROW, BOARD_SIZE, RED_GOAL_ROW};

/// 玩家阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 红方（先手，从下方 (16, 8) 出发）
    Red,
    /// 蓝方（后手，从上方 (0, 8) 出发）
    Blue,
}

impl Player {
    /// 获取对方阵营
    pub fn opponent(&self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// 获取目标行（走到该行即获胜）
    pub fn goal_row(&self) -> u8 {
        match self {
            Player::Red => RED_GOAL_ROW,
            Player::Blue => BLUE_GOAL_ROW,
        }
    }

    /// 获取初始位置
    pub fn start_position(&self) -> Position {
        match self {
            Player::Red => Position::new_unchecked(16, 8),
            Player::Blue => Position::new_unchecked(0, 8),
        }
    }

    /// 获取线上协议中的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }

    /// 从线上协议名称解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Player> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Player::Red),
            "blue" => Some(Player::Blue),
            _ => None,
        }
    }
}

/// 棋盘坐标
///
/// y 为行、x 为列，与线上协议 "Y,X" 的顺序一致。
/// 两个坐标均为偶数时是棋子格，均为奇数时是墙位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-16)
    pub y: u8,
    /// 列 (0-16)
    pub x: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(y: u8, x: u8) -> Option<Self> {
        if y < BOARD_SIZE && x < BOARD_SIZE {
            Some(Self { y, x })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(y: u8, x: u8) -> Self {
        Self { y, x }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        self.y < BOARD_SIZE && self.x < BOARD_SIZE
    }

    /// 是否为棋子格（两个坐标均为偶数）
    pub fn is_cell(&self) -> bool {
        self.y % 2 == 0 && self.x % 2 == 0
    }

    /// 是否为墙位（两个坐标均为奇数）
    pub fn is_wall_slot(&self) -> bool {
        self.y % 2 == 1 && self.x % 2 == 1
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dy: i8, dx: i8) -> Option<Position> {
        let new_y = self.y as i16 + dy as i16;
        let new_x = self.x as i16 + dx as i16;
        if new_y >= 0 && new_y < BOARD_SIZE as i16 && new_x >= 0 && new_x < BOARD_SIZE as i16 {
            Some(Position {
                y: new_y as u8,
                x: new_x as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}
