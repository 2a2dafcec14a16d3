//! 对局相关的消息类型

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=2，不做走法排序
    Easy,
    /// 中等：depth=3
    Medium,
    /// 困难：depth=4
    Hard,
}

/// 对局状态摘要
///
/// 由引擎门面生成，供外部协作方展示或落库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// 红方位置
    pub red_position: Position,
    /// 蓝方位置
    pub blue_position: Position,
    /// 红方剩余墙数
    pub red_walls_remaining: u8,
    /// 蓝方剩余墙数
    pub blue_walls_remaining: u8,
    /// 当前走子方
    pub current_player: Player,
    /// 红方到目标行的最短步数（无通路时为 None，正常对局中不会出现）
    pub red_distance_to_goal: Option<u32>,
    /// 蓝方到目标行的最短步数
    pub blue_distance_to_goal: Option<u32>,
    /// 对局是否结束
    pub is_game_over: bool,
    /// 胜者
    pub winner: Option<Player>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Medium);
    }

    #[test]
    fn test_summary_serde_roundtrip() {
        let summary = GameSummary {
            red_position: Position::new_unchecked(16, 8),
            blue_position: Position::new_unchecked(0, 8),
            red_walls_remaining: 10,
            blue_walls_remaining: 9,
            current_player: Player::Red,
            red_distance_to_goal: Some(8),
            blue_distance_to_goal: Some(8),
            is_game_over: false,
            winner: None,
        };

        let json = serde_json::to_string(&summary).unwrap();
        let back: GameSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
