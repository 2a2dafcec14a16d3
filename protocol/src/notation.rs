//! 走法的线上编码
//!
//! 与外部协作方（对战服务器、客户端）交换走法时的字符串格式：
//! - 走子: `"Y,X"`，如 `"14,8"`
//! - 放墙: `"wall:<horizontal|vertical>:Y:X"`，如 `"wall:horizontal:7:8"`
//!
//! 解析与编码互逆，收发双向复用同一套格式

use crate::error::{QuoridorError, Result};
use crate::moves::{Move, WallOrientation};
use crate::player::Position;

/// 走法编解码器
pub struct Notation;

impl Notation {
    /// 解析走法字符串
    pub fn parse(input: &str) -> Result<Move> {
        let trimmed = input.trim();

        if let Some(rest) = trimmed.strip_prefix("wall:") {
            // 放墙: "wall:horizontal:7:8"
            let parts: Vec<&str> = rest.split(':').collect();
            if parts.len() != 3 {
                return Err(QuoridorError::InvalidNotation {
                    input: input.to_string(),
                });
            }

            let orientation =
                WallOrientation::parse(parts[0]).ok_or_else(|| QuoridorError::UnknownOrientation {
                    name: parts[0].to_string(),
                })?;
            let y = Self::parse_coord(input, parts[1])?;
            let x = Self::parse_coord(input, parts[2])?;
            let at = Position::new(y, x).ok_or(QuoridorError::InvalidPosition { y, x })?;

            Ok(Move::Wall { orientation, at })
        } else {
            // 走子: "14,8"
            let parts: Vec<&str> = trimmed.split(',').collect();
            if parts.len() != 2 {
                return Err(QuoridorError::InvalidNotation {
                    input: input.to_string(),
                });
            }

            let y = Self::parse_coord(input, parts[0])?;
            let x = Self::parse_coord(input, parts[1])?;
            let to = Position::new(y, x).ok_or(QuoridorError::InvalidPosition { y, x })?;

            Ok(Move::Piece { to })
        }
    }

    fn parse_coord(input: &str, token: &str) -> Result<u8> {
        token
            .trim()
            .parse::<u8>()
            .map_err(|_| QuoridorError::InvalidNotation {
                input: input.to_string(),
            })
    }

    /// 编码走法字符串（与 [`Notation::parse`] 互逆）
    pub fn encode(mv: &Move) -> String {
        match mv {
            Move::Piece { to } => format!("{},{}", to.y, to.x),
            Move::Wall { orientation, at } => {
                format!("wall:{}:{}:{}", orientation.as_str(), at.y, at.x)
            }
        }
    }
}
