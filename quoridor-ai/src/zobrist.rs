//! Zobrist 哈希
//!
//! 把完整棋盘状态压缩成 u64 指纹，作为路径缓存的键。
//! 指纹不含当前走子方：最短路径查询与轮到谁走无关

use protocol::{Board, Position, BOARD_SIZE, INITIAL_WALLS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const GRID: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Zobrist 哈希表
///
/// 用固定种子为「玩家 × 棋子格」「朝向 × 墙位」「玩家 × 剩余墙数」
/// 各生成一个随机值，按位异或合成指纹
pub struct ZobristTable {
    /// 棋子位置哈希 [player][cell]，0=Red，1=Blue
    pieces: [[u64; GRID]; 2],
    /// 墙位哈希 [orientation][slot]，0=Horizontal，1=Vertical
    walls: [[u64; GRID]; 2],
    /// 剩余墙数哈希 [player][count]
    wall_counts: [[u64; INITIAL_WALLS as usize + 1]; 2],
}

impl ZobristTable {
    /// 创建新的 Zobrist 表（固定种子保证确定性）
    pub fn new() -> Self {
        // "QUORIDOR" 的 ASCII 编码
        let mut rng = ChaCha8Rng::seed_from_u64(0x5155_4F52_4944_4F52);

        let mut pieces = [[0u64; GRID]; 2];
        for side in &mut pieces {
            for value in side.iter_mut() {
                *value = rng.gen();
            }
        }

        let mut walls = [[0u64; GRID]; 2];
        for orientation in &mut walls {
            for value in orientation.iter_mut() {
                *value = rng.gen();
            }
        }

        let mut wall_counts = [[0u64; INITIAL_WALLS as usize + 1]; 2];
        for side in &mut wall_counts {
            for value in side.iter_mut() {
                *value = rng.gen();
            }
        }

        Self {
            pieces,
            walls,
            wall_counts,
        }
    }

    /// 计算棋盘的完整指纹
    pub fn fingerprint(&self, board: &Board) -> u64 {
        let mut hash = 0u64;

        hash ^= self.pieces[0][Self::index(board.red_pos)];
        hash ^= self.pieces[1][Self::index(board.blue_pos)];

        for slot in &board.horizontal_walls {
            hash ^= self.walls[0][Self::index(*slot)];
        }
        for slot in &board.vertical_walls {
            hash ^= self.walls[1][Self::index(*slot)];
        }

        hash ^= self.wall_counts[0][board.red_walls as usize];
        hash ^= self.wall_counts[1][board.blue_walls as usize];

        hash
    }

    #[inline]
    fn index(pos: Position) -> usize {
        pos.y as usize * BOARD_SIZE as usize + pos.x as usize
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{Player, WallOrientation};

    fn pos(y: u8, x: u8) -> Position {
        Position::new_unchecked(y, x)
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let table1 = ZobristTable::new();
        let table2 = ZobristTable::new();

        let board = Board::new();
        assert_eq!(
            table1.fingerprint(&board),
            table2.fingerprint(&board),
            "指纹必须是确定性的"
        );
    }

    #[test]
    fn test_fingerprint_differs_by_position() {
        let table = ZobristTable::new();
        let board = Board::new();
        let hash1 = table.fingerprint(&board);

        let mut moved = board.clone();
        assert!(moved.move_piece(Player::Red, pos(14, 8)));
        assert_ne!(hash1, table.fingerprint(&moved));
    }

    #[test]
    fn test_fingerprint_wall_roundtrip() {
        let table = ZobristTable::new();
        let mut board = Board::new();
        let hash1 = table.fingerprint(&board);

        board.insert_wall(WallOrientation::Horizontal, pos(7, 7));
        assert_ne!(hash1, table.fingerprint(&board));

        // 移除墙后指纹还原
        board.remove_wall(WallOrientation::Horizontal, pos(7, 7));
        assert_eq!(hash1, table.fingerprint(&board));
    }

    #[test]
    fn test_fingerprint_distinguishes_orientation() {
        let table = ZobristTable::new();
        let mut horizontal = Board::new();
        horizontal.insert_wall(WallOrientation::Horizontal, pos(7, 7));
        let mut vertical = Board::new();
        vertical.insert_wall(WallOrientation::Vertical, pos(7, 7));

        assert_ne!(table.fingerprint(&horizontal), table.fingerprint(&vertical));
    }

    #[test]
    fn test_fingerprint_includes_wall_counts() {
        let table = ZobristTable::new();
        let board = Board::new();
        let mut spent = board.clone();
        spent.red_walls = 9;

        assert_ne!(table.fingerprint(&board), table.fingerprint(&spent));
    }

    #[test]
    fn test_fingerprint_ignores_turn() {
        let table = ZobristTable::new();
        let board = Board::new();
        let mut flipped = board.clone();
        flipped.current_turn = Player::Blue;

        // 走子方不影响路径查询，指纹刻意不包含它
        assert_eq!(table.fingerprint(&board), table.fingerprint(&flipped));
    }
}
