//! 棋盘状态与规则
//!
//! 17x17 坐标系：
//! - 偶数坐标 (0,2,...,16) 为棋子格
//! - 奇数坐标 (1,3,...,15) 为墙位
//! - 红方从下方 (16,8) 出发，走到 y=0 获胜
//! - 蓝方从上方 (0,8) 出发，走到 y=16 获胜

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOARD_SIZE, INITIAL_WALLS, STEP_DIRECTIONS, WALL_SLOT_MAX, WALL_SLOT_MIN,
};
use crate::moves::WallOrientation;
use crate::player::{Player, Position};

/// 棋盘状态
///
/// 一局游戏只有一个 Board 实例被持续修改；
/// 搜索过程只在它的克隆副本上推演
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 红方位置
    pub red_pos: Position,
    /// 蓝方位置
    pub blue_pos: Position,
    /// 红方剩余墙数
    pub red_walls: u8,
    /// 蓝方剩余墙数
    pub blue_walls: u8,
    /// 横墙集合（坐标均为奇数）
    pub horizontal_walls: HashSet<Position>,
    /// 竖墙集合（坐标均为奇数）
    pub vertical_walls: HashSet<Position>,
    /// 当前走子方
    pub current_turn: Player,
}

impl Board {
    /// 创建初始棋盘（红方先行）
    pub fn new() -> Self {
        Self {
            red_pos: Player::Red.start_position(),
            blue_pos: Player::Blue.start_position(),
            red_walls: INITIAL_WALLS,
            blue_walls: INITIAL_WALLS,
            horizontal_walls: HashSet::new(),
            vertical_walls: HashSet::new(),
            current_turn: Player::Red,
        }
    }

    /// 获取玩家位置
    pub fn position(&self, player: Player) -> Position {
        match player {
            Player::Red => self.red_pos,
            Player::Blue => self.blue_pos,
        }
    }

    /// 直接改写玩家位置
    ///
    /// 不做走法合法性检查，供搜索的启发式推演临时改写；
    /// 正常落子走 [`Board::move_piece`]
    pub fn set_position(&mut self, player: Player, pos: Position) {
        debug_assert!(pos.is_cell(), "piece position must be an even-coordinate cell");
        match player {
            Player::Red => self.red_pos = pos,
            Player::Blue => self.blue_pos = pos,
        }
    }

    /// 获取玩家剩余墙数
    pub fn walls_remaining(&self, player: Player) -> u8 {
        match player {
            Player::Red => self.red_walls,
            Player::Blue => self.blue_walls,
        }
    }

    /// 玩家是否已到达目标行
    pub fn is_goal(&self, player: Player) -> bool {
        self.position(player).y == player.goal_row()
    }

    /// 切换走子方
    fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    fn has_horizontal_wall(&self, y: i16, x: i16) -> bool {
        y >= 0
            && x >= 0
            && y < BOARD_SIZE as i16
            && x < BOARD_SIZE as i16
            && self
                .horizontal_walls
                .contains(&Position::new_unchecked(y as u8, x as u8))
    }

    fn has_vertical_wall(&self, y: i16, x: i16) -> bool {
        y >= 0
            && x >= 0
            && y < BOARD_SIZE as i16
            && x < BOARD_SIZE as i16
            && self
                .vertical_walls
                .contains(&Position::new_unchecked(y as u8, x as u8))
    }

    /// 两个相距两格的棋子格之间是否有墙
    ///
    /// 一面墙横跨一整条格边加两侧的斜角，所以每个方向要查中间
    /// 奇数行（列）上的三个墙位
    pub fn is_wall_between(&self, from: Position, to: Position) -> bool {
        let dy = to.y as i16 - from.y as i16;
        let dx = to.x as i16 - from.x as i16;
        let y = from.y as i16;
        let x = from.x as i16;

        if dy == -2 && dx == 0 {
            // 向上：横墙在 (y-1, x) / (y-1, x-1) / (y-1, x+1) 任一处都挡路
            let wall_y = y - 1;
            self.has_horizontal_wall(wall_y, x)
                || self.has_horizontal_wall(wall_y, x - 1)
                || self.has_horizontal_wall(wall_y, x + 1)
        } else if dy == 2 && dx == 0 {
            // 向下
            let wall_y = y + 1;
            self.has_horizontal_wall(wall_y, x)
                || self.has_horizontal_wall(wall_y, x - 1)
                || self.has_horizontal_wall(wall_y, x + 1)
        } else if dy == 0 && dx == -2 {
            // 向左：竖墙在 (y, x-1) / (y-1, x-1) / (y+1, x-1) 任一处都挡路
            let wall_x = x - 1;
            self.has_vertical_wall(y, wall_x)
                || self.has_vertical_wall(y - 1, wall_x)
                || self.has_vertical_wall(y + 1, wall_x)
        } else if dy == 0 && dx == 2 {
            // 向右
            let wall_x = x + 1;
            self.has_vertical_wall(y, wall_x)
                || self.has_vertical_wall(y - 1, wall_x)
                || self.has_vertical_wall(y + 1, wall_x)
        } else {
            false
        }
    }

    /// 能否从 from 走到 to（仅限正交两格的基本移动，不含跳跃规则）
    pub fn can_move_to(&self, from: Position, to: Position) -> bool {
        if !to.is_valid() {
            return false;
        }
        let dy = (to.y as i16 - from.y as i16).abs();
        let dx = (to.x as i16 - from.x as i16).abs();
        if !((dy == 2 && dx == 0) || (dy == 0 && dx == 2)) {
            return false;
        }
        !self.is_wall_between(from, to)
    }

    /// 获取玩家当前所有合法落点（含跳跃与斜跳）
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        let from = self.position(player);
        let opponent_pos = self.position(player.opponent());
        let mut moves = Vec::new();

        for &(dy, dx) in &STEP_DIRECTIONS {
            let Some(next) = from.offset(dy, dx) else {
                continue;
            };
            if !self.can_move_to(from, next) {
                continue;
            }

            if next != opponent_pos {
                moves.push(next);
                continue;
            }

            // 对面是对手：先试直跳，跳不过再试斜跳
            match next.offset(dy, dx) {
                Some(jump) if !self.is_wall_between(next, jump) => moves.push(jump),
                _ => {
                    if dy != 0 {
                        for side_dx in [-2i8, 2] {
                            if let Some(side) = next.offset(0, side_dx) {
                                if !self.is_wall_between(next, side) {
                                    moves.push(side);
                                }
                            }
                        }
                    } else {
                        for side_dy in [-2i8, 2] {
                            if let Some(side) = next.offset(side_dy, 0) {
                                if !self.is_wall_between(next, side) {
                                    moves.push(side);
                                }
                            }
                        }
                    }
                }
            }
        }

        moves
    }

    fn contains_wall(set: &HashSet<Position>, slot: Option<Position>) -> bool {
        slot.map_or(false, |p| set.contains(&p))
    }

    /// 能否在指定墙位放置指定朝向的墙
    ///
    /// 不改变任何状态，可重复调用
    pub fn can_place_wall(&self, orientation: WallOrientation, slot: Position) -> bool {
        // 墙位必须是奇数坐标且在 1~15 范围内
        if !(WALL_SLOT_MIN..=WALL_SLOT_MAX).contains(&slot.y)
            || !(WALL_SLOT_MIN..=WALL_SLOT_MAX).contains(&slot.x)
        {
            return false;
        }
        if !slot.is_wall_slot() {
            return false;
        }

        // 同一墙位冲突：任一朝向已有墙都不行
        if self.horizontal_walls.contains(&slot) || self.vertical_walls.contains(&slot) {
            return false;
        }

        // 同朝向的墙跨两格，不允许重叠
        match orientation {
            WallOrientation::Horizontal => {
                if Self::contains_wall(&self.horizontal_walls, slot.offset(0, -2))
                    || Self::contains_wall(&self.horizontal_walls, slot.offset(0, 2))
                {
                    return false;
                }
            }
            WallOrientation::Vertical => {
                if Self::contains_wall(&self.vertical_walls, slot.offset(-2, 0))
                    || Self::contains_wall(&self.vertical_walls, slot.offset(2, 0))
                {
                    return false;
                }
            }
        }

        // 事务性检查：临时放墙后双方都必须仍有通路
        let mut probe = self.clone();
        probe.insert_wall(orientation, slot);
        probe.has_path_to_goal(Player::Red) && probe.has_path_to_goal(Player::Blue)
    }

    /// 放墙
    ///
    /// 要求玩家还有剩余墙且 [`Board::can_place_wall`] 通过；
    /// 成功后扣减墙数并切换走子方，失败时状态不变
    pub fn place_wall(&mut self, player: Player, orientation: WallOrientation, slot: Position) -> bool {
        if self.walls_remaining(player) == 0 {
            return false;
        }
        if !self.can_place_wall(orientation, slot) {
            return false;
        }

        self.insert_wall(orientation, slot);
        match player {
            Player::Red => self.red_walls -= 1,
            Player::Blue => self.blue_walls -= 1,
        }
        self.switch_turn();
        true
    }

    /// 走子
    ///
    /// to 必须在 [`Board::valid_moves`] 中；成功后切换走子方，
    /// 失败时状态不变
    pub fn move_piece(&mut self, player: Player, to: Position) -> bool {
        if !self.valid_moves(player).contains(&to) {
            return false;
        }
        self.set_position(player, to);
        self.switch_turn();
        true
    }

    /// 插入一面墙
    ///
    /// 不做合法性检查、不扣墙数、不换手，供搜索做临时推演；
    /// 与 [`Board::remove_wall`] 配对使用
    pub fn insert_wall(&mut self, orientation: WallOrientation, slot: Position) {
        match orientation {
            WallOrientation::Horizontal => {
                self.horizontal_walls.insert(slot);
            }
            WallOrientation::Vertical => {
                self.vertical_walls.insert(slot);
            }
        }
    }

    /// 移除一面墙（临时推演的回滚；墙不存在时不做任何事）
    pub fn remove_wall(&mut self, orientation: WallOrientation, slot: Position) {
        match orientation {
            WallOrientation::Horizontal => {
                self.horizontal_walls.remove(&slot);
            }
            WallOrientation::Vertical => {
                self.vertical_walls.remove(&slot);
            }
        }
    }

    /// 玩家是否仍有通往目标行的路径
    ///
    /// BFS 只用正交两格步：路径存在性与轮次无关，不需要跳跃规则
    pub fn has_path_to_goal(&self, player: Player) -> bool {
        let start = self.position(player);
        let goal_row = player.goal_row();

        let mut visited: HashSet<Position> = HashSet::new();
        visited.insert(start);
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            if pos.y == goal_row {
                return true;
            }
            for &(dy, dx) in &STEP_DIRECTIONS {
                if let Some(next) = pos.offset(dy, dx) {
                    if !visited.contains(&next) && self.can_move_to(pos, next) {
                        visited.insert(next);
                        queue.push_back(next);
                    }
                }
            }
        }

        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Current Player: {}", self.current_turn.as_str())?;
        writeln!(
            f,
            "Red Walls: {}, Blue Walls: {}",
            self.red_walls, self.blue_walls
        )?;
        for y in 0..BOARD_SIZE {
            let mut row = String::new();
            for x in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(y, x);
                let ch = if pos == self.red_pos {
                    'R'
                } else if pos == self.blue_pos {
                    'B'
                } else if self.horizontal_walls.contains(&pos) {
                    '─'
                } else if self.vertical_walls.contains(&pos) {
                    '│'
                } else if pos.is_cell() {
                    '.'
                } else {
                    ' '
                };
                row.push(ch);
                row.push(' ');
            }
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}
