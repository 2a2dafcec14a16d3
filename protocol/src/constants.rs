//! 协议常量定义

/// 棋盘边长（17x17 坐标系：偶数坐标为棋子格，奇数坐标为墙位）
pub const BOARD_SIZE: u8 = 17;

/// 每方初始墙数
pub const INITIAL_WALLS: u8 = 10;

/// 墙位坐标下限
pub const WALL_SLOT_MIN: u8 = 1;

/// 墙位坐标上限
pub const WALL_SLOT_MAX: u8 = 15;

/// 红方目标行（红方从 y=16 出发，走到 y=0 获胜）
pub const RED_GOAL_ROW: u8 = 0;

/// 蓝方目标行（蓝方从 y=0 出发，走到 y=16 获胜）
pub const BLUE_GOAL_ROW: u8 = 16;

/// 棋盘中心坐标（行列相同）
pub const BOARD_CENTER: u8 = 8;

/// 正交移动方向 (dy, dx)，每步跨两格
///
/// 顺序固定：路径搜索按此顺序扩展，保证平局时的路径形状可复现
pub const STEP_DIRECTIONS: [(i8, i8); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];
