//! 对局会话门面
//!
//! 一个 [`AiSession`] 服务一整局游戏：持有棋盘与搜索引擎，
//! 接收对手的编码走法、计算并应用己方走法。
//! 搜索是阻塞的 CPU 计算且内部不加锁，调用方需要串行访问；
//! 想中途取消只能在外层任务边界丢弃结果

use protocol::{Board, Difficulty, GameSummary, Move, Notation, Player};
use tracing::{error, warn};

use crate::search::AiEngine;

/// AI 对局会话
pub struct AiSession {
    /// 引擎执子的阵营
    player: Player,
    /// 对手阵营
    opponent: Player,
    board: Board,
    engine: AiEngine,
}

impl AiSession {
    /// 创建新对局（棋盘为初始状态，红方先行）
    pub fn new(player: Player, difficulty: Difficulty) -> Self {
        Self {
            player,
            opponent: player.opponent(),
            board: Board::new(),
            engine: AiEngine::from_difficulty(player, difficulty),
        }
    }

    /// 引擎执红先行时计算并应用开局走法
    ///
    /// 对局开始时调用一次；引擎执蓝则返回 None，等对手先走
    pub fn opening_move(&mut self) -> Option<Move> {
        if self.player != Player::Red {
            return None;
        }
        self.compute_best_move()
    }

    /// 应用对手的编码走法
    ///
    /// 解析失败或走法不合法时返回 false，棋盘状态不变
    pub fn apply_opponent_move(&mut self, encoded: &str) -> bool {
        let mv = match Notation::parse(encoded) {
            Ok(mv) => mv,
            Err(err) => {
                warn!(%err, encoded, "无法解析对手走法");
                return false;
            }
        };

        let applied = match mv {
            Move::Piece { to } => self.board.move_piece(self.opponent, to),
            Move::Wall { orientation, at } => self.board.place_wall(self.opponent, orientation, at),
        };
        if !applied {
            warn!(%mv, "对手走法不合法，已拒绝");
        }
        applied
    }

    /// 计算己方最佳走法并应用到棋盘
    ///
    /// 返回 None 表示没有任何合法走法（对局无法继续）
    pub fn compute_best_move(&mut self) -> Option<Move> {
        let mv = self.engine.search(&self.board)?;

        let applied = match mv {
            Move::Piece { to } => self.board.move_piece(self.player, to),
            Move::Wall { orientation, at } => self.board.place_wall(self.player, orientation, at),
        };
        if !applied {
            // 搜索返回的走法必须合法，走到这里说明引擎内部状态不一致
            error!(%mv, "引擎给出的走法无法应用");
            return None;
        }

        Some(mv)
    }

    /// 对局是否结束
    pub fn is_game_over(&self) -> bool {
        self.board.is_goal(Player::Red) || self.board.is_goal(Player::Blue)
    }

    /// 胜者
    pub fn winner(&self) -> Option<Player> {
        if self.board.is_goal(Player::Red) {
            Some(Player::Red)
        } else if self.board.is_goal(Player::Blue) {
            Some(Player::Blue)
        } else {
            None
        }
    }

    /// 生成当前对局的状态摘要
    pub fn summary(&mut self) -> GameSummary {
        let red_distance = self
            .engine
            .oracle_mut()
            .shortest_distance(&self.board, Player::Red);
        let blue_distance = self
            .engine
            .oracle_mut()
            .shortest_distance(&self.board, Player::Blue);

        GameSummary {
            red_position: self.board.red_pos,
            blue_position: self.board.blue_pos,
            red_walls_remaining: self.board.red_walls,
            blue_walls_remaining: self.board.blue_walls,
            current_player: self.board.current_turn,
            red_distance_to_goal: red_distance,
            blue_distance_to_goal: blue_distance,
            is_game_over: self.is_game_over(),
            winner: self.winner(),
        }
    }

    /// 重置为开局状态
    pub fn reset(&mut self) {
        self.board = Board::new();
    }

    /// 当前棋盘（只读）
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 引擎执子的阵营
    pub fn player(&self) -> Player {
        self.player
    }
}
