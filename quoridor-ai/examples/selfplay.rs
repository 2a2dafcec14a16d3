//! AI 自对弈演示
//!
//! 两个引擎会话互为对手，用线上编码格式来回传走法。
//!
//! 运行方式:
//! ```bash
//! cargo run -p quoridor-ai --example selfplay
//! ```

use protocol::{Notation, Player};
use quoridor_ai::{AiSession, Difficulty};

fn main() {
    // 初始化日志（debug 级别能看到每步搜索的节点数与缓存命中）
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Quoridor AI 自对弈 ===\n");

    let mut red = AiSession::new(Player::Red, Difficulty::Easy);
    let mut blue = AiSession::new(Player::Blue, Difficulty::Easy);

    // 红方先行
    let first = red.opening_move().expect("开局必有合法走法");
    let encoded = Notation::encode(&first);
    println!("红方: {encoded}");
    assert!(blue.apply_opponent_move(&encoded));

    for _round in 1..=60 {
        // 蓝方回应
        let Some(mv) = blue.compute_best_move() else {
            println!("蓝方无子可走");
            break;
        };
        let encoded = Notation::encode(&mv);
        println!("蓝方: {encoded}");
        assert!(red.apply_opponent_move(&encoded));
        if blue.is_game_over() {
            break;
        }

        // 红方回应
        let Some(mv) = red.compute_best_move() else {
            println!("红方无子可走");
            break;
        };
        let encoded = Notation::encode(&mv);
        println!("红方: {encoded}");
        assert!(blue.apply_opponent_move(&encoded));
        if red.is_game_over() {
            break;
        }
    }

    println!("\n{}", red.board());
    match red.winner() {
        Some(player) => println!("胜者: {}", player.as_str()),
        None => println!("到达步数上限，未分出胜负"),
    }
}
