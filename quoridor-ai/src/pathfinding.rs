//! 最短路径计算与缓存
//!
//! Path Oracle：BFS 最短距离/路径 + 有界 DFS 路径计数。
//! 查询结果以 (棋盘指纹, 玩家) 为键缓存，缓存大小有上限

use std::collections::{HashMap, HashSet, VecDeque};

use protocol::{Board, Player, Position, STEP_DIRECTIONS};

use crate::zobrist::ZobristTable;

/// 每种缓存的最大条目数
const MAX_CACHE_ENTRIES: usize = 10_000;

/// 无通路时评估用的距离替代值
const BLOCKED_DISTANCE: i32 = 999;

/// 路径缓存统计
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleStats {
    /// 命中次数
    pub hits: u64,
    /// 查询次数
    pub probes: u64,
}

impl OracleStats {
    /// 命中率
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}

/// 路径预言机
///
/// 由搜索引擎独占持有，每次顶层搜索开始时 clear()；
/// 缓存命中与否只影响性能，不影响结果
pub struct PathOracle {
    zobrist: ZobristTable,
    distances: HashMap<(u64, Player), Option<u32>>,
    paths: HashMap<(u64, Player), Vec<Position>>,
    stats: OracleStats,
}

impl PathOracle {
    /// 创建新的预言机
    pub fn new() -> Self {
        Self {
            zobrist: ZobristTable::new(),
            distances: HashMap::new(),
            paths: HashMap::new(),
            stats: OracleStats::default(),
        }
    }

    /// 清空缓存与统计（每次顶层搜索开始时调用，限制长对局的内存增长）
    pub fn clear(&mut self) {
        self.distances.clear();
        self.paths.clear();
        self.stats = OracleStats::default();
    }

    /// 获取缓存统计
    pub fn stats(&self) -> OracleStats {
        self.stats
    }

    /// 计算棋盘指纹（缓存键）
    pub fn fingerprint(&self, board: &Board) -> u64 {
        self.zobrist.fingerprint(board)
    }

    /// BFS 最短步数；None 表示无通路
    pub fn shortest_distance(&mut self, board: &Board, player: Player) -> Option<u32> {
        let key = (self.zobrist.fingerprint(board), player);
        self.stats.probes += 1;

        if let Some(&cached) = self.distances.get(&key) {
            self.stats.hits += 1;
            return cached;
        }

        let result = Self::bfs_distance(board, player);
        if self.distances.len() >= MAX_CACHE_ENTRIES {
            Self::evict_quarter(&mut self.distances);
        }
        self.distances.insert(key, result);
        result
    }

    /// 最短步数的整数形式；无通路时按 999 计（合法对局中不会出现）
    pub fn distance_score(&mut self, board: &Board, player: Player) -> i32 {
        self.shortest_distance(board, player)
            .map(|d| d as i32)
            .unwrap_or(BLOCKED_DISTANCE)
    }

    /// BFS 最短路径，含起点；无通路时返回空
    pub fn shortest_path(&mut self, board: &Board, player: Player) -> Vec<Position> {
        let key = (self.zobrist.fingerprint(board), player);
        self.stats.probes += 1;

        if let Some(cached) = self.paths.get(&key) {
            self.stats.hits += 1;
            return cached.clone();
        }

        let result = Self::bfs_path(board, player);
        if self.paths.len() >= MAX_CACHE_ENTRIES {
            Self::evict_quarter(&mut self.paths);
        }
        self.paths.insert(key, result.clone());
        result
    }

    /// 有界 DFS 路径计数：统计到目标行的简单路径数，数到 cap 为止
    ///
    /// 只有高级评估使用，不走缓存
    pub fn count_paths(&self, board: &Board, player: Player, cap: u32) -> u32 {
        let start = board.position(player);
        let goal_row = player.goal_row();
        let mut visited: HashSet<Position> = HashSet::new();
        let mut count = 0u32;

        Self::dfs_paths(board, goal_row, start, cap, &mut visited, &mut count);
        count.min(cap)
    }

    /// 缓存满时丢弃约四分之一的条目
    ///
    /// 淘汰哪些条目是任意的，不维护 LRU 顺序
    fn evict_quarter<V>(map: &mut HashMap<(u64, Player), V>) {
        let doomed: Vec<(u64, Player)> = map.keys().take(MAX_CACHE_ENTRIES / 4).copied().collect();
        for key in doomed {
            map.remove(&key);
        }
    }

    fn bfs_distance(board: &Board, player: Player) -> Option<u32> {
        let start = board.position(player);
        let goal_row = player.goal_row();

        let mut visited: HashSet<Position> = HashSet::new();
        visited.insert(start);
        let mut queue = VecDeque::new();
        queue.push_back((start, 0u32));

        while let Some((pos, distance)) = queue.pop_front() {
            if pos.y == goal_row {
                return Some(distance);
            }
            for &(dy, dx) in &STEP_DIRECTIONS {
                if let Some(next) = pos.offset(dy, dx) {
                    if !visited.contains(&next) && board.can_move_to(pos, next) {
                        visited.insert(next);
                        queue.push_back((next, distance + 1));
                    }
                }
            }
        }

        None
    }

    fn bfs_path(board: &Board, player: Player) -> Vec<Position> {
        let start = board.position(player);
        let goal_row = player.goal_row();

        let mut parents: HashMap<Position, Position> = HashMap::new();
        let mut visited: HashSet<Position> = HashSet::new();
        visited.insert(start);
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            if pos.y == goal_row {
                // 按父指针回溯出完整路径
                let mut path = vec![pos];
                let mut current = pos;
                while let Some(&parent) = parents.get(&current) {
                    path.push(parent);
                    current = parent;
                }
                path.reverse();
                return path;
            }
            for &(dy, dx) in &STEP_DIRECTIONS {
                if let Some(next) = pos.offset(dy, dx) {
                    if !visited.contains(&next) && board.can_move_to(pos, next) {
                        visited.insert(next);
                        parents.insert(next, pos);
                        queue.push_back(next);
                    }
                }
            }
        }

        Vec::new()
    }

    fn dfs_paths(
        board: &Board,
        goal_row: u8,
        pos: Position,
        cap: u32,
        visited: &mut HashSet<Position>,
        count: &mut u32,
    ) {
        if pos.y == goal_row {
            *count += 1;
            return;
        }
        if *count >= cap {
            return;
        }

        visited.insert(pos);
        for &(dy, dx) in &STEP_DIRECTIONS {
            if let Some(next) = pos.offset(dy, dx) {
                if !visited.contains(&next) && board.can_move_to(pos, next) {
                    Self::dfs_paths(board, goal_row, next, cap, visited, count);
                }
            }
        }
        visited.remove(&pos);
    }
}

impl Default for PathOracle {
    fn default() -> Self {
        Self::new()
    }
}
