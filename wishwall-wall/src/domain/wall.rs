//! 墙视图
//!
//! 订阅到的每个快照整体替换本地集合——最后一个快照获胜，不做增量
//! 合并。计数是当前快照上的纯投影。揭示单元按留言 id 键控，在快照
//! 替换之间保留，本地乐观状态因此不被重渲染冲掉。

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use wishwall_core::model::{Message, MessageSnapshot};

use crate::domain::reveal::RevealCell;

/// 墙的本地视图状态
#[derive(Debug)]
pub struct WallView {
    snapshot: MessageSnapshot,
    cells: HashMap<String, RevealCell>,
    composer_visible: bool,
    open_delay: Duration,
}

impl WallView {
    pub fn new(open_delay: Duration) -> Self {
        Self {
            snapshot: MessageSnapshot::default(),
            cells: HashMap::new(),
            composer_visible: false,
            open_delay,
        }
    }

    /// 应用一个完整快照，替换整个本地副本
    ///
    /// 已有单元吸收快照中的远端状态；新留言补建单元；快照里不再
    /// 出现的 id 对应的单元被丢弃。
    pub fn apply_snapshot(&mut self, snapshot: MessageSnapshot) {
        for message in &snapshot.messages {
            match self.cells.get_mut(&message.id) {
                Some(cell) => cell.observe(message),
                None => {
                    self.cells.insert(
                        message.id.clone(),
                        RevealCell::from_message(message, self.open_delay),
                    );
                }
            }
        }
        self.cells
            .retain(|id, _| snapshot.messages.iter().any(|m| &m.id == id));
        debug!(
            total = snapshot.total_count(),
            revealed = snapshot.revealed_count(),
            "wall snapshot applied"
        );
        self.snapshot = snapshot;
    }

    /// 快照给定的顺序（存储端已按 createdAt 升序）
    pub fn messages(&self) -> &[Message] {
        &self.snapshot.messages
    }

    pub fn snapshot(&self) -> &MessageSnapshot {
        &self.snapshot
    }

    pub fn total_count(&self) -> usize {
        self.snapshot.total_count()
    }

    pub fn revealed_count(&self) -> usize {
        self.snapshot.revealed_count()
    }

    /// 空墙状态，驱动 "No Messages Yet" 分支
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn cell(&self, id: &str) -> Option<&RevealCell> {
        self.cells.get(id)
    }

    pub fn cell_mut(&mut self, id: &str) -> Option<&mut RevealCell> {
        self.cells.get_mut(id)
    }

    /// 表单遮罩的显隐是纯本地开关，从不写回存储
    pub fn show_composer(&mut self) {
        self.composer_visible = true;
    }

    pub fn hide_composer(&mut self) {
        self.composer_visible = false;
    }

    pub fn composer_visible(&self) -> bool {
        self.composer_visible
    }
}
