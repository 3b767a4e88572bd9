//! 礼盒揭示单元
//!
//! 每条留言一个两态状态机：hidden → revealed 单向转换。本地标志在
//! 用户点击时立即翻转（乐观），远端确认用显式的
//! Unrevealed / PendingConfirm / Confirmed 子状态单独记账，
//! 本地投影和远端提交不混为一谈。

use std::time::Duration;

use tracing::debug;

use wishwall_core::model::Message;

/// 远端 revealed 标志的确认状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteReveal {
    /// 尚未发起写
    Unrevealed,
    /// 本地已翻转但远端写尚未确认（写失败也停在这里，下次点击补发）
    PendingConfirm,
    /// 远端已确认为 true
    Confirmed,
}

/// 一次点击对调用方的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 首次揭示：需要发起 set_revealed，并在 `open_after` 之后打开详情
    Reveal { open_after: Duration },
    /// 已揭示：立即打开详情；`retry_write` 为真时补发一次 set_revealed
    Open { retry_write: bool },
}

/// 单条留言的揭示单元
#[derive(Debug, Clone)]
pub struct RevealCell {
    message_id: String,
    revealed: bool,
    remote: RemoteReveal,
    detail_open: bool,
    open_delay: Duration,
}

impl RevealCell {
    /// 按留言当前的远端状态建立单元
    pub fn from_message(message: &Message, open_delay: Duration) -> Self {
        Self {
            message_id: message.id.clone(),
            revealed: message.revealed,
            remote: if message.revealed {
                RemoteReveal::Confirmed
            } else {
                RemoteReveal::Unrevealed
            },
            detail_open: false,
            open_delay,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn remote(&self) -> RemoteReveal {
        self.remote
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// 用户点击礼盒
    ///
    /// 隐藏态：立即翻转本地标志（不等待远端往返），指示调用方发起
    /// 远端写并延迟打开详情。已揭示态：直接打开详情，不再发写；
    /// 仅当上一次写还停留在待确认时要求补发。
    pub fn click(&mut self) -> ClickOutcome {
        if !self.revealed {
            self.revealed = true;
            self.remote = RemoteReveal::PendingConfirm;
            debug!(message_id = %self.message_id, "gift box revealed locally");
            ClickOutcome::Reveal {
                open_after: self.open_delay,
            }
        } else {
            self.detail_open = true;
            ClickOutcome::Open {
                retry_write: self.remote == RemoteReveal::PendingConfirm,
            }
        }
    }

    /// 远端写确认成功
    pub fn write_confirmed(&mut self) {
        if self.remote == RemoteReveal::PendingConfirm {
            self.remote = RemoteReveal::Confirmed;
        }
    }

    /// 远端写失败：本地保持已揭示，确认态停在 PendingConfirm
    ///
    /// 本地与远端的分歧由此变得可观测，下次点击会补发写入。
    pub fn write_failed(&mut self) {
        debug!(
            message_id = %self.message_id,
            "set_revealed write failed, staying pending"
        );
    }

    /// 延迟结束后打开详情视图
    pub fn open_detail(&mut self) {
        if self.revealed {
            self.detail_open = true;
        }
    }

    /// 关闭详情视图：回到已揭示的收起展示，绝不回到 hidden
    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    /// 合入快照中的远端状态
    ///
    /// 快照里 revealed=true 无条件确认本单元（可能来自其他客户端的
    /// 揭示）；revealed=false 不会撤销本地的乐观翻转——转换是单调的。
    pub fn observe(&mut self, message: &Message) {
        debug_assert_eq!(self.message_id, message.id);
        if message.revealed {
            self.revealed = true;
            self.remote = RemoteReveal::Confirmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishwall_core::model::MessageKind;

    const OPEN_DELAY: Duration = Duration::from_millis(800);

    fn message(id: &str, revealed: bool) -> Message {
        Message {
            id: id.to_string(),
            kind: MessageKind::Text,
            content: "Happy Bday!".to_string(),
            caption: None,
            author: "Anonymous".to_string(),
            revealed,
            created_at: None,
        }
    }

    #[test]
    fn first_click_reveals_and_schedules_detail_open() {
        let mut cell = RevealCell::from_message(&message("m1", false), OPEN_DELAY);
        assert!(!cell.is_revealed());

        let outcome = cell.click();
        assert_eq!(outcome, ClickOutcome::Reveal { open_after: OPEN_DELAY });
        assert!(cell.is_revealed());
        assert_eq!(cell.remote(), RemoteReveal::PendingConfirm);

        cell.write_confirmed();
        assert_eq!(cell.remote(), RemoteReveal::Confirmed);

        cell.open_detail();
        assert!(cell.is_detail_open());
    }

    #[test]
    fn subsequent_clicks_open_without_further_writes() {
        let mut cell = RevealCell::from_message(&message("m1", false), OPEN_DELAY);
        cell.click();
        cell.write_confirmed();
        cell.close_detail();

        let outcome = cell.click();
        assert_eq!(outcome, ClickOutcome::Open { retry_write: false });
        assert!(cell.is_detail_open());
    }

    #[test]
    fn failed_write_stays_pending_and_next_click_retries() {
        let mut cell = RevealCell::from_message(&message("m1", false), OPEN_DELAY);
        cell.click();
        cell.write_failed();
        assert!(cell.is_revealed());
        assert_eq!(cell.remote(), RemoteReveal::PendingConfirm);

        let outcome = cell.click();
        assert_eq!(outcome, ClickOutcome::Open { retry_write: true });
    }

    #[test]
    fn close_detail_never_returns_to_hidden() {
        let mut cell = RevealCell::from_message(&message("m1", false), OPEN_DELAY);
        cell.click();
        cell.open_detail();
        cell.close_detail();
        assert!(cell.is_revealed());
        assert!(!cell.is_detail_open());
    }

    #[test]
    fn snapshot_confirms_cell_regardless_of_write_outcome() {
        let mut cell = RevealCell::from_message(&message("m1", false), OPEN_DELAY);
        cell.click();
        cell.write_failed();

        cell.observe(&message("m1", true));
        assert_eq!(cell.remote(), RemoteReveal::Confirmed);

        // revealed=false 的快照不撤销本地翻转
        let mut optimistic = RevealCell::from_message(&message("m2", false), OPEN_DELAY);
        optimistic.click();
        optimistic.observe(&message("m2", false));
        assert!(optimistic.is_revealed());
    }

    #[test]
    fn already_revealed_message_starts_confirmed() {
        let cell = RevealCell::from_message(&message("m1", true), OPEN_DELAY);
        assert!(cell.is_revealed());
        assert_eq!(cell.remote(), RemoteReveal::Confirmed);
    }
}
