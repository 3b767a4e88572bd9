//! 查询处理器（编排层）- 当前快照上的纯投影

use wishwall_core::model::MessageKind;

use crate::domain::wall::WallView;

/// 墙头部的聚合计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallStats {
    pub total: usize,
    pub revealed: usize,
}

/// 详情视图需要的展示数据
#[derive(Debug, Clone)]
pub struct MessageDetail {
    pub kind: MessageKind,
    /// 文字留言为正文，图片留言为图片 URL
    pub content: String,
    pub caption: Option<String>,
    pub author: String,
    pub created_at_display: String,
}

/// 愿望墙查询处理器
#[derive(Debug, Default)]
pub struct WallQueryHandler;

impl WallQueryHandler {
    pub fn new() -> Self {
        Self
    }

    /// 聚合计数，每次都从当前快照重新推导
    pub fn handle_wall_stats(&self, view: &WallView) -> WallStats {
        WallStats {
            total: view.total_count(),
            revealed: view.revealed_count(),
        }
    }

    /// 单条留言的详情展示数据
    pub fn handle_message_detail(&self, view: &WallView, id: &str) -> Option<MessageDetail> {
        let message = view.snapshot().get(id)?;
        Some(MessageDetail {
            kind: message.kind,
            content: message.content.clone(),
            caption: message.caption.clone(),
            author: message.author.clone(),
            created_at_display: message.created_at_display(),
        })
    }
}
