//! 愿望墙留言模型
//!
//! 留言文档由外部文档存储托管，字段名受外部契约约束：
//! `{kind, content, caption?, author, revealed, createdAt}`，
//! 集合按 `createdAt` 升序排列。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// 作者留空时的默认署名
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// 留言类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// 文字留言 - content 为留言正文
    Text,
    /// 图片留言 - content 为已上传图片的可解析 URL
    Image,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
        }
    }
}

impl FromStr for MessageKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(MessageKind::Text),
            "image" => Ok(MessageKind::Image),
            _ => Err(()),
        }
    }
}

/// 集合中的一条留言文档
///
/// `id` 与 `created_at` 均由存储端分配。时间戳是异步落定的，
/// 文档可能先以暂缺时间戳的状态出现，随后才进入最终排序位置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub author: String,
    pub revealed: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// 详情视图里展示的时间文案
    pub fn created_at_display(&self) -> String {
        match self.created_at {
            Some(ts) => ts.format("%b %e, %I:%M %p").to_string(),
            None => "just now".to_string(),
        }
    }
}

/// 提交给 `create` 的留言草稿
///
/// 草稿不携带 id 与时间戳，存储端分配的才是正式值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDraft {
    pub kind: MessageKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub author: String,
    pub revealed: bool,
}

impl MessageDraft {
    /// 构造文字留言草稿，正文去除首尾空白后不得为空
    pub fn text(body: &str, author: &str) -> Result<Self, ValidationError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ValidationError::EmptyMessageBody);
        }
        Ok(Self {
            kind: MessageKind::Text,
            content: body.to_string(),
            caption: None,
            author: normalize_author(author),
            revealed: false,
        })
    }

    /// 构造图片留言草稿，调用方必须先完成上传并拿到 URL
    pub fn image(url: &str, caption: &str, author: &str) -> Result<Self, ValidationError> {
        if url.trim().is_empty() {
            return Err(ValidationError::MissingImage);
        }
        let caption = caption.trim();
        Ok(Self {
            kind: MessageKind::Image,
            content: url.to_string(),
            caption: if caption.is_empty() {
                None
            } else {
                Some(caption.to_string())
            },
            author: normalize_author(author),
            revealed: false,
        })
    }
}

/// 作者署名留空时回退为匿名
pub fn normalize_author(author: &str) -> String {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        ANONYMOUS_AUTHOR.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 订阅推送的全量集合快照
///
/// 快照是完整状态而非增量，消费方以"整体替换本地副本"的方式应用。
/// 计数是纯投影，每次都从当前快照重新推导，不单独维护计数器。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub messages: Vec<Message>,
}

impl MessageSnapshot {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn total_count(&self) -> usize {
        self.messages.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.messages.iter().filter(|m| m.revealed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_draft_rejects_empty_body() {
        assert!(matches!(
            MessageDraft::text("   \n ", "Sam"),
            Err(ValidationError::EmptyMessageBody)
        ));
    }

    #[test]
    fn blank_author_defaults_to_anonymous() {
        let draft = MessageDraft::text("Happy Bday!", "  ").unwrap();
        assert_eq!(draft.author, ANONYMOUS_AUTHOR);
        assert_eq!(draft.content, "Happy Bday!");
        assert!(!draft.revealed);
    }

    #[test]
    fn image_draft_requires_resolved_url() {
        assert!(matches!(
            MessageDraft::image("", "a caption", "Kim"),
            Err(ValidationError::MissingImage)
        ));
        let draft = MessageDraft::image("https://blobs/x.png", "  ", "Kim").unwrap();
        assert_eq!(draft.kind, MessageKind::Image);
        assert_eq!(draft.caption, None);
    }

    #[test]
    fn document_wire_field_names() {
        // 外部契约：kind/content/author/revealed/createdAt
        let message = Message {
            id: "m1".to_string(),
            kind: MessageKind::Text,
            content: "hi".to_string(),
            caption: None,
            author: ANONYMOUS_AUTHOR.to_string(),
            revealed: false,
            created_at: Some(Utc::now()),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["kind"], "text");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("caption").is_none());
        assert_eq!(value["revealed"], false);
    }

    #[test]
    fn snapshot_counts_are_pure_projections() {
        let mk = |id: &str, revealed: bool| Message {
            id: id.to_string(),
            kind: MessageKind::Text,
            content: "hi".to_string(),
            caption: None,
            author: ANONYMOUS_AUTHOR.to_string(),
            revealed,
            created_at: None,
        };
        let snapshot = MessageSnapshot::new(vec![mk("a", true), mk("b", false), mk("c", true)]);
        assert_eq!(snapshot.total_count(), 3);
        assert_eq!(snapshot.revealed_count(), 2);
        assert!(snapshot.revealed_count() <= snapshot.total_count());
    }
}
