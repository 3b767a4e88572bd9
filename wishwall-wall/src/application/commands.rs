//! 编排层命令定义

use wishwall_core::model::MessageKind;

use crate::domain::composer::ImageAttachment;

/// 提交一条留言
///
/// 文字留言用 `body`；图片留言用 `image` 与可选的 `caption`。
/// 客户端侧不携带 id 与时间戳，存储端分配的才算数。
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub kind: MessageKind,
    pub body: String,
    pub author: String,
    pub caption: String,
    pub image: Option<ImageAttachment>,
}

impl SubmitMessageCommand {
    pub fn text(body: &str, author: &str) -> Self {
        Self {
            kind: MessageKind::Text,
            body: body.to_string(),
            author: author.to_string(),
            caption: String::new(),
            image: None,
        }
    }

    pub fn image(image: ImageAttachment, caption: &str, author: &str) -> Self {
        Self {
            kind: MessageKind::Image,
            body: String::new(),
            author: author.to_string(),
            caption: caption.to_string(),
            image: Some(image),
        }
    }
}

/// 揭示一条留言
#[derive(Debug, Clone)]
pub struct RevealMessageCommand {
    pub message_id: String,
}
