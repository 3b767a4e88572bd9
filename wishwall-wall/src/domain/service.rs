//! 留言域服务
//!
//! 提交与揭示的业务规则都收在这里：校验闸门、图片"先上传后建档"
//! 的顺序约束、对仓储的写入。编排层只负责驱动表单状态机。

use anyhow::anyhow;
use tracing::{info, instrument};

use wishwall_core::error::{UploadError, WallError, WriteError};
use wishwall_core::model::MessageDraft;

use crate::domain::composer::ImageAttachment;
use crate::domain::repository::{
    MessageRepositoryRef, ObjectRepositoryRef, SnapshotSubscription, UploadContext,
};

/// 愿望墙域服务
pub struct WallService {
    messages: MessageRepositoryRef,
    objects: Option<ObjectRepositoryRef>,
}

impl WallService {
    pub fn new(messages: MessageRepositoryRef, objects: Option<ObjectRepositoryRef>) -> Self {
        Self { messages, objects }
    }

    /// 提交文字留言，返回存储端分配的 id
    #[instrument(skip(self, body))]
    pub async fn submit_text(&self, body: &str, author: &str) -> Result<String, WallError> {
        let draft = MessageDraft::text(body, author)?;
        let id = self.messages.create(draft).await?;
        info!(message_id = %id, kind = "text", "message created");
        Ok(id)
    }

    /// 上传图片并返回可持久访问的 URL
    ///
    /// 空载荷直接拒绝；没有配置对象存储时图片留言不可用。
    pub async fn upload_image(&self, attachment: &ImageAttachment) -> Result<String, UploadError> {
        if attachment.payload.is_empty() {
            return Err(UploadError::EmptyPayload);
        }
        let objects = self
            .objects
            .as_ref()
            .ok_or_else(|| UploadError::Backend(anyhow!("no object store configured")))?;
        let context = UploadContext {
            file_name: &attachment.file_name,
            mime_type: &attachment.mime_type,
            payload: &attachment.payload,
        };
        let url = objects.upload(&context).await?;
        info!(file_name = %attachment.file_name, url = %url, "image uploaded");
        Ok(url)
    }

    /// 提交图片留言：阻塞直到上传解析出 URL，之后才构造草稿并 create
    #[instrument(skip(self, attachment, caption))]
    pub async fn submit_image(
        &self,
        attachment: &ImageAttachment,
        caption: &str,
        author: &str,
    ) -> Result<String, WallError> {
        let url = self.upload_image(attachment).await?;
        let draft = MessageDraft::image(&url, caption, author)?;
        let id = self.messages.create(draft).await?;
        info!(message_id = %id, kind = "image", "message created");
        Ok(id)
    }

    /// 将一条留言的 revealed 置为 true，幂等、可重试
    pub async fn reveal(&self, id: &str) -> Result<(), WriteError> {
        self.messages.set_revealed(id).await
    }

    /// 打开集合快照订阅
    pub async fn subscribe(&self) -> SnapshotSubscription {
        self.messages.subscribe().await
    }

    pub fn has_object_store(&self) -> bool {
        self.objects.is_some()
    }
}
