//! 远端存储适配契约
//!
//! 外部托管的文档存储与对象存储在这里收敛成两个仓储 trait。
//! 写入方不能假设成功即已可见：确认是通过订阅重新推送来体现的。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use wishwall_core::error::{UploadError, WriteError};
use wishwall_core::model::{MessageDraft, MessageSnapshot};

/// 留言集合仓储
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// 持久化一条新留言，id 与 createdAt 由存储端分配，返回分配的 id
    async fn create(&self, draft: MessageDraft) -> Result<String, WriteError>;

    /// 将 revealed 置为 true；幂等意图，重试安全
    async fn set_revealed(&self, id: &str) -> Result<(), WriteError>;

    /// 订阅按 createdAt 升序的全量快照流
    ///
    /// 订阅建立时立即得到一次当前状态的推送，之后每次观测到变化推一次。
    async fn subscribe(&self) -> SnapshotSubscription;
}

pub type MessageRepositoryRef = Arc<dyn MessageRepository>;

/// 待上传对象的描述
pub struct UploadContext<'a> {
    pub file_name: &'a str,
    pub mime_type: &'a str,
    pub payload: &'a [u8],
}

/// 对象存储仓储
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// 写入对象，返回对象键
    async fn put_object(&self, context: &UploadContext<'_>) -> Result<String, UploadError>;

    /// 把对象键解析为可持久访问的 URL
    async fn resolve_url(&self, object_key: &str) -> Result<String, UploadError>;

    /// 上传并直接返回可访问 URL，留言草稿只在拿到 URL 之后才构造
    async fn upload(&self, context: &UploadContext<'_>) -> Result<String, UploadError> {
        let key = self.put_object(context).await?;
        self.resolve_url(&key).await
    }
}

pub type ObjectRepositoryRef = Arc<dyn ObjectRepository>;

/// 打开中的快照订阅
///
/// 快照是全量状态推送而不是增量流。接收端落后时直接跳到最新一条，
/// 中间状态可以安全丢弃。取消订阅即停止推送并释放接收资源。
pub struct SnapshotSubscription {
    initial: Option<MessageSnapshot>,
    receiver: broadcast::Receiver<MessageSnapshot>,
}

impl SnapshotSubscription {
    pub fn new(initial: MessageSnapshot, receiver: broadcast::Receiver<MessageSnapshot>) -> Self {
        Self {
            initial: Some(initial),
            receiver,
        }
    }

    /// 下一个快照；首次调用返回订阅建立时的即时推送
    ///
    /// 存储端关闭后返回 `None`。
    pub async fn recv(&mut self) -> Option<MessageSnapshot> {
        if let Some(snapshot) = self.initial.take() {
            return Some(snapshot);
        }
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "snapshot receiver lagged, catching up to freshest");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// 显式取消订阅
    pub fn cancel(self) {
        // 接收端随 self 一起释放
    }
}
