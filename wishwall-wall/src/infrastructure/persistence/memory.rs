//! 内存版留言集合实现
//!
//! 真实的文档集合由外部托管服务持有，本实现是它的内存替身，
//! 用于开发与 CI 环境：复刻同一份契约——存储端分配 id 与
//! createdAt、按 createdAt 升序、每次变化推送全量快照。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};
use uuid::Uuid;

use wishwall_core::error::WriteError;
use wishwall_core::model::{Message, MessageDraft, MessageSnapshot};

use crate::domain::repository::{MessageRepository, SnapshotSubscription};

/// 快照广播的积压容量；快照是全量状态，落后的接收端直接跳到最新
const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
struct StoredDoc {
    seq: u64,
    message: Message,
}

/// 托管文档集合的内存替身
pub struct MemoryMessageStore {
    collection: String,
    docs: Arc<RwLock<Vec<StoredDoc>>>,
    next_seq: AtomicU64,
    snapshots: broadcast::Sender<MessageSnapshot>,
}

impl MemoryMessageStore {
    pub fn new(collection: &str) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            collection: collection.to_string(),
            docs: Arc::new(RwLock::new(Vec::new())),
            next_seq: AtomicU64::new(0),
            snapshots,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// 当前集合的全量快照，createdAt 升序
    ///
    /// 尚未落定时间戳的文档排在已落定的之后，同组内按写入顺序。
    fn snapshot_of(docs: &[StoredDoc]) -> MessageSnapshot {
        let mut sorted: Vec<&StoredDoc> = docs.iter().collect();
        sorted.sort_by_key(|d| sort_key(d));
        MessageSnapshot::new(sorted.into_iter().map(|d| d.message.clone()).collect())
    }

    /// 必须在持有写锁期间调用：通道顺序即状态新旧顺序，
    /// 订阅端跳到最新一条才是安全的。send 同步且不阻塞。
    fn publish(&self, snapshot: MessageSnapshot) {
        // 没有订阅者时发送失败是正常情况
        let _ = self.snapshots.send(snapshot);
    }
}

fn sort_key(doc: &StoredDoc) -> (bool, Option<DateTime<Utc>>, u64) {
    (doc.message.created_at.is_none(), doc.message.created_at, doc.seq)
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new("messages")
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageStore {
    async fn create(&self, draft: MessageDraft) -> Result<String, WriteError> {
        if draft.content.is_empty() {
            // 草稿构造器已经挡掉了空正文，这里是存储端的最后防线
            return Err(WriteError::Backend(anyhow!("document content is empty")));
        }

        let id = Uuid::new_v4().to_string();
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        // 客户端草稿里的 revealed 之外的生命周期字段一律由存储端分配
        let message = Message {
            id: id.clone(),
            kind: draft.kind,
            content: draft.content,
            caption: draft.caption,
            author: draft.author,
            revealed: false,
            created_at: Some(Utc::now()),
        };

        let total = {
            let mut docs = self.docs.write().await;
            docs.push(StoredDoc { seq, message });
            let snapshot = Self::snapshot_of(&docs);
            let total = snapshot.total_count();
            self.publish(snapshot);
            total
        };
        info!(
            collection = %self.collection,
            message_id = %id,
            total,
            "document created"
        );
        Ok(id)
    }

    async fn set_revealed(&self, id: &str) -> Result<(), WriteError> {
        {
            let mut docs = self.docs.write().await;
            let doc = docs
                .iter_mut()
                .find(|d| d.message.id == id)
                .ok_or_else(|| WriteError::MessageNotFound(id.to_string()))?;
            if doc.message.revealed {
                // 幂等重试：无变化则不再推送
                debug!(message_id = %id, "set_revealed retried on already-revealed document");
                return Ok(());
            }
            doc.message.revealed = true;
            let snapshot = Self::snapshot_of(&docs);
            self.publish(snapshot);
        }
        debug!(collection = %self.collection, message_id = %id, "document revealed");
        Ok(())
    }

    async fn subscribe(&self) -> SnapshotSubscription {
        let receiver = self.snapshots.subscribe();
        let initial = {
            let docs = self.docs.read().await;
            Self::snapshot_of(&docs)
        };
        debug!(
            collection = %self.collection,
            total = initial.total_count(),
            "subscription opened with initial snapshot"
        );
        SnapshotSubscription::new(initial, receiver)
    }
}
