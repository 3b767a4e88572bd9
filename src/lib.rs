//! Wishwall Core 共享内核
//!
//! - 留言数据模型与集合快照
//! - 统一错误分类
//! - 应用配置加载

pub mod config;
pub mod error;
pub mod model;

pub use config::{LocalStorageConfig, ObjectStoreConfig, WallConfig, WishWallConfig};
pub use error::{UploadError, ValidationError, WallError, WriteError};
pub use model::{Message, MessageDraft, MessageKind, MessageSnapshot};
