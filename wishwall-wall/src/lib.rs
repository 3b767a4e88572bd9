//! 愿望墙服务层
//!
//! 留言生命周期与客户端同步模型的实现：
//! - `domain` - 仓储契约、留言域服务与三个纯状态机（表单 / 礼盒 / 墙）
//! - `application` - 命令与查询的编排层
//! - `infrastructure` - 托管存储替身与对象存储适配
//! - `service` - 依赖装配

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod service;

pub use application::handlers::{RevealAction, WallCommandHandler, WallQueryHandler};
pub use application::service::WallApplication;
pub use domain::composer::{ComposerForm, ComposerState, ImageAttachment};
pub use domain::repository::{
    MessageRepository, MessageRepositoryRef, ObjectRepository, ObjectRepositoryRef,
    SnapshotSubscription, UploadContext,
};
pub use domain::reveal::{ClickOutcome, RemoteReveal, RevealCell};
pub use domain::service::WallService;
pub use domain::wall::WallView;
pub use service::bootstrap::{ApplicationBootstrap, WallContext};
