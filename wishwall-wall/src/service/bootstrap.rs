//! 应用启动器 - 负责依赖注入与装配

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use wishwall_core::config::WishWallConfig;

use crate::application::handlers::{WallCommandHandler, WallQueryHandler};
use crate::application::service::WallApplication;
use crate::domain::repository::MessageRepositoryRef;
use crate::domain::service::WallService;
use crate::infrastructure::object_store::build_object_store;
use crate::infrastructure::persistence::MemoryMessageStore;

/// 装配完成的应用上下文，由嵌入方（UI 层）驱动
pub struct WallContext {
    pub application: Arc<WallApplication>,
    pub command_handler: Arc<WallCommandHandler>,
    pub query_handler: Arc<WallQueryHandler>,
}

/// 应用启动器
pub struct ApplicationBootstrap;

impl ApplicationBootstrap {
    /// 按配置装配全部服务
    pub async fn create_context(config: &WishWallConfig) -> Result<WallContext> {
        let object_repo = build_object_store(config).await?;
        if object_repo.is_none() {
            info!("no object store configured, image messages disabled");
        }

        // 托管文档存储是外部协作方，这里装配它的内存替身
        let messages: MessageRepositoryRef =
            Arc::new(MemoryMessageStore::new(&config.wall.collection));

        let service = Arc::new(WallService::new(messages, object_repo));
        let command_handler = Arc::new(WallCommandHandler::new(service.clone(), &config.wall));
        let query_handler = Arc::new(WallQueryHandler::new());
        let application = Arc::new(WallApplication::new(service, config.wall.clone()));

        info!(
            collection = %config.wall.collection,
            "wish wall context ready"
        );

        Ok(WallContext {
            application,
            command_handler,
            query_handler,
        })
    }
}
