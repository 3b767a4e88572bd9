//! 愿望墙应用服务
//!
//! 持有域服务与行为配置，负责打开墙视图：建立订阅、应用即时
//! 快照。视图的生命周期内只开一条订阅，卸载时取消。

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use wishwall_core::config::WallConfig;

use crate::domain::repository::SnapshotSubscription;
use crate::domain::service::WallService;
use crate::domain::wall::WallView;

pub struct WallApplication {
    service: Arc<WallService>,
    wall_config: WallConfig,
}

impl WallApplication {
    pub fn new(service: Arc<WallService>, wall_config: WallConfig) -> Self {
        Self {
            service,
            wall_config,
        }
    }

    pub fn service(&self) -> Arc<WallService> {
        self.service.clone()
    }

    /// 揭示后到打开详情的固定延迟
    pub fn reveal_open_delay(&self) -> Duration {
        Duration::from_millis(self.wall_config.reveal_open_delay_ms)
    }

    /// 成功确认窗口
    pub fn success_confirmation(&self) -> Duration {
        Duration::from_millis(self.wall_config.success_confirmation_ms)
    }

    /// 打开墙视图：建立订阅并应用订阅建立时的即时快照
    ///
    /// 之后的推送由调用方循环 `subscription.recv()` 并
    /// `view.apply_snapshot()`；视图卸载时 `subscription.cancel()`。
    pub async fn open_wall(&self) -> (WallView, SnapshotSubscription) {
        let mut subscription = self.service.subscribe().await;
        let mut view = WallView::new(self.reveal_open_delay());
        if let Some(initial) = subscription.recv().await {
            view.apply_snapshot(initial);
        }
        info!(total = view.total_count(), "wall view opened");
        (view, subscription)
    }
}
