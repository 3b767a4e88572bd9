//! 命令处理器（编排层）- 驱动表单与礼盒状态机，调用领域服务

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use wishwall_core::config::WallConfig;
use wishwall_core::error::{ValidationError, WallError, WriteError};
use wishwall_core::model::MessageKind;

use crate::application::commands::{RevealMessageCommand, SubmitMessageCommand};
use crate::domain::composer::{ComposerForm, SubmitPlan};
use crate::domain::reveal::{ClickOutcome, RevealCell};
use crate::domain::service::WallService;

/// 一次礼盒点击的处理结果
///
/// 远端写的结果显式携带在动作里：本地 UI 的揭示与打开不被写失败
/// 阻塞，但失败必须对调用方可见。
#[derive(Debug)]
pub enum RevealAction {
    /// 首次揭示：详情在 `open_after` 之后打开
    Revealed {
        open_after: Duration,
        write: Result<(), WriteError>,
    },
    /// 已揭示：详情立即打开；`write` 仅在补发了远端写时存在
    Opened {
        write: Option<Result<(), WriteError>>,
    },
}

/// 愿望墙命令处理器
pub struct WallCommandHandler {
    service: Arc<WallService>,
    success_confirmation: Duration,
}

impl WallCommandHandler {
    pub fn new(service: Arc<WallService>, config: &WallConfig) -> Self {
        Self {
            service,
            success_confirmation: Duration::from_millis(config.success_confirmation_ms),
        }
    }

    /// 成功确认窗口时长，窗口结束后调用 `ComposerForm::confirmation_elapsed`
    pub fn success_confirmation(&self) -> Duration {
        self.success_confirmation
    }

    /// 无表单的直接提交路径
    pub async fn handle_submit(&self, command: SubmitMessageCommand) -> Result<String, WallError> {
        match command.kind {
            MessageKind::Text => self.service.submit_text(&command.body, &command.author).await,
            MessageKind::Image => {
                let attachment = command.image.ok_or(ValidationError::MissingImage)?;
                self.service
                    .submit_image(&attachment, &command.caption, &command.author)
                    .await
            }
        }
    }

    /// 驱动表单走完一次提交
    ///
    /// 校验失败时表单停留在编辑态；成功时进入成功确认窗口；
    /// 适配器失败时退回编辑态并把错误交还——成功确认绝不在失败时展示。
    pub async fn drive_composer(&self, form: &mut ComposerForm) -> Result<String, WallError> {
        let plan = form.validate()?;
        form.begin_submit();

        let result = match plan {
            SubmitPlan::Text { draft } => {
                self.service.submit_text(&draft.content, &draft.author).await
            }
            SubmitPlan::Image {
                attachment,
                caption,
                author,
            } => {
                self.service
                    .submit_image(&attachment, &caption, &author)
                    .await
            }
        };

        match result {
            Ok(id) => {
                form.submit_succeeded();
                Ok(id)
            }
            Err(error) => {
                warn!(error = %error, "message submission failed");
                form.submit_failed();
                Err(error)
            }
        }
    }

    /// 处理一次礼盒点击
    ///
    /// 首次点击：本地立即翻转，发起 set_revealed，写结果随动作返回。
    /// 后续点击：直接打开详情；上次写未确认时补发一次。
    pub async fn handle_reveal(&self, cell: &mut RevealCell) -> RevealAction {
        match cell.click() {
            ClickOutcome::Reveal { open_after } => {
                let write = self.service.reveal(cell.message_id()).await;
                match &write {
                    Ok(()) => cell.write_confirmed(),
                    Err(error) => {
                        warn!(
                            message_id = %cell.message_id(),
                            error = %error,
                            "reveal write failed, local state stays optimistic"
                        );
                        cell.write_failed();
                    }
                }
                RevealAction::Revealed { open_after, write }
            }
            ClickOutcome::Open { retry_write } => {
                let write = if retry_write {
                    let retried = self.service.reveal(cell.message_id()).await;
                    match &retried {
                        Ok(()) => cell.write_confirmed(),
                        Err(error) => {
                            warn!(
                                message_id = %cell.message_id(),
                                error = %error,
                                "reveal retry failed"
                            );
                            cell.write_failed();
                        }
                    }
                    Some(retried)
                } else {
                    None
                };
                RevealAction::Opened { write }
            }
        }
    }

    /// 按 id 直接补发揭示写（幂等、可重试）
    pub async fn handle_reveal_command(
        &self,
        command: RevealMessageCommand,
    ) -> Result<(), WriteError> {
        self.service.reveal(&command.message_id).await
    }
}
