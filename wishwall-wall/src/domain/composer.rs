//! 提交表单状态机
//!
//! idle → editing → submitting → success → idle。
//! 提交在途期间关闭与再次提交都被禁用；校验或适配器失败时
//! 停留在 editing 并把失败交还给调用方，不落任何残缺状态。
//! 成功态只能由确认成功的 create 进入。

use bytes::Bytes;
use tracing::debug;

use wishwall_core::error::ValidationError;
use wishwall_core::model::{normalize_author, MessageDraft, MessageKind};

/// 选中的待上传图片
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub payload: Bytes,
}

/// 表单阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// 表单未打开
    Idle,
    /// 用户正在编辑
    Editing,
    /// create/upload 在途
    Submitting,
    /// 成功确认窗口展示中
    Success,
}

/// 校验通过后的提交计划
///
/// 文字留言的草稿已可直接 create；图片留言必须先上传、
/// 拿到 URL 后才允许构造草稿。
#[derive(Debug, Clone)]
pub enum SubmitPlan {
    Text {
        draft: MessageDraft,
    },
    Image {
        attachment: ImageAttachment,
        caption: String,
        author: String,
    },
}

/// 提交表单
#[derive(Debug, Clone)]
pub struct ComposerForm {
    state: ComposerState,
    kind: MessageKind,
    body: String,
    author: String,
    caption: String,
    attachment: Option<ImageAttachment>,
}

impl Default for ComposerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerForm {
    pub fn new() -> Self {
        Self {
            state: ComposerState::Idle,
            kind: MessageKind::Text,
            body: String::new(),
            author: String::new(),
            caption: String::new(),
            attachment: None,
        }
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// 提交在途或成功窗口期间，关闭与编辑控件都不可用
    pub fn is_locked(&self) -> bool {
        matches!(self.state, ComposerState::Submitting | ComposerState::Success)
    }

    /// 打开表单进入编辑态
    pub fn open(&mut self) {
        if self.state == ComposerState::Idle {
            self.state = ComposerState::Editing;
        }
    }

    /// 关闭表单；锁定期间的关闭请求被忽略
    pub fn close(&mut self) {
        if self.is_locked() {
            debug!("composer close ignored while locked");
            return;
        }
        self.reset_fields();
        self.state = ComposerState::Idle;
    }

    pub fn set_kind(&mut self, kind: MessageKind) {
        if self.state == ComposerState::Editing {
            self.kind = kind;
        }
    }

    pub fn set_body(&mut self, body: &str) {
        if self.state == ComposerState::Editing {
            self.body = body.to_string();
        }
    }

    pub fn set_author(&mut self, author: &str) {
        if self.state == ComposerState::Editing {
            self.author = author.to_string();
        }
    }

    pub fn set_caption(&mut self, caption: &str) {
        if self.state == ComposerState::Editing {
            self.caption = caption.to_string();
        }
    }

    pub fn attach_image(&mut self, attachment: ImageAttachment) {
        if self.state == ComposerState::Editing {
            self.attachment = Some(attachment);
        }
    }

    pub fn attachment(&self) -> Option<&ImageAttachment> {
        self.attachment.as_ref()
    }

    /// 提交前的校验闸门
    ///
    /// 文字留言要求去除空白后非空的正文；图片留言要求已选择图片。
    /// 校验失败时表单停留在编辑态。
    pub fn validate(&self) -> Result<SubmitPlan, ValidationError> {
        match self.kind {
            MessageKind::Text => {
                let draft = MessageDraft::text(&self.body, &self.author)?;
                Ok(SubmitPlan::Text { draft })
            }
            MessageKind::Image => {
                let attachment = self
                    .attachment
                    .clone()
                    .ok_or(ValidationError::MissingImage)?;
                Ok(SubmitPlan::Image {
                    attachment,
                    caption: self.caption.clone(),
                    author: normalize_author(&self.author),
                })
            }
        }
    }

    /// 校验通过后进入提交在途态
    pub fn begin_submit(&mut self) {
        if self.state == ComposerState::Editing {
            self.state = ComposerState::Submitting;
        }
    }

    /// create 确认成功，进入成功确认窗口
    pub fn submit_succeeded(&mut self) {
        if self.state == ComposerState::Submitting {
            self.state = ComposerState::Success;
        }
    }

    /// 提交失败，退回编辑态，已填字段全部保留
    pub fn submit_failed(&mut self) {
        if self.state == ComposerState::Submitting {
            self.state = ComposerState::Editing;
        }
    }

    /// 成功确认窗口结束：复位并关闭
    pub fn confirmation_elapsed(&mut self) {
        if self.state == ComposerState::Success {
            self.reset_fields();
            self.state = ComposerState::Idle;
        }
    }

    fn reset_fields(&mut self) {
        self.kind = MessageKind::Text;
        self.body.clear();
        self.author.clear();
        self.caption.clear();
        self.attachment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_submission_flow_resets_after_confirmation() {
        let mut form = ComposerForm::new();
        form.open();
        form.set_body("Happy Bday!");
        form.set_author("");

        let plan = form.validate().unwrap();
        match plan {
            SubmitPlan::Text { draft } => {
                assert_eq!(draft.content, "Happy Bday!");
                assert_eq!(draft.author, "Anonymous");
            }
            SubmitPlan::Image { .. } => panic!("expected text plan"),
        }

        form.begin_submit();
        assert!(form.is_locked());
        form.submit_succeeded();
        assert_eq!(form.state(), ComposerState::Success);
        form.confirmation_elapsed();
        assert_eq!(form.state(), ComposerState::Idle);

        // 复位后正文清空
        form.open();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::EmptyMessageBody)
        ));
    }

    #[test]
    fn failed_submit_returns_to_editing_with_fields_kept() {
        let mut form = ComposerForm::new();
        form.open();
        form.set_body("still here");
        form.begin_submit();
        form.submit_failed();
        assert_eq!(form.state(), ComposerState::Editing);
        // 字段保留，用户可直接重试
        assert!(form.validate().is_ok());
    }

    #[test]
    fn image_kind_requires_attachment() {
        let mut form = ComposerForm::new();
        form.open();
        form.set_kind(MessageKind::Image);
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingImage)
        ));

        form.attach_image(ImageAttachment {
            file_name: "party.png".to_string(),
            mime_type: "image/png".to_string(),
            payload: Bytes::from_static(b"\x89PNG"),
        });
        assert!(form.validate().is_ok());
    }

    #[test]
    fn edits_and_close_are_ignored_while_submitting() {
        let mut form = ComposerForm::new();
        form.open();
        form.set_body("locked in");
        form.begin_submit();

        form.set_body("should not apply");
        form.close();
        assert_eq!(form.state(), ComposerState::Submitting);

        form.submit_failed();
        match form.validate().unwrap() {
            SubmitPlan::Text { draft } => assert_eq!(draft.content, "locked in"),
            SubmitPlan::Image { .. } => panic!("expected text plan"),
        }
    }
}
