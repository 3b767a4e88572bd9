//! 愿望墙错误分类
//!
//! - `ValidationError` 阻断提交，表单停留在编辑态
//! - `WriteError` / `UploadError` 是适配器调用的失败，作用域仅限触发它的
//!   单次用户动作，任何失败都不会中止进程
//!
//! 所有适配器调用都返回显式 `Result`，不存在静默吞掉失败的路径。

use thiserror::Error;

/// 提交校验失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 文字留言的正文去除空白后为空
    #[error("message body is empty")]
    EmptyMessageBody,
    /// 图片留言没有选择图片
    #[error("no image selected")]
    MissingImage,
}

/// 文档写入失败
#[derive(Debug, Error)]
pub enum WriteError {
    /// 目标文档已不存在
    #[error("message {0} not found")]
    MessageNotFound(String),
    /// 网络或权限等基础设施层失败
    #[error("write failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// 对象上传失败
#[derive(Debug, Error)]
pub enum UploadError {
    /// 空载荷不允许上传
    #[error("upload payload is empty")]
    EmptyPayload,
    /// 网络或权限等基础设施层失败
    #[error("upload failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// 对外统一的错误伞
#[derive(Debug, Error)]
pub enum WallError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl WallError {
    /// 校验类失败允许用户直接改正后重试，适配器失败则取决于外部条件
    pub fn is_validation(&self) -> bool {
        matches!(self, WallError::Validation(_))
    }
}
