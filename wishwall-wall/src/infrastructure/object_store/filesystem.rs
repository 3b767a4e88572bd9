use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use wishwall_core::error::UploadError;

use super::sanitize_file_name;
use crate::domain::repository::{ObjectRepository, UploadContext};

/// 本地文件系统对象存储（开发与 CI 环境）
///
/// 与 S3 后端遵循同一个对象键契约：`<前缀>/<毫秒时间戳>_<文件名>`。
#[derive(Clone)]
pub struct FilesystemObjectStore {
    root: PathBuf,
    base_url: Option<String>,
    upload_prefix: String,
}

impl FilesystemObjectStore {
    pub fn new(
        root: impl AsRef<Path>,
        base_url: Option<String>,
        upload_prefix: &str,
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let upload_prefix = upload_prefix.trim_matches('/').to_string();
        let prefix_dir = if upload_prefix.is_empty() {
            root.clone()
        } else {
            root.join(&upload_prefix)
        };
        std::fs::create_dir_all(&prefix_dir)
            .with_context(|| format!("create object store dir {:?}", prefix_dir))?;
        Ok(Self {
            root,
            base_url,
            upload_prefix,
        })
    }

    fn build_object_key(&self, file_name: &str) -> String {
        let name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );
        if self.upload_prefix.is_empty() {
            name
        } else {
            format!("{}/{}", self.upload_prefix, name)
        }
    }
}

#[async_trait::async_trait]
impl ObjectRepository for FilesystemObjectStore {
    async fn put_object(&self, context: &UploadContext<'_>) -> Result<String, UploadError> {
        let key = self.build_object_key(context.file_name);
        let path = self.root.join(&key);
        fs::write(&path, context.payload)
            .await
            .with_context(|| format!("write object to {:?}", path))
            .map_err(UploadError::Backend)?;
        debug!(key = %key, size = context.payload.len(), "object written to filesystem store");
        Ok(key)
    }

    async fn resolve_url(&self, object_key: &str) -> Result<String, UploadError> {
        match &self.base_url {
            Some(base) => Ok(format!("{}/{}", base.trim_end_matches('/'), object_key)),
            // 没有配置基础 URL 时退化为本地路径
            None => Ok(self.root.join(object_key).to_string_lossy().into_owned()),
        }
    }
}
