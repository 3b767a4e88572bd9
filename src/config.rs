//! 愿望墙应用配置
//!
//! 该模块提供应用程序配置管理功能，包括：
//! - 配置文件加载和解析
//! - 对象存储等基础设施配置定义
//! - 找不到配置文件时回退到内置默认值

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// 默认的留言集合名
pub const DEFAULT_COLLECTION: &str = "messages";
/// 上传对象键的默认前缀（外部契约：`<前缀>/<毫秒时间戳>_<原始文件名>`）
pub const DEFAULT_UPLOAD_PREFIX: &str = "messages";
/// 提交成功确认窗口（毫秒），窗口结束后表单关闭并复位
pub const DEFAULT_SUCCESS_CONFIRMATION_MS: u64 = 1500;
/// 首次揭示后到打开详情视图的固定延迟（毫秒），给开盒动画留时间
pub const DEFAULT_REVEAL_OPEN_DELAY_MS: u64 = 800;

/// 愿望墙行为配置
#[derive(Debug, Clone, Deserialize)]
pub struct WallConfig {
    /// 留言集合名
    #[serde(default = "default_collection")]
    pub collection: String,
    /// 上传对象键前缀
    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,
    /// 提交成功确认窗口（毫秒）
    #[serde(default = "default_success_confirmation_ms")]
    pub success_confirmation_ms: u64,
    /// 揭示后打开详情的延迟（毫秒）
    #[serde(default = "default_reveal_open_delay_ms")]
    pub reveal_open_delay_ms: u64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            upload_prefix: default_upload_prefix(),
            success_confirmation_ms: default_success_confirmation_ms(),
            reveal_open_delay_ms: default_reveal_open_delay_ms(),
        }
    }
}

/// 对象存储配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ObjectStoreConfig {
    /// 存储类型标注（如 s3 / minio / oss / cos），仅作配置自描述；
    /// 后端选择按配置段是否存在判定，任何 `[object_store]` 都走
    /// S3 兼容协议
    #[serde(default)]
    pub profile_type: String,
    /// 存储服务端点
    #[serde(default)]
    pub endpoint: Option<String>,
    /// 访问密钥
    #[serde(default)]
    pub access_key: Option<String>,
    /// 秘密密钥
    #[serde(default)]
    pub secret_key: Option<String>,
    /// 存储桶名称
    #[serde(default)]
    pub bucket: Option<String>,
    /// 区域
    #[serde(default)]
    pub region: Option<String>,
    /// 是否强制 path-style 访问（S3 兼容存储通常需要）
    #[serde(default)]
    pub force_path_style: Option<bool>,
    /// 公开访问的基础 URL，覆盖按 endpoint 推导出的值
    #[serde(default)]
    pub base_url: Option<String>,
    /// 是否返回预签名 URL 而不是公开 URL
    #[serde(default)]
    pub use_presign: Option<bool>,
    /// 预签名 URL 过期时间（秒）
    #[serde(default)]
    pub presign_url_ttl_seconds: Option<u64>,
}

/// 本地文件系统存储配置（开发与 CI 环境）
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LocalStorageConfig {
    /// 本地存储根目录
    pub dir: String,
    /// 公开访问的基础 URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// 应用顶层配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WishWallConfig {
    /// 愿望墙行为配置
    #[serde(default)]
    pub wall: WallConfig,
    /// 对象存储配置，缺省时回退到本地存储
    #[serde(default)]
    pub object_store: Option<ObjectStoreConfig>,
    /// 本地文件系统存储配置
    #[serde(default)]
    pub local_storage: Option<LocalStorageConfig>,
}

impl WishWallConfig {
    /// 从 TOML 文件加载配置
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(config)
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_upload_prefix() -> String {
    DEFAULT_UPLOAD_PREFIX.to_string()
}

fn default_success_confirmation_ms() -> u64 {
    DEFAULT_SUCCESS_CONFIRMATION_MS
}

fn default_reveal_open_delay_ms() -> u64 {
    DEFAULT_REVEAL_OPEN_DELAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_ui_delays() {
        let config = WishWallConfig::default();
        assert_eq!(config.wall.collection, "messages");
        assert_eq!(config.wall.success_confirmation_ms, 1500);
        assert_eq!(config.wall.reveal_open_delay_ms, 800);
        assert!(config.object_store.is_none());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: WishWallConfig = toml::from_str(
            r#"
            [wall]
            collection = "wishes"

            [object_store]
            profile_type = "minio"
            endpoint = "http://localhost:9000"
            bucket = "wishwall"
            access_key = "minio"
            secret_key = "minio123"
            "#,
        )
        .unwrap();
        assert_eq!(config.wall.collection, "wishes");
        assert_eq!(config.wall.upload_prefix, "messages");
        let store = config.object_store.unwrap();
        assert_eq!(store.profile_type, "minio");
        assert_eq!(store.bucket.as_deref(), Some("wishwall"));
        // endpoint 存在时默认走 path-style，由适配层推导
        assert_eq!(store.force_path_style, None);
    }

    #[test]
    fn object_store_profile_type_is_optional() {
        let config: WishWallConfig = toml::from_str(
            r#"
            [object_store]
            endpoint = "http://localhost:9000"
            bucket = "wishwall"
            "#,
        )
        .unwrap();
        // 有 [object_store] 段即选 S3 兼容后端，标注字段可以缺省
        let store = config.object_store.unwrap();
        assert!(store.profile_type.is_empty());
    }
}
