use std::sync::Arc;

use anyhow::Result;

use wishwall_core::config::WishWallConfig;

use super::filesystem::FilesystemObjectStore;
use super::s3::S3ObjectStore;
use crate::domain::repository::ObjectRepositoryRef;

/// 按配置装配对象存储后端
///
/// 配了 object_store 则统一以 S3 兼容协议落地（MinIO、OSS、COS 等
/// 通过 endpoint/ak/sk 适配）；否则回退到本地文件系统存储；两者都
/// 缺省时图片留言不可用。
pub async fn build_object_store(config: &WishWallConfig) -> Result<Option<ObjectRepositoryRef>> {
    if let Some(profile) = &config.object_store {
        let store = S3ObjectStore::from_config(profile, &config.wall.upload_prefix).await?;
        return Ok(Some(Arc::new(store) as ObjectRepositoryRef));
    }
    if let Some(local) = &config.local_storage {
        let store = FilesystemObjectStore::new(
            &local.dir,
            local.base_url.clone(),
            &config.wall.upload_prefix,
        )?;
        return Ok(Some(Arc::new(store) as ObjectRepositoryRef));
    }
    Ok(None)
}
