use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use url::Url;

use wishwall_core::config::ObjectStoreConfig;
use wishwall_core::error::UploadError;

use super::sanitize_file_name;
use crate::domain::repository::{ObjectRepository, UploadContext};

/// S3 兼容对象存储
///
/// 对象键遵循外部契约：`<前缀>/<毫秒时间戳>_<原始文件名>`，
/// 解析出的 URL 原样写入图片留言的 content。
#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    base_url: Option<String>,
    upload_prefix: String,
    presign_url_ttl_seconds: u64,
    use_presign: bool,
}

impl S3ObjectStore {
    pub async fn from_config(cfg: &ObjectStoreConfig, upload_prefix: &str) -> Result<Self> {
        let bucket = cfg
            .bucket
            .clone()
            .ok_or_else(|| anyhow!("object storage bucket is required"))?;

        let region_name = cfg
            .region
            .clone()
            .unwrap_or_else(|| "us-east-1".to_string());
        let region = Region::new(region_name.clone());

        let region_provider = RegionProviderChain::first_try(region.clone());
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

        // 有 endpoint 时通常是 S3 兼容存储（如 MinIO），默认走 path-style
        let endpoint = cfg.endpoint.clone();
        let force_path_style = cfg.force_path_style.unwrap_or_else(|| endpoint.is_some());

        // 显式提供 access_key/secret_key 时使用静态凭证
        let aws_cfg = if let (Some(access_key), Some(secret_key)) =
            (cfg.access_key.clone(), cfg.secret_key.clone())
        {
            let credentials =
                Credentials::new(access_key, secret_key, None, None, "static-credentials");
            loader = loader.credentials_provider(credentials);
            loader.load().await
        } else {
            loader.load().await
        };

        let mut s3_builder = S3ConfigBuilder::from(&aws_cfg).region(region.clone());
        if let Some(ep) = endpoint.clone() {
            s3_builder = s3_builder.endpoint_url(ep);
        }
        if force_path_style {
            s3_builder = s3_builder.force_path_style(true);
        }
        let client = S3Client::from_conf(s3_builder.build());

        let base_url = cfg.base_url.clone().or(match endpoint {
            Some(ep) => {
                let trimmed = ep.trim_end_matches('/');
                let url = if force_path_style {
                    format!("{}/{}", trimmed, bucket)
                } else {
                    trimmed.to_string()
                };
                Some(url)
            }
            None => Some(format!(
                "https://{}.s3.{}.amazonaws.com",
                bucket, region_name
            )),
        });

        Ok(Self {
            client,
            bucket,
            base_url,
            upload_prefix: upload_prefix.trim_matches('/').to_string(),
            presign_url_ttl_seconds: cfg.presign_url_ttl_seconds.unwrap_or(3600),
            use_presign: cfg.use_presign.unwrap_or(false),
        })
    }

    fn build_object_key(&self, context: &UploadContext<'_>) -> String {
        let name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(context.file_name)
        );
        if self.upload_prefix.is_empty() {
            name
        } else {
            format!("{}/{}", self.upload_prefix, name)
        }
    }

    async fn presign_get_url(&self, object_key: &str) -> Result<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(object_key)
            .presigned(
                aws_sdk_s3::presigning::PresigningConfig::expires_in(Duration::from_secs(
                    self.presign_url_ttl_seconds.max(1).min(7 * 24 * 3600),
                ))
                .map_err(|e| anyhow!("invalid presign config: {}", e))?,
            )
            .await
            .with_context(|| format!("failed to presign s3 url, key={}", object_key))?;
        Ok(presigned.uri().to_string())
    }

    fn public_url(&self, object_key: &str) -> Result<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow!("no base url configured for public object access"))?;
        let joined = format!("{}/{}", base.trim_end_matches('/'), object_key);
        // 校验拼出来的确实是可解析 URL
        let url = Url::parse(&joined).with_context(|| format!("invalid object url {joined}"))?;
        Ok(url.to_string())
    }
}

#[async_trait::async_trait]
impl ObjectRepository for S3ObjectStore {
    async fn put_object(&self, context: &UploadContext<'_>) -> Result<String, UploadError> {
        let key = self.build_object_key(context);
        tracing::debug!(
            key = %key,
            bucket = %self.bucket,
            size = context.payload.len(),
            "uploading object to s3 store"
        );

        let body = ByteStream::from(context.payload.to_vec());
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(context.mime_type)
            .body(body)
            .send()
            .await
            .with_context(|| format!("failed to upload object to s3, key={}", key))
            .map_err(UploadError::Backend)?;

        tracing::debug!(key = %key, bucket = %self.bucket, "object uploaded");
        Ok(key)
    }

    async fn resolve_url(&self, object_key: &str) -> Result<String, UploadError> {
        let url = if self.use_presign {
            self.presign_get_url(object_key)
                .await
                .map_err(UploadError::Backend)?
        } else {
            self.public_url(object_key).map_err(UploadError::Backend)?
        };
        Ok(url)
    }
}
