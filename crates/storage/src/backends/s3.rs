//! S3 (or S3-compatible) object store.
//!
//! Small files go up with a single `PutObject`. Larger files use a
//! multipart upload so progress can be reported per part. Listing uses the
//! `/` delimiter to get one folder level at a time.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::error::StorageError;
use crate::path::ObjectPath;
use crate::store::{public_url, Listing, MediaStore, ProgressFn};

/// Part size for multipart uploads. S3 requires at least 5 MiB per part
/// except the last.
const PART_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct S3MediaStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

fn backend_error<E: std::error::Error>(operation: &str, err: E) -> StorageError {
    StorageError::Backend(format!("{operation}: {}", DisplayErrorContext(err)))
}

impl S3MediaStore {
    pub fn new(client: Client, bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Build a client from the standard AWS environment (credentials chain,
    /// `AWS_REGION`, `AWS_ENDPOINT_URL`).
    pub async fn from_env(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config), bucket, public_base_url)
    }

    async fn put_single(
        &self,
        key: &str,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<(), StorageError> {
        let total = data.len() as u64;
        on_progress(0, total);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| backend_error("PutObject", e))?;
        on_progress(total, total);
        Ok(())
    }

    async fn put_multipart(
        &self,
        key: &str,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<(), StorageError> {
        let created = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| backend_error("CreateMultipartUpload", e))?;
        let upload_id = created
            .upload_id()
            .ok_or_else(|| StorageError::Backend("CreateMultipartUpload returned no upload id".into()))?
            .to_string();

        match self.upload_parts(key, &upload_id, data, on_progress).await {
            Ok(parts) => {
                self.client
                    .complete_multipart_upload()
                    .bucket(&self.bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .multipart_upload(
                        CompletedMultipartUpload::builder()
                            .set_parts(Some(parts))
                            .build(),
                    )
                    .send()
                    .await
                    .map_err(|e| backend_error("CompleteMultipartUpload", e))?;
                Ok(())
            }
            Err(e) => {
                // Best effort: an unaborted upload only costs storage until
                // the bucket lifecycle rule reaps it.
                if let Err(abort) = self
                    .client
                    .abort_multipart_upload()
                    .bucket(&self.bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .send()
                    .await
                {
                    tracing::warn!(key, error = %DisplayErrorContext(abort), "Failed to abort multipart upload");
                }
                Err(e)
            }
        }
    }

    async fn upload_parts(
        &self,
        key: &str,
        upload_id: &str,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<Vec<CompletedPart>, StorageError> {
        let total = data.len() as u64;
        on_progress(0, total);

        let mut parts = Vec::new();
        let mut offset = 0usize;
        let mut part_number = 1i32;
        while offset < data.len() {
            let end = (offset + PART_SIZE).min(data.len());
            let uploaded = self
                .client
                .upload_part()
                .bucket(&self.bucket)
                .key(key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(ByteStream::from(data.slice(offset..end)))
                .send()
                .await
                .map_err(|e| backend_error("UploadPart", e))?;

            let mut part = CompletedPart::builder().part_number(part_number);
            if let Some(e_tag) = uploaded.e_tag() {
                part = part.e_tag(e_tag);
            }
            parts.push(part.build());

            offset = end;
            part_number += 1;
            on_progress(offset as u64, total);
        }
        Ok(parts)
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload(
        &self,
        path: &ObjectPath,
        data: Bytes,
        on_progress: ProgressFn<'_>,
    ) -> Result<ObjectPath, StorageError> {
        if data.len() <= PART_SIZE {
            self.put_single(path.as_str(), data, on_progress).await?;
        } else {
            self.put_multipart(path.as_str(), data, on_progress).await?;
        }
        Ok(path.clone())
    }

    async fn download_url(&self, object: &ObjectPath) -> Result<String, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(object.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(public_url(&self.public_base_url, object)),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => {
                Err(StorageError::NotFound(object.to_string()))
            }
            Err(e) => Err(backend_error("HeadObject", e)),
        }
    }

    async fn delete(&self, object: &ObjectPath) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(object.as_str())
            .send()
            .await
            .map_err(|e| backend_error("DeleteObject", e))?;
        Ok(())
    }

    async fn list(&self, prefix: &ObjectPath) -> Result<Listing, StorageError> {
        let folder = format!("{prefix}/");
        let mut listing = Listing::default();
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&folder)
                .delimiter("/")
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| backend_error("ListObjectsV2", e))?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    listing.items.push(ObjectPath::new(key)?);
                }
            }
            for common in page.common_prefixes() {
                if let Some(p) = common.prefix() {
                    listing.prefixes.push(ObjectPath::new(p)?);
                }
            }

            match page.next_continuation_token() {
                Some(token) if page.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(listing)
    }
}
