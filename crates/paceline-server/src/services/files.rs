//! Image upload to the object store.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions};

use crate::config::S3Config;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct FileService {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
}

impl FileService {
    pub fn new(store: Arc<dyn ObjectStore>, s3: &S3Config) -> Self {
        Self {
            store,
            bucket: s3.bucket.clone(),
            region: s3.region.clone(),
        }
    }

    /// Keys are prefixed with the upload time so repeated filenames do not
    /// clobber each other.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: Option<String>,
        data: Bytes,
    ) -> ApiResult<String> {
        let key = format!("{}-{}", Utc::now().timestamp(), filename);
        let location = Path::from(key.clone());

        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type {
            attributes.insert(Attribute::ContentType, content_type.into());
        }
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&location, data.into(), opts)
            .await
            .map_err(ApiError::internal)?;
        tracing::info!(%key, "file uploaded");
        Ok(format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        ))
    }
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    #[tokio::test]
    async fn upload_stores_the_object_and_returns_a_bucket_uri() {
        let store = Arc::new(InMemory::new());
        let svc = FileService::new(
            store.clone(),
            &S3Config {
                bucket: "paceline-uploads".to_string(),
                region: "ap-southeast-1".to_string(),
            },
        );

        let uri = svc
            .upload("avatar.png", Some("image/png".to_string()), Bytes::from_static(b"png!"))
            .await
            .unwrap();

        assert!(uri.starts_with("https://paceline-uploads.s3.ap-southeast-1.amazonaws.com/"));
        assert!(uri.ends_with("-avatar.png"));

        let key = uri.rsplit('/').next().unwrap();
        let stored = store
            .get(&Path::from(key))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(stored, Bytes::from_static(b"png!"));
    }
}
