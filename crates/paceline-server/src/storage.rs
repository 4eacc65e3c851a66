//! Object store construction.

use std::sync::Arc;

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;

use crate::config::S3Config;

/// Credentials come from the standard AWS environment variables.
pub fn build_store(s3: &S3Config) -> Result<Arc<dyn ObjectStore>, object_store::Error> {
    let store = AmazonS3Builder::from_env()
        .with_bucket_name(&s3.bucket)
        .with_region(&s3.region)
        .build()?;
    Ok(Arc::new(store))
}
