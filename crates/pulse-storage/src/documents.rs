use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

/// Load one JSON document.
pub async fn load_doc<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<T, StorageError> {
    let body = objects::get_object(client, bucket, key).await?;
    let value: T = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Save one JSON document.
pub async fn save_doc<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_object(client, bucket, key, body, Some("application/json")).await
}

/// Load every JSON document under a prefix.
///
/// This is the store's only scan primitive; both unfiltered listings and
/// find-by-foreign-key queries go through it, with any filtering done by
/// the caller.
pub async fn load_all<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = objects::list_objects(client, bucket, prefix).await?;
    tracing::debug!(prefix = %prefix, count = keys.len(), "scanning documents");

    let mut docs = Vec::with_capacity(keys.len());
    for key in &keys {
        let body = objects::get_object(client, bucket, key).await?;
        docs.push(serde_json::from_slice(&body)?);
    }

    Ok(docs)
}
