//! Integration tests for the S3 document store.
//!
//! These tests call real AWS APIs and require valid credentials in the
//! environment plus a scratch bucket named in `PULSE_TEST_BUCKET`.
//!
//! Run with: `cargo test -p pulse-storage --test documents -- --ignored`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulse_storage::error::StorageError;
use pulse_storage::{client, documents, objects};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Doc {
    id: Uuid,
    value: String,
}

fn test_bucket() -> String {
    std::env::var("PULSE_TEST_BUCKET").expect("PULSE_TEST_BUCKET must be set")
}

#[tokio::test]
#[ignore]
async fn save_load_delete_round_trip() {
    let s3 = client::build_client().await;
    let bucket = test_bucket();

    let doc = Doc {
        id: Uuid::new_v4(),
        value: "yes".to_string(),
    };
    let key = format!("test/{}.json", doc.id);

    documents::save_doc(&s3, &bucket, &key, &doc)
        .await
        .expect("save should succeed");

    let loaded: Doc = documents::load_doc(&s3, &bucket, &key)
        .await
        .expect("load should succeed");
    assert_eq!(loaded, doc);

    objects::delete_object(&s3, &bucket, &key)
        .await
        .expect("delete should succeed");

    let gone = documents::load_doc::<Doc>(&s3, &bucket, &key).await;
    assert!(matches!(gone, Err(StorageError::NotFound { .. })));
}

#[tokio::test]
#[ignore]
async fn load_all_scans_a_prefix() {
    let s3 = client::build_client().await;
    let bucket = test_bucket();

    let prefix = format!("test/{}/", Uuid::new_v4());
    let mut saved = Vec::new();
    for i in 0..3 {
        let doc = Doc {
            id: Uuid::new_v4(),
            value: format!("value-{i}"),
        };
        documents::save_doc(&s3, &bucket, &format!("{prefix}{}.json", doc.id), &doc)
            .await
            .expect("save should succeed");
        saved.push(doc);
    }

    let loaded: Vec<Doc> = documents::load_all(&s3, &bucket, &prefix)
        .await
        .expect("scan should succeed");
    assert_eq!(loaded.len(), saved.len());
    for doc in &saved {
        assert!(loaded.contains(doc));
    }

    for key in objects::list_objects(&s3, &bucket, &prefix)
        .await
        .expect("list should succeed")
    {
        objects::delete_object(&s3, &bucket, &key)
            .await
            .expect("cleanup should succeed");
    }
}
