/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use bytes::Bytes;
use s3_upload_relay::error::{ErrorKind, ResourceKind};
use s3_upload_relay::types::UploadState;
use test_common::MemoryBlockStore;

const CONTAINER: &str = "uploads";

fn relay_for(store: &MemoryBlockStore) -> s3_upload_relay::Client {
    let config = s3_upload_relay::Config::builder()
        .store(store.clone())
        .default_container(CONTAINER)
        .build();
    s3_upload_relay::Client::new(config)
}

/// Upload `data` through the relay and wait for the commit. Returns the blob
/// name it landed under.
async fn upload_blob(relay: &s3_upload_relay::Client, data: &[u8]) -> String {
    let created = relay
        .create_upload()
        .upload_length(data.len() as u64)
        .send()
        .await
        .unwrap();
    relay
        .append()
        .upload_id(created.upload_id())
        .body(Bytes::copy_from_slice(data))
        .send()
        .await
        .unwrap();
    for _ in 0..500 {
        let status = relay
            .upload_status()
            .upload_id(created.upload_id())
            .send()
            .await
            .unwrap();
        match status.state() {
            UploadState::Done => return created.blob().to_string(),
            UploadState::Error => panic!(
                "upload failed: {}",
                status.error_description().unwrap_or_default()
            ),
            UploadState::Uploading => tokio::time::sleep(Duration::from_millis(5)).await,
        }
    }
    panic!("upload never committed");
}

async fn read_back(relay: &s3_upload_relay::Client, blob: &str) -> Bytes {
    relay
        .get_file()
        .container(CONTAINER)
        .blob(blob)
        .send()
        .await
        .unwrap()
        .into_body()
        .collect()
        .await
        .unwrap()
}

/// An occupied destination rejects the import before any copying happens;
/// asking to replace goes through.
#[tokio::test]
async fn test_copy_rejects_occupied_destination() {
    let store = MemoryBlockStore::with_container(CONTAINER);
    let relay = relay_for(&store);

    let source = upload_blob(&relay, b"source payload").await;
    let occupied = upload_blob(&relay, b"already here").await;

    let err = relay
        .copy_file()
        .source_container(CONTAINER)
        .source_blob(&source)
        .dest_container(CONTAINER)
        .dest_blob(&occupied)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::AlreadyExists);
    assert_eq!(store.copy_count(), 0);

    let copied = relay
        .copy_file()
        .source_container(CONTAINER)
        .source_blob(&source)
        .dest_container(CONTAINER)
        .dest_blob(&occupied)
        .replace(true)
        .send()
        .await
        .unwrap();
    assert_eq!(copied.blob(), occupied);
    assert_eq!(store.copy_count(), 1);
    assert_eq!(&read_back(&relay, &occupied).await[..], b"source payload");
}

/// A relay file URL addresses the copy source, with the store name segment
/// checked case-insensitively.
#[tokio::test]
async fn test_copy_by_url_and_store_name() {
    let store = MemoryBlockStore::with_container(CONTAINER);
    let relay = relay_for(&store);

    let source = upload_blob(&relay, b"url addressed").await;

    let copied = relay
        .copy_file()
        .source_url(format!("files/S3/{CONTAINER}/{source}"))
        .dest_container(CONTAINER)
        .dest_blob("copy-target")
        .send()
        .await
        .unwrap();
    assert_eq!(copied.container(), CONTAINER);
    assert_eq!(copied.url(), format!("files/s3/{CONTAINER}/copy-target"));
    assert_eq!(&read_back(&relay, "copy-target").await[..], b"url addressed");

    let err = relay
        .copy_file()
        .source_url(format!("files/azure/{CONTAINER}/{source}"))
        .dest_container(CONTAINER)
        .dest_blob("other-target")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Store));
}

/// Copies into a container the store does not know are refused up front.
#[tokio::test]
async fn test_copy_to_missing_container() {
    let store = MemoryBlockStore::with_container(CONTAINER);
    let relay = relay_for(&store);

    let source = upload_blob(&relay, b"somewhere to go").await;

    let err = relay
        .copy_file()
        .source_container(CONTAINER)
        .source_blob(&source)
        .dest_container("no-such-container")
        .dest_blob("dest")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Container));
}

/// Version history accumulates on a versioned store: details list every
/// revision, reads can pin one, and deleting a version removes just it.
#[tokio::test]
async fn test_versioned_details_and_reads() {
    let store = MemoryBlockStore::with_container(CONTAINER);
    store.set_versioned(true);
    let relay = relay_for(&store);

    let first = upload_blob(&relay, b"first revision").await;
    let second = upload_blob(&relay, b"second revision!").await;

    let v1 = relay
        .copy_file()
        .source_container(CONTAINER)
        .source_blob(&first)
        .dest_container(CONTAINER)
        .dest_blob("doc")
        .send()
        .await
        .unwrap();
    let v2 = relay
        .copy_file()
        .source_container(CONTAINER)
        .source_blob(&second)
        .dest_container(CONTAINER)
        .dest_blob("doc")
        .replace(true)
        .send()
        .await
        .unwrap();
    let v1_id = v1.version_id().unwrap().to_string();
    let v2_id = v2.version_id().unwrap().to_string();
    assert!(v2.url().ends_with(&format!("?versionId={v2_id}")));

    let details = relay
        .file_details()
        .container(CONTAINER)
        .blob("doc")
        .send()
        .await
        .unwrap();
    assert_eq!(details.length(), 16);
    assert_eq!(details.version_id(), Some(v2_id.as_str()));
    assert_eq!(details.versions().len(), 2);
    assert!(details.versions()[0].is_latest);
    assert_eq!(details.versions()[0].version_id.as_deref(), Some(v2_id.as_str()));
    assert!(!details.versions()[1].is_latest);

    let pinned = relay
        .get_file()
        .container(CONTAINER)
        .blob("doc")
        .version_id(&v1_id)
        .send()
        .await
        .unwrap();
    assert_eq!(pinned.version_id(), Some(v1_id.as_str()));
    let body = pinned.into_body().collect().await.unwrap();
    assert_eq!(&body[..], b"first revision");
    assert_eq!(&read_back(&relay, "doc").await[..], b"second revision!");

    relay
        .delete_file()
        .container(CONTAINER)
        .blob("doc")
        .version_id(&v1_id)
        .send()
        .await
        .unwrap();
    let details = relay
        .file_details()
        .container(CONTAINER)
        .blob("doc")
        .send()
        .await
        .unwrap();
    assert_eq!(details.versions().len(), 1);

    let err = relay
        .delete_file()
        .container(CONTAINER)
        .blob("doc")
        .version_id("v999")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::BlobVersion));
}

/// Presigned reads honor the configured default validity and refuse a zero
/// or over-long window.
#[tokio::test]
async fn test_presign_defaults_and_limits() {
    let store = MemoryBlockStore::with_container(CONTAINER);
    let relay = relay_for(&store);

    let signed = relay
        .presign()
        .container(CONTAINER)
        .blob("report.csv")
        .send()
        .await
        .unwrap();
    assert_eq!(signed.expires_in(), Duration::from_secs(15 * 60));
    assert!(signed.url().contains("signed=1"));

    let signed = relay
        .presign()
        .container(CONTAINER)
        .blob("report.csv")
        .version_id("v7")
        .valid_for(Duration::from_secs(30))
        .send()
        .await
        .unwrap();
    assert_eq!(signed.expires_in(), Duration::from_secs(30));
    assert!(signed.url().contains("versionId=v7"));

    let err = relay
        .presign()
        .container(CONTAINER)
        .blob("report.csv")
        .valid_for(Duration::ZERO)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InputInvalid);

    let err = relay
        .presign()
        .container(CONTAINER)
        .blob("report.csv")
        .valid_for(Duration::from_secs(8 * 24 * 60 * 60))
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InputInvalid);
}

/// Reads, details, deletes and copies of a blob that never existed all
/// surface blob-not-found.
#[tokio::test]
async fn test_missing_blob_errors() {
    let store = MemoryBlockStore::with_container(CONTAINER);
    let relay = relay_for(&store);

    let err = relay
        .get_file()
        .container(CONTAINER)
        .blob("ghost")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Blob));

    let err = relay
        .file_details()
        .container(CONTAINER)
        .blob("ghost")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Blob));

    let err = relay
        .delete_file()
        .container(CONTAINER)
        .blob("ghost")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Blob));

    let err = relay
        .copy_file()
        .source_container(CONTAINER)
        .source_blob("ghost")
        .dest_container(CONTAINER)
        .dest_blob("dest")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Blob));
}
