/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! [`BlockStore`] backed by Amazon S3.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart, Tag, Tagging};
use bytes::Bytes;
use tracing::instrument;

use crate::error;
use crate::io::ChunkBody;
use crate::store::{
    BlobDetails, BlobLocation, BlobProps, BlobVersion, BlockStore, CommitPayload, CommittedBlob,
    PresignedUrl, StagingSession, CONTENT_HASH_TAG,
};
use crate::types;

/// Maps the block-store contract onto S3.
///
/// A staging session is a multipart upload: every staged block becomes one
/// part whose part number is the block index plus one, so part order equals
/// block-name order. The commit completes the multipart upload and then
/// attaches the blob tags, including the content hash.
#[derive(Debug, Clone)]
pub struct S3BlockStore {
    client: aws_sdk_s3::Client,
}

impl S3BlockStore {
    /// Create a store from a configured S3 client.
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// The underlying S3 client.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

fn is_status<E>(
    err: &aws_sdk_s3::error::SdkError<E, aws_smithy_runtime_api::client::orchestrator::HttpResponse>,
    status: u16,
) -> bool {
    match err {
        aws_sdk_s3::error::SdkError::ServiceError(service_err) => {
            service_err.raw().status().as_u16() == status
        }
        _ => false,
    }
}

/// Derive the one-based S3 part number for a block name.
fn part_number_for(block_name: &str) -> Result<i32, error::Error> {
    let index = types::block_index(block_name)?;
    i32::try_from(index + 1).map_err(|_| {
        error::invalid_input(format!(
            "block name `{block_name}` is outside the part number range"
        ))
    })
}

#[async_trait::async_trait]
impl BlockStore for S3BlockStore {
    #[instrument(skip(self))]
    async fn container_exists(&self, container: &str) -> Result<bool, error::Error> {
        match self.client.head_bucket().bucket(container).send().await {
            Ok(_) => Ok(true),
            Err(err) if is_status(&err, 404) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, metadata))]
    async fn create_staging(
        &self,
        container: &str,
        blob: &str,
        metadata: &[(String, String)],
    ) -> Result<StagingSession, error::Error> {
        let mut request = self
            .client
            .create_multipart_upload()
            .bucket(container)
            .key(blob);
        for (key, value) in metadata {
            request = request.metadata(key, value);
        }
        let output = request.send().await?;
        let upload_id = output
            .upload_id()
            .ok_or_else(|| error::runtime_error("no multipart upload id minted"))?;
        tracing::debug!(upload_id, "staging session opened");
        Ok(StagingSession::new(upload_id))
    }

    #[instrument(skip(self, session, data), fields(size = data.len()))]
    async fn stage_block(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
        block_name: &str,
        data: Bytes,
    ) -> Result<(), error::Error> {
        let part_number = part_number_for(block_name)?;
        let output = self
            .client
            .upload_part()
            .bucket(container)
            .key(blob)
            .upload_id(session.session_id())
            .part_number(part_number)
            .body(data.into())
            .send()
            .await?;
        session.record_part(part_number, output.e_tag().map(str::to_string));
        Ok(())
    }

    #[instrument(skip(self, session, block_names, payload), fields(blocks = block_names.len()))]
    async fn commit_blocks(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
        block_names: &[String],
        payload: CommitPayload,
    ) -> Result<CommittedBlob, error::Error> {
        let staged = session.staged_parts();
        if staged.len() != block_names.len() {
            return Err(error::commit_failed(format!(
                "staged {} parts but the block list names {}",
                staged.len(),
                block_names.len()
            )));
        }

        let parts: Vec<CompletedPart> = staged
            .into_iter()
            .map(|part| {
                CompletedPart::builder()
                    .part_number(part.part_number)
                    .set_e_tag(part.etag)
                    .build()
            })
            .collect();
        let completed = CompletedMultipartUpload::builder()
            .set_parts(Some(parts))
            .build();

        let output = self
            .client
            .complete_multipart_upload()
            .bucket(container)
            .key(blob)
            .upload_id(session.session_id())
            .multipart_upload(completed)
            .send()
            .await
            .map_err(error::commit_failed)?;
        let version_id = output.version_id().map(str::to_string);
        let etag = output.e_tag().map(str::to_string);

        // Tags (and the content hash) can only attach once the object exists.
        let mut tagging = Tagging::builder();
        for (key, value) in payload.tags {
            tagging = tagging.tag_set(Tag::builder().key(key).value(value).build()?);
        }
        tagging = tagging.tag_set(
            Tag::builder()
                .key(CONTENT_HASH_TAG)
                .value(payload.content_hash)
                .build()?,
        );
        let mut request = self
            .client
            .put_object_tagging()
            .bucket(container)
            .key(blob)
            .tagging(tagging.build()?);
        if let Some(version) = &version_id {
            request = request.version_id(version);
        }
        request.send().await.map_err(error::commit_failed)?;

        Ok(CommittedBlob { version_id, etag })
    }

    #[instrument(skip(self, session))]
    async fn abort_staging(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
    ) -> Result<(), error::Error> {
        self.client
            .abort_multipart_upload()
            .bucket(container)
            .key(blob)
            .upload_id(session.session_id())
            .send()
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool, error::Error> {
        match self
            .client
            .head_object()
            .bucket(container)
            .key(blob)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if is_status(&err, 404) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    async fn read_blob(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
    ) -> Result<(BlobProps, ChunkBody), error::Error> {
        let mut request = self.client.get_object().bucket(container).key(blob);
        if let Some(version) = version_id {
            request = request.version_id(version);
        }
        let output = request.send().await?;

        let props = BlobProps {
            length: output.content_length().unwrap_or_default().max(0) as u64,
            content_type: output.content_type().map(str::to_string),
            etag: output.e_tag().map(str::to_string),
            version_id: output.version_id().map(str::to_string),
            created_on: output.last_modified().cloned(),
        };
        let data = output
            .body
            .collect()
            .await
            .map_err(error::from_kind(error::ErrorKind::IOError))?
            .into_bytes();

        Ok((props, ChunkBody::from(data)))
    }

    #[instrument(skip(self))]
    async fn blob_details(
        &self,
        container: &str,
        blob: &str,
    ) -> Result<BlobDetails, error::Error> {
        let head = match self
            .client
            .head_object()
            .bucket(container)
            .key(blob)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if is_status(&err, 404) => {
                return Err(error::not_found(error::ResourceKind::Blob, err))
            }
            Err(err) => return Err(err.into()),
        };

        let mut metadata: Vec<(String, String)> = head
            .metadata()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        metadata.sort();

        let props = BlobProps {
            length: head.content_length().unwrap_or_default().max(0) as u64,
            content_type: head.content_type().map(str::to_string),
            etag: head.e_tag().map(str::to_string),
            version_id: head.version_id().map(str::to_string),
            created_on: head.last_modified().cloned(),
        };

        let tagging = self
            .client
            .get_object_tagging()
            .bucket(container)
            .key(blob)
            .send()
            .await?;
        let tags = tagging
            .tag_set()
            .iter()
            .map(|tag| (tag.key().to_string(), tag.value().to_string()))
            .collect();

        let listing = self
            .client
            .list_object_versions()
            .bucket(container)
            .prefix(blob)
            .send()
            .await?;
        let versions = listing
            .versions()
            .iter()
            .filter(|v| v.key() == Some(blob))
            .map(|v| BlobVersion {
                version_id: v.version_id().map(str::to_string),
                length: v.size().unwrap_or_default().max(0) as u64,
                created_on: v.last_modified().cloned(),
                is_latest: v.is_latest().unwrap_or_default(),
            })
            .collect();

        Ok(BlobDetails {
            props,
            metadata,
            tags,
            versions,
        })
    }

    #[instrument(skip(self))]
    async fn delete_blob(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
    ) -> Result<(), error::Error> {
        // DeleteObject acks unconditionally, so probe first to surface not-found.
        let mut head = self.client.head_object().bucket(container).key(blob);
        if let Some(version) = version_id {
            head = head.version_id(version);
        }
        if let Err(err) = head.send().await {
            if is_status(&err, 404) {
                let resource = match version_id {
                    Some(_) => error::ResourceKind::BlobVersion,
                    None => error::ResourceKind::Blob,
                };
                return Err(error::not_found(resource, err));
            }
            return Err(err.into());
        }

        let mut request = self.client.delete_object().bucket(container).key(blob);
        if let Some(version) = version_id {
            request = request.version_id(version);
        }
        request.send().await?;
        Ok(())
    }

    #[instrument(skip(self, source), fields(source_blob = source.blob))]
    async fn copy_blob(
        &self,
        source: BlobLocation<'_>,
        dest_container: &str,
        dest_blob: &str,
    ) -> Result<Option<String>, error::Error> {
        // CopySource is "{bucket}/{key}" with the key percent-encoded; an
        // optional "?versionId=" suffix pins the source version.
        let mut copy_source = format!(
            "{}/{}",
            source.container,
            types::percent_encode(source.blob, true)
        );
        if let Some(version) = source.version_id {
            copy_source.push_str("?versionId=");
            copy_source.push_str(&types::percent_encode(version, false));
        }

        let output = self
            .client
            .copy_object()
            .bucket(dest_container)
            .key(dest_blob)
            .copy_source(copy_source)
            .send()
            .await?;
        Ok(output.version_id().map(str::to_string))
    }

    #[instrument(skip(self))]
    async fn presign_read(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
        valid_for: Duration,
    ) -> Result<PresignedUrl, error::Error> {
        let presigning = PresigningConfig::expires_in(valid_for).map_err(error::invalid_input)?;
        let mut request = self.client.get_object().bucket(container).key(blob);
        if let Some(version) = version_id {
            request = request.version_id(version);
        }
        let presigned = request.presigned(presigning).await?;
        Ok(PresignedUrl::new(presigned.uri().to_string(), valid_for))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use aws_sdk_s3::operation::complete_multipart_upload::CompleteMultipartUploadOutput;
    use aws_sdk_s3::operation::create_multipart_upload::CreateMultipartUploadOutput;
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::operation::head_object::HeadObjectOutput;
    use aws_sdk_s3::operation::put_object_tagging::PutObjectTaggingOutput;
    use aws_sdk_s3::operation::upload_part::UploadPartOutput;
    use aws_sdk_s3::Client;
    use aws_smithy_mocks_experimental::{mock, RuleMode};
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use aws_smithy_types::error::ErrorMetadata;
    use bytes::Bytes;
    use test_common::mock_client_with_stubbed_http_client;

    use super::{part_number_for, S3BlockStore};
    use crate::error::{ErrorKind, ResourceKind};
    use crate::store::{BlobLocation, BlockStore, CommitPayload};
    use crate::types::block_name_for_index;

    fn not_found_http_resp() -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(404).unwrap(), SdkBody::empty())
    }

    #[test]
    fn test_part_numbers_follow_block_index() {
        assert_eq!(part_number_for(&block_name_for_index(0)).unwrap(), 1);
        assert_eq!(part_number_for(&block_name_for_index(1)).unwrap(), 2);
        assert_eq!(part_number_for(&block_name_for_index(41)).unwrap(), 42);
        assert!(part_number_for("not-base64!").is_err());
    }

    #[tokio::test]
    async fn test_container_exists_maps_404_to_false() {
        let head_bucket = mock!(Client::head_bucket).then_http_response(not_found_http_resp);
        let client = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&head_bucket]);
        let store = S3BlockStore::new(client);

        assert!(!store.container_exists("missing-bucket").await.unwrap());
    }

    #[tokio::test]
    async fn test_stage_blocks_and_commit_in_order() {
        let create_mpu = mock!(Client::create_multipart_upload)
            .match_requests(|r| r.metadata().is_some_and(|m| m.contains_key("filename")))
            .then_output(|| {
                CreateMultipartUploadOutput::builder()
                    .upload_id("mpu-1")
                    .build()
            });
        let upload_part = mock!(Client::upload_part)
            .match_requests(|r| r.upload_id() == Some("mpu-1"))
            .then_output(|| UploadPartOutput::builder().e_tag("etag-part").build());
        let complete = mock!(Client::complete_multipart_upload)
            .match_requests(|r| {
                let parts = r
                    .multipart_upload()
                    .map(|mpu| {
                        mpu.parts()
                            .iter()
                            .map(|p| p.part_number().unwrap_or_default())
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();
                parts == vec![1, 2]
            })
            .then_output(|| {
                CompleteMultipartUploadOutput::builder()
                    .e_tag("etag-final")
                    .version_id("v-1")
                    .build()
            });
        let tagging = mock!(Client::put_object_tagging)
            .match_requests(|r| {
                r.version_id() == Some("v-1")
                    && r.tagging().is_some_and(|t| {
                        t.tag_set()
                            .iter()
                            .any(|tag| tag.key() == "content-sha256" && tag.value() == "abc123")
                    })
            })
            .then_output(|| PutObjectTaggingOutput::builder().build());
        let client = mock_client_with_stubbed_http_client!(
            aws_sdk_s3,
            RuleMode::MatchAny,
            &[&create_mpu, &upload_part, &complete, &tagging]
        );
        let store = S3BlockStore::new(client);

        let metadata = vec![("filename".to_owned(), "clip.mp4".to_owned())];
        let session = store
            .create_staging("bucket", "blob", &metadata)
            .await
            .unwrap();
        assert_eq!(session.session_id(), "mpu-1");

        let names = vec![block_name_for_index(0), block_name_for_index(1)];
        for name in &names {
            store
                .stage_block("bucket", "blob", &session, name, Bytes::from_static(b"xx"))
                .await
                .unwrap();
        }

        let committed = store
            .commit_blocks(
                "bucket",
                "blob",
                &session,
                &names,
                CommitPayload {
                    tags: vec![("team".to_owned(), "media".to_owned())],
                    content_hash: "abc123".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(committed.version_id.as_deref(), Some("v-1"));
        assert_eq!(committed.etag.as_deref(), Some("etag-final"));
    }

    #[tokio::test]
    async fn test_commit_rejects_block_count_mismatch() {
        // Fails the local count check before any request is issued.
        let unused = mock!(Client::head_object).then_output(|| HeadObjectOutput::builder().build());
        let client = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&unused]);
        let store = S3BlockStore::new(client);

        let session = crate::store::StagingSession::new("mpu-1");
        session.record_part(1, Some("etag".to_owned()));
        let err = store
            .commit_blocks(
                "bucket",
                "blob",
                &session,
                &[block_name_for_index(0), block_name_for_index(1)],
                CommitPayload {
                    tags: vec![],
                    content_hash: "h".to_owned(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::CommitFailed);
    }

    #[tokio::test]
    async fn test_read_blob_maps_no_such_key() {
        let get_object = mock!(Client::get_object).then_error(|| {
            GetObjectError::generic(ErrorMetadata::builder().code("NoSuchKey").build())
        });
        let client = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&get_object]);
        let store = S3BlockStore::new(client);

        let err = store.read_blob("bucket", "nope", None).await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::Blob));
    }

    #[tokio::test]
    async fn test_delete_missing_version_is_version_not_found() {
        let head_object = mock!(Client::head_object).then_http_response(not_found_http_resp);
        let client = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&head_object]);
        let store = S3BlockStore::new(client);

        let err = store
            .delete_blob("bucket", "blob", Some("v-9"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NotFound(ResourceKind::BlobVersion));
    }

    #[tokio::test]
    async fn test_copy_source_is_percent_encoded_and_versioned() {
        let copy = mock!(Client::copy_object)
            .match_requests(|r| {
                r.copy_source() == Some("src-bucket/dir/a%20b.txt?versionId=v-1")
            })
            .then_output(|| {
                aws_sdk_s3::operation::copy_object::CopyObjectOutput::builder()
                    .version_id("v-2")
                    .build()
            });
        let client = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&copy]);
        let store = S3BlockStore::new(client);

        let version = store
            .copy_blob(
                BlobLocation {
                    container: "src-bucket",
                    blob: "dir/a b.txt",
                    version_id: Some("v-1"),
                },
                "dst-bucket",
                "copy.txt",
            )
            .await
            .unwrap();
        assert_eq!(version.as_deref(), Some("v-2"));
    }

    #[tokio::test]
    async fn test_presign_read_carries_validity() {
        let get_object =
            mock!(Client::get_object).then_output(|| GetObjectOutput::builder().build());
        let client = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&get_object]);
        let store = S3BlockStore::new(client);

        let presigned = store
            .presign_read("bucket", "blob", None, Duration::from_secs(900))
            .await
            .unwrap();
        assert_eq!(presigned.expires_in(), Duration::from_secs(900));
        assert!(presigned.url().contains("blob"));
    }
}
