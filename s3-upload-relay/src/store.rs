/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Durable block-store contract.
//!
//! The staging core and the object operations talk to storage exclusively
//! through [`BlockStore`]. The provided implementation is
//! [`S3BlockStore`](crate::store::s3::S3BlockStore), which maps the contract
//! onto S3 multipart uploads and object APIs.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use bytes::Bytes;

use crate::error;
use crate::io::ChunkBody;

pub mod s3;

/// Tag attached at commit carrying the hex digest of the committed content.
pub const CONTENT_HASH_TAG: &str = "content-sha256";

/// Abstraction over the durable store blocks are staged into and committed to.
///
/// A staging lifecycle is `create_staging` followed by any number of
/// `stage_block` calls and exactly one of `commit_blocks` or `abort_staging`.
/// Block names within one staging session are unique and equal length;
/// `commit_blocks` receives them in the order the content is assembled.
#[async_trait::async_trait]
pub trait BlockStore: Send + Sync + fmt::Debug {
    /// Whether `container` exists in the store.
    async fn container_exists(&self, container: &str) -> Result<bool, error::Error>;

    /// Open a staging session for a new blob.
    ///
    /// `metadata` is attached to the blob and becomes visible once the
    /// session is committed.
    async fn create_staging(
        &self,
        container: &str,
        blob: &str,
        metadata: &[(String, String)],
    ) -> Result<StagingSession, error::Error>;

    /// Durably stage one block of the blob under `block_name`.
    async fn stage_block(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
        block_name: &str,
        data: Bytes,
    ) -> Result<(), error::Error>;

    /// Commit the staged blocks, in the given order, as the blob content.
    async fn commit_blocks(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
        block_names: &[String],
        payload: CommitPayload,
    ) -> Result<CommittedBlob, error::Error>;

    /// Abandon the staging session and discard its staged blocks.
    async fn abort_staging(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
    ) -> Result<(), error::Error>;

    /// Whether a committed blob exists.
    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool, error::Error>;

    /// Read a committed blob, optionally pinned to a version.
    async fn read_blob(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
    ) -> Result<(BlobProps, ChunkBody), error::Error>;

    /// Properties, metadata, tags and the version history of a committed blob.
    async fn blob_details(&self, container: &str, blob: &str)
        -> Result<BlobDetails, error::Error>;

    /// Delete a committed blob, or one version of it.
    async fn delete_blob(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
    ) -> Result<(), error::Error>;

    /// Server-side copy of a committed blob. Returns the version id of the
    /// copy when the store versions the destination container.
    async fn copy_blob(
        &self,
        source: BlobLocation<'_>,
        dest_container: &str,
        dest_blob: &str,
    ) -> Result<Option<String>, error::Error>;

    /// Produce a time-limited URL granting unauthenticated reads of a blob.
    async fn presign_read(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
        valid_for: Duration,
    ) -> Result<PresignedUrl, error::Error>;
}

/// Borrowed coordinates of one (optionally versioned) blob.
#[derive(Debug, Clone, Copy)]
pub struct BlobLocation<'a> {
    /// Container holding the blob
    pub container: &'a str,
    /// Blob name within the container
    pub blob: &'a str,
    /// Pin to a specific version instead of the latest
    pub version_id: Option<&'a str>,
}

/// Handle to one in-progress staging session.
///
/// The store mints the session and records per-block bookkeeping (part
/// numbers and etags for S3) into it as blocks are staged. Interior
/// mutability keeps `stage_block` at `&self` on both sides.
#[derive(Debug)]
pub struct StagingSession {
    session_id: String,
    parts: Mutex<Vec<StagedPart>>,
}

#[derive(Debug, Clone)]
pub(crate) struct StagedPart {
    pub(crate) part_number: i32,
    pub(crate) etag: Option<String>,
}

impl StagingSession {
    /// Create a session from the store's upload identifier.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            parts: Mutex::new(Vec::new()),
        }
    }

    /// The store's identifier for this session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record bookkeeping for a block the store accepted.
    pub fn record_part(&self, part_number: i32, etag: Option<String>) {
        self.parts
            .lock()
            .unwrap()
            .push(StagedPart { part_number, etag });
    }

    /// Staged parts ordered by part number.
    pub(crate) fn staged_parts(&self) -> Vec<StagedPart> {
        let mut parts = self.parts.lock().unwrap().clone();
        parts.sort_by_key(|p| p.part_number);
        parts
    }
}

/// Commit-time payload routed to the store alongside the block list.
#[derive(Debug, Clone)]
pub struct CommitPayload {
    /// Object tags to attach to the committed blob
    pub tags: Vec<(String, String)>,
    /// Hex digest of the full committed content
    pub content_hash: String,
}

/// Identity of a blob the store just committed.
#[derive(Debug, Clone)]
pub struct CommittedBlob {
    /// Version minted for the committed blob, if the container is versioned
    pub version_id: Option<String>,
    /// Store etag of the committed blob
    pub etag: Option<String>,
}

/// Properties of a committed blob.
#[derive(Debug, Clone, Default)]
pub struct BlobProps {
    /// Content length in bytes
    pub length: u64,
    /// Content type, when the store recorded one
    pub content_type: Option<String>,
    /// Store etag
    pub etag: Option<String>,
    /// Version the properties describe
    pub version_id: Option<String>,
    /// When the blob (version) was committed
    pub created_on: Option<aws_smithy_types::DateTime>,
}

/// Detailed read model of a committed blob.
#[derive(Debug, Clone, Default)]
pub struct BlobDetails {
    /// Properties of the latest version
    pub props: BlobProps,
    /// Blob metadata pairs
    pub metadata: Vec<(String, String)>,
    /// Blob tags
    pub tags: Vec<(String, String)>,
    /// Version history, newest first
    pub versions: Vec<BlobVersion>,
}

/// One entry of a blob's version history.
#[derive(Debug, Clone)]
pub struct BlobVersion {
    /// Version identifier
    pub version_id: Option<String>,
    /// Content length of this version
    pub length: u64,
    /// When this version was committed
    pub created_on: Option<aws_smithy_types::DateTime>,
    /// Whether this is the current version
    pub is_latest: bool,
}

/// A presigned, time-limited read URL.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    url: String,
    expires_in: Duration,
}

impl PresignedUrl {
    /// Assemble a presigned URL. Store implementations call this from
    /// [`BlockStore::presign_read`].
    pub fn new(url: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            url: url.into(),
            expires_in,
        }
    }

    /// The URL itself.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// How long the URL stays valid from the time it was signed.
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::StagingSession;

    #[test]
    fn test_staged_parts_sorted_by_part_number() {
        let session = StagingSession::new("sess-1");
        session.record_part(3, Some("etag-3".to_owned()));
        session.record_part(1, Some("etag-1".to_owned()));
        session.record_part(2, None);

        let parts = session.staged_parts();
        let numbers: Vec<i32> = parts.iter().map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(parts[0].etag.as_deref(), Some("etag-1"));
    }
}
