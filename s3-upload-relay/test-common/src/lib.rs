/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use s3_upload_relay::error::{Error, ErrorKind, ResourceKind};
use s3_upload_relay::io::ChunkBody;
use s3_upload_relay::store::{
    BlobDetails, BlobLocation, BlobProps, BlobVersion, BlockStore, CommitPayload, CommittedBlob,
    PresignedUrl, StagingSession, CONTENT_HASH_TAG,
};

/// Wraps `mock_client!` and swaps in a stubbed HTTP client, so that any
/// request that slips past the mock rules fails inside the stub instead of
/// hitting the network.
#[macro_export]
macro_rules! mock_client_with_stubbed_http_client {
    ($aws_crate: ident, $rules: expr) => {
        mock_client_with_stubbed_http_client!(
            $aws_crate,
            aws_smithy_mocks_experimental::RuleMode::Sequential,
            $rules
        )
    };
    ($aws_crate: ident, $rule_mode: expr, $rules: expr) => {{
        let client = aws_smithy_mocks_experimental::mock_client!($aws_crate, $rule_mode, $rules);
        $aws_crate::client::Client::from_conf(
            client
                .config()
                .to_builder()
                .http_client(
                    aws_smithy_runtime::client::http::test_util::infallible_client_fn(|_req| {
                        http_02x::Response::builder().status(200).body("").unwrap()
                    }),
                )
                .build(),
        )
    }};
}

/// In-memory [`BlockStore`] with the same staging lifecycle as the S3
/// implementation: a session is opened per blob, blocks accumulate under it,
/// and a commit assembles them in block-list order into a stored revision.
///
/// Cloning shares state, so a test can keep a handle for inspection while the
/// relay owns another. Failure injection and a configurable stage delay make
/// the drain worker's error and interleaving paths reachable from tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockStore {
    inner: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    stages_in_flight: AtomicUsize,
    max_stages_in_flight: AtomicUsize,
}

#[derive(Debug, Default)]
struct State {
    containers: HashSet<String>,
    sessions: HashMap<String, SessionState>,
    blobs: HashMap<String, Vec<StoredBlob>>,
    versioned: bool,
    next_seq: u64,
    stage_calls: usize,
    commit_calls: usize,
    abort_calls: usize,
    copy_calls: usize,
    fail_stage_at: Option<usize>,
    fail_commits: bool,
    stage_delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct SessionState {
    container: String,
    blob: String,
    metadata: Vec<(String, String)>,
    /// Staged blocks in arrival order
    blocks: Vec<(String, Bytes)>,
}

/// One committed revision of a blob, exactly as the store received it.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Full content assembled in block-list order
    pub data: Bytes,
    /// The block list the commit named, in order
    pub block_order: Vec<String>,
    /// Metadata attached when the staging session was opened
    pub metadata: Vec<(String, String)>,
    /// Tags applied at commit, content hash tag included
    pub tags: Vec<(String, String)>,
    /// Version minted for this revision, when versioning is on
    pub version_id: Option<String>,
    /// Store etag of this revision
    pub etag: String,
    created_on: aws_smithy_types::DateTime,
}

impl StoredBlob {
    /// The hex content digest the commit carried.
    pub fn content_hash(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key == CONTENT_HASH_TAG)
            .map(|(_, value)| value.as_str())
    }
}

fn blob_key(container: &str, blob: &str) -> String {
    format!("{}/{}", container, blob)
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one existing container.
    pub fn with_container(container: &str) -> Self {
        let store = Self::default();
        store.add_container(container);
        store
    }

    pub fn add_container(&self, container: &str) {
        self.lock().containers.insert(container.to_string());
    }

    /// Mint version ids on commit and keep every revision, like a
    /// versioning-enabled bucket.
    pub fn set_versioned(&self, versioned: bool) {
        self.lock().versioned = versioned;
    }

    /// Hold every `stage_block` call open for `delay` before it lands.
    pub fn set_stage_delay(&self, delay: Duration) {
        self.lock().stage_delay = Some(delay);
    }

    /// Make the `n`th `stage_block` call (1-based, counted across all blobs)
    /// fail.
    pub fn fail_nth_stage(&self, n: usize) {
        self.lock().fail_stage_at = Some(n);
    }

    /// Make every `commit_blocks` call fail.
    pub fn fail_commits(&self) {
        self.lock().fail_commits = true;
    }

    /// The latest committed revision of a blob.
    pub fn committed(&self, container: &str, blob: &str) -> Option<StoredBlob> {
        self.lock()
            .blobs
            .get(&blob_key(container, blob))
            .and_then(|revisions| revisions.last().cloned())
    }

    /// All committed revisions of a blob, oldest first.
    pub fn committed_revisions(&self, container: &str, blob: &str) -> Vec<StoredBlob> {
        self.lock()
            .blobs
            .get(&blob_key(container, blob))
            .cloned()
            .unwrap_or_default()
    }

    pub fn stage_count(&self) -> usize {
        self.lock().stage_calls
    }

    pub fn commit_count(&self) -> usize {
        self.lock().commit_calls
    }

    pub fn abort_count(&self) -> usize {
        self.lock().abort_calls
    }

    pub fn copy_count(&self) -> usize {
        self.lock().copy_calls
    }

    /// Staging sessions opened but neither committed nor aborted.
    pub fn open_sessions(&self) -> usize {
        self.lock().sessions.len()
    }

    /// The most `stage_block` calls ever observed in flight at once.
    pub fn max_concurrent_stages(&self) -> usize {
        self.inner.max_stages_in_flight.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.inner.state.lock().unwrap()
    }
}

impl State {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

#[async_trait::async_trait]
impl BlockStore for MemoryBlockStore {
    async fn container_exists(&self, container: &str) -> Result<bool, Error> {
        Ok(self.lock().containers.contains(container))
    }

    async fn create_staging(
        &self,
        container: &str,
        blob: &str,
        metadata: &[(String, String)],
    ) -> Result<StagingSession, Error> {
        let mut state = self.lock();
        if !state.containers.contains(container) {
            return Err(Error::new(
                ErrorKind::NotFound(ResourceKind::Container),
                format!("no container named `{container}`"),
            ));
        }
        let seq = state.next_seq();
        let session_id = format!("session-{seq}");
        state.sessions.insert(
            session_id.clone(),
            SessionState {
                container: container.to_string(),
                blob: blob.to_string(),
                metadata: metadata.to_vec(),
                blocks: Vec::new(),
            },
        );
        Ok(StagingSession::new(session_id))
    }

    async fn stage_block(
        &self,
        _container: &str,
        _blob: &str,
        session: &StagingSession,
        block_name: &str,
        data: Bytes,
    ) -> Result<(), Error> {
        let delay = {
            let mut state = self.lock();
            state.stage_calls += 1;
            if state.fail_stage_at == Some(state.stage_calls) {
                return Err(Error::new(
                    ErrorKind::IOError,
                    format!("injected failure staging block `{block_name}`"),
                ));
            }
            state.stage_delay
        };

        let in_flight = self.inner.stages_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner
            .max_stages_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let result = {
            let mut state = self.lock();
            match state.sessions.get_mut(session.session_id()) {
                Some(open) => {
                    open.blocks.push((block_name.to_string(), data));
                    Ok(())
                }
                None => Err(Error::new(
                    ErrorKind::NotFound(ResourceKind::Upload),
                    format!("no open staging session `{}`", session.session_id()),
                )),
            }
        };
        self.inner.stages_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn commit_blocks(
        &self,
        container: &str,
        blob: &str,
        session: &StagingSession,
        block_names: &[String],
        payload: CommitPayload,
    ) -> Result<CommittedBlob, Error> {
        let mut state = self.lock();
        state.commit_calls += 1;
        if state.fail_commits {
            return Err(Error::new(
                ErrorKind::CommitFailed,
                "injected commit failure",
            ));
        }
        let open = state.sessions.remove(session.session_id()).ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound(ResourceKind::Upload),
                format!("no open staging session `{}`", session.session_id()),
            )
        })?;

        let mut data = Vec::new();
        for name in block_names {
            let block = open
                .blocks
                .iter()
                .find(|(staged_name, _)| staged_name == name)
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::CommitFailed,
                        format!("block list names `{name}` but it was never staged"),
                    )
                })?;
            data.extend_from_slice(&block.1);
        }

        let versioned = state.versioned;
        let seq = state.next_seq();
        let version_id = versioned.then(|| format!("v{seq}"));
        let etag = format!("etag-{seq}");
        let mut tags = payload.tags;
        tags.push((CONTENT_HASH_TAG.to_string(), payload.content_hash));

        let revision = StoredBlob {
            data: Bytes::from(data),
            block_order: block_names.to_vec(),
            metadata: open.metadata,
            tags,
            version_id: version_id.clone(),
            etag: etag.clone(),
            created_on: aws_smithy_types::DateTime::from_secs(1_700_000_000 + seq as i64),
        };

        let revisions = state.blobs.entry(blob_key(container, blob)).or_default();
        if !versioned {
            revisions.clear();
        }
        revisions.push(revision);

        Ok(CommittedBlob {
            version_id,
            etag: Some(etag),
        })
    }

    async fn abort_staging(
        &self,
        _container: &str,
        _blob: &str,
        session: &StagingSession,
    ) -> Result<(), Error> {
        let mut state = self.lock();
        state.abort_calls += 1;
        state.sessions.remove(session.session_id());
        Ok(())
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool, Error> {
        Ok(self.lock().blobs.contains_key(&blob_key(container, blob)))
    }

    async fn read_blob(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
    ) -> Result<(BlobProps, ChunkBody), Error> {
        let state = self.lock();
        let revisions = state.blobs.get(&blob_key(container, blob)).ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound(ResourceKind::Blob),
                format!("no blob `{container}/{blob}`"),
            )
        })?;
        let revision = match version_id {
            Some(version) => revisions
                .iter()
                .find(|r| r.version_id.as_deref() == Some(version))
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::NotFound(ResourceKind::BlobVersion),
                        format!("no version `{version}` of blob `{container}/{blob}`"),
                    )
                })?,
            None => revisions.last().expect("at least one revision"),
        };
        let props = BlobProps {
            length: revision.data.len() as u64,
            content_type: None,
            etag: Some(revision.etag.clone()),
            version_id: revision.version_id.clone(),
            created_on: Some(revision.created_on.clone()),
        };
        Ok((props, ChunkBody::from(revision.data.clone())))
    }

    async fn blob_details(&self, container: &str, blob: &str) -> Result<BlobDetails, Error> {
        let state = self.lock();
        let revisions = state.blobs.get(&blob_key(container, blob)).ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound(ResourceKind::Blob),
                format!("no blob `{container}/{blob}`"),
            )
        })?;
        let latest = revisions.last().expect("at least one revision");
        let props = BlobProps {
            length: latest.data.len() as u64,
            content_type: None,
            etag: Some(latest.etag.clone()),
            version_id: latest.version_id.clone(),
            created_on: Some(latest.created_on.clone()),
        };
        let versions = revisions
            .iter()
            .rev()
            .enumerate()
            .map(|(i, r)| BlobVersion {
                version_id: r.version_id.clone(),
                length: r.data.len() as u64,
                created_on: Some(r.created_on.clone()),
                is_latest: i == 0,
            })
            .collect();
        Ok(BlobDetails {
            props,
            metadata: latest.metadata.clone(),
            tags: latest.tags.clone(),
            versions,
        })
    }

    async fn delete_blob(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
    ) -> Result<(), Error> {
        let mut state = self.lock();
        let key = blob_key(container, blob);
        match version_id {
            Some(version) => {
                let revisions = state.blobs.get_mut(&key).ok_or_else(|| {
                    Error::new(
                        ErrorKind::NotFound(ResourceKind::BlobVersion),
                        format!("no version `{version}` of blob `{container}/{blob}`"),
                    )
                })?;
                let before = revisions.len();
                revisions.retain(|r| r.version_id.as_deref() != Some(version));
                if revisions.len() == before {
                    return Err(Error::new(
                        ErrorKind::NotFound(ResourceKind::BlobVersion),
                        format!("no version `{version}` of blob `{container}/{blob}`"),
                    ));
                }
                if revisions.is_empty() {
                    state.blobs.remove(&key);
                }
                Ok(())
            }
            None => match state.blobs.remove(&key) {
                Some(_) => Ok(()),
                None => Err(Error::new(
                    ErrorKind::NotFound(ResourceKind::Blob),
                    format!("no blob `{container}/{blob}`"),
                )),
            },
        }
    }

    async fn copy_blob(
        &self,
        source: BlobLocation<'_>,
        dest_container: &str,
        dest_blob: &str,
    ) -> Result<Option<String>, Error> {
        let mut state = self.lock();
        state.copy_calls += 1;
        if !state.containers.contains(dest_container) {
            return Err(Error::new(
                ErrorKind::NotFound(ResourceKind::Container),
                format!("no container named `{dest_container}`"),
            ));
        }
        let source_key = blob_key(source.container, source.blob);
        let revisions = state.blobs.get(&source_key).ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound(ResourceKind::Blob),
                format!("no blob `{source_key}`"),
            )
        })?;
        let copied = match source.version_id {
            Some(version) => revisions
                .iter()
                .find(|r| r.version_id.as_deref() == Some(version))
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::NotFound(ResourceKind::BlobVersion),
                        format!("no version `{version}` of blob `{source_key}`"),
                    )
                })?,
            None => revisions.last().expect("at least one revision"),
        };
        let mut copy = copied.clone();

        let versioned = state.versioned;
        let seq = state.next_seq();
        copy.version_id = versioned.then(|| format!("v{seq}"));
        copy.etag = format!("etag-{seq}");
        copy.created_on = aws_smithy_types::DateTime::from_secs(1_700_000_000 + seq as i64);
        let version_id = copy.version_id.clone();

        let revisions = state
            .blobs
            .entry(blob_key(dest_container, dest_blob))
            .or_default();
        if !versioned {
            revisions.clear();
        }
        revisions.push(copy);
        Ok(version_id)
    }

    async fn presign_read(
        &self,
        container: &str,
        blob: &str,
        version_id: Option<&str>,
        valid_for: Duration,
    ) -> Result<PresignedUrl, Error> {
        let mut url = format!("https://store.test/{container}/{blob}?signed=1");
        if let Some(version) = version_id {
            url.push_str("&versionId=");
            url.push_str(version);
        }
        Ok(PresignedUrl::new(url, valid_for))
    }
}
