/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! In-memory record of one in-flight upload.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use bytes::Bytes;

use crate::error;
use crate::hash::{ContentHash, ContentHasher};
use crate::store::StagingSession;
use crate::types;

/// Lifecycle of one accepted chunk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ChunkState {
    /// Accepted and buffered, not yet claimed by the drain worker
    Waiting,
    /// Claimed by the drain worker, staging in progress
    Started,
    /// Staged durably; the buffer has been released
    Done,
}

#[derive(Debug)]
struct QueuedChunk {
    block_name: String,
    index: u64,
    state: ChunkState,
    data: Bytes,
}

/// A chunk the drain worker has claimed for staging.
#[derive(Debug)]
pub(crate) struct ClaimedChunk {
    pub(crate) block_name: String,
    pub(crate) index: u64,
    pub(crate) data: Bytes,
}

#[derive(Debug, Default)]
struct RecordInner {
    /// Chunks in arrival order; fully staged chunks are popped off the front
    queue: VecDeque<QueuedChunk>,
    /// Every block name minted for this upload, in arrival order
    block_names: Vec<String>,
}

/// Shared state for one upload: identity, the chunk queue, progress counters,
/// the running content hash and the drain-worker guard.
///
/// One mutex serializes enqueue and claim so that block indexes are minted in
/// arrival order and the worker always claims the lowest waiting index, which
/// is what keeps the content hash and the commit block list deterministic.
/// Progress counters are atomics so status reads never contend with staging.
#[derive(Debug)]
pub(crate) struct UploadRecord {
    file_id: String,
    container: String,
    blob: String,
    file_name: String,
    upload_length: u64,
    /// Encoded metadata exactly as the client sent it, echoed on reads
    metadata: String,
    /// Tag pairs split out of the metadata, applied at commit
    tags: Vec<(String, String)>,
    session: StagingSession,

    inner: Mutex<RecordInner>,

    /// Chunks accepted
    queue_count: AtomicU64,
    /// Chunks staged durably
    queue_position: AtomicU64,
    /// Bytes accepted
    size_offset: AtomicU64,
    /// Bytes staged durably
    size_offset_internal: AtomicU64,

    hasher: Mutex<Option<ContentHasher>>,
    done: AtomicBool,
    error: Mutex<Option<String>>,
    drain_active: AtomicBool,
}

impl UploadRecord {
    pub(crate) fn new(
        file_id: impl Into<String>,
        container: impl Into<String>,
        blob: impl Into<String>,
        file_name: impl Into<String>,
        upload_length: u64,
        metadata: impl Into<String>,
        tags: Vec<(String, String)>,
        session: StagingSession,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            container: container.into(),
            blob: blob.into(),
            file_name: file_name.into(),
            upload_length,
            metadata: metadata.into(),
            tags,
            session,
            inner: Mutex::new(RecordInner::default()),
            queue_count: AtomicU64::new(0),
            queue_position: AtomicU64::new(0),
            size_offset: AtomicU64::new(0),
            size_offset_internal: AtomicU64::new(0),
            hasher: Mutex::new(Some(ContentHasher::new())),
            done: AtomicBool::new(false),
            error: Mutex::new(None),
            drain_active: AtomicBool::new(false),
        }
    }

    /// Accept one chunk: mint its block name, buffer it and account for it.
    ///
    /// Rejections leave the record untouched: a chunk that would push the
    /// accepted byte count past the declared length is invalid input, and one
    /// that would push accepted-but-unstaged bytes past `max_buffered_bytes`
    /// is a buffer-full error the client can retry after draining catches up.
    pub(crate) fn enqueue_chunk(
        &self,
        data: Bytes,
        max_buffered_bytes: u64,
    ) -> Result<String, error::Error> {
        let mut inner = self.inner.lock().unwrap();

        if self.done.load(Ordering::SeqCst) {
            return Err(error::invalid_input(format!(
                "upload `{}` already finished",
                self.file_id
            )));
        }

        let accepted = self.size_offset.load(Ordering::SeqCst);
        let staged = self.size_offset_internal.load(Ordering::SeqCst);
        let len = data.len() as u64;
        if accepted + len > self.upload_length {
            return Err(error::invalid_input(format!(
                "chunk of {} bytes exceeds the declared upload length ({} of {} bytes already accepted)",
                len, accepted, self.upload_length
            )));
        }
        let pending = accepted - staged;
        if pending + len > max_buffered_bytes {
            return Err(error::buffer_full(format!(
                "{} bytes already pending and {} more would exceed the {} byte cap",
                pending, len, max_buffered_bytes
            )));
        }

        let index = self.queue_count.load(Ordering::SeqCst);
        if index >= types::MAX_BLOCKS_PER_UPLOAD {
            return Err(error::invalid_input(format!(
                "upload `{}` exceeds {} chunks",
                self.file_id,
                types::MAX_BLOCKS_PER_UPLOAD
            )));
        }

        let block_name = types::block_name_for_index(index);
        inner.queue.push_back(QueuedChunk {
            block_name: block_name.clone(),
            index,
            state: ChunkState::Waiting,
            data,
        });
        inner.block_names.push(block_name.clone());
        self.queue_count.store(index + 1, Ordering::SeqCst);
        self.size_offset.store(accepted + len, Ordering::SeqCst);
        Ok(block_name)
    }

    /// Claim the lowest-index waiting chunk for staging.
    pub(crate) fn claim_next(&self) -> Option<ClaimedChunk> {
        let mut inner = self.inner.lock().unwrap();
        let chunk = inner
            .queue
            .iter_mut()
            .find(|c| c.state == ChunkState::Waiting)?;
        chunk.state = ChunkState::Started;
        Some(ClaimedChunk {
            block_name: chunk.block_name.clone(),
            index: chunk.index,
            data: chunk.data.clone(),
        })
    }

    /// Mark a claimed chunk staged, release its buffer and advance the
    /// durable counters. Returns the new durably-staged byte count.
    pub(crate) fn complete_chunk(&self, block_name: &str, len: u64) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        if let Some(chunk) = inner
            .queue
            .iter_mut()
            .find(|c| c.block_name == block_name)
        {
            chunk.state = ChunkState::Done;
            chunk.data = Bytes::new();
        }
        while matches!(inner.queue.front(), Some(c) if c.state == ChunkState::Done) {
            inner.queue.pop_front();
        }
        self.queue_position.fetch_add(1, Ordering::SeqCst);
        self.size_offset_internal.fetch_add(len, Ordering::SeqCst) + len
    }

    /// Whether any accepted chunk is still waiting to be staged.
    pub(crate) fn has_waiting(&self) -> bool {
        self.inner
            .lock()
            .unwrap()
            .queue
            .iter()
            .any(|c| c.state == ChunkState::Waiting)
    }

    /// All block names minted so far, in arrival order.
    pub(crate) fn block_names(&self) -> Vec<String> {
        self.inner.lock().unwrap().block_names.clone()
    }

    /// Try to become the single active drain worker for this record.
    pub(crate) fn try_claim_drain_guard(&self) -> bool {
        self.drain_active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub(crate) fn release_drain_guard(&self) {
        self.drain_active.store(false, Ordering::SeqCst);
    }

    /// Feed one staged block into the running content hash.
    pub(crate) fn feed_hash(&self, index: u64, data: &[u8]) -> Result<(), error::Error> {
        let mut hasher = self.hasher.lock().unwrap();
        match hasher.as_mut() {
            Some(hasher) => hasher.update_block(index, data),
            None => Err(error::runtime_error("content hash already finalized")),
        }
    }

    /// Consume the hasher and produce the digest of the full content.
    pub(crate) fn finalize_hash(&self) -> Result<ContentHash, error::Error> {
        let hasher = self.hasher.lock().unwrap().take();
        match hasher {
            Some(hasher) => Ok(hasher.finalize()),
            None => Err(error::runtime_error("content hash already finalized")),
        }
    }

    /// Record a terminal failure. The error description lands before the
    /// done flag flips so a concurrent status read never sees a successful
    /// finish on a failed upload.
    pub(crate) fn mark_failed(&self, description: impl Into<String>) {
        *self.error.lock().unwrap() = Some(description.into());
        self.done.store(true, Ordering::SeqCst);
    }

    pub(crate) fn mark_done(&self) {
        self.done.store(true, Ordering::SeqCst);
    }

    /// Release chunk buffers and hash state deterministically.
    pub(crate) fn dispose(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.queue.clear();
        drop(inner);
        self.hasher.lock().unwrap().take();
    }

    pub(crate) fn file_id(&self) -> &str {
        &self.file_id
    }

    pub(crate) fn container(&self) -> &str {
        &self.container
    }

    pub(crate) fn blob(&self) -> &str {
        &self.blob
    }

    pub(crate) fn file_name(&self) -> &str {
        &self.file_name
    }

    pub(crate) fn upload_length(&self) -> u64 {
        self.upload_length
    }

    pub(crate) fn metadata(&self) -> &str {
        &self.metadata
    }

    pub(crate) fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    pub(crate) fn session(&self) -> &StagingSession {
        &self.session
    }

    pub(crate) fn queue_count(&self) -> u64 {
        self.queue_count.load(Ordering::SeqCst)
    }

    pub(crate) fn queue_position(&self) -> u64 {
        self.queue_position.load(Ordering::SeqCst)
    }

    pub(crate) fn size_offset(&self) -> u64 {
        self.size_offset.load(Ordering::SeqCst)
    }

    pub(crate) fn size_offset_internal(&self) -> u64 {
        self.size_offset_internal.load(Ordering::SeqCst)
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    pub(crate) fn error_description(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn test_record(upload_length: u64) -> UploadRecord {
        UploadRecord::new(
            "bucket/blob",
            "bucket",
            "blob",
            "file.bin",
            upload_length,
            "",
            Vec::new(),
            StagingSession::new("sess"),
        )
    }

    #[test]
    fn test_enqueue_assigns_sequential_block_names() {
        let record = test_record(30);
        let a = record.enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX).unwrap();
        let b = record.enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX).unwrap();
        assert_eq!(a, types::block_name_for_index(0));
        assert_eq!(b, types::block_name_for_index(1));
        assert_eq!(record.queue_count(), 2);
        assert_eq!(record.size_offset(), 20);
        assert_eq!(record.size_offset_internal(), 0);
        assert_eq!(record.block_names(), vec![a, b]);
    }

    #[test]
    fn test_enqueue_rejects_beyond_declared_length() {
        let record = test_record(15);
        record.enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX).unwrap();
        let err = record
            .enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX)
            .unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::InputInvalid);
        // the failed chunk must not have been accounted
        assert_eq!(record.size_offset(), 10);
        assert_eq!(record.queue_count(), 1);
    }

    #[test]
    fn test_enqueue_rejects_when_buffer_cap_reached() {
        let record = test_record(100);
        record.enqueue_chunk(Bytes::from_static(b"0123456789"), 16).unwrap();
        let err = record
            .enqueue_chunk(Bytes::from_static(b"0123456789"), 16)
            .unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::BufferFull);

        // staging the pending chunk frees budget for the retry
        let claimed = record.claim_next().unwrap();
        record.complete_chunk(&claimed.block_name, claimed.data.len() as u64);
        record.enqueue_chunk(Bytes::from_static(b"0123456789"), 16).unwrap();
    }

    #[test]
    fn test_claim_and_complete_advance_counters_monotonically() {
        let record = test_record(30);
        record.enqueue_chunk(Bytes::from_static(b"aaaaaaaaaa"), u64::MAX).unwrap();
        record.enqueue_chunk(Bytes::from_static(b"bbbbbbbbbb"), u64::MAX).unwrap();

        let first = record.claim_next().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(&first.data[..], b"aaaaaaaaaa");
        assert_eq!(record.complete_chunk(&first.block_name, 10), 10);

        let second = record.claim_next().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(record.complete_chunk(&second.block_name, 10), 20);

        assert!(record.claim_next().is_none());
        assert_eq!(record.queue_position(), 2);
        assert!(record.size_offset_internal() <= record.size_offset());
    }

    #[test]
    fn test_drain_guard_is_exclusive_until_released() {
        let record = test_record(10);
        assert!(record.try_claim_drain_guard());
        assert!(!record.try_claim_drain_guard());
        record.release_drain_guard();
        assert!(record.try_claim_drain_guard());
    }

    #[test]
    fn test_dispose_releases_buffers_and_hash_state() {
        let record = test_record(10);
        record.enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX).unwrap();
        record.dispose();
        assert!(record.claim_next().is_none());
        assert!(record.finalize_hash().is_err());
    }

    #[test]
    fn test_enqueue_after_done_is_rejected() {
        let record = test_record(20);
        record.enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX).unwrap();
        record.mark_done();
        let err = record
            .enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX)
            .unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::InputInvalid);
    }
}
