/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Background worker that drains one upload's chunk queue into the store.

use std::sync::Arc;

use crate::error;
use crate::staging::record::{ClaimedChunk, UploadRecord};
use crate::staging::status::{self, TerminalEntry};
use crate::staging::StagingShared;
use crate::store::CommitPayload;

/// Drain the record's queue until nothing is left to stage, committing the
/// blob once every declared byte is durable.
///
/// The caller must hold the record's drain guard. The guard is released when
/// the queue empties; a re-check after release picks the guard straight back
/// up if a chunk slipped in between, so no appended chunk is ever stranded
/// without a worker. Failures are recorded on the upload and never propagate:
/// staging and commit errors abandon the whole upload.
pub(crate) async fn drain(shared: Arc<StagingShared>, record: Arc<UploadRecord>) {
    loop {
        while let Some(chunk) = record.claim_next() {
            if let Err(err) = stage_one(&shared, &record, chunk).await {
                tracing::error!(error = %err, "staging failed, abandoning upload");
                record.mark_failed(err.to_string());
                let store = shared.config.store();
                if let Err(abort_err) = store
                    .abort_staging(record.container(), record.blob(), record.session())
                    .await
                {
                    tracing::warn!(error = %abort_err, "failed to abort staging session");
                }
                retire(&shared, &record);
                return;
            }
        }

        // Queue drained. Commit only once every declared byte is staged;
        // a partially-delivered upload keeps its record and waits for more.
        if record.size_offset_internal() == record.upload_length() {
            commit(&shared, &record).await;
            retire(&shared, &record);
            return;
        }

        record.release_drain_guard();
        if record.has_waiting() && record.try_claim_drain_guard() {
            continue;
        }
        return;
    }
}

async fn stage_one(
    shared: &StagingShared,
    record: &UploadRecord,
    chunk: ClaimedChunk,
) -> Result<(), error::Error> {
    // Hash in block-index order before staging, so the digest is fixed by
    // arrival order no matter how staging itself is timed.
    record.feed_hash(chunk.index, &chunk.data)?;
    shared
        .config
        .store()
        .stage_block(
            record.container(),
            record.blob(),
            record.session(),
            &chunk.block_name,
            chunk.data.clone(),
        )
        .await?;
    let staged = record.complete_chunk(&chunk.block_name, chunk.data.len() as u64);
    tracing::trace!(block_name = %chunk.block_name, staged, "staged chunk");
    Ok(())
}

async fn commit(shared: &StagingShared, record: &UploadRecord) {
    let payload = match record.finalize_hash() {
        Ok(hash) => CommitPayload {
            tags: record.tags().to_vec(),
            content_hash: hash.to_hex(),
        },
        Err(err) => {
            record.mark_failed(err.to_string());
            return;
        }
    };
    let block_names = record.block_names();
    match shared
        .config
        .store()
        .commit_blocks(
            record.container(),
            record.blob(),
            record.session(),
            &block_names,
            payload,
        )
        .await
    {
        Ok(committed) => {
            tracing::debug!(
                blocks = block_names.len(),
                version_id = committed.version_id.as_deref().unwrap_or_default(),
                "upload committed"
            );
            record.mark_done();
        }
        Err(err) => {
            tracing::error!(error = %err, "commit failed, abandoning upload");
            record.mark_failed(err.to_string());
        }
    }
}

/// Remove the finished record from the active table, leave its terminal
/// snapshot behind for pollers and release its buffers.
///
/// Only the worker that actually removes the record publishes a snapshot.
/// This keeps a late worker for an already-retired record (appends racing
/// the commit) from clobbering the real outcome.
fn retire(shared: &StagingShared, record: &Arc<UploadRecord>) {
    record.release_drain_guard();
    let snapshot = status::project(record);
    let removed = shared
        .active
        .remove_if(record.file_id(), |_, entry| Arc::ptr_eq(entry, record))
        .is_some();
    if removed {
        shared.terminal.lock().unwrap().insert(
            record.file_id().to_string(),
            TerminalEntry {
                at: tokio::time::Instant::now(),
                snapshot,
            },
        );
    }
    record.dispose();
}
