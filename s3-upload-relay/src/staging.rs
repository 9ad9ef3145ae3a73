/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Chunk-staging core: the active-upload table and the upload lifecycle.
//!
//! An upload is created against a container, accepts chunks through
//! [`Staging::append`] and drains to the block store on a background worker.
//! Once every declared byte is staged the worker commits the blob, retires
//! the upload record and leaves a short-lived terminal snapshot behind for
//! status pollers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::Instrument;

use crate::config::Config;
use crate::error::{self, ResourceKind};
use crate::io::ChunkBody;
use crate::metadata;
use crate::staging::record::UploadRecord;
use crate::staging::status::{StatusSnapshot, TerminalEntry};

pub(crate) mod record;
pub(crate) mod status;
mod worker;

/// State shared between the staging front end and its drain workers.
#[derive(Debug)]
pub(crate) struct StagingShared {
    pub(crate) config: Config,
    /// In-progress uploads keyed by upload id (`{container}/{blob}`)
    pub(crate) active: DashMap<String, Arc<UploadRecord>>,
    /// Terminal snapshots of recently finished uploads
    pub(crate) terminal: Mutex<HashMap<String, TerminalEntry>>,
}

/// Front end of the staging store.
#[derive(Debug, Clone)]
pub(crate) struct Staging {
    shared: Arc<StagingShared>,
}

/// Identity of a freshly created upload.
#[derive(Debug)]
pub(crate) struct CreatedUpload {
    pub(crate) upload_id: String,
    pub(crate) container: String,
    pub(crate) blob: String,
}

/// Outcome of accepting one chunk.
#[derive(Debug)]
pub(crate) struct AcceptedChunk {
    /// Bytes accepted from this chunk
    pub(crate) bytes_accepted: u64,
    /// Total bytes accepted for the upload so far
    pub(crate) size_offset: u64,
}

impl Staging {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            shared: Arc::new(StagingShared {
                config,
                active: DashMap::new(),
                terminal: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Register a new upload and open its staging session.
    ///
    /// The target container comes from a `BLOB:container` metadata entry,
    /// falling back to the configured default. The blob name is freshly
    /// allocated, which is what makes the returned upload id unique.
    pub(crate) async fn create_upload(
        &self,
        upload_length: u64,
        raw_metadata: &str,
    ) -> Result<CreatedUpload, error::Error> {
        let pairs = metadata::decode(raw_metadata)?;
        let split = metadata::split(pairs);

        let container = split
            .container_hint
            .or_else(|| self.shared.config.default_container().map(String::from))
            .ok_or_else(|| {
                error::invalid_input(
                    "no target container: pass a `BLOB:container` metadata entry or configure a default container",
                )
            })?;
        let store = self.shared.config.store();
        if !store.container_exists(&container).await? {
            return Err(error::not_found(
                ResourceKind::Container,
                format!("container `{container}` does not exist"),
            ));
        }

        let blob = uuid::Uuid::new_v4().to_string();
        let upload_id = format!("{container}/{blob}");
        let file_name = split.file_name.unwrap_or_else(|| blob.clone());

        let session = store
            .create_staging(&container, &blob, &split.metadata)
            .await?;
        let record = Arc::new(UploadRecord::new(
            &upload_id,
            &container,
            &blob,
            file_name,
            upload_length,
            raw_metadata,
            split.tags,
            session,
        ));

        let occupied = {
            match self.shared.active.entry(upload_id.clone()) {
                dashmap::mapref::entry::Entry::Occupied(_) => true,
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(&record));
                    false
                }
            }
        };
        if occupied {
            if let Err(err) = store.abort_staging(&container, &blob, record.session()).await {
                tracing::warn!(error = %err, "failed to abort staging session for duplicate upload");
            }
            return Err(error::already_exists(format!(
                "upload `{upload_id}` is already in progress"
            )));
        }

        tracing::debug!(upload_id = %upload_id, upload_length, "created upload");
        Ok(CreatedUpload {
            upload_id,
            container,
            blob,
        })
    }

    /// Accept one chunk for an in-progress upload.
    ///
    /// The chunk is buffered in memory and the call returns as soon as it is
    /// accounted for. Unless the upload's queue already has an active drain
    /// worker, one is started: detached from the calling task by default, so
    /// a dropped or cancelled caller never strands staged state, or awaited
    /// inline when the config disables queued draining.
    pub(crate) async fn append(
        &self,
        upload_id: &str,
        body: ChunkBody,
    ) -> Result<AcceptedChunk, error::Error> {
        let record = self
            .shared
            .active
            .get(upload_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                error::not_found(
                    ResourceKind::Upload,
                    format!("no upload in progress with id `{upload_id}`"),
                )
            })?;

        let data = body.collect().await?;
        let bytes_accepted = data.len() as u64;
        let block_name =
            record.enqueue_chunk(data, self.shared.config.max_buffered_bytes())?;
        tracing::trace!(
            upload_id = %upload_id,
            block_name = %block_name,
            bytes_accepted,
            "accepted chunk"
        );

        if record.try_claim_drain_guard() {
            let shared = Arc::clone(&self.shared);
            let drained = Arc::clone(&record);
            if self.shared.config.use_queue_async() {
                let span = tracing::debug_span!("drain-upload", upload_id = %upload_id);
                tokio::spawn(worker::drain(shared, drained).instrument(span));
            } else {
                worker::drain(shared, drained).await;
            }
        }

        Ok(AcceptedChunk {
            bytes_accepted,
            size_offset: record.size_offset(),
        })
    }

    /// Project the current status of an upload.
    ///
    /// Serves in-progress uploads from the live record and recently finished
    /// ones from the terminal table, which is purged of entries older than
    /// the configured retention on each miss.
    pub(crate) fn status(&self, upload_id: &str) -> Result<StatusSnapshot, error::Error> {
        if let Some(entry) = self.shared.active.get(upload_id) {
            return Ok(status::project(entry.value()));
        }

        let mut terminal = self.shared.terminal.lock().unwrap();
        let retention = self.shared.config.status_retention();
        terminal.retain(|_, entry| entry.at.elapsed() < retention);
        match terminal.get(upload_id) {
            Some(entry) => Ok(entry.snapshot.clone()),
            None => Err(error::not_found(
                ResourceKind::Upload,
                format!("no upload in progress with id `{upload_id}`"),
            )),
        }
    }

    /// Whether an upload for `container`/`blob` is currently in progress.
    pub(crate) fn is_active(&self, container: &str, blob: &str) -> bool {
        self.shared
            .active
            .contains_key(&format!("{container}/{blob}"))
    }
}
