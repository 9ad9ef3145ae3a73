/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::staging::status::StatusSnapshot;
use crate::types::UploadState;

/// Output type for querying the progress of an upload
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct UploadStatusOutput {
    /// Identifier of the upload, `{container}/{blob}`.
    pub blob_id: String,

    /// Display name of the file being uploaded.
    pub name: String,

    /// Declared total length in bytes.
    pub length: u64,

    /// Whether the upload is still running, finished or failed.
    pub state: UploadState,

    /// Failure cause, present when `state` is [`UploadState::Error`].
    pub error_description: Option<String>,

    /// Chunks accepted from the client.
    pub local_chunks: u64,

    /// Bytes accepted from the client.
    pub local_length: u64,

    /// Chunks staged durably.
    pub remote_chunks: u64,

    /// Bytes staged durably.
    pub remote_length: u64,

    /// Durably staged fraction of the declared length, rounded to two
    /// decimals.
    pub remote_percentage: f64,

    /// Encoded metadata exactly as supplied at creation.
    pub metadata: String,
}

impl UploadStatusOutput {
    pub(crate) fn from_snapshot(snapshot: StatusSnapshot) -> Self {
        Self {
            blob_id: snapshot.blob_id,
            name: snapshot.name,
            length: snapshot.length,
            state: snapshot.state,
            error_description: snapshot.error_description,
            local_chunks: snapshot.local_chunks,
            local_length: snapshot.local_length,
            remote_chunks: snapshot.remote_chunks,
            remote_length: snapshot.remote_length,
            remote_percentage: snapshot.remote_percentage,
            metadata: snapshot.metadata,
        }
    }

    /// Identifier of the upload, `{container}/{blob}`.
    pub fn blob_id(&self) -> &str {
        &self.blob_id
    }

    /// Display name of the file being uploaded.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared total length in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Whether the upload is still running, finished or failed.
    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Failure cause, present when the upload failed.
    pub fn error_description(&self) -> Option<&str> {
        self.error_description.as_deref()
    }

    /// Chunks accepted from the client.
    pub fn local_chunks(&self) -> u64 {
        self.local_chunks
    }

    /// Bytes accepted from the client.
    pub fn local_length(&self) -> u64 {
        self.local_length
    }

    /// Chunks staged durably.
    pub fn remote_chunks(&self) -> u64 {
        self.remote_chunks
    }

    /// Bytes staged durably.
    pub fn remote_length(&self) -> u64 {
        self.remote_length
    }

    /// Durably staged fraction of the declared length, rounded to two
    /// decimals.
    pub fn remote_percentage(&self) -> f64 {
        self.remote_percentage
    }

    /// Encoded metadata exactly as supplied at creation.
    pub fn metadata(&self) -> &str {
        &self.metadata
    }
}
