/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Projection of an upload record into a client-facing status snapshot.

use crate::staging::record::UploadRecord;
use crate::types::UploadState;

/// Point-in-time view of one upload's progress.
#[derive(Debug, Clone)]
pub(crate) struct StatusSnapshot {
    pub(crate) blob_id: String,
    pub(crate) name: String,
    pub(crate) length: u64,
    pub(crate) state: UploadState,
    pub(crate) error_description: Option<String>,
    /// Chunks accepted from the client
    pub(crate) local_chunks: u64,
    /// Bytes accepted from the client
    pub(crate) local_length: u64,
    /// Chunks staged durably
    pub(crate) remote_chunks: u64,
    /// Bytes staged durably
    pub(crate) remote_length: u64,
    /// Staged fraction of the declared length, rounded to two decimals
    pub(crate) remote_percentage: f64,
    /// Encoded metadata as supplied at creation
    pub(crate) metadata: String,
}

/// A finished upload's last snapshot, retained briefly so that pollers can
/// observe the terminal state before the id stops resolving.
#[derive(Debug)]
pub(crate) struct TerminalEntry {
    pub(crate) at: tokio::time::Instant,
    pub(crate) snapshot: StatusSnapshot,
}

/// Project the record's current state into a snapshot.
///
/// The done flag is read before the error so a failure marked concurrently
/// (description first, then the flag) never projects as a clean finish.
pub(crate) fn project(record: &UploadRecord) -> StatusSnapshot {
    let done = record.is_done();
    let error_description = record.error_description();
    let state = if !done {
        UploadState::Uploading
    } else if error_description.is_some() {
        UploadState::Error
    } else {
        UploadState::Done
    };
    let remote_length = record.size_offset_internal();
    StatusSnapshot {
        blob_id: record.file_id().to_string(),
        name: record.file_name().to_string(),
        length: record.upload_length(),
        state,
        error_description,
        local_chunks: record.queue_count(),
        local_length: record.size_offset(),
        remote_chunks: record.queue_position(),
        remote_length,
        remote_percentage: staged_fraction(remote_length, record.upload_length()),
        metadata: record.metadata().to_string(),
    }
}

fn staged_fraction(staged: u64, length: u64) -> f64 {
    if length == 0 {
        return 0.0;
    }
    ((staged as f64 / length as f64) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::store::StagingSession;

    fn test_record() -> UploadRecord {
        UploadRecord::new(
            "media/clip.mp4",
            "media",
            "clip.mp4",
            "clip.mp4",
            30,
            "filename Y2xpcC5tcDQ=",
            Vec::new(),
            StagingSession::new("sess"),
        )
    }

    #[test]
    fn test_projects_uploading_with_partial_progress() {
        let record = test_record();
        record
            .enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX)
            .unwrap();
        let claimed = record.claim_next().unwrap();
        record.complete_chunk(&claimed.block_name, 10);
        record
            .enqueue_chunk(Bytes::from_static(b"0123456789"), u64::MAX)
            .unwrap();

        let snapshot = project(&record);
        assert_eq!(snapshot.state, UploadState::Uploading);
        assert_eq!(snapshot.blob_id, "media/clip.mp4");
        assert_eq!(snapshot.name, "clip.mp4");
        assert_eq!(snapshot.length, 30);
        assert_eq!(snapshot.local_chunks, 2);
        assert_eq!(snapshot.local_length, 20);
        assert_eq!(snapshot.remote_chunks, 1);
        assert_eq!(snapshot.remote_length, 10);
        assert_eq!(snapshot.remote_percentage, 0.33);
        assert_eq!(snapshot.metadata, "filename Y2xpcC5tcDQ=");
        assert!(snapshot.error_description.is_none());
    }

    #[test]
    fn test_projects_done_when_finished_cleanly() {
        let record = test_record();
        record.mark_done();
        let snapshot = project(&record);
        assert_eq!(snapshot.state, UploadState::Done);
        assert!(snapshot.error_description.is_none());
    }

    #[test]
    fn test_projects_error_with_description() {
        let record = test_record();
        record.mark_failed("stage failed: connection reset");
        let snapshot = project(&record);
        assert_eq!(snapshot.state, UploadState::Error);
        assert_eq!(
            snapshot.error_description.as_deref(),
            Some("stage failed: connection reset")
        );
    }

    #[test]
    fn test_staged_fraction_rounds_to_two_decimals() {
        assert_eq!(staged_fraction(0, 30), 0.0);
        assert_eq!(staged_fraction(10, 30), 0.33);
        assert_eq!(staged_fraction(20, 30), 0.67);
        assert_eq!(staged_fraction(30, 30), 1.0);
        assert_eq!(staged_fraction(5, 0), 0.0);
    }
}
