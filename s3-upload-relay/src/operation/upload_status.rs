/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{UploadStatusInput, UploadStatusInputBuilder};

mod output;
pub use output::UploadStatusOutput;

use std::sync::Arc;

/// Operation struct for querying the progress of an upload
#[derive(Clone, Default, Debug)]
pub(crate) struct UploadStatus;

impl UploadStatus {
    /// Execute a single `UploadStatus` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: UploadStatusInput,
    ) -> Result<UploadStatusOutput, crate::error::Error> {
        let upload_id = input.upload_id.expect("upload_id set");
        let snapshot = handle.staging.status(&upload_id)?;
        Ok(UploadStatusOutput::from_snapshot(snapshot))
    }
}
