/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{DeleteFileInput, DeleteFileInputBuilder};

mod output;
pub use output::DeleteFileOutput;

use std::sync::Arc;

use crate::error;

/// Operation struct for deleting a committed file
#[derive(Clone, Default, Debug)]
pub(crate) struct DeleteFile;

impl DeleteFile {
    /// Execute a single `DeleteFile` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DeleteFileInput,
    ) -> Result<DeleteFileOutput, crate::error::Error> {
        let container = input.container.expect("container set");
        let blob = input.blob.expect("blob set");

        // Deletion only applies to committed files. An in-flight upload has
        // no durable blob yet and its staging session belongs to the worker.
        if handle.staging.is_active(&container, &blob) {
            return Err(error::invalid_input(format!(
                "upload for `{container}/{blob}` is still in progress and cannot be deleted"
            )));
        }

        handle
            .config
            .store()
            .delete_blob(&container, &blob, input.version_id.as_deref())
            .await?;

        Ok(DeleteFileOutput {})
    }
}
