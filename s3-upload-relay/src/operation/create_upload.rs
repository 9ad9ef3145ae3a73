/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{CreateUploadInput, CreateUploadInputBuilder};

mod output;
pub use output::CreateUploadOutput;

use std::sync::Arc;

use crate::types::FileAddress;

/// Operation struct for registering a new resumable upload
#[derive(Clone, Default, Debug)]
pub(crate) struct CreateUpload;

impl CreateUpload {
    /// Execute a single `CreateUpload` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: CreateUploadInput,
    ) -> Result<CreateUploadOutput, crate::error::Error> {
        let upload_length = input.upload_length.expect("upload_length set");
        let metadata = input.metadata.as_deref().unwrap_or_default();

        let created = handle.staging.create_upload(upload_length, metadata).await?;
        let location = FileAddress::new(
            handle.config.store_name(),
            &created.container,
            &created.blob,
        )
        .to_relative_url();

        Ok(CreateUploadOutput {
            upload_id: created.upload_id,
            container: created.container,
            blob: created.blob,
            location,
        })
    }
}
