/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{AppendInput, AppendInputBuilder};

mod output;
pub use output::AppendOutput;

use std::sync::Arc;

/// Operation struct for appending one chunk to an upload
#[derive(Clone, Default, Debug)]
pub(crate) struct Append;

impl Append {
    /// Execute a single `Append` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: AppendInput,
    ) -> Result<AppendOutput, crate::error::Error> {
        let upload_id = input.upload_id.expect("upload_id set");
        let accepted = handle.staging.append(&upload_id, input.body).await?;
        Ok(AppendOutput {
            upload_id,
            bytes_accepted: accepted.bytes_accepted,
            size_offset: accepted.size_offset,
        })
    }
}
