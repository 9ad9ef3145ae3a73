/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{GetFileInput, GetFileInputBuilder};

mod output;
pub use output::GetFileOutput;

use std::sync::Arc;

/// Operation struct for reading a committed file
#[derive(Clone, Default, Debug)]
pub(crate) struct GetFile;

impl GetFile {
    /// Execute a single `GetFile` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: GetFileInput,
    ) -> Result<GetFileOutput, crate::error::Error> {
        let container = input.container.expect("container set");
        let blob = input.blob.expect("blob set");

        let (props, body) = handle
            .config
            .store()
            .read_blob(&container, &blob, input.version_id.as_deref())
            .await?;

        Ok(GetFileOutput {
            container,
            blob,
            length: props.length,
            content_type: props.content_type,
            etag: props.etag,
            version_id: props.version_id,
            created_on: props.created_on,
            body,
        })
    }
}
