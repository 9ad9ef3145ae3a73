/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{CopyFileInput, CopyFileInputBuilder};

mod output;
pub use output::CopyFileOutput;

use std::sync::Arc;

use crate::error;
use crate::store::BlobLocation;
use crate::types::FileAddress;

/// Operation struct for importing a file by server-side copy
#[derive(Clone, Default, Debug)]
pub(crate) struct CopyFile;

impl CopyFile {
    /// Execute a single `CopyFile` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: CopyFileInput,
    ) -> Result<CopyFileOutput, crate::error::Error> {
        let dest_container = input.dest_container.expect("dest_container set");
        let dest_blob = input.dest_blob.expect("dest_blob set");

        let (source_container, source_blob, source_version_id) = match &input.source_url {
            Some(url) => {
                let address = FileAddress::from_url(url)?;
                super::validate_store_name(&handle, address.store())?;
                (
                    address.container().to_string(),
                    address.blob().to_string(),
                    address.version_id().map(str::to_string),
                )
            }
            None => (
                input.source_container.expect("source_container set"),
                input.source_blob.expect("source_blob set"),
                input.source_version_id,
            ),
        };

        super::require_container(&handle, &dest_container).await?;

        let store = handle.config.store();
        if !input.replace && store.blob_exists(&dest_container, &dest_blob).await? {
            return Err(error::already_exists(format!(
                "blob `{dest_blob}` already exists in container `{dest_container}`"
            )));
        }

        let source = BlobLocation {
            container: &source_container,
            blob: &source_blob,
            version_id: source_version_id.as_deref(),
        };
        let version_id = store.copy_blob(source, &dest_container, &dest_blob).await?;

        let mut address = FileAddress::new(handle.config.store_name(), &dest_container, &dest_blob);
        if let Some(version) = &version_id {
            address = address.with_version_id(version);
        }

        Ok(CopyFileOutput {
            container: dest_container,
            blob: dest_blob,
            version_id,
            url: address.to_relative_url(),
        })
    }
}
