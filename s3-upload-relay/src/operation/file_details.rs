/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{FileDetailsInput, FileDetailsInputBuilder};

mod output;
pub use output::FileDetailsOutput;

use std::sync::Arc;

use crate::metadata;
use crate::store::CONTENT_HASH_TAG;
use crate::types::FileAddress;

/// Operation struct for reading the full details of a committed file
#[derive(Clone, Default, Debug)]
pub(crate) struct FileDetails;

impl FileDetails {
    /// Execute a single `FileDetails` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: FileDetailsInput,
    ) -> Result<FileDetailsOutput, crate::error::Error> {
        let container = input.container.expect("container set");
        let blob = input.blob.expect("blob set");

        let details = handle
            .config
            .store()
            .blob_details(&container, &blob)
            .await?;

        let name = details
            .metadata
            .iter()
            .find(|(key, _)| key == metadata::FILENAME_KEY)
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| blob.clone());
        let checksum = details
            .tags
            .iter()
            .find(|(key, _)| key == CONTENT_HASH_TAG)
            .map(|(_, value)| value.clone());
        // The content hash tag is bookkeeping, not a caller-defined tag.
        let tags: Vec<(String, String)> = details
            .tags
            .into_iter()
            .filter(|(key, _)| key != CONTENT_HASH_TAG)
            .collect();

        let mut address = FileAddress::new(handle.config.store_name(), &container, &blob);
        if let Some(version_id) = &details.props.version_id {
            address = address.with_version_id(version_id);
        }

        Ok(FileDetailsOutput {
            blob_id: format!("{container}/{blob}"),
            name,
            url: address.to_relative_url(),
            length: details.props.length,
            checksum,
            content_type: details.props.content_type,
            etag: details.props.etag,
            version_id: details.props.version_id,
            created_on: details.props.created_on,
            metadata: details.metadata,
            tags,
            versions: details.versions,
        })
    }
}
