/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, ResourceKind};

/// Types for the create-upload operation
pub mod create_upload;

/// Types for the append operation
pub mod append;

/// Types for the upload-status operation
pub mod upload_status;

/// Types for the get-file operation
pub mod get_file;

/// Types for the file-details operation
pub mod file_details;

/// Types for the delete-file operation
pub mod delete_file;

/// Types for the copy-file operation
pub mod copy_file;

/// Types for the presign operation
pub mod presign;

/// Check a caller-routed store name against the configured one.
///
/// Store names arrive from URLs, so the comparison is case-insensitive like
/// the rest of URL routing.
pub(crate) fn validate_store_name(
    handle: &crate::client::Handle,
    store_name: &str,
) -> Result<(), error::Error> {
    if !store_name.eq_ignore_ascii_case(handle.config.store_name()) {
        return Err(error::not_found(
            ResourceKind::Store,
            format!("no file store named `{store_name}`"),
        ));
    }
    Ok(())
}

/// Fail with a container not-found unless `container` exists in the store.
pub(crate) async fn require_container(
    handle: &crate::client::Handle,
    container: &str,
) -> Result<(), error::Error> {
    if !handle.config.store().container_exists(container).await? {
        return Err(error::not_found(
            ResourceKind::Container,
            format!("container `{container}` does not exist"),
        ));
    }
    Ok(())
}
