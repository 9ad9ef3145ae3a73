/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for registering a new resumable upload
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CreateUploadOutput {
    /// Identifier for the new upload, `{container}/{blob}`.
    pub upload_id: String,

    /// Container the upload resolves into.
    pub container: String,

    /// Blob name allocated for the upload.
    pub blob: String,

    /// Relative URL the committed file will be addressable under.
    pub location: String,
}

impl CreateUploadOutput {
    /// Identifier for the new upload, `{container}/{blob}`.
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// Container the upload resolves into.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blob name allocated for the upload.
    pub fn blob(&self) -> &str {
        &self.blob
    }

    /// Relative URL the committed file will be addressable under.
    pub fn location(&self) -> &str {
        &self.location
    }
}
