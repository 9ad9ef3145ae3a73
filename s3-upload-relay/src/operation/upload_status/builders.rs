/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use super::{UploadStatusInputBuilder, UploadStatusOutput};

/// Fluent builder for constructing an upload-status request
#[derive(Debug)]
pub struct UploadStatusFluentBuilder {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) inner: UploadStatusInputBuilder,
}

impl UploadStatusFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: std::default::Default::default(),
        }
    }

    /// Project the upload's current status
    #[tracing::instrument(skip_all, level = "debug", name = "initiate-upload-status", fields(
        upload_id = self.inner.upload_id.as_deref().unwrap_or_default(),
    ))]
    pub async fn send(self) -> Result<UploadStatusOutput, crate::error::Error> {
        let input = self.inner.build()?;
        crate::operation::upload_status::UploadStatus::orchestrate(self.handle, input).await
    }

    /// Identifier of the upload, as returned by create-upload.
    /// Required.
    pub fn upload_id(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.upload_id(input);
        self
    }

    /// Identifier of the upload, as returned by create-upload.
    pub fn set_upload_id(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_upload_id(input);
        self
    }

    /// Identifier of the upload, as returned by create-upload.
    pub fn get_upload_id(&self) -> &Option<String> {
        self.inner.get_upload_id()
    }
}
