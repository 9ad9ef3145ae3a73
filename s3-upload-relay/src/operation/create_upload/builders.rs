/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use super::{CreateUploadInputBuilder, CreateUploadOutput};

/// Fluent builder for constructing a create-upload request
#[derive(Debug)]
pub struct CreateUploadFluentBuilder {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) inner: CreateUploadInputBuilder,
}

impl CreateUploadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: std::default::Default::default(),
        }
    }

    /// Register the upload and open its staging session
    #[tracing::instrument(skip_all, level = "debug", name = "initiate-create-upload", fields(
        upload_length = self.inner.upload_length.unwrap_or_default(),
    ))]
    pub async fn send(self) -> Result<CreateUploadOutput, crate::error::Error> {
        let input = self.inner.build()?;
        crate::operation::create_upload::CreateUpload::orchestrate(self.handle, input).await
    }

    /// Total number of bytes the upload will deliver.
    /// Required.
    pub fn upload_length(mut self, input: u64) -> Self {
        self.inner = self.inner.upload_length(input);
        self
    }

    /// Total number of bytes the upload will deliver.
    pub fn set_upload_length(mut self, input: Option<u64>) -> Self {
        self.inner = self.inner.set_upload_length(input);
        self
    }

    /// Total number of bytes the upload will deliver.
    pub fn get_upload_length(&self) -> Option<u64> {
        self.inner.get_upload_length()
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    ///
    /// Comma-separated `{key} {base64(value)}` tokens. A `BLOB:container`
    /// entry selects the target container and `TAG:`-prefixed keys become
    /// blob tags at commit.
    pub fn metadata(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.metadata(input);
        self
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    pub fn set_metadata(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_metadata(input);
        self
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    pub fn get_metadata(&self) -> &Option<String> {
        self.inner.get_metadata()
    }
}
