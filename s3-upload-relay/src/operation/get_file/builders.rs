/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use super::{GetFileInputBuilder, GetFileOutput};

/// Fluent builder for constructing a get-file request
#[derive(Debug)]
pub struct GetFileFluentBuilder {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) inner: GetFileInputBuilder,
}

impl GetFileFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: std::default::Default::default(),
        }
    }

    /// Read the file from the store
    #[tracing::instrument(skip_all, level = "debug", name = "initiate-get-file", fields(
        container = self.inner.container.as_deref().unwrap_or_default(),
        blob = self.inner.blob.as_deref().unwrap_or_default(),
    ))]
    pub async fn send(self) -> Result<GetFileOutput, crate::error::Error> {
        let input = self.inner.build()?;
        crate::operation::get_file::GetFile::orchestrate(self.handle, input).await
    }

    /// Container holding the file.
    /// Required.
    pub fn container(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.container(input);
        self
    }

    /// Container holding the file.
    pub fn set_container(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_container(input);
        self
    }

    /// Container holding the file.
    pub fn get_container(&self) -> &Option<String> {
        self.inner.get_container()
    }

    /// Blob name of the file.
    /// Required.
    pub fn blob(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.blob(input);
        self
    }

    /// Blob name of the file.
    pub fn set_blob(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_blob(input);
        self
    }

    /// Blob name of the file.
    pub fn get_blob(&self) -> &Option<String> {
        self.inner.get_blob()
    }

    /// Read a specific version instead of the latest.
    pub fn version_id(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.version_id(input);
        self
    }

    /// Read a specific version instead of the latest.
    pub fn set_version_id(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_version_id(input);
        self
    }

    /// Read a specific version instead of the latest.
    pub fn get_version_id(&self) -> &Option<String> {
        self.inner.get_version_id()
    }
}
