/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use super::{CopyFileInputBuilder, CopyFileOutput};

/// Fluent builder for constructing a copy-file request
#[derive(Debug)]
pub struct CopyFileFluentBuilder {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) inner: CopyFileInputBuilder,
}

impl CopyFileFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: std::default::Default::default(),
        }
    }

    /// Copy the source file into the destination server-side
    #[tracing::instrument(skip_all, level = "debug", name = "initiate-copy-file", fields(
        dest_container = self.inner.dest_container.as_deref().unwrap_or_default(),
        dest_blob = self.inner.dest_blob.as_deref().unwrap_or_default(),
    ))]
    pub async fn send(self) -> Result<CopyFileOutput, crate::error::Error> {
        let input = self.inner.build()?;
        crate::operation::copy_file::CopyFile::orchestrate(self.handle, input).await
    }

    /// Relay file URL of the source.
    ///
    /// Alternative to naming the source container and blob directly. The
    /// URL's store segment must match the configured store name.
    pub fn source_url(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.source_url(input);
        self
    }

    /// Relay file URL of the source.
    pub fn set_source_url(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_source_url(input);
        self
    }

    /// Relay file URL of the source.
    pub fn get_source_url(&self) -> &Option<String> {
        self.inner.get_source_url()
    }

    /// Container holding the source file.
    pub fn source_container(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.source_container(input);
        self
    }

    /// Container holding the source file.
    pub fn set_source_container(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_source_container(input);
        self
    }

    /// Container holding the source file.
    pub fn get_source_container(&self) -> &Option<String> {
        self.inner.get_source_container()
    }

    /// Blob name of the source file.
    pub fn source_blob(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.source_blob(input);
        self
    }

    /// Blob name of the source file.
    pub fn set_source_blob(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_source_blob(input);
        self
    }

    /// Blob name of the source file.
    pub fn get_source_blob(&self) -> &Option<String> {
        self.inner.get_source_blob()
    }

    /// Copy a specific source version instead of the latest.
    pub fn source_version_id(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.source_version_id(input);
        self
    }

    /// Copy a specific source version instead of the latest.
    pub fn set_source_version_id(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_source_version_id(input);
        self
    }

    /// Copy a specific source version instead of the latest.
    pub fn get_source_version_id(&self) -> &Option<String> {
        self.inner.get_source_version_id()
    }

    /// Container to copy into.
    /// Required.
    pub fn dest_container(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.dest_container(input);
        self
    }

    /// Container to copy into.
    pub fn set_dest_container(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_dest_container(input);
        self
    }

    /// Container to copy into.
    pub fn get_dest_container(&self) -> &Option<String> {
        self.inner.get_dest_container()
    }

    /// Blob name to copy to.
    /// Required.
    pub fn dest_blob(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.dest_blob(input);
        self
    }

    /// Blob name to copy to.
    pub fn set_dest_blob(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_dest_blob(input);
        self
    }

    /// Blob name to copy to.
    pub fn get_dest_blob(&self) -> &Option<String> {
        self.inner.get_dest_blob()
    }

    /// Whether an existing destination blob may be overwritten.
    /// Defaults to false, which fails the copy if the destination exists.
    pub fn replace(mut self, input: bool) -> Self {
        self.inner = self.inner.replace(input);
        self
    }

    /// Whether an existing destination blob may be overwritten.
    pub fn get_replace(&self) -> bool {
        self.inner.get_replace()
    }
}
