/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;
use std::time::Duration;

use super::{PresignInputBuilder, PresignOutput};

/// Fluent builder for constructing a presign request
#[derive(Debug)]
pub struct PresignFluentBuilder {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) inner: PresignInputBuilder,
}

impl PresignFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: std::default::Default::default(),
        }
    }

    /// Sign a time-limited read URL for the file
    #[tracing::instrument(skip_all, level = "debug", name = "initiate-presign", fields(
        container = self.inner.container.as_deref().unwrap_or_default(),
        blob = self.inner.blob.as_deref().unwrap_or_default(),
    ))]
    pub async fn send(self) -> Result<PresignOutput, crate::error::Error> {
        let input = self.inner.build()?;
        crate::operation::presign::Presign::orchestrate(self.handle, input).await
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

    /// Grant access to a specific version instead of the latest.
    pub fn version_id(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.version_id(input);
        self
    }

    /// Grant access to a specific version instead of the latest.
    pub fn set_version_id(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_version_id(input);
        self
    }

    /// Grant access to a specific version instead of the latest.
    pub fn get_version_id(&self) -> &Option<String> {
        self.inner.get_version_id()
    }

    /// How long the URL stays valid.
    ///
    /// Must be non-zero and at most seven days. Defaults to the configured
    /// presign validity.
    pub fn valid_for(mut self, input: Duration) -> Self {
        self.inner = self.inner.valid_for(input);
        self
    }

    /// How long the URL stays valid.
    pub fn set_valid_for(mut self, input: Option<Duration>) -> Self {
        self.inner = self.inner.set_valid_for(input);
        self
    }

    /// How long the URL stays valid.
    pub fn get_valid_for(&self) -> Option<Duration> {
        self.inner.get_valid_for()
    }
}
