/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use aws_smithy_types::error::operation::BuildError;

/// Input type for producing a time-limited read URL
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct PresignInput {
    /// Container holding the file.
    pub container: Option<String>,

    /// Blob name of the file.
    pub blob: Option<String>,

    /// Grant access to a specific version instead of the latest.
    pub version_id: Option<String>,

    /// How long the URL stays valid.
    pub valid_for: Option<Duration>,
}

impl PresignInput {
    /// Container holding the file.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Blob name of the file.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Grant access to a specific version instead of the latest.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// How long the URL stays valid.
    pub fn valid_for(&self) -> Option<Duration> {
        self.valid_for
    }

    /// Creates a new builder-style object to manufacture [`PresignInput`]
    pub fn builder() -> PresignInputBuilder {
        PresignInputBuilder::default()
    }
}

/// A builder for [PresignInput]
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct PresignInputBuilder {
    pub(crate) container: Option<String>,
    pub(crate) blob: Option<String>,
    pub(crate) version_id: Option<String>,
    pub(crate) valid_for: Option<Duration>,
}

impl PresignInputBuilder {
    /// Container holding the file.
    /// Required.
    pub fn container(mut self, input: impl Into<String>) -> Self {
        self.container = Some(input.into());
        self
    }

    /// Container holding the file.
    pub fn set_container(mut self, input: Option<String>) -> Self {
        self.container = input;
        self
    }

    /// Container holding the file.
    pub fn get_container(&self) -> &Option<String> {
        &self.container
    }

    /// Blob name of the file.
    /// Required.
    pub fn blob(mut self, input: impl Into<String>) -> Self {
        self.blob = Some(input.into());
        self
    }

    /// Blob name of the file.
    pub fn set_blob(mut self, input: Option<String>) -> Self {
        self.blob = input;
        self
    }

    /// Blob name of the file.
    pub fn get_blob(&self) -> &Option<String> {
        &self.blob
    }

    /// Grant access to a specific version instead of the latest.
    pub fn version_id(mut self, input: impl Into<String>) -> Self {
        self.version_id = Some(input.into());
        self
    }

    /// Grant access to a specific version instead of the latest.
    pub fn set_version_id(mut self, input: Option<String>) -> Self {
        self.version_id = input;
        self
    }

    /// Grant access to a specific version instead of the latest.
    pub fn get_version_id(&self) -> &Option<String> {
        &self.version_id
    }

    /// How long the URL stays valid.
    ///
    /// Must be non-zero and at most seven days. Defaults to the configured
    /// presign validity.
    pub fn valid_for(mut self, input: Duration) -> Self {
        self.valid_for = Some(input);
        self
    }

    /// How long the URL stays valid.
    pub fn set_valid_for(mut self, input: Option<Duration>) -> Self {
        self.valid_for = input;
        self
    }

    /// How long the URL stays valid.
    pub fn get_valid_for(&self) -> Option<Duration> {
        self.valid_for
    }

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::presign::PresignOutput, crate::error::Error> {
        let mut fluent = client.presign();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs a [`PresignInput`]
    pub fn build(self) -> Result<PresignInput, BuildError> {
        if self.container.is_none() {
            return Err(BuildError::missing_field(
                "container",
                "the container holding the file is required",
            ));
        }
        if self.blob.is_none() {
            return Err(BuildError::missing_field(
                "blob",
                "the blob name of the file is required",
            ));
        }
        Ok(PresignInput {
            container: self.container,
            blob: self.blob,
            version_id: self.version_id,
            valid_for: self.valid_for,
        })
    }
}
