/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for reading the full details of a committed file
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct FileDetailsInput {
    /// Container holding the file.
    pub container: Option<String>,

    /// Blob name of the file.
    pub blob: Option<String>,
}

impl FileDetailsInput {
    /// Container holding the file.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Blob name of the file.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Creates a new builder-style object to manufacture [`FileDetailsInput`]
    pub fn builder() -> FileDetailsInputBuilder {
        FileDetailsInputBuilder::default()
    }
}

/// A builder for [FileDetailsInput]
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct FileDetailsInputBuilder {
    pub(crate) container: Option<String>,
    pub(crate) blob: Option<String>,
}

impl FileDetailsInputBuilder {
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

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::file_details::FileDetailsOutput, crate::error::Error> {
        let mut fluent = client.file_details();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs a [`FileDetailsInput`]
    pub fn build(self) -> Result<FileDetailsInput, BuildError> {
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
        Ok(FileDetailsInput {
            container: self.container,
            blob: self.blob,
        })
    }
}
