/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for deleting a committed file
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DeleteFileInput {
    /// Container holding the file.
    pub container: Option<String>,

    /// Blob name of the file.
    pub blob: Option<String>,

    /// Delete a specific version instead of the whole file.
    pub version_id: Option<String>,
}

impl DeleteFileInput {
    /// Container holding the file.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Blob name of the file.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Delete a specific version instead of the whole file.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Creates a new builder-style object to manufacture [`DeleteFileInput`]
    pub fn builder() -> DeleteFileInputBuilder {
        DeleteFileInputBuilder::default()
    }
}

/// A builder for [DeleteFileInput]
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct DeleteFileInputBuilder {
    pub(crate) container: Option<String>,
    pub(crate) blob: Option<String>,
    pub(crate) version_id: Option<String>,
}

impl DeleteFileInputBuilder {
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

    /// Delete a specific version instead of the whole file.
    pub fn version_id(mut self, input: impl Into<String>) -> Self {
        self.version_id = Some(input.into());
        self
    }

    /// Delete a specific version instead of the whole file.
    pub fn set_version_id(mut self, input: Option<String>) -> Self {
        self.version_id = input;
        self
    }

    /// Delete a specific version instead of the whole file.
    pub fn get_version_id(&self) -> &Option<String> {
        &self.version_id
    }

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::delete_file::DeleteFileOutput, crate::error::Error> {
        let mut fluent = client.delete_file();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs a [`DeleteFileInput`]
    pub fn build(self) -> Result<DeleteFileInput, BuildError> {
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
        Ok(DeleteFileInput {
            container: self.container,
            blob: self.blob,
            version_id: self.version_id,
        })
    }
}
