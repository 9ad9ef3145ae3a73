/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for importing a file by server-side copy
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CopyFileInput {
    /// Relay file URL of the source, `{base}/files/{store}/{container}/{blob}`.
    pub source_url: Option<String>,

    /// Container holding the source file.
    pub source_container: Option<String>,

    /// Blob name of the source file.
    pub source_blob: Option<String>,

    /// Copy a specific source version instead of the latest.
    pub source_version_id: Option<String>,

    /// Container to copy into.
    pub dest_container: Option<String>,

    /// Blob name to copy to.
    pub dest_blob: Option<String>,

    /// Whether an existing destination blob may be overwritten.
    pub replace: bool,
}

impl CopyFileInput {
    /// Relay file URL of the source.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Container holding the source file.
    pub fn source_container(&self) -> Option<&str> {
        self.source_container.as_deref()
    }

    /// Blob name of the source file.
    pub fn source_blob(&self) -> Option<&str> {
        self.source_blob.as_deref()
    }

    /// Copy a specific source version instead of the latest.
    pub fn source_version_id(&self) -> Option<&str> {
        self.source_version_id.as_deref()
    }

    /// Container to copy into.
    pub fn dest_container(&self) -> Option<&str> {
        self.dest_container.as_deref()
    }

    /// Blob name to copy to.
    pub fn dest_blob(&self) -> Option<&str> {
        self.dest_blob.as_deref()
    }

    /// Whether an existing destination blob may be overwritten.
    pub fn replace(&self) -> bool {
        self.replace
    }

    /// Creates a new builder-style object to manufacture [`CopyFileInput`]
    pub fn builder() -> CopyFileInputBuilder {
        CopyFileInputBuilder::default()
    }
}

/// A builder for [CopyFileInput]
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct CopyFileInputBuilder {
    pub(crate) source_url: Option<String>,
    pub(crate) source_container: Option<String>,
    pub(crate) source_blob: Option<String>,
    pub(crate) source_version_id: Option<String>,
    pub(crate) dest_container: Option<String>,
    pub(crate) dest_blob: Option<String>,
    pub(crate) replace: bool,
}

impl CopyFileInputBuilder {
    /// Relay file URL of the source.
    ///
    /// Alternative to naming the source container and blob directly. The
    /// URL's store segment must match the configured store name.
    pub fn source_url(mut self, input: impl Into<String>) -> Self {
        self.source_url = Some(input.into());
        self
    }

    /// Relay file URL of the source.
    pub fn set_source_url(mut self, input: Option<String>) -> Self {
        self.source_url = input;
        self
    }

    /// Relay file URL of the source.
    pub fn get_source_url(&self) -> &Option<String> {
        &self.source_url
    }

    /// Container holding the source file.
    pub fn source_container(mut self, input: impl Into<String>) -> Self {
        self.source_container = Some(input.into());
        self
    }

    /// Container holding the source file.
    pub fn set_source_container(mut self, input: Option<String>) -> Self {
        self.source_container = input;
        self
    }

    /// Container holding the source file.
    pub fn get_source_container(&self) -> &Option<String> {
        &self.source_container
    }

    /// Blob name of the source file.
    pub fn source_blob(mut self, input: impl Into<String>) -> Self {
        self.source_blob = Some(input.into());
        self
    }

    /// Blob name of the source file.
    pub fn set_source_blob(mut self, input: Option<String>) -> Self {
        self.source_blob = input;
        self
    }

    /// Blob name of the source file.
    pub fn get_source_blob(&self) -> &Option<String> {
        &self.source_blob
    }

    /// Copy a specific source version instead of the latest.
    pub fn source_version_id(mut self, input: impl Into<String>) -> Self {
        self.source_version_id = Some(input.into());
        self
    }

    /// Copy a specific source version instead of the latest.
    pub fn set_source_version_id(mut self, input: Option<String>) -> Self {
        self.source_version_id = input;
        self
    }

    /// Copy a specific source version instead of the latest.
    pub fn get_source_version_id(&self) -> &Option<String> {
        &self.source_version_id
    }

    /// Container to copy into.
    /// Required.
    pub fn dest_container(mut self, input: impl Into<String>) -> Self {
        self.dest_container = Some(input.into());
        self
    }

    /// Container to copy into.
    pub fn set_dest_container(mut self, input: Option<String>) -> Self {
        self.dest_container = input;
        self
    }

    /// Container to copy into.
    pub fn get_dest_container(&self) -> &Option<String> {
        &self.dest_container
    }

    /// Blob name to copy to.
    /// Required.
    pub fn dest_blob(mut self, input: impl Into<String>) -> Self {
        self.dest_blob = Some(input.into());
        self
    }

    /// Blob name to copy to.
    pub fn set_dest_blob(mut self, input: Option<String>) -> Self {
        self.dest_blob = input;
        self
    }

    /// Blob name to copy to.
    pub fn get_dest_blob(&self) -> &Option<String> {
        &self.dest_blob
    }

    /// Whether an existing destination blob may be overwritten.
    /// Defaults to false, which fails the copy if the destination exists.
    pub fn replace(mut self, input: bool) -> Self {
        self.replace = input;
        self
    }

    /// Whether an existing destination blob may be overwritten.
    pub fn get_replace(&self) -> bool {
        self.replace
    }

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::copy_file::CopyFileOutput, crate::error::Error> {
        let mut fluent = client.copy_file();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs a [`CopyFileInput`]
    pub fn build(self) -> Result<CopyFileInput, BuildError> {
        if self.source_url.is_none() && (self.source_container.is_none() || self.source_blob.is_none())
        {
            return Err(BuildError::missing_field(
                "source_url",
                "either a source url or a source container and blob are required",
            ));
        }
        if self.dest_container.is_none() {
            return Err(BuildError::missing_field(
                "dest_container",
                "the container to copy into is required",
            ));
        }
        if self.dest_blob.is_none() {
            return Err(BuildError::missing_field(
                "dest_blob",
                "the blob name to copy to is required",
            ));
        }
        Ok(CopyFileInput {
            source_url: self.source_url,
            source_container: self.source_container,
            source_blob: self.source_blob,
            source_version_id: self.source_version_id,
            dest_container: self.dest_container,
            dest_blob: self.dest_blob,
            replace: self.replace,
        })
    }
}
