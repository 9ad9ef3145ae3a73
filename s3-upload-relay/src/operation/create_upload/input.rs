/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for registering a new resumable upload
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CreateUploadInput {
    /// Total number of bytes the upload will deliver.
    pub upload_length: Option<u64>,

    /// Encoded metadata pairs forwarded from the protocol layer.
    pub metadata: Option<String>,
}

impl CreateUploadInput {
    /// Total number of bytes the upload will deliver.
    pub fn upload_length(&self) -> Option<u64> {
        self.upload_length
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// Creates a new builder-style object to manufacture [`CreateUploadInput`]
    pub fn builder() -> CreateUploadInputBuilder {
        CreateUploadInputBuilder::default()
    }
}

/// A builder for [CreateUploadInput]
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct CreateUploadInputBuilder {
    pub(crate) upload_length: Option<u64>,
    pub(crate) metadata: Option<String>,
}

impl CreateUploadInputBuilder {
    /// Total number of bytes the upload will deliver.
    /// Required.
    pub fn upload_length(mut self, input: u64) -> Self {
        self.upload_length = Some(input);
        self
    }

    /// Total number of bytes the upload will deliver.
    pub fn set_upload_length(mut self, input: Option<u64>) -> Self {
        self.upload_length = input;
        self
    }

    /// Total number of bytes the upload will deliver.
    pub fn get_upload_length(&self) -> Option<u64> {
        self.upload_length
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    ///
    /// Comma-separated `{key} {base64(value)}` tokens. A `BLOB:container`
    /// entry selects the target container and `TAG:`-prefixed keys become
    /// blob tags at commit.
    pub fn metadata(mut self, input: impl Into<String>) -> Self {
        self.metadata = Some(input.into());
        self
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    pub fn set_metadata(mut self, input: Option<String>) -> Self {
        self.metadata = input;
        self
    }

    /// Encoded metadata pairs forwarded from the protocol layer.
    pub fn get_metadata(&self) -> &Option<String> {
        &self.metadata
    }

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::create_upload::CreateUploadOutput, crate::error::Error> {
        let mut fluent = client.create_upload();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs a [`CreateUploadInput`]
    pub fn build(self) -> Result<CreateUploadInput, BuildError> {
        if self.upload_length.is_none() {
            return Err(BuildError::missing_field(
                "upload_length",
                "total size of the upload is required",
            ));
        }
        Ok(CreateUploadInput {
            upload_length: self.upload_length,
            metadata: self.metadata,
        })
    }
}
