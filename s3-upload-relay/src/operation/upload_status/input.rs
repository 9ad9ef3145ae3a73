/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for querying the progress of an upload
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct UploadStatusInput {
    /// Identifier of the upload, as returned by create-upload.
    pub upload_id: Option<String>,
}

impl UploadStatusInput {
    /// Identifier of the upload, as returned by create-upload.
    pub fn upload_id(&self) -> Option<&str> {
        self.upload_id.as_deref()
    }

    /// Creates a new builder-style object to manufacture [`UploadStatusInput`]
    pub fn builder() -> UploadStatusInputBuilder {
        UploadStatusInputBuilder::default()
    }
}

/// A builder for [UploadStatusInput]
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct UploadStatusInputBuilder {
    pub(crate) upload_id: Option<String>,
}

impl UploadStatusInputBuilder {
    /// Identifier of the upload, as returned by create-upload.
    /// Required.
    pub fn upload_id(mut self, input: impl Into<String>) -> Self {
        self.upload_id = Some(input.into());
        self
    }

    /// Identifier of the upload, as returned by create-upload.
    pub fn set_upload_id(mut self, input: Option<String>) -> Self {
        self.upload_id = input;
        self
    }

    /// Identifier of the upload, as returned by create-upload.
    pub fn get_upload_id(&self) -> &Option<String> {
        &self.upload_id
    }

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::upload_status::UploadStatusOutput, crate::error::Error> {
        let mut fluent = client.upload_status();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs an [`UploadStatusInput`]
    pub fn build(self) -> Result<UploadStatusInput, BuildError> {
        if self.upload_id.is_none() {
            return Err(BuildError::missing_field(
                "upload_id",
                "the id of the upload to query is required",
            ));
        }
        Ok(UploadStatusInput {
            upload_id: self.upload_id,
        })
    }
}
