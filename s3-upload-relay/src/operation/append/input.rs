/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use crate::io::ChunkBody;

/// Input type for appending one chunk to an upload
#[non_exhaustive]
#[derive(Debug)]
pub struct AppendInput {
    /// Identifier of the upload, as returned by create-upload.
    pub upload_id: Option<String>,

    /// The chunk payload.
    pub body: ChunkBody,
}

impl AppendInput {
    /// Identifier of the upload, as returned by create-upload.
    pub fn upload_id(&self) -> Option<&str> {
        self.upload_id.as_deref()
    }

    /// The chunk payload.
    pub fn body(&self) -> &ChunkBody {
        &self.body
    }

    /// Creates a new builder-style object to manufacture [`AppendInput`]
    pub fn builder() -> AppendInputBuilder {
        AppendInputBuilder::default()
    }
}

/// A builder for [AppendInput]
#[non_exhaustive]
#[derive(Default, Debug)]
pub struct AppendInputBuilder {
    pub(crate) upload_id: Option<String>,
    pub(crate) body: ChunkBody,
}

impl AppendInputBuilder {
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

    /// The chunk payload.
    pub fn body(mut self, input: impl Into<ChunkBody>) -> Self {
        self.body = input.into();
        self
    }

    /// The chunk payload.
    pub fn set_body(mut self, input: ChunkBody) -> Self {
        self.body = input;
        self
    }

    /// The chunk payload.
    pub fn get_body(&self) -> &ChunkBody {
        &self.body
    }

    /// Send this request using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<crate::operation::append::AppendOutput, crate::error::Error> {
        let mut fluent = client.append();
        fluent.inner = self;
        fluent.send().await
    }

    /// Consumes the builder and constructs an [`AppendInput`]
    pub fn build(self) -> Result<AppendInput, BuildError> {
        if self.upload_id.is_none() {
            return Err(BuildError::missing_field(
                "upload_id",
                "the id of the upload to append to is required",
            ));
        }
        Ok(AppendInput {
            upload_id: self.upload_id,
            body: self.body,
        })
    }
}
