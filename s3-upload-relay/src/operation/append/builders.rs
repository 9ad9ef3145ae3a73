/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::io::ChunkBody;

use super::{AppendInputBuilder, AppendOutput};

/// Fluent builder for constructing an append request
#[derive(Debug)]
pub struct AppendFluentBuilder {
    pub(crate) handle: Arc<crate::client::Handle>,
    pub(crate) inner: AppendInputBuilder,
}

impl AppendFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: std::default::Default::default(),
        }
    }

    /// Buffer the chunk and hand it to the drain worker
    #[tracing::instrument(skip_all, level = "debug", name = "initiate-append", fields(
        upload_id = self.inner.upload_id.as_deref().unwrap_or_default(),
    ))]
    pub async fn send(self) -> Result<AppendOutput, crate::error::Error> {
        let input = self.inner.build()?;
        crate::operation::append::Append::orchestrate(self.handle, input).await
    }

    /// Identifier of the upload, as returned by create-upload.
    /// Required.
    pub fn upload_id(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.upload_id(input);
        self
    }

    /// Identifier of the upload, as returned by create-upload.
    pub fn set_upload_id(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_upload_id(input);
        self
    }

    /// Identifier of the upload, as returned by create-upload.
    pub fn get_upload_id(&self) -> &Option<String> {
        self.inner.get_upload_id()
    }

    /// The chunk payload.
    pub fn body(mut self, input: impl Into<ChunkBody>) -> Self {
        self.inner = self.inner.body(input);
        self
    }

    /// The chunk payload.
    pub fn set_body(mut self, input: ChunkBody) -> Self {
        self.inner = self.inner.set_body(input);
        self
    }

    /// The chunk payload.
    pub fn get_body(&self) -> &ChunkBody {
        self.inner.get_body()
    }
}
