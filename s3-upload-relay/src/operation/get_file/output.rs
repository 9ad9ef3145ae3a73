/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::io::ChunkBody;

/// Output type for reading a committed file
#[non_exhaustive]
#[derive(Debug)]
pub struct GetFileOutput {
    /// Container holding the file.
    pub container: String,

    /// Blob name of the file.
    pub blob: String,

    /// Content length in bytes.
    pub length: u64,

    /// Content type, when the store recorded one.
    pub content_type: Option<String>,

    /// Store etag of the content.
    pub etag: Option<String>,

    /// Version the content was read from.
    pub version_id: Option<String>,

    /// When the content was committed.
    pub created_on: Option<aws_smithy_types::DateTime>,

    /// The file content.
    pub body: ChunkBody,
}

impl GetFileOutput {
    /// Container holding the file.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blob name of the file.
    pub fn blob(&self) -> &str {
        &self.blob
    }

    /// Content length in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Content type, when the store recorded one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Store etag of the content.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Version the content was read from.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// When the content was committed.
    pub fn created_on(&self) -> Option<aws_smithy_types::DateTime> {
        self.created_on.clone()
    }

    /// The file content, consuming the output.
    pub fn into_body(self) -> ChunkBody {
        self.body
    }
}
