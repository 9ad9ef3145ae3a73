/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::store::BlobVersion;

/// Output type for reading the full details of a committed file
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct FileDetailsOutput {
    /// Identifier of the file, `{container}/{blob}`.
    pub blob_id: String,

    /// Display name: the `filename` metadata entry, or the blob name.
    pub name: String,

    /// Relative URL the file is addressable under, pinned to the current
    /// version when the store is versioned.
    pub url: String,

    /// Content length in bytes.
    pub length: u64,

    /// Hex digest of the content, recorded at commit.
    pub checksum: Option<String>,

    /// Content type, when the store recorded one.
    pub content_type: Option<String>,

    /// Store etag of the content.
    pub etag: Option<String>,

    /// Current version of the file.
    pub version_id: Option<String>,

    /// When the current version was committed.
    pub created_on: Option<aws_smithy_types::DateTime>,

    /// Metadata pairs attached to the file.
    pub metadata: Vec<(String, String)>,

    /// Caller-defined tags attached to the file.
    pub tags: Vec<(String, String)>,

    /// Version history, newest first.
    pub versions: Vec<BlobVersion>,
}

impl FileDetailsOutput {
    /// Identifier of the file, `{container}/{blob}`.
    pub fn blob_id(&self) -> &str {
        &self.blob_id
    }

    /// Display name: the `filename` metadata entry, or the blob name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative URL the file is addressable under.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Content length in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Hex digest of the content, recorded at commit.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Content type, when the store recorded one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Store etag of the content.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Current version of the file.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// When the current version was committed.
    pub fn created_on(&self) -> Option<aws_smithy_types::DateTime> {
        self.created_on.clone()
    }

    /// Metadata pairs attached to the file.
    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Caller-defined tags attached to the file.
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// Version history, newest first.
    pub fn versions(&self) -> &[BlobVersion] {
        &self.versions
    }
}
