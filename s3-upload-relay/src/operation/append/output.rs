/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for appending one chunk to an upload
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct AppendOutput {
    /// Identifier of the upload appended to.
    pub upload_id: String,

    /// Bytes accepted from this chunk.
    pub bytes_accepted: u64,

    /// Total bytes accepted for the upload so far.
    ///
    /// This counts accepted bytes; durably staged progress runs behind it
    /// and is visible through the upload-status operation.
    pub size_offset: u64,
}

impl AppendOutput {
    /// Identifier of the upload appended to.
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// Bytes accepted from this chunk.
    pub fn bytes_accepted(&self) -> u64 {
        self.bytes_accepted
    }

    /// Total bytes accepted for the upload so far.
    pub fn size_offset(&self) -> u64 {
        self.size_offset
    }
}
