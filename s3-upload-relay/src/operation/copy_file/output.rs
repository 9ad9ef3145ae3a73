/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for importing a file by server-side copy
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CopyFileOutput {
    /// Container the copy landed in.
    pub container: String,

    /// Blob name of the copy.
    pub blob: String,

    /// Version minted for the copy, if the container is versioned.
    pub version_id: Option<String>,

    /// Relative URL the copy is addressable under.
    pub url: String,
}

impl CopyFileOutput {
    /// Container the copy landed in.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blob name of the copy.
    pub fn blob(&self) -> &str {
        &self.blob
    }

    /// Version minted for the copy, if the container is versioned.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Relative URL the copy is addressable under.
    pub fn url(&self) -> &str {
        &self.url
    }
}
