/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

/// Output type for producing a time-limited read URL
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct PresignOutput {
    /// The presigned URL.
    pub url: String,

    /// How long the URL stays valid from the time it was signed.
    pub expires_in: Duration,
}

impl PresignOutput {
    /// The presigned URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// How long the URL stays valid from the time it was signed.
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }
}
