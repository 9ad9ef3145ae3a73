/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use crate::config::Builder;
use crate::Config;

/// Load relay [`Config`] from the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
}

impl ConfigLoader {
    /// Name under which the store appears in relative file URLs.
    ///
    /// Default is `"s3"`.
    pub fn store_name(mut self, store_name: impl Into<String>) -> Self {
        self.builder = self.builder.store_name(store_name);
        self
    }

    /// Container used when neither the caller nor the upload metadata picks one.
    pub fn default_container(mut self, container: impl Into<String>) -> Self {
        self.builder = self.builder.default_container(container);
        self
    }

    /// Per-upload cap on accepted-but-unstaged bytes held in memory.
    ///
    /// Default is 256 MiB.
    pub fn max_buffered_bytes(mut self, bytes: u64) -> Self {
        self.builder = self.builder.max_buffered_bytes(bytes);
        self
    }

    /// How long a finished upload's terminal status stays queryable.
    ///
    /// Default is 60 seconds.
    pub fn status_retention(mut self, retention: Duration) -> Self {
        self.builder = self.builder.status_retention(retention);
        self
    }

    /// Validity window applied to presigned URLs when a request sets none.
    ///
    /// Values above the seven day S3 maximum are lowered to it.
    /// Default is 15 minutes.
    pub fn presign_validity(mut self, validity: Duration) -> Self {
        self.builder = self.builder.presign_validity(validity);
        self
    }

    /// Whether appended chunks drain to the store on a background task.
    ///
    /// Default is `true`.
    pub fn use_queue_async(mut self, enabled: bool) -> Self {
        self.builder = self.builder.use_queue_async(enabled);
        self
    }

    /// Load the default configuration.
    ///
    /// Builds an S3 client from the default environment configuration and
    /// stages uploads through it. Fields overridden during loader
    /// construction keep their override values.
    pub async fn load(self) -> Config {
        let shared_config = aws_config::from_env().load().await;
        let client = aws_sdk_s3::Client::new(&shared_config);
        self.builder.client(client).build()
    }
}
