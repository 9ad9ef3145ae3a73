/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::cmp;
use std::sync::Arc;
use std::time::Duration;

use crate::store::s3::S3BlockStore;
use crate::store::BlockStore;
use crate::MEBIBYTE;

pub(crate) mod loader;

/// Default cap on accepted-but-unstaged bytes held in memory per upload
const DEFAULT_MAX_BUFFERED_BYTES: u64 = 256 * MEBIBYTE;

/// How long a finished upload's terminal status stays queryable
const DEFAULT_STATUS_RETENTION: Duration = Duration::from_secs(60);

/// Default validity window for presigned read URLs
const DEFAULT_PRESIGN_VALIDITY: Duration = Duration::from_secs(15 * 60);

/// S3 rejects presigned URLs valid for longer than seven days
pub(crate) const MAX_PRESIGN_VALIDITY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Store name used in relative file URLs when none is configured
const DEFAULT_STORE_NAME: &str = "s3";

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    store: Arc<dyn BlockStore>,
    store_name: String,
    default_container: Option<String>,
    max_buffered_bytes: u64,
    status_retention: Duration,
    presign_validity: Duration,
    use_queue_async: bool,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The block store uploads are staged into and committed to.
    pub fn store(&self) -> &Arc<dyn BlockStore> {
        &self.store
    }

    /// The name under which this store appears in relative file URLs.
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Container used when neither the caller nor the upload metadata picks one.
    pub fn default_container(&self) -> Option<&str> {
        self.default_container.as_deref()
    }

    /// Per-upload cap on accepted-but-unstaged bytes held in memory.
    pub fn max_buffered_bytes(&self) -> u64 {
        self.max_buffered_bytes
    }

    /// How long a finished upload's terminal status stays queryable.
    pub fn status_retention(&self) -> Duration {
        self.status_retention
    }

    /// Validity window applied to presigned URLs when a request sets none.
    pub fn presign_validity(&self) -> Duration {
        self.presign_validity
    }

    /// Whether appended chunks drain to the store on a background task.
    pub fn use_queue_async(&self) -> bool {
        self.use_queue_async
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    store: Option<Arc<dyn BlockStore>>,
    store_name: Option<String>,
    default_container: Option<String>,
    max_buffered_bytes: Option<u64>,
    status_retention: Option<Duration>,
    presign_validity: Option<Duration>,
    use_queue_async: Option<bool>,
}

impl Builder {
    /// Stage and commit uploads through the given S3 client.
    ///
    /// Convenience over [`store`](Self::store) with an
    /// [`S3BlockStore`](crate::store::s3::S3BlockStore) wrapping the client.
    pub fn client(self, client: aws_sdk_s3::Client) -> Self {
        self.store(S3BlockStore::new(client))
    }

    /// Set an explicit block store implementation to use.
    pub fn store(mut self, store: impl BlockStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Name under which this store appears in relative file URLs.
    ///
    /// Default is `"s3"`.
    pub fn store_name(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = Some(store_name.into());
        self
    }

    /// Container used when neither the caller nor the upload metadata picks one.
    pub fn default_container(mut self, container: impl Into<String>) -> Self {
        self.default_container = Some(container.into());
        self
    }

    /// Per-upload cap on accepted-but-unstaged bytes held in memory.
    ///
    /// Chunks arriving while the cap is reached are rejected with
    /// [`ErrorKind::BufferFull`](crate::error::ErrorKind::BufferFull) until
    /// the drain worker catches up. Default is 256 MiB.
    pub fn max_buffered_bytes(mut self, bytes: u64) -> Self {
        self.max_buffered_bytes = Some(bytes);
        self
    }

    /// How long a finished upload's terminal status stays queryable.
    ///
    /// Once an upload finishes (successfully or not) its record leaves the
    /// active table; the final status snapshot remains readable for this
    /// long. Default is 60 seconds.
    pub fn status_retention(mut self, retention: Duration) -> Self {
        self.status_retention = Some(retention);
        self
    }

    /// Validity window applied to presigned URLs when a request sets none.
    ///
    /// Values above the seven day S3 maximum are lowered to it.
    /// Default is 15 minutes.
    pub fn presign_validity(self, validity: Duration) -> Self {
        self.set_presign_validity(cmp::min(validity, MAX_PRESIGN_VALIDITY))
    }

    /// Validity window for presigned URLs.
    ///
    /// NOTE: This does not validate the setting and is meant for internal use only.
    pub(crate) fn set_presign_validity(mut self, validity: Duration) -> Self {
        self.presign_validity = Some(validity);
        self
    }

    /// Whether appended chunks drain to the store on a background task.
    ///
    /// When disabled, an append stages its chunk (and commits, if it is the
    /// last one) before returning. Default is `true`.
    pub fn use_queue_async(mut self, enabled: bool) -> Self {
        self.use_queue_async = Some(enabled);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Config {
        Config {
            store: self.store.expect("block store set"),
            store_name: self
                .store_name
                .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
            default_container: self.default_container,
            max_buffered_bytes: self.max_buffered_bytes.unwrap_or(DEFAULT_MAX_BUFFERED_BYTES),
            status_retention: self.status_retention.unwrap_or(DEFAULT_STATUS_RETENTION),
            presign_validity: self.presign_validity.unwrap_or(DEFAULT_PRESIGN_VALIDITY),
            use_queue_async: self.use_queue_async.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_presign_validity_is_capped_at_the_s3_maximum() {
        let config = Config::builder()
            .client(aws_sdk_s3::Client::from_conf(
                aws_sdk_s3::config::Config::builder()
                    .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
                    .build(),
            ))
            .presign_validity(Duration::from_secs(30 * 24 * 60 * 60))
            .build();
        assert_eq!(config.presign_validity(), MAX_PRESIGN_VALIDITY);
    }

    #[test]
    fn test_defaults() {
        let config = Config::builder()
            .client(aws_sdk_s3::Client::from_conf(
                aws_sdk_s3::config::Config::builder()
                    .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
                    .build(),
            ))
            .build();
        assert_eq!(config.store_name(), "s3");
        assert_eq!(config.default_container(), None);
        assert_eq!(config.max_buffered_bytes(), 256 * crate::MEBIBYTE);
        assert_eq!(config.status_retention(), Duration::from_secs(60));
        assert_eq!(config.presign_validity(), Duration::from_secs(900));
        assert!(config.use_queue_async());
    }
}
