/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! A resumable chunked-upload relay staging to Amazon S3.
//!
//! Clients deliver a file in chunks (for example through a TUS protocol
//! front end). Each accepted chunk is buffered in memory and handed to a
//! background drain worker that stages it as an S3 multipart-upload part,
//! feeding a running content hash along the way. Once every declared byte
//! has been staged, the worker completes the multipart upload exactly once.
//! Accepting a chunk never waits on S3: the append call returns as soon as
//! the chunk is buffered.
//!
//! The crate also covers the surrounding object operations a relay
//! deployment needs: status projection for polling clients, reads of
//! committed (optionally versioned) objects, deletes, server-side
//! copy/import with an occupied-target precheck, a details/versions read
//! model, and presigned read URLs.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(s3: aws_sdk_s3::Client) -> Result<(), s3_upload_relay::error::Error> {
//! let config = s3_upload_relay::Config::builder()
//!     .client(s3)
//!     .default_container("uploads")
//!     .build();
//! let relay = s3_upload_relay::Client::new(config);
//!
//! let created = relay
//!     .create_upload()
//!     .upload_length(30)
//!     .metadata("filename aGVsbG8udHh0")
//!     .send()
//!     .await?;
//!
//! relay
//!     .append()
//!     .upload_id(created.upload_id())
//!     .body("first ten b")
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub(crate) const MEBIBYTE: u64 = 1024 * 1024;

/// Error types emitted by `s3-upload-relay`
pub mod error;

/// Common types used by `s3-upload-relay`
pub mod types;

/// Encoded upload metadata codec
pub mod metadata;

/// Types and helpers for I/O
pub mod io;

/// Durable block-store contract and the S3 implementation
pub mod store;

/// Relay client
pub mod client;

/// Relay operations
pub mod operation;

/// Relay configuration
pub mod config;

/// Incremental content hashing
pub(crate) mod hash;

/// The chunk-staging core: upload records, queues, drain workers
pub(crate) mod staging;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
