/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of relay errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input validation issues
    InputInvalid,

    /// I/O errors
    IOError,

    /// Some kind of internal runtime issue (e.g. task failure, poisoned mutex, etc)
    RuntimeError,

    /// A named resource does not exist; carries which kind of resource was missing
    NotFound(ResourceKind),

    /// The target object already exists and the operation was told not to replace it
    AlreadyExists,

    /// A signature or token presented with the request failed validation
    Forbidden,

    /// The upload's accepted-but-unstaged bytes would exceed the configured buffer cap
    BufferFull,

    /// Failed to stage a chunk of an upload to durable storage
    ChunkFailed(ChunkFailed),

    /// The final block-list commit was rejected by durable storage
    CommitFailed,
}

/// The kind of resource a not-found error refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ResourceKind {
    /// The named store does not exist
    Store,
    /// The container (bucket) does not exist
    Container,
    /// The blob (object) does not exist
    Blob,
    /// The requested version of the blob does not exist
    BlobVersion,
    /// No in-flight upload is registered under the given id
    Upload,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Store => "store",
            ResourceKind::Container => "container",
            ResourceKind::Blob => "blob",
            ResourceKind::BlobVersion => "blob version",
            ResourceKind::Upload => "upload",
        };
        write!(f, "{}", name)
    }
}

/// Stores information about a failed chunk
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChunkFailed {
    block_name: String,
}

impl ChunkFailed {
    /// The block name of the chunk that failed to stage.
    pub fn block_name(&self) -> &str {
        &self.block_name
    }
}

impl Error {
    /// Creates a new relay [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True if this error is any of the not-found class.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Error for a request whose signature failed validation, or which carried none at all.
    ///
    /// When a signature was presented and rejected this returns a [`ErrorKind::Forbidden`]
    /// error with the given detail. When no signature was presented where one is required,
    /// the error is blob-not-found instead: absent credentials reveal nothing about whether
    /// the object exists. The asymmetry is deliberate.
    pub fn forbidden_or_not_found(signature_present: bool, detail: impl Into<String>) -> Error {
        if signature_present {
            Error::new(ErrorKind::Forbidden, detail.into())
        } else {
            Error::new(ErrorKind::NotFound(ResourceKind::Blob), detail.into())
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::IOError => write!(f, "I/O error"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
            ErrorKind::NotFound(resource) => write!(f, "{} not found", resource),
            ErrorKind::AlreadyExists => write!(f, "target blob already exists"),
            ErrorKind::Forbidden => write!(f, "signature validation failed"),
            ErrorKind::BufferFull => write!(f, "pending chunk buffer is full"),
            ErrorKind::ChunkFailed(chunk_failed) => {
                write!(f, "failed to stage chunk {}", chunk_failed.block_name)
            }
            ErrorKind::CommitFailed => write!(f, "failed to commit block list"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error
where
    T: Send + Sync + 'static,
{
    fn from(value: std::sync::PoisonError<T>) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn not_found<E>(resource: ResourceKind, err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::NotFound(resource), err)
}

pub(crate) fn already_exists<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::AlreadyExists, err)
}

pub(crate) fn buffer_full<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::BufferFull, err)
}

pub(crate) fn chunk_failed<E>(block_name: impl Into<String>, err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(
        ErrorKind::ChunkFailed(ChunkFailed {
            block_name: block_name.into(),
        }),
        err,
    )
}

pub(crate) fn commit_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::CommitFailed, err)
}

pub(crate) fn runtime_error<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::RuntimeError, err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NoSuchBucket") => ErrorKind::NotFound(ResourceKind::Container),
            Some("NoSuchKey" | "NotFound") => ErrorKind::NotFound(ResourceKind::Blob),
            Some("NoSuchVersion" | "InvalidVersionId") => {
                ErrorKind::NotFound(ResourceKind::BlobVersion)
            }
            Some("NoSuchUpload") => ErrorKind::NotFound(ResourceKind::Upload),
            Some("AccessDenied" | "SignatureDoesNotMatch" | "InvalidToken" | "ExpiredToken") => {
                ErrorKind::Forbidden
            }
            Some("PreconditionFailed") => ErrorKind::AlreadyExists,
            _ => ErrorKind::RuntimeError,
        };

        Error::new(kind, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_carries_resource() {
        let err = not_found(ResourceKind::Container, "no bucket named that");
        assert_eq!(format!("{}", err), "container not found");
        assert!(err.is_not_found());

        let err = not_found(ResourceKind::Upload, "nothing registered");
        assert_eq!(format!("{}", err), "upload not found");
    }

    #[test]
    fn test_chunk_failed_carries_block_name() {
        let err = chunk_failed("MDAwMDAx", "stage rejected");
        match err.kind() {
            ErrorKind::ChunkFailed(c) => assert_eq!(c.block_name(), "MDAwMDAx"),
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_forbidden_or_not_found_asymmetry() {
        let presented = Error::forbidden_or_not_found(true, "signature expired");
        assert_eq!(presented.kind(), &ErrorKind::Forbidden);

        let absent = Error::forbidden_or_not_found(false, "no signature presented");
        assert_eq!(absent.kind(), &ErrorKind::NotFound(ResourceKind::Blob));
    }
}
