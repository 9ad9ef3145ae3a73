/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error;

/// Everything outside the URL-unreserved set gets escaped in one path segment.
const URL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Like [`URL_SEGMENT`] but `/` passes through so multi-segment blob names
/// keep their structure.
const URL_PATH: &AsciiSet = &URL_SEGMENT.remove(b'/');

/// The client-facing state of an in-flight or just-finished upload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UploadState {
    /// Bytes are still arriving or being staged
    Uploading,
    /// All bytes staged and the block list committed
    Done,
    /// Staging or commit failed; the upload was abandoned
    Error,
}

/// A parsed relay file reference.
///
/// The relay addresses committed objects with URLs of the form
/// `{basePath}/files/{storeName}/{containerName}/{blobName}[?versionId=...]`.
/// [`FileAddress::from_url`] accepts absolute URLs, root-relative paths
/// (`/files/...`), and scheme-relative fragments (`files/...`), locating the
/// `files` segment by case-insensitive comparison rather than fixed position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileAddress {
    store: String,
    container: String,
    blob: String,
    version_id: Option<String>,
}

impl FileAddress {
    /// Construct an address from its parts.
    pub fn new(
        store: impl Into<String>,
        container: impl Into<String>,
        blob: impl Into<String>,
    ) -> Self {
        Self {
            store: store.into(),
            container: container.into(),
            blob: blob.into(),
            version_id: None,
        }
    }

    /// Set the version id on this address.
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Parse a relay file URL.
    pub fn from_url(url: &str) -> Result<FileAddress, error::Error> {
        let (path, query) = match url.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (url, None),
        };

        // Absolute URLs carry a scheme and authority before the path
        let path = match path.find("://") {
            Some(idx) => {
                let after_authority = &path[idx + 3..];
                match after_authority.find('/') {
                    Some(slash) => &after_authority[slash..],
                    None => "",
                }
            }
            None => path,
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let files_idx = segments
            .iter()
            .position(|s| s.eq_ignore_ascii_case("files"))
            .ok_or_else(|| {
                error::invalid_input(format!("no `files` segment in file url: {}", url))
            })?;

        // store + container + at least one blob segment must follow
        if segments.len() < files_idx + 4 {
            return Err(error::invalid_input(format!(
                "file url is missing store/container/blob segments: {}",
                url
            )));
        }

        let store = percent_decode(segments[files_idx + 1]);
        let container = percent_decode(segments[files_idx + 2]);
        let blob = percent_decode(&segments[files_idx + 3..].join("/"));

        let version_id = query.and_then(|q| {
            q.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                (key == "versionId" && !value.is_empty()).then(|| percent_decode(value))
            })
        });

        Ok(FileAddress {
            store,
            container,
            blob,
            version_id,
        })
    }

    /// The store name segment.
    pub fn store(&self) -> &str {
        &self.store
    }

    /// The container name segment.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The blob name (may itself contain `/` separators).
    pub fn blob(&self) -> &str {
        &self.blob
    }

    /// The `versionId` query value, when present.
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Render the address back into the relay's relative URL form.
    pub fn to_relative_url(&self) -> String {
        let mut url = format!(
            "files/{}/{}/{}",
            percent_encode(&self.store, false),
            percent_encode(&self.container, false),
            percent_encode(&self.blob, true),
        );
        if let Some(version) = &self.version_id {
            url.push_str("?versionId=");
            url.push_str(&percent_encode(version, false));
        }
        url
    }
}

/// Number of decimal digits in a block name before base64 encoding.
///
/// Fixed width keeps every block name the same length. Ordering is carried
/// by the commit block list, which is assembled in chunk-arrival order.
pub(crate) const BLOCK_NAME_WIDTH: usize = 6;

/// Upper bound on chunks per upload implied by the block-name width.
pub(crate) const MAX_BLOCKS_PER_UPLOAD: u64 = 1_000_000;

/// Mint the block name for the chunk at `index` (0-based arrival order).
pub(crate) fn block_name_for_index(index: u64) -> String {
    debug_assert!(index < MAX_BLOCKS_PER_UPLOAD);
    aws_smithy_types::base64::encode(format!("{:0width$}", index, width = BLOCK_NAME_WIDTH))
}

/// Recover the chunk index from a block name.
pub(crate) fn block_index(name: &str) -> Result<u64, error::Error> {
    let raw = aws_smithy_types::base64::decode(name)
        .map_err(|e| error::invalid_input(format!("block name is not base64: {}", e)))?;
    let digits = std::str::from_utf8(&raw)
        .map_err(|_| error::invalid_input("block name does not decode to ascii digits"))?;
    digits
        .parse::<u64>()
        .map_err(|e| error::invalid_input(format!("block name is not a decimal index: {}", e)))
}

/// Decode `%XX` escapes; malformed escapes pass through unchanged.
pub(crate) fn percent_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Percent-encode everything outside the unreserved set. When
/// `keep_separators` is set, `/` passes through.
pub(crate) fn percent_encode(input: &str, keep_separators: bool) -> String {
    let set = if keep_separators { URL_PATH } else { URL_SEGMENT };
    utf8_percent_encode(input, set).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_names_match_zero_padded_decimal() {
        assert_eq!(block_name_for_index(0), "MDAwMDAw");
        assert_eq!(block_name_for_index(1), "MDAwMDAx");
        assert_eq!(block_name_for_index(2), "MDAwMDAy");
        assert_eq!(
            block_name_for_index(0),
            aws_smithy_types::base64::encode("000000")
        );
    }

    #[test]
    fn test_block_names_are_fixed_width_and_unique() {
        let names: Vec<String> = (0..50).map(block_name_for_index).collect();
        assert!(names.iter().all(|name| name.len() == names[0].len()));
        let unique: std::collections::HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_block_name_round_trip() {
        for index in [0, 1, 9, 10, 99, 999_999] {
            let name = block_name_for_index(index);
            assert_eq!(block_index(&name).unwrap(), index);
        }
    }

    #[test]
    fn test_parse_absolute_url_with_version() {
        let addr = FileAddress::from_url(
            "https://relay.example.com:8443/api/files/s3/media/videos/clip.mp4?versionId=abc123",
        )
        .unwrap();
        assert_eq!(addr.store(), "s3");
        assert_eq!(addr.container(), "media");
        assert_eq!(addr.blob(), "videos/clip.mp4");
        assert_eq!(addr.version_id(), Some("abc123"));
    }

    #[test]
    fn test_parse_root_relative_url() {
        let addr = FileAddress::from_url("/files/s3/docs/report.pdf").unwrap();
        assert_eq!(addr.store(), "s3");
        assert_eq!(addr.container(), "docs");
        assert_eq!(addr.blob(), "report.pdf");
        assert_eq!(addr.version_id(), None);
    }

    #[test]
    fn test_parse_scheme_relative_fragment() {
        let addr = FileAddress::from_url("files/s3/docs/report.pdf").unwrap();
        assert_eq!(addr.container(), "docs");
    }

    #[test]
    fn test_files_segment_is_case_insensitive() {
        let addr = FileAddress::from_url("/api/v2/FILES/s3/docs/report.pdf").unwrap();
        assert_eq!(addr.store(), "s3");
        assert_eq!(addr.blob(), "report.pdf");
    }

    #[test]
    fn test_percent_decoded_blob() {
        let addr = FileAddress::from_url("/files/s3/docs/with%20space/a%2Bb.txt").unwrap();
        assert_eq!(addr.blob(), "with space/a+b.txt");
    }

    #[test]
    fn test_missing_files_segment_is_invalid() {
        let err = FileAddress::from_url("/api/v2/s3/docs/report.pdf").unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::InputInvalid);
    }

    #[test]
    fn test_missing_blob_segment_is_invalid() {
        let err = FileAddress::from_url("/files/s3/docs").unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::InputInvalid);
    }

    #[test]
    fn test_relative_url_round_trip() {
        let addr = FileAddress::new("s3", "media", "videos/clip one.mp4").with_version_id("v7");
        let url = addr.to_relative_url();
        assert_eq!(url, "files/s3/media/videos/clip%20one.mp4?versionId=v7");
        let parsed = FileAddress::from_url(&url).unwrap();
        assert_eq!(parsed, addr);
    }
}
