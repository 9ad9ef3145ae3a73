/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Codec for the encoded upload-metadata format.
//!
//! Metadata arrives as comma-separated tokens of `"{key} {base64(utf8(value))}"`.
//! Two key prefixes are reserved: `TAG:`-prefixed keys become object tags at
//! commit and `BLOB:`-prefixed keys are creation-time directives (ignored at
//! commit). Everything else becomes object metadata. The literal `filename`
//! key carries the logical display name of the uploaded file.

use crate::error;

/// Key prefix routing an entry to the committed blob's tags.
pub const TAG_PREFIX: &str = "TAG:";

/// Key prefix reserved for creation-time directives.
pub const BLOB_PREFIX: &str = "BLOB:";

/// Key carrying the logical display name of the uploaded file.
pub const FILENAME_KEY: &str = "filename";

/// Directive naming the container the upload goes to.
pub const CONTAINER_DIRECTIVE: &str = "BLOB:container";

/// Decode an encoded metadata blob into ordered `(key, value)` pairs.
///
/// A token may carry a bare key with no value part, which decodes to an empty
/// string. Empty tokens (from leading/trailing/doubled commas) are skipped.
pub fn decode(encoded: &str) -> Result<Vec<(String, String)>, error::Error> {
    let mut pairs = Vec::new();
    for token in encoded.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (key, value) = match token.split_once(' ') {
            Some((key, value)) => {
                let raw = aws_smithy_types::base64::decode(value).map_err(|e| {
                    error::invalid_input(format!(
                        "metadata value for key `{}` is not valid base64: {}",
                        key, e
                    ))
                })?;
                let value = String::from_utf8(raw).map_err(|_| {
                    error::invalid_input(format!(
                        "metadata value for key `{}` is not valid utf-8",
                        key
                    ))
                })?;
                (key, value)
            }
            None => (token, String::new()),
        };
        if key.is_empty() {
            return Err(error::invalid_input("metadata token has an empty key"));
        }
        pairs.push((key.to_owned(), value));
    }
    Ok(pairs)
}

/// Encode `(key, value)` pairs back into the wire format.
pub fn encode(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                key.clone()
            } else {
                format!("{} {}", key, aws_smithy_types::base64::encode(value.as_str()))
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Decoded metadata routed to its commit-time destinations.
#[derive(Debug, Default, Clone)]
pub(crate) struct SplitMetadata {
    /// Plain object metadata (unprefixed keys, filename included)
    pub(crate) metadata: Vec<(String, String)>,
    /// Object tags (`TAG:` keys, prefix stripped)
    pub(crate) tags: Vec<(String, String)>,
    /// The logical display name, from the `filename` key
    pub(crate) file_name: Option<String>,
    /// Creation-time container directive, from `BLOB:container`
    pub(crate) container_hint: Option<String>,
}

/// Route decoded pairs per the prefix rules.
pub(crate) fn split(pairs: Vec<(String, String)>) -> SplitMetadata {
    let mut out = SplitMetadata::default();
    for (key, value) in pairs {
        if let Some(tag_key) = key.strip_prefix(TAG_PREFIX) {
            out.tags.push((tag_key.to_owned(), value));
        } else if key.starts_with(BLOB_PREFIX) {
            if key == CONTAINER_DIRECTIVE && !value.is_empty() {
                out.container_hint = Some(value);
            }
            // other BLOB:-prefixed keys are reserved and dropped
        } else {
            if key == FILENAME_KEY && !value.is_empty() {
                out.file_name = Some(value.clone());
            }
            out.metadata.push((key, value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic_pairs() {
        // "hello.txt" and "report"
        let pairs = decode("filename aGVsbG8udHh0,category cmVwb3J0").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("filename".to_owned(), "hello.txt".to_owned()),
                ("category".to_owned(), "report".to_owned()),
            ]
        );
    }

    #[test]
    fn test_decode_bare_key_and_empty_tokens() {
        let pairs = decode(",is_confidential,, filename aGVsbG8udHh0 ,").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("is_confidential".to_owned(), String::new()),
                ("filename".to_owned(), "hello.txt".to_owned()),
            ]
        );
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let err = decode("filename not!base64!").unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::InputInvalid);
    }

    #[test]
    fn test_encode_round_trip() {
        let pairs = vec![
            ("filename".to_owned(), "hello.txt".to_owned()),
            ("flagged".to_owned(), String::new()),
            ("TAG:team".to_owned(), "storage".to_owned()),
        ];
        let encoded = encode(&pairs);
        assert_eq!(decode(&encoded).unwrap(), pairs);
    }

    #[test]
    fn test_split_routes_prefixes() {
        let pairs = vec![
            ("filename".to_owned(), "clip.mp4".to_owned()),
            ("TAG:team".to_owned(), "media".to_owned()),
            ("BLOB:container".to_owned(), "videos".to_owned()),
            ("BLOB:reserved-thing".to_owned(), "ignored".to_owned()),
            ("origin".to_owned(), "mobile".to_owned()),
        ];

        let split = split(pairs);
        assert_eq!(split.file_name.as_deref(), Some("clip.mp4"));
        assert_eq!(split.container_hint.as_deref(), Some("videos"));
        assert_eq!(split.tags, vec![("team".to_owned(), "media".to_owned())]);
        assert_eq!(
            split.metadata,
            vec![
                ("filename".to_owned(), "clip.mp4".to_owned()),
                ("origin".to_owned(), "mobile".to_owned()),
            ]
        );
    }
}
