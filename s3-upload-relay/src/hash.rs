/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Incremental content hashing for staged uploads.
//!
//! Chunks may finish staging in any order, but the content hash must be the
//! digest of the file as the client sent it. The accumulator therefore only
//! accepts blocks in index order and refuses anything out of sequence.

use crate::error;
use sha2::{Digest, Sha256};
use std::fmt;

/// A finalized SHA-256 content hash.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ContentHash([u8; 32]);

impl ContentHash {
    /// Lowercase hex rendering, the form attached to committed objects.
    pub(crate) fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Accumulates the content hash across chunks, enforcing block-index order.
pub(crate) struct ContentHasher {
    inner: Sha256,
    next_index: u64,
    bytes_fed: u64,
}

impl ContentHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Sha256::new(),
            next_index: 0,
            bytes_fed: 0,
        }
    }

    /// Feed the block at `index` into the digest. Blocks must arrive in
    /// strictly increasing index order starting at zero.
    pub(crate) fn update_block(&mut self, index: u64, data: &[u8]) -> Result<(), error::Error> {
        if index != self.next_index {
            return Err(error::runtime_error(format!(
                "hash fed out of order: got block {}, expected {}",
                index, self.next_index
            )));
        }
        self.inner.update(data);
        self.next_index += 1;
        self.bytes_fed += data.len() as u64;
        Ok(())
    }

    /// Total bytes fed so far.
    pub(crate) fn bytes_fed(&self) -> u64 {
        self.bytes_fed
    }

    pub(crate) fn finalize(self) -> ContentHash {
        ContentHash(self.inner.finalize().into())
    }
}

impl fmt::Debug for ContentHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentHasher")
            .field("next_index", &self.next_index)
            .field("bytes_fed", &self.bytes_fed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_matches_one_pass() {
        let data = b"every adolescent dog goes bonkers early";

        let mut one_pass = Sha256::new();
        one_pass.update(data);
        let expected: [u8; 32] = one_pass.finalize().into();

        let mut hasher = ContentHasher::new();
        hasher.update_block(0, &data[..7]).unwrap();
        hasher.update_block(1, &data[7..20]).unwrap();
        hasher.update_block(2, &data[20..]).unwrap();
        assert_eq!(hasher.bytes_fed(), data.len() as u64);
        let hash = hasher.finalize();

        assert_eq!(hash.0, expected);
        assert_eq!(hash.to_hex().len(), 64);
    }

    #[test]
    fn test_out_of_order_feed_rejected() {
        let mut hasher = ContentHasher::new();
        hasher.update_block(0, b"abc").unwrap();
        let err = hasher.update_block(2, b"def").unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::RuntimeError);
        // the expected index did not advance
        hasher.update_block(1, b"def").unwrap();
    }
}
