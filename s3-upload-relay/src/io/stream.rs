/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::default::Default;
use std::fmt;
use std::future::poll_fn;
use std::pin::Pin;

use bytes::{Buf, Bytes, BytesMut};

use crate::error;
use crate::io::size_hint::SizeHint;

/// Content of a single uploaded chunk.
///
/// `ChunkBody` wraps the raw bytes appended to an upload. Chunks are staged
/// whole, so the body is always fully buffered before it is handed to the
/// store.
///
/// To create a `ChunkBody`:
///
/// * From an in-memory source: use one of the provided `From` implementations.
/// * From a custom streaming source: use [`from_chunk_stream`]
///
/// [`from_chunk_stream`]: ChunkBody::from_chunk_stream
#[derive(Debug)]
pub struct ChunkBody {
    inner: RawChunkBody,
}

impl ChunkBody {
    /// Return the bounds on the remaining length of the `ChunkBody`
    pub fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }

    /// Create a new `ChunkBody` that reads data from the given [`ChunkStream`] implementation.
    pub fn from_chunk_stream<T: ChunkStream + Send + Sync + 'static>(stream: T) -> Self {
        let inner = RawChunkBody::Dyn(BoxChunkStream::new(stream));
        Self { inner }
    }

    /// Buffer the remaining body into a single contiguous chunk.
    pub async fn collect(self) -> Result<Bytes, error::Error> {
        match self.inner {
            RawChunkBody::Buf(bytes) => Ok(bytes),
            RawChunkBody::Dyn(mut stream) => {
                let mut buf = BytesMut::with_capacity(stream.size_hint().lower() as usize);
                while let Some(data) = stream.next().await {
                    let data = data?;
                    buf.extend_from_slice(&data);
                }
                Ok(buf.freeze())
            }
        }
    }
}

#[derive(Debug)]
enum RawChunkBody {
    /// In-memory buffer to read from
    Buf(Bytes),
    /// User provided custom stream
    Dyn(BoxChunkStream),
}

impl RawChunkBody {
    fn size_hint(&self) -> SizeHint {
        match self {
            RawChunkBody::Buf(bytes) => SizeHint::exact(bytes.remaining() as u64),
            RawChunkBody::Dyn(box_body) => box_body.inner.size_hint(),
        }
    }
}

/// Trait representing a streaming source of chunk data.
///
/// Data is streamed via the `poll_data` function, which asynchronously yields
/// byte buffers. When `Poll::Ready(None)` is returned the stream is assumed to
/// have reached EOF and is finished.
///
/// The `size_hint` function provides insight into the total number of bytes that will be streamed.
pub trait ChunkStream {
    /// Attempt to pull the next buffer from the stream
    fn poll_data(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<std::io::Result<Bytes>>>;

    /// Returns the bounds on the total size of the stream
    fn size_hint(&self) -> SizeHint;
}

struct BoxChunkStream {
    inner: Pin<Box<dyn ChunkStream + Send + Sync + 'static>>,
}

impl BoxChunkStream {
    fn new<T: ChunkStream + Send + Sync + 'static>(inner: T) -> Self {
        BoxChunkStream {
            inner: Box::pin(inner),
        }
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }

    async fn next(&mut self) -> Option<std::io::Result<Bytes>> {
        poll_fn(|cx| self.inner.as_mut().poll_data(cx)).await
    }
}

impl fmt::Debug for BoxChunkStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxChunkStream(dyn ChunkStream)").finish()
    }
}

impl Default for ChunkBody {
    fn default() -> Self {
        Self {
            inner: RawChunkBody::Buf(Bytes::default()),
        }
    }
}

impl From<Bytes> for ChunkBody {
    fn from(value: Bytes) -> Self {
        Self {
            inner: RawChunkBody::Buf(value),
        }
    }
}

impl From<Vec<u8>> for ChunkBody {
    fn from(value: Vec<u8>) -> Self {
        Self::from(Bytes::from(value))
    }
}

impl From<&'static [u8]> for ChunkBody {
    fn from(slice: &'static [u8]) -> ChunkBody {
        Self::from(Bytes::from_static(slice))
    }
}

impl From<&'static str> for ChunkBody {
    fn from(slice: &'static str) -> ChunkBody {
        Self::from(Bytes::from_static(slice.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use std::task::Poll;

    use bytes::Bytes;

    use super::{ChunkBody, ChunkStream, SizeHint};

    struct SlicedStream {
        slices: Vec<Bytes>,
        next: usize,
    }

    impl ChunkStream for SlicedStream {
        fn poll_data(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> Poll<Option<std::io::Result<Bytes>>> {
            let data = self.slices.get(self.next).cloned();
            self.next += 1;
            Poll::Ready(data.map(Ok))
        }

        fn size_hint(&self) -> SizeHint {
            SizeHint::exact(self.slices.iter().map(|s| s.len() as u64).sum())
        }
    }

    #[tokio::test]
    async fn test_collect_buffered() {
        let body = ChunkBody::from(Bytes::from_static(b"a lep is a ball"));
        assert_eq!(body.size_hint().upper(), Some(15));
        let data = body.collect().await.unwrap();
        assert_eq!(&data[..], b"a lep is a ball");
    }

    #[tokio::test]
    async fn test_collect_streamed() {
        let stream = SlicedStream {
            slices: vec![
                Bytes::from_static(b"a tay "),
                Bytes::from_static(b"is a "),
                Bytes::from_static(b"hammer"),
            ],
            next: 0,
        };
        let body = ChunkBody::from_chunk_stream(stream);
        assert_eq!(body.size_hint().upper(), Some(17));
        let data = body.collect().await.unwrap();
        assert_eq!(&data[..], b"a tay is a hammer");
    }
}
