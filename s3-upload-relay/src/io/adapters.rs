/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::io::ChunkStream;
use crate::io::SizeHint;

use bytes::Bytes;
use pin_project_lite::pin_project;

pin_project! {
    /// A wrapper that implements [`ChunkStream`] for an inner type
    /// that implements [`futures_util::Stream`], such as an HTTP request body.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3_upload_relay::io::adapters::FuturesStream;
    /// use s3_upload_relay::io::{ChunkBody, SizeHint};
    /// use bytes::Bytes;
    /// use futures_util::Stream;
    ///
    /// fn into_chunk_body<T>(inner: T, content_length: u64) -> ChunkBody
    /// where
    ///     T: Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static,
    /// {
    ///     ChunkBody::from_chunk_stream(FuturesStream::new(inner, SizeHint::exact(content_length)))
    /// }
    /// ```
    #[derive(Debug)]
    pub struct FuturesStream<T> {
        #[pin]
        inner: T,
        size_hint: SizeHint,
    }
}

impl<T> FuturesStream<T> {
    /// Wrap a type implementing [`futures_util::Stream`].
    pub fn new(inner: T, size_hint: SizeHint) -> Self {
        Self { inner, size_hint }
    }

    /// Borrow the inner type
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the inner type
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T> ChunkStream for FuturesStream<T>
where
    T: futures_util::Stream<Item = std::io::Result<Bytes>>,
{
    fn poll_data(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<std::io::Result<Bytes>>> {
        self.project().inner.poll_next(cx)
    }

    fn size_hint(&self) -> SizeHint {
        self.size_hint
    }
}

#[cfg(test)]
mod tests {
    use super::FuturesStream;
    use crate::io::{ChunkBody, ChunkStream, SizeHint};
    use bytes::Bytes;
    use tokio_test::{assert_pending, assert_ready, task};

    #[tokio::test]
    async fn test_futures_adapter_e2e() {
        let inner = futures_util::stream::iter(vec![
            Ok(Bytes::from_static(b"hello")),
            Ok(Bytes::from_static(b"world")),
        ]);
        let body = ChunkBody::from_chunk_stream(FuturesStream::new(inner, SizeHint::exact(10)));

        assert_eq!(body.size_hint().upper(), Some(10));
        let data = body.collect().await.unwrap();
        assert_eq!(&data[..], b"helloworld");
    }

    #[tokio::test]
    async fn test_futures_adapter_propagates_errors() {
        let inner = futures_util::stream::iter(vec![
            Ok(Bytes::from_static(b"hello")),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe")),
        ]);
        let body = ChunkBody::from_chunk_stream(FuturesStream::new(inner, SizeHint::default()));

        let err = body.collect().await.unwrap_err();
        assert_eq!(err.kind(), &crate::error::ErrorKind::IOError);
    }

    #[test]
    fn test_poll_data_surfaces_inner_readiness() {
        let inner = futures_util::stream::iter(vec![Ok(Bytes::from_static(b"hello"))]);
        let mut task = task::spawn(FuturesStream::new(inner, SizeHint::exact(5)));
        task.enter(|cx, mut stream| {
            let first = assert_ready!(stream.as_mut().poll_data(cx));
            assert_eq!(&first.unwrap().unwrap()[..], b"hello");
            let end = assert_ready!(stream.poll_data(cx));
            assert!(end.is_none());
        });
    }

    #[test]
    fn test_poll_data_stays_pending_while_inner_is() {
        let inner = futures_util::stream::pending::<std::io::Result<Bytes>>();
        let mut task = task::spawn(FuturesStream::new(inner, SizeHint::default()));
        task.enter(|cx, stream| assert_pending!(stream.poll_data(cx)));
    }
}
