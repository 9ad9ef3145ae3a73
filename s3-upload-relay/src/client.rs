/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::staging::Staging;
use crate::Config;
use std::sync::Arc;

/// Upload relay client for chunked, resumable transfers into a block store.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. staging state, config, store handles, etc
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
    pub(crate) staging: Staging,
}

impl Client {
    /// Creates a new client from a relay config.
    pub fn new(config: Config) -> Client {
        let staging = Staging::new(config.clone());
        let handle = Arc::new(Handle { config, staging });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Open a new resumable upload.
    ///
    /// The upload is addressed by the returned id. Nothing is written to the
    /// durable store until every declared byte has been appended.
    ///
    /// Constructs a fluent builder for the
    /// [`CreateUpload`](crate::operation::create_upload::builders::CreateUploadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::error::Error;
    ///
    /// async fn start_upload(client: &s3_upload_relay::Client) -> Result<(), Box<dyn Error>> {
    ///     let created = client
    ///         .create_upload()
    ///         .upload_length(30)
    ///         .metadata("filename cmVwb3J0LmNzdg==")
    ///         .send()
    ///         .await?;
    ///
    ///     // feed chunks to `append()` using this id until all 30 bytes are in
    ///     println!("upload id: {}", created.upload_id());
    ///     Ok(())
    /// }
    /// ```
    pub fn create_upload(
        &self,
    ) -> crate::operation::create_upload::builders::CreateUploadFluentBuilder {
        crate::operation::create_upload::builders::CreateUploadFluentBuilder::new(
            self.handle.clone(),
        )
    }

    /// Append a chunk of data to an open upload.
    ///
    /// The chunk is buffered and accepted immediately; a background worker
    /// stages accepted chunks to the store in arrival order and commits the
    /// blob once the full declared length has been staged.
    ///
    /// Constructs a fluent builder for the
    /// [`Append`](crate::operation::append::builders::AppendFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::error::Error;
    /// use s3_upload_relay::io::ChunkBody;
    ///
    /// async fn send_chunk(
    ///     client: &s3_upload_relay::Client,
    ///     upload_id: &str,
    ///     data: Vec<u8>,
    /// ) -> Result<(), Box<dyn Error>> {
    ///     let accepted = client
    ///         .append()
    ///         .upload_id(upload_id)
    ///         .body(ChunkBody::from(data))
    ///         .send()
    ///         .await?;
    ///
    ///     println!("offset after append: {}", accepted.size_offset());
    ///     Ok(())
    /// }
    /// ```
    pub fn append(&self) -> crate::operation::append::builders::AppendFluentBuilder {
        crate::operation::append::builders::AppendFluentBuilder::new(self.handle.clone())
    }

    /// Report progress and state for an upload.
    ///
    /// Covers both in-flight uploads and, for a short retention window,
    /// uploads that already finished or failed.
    ///
    /// Constructs a fluent builder for the
    /// [`UploadStatus`](crate::operation::upload_status::builders::UploadStatusFluentBuilder) operation.
    pub fn upload_status(
        &self,
    ) -> crate::operation::upload_status::builders::UploadStatusFluentBuilder {
        crate::operation::upload_status::builders::UploadStatusFluentBuilder::new(
            self.handle.clone(),
        )
    }

    /// Read a committed file back out of the store.
    ///
    /// Constructs a fluent builder for the
    /// [`GetFile`](crate::operation::get_file::builders::GetFileFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::error::Error;
    ///
    /// async fn read_file(client: &s3_upload_relay::Client) -> Result<(), Box<dyn Error>> {
    ///     let file = client
    ///         .get_file()
    ///         .container("uploads")
    ///         .blob("8f14e45f-ceea-4167-a0bb-91e0cbf2a96f")
    ///         .send()
    ///         .await?;
    ///
    ///     let data = file.into_body().collect().await?;
    ///     // ... do something with data
    ///     Ok(())
    /// }
    /// ```
    pub fn get_file(&self) -> crate::operation::get_file::builders::GetFileFluentBuilder {
        crate::operation::get_file::builders::GetFileFluentBuilder::new(self.handle.clone())
    }

    /// Fetch properties, metadata, tags, and versions for a committed file.
    ///
    /// Constructs a fluent builder for the
    /// [`FileDetails`](crate::operation::file_details::builders::FileDetailsFluentBuilder) operation.
    pub fn file_details(&self) -> crate::operation::file_details::builders::FileDetailsFluentBuilder {
        crate::operation::file_details::builders::FileDetailsFluentBuilder::new(self.handle.clone())
    }

    /// Delete a committed file, or one version of it.
    ///
    /// Constructs a fluent builder for the
    /// [`DeleteFile`](crate::operation::delete_file::builders::DeleteFileFluentBuilder) operation.
    pub fn delete_file(&self) -> crate::operation::delete_file::builders::DeleteFileFluentBuilder {
        crate::operation::delete_file::builders::DeleteFileFluentBuilder::new(self.handle.clone())
    }

    /// Copy a committed file to a new location within the store.
    ///
    /// Constructs a fluent builder for the
    /// [`CopyFile`](crate::operation::copy_file::builders::CopyFileFluentBuilder) operation.
    pub fn copy_file(&self) -> crate::operation::copy_file::builders::CopyFileFluentBuilder {
        crate::operation::copy_file::builders::CopyFileFluentBuilder::new(self.handle.clone())
    }

    /// Sign a time-limited read URL for a committed file.
    ///
    /// Constructs a fluent builder for the
    /// [`Presign`](crate::operation::presign::builders::PresignFluentBuilder) operation.
    pub fn presign(&self) -> crate::operation::presign::builders::PresignFluentBuilder {
        crate::operation::presign::builders::PresignFluentBuilder::new(self.handle.clone())
    }
}
