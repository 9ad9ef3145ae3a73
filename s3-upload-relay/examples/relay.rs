/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;
use std::path::PathBuf;
use std::time;
use std::time::Duration;

use bytes::Bytes;
use clap::Parser;
use s3_upload_relay::error::ErrorKind;
use s3_upload_relay::io::ChunkBody;
use s3_upload_relay::metadata;
use s3_upload_relay::types::UploadState;
use tokio::fs;

type BoxError = Box<dyn Error + Send + Sync>;

const ONE_MEGABYTE: u64 = 1000 * 1000;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "relay")]
#[command(about = "Relays a local file to S3 in chunks and optionally reads it back.")]
pub struct Args {
    /// Local file to relay
    #[arg(required = true)]
    source: PathBuf,

    /// Bucket to relay into
    #[arg(long)]
    container: String,

    /// Chunk size to deliver in
    #[arg(long, default_value_t = 8388608)]
    chunk_size: u64,

    /// Local path to read the committed file back into
    #[arg(long)]
    dest: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let config = s3_upload_relay::from_env()
        .default_container(&args.container)
        .load()
        .await;
    let relay = s3_upload_relay::Client::new(config);

    let data = Bytes::from(fs::read(&args.source).await?);
    let file_name = args
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_owned());
    let encoded = metadata::encode(&[(metadata::FILENAME_KEY.to_owned(), file_name)]);

    println!("starting upload");
    let start = time::Instant::now();

    let created = relay
        .create_upload()
        .upload_length(data.len() as u64)
        .metadata(encoded)
        .send()
        .await?;
    tracing::info!("created upload {}", created.upload_id());

    let chunk_size = args.chunk_size.max(1) as usize;
    // A zero-length upload still takes one (empty) chunk to commit.
    let chunks: Vec<Bytes> = if data.is_empty() {
        vec![Bytes::new()]
    } else {
        data.chunks(chunk_size).map(Bytes::copy_from_slice).collect()
    };
    for chunk in chunks {
        // A full buffer means the drain worker is behind; retry the chunk.
        loop {
            let attempt = relay
                .append()
                .upload_id(created.upload_id())
                .body(ChunkBody::from(chunk.clone()))
                .send()
                .await;
            match attempt {
                Ok(accepted) => {
                    tracing::debug!(
                        "accepted {} bytes ({} total)",
                        accepted.bytes_accepted(),
                        accepted.size_offset()
                    );
                    break;
                }
                Err(err) if err.kind() == &ErrorKind::BufferFull => {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    let status = loop {
        let status = relay
            .upload_status()
            .upload_id(created.upload_id())
            .send()
            .await?;
        match status.state() {
            UploadState::Uploading => tokio::time::sleep(Duration::from_millis(100)).await,
            UploadState::Done | UploadState::Error => break status,
        }
    };
    if status.state() == UploadState::Error {
        return Err(format!(
            "upload failed: {}",
            status.error_description().unwrap_or("unknown error")
        )
        .into());
    }

    let elapsed = start.elapsed();
    let obj_size_bytes = data.len() as u64;
    let obj_size_megabytes = obj_size_bytes as f64 / ONE_MEGABYTE as f64;
    let obj_size_megabits = obj_size_megabytes * 8f64;

    println!(
        "relayed {obj_size_bytes} bytes ({obj_size_megabytes} MB) to {} in {elapsed:?}; Mb/s: {}",
        created.location(),
        obj_size_megabits / elapsed.as_secs_f64()
    );

    if let Some(dest) = &args.dest {
        let file = relay
            .get_file()
            .container(created.container())
            .blob(created.blob())
            .send()
            .await?;
        let body = file.into_body().collect().await?;
        fs::write(dest, &body).await?;
        println!("read {} bytes back to {}", body.len(), dest.display());
    }

    Ok(())
}
