/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{PresignInput, PresignInputBuilder};

mod output;
pub use output::PresignOutput;

use std::sync::Arc;

use crate::config::MAX_PRESIGN_VALIDITY;
use crate::error;

/// Operation struct for producing a time-limited read URL
#[derive(Clone, Default, Debug)]
pub(crate) struct Presign;

impl Presign {
    /// Execute a single `Presign` operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: PresignInput,
    ) -> Result<PresignOutput, crate::error::Error> {
        let container = input.container.expect("container set");
        let blob = input.blob.expect("blob set");

        let valid_for = input
            .valid_for
            .unwrap_or_else(|| handle.config.presign_validity());
        if valid_for.is_zero() {
            return Err(error::invalid_input(
                "presigned URL validity must be non-zero",
            ));
        }
        if valid_for > MAX_PRESIGN_VALIDITY {
            return Err(error::invalid_input(format!(
                "presigned URL validity of {}s exceeds the seven day maximum",
                valid_for.as_secs()
            )));
        }

        let presigned = handle
            .config
            .store()
            .presign_read(&container, &blob, input.version_id.as_deref(), valid_for)
            .await?;

        Ok(PresignOutput {
            url: presigned.url().to_string(),
            expires_in: presigned.expires_in(),
        })
    }
}
