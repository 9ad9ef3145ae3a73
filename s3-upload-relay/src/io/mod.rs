/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Adapters for other IO library traits to map to `ChunkBody`
pub mod adapters;
mod size_hint;
mod stream;

// re-exports
pub use self::size_hint::SizeHint;
pub use self::stream::ChunkBody;
pub use self::stream::ChunkStream;
