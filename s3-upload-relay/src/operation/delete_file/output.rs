/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for deleting a committed file
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DeleteFileOutput {}
