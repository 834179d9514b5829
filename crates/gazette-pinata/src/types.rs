// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pinFileToIPFS` wire types.

use serde::{Deserialize, Serialize};

/// Sent as the `pinataOptions` multipart field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinataOptions {
    pub cid_version: u8,
}

impl Default for PinataOptions {
    fn default() -> Self {
        Self { cid_version: 0 }
    }
}

/// Successful upload response.
#[derive(Debug, Clone, Deserialize)]
pub struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pub pin_size: u64,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
}
