// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client builders with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::env::consts::{ARCH, OS};

/// Creates a new HTTP client builder with the standard SDK User-Agent header.
///
/// # Example
/// ```ignore
/// let client = bugsplat_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard SDK User-Agent string.
///
/// Format: `bugsplat-rust/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!("bugsplat-rust/{} ({}-{})", env!("CARGO_PKG_VERSION"), OS, ARCH)
}
