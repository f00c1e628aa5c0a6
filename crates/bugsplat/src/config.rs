// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration and environment loading.

use std::env;
use std::time::Duration;

pub const ENV_DATABASE: &str = "BUGSPLAT_DATABASE";
pub const ENV_APP_NAME: &str = "BUGSPLAT_APP_NAME";
pub const ENV_APP_VERSION: &str = "BUGSPLAT_APP_VERSION";
pub const ENV_BASE_URL: &str = "BUGSPLAT_BASE_URL";

/// Default timeout for the built-in HTTP transport.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the built-in transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Timeout for HTTP requests. Ignored when a custom transport is set.
	pub request_timeout: Duration,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}
}

/// Client settings read from `BUGSPLAT_*` environment variables.
///
/// Empty variables are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
	pub database: Option<String>,
	pub app_name: Option<String>,
	pub app_version: Option<String>,
	pub base_url: Option<String>,
}

impl EnvConfig {
	pub fn from_env() -> Self {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

		Self {
			database: read(ENV_DATABASE),
			app_name: read(ENV_APP_NAME),
			app_version: read(ENV_APP_VERSION),
			base_url: read(ENV_BASE_URL),
		}
	}
}
