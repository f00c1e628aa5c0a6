// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while constructing core values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
	#[error("no database was specified")]
	MissingDatabase,

	#[error("no appName was specified")]
	MissingAppName,

	#[error("no appVersion was specified")]
	MissingAppVersion,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
