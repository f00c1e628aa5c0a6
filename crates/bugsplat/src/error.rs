// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the crash SDK.

use std::path::PathBuf;

use bugsplat_core::CoreError;
use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, BugSplatSdkError>;

/// Errors that abort an SDK operation.
///
/// Responses the server did send, including 4xx and 5xx statuses, are not
/// errors here; they come back as [`crate::BugSplatResponse::Failure`].
#[derive(Debug, Error)]
pub enum BugSplatSdkError {
	/// The client identity is incomplete.
	#[error(transparent)]
	InvalidIdentity(#[from] CoreError),

	/// HTTP request failed before a response was received.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// A custom transport failed before a response was received.
	#[error("transport failed: {0}")]
	Transport(String),

	/// An attachment file could not be read.
	#[error("failed to read attachment {path}: {source}")]
	AttachmentRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}
