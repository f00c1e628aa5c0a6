// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Classification of crash post responses.

use bugsplat_core::{ErrorInput, ResponseBody};
use serde_json::Value;
use thiserror::Error;

/// Why a crash post that reached the server did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
	#[error("BugSplat Error: Bad request")]
	BadRequest,

	/// The caller decides whether and when to retry.
	#[error("BugSplat Error: Rate limit of one crash per second exceeded")]
	RateLimited,

	#[error("BugSplat Error: Unknown error")]
	Unknown { status: u16 },

	/// 2xx status but the body is not a valid response body (including bodies
	/// that are not JSON at all).
	#[error("BugSplat Error: Invalid response received")]
	InvalidResponse,
}

/// Result of a crash post.
///
/// `original` always echoes the input that was posted.
#[derive(Debug, Clone, PartialEq)]
pub enum BugSplatResponse {
	Success {
		response: ResponseBody,
		/// Parsed body exactly as received, including fields not in
		/// [`ResponseBody`].
		body: Value,
		original: ErrorInput,
	},
	Failure {
		error: PostError,
		/// Parsed body as received, possibly an empty object.
		response: Value,
		original: ErrorInput,
	},
}

impl BugSplatResponse {
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	/// The classified error, `None` on success.
	pub fn error(&self) -> Option<&PostError> {
		match self {
			Self::Success { .. } => None,
			Self::Failure { error, .. } => Some(error),
		}
	}

	/// The validated body, `None` on failure.
	pub fn response(&self) -> Option<&ResponseBody> {
		match self {
			Self::Success { response, .. } => Some(response),
			Self::Failure { .. } => None,
		}
	}

	/// The body as JSON, whichever variant this is.
	pub fn raw_response(&self) -> Value {
		match self {
			Self::Success { body, .. } => body.clone(),
			Self::Failure { response, .. } => response.clone(),
		}
	}

	pub fn original(&self) -> &ErrorInput {
		match self {
			Self::Success { original, .. } | Self::Failure { original, .. } => original,
		}
	}
}

/// Maps a status and parsed body to a result. First match wins:
///
/// | status | result |
/// |---|---|
/// | 400 | [`PostError::BadRequest`] |
/// | 429 | [`PostError::RateLimited`] |
/// | other non-2xx | [`PostError::Unknown`] |
/// | 2xx, invalid body | [`PostError::InvalidResponse`] |
/// | 2xx, valid body | success |
pub fn classify_response(status: u16, body: Value, original: ErrorInput) -> BugSplatResponse {
	let ok = (200..300).contains(&status);

	let error = match status {
		400 => PostError::BadRequest,
		429 => PostError::RateLimited,
		_ if !ok => PostError::Unknown { status },
		_ => match ResponseBody::from_value(&body) {
			Some(response) => {
				return BugSplatResponse::Success {
					response,
					body,
					original,
				}
			}
			None => PostError::InvalidResponse,
		},
	};

	BugSplatResponse::Failure {
		error,
		response: body,
		original,
	}
}
