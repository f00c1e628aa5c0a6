// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The value being reported: an error with an optional stack, or a plain
//! message.

use std::fmt;

use crate::backtrace::capture_stack;

/// An error-like value: a message and, usually, a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
	pub message: String,
	pub stack: Option<String>,
}

impl ErrorDetails {
	/// Creates error details without a stack.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			stack: None,
		}
	}

	pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
		self.stack = Some(stack.into());
		self
	}

	/// Captures a Rust error's message, its source chain and the current
	/// backtrace.
	pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
		let mut stack = capture_stack();

		let mut source = error.source();
		while let Some(cause) = source {
			if !stack.is_empty() {
				stack.push('\n');
			}
			stack.push_str("Caused by: ");
			stack.push_str(&cause.to_string());
			source = cause.source();
		}

		Self {
			message: error.to_string(),
			stack: Some(stack),
		}
	}
}

impl fmt::Display for ErrorDetails {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

/// Input to a crash post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorInput {
	Error(ErrorDetails),
	/// A bare message; it is wrapped as an error when the call stack is built.
	Message(String),
}

impl ErrorInput {
	/// Shorthand for [`ErrorDetails::from_error`].
	pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
		Self::Error(ErrorDetails::from_error(error))
	}

	pub fn message(&self) -> &str {
		match self {
			Self::Error(details) => &details.message,
			Self::Message(message) => message,
		}
	}

	pub fn stack(&self) -> Option<&str> {
		match self {
			Self::Error(details) => details.stack.as_deref(),
			Self::Message(_) => None,
		}
	}
}

impl fmt::Display for ErrorInput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.message())
	}
}

impl From<ErrorDetails> for ErrorInput {
	fn from(details: ErrorDetails) -> Self {
		Self::Error(details)
	}
}

impl From<&str> for ErrorInput {
	fn from(message: &str) -> Self {
		Self::Message(message.to_string())
	}
}

impl From<String> for ErrorInput {
	fn from(message: String) -> Self {
		Self::Message(message)
	}
}
