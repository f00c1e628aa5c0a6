// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Call stack normalization.
//!
//! The ingestion service locates the start of a call stack by its `Error:`
//! marker, so every call stack sent must contain one. Stacks that already
//! carry it are sent untouched; anything else gets an `Error: {message}`
//! header line with the original stack, if any, kept below it.

use crate::backtrace::capture_stack;
use crate::error_input::{ErrorDetails, ErrorInput};

/// Marker the ingestion service parses call stacks by.
pub const ERROR_MARKER: &str = "Error:";

/// Builds the `callstack` form field for an error input.
///
/// Plain messages are first wrapped as an error whose stack is the current
/// Rust backtrace.
pub fn create_standardized_call_stack(input: &ErrorInput) -> String {
	match input {
		ErrorInput::Error(details) => standardize(details),
		ErrorInput::Message(message) => {
			standardize(&ErrorDetails::new(message.as_str()).with_stack(capture_stack()))
		}
	}
}

fn standardize(details: &ErrorDetails) -> String {
	match details.stack.as_deref() {
		Some(stack) if stack.contains(ERROR_MARKER) => stack.to_string(),
		stack => format!(
			"{} {}\n{}",
			ERROR_MARKER,
			details.message,
			stack.unwrap_or_default()
		),
	}
}
