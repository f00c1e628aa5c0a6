// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the BugSplat crash reporting client.
//!
//! This crate holds everything about a crash post that does not touch the
//! network: client identity and metadata, per-post options, form parameters,
//! call stack normalization, and the response body schema. The `bugsplat`
//! crate builds the client on top of it.

pub mod backtrace;
pub mod callstack;
pub mod error;
pub mod error_input;
pub mod form;
pub mod metadata;
pub mod response;

pub use callstack::{create_standardized_call_stack, ERROR_MARKER};
pub use error::{CoreError, Result};
pub use error_input::{ErrorDetails, ErrorInput};
pub use form::{BinaryValue, CrashForm, FormDataParam, FormValue};
pub use metadata::{ClientIdentity, DefaultMetadata, PostOptions, ResolvedMetadata};
pub use response::{try_parse_response_json, validate_response_body, ResponseBody, ResponseStatus};
