// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust backtrace capture, rendered in the `at function (file:line)` shape
//! the crash ingestion service expects in a call stack.

use rustc_demangle::demangle;
use std::backtrace::Backtrace;

/// A single parsed backtrace frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
	pub function: String,
	pub module: Option<String>,
	/// `file:line:col` as printed by the standard library.
	pub location: Option<String>,
	pub in_app: bool,
}

impl StackFrame {
	fn new(function: &str) -> Self {
		let symbol = strip_address(function);
		let function = strip_crate_hashes(strip_hash(&demangle(symbol).to_string()));
		let module = function.rfind("::").map(|idx| function[..idx].to_string());
		let in_app = is_in_app_frame(&function);

		Self {
			function,
			module,
			location: None,
			in_app,
		}
	}

	/// Renders the frame as a single call stack line.
	pub fn render(&self) -> String {
		match &self.location {
			Some(location) => format!("    at {} ({})", self.function, location),
			None => format!("    at {}", self.function),
		}
	}
}

/// Parse a Rust backtrace into frames.
///
/// Uses the short format, which starts at the capture site and prints
/// symbols without addresses or hashes.
pub fn parse_backtrace(backtrace: &Backtrace) -> Vec<StackFrame> {
	parse_backtrace_string(&backtrace.to_string())
}

/// Parse the standard library's backtrace output.
///
/// Frames look like `  3: my_app::main` and may be followed by one or more
/// `at src/main.rs:10:5` lines; the first location is kept.
fn parse_backtrace_string(bt_string: &str) -> Vec<StackFrame> {
	let mut frames: Vec<StackFrame> = Vec::new();

	for line in bt_string.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if let Some(location) = line.strip_prefix("at ") {
			if let Some(frame) = frames.last_mut() {
				if frame.location.is_none() {
					frame.location = Some(location.trim().to_string());
				}
			}
			continue;
		}

		if let Some(frame) = parse_frame_line(line) {
			frames.push(frame);
		}
	}

	frames
}

fn parse_frame_line(line: &str) -> Option<StackFrame> {
	let (index, function) = line.split_once(':')?;
	index.trim().parse::<u32>().ok()?;

	let function = function.trim();
	if function.is_empty() {
		return None;
	}

	Some(StackFrame::new(function))
}

/// Drops the `0x55733d6ce93b - ` prefix of full-format frames.
fn strip_address(function: &str) -> &str {
	match function.split_once(" - ") {
		Some((address, symbol)) if address.trim().starts_with("0x") => symbol.trim(),
		_ => function,
	}
}

/// Drops `[e28293b1aa0f68bd]` crate disambiguators from v0-mangled paths.
fn strip_crate_hashes(function: &str) -> String {
	let mut out = String::with_capacity(function.len());
	let mut rest = function;

	while let Some(open) = rest.find('[') {
		let tail = &rest[open + 1..];
		match tail.find(']') {
			Some(close) if close > 0 && tail[..close].chars().all(|c| c.is_ascii_hexdigit()) => {
				out.push_str(&rest[..open]);
				rest = &tail[close + 1..];
			}
			_ => {
				out.push_str(&rest[..=open]);
				rest = tail;
			}
		}
	}

	out.push_str(rest);
	out
}

/// Drops the `::h0123456789abcdef` suffix legacy-mangled symbols carry.
fn strip_hash(function: &str) -> &str {
	match function.rsplit_once("::h") {
		Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => head,
		_ => function,
	}
}

/// Determine if a frame is from application code rather than the standard
/// library, the async runtime, or this SDK's own posting machinery.
///
/// Trait impl frames (`<T as Trait>::method`) belong to the implementing
/// type; generic or unnamed types such as `F` or `fn() -> T` are not app code.
fn is_in_app_frame(function: &str) -> bool {
	const SYSTEM_PREFIXES: &[&str] = &[
		"std::",
		"core::",
		"alloc::",
		"test::",
		"tokio::",
		"futures::",
		"futures_core::",
		"futures_util::",
		"async_trait::",
		"tracing::",
		"bugsplat_core::",
		"bugsplat::client::",
		"panic_unwind::",
		"rust_begin_unwind",
		"rust_panic",
		"__rust_",
		"_rust_",
		"__libc_start",
		"_start",
		"start_thread",
		"__clone",
		"clone3",
		"<unknown>",
	];

	const SYSTEM_CONTAINS: &[&str] = &[
		"::panic::",
		"::panicking::",
		"::rt::",
		"::runtime::",
		"::sys_common::",
	];

	if function == "main" {
		return false;
	}

	let path = function.trim_start_matches('<');
	if SYSTEM_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
		return false;
	}
	if function.starts_with('<') && !is_qualified_path(path) {
		return false;
	}

	!SYSTEM_CONTAINS.iter().any(|needle| function.contains(needle))
}

fn is_qualified_path(path: &str) -> bool {
	path.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
		.next()
		.is_some_and(|head| head.contains("::"))
}

/// Capture a fresh backtrace and parse it.
pub fn capture_frames() -> Vec<StackFrame> {
	let backtrace = Backtrace::force_capture();
	parse_backtrace(&backtrace)
}

/// Renders frames one per line, keeping only application frames when any
/// are present.
pub fn render_frames(frames: &[StackFrame]) -> String {
	let in_app: Vec<&StackFrame> = frames.iter().filter(|frame| frame.in_app).collect();
	let selected: Vec<&StackFrame> = if in_app.is_empty() {
		frames.iter().collect()
	} else {
		in_app
	};

	selected
		.iter()
		.map(|frame| frame.render())
		.collect::<Vec<_>>()
		.join("\n")
}

/// Captures the current call site as a rendered call stack body (no header
/// line).
pub fn capture_stack() -> String {
	render_frames(&capture_frames())
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:13
   1: bugsplat_core::backtrace::capture_frames
             at ./src/backtrace.rs:140:18
   2: my_app::handlers::process
             at ./src/handlers.rs:42:9
             at ./src/inlined.rs:1:1
   3: my_app::main
   4: core::ops::function::FnOnce::call_once
             at /rustc/abc/library/core/src/ops/function.rs:250:5";

	#[test]
	fn test_is_in_app_frame_excludes_std() {
		assert!(!is_in_app_frame("std::panic::panic_any"));
		assert!(!is_in_app_frame("core::panicking::panic"));
		assert!(!is_in_app_frame("alloc::vec::Vec::push"));
		assert!(!is_in_app_frame("tokio::runtime::Runtime::block_on"));
		assert!(!is_in_app_frame("bugsplat_core::backtrace::capture_stack"));
		assert!(!is_in_app_frame("bugsplat_core::callstack::create_standardized_call_stack"));
		assert!(!is_in_app_frame("bugsplat::client::BugSplat::post::{{closure}}"));
		assert!(!is_in_app_frame("test::__rust_begin_short_backtrace"));
	}

	#[test]
	fn test_is_in_app_frame_trait_impls() {
		assert!(!is_in_app_frame("<core::pin::Pin<P> as core::future::future::Future>::poll"));
		assert!(!is_in_app_frame("<F as core::future::future::Future>::poll"));
		assert!(!is_in_app_frame(
			"<fn() -> core::result::Result<(), alloc::string::String> as core::ops::function::FnOnce<()>>::call_once"
		));
		assert!(is_in_app_frame("<my_app::Document as core::fmt::Display>::fmt"));
	}

	#[test]
	fn test_is_in_app_frame_includes_user_code() {
		assert!(is_in_app_frame("my_app::main"));
		assert!(is_in_app_frame("bugsplat_cli::main"));
		assert!(is_in_app_frame("foo::bar::baz"));
	}

	#[test]
	fn test_parse_backtrace_string() {
		let frames = parse_backtrace_string(SAMPLE);
		assert_eq!(frames.len(), 5);

		let process = &frames[2];
		assert_eq!(process.function, "my_app::handlers::process");
		assert_eq!(process.module.as_deref(), Some("my_app::handlers"));
		assert_eq!(process.location.as_deref(), Some("./src/handlers.rs:42:9"));
		assert!(process.in_app);

		assert!(frames[3].location.is_none());
		assert!(!frames[0].in_app);
		assert!(!frames[1].in_app);
	}

	#[test]
	fn test_parse_frame_line_requires_index() {
		assert!(parse_frame_line("my_app::main").is_none());
		assert!(parse_frame_line("  5: my_app::main").is_some());
		assert!(parse_frame_line("  5: ").is_none());
	}

	#[test]
	fn test_parse_full_format_frames() {
		let frames = parse_backtrace_string(
			"   0:     0x55733d6ce93b - std[e28293b1aa0f68bd]::backtrace_rs::backtrace::libunwind::trace
   1:     0x55733d656c90 - my_app[0123456789abcdef]::handlers::process::h0123456789abcdef
                               at ./src/handlers.rs:42:9",
		);

		assert_eq!(frames[0].function, "std::backtrace_rs::backtrace::libunwind::trace");
		assert!(!frames[0].in_app);
		assert_eq!(frames[1].function, "my_app::handlers::process");
		assert_eq!(frames[1].location.as_deref(), Some("./src/handlers.rs:42:9"));
		assert!(frames[1].in_app);
	}

	#[test]
	fn test_strip_crate_hashes_keeps_slices() {
		assert_eq!(
			strip_crate_hashes("<[u8] as core[c1f1a4ba060b9bfa]::fmt::Debug>::fmt"),
			"<[u8] as core::fmt::Debug>::fmt"
		);
	}

	#[test]
	fn test_strip_hash() {
		assert_eq!(strip_hash("my_app::main::h0123456789abcdef"), "my_app::main");
		assert_eq!(strip_hash("my_app::handler"), "my_app::handler");
	}

	#[test]
	fn test_render_frames_keeps_app_frames() {
		let rendered = render_frames(&parse_backtrace_string(SAMPLE));
		assert_eq!(
			rendered,
			"    at my_app::handlers::process (./src/handlers.rs:42:9)\n    at my_app::main"
		);
	}

	#[test]
	fn test_render_frames_falls_back_to_all_frames() {
		let frames = parse_backtrace_string("   0: std::rt::lang_start");
		assert_eq!(render_frames(&frames), "    at std::rt::lang_start");
	}

	#[test]
	fn test_captured_frames_are_clean() {
		let frames = capture_frames();
		assert!(!frames.is_empty());

		for frame in &frames {
			assert!(!frame.function.contains("0x"), "address in {}", frame.function);
			assert_eq!(strip_crate_hashes(&frame.function), frame.function);
			if frame.function.starts_with("std::") || frame.function.starts_with("bugsplat_core::") {
				assert!(!frame.in_app, "{} marked in-app", frame.function);
			}
		}

		let stack = capture_stack();
		assert!(!stack.starts_with("Error:"));
		assert!(stack.lines().all(|line| line.starts_with("    at ")));
	}
}
