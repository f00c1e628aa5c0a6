// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Post a crash report using the bugsplat SDK.
//!
//! Run with:
//!   BUGSPLAT_DATABASE=fred BUGSPLAT_APP_NAME=my-rust-crasher BUGSPLAT_APP_VERSION=1.0.0 \
//!     cargo run --example post -p bugsplat

use bugsplat::{BugSplatBuilder, ErrorInput, FormDataParam, PostOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SaveError;

impl std::fmt::Display for SaveError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("failed to save document")
	}
}

impl std::error::Error for SaveError {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let mut bugsplat = BugSplatBuilder::from_env().build()?;

	bugsplat.set_default_app_key("example");
	bugsplat.set_default_description("posted from the bugsplat example");

	let options = PostOptions::new()
		.user("example_user")
		.param(FormDataParam::text("rust_version", "stable"));
	let result = bugsplat
		.post(ErrorInput::from_error(&SaveError), options)
		.await?;

	match result.error() {
		None => println!("Posted crash: {:?}", result.response()),
		Some(error) => println!("Post failed: {error} ({})", result.raw_response()),
	}

	Ok(())
}
