/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */

//! S3 Integrity Verifier
//!
//! Audits the objects stored in an S3-compatible bucket for data corruption. Every object
//! version is downloaded (whole, or part by part for multipart uploads), its MD5 digest is
//! recomputed and the expected entity tag is rebuilt and compared with the one recorded by
//! the store.
//!
//! ```no_run
//! # async fn audit() -> Result<(), s3_integrity_verifier::error::Error> {
//! let config = s3_integrity_verifier::config::loader::ConfigLoader::default()
//!     .endpoint_url("http://localhost:9000")
//!     .access_key("access")
//!     .secret_key("secret")
//!     .load()
//!     .await?;
//! let client = s3_integrity_verifier::Client::new(config);
//!
//! let mut handle = client.verify_objects().bucket("my-bucket").send().await?;
//! while let Some(verification) = handle.next().await {
//!     println!("{verification}");
//! }
//! let output = handle.join().await?;
//! println!("{} objects corrupted", output.objects_corrupted());
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

/// Error types emitted by `s3-integrity-verifier`
pub mod error;

/// Common types used by `s3-integrity-verifier`
pub mod types;

/// Entity tag decoding and expected-ETag computation
pub mod etag;

/// Verifier client
pub mod client;

/// Verifier operations
pub mod operation;

/// Verifier configuration
pub mod config;

pub use self::client::Client;
pub use self::config::Config;
