/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::operation::verify_objects::builders::VerifyObjectsFluentBuilder;
use crate::types::ConcurrencySetting;
use crate::Config;
use std::sync::Arc;

/// Integrity verifier client for S3-compatible object stores.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// State shared by every operation started from the same client
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// Get the concrete number of workers to use based on the concurrency setting.
    pub(crate) fn num_workers(&self) -> usize {
        match self.config.concurrency() {
            ConcurrencySetting::Explicit(concurrency) => (*concurrency).max(1),
            ConcurrencySetting::Sequential => 1,
        }
    }
}

impl Client {
    /// Creates a new client from a verifier config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });

        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Verify every object version under a bucket/prefix, or in every accessible bucket.
    ///
    /// # Examples
    /// ```no_run
    /// async fn audit(client: &s3_integrity_verifier::Client) -> Result<(), s3_integrity_verifier::error::Error> {
    ///     let mut handle = client
    ///         .verify_objects()
    ///         .bucket("my-bucket")
    ///         .key_prefix("photos/")
    ///         .send()
    ///         .await?;
    ///
    ///     while let Some(verification) = handle.next().await {
    ///         println!("{verification}");
    ///     }
    ///     let output = handle.join().await?;
    ///     println!("{} intact", output.objects_intact());
    ///     Ok(())
    /// }
    /// ```
    pub fn verify_objects(&self) -> VerifyObjectsFluentBuilder {
        VerifyObjectsFluentBuilder::new(self.handle.clone())
    }
}
