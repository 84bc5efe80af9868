/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type summarizing a verification run
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyObjectsOutput {
    /// The number of object versions verified intact
    pub objects_intact: u64,

    /// The number of object versions found corrupted
    pub objects_corrupted: u64,

    /// The number of object versions skipped because their ETag has no known shape
    pub objects_skipped: u64,

    /// The number of object versions that could not be retrieved
    pub objects_failed: u64,

    /// The number of listing errors (bad entries or failed pages) encountered
    pub listing_failures: u64,
}

impl VerifyObjectsOutput {
    /// Creates a new builder-style object to manufacture [`VerifyObjectsOutput`](crate::operation::verify_objects::VerifyObjectsOutput).
    pub fn builder() -> VerifyObjectsOutputBuilder {
        VerifyObjectsOutputBuilder::default()
    }

    /// The number of object versions verified intact
    pub fn objects_intact(&self) -> u64 {
        self.objects_intact
    }

    /// The number of object versions found corrupted
    pub fn objects_corrupted(&self) -> u64 {
        self.objects_corrupted
    }

    /// The number of object versions skipped because their ETag has no known shape
    pub fn objects_skipped(&self) -> u64 {
        self.objects_skipped
    }

    /// The number of object versions that could not be retrieved
    pub fn objects_failed(&self) -> u64 {
        self.objects_failed
    }

    /// The number of listing errors encountered
    pub fn listing_failures(&self) -> u64 {
        self.listing_failures
    }

    /// Total number of object versions that received a verdict
    pub fn objects_processed(&self) -> u64 {
        self.objects_intact + self.objects_corrupted + self.objects_skipped + self.objects_failed
    }
}

/// A builder for [`VerifyObjectsOutput`](crate::operation::verify_objects::VerifyObjectsOutput).
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct VerifyObjectsOutputBuilder {
    pub(crate) objects_intact: u64,
    pub(crate) objects_corrupted: u64,
    pub(crate) objects_skipped: u64,
    pub(crate) objects_failed: u64,
    pub(crate) listing_failures: u64,
}

impl VerifyObjectsOutputBuilder {
    /// The number of object versions verified intact
    pub fn objects_intact(mut self, input: u64) -> Self {
        self.objects_intact = input;
        self
    }

    /// The number of object versions found corrupted
    pub fn objects_corrupted(mut self, input: u64) -> Self {
        self.objects_corrupted = input;
        self
    }

    /// The number of object versions skipped
    pub fn objects_skipped(mut self, input: u64) -> Self {
        self.objects_skipped = input;
        self
    }

    /// The number of object versions that could not be retrieved
    pub fn objects_failed(mut self, input: u64) -> Self {
        self.objects_failed = input;
        self
    }

    /// The number of listing errors encountered
    pub fn listing_failures(mut self, input: u64) -> Self {
        self.listing_failures = input;
        self
    }

    /// Consume the builder and return the output
    pub fn build(self) -> VerifyObjectsOutput {
        VerifyObjectsOutput {
            objects_intact: self.objects_intact,
            objects_corrupted: self.objects_corrupted,
            objects_skipped: self.objects_skipped,
            objects_failed: self.objects_failed,
            listing_failures: self.listing_failures,
        }
    }
}
