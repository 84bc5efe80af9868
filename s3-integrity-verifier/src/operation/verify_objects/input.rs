/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

/// Input type for verifying object versions
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyObjectsInput {
    /// The bucket to audit. When unset every bucket accessible to the credentials is audited.
    pub bucket: Option<String>,

    /// Limit the audit to keys that begin with the given prefix
    pub key_prefix: Option<String>,
}

impl VerifyObjectsInput {
    /// Creates a new builder-style object to manufacture [`VerifyObjectsInput`](crate::operation::verify_objects::VerifyObjectsInput).
    pub fn builder() -> VerifyObjectsInputBuilder {
        VerifyObjectsInputBuilder::default()
    }

    /// The bucket to audit.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    /// Limit the audit to keys that begin with the given prefix
    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }
}

/// A builder for [`VerifyObjectsInput`](crate::operation::verify_objects::VerifyObjectsInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct VerifyObjectsInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) key_prefix: Option<String>,
}

impl VerifyObjectsInputBuilder {
    /// Set the bucket to audit.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// Set the bucket to audit.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The bucket to audit.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// Limit the audit to keys that begin with the given prefix
    ///
    /// NOTE: A key prefix requires a bucket.
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.key_prefix = Some(input.into());
        self
    }

    /// Limit the audit to keys that begin with the given prefix
    ///
    /// NOTE: A key prefix requires a bucket.
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.key_prefix = input;
        self
    }

    /// Limit the audit to keys that begin with the given prefix
    pub fn get_key_prefix(&self) -> &Option<String> {
        &self.key_prefix
    }

    /// Consumes the builder and constructs a [`VerifyObjectsInput`](crate::operation::verify_objects::VerifyObjectsInput).
    ///
    /// Empty strings are treated as unset. Fails if a key prefix is given without a bucket.
    pub fn build(self) -> Result<VerifyObjectsInput, BuildError> {
        let bucket = self.bucket.filter(|b| !b.is_empty());
        let key_prefix = self.key_prefix.filter(|p| !p.is_empty());

        if bucket.is_none() && key_prefix.is_some() {
            return Err(BuildError::invalid_field(
                "key_prefix",
                "a key prefix was specified without a bucket",
            ));
        }

        Ok(VerifyObjectsInput { bucket, key_prefix })
    }
}

#[cfg(test)]
mod tests {
    use super::VerifyObjectsInput;

    #[test]
    fn test_prefix_requires_bucket() {
        let err = VerifyObjectsInput::builder()
            .key_prefix("photos/")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("without a bucket"));

        let err = VerifyObjectsInput::builder()
            .bucket("")
            .key_prefix("photos/")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("without a bucket"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let input = VerifyObjectsInput::builder()
            .bucket("")
            .key_prefix("")
            .build()
            .unwrap();
        assert_eq!(None, input.bucket());
        assert_eq!(None, input.key_prefix());

        let input = VerifyObjectsInput::builder()
            .bucket("photos")
            .key_prefix("2024/")
            .build()
            .unwrap();
        assert_eq!(Some("photos"), input.bucket());
        assert_eq!(Some("2024/"), input.key_prefix());
    }
}
