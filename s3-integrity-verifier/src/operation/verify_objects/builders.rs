/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::error;

use super::{VerifyObjectsHandle, VerifyObjectsInputBuilder};

/// Fluent builder for constructing a verification run
#[derive(Debug)]
pub struct VerifyObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: VerifyObjectsInputBuilder,
}

impl VerifyObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Start verifying object versions.
    ///
    /// Input validation happens before any request is sent. Failure to resolve the set of
    /// buckets to audit is returned here; failures affecting single objects are reported as
    /// verdicts through the returned handle.
    pub async fn send(self) -> Result<VerifyObjectsHandle, error::Error> {
        let input = self.inner.build()?;
        crate::operation::verify_objects::VerifyObjects::orchestrate(self.handle, input).await
    }

    /// Set the bucket to audit.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket(input);
        self
    }

    /// Set the bucket to audit.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_bucket(input);
        self
    }

    /// The bucket to audit.
    pub fn get_bucket(&self) -> &Option<String> {
        self.inner.get_bucket()
    }

    /// Limit the audit to keys that begin with the given prefix
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.key_prefix(input);
        self
    }

    /// Limit the audit to keys that begin with the given prefix
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_key_prefix(input);
        self
    }

    /// Limit the audit to keys that begin with the given prefix
    pub fn get_key_prefix(&self) -> &Option<String> {
        self.inner.get_key_prefix()
    }
}

impl crate::operation::verify_objects::input::VerifyObjectsInputBuilder {
    /// Start verifying object versions with this input using the given client.
    pub async fn send_with(
        self,
        client: &crate::Client,
    ) -> Result<VerifyObjectsHandle, error::Error> {
        let mut fluent_builder = client.verify_objects();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
