/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

/// Types for verifying every object version of one or more buckets
pub mod verify_objects;

/// Container for maintaining context required to carry out a single operation.
///
/// `State` is whatever additional operation specific state is required for the operation.
#[derive(Debug)]
pub(crate) struct OperationContext<State> {
    handle: Arc<crate::client::Handle>,
    state: Arc<State>,
}

impl<State> OperationContext<State> {
    pub(crate) fn new(handle: Arc<crate::client::Handle>, state: State) -> Self {
        Self {
            handle,
            state: Arc::new(state),
        }
    }

    /// The S3 client to use for SDK operations
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.handle.config.client()
    }

    /// Operation specific state
    pub(crate) fn state(&self) -> &State {
        &self.state
    }
}

impl<State> Clone for OperationContext<State> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            state: self.state.clone(),
        }
    }
}
