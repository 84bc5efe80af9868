/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for verifying object versions
pub use input::{VerifyObjectsInput, VerifyObjectsInputBuilder};
mod output;
/// Output type for verifying object versions
pub use output::{VerifyObjectsOutput, VerifyObjectsOutputBuilder};

mod handle;
pub use handle::VerifyObjectsHandle;

mod fetch;
mod list_objects;
mod worker;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task;
use tracing::Instrument;

use crate::error;
use crate::types::Verdict;

use super::OperationContext;

/// Operation struct for verifying every object version of one or more buckets
#[derive(Clone, Default, Debug)]
pub(crate) struct VerifyObjects;

impl VerifyObjects {
    /// Execute a single `VerifyObjects` operation.
    ///
    /// Buckets are resolved before anything is spawned so that a failure to list them
    /// surfaces here rather than through the handle.
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: VerifyObjectsInput,
    ) -> Result<VerifyObjectsHandle, error::Error> {
        let client = handle.config.client();
        let buckets = match input.bucket() {
            Some(bucket) => vec![bucket.to_owned()],
            None => list_objects::list_buckets(client)
                .instrument(tracing::debug_span!("send-list-buckets"))
                .await
                .map_err(error::bucket_list_failed)?,
        };
        tracing::debug!("verifying objects in {} bucket(s)", buckets.len());

        let concurrency = handle.num_workers();
        let ctx = VerifyObjectsContext::new(handle, VerifyObjectsState::new(input, buckets));

        let (work_tx, work_rx) = async_channel::bounded(concurrency);
        let (result_tx, result_rx) = async_channel::unbounded();

        let mut tasks = task::JoinSet::new();
        tasks.spawn(worker::discover_objects(ctx.clone(), work_tx));
        for _ in 0..concurrency {
            tasks.spawn(worker::verify_objects(
                ctx.clone(),
                work_rx.clone(),
                result_tx.clone(),
            ));
        }

        Ok(VerifyObjectsHandle {
            tasks,
            ctx,
            results: result_rx,
        })
    }
}

/// Verdict tallies and inputs shared by the enumerator and verification workers
#[derive(Debug)]
pub(crate) struct VerifyObjectsState {
    input: VerifyObjectsInput,
    buckets: Vec<String>,
    objects_intact: AtomicU64,
    objects_corrupted: AtomicU64,
    objects_skipped: AtomicU64,
    objects_failed: AtomicU64,
    listing_failures: AtomicU64,
}

impl VerifyObjectsState {
    fn new(input: VerifyObjectsInput, buckets: Vec<String>) -> Self {
        Self {
            input,
            buckets,
            objects_intact: AtomicU64::new(0),
            objects_corrupted: AtomicU64::new(0),
            objects_skipped: AtomicU64::new(0),
            objects_failed: AtomicU64::new(0),
            listing_failures: AtomicU64::new(0),
        }
    }

    fn record(&self, verdict: &Verdict) {
        let counter = match verdict {
            Verdict::Intact => &self.objects_intact,
            Verdict::Corrupted { .. } => &self.objects_corrupted,
            Verdict::Skipped(_) => &self.objects_skipped,
            Verdict::Error(_) => &self.objects_failed,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    fn record_listing_failure(&self) {
        self.listing_failures.fetch_add(1, Ordering::SeqCst);
    }

    fn output(&self) -> VerifyObjectsOutput {
        VerifyObjectsOutput::builder()
            .objects_intact(self.objects_intact.load(Ordering::SeqCst))
            .objects_corrupted(self.objects_corrupted.load(Ordering::SeqCst))
            .objects_skipped(self.objects_skipped.load(Ordering::SeqCst))
            .objects_failed(self.objects_failed.load(Ordering::SeqCst))
            .listing_failures(self.listing_failures.load(Ordering::SeqCst))
            .build()
    }
}

pub(crate) type VerifyObjectsContext = OperationContext<VerifyObjectsState>;
