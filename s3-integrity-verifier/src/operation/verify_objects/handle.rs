/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use async_channel::Receiver;
use tokio::task;

use crate::types::ObjectVerification;

use super::{VerifyObjectsContext, VerifyObjectsOutput};

/// Handle for `VerifyObjects` operation
#[derive(Debug)]
#[non_exhaustive]
pub struct VerifyObjectsHandle {
    /// All child tasks spawned for this run
    pub(crate) tasks: task::JoinSet<Result<(), crate::error::Error>>,
    /// The context used to drive the run to completion
    pub(crate) ctx: VerifyObjectsContext,
    /// Verdicts, one per object version, in completion order
    pub(crate) results: Receiver<ObjectVerification>,
}

impl VerifyObjectsHandle {
    /// Wait for the next object verdict.
    ///
    /// Returns `None` once every listed object version has been verified.
    pub async fn next(&mut self) -> Option<ObjectVerification> {
        self.results.recv().await.ok()
    }

    /// Consume the handle and wait for the run to complete
    ///
    /// Verdicts not yet taken with [`next`](Self::next) are discarded but still counted.
    #[tracing::instrument(skip_all, level = "debug", name = "verify-objects-join")]
    pub async fn join(mut self) -> Result<VerifyObjectsOutput, crate::error::Error> {
        // stop buffering verdicts nobody will read, workers keep tallying
        self.results.close();
        while self.results.try_recv().is_ok() {}

        // join all tasks
        while let Some(join_result) = self.tasks.join_next().await {
            join_result??;
        }

        Ok(self.ctx.state().output())
    }

    /// Abort the run, cancelling the enumerator and all verification workers.
    pub async fn abort(mut self) {
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task;

    use super::VerifyObjectsHandle;
    use crate::operation::verify_objects::{
        VerifyObjectsContext, VerifyObjectsInput, VerifyObjectsState,
    };
    use crate::types::{ObjectRef, ObjectVerification, Verdict};

    fn context() -> VerifyObjectsContext {
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version_latest()
            .build();
        let config = crate::Config::builder()
            .client(aws_sdk_s3::Client::from_conf(s3_config))
            .build();
        let handle = Arc::new(crate::client::Handle { config });
        let input = VerifyObjectsInput::builder()
            .bucket("test-bucket")
            .build()
            .unwrap();
        VerifyObjectsContext::new(
            handle,
            VerifyObjectsState::new(input, vec!["test-bucket".to_owned()]),
        )
    }

    fn verification(idx: usize) -> ObjectVerification {
        ObjectVerification {
            object: ObjectRef {
                bucket: "test-bucket".to_owned(),
                key: format!("key-{idx}"),
                version_id: None,
                e_tag: String::new(),
                is_delete_marker: false,
            },
            verdict: Verdict::Intact,
        }
    }

    #[tokio::test]
    async fn test_join_does_not_buffer_unread_verdicts() {
        let ctx = context();
        let (result_tx, results) = async_channel::unbounded();

        // some verdicts are queued before join, the rest are sent while joining
        for idx in 0..16 {
            result_tx.send(verification(idx)).await.unwrap();
        }
        let mut tasks = task::JoinSet::new();
        let worker_tx = result_tx.clone();
        tasks.spawn(async move {
            let mut delivered = 0;
            for idx in 16..1024 {
                if worker_tx.send(verification(idx)).await.is_ok() {
                    delivered += 1;
                }
            }
            assert_eq!(0, delivered);
            Ok(())
        });

        let handle = VerifyObjectsHandle {
            tasks,
            ctx,
            results,
        };
        handle.join().await.unwrap();

        assert!(result_tx.is_closed());
        assert_eq!(0, result_tx.len());
    }
}
