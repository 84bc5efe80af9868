/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use async_channel::{Receiver, Sender};
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::Instrument;

use crate::error;
use crate::etag::{ETagFormat, ETagSpec};
use crate::types::{ObjectRef, ObjectVerification, Verdict};

use super::fetch::fetch_part_digests;
use super::list_objects::ObjectVersionsStream;
use super::VerifyObjectsContext;

// worker to enumerate object versions, one bucket after another
pub(super) async fn discover_objects(
    ctx: VerifyObjectsContext,
    work_tx: Sender<ObjectRef>,
) -> Result<(), error::Error> {
    for bucket in &ctx.state().buckets {
        let mut stream = ObjectVersionsStream::new(ctx.clone(), bucket.as_str());
        while let Some(entry) = stream.next().await {
            match entry {
                Ok(object) => {
                    if work_tx.send(object).await.is_err() {
                        tracing::error!("all receiver ends have been dropped, unable to send a job!");
                        return Ok(());
                    }
                }
                Err(err) => {
                    tracing::warn!("LIST error in bucket {bucket}: {}", DisplayErrorContext(&err));
                    ctx.state().record_listing_failure();
                }
            }
        }
        tracing::debug!("finished listing bucket {bucket}");
    }

    Ok(())
}

// worker to verify an object version
pub(super) async fn verify_objects(
    ctx: VerifyObjectsContext,
    work_rx: Receiver<ObjectRef>,
    result_tx: Sender<ObjectVerification>,
) -> Result<(), error::Error> {
    while let Ok(object) = work_rx.recv().await {
        tracing::debug!("worker recv'd request for {object}");

        let span = tracing::debug_span!("verify-object", key = object.key());
        let verdict = verify_single_obj(&ctx, &object).instrument(span).await;
        ctx.state().record(&verdict);

        if result_tx
            .send(ObjectVerification { object, verdict })
            .await
            .is_err()
        {
            tracing::trace!("verdict receiver dropped, discarding verdict");
        }
    }

    tracing::trace!("req channel closed, worker finished");
    Ok(())
}

async fn verify_single_obj(ctx: &VerifyObjectsContext, object: &ObjectRef) -> Verdict {
    let spec = ETagSpec::decode(object.e_tag());
    if let ETagFormat::Unrecognized(reason) = spec.format() {
        tracing::warn!("ETAG: wrong format for {object}: {reason}");
        return spec.verify(&[]);
    }

    match fetch_part_digests(ctx, object, &spec).await {
        Ok(part_digests) => spec.verify(&part_digests),
        Err(err) => {
            tracing::warn!("GET {object} => {}", DisplayErrorContext(&err));
            Verdict::Error(err)
        }
    }
}
