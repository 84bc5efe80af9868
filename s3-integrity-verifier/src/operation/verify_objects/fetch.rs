/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::operation::get_object::GetObjectInput;
use tracing::Instrument;

use crate::error;
use crate::etag::ETagSpec;
use crate::types::ObjectRef;

use super::VerifyObjectsContext;

/// Retrieve the content of an object and compute the MD5 digest of each part.
///
/// Objects whose ETag carries a part count are retrieved part by part (part numbers start at
/// 1), otherwise the whole object is retrieved in one request. The first failed retrieval
/// ends collection for the object.
pub(super) async fn fetch_part_digests(
    ctx: &VerifyObjectsContext,
    object: &ObjectRef,
    spec: &ETagSpec,
) -> Result<Vec<md5::Digest>, error::Error> {
    if !spec.is_multipart() {
        let digest = digest_object(ctx, object, None)
            .instrument(tracing::debug_span!("send-get-object"))
            .await?;
        return Ok(vec![digest]);
    }

    let mut digests = Vec::new();
    for part_number in 1..=spec.part_count() {
        let digest = digest_object(ctx, object, Some(part_number))
            .instrument(tracing::debug_span!("send-get-object-part", part_number))
            .await?;
        digests.push(digest);
    }
    Ok(digests)
}

/// Stream one object (or one part of it) to completion through an MD5 hasher.
///
/// The response body is dropped, releasing its connection, on every return path.
async fn digest_object(
    ctx: &VerifyObjectsContext,
    object: &ObjectRef,
    part_number: Option<u32>,
) -> Result<md5::Digest, error::Error> {
    let sdk_part_number = part_number
        .map(i32::try_from)
        .transpose()
        .map_err(|err| error::fetch_failed(part_number, err))?;

    let resp = GetObjectInput::builder()
        .bucket(object.bucket())
        .key(object.key())
        .set_version_id(object.version_id().map(str::to_owned))
        .set_part_number(sdk_part_number)
        .send_with(ctx.client())
        .await
        .map_err(|err| error::fetch_failed(part_number, err))?;

    let mut body = resp.body;
    let mut hasher = md5::Context::new();
    let mut total_bytes = 0;
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|err| error::fetch_failed(part_number, err))?
    {
        total_bytes += chunk.len();
        hasher.consume(&chunk);
    }

    tracing::trace!("hashed {total_bytes} bytes of {object} (part {part_number:?})");
    Ok(hasher.compute())
}
