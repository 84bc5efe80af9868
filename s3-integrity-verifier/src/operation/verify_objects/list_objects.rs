/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::VecDeque;

use aws_sdk_s3::{
    error::SdkError,
    operation::list_buckets::ListBucketsError,
    operation::list_object_versions::{ListObjectVersionsInput, ListObjectVersionsOutput},
    types::{DeleteMarkerEntry, ObjectVersion},
};
use aws_smithy_runtime_api::http::Response;
use tracing::Instrument;

use crate::error;
use crate::types::ObjectRef;

use super::VerifyObjectsContext;

/// Resolve the names of every bucket accessible to the configured credentials.
pub(super) async fn list_buckets(
    client: &aws_sdk_s3::Client,
) -> Result<Vec<String>, SdkError<ListBucketsError, Response>> {
    let output = client.list_buckets().send().await?;
    let buckets = output
        .buckets()
        .iter()
        .filter_map(|bucket| bucket.name().map(str::to_owned))
        .collect();
    Ok(buckets)
}

/// Paginator for the `ListObjectVersions` operation of a single bucket.
#[derive(Debug)]
struct ListObjectVersionsPaginator {
    context: VerifyObjectsContext,
    bucket: String,
    state: Option<State>,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating {
        // markers to resume listing after
        key_marker: Option<String>,
        version_id_marker: Option<String>,
    },
    Done,
}

impl State {
    fn next_state(self, output: &ListObjectVersionsOutput) -> State {
        let is_truncated = output.is_truncated().unwrap_or(false)
            && (output.next_key_marker().is_some() || output.next_version_id_marker().is_some());

        match self {
            // more versions to list
            State::Paginating { .. } if is_truncated => State::Paginating {
                key_marker: output.next_key_marker.to_owned(),
                version_id_marker: output.next_version_id_marker.to_owned(),
            },
            _ => State::Done,
        }
    }
}

impl ListObjectVersionsPaginator {
    fn new(context: VerifyObjectsContext, bucket: String) -> Self {
        Self {
            context,
            bucket,
            state: Some(State::Paginating {
                key_marker: None,
                version_id_marker: None,
            }),
        }
    }

    fn state(&self) -> &State {
        self.state.as_ref().expect("valid state")
    }

    async fn next_page(&mut self) -> Option<Result<ListObjectVersionsOutput, error::Error>> {
        let input = &self.context.state().input;
        let request = match self.state() {
            State::Done => return None,
            State::Paginating {
                key_marker,
                version_id_marker,
            } => ListObjectVersionsInput::builder()
                .bucket(self.bucket.clone())
                .set_prefix(input.key_prefix.to_owned())
                .set_key_marker(key_marker.clone())
                .set_version_id_marker(version_id_marker.clone()),
        };

        let list_result = request
            .send_with(self.context.client())
            .instrument(tracing::debug_span!("send-list-object-versions", bucket = %self.bucket))
            .await;
        let prev_state = self.state.take().expect("state set");
        match list_result {
            Ok(output) => {
                self.state.replace(prev_state.next_state(&output));
                Some(Ok(output))
            }
            Err(err) => {
                // no markers to resume from, give up on this bucket
                self.state.replace(State::Done);
                Some(Err(error::object_list_failed(err)))
            }
        }
    }
}

/// Lazy sequence of the object versions stored in a single bucket.
///
/// Delete markers are never yielded. Entries that cannot be turned into an [`ObjectRef`] are
/// yielded as errors without ending the sequence.
#[derive(Debug)]
pub(super) struct ObjectVersionsStream {
    paginator: ListObjectVersionsPaginator,
    current_page: VecDeque<Result<ObjectRef, error::Error>>,
}

impl ObjectVersionsStream {
    pub(super) fn new(context: VerifyObjectsContext, bucket: impl Into<String>) -> Self {
        Self {
            paginator: ListObjectVersionsPaginator::new(context, bucket.into()),
            current_page: VecDeque::new(),
        }
    }

    pub(super) async fn next(&mut self) -> Option<Result<ObjectRef, error::Error>> {
        loop {
            while let Some(entry) = self.current_page.pop_front() {
                match entry {
                    Ok(object) if object.is_delete_marker() => {
                        tracing::trace!("skipping delete marker {object}");
                    }
                    entry => return Some(entry),
                }
            }

            match self.paginator.next_page().await? {
                Ok(output) => {
                    let bucket = &self.paginator.bucket;
                    self.current_page = page_entries(bucket, output);
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

fn page_entries(
    bucket: &str,
    output: ListObjectVersionsOutput,
) -> VecDeque<Result<ObjectRef, error::Error>> {
    let versions = output
        .versions
        .unwrap_or_default()
        .into_iter()
        .map(|version| object_version(bucket, version));
    let delete_markers = output
        .delete_markers
        .unwrap_or_default()
        .into_iter()
        .filter_map(|marker| delete_marker(bucket, marker))
        .map(Ok);
    versions.chain(delete_markers).collect()
}

fn object_version(bucket: &str, version: ObjectVersion) -> Result<ObjectRef, error::Error> {
    let key = version.key.ok_or_else(|| {
        error::object_list_failed(format!(
            "bucket {bucket} listed an object version without a key (version {:?})",
            version.version_id
        ))
    })?;
    Ok(ObjectRef {
        bucket: bucket.to_owned(),
        key,
        version_id: version.version_id,
        e_tag: version.e_tag.unwrap_or_default(),
        is_delete_marker: false,
    })
}

// delete markers carry no content, one without a key is dropped like any other
fn delete_marker(bucket: &str, marker: DeleteMarkerEntry) -> Option<ObjectRef> {
    let Some(key) = marker.key else {
        tracing::trace!(
            "skipping delete marker without a key in bucket {bucket} (version {:?})",
            marker.version_id
        );
        return None;
    };
    Some(ObjectRef {
        bucket: bucket.to_owned(),
        key,
        version_id: marker.version_id,
        e_tag: String::new(),
        is_delete_marker: true,
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::{
        operation::list_object_versions::ListObjectVersionsOutput,
        types::{DeleteMarkerEntry, ObjectVersion},
    };

    use super::{page_entries, State};
    use crate::error::ErrorKind;

    fn list_resp(
        next_markers: Option<(&'static str, &'static str)>,
        keys: Vec<&'static str>,
    ) -> ListObjectVersionsOutput {
        let versions = keys
            .iter()
            .map(|k| {
                ObjectVersion::builder()
                    .key(*k)
                    .version_id("v1")
                    .e_tag("\"5d41402abc4b2a76b9719d911017c592\"")
                    .build()
            })
            .collect();
        ListObjectVersionsOutput::builder()
            .is_truncated(next_markers.is_some())
            .set_next_key_marker(next_markers.map(|(k, _)| k.to_owned()))
            .set_next_version_id_marker(next_markers.map(|(_, v)| v.to_owned()))
            .set_versions(Some(versions))
            .build()
    }

    #[test]
    fn test_next_state() {
        let start = State::Paginating {
            key_marker: None,
            version_id_marker: None,
        };

        let output1 = list_resp(Some(("k2", "v1")), vec!["k1", "k2"]);
        let output2 = list_resp(Some(("k4", "v1")), vec!["k3", "k4"]);
        let output3 = list_resp(None, vec!["k5"]);

        let state2 = start.next_state(&output1);
        assert_eq!(
            state2,
            State::Paginating {
                key_marker: Some("k2".to_owned()),
                version_id_marker: Some("v1".to_owned()),
            }
        );

        let state3 = state2.next_state(&output2);
        assert_eq!(
            state3,
            State::Paginating {
                key_marker: Some("k4".to_owned()),
                version_id_marker: Some("v1".to_owned()),
            }
        );

        let state4 = state3.next_state(&output3);
        assert_eq!(state4, State::Done);
        assert_eq!(State::Done, state4.next_state(&output1));
    }

    #[test]
    fn test_truncated_without_markers_is_done() {
        let output = ListObjectVersionsOutput::builder()
            .is_truncated(true)
            .build();
        let start = State::Paginating {
            key_marker: None,
            version_id_marker: None,
        };
        assert_eq!(State::Done, start.next_state(&output));
    }

    #[test]
    fn test_page_entries() {
        let output = ListObjectVersionsOutput::builder()
            .versions(
                ObjectVersion::builder()
                    .key("a.txt")
                    .version_id("v2")
                    .e_tag("\"5d41402abc4b2a76b9719d911017c592\"")
                    .build(),
            )
            .versions(ObjectVersion::builder().version_id("v9").build())
            .delete_markers(
                DeleteMarkerEntry::builder()
                    .key("a.txt")
                    .version_id("v3")
                    .build(),
            )
            .delete_markers(DeleteMarkerEntry::builder().version_id("v4").build())
            .build();

        // the keyless delete marker is dropped, not reported as a listing error
        let entries: Vec<_> = page_entries("bucket", output).into_iter().collect();
        assert_eq!(3, entries.len());

        let version = entries[0].as_ref().unwrap();
        assert_eq!("bucket", version.bucket());
        assert_eq!("a.txt", version.key());
        assert_eq!(Some("v2"), version.version_id());
        assert_eq!("\"5d41402abc4b2a76b9719d911017c592\"", version.e_tag());
        assert!(!version.is_delete_marker());

        let err = entries[1].as_ref().unwrap_err();
        assert_eq!(&ErrorKind::ObjectListFailed, err.kind());

        let marker = entries[2].as_ref().unwrap();
        assert!(marker.is_delete_marker());
        assert_eq!(Some("v3"), marker.version_id());
    }
}
