/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::DisplayErrorContext;

use crate::error;

/// The concurrency settings to use for a verification run.
#[derive(Debug, Clone, Default)]
pub enum ConcurrencySetting {
    /// Fully verify one object before starting the next one.
    #[default]
    Sequential,

    /// Verify up to the given number of objects at the same time.
    ///
    /// Verdicts are delivered in completion order rather than listing order.
    Explicit(usize),
}

/// A single stored object version as produced by listing a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub(crate) bucket: String,
    pub(crate) key: String,
    pub(crate) version_id: Option<String>,
    pub(crate) e_tag: String,
    pub(crate) is_delete_marker: bool,
}

impl ObjectRef {
    /// The bucket containing the object.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The version identifier (`"null"` for objects written before versioning was enabled).
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// The entity tag recorded by the store, exactly as listed.
    pub fn e_tag(&self) -> &str {
        &self.e_tag
    }

    /// Whether this entry is a delete marker rather than an object version with content.
    pub fn is_delete_marker(&self) -> bool {
        self.is_delete_marker
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.bucket,
            self.key,
            self.version_id.as_deref().unwrap_or("null")
        )
    }
}

/// Outcome of verifying a single object version.
#[derive(Debug)]
#[non_exhaustive]
pub enum Verdict {
    /// The recomputed entity tag matches the recorded one.
    Intact,

    /// The recomputed entity tag differs from the recorded one.
    Corrupted {
        /// The entity tag recorded by the store
        recorded: String,
        /// The entity tag rebuilt from the downloaded content
        computed: String,
    },

    /// No comparison was attempted.
    Skipped(String),

    /// The object could not be retrieved completely.
    Error(error::Error),
}

impl Verdict {
    /// Short uppercase label used on report lines.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Intact => "INTACT",
            Verdict::Corrupted { .. } => "CORRUPTED",
            Verdict::Skipped(_) => "SKIPPED",
            Verdict::Error(_) => "ERROR",
        }
    }

    /// Returns true if the object was verified intact
    pub fn is_intact(&self) -> bool {
        matches!(self, Verdict::Intact)
    }

    /// Returns true if the object was found to be corrupted
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Verdict::Corrupted { .. })
    }
}

/// The verdict reached for one object version.
///
/// Its `Display` implementation renders the report line for the object.
#[derive(Debug)]
#[non_exhaustive]
pub struct ObjectVerification {
    /// The object that was verified
    pub object: ObjectRef,

    /// The verdict reached for it
    pub verdict: Verdict,
}

impl ObjectVerification {
    /// The object that was verified
    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    /// The verdict reached for the object
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }
}

impl fmt::Display for ObjectVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verdict.label(), self.object)?;
        match &self.verdict {
            Verdict::Intact => Ok(()),
            Verdict::Corrupted { recorded, computed } => {
                write!(f, " (recorded {recorded}, computed {computed})")
            }
            Verdict::Skipped(reason) => write!(f, ": {reason}"),
            Verdict::Error(err) => write!(f, ": {}", DisplayErrorContext(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjectRef, ObjectVerification, Verdict};

    fn object(version_id: Option<&str>) -> ObjectRef {
        ObjectRef {
            bucket: "photos".to_owned(),
            key: "2024/cat.jpg".to_owned(),
            version_id: version_id.map(str::to_owned),
            e_tag: "\"5d41402abc4b2a76b9719d911017c592\"".to_owned(),
            is_delete_marker: false,
        }
    }

    #[test]
    fn test_report_lines() {
        let intact = ObjectVerification {
            object: object(Some("v1")),
            verdict: Verdict::Intact,
        };
        assert_eq!("INTACT photos 2024/cat.jpg v1", intact.to_string());

        let corrupted = ObjectVerification {
            object: object(None),
            verdict: Verdict::Corrupted {
                recorded: "aa".to_owned(),
                computed: "bb".to_owned(),
            },
        };
        assert_eq!(
            "CORRUPTED photos 2024/cat.jpg null (recorded aa, computed bb)",
            corrupted.to_string()
        );

        let skipped = ObjectVerification {
            object: object(Some("v2")),
            verdict: Verdict::Skipped("unrecognized ETag format".to_owned()),
        };
        assert_eq!(
            "SKIPPED photos 2024/cat.jpg v2: unrecognized ETag format",
            skipped.to_string()
        );

        let failed = ObjectVerification {
            object: object(Some("v3")),
            verdict: Verdict::Error(crate::error::fetch_failed(Some(2), "connection reset")),
        };
        let line = failed.to_string();
        assert!(line.starts_with("ERROR photos 2024/cat.jpg v3: failed to retrieve part 2"));
        assert!(line.contains("connection reset"));
    }
}
