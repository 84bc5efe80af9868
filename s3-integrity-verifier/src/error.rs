/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_sdk_s3::error::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of verification errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input or configuration validation issues
    InputInvalid,

    /// Resolving the set of buckets to audit failed
    BucketListFailed,

    /// Listing the object versions of a single bucket failed
    ObjectListFailed,

    /// Retrieving an object (or one part of it) failed
    FetchFailed(FetchFailed),

    /// Some kind of internal runtime issue (e.g. task failure)
    RuntimeError,
}

/// Stores information about a failed retrieval
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchFailed {
    part_number: Option<u32>,
}

impl FetchFailed {
    /// The part number that could not be retrieved, `None` when the whole object was requested.
    pub fn part_number(&self) -> Option<u32> {
        self.part_number
    }
}

impl Error {
    /// Creates a new verifier [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::BucketListFailed => write!(f, "failed to list buckets"),
            ErrorKind::ObjectListFailed => write!(f, "failed to list objects"),
            ErrorKind::FetchFailed(FetchFailed {
                part_number: Some(part_number),
            }) => write!(f, "failed to retrieve part {part_number}"),
            ErrorKind::FetchFailed(FetchFailed { part_number: None }) => {
                write!(f, "failed to retrieve object")
            }
            ErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn bucket_list_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::BucketListFailed, err)
}

pub(crate) fn object_list_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ObjectListFailed, err)
}

pub(crate) fn fetch_failed<E>(part_number: Option<u32>, err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::FetchFailed(FetchFailed { part_number }), err)
}

#[cfg(test)]
mod tests {
    use super::{fetch_failed, invalid_input, ErrorKind};

    #[test]
    fn test_fetch_failed_display_names_part() {
        let err = fetch_failed(Some(3), "connection reset");
        assert_eq!("failed to retrieve part 3", err.to_string());
        match err.kind() {
            ErrorKind::FetchFailed(failed) => assert_eq!(Some(3), failed.part_number()),
            other => panic!("unexpected error kind {other:?}"),
        }

        let err = fetch_failed(None, "connection reset");
        assert_eq!("failed to retrieve object", err.to_string());
    }

    #[test]
    fn test_source_is_preserved() {
        let err = invalid_input("prefix given without bucket");
        let source = std::error::Error::source(&err).expect("source set");
        assert_eq!("prefix given without bucket", source.to_string());
    }
}
