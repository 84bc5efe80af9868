/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use crate::error;
use crate::types::Verdict;

/// Number of hex characters in an MD5 based entity tag digest
const MD5_HEX_LEN: usize = 32;

/// Decoded form of an object's entity tag (ETag).
///
/// Single part uploads carry the hex MD5 of the object body. Multipart uploads carry
/// `hex(MD5(concat(part digests)))-N` where `N` is the number of parts.
/// See: https://docs.aws.amazon.com/AmazonS3/latest/userguide/checking-object-integrity.html#large-object-checksums
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ETagSpec {
    raw: String,
    quoted: bool,
    format: ETagFormat,
}

/// The shape of an entity tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ETagFormat {
    /// `<32 hex>`: the MD5 of the whole object.
    SinglePart {
        /// The hex digest, as recorded
        digest: String,
    },

    /// `<32 hex>-<N>`: the MD5 over the concatenated digests of `N` parts.
    Multipart {
        /// The hex digest, as recorded
        digest: String,
        /// Number of parts the object was uploaded with
        part_count: u32,
    },

    /// Anything else. There is no well defined checksum to compare against.
    Unrecognized(UnrecognizedETag),
}

/// Reason an entity tag could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnrecognizedETag {
    /// Nothing precedes the part count separator (or the tag is empty).
    EmptyDigest,
    /// The digest is not 32 hex characters.
    MalformedDigest,
    /// The text following `-` is not a positive decimal integer.
    MalformedPartCount,
    /// More than one `-` separator.
    TooManySeparators,
}

impl fmt::Display for UnrecognizedETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnrecognizedETag::EmptyDigest => write!(f, "empty digest"),
            UnrecognizedETag::MalformedDigest => write!(f, "digest is not {MD5_HEX_LEN} hex digits"),
            UnrecognizedETag::MalformedPartCount => write!(f, "part count is not a positive integer"),
            UnrecognizedETag::TooManySeparators => write!(f, "more than one '-' separator"),
        }
    }
}

impl ETagSpec {
    /// Decode an entity tag as returned by the store.
    ///
    /// Never fails: tags that do not have a recognized shape decode to
    /// [`ETagFormat::Unrecognized`]. One pair of surrounding double quotes, as S3 returns
    /// them, is ignored.
    pub fn decode(raw: impl Into<String>) -> ETagSpec {
        let raw = raw.into();
        let (body, quoted) = match raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Some(inner) => (inner, true),
            None => (raw.as_str(), false),
        };
        let format = decode_format(body);
        ETagSpec { raw, quoted, format }
    }

    /// The entity tag exactly as recorded
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The decoded shape of the tag
    pub fn format(&self) -> &ETagFormat {
        &self.format
    }

    /// Whether the tag has one of the recognized shapes
    pub fn is_recognized(&self) -> bool {
        !matches!(self.format, ETagFormat::Unrecognized(_))
    }

    /// Whether the tag carries a part count suffix
    pub fn is_multipart(&self) -> bool {
        matches!(self.format, ETagFormat::Multipart { .. })
    }

    /// Number of parts that must be retrieved to rebuild the tag.
    ///
    /// Defaults to 1 when no suffix is present.
    pub fn part_count(&self) -> u32 {
        match self.format {
            ETagFormat::Multipart { part_count, .. } => part_count,
            _ => 1,
        }
    }

    /// Re-form the tag from its decoded components.
    ///
    /// Returns `None` for unrecognized tags. For recognized tags this reproduces [`raw`](Self::raw).
    pub fn to_etag_string(&self) -> Option<String> {
        let unquoted = match &self.format {
            ETagFormat::SinglePart { digest } => digest.clone(),
            ETagFormat::Multipart { digest, part_count } => format!("{digest}-{part_count}"),
            ETagFormat::Unrecognized(_) => return None,
        };
        match self.quoted {
            true => Some(format!("\"{unquoted}\"")),
            false => Some(unquoted),
        }
    }

    /// Rebuild the entity tag the store would record for an object whose parts have the given
    /// MD5 digests, in ascending part number order.
    ///
    /// For single part tags this is the hex digest itself. For multipart tags the raw 16 byte
    /// digests are concatenated, hashed again and suffixed with the part count.
    pub fn expected(&self, part_digests: &[md5::Digest]) -> Result<String, error::Error> {
        let expected_parts = self.part_count() as usize;
        if !self.is_recognized() {
            return Err(error::invalid_input(format!(
                "cannot rebuild unrecognized ETag {}",
                self.raw
            )));
        }
        if part_digests.len() != expected_parts {
            return Err(error::invalid_input(format!(
                "ETag {} declares {} part(s) but {} digest(s) were collected",
                self.raw,
                expected_parts,
                part_digests.len()
            )));
        }

        let etag = match &self.format {
            ETagFormat::Multipart { part_count, .. } => {
                let mut ctx = md5::Context::new();
                for digest in part_digests {
                    ctx.consume(digest.0);
                }
                format!("{:x}-{}", ctx.compute(), part_count)
            }
            _ => format!("{:x}", part_digests[0]),
        };
        Ok(etag)
    }

    /// Compare the recorded tag with the one rebuilt from the collected part digests.
    pub fn verify(&self, part_digests: &[md5::Digest]) -> Verdict {
        let recorded = match &self.format {
            ETagFormat::Unrecognized(reason) => {
                return Verdict::Skipped(format!("unrecognized ETag {}: {reason}", self.raw))
            }
            ETagFormat::SinglePart { digest } => digest.clone(),
            ETagFormat::Multipart { digest, part_count } => format!("{digest}-{part_count}"),
        };

        let computed = match self.expected(part_digests) {
            Ok(computed) => computed,
            Err(err) => return Verdict::Error(err),
        };
        tracing::debug!("computed ETag {computed} vs recorded {}", self.raw);

        if computed.eq_ignore_ascii_case(&recorded) {
            Verdict::Intact
        } else {
            Verdict::Corrupted {
                recorded: self.raw.clone(),
                computed,
            }
        }
    }
}

impl fmt::Display for ETagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn decode_format(body: &str) -> ETagFormat {
    let mut pieces = body.split('-');
    let digest = pieces.next().unwrap_or_default();
    let part_count = pieces.next();
    if pieces.next().is_some() {
        return ETagFormat::Unrecognized(UnrecognizedETag::TooManySeparators);
    }
    if digest.is_empty() {
        return ETagFormat::Unrecognized(UnrecognizedETag::EmptyDigest);
    }
    if digest.len() != MD5_HEX_LEN || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return ETagFormat::Unrecognized(UnrecognizedETag::MalformedDigest);
    }

    let digest = digest.to_owned();
    match part_count {
        None => ETagFormat::SinglePart { digest },
        Some(part_count) => match parse_part_count(part_count) {
            Some(part_count) => ETagFormat::Multipart { digest, part_count },
            None => ETagFormat::Unrecognized(UnrecognizedETag::MalformedPartCount),
        },
    }
}

// canonical positive decimal only, so that re-forming the tag reproduces it
fn parse_part_count(s: &str) -> Option<u32> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|n| *n > 0)
}
