// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for asynchronous file -> data URI encoding.

use thiserror::Error;

/// Continuation invoked exactly once when encoding finishes.
pub type EncodeCallback = Box<dyn FnOnce(Result<String, EncodeError>)>;

/// Error type for image encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The file could not be read.
    #[error("read failed: {0}")]
    Read(String),
    /// The reader finished without producing a string result.
    #[error("reader produced no data URI")]
    NoResult,
}

/// Encodes a picked file into a data URI without blocking the caller.
pub trait ImageEncoder {
    /// Host file handle.
    type File;

    /// Display name of `file`.
    fn file_name(&self, file: &Self::File) -> String;

    /// Start encoding; `done` fires later, possibly after the caller returns.
    fn encode(&self, file: Self::File, done: EncodeCallback);
}
