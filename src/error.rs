/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! The closed error taxonomy from §7. `PreconditionViolation` is a
//! programmer error and is raised as a panic at the call site (mirroring
//! `uucore`'s own contract-checking helpers) rather than threaded through
//! `Result`; every other variant is surfaced to callers of the factor-table
//! I/O paths (C10), which are the only fallible operations in the engine.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("failed to open factor table at {path}: {source}")]
    FileOpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read factor table at {path}: {source}")]
    FileReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write factor table at {path}: {source}")]
    FileWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "factor table at {path} has mismatched header: expected format_id={expected_format_id} \
         entry_count={expected_entry_count} payload_bytes={expected_payload_bytes}, found \
         format_id={found_format_id} entry_count={found_entry_count} payload_bytes={found_payload_bytes}"
    )]
    FileFormatMismatch {
        path: PathBuf,
        expected_format_id: u32,
        expected_entry_count: u32,
        expected_payload_bytes: u32,
        found_format_id: u32,
        found_entry_count: u32,
        found_payload_bytes: u32,
    },

    #[error("factor table payload of {byte_count} bytes exceeds the 32-bit length this format can encode")]
    IntegerOverflow { byte_count: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
