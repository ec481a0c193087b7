use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::Offset;

/// Failure to establish a register window.
///
/// The variants are mutually exclusive and are checked in declaration order:
/// the memory device is opened first, then the mapping is created.
#[derive(Debug, Error)]
pub enum MapError {
    /// The memory device could not be opened.
    #[error("no access to `{}`, try running as root", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The kernel had no memory for the mapping.
    #[error("out of memory mapping {length:#x} bytes")]
    OutOfMemory { length: usize },
    /// The range could not be mapped (bad address, unsupported platform).
    #[error("cannot map {length:#x} bytes at physical address {physical_base:#x}")]
    MapFailed {
        physical_base: usize,
        length: usize,
        #[source]
        source: io::Error,
    },
}

/// Failure of a single register access.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum AccessFault {
    /// The word at `offset` does not fit inside the window.
    #[error("offset {offset} lies outside the {len:#x}-byte window")]
    OutOfBounds { offset: Offset, len: usize },
    /// The window was closed or released by the exit hook.
    #[error("register window is closed")]
    Closed,
    /// The hardware reported an error for the access.
    #[error("bus error at offset {0}")]
    Bus(Offset),
}
