//! Windows onto physical memory through the kernel's memory device.

use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr::{self, read_volatile, write_volatile};
use std::sync::Arc;

use log::debug;

use crate::registry::{self, Mapping};
use crate::{AccessFault, MapError, Mapper, Offset, RegisterMap};

/// Physical memory device opened by [`DevMem::new`].
pub const DEFAULT_DEVICE: &str = "/dev/mem";

/// Page size assumed when the platform will not report one.
const FALLBACK_PAGE_SIZE: usize = 4096;

/// Maps physical memory by way of a memory device file.
///
/// Opening the default device requires root (or `CAP_SYS_RAWIO`).
#[derive(Debug, Clone)]
pub struct DevMem {
    path: PathBuf,
}

impl DevMem {
    /// Map through [`DEFAULT_DEVICE`].
    pub fn new() -> Self {
        Self::with_path(DEFAULT_DEVICE)
    }

    /// Map through another device or file, e.g. `/dev/gpiomem`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Device or file this mapper opens.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DevMem {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper for DevMem {
    type Window = Window;

    fn open_window(&self, physical_base: usize, length: usize) -> Result<Window, MapError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.path)
            .map_err(|source| MapError::PermissionDenied {
                path: self.path.clone(),
                source,
            })?;

        let invalid = |reason: &str| MapError::MapFailed {
            physical_base,
            length,
            source: io::Error::new(io::ErrorKind::InvalidInput, reason.to_owned()),
        };

        if physical_base % 4 != 0 {
            return Err(invalid("physical base is not word aligned"));
        }

        let page = page_size();
        let map_base = physical_base & !(page - 1);
        let delta = physical_base - map_base;
        let map_len = delta
            .checked_add(length)
            .ok_or_else(|| invalid("window overflows the address space"))?;
        let file_offset = libc::off_t::try_from(map_base)
            .map_err(|_| invalid("physical base exceeds the file offset range"))?;

        // SAFETY: a fresh shared mapping of an open descriptor; the kernel
        // validates the range and reports failures through MAP_FAILED.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                map_len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                file_offset,
            )
        };
        if addr == libc::MAP_FAILED {
            let source = io::Error::last_os_error();
            return Err(match source.raw_os_error() {
                Some(libc::ENOMEM) => MapError::OutOfMemory { length: map_len },
                _ => MapError::MapFailed {
                    physical_base,
                    length,
                    source,
                },
            });
        }

        let mapping = Arc::new(Mapping::new(addr as usize, map_len));
        registry::track(Arc::clone(&mapping));
        debug!(
            "mapped {:#x} bytes of {} at physical {:#x}",
            length,
            self.path.display(),
            physical_base
        );

        Ok(Window {
            mapping: Some(mapping),
            delta,
            len: length,
            physical_base,
        })
    }
}

/// A live mapping of physical registers.
///
/// Offsets are relative to the physical base the window was opened at and
/// are checked against its length on every access. Dropping the window
/// unmaps it.
#[derive(Debug)]
pub struct Window {
    /// Region returned by `mmap`, `None` once closed.
    mapping: Option<Arc<Mapping>>,
    /// Distance from the page-aligned mapping start to `physical_base`.
    delta: usize,
    /// Usable length in bytes, counted from `physical_base`.
    len: usize,
    physical_base: usize,
}

impl Window {
    /// Physical address of offset zero.
    pub fn physical_base(&self) -> usize {
        self.physical_base
    }

    /// Length of the window in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window covers no registers at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run `f` on the register at `offset` while the mapping is held live.
    fn with_reg<T>(&self, offset: Offset, f: impl FnOnce(*mut u32) -> T) -> Result<T, AccessFault> {
        let mapping = self.mapping.as_ref().ok_or(AccessFault::Closed)?;
        if !offset.fits(self.len) {
            return Err(AccessFault::OutOfBounds {
                offset,
                len: self.len,
            });
        }

        let at = self.delta + offset.bytes() as usize;
        mapping
            .with_addr(|addr| f((addr + at) as *mut u32))
            .ok_or(AccessFault::Closed)
    }
}

impl RegisterMap for Window {
    fn read_word(&self, offset: Offset) -> Result<u32, AccessFault> {
        // SAFETY: `reg` is word aligned, lies inside the mapping, and the
        // mapping cannot be released while `with_reg` runs the access.
        self.with_reg(offset, |reg| unsafe { read_volatile(reg) })
    }

    fn write_word(&self, offset: Offset, value: u32) -> Result<(), AccessFault> {
        // SAFETY: as for `read_word`.
        self.with_reg(offset, |reg| unsafe { write_volatile(reg, value) })
    }

    fn close(&mut self) {
        if let Some(mapping) = self.mapping.take() {
            registry::untrack(&mapping);
            if mapping.release() {
                debug!("unmapped window at physical {:#x}", self.physical_base);
            }
        }
    }

    fn is_open(&self) -> bool {
        self.mapping.as_ref().is_some_and(|mapping| mapping.is_mapped())
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.close();
    }
}

fn page_size() -> usize {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    usize::try_from(size)
        .ok()
        .filter(|size| size.is_power_of_two())
        .unwrap_or(FALLBACK_PAGE_SIZE)
}
