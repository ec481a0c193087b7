//! Register Map Access
//!
//! Maps a window of physical memory holding peripheral registers into the
//! process and exposes it as 32-bit words at validated offsets.
//!
//! # Module Organization
//!
//! - [`window`]: `/dev/mem` backed windows ([`DevMem`], [`Window`])
//! - [`mock`]: in-memory windows for exercising drivers without hardware
//!
//! Every live `/dev/mem` mapping is tracked process-wide. The first mapping
//! registers an exit hook that releases whatever is still mapped when the
//! process exits; a mapping is never unmapped twice.
//!
//! # Usage Example
//!
//! ```no_run
//! use sunxi_mmio::{DevMem, Mapper, Offset, RegisterMap};
//!
//! let mut window = DevMem::new().open_window(0x01C2_0800, 0x400)?;
//! let data = Offset::new(0x10).unwrap();
//! let value = window.read_word(data)?;
//! window.write_word(data, value | 1)?;
//! window.close();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod mock;
mod offset;
mod registry;
pub mod window;

pub use error::{AccessFault, MapError};
pub use offset::Offset;
pub use registry::{exit_hook_registered, live_mappings, unmap_all};
pub use window::{DEFAULT_DEVICE, DevMem, Window};

/// A mapped block of 32-bit hardware registers.
///
/// Accesses are never cached: each call reaches the backing memory.
pub trait RegisterMap {
    /// Read the word at `offset` bytes from the window base.
    fn read_word(&self, offset: Offset) -> Result<u32, AccessFault>;

    /// Write `value` to the word at `offset` bytes from the window base.
    fn write_word(&self, offset: Offset, value: u32) -> Result<(), AccessFault>;

    /// Release the mapping. Calling this more than once is a no-op.
    fn close(&mut self);

    /// Whether the window is still mapped.
    fn is_open(&self) -> bool;
}

/// Source of register windows.
pub trait Mapper {
    /// Window type handed out by this mapper.
    type Window: RegisterMap + Send + core::fmt::Debug;

    /// Map `length` bytes of physical memory starting at `physical_base`.
    ///
    /// Offsets passed to the returned window are relative to
    /// `physical_base`, whatever alignment the platform imposes on the
    /// underlying mapping.
    fn open_window(&self, physical_base: usize, length: usize) -> Result<Self::Window, MapError>;
}
