//! Process-wide bookkeeping of live mappings and the exit hook.

use std::io;
use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use spin::{Mutex, RwLock};

/// A region returned by `mmap`.
///
/// Accesses hold the read side of `mapped` for their whole duration and
/// unmapping takes the write side, so no access can overlap `munmap`.
#[derive(Debug)]
pub(crate) struct Mapping {
    addr: usize,
    len: usize,
    mapped: RwLock<bool>,
}

impl Mapping {
    pub(crate) const fn new(addr: usize, len: usize) -> Self {
        Self {
            addr,
            len,
            mapped: RwLock::new(true),
        }
    }

    pub(crate) fn is_mapped(&self) -> bool {
        *self.mapped.read()
    }

    /// Run `f` with the mapping's base address while it is guaranteed to
    /// stay mapped. Returns `None` if the region was already released.
    pub(crate) fn with_addr<T>(&self, f: impl FnOnce(usize) -> T) -> Option<T> {
        let mapped = self.mapped.read();
        mapped.then(|| f(self.addr))
    }

    /// Unmap the region. Only the first call has any effect.
    ///
    /// Returns `true` if this call performed the unmap.
    pub(crate) fn release(&self) -> bool {
        let mut mapped = self.mapped.write();
        if !*mapped {
            return false;
        }

        // SAFETY: `addr`/`len` describe a region obtained from `mmap`; the
        // write guard excludes every in-flight access and the flag makes
        // this the only unmap.
        let rc = unsafe { libc::munmap(self.addr as *mut libc::c_void, self.len) };
        if rc != 0 {
            warn!(
                "munmap of {:#x} bytes at {:#x} failed: {}",
                self.len,
                self.addr,
                io::Error::last_os_error()
            );
        }
        *mapped = false;
        true
    }
}

static LIVE: Mutex<Vec<Arc<Mapping>>> = Mutex::new(Vec::new());
static EXIT_HOOK: Once = Once::new();
static HOOK_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Start tracking `mapping`, registering the exit hook on first use.
pub(crate) fn track(mapping: Arc<Mapping>) {
    EXIT_HOOK.call_once(|| {
        // SAFETY: the hook is a plain function touching only statics.
        if unsafe { libc::atexit(release_at_exit) } != 0 {
            warn!("could not register exit hook, windows must be closed explicitly");
        } else {
            HOOK_REGISTERED.store(true, Ordering::Release);
            debug!("registered register-window exit hook");
        }
    });
    LIVE.lock().push(mapping);
}

pub(crate) fn untrack(mapping: &Arc<Mapping>) {
    LIVE.lock().retain(|live| !Arc::ptr_eq(live, mapping));
}

/// Whether the exit hook has been registered with the C runtime.
///
/// Registration happens once, on the first successful `/dev/mem` mapping.
pub fn exit_hook_registered() -> bool {
    HOOK_REGISTERED.load(Ordering::Acquire)
}

/// Number of mappings opened and not yet released.
pub fn live_mappings() -> usize {
    LIVE.lock().len()
}

/// Unmap every window still live in this process.
///
/// Windows released this way report [`AccessFault::Closed`] on later
/// accesses, and closing them afterwards is a no-op. Returns the number of
/// mappings released.
///
/// [`AccessFault::Closed`]: crate::AccessFault::Closed
pub fn unmap_all() -> usize {
    let drained = core::mem::take(&mut *LIVE.lock());
    drained.iter().filter(|mapping| mapping.release()).count()
}

extern "C" fn release_at_exit() {
    let released = unmap_all();
    if released > 0 {
        warn!("released {released} register window(s) still mapped at exit");
    }
}
