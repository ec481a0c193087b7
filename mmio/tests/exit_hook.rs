//! Runs in its own process: `unmap_all` releases every window in the process.

use sunxi_mmio::{AccessFault, DevMem, Mapper, Offset, RegisterMap, unmap_all};
use tempfile::NamedTempFile;

#[test]
fn exit_hook_and_explicit_close_unmap_once() {
    let file = NamedTempFile::new().unwrap();
    file.as_file().set_len(0x2000).unwrap();
    let mapper = DevMem::with_path(file.path());

    let mut closed_first = mapper.open_window(0x800, 0x100).unwrap();
    let mut hooked = mapper.open_window(0x1000, 0x100).unwrap();
    hooked.write_word(Offset::new(0x4).unwrap(), 0x55).unwrap();

    closed_first.close();
    assert_eq!(unmap_all(), 1);
    assert_eq!(unmap_all(), 0);

    assert!(!hooked.is_open());
    assert_eq!(
        hooked.read_word(Offset::new(0x4).unwrap()),
        Err(AccessFault::Closed)
    );

    // Closing after the hook ran must not unmap again.
    hooked.close();
    drop(hooked);
    drop(closed_first);
    assert_eq!(unmap_all(), 0);
}
