//! Re-runs this test binary as a child process that exits with a window
//! still mapped, and checks the library's exit hook released it.

use std::env;
use std::process::Command;

use sunxi_mmio::{DevMem, Mapper, Offset, RegisterMap, exit_hook_registered, live_mappings};
use tempfile::NamedTempFile;

const CHILD_ENV: &str = "SUNXI_MMIO_EXIT_CHILD";
const RELEASED: &str = "exit hook released every window";
const LEAKED: &str = "windows still mapped after exit hooks";

extern "C" fn report_after_library_hook() {
    let msg = if live_mappings() == 0 { RELEASED } else { LEAKED };
    let line = format!("{msg}\n");
    // SAFETY: writes an owned buffer to stdout; std's stdout may already be
    // torn down this late in exit.
    unsafe { libc::write(1, line.as_ptr().cast(), line.len()) };
}

fn run_child() -> ! {
    // Registered before the library's hook, so the C runtime calls it after.
    // SAFETY: plain function touching only statics.
    assert_eq!(unsafe { libc::atexit(report_after_library_hook) }, 0);
    assert!(!exit_hook_registered());

    let file = NamedTempFile::new().unwrap();
    file.as_file().set_len(0x2000).unwrap();
    let mapper = DevMem::with_path(file.path());

    let mut closed = mapper.open_window(0x800, 0x100).unwrap();
    let left_open = mapper.open_window(0x1000, 0x100).unwrap();
    left_open.write_word(Offset::new(0x4).unwrap(), 1).unwrap();
    assert!(exit_hook_registered());

    closed.close();
    assert_eq!(live_mappings(), 1);

    std::mem::forget(left_open);
    drop(file);
    std::process::exit(0);
}

#[test]
fn exit_hook_releases_windows_left_open() {
    if env::var_os(CHILD_ENV).is_some() {
        run_child();
    }

    let output = Command::new(env::current_exe().unwrap())
        .args(["--exact", "exit_hook_releases_windows_left_open", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "child failed: {output:?}");
    assert!(stdout.contains(RELEASED), "stdout: {stdout}");
    assert!(!stdout.contains(LEAKED), "stdout: {stdout}");
}
