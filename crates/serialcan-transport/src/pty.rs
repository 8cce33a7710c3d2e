//! Pseudo-terminal pairs for exercising real termios behaviour in tests.

use std::ffi::CStr;
use std::fs::File;
use std::os::fd::FromRawFd;
use std::path::PathBuf;

pub(crate) struct Pty {
    /// Controller side; kept open so the line and its settings survive.
    pub master: File,
    /// Path of the device side, opened by the code under test.
    pub slave_path: PathBuf,
}

pub(crate) fn open_pty() -> Pty {
    // SAFETY: plain libc calls on a descriptor we own; each result is checked.
    unsafe {
        let fd = libc::posix_openpt(libc::O_RDWR | libc::O_NOCTTY);
        assert!(fd >= 0, "posix_openpt failed");
        assert_eq!(libc::grantpt(fd), 0, "grantpt failed");
        assert_eq!(libc::unlockpt(fd), 0, "unlockpt failed");
        let master = File::from_raw_fd(fd);

        let mut name = [0 as libc::c_char; 128];
        assert_eq!(
            libc::ptsname_r(fd, name.as_mut_ptr(), name.len()),
            0,
            "ptsname_r failed"
        );
        let slave_path = PathBuf::from(
            CStr::from_ptr(name.as_ptr())
                .to_str()
                .expect("pty name is utf-8"),
        );

        Pty { master, slave_path }
    }
}
