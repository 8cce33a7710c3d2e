//! Thin wrappers over the termios and modem ioctls used by [`LineManager`].
//!
//! [`LineManager`]: crate::line::LineManager

use std::io;
use std::os::fd::RawFd;

use crate::config::BaudRate;

pub(crate) fn get_attrs(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is a plain C struct of integers and arrays; all-zero is a valid value.
    let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
    // SAFETY: `attrs` is a valid writable termios and `fd` is an open descriptor.
    let rc = unsafe { libc::tcgetattr(fd, &mut attrs) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(attrs)
}

pub(crate) fn set_attrs(fd: RawFd, attrs: &libc::termios) -> io::Result<()> {
    // SAFETY: `attrs` points to a fully initialised termios and `fd` is an open descriptor.
    let rc = unsafe { libc::tcsetattr(fd, libc::TCSANOW, attrs) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Raw 8N1 settings: receiver enabled, modem lines ignored, parity errors
/// ignored, no output processing, non-canonical without echo, and reads that
/// block until at least one byte arrives.
pub(crate) fn raw_attrs(baud: BaudRate) -> io::Result<libc::termios> {
    // SAFETY: see `get_attrs`.
    let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
    attrs.c_cflag = libc::CS8 | libc::CLOCAL | libc::CREAD;
    attrs.c_iflag = libc::IGNPAR;
    attrs.c_oflag = 0;
    attrs.c_lflag = 0;
    attrs.c_cc[libc::VTIME] = 0;
    attrs.c_cc[libc::VMIN] = 1;

    let speed = baud.as_speed();
    // SAFETY: `attrs` is a valid writable termios.
    if unsafe { libc::cfsetispeed(&mut attrs, speed) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: `attrs` is a valid writable termios.
    if unsafe { libc::cfsetospeed(&mut attrs, speed) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(attrs)
}

pub(crate) fn flush(fd: RawFd) -> io::Result<()> {
    // SAFETY: `fd` is an open descriptor; tcflush takes no pointers.
    if unsafe { libc::tcflush(fd, libc::TCIOFLUSH) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub(crate) fn modem_bits(fd: RawFd) -> io::Result<libc::c_int> {
    let mut bits: libc::c_int = 0;
    // SAFETY: TIOCMGET writes a single c_int through the provided pointer.
    let rc = unsafe { libc::ioctl(fd, libc::TIOCMGET, &mut bits as *mut libc::c_int) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(bits)
}
