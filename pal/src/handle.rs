//! Opaque owned file handles. Ownership is exclusive to whoever holds the
//! value; the handle is closed on drop and never by the component that
//! returned it.

#[cfg(unix)]
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

/// An open file on the descriptor-based platform.
#[cfg(unix)]
#[derive(Debug)]
pub struct FileHandle {
    fd: OwnedFd,
}

#[cfg(unix)]
impl FileHandle {
    pub fn from_owned_fd(fd: OwnedFd) -> Self {
        Self { fd }
    }

    pub fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }

    /// Converts into a std File for buffered I/O. The File takes over
    /// ownership and closes the descriptor on drop.
    pub fn into_file(self) -> std::fs::File {
        std::fs::File::from(self.fd)
    }
}

/// An open file on the handle-based platform.
///
/// Holds the CRT descriptor produced by wrapping the native handle; the
/// descriptor owns the handle, so closing the descriptor releases both.
#[cfg(windows)]
#[derive(Debug)]
pub struct FileHandle {
    fd: libc::c_int,
}

#[cfg(windows)]
impl FileHandle {
    /// Takes ownership of a CRT descriptor that already owns its native
    /// handle.
    pub fn from_descriptor(fd: libc::c_int) -> Self {
        Self { fd }
    }

    pub fn as_descriptor(&self) -> libc::c_int {
        self.fd
    }

    /// Releases ownership without closing; the caller becomes responsible
    /// for closing the descriptor.
    pub fn into_raw_descriptor(self) -> libc::c_int {
        let fd = self.fd;
        std::mem::forget(self);
        fd
    }
}

#[cfg(windows)]
impl Drop for FileHandle {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}
