//! File open primitives: portable path + creation flags mapped onto native
//! handle/descriptor acquisition.

use pathport_base::{PathportError, PathportResult};
use pathport_pal::{
    Environment, FileHandle, FileMode, OpenFlags, OpenedFile, PortablePath,
};
use tracing::debug;

use crate::widen;

#[cfg(unix)]
use crate::encoding;
#[cfg(unix)]
use pathport_pal::NativePathBuf;
#[cfg(unix)]
use std::os::fd::{FromRawFd, OwnedFd};

fn precondition(flags: OpenFlags) {
    // Programming error, not a runtime error: abort before any OS call.
    assert!(
        !(flags.contains(OpenFlags::EXCL) && flags.contains(OpenFlags::APPEND)),
        "EXCL and APPEND are mutually exclusive open flags"
    );
}

/// Opens `path` for shared reading; other processes may concurrently read,
/// write, or delete the file. Interrupted opens are retried until the OS
/// reports success or a non-retryable failure.
#[cfg(unix)]
pub fn open_for_read<E: Environment>(
    env: &E,
    path: &PortablePath,
    want_real_path: bool,
) -> PathportResult<OpenedFile> {
    let native = widen::widen_path(env, path)?;
    let fd = retry_open(&native, libc::O_RDONLY | libc::O_CLOEXEC, 0)
        .map_err(|source| Box::new(PathportError::io(path.as_path(), source)))?;
    // TODO: map EISDIR to a dedicated is-a-directory category once callers
    // can act on it; today it reports as the generic mapped OS error.
    let handle = FileHandle::from_owned_fd(fd);

    let real_path = if want_real_path {
        // Best effort: failure here never fails the open itself.
        resolve_real_path(&handle, path)
    } else {
        None
    };
    debug!(real_path = ?real_path, "opened file for reading");
    Ok(OpenedFile { handle, real_path })
}

/// Opens or creates `path` for writing according to `flags`, passing `mode`
/// through to creation unmodified.
#[cfg(unix)]
pub fn open_for_write<E: Environment>(
    env: &E,
    path: &PortablePath,
    flags: OpenFlags,
    mode: FileMode,
) -> PathportResult<FileHandle> {
    precondition(flags);
    let native = widen::widen_path(env, path)?;

    let mut oflags = libc::O_CREAT | libc::O_CLOEXEC;
    if flags.contains(OpenFlags::EXCL) {
        oflags |= libc::O_EXCL;
    } else if flags.contains(OpenFlags::APPEND) {
        oflags |= libc::O_APPEND;
    } else {
        oflags |= libc::O_TRUNC;
    }
    oflags |= if flags.contains(OpenFlags::RW) {
        libc::O_RDWR
    } else {
        libc::O_WRONLY
    };
    // TEXT has no effect here: the narrow platform performs no line-ending
    // translation.

    let fd = retry_open(&native, oflags, mode as libc::mode_t)
        .map_err(|source| Box::new(PathportError::io(path.as_path(), source)))?;
    debug!("opened file for writing");
    Ok(FileHandle::from_owned_fd(fd))
}

/// Retries the open while the failure reason is "interrupted"; any other
/// errno maps immediately.
#[cfg(unix)]
fn retry_open(
    native: &NativePathBuf,
    oflags: libc::c_int,
    mode: libc::mode_t,
) -> std::io::Result<OwnedFd> {
    loop {
        let fd = unsafe { libc::open(native.as_ptr(), oflags, mode as libc::c_uint) };
        if fd >= 0 {
            return Ok(unsafe { OwnedFd::from_raw_fd(fd) });
        }
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::EINTR) {
            continue;
        }
        return Err(err);
    }
}

#[cfg(unix)]
fn resolve_real_path(handle: &FileHandle, path: &PortablePath) -> Option<PortablePath> {
    #[cfg(target_os = "linux")]
    {
        let link = format!("/proc/self/fd/{}", handle.as_raw_fd());
        if let Some(resolved) = std::fs::read_link(link).ok().and_then(to_portable) {
            return Some(resolved);
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = handle;
    std::fs::canonicalize(path.as_path()).ok().and_then(to_portable)
}

#[cfg(unix)]
fn to_portable(path: std::path::PathBuf) -> Option<PortablePath> {
    use std::os::unix::ffi::OsStrExt;
    encoding::decode(path.as_os_str().as_bytes())
        .ok()
        .map(PortablePath::from)
}

#[cfg(windows)]
pub fn open_for_read<E: Environment>(
    env: &E,
    path: &PortablePath,
    want_real_path: bool,
) -> PathportResult<OpenedFile> {
    use windows_sys::Win32::Foundation::GENERIC_READ;
    use windows_sys::Win32::Storage::FileSystem::OPEN_EXISTING;

    let native = widen::widen_path(env, path)?;
    let raw = create_file(&native, GENERIC_READ, OPEN_EXISTING, path)?;
    let real_path = if want_real_path {
        // Best effort: failure here never fails the open itself.
        real_path_from_handle(raw)
    } else {
        None
    };
    let handle = wrap_descriptor(raw, libc::O_RDONLY, path)?;
    debug!(real_path = ?real_path, "opened file for reading");
    Ok(OpenedFile { handle, real_path })
}

#[cfg(windows)]
pub fn open_for_write<E: Environment>(
    env: &E,
    path: &PortablePath,
    flags: OpenFlags,
    _mode: FileMode,
) -> PathportResult<FileHandle> {
    use windows_sys::Win32::Foundation::{GENERIC_READ, GENERIC_WRITE};
    use windows_sys::Win32::Storage::FileSystem::{CREATE_ALWAYS, CREATE_NEW, OPEN_ALWAYS};

    precondition(flags);
    // The permission mode is ignored here: file security on the handle
    // platform is governed separately from the creation call.
    let native = widen::widen_path(env, path)?;

    let disposition = if flags.contains(OpenFlags::EXCL) {
        CREATE_NEW
    } else if flags.contains(OpenFlags::APPEND) {
        OPEN_ALWAYS
    } else {
        CREATE_ALWAYS
    };
    let access = if flags.contains(OpenFlags::RW) {
        GENERIC_WRITE | GENERIC_READ
    } else {
        GENERIC_WRITE
    };

    let raw = create_file(&native, access, disposition, path)?;

    let mut crt_flags = 0;
    if flags.contains(OpenFlags::APPEND) {
        crt_flags |= libc::O_APPEND;
    }
    if flags.contains(OpenFlags::TEXT) {
        crt_flags |= libc::O_TEXT;
    }
    let handle = wrap_descriptor(raw, crt_flags, path)?;
    debug!("opened file for writing");
    Ok(handle)
}

/// Acquires a native handle with full sharing (concurrent read, write and
/// delete by other processes).
#[cfg(windows)]
fn create_file(
    native: &pathport_pal::NativePathBuf,
    access: u32,
    disposition: u32,
    path: &PortablePath,
) -> PathportResult<windows_sys::Win32::Foundation::HANDLE> {
    use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
    use windows_sys::Win32::Storage::FileSystem::{
        CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE,
    };

    let raw = unsafe {
        CreateFileW(
            native.as_ptr(),
            access,
            FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
            std::ptr::null(),
            disposition,
            FILE_ATTRIBUTE_NORMAL,
            std::ptr::null_mut(),
        )
    };
    if raw == INVALID_HANDLE_VALUE {
        return Err(Box::new(PathportError::io(
            path.as_path(),
            std::io::Error::last_os_error(),
        )));
    }
    Ok(raw)
}

/// Wraps a native handle as a CRT descriptor. On failure the handle has no
/// owner yet, so it is released here before the error is reported.
#[cfg(windows)]
fn wrap_descriptor(
    raw: windows_sys::Win32::Foundation::HANDLE,
    crt_flags: libc::c_int,
    path: &PortablePath,
) -> PathportResult<FileHandle> {
    use windows_sys::Win32::Foundation::{CloseHandle, ERROR_INVALID_HANDLE};

    let fd = unsafe { libc::open_osfhandle(raw as libc::intptr_t, crt_flags) };
    if fd < 0 {
        unsafe {
            CloseHandle(raw);
        }
        // Raw codes on this platform are in the Win32 error domain, not errno.
        return Err(Box::new(PathportError::io(
            path.as_path(),
            std::io::Error::from_raw_os_error(ERROR_INVALID_HANDLE as i32),
        )));
    }
    Ok(FileHandle::from_descriptor(fd))
}

/// Queries the OS for the final path of an open handle and converts it back
/// to portable text, stripping the extended marker the query reports and
/// restoring the `\\` form for network paths.
#[cfg(windows)]
fn real_path_from_handle(raw: windows_sys::Win32::Foundation::HANDLE) -> Option<PortablePath> {
    use pathport_pal::{EXTENDED_PREFIX, UNC_EXTENDED_PREFIX, two_pass};
    use windows_sys::Win32::Storage::FileSystem::{
        FILE_NAME_NORMALIZED, GetFinalPathNameByHandleW,
    };

    let wide = two_pass::<u16, ()>(
        || {
            let required = unsafe {
                GetFinalPathNameByHandleW(raw, std::ptr::null_mut(), 0, FILE_NAME_NORMALIZED)
            };
            if required == 0 { Err(()) } else { Ok(required as usize) }
        },
        |buf| {
            // On success this is the length written (no terminator); when the
            // buffer is too small it is the required size, which the helper
            // grows to and retries.
            let written = unsafe {
                GetFinalPathNameByHandleW(raw, buf.as_mut_ptr(), buf.len() as u32, FILE_NAME_NORMALIZED)
            };
            if written == 0 { Err(()) } else { Ok(written as usize) }
        },
    )
    .ok()?;

    let portable = crate::encoding::decode(&wide).ok()?;
    let stripped = if let Some(rest) = portable.strip_prefix(UNC_EXTENDED_PREFIX) {
        format!(r"\\{rest}")
    } else if let Some(rest) = portable.strip_prefix(EXTENDED_PREFIX) {
        rest.to_owned()
    } else {
        portable
    };
    Some(PortablePath::from(stripped))
}
