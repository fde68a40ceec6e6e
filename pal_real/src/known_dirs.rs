//! Well-known directory resolution: home, user cache, system temporary.
//!
//! Each lookup is independent and reports failure through its return value
//! rather than an error: these are layered best-effort queries
//! (environment variable, then platform query, then compiled-in default).

use pathport_pal::{Environment, PortablePath};
use tracing::debug;

/// Temporary-directory variables on the descriptor platform, in precedence
/// order.
#[cfg(unix)]
const TEMP_VARS: [&str; 4] = ["TMPDIR", "TMP", "TEMP", "TEMPDIR"];

/// Temporary-directory variables on the handle platform, in precedence order.
#[cfg(windows)]
const TEMP_VARS: [&str; 3] = ["TMP", "TEMP", "USERPROFILE"];

/// The user's home directory. `$HOME` is authoritative and the sole source
/// on the descriptor platform.
#[cfg(unix)]
pub fn home_directory<E: Environment>(env: &E) -> Option<PortablePath> {
    env.var("HOME").map(PortablePath::from)
}

/// The user's home directory, from the platform's user-profile query.
#[cfg(windows)]
pub fn home_directory<E: Environment>(_env: &E) -> Option<PortablePath> {
    use windows_sys::Win32::UI::Shell::FOLDERID_Profile;

    known_folder(&FOLDERID_Profile)
}

/// The user's cache directory: explicit cache-home variable first, then the
/// platform-native cache-folder query, then a home-derived fallback. First
/// success wins.
pub fn user_cache_dir<E: Environment>(env: &E) -> Option<PortablePath> {
    if let Some(cache_home) = env.var("XDG_CACHE_HOME") {
        debug!(dir = %cache_home, "cache directory from cache-home variable");
        return Some(PortablePath::from(cache_home));
    }

    #[cfg(target_os = "macos")]
    if let Some(dir) = confstr_dir(libc::_CS_DARWIN_USER_CACHE_DIR) {
        return Some(dir);
    }

    #[cfg(windows)]
    {
        use windows_sys::Win32::UI::Shell::FOLDERID_LocalAppData;
        known_folder(&FOLDERID_LocalAppData)
    }

    #[cfg(unix)]
    {
        home_directory(env).map(|mut home| {
            home.push_str("/.cache");
            home
        })
    }
}

/// The system temporary directory.
///
/// When erased-on-reboot storage is requested, the temporary-directory
/// variables are consulted first in their fixed order, then the platform
/// query, then the compiled-in default, which distinguishes erased storage
/// from persistent storage.
#[cfg(unix)]
pub fn system_temp_dir<E: Environment>(env: &E, erased_on_reboot: bool) -> Option<PortablePath> {
    if erased_on_reboot {
        for name in TEMP_VARS {
            if let Some(value) = env.var(name) {
                debug!(var = name, dir = %value, "temp directory from environment");
                return Some(PortablePath::from(value));
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        let name = if erased_on_reboot {
            libc::_CS_DARWIN_USER_TEMP_DIR
        } else {
            libc::_CS_DARWIN_USER_CACHE_DIR
        };
        if let Some(dir) = confstr_dir(name) {
            return Some(dir);
        }
    }

    Some(PortablePath::from(if erased_on_reboot {
        "/tmp"
    } else {
        "/var/tmp"
    }))
}

/// The system temporary directory on the handle platform. The variables are
/// consulted in their fixed order regardless of the erased-on-reboot intent;
/// separators are normalized to native form on success.
#[cfg(windows)]
pub fn system_temp_dir<E: Environment>(env: &E, _erased_on_reboot: bool) -> Option<PortablePath> {
    for name in TEMP_VARS {
        if let Some(value) = env.var(name) {
            debug!(var = name, dir = %value, "temp directory from environment");
            return Some(PortablePath::from(value.replace('/', "\\")));
        }
    }
    Some(PortablePath::from("C:\\Temp"))
}

/// Reads a directory path from the platform configuration query, trimming
/// the reported terminator.
#[cfg(target_os = "macos")]
fn confstr_dir(name: libc::c_int) -> Option<PortablePath> {
    let mut buf = vec![0u8; libc::PATH_MAX as usize];
    let len = unsafe { libc::confstr(name, buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if len == 0 || len > buf.len() {
        return None;
    }
    buf.truncate(len - 1);
    String::from_utf8(buf).ok().map(PortablePath::from)
}

/// Queries a known folder and converts the result to portable text. The
/// returned buffer is owned by the shell allocator and freed here.
#[cfg(windows)]
fn known_folder(folder_id: &windows_sys::core::GUID) -> Option<PortablePath> {
    use windows_sys::Win32::System::Com::CoTaskMemFree;
    use windows_sys::Win32::UI::Shell::SHGetKnownFolderPath;

    let mut raw: windows_sys::core::PWSTR = std::ptr::null_mut();
    let hr = unsafe { SHGetKnownFolderPath(folder_id, 0, std::ptr::null_mut(), &mut raw) };
    if hr < 0 || raw.is_null() {
        return None;
    }
    let wide = unsafe { widestring::U16CStr::from_ptr_str(raw) }.as_slice().to_vec();
    unsafe {
        CoTaskMemFree(raw as *const core::ffi::c_void);
    }
    crate::encoding::decode(&wide).ok().map(PortablePath::from)
}
