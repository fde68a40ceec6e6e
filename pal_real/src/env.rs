use pathport_base::{PathportError, PathportResult};
use pathport_pal::{Environment, PortablePath};

/// Environment source backed by real process state. Reads only; this layer
/// never mutates environment variables or the working directory.
#[derive(Debug, Clone, Default)]
pub struct RealEnvironment;

impl RealEnvironment {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl Environment for RealEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }

    fn current_dir(&self) -> PathportResult<PortablePath> {
        current_dir_portable()
    }
}

#[cfg(windows)]
impl Environment for RealEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        use pathport_pal::two_pass;
        use widestring::U16CString;
        use windows_sys::Win32::System::Environment::GetEnvironmentVariableW;

        let wide_name = U16CString::from_str(name).ok()?;
        let value = two_pass::<u16, ()>(
            || {
                // Sizing call: required length including the terminator.
                let required =
                    unsafe { GetEnvironmentVariableW(wide_name.as_ptr(), std::ptr::null_mut(), 0) };
                if required == 0 { Err(()) } else { Ok(required as usize) }
            },
            |buf| {
                // On success this is the length written (no terminator); when
                // the value grew past the buffer it is the new required size,
                // which the helper grows to and retries.
                let written = unsafe {
                    GetEnvironmentVariableW(wide_name.as_ptr(), buf.as_mut_ptr(), buf.len() as u32)
                };
                if written == 0 { Err(()) } else { Ok(written as usize) }
            },
        )
        .ok()?;
        String::from_utf16(&value).ok().filter(|v| !v.is_empty())
    }

    fn current_dir(&self) -> PathportResult<PortablePath> {
        current_dir_portable()
    }
}

fn current_dir_portable() -> PathportResult<PortablePath> {
    let cwd = std::env::current_dir()
        .map_err(|source| Box::new(PathportError::io(std::path::PathBuf::from("."), source)))?;
    cwd.into_os_string().into_string().map(PortablePath::from).map_err(|_| {
        Box::new(PathportError::encoding(
            "current directory is not representable in the portable encoding",
            None,
        ))
    })
}
