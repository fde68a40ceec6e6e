//! Encoding Converter: bidirectional conversion between the portable (UTF-8)
//! encoding and the host's native path encoding.
//!
//! Both directions follow the two-pass protocol where the platform requires a
//! sizing call, and both append a NUL terminator to native buffers that is
//! never counted in the logical length. Malformed input fails the sizing call
//! under strict validation rather than being replaced silently.

#[cfg(unix)]
use std::ffi::CString;

use pathport_base::{PathportError, PathportResult};
use pathport_pal::NativePathBuf;

/// Converts a portable path string into the native byte encoding.
///
/// The narrow platform's native encoding is the portable encoding itself, so
/// this reduces to appending the terminator; an embedded NUL is the one
/// malformed input and reports as an encoding error.
#[cfg(unix)]
pub fn encode(portable: &str) -> PathportResult<NativePathBuf> {
    let c_string = CString::new(portable.as_bytes()).map_err(|err| {
        Box::new(PathportError::encoding(
            format!("embedded NUL at byte {}", err.nul_position()),
            None,
        ))
    })?;
    Ok(NativePathBuf::from_c_string(c_string))
}

/// Converts native path bytes back to portable text, validating strictly.
#[cfg(unix)]
pub fn decode(native: &[u8]) -> PathportResult<String> {
    String::from_utf8(native.to_vec()).map_err(|_| {
        Box::new(PathportError::encoding(
            "native path is not valid portable text",
            None,
        ))
    })
}

/// Converts a portable path string into the native wide encoding.
///
/// Two-pass: a sizing call computes the exact output length (failing under
/// strict validation for malformed input, carrying the platform error code),
/// then the reserved buffer is filled and NUL-terminated. A zero-length input
/// yields a zero-length output without making a sizing call.
#[cfg(windows)]
pub fn encode(portable: &str) -> PathportResult<NativePathBuf> {
    use pathport_pal::two_pass;
    use widestring::U16CString;
    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::Globalization::{CP_UTF8, MB_ERR_INVALID_CHARS, MultiByteToWideChar};

    // A zero-length input converts to a zero-length output; the sizing call
    // would report failure for it.
    if portable.is_empty() {
        return U16CString::from_vec(Vec::new())
            .map(NativePathBuf::from_u16_c_string)
            .map_err(|_| Box::new(PathportError::encoding("embedded NUL at unit 0", None)));
    }

    let bytes = portable.as_bytes();
    let wide = two_pass::<u16, Box<PathportError>>(
        || {
            let needed = unsafe {
                MultiByteToWideChar(
                    CP_UTF8,
                    MB_ERR_INVALID_CHARS,
                    bytes.as_ptr(),
                    bytes.len() as i32,
                    std::ptr::null_mut(),
                    0,
                )
            };
            if needed <= 0 {
                Err(Box::new(PathportError::encoding(
                    "portable path failed strict wide conversion",
                    Some(unsafe { GetLastError() }),
                )))
            } else {
                Ok(needed as usize)
            }
        },
        |buf| {
            let written = unsafe {
                MultiByteToWideChar(
                    CP_UTF8,
                    MB_ERR_INVALID_CHARS,
                    bytes.as_ptr(),
                    bytes.len() as i32,
                    buf.as_mut_ptr(),
                    buf.len() as i32,
                )
            };
            if written <= 0 {
                Err(Box::new(PathportError::encoding(
                    "wide conversion wrote no output",
                    Some(unsafe { GetLastError() }),
                )))
            } else {
                Ok(written as usize)
            }
        },
    )?;

    U16CString::from_vec(wide)
        .map(NativePathBuf::from_u16_c_string)
        .map_err(|err| {
            Box::new(PathportError::encoding(
                format!("embedded NUL at unit {}", err.nul_position()),
                None,
            ))
        })
}

/// Converts native wide units back to portable text, validating strictly.
#[cfg(windows)]
pub fn decode(native: &[u16]) -> PathportResult<String> {
    use windows_sys::Win32::Globalization::CP_UTF8;

    let bytes = decode_to_code_page(native, CP_UTF8)?;
    String::from_utf8(bytes).map_err(|_| {
        Box::new(PathportError::encoding(
            "narrow conversion produced invalid portable text",
            None,
        ))
    })
}

/// Converts native wide units to narrow bytes in the given target code page:
/// the portable encoding, or the legacy local code page (`CP_ACP`).
///
/// Same two-pass sizing protocol as [`encode`]. Strict validation is
/// requested where the target code page supports it.
#[cfg(windows)]
pub fn decode_to_code_page(native: &[u16], code_page: u32) -> PathportResult<Vec<u8>> {
    use pathport_pal::two_pass;
    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::Globalization::{CP_UTF8, WC_ERR_INVALID_CHARS, WideCharToMultiByte};

    if native.is_empty() {
        return Ok(Vec::new());
    }

    // WC_ERR_INVALID_CHARS is only defined for the UTF-8 target.
    let flags = if code_page == CP_UTF8 {
        WC_ERR_INVALID_CHARS
    } else {
        0
    };

    two_pass::<u8, Box<PathportError>>(
        || {
            let needed = unsafe {
                WideCharToMultiByte(
                    code_page,
                    flags,
                    native.as_ptr(),
                    native.len() as i32,
                    std::ptr::null_mut(),
                    0,
                    std::ptr::null(),
                    std::ptr::null_mut(),
                )
            };
            if needed <= 0 {
                Err(Box::new(PathportError::encoding(
                    "native path failed strict narrow conversion",
                    Some(unsafe { GetLastError() }),
                )))
            } else {
                Ok(needed as usize)
            }
        },
        |buf| {
            let written = unsafe {
                WideCharToMultiByte(
                    code_page,
                    flags,
                    native.as_ptr(),
                    native.len() as i32,
                    buf.as_mut_ptr(),
                    buf.len() as i32,
                    std::ptr::null(),
                    std::ptr::null_mut(),
                )
            };
            if written <= 0 {
                Err(Box::new(PathportError::encoding(
                    "narrow conversion wrote no output",
                    Some(unsafe { GetLastError() }),
                )))
            } else {
                Ok(written as usize)
            }
        },
    )
}
