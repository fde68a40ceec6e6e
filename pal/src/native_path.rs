//! Native path buffers: whatever width and encoding the host OS's file APIs
//! require, always NUL-terminated for handoff, with the terminator excluded
//! from the logical length seen by callers.

#[cfg(unix)]
use std::ffi::{CStr, CString, c_char};

#[cfg(windows)]
use widestring::{U16CStr, U16CString};

/// A NUL-terminated native path ready for an OS call.
///
/// On the narrow platform this is a byte path; on the wide platform a
/// UTF-16 path. `len()` never counts the terminator.
#[cfg(unix)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePathBuf {
    inner: CString,
}

#[cfg(unix)]
impl NativePathBuf {
    pub fn from_c_string(inner: CString) -> Self {
        Self { inner }
    }

    /// Logical length in bytes, excluding the NUL terminator.
    pub fn len(&self) -> usize {
        self.inner.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_c_str(&self) -> &CStr {
        self.inner.as_c_str()
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.inner.as_ptr()
    }

    /// The path bytes without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

#[cfg(windows)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePathBuf {
    inner: U16CString,
}

#[cfg(windows)]
impl NativePathBuf {
    pub fn from_u16_c_string(inner: U16CString) -> Self {
        Self { inner }
    }

    /// Logical length in UTF-16 code units, excluding the NUL terminator.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_u16_c_str(&self) -> &U16CStr {
        self.inner.as_ucstr()
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.inner.as_ptr()
    }

    /// The path units without the terminator.
    pub fn as_slice(&self) -> &[u16] {
        self.inner.as_slice()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_len_excludes_terminator() {
        let native = NativePathBuf::from_c_string(CString::new("/tmp/x").unwrap());
        assert_eq!(native.len(), 6);
        assert_eq!(native.as_c_str().to_bytes_with_nul().len(), 7);
    }

    #[test]
    fn test_empty_path_still_terminated() {
        let native = NativePathBuf::from_c_string(CString::new("").unwrap());
        assert!(native.is_empty());
        assert_eq!(native.as_c_str().to_bytes_with_nul(), &[0]);
    }
}
