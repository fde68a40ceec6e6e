bitflags::bitflags! {
    /// Options for [`Platform::open_for_write`](crate::Platform::open_for_write).
    ///
    /// `EXCL` and `APPEND` are mutually exclusive: requesting both is a
    /// programming error and aborts before any OS call is made.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// Fail if the file already exists.
        const EXCL = 1 << 0;
        /// Open or create preserving content; writes land at end-of-file.
        const APPEND = 1 << 1;
        /// Platform line-ending translation (no effect on the narrow platform).
        const TEXT = 1 << 2;
        /// Open for read+write instead of write-only.
        const RW = 1 << 3;
    }
}

/// Platform-native permission value, passed through unmodified on creation.
/// Ignored by the wide platform's creation call, where file security is
/// governed separately.
pub type FileMode = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_compose() {
        let flags = OpenFlags::APPEND | OpenFlags::RW;
        assert!(flags.contains(OpenFlags::APPEND));
        assert!(flags.contains(OpenFlags::RW));
        assert!(!flags.contains(OpenFlags::EXCL));
    }

    #[test]
    fn test_flags_empty_by_default() {
        assert!(OpenFlags::empty().is_empty());
    }
}
