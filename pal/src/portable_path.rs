use std::path::Path;

/* # Why a newtype over String for PortablePath?

Callers hand the toolchain paths in one interchange encoding (UTF-8)
regardless of host platform. Wrapping the string keeps the boundary explicit:
everything inside the PAL converts to the native encoding exactly once, at the
OS-call boundary, and hands portable text back out. The native side has a
platform length ceiling; this side deliberately has none.
*/

/// A path string in the toolchain's portable (UTF-8) encoding.
///
/// May be relative or absolute. Growth is append-only; there is no component
/// grammar here (splitting, extension handling) — that belongs to callers.
/// Embedded NUL bytes are not rejected on construction; they surface as an
/// encoding error when the path is converted for an OS call.
///
/// # Examples
///
/// ```
/// use pathport_pal::PortablePath;
///
/// let path = PortablePath::from("/home/user/project");
/// assert!(path.is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortablePath(String);

impl PortablePath {
    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes of the portable encoding.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends raw text to the path. Append-only growth; no separator logic.
    pub fn push_str(&mut self, s: &str) {
        self.0.push_str(s);
    }

    /// Whether the path is absolute on either platform model:
    /// a leading separator, or a drive-letter prefix.
    pub fn is_absolute(&self) -> bool {
        if self.0.starts_with('/') || self.0.starts_with('\\') {
            return true;
        }
        let mut chars = self.0.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(drive), Some(':')) if drive.is_ascii_alphabetic()
        )
    }

    /// Converts to a std Path for interop with std::fs operations.
    pub fn as_path(&self) -> &Path {
        Path::new(self.0.as_str())
    }

    /// Consumes the path and returns the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for PortablePath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PortablePath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<PortablePath> for String {
    fn from(p: PortablePath) -> Self {
        p.0
    }
}

impl AsRef<str> for PortablePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PortablePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
