use std::sync::Arc;

use pathport_base::PathportResult;

use crate::flags::{FileMode, OpenFlags};
use crate::handle::FileHandle;
use crate::native_path::NativePathBuf;
use crate::portable_path::PortablePath;

/// Result of opening a file for reading.
#[derive(Debug)]
pub struct OpenedFile {
    /// The open handle; the caller owns it and closes it.
    pub handle: FileHandle,
    /// The resolved real path, when requested and resolvable. Resolution is
    /// best-effort: failure leaves this `None` without failing the open.
    pub real_path: Option<PortablePath>,
}

/* # Why is the environment an injectable trait?

Environment variables and the current working directory are process-wide OS
state that this layer reads but never mutates. Hiding the reads behind a trait
lets tests substitute fixed values (MockEnvironment) instead of mutating real
process state, which would race with concurrently running tests.
*/

/// Read-only access to process-wide OS state.
pub trait Environment: std::fmt::Debug + Send + Sync + 'static {
    /// Looks up an environment variable. Empty values count as unset.
    fn var(&self, name: &str) -> Option<String>;

    /// The current working directory as a portable path.
    fn current_dir(&self) -> PathportResult<PortablePath>;
}

/* # Why is Platform a trait instead of a struct?

The two platform models (narrow byte paths + descriptors, wide paths + the
length ceiling + handles) are two incompatible implementations of one
contract. Code depends on the abstraction; the concrete variant is selected
at build time inside pathport-pal-real.
*/

/// The platform capability set: one semantic contract over both platform
/// models.
pub trait Platform: std::fmt::Debug + Send + Sync + 'static {
    /// Opens a file for shared reading: other processes may concurrently
    /// read, write, or delete it.
    ///
    /// With `want_real_path`, additionally resolves the canonical path of the
    /// opened file on a best-effort basis; resolution failure is silently
    /// ignored and the handle is still returned.
    fn open_for_read(
        &self,
        path: &PortablePath,
        want_real_path: bool,
    ) -> PathportResult<OpenedFile>;

    /// Opens or creates a file for writing.
    ///
    /// `EXCL` fails if the file exists; `APPEND` opens or creates preserving
    /// content; neither means create-or-truncate. Access is write-only unless
    /// `RW` is set. `mode` is passed through to creation on the descriptor
    /// platform and ignored on the handle platform.
    ///
    /// # Panics
    ///
    /// When `EXCL` and `APPEND` are both set. This is a precondition
    /// violation, not a runtime error, and never reaches an OS call.
    fn open_for_write(
        &self,
        path: &PortablePath,
        flags: OpenFlags,
        mode: FileMode,
    ) -> PathportResult<FileHandle>;

    /// The current working directory.
    fn current_path(&self) -> PathportResult<PortablePath>;

    /// Converts a portable path to a native path buffer, rewriting it into
    /// extended form when the platform's length ceiling requires it. A no-op
    /// conversion on the platform without a ceiling.
    fn widen_path(&self, path: &PortablePath) -> PathportResult<NativePathBuf>;

    /// The user's home directory, if it can be determined.
    fn home_directory(&self) -> Option<PortablePath>;

    /// The user's cache directory: explicit cache-home environment variable,
    /// then the platform-native query, then a home-derived fallback.
    fn user_cache_dir(&self) -> Option<PortablePath>;

    /// The system temporary directory. `erased_on_reboot` selects storage the
    /// OS clears across restarts over persistent temporary storage.
    fn system_temp_dir(&self, erased_on_reboot: bool) -> Option<PortablePath>;
}

/// Handle to a Platform implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Platform>` for cheap cloning and thread-safe
/// sharing. Can be cloned and passed around freely without lifetime concerns.
#[derive(Debug, Clone)]
pub struct PlatformHandle(Arc<dyn Platform>);

impl PlatformHandle {
    /// Create a new PlatformHandle from a Platform implementation.
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self(Arc::new(platform))
    }
}

impl std::ops::Deref for PlatformHandle {
    type Target = dyn Platform;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
