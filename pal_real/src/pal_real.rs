use pathport_base::PathportResult;
use pathport_pal::{
    Environment, FileHandle, FileMode, NativePathBuf, OpenFlags, OpenedFile, Platform,
    PortablePath,
};
use tracing::instrument;

pub mod encoding;
mod env;
mod known_dirs;
mod open;
mod widen;

#[cfg(test)]
mod pal_real_tests;

pub use env::RealEnvironment;

/* # Why is RealPlatform generic over the environment?

The platform variant is fixed at build time, but the process-wide state it
reads (environment variables, current working directory) is injectable so
tests can pin it down. Production code uses RealPlatform<RealEnvironment>;
precedence tests use RealPlatform<MockEnvironment>.
*/

/// The build-time platform variant behind the [`Platform`] contract.
///
/// One implementation compiles per platform model: narrow byte paths with
/// POSIX descriptors, or wide paths with the length ceiling and handle-based
/// I/O. All operations are single-threaded per call and own their buffers,
/// so concurrent calls from independent threads are safe.
#[derive(Debug)]
pub struct RealPlatform<E: Environment = RealEnvironment> {
    env: E,
}

impl RealPlatform<RealEnvironment> {
    pub fn new() -> Self {
        Self {
            env: RealEnvironment::new(),
        }
    }
}

impl Default for RealPlatform<RealEnvironment> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> RealPlatform<E> {
    /// Builds a platform over a specific environment source.
    pub fn with_environment(env: E) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &E {
        &self.env
    }
}

impl<E: Environment> Platform for RealPlatform<E> {
    #[instrument(skip(self), fields(path = %path))]
    fn open_for_read(
        &self,
        path: &PortablePath,
        want_real_path: bool,
    ) -> PathportResult<OpenedFile> {
        open::open_for_read(&self.env, path, want_real_path)
    }

    #[instrument(skip(self), fields(path = %path, flags = ?flags))]
    fn open_for_write(
        &self,
        path: &PortablePath,
        flags: OpenFlags,
        mode: FileMode,
    ) -> PathportResult<FileHandle> {
        open::open_for_write(&self.env, path, flags, mode)
    }

    fn current_path(&self) -> PathportResult<PortablePath> {
        self.env.current_dir()
    }

    #[instrument(skip(self), fields(path = %path))]
    fn widen_path(&self, path: &PortablePath) -> PathportResult<NativePathBuf> {
        widen::widen_path(&self.env, path)
    }

    fn home_directory(&self) -> Option<PortablePath> {
        known_dirs::home_directory(&self.env)
    }

    fn user_cache_dir(&self) -> Option<PortablePath> {
        known_dirs::user_cache_dir(&self.env)
    }

    fn system_temp_dir(&self, erased_on_reboot: bool) -> Option<PortablePath> {
        known_dirs::system_temp_dir(&self.env, erased_on_reboot)
    }
}
