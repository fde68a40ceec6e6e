/* # What is the platform abstraction layer?

The PAL presents a single semantic contract for file paths and file handles
over two incompatible platform models: narrow byte paths with POSIX file
descriptors on one side, wide-character paths with a MAX-length ceiling and
handle-based I/O on the other. This crate holds the abstract interface and
the platform-neutral pieces; the build-time platform variants live in
pathport-pal-real and an in-memory environment for tests lives in
pathport-pal-mock.
*/

mod extended;
mod flags;
mod handle;
mod native_path;
mod portable_path;
mod sized;
mod traits;

pub use extended::{
    EXTENDED_PREFIX, MAX_DIR_LENGTH, PATH_CEILING, UNC_EXTENDED_PREFIX, build_extended_path,
    is_drive_rooted, is_extended, is_unc, needs_widening,
};
pub use flags::{FileMode, OpenFlags};
pub use handle::FileHandle;
pub use native_path::NativePathBuf;
pub use portable_path::PortablePath;
pub use sized::two_pass;
pub use traits::{Environment, OpenedFile, Platform, PlatformHandle};
