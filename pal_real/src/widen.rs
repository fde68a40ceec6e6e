//! Path widening for the length-limited platform; a passthrough conversion on
//! the platform without a ceiling.

use pathport_base::PathportResult;
use pathport_pal::{Environment, NativePathBuf, PortablePath};

use crate::encoding;

/// The narrow platform imposes no path-length ceiling; conversion is the
/// whole job.
#[cfg(unix)]
pub fn widen_path<E: Environment>(_env: &E, path: &PortablePath) -> PathportResult<NativePathBuf> {
    encoding::encode(path.as_str())
}

/// Rewrites the path into extended-prefix form when its projected absolute
/// length would meet the ceiling, canonicalizing `.` and `..` components
/// (the extended form treats them literally). Paths that fit, that are
/// already extended, or that are drive-rooted convert as-is. Failure to query
/// the working directory or
/// to convert propagates; no partial result is returned.
#[cfg(windows)]
pub fn widen_path<E: Environment>(env: &E, path: &PortablePath) -> PathportResult<NativePathBuf> {
    use pathport_pal::{build_extended_path, is_drive_rooted, is_extended, needs_widening};
    use tracing::debug;

    let raw = path.as_str();
    if is_extended(raw) {
        return encoding::encode(raw);
    }
    // Drive-rooted paths have no extended rendering; the OS resolves the
    // drive at open time, so these convert as-is at whatever length.
    if is_drive_rooted(raw) {
        return encoding::encode(raw);
    }

    // An absolute path contributes no working-directory length.
    let cwd = if path.is_absolute() {
        None
    } else {
        Some(env.current_dir()?)
    };
    let cwd_contribution = cwd.as_ref().map_or(0, |dir| dir.len() + 1);

    if !needs_widening(raw.len(), cwd_contribution) {
        return encoding::encode(raw);
    }

    let extended = build_extended_path(raw, cwd.as_ref().map(|dir| dir.as_str()));
    debug!(extended = %extended, "rewrote path into extended form");
    encoding::encode(&extended)
}
