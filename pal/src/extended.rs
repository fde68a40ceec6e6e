//! Extended-prefix path construction for the length-limited platform.
//!
//! The `\\?\` form bypasses the platform's path-length ceiling, but is
//! documented to treat `.` and `..` literally instead of resolving them, so
//! any path rewritten into this form must be canonicalized component by
//! component first. The logic is pure string work and lives here, outside the
//! platform variants, so it can be exercised with a synthetic current
//! directory on any host.

/// The platform path-length ceiling (MAX_PATH).
pub const PATH_CEILING: usize = 260;

/// Longest directory path that still leaves room for an 8.3-style short name.
pub const MAX_DIR_LENGTH: usize = PATH_CEILING - 12;

/// The reserved marker that opts a path out of the length ceiling.
pub const EXTENDED_PREFIX: &str = r"\\?\";

/// The marker form for network paths: `\\server\share\…` rewrites to
/// `\\?\UNC\server\share\…`.
pub const UNC_EXTENDED_PREFIX: &str = r"\\?\UNC\";

/// Whether the path is already in extended-prefix form.
pub fn is_extended(path: &str) -> bool {
    path.starts_with(EXTENDED_PREFIX)
}

fn is_separator(byte: u8) -> bool {
    byte == b'\\' || byte == b'/'
}

/// Whether the path is a network path (`\\server\share\…`, either separator).
pub fn is_unc(path: &str) -> bool {
    !is_extended(path)
        && matches!(path.as_bytes(), [a, b, ..] if is_separator(*a) && is_separator(*b))
}

/// Whether the path is rooted by a single separator without naming a drive or
/// server (`\foo\bar`). The extended form cannot express these: the drive is
/// only known to the OS at resolution time.
pub fn is_drive_rooted(path: &str) -> bool {
    !is_unc(path) && matches!(path.as_bytes(), [a, ..] if is_separator(*a))
}

/// Whether a path of `path_len` units needs rewriting into extended form.
///
/// `cwd_contribution` is the length the current working directory (plus one
/// separator) would add when making the path absolute; pass zero for paths
/// that are already absolute.
pub fn needs_widening(path_len: usize, cwd_contribution: usize) -> bool {
    path_len + cwd_contribution >= MAX_DIR_LENGTH
}

/// Builds a fully canonicalized extended-form path.
///
/// Prefixes the reserved marker, prepends `cwd` when the input is relative,
/// and walks the result component by component: `.` components are skipped,
/// `..` pops the previous component, everything else is appended with the
/// native separator. Network paths keep their server and share components
/// under the `UNC` marker form. Input must be relative, drive-absolute, or a
/// network path; drive-rooted input (see [`is_drive_rooted`]) has no extended
/// rendering and must be filtered out by the caller.
pub fn build_extended_path(path: &str, cwd: Option<&str>) -> String {
    let mut components: Vec<&str> = Vec::new();
    if let Some(cwd) = cwd {
        push_components(cwd, &mut components);
    }
    push_components(path, &mut components);

    let capacity = UNC_EXTENDED_PREFIX.len() + path.len() + cwd.map_or(0, str::len) + 1;
    let mut out = String::with_capacity(capacity);
    if is_unc(path) {
        out.push_str(UNC_EXTENDED_PREFIX);
    } else {
        out.push_str(EXTENDED_PREFIX);
    }
    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            out.push('\\');
        }
        out.push_str(component);
    }
    out
}

fn push_components<'a>(path: &'a str, out: &mut Vec<&'a str>) {
    for component in path.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_widening_threshold() {
        assert!(!needs_widening(MAX_DIR_LENGTH - 1, 0));
        assert!(needs_widening(MAX_DIR_LENGTH, 0));
        assert!(needs_widening(100, MAX_DIR_LENGTH - 100));
    }

    #[test]
    fn test_is_extended() {
        assert!(is_extended(r"\\?\C:\very\long"));
        assert!(!is_extended(r"C:\plain"));
        assert!(!is_extended(r"\\server\share"));
    }

    #[test]
    fn test_build_absolute_input() {
        let extended = build_extended_path(r"C:\a\b\c", None);
        assert_eq!(extended, r"\\?\C:\a\b\c");
    }

    #[test]
    fn test_build_prepends_cwd_for_relative_input() {
        let extended = build_extended_path(r"sub\file.txt", Some(r"C:\work\project"));
        assert_eq!(extended, r"\\?\C:\work\project\sub\file.txt");
    }

    #[test]
    fn test_build_skips_dot_components() {
        let extended = build_extended_path(r"a\.\b\.\c", Some(r"C:\base"));
        assert_eq!(extended, r"\\?\C:\base\a\b\c");
    }

    #[test]
    fn test_build_pops_on_dot_dot() {
        let extended = build_extended_path(r"a\b\..\c", Some(r"C:\base"));
        assert_eq!(extended, r"\\?\C:\base\a\c");
    }

    #[test]
    fn test_build_handles_mixed_separators() {
        let extended = build_extended_path("a/./b/../c", Some(r"C:\base"));
        assert_eq!(extended, r"\\?\C:\base\a\c");
    }

    #[test]
    fn test_long_relative_path_against_synthetic_cwd() {
        // A relative path plus a synthetic cwd that together cross the
        // ceiling must come out extended, absolute, and free of dot
        // components.
        let cwd = format!(r"C:\{}", "x".repeat(300));
        let relative = r"deep\.\nested\..\target.txt";
        assert!(needs_widening(relative.len(), cwd.len() + 1));

        let extended = build_extended_path(relative, Some(&cwd));
        assert!(extended.starts_with(r"\\?\C:\"));
        assert!(extended.ends_with(r"\deep\target.txt"));
        assert!(!extended.contains(r"\.\"));
        assert!(!extended.contains(r"\..\"));
    }

    #[test]
    fn test_path_classification() {
        assert!(is_unc(r"\\server\share"));
        assert!(is_unc("//server/share"));
        assert!(!is_unc(r"\\?\C:\already\extended"));
        assert!(!is_unc(r"C:\drive"));
        assert!(is_drive_rooted(r"\no\drive"));
        assert!(!is_drive_rooted(r"\\server\share"));
        assert!(!is_drive_rooted(r"relative\path"));
    }

    #[test]
    fn test_build_network_path_keeps_server_and_share() {
        let extended = build_extended_path(r"\\server\share\a\.\b", None);
        assert_eq!(extended, r"\\?\UNC\server\share\a\b");
    }

    #[test]
    fn test_long_network_path_extended_form() {
        let long = format!(r"\\server\share\{}", "x".repeat(300));
        assert!(needs_widening(long.len(), 0));

        let extended = build_extended_path(&long, None);
        assert!(extended.starts_with(r"\\?\UNC\server\share\x"));
        assert!(!extended.starts_with(r"\\?\server"));
    }

    #[test]
    fn test_dot_dot_at_root_is_ignored() {
        let extended = build_extended_path(r"..\..\a", Some(r"C:"));
        assert_eq!(extended, r"\\?\a");
    }
}
