use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pathport_base::PathportResult;
use pathport_pal::{Environment, PortablePath};

/* # Why a mock environment instead of mutating process state?

Well-known directory resolution and path widening read environment variables
and the current working directory. Tests that called std::env::set_var would
race with concurrently running tests and leak state between them. The mock
holds fixed values per instance, so precedence rules can be verified
deterministically.
*/

/// Fixed-value Environment implementation for testing.
///
/// Stores variables in a HashMap and serves a configurable current working
/// directory, without touching real process state.
///
/// # Examples
///
/// ```
/// use pathport_pal::Environment;
/// use pathport_pal_mock::MockEnvironment;
///
/// let env = MockEnvironment::new();
/// env.set_var("XDG_CACHE_HOME", "/custom");
/// assert_eq!(env.var("XDG_CACHE_HOME").as_deref(), Some("/custom"));
/// ```
#[derive(Debug, Clone)]
pub struct MockEnvironment {
    vars: Arc<Mutex<HashMap<String, String>>>,
    current_dir: Arc<Mutex<PortablePath>>,
}

impl MockEnvironment {
    /// Create a new MockEnvironment with no variables and `/` as the
    /// current directory.
    pub fn new() -> Self {
        Self {
            vars: Arc::new(Mutex::new(HashMap::new())),
            current_dir: Arc::new(Mutex::new(PortablePath::from("/"))),
        }
    }

    /// Set a variable value.
    pub fn set_var(&self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.lock().unwrap().insert(name.into(), value.into());
    }

    /// Remove a variable.
    pub fn remove_var(&self, name: &str) {
        self.vars.lock().unwrap().remove(name);
    }

    /// Set the current working directory served to callers.
    pub fn set_current_dir(&self, path: impl Into<PortablePath>) {
        *self.current_dir.lock().unwrap() = path.into();
    }
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for MockEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .filter(|value| !value.is_empty())
    }

    fn current_dir(&self) -> PathportResult<PortablePath> {
        Ok(self.current_dir.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_is_none() {
        let env = MockEnvironment::new();
        assert_eq!(env.var("TMPDIR"), None);
    }

    #[test]
    fn test_set_and_get_variable() {
        let env = MockEnvironment::new();
        env.set_var("HOME", "/home/someone");
        assert_eq!(env.var("HOME").as_deref(), Some("/home/someone"));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let env = MockEnvironment::new();
        env.set_var("TMPDIR", "");
        assert_eq!(env.var("TMPDIR"), None);
    }

    #[test]
    fn test_remove_variable() {
        let env = MockEnvironment::new();
        env.set_var("TEMP", "/t");
        env.remove_var("TEMP");
        assert_eq!(env.var("TEMP"), None);
    }

    #[test]
    fn test_current_dir_round_trip() {
        let env = MockEnvironment::new();
        env.set_current_dir("/work/project");
        assert_eq!(env.current_dir().unwrap().as_str(), "/work/project");
    }

    #[test]
    fn test_clone_shares_state() {
        let env = MockEnvironment::new();
        let clone = env.clone();
        env.set_var("HOME", "/home/shared");
        assert_eq!(clone.var("HOME").as_deref(), Some("/home/shared"));
    }
}
