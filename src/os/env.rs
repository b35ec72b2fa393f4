use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use thiserror::Error;

/// Read-only snapshot of environmental variables, taken from
/// [`std::env::vars_os`] or supplied by the caller.
///
/// Lookups that consume an [`Env`] never touch the real process environment,
/// so tests can substitute variables without mutating global state.
#[derive(Debug, Clone)]
pub struct Env {
    vars: HashMap<OsString, OsString>,
}

/// Errors encountered when getting environmental variable.
#[derive(Debug, Clone, Error)]
pub enum EnvStrError {
    /// This variant indicates, that variable `Missing.0` is missing.
    #[error("there is no environmental variable `${0:?}`")]
    Missing(OsString),

    /// This variant indicates, that variable `$NonUTF8.0` is not an UTF-8 string.
    #[error("environmental variable `${0:?}` is not an UTF-8 string")]
    NonUTF8(OsString),
}

impl Env {
    /// Create new [`Env`] from the current process environment.
    pub fn new() -> Self {
        Self::new_from(std::env::vars_os().collect())
    }

    /// Create new [`Env`] using `vars` as existing environmental variables.
    pub fn new_from(vars: HashMap<OsString, OsString>) -> Self {
        Self { vars }
    }

    /// Reload environmental variables from [`std::env::vars_os`].
    pub fn reload(&mut self) {
        self.vars = std::env::vars_os().collect();
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `Option<&OsStr>`. `None` variant indicates missing key, `Some`: existing key.
    ///
    /// # Examples
    /// ```rust
    /// use basedir::os::env::Env;
    ///
    /// let env = Env::new();
    /// println!("$FOO = {:?}", env.get_os("FOO"));
    /// ```
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(|value| value.as_ref())
    }

    /// Get environmental variable pointed by `key` and convert it to UTF-8.
    ///
    /// # Returns
    /// `Result<&str, EnvStrError>`. `Ok` variant indicates existing UTF-8 variable, `Err`
    /// indicates a missing or non-UTF-8 one. See [`EnvStrError`] for details.
    ///
    /// # Examples
    /// ```rust
    /// use basedir::os::env::Env;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let env = Env::new();
    /// let _path = env.get("PATH")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, key: impl AsRef<OsStr>) -> Result<&str, EnvStrError> {
        let key = key.as_ref();
        self.get_os(key)
            .ok_or_else(|| EnvStrError::Missing(key.to_os_string()))?
            .to_str()
            .ok_or_else(|| EnvStrError::NonUTF8(key.to_os_string()))
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok, assert_some};

    #[test]
    fn present_variable_is_found() {
        let env: Env = [("ANSWER", "42")].into_iter().collect();
        assert_some!(env.get_os("ANSWER"));
        assert_eq!(assert_ok!(env.get("ANSWER")), "42");
    }

    #[test]
    fn missing_variable_is_reported() {
        let env = Env::new_from(HashMap::new());
        assert!(env.get_os("NOPE").is_none());
        let err = assert_err!(env.get("NOPE"));
        assert!(matches!(err, EnvStrError::Missing(_)));
    }

    #[test]
    fn non_utf8_variable_is_reported() {
        use std::os::unix::ffi::OsStringExt;
        let value = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        let env: Env = [(OsString::from("BROKEN"), value)].into_iter().collect();
        assert_some!(env.get_os("BROKEN"));
        let err = assert_err!(env.get("BROKEN"));
        assert!(matches!(err, EnvStrError::NonUTF8(_)));
    }

    #[test]
    fn snapshot_is_isolated_from_process_environment() {
        let env: Env = [("PATH", "/overridden")].into_iter().collect();
        assert_eq!(assert_ok!(env.get("PATH")), "/overridden");
    }
}
