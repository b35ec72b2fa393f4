//! XDG Base Directory Specification lookups.
//!
//! Resolves the base directories defined by the XDG Base Directory spec from
//! an [`Env`] snapshot. Where the spec prescribes a home-relative fallback,
//! the home directory comes from a [`UserLookup`], resolved fresh on each
//! call.
//!
//! ```rust,no_run
//! # use basedir::os::env::Env;
//! # use basedir::os::user::AccountDatabase;
//! # use basedir::xdg;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = Env::new();
//!
//! let config = xdg::config_home(&env, &AccountDatabase)?;
//! let search_path = xdg::config_dirs(&env);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::os::env::Env;
use crate::os::user::{HomeDirError, UserLookup};

/// Errors encountered when resolving a base directory.
#[derive(Debug, Clone, Error)]
pub enum BaseDirError {
    /// The home-relative fallback was needed, but the home directory could
    /// not be resolved.
    #[error(transparent)]
    Home(#[from] HomeDirError),

    /// `$XDG_RUNTIME_DIR` is unset. There is no fallback: the runtime
    /// directory must come from the session manager.
    #[error("unable to find XDG_RUNTIME_DIR")]
    RuntimeDirUnset,
}

// A variable set to the empty string counts as unset. Non-UTF-8 values are
// treated the same way.
fn set_to_nonempty<'e>(env: &'e Env, var: &str) -> Option<&'e str> {
    env.get(var).ok().filter(|value| !value.is_empty())
}

fn lookup_or_home(
    env: &Env,
    var: &str,
    suffix: &[&str],
    users: &impl UserLookup,
) -> Result<PathBuf, BaseDirError> {
    if let Some(value) = set_to_nonempty(env, var) {
        return Ok(PathBuf::from(value));
    }
    let mut dir = users.home_dir()?;
    for component in suffix {
        dir.push(component);
    }
    Ok(dir)
}

fn lookup_or_defaults(env: &Env, var: &str, defaults: &[&str]) -> Vec<PathBuf> {
    match set_to_nonempty(env, var) {
        // Naive split: adjacent, leading and trailing colons yield empty
        // segments, preserved as-is.
        Some(value) => value.split(':').map(PathBuf::from).collect(),
        None => defaults.iter().map(PathBuf::from).collect(),
    }
}

/// Get proper path for `$XDG_DATA_HOME`.
///
/// The variable's value is returned verbatim when set to a non-empty string;
/// no validation, no `~` expansion. Otherwise falls back to
/// `$HOME/.local/share`, with the home directory resolved through `users`.
///
/// # Returns
/// The resolved path, or [`BaseDirError::Home`] if the fallback was needed
/// and the home directory could not be determined.
pub fn data_home(env: &Env, users: &impl UserLookup) -> Result<PathBuf, BaseDirError> {
    lookup_or_home(env, "XDG_DATA_HOME", &[".local", "share"], users)
}

/// Get proper path for `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`.
pub fn config_home(env: &Env, users: &impl UserLookup) -> Result<PathBuf, BaseDirError> {
    lookup_or_home(env, "XDG_CONFIG_HOME", &[".config"], users)
}

/// Get proper path for `$XDG_CACHE_HOME`, falling back to `$HOME/.cache`.
pub fn cache_home(env: &Env, users: &impl UserLookup) -> Result<PathBuf, BaseDirError> {
    lookup_or_home(env, "XDG_CACHE_HOME", &[".cache"], users)
}

/// Get proper path for `$XDG_STATE_HOME`, falling back to `$HOME/.local/state`.
pub fn state_home(env: &Env, users: &impl UserLookup) -> Result<PathBuf, BaseDirError> {
    lookup_or_home(env, "XDG_STATE_HOME", &[".local", "state"], users)
}

/// Get proper path for `$XDG_RUNTIME_DIR`.
///
/// Unlike the other lookups there is no derived fallback: the runtime
/// directory governs permissions-sensitive sockets and must be set up by the
/// session manager.
///
/// # Returns
/// The variable's value verbatim, or [`BaseDirError::RuntimeDirUnset`] when
/// it is unset or empty.
pub fn runtime_dir(env: &Env) -> Result<PathBuf, BaseDirError> {
    set_to_nonempty(env, "XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .ok_or(BaseDirError::RuntimeDirUnset)
}

/// Get the `$XDG_DATA_DIRS` search path, highest priority first.
///
/// Falls back to `/usr/local/share:/usr/share`; the result is never empty.
pub fn data_dirs(env: &Env) -> Vec<PathBuf> {
    lookup_or_defaults(env, "XDG_DATA_DIRS", &["/usr/local/share", "/usr/share"])
}

/// Get the `$XDG_CONFIG_DIRS` search path, highest priority first.
///
/// Falls back to `/etc/xdg`; the result is never empty.
pub fn config_dirs(env: &Env) -> Vec<PathBuf> {
    lookup_or_defaults(env, "XDG_CONFIG_DIRS", &["/etc/xdg"])
}
