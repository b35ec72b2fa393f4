use std::ffi::{CStr, OsString};
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors encountered when resolving the invoking user's home directory.
#[derive(Debug, Clone, Error)]
pub enum HomeDirError {
    /// The account database has no record for uid `MissingRecord.0`.
    #[error("unable to find account record for uid {0}")]
    MissingRecord(libc::uid_t),

    /// The account record exists, but carries no home directory.
    #[error("unable to find home directory")]
    MissingHomeDir,
}

/// Capability for resolving the invoking user's home directory.
///
/// Lookups that need a home-relative fallback take this as a parameter, so
/// tests can substitute a fixed home directory instead of querying the real
/// account database.
pub trait UserLookup {
    /// Resolve the invoking user's home directory.
    ///
    /// # Returns
    /// A non-empty path on success, otherwise [`HomeDirError`].
    fn home_dir(&self) -> Result<PathBuf, HomeDirError>;
}

/// [`UserLookup`] backed by the operating system's account database.
///
/// Every call re-queries the passwd record for the current uid; nothing is
/// cached. `$HOME` is deliberately not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountDatabase;

impl UserLookup for AccountDatabase {
    fn home_dir(&self) -> Result<PathBuf, HomeDirError> {
        // SAFETY: `getuid` cannot fail and has no preconditions.
        passwd_home(unsafe { libc::getuid() })
    }
}

fn passwd_home(uid: libc::uid_t) -> Result<PathBuf, HomeDirError> {
    // SAFETY: `sysconf` has no preconditions; a negative result means the
    // limit is indeterminate and we fall back to a fixed starting size.
    let mut buf_len = match unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) } {
        len if len > 0 => len as usize,
        _ => 1024,
    };
    loop {
        // SAFETY: An all-zeroes `passwd` is a valid resting state; every
        // field read below happens only after `getpwuid_r` fills it.
        let mut record: libc::passwd = unsafe { std::mem::zeroed() };
        let mut buf = vec![0 as libc::c_char; buf_len];
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        // SAFETY: `buf` stays alive for the rest of this iteration and
        // `buf_len` matches its allocation; `record` and `result` are valid
        // out-pointers. This is the reentrant form, safe across threads.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut record, buf.as_mut_ptr(), buf_len, &mut result)
        };
        if rc == libc::ERANGE {
            buf_len *= 2;
            continue;
        }
        if rc != 0 || result.is_null() {
            return Err(HomeDirError::MissingRecord(uid));
        }
        if record.pw_dir.is_null() {
            return Err(HomeDirError::MissingHomeDir);
        }
        // SAFETY: `getpwuid_r` succeeded, so `pw_dir` points at a
        // NUL-terminated string backed by `buf`.
        let dir = unsafe { CStr::from_ptr(record.pw_dir) };
        if dir.is_empty() {
            return Err(HomeDirError::MissingHomeDir);
        }
        return Ok(PathBuf::from(OsString::from_vec(dir.to_bytes().to_vec())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::assert_ok;

    #[test]
    fn account_database_resolves_home() {
        let home = assert_ok!(AccountDatabase.home_dir());
        assert!(!home.as_os_str().is_empty());
    }

    #[test]
    fn unknown_uid_has_no_record() {
        // Nothing sane assigns the full 32-bit uid range.
        let err = passwd_home(u32::MAX - 7).unwrap_err();
        assert!(matches!(err, HomeDirError::MissingRecord(_)));
    }
}
