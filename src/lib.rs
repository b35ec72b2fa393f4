//! Basedir - XDG base directory lookups for Unix.
//!
//! This crate resolves the user and system directories defined by the XDG Base
//! Directory specification from an environment snapshot, falling back to the
//! invoking user's home directory from the account database where the
//! specification prescribes one.

pub mod os;
pub mod xdg;
