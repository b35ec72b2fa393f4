//! OS-level utilities.
//!
//! Provides the [`Env`](env::Env) environment snapshot and the
//! [`UserLookup`](user::UserLookup) account-database capability.

pub mod env;
pub mod user;
