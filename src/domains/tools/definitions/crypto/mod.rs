//! Digests and password generation.

pub mod hash;
pub mod password;

pub use hash::{HashParams, HashTool};
pub use password::{PasswordParams, PasswordTool};
