// Security module for export path validation
//
// File exports are restricted to directories inside the configured root so
// that a client cannot write outside the sandbox through `..` or symlinks.

pub mod path_validator;

pub use path_validator::{PathSecurityError, resolve_export_target, validate_path};
