// Security module for path validation and access control
//
// File inputs to the hash tools are resolved through this module so that
// they stay inside the configured root directory and respect the symlink
// policy.

pub mod path_validator;

pub use path_validator::{validate_path, PathSecurityError};
