use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::Config;

/// Errors raised while resolving a filesystem location for an export.
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' points outside allowed root directory")]
    SymlinkOutsideRoot { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    #[error("Invalid file name '{name}': must be non-empty and contain no path separators")]
    InvalidFileName { name: String },

    #[error("File already exists: '{path}' (set overwrite to replace it)")]
    AlreadyExists { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Validates that an existing path lies within the configured root.
///
/// The path is canonicalized (resolving `.`, `..` and symlinks) and, when
/// `security.root_path` is set, must stay inside that root. When symlinks are
/// disallowed, a symlink whose target escapes the root is rejected even if
/// the link itself lives inside it.
///
/// ```rust,ignore
/// let config = Config::from_env();
/// let dir = validate_path("/home/user/exports", &config)?;
/// ```
pub fn validate_path(input_path: &str, config: &Config) -> Result<PathBuf, PathSecurityError> {
    let path = Path::new(input_path);

    let Some(ref root) = config.security.root_path else {
        return canonicalize_path(path);
    };

    let canonical_root = root.canonicalize().map_err(|e| PathSecurityError::IoError {
        path: root.clone(),
        error: e,
    })?;

    if !path.exists() {
        return Err(PathSecurityError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_symlink() && !config.security.allow_symlinks {
        let target = path.read_link().map_err(|e| PathSecurityError::IoError {
            path: path.to_path_buf(),
            error: e,
        })?;

        let canonical_target =
            canonicalize_path(&target).map_err(|_| PathSecurityError::SymlinkOutsideRoot {
                path: path.to_path_buf(),
            })?;

        if !canonical_target.starts_with(&canonical_root) {
            return Err(PathSecurityError::SymlinkOutsideRoot {
                path: path.to_path_buf(),
            });
        }
    }

    let canonical_path = canonicalize_path(path)?;

    if !canonical_path.starts_with(&canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

/// Resolves `<dir>/<file_name>.<extension>` as an export target.
///
/// `dir` must be an existing directory accepted by [`validate_path`]; the
/// file name must be a bare name. An existing target is only accepted when
/// `overwrite` is set.
pub fn resolve_export_target(
    dir: &str,
    file_name: &str,
    extension: &str,
    overwrite: bool,
    config: &Config,
) -> Result<PathBuf, PathSecurityError> {
    let file_name = file_name.trim();
    if file_name.is_empty()
        || file_name.contains(['/', '\\'])
        || file_name == "."
        || file_name == ".."
    {
        return Err(PathSecurityError::InvalidFileName {
            name: file_name.to_string(),
        });
    }

    let dir_path = validate_path(dir, config)?;
    if !dir_path.is_dir() {
        return Err(PathSecurityError::NotADirectory { path: dir_path });
    }

    let target = dir_path.join(format!("{}.{}", file_name, extension));
    if target.exists() && !overwrite {
        return Err(PathSecurityError::AlreadyExists { path: target });
    }

    Ok(target)
}

/// Canonicalizes a path, mapping a missing path to `PathNotFound`.
fn canonicalize_path(path: &Path) -> Result<PathBuf, PathSecurityError> {
    path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathSecurityError::CannotCanonicalize {
                path: path.to_path_buf(),
                error: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SecurityConfig;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_config(root: Option<PathBuf>, allow_symlinks: bool) -> Config {
        let mut config = Config::default();
        config.security = SecurityConfig {
            root_path: root,
            allow_symlinks,
        };
        config
    }

    #[test]
    fn test_no_root_allows_existing_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(None, true);
        let result = validate_path(temp_dir.path().to_str().unwrap(), &config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_path_outside_root() {
        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();

        let config = create_test_config(Some(root_dir.path().to_path_buf()), true);
        let result = validate_path(outside_dir.path().to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[test]
    fn test_path_traversal_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let config = create_test_config(Some(subdir.clone()), true);
        let traversal_path = subdir.join("..");

        let result = validate_path(traversal_path.to_str().unwrap(), &config);
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[test]
    fn test_nonexistent_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let config = create_test_config(Some(temp_dir.path().to_path_buf()), true);
        let result = validate_path(missing.to_str().unwrap(), &config);

        assert!(matches!(result, Err(PathSecurityError::PathNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_root_blocked() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let link = root_dir.path().join("escape");
        symlink(outside_dir.path(), &link).unwrap();

        let config = create_test_config(Some(root_dir.path().to_path_buf()), false);
        let result = validate_path(link.to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::SymlinkOutsideRoot { .. })
        ));
    }

    #[test]
    fn test_export_target_resolves_inside_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(Some(temp_dir.path().to_path_buf()), true);

        let target = resolve_export_target(
            temp_dir.path().to_str().unwrap(),
            "beautified",
            "json",
            false,
            &config,
        )
        .unwrap();

        assert_eq!(target.file_name().unwrap(), "beautified.json");
    }

    #[test]
    fn test_export_target_rejects_separators() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(None, true);

        let result = resolve_export_target(
            temp_dir.path().to_str().unwrap(),
            "../escape",
            "txt",
            false,
            &config,
        );

        assert!(matches!(
            result,
            Err(PathSecurityError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn test_export_target_requires_overwrite_flag() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("uuids.txt"), "old").unwrap();
        let config = create_test_config(None, true);
        let dir = temp_dir.path().to_str().unwrap();

        let refused = resolve_export_target(dir, "uuids", "txt", false, &config);
        assert!(matches!(
            refused,
            Err(PathSecurityError::AlreadyExists { .. })
        ));

        let allowed = resolve_export_target(dir, "uuids", "txt", true, &config);
        assert!(allowed.is_ok());
    }

    #[test]
    fn test_export_target_rejects_file_as_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let config = create_test_config(None, true);

        let result = resolve_export_target(file.to_str().unwrap(), "out", "txt", false, &config);
        assert!(matches!(
            result,
            Err(PathSecurityError::NotADirectory { .. })
        ));
    }
}
