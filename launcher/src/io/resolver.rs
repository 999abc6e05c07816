//! Package-relative reference resolution.
//!
//! Replaces `$(find-pkg-share <package>)` with the package's share directory,
//! found by probing `<prefix>/share/<package>` under each configured install
//! prefix. Whatever remains relative is anchored at the launcher root.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::reference::{has_unexpanded_substitution, package_substitutions};
use crate::error::WorkflowError;

/// Environment variable listing install prefixes, `:`-separated.
pub const PREFIX_PATH_ENV: &str = "AMENT_PREFIX_PATH";

/// Maps a package-relative reference to an absolute path.
pub trait PathResolver {
    fn resolve(&self, reference: &str) -> Result<PathBuf, WorkflowError>;
}

impl<T: PathResolver + ?Sized> PathResolver for &T {
    fn resolve(&self, reference: &str) -> Result<PathBuf, WorkflowError> {
        (**self).resolve(reference)
    }
}

/// Resolver backed by install prefixes on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageResolver {
    prefixes: Vec<PathBuf>,
    base: PathBuf,
}

impl PackageResolver {
    /// `base` anchors references that stay relative after substitution.
    pub fn new(prefixes: Vec<PathBuf>, base: impl Into<PathBuf>) -> Self {
        Self {
            prefixes,
            base: base.into(),
        }
    }

    /// Locate `<prefix>/share/<package>`; the first prefix that has it wins.
    pub fn share_directory(&self, package: &str) -> Option<PathBuf> {
        self.prefixes
            .iter()
            .map(|prefix| prefix.join("share").join(package))
            .find(|candidate| candidate.is_dir())
    }
}

impl PathResolver for PackageResolver {
    fn resolve(&self, reference: &str) -> Result<PathBuf, WorkflowError> {
        let mut expanded = String::with_capacity(reference.len());
        let mut cursor = 0;
        for sub in package_substitutions(reference) {
            let literal = &reference[cursor..sub.range.start];
            if has_unexpanded_substitution(literal) {
                return Err(malformed(reference));
            }
            let share = self.share_directory(&sub.package).ok_or_else(|| {
                WorkflowError::PackageNotFound {
                    package: sub.package.clone(),
                    reference: reference.to_string(),
                }
            })?;
            expanded.push_str(literal);
            expanded.push_str(&share.to_string_lossy());
            cursor = sub.range.end;
        }
        let rest = &reference[cursor..];
        if has_unexpanded_substitution(rest) {
            return Err(malformed(reference));
        }
        expanded.push_str(rest);

        let expanded = Path::new(&expanded);
        let resolved = if expanded.is_absolute() {
            expanded.to_path_buf()
        } else {
            self.base.join(expanded)
        };
        if !resolved.is_absolute() {
            return Err(WorkflowError::UnresolvedReference {
                reference: reference.to_string(),
                resolved,
            });
        }
        debug!(reference, resolved = %resolved.display(), "resolved reference");
        Ok(resolved)
    }
}

fn malformed(reference: &str) -> WorkflowError {
    WorkflowError::MalformedReference {
        reference: reference.to_string(),
    }
}

/// Install prefixes from [`PREFIX_PATH_ENV`]; empty when unset.
pub fn prefixes_from_env() -> Vec<PathBuf> {
    std::env::var_os(PREFIX_PATH_ENV)
        .map(|value| {
            std::env::split_paths(&value)
                .filter(|path| !path.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}
