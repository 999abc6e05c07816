//! Classification of workflow, log-directory, and scenario references.
//!
//! A reference is either an absolute filesystem path, used verbatim, or a
//! package-relative string that must go through a
//! [`PathResolver`](crate::io::resolver::PathResolver).

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// How a reference string must be turned into a filesystem path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// Already absolute; passes through unchanged.
    Absolute(&'a Path),
    /// Needs the package resolver.
    PackageRelative(&'a str),
}

impl<'a> Reference<'a> {
    pub fn classify(reference: &'a str) -> Self {
        let path = Path::new(reference);
        if path.is_absolute() {
            Reference::Absolute(path)
        } else {
            Reference::PackageRelative(reference)
        }
    }
}

/// One `$(find-pkg-share <package>)` occurrence inside a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSubstitution {
    /// Byte range of the whole `$(...)` expression.
    pub range: Range<usize>,
    pub package: String,
}

/// Find every package substitution in `reference`, in order of appearance.
pub fn package_substitutions(reference: &str) -> Vec<PackageSubstitution> {
    static FIND_PKG_SHARE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\$\(\s*find-pkg-share\s+([^\s)]+)\s*\)").unwrap()
    });
    FIND_PKG_SHARE_RE
        .captures_iter(reference)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let package = caps.get(1)?;
            Some(PackageSubstitution {
                range: whole.range(),
                package: package.as_str().to_string(),
            })
        })
        .collect()
}

/// True when `text` still holds a `$(` expression.
///
/// Applied to the parts of a reference that [`package_substitutions`] did
/// not match, so misspelled or malformed expressions are caught.
pub fn has_unexpanded_substitution(text: &str) -> bool {
    text.contains("$(")
}
