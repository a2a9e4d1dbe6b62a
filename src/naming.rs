//! Path decomposition for round-tripping file names.
//!
//! A loaded image remembers where it came from so the saver can write the
//! result next to the source under the same container format:
//!
//! - `/photos/2024/dawn.png` → directory=`/photos/2024`, base_name=`dawn`, extension=`png`
//! - `/a/b/c.image.png` → directory=`/a/b`, base_name=`c.image`, extension=`png`
//! - `/a/b/noext` → directory=`/a/b`, base_name=`noext`, extension=``
//! - `dawn.png` → directory=`.`, base_name=`dawn`, extension=`png`
//!
//! Only the **last** dot separates the extension; earlier dots stay in the
//! base name verbatim. No case folding happens here. Whether `PNG` matches
//! the `png` codec is decided by the registry's
//! [`ExtensionMatching`](crate::imaging::ExtensionMatching) policy.

use std::path::{Path, PathBuf};

/// Directory, base name and extension recovered from a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Parent directory, or `.` when the path has none.
    pub directory: PathBuf,
    /// File name with the final `.ext` removed. Inner dots are preserved.
    pub base_name: String,
    /// Text after the last dot of the file name, empty if there is no dot.
    pub extension: String,
}

impl PathParts {
    /// Build a path in the same directory with `suffix` appended to the base
    /// name, keeping `extension` (or the original one if `None`).
    ///
    /// `PathParts` of `/a/dawn.png` with suffix `-cropped` → `/a/dawn-cropped.png`.
    pub fn sibling(&self, suffix: &str, extension: Option<&str>) -> PathBuf {
        let ext = extension.unwrap_or(&self.extension);
        join_file_name(&self.directory, &self.base_name, suffix, ext)
    }
}

/// `<directory>/<base_name><suffix>.<extension>`, dropping the dot when
/// `extension` is empty.
pub fn join_file_name(directory: &Path, base_name: &str, suffix: &str, extension: &str) -> PathBuf {
    let file_name = if extension.is_empty() {
        format!("{base_name}{suffix}")
    } else {
        format!("{base_name}{suffix}.{extension}")
    };
    directory.join(file_name)
}

/// Split a path into `(directory, base_name, extension)`.
///
/// Never fails: a path without a file name component (e.g. `/`) yields an
/// empty base name and extension.
pub fn split_path(path: &Path) -> PathParts {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None if path.has_root() => path.to_path_buf(),
        None => PathBuf::from("."),
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (base_name, extension) = split_file_name(&file_name);

    PathParts {
        directory,
        base_name: base_name.to_string(),
        extension: extension.to_string(),
    }
}

/// Split a bare file name on its last dot.
///
/// - `"c.image.png"` → (`"c.image"`, `"png"`)
/// - `"noext"` → (`"noext"`, `""`)
/// - `".hidden"` → (`""`, `"hidden"`)
/// - `"trailing."` → (`"trailing"`, `""`)
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    file_name.rsplit_once('.').unwrap_or((file_name, ""))
}
