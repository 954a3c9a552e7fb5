//! Path-resolve composition on top of `std::path`
//!
//! Provides the conventional "resolve" semantics (right-most absolute
//! segment wins, relative results are anchored at the working directory)
//! and the basename/extname split the handle derives its fields from.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Resolve a sequence of segments into an absolute, normalized path.
///
/// Segments are applied left to right as successive joins. An absolute
/// segment restarts resolution from itself, empty segments are skipped,
/// and a result that is still relative is anchored at the current
/// working directory.
pub fn resolve<I, S>(segments: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.as_os_str().is_empty() {
            continue;
        }
        joined.push(segment);
    }

    if !joined.is_absolute() {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        joined = dunce::simplified(&cwd).join(joined);
    }

    Ok(normalize(&joined))
}

/// Lexically normalize a path.
///
/// Drops `.` components and trailing separators, and lets `..` consume the
/// preceding component. `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Split a final path segment into `(name, ext)`.
///
/// `ext` keeps its leading dot and starts at the last dot of the segment.
/// A dot that opens a hidden name (`.bashrc`) does not start an
/// extension, and neither does `..`.
pub fn split_name(fullname: &str) -> (&str, &str) {
    if fullname == ".." {
        return (fullname, "");
    }
    match fullname.rfind('.') {
        None | Some(0) => (fullname, ""),
        Some(idx) => fullname.split_at(idx),
    }
}

/// Strip one leading dot from a caller-supplied extension.
pub fn normalize_ext(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

/// Join `name` and `ext` (without its dot) into a file name.
///
/// An empty extension yields the bare name rather than `name.`.
pub(crate) fn file_name_with_ext(name: &str, ext: &str) -> String {
    if ext.is_empty() {
        name.to_string()
    } else {
        format!("{name}.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("package.json", "package", ".json")]
    #[case("archive.tar.gz", "archive.tar", ".gz")]
    #[case("Makefile", "Makefile", "")]
    #[case(".bashrc", ".bashrc", "")]
    #[case("..bashrc", ".", ".bashrc")]
    #[case("trailing.", "trailing", ".")]
    #[case("..", "..", "")]
    #[case("", "", "")]
    fn split_name_matches_basename_extname(
        #[case] fullname: &str,
        #[case] name: &str,
        #[case] ext: &str,
    ) {
        assert_eq!(split_name(fullname), (name, ext));
    }

    #[test]
    fn normalize_ext_strips_single_dot() {
        assert_eq!(normalize_ext(".json"), "json");
        assert_eq!(normalize_ext("json"), "json");
        assert_eq!(normalize_ext("..json"), ".json");
        assert_eq!(normalize_ext(""), "");
    }

    #[cfg(unix)]
    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c/")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_later_absolute_segment_resets() {
        let resolved = resolve(["/a/b", "c", "/x", "y"]).unwrap();
        assert_eq!(resolved, PathBuf::from("/x/y"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_skips_empty_segments() {
        let resolved = resolve(["/a", "", "b"]).unwrap();
        assert_eq!(resolved, PathBuf::from("/a/b"));
    }

    #[test]
    fn resolve_relative_anchors_at_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = resolve(["some", "nested/../file.txt"]).unwrap();
        assert_eq!(resolved, normalize(&cwd.join("some/file.txt")));
    }

    #[test]
    fn file_name_with_ext_skips_empty_ext() {
        assert_eq!(file_name_with_ext("a", "txt"), "a.txt");
        assert_eq!(file_name_with_ext("a", ""), "a");
    }
}
