//! Path resolution confined to the storage root.
//!
//! Client-supplied folder and file identifiers are sanitized per segment
//! before any join, then the joined result is verified to still live under
//! the root. Every physical path handed to I/O code is minted here.

use std::path::{Component, Path, PathBuf};

use crate::{DocshelfError, Result};

/// An absolute physical path guaranteed to be confined to the storage root.
///
/// Only [`PathResolver`] can construct this type; the streaming and upload
/// services accept nothing else, so a physical path can never be synthesized
/// around the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    /// The physical path, for I/O.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final file name component, if valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Resolves client-supplied location identifiers into physical paths under
/// a fixed storage root.
///
/// Two addressing modes share one join-and-verify pipeline:
/// - [`resolve`](Self::resolve) takes discrete segments and keeps only the
///   final path component of each (`"../../etc"` becomes `"etc"`).
/// - [`resolve_relative`](Self::resolve_relative) and
///   [`resolve_folder`](Self::resolve_folder) take a pre-formed relative
///   path and reject outright any piece that is not a plain name, since
///   such paths are expected to come from listings this service produced.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Absolute storage root. The confinement boundary.
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for the given storage root.
    ///
    /// A relative root is anchored at the current working directory. The
    /// directory is not created and need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };
        Ok(Self { root })
    }

    /// The storage root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve discrete path segments (viewer-style addressing).
    ///
    /// Each segment is reduced to its final path component before joining.
    /// Segments that reduce to nothing (empty, `.`, `..`, bare separators)
    /// fail with `InvalidPath`.
    pub fn resolve(&self, segments: &[&str]) -> Result<ResolvedPath> {
        let mut parts = Vec::with_capacity(segments.len());
        for raw in segments {
            match sanitize_segment(raw) {
                Some(name) => parts.push(name),
                None => {
                    tracing::warn!(
                        segment = raw,
                        root = %self.root.display(),
                        "rejected path segment with no usable name"
                    );
                    return Err(DocshelfError::InvalidPath(
                        "invalid path segment".to_string(),
                    ));
                }
            }
        }
        self.join_confined(&parts)
    }

    /// Resolve a pre-formed relative path plus file name (listing-style
    /// addressing).
    ///
    /// The relative path is split on `/`; every piece and the file name must
    /// already be a plain single component. A `..`, `.`, or separator-bearing
    /// piece fails with `InvalidPath` rather than being stripped.
    pub fn resolve_relative(&self, relative_path: &str, file_name: &str) -> Result<ResolvedPath> {
        let mut parts = self.strict_parts(relative_path)?;
        match sanitize_segment(file_name) {
            Some(name) if name == file_name => parts.push(name),
            _ => {
                tracing::warn!(
                    file_name,
                    root = %self.root.display(),
                    "rejected file name during resolution"
                );
                return Err(DocshelfError::InvalidPath("invalid file name".to_string()));
            }
        }
        self.join_confined(&parts)
    }

    /// Resolve a destination folder for uploads. An empty identifier
    /// addresses the storage root itself.
    pub fn resolve_folder(&self, relative_path: &str) -> Result<ResolvedPath> {
        let parts = self.strict_parts(relative_path)?;
        self.join_confined(&parts)
    }

    /// Slash-normalized relative form of a resolved path, for records and
    /// responses.
    pub fn relative_path(&self, path: &ResolvedPath) -> String {
        posix_relative(&self.root, path.as_path()).unwrap_or_default()
    }

    /// Split a relative path on `/` and validate each piece strictly.
    fn strict_parts<'a>(&self, relative_path: &'a str) -> Result<Vec<&'a str>> {
        let mut parts = Vec::new();
        for piece in relative_path.split('/').filter(|p| !p.is_empty()) {
            match sanitize_segment(piece) {
                Some(name) if name == piece => parts.push(name),
                _ => {
                    tracing::warn!(
                        piece,
                        path = relative_path,
                        root = %self.root.display(),
                        "rejected traversal-shaped relative path"
                    );
                    return Err(DocshelfError::InvalidPath(
                        "invalid relative path".to_string(),
                    ));
                }
            }
        }
        Ok(parts)
    }

    /// Join sanitized parts under the root and verify the result stayed
    /// inside it. The single minting point for [`ResolvedPath`].
    fn join_confined(&self, parts: &[&str]) -> Result<ResolvedPath> {
        let mut path = self.root.clone();
        for part in parts {
            path.push(part);
        }
        // Sanitized parts are single normal components, but the confinement
        // invariant is checked on the final path regardless.
        if !path.starts_with(&self.root) {
            tracing::warn!(
                path = %path.display(),
                root = %self.root.display(),
                "resolved path escaped the storage root"
            );
            return Err(DocshelfError::InvalidPath(
                "path escapes the storage root".to_string(),
            ));
        }
        Ok(ResolvedPath(path))
    }
}

/// Reduce a raw segment to its final path component.
///
/// Returns `None` when nothing usable remains: empty input, `.`, `..`,
/// bare separators, or a platform prefix. Both `/` and `\` are treated as
/// separators so a Windows-shaped segment cannot smuggle structure through
/// on a Unix host.
fn sanitize_segment(raw: &str) -> Option<&str> {
    let candidate = raw.rsplit(['/', '\\']).find(|p| !p.is_empty())?;
    let mut components = Path::new(candidate).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name.to_str(),
        _ => None,
    }
}

/// Slash-normalized path of `path` relative to `root`, or `None` if `path`
/// is not under `root`.
pub(crate) fn posix_relative(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new("/srv/docshelf/uploads").unwrap()
    }

    #[test]
    fn test_resolve_plain_segments() {
        let r = resolver();
        let path = r.resolve(&["reports", "q1.pdf"]).unwrap();
        assert_eq!(path.as_path(), Path::new("/srv/docshelf/uploads/reports/q1.pdf"));
        assert_eq!(path.file_name(), Some("q1.pdf"));
    }

    #[test]
    fn test_resolve_collapses_traversal_to_final_component() {
        let r = resolver();
        let path = r.resolve(&["../../etc", "passwd"]).unwrap();
        assert_eq!(path.as_path(), Path::new("/srv/docshelf/uploads/etc/passwd"));
    }

    #[test]
    fn test_resolve_collapses_absolute_segment() {
        let r = resolver();
        let path = r.resolve(&["/etc/passwd"]).unwrap();
        assert_eq!(path.as_path(), Path::new("/srv/docshelf/uploads/passwd"));
    }

    #[test]
    fn test_resolve_rejects_bare_dot_dot() {
        let r = resolver();
        assert!(matches!(
            r.resolve(&[".."]),
            Err(DocshelfError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_empty_segment() {
        let r = resolver();
        assert!(r.resolve(&[""]).is_err());
        assert!(r.resolve(&["/"]).is_err());
        assert!(r.resolve(&["."]).is_err());
    }

    #[test]
    fn test_resolve_relative_plain_path() {
        let r = resolver();
        let path = r.resolve_relative("reports/2024", "q1.pdf").unwrap();
        assert_eq!(
            path.as_path(),
            Path::new("/srv/docshelf/uploads/reports/2024/q1.pdf")
        );
    }

    #[test]
    fn test_resolve_relative_empty_folder_is_top_level() {
        let r = resolver();
        let path = r.resolve_relative("", "top.pdf").unwrap();
        assert_eq!(path.as_path(), Path::new("/srv/docshelf/uploads/top.pdf"));
    }

    #[test]
    fn test_resolve_relative_rejects_dot_dot_piece() {
        let r = resolver();
        assert!(matches!(
            r.resolve_relative("../../etc", "passwd"),
            Err(DocshelfError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_resolve_relative_rejects_dot_piece() {
        let r = resolver();
        assert!(r.resolve_relative("a/./b", "f.pdf").is_err());
    }

    #[test]
    fn test_resolve_relative_rejects_traversal_file_name() {
        let r = resolver();
        assert!(r.resolve_relative("reports", "../escape.pdf").is_err());
        assert!(r.resolve_relative("reports", "").is_err());
    }

    #[test]
    fn test_resolve_relative_tolerates_extra_slashes() {
        let r = resolver();
        let path = r.resolve_relative("a//b/", "f.pdf").unwrap();
        assert_eq!(path.as_path(), Path::new("/srv/docshelf/uploads/a/b/f.pdf"));
    }

    #[test]
    fn test_resolve_folder_empty_is_root() {
        let r = resolver();
        let path = r.resolve_folder("").unwrap();
        assert_eq!(path.as_path(), r.root());
    }

    #[test]
    fn test_resolve_folder_rejects_traversal() {
        let r = resolver();
        assert!(r.resolve_folder("../outside").is_err());
        assert!(r.resolve_folder("a/../b").is_err());
    }

    #[test]
    fn test_hostile_inputs_stay_confined() {
        let r = resolver();
        let hostile = [
            "..",
            "../..",
            "../../etc/passwd",
            "/etc/passwd",
            "..\\..\\windows",
            "C:\\windows\\system32",
            "a/../../b",
            "....//",
            "./../x",
        ];
        for input in hostile {
            match r.resolve(&[input]) {
                Ok(path) => assert!(
                    path.as_path().starts_with(r.root()),
                    "{input:?} resolved outside the root: {:?}",
                    path.as_path()
                ),
                Err(DocshelfError::InvalidPath(_)) => {}
                Err(e) => panic!("unexpected error for {input:?}: {e}"),
            }
            assert!(
                r.resolve_relative(input, "file.pdf")
                    .map(|p| p.as_path().starts_with(r.root()))
                    .unwrap_or(true),
                "{input:?} escaped via relative resolution"
            );
        }
    }

    #[test]
    fn test_sanitize_segment_basename_behavior() {
        assert_eq!(sanitize_segment("../../etc"), Some("etc"));
        assert_eq!(sanitize_segment("a/b"), Some("b"));
        assert_eq!(sanitize_segment("name.pdf"), Some("name.pdf"));
        assert_eq!(sanitize_segment("dir/"), Some("dir"));
        assert_eq!(sanitize_segment("..\\evil"), Some("evil"));
        assert_eq!(sanitize_segment(".."), None);
        assert_eq!(sanitize_segment("."), None);
        assert_eq!(sanitize_segment(""), None);
        assert_eq!(sanitize_segment("/"), None);
        assert_eq!(sanitize_segment("\\"), None);
    }

    #[test]
    fn test_relative_path_round_trip() {
        let r = resolver();
        let path = r.resolve_relative("reports/2024", "q1.pdf").unwrap();
        assert_eq!(r.relative_path(&path), "reports/2024/q1.pdf");

        let top = r.resolve_relative("", "top.pdf").unwrap();
        assert_eq!(r.relative_path(&top), "top.pdf");
    }

    #[test]
    fn test_posix_relative_outside_root() {
        let root = Path::new("/srv/docshelf/uploads");
        assert_eq!(posix_relative(root, Path::new("/etc/passwd")), None);
        assert_eq!(posix_relative(root, root), None);
    }

    #[test]
    fn test_relative_root_is_anchored() {
        let r = PathResolver::new("relative/uploads").unwrap();
        assert!(r.root().is_absolute());
    }
}
