mod common;

use common::TempRoot;
use docserve::http::resolver::{PathResolver, ResolveError};

#[test]
fn test_root_target_resolves_to_index() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    let path = resolver.resolve("/").unwrap();
    assert_eq!(path, resolver.root().join("index.html"));
}

#[test]
fn test_directory_target_gets_default_index() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    let path = resolver.resolve("/docs/").unwrap();
    assert_eq!(path, resolver.root().join("docs").join("index.html"));
}

#[test]
fn test_custom_default_index() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "home.htm").unwrap();

    assert_eq!(resolver.default_index(), "home.htm");
    assert_eq!(resolver.resolve("/a/").unwrap(), resolver.root().join("a/home.htm"));
}

#[test]
fn test_file_target_is_joined_onto_root() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    let path = resolver.resolve("/css/site.css").unwrap();
    assert_eq!(path, resolver.root().join("css/site.css"));
}

#[test]
fn test_parent_segments_above_root_are_rejected() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    assert_eq!(resolver.resolve("/../etc/passwd"), Err(ResolveError::Traversal));
    assert_eq!(resolver.resolve("/a/../../b"), Err(ResolveError::Traversal));
    assert_eq!(resolver.resolve("/a/b/../../../"), Err(ResolveError::Traversal));
}

#[test]
fn test_parent_segments_within_root_are_normalized() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    assert_eq!(resolver.resolve("/a/../b.html").unwrap(), resolver.root().join("b.html"));
    assert_eq!(resolver.resolve("/a/b/../c/").unwrap(), resolver.root().join("a/c/index.html"));
    assert_eq!(resolver.resolve("/a/../").unwrap(), resolver.root().join("index.html"));
}

#[test]
fn test_target_without_leading_slash_is_rejected() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    assert_eq!(resolver.resolve(""), Err(ResolveError::NotAbsolute));
    assert_eq!(resolver.resolve("index.html"), Err(ResolveError::NotAbsolute));
}

#[test]
fn test_root_must_exist() {
    let root = TempRoot::new();
    let missing = root.path().join("nope");

    assert!(PathResolver::new(missing, "index.html").is_err());
}

#[test]
fn test_root_must_be_a_directory() {
    let root = TempRoot::new();
    root.write("file.html", "x");

    assert!(PathResolver::new(root.path().join("file.html"), "index.html").is_err());
}

#[test]
fn test_root_is_canonicalized() {
    let root = TempRoot::new();
    std::fs::create_dir(root.path().join("site")).unwrap();
    let resolver = PathResolver::new(root.path().join("site/./"), "index.html").unwrap();

    assert_eq!(
        resolver.root(),
        root.path().join("site").canonicalize().unwrap()
    );
}

#[tokio::test]
async fn test_confine_missing_file_is_none() {
    let root = TempRoot::new();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    let candidate = resolver.resolve("/missing.html").unwrap();
    assert_eq!(resolver.confine(&candidate).await, Ok(None));
}

#[tokio::test]
async fn test_confine_existing_file() {
    let root = TempRoot::new();
    root.write("a.html", "a");
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    let candidate = resolver.resolve("/a.html").unwrap();
    assert_eq!(resolver.confine(&candidate).await, Ok(Some(candidate.clone())));
}

#[cfg(unix)]
#[tokio::test]
async fn test_confine_rejects_symlink_out_of_root() {
    let outside = TempRoot::new();
    outside.write("secret.html", "secret");
    let root = TempRoot::new();
    std::os::unix::fs::symlink(outside.path().join("secret.html"), root.path().join("leak.html"))
        .unwrap();
    let resolver = PathResolver::new(root.path(), "index.html").unwrap();

    let candidate = resolver.resolve("/leak.html").unwrap();
    assert_eq!(
        resolver.confine(&candidate).await,
        Err(ResolveError::OutsideRoot)
    );
}
