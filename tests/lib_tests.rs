use pecel::engine::filter::normalize_extensions;
use pecel::engine::{
    FilterCriteria, dotted_extension, format_bytes, is_hidden, path_relative_to,
    path_to_display_string,
};
use pecel::{FilterOpts, PecelError};
use std::path::{Path, PathBuf};

fn criteria(opts: FilterOpts) -> FilterCriteria {
    FilterCriteria::new(Path::new("/root"), &opts).unwrap()
}

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/foo/bar/baz/qux");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("baz/qux"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/other/qux");
    assert_eq!(path_relative_to(&path, &base), None);
}

#[test]
fn test_path_to_display_string_forward_slashes() {
    assert_eq!(
        path_to_display_string(&PathBuf::from("src/main.rs")),
        "src/main.rs"
    );
    assert_eq!(path_to_display_string(Path::new(r"src\net\tcp.rs")), "src/net/tcp.rs");
}

// --- hidden / extension helpers ---

#[test]
fn test_is_hidden() {
    assert!(is_hidden(".git"));
    assert!(is_hidden("~backup"));
    assert!(!is_hidden("~"));
    assert!(!is_hidden("main.rs"));
}

#[test]
fn test_dotted_extension_uses_last_dot() {
    assert_eq!(dotted_extension(Path::new("a/b.tar.gz")), Some(".gz"));
    assert_eq!(dotted_extension(Path::new(".env")), Some(".env"));
    assert_eq!(dotted_extension(Path::new("Makefile")), None);
}

#[test]
fn test_normalize_extensions() {
    let raw = vec![" .go, .rs".to_string(), "".to_string()];
    assert_eq!(normalize_extensions(&raw).unwrap(), [".go", ".rs"]);
    assert!(normalize_extensions(&[".go".to_string(), "*".to_string()]).unwrap().is_empty());
    assert!(matches!(
        normalize_extensions(&["go".to_string()]),
        Err(PecelError::InvalidExtension(e)) if e == "go"
    ));
}

// --- FilterCriteria::accept ---

#[test]
fn test_accept_defaults_take_everything_visible() {
    let c = criteria(FilterOpts::default());
    assert!(c.accept(Path::new("/root/a.go"), 0));
    assert!(c.accept(Path::new("/root/Makefile"), 1 << 30));
    assert!(!c.accept(Path::new("/root/.env"), 10));
}

#[test]
fn test_accept_extension_case_insensitive() {
    let c = criteria(FilterOpts {
        extensions: vec![".GO".into()],
        ..Default::default()
    });
    assert!(c.accept(Path::new("/root/x/Main.go"), 1));
    assert!(c.accept(Path::new("/root/x/LOUD.GO"), 1));
    assert!(!c.accept(Path::new("/root/x/main.rs"), 1));
}

#[test]
fn test_accept_size_bounds_inclusive() {
    let c = criteria(FilterOpts {
        min_size: 10,
        max_size: 20,
        ..Default::default()
    });
    assert!(!c.accept(Path::new("/root/a"), 9));
    assert!(c.accept(Path::new("/root/a"), 10));
    assert!(c.accept(Path::new("/root/a"), 20));
    assert!(!c.accept(Path::new("/root/a"), 21));
}

#[test]
fn test_exclude_wins_over_include() {
    let c = criteria(FilterOpts {
        include_pattern: Some(r"\.rs$".into()),
        exclude_pattern: Some(r"^target/".into()),
        ..Default::default()
    });
    assert!(c.accept(Path::new("/root/src/lib.rs"), 1));
    assert!(!c.accept(Path::new("/root/target/build.rs"), 1));
    assert!(!c.accept(Path::new("/root/src/lib.go"), 1));
}

#[test]
fn test_prunes_hidden_dirs_but_never_root() {
    let c = FilterCriteria::new(Path::new("/work/.cache"), &FilterOpts::default()).unwrap();
    assert!(!c.prunes_dir(Path::new("/work/.cache")));
    assert!(c.prunes_dir(Path::new("/work/.cache/.git")));
    assert!(!c.prunes_dir(Path::new("/work/.cache/src")));
}

#[test]
fn test_invalid_regex_is_reported() {
    let err = FilterCriteria::new(
        Path::new("/root"),
        &FilterOpts {
            include_pattern: Some("[".into()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, PecelError::InvalidPattern { which: "include", .. }));
}

// --- format_bytes ---

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1023), "1023 B");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
}

#[test]
fn test_min_size_without_max() {
    let c = criteria(FilterOpts {
        min_size: 100,
        ..Default::default()
    });
    assert!(!c.accept(Path::new("/root/small.go"), 50));
    assert!(c.accept(Path::new("/root/large.go"), 500));
}
