use pecel::{FilterOpts, Opts, OutputFormat, PecelError, combine_dir};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

fn json_paths(output: &Path) -> Vec<String> {
    let doc: serde_json::Value = serde_json::from_slice(&fs::read(output).unwrap()).unwrap();
    doc["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["relative_path"].as_str().unwrap().to_string())
        .collect()
}

fn opts_for(input: &Path, output: &Path) -> Opts {
    Opts {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        format: OutputFormat::Json,
        ..Default::default()
    }
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.go", b"package main\n");
    write(root, ".hidden/b.go", b"package hidden\n");
    write(root, "c.txt", b"notes\n");
    write(root, "pkg/z.go", b"package pkg\n");
    write(root, "pkg/sub/y.go", b"package sub\n");
    write(root, "pkg-extra/x.go", b"package extra\n");
    dir
}

#[test]
fn test_extension_filter_and_hidden_pruning() {
    let tree = sample_tree();
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    let mut opts = opts_for(tree.path(), &output);
    opts.filter.extensions = vec![".go".to_string()];

    let summary = combine_dir(&opts).unwrap();
    let paths = json_paths(&output);
    assert_eq!(paths, ["a.go", "pkg/sub/y.go", "pkg/z.go", "pkg-extra/x.go"]);
    assert_eq!(summary.stats.files_processed, 4);
    // root, pkg, pkg/sub, pkg-extra; .hidden is pruned and not counted
    assert_eq!(summary.stats.directories, 4);
    assert_eq!(summary.candidates, 4);
    assert_eq!(summary.output_path.as_deref(), Some(output.as_path()));
}

#[test]
fn test_hidden_included_when_disabled() {
    let tree = sample_tree();
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    let mut opts = opts_for(tree.path(), &output);
    opts.filter.extensions = vec![".go".to_string()];
    opts.filter.exclude_hidden = false;

    combine_dir(&opts).unwrap();
    assert!(json_paths(&output).contains(&".hidden/b.go".to_string()));
}

#[test]
fn test_size_bounds() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "empty.txt", b"");
    write(dir.path(), "small.txt", b"1234");
    write(dir.path(), "big.txt", &[b'x'; 100]);
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");

    let mut opts = opts_for(dir.path(), &output);
    opts.filter.min_size = 1;
    opts.filter.max_size = 10;
    combine_dir(&opts).unwrap();
    assert_eq!(json_paths(&output), ["small.txt"]);

    // zero bounds mean unbounded: the empty file is kept
    let opts = opts_for(dir.path(), &output);
    let summary = combine_dir(&opts).unwrap();
    assert_eq!(json_paths(&output), ["big.txt", "empty.txt", "small.txt"]);
    assert_eq!(summary.stats.total_bytes, 104);
}

#[test]
fn test_regex_filters_use_relative_forward_slash_paths() {
    let tree = sample_tree();
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    let mut opts = opts_for(tree.path(), &output);
    opts.filter.include_pattern = Some(r"^pkg/".to_string());
    opts.filter.exclude_pattern = Some(r"sub/".to_string());

    combine_dir(&opts).unwrap();
    assert_eq!(json_paths(&output), ["pkg/z.go"]);
}

#[test]
fn test_empty_directory_still_writes_output() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    let summary = combine_dir(&opts_for(dir.path(), &output)).unwrap();

    assert_eq!(summary.stats.files_processed, 0);
    assert_eq!(summary.stats.directories, 1);
    assert!(!summary.all_ingestion_failed());
    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(doc["files"].as_array().unwrap().len(), 0);
    assert_eq!(doc["metadata"]["files_count"], 0);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = TempDir::new().unwrap();
    for i in 0..40 {
        write(dir.path(), &format!("d{}/f{:02}.rs", i % 5, i), format!("// {i}\n").as_bytes());
    }
    let out = TempDir::new().unwrap();

    let seq_out = out.path().join("seq.json");
    let seq = combine_dir(&opts_for(dir.path(), &seq_out)).unwrap();

    for workers in [0, 2, 8] {
        let par_out = out.path().join(format!("par{workers}.json"));
        let mut opts = opts_for(dir.path(), &par_out);
        opts.workers = workers;
        let par = combine_dir(&opts).unwrap();
        assert_eq!(json_paths(&par_out), json_paths(&seq_out));
        assert_eq!(par.stats.files_processed, seq.stats.files_processed);
        assert_eq!(par.stats.total_bytes, seq.stats.total_bytes);
        assert_eq!(par.stats.directories, seq.stats.directories);
    }
}

#[test]
fn test_sequential_runs_are_deterministic() {
    let tree = sample_tree();
    let out = TempDir::new().unwrap();
    let first = out.path().join("first.json");
    let second = out.path().join("second.json");
    combine_dir(&opts_for(tree.path(), &first)).unwrap();
    combine_dir(&opts_for(tree.path(), &second)).unwrap();
    assert_eq!(json_paths(&first), json_paths(&second));
}

#[test]
fn test_output_inside_input_is_not_ingested() {
    let tree = sample_tree();
    let output = tree.path().join("combined.json");
    fs::write(&output, b"stale").unwrap();
    let opts = opts_for(tree.path(), &output);

    combine_dir(&opts).unwrap();
    assert!(!json_paths(&output).contains(&"combined.json".to_string()));
}

#[test]
fn test_fatal_input_errors() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");

    let missing = opts_for(&out.path().join("nope"), &output);
    assert!(combine_dir(&missing).is_err());

    let file = out.path().join("plain.txt");
    fs::write(&file, b"x").unwrap();
    assert!(combine_dir(&opts_for(&file, &output)).is_err());

    let tree = sample_tree();
    let mut bad_regex = opts_for(tree.path(), &output);
    bad_regex.filter = FilterOpts {
        exclude_pattern: Some("(".to_string()),
        ..Default::default()
    };
    assert!(combine_dir(&bad_regex).is_err());
    assert!(!output.exists());

    let bad_output = opts_for(tree.path(), &out.path().join("missing/dir/out.json"));
    assert!(combine_dir(&bad_output).is_err());
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok.txt", b"fine");
    write(dir.path(), "locked.txt", b"secret");
    let locked = dir.path().join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // root ignores permission bits
    if fs::read(&locked).is_ok() {
        return;
    }

    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    let summary = combine_dir(&opts_for(dir.path(), &output)).unwrap();
    assert_eq!(json_paths(&output), ["ok.txt"]);
    assert_eq!(summary.ingest_errors, 1);
    assert_eq!(summary.stats.files_processed, 1);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_recorded_and_walk_continues() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", b"a");
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("b.txt")).unwrap();
    write(dir.path(), "c.txt", b"c");

    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    let summary = combine_dir(&opts_for(dir.path(), &output)).unwrap();
    assert_eq!(json_paths(&output), ["a.txt", "c.txt"]);
    assert_eq!(summary.stats.files_processed, 2);
    assert_eq!(summary.discovery_errors, 1);
    assert_eq!(summary.ingest_errors, 0);
}

#[test]
fn test_write_failure_is_fatal_and_leaves_nothing() {
    let tree = sample_tree();
    let out = TempDir::new().unwrap();
    let output = out.path().join("out.json");
    // a non-empty directory where the temp file must go cannot be replaced
    let blocker = out.path().join(".out.json.tmp");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"x").unwrap();

    let err = combine_dir(&opts_for(tree.path(), &output)).unwrap_err();
    assert!(matches!(err, PecelError::Write { .. }), "{err}");
    assert!(!output.exists());
    assert!(blocker.join("keep").exists());
}

#[cfg(unix)]
#[test]
fn test_read_only_output_dir_fails_cleanly() {
    use std::os::unix::fs::PermissionsExt;

    let tree = sample_tree();
    let out = TempDir::new().unwrap();
    let locked = out.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    // root ignores permission bits
    if fs::write(locked.join("write-check"), b"").is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let output = locked.join("out.json");
    let err = combine_dir(&opts_for(tree.path(), &output)).unwrap_err();
    assert!(matches!(err, PecelError::Write { .. }), "{err}");
    assert_eq!(fs::read_dir(&locked).unwrap().count(), 0);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
