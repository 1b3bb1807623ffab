use std::fs;
use std::path::Path;

use latch::discover::discover;
use latch::hooks::SETTINGS_LOCAL;

struct Fixture {
    _dir: tempfile::TempDir,
    home: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let home = dir.path().join("home");
    fs::create_dir_all(&home).expect("create home");
    Fixture { _dir: dir, home }
}

fn mkdirs(base: &Path, rel: &str) -> std::path::PathBuf {
    let path = base.join(rel);
    fs::create_dir_all(&path).expect("create dirs");
    path
}

#[test]
fn root_in_start_directory_short_circuits_the_walk() {
    let fx = fixture();
    let work = mkdirs(&fx.home, "work");
    let project = mkdirs(&work, "project");
    mkdirs(&work, ".claude");
    mkdirs(&project, ".claude");

    let result = discover(&project, &fx.home, SETTINGS_LOCAL);
    assert!(result.found);
    assert!(result.is_current_directory);
    assert_eq!(result.root_path.as_deref(), Some(project.join(".claude").as_path()));
    assert!(!result.settings_exists);
    assert_eq!(result.searched, vec![project.clone()]);

    fs::write(project.join(".claude").join(SETTINGS_LOCAL), "{}\n").expect("write settings");
    let result = discover(&project, &fx.home, SETTINGS_LOCAL);
    assert!(result.settings_exists);
}

#[test]
fn root_in_ancestor_is_found_with_candidates_nearest_first() {
    let fx = fixture();
    let work = mkdirs(&fx.home, "work");
    let project = mkdirs(&work, "project");
    let sub = mkdirs(&project, "sub");
    mkdirs(&work, ".claude");

    let result = discover(&sub, &fx.home, SETTINGS_LOCAL);
    assert!(result.found);
    assert!(!result.is_current_directory);
    assert_eq!(result.root_path, Some(work.join(".claude")));
    assert_eq!(result.candidates, vec![sub, project, work]);
}

#[test]
fn home_directory_root_is_never_returned() {
    let fx = fixture();
    mkdirs(&fx.home, ".claude");
    let a = mkdirs(&fx.home, "a");
    let b = mkdirs(&a, "b");

    let result = discover(&b, &fx.home, SETTINGS_LOCAL);
    assert!(!result.found);
    assert!(result.root_path.is_none());
    assert_eq!(result.candidates, vec![b, a]);
}

#[test]
fn starting_in_home_yields_nothing() {
    let fx = fixture();
    mkdirs(&fx.home, ".claude");

    let result = discover(&fx.home, &fx.home, SETTINGS_LOCAL);
    assert!(!result.found);
    assert!(result.candidates.is_empty());
    assert!(result.searched.is_empty());
}
