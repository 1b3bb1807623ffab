use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use latch::commands::{install_in, uninstall_in};
use latch::error::Result;
use latch::hooks::{SETTINGS_LOCAL, SettingsScope};
use latch::prompt::Prompter;
use serde_json::Value;

/// Canned prompt answers; a prompt the script did not anticipate fails
/// the test.
struct Scripted {
    confirms: VecDeque<Option<bool>>,
    selects: VecDeque<Option<usize>>,
}

impl Scripted {
    fn new(confirms: Vec<Option<bool>>, selects: Vec<Option<usize>>) -> Self {
        Self {
            confirms: confirms.into(),
            selects: selects.into(),
        }
    }
}

impl Prompter for Scripted {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>> {
        match self.confirms.pop_front() {
            Some(answer) => Ok(answer),
            None => panic!("unexpected confirm prompt: {message}"),
        }
    }

    fn select(&mut self, message: &str, _items: &[String], _default: usize) -> Result<Option<usize>> {
        match self.selects.pop_front() {
            Some(answer) => Ok(answer),
            None => panic!("unexpected select prompt: {message}"),
        }
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    home: PathBuf,
    work: PathBuf,
    project: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let home = dir.path().join("home");
    let work = home.join("work");
    let project = work.join("project");
    fs::create_dir_all(&project).expect("create dirs");
    Fixture {
        _dir: dir,
        home,
        work,
        project,
    }
}

fn settings_value(root: &Path) -> Value {
    let text = fs::read_to_string(root.join(SETTINGS_LOCAL)).expect("read settings");
    serde_json::from_str(&text).expect("settings should be valid JSON")
}

const GUARDED: &str = "{\n  \"theme\": \"dark\",\n  \"hooks\": {\n    \"PreToolUse\": [\n      { \"matcher\": \"Bash\", \"hooks\": [{ \"type\": \"command\", \"command\": \"latch-guard\" }] }\n    ]\n  }\n}\n";

#[test]
fn fresh_install_creates_the_chosen_root() {
    let fx = fixture();
    let mut prompter = Scripted::new(vec![], vec![Some(0)]);
    install_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("install should succeed");

    let root = fx.project.join(".claude");
    assert!(root.is_dir());
    let value = settings_value(&root);
    assert_eq!(
        value["hooks"]["PreToolUse"][0]["hooks"][0]["command"],
        "latch-guard"
    );
}

#[test]
fn cancelled_install_creates_nothing() {
    let fx = fixture();
    let mut prompter = Scripted::new(vec![], vec![None]);
    install_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("cancel is not an error");
    assert!(!fx.project.join(".claude").exists());
}

#[test]
fn install_reuses_a_parent_root_after_confirmation() {
    let fx = fixture();
    fs::create_dir_all(fx.work.join(".claude")).expect("create parent root");

    let mut prompter = Scripted::new(vec![Some(true)], vec![]);
    install_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("install should succeed");

    assert!(!fx.project.join(".claude").exists());
    let value = settings_value(&fx.work.join(".claude"));
    assert_eq!(value["hooks"]["PreToolUse"][0]["matcher"], "Bash");
}

#[test]
fn repeat_install_leaves_the_file_alone() {
    let fx = fixture();
    let root = fx.project.join(".claude");
    fs::create_dir_all(&root).expect("create root");

    let mut prompter = Scripted::new(vec![], vec![]);
    install_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("first install");
    let after_first = fs::read_to_string(root.join(SETTINGS_LOCAL)).expect("read");

    install_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("second install");
    let after_second = fs::read_to_string(root.join(SETTINGS_LOCAL)).expect("read");
    assert_eq!(after_first, after_second);
}

#[test]
fn uninstall_without_a_settings_file_does_nothing() {
    let fx = fixture();
    let root = fx.project.join(".claude");
    fs::create_dir_all(&root).expect("create root");

    let mut prompter = Scripted::new(vec![], vec![]);
    uninstall_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("no-op uninstall");
    assert!(!root.join(SETTINGS_LOCAL).exists());
}

#[test]
fn confirmed_uninstall_rewrites_only_the_hooks() {
    let fx = fixture();
    let root = fx.project.join(".claude");
    fs::create_dir_all(&root).expect("create root");
    fs::write(root.join(SETTINGS_LOCAL), GUARDED).expect("seed settings");

    let mut prompter = Scripted::new(vec![Some(true)], vec![]);
    uninstall_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("uninstall should succeed");

    let value = settings_value(&root);
    assert_eq!(value["theme"], "dark");
    assert!(value.get("hooks").is_none());
}

#[test]
fn declined_uninstall_leaves_the_file_byte_identical() {
    let fx = fixture();
    let root = fx.project.join(".claude");
    fs::create_dir_all(&root).expect("create root");
    fs::write(root.join(SETTINGS_LOCAL), GUARDED).expect("seed settings");

    let mut prompter = Scripted::new(vec![Some(false)], vec![]);
    uninstall_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("declined uninstall");

    let text = fs::read_to_string(root.join(SETTINGS_LOCAL)).expect("read");
    assert_eq!(text, GUARDED);
}

#[test]
fn diff_preview_reads_but_never_writes() {
    let fx = fixture();
    let original = fx.project.join("current.json");
    let candidate = fx.project.join("proposed.json");
    fs::write(&original, "{\n  \"a\": 1\n}\n").expect("write original");
    fs::write(&candidate, "{\n  \"a\": 2\n}\n").expect("write candidate");

    latch::diff::show_diff(&original, &candidate);

    assert_eq!(
        fs::read_to_string(&original).expect("read"),
        "{\n  \"a\": 1\n}\n"
    );
    assert_eq!(
        fs::read_to_string(&candidate).expect("read"),
        "{\n  \"a\": 2\n}\n"
    );
}

#[test]
fn parent_scope_uninstall_requires_an_extra_yes() {
    let fx = fixture();
    let root = fx.work.join(".claude");
    fs::create_dir_all(&root).expect("create root");
    fs::write(root.join(SETTINGS_LOCAL), GUARDED).expect("seed settings");

    let mut prompter = Scripted::new(vec![Some(false)], vec![]);
    uninstall_in(&fx.project, &fx.home, SettingsScope::Local, &mut prompter)
        .expect("declined uninstall");

    let text = fs::read_to_string(root.join(SETTINGS_LOCAL)).expect("read");
    assert_eq!(text, GUARDED);
}
