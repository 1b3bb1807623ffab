mod apply;
mod matching;

pub use apply::{PatchOutcome, install_definition, remove_by_command, remove_definition};
pub use matching::{matcher_equals, matchers_to_remove};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CONFIG_DIR: &str = ".claude";
pub const SETTINGS_LOCAL: &str = "settings.local.json";
pub const SETTINGS_SHARED: &str = "settings.json";

/// Command the installed hooks run; the guard binary reads the event
/// payload from stdin.
pub const GUARD_COMMAND: &str = "latch-guard";

/// A single shell command bound to a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
}

impl Hook {
    pub fn command<T: Into<String>>(command: T) -> Self {
        Self {
            kind: "command".to_string(),
            command: command.into(),
        }
    }
}

/// A tool-name pattern plus the hooks that fire when it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMatcher {
    pub matcher: String,
    pub hooks: Vec<Hook>,
}

/// Event name to matcher list, the shape of the `hooks` settings key.
pub type HookDefinition = BTreeMap<String, Vec<HookMatcher>>;

/// The hook set `latch install` manages.
pub fn guard_definition() -> HookDefinition {
    let mut definition = HookDefinition::new();
    definition.insert(
        "PreToolUse".to_string(),
        vec![HookMatcher {
            matcher: "Bash".to_string(),
            hooks: vec![Hook::command(GUARD_COMMAND)],
        }],
    );
    definition
}

/// Which settings file inside the configuration root a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    Local,
    Shared,
}

impl SettingsScope {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Local => SETTINGS_LOCAL,
            Self::Shared => SETTINGS_SHARED,
        }
    }
}
