use std::env;
use std::fs;
use std::path::Path;

use dirs::home_dir;

use crate::diff::show_diff;
use crate::discover::discover;
use crate::error::{LatchError, Result};
use crate::hooks::{self, GUARD_COMMAND, SettingsScope};
use crate::prompt::{Prompter, TerminalPrompter};

use super::{report_diagnostics, write_atomic};

pub fn run_uninstall() -> Result<()> {
    let cwd = env::current_dir()?;
    let home = home_dir().ok_or(LatchError::HomeDirNotFound)?;
    let mut prompter = TerminalPrompter;
    uninstall_in(&cwd, &home, SettingsScope::Local, &mut prompter)
}

/// Removal is gated twice: once when the target is a parent scope, and
/// once on the diff preview. The settings file is only rewritten after
/// an explicit yes; every other path leaves it exactly as found.
pub fn uninstall_in(
    start_dir: &Path,
    home_dir: &Path,
    scope: SettingsScope,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let discovery = discover(start_dir, home_dir, scope.file_name());
    let root = match &discovery.root_path {
        Some(root) if discovery.settings_exists => root.clone(),
        _ => {
            println!("Nothing to uninstall.");
            return Ok(());
        }
    };

    if !discovery.is_current_directory {
        let message = format!("Remove hooks from the parent scope {}?", root.display());
        if prompter.confirm(&message, false)? != Some(true) {
            println!("Uninstall cancelled. No changes were made.");
            return Ok(());
        }
    }

    let settings_path = root.join(scope.file_name());
    let original = fs::read_to_string(&settings_path)?;
    let outcome = hooks::remove_by_command(&original, GUARD_COMMAND);
    report_diagnostics(&settings_path, &outcome.errors);
    if outcome.changed == 0 {
        println!(
            "No {} hooks found in {}",
            GUARD_COMMAND,
            settings_path.display()
        );
        return Ok(());
    }

    // The TempDir is removed on every exit path, including diff failure
    // and propagated write errors.
    let preview_dir = tempfile::tempdir()?;
    let preview_path = preview_dir.path().join(scope.file_name());
    fs::write(&preview_path, &outcome.text)?;
    show_diff(&settings_path, &preview_path);

    let message = format!(
        "Remove {} hook command(s) from {}?",
        outcome.changed,
        settings_path.display()
    );
    if prompter.confirm(&message, false)? == Some(true) {
        write_atomic(&settings_path, &outcome.text)?;
        println!(
            "Removed {} hook command(s) from {}",
            outcome.changed,
            settings_path.display()
        );
    } else {
        println!("Uninstall cancelled. No changes were made.");
    }
    Ok(())
}
