use std::env;
use std::fs;
use std::path::Path;

use dirs::home_dir;

use crate::decision::{Decision, decide};
use crate::discover::discover;
use crate::error::{LatchError, Result};
use crate::hooks::{self, SettingsScope};
use crate::prompt::{Prompter, TerminalPrompter};

use super::{report_diagnostics, write_atomic};

pub fn run_install() -> Result<()> {
    let cwd = env::current_dir()?;
    let home = home_dir().ok_or(LatchError::HomeDirNotFound)?;
    let mut prompter = TerminalPrompter;
    install_in(&cwd, &home, SettingsScope::Local, &mut prompter)
}

/// Discovery, target decision, then an additive patch. Install never
/// destroys unrelated content, so the write happens without a diff
/// gate; cancellation at the decision step leaves everything untouched.
pub fn install_in(
    start_dir: &Path,
    home_dir: &Path,
    scope: SettingsScope,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let discovery = discover(start_dir, home_dir, scope.file_name());
    let Decision::Proceed { root, create_new } = decide(&discovery, prompter)? else {
        println!("Installation cancelled. No changes were made.");
        return Ok(());
    };

    if create_new {
        fs::create_dir_all(&root)?;
    }

    let settings_path = root.join(scope.file_name());
    let pre_existing = settings_path.is_file();
    let original = if pre_existing {
        fs::read_to_string(&settings_path)?
    } else {
        String::new()
    };

    let outcome = hooks::install_definition(&original, &hooks::guard_definition());
    report_diagnostics(&settings_path, &outcome.errors);
    if outcome.changed == 0 {
        if outcome.errors.is_empty() {
            println!("Hooks already installed in {}", settings_path.display());
        } else {
            println!(
                "Could not update {}; fix the syntax problems above and retry.",
                settings_path.display()
            );
        }
        return Ok(());
    }

    write_atomic(&settings_path, &outcome.text)?;

    if pre_existing {
        println!(
            "Updated {} ({} hook entries added)",
            settings_path.display(),
            outcome.changed
        );
    } else {
        println!("Created {}", settings_path.display());
    }
    Ok(())
}
