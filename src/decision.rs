use std::path::PathBuf;

use crate::discover::DiscoveryResult;
use crate::error::Result;
use crate::hooks::CONFIG_DIR;
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed { root: PathBuf, create_new: bool },
    Cancelled,
}

/// Turns a discovery result plus one round of prompting into an install
/// target. A root in the current directory proceeds silently; a parent
/// root asks first and falls through to the create-new list on "no";
/// with nothing found the candidate list is offered, defaulted to
/// Cancel. Dismissing any prompt counts as the negative answer.
pub fn decide(discovery: &DiscoveryResult, prompter: &mut dyn Prompter) -> Result<Decision> {
    if discovery.found
        && let Some(root) = &discovery.root_path
    {
        if discovery.is_current_directory {
            return Ok(Decision::Proceed {
                root: root.clone(),
                create_new: false,
            });
        }
        let message = format!("Use the Claude settings found in {}?", root.display());
        if let Some(true) = prompter.confirm(&message, true)? {
            return Ok(Decision::Proceed {
                root: root.clone(),
                create_new: false,
            });
        }
    }
    choose_new_root(&discovery.candidates, prompter)
}

fn choose_new_root(candidates: &[PathBuf], prompter: &mut dyn Prompter) -> Result<Decision> {
    let mut items: Vec<String> = candidates
        .iter()
        .map(|dir| format!("Create {} in {}", CONFIG_DIR, dir.display()))
        .collect();
    items.push("Cancel".to_string());
    let default = items.len() - 1;
    match prompter.select("Where should the hooks be installed?", &items, default)? {
        Some(choice) if choice < candidates.len() => Ok(Decision::Proceed {
            root: candidates[choice].join(CONFIG_DIR),
            create_new: true,
        }),
        _ => Ok(Decision::Cancelled),
    }
}
