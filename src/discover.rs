use std::path::{Path, PathBuf};

use crate::hooks::CONFIG_DIR;

/// Outcome of one upward walk. `candidates` are ordered nearest-first;
/// the home directory is never among them.
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    pub found: bool,
    pub root_path: Option<PathBuf>,
    pub settings_exists: bool,
    pub is_current_directory: bool,
    pub candidates: Vec<PathBuf>,
    pub searched: Vec<PathBuf>,
}

/// Looks for a `.claude` configuration root at `start_dir`, then walks
/// parent directories up to (but excluding) `home_dir`. A root in the
/// start directory short-circuits the walk; otherwise the first root
/// found on the way up wins while the walk keeps recording candidates
/// for the create-new flow. Stat failures count as absence.
pub fn discover(start_dir: &Path, home_dir: &Path, settings_file: &str) -> DiscoveryResult {
    let mut result = DiscoveryResult {
        found: false,
        root_path: None,
        settings_exists: false,
        is_current_directory: false,
        candidates: Vec::new(),
        searched: Vec::new(),
    };

    if start_dir != home_dir {
        let root = start_dir.join(CONFIG_DIR);
        if root.is_dir() {
            result.found = true;
            result.settings_exists = root.join(settings_file).is_file();
            result.is_current_directory = true;
            result.root_path = Some(root);
            result.searched.push(start_dir.to_path_buf());
            result.candidates.push(start_dir.to_path_buf());
            return result;
        }
    }

    let mut cur = start_dir.to_path_buf();
    loop {
        if cur == home_dir {
            break;
        }
        result.searched.push(cur.clone());
        result.candidates.push(cur.clone());
        if !result.found {
            let root = cur.join(CONFIG_DIR);
            if root.is_dir() {
                result.found = true;
                result.settings_exists = root.join(settings_file).is_file();
                result.root_path = Some(root);
            }
        }
        match cur.parent() {
            Some(parent) if parent != cur => cur = parent.to_path_buf(),
            _ => break,
        }
    }
    result
}
