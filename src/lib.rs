pub mod commands;
pub mod decision;
pub mod diff;
pub mod discover;
pub mod error;
pub mod hooks;
pub mod jsonc;
pub mod prompt;
