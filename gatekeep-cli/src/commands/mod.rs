//! Command implementations for the `gatekeep` CLI.

/// Settings validation — `gatekeep check <file>`.
///
/// Loads the file, resolves secrets (after loading `.env`), and builds every
/// rule of every block under `access_control_rules`.
pub mod check;

/// Rule listing — `gatekeep rules`.
pub mod rules;
