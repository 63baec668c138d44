//! # gatekeep-cli
//!
//! Command-line tool for validating gatekeep settings files.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gatekeep check <file>` | Validate every access-control block of a settings file |
//! | `gatekeep rules` | List the rule names the validator recognizes |

pub mod commands;
