use std::path::Path;

use colored::Colorize;
use gatekeep_core::settings::{
    load_dotenv, load_dotenv_from, EnvLookup, ProcessEnv, RawSettings, SettingValue, SettingsError,
};
use gatekeep_security::{parse_block, RuleSettings};
use tracing::debug;

/// Top-level key holding the list of access-control blocks.
pub const BLOCKS_KEY: &str = "access_control_rules";

/// Validation outcome of one block.
#[derive(Debug)]
pub struct BlockReport {
    /// The block's `name`, or its position when unnamed.
    pub name: String,
    /// Names of the rules built, or the first error.
    pub outcome: Result<Vec<&'static str>, SettingsError>,
}

/// Validate every block of already-loaded settings.
///
/// Fails only if the block list itself is missing or malformed; per-block
/// errors are collected into the reports.
pub fn check_settings(
    settings: &RawSettings,
    env: &dyn EnvLookup,
) -> Result<Vec<BlockReport>, SettingsError> {
    let blocks = match settings.req(BLOCKS_KEY)? {
        SettingValue::List(items) => items,
        other => return Err(SettingsError::wrong_type(BLOCKS_KEY, "a list of blocks", other)),
    };

    let reports = blocks
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let fallback = format!("#{}", i + 1);
            let Some(block) = item.as_map() else {
                return BlockReport {
                    name: fallback,
                    outcome: Err(SettingsError::wrong_type(
                        &format!("{BLOCKS_KEY}[{i}]"),
                        "a map",
                        item,
                    )),
                };
            };
            let name = match block.opt::<String>("name") {
                Ok(Some(name)) => name,
                _ => fallback,
            };
            let outcome = parse_block(block, env)
                .map(|rules| rules.iter().map(|r| r.name()).collect());
            debug!(block = %name, ok = outcome.is_ok(), "Checked block");
            BlockReport { name, outcome }
        })
        .collect();
    Ok(reports)
}

/// Validate a settings file and print a colored report.
///
/// Loads `env_file` if given, otherwise `.env` when present. Returns the
/// number of invalid blocks.
pub fn run(path: &Path, env_file: Option<&Path>) -> Result<usize, Box<dyn std::error::Error>> {
    match env_file {
        Some(env_file) => load_dotenv_from(env_file)?,
        None => load_dotenv(),
    }

    let settings = RawSettings::load_file(path)?;
    let reports = check_settings(&settings, &ProcessEnv)?;

    println!("{}", format!("Checking {}", path.display()).bold());
    let mut failures = 0;
    for report in &reports {
        match &report.outcome {
            Ok(rules) if rules.is_empty() => {
                println!("  {} {} (no known rules)", "!".yellow(), report.name);
            }
            Ok(rules) => {
                println!("  {} {} ({})", "✓".green(), report.name, rules.join(", "));
            }
            Err(e) => {
                failures += 1;
                println!("  {} {}: {}", "✗".red(), report.name, e.to_string().red());
            }
        }
    }

    println!();
    if failures == 0 {
        println!("{}", format!("{} block(s) valid", reports.len()).green());
    } else {
        println!(
            "{}",
            format!("{failures} of {} block(s) invalid", reports.len()).red()
        );
    }
    Ok(failures)
}
