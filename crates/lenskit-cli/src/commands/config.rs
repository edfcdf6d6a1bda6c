//! Config command implementation.

use crate::cli::{Command, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Load the configuration a command runs with.
///
/// `config --init` may name a file that does not exist yet; it then starts
/// from the defaults. Every other command requires an explicit path to exist.
pub fn load_for_command(path: Option<&Path>, command: &Command) -> Result<Config> {
    match (path, command) {
        (Some(path), Command::Config(ConfigArgs { init: true })) if !path.exists() => Ok(Config::default()),
        _ => Config::load(path),
    }
}

/// Execute the config command.
///
/// Prints the effective configuration; with `--init`, also writes the
/// defaults to `path` unless a file is already there.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    if args.init {
        if path.exists() {
            println!(
                "{}",
                formatter.warning(&format!("Config file already exists: {}", path.display()))
            );
        } else {
            Config::default().save(path)?;
            println!("{}", formatter.success(&format!("Wrote default config to {}", path.display())));
            return Ok(());
        }
    }

    if formatter.is_json() {
        println!("{}", formatter.json(config)?);
    } else {
        println!("{}", formatter.info(&format!("Config file: {}", path.display())));
        println!("{}", config.to_toml()?);
    }
    Ok(())
}
