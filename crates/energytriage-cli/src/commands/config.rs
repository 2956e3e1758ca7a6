use std::path::Path;

use clap::Subcommand;
use energytriage_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dotted key (e.g. "gesture.threshold", "session.default_energy")
        key: String,
    },
    /// Set a config value
    Set {
        /// Dotted key
        key: String,
        /// New value
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// Show the whole configuration
    Show,
    /// Print the config file location
    Path,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.set(&key, &value)?;
            config.save_to(path)?;
            println!("ok");
        }
        ConfigAction::Show => {
            let config = Config::load_from(path)?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Reset => {
            Config::default().save_to(path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
