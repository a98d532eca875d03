//! Configuration management commands.

use clap::Subcommand;
use timeblock_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the swap threshold (clamped to 0..1)
    SetSwapThreshold { value: f64 },
    /// Print the config file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("swap_threshold = {}", config.drag.swap_threshold);
        }
        ConfigAction::SetSwapThreshold { value } => {
            let mut config = Config::load()?;
            config.drag.set_swap_threshold(value);
            config.save()?;
            println!("swap_threshold = {}", config.drag.swap_threshold);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }

    Ok(())
}
