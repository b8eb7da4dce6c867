use std::path::PathBuf;

use clap::ArgMatches;
use colored::*;

use crate::config::{load_config, save_config};
use crate::error::{ScrollError, ScrollResult};
use crate::logging::get_log_file_path;
use crate::observer::ObserverOptions;

pub fn handle_config(matches: &ArgMatches) -> ScrollResult<()> {
    let mut config = load_config()?;
    let mut changed = false;

    if let Some(path) = matches.get_one::<PathBuf>("users-file") {
        config.users_file = Some(path.clone());
        changed = true;
    }

    if let Some(size) = matches.get_one::<usize>("page-size") {
        if *size == 0 {
            return Err(ScrollError::InvalidInput("page size must be at least 1".to_string()));
        }
        config.page_size = *size;
        changed = true;
    }

    if let Some(thresholds) = matches.get_many::<f32>("threshold") {
        let thresholds: Vec<f32> = thresholds.copied().collect();
        // Validate before persisting
        ObserverOptions::with_thresholds(thresholds.clone())?;
        config.thresholds = thresholds;
        changed = true;
    }

    if changed {
        save_config(&config)?;
        println!("{}", "Configuration saved.".green());
    }

    if matches.get_flag("show") || !changed {
        println!("{}", "Configuration:".bold());
        println!(
            "  Users file: {}",
            config
                .users_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".dimmed().to_string())
        );
        println!("  Page size:  {}", config.page_size);
        println!("  Tick rate:  {}ms", config.tick_rate_ms);
        println!("  Thresholds: {:?}", config.thresholds);
        if let Some(log_file) = get_log_file_path() {
            println!("  Log file:   {}", log_file.display().to_string().dimmed());
        }
    }

    Ok(())
}
