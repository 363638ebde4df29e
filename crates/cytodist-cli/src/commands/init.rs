use std::path::PathBuf;

use cytodist_core::config::CytodistConfig;

/// Write a default configuration file for editing.
///
/// Safe to run multiple times - won't overwrite an existing file unless
/// `force` is true.
pub fn cmd_init(output: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = output.unwrap_or_else(|| PathBuf::from("cytodist.yml"));

    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let config = CytodistConfig::default();
    let yaml_str =
        serde_yaml::to_string(&config).map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&path, yaml_str).map_err(|e| format!("Failed to write config file: {}", e))?;

    println!("Default configuration written to: {}", path.display());
    println!("Edit this file to change channel roles, the pixel-to-micron factor,");
    println!("and segmentation parameters.");

    Ok(())
}
