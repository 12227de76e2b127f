use std::error::Error;

use crate::core::config::{Config, ConfigKey};

/// Apply `value` for `key` to `config`; an empty value leaves it untouched.
pub fn apply_set(config: &mut Config, key: ConfigKey, value: &[String]) -> Option<String> {
    let joined = value.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return None;
    }
    config.set_value(key, trimmed.to_string());
    Some(trimmed.to_string())
}

pub fn set_config_value(key: ConfigKey, value: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match apply_set(&mut config, key, &value) {
        Some(applied) => {
            config.save()?;
            if key == ConfigKey::ApiKey {
                println!("✅ Set {key}");
            } else {
                println!("✅ Set {key} to: {applied}");
            }
        }
        None => {
            eprintln!("⚠️  No value given for {key}.");
            config.print_all();
        }
    }
    Ok(())
}

pub fn unset_config_value(key: ConfigKey) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    config.unset_value(key);
    config.save()?;
    println!("✅ Unset {key}");
    Ok(())
}

pub fn print_config() -> Result<(), Box<dyn Error>> {
    Config::load()?.print_all();
    Ok(())
}
