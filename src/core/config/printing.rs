use crate::core::config::data::Config;
use crate::core::config::defaults::ConfigKey;

/// Keep the last four characters of a secret visible.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

impl Config {
    pub fn display_lines(&self) -> Vec<String> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let shown = match (key, self.get_value(key)) {
                    (ConfigKey::ApiKey, Some(secret)) => mask_secret(secret),
                    (_, Some(value)) => value.to_string(),
                    (ConfigKey::Model, None) => format!("{} (default)", self.effective_model()),
                    (ConfigKey::BaseUrl, None) => {
                        format!("{} (default)", self.effective_base_url())
                    }
                    (_, None) => "(unset)".to_string(),
                };
                format!("  {key}: {shown}")
            })
            .collect()
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.display_lines() {
            println!("{line}");
        }
    }
}
