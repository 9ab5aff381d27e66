//! TallyForge runtime configuration schema, typed for serde YAML
//! deserialization. Every section and field has a default so a partial
//! config file (or none at all) still yields a runnable config.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TallyForgeConfig {
    pub discord: DiscordConfig,
    pub payroll: PayrollConfig,
    pub ocr: OcrConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscordConfig {
    /// Bot token. Keep this out of version control.
    pub token: String,
    /// Channel watched for receipt screenshots.
    pub proof_channel_id: u64,
    /// Channel where payout reports are published.
    pub payments_channel_id: u64,
    /// Guild whose roles drive the payout percentages.
    pub guild_id: u64,
    pub command_prefix: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            proof_channel_id: 0,
            payments_channel_id: 0,
            guild_id: 0,
            command_prefix: "!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollConfig {
    /// Display-only currency suffix.
    pub currency_symbol: String,
    /// Weekday of the automatic payout ("friday", "fri", ...).
    pub payout_weekday: String,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            payout_weekday: "friday".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrConfig {
    /// Tesseract binary name or path.
    pub tesseract_cmd: String,
    /// Tesseract language pack (e.g. "eng", "eng+ell").
    pub language: String,
    /// Images narrower than this are upscaled before recognition.
    pub min_width: u32,
    pub scale_factor: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            language: "eng".to_string(),
            min_width: 800,
            scale_factor: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { db_path: "payroll_data.db".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, NDJSON logs are also written here with daily rotation.
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), log_dir: None }
    }
}

impl PayrollConfig {
    /// Parse the configured payout weekday.
    pub fn parsed_weekday(&self) -> Option<chrono::Weekday> {
        self.payout_weekday.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn defaults_match_the_deployment_we_ship() {
        let config = TallyForgeConfig::default();
        assert_eq!(config.discord.command_prefix, "!");
        assert_eq!(config.payroll.currency_symbol, "€");
        assert_eq!(config.payroll.parsed_weekday(), Some(Weekday::Fri));
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
        assert_eq!(config.storage.db_path, "payroll_data.db");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let yaml = r#"
discord:
  token: "abc"
  proofChannelId: 111
payroll:
  payoutWeekday: "mon"
"#;
        let config: TallyForgeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.discord.proof_channel_id, 111);
        assert_eq!(config.discord.payments_channel_id, 0);
        assert_eq!(config.payroll.parsed_weekday(), Some(Weekday::Mon));
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn bad_weekday_parses_to_none() {
        let payroll = PayrollConfig {
            payout_weekday: "someday".to_string(),
            ..Default::default()
        };
        assert_eq!(payroll.parsed_weekday(), None);
    }
}
