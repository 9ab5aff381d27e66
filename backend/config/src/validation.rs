//! Config validation with user-friendly error messages.

use thiserror::Error;

use crate::schema::TallyForgeConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation findings from one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &TallyForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_discord(config, &mut report);
    validate_payroll(config, &mut report);
    validate_ocr(config, &mut report);
    report
}

fn validate_discord(config: &TallyForgeConfig, report: &mut ValidationReport) {
    let discord = &config.discord;
    if discord.token.trim().is_empty() {
        report.error("discord.token", "Bot token is not set");
    }
    if discord.proof_channel_id == 0 {
        report.error("discord.proofChannelId", "Proof channel id is not set");
    }
    if discord.payments_channel_id == 0 {
        report.error("discord.paymentsChannelId", "Payments channel id is not set");
    }
    if discord.guild_id == 0 {
        report.error("discord.guildId", "Guild id is not set");
    }
    if discord.command_prefix.is_empty() {
        report.error("discord.commandPrefix", "Command prefix cannot be empty");
    } else if discord.command_prefix.chars().any(|c| c.is_alphanumeric()) {
        report.warn(
            "discord.commandPrefix",
            "Alphanumeric prefixes collide with normal chat text",
        );
    }
}

fn validate_payroll(config: &TallyForgeConfig, report: &mut ValidationReport) {
    if config.payroll.parsed_weekday().is_none() {
        report.error(
            "payroll.payoutWeekday",
            format!("'{}' is not a weekday name", config.payroll.payout_weekday),
        );
    }
    if config.payroll.currency_symbol.is_empty() {
        report.warn("payroll.currencySymbol", "Empty currency symbol");
    }
}

fn validate_ocr(config: &TallyForgeConfig, report: &mut ValidationReport) {
    if config.ocr.tesseract_cmd.trim().is_empty() {
        report.error("ocr.tesseractCmd", "OCR command is not set");
    }
    if config.ocr.scale_factor < 1.0 {
        report.warn(
            "ocr.scaleFactor",
            "Scale factor below 1.0 shrinks small images and hurts recognition",
        );
    }
}
