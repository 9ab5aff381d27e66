//! `tallyforge doctor` — config, storage, and OCR toolchain checks.

use std::path::Path;

use anyhow::Result;
use tokio::process::Command;

use tallyforge_config::{validate, TallyForgeConfig};
use tallyforge_ledger::ContributionStore;

pub async fn run(config: &TallyForgeConfig, config_path: &Path) -> Result<()> {
    println!("\n🔍 Running TallyForge doctor...\n");

    let mut ok = check_config(config, config_path);
    ok &= check_storage(config);
    ok &= check_tesseract(config).await;

    println!();
    if ok {
        println!("✅ All checks passed.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }
    Ok(())
}

fn check_config(config: &TallyForgeConfig, config_path: &Path) -> bool {
    println!("Checking config ({}):", config_path.display());
    if !config_path.exists() {
        println!("  🟡 Config file not found; running on defaults");
    }

    let report = validate(config);
    for warning in &report.warnings {
        println!("  🟡 {warning}");
    }
    for error in &report.errors {
        println!("  🔴 {error}");
    }
    if report.is_valid() && report.warnings.is_empty() {
        println!("  🟢 Config looks deployable");
    }
    report.is_valid()
}

fn check_storage(config: &TallyForgeConfig) -> bool {
    println!("Checking storage:");
    match ContributionStore::open(&config.storage.db_path) {
        Ok(_) => {
            println!("  🟢 Ledger database opens at '{}'", config.storage.db_path);
            true
        }
        Err(e) => {
            println!("  🔴 Cannot open ledger database: {e}");
            false
        }
    }
}

async fn check_tesseract(config: &TallyForgeConfig) -> bool {
    println!("Checking OCR toolchain:");
    match Command::new(&config.ocr.tesseract_cmd)
        .arg("--version")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("unknown version");
            println!("  🟢 {first_line}");
            true
        }
        Ok(output) => {
            println!("  🔴 '{}' exited with {}", config.ocr.tesseract_cmd, output.status);
            false
        }
        Err(e) => {
            println!(
                "  🔴 Could not launch '{}': {e} (is Tesseract installed?)",
                config.ocr.tesseract_cmd
            );
            false
        }
    }
}
