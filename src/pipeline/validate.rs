// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::console;

/// Validate the configuration and list what was checked.
pub fn run_validate(config: &Config) -> Result<()> {
    console::header("Validating configuration");

    match config.validate() {
        Ok(()) => {
            console::success("Config OK");
            console::sub_item(&format!("Feed: {}", config.feed.url));
            console::sub_item(&format!(
                "Certificate verification: {}",
                if config.feed.skip_cert_verification {
                    "skipped"
                } else {
                    "enabled"
                }
            ));
            console::sub_item(&format!("Cleaning rules: {}", config.cleaning.rules.len()));
            console::sub_item(&format!("Caller marker: {}", config.segmenting.caller_marker));
            console::sub_item(&format!("Date formats: {}", config.dates.formats.len()));
            Ok(())
        }
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            Err(e)
        }
    }
}
