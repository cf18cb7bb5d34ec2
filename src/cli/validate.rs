// ABOUTME: CLI validate command - print validation errors of stored drafts
//
// Exits non-zero (via an error) when any inspected step is invalid.

use anyhow::{bail, Context, Result};

use super::util::{form_steps, inspect_step, open_store, parse_step, StepReport};
use super::{OutputFormat, ValidateArgs};
use crate::config::AppConfig;
use crate::wizard::DraftStore;

pub fn collect(args: &ValidateArgs, store: &dyn DraftStore) -> Result<Vec<StepReport>> {
    match &args.step {
        Some(step) => Ok(vec![inspect_step(parse_step(step)?, store)?]),
        None => form_steps().map(|step| inspect_step(step, store)).collect(),
    }
}

/// Execute the validate command
pub fn execute(args: ValidateArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config);
    let reports = collect(&args, &store)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&reports).context("Failed to serialize validation results")?
            );
        }
        OutputFormat::Text => {
            for report in &reports {
                if report.valid {
                    println!("\x1b[32m✓\x1b[0m {}", report.name);
                    continue;
                }
                println!("\x1b[31m✗\x1b[0m {}", report.name);
                for error in &report.errors {
                    println!("    - {error}");
                }
            }
        }
    }

    let invalid = reports.iter().filter(|r| !r.valid).count();
    if invalid > 0 {
        bail!("{invalid} step(s) failed validation");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::MemoryDraftStore;

    #[test]
    fn test_collect_single_step() {
        let args = ValidateArgs {
            step: Some("engagement".to_string()),
        };
        let reports = collect(&args, &MemoryDraftStore::new()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].key, "engagementPreferences");
    }

    #[test]
    fn test_collect_rejects_review() {
        let args = ValidateArgs {
            step: Some("review".to_string()),
        };
        assert!(collect(&args, &MemoryDraftStore::new()).is_err());
    }
}
