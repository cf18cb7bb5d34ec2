// ABOUTME: CLI show command - print the stored JSON draft of one step

use anyhow::{anyhow, Context, Result};

use super::util::{draft_key, open_store, parse_step};
use super::{OutputFormat, ShowArgs};
use crate::config::AppConfig;
use crate::wizard::DraftStore;

/// Stored draft pretty-printed, or `None` when the step was never saved
pub fn stored_json(step: &str, store: &dyn DraftStore) -> Result<Option<serde_json::Value>> {
    let step = parse_step(step)?;
    let key = draft_key(step).ok_or_else(|| anyhow!("{} has no stored draft", step.label()))?;
    let Some(raw) = store.load_raw(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).with_context(|| format!("Draft {key} is not valid JSON"))?;
    Ok(Some(value))
}

/// Execute the show command
pub fn execute(args: ShowArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config);
    let value = stored_json(&args.step, &store)?;

    match (value, format) {
        (Some(value), OutputFormat::Json) => println!("{}", serde_json::to_string(&value)?),
        (Some(value), OutputFormat::Text) => println!("{}", serde_json::to_string_pretty(&value)?),
        (None, OutputFormat::Json) => println!("null"),
        (None, OutputFormat::Text) => println!("No draft saved for {}", args.step),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::MemoryDraftStore;

    #[test]
    fn test_stored_json_reads_draft() {
        let store = MemoryDraftStore::with_entry("engagementPreferences", r#"{"budgetRange":"25000-50000"}"#);
        let value = stored_json("2", &store).unwrap().unwrap();
        assert_eq!(value["budgetRange"], "25000-50000");
        assert!(stored_json("business", &store).unwrap().is_none());
    }

    #[test]
    fn test_stored_json_rejects_corrupt_draft() {
        let store = MemoryDraftStore::with_entry("engagementPreferences", "{not json");
        assert!(stored_json("engagement", &store).is_err());
    }
}
