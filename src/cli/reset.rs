// ABOUTME: CLI reset command - delete every stored draft, with a confirmation prompt

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::info;

use super::util::{draft_key, form_steps, open_store};
use super::ResetArgs;
use crate::config::AppConfig;
use crate::wizard::DraftStore;

/// Clear all step drafts, returning how many existed
pub fn clear_all(store: &mut dyn DraftStore) -> Result<usize> {
    let mut removed = 0;
    for key in form_steps().filter_map(draft_key) {
        if store.load_raw(key)?.is_some() {
            removed += 1;
        }
        store
            .clear(key)
            .with_context(|| format!("Failed to delete draft {key}"))?;
    }
    info!(removed, "Drafts reset");
    Ok(removed)
}

/// Execute the reset command
pub fn execute(args: ResetArgs, config: &AppConfig) -> Result<()> {
    let mut store = open_store(config);

    if !args.force {
        print!("Delete all questionnaire drafts in {}? [y/N] ", store.describe());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = clear_all(&mut store)?;
    println!("Removed {removed} draft(s).");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::MemoryDraftStore;

    #[test]
    fn test_clear_all_counts_existing_drafts() {
        let mut store = MemoryDraftStore::with_entry("assetScopingData", "{}");
        assert_eq!(clear_all(&mut store).unwrap(), 1);
        assert_eq!(store.load_raw("assetScopingData").unwrap(), None);
        assert_eq!(clear_all(&mut store).unwrap(), 0);
    }
}
