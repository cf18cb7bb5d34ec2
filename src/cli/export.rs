// ABOUTME: CLI export command - write the questionnaire document from stored drafts

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::util::open_store;
use super::{ExportArgs, OutputFormat};
use crate::config::AppConfig;
use crate::models::BusinessContext;
use crate::wizard::{read_record, DraftStore, Submission};

#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub reference: String,
    pub client: String,
    pub path: String,
}

/// Build a submission from the stored company name and write its document into `dir`
pub fn write(store: &dyn DraftStore, dir: &Path) -> Result<ExportOutput> {
    let company = read_record::<BusinessContext>(store)
        .context("Failed to read business context draft")?
        .map(|record| record.company_name)
        .unwrap_or_default();
    let now = Local::now();
    let submission = Submission::new(&company, now);
    let path = submission
        .write_document(dir, now)
        .context("Failed to write questionnaire document")?;
    info!(reference = %submission.reference, path = %path.display(), "Questionnaire exported");
    Ok(ExportOutput {
        reference: submission.reference.clone(),
        client: submission.client_display(),
        path: path.display().to_string(),
    })
}

/// Execute the export command
pub fn execute(args: ExportArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config);
    let dir: PathBuf = args.out.unwrap_or_else(|| config.export_dir());
    let output = write(&store, &dir)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize export result")?
        ),
        OutputFormat::Text => {
            println!("Reference:  {}", output.reference);
            println!("Client:     {}", output.client);
            println!("Written to: {}", output.path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{write_record, MemoryDraftStore};
    use tempfile::TempDir;

    #[test]
    fn test_write_uses_stored_company() {
        let dir = TempDir::new().unwrap();
        let mut store = MemoryDraftStore::new();
        let record = BusinessContext {
            company_name: "Acme Corp".to_string(),
            ..BusinessContext::default()
        };
        write_record(&mut store, &record).unwrap();

        let output = write(&store, dir.path()).unwrap();
        assert_eq!(output.client, "Acme Corp");
        assert!(output.path.contains("PenTest_Questionnaire_Acme_Corp_"));
        assert!(Path::new(&output.path).exists());
    }

    #[test]
    fn test_write_without_drafts_uses_default_client() {
        let dir = TempDir::new().unwrap();
        let output = write(&MemoryDraftStore::new(), dir.path()).unwrap();
        assert!(output.path.contains("PenTest_Questionnaire_Client_"));
    }
}
