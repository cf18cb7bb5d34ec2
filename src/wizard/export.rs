// ABOUTME: Submission confirmation content and the downloadable questionnaire document
// The document is a single-page PDF written directly with the base Helvetica font

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_CLIENT_NAME: &str = "Client";
pub const DOCUMENT_TITLE: &str = "Penetration Testing Questionnaire";
pub const SUBMITTED_TOAST: &str = "Your questionnaire has been submitted and PDF generated successfully.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Who follows up on a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantInfo {
    #[serde(default = "default_consultant_name")]
    pub name: String,
    #[serde(default = "default_consultant_title")]
    pub title: String,
    #[serde(default = "default_consultant_email")]
    pub email: String,
    #[serde(default = "default_consultant_phone")]
    pub phone: String,
    #[serde(default = "default_response_time")]
    pub response_time: String,
}

fn default_consultant_name() -> String {
    "Sarah Mitchell".to_string()
}

fn default_consultant_title() -> String {
    "Senior Security Consultant".to_string()
}

fn default_consultant_email() -> String {
    "sarah.mitchell@pentestconsulting.com".to_string()
}

fn default_consultant_phone() -> String {
    "+1 (555) 123-4567".to_string()
}

fn default_response_time() -> String {
    "24-48 hours".to_string()
}

impl Default for ConsultantInfo {
    fn default() -> Self {
        Self {
            name: default_consultant_name(),
            title: default_consultant_title(),
            email: default_consultant_email(),
            phone: default_consultant_phone(),
            response_time: default_response_time(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    pub title: &'static str,
    pub description: &'static str,
    pub timeframe: &'static str,
    pub completed: bool,
}

pub const NEXT_STEPS: &[TimelineStep] = &[
    TimelineStep {
        title: "Questionnaire Submitted",
        description: "Your responses have been received and are being reviewed by our security team.",
        timeframe: "Completed",
        completed: true,
    },
    TimelineStep {
        title: "Initial Review",
        description: "Our consultant will review your responses and prepare preliminary recommendations.",
        timeframe: "1-2 Business Days",
        completed: false,
    },
    TimelineStep {
        title: "Consultation Call",
        description: "Schedule a call to discuss scope, timeline, and address any questions.",
        timeframe: "3-5 Business Days",
        completed: false,
    },
    TimelineStep {
        title: "Proposal Delivery",
        description: "Receive detailed proposal with scope, methodology, timeline, and pricing.",
        timeframe: "5-7 Business Days",
        completed: false,
    },
    TimelineStep {
        title: "Engagement Kickoff",
        description: "Sign agreement and begin penetration testing engagement.",
        timeframe: "2-3 Weeks",
        completed: false,
    },
];

/// (label, value)
pub const SECURITY_DETAILS: &[(&str, &str)] = &[
    ("Encryption Status", "AES-256 encryption applied to all submitted data"),
    ("Data Handling", "GDPR and CCPA compliant processing and storage"),
    ("Retention Policy", "Data retained for 90 days post-engagement or until deletion requested"),
    ("Access Control", "Limited to assigned consultant and authorized security personnel only"),
];

/// (label, value)
pub const SUMMARY_ITEMS: &[(&str, &str)] = &[
    ("Engagement Type", "Comprehensive Security Assessment"),
    ("Estimated Timeline", "4-6 weeks"),
    ("Scope Complexity", "Medium to High"),
    ("Asset Types", "Web Apps, APIs, Cloud Infrastructure"),
];

/// (title, description)
pub const RESOURCES: &[(&str, &str)] = &[
    ("Penetration Testing Preparation Guide", "Best practices for preparing your team and infrastructure for testing"),
    ("Security Assessment Methodology", "Learn about our testing approach and industry-standard frameworks"),
    ("Engagement Process Overview", "Detailed walkthrough of what to expect during the engagement"),
    ("Compliance & Regulatory Resources", "Information on meeting security compliance requirements"),
];

/// Company name made safe for a file name; every non-alphanumeric, surrounding
/// whitespace included, becomes `_`. A blank name falls back to `Client`.
pub fn sanitize_client_name(company_name: &str) -> String {
    if company_name.trim().is_empty() {
        return DEFAULT_CLIENT_NAME.to_string();
    }
    company_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `PT-YYYY-MM-DD-NNNN`
pub fn reference_number(now: &DateTime<Local>) -> String {
    let serial = Uuid::new_v4().as_u128() % 10_000;
    format!("PT-{}-{serial:04}", now.format("%Y-%m-%d"))
}

/// A confirmed questionnaire submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub reference: String,
    pub submitted_at: DateTime<Local>,
    /// Sanitized for file names
    pub client_name: String,
}

impl Submission {
    pub fn new(company_name: &str, now: DateTime<Local>) -> Self {
        Self {
            reference: reference_number(&now),
            submitted_at: now,
            client_name: sanitize_client_name(company_name),
        }
    }

    pub fn date_display(&self) -> String {
        self.submitted_at.format("%m/%d/%Y").to_string()
    }

    pub fn time_display(&self) -> String {
        self.submitted_at.format("%I:%M %p").to_string()
    }

    /// Client name with underscores shown as spaces
    pub fn client_display(&self) -> String {
        self.client_name.replace('_', " ")
    }

    pub fn file_name(&self, on: &DateTime<Local>) -> String {
        format!("PenTest_Questionnaire_{}_{}.pdf", self.client_name, on.format("%Y-%m-%d"))
    }

    /// Render and write the document into `dir`, returning the file path
    pub fn write_document(&self, dir: &Path, generated_at: DateTime<Local>) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name(&generated_at));
        let bytes = self.render_document(&generated_at);
        fs::write(&path, &bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), reference = %self.reference, "Questionnaire document written");
        Ok(path)
    }

    /// Lines of the document in page order
    pub fn document_lines(&self, generated_at: &DateTime<Local>) -> Vec<String> {
        let mut lines = vec![
            DOCUMENT_TITLE.to_string(),
            format!("Reference Number: {}", self.reference),
            format!("Client: {}", self.client_display()),
            format!("Submission Date: {} at {}", self.date_display(), self.time_display()),
            "Engagement Summary".to_string(),
        ];
        lines.extend(SUMMARY_ITEMS.iter().map(|(label, value)| format!("{label}: {value}")));
        lines.push("Security & Compliance".to_string());
        lines.extend(SECURITY_DETAILS.iter().map(|(label, value)| format!("{label}: {value}")));
        lines.push(footer(generated_at));
        lines
    }

    pub fn render_document(&self, generated_at: &DateTime<Local>) -> Vec<u8> {
        let mut page = PageContent::default();
        page.text(20.0, 20.0, 20.0, DOCUMENT_TITLE);
        page.text(20.0, 35.0, 12.0, &format!("Reference Number: {}", self.reference));
        page.text(20.0, 45.0, 12.0, &format!("Client: {}", self.client_display()));
        page.text(
            20.0,
            55.0,
            12.0,
            &format!("Submission Date: {} at {}", self.date_display(), self.time_display()),
        );
        page.rule(20.0, 190.0, 65.0);

        page.text(20.0, 80.0, 16.0, "Engagement Summary");
        for (index, (label, value)) in SUMMARY_ITEMS.iter().enumerate() {
            page.text(20.0, 90.0 + index as f32 * 7.0, 12.0, &format!("{label}: {value}"));
        }

        page.text(20.0, 130.0, 16.0, "Security & Compliance");
        for (index, (label, value)) in SECURITY_DETAILS.iter().enumerate() {
            let top = 140.0 + index as f32 * 10.0;
            for (line_no, line) in wrap_text(&format!("{label}: {value}"), WRAP_COLUMNS).iter().enumerate() {
                page.text(20.0, top + line_no as f32 * 5.0, 12.0, line);
            }
        }

        page.text(20.0, 280.0, 10.0, &footer(generated_at));
        page.into_pdf()
    }
}

fn footer(generated_at: &DateTime<Local>) -> String {
    format!(
        "This document was generated on {} and is confidential.",
        generated_at.format("%m/%d/%Y, %I:%M:%S %p")
    )
}

const MM_TO_PT: f32 = 72.0 / 25.4;
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;
/// Roughly 170mm of 12pt Helvetica
const WRAP_COLUMNS: usize = 80;

/// Greedy word wrap on character count
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Content stream of one A4 page; positions are millimetres from the top-left corner
#[derive(Default)]
struct PageContent {
    ops: String,
}

impl PageContent {
    fn text(&mut self, x_mm: f32, y_mm: f32, size: f32, text: &str) {
        let _ = writeln!(
            self.ops,
            "BT /F1 {size:.0} Tf {:.2} {:.2} Td ({}) Tj ET",
            x_mm * MM_TO_PT,
            PAGE_HEIGHT_PT - y_mm * MM_TO_PT,
            escape_pdf_text(text)
        );
    }

    fn rule(&mut self, x1_mm: f32, x2_mm: f32, y_mm: f32) {
        let y = PAGE_HEIGHT_PT - y_mm * MM_TO_PT;
        let _ = writeln!(
            self.ops,
            "{:.2} w {:.2} {y:.2} m {:.2} {y:.2} l S",
            0.5 * MM_TO_PT,
            x1_mm * MM_TO_PT,
            x2_mm * MM_TO_PT
        );
    }

    fn into_pdf(self) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT:.2} {PAGE_HEIGHT_PT:.2}] \
                 /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
            format!("<< /Length {} >>\nstream\n{}endstream", self.ops.len(), self.ops),
        ];

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, object) in objects.iter().enumerate() {
            offsets.push(out.len());
            let _ = write!(out, "{} 0 obj\n{object}\nendobj\n", index + 1);
        }

        let xref_offset = out.len();
        let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = writeln!(out, "{offset:010} 00000 n ");
        }
        let _ = write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        );
        out.into_bytes()
    }
}

/// Escape string delimiters; characters outside printable ASCII become '?'
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 11, 23, 7, 19, 0).unwrap()
    }

    #[test]
    fn test_sanitize_client_name() {
        assert_eq!(sanitize_client_name("Acme Corp, Inc."), "Acme_Corp__Inc_");
        assert_eq!(sanitize_client_name("   "), "Client");
        assert_eq!(sanitize_client_name(" Acme Corp "), "_Acme_Corp_");
        assert_eq!(sanitize_client_name("Café"), "Caf_");
    }

    #[test]
    fn test_reference_number_format() {
        let reference = reference_number(&fixed_time());
        assert!(reference.starts_with("PT-2025-11-23-"));
        let serial = reference.rsplit('-').next().unwrap();
        assert_eq!(serial.len(), 4);
        assert!(serial.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_file_name_and_display() {
        let submission = Submission::new("TechCorp Solutions Inc.", fixed_time());
        assert_eq!(
            submission.file_name(&fixed_time()),
            "PenTest_Questionnaire_TechCorp_Solutions_Inc__2025-11-23.pdf"
        );
        assert_eq!(submission.client_display(), "TechCorp Solutions Inc ");
        assert_eq!(submission.date_display(), "11/23/2025");
        assert_eq!(submission.time_display(), "07:19 AM");
    }

    #[test]
    fn test_document_contents() {
        let submission = Submission::new("", fixed_time());
        let lines = submission.document_lines(&fixed_time());
        assert_eq!(lines[0], DOCUMENT_TITLE);
        assert_eq!(lines[2], "Client: Client");
        assert!(lines.iter().any(|l| l == "Engagement Summary"));
        assert!(lines.iter().any(|l| l == "Security & Compliance"));
        assert!(lines.last().unwrap().ends_with("and is confidential."));
    }

    #[test]
    fn test_write_document_produces_pdf() {
        let dir = TempDir::new().unwrap();
        let submission = Submission::new("Acme (EU)", fixed_time());
        let path = submission.write_document(dir.path(), fixed_time()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "PenTest_Questionnaire_Acme__EU__2025-11-23.pdf"
        );
        let bytes = fs::read(&path).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("(Penetration Testing Questionnaire) Tj"));
        assert!(text.contains("(Client: Acme  EU ) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let submission = Submission::new("Acme", fixed_time());
        let bytes = submission.render_document(&fixed_time());
        let text = String::from_utf8(bytes).unwrap();
        let xref = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take(5)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (index, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", index + 1)));
        }
    }

    #[test]
    fn test_escape_and_wrap() {
        assert_eq!(escape_pdf_text("a(b)\\é"), "a\\(b\\)\\\\?");
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }
}
