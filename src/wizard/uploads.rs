// ABOUTME: Upload allow-lists and size ceiling for attached documents
// Only metadata is kept; file contents are never read or stored

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upload ceiling applied when no configuration overrides it
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Reasons an attachment is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File type not allowed: {0}")]
    TypeNotAllowed(String),

    #[error("File too large: {name} (max {limit})")]
    TooLarge { name: String, limit: String },

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

/// Which upload slot a file is being attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Sitemap,
    ApiSpec,
    ArchitectureDiagram,
    MobileBinary,
    Documentation,
}

impl UploadKind {
    /// Accepted file extensions, lowercase without the dot
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Sitemap => &["xml", "txt"],
            Self::ApiSpec => &["json", "yaml", "yml"],
            Self::ArchitectureDiagram => &["png", "jpg", "jpeg", "pdf", "svg"],
            Self::MobileBinary => &["apk", "ipa"],
            Self::Documentation => &["pdf", "png", "jpg", "jpeg", "ppt", "pptx", "doc", "docx"],
        }
    }

    /// Accepted MIME types for slots that are checked by content type
    pub fn mime_types(&self) -> &'static [&'static str] {
        match self {
            Self::Documentation => &[
                "application/pdf",
                "image/png",
                "image/jpeg",
                "image/jpg",
                "application/vnd.ms-powerpoint",
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ],
            _ => &[],
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Sitemap => "XML or TXT sitemap",
            Self::ApiSpec => "OpenAPI/Swagger JSON or YAML",
            Self::ArchitectureDiagram => "PNG, JPG, PDF or SVG diagram",
            Self::MobileBinary => "APK or IPA binary",
            Self::Documentation => "PDF, images, PowerPoint or Word documents",
        }
    }
}

/// Metadata of a file offered for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(&name).to_string();
        Self { name, size, mime_type }
    }

    /// Read size and name from a path on disk
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let metadata = fs::metadata(path).map_err(|e| UploadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(UploadError::Unreadable {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(name, metadata.len()))
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// Check a candidate against the slot's allow-list and the size ceiling
pub fn check_upload(
    kind: UploadKind,
    candidate: &FileCandidate,
    max_bytes: u64,
) -> Result<(), UploadError> {
    let by_extension = candidate
        .extension()
        .is_some_and(|ext| kind.extensions().contains(&ext.as_str()));
    let by_mime = kind.mime_types().contains(&candidate.mime_type.as_str());

    if !by_extension && !by_mime {
        return Err(UploadError::TypeNotAllowed(candidate.name.clone()));
    }

    if candidate.size > max_bytes {
        return Err(UploadError::TooLarge {
            name: candidate.name.clone(),
            limit: format_limit(max_bytes),
        });
    }

    Ok(())
}

fn format_limit(bytes: u64) -> String {
    let mib = bytes / (1024 * 1024);
    if mib > 0 && bytes % (1024 * 1024) == 0 {
        format!("{mib}MB")
    } else {
        format_file_size(bytes)
    }
}

/// Human readable size, e.g. "1.5 MB"
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}

fn guess_mime_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "json" => "application/json",
        "yaml" | "yml" => "application/x-yaml",
        "apk" => "application/vnd.android.package-archive",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_rejects_wrong_extension() {
        let candidate = FileCandidate::new("spec.exe", 10);
        assert_eq!(
            check_upload(UploadKind::ApiSpec, &candidate, DEFAULT_MAX_UPLOAD_BYTES),
            Err(UploadError::TypeNotAllowed("spec.exe".to_string()))
        );
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let candidate = FileCandidate::new("App.IPA", 1024);
        assert!(check_upload(UploadKind::MobileBinary, &candidate, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let candidate = FileCandidate::new("diagram.png", DEFAULT_MAX_UPLOAD_BYTES + 1);
        let err = check_upload(UploadKind::ArchitectureDiagram, &candidate, DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert_eq!(err.to_string(), "File too large: diagram.png (max 10MB)");
    }

    #[test]
    fn test_exact_limit_is_accepted() {
        let candidate = FileCandidate::new("report.pdf", DEFAULT_MAX_UPLOAD_BYTES);
        assert!(check_upload(UploadKind::Documentation, &candidate, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"<urlset/>").unwrap();

        let candidate = FileCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.name, "sitemap.xml");
        assert_eq!(candidate.size, 9);
        assert_eq!(candidate.mime_type, "application/xml");
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = FileCandidate::from_path(Path::new("/definitely/not/here.pdf"));
        assert!(matches!(result, Err(UploadError::Unreadable { .. })));
    }
}
