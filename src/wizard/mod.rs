// ABOUTME: Questionnaire wizard core, independent of the terminal UI
// Step records are edited through containers that persist drafts and gate navigation

pub mod autosave;
pub mod container;
pub mod export;
pub mod form;
pub mod review;
pub mod session;
pub mod step;
pub mod storage;
pub mod uploads;
pub mod validation;

pub use autosave::{Debouncer, SaveStatus};
pub use container::{read_record, write_record, StepContainer, StepRecord};
pub use export::{ExportError, Submission};
pub use form::{FieldDef, FieldError, FieldInput, FieldKind, FieldValue, FormModel};
pub use review::{LegalAgreement, ReviewSource, ReviewSummary};
pub use session::{SessionSettings, WizardSession};
pub use step::{NavigationError, Navigator, VisualState, WizardStep};
pub use storage::{DraftStore, FileDraftStore, MemoryDraftStore, StorageError};
pub use uploads::{FileCandidate, UploadError, UploadKind};
pub use validation::{FeedbackVariant, Validate, ValidationError, ValidationFeedback};
