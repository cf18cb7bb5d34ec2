// ABOUTME: UI components for the questionnaire wizard: stepper, form pages, review, submission and overlays

pub mod controls;
pub mod feedback;
pub mod form;
pub mod help;
pub mod layout;
pub mod review;
pub mod stepper;
pub mod submit;
pub mod theme;

pub use controls::ControlsComponent;
pub use feedback::FeedbackComponent;
pub use form::FormComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use review::ReviewComponent;
pub use stepper::StepperComponent;
pub use submit::SubmitComponent;
