// ABOUTME: Review page model: per-section summaries with completion status, the validation
// issue panel, the engagement summary card and the legal agreement gate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::container::read_record;
use super::step::WizardStep;
use super::storage::DraftStore;
use super::validation::{Validate, ValidationError};
use crate::models::assets::CLOUD_PROVIDERS;
use crate::models::business::{BUSINESS_FUNCTIONS, COMPLIANCE_STANDARDS, MATURITY_LEVELS};
use crate::models::engagement::{parse_date, DELIVERABLES, SUPPORT_OPTIONS};
use crate::models::environment::{AUTH_METHODS, MONITORING_TOOLS};
use crate::models::{
    label_for, AssetScoping, AssetType, BusinessContext, Choice, EngagementPreferences,
    EnvironmentOverview, NetworkType,
};

pub const ALL_PASSED_TITLE: &str = "All Validations Passed";
pub const ALL_PASSED_MESSAGE: &str = "Your questionnaire is complete and ready for submission.";
pub const ISSUES_SUBTITLE: &str = "Please review and correct the following issues before submission:";
pub const PREVIEW_TITLE: &str = "Preview Generated";
pub const PREVIEW_MESSAGE: &str =
    "Your questionnaire preview is ready. You can download the final PDF after submission.";
pub const NDA_REQUIRED_NOTE: &str = "Required to proceed with submission";

pub const NDA_TERMS: &[(&str, &str)] = &[
    ("Confidential Information", "All information disclosed during the penetration testing engagement, including but not limited to system architectures, vulnerabilities, security controls, and business processes, shall be considered confidential."),
    ("Non-Disclosure", "The testing organization agrees to maintain strict confidentiality of all information obtained during the engagement and will not disclose such information to any third party without prior written consent."),
    ("Data Protection", "All questionnaire responses and engagement data will be encrypted using AES-256 encryption and stored securely with access limited to authorized personnel only."),
    ("Retention Period", "Confidential information will be retained only for the duration necessary to complete the engagement and will be securely destroyed upon completion or as mutually agreed."),
    ("Compliance", "Both parties agree to comply with all applicable data protection regulations including GDPR, CCPA, and industry-specific compliance requirements."),
];

const SITEMAP_WARNING: &str =
    "Sitemap document not uploaded. This will help identify all application endpoints.";

/// Where the review page gets its content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    /// Fixed demonstration questionnaire
    #[default]
    Sample,
    /// The drafts actually entered in the wizard
    Persisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Complete,
    Warning,
    Incomplete,
}

impl SectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Warning => "Review Required",
            Self::Incomplete => "Incomplete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewIssue {
    pub section: String,
    pub field: String,
    pub message: String,
    pub severity: Severity,
    /// Where "Fix Now" navigates
    pub step: WizardStep,
}

/// Label with one or more values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: String,
    pub values: Vec<String>,
}

impl InfoRow {
    fn text(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            values: vec![value.into()],
        }
    }

    fn list(label: &str, values: Vec<String>) -> Self {
        Self {
            label: label.to_string(),
            values,
        }
    }

    /// Values joined for single-line display; "Not provided" when empty
    pub fn display(&self) -> String {
        let joined = self
            .values
            .iter()
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            "Not provided".to_string()
        } else {
            joined
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRow {
    pub asset_type: String,
    pub name: String,
    pub details: String,
    pub in_scope: bool,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub title: String,
    pub status: SectionStatus,
    /// Step opened by the Edit action
    pub step: WizardStep,
    pub rows: Vec<InfoRow>,
    pub assets: Vec<AssetRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementCard {
    pub timeline: String,
    pub budget: String,
    pub approach: String,
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub source: ReviewSource,
    /// Company name as entered, empty when unknown
    pub company_name: String,
    pub sections: Vec<ReviewSection>,
    pub issues: Vec<ReviewIssue>,
    pub engagement: EngagementCard,
}

/// "1 Error and 2 Warnings Found"
pub fn issues_headline(errors: usize, warnings: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n > 1 {
            format!("{n} {word}s")
        } else {
            format!("{n} {word}")
        }
    };
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(plural(errors, "Error"));
    }
    if warnings > 0 {
        parts.push(plural(warnings, "Warning"));
    }
    format!("{} Found", parts.join(" and "))
}

fn long_date(value: &str) -> Option<String> {
    parse_date(value).map(|d: NaiveDate| d.format("%B %-d, %Y").to_string())
}

fn labels(catalog: &[Choice], values: &[String]) -> Vec<String> {
    values.iter().map(|v| label_for(catalog, v)).collect()
}

fn section_status(errors: usize, warnings: usize) -> SectionStatus {
    if errors > 0 {
        SectionStatus::Incomplete
    } else if warnings > 0 {
        SectionStatus::Warning
    } else {
        SectionStatus::Complete
    }
}

impl ReviewSummary {
    pub fn build(source: ReviewSource, store: &dyn DraftStore) -> Self {
        match source {
            ReviewSource::Sample => Self::sample(),
            ReviewSource::Persisted => Self::from_records(
                &read_record::<BusinessContext>(store).ok().flatten().unwrap_or_default(),
                &read_record::<EngagementPreferences>(store).ok().flatten().unwrap_or_default(),
                &read_record::<EnvironmentOverview>(store).ok().flatten().unwrap_or_default(),
                &read_record::<AssetScoping>(store).ok().flatten().unwrap_or_default(),
            ),
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }

    /// Panel heading: all-clear title or the error/warning tally
    pub fn panel_headline(&self) -> String {
        if self.issues.is_empty() {
            ALL_PASSED_TITLE.to_string()
        } else {
            issues_headline(self.error_count(), self.warning_count())
        }
    }

    pub fn panel_subtitle(&self) -> &'static str {
        if self.issues.is_empty() {
            ALL_PASSED_MESSAGE
        } else {
            ISSUES_SUBTITLE
        }
    }

    /// Demonstration questionnaire for TechCorp Solutions Inc.
    pub fn sample() -> Self {
        let s = |v: &str| v.to_string();
        let deliverables = vec![
            s("Executive Summary Report"),
            s("Detailed Technical Findings"),
            s("Remediation Recommendations"),
            s("Compliance Gap Analysis"),
        ];

        let business = ReviewSection {
            title: s("Client & Business Context"),
            status: SectionStatus::Complete,
            step: WizardStep::BusinessContext,
            rows: vec![
                InfoRow::text("Company Name", "TechCorp Solutions Inc."),
                InfoRow::text("Industry", "Financial Services"),
                InfoRow::text("Company Size", "500-1000 employees"),
                InfoRow::list(
                    "Business Functions",
                    vec![s("Payment Processing"), s("Customer Data Management"), s("Financial Reporting")],
                ),
                InfoRow::list(
                    "Sensitive Data Types",
                    vec![
                        s("Payment Card Information (Critical)"),
                        s("Personal Identifiable Information (High)"),
                        s("Financial Records (Critical)"),
                    ],
                ),
                InfoRow::list("Compliance Standards", vec![s("PCI DSS"), s("SOC 2"), s("GDPR")]),
                InfoRow::text("Security Incidents", "No major incidents in the past 12 months"),
                InfoRow::text("Security Maturity", "Level 3 - Defined and Documented"),
                InfoRow::text(
                    "Testing Objectives",
                    "Identify vulnerabilities in payment processing systems and ensure PCI DSS compliance before Q4 audit",
                ),
            ],
            assets: Vec::new(),
        };

        let engagement = ReviewSection {
            title: s("Engagement Preferences"),
            status: SectionStatus::Complete,
            step: WizardStep::EngagementPreferences,
            rows: vec![
                InfoRow::text("Testing Approach", "Black Box Testing"),
                InfoRow::text("Preferred Timeline", "March 15, 2025 - April 30, 2025"),
                InfoRow::text("Budget Range", "$50,000 - $75,000"),
                InfoRow::list("Deliverables", deliverables.clone()),
                InfoRow::list(
                    "Post-Engagement Support",
                    vec![s("Remediation Verification"), s("Security Training")],
                ),
            ],
            assets: Vec::new(),
        };

        let environment = ReviewSection {
            title: s("Technical Environment"),
            status: SectionStatus::Complete,
            step: WizardStep::EnvironmentOverview,
            rows: vec![
                InfoRow::text(
                    "Technology Stack",
                    "React, Node.js, PostgreSQL, AWS Cloud Infrastructure, Docker containers",
                ),
                InfoRow::list(
                    "Authentication Methods",
                    vec![s("Multi-Factor Authentication"), s("OAuth 2.0"), s("SAML SSO")],
                ),
                InfoRow::list(
                    "Third-Party Integrations",
                    vec![s("Stripe Payment Gateway"), s("SendGrid Email Service"), s("Auth0 Identity Platform")],
                ),
                InfoRow::text(
                    "SDLC Processes",
                    "Agile development with bi-weekly sprints, automated CI/CD pipeline, code review requirements",
                ),
                InfoRow::list("Monitoring Tools", vec![s("Datadog"), s("Splunk"), s("AWS CloudWatch")]),
                InfoRow::text("Data Flow Complexity", "High - Multiple microservices with complex data flows"),
            ],
            assets: Vec::new(),
        };

        let asset = |asset_type: &str, name: &str, details: &str, in_scope: bool, priority: Priority| AssetRow {
            asset_type: s(asset_type),
            name: s(name),
            details: s(details),
            in_scope,
            priority,
        };
        let assets = ReviewSection {
            title: s("Asset Selection & Scoping"),
            status: SectionStatus::Warning,
            step: WizardStep::AssetScoping,
            rows: vec![InfoRow::text(
                "Geographic Restrictions",
                "Testing must be conducted from US-based IP addresses only. No testing during business hours (9 AM - 5 PM EST).",
            )],
            assets: vec![
                asset("Web Application", "Customer Portal", "https://portal.techcorp.com - React SPA with payment processing", true, Priority::High),
                asset("API", "Payment API", "https://api.techcorp.com/payments - RESTful API for payment processing", true, Priority::High),
                asset("Cloud Infrastructure", "AWS Production Environment", "EC2, RDS, S3, Lambda - Production workloads", true, Priority::High),
                asset("Mobile App", "TechCorp Mobile", "iOS and Android native apps for customer access", true, Priority::Medium),
                asset("Network", "Corporate Network", "10.0.0.0/16 - Internal corporate network", false, Priority::Low),
            ],
        };

        Self {
            source: ReviewSource::Sample,
            company_name: s("TechCorp Solutions Inc."),
            sections: vec![business, engagement, environment, assets],
            issues: vec![ReviewIssue {
                section: s("Asset Selection"),
                field: s("Web Application - Sitemap"),
                message: s(SITEMAP_WARNING),
                severity: Severity::Warning,
                step: WizardStep::AssetScoping,
            }],
            engagement: EngagementCard {
                timeline: s("March 15, 2025 - April 30, 2025"),
                budget: s("$50,000 - $75,000"),
                approach: s("Black Box Testing"),
                deliverables,
            },
        }
    }

    /// Summaries of the drafts actually entered
    pub fn from_records(
        business: &BusinessContext,
        engagement: &EngagementPreferences,
        environment: &EnvironmentOverview,
        assets: &AssetScoping,
    ) -> Self {
        let mut issues = Vec::new();
        let mut collect = |section: &str, step: WizardStep, errors: Vec<ValidationError>| {
            let count = errors.len();
            issues.extend(errors.into_iter().map(|e| ReviewIssue {
                section: section.to_string(),
                field: e.field,
                message: e.message,
                severity: Severity::Error,
                step,
            }));
            count
        };

        let business_errors = collect("Client & Business Context", WizardStep::BusinessContext, business.validate());
        let engagement_errors = collect("Engagement Preferences", WizardStep::EngagementPreferences, engagement.validate());
        let environment_errors = collect("Technical Environment", WizardStep::EnvironmentOverview, environment.validate());
        let asset_errors = collect("Asset Selection", WizardStep::AssetScoping, assets.validate());

        let mut asset_warnings = 0;
        if assets.is_selected(AssetType::WebApps) && assets.web_apps_data.sitemap_file.is_none() {
            asset_warnings += 1;
            issues.push(ReviewIssue {
                section: "Asset Selection".to_string(),
                field: "Web Application - Sitemap".to_string(),
                message: SITEMAP_WARNING.to_string(),
                severity: Severity::Warning,
                step: WizardStep::AssetScoping,
            });
        }

        let timeline = match (long_date(&engagement.start_date), long_date(&engagement.end_date)) {
            (Some(start), Some(end)) => format!("{start} - {end}"),
            _ => "Not scheduled".to_string(),
        };
        let deliverables = labels(DELIVERABLES, &engagement.deliverables);
        let approach = engagement.testing_approach.label();

        let sections = vec![
            ReviewSection {
                title: "Client & Business Context".to_string(),
                status: section_status(business_errors, 0),
                step: WizardStep::BusinessContext,
                rows: Self::business_rows(business),
                assets: Vec::new(),
            },
            ReviewSection {
                title: "Engagement Preferences".to_string(),
                status: section_status(engagement_errors, 0),
                step: WizardStep::EngagementPreferences,
                rows: vec![
                    InfoRow::text("Testing Approach", approach.clone()),
                    InfoRow::text("Preferred Timeline", timeline.clone()),
                    InfoRow::text("Budget Range", engagement.budget_display()),
                    InfoRow::list("Deliverables", deliverables.clone()),
                    InfoRow::list("Post-Engagement Support", labels(SUPPORT_OPTIONS, &engagement.post_engagement_support)),
                ],
                assets: Vec::new(),
            },
            ReviewSection {
                title: "Technical Environment".to_string(),
                status: section_status(environment_errors, 0),
                step: WizardStep::EnvironmentOverview,
                rows: Self::environment_rows(environment),
                assets: Vec::new(),
            },
            ReviewSection {
                title: "Asset Selection & Scoping".to_string(),
                status: section_status(asset_errors, asset_warnings),
                step: WizardStep::AssetScoping,
                rows: vec![
                    InfoRow::text("In Scope", assets.scope_data.in_scope.clone()),
                    InfoRow::text("Out of Scope", assets.scope_data.out_of_scope.clone()),
                    InfoRow::text("Geographic Restrictions", assets.scope_data.geo_restrictions.clone()),
                ],
                assets: Self::asset_rows(assets),
            },
        ];

        Self {
            source: ReviewSource::Persisted,
            company_name: business.company_name.trim().to_string(),
            sections,
            issues,
            engagement: EngagementCard {
                timeline,
                budget: engagement.budget_display(),
                approach,
                deliverables,
            },
        }
    }

    fn business_rows(business: &BusinessContext) -> Vec<InfoRow> {
        let maturity = business
            .maturity_label()
            .map(|label| {
                let description = label_for_description(MATURITY_LEVELS, business.security_maturity_rating);
                format!("Level {} - {label} ({description})", business.security_maturity_rating)
            })
            .unwrap_or_default();
        let incidents = if business.has_security_incidents {
            business.incident_details.clone()
        } else {
            "None reported".to_string()
        };

        vec![
            InfoRow::text("Company Name", business.company_name.clone()),
            InfoRow::text("Industry", business.industry.clone()),
            InfoRow::text("Company Size", business.organization_size.clone()),
            InfoRow::list("Business Functions", labels(BUSINESS_FUNCTIONS, &business.business_functions)),
            InfoRow::list(
                "Sensitive Data Types",
                business
                    .sensitive_data_types
                    .iter()
                    .map(|d| format!("{} (criticality {})", d.name, d.criticality))
                    .collect(),
            ),
            InfoRow::list("Compliance Standards", labels(COMPLIANCE_STANDARDS, &business.compliance_standards)),
            InfoRow::text("Security Incidents", incidents),
            InfoRow::text("Security Maturity", maturity),
            InfoRow::list("Testing Objectives", business.primary_objectives.clone()),
        ]
    }

    fn environment_rows(environment: &EnvironmentOverview) -> Vec<InfoRow> {
        let sdlc = [
            &environment.sdlc.methodology,
            &environment.sdlc.deployment_frequency,
            &environment.sdlc.change_management,
        ]
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ");

        let mut monitoring = labels(MONITORING_TOOLS, &environment.monitoring_tools);
        if !environment.custom_monitoring_tools.trim().is_empty() {
            monitoring.push(environment.custom_monitoring_tools.trim().to_string());
        }

        let complexity = environment
            .complexity_label()
            .map(|label| format!("{} - {label}", environment.data_flow_complexity))
            .unwrap_or_default();

        vec![
            InfoRow::text("Technology Stack", environment.technology_stack.clone()),
            InfoRow::list("Authentication Methods", labels(AUTH_METHODS, &environment.auth_methods)),
            InfoRow::list(
                "Third-Party Integrations",
                environment.integrations.iter().map(|i| i.name.clone()).collect(),
            ),
            InfoRow::text("SDLC Processes", sdlc),
            InfoRow::list("Monitoring Tools", monitoring),
            InfoRow::text("Data Flow Complexity", complexity),
        ]
    }

    fn asset_rows(assets: &AssetScoping) -> Vec<AssetRow> {
        let mut rows = Vec::new();
        if assets.is_selected(AssetType::WebApps) {
            let stack = assets.web_apps_data.tech_stack.join(", ");
            rows.extend(assets.web_apps_data.urls.iter().map(|url| AssetRow {
                asset_type: "Web Application".to_string(),
                name: url.clone(),
                details: stack.clone(),
                in_scope: true,
                priority: Priority::High,
            }));
        }
        if assets.is_selected(AssetType::Apis) {
            rows.extend(assets.apis_data.base_urls.iter().map(|url| AssetRow {
                asset_type: "API".to_string(),
                name: url.clone(),
                details: format!("{} endpoints", assets.apis_data.key_endpoints.len()),
                in_scope: true,
                priority: Priority::High,
            }));
        }
        if assets.is_selected(AssetType::Cloud) {
            rows.extend(assets.cloud_data.providers.iter().map(|provider| AssetRow {
                asset_type: "Cloud Infrastructure".to_string(),
                name: label_for(CLOUD_PROVIDERS, provider),
                details: assets.cloud_data.key_services.clone(),
                in_scope: true,
                priority: Priority::High,
            }));
        }
        if assets.is_selected(AssetType::Mobile) {
            rows.extend(assets.mobile_apps.iter().map(|app| AssetRow {
                asset_type: "Mobile App".to_string(),
                name: app.name.clone(),
                details: format!("{} {}", app.platform, app.features).trim().to_string(),
                in_scope: true,
                priority: Priority::Medium,
            }));
        }
        if assets.is_selected(AssetType::Networks) {
            rows.extend(assets.network_ranges.iter().map(|range| AssetRow {
                asset_type: "Network".to_string(),
                name: range.ip_range.clone(),
                details: format!("{} - {}", range.network_type.label(), range.protocols),
                in_scope: true,
                priority: if range.network_type == NetworkType::External {
                    Priority::Medium
                } else {
                    Priority::Low
                },
            }));
        }
        if assets.is_selected(AssetType::Other) {
            rows.push(AssetRow {
                asset_type: "Other".to_string(),
                name: "Other Assets".to_string(),
                details: assets.other_assets_data.description.clone(),
                in_scope: true,
                priority: Priority::Low,
            });
        }
        rows
    }
}

fn label_for_description(catalog: &[Choice], rating: u8) -> &'static str {
    catalog
        .get(usize::from(rating).wrapping_sub(1))
        .map_or("", |c| c.description)
}

/// NDA acceptance (required) and audit logging consent (optional)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalAgreement {
    pub nda_accepted: bool,
    pub audit_consent: bool,
    pub terms_expanded: bool,
}

impl LegalAgreement {
    pub fn toggle_nda(&mut self) {
        self.nda_accepted = !self.nda_accepted;
    }

    pub fn toggle_audit_consent(&mut self) {
        self.audit_consent = !self.audit_consent;
    }

    pub fn toggle_terms(&mut self) {
        self.terms_expanded = !self.terms_expanded;
    }

    pub fn can_submit(&self) -> bool {
        self.nda_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::container::write_record;
    use crate::wizard::storage::MemoryDraftStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_review() {
        let review = ReviewSummary::build(ReviewSource::Sample, &MemoryDraftStore::new());
        assert_eq!(review.company_name, "TechCorp Solutions Inc.");
        assert_eq!(review.sections.len(), 4);
        assert_eq!(review.sections[3].assets.len(), 5);
        assert_eq!(review.sections[3].status.label(), "Review Required");
        assert_eq!(review.panel_headline(), "1 Warning Found");
        assert!(!review.sections[3].assets[4].in_scope);
    }

    #[test]
    fn test_issue_headline_wording() {
        assert_eq!(issues_headline(1, 0), "1 Error Found");
        assert_eq!(issues_headline(2, 3), "2 Errors and 3 Warnings Found");
    }

    #[test]
    fn test_persisted_empty_drafts_are_incomplete() {
        let review = ReviewSummary::build(ReviewSource::Persisted, &MemoryDraftStore::new());
        assert!(review
            .sections
            .iter()
            .all(|s| s.status == SectionStatus::Incomplete));
        assert!(review.error_count() > 0);
        assert_eq!(review.warning_count(), 0);
        assert!(review.issues.iter().any(|i| i.field == "Company Name" && i.step == WizardStep::BusinessContext));
    }

    #[test]
    fn test_persisted_reads_store_and_warns_on_missing_sitemap() {
        let mut store = MemoryDraftStore::new();
        let mut assets = AssetScoping::default();
        assets.toggle_asset(AssetType::WebApps);
        assets.add_url("https://shop.example.com");
        assets.scope_data.in_scope = "Storefront".into();
        write_record(&mut store, &assets).unwrap();

        let review = ReviewSummary::build(ReviewSource::Persisted, &store);
        let asset_section = &review.sections[3];
        assert_eq!(asset_section.status, SectionStatus::Warning);
        assert_eq!(asset_section.assets[0].name, "https://shop.example.com");
        assert_eq!(review.warning_count(), 1);
    }

    #[test]
    fn test_all_passed_panel() {
        let mut review = ReviewSummary::sample();
        review.issues.clear();
        assert_eq!(review.panel_headline(), ALL_PASSED_TITLE);
        assert_eq!(review.panel_subtitle(), ALL_PASSED_MESSAGE);
    }

    #[test]
    fn test_submit_gated_on_nda_only() {
        let mut legal = LegalAgreement::default();
        legal.toggle_audit_consent();
        assert!(!legal.can_submit());
        legal.toggle_nda();
        assert!(legal.can_submit());
    }

    #[test]
    fn test_info_row_display() {
        assert_eq!(InfoRow::list("x", vec![]).display(), "Not provided");
        assert_eq!(InfoRow::list("x", vec!["a".into(), "b".into()]).display(), "a, b");
    }
}
