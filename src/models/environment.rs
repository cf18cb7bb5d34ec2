// ABOUTME: Technical environment record (step 3): stack, authentication, integrations, SDLC,
// monitoring, data-flow complexity and supporting documentation metadata

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{label_for, new_item_id, split_entry, toggle_value, Choice};
use crate::wizard::form::{
    expect_rating, expect_text, pick_into, toggle_into, FieldDef, FieldError, FieldInput,
    FieldKind, FieldValue, FormModel,
};
use crate::wizard::uploads::{check_upload, format_file_size, FileCandidate, UploadKind};
use crate::wizard::validation::{require, Validate, ValidationError};

pub const AUTH_METHODS: &[Choice] = &[
    Choice::new("sso", "Single Sign-On (SSO)", "SAML, OAuth, OpenID Connect"),
    Choice::new("mfa", "Multi-Factor Authentication (MFA)", "SMS, TOTP, Biometric"),
    Choice::new("ldap", "LDAP/Active Directory", "Directory-based authentication"),
    Choice::new("oauth", "OAuth 2.0", "Token-based authorization"),
    Choice::new("basic", "Basic Authentication", "Username and password"),
    Choice::new("certificate", "Certificate-Based", "PKI/SSL certificates"),
    Choice::new("custom", "Custom Implementation", "Proprietary authentication system"),
];

pub const METHODOLOGIES: &[Choice] = &[
    Choice::plain("Agile/Scrum"),
    Choice::plain("Waterfall"),
    Choice::plain("DevOps"),
    Choice::plain("Kanban"),
    Choice::plain("Hybrid"),
    Choice::plain("Ad-hoc"),
    Choice::plain("Other"),
];

pub const DEPLOYMENT_FREQUENCIES: &[Choice] = &[
    Choice::plain("Multiple times per day"),
    Choice::plain("Daily"),
    Choice::plain("Weekly"),
    Choice::plain("Bi-weekly"),
    Choice::plain("Monthly"),
    Choice::plain("Quarterly"),
    Choice::plain("Ad-hoc"),
];

pub const CHANGE_MANAGEMENT: &[Choice] = &[
    Choice::plain("Formal change control board"),
    Choice::plain("Peer review process"),
    Choice::plain("Automated approval workflow"),
    Choice::plain("Manager approval required"),
    Choice::plain("Self-service deployment"),
    Choice::plain("No formal process"),
];

/// Monitoring catalog; the description carries the tool category
pub const MONITORING_TOOLS: &[Choice] = &[
    Choice::new("splunk", "Splunk", "SIEM"),
    Choice::new("datadog", "Datadog", "APM"),
    Choice::new("newrelic", "New Relic", "APM"),
    Choice::new("prometheus", "Prometheus", "Metrics"),
    Choice::new("grafana", "Grafana", "Visualization"),
    Choice::new("elk", "ELK Stack", "Logging"),
    Choice::new("cloudwatch", "AWS CloudWatch", "Cloud"),
    Choice::new("azure-monitor", "Azure Monitor", "Cloud"),
    Choice::new("gcp-monitoring", "GCP Monitoring", "Cloud"),
    Choice::new("pagerduty", "PagerDuty", "Alerting"),
    Choice::new("sentry", "Sentry", "Error Tracking"),
    Choice::new("dynatrace", "Dynatrace", "APM"),
];

pub const COMPLEXITY_LEVELS: &[Choice] = &[
    Choice::new("1", "Simple", "Linear data flow, minimal integrations"),
    Choice::new("2", "Moderate", "Some branching, few external services"),
    Choice::new("3", "Complex", "Multiple paths, several integrations"),
    Choice::new("4", "Very Complex", "Highly interconnected, many services"),
    Choice::new("5", "Highly Complex", "Distributed architecture, extensive integrations"),
];

/// Prompts shown under the technology stack description
pub const TECH_STACK_SUGGESTIONS: &[&str] = &[
    "Frontend: React, Angular, Vue.js, etc.",
    "Backend: Node.js, Python, Java, .NET, etc.",
    "Database: PostgreSQL, MySQL, MongoDB, etc.",
    "Infrastructure: AWS, Azure, GCP, Docker, Kubernetes",
    "Security: WAF, IDS/IPS, SIEM, etc.",
];

const AUTH_DETAIL_PREFIX: &str = "authDetails:";

/// Case-insensitive match on a tool's name or category
pub fn search_monitoring_tools(query: &str) -> Vec<&'static Choice> {
    let query = query.trim().to_lowercase();
    MONITORING_TOOLS
        .iter()
        .filter(|tool| {
            query.is_empty()
                || tool.label.to_lowercase().contains(&query)
                || tool.description.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// A third-party service the environment depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub criticality: Criticality,
    #[serde(default)]
    pub data_flow: String,
}

/// Which integration attribute to overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationField {
    Name(String),
    Criticality(Criticality),
    DataFlow(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sdlc {
    pub methodology: String,
    pub deployment_frequency: String,
    pub change_management: String,
    pub code_review: String,
    pub testing_practices: String,
}

/// Metadata of an accepted supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentOverview {
    pub technology_stack: String,
    pub auth_methods: Vec<String>,
    pub auth_details: BTreeMap<String, String>,
    pub integrations: Vec<Integration>,
    pub sdlc: Sdlc,
    pub monitoring_tools: Vec<String>,
    pub custom_monitoring_tools: String,
    /// 0 until rated
    pub data_flow_complexity: u8,
    pub uploaded_files: Vec<UploadedFile>,
}

impl EnvironmentOverview {
    /// Deselecting a method also discards its detail text
    pub fn toggle_auth_method(&mut self, id: &str) {
        toggle_value(&mut self.auth_methods, id);
        if !self.auth_methods.iter().any(|m| m == id) {
            self.auth_details.remove(id);
        }
    }

    pub fn set_auth_detail(&mut self, id: &str, detail: &str) {
        self.auth_details.insert(id.to_string(), detail.to_string());
    }

    /// Append an integration and return its id
    pub fn add_integration(&mut self, name: &str, criticality: Criticality, data_flow: &str) -> String {
        let id = new_item_id();
        self.integrations.push(Integration {
            id: id.clone(),
            name: name.to_string(),
            criticality,
            data_flow: data_flow.to_string(),
        });
        id
    }

    pub fn remove_integration(&mut self, id: &str) {
        self.integrations.retain(|i| i.id != id);
    }

    pub fn update_integration(&mut self, id: &str, field: IntegrationField) {
        if let Some(integration) = self.integrations.iter_mut().find(|i| i.id == id) {
            match field {
                IntegrationField::Name(name) => integration.name = name,
                IntegrationField::Criticality(criticality) => integration.criticality = criticality,
                IntegrationField::DataFlow(flow) => integration.data_flow = flow,
            }
        }
    }

    pub fn toggle_monitoring_tool(&mut self, id: &str) {
        toggle_value(&mut self.monitoring_tools, id);
    }

    pub fn set_complexity(&mut self, level: u8) {
        self.data_flow_complexity = level.clamp(1, 5);
    }

    /// Validate and record a supporting document
    pub fn attach_file(&mut self, candidate: &FileCandidate, max_bytes: u64) -> Result<String, FieldError> {
        check_upload(UploadKind::Documentation, candidate, max_bytes)?;
        let id = new_item_id();
        self.uploaded_files.push(UploadedFile {
            id: id.clone(),
            name: candidate.name.clone(),
            size: candidate.size,
            mime_type: candidate.mime_type.clone(),
            uploaded_at: Utc::now().to_rfc3339(),
        });
        Ok(id)
    }

    pub fn remove_file(&mut self, id: &str) {
        self.uploaded_files.retain(|f| f.id != id);
    }

    pub fn complexity_label(&self) -> Option<&'static str> {
        COMPLEXITY_LEVELS
            .get(usize::from(self.data_flow_complexity).wrapping_sub(1))
            .map(|level| level.label)
    }

    /// Parse `name | criticality | data flow`
    fn parse_integration(entry: &str) -> Result<(String, Criticality, String), FieldError> {
        let parts = split_entry(entry);
        let name = parts.first().cloned().unwrap_or_default();
        if name.is_empty() {
            return Err(FieldError::Rejected("Integration name is required".to_string()));
        }
        let criticality = match parts.get(1).map(String::as_str) {
            None | Some("") => Criticality::default(),
            Some(raw) => Criticality::parse(raw).ok_or_else(|| {
                FieldError::Rejected(format!("Criticality must be low, medium, high or critical, got {raw}"))
            })?,
        };
        let data_flow = parts.get(2).cloned().unwrap_or_default();
        Ok((name, criticality, data_flow))
    }
}

impl Validate for EnvironmentOverview {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, !self.technology_stack.trim().is_empty(), "Technology Stack", "Please describe your technology stack");
        require(&mut errors, !self.auth_methods.is_empty(), "Authentication Methods", "Please select at least one authentication method");
        require(&mut errors, !self.sdlc.methodology.is_empty(), "Development Methodology", "Please select your development methodology");
        require(&mut errors, !self.sdlc.deployment_frequency.is_empty(), "Deployment Frequency", "Please select your deployment frequency");
        require(&mut errors, !self.sdlc.change_management.is_empty(), "Change Management", "Please select your change management process");
        require(&mut errors, self.data_flow_complexity != 0, "Data Flow Complexity", "Please rate your data flow complexity");
        errors
    }
}

impl FormModel for EnvironmentOverview {
    fn fields(&self) -> Vec<FieldDef> {
        let mut fields = vec![
            FieldDef::new("technologyStack", "Technology Stack", FieldKind::Multiline, "Technology Stack").required(),
            FieldDef::new("authMethods", "Authentication Methods", FieldKind::MultiChoice(AUTH_METHODS), "Authentication").required(),
        ];
        for method in &self.auth_methods {
            fields.push(FieldDef::new(
                format!("{AUTH_DETAIL_PREFIX}{method}"),
                format!("{} details", label_for(AUTH_METHODS, method)),
                FieldKind::Text,
                "Authentication",
            ));
        }
        fields.extend([
            FieldDef::new("integrations", "Third-Party Integrations", FieldKind::Entries { hint: "Name | low/medium/high/critical | data flow" }, "Third-Party Integrations"),
            FieldDef::new("sdlc.methodology", "Development Methodology", FieldKind::Choice(METHODOLOGIES), "SDLC Processes").required(),
            FieldDef::new("sdlc.deploymentFrequency", "Deployment Frequency", FieldKind::Choice(DEPLOYMENT_FREQUENCIES), "SDLC Processes").required(),
            FieldDef::new("sdlc.changeManagement", "Change Management", FieldKind::Choice(CHANGE_MANAGEMENT), "SDLC Processes").required(),
            FieldDef::new("sdlc.codeReview", "Code Review Process", FieldKind::Text, "SDLC Processes"),
            FieldDef::new("sdlc.testingPractices", "Testing Practices", FieldKind::Multiline, "SDLC Processes"),
            FieldDef::new("monitoringTools", "Monitoring Tools", FieldKind::MultiChoice(MONITORING_TOOLS), "Monitoring"),
            FieldDef::new("customMonitoringTools", "Other Monitoring Tools", FieldKind::Text, "Monitoring"),
            FieldDef::new("dataFlowComplexity", "Data Flow Complexity", FieldKind::Rating(COMPLEXITY_LEVELS), "Data Flow Complexity").required(),
            FieldDef::new("uploadedFiles", "Supporting Documentation", FieldKind::Attachment(UploadKind::Documentation), "Documentation"),
        ]);
        fields
    }

    fn value(&self, key: &str) -> Option<FieldValue> {
        if let Some(method) = key.strip_prefix(AUTH_DETAIL_PREFIX) {
            return Some(FieldValue::Text(self.auth_details.get(method).cloned().unwrap_or_default()));
        }

        let value = match key {
            "technologyStack" => FieldValue::text(&self.technology_stack),
            "authMethods" => FieldValue::Many(self.auth_methods.clone()),
            "integrations" => FieldValue::Entries(
                self.integrations
                    .iter()
                    .map(|i| {
                        if i.data_flow.is_empty() {
                            format!("{} [{}]", i.name, i.criticality.as_str())
                        } else {
                            format!("{} [{}] {}", i.name, i.criticality.as_str(), i.data_flow)
                        }
                    })
                    .collect(),
            ),
            "sdlc.methodology" => FieldValue::Selected(self.sdlc.methodology.clone()),
            "sdlc.deploymentFrequency" => FieldValue::Selected(self.sdlc.deployment_frequency.clone()),
            "sdlc.changeManagement" => FieldValue::Selected(self.sdlc.change_management.clone()),
            "sdlc.codeReview" => FieldValue::text(&self.sdlc.code_review),
            "sdlc.testingPractices" => FieldValue::text(&self.sdlc.testing_practices),
            "monitoringTools" => FieldValue::Many(self.monitoring_tools.clone()),
            "customMonitoringTools" => FieldValue::text(&self.custom_monitoring_tools),
            "dataFlowComplexity" => FieldValue::Rating(self.data_flow_complexity),
            "uploadedFiles" => FieldValue::Entries(
                self.uploaded_files
                    .iter()
                    .map(|f| format!("{} ({})", f.name, format_file_size(f.size)))
                    .collect(),
            ),
            _ => return None,
        };
        Some(value)
    }

    fn apply(&mut self, key: &str, input: FieldInput) -> Result<(), FieldError> {
        if let Some(method) = key.strip_prefix(AUTH_DETAIL_PREFIX) {
            let text = expect_text(key, input)?;
            self.set_auth_detail(method, &text);
            return Ok(());
        }

        match key {
            "technologyStack" => self.technology_stack = expect_text(key, input)?,
            "authMethods" => {
                let before = self.auth_methods.clone();
                toggle_into(&mut self.auth_methods, key, input, AUTH_METHODS)?;
                for removed in before.iter().filter(|m| !self.auth_methods.contains(m)) {
                    self.auth_details.remove(removed);
                }
            }
            "integrations" => match input {
                FieldInput::Add(entry) => {
                    let (name, criticality, data_flow) = Self::parse_integration(&entry)?;
                    self.add_integration(&name, criticality, &data_flow);
                }
                FieldInput::Remove(index) => {
                    let id = self
                        .integrations
                        .get(index)
                        .map(|i| i.id.clone())
                        .ok_or_else(|| FieldError::Rejected(format!("No integration at position {}", index + 1)))?;
                    self.remove_integration(&id);
                }
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "sdlc.methodology" => pick_into(&mut self.sdlc.methodology, key, input, METHODOLOGIES)?,
            "sdlc.deploymentFrequency" => pick_into(&mut self.sdlc.deployment_frequency, key, input, DEPLOYMENT_FREQUENCIES)?,
            "sdlc.changeManagement" => pick_into(&mut self.sdlc.change_management, key, input, CHANGE_MANAGEMENT)?,
            "sdlc.codeReview" => self.sdlc.code_review = expect_text(key, input)?,
            "sdlc.testingPractices" => self.sdlc.testing_practices = expect_text(key, input)?,
            "monitoringTools" => toggle_into(&mut self.monitoring_tools, key, input, MONITORING_TOOLS)?,
            "customMonitoringTools" => self.custom_monitoring_tools = expect_text(key, input)?,
            "dataFlowComplexity" => {
                let level = expect_rating(key, input, 5)?;
                self.set_complexity(level);
            }
            "uploadedFiles" => match input {
                FieldInput::Attach { file, max_bytes } => {
                    self.attach_file(&file, max_bytes)?;
                }
                FieldInput::Detach(Some(index)) | FieldInput::Remove(index) => {
                    let id = self
                        .uploaded_files
                        .get(index)
                        .map(|f| f.id.clone())
                        .ok_or_else(|| FieldError::Rejected(format!("No file at position {}", index + 1)))?;
                    self.remove_file(&id);
                }
                FieldInput::Detach(None) => self.uploaded_files.clear(),
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            _ => return Err(FieldError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn hints(&self) -> Vec<String> {
        if self.technology_stack.trim().is_empty() {
            TECH_STACK_SUGGESTIONS.iter().map(|s| (*s).to_string()).collect()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::uploads::DEFAULT_MAX_UPLOAD_BYTES;
    use pretty_assertions::assert_eq;

    fn complete() -> EnvironmentOverview {
        EnvironmentOverview {
            technology_stack: "Rust services on Kubernetes".to_string(),
            auth_methods: vec!["sso".to_string()],
            sdlc: Sdlc {
                methodology: "DevOps".to_string(),
                deployment_frequency: "Daily".to_string(),
                change_management: "Peer review process".to_string(),
                ..Default::default()
            },
            data_flow_complexity: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_record_errors() {
        let fields: Vec<String> = EnvironmentOverview::default()
            .validate()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                "Technology Stack",
                "Authentication Methods",
                "Development Methodology",
                "Deployment Frequency",
                "Change Management",
                "Data Flow Complexity",
            ]
        );
        assert!(complete().validate().is_empty());
    }

    #[test]
    fn test_auth_detail_dropped_with_method() {
        let mut env = complete();
        env.set_auth_detail("sso", "Okta");
        env.toggle_auth_method("sso");
        assert!(env.auth_details.is_empty());
        assert!(env.auth_methods.is_empty());
    }

    #[test]
    fn test_integrations_parse_and_remove_by_id() {
        let mut env = EnvironmentOverview::default();
        env.apply("integrations", FieldInput::Add("Stripe | high | card data".into())).unwrap();
        env.apply("integrations", FieldInput::Add("SendGrid".into())).unwrap();

        assert_eq!(env.integrations[0].criticality, Criticality::High);
        assert_eq!(env.integrations[0].data_flow, "card data");
        assert_eq!(env.integrations[1].criticality, Criticality::Medium);
        assert_ne!(env.integrations[0].id, env.integrations[1].id);

        let first = env.integrations[0].id.clone();
        env.remove_integration(&first);
        assert_eq!(env.integrations.len(), 1);
        assert_eq!(env.integrations[0].name, "SendGrid");
    }

    #[test]
    fn test_integration_rejects_unknown_criticality() {
        let mut env = EnvironmentOverview::default();
        let result = env.apply("integrations", FieldInput::Add("Stripe | urgent".into()));
        assert!(matches!(result, Err(FieldError::Rejected(_))));
        assert!(env.integrations.is_empty());
    }

    #[test]
    fn test_update_integration() {
        let mut env = EnvironmentOverview::default();
        let id = env.add_integration("Auth0", Criticality::Low, "");
        env.update_integration(&id, IntegrationField::Criticality(Criticality::Critical));
        env.update_integration(&id, IntegrationField::DataFlow("identity tokens".into()));
        assert_eq!(env.integrations[0].criticality, Criticality::Critical);
        assert_eq!(env.integrations[0].data_flow, "identity tokens");
    }

    #[test]
    fn test_search_monitoring_tools_by_name_or_category() {
        let names: Vec<&str> = search_monitoring_tools("apm").iter().map(|t| t.label).collect();
        assert_eq!(names, vec!["Datadog", "New Relic", "Dynatrace"]);

        let names: Vec<&str> = search_monitoring_tools("graf").iter().map(|t| t.label).collect();
        assert_eq!(names, vec!["Grafana"]);

        assert_eq!(search_monitoring_tools("").len(), MONITORING_TOOLS.len());
    }

    #[test]
    fn test_attach_file_validates_and_records_metadata() {
        let mut env = EnvironmentOverview::default();
        let rejected = env.attach_file(&FileCandidate::new("payload.exe", 10), DEFAULT_MAX_UPLOAD_BYTES);
        assert!(rejected.is_err());
        assert!(env.uploaded_files.is_empty());

        let id = env
            .attach_file(&FileCandidate::new("architecture.pdf", 2048), DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap();
        assert_eq!(env.uploaded_files[0].mime_type, "application/pdf");
        assert_eq!(
            env.value("uploadedFiles"),
            Some(FieldValue::Entries(vec!["architecture.pdf (2 KB)".to_string()]))
        );

        env.remove_file(&id);
        assert!(env.uploaded_files.is_empty());
    }

    #[test]
    fn test_uploaded_file_metadata_round_trips() {
        let mut env = complete();
        env.attach_file(&FileCandidate::new("diagram.png", 100), DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains("\"type\":\"image/png\""));
        let restored: EnvironmentOverview = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, env);
    }
}
