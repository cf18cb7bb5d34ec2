// ABOUTME: Client business context record (step 1) with its catalogs, edits and validation

use serde::{Deserialize, Serialize};

use super::{toggle_value, Choice};
use crate::wizard::form::{
    expect_rating, expect_text, pick_into, toggle_into, FieldDef, FieldError, FieldInput,
    FieldKind, FieldValue, FormModel,
};
use crate::wizard::validation::{require, Validate, ValidationError};

/// Criticality given to a sensitive data type when it is first selected
pub const DEFAULT_CRITICALITY: u8 = 3;

pub const INDUSTRIES: &[Choice] = &[
    Choice::plain("Financial Services"),
    Choice::plain("Healthcare"),
    Choice::plain("Technology"),
    Choice::plain("Retail & E-commerce"),
    Choice::plain("Manufacturing"),
    Choice::plain("Government"),
    Choice::plain("Education"),
    Choice::plain("Energy & Utilities"),
    Choice::plain("Telecommunications"),
    Choice::plain("Other"),
];

pub const ORGANIZATION_SIZES: &[Choice] = &[
    Choice::plain("Small (1-50 employees)"),
    Choice::plain("Medium (51-250 employees)"),
    Choice::plain("Large (251-1000 employees)"),
    Choice::plain("Enterprise (1000+ employees)"),
];

pub const BUSINESS_FUNCTIONS: &[Choice] = &[
    Choice::plain("Customer Data Management"),
    Choice::plain("Financial Transactions"),
    Choice::plain("Healthcare Records"),
    Choice::plain("E-commerce Operations"),
    Choice::plain("Supply Chain Management"),
    Choice::plain("Human Resources"),
    Choice::plain("Research & Development"),
    Choice::plain("Marketing & Analytics"),
    Choice::plain("Legal & Compliance"),
    Choice::plain("IT Operations"),
];

pub const SENSITIVE_DATA_TYPES: &[Choice] = &[
    Choice::plain("Personal Identifiable Information (PII)"),
    Choice::plain("Payment Card Information (PCI)"),
    Choice::plain("Protected Health Information (PHI)"),
    Choice::plain("Financial Records"),
    Choice::plain("Intellectual Property"),
    Choice::plain("Customer Data"),
    Choice::plain("Employee Records"),
    Choice::plain("Trade Secrets"),
];

pub const COMPLIANCE_STANDARDS: &[Choice] = &[
    Choice::new("SOX", "SOX (Sarbanes-Oxley)", ""),
    Choice::new("HIPAA", "HIPAA", ""),
    Choice::new("PCI-DSS", "PCI-DSS", ""),
    Choice::new("GDPR", "GDPR", ""),
];

pub const TESTING_OBJECTIVES: &[Choice] = &[
    Choice::plain("Identify vulnerabilities before attackers do"),
    Choice::plain("Meet compliance requirements"),
    Choice::plain("Validate security controls effectiveness"),
    Choice::plain("Improve security posture"),
    Choice::plain("Prepare for security audit"),
    Choice::plain("Test incident response capabilities"),
    Choice::plain("Assess third-party integrations"),
    Choice::plain("Evaluate cloud security"),
];

pub const MATURITY_LEVELS: &[Choice] = &[
    Choice::new("1", "Initial", "Ad-hoc security practices"),
    Choice::new("2", "Developing", "Basic security controls in place"),
    Choice::new("3", "Defined", "Documented security processes"),
    Choice::new("4", "Managed", "Monitored and measured security"),
    Choice::new("5", "Optimized", "Continuous improvement culture"),
];

pub const CRITICALITY_SCALE: &[Choice] = &[
    Choice::new("1", "1", "Low"),
    Choice::new("2", "2", ""),
    Choice::new("3", "3", ""),
    Choice::new("4", "4", ""),
    Choice::new("5", "5", "Critical"),
];

const CRITICALITY_PREFIX: &str = "criticality:";

/// A selected sensitive data type and how critical it is (1-5)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveData {
    pub name: String,
    pub criticality: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessContext {
    pub company_name: String,
    pub industry: String,
    pub organization_size: String,
    pub business_functions: Vec<String>,
    pub sensitive_data_types: Vec<SensitiveData>,
    pub compliance_standards: Vec<String>,
    pub has_security_incidents: bool,
    pub incident_details: String,
    /// 0 until rated
    pub security_maturity_rating: u8,
    pub primary_objectives: Vec<String>,
}

impl BusinessContext {
    pub fn toggle_business_function(&mut self, function: &str) {
        toggle_value(&mut self.business_functions, function);
    }

    /// Select with the default criticality, or remove exactly the record with this name
    pub fn toggle_sensitive_data(&mut self, name: &str) {
        if let Some(pos) = self.sensitive_data_types.iter().position(|d| d.name == name) {
            self.sensitive_data_types.remove(pos);
        } else {
            self.sensitive_data_types.push(SensitiveData {
                name: name.to_string(),
                criticality: DEFAULT_CRITICALITY,
            });
        }
    }

    /// Clamped to 1..=5; unknown names are ignored
    pub fn set_criticality(&mut self, name: &str, criticality: u8) {
        if let Some(data) = self.sensitive_data_types.iter_mut().find(|d| d.name == name) {
            data.criticality = criticality.clamp(1, 5);
        }
    }

    pub fn toggle_compliance(&mut self, standard: &str) {
        toggle_value(&mut self.compliance_standards, standard);
    }

    pub fn toggle_objective(&mut self, objective: &str) {
        toggle_value(&mut self.primary_objectives, objective);
    }

    pub fn set_maturity(&mut self, rating: u8) {
        self.security_maturity_rating = rating.clamp(1, 5);
    }

    pub fn maturity_label(&self) -> Option<&'static str> {
        MATURITY_LEVELS
            .get(usize::from(self.security_maturity_rating).wrapping_sub(1))
            .map(|level| level.label)
    }
}

impl Validate for BusinessContext {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, !self.company_name.trim().is_empty(), "Company Name", "This field is required");
        require(&mut errors, !self.industry.is_empty(), "Industry", "Please select your industry");
        require(&mut errors, !self.organization_size.is_empty(), "Organization Size", "Please select your organization size");
        require(&mut errors, !self.business_functions.is_empty(), "Business Functions", "Select at least one business function");
        require(&mut errors, !self.sensitive_data_types.is_empty(), "Sensitive Data Types", "Select at least one data type");
        require(&mut errors, !self.compliance_standards.is_empty(), "Compliance Standards", "Select at least one standard");
        require(&mut errors, self.security_maturity_rating != 0, "Security Maturity", "Please rate your security maturity level");
        require(&mut errors, !self.primary_objectives.is_empty(), "Primary Objectives", "Select at least one testing objective");
        errors
    }
}

impl FormModel for BusinessContext {
    fn fields(&self) -> Vec<FieldDef> {
        let mut fields = vec![
            FieldDef::new("companyName", "Company Name", FieldKind::Text, "Company Details").required(),
            FieldDef::new("industry", "Industry", FieldKind::Choice(INDUSTRIES), "Company Details").required(),
            FieldDef::new("organizationSize", "Organization Size", FieldKind::Choice(ORGANIZATION_SIZES), "Company Details").required(),
            FieldDef::new("businessFunctions", "Business Functions", FieldKind::MultiChoice(BUSINESS_FUNCTIONS), "Company Details").required(),
            FieldDef::new("sensitiveDataTypes", "Sensitive Data Types", FieldKind::MultiChoice(SENSITIVE_DATA_TYPES), "Sensitive Data").required(),
        ];

        // One criticality slider per selected data type
        for data in &self.sensitive_data_types {
            fields.push(FieldDef::new(
                format!("{CRITICALITY_PREFIX}{}", data.name),
                format!("{} criticality", data.name),
                FieldKind::Rating(CRITICALITY_SCALE),
                "Sensitive Data",
            ));
        }

        fields.push(FieldDef::new("complianceStandards", "Compliance Standards", FieldKind::MultiChoice(COMPLIANCE_STANDARDS), "Sensitive Data").required());
        fields.push(FieldDef::new("securityMaturityRating", "Security Maturity", FieldKind::Rating(MATURITY_LEVELS), "Security Maturity Assessment").required());
        fields.push(FieldDef::new("hasSecurityIncidents", "Security incidents in the past 12 months", FieldKind::Checkbox, "Security Maturity Assessment"));
        if self.has_security_incidents {
            fields.push(FieldDef::new("incidentDetails", "Incident Details", FieldKind::Multiline, "Security Maturity Assessment"));
        }
        fields.push(FieldDef::new("primaryObjectives", "Primary Objectives", FieldKind::MultiChoice(TESTING_OBJECTIVES), "Security Maturity Assessment").required());
        fields
    }

    fn value(&self, key: &str) -> Option<FieldValue> {
        if let Some(name) = key.strip_prefix(CRITICALITY_PREFIX) {
            return self
                .sensitive_data_types
                .iter()
                .find(|d| d.name == name)
                .map(|d| FieldValue::Rating(d.criticality));
        }

        let value = match key {
            "companyName" => FieldValue::text(&self.company_name),
            "industry" => FieldValue::Selected(self.industry.clone()),
            "organizationSize" => FieldValue::Selected(self.organization_size.clone()),
            "businessFunctions" => FieldValue::Many(self.business_functions.clone()),
            "sensitiveDataTypes" => FieldValue::Many(
                self.sensitive_data_types.iter().map(|d| d.name.clone()).collect(),
            ),
            "complianceStandards" => FieldValue::Many(self.compliance_standards.clone()),
            "securityMaturityRating" => FieldValue::Rating(self.security_maturity_rating),
            "hasSecurityIncidents" => FieldValue::Flag(self.has_security_incidents),
            "incidentDetails" => FieldValue::text(&self.incident_details),
            "primaryObjectives" => FieldValue::Many(self.primary_objectives.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn apply(&mut self, key: &str, input: FieldInput) -> Result<(), FieldError> {
        if let Some(name) = key.strip_prefix(CRITICALITY_PREFIX) {
            let rating = expect_rating(key, input, 5)?;
            self.set_criticality(name, rating);
            return Ok(());
        }

        match key {
            "companyName" => self.company_name = expect_text(key, input)?,
            "industry" => pick_into(&mut self.industry, key, input, INDUSTRIES)?,
            "organizationSize" => pick_into(&mut self.organization_size, key, input, ORGANIZATION_SIZES)?,
            "businessFunctions" => toggle_into(&mut self.business_functions, key, input, BUSINESS_FUNCTIONS)?,
            "sensitiveDataTypes" => match input {
                FieldInput::Pick(name) if SENSITIVE_DATA_TYPES.iter().any(|c| c.value == name) => {
                    self.toggle_sensitive_data(&name);
                }
                FieldInput::Pick(name) => return Err(FieldError::Rejected(format!("Unknown option: {name}"))),
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "complianceStandards" => toggle_into(&mut self.compliance_standards, key, input, COMPLIANCE_STANDARDS)?,
            "securityMaturityRating" => {
                let rating = expect_rating(key, input, 5)?;
                self.set_maturity(rating);
            }
            "hasSecurityIncidents" => match input {
                FieldInput::Flag(flag) => self.has_security_incidents = flag,
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "incidentDetails" => self.incident_details = expect_text(key, input)?,
            "primaryObjectives" => toggle_into(&mut self.primary_objectives, key, input, TESTING_OBJECTIVES)?,
            _ => return Err(FieldError::UnknownField(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PII: &str = "Personal Identifiable Information (PII)";

    fn complete() -> BusinessContext {
        BusinessContext {
            company_name: "Acme Corp".to_string(),
            industry: "Technology".to_string(),
            organization_size: "Medium (51-250 employees)".to_string(),
            business_functions: vec!["IT Operations".to_string()],
            sensitive_data_types: vec![SensitiveData { name: PII.to_string(), criticality: 4 }],
            compliance_standards: vec!["GDPR".to_string()],
            has_security_incidents: false,
            incident_details: String::new(),
            security_maturity_rating: 3,
            primary_objectives: vec!["Improve security posture".to_string()],
        }
    }

    #[test]
    fn test_empty_record_reports_every_required_field() {
        let fields: Vec<String> = BusinessContext::default()
            .validate()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                "Company Name",
                "Industry",
                "Organization Size",
                "Business Functions",
                "Sensitive Data Types",
                "Compliance Standards",
                "Security Maturity",
                "Primary Objectives",
            ]
        );
    }

    #[test]
    fn test_complete_record_is_valid() {
        assert!(complete().validate().is_empty());
    }

    #[test]
    fn test_whitespace_company_name_is_missing() {
        let mut record = complete();
        record.company_name = "   ".to_string();
        let errors = record.validate();
        assert_eq!(errors, vec![ValidationError::new("Company Name", "This field is required")]);
    }

    #[test]
    fn test_toggle_sensitive_data_defaults_and_removes_by_name() {
        let mut record = BusinessContext::default();
        record.toggle_sensitive_data("Financial Records");
        record.toggle_sensitive_data(PII);
        assert_eq!(
            record.sensitive_data_types[1],
            SensitiveData { name: PII.to_string(), criticality: 3 }
        );

        record.toggle_sensitive_data(PII);
        assert_eq!(
            record.sensitive_data_types,
            vec![SensitiveData { name: "Financial Records".to_string(), criticality: 3 }]
        );
    }

    #[test]
    fn test_criticality_field_follows_selection() {
        let mut record = BusinessContext::default();
        record.apply("sensitiveDataTypes", FieldInput::Pick(PII.to_string())).unwrap();
        let key = format!("criticality:{PII}");
        assert!(record.fields().iter().any(|f| f.key == key));

        record.apply(&key, FieldInput::Rate(5)).unwrap();
        assert_eq!(record.value(&key), Some(FieldValue::Rating(5)));
    }

    #[test]
    fn test_incident_details_only_shown_with_incidents() {
        let mut record = BusinessContext::default();
        assert!(!record.fields().iter().any(|f| f.key == "incidentDetails"));
        record.apply("hasSecurityIncidents", FieldInput::Flag(true)).unwrap();
        assert!(record.fields().iter().any(|f| f.key == "incidentDetails"));
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_value(complete()).unwrap();
        assert_eq!(json["companyName"], "Acme Corp");
        assert_eq!(json["securityMaturityRating"], 3);
        assert_eq!(json["sensitiveDataTypes"][0]["criticality"], 4);
    }

    #[test]
    fn test_json_round_trip_keeps_every_field() {
        let record = BusinessContext {
            has_security_incidents: true,
            incident_details: "Phishing campaign in 2023, credentials reset".to_string(),
            sensitive_data_types: vec![
                SensitiveData { name: PII.to_string(), criticality: 5 },
                SensitiveData { name: "Trade Secrets".to_string(), criticality: 2 },
            ],
            compliance_standards: vec!["HIPAA".to_string(), "PCI-DSS".to_string()],
            primary_objectives: vec![
                "Meet compliance requirements".to_string(),
                "Evaluate cloud security".to_string(),
            ],
            ..complete()
        };

        let json = serde_json::to_string(&record).unwrap();
        let restored: BusinessContext = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let record: BusinessContext = serde_json::from_str(r#"{"companyName":"Acme"}"#).unwrap();
        assert_eq!(record.company_name, "Acme");
        assert!(record.business_functions.is_empty());
        assert_eq!(record.security_maturity_rating, 0);
    }

    #[test]
    fn test_maturity_label() {
        let mut record = BusinessContext::default();
        assert_eq!(record.maturity_label(), None);
        record.set_maturity(4);
        assert_eq!(record.maturity_label(), Some("Managed"));
    }
}
