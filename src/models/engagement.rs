// ABOUTME: Engagement preferences record (step 2): approach, timeline, budget, deliverables, support

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{label_for, toggle_value, Choice};
use crate::wizard::form::{
    expect_pick, expect_text, pick_into, toggle_into, FieldDef, FieldError, FieldInput,
    FieldKind, FieldValue, FormModel,
};
use crate::wizard::validation::{require, Validate, ValidationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const TESTING_APPROACHES: &[Choice] = &[
    Choice::new(
        "black-box",
        "Black-Box Testing",
        "No prior knowledge of internal systems. Simulates external attacker perspective with zero access to source code or architecture.",
    ),
    Choice::new(
        "gray-box",
        "Gray-Box Testing",
        "Partial knowledge provided. Combines external and internal perspectives with limited access to documentation and credentials.",
    ),
    Choice::new(
        "white-box",
        "White-Box Testing",
        "Full system knowledge including source code, architecture diagrams, and credentials. Comprehensive internal security assessment.",
    ),
];

pub const BUDGET_RANGES: &[Choice] = &[
    Choice::new("5000-10000", "$5,000 - $10,000", "Small scope, single application"),
    Choice::new("10000-25000", "$10,000 - $25,000", "Medium scope, multiple assets"),
    Choice::new("25000-50000", "$25,000 - $50,000", "Large scope, comprehensive testing"),
    Choice::new("50000-100000", "$50,000 - $100,000", "Enterprise-level engagement"),
    Choice::new("custom", "Custom Amount", "Specify your budget"),
];

pub const DELIVERABLES: &[Choice] = &[
    Choice::new("executive-summary", "Executive Summary", "High-level overview for stakeholders with risk ratings and business impact analysis"),
    Choice::new("technical-report", "Technical Report", "Detailed findings with vulnerability descriptions, evidence, and exploitation steps"),
    Choice::new("remediation-guidance", "Remediation Guidance", "Step-by-step fix recommendations with code examples and best practices"),
    Choice::new("presentation", "Executive Presentation", "Live presentation of findings to leadership team with Q&A session"),
    Choice::new("retest-report", "Retest Report", "Verification testing after remediation with updated risk assessment"),
    Choice::new("compliance-mapping", "Compliance Mapping", "Findings mapped to relevant compliance frameworks (PCI DSS, HIPAA, etc.)"),
];

/// Deliverables flagged as recommended
pub const RECOMMENDED_DELIVERABLES: &[&str] =
    &["executive-summary", "technical-report", "remediation-guidance"];

pub const SUPPORT_OPTIONS: &[Choice] = &[
    Choice::new("retesting", "Remediation Retesting", "Verify fixes after remediation with follow-up testing"),
    Choice::new("consultation", "Security Consultation", "Post-engagement advisory hours for questions and guidance"),
    Choice::new("ongoing-advisory", "Ongoing Security Advisory", "Quarterly security reviews and continuous improvement support"),
    Choice::new("training", "Security Training", "Developer training on secure coding and vulnerability prevention"),
];

pub const RETESTING_TIMELINES: &[Choice] = &[
    Choice::new("2-weeks", "2 Weeks After Remediation", ""),
    Choice::new("1-month", "1 Month After Remediation", ""),
    Choice::new("3-months", "3 Months After Remediation", ""),
    Choice::new("custom", "Custom Timeline", ""),
];

pub const CONSULTATION_HOURS: &[Choice] = &[
    Choice::new("5", "5 Hours", ""),
    Choice::new("10", "10 Hours", ""),
    Choice::new("20", "20 Hours", ""),
    Choice::new("custom", "Custom Hours", ""),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestingApproach {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "black-box")]
    BlackBox,
    #[serde(rename = "gray-box")]
    GrayBox,
    #[serde(rename = "white-box")]
    WhiteBox,
}

impl TestingApproach {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "black-box" => Some(Self::BlackBox),
            "gray-box" => Some(Self::GrayBox),
            "white-box" => Some(Self::WhiteBox),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::BlackBox => "black-box",
            Self::GrayBox => "gray-box",
            Self::WhiteBox => "white-box",
        }
    }

    pub fn label(&self) -> String {
        label_for(TESTING_APPROACHES, self.as_value())
    }

    /// Recommended engagement length in days
    pub fn suggested_duration_days(&self) -> i64 {
        match self {
            Self::Unset | Self::BlackBox => 14,
            Self::GrayBox => 21,
            Self::WhiteBox => 28,
        }
    }
}

/// Strip everything but digits and render as whole US dollars, e.g. "$12,345".
/// No digits yields an empty string.
pub fn format_currency(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let trimmed = digits.trim_start_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Whole days between two dates, `None` when either is missing or malformed
pub fn duration_days(start: &str, end: &str) -> Option<i64> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Some((end - start).num_days().abs())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementPreferences {
    pub testing_approach: TestingApproach,
    pub start_date: String,
    pub end_date: String,
    pub budget_range: String,
    /// Already formatted for display
    pub custom_budget: String,
    pub deliverables: Vec<String>,
    pub post_engagement_support: Vec<String>,
    pub retesting_timeline: String,
    pub consultation_hours: String,
}

impl EngagementPreferences {
    pub fn toggle_deliverable(&mut self, id: &str) {
        toggle_value(&mut self.deliverables, id);
    }

    pub fn toggle_support_option(&mut self, id: &str) {
        toggle_value(&mut self.post_engagement_support, id);
    }

    pub fn set_custom_budget(&mut self, input: &str) {
        self.custom_budget = format_currency(input);
    }

    pub fn duration_days(&self) -> Option<i64> {
        duration_days(&self.start_date, &self.end_date)
    }

    pub fn timeline_advice(&self) -> Option<String> {
        let duration = self.duration_days().filter(|d| *d > 0)?;
        let suggested = self.testing_approach.suggested_duration_days();
        if duration < suggested {
            Some(format!(
                "Timeline is {} days shorter than recommended. Consider extending for comprehensive testing.",
                suggested - duration
            ))
        } else {
            Some(format!("Timeline of {duration} days allows for thorough security assessment."))
        }
    }

    /// Budget as shown to people: the range label or the custom amount
    pub fn budget_display(&self) -> String {
        if self.budget_range == "custom" {
            self.custom_budget.clone()
        } else {
            label_for(BUDGET_RANGES, &self.budget_range)
        }
    }

    fn has_support(&self, id: &str) -> bool {
        self.post_engagement_support.iter().any(|s| s == id)
    }
}

impl Validate for EngagementPreferences {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, self.testing_approach != TestingApproach::Unset, "Testing Approach", "Please select a testing methodology");

        let start = self.start_date.trim();
        let end = self.end_date.trim();
        require(&mut errors, !start.is_empty(), "Start Date", "Please select an engagement start date");
        require(&mut errors, !end.is_empty(), "End Date", "Please select an engagement end date");
        require(&mut errors, start.is_empty() || parse_date(start).is_some(), "Start Date", "Please enter a valid date (YYYY-MM-DD)");
        require(&mut errors, end.is_empty() || parse_date(end).is_some(), "End Date", "Please enter a valid date (YYYY-MM-DD)");
        if let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) {
            require(&mut errors, end > start, "Timeline", "End date must be after start date");
        }

        require(&mut errors, !self.budget_range.is_empty(), "Budget Range", "Please select a budget range");
        require(
            &mut errors,
            self.budget_range != "custom" || !self.custom_budget.is_empty(),
            "Custom Budget",
            "Please enter a custom budget amount",
        );
        require(&mut errors, !self.deliverables.is_empty(), "Deliverables", "Please select at least one deliverable");
        errors
    }
}

impl FormModel for EngagementPreferences {
    fn fields(&self) -> Vec<FieldDef> {
        let mut fields = vec![
            FieldDef::new("testingApproach", "Testing Approach", FieldKind::Choice(TESTING_APPROACHES), "Testing Approach").required(),
            FieldDef::new("startDate", "Start Date", FieldKind::Date, "Timeline").required(),
            FieldDef::new("endDate", "End Date", FieldKind::Date, "Timeline").required(),
            FieldDef::new("budgetRange", "Budget Range", FieldKind::Choice(BUDGET_RANGES), "Budget").required(),
        ];
        if self.budget_range == "custom" {
            fields.push(FieldDef::new("customBudget", "Custom Budget", FieldKind::Currency, "Budget").required());
        }
        fields.push(FieldDef::new("deliverables", "Deliverables", FieldKind::MultiChoice(DELIVERABLES), "Deliverables").required());
        fields.push(FieldDef::new("postEngagementSupport", "Post-Engagement Support", FieldKind::MultiChoice(SUPPORT_OPTIONS), "Post-Engagement Support"));
        if self.has_support("retesting") {
            fields.push(FieldDef::new("retestingTimeline", "Retesting Timeline", FieldKind::Choice(RETESTING_TIMELINES), "Post-Engagement Support"));
        }
        if self.has_support("consultation") {
            fields.push(FieldDef::new("consultationHours", "Consultation Hours", FieldKind::Choice(CONSULTATION_HOURS), "Post-Engagement Support"));
        }
        fields
    }

    fn value(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "testingApproach" => FieldValue::Selected(self.testing_approach.as_value().to_string()),
            "startDate" => FieldValue::text(&self.start_date),
            "endDate" => FieldValue::text(&self.end_date),
            "budgetRange" => FieldValue::Selected(self.budget_range.clone()),
            "customBudget" => FieldValue::text(&self.custom_budget),
            "deliverables" => FieldValue::Many(self.deliverables.clone()),
            "postEngagementSupport" => FieldValue::Many(self.post_engagement_support.clone()),
            "retestingTimeline" => FieldValue::Selected(self.retesting_timeline.clone()),
            "consultationHours" => FieldValue::Selected(self.consultation_hours.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn apply(&mut self, key: &str, input: FieldInput) -> Result<(), FieldError> {
        match key {
            "testingApproach" => {
                let value = expect_pick(key, input, TESTING_APPROACHES)?;
                self.testing_approach = TestingApproach::from_value(&value).unwrap_or_default();
            }
            "startDate" => self.start_date = expect_text(key, input)?,
            "endDate" => self.end_date = expect_text(key, input)?,
            "budgetRange" => pick_into(&mut self.budget_range, key, input, BUDGET_RANGES)?,
            "customBudget" => {
                let text = expect_text(key, input)?;
                self.set_custom_budget(&text);
            }
            "deliverables" => toggle_into(&mut self.deliverables, key, input, DELIVERABLES)?,
            "postEngagementSupport" => toggle_into(&mut self.post_engagement_support, key, input, SUPPORT_OPTIONS)?,
            "retestingTimeline" => pick_into(&mut self.retesting_timeline, key, input, RETESTING_TIMELINES)?,
            "consultationHours" => pick_into(&mut self.consultation_hours, key, input, CONSULTATION_HOURS)?,
            _ => return Err(FieldError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    fn hints(&self) -> Vec<String> {
        let mut hints = vec![format!(
            "Suggested: {} days",
            self.testing_approach.suggested_duration_days()
        )];
        hints.extend(self.timeline_advice());
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> EngagementPreferences {
        EngagementPreferences {
            testing_approach: TestingApproach::GrayBox,
            start_date: "2030-03-01".to_string(),
            end_date: "2030-03-22".to_string(),
            budget_range: "10000-25000".to_string(),
            deliverables: vec!["executive-summary".to_string()],
            ..Default::default()
        }
    }

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("12345"), "$12,345");
        assert_eq!(format_currency("$1,000,000.00abc"), "$100,000,000");
        assert_eq!(format_currency("abc"), "");
        assert_eq!(format_currency(""), "");
        assert_eq!(format_currency("000"), "$0");
        assert_eq!(format_currency("999"), "$999");
    }

    #[test]
    fn test_end_date_must_follow_start_date() {
        let mut prefs = complete();
        prefs.end_date = prefs.start_date.clone();
        assert!(fields(&prefs.validate()).contains(&"Timeline"));

        prefs.end_date = "2030-02-01".to_string();
        assert_eq!(
            prefs.validate(),
            vec![ValidationError::new("Timeline", "End date must be after start date")]
        );

        prefs.end_date = "2030-03-02".to_string();
        assert!(prefs.validate().is_empty());
    }

    #[test]
    fn test_deliverable_requirement_clears_after_selection() {
        let mut prefs = complete();
        prefs.deliverables.clear();
        assert!(prefs
            .validate()
            .contains(&ValidationError::new("Deliverables", "Please select at least one deliverable")));

        prefs.toggle_deliverable("executive-summary");
        assert!(!fields(&prefs.validate()).contains(&"Deliverables"));
    }

    #[test]
    fn test_custom_budget_required_for_custom_range() {
        let mut prefs = complete();
        prefs.budget_range = "custom".to_string();
        assert_eq!(fields(&prefs.validate()), vec!["Custom Budget"]);

        prefs.set_custom_budget("abc");
        assert_eq!(prefs.custom_budget, "");
        assert_eq!(fields(&prefs.validate()), vec!["Custom Budget"]);

        prefs.set_custom_budget("25k 000");
        assert_eq!(prefs.custom_budget, "$25,000");
        assert!(prefs.validate().is_empty());
    }

    #[test]
    fn test_malformed_date_reported() {
        let mut prefs = complete();
        prefs.start_date = "03/01/2030".to_string();
        assert_eq!(
            prefs.validate(),
            vec![ValidationError::new("Start Date", "Please enter a valid date (YYYY-MM-DD)")]
        );
    }

    #[test]
    fn test_suggested_duration_and_advice() {
        assert_eq!(TestingApproach::Unset.suggested_duration_days(), 14);
        assert_eq!(TestingApproach::WhiteBox.suggested_duration_days(), 28);

        let mut prefs = complete();
        assert_eq!(prefs.duration_days(), Some(21));
        assert_eq!(
            prefs.timeline_advice().as_deref(),
            Some("Timeline of 21 days allows for thorough security assessment.")
        );

        prefs.testing_approach = TestingApproach::WhiteBox;
        assert_eq!(
            prefs.timeline_advice().as_deref(),
            Some("Timeline is 7 days shorter than recommended. Consider extending for comprehensive testing.")
        );
    }

    #[test]
    fn test_json_round_trip_keeps_every_field() {
        let record = EngagementPreferences {
            testing_approach: TestingApproach::WhiteBox,
            budget_range: "custom".to_string(),
            custom_budget: format_currency("180000"),
            deliverables: vec!["executive-summary".to_string(), "remediation-guidance".to_string()],
            post_engagement_support: vec!["retesting".to_string(), "consultation".to_string()],
            retesting_timeline: "1-month".to_string(),
            consultation_hours: "10".to_string(),
            ..complete()
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""testingApproach":"white-box""#));
        let restored: EngagementPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_approach_serializes_as_kebab_case() {
        let json = serde_json::to_value(EngagementPreferences::default()).unwrap();
        assert_eq!(json["testingApproach"], "");

        let prefs: EngagementPreferences =
            serde_json::from_str(r#"{"testingApproach":"white-box","deliverables":["presentation"]}"#).unwrap();
        assert_eq!(prefs.testing_approach, TestingApproach::WhiteBox);
        assert_eq!(prefs.deliverables, vec!["presentation"]);
    }

    #[test]
    fn test_support_followups_appear_with_selection() {
        let mut prefs = EngagementPreferences::default();
        assert!(!prefs.fields().iter().any(|f| f.key == "retestingTimeline"));
        prefs.apply("postEngagementSupport", FieldInput::Pick("retesting".into())).unwrap();
        assert!(prefs.fields().iter().any(|f| f.key == "retestingTimeline"));
    }
}
