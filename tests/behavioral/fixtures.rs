// ABOUTME: Shared test fixtures for behavioral tests
//
// Provides:
// - TestDrafts: temporary draft directory with a config pointing at it
// - complete_*(): records that pass validation for each form step

use scopewise::app::AppState;
use scopewise::config::AppConfig;
use scopewise::models::assets::{OtherAssetsData, ScopeData};
use scopewise::models::environment::Sdlc;
use scopewise::models::{
    AssetScoping, AssetType, BusinessContext, EngagementPreferences, EnvironmentOverview, SensitiveData,
    TestingApproach,
};
use scopewise::wizard::{write_record, FileDraftStore};
use tempfile::TempDir;

/// Temporary draft directory that is removed on drop
pub struct TestDrafts {
    pub dir: TempDir,
    pub config: AppConfig,
}

impl TestDrafts {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.drafts_dir = dir.path().join("drafts");
        config.export.output_dir = Some(dir.path().join("exports"));
        config.timing.simulated_work_ms = 0;
        Self { dir, config }
    }

    pub fn store(&self) -> FileDraftStore {
        FileDraftStore::new(self.config.storage.drafts_dir.clone())
    }

    /// Fresh app state reading the same drafts, as after a restart
    pub fn state(&self) -> AppState {
        AppState::from_config(self.config.clone())
    }

    /// Store valid drafts for all four form steps
    pub fn seed_complete(&self) {
        let mut store = self.store();
        write_record(&mut store, &complete_business()).unwrap();
        write_record(&mut store, &complete_engagement()).unwrap();
        write_record(&mut store, &complete_environment()).unwrap();
        write_record(&mut store, &complete_assets()).unwrap();
    }
}

pub fn complete_business() -> BusinessContext {
    BusinessContext {
        company_name: "Acme Corp".to_string(),
        industry: "Technology".to_string(),
        organization_size: "Medium (51-250 employees)".to_string(),
        business_functions: vec!["IT Operations".to_string()],
        sensitive_data_types: vec![SensitiveData {
            name: "Personal Identifiable Information (PII)".to_string(),
            criticality: 4,
        }],
        compliance_standards: vec!["GDPR".to_string()],
        has_security_incidents: false,
        incident_details: String::new(),
        security_maturity_rating: 3,
        primary_objectives: vec!["Improve security posture".to_string()],
    }
}

pub fn complete_engagement() -> EngagementPreferences {
    EngagementPreferences {
        testing_approach: TestingApproach::GrayBox,
        start_date: "2030-03-01".to_string(),
        end_date: "2030-03-22".to_string(),
        budget_range: "10000-25000".to_string(),
        deliverables: vec!["executive-summary".to_string()],
        ..Default::default()
    }
}

pub fn complete_environment() -> EnvironmentOverview {
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

pub fn complete_assets() -> AssetScoping {
    AssetScoping {
        selected_assets: vec![AssetType::Other],
        other_assets_data: OtherAssetsData {
            description: "Badge readers in the lobby".to_string(),
        },
        scope_data: ScopeData {
            in_scope: "Production web tier".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}
