// ABOUTME: Asset scoping record (step 4): which asset classes are in scope, per-class detail
// sections and the free-text scope definition

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{new_item_id, split_entry, toggle_value, Choice};
use crate::wizard::form::{
    edit_string_list, expect_text, pick_into, toggle_into, FieldDef, FieldError, FieldInput,
    FieldKind, FieldValue, FormModel,
};
use crate::wizard::uploads::{check_upload, format_file_size, FileCandidate, UploadKind};
use crate::wizard::validation::{require, Validate, ValidationError};

pub const ASSET_TYPES: &[Choice] = &[
    Choice::new("web-apps", "Web Applications", "Browser-based applications and web portals"),
    Choice::new("apis", "APIs", "RESTful, GraphQL, and SOAP endpoints"),
    Choice::new("cloud", "Cloud Infrastructure", "AWS, Azure, GCP resources and services"),
    Choice::new("mobile", "Mobile Applications", "iOS and Android applications"),
    Choice::new("networks", "Networks", "Internal and external network infrastructure"),
    Choice::new("other", "Other Assets", "Custom or specialized systems"),
];

pub const WEB_TECH_STACK: &[Choice] = &[
    Choice::plain("React"),
    Choice::plain("Angular"),
    Choice::plain("Vue.js"),
    Choice::plain("Node.js"),
    Choice::plain("Django"),
    Choice::plain("Ruby on Rails"),
    Choice::plain("ASP.NET"),
    Choice::plain("PHP"),
    Choice::plain("Java Spring"),
    Choice::plain("Other"),
];

pub const WEB_AUTH_MECHANISMS: &[Choice] = &[
    Choice::plain("OAuth 2.0"),
    Choice::plain("SAML"),
    Choice::plain("JWT"),
    Choice::plain("Session-based"),
    Choice::plain("Basic Auth"),
    Choice::plain("API Keys"),
    Choice::plain("Multi-factor Authentication"),
    Choice::plain("Single Sign-On (SSO)"),
];

pub const API_AUTH_TYPES: &[Choice] = &[
    Choice::plain("OAuth 2.0"),
    Choice::plain("API Key"),
    Choice::plain("JWT Bearer Token"),
    Choice::plain("Basic Auth"),
    Choice::plain("HMAC"),
    Choice::plain("None"),
];

pub const CLOUD_PROVIDERS: &[Choice] = &[
    Choice::new("aws", "Amazon Web Services (AWS)", ""),
    Choice::new("azure", "Microsoft Azure", ""),
    Choice::new("gcp", "Google Cloud Platform (GCP)", ""),
    Choice::new("digitalocean", "DigitalOcean", ""),
    Choice::new("ibm", "IBM Cloud", ""),
    Choice::new("oracle", "Oracle Cloud", ""),
];

pub const MOBILE_PLATFORMS: &[&str] = &["iOS", "Android", "React Native", "Flutter", "Xamarin", "Ionic"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    #[serde(rename = "web-apps")]
    WebApps,
    #[serde(rename = "apis")]
    Apis,
    #[serde(rename = "cloud")]
    Cloud,
    #[serde(rename = "mobile")]
    Mobile,
    #[serde(rename = "networks")]
    Networks,
    #[serde(rename = "other")]
    Other,
}

impl AssetType {
    pub fn all() -> Vec<Self> {
        vec![Self::WebApps, Self::Apis, Self::Cloud, Self::Mobile, Self::Networks, Self::Other]
    }

    pub fn as_value(&self) -> &'static str {
        match self {
            Self::WebApps => "web-apps",
            Self::Apis => "apis",
            Self::Cloud => "cloud",
            Self::Mobile => "mobile",
            Self::Networks => "networks",
            Self::Other => "other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.as_value() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WebApps => "Web Applications",
            Self::Apis => "APIs",
            Self::Cloud => "Cloud Infrastructure",
            Self::Mobile => "Mobile Applications",
            Self::Networks => "Networks",
            Self::Other => "Other Assets",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Internal,
    External,
    Dmz,
    Wireless,
}

impl NetworkType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "internal" => Some(Self::Internal),
            "external" => Some(Self::External),
            "dmz" => Some(Self::Dmz),
            "wireless" => Some(Self::Wireless),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Internal => "Internal Network",
            Self::External => "External Network",
            Self::Dmz => "DMZ",
            Self::Wireless => "Wireless Network",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: String,
    pub role_name: String,
    pub permissions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub method: HttpMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileApp {
    pub id: String,
    pub name: String,
    pub platform: String,
    #[serde(default)]
    pub features: String,
    #[serde(skip)]
    pub binary_file: Option<FileCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRange {
    pub id: String,
    pub ip_range: String,
    pub protocols: String,
    #[serde(rename = "type", default)]
    pub network_type: NetworkType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebAppsData {
    pub urls: Vec<String>,
    pub tech_stack: Vec<String>,
    pub auth_mechanisms: Vec<String>,
    pub user_roles: Vec<UserRole>,
    #[serde(skip)]
    pub sitemap_file: Option<FileCandidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApisData {
    pub base_urls: Vec<String>,
    pub auth_type: String,
    pub key_endpoints: Vec<Endpoint>,
    #[serde(skip)]
    pub documentation_file: Option<FileCandidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudData {
    pub providers: Vec<String>,
    pub key_services: String,
    pub shared_responsibility: String,
    #[serde(skip)]
    pub architecture_diagram: Option<FileCandidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherAssetsData {
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeData {
    pub in_scope: String,
    pub out_of_scope: String,
    pub geo_restrictions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetScoping {
    pub selected_assets: Vec<AssetType>,
    pub web_apps_data: WebAppsData,
    pub apis_data: ApisData,
    pub cloud_data: CloudData,
    pub mobile_apps: Vec<MobileApp>,
    pub network_ranges: Vec<NetworkRange>,
    pub other_assets_data: OtherAssetsData,
    pub scope_data: ScopeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<String>,
}

fn rejected(message: &str) -> FieldError {
    FieldError::Rejected(message.to_string())
}

impl AssetScoping {
    pub fn is_selected(&self, asset: AssetType) -> bool {
        self.selected_assets.contains(&asset)
    }

    pub fn toggle_asset(&mut self, asset: AssetType) {
        if let Some(pos) = self.selected_assets.iter().position(|a| *a == asset) {
            self.selected_assets.remove(pos);
        } else {
            self.selected_assets.push(asset);
        }
    }

    /// Blank URLs are ignored
    pub fn add_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.web_apps_data.urls.push(url.to_string());
        }
    }

    pub fn remove_url(&mut self, index: usize) {
        if index < self.web_apps_data.urls.len() {
            self.web_apps_data.urls.remove(index);
        }
    }

    pub fn add_base_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.apis_data.base_urls.push(url.to_string());
        }
    }

    pub fn remove_base_url(&mut self, index: usize) {
        if index < self.apis_data.base_urls.len() {
            self.apis_data.base_urls.remove(index);
        }
    }

    pub fn toggle_tech(&mut self, tech: &str) {
        toggle_value(&mut self.web_apps_data.tech_stack, tech);
    }

    pub fn toggle_auth_mechanism(&mut self, mechanism: &str) {
        toggle_value(&mut self.web_apps_data.auth_mechanisms, mechanism);
    }

    pub fn toggle_cloud_provider(&mut self, provider: &str) {
        toggle_value(&mut self.cloud_data.providers, provider);
    }

    pub fn add_role(&mut self, role_name: &str, permissions: &str) -> Result<String, FieldError> {
        let (role_name, permissions) = (role_name.trim(), permissions.trim());
        if role_name.is_empty() || permissions.is_empty() {
            return Err(rejected("Role name and permissions are both required"));
        }
        let id = new_item_id();
        self.web_apps_data.user_roles.push(UserRole {
            id: id.clone(),
            role_name: role_name.to_string(),
            permissions: permissions.to_string(),
        });
        Ok(id)
    }

    pub fn remove_role(&mut self, id: &str) {
        self.web_apps_data.user_roles.retain(|r| r.id != id);
    }

    pub fn add_endpoint(&mut self, path: &str, method: HttpMethod) -> Result<String, FieldError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(rejected("Endpoint path is required"));
        }
        let id = new_item_id();
        self.apis_data.key_endpoints.push(Endpoint {
            id: id.clone(),
            path: path.to_string(),
            method,
        });
        Ok(id)
    }

    pub fn remove_endpoint(&mut self, id: &str) {
        self.apis_data.key_endpoints.retain(|e| e.id != id);
    }

    pub fn add_mobile_app(&mut self, name: &str, platform: &str, features: &str) -> Result<String, FieldError> {
        let name = name.trim();
        if name.is_empty() || platform.trim().is_empty() {
            return Err(rejected("App name and platform are both required"));
        }
        let platform = MOBILE_PLATFORMS
            .iter()
            .find(|p| p.eq_ignore_ascii_case(platform.trim()))
            .ok_or_else(|| FieldError::Rejected(format!("Unknown platform: {}", platform.trim())))?;
        let id = new_item_id();
        self.mobile_apps.push(MobileApp {
            id: id.clone(),
            name: name.to_string(),
            platform: (*platform).to_string(),
            features: features.trim().to_string(),
            binary_file: None,
        });
        Ok(id)
    }

    pub fn remove_mobile_app(&mut self, id: &str) {
        self.mobile_apps.retain(|a| a.id != id);
    }

    pub fn add_network_range(
        &mut self,
        ip_range: &str,
        protocols: &str,
        network_type: NetworkType,
    ) -> Result<String, FieldError> {
        let (ip_range, protocols) = (ip_range.trim(), protocols.trim());
        if ip_range.is_empty() || protocols.is_empty() {
            return Err(rejected("IP range and protocols are both required"));
        }
        let id = new_item_id();
        self.network_ranges.push(NetworkRange {
            id: id.clone(),
            ip_range: ip_range.to_string(),
            protocols: protocols.to_string(),
            network_type,
        });
        Ok(id)
    }

    pub fn remove_network_range(&mut self, id: &str) {
        self.network_ranges.retain(|r| r.id != id);
    }

    /// Store an attachment in one of the record's upload slots
    pub fn attach(&mut self, kind: UploadKind, candidate: FileCandidate, max_bytes: u64) -> Result<(), FieldError> {
        check_upload(kind, &candidate, max_bytes)?;
        match kind {
            UploadKind::Sitemap => self.web_apps_data.sitemap_file = Some(candidate),
            UploadKind::ApiSpec => self.apis_data.documentation_file = Some(candidate),
            UploadKind::ArchitectureDiagram => self.cloud_data.architecture_diagram = Some(candidate),
            UploadKind::MobileBinary => {
                let app = self
                    .mobile_apps
                    .last_mut()
                    .ok_or_else(|| rejected("Add a mobile application before attaching a binary"))?;
                app.binary_file = Some(candidate);
            }
            UploadKind::Documentation => return Err(rejected("Documentation belongs to the environment step")),
        }
        Ok(())
    }

    pub fn detach(&mut self, kind: UploadKind) {
        match kind {
            UploadKind::Sitemap => self.web_apps_data.sitemap_file = None,
            UploadKind::ApiSpec => self.apis_data.documentation_file = None,
            UploadKind::ArchitectureDiagram => self.cloud_data.architecture_diagram = None,
            UploadKind::MobileBinary => {
                if let Some(app) = self.mobile_apps.last_mut() {
                    app.binary_file = None;
                }
            }
            UploadKind::Documentation => {}
        }
    }

    pub fn touch(&mut self) {
        self.last_saved = Some(Utc::now().to_rfc3339());
    }

    fn attachment(&self, kind: UploadKind) -> Option<&FileCandidate> {
        match kind {
            UploadKind::Sitemap => self.web_apps_data.sitemap_file.as_ref(),
            UploadKind::ApiSpec => self.apis_data.documentation_file.as_ref(),
            UploadKind::ArchitectureDiagram => self.cloud_data.architecture_diagram.as_ref(),
            UploadKind::MobileBinary => self.mobile_apps.last().and_then(|a| a.binary_file.as_ref()),
            UploadKind::Documentation => None,
        }
    }

    /// Parse `METHOD /path` or a bare `/path` (GET)
    fn parse_endpoint(entry: &str) -> Result<(String, HttpMethod), FieldError> {
        let entry = entry.trim();
        match entry.split_once(char::is_whitespace) {
            Some((head, rest)) if HttpMethod::parse(head).is_some() => {
                let method = HttpMethod::parse(head).unwrap_or_default();
                Ok((rest.trim().to_string(), method))
            }
            None if HttpMethod::parse(entry).is_some() => Err(rejected("Endpoint path is required")),
            _ => Ok((entry.to_string(), HttpMethod::Get)),
        }
    }
}

impl Validate for AssetScoping {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, !self.selected_assets.is_empty(), "Asset Selection", "Please select at least one asset type");
        if self.is_selected(AssetType::WebApps) {
            require(&mut errors, !self.web_apps_data.urls.is_empty(), "Web Applications", "Please add at least one URL for web applications");
        }
        if self.is_selected(AssetType::Apis) {
            require(&mut errors, !self.apis_data.base_urls.is_empty(), "APIs", "Please add at least one base URL for APIs");
        }
        if self.is_selected(AssetType::Cloud) {
            require(&mut errors, !self.cloud_data.providers.is_empty(), "Cloud Infrastructure", "Please select at least one cloud provider");
        }
        if self.is_selected(AssetType::Mobile) {
            require(&mut errors, !self.mobile_apps.is_empty(), "Mobile Applications", "Please add at least one mobile application");
        }
        if self.is_selected(AssetType::Networks) {
            require(&mut errors, !self.network_ranges.is_empty(), "Networks", "Please add at least one network range");
        }
        if self.is_selected(AssetType::Other) {
            require(&mut errors, !self.other_assets_data.description.trim().is_empty(), "Other Assets", "Please provide a description for other assets");
        }
        require(&mut errors, !self.scope_data.in_scope.trim().is_empty(), "Scope Definition", "Please define in-scope assets and activities");
        errors
    }
}

impl FormModel for AssetScoping {
    fn fields(&self) -> Vec<FieldDef> {
        let mut fields = vec![
            FieldDef::new("selectedAssets", "Asset Types", FieldKind::MultiChoice(ASSET_TYPES), "Asset Selection").required(),
        ];

        if self.is_selected(AssetType::WebApps) {
            let section = "Web Applications";
            fields.extend([
                FieldDef::new("webApps.urls", "Application URLs", FieldKind::Entries { hint: "https://app.example.com" }, section).required(),
                FieldDef::new("webApps.techStack", "Technology Stack", FieldKind::MultiChoice(WEB_TECH_STACK), section),
                FieldDef::new("webApps.authMechanisms", "Authentication Mechanisms", FieldKind::MultiChoice(WEB_AUTH_MECHANISMS), section),
                FieldDef::new("webApps.userRoles", "User Roles", FieldKind::Entries { hint: "Role name | permissions" }, section),
                FieldDef::new("webApps.sitemapFile", "Sitemap", FieldKind::Attachment(UploadKind::Sitemap), section),
            ]);
        }
        if self.is_selected(AssetType::Apis) {
            let section = "APIs";
            fields.extend([
                FieldDef::new("apis.baseUrls", "Base URLs", FieldKind::Entries { hint: "https://api.example.com/v1" }, section).required(),
                FieldDef::new("apis.authType", "Authentication Type", FieldKind::Choice(API_AUTH_TYPES), section),
                FieldDef::new("apis.keyEndpoints", "Key Endpoints", FieldKind::Entries { hint: "POST /users (method defaults to GET)" }, section),
                FieldDef::new("apis.documentationFile", "API Documentation", FieldKind::Attachment(UploadKind::ApiSpec), section),
            ]);
        }
        if self.is_selected(AssetType::Cloud) {
            let section = "Cloud Infrastructure";
            fields.extend([
                FieldDef::new("cloud.providers", "Cloud Providers", FieldKind::MultiChoice(CLOUD_PROVIDERS), section).required(),
                FieldDef::new("cloud.keyServices", "Key Services & Resources", FieldKind::Multiline, section),
                FieldDef::new("cloud.sharedResponsibility", "Shared Responsibility Model", FieldKind::Multiline, section),
                FieldDef::new("cloud.architectureDiagram", "Architecture Diagram", FieldKind::Attachment(UploadKind::ArchitectureDiagram), section),
            ]);
        }
        if self.is_selected(AssetType::Mobile) {
            let section = "Mobile Applications";
            fields.extend([
                FieldDef::new("mobileApps", "Applications", FieldKind::Entries { hint: "Name | iOS/Android/React Native/Flutter/Xamarin/Ionic | features" }, section).required(),
                FieldDef::new("mobileApps.binaryFile", "Binary (latest app)", FieldKind::Attachment(UploadKind::MobileBinary), section),
            ]);
        }
        if self.is_selected(AssetType::Networks) {
            fields.push(
                FieldDef::new("networkRanges", "Network Ranges", FieldKind::Entries { hint: "10.0.0.0/24 | protocols | internal/external/dmz/wireless" }, "Networks").required(),
            );
        }
        if self.is_selected(AssetType::Other) {
            fields.push(FieldDef::new("otherAssets.description", "Asset Description", FieldKind::Multiline, "Other Assets").required());
        }

        fields.extend([
            FieldDef::new("scope.inScope", "In-Scope Assets & Activities", FieldKind::Multiline, "Scope Definition").required(),
            FieldDef::new("scope.outOfScope", "Out-of-Scope Assets & Activities", FieldKind::Multiline, "Scope Definition"),
            FieldDef::new("scope.geoRestrictions", "Geographic & Regulatory Restrictions", FieldKind::Multiline, "Scope Definition"),
        ]);
        fields
    }

    fn value(&self, key: &str) -> Option<FieldValue> {
        let attachment = |kind| {
            FieldValue::Entries(
                self.attachment(kind)
                    .map(|f| vec![format!("{} ({})", f.name, format_file_size(f.size))])
                    .unwrap_or_default(),
            )
        };

        let value = match key {
            "selectedAssets" => FieldValue::Many(self.selected_assets.iter().map(|a| a.as_value().to_string()).collect()),
            "webApps.urls" => FieldValue::Entries(self.web_apps_data.urls.clone()),
            "webApps.techStack" => FieldValue::Many(self.web_apps_data.tech_stack.clone()),
            "webApps.authMechanisms" => FieldValue::Many(self.web_apps_data.auth_mechanisms.clone()),
            "webApps.userRoles" => FieldValue::Entries(
                self.web_apps_data
                    .user_roles
                    .iter()
                    .map(|r| format!("{}: {}", r.role_name, r.permissions))
                    .collect(),
            ),
            "webApps.sitemapFile" => attachment(UploadKind::Sitemap),
            "apis.baseUrls" => FieldValue::Entries(self.apis_data.base_urls.clone()),
            "apis.authType" => FieldValue::Selected(self.apis_data.auth_type.clone()),
            "apis.keyEndpoints" => FieldValue::Entries(
                self.apis_data
                    .key_endpoints
                    .iter()
                    .map(|e| format!("{} {}", e.method.as_str(), e.path))
                    .collect(),
            ),
            "apis.documentationFile" => attachment(UploadKind::ApiSpec),
            "cloud.providers" => FieldValue::Many(self.cloud_data.providers.clone()),
            "cloud.keyServices" => FieldValue::text(&self.cloud_data.key_services),
            "cloud.sharedResponsibility" => FieldValue::text(&self.cloud_data.shared_responsibility),
            "cloud.architectureDiagram" => attachment(UploadKind::ArchitectureDiagram),
            "mobileApps" => FieldValue::Entries(
                self.mobile_apps
                    .iter()
                    .map(|a| {
                        let binary = a
                            .binary_file
                            .as_ref()
                            .map(|f| format!(" [{}]", f.name))
                            .unwrap_or_default();
                        if a.features.is_empty() {
                            format!("{} ({}){binary}", a.name, a.platform)
                        } else {
                            format!("{} ({}) {}{binary}", a.name, a.platform, a.features)
                        }
                    })
                    .collect(),
            ),
            "mobileApps.binaryFile" => attachment(UploadKind::MobileBinary),
            "networkRanges" => FieldValue::Entries(
                self.network_ranges
                    .iter()
                    .map(|r| format!("{} [{}] {}", r.ip_range, r.network_type.label(), r.protocols))
                    .collect(),
            ),
            "otherAssets.description" => FieldValue::text(&self.other_assets_data.description),
            "scope.inScope" => FieldValue::text(&self.scope_data.in_scope),
            "scope.outOfScope" => FieldValue::text(&self.scope_data.out_of_scope),
            "scope.geoRestrictions" => FieldValue::text(&self.scope_data.geo_restrictions),
            _ => return None,
        };
        Some(value)
    }

    fn apply(&mut self, key: &str, input: FieldInput) -> Result<(), FieldError> {
        let slot = match key {
            "webApps.sitemapFile" => Some(UploadKind::Sitemap),
            "apis.documentationFile" => Some(UploadKind::ApiSpec),
            "cloud.architectureDiagram" => Some(UploadKind::ArchitectureDiagram),
            "mobileApps.binaryFile" => Some(UploadKind::MobileBinary),
            _ => None,
        };
        if let Some(kind) = slot {
            return match input {
                FieldInput::Attach { file, max_bytes } => self.attach(kind, file, max_bytes),
                FieldInput::Detach(_) | FieldInput::Remove(_) => {
                    self.detach(kind);
                    Ok(())
                }
                _ => Err(FieldError::WrongInput(key.to_string())),
            };
        }

        match key {
            "selectedAssets" => match input {
                FieldInput::Pick(value) => {
                    let asset = AssetType::from_value(&value)
                        .ok_or_else(|| FieldError::Rejected(format!("Unknown option: {value}")))?;
                    self.toggle_asset(asset);
                }
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "webApps.urls" => edit_string_list(&mut self.web_apps_data.urls, key, input)?,
            "webApps.techStack" => toggle_into(&mut self.web_apps_data.tech_stack, key, input, WEB_TECH_STACK)?,
            "webApps.authMechanisms" => toggle_into(&mut self.web_apps_data.auth_mechanisms, key, input, WEB_AUTH_MECHANISMS)?,
            "webApps.userRoles" => match input {
                FieldInput::Add(entry) => {
                    let parts = split_entry(&entry);
                    let name = parts.first().map_or("", String::as_str);
                    let permissions = parts.get(1).map_or("", String::as_str);
                    self.add_role(name, permissions)?;
                }
                FieldInput::Remove(index) => {
                    let id = self.web_apps_data.user_roles.get(index).map(|r| r.id.clone());
                    if let Some(id) = id {
                        self.remove_role(&id);
                    }
                }
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "apis.baseUrls" => edit_string_list(&mut self.apis_data.base_urls, key, input)?,
            "apis.authType" => pick_into(&mut self.apis_data.auth_type, key, input, API_AUTH_TYPES)?,
            "apis.keyEndpoints" => match input {
                FieldInput::Add(entry) => {
                    let (path, method) = Self::parse_endpoint(&entry)?;
                    self.add_endpoint(&path, method)?;
                }
                FieldInput::Remove(index) => {
                    let id = self.apis_data.key_endpoints.get(index).map(|e| e.id.clone());
                    if let Some(id) = id {
                        self.remove_endpoint(&id);
                    }
                }
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "cloud.providers" => toggle_into(&mut self.cloud_data.providers, key, input, CLOUD_PROVIDERS)?,
            "cloud.keyServices" => self.cloud_data.key_services = expect_text(key, input)?,
            "cloud.sharedResponsibility" => self.cloud_data.shared_responsibility = expect_text(key, input)?,
            "mobileApps" => match input {
                FieldInput::Add(entry) => {
                    let parts = split_entry(&entry);
                    let get = |i: usize| parts.get(i).map_or("", String::as_str);
                    self.add_mobile_app(get(0), get(1), get(2))?;
                }
                FieldInput::Remove(index) => {
                    let id = self.mobile_apps.get(index).map(|a| a.id.clone());
                    if let Some(id) = id {
                        self.remove_mobile_app(&id);
                    }
                }
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "networkRanges" => match input {
                FieldInput::Add(entry) => {
                    let parts = split_entry(&entry);
                    let get = |i: usize| parts.get(i).map_or("", String::as_str);
                    let network_type = match get(2) {
                        "" => NetworkType::default(),
                        raw => NetworkType::parse(raw)
                            .ok_or_else(|| FieldError::Rejected(format!("Unknown network type: {raw}")))?,
                    };
                    self.add_network_range(get(0), get(1), network_type)?;
                }
                FieldInput::Remove(index) => {
                    let id = self.network_ranges.get(index).map(|r| r.id.clone());
                    if let Some(id) = id {
                        self.remove_network_range(&id);
                    }
                }
                _ => return Err(FieldError::WrongInput(key.to_string())),
            },
            "otherAssets.description" => self.other_assets_data.description = expect_text(key, input)?,
            "scope.inScope" => self.scope_data.in_scope = expect_text(key, input)?,
            "scope.outOfScope" => self.scope_data.out_of_scope = expect_text(key, input)?,
            "scope.geoRestrictions" => self.scope_data.geo_restrictions = expect_text(key, input)?,
            _ => return Err(FieldError::UnknownField(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::uploads::DEFAULT_MAX_UPLOAD_BYTES;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scope_definition_always_required() {
        let errors = AssetScoping::default().validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Asset Selection", "Scope Definition"]);
    }

    #[test]
    fn test_selected_assets_require_details() {
        let mut assets = AssetScoping::default();
        for asset in AssetType::all() {
            assets.toggle_asset(asset);
        }
        assets.scope_data.in_scope = "Production web tier".into();

        let fields: Vec<String> = assets.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "Web Applications",
                "APIs",
                "Cloud Infrastructure",
                "Mobile Applications",
                "Networks",
                "Other Assets",
            ]
        );

        assets.add_url("https://app.example.com");
        assets.add_base_url("https://api.example.com");
        assets.toggle_cloud_provider("aws");
        assets.add_mobile_app("Field App", "ios", "").unwrap();
        assets.add_network_range("10.0.0.0/24", "SSH, HTTPS", NetworkType::Dmz).unwrap();
        assets.other_assets_data.description = "Badge readers".into();
        assert!(assets.validate().is_empty());
        assert_eq!(assets.mobile_apps[0].platform, "iOS");
    }

    #[test]
    fn test_deselected_assets_are_not_validated() {
        let mut assets = AssetScoping::default();
        assets.toggle_asset(AssetType::Apis);
        assets.toggle_asset(AssetType::Apis);
        assets.toggle_asset(AssetType::Other);
        assets.other_assets_data.description = "Kiosk".into();
        assets.scope_data.in_scope = "Kiosk firmware".into();
        assert!(assets.validate().is_empty());
    }

    #[test]
    fn test_url_entries_trim_and_ignore_blank() {
        let mut assets = AssetScoping::default();
        assets.add_url("   ");
        assets.add_url("  https://portal.example.com  ");
        assert_eq!(assets.web_apps_data.urls, vec!["https://portal.example.com"]);
        assets.remove_url(5);
        assets.remove_url(0);
        assert!(assets.web_apps_data.urls.is_empty());
    }

    #[test]
    fn test_role_requires_both_fields() {
        let mut assets = AssetScoping::default();
        assert!(assets.add_role("Admin", "").is_err());
        let id = assets.add_role("Admin", "Full access").unwrap();
        assets.add_role("Viewer", "Read only").unwrap();
        assets.remove_role(&id);
        assert_eq!(assets.web_apps_data.user_roles.len(), 1);
        assert_eq!(assets.web_apps_data.user_roles[0].role_name, "Viewer");
    }

    #[test]
    fn test_endpoint_entry_parsing() {
        let mut assets = AssetScoping::default();
        assets.apply("apis.keyEndpoints", FieldInput::Add("post /users".into())).unwrap();
        assets.apply("apis.keyEndpoints", FieldInput::Add("/health".into())).unwrap();
        assert!(assets.apply("apis.keyEndpoints", FieldInput::Add("DELETE".into())).is_err());

        let endpoints: Vec<(HttpMethod, &str)> = assets
            .apis_data
            .key_endpoints
            .iter()
            .map(|e| (e.method, e.path.as_str()))
            .collect();
        assert_eq!(endpoints, vec![(HttpMethod::Post, "/users"), (HttpMethod::Get, "/health")]);
    }

    #[test]
    fn test_network_range_defaults_to_internal() {
        let mut assets = AssetScoping::default();
        assets.apply("networkRanges", FieldInput::Add("192.168.0.0/16 | SMB".into())).unwrap();
        assert_eq!(assets.network_ranges[0].network_type, NetworkType::Internal);
        assert!(assets.apply("networkRanges", FieldInput::Add("10.0.0.1 |".into())).is_err());
    }

    #[test]
    fn test_rapid_additions_get_distinct_ids() {
        let mut assets = AssetScoping::default();
        let ids: Vec<String> = (0..50)
            .map(|i| assets.add_network_range(&format!("10.0.{i}.0/24"), "TCP", NetworkType::External).unwrap())
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_attachments_are_not_persisted() {
        let mut assets = AssetScoping::default();
        assets.toggle_asset(AssetType::WebApps);
        assets.add_url("https://app.example.com");
        assets
            .attach(UploadKind::Sitemap, FileCandidate::new("sitemap.xml", 512), DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap();
        assets.touch();

        let json = serde_json::to_string(&assets).unwrap();
        assert!(!json.contains("sitemap.xml"));
        assert!(json.contains("\"selectedAssets\":[\"web-apps\"]"));

        let restored: AssetScoping = serde_json::from_str(&json).unwrap();
        let mut expected = assets.clone();
        expected.web_apps_data.sitemap_file = None;
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_binary_attaches_to_latest_app() {
        let mut assets = AssetScoping::default();
        let candidate = FileCandidate::new("app.apk", 2048);
        assert!(assets.attach(UploadKind::MobileBinary, candidate.clone(), DEFAULT_MAX_UPLOAD_BYTES).is_err());

        assets.add_mobile_app("Shop", "Android", "payments").unwrap();
        assets.attach(UploadKind::MobileBinary, candidate, DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(
            assets.value("mobileApps"),
            Some(FieldValue::Entries(vec!["Shop (Android) payments [app.apk]".to_string()]))
        );
    }

    #[test]
    fn test_wrong_attachment_type_is_dropped() {
        let mut assets = AssetScoping::default();
        let result = assets.apply("cloud.architectureDiagram", FieldInput::Attach { file: FileCandidate::new("notes.txt", 1), max_bytes: DEFAULT_MAX_UPLOAD_BYTES });
        assert!(matches!(result, Err(FieldError::Upload(_))));
        assert!(assets.cloud_data.architecture_diagram.is_none());
    }
}
