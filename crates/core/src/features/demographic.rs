//! Demographic features derived from the lead profile

use serde::{Deserialize, Serialize};

use super::{Categorical, FeatureCategory, FeatureGroup, FeatureValue, NamedValue};

/// Classification of the lead's email domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailDomainType {
    Corporate,
    Free,
    Edu,
    Government,
    #[default]
    Unknown,
}

impl Categorical for EmailDomainType {
    const LABELS: &'static [&'static str] = &["corporate", "free", "edu", "government", "unknown"];

    fn label(&self) -> &'static str {
        match self {
            EmailDomainType::Corporate => "corporate",
            EmailDomainType::Free => "free",
            EmailDomainType::Edu => "edu",
            EmailDomainType::Government => "government",
            EmailDomainType::Unknown => "unknown",
        }
    }
}

/// Seniority tier inferred from the job title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSeniority {
    CLevel,
    Vp,
    Director,
    Manager,
    Individual,
    #[default]
    Unknown,
}

impl Categorical for TitleSeniority {
    const LABELS: &'static [&'static str] =
        &["c_level", "vp", "director", "manager", "individual", "unknown"];

    fn label(&self) -> &'static str {
        match self {
            TitleSeniority::CLevel => "c_level",
            TitleSeniority::Vp => "vp",
            TitleSeniority::Director => "director",
            TitleSeniority::Manager => "manager",
            TitleSeniority::Individual => "individual",
            TitleSeniority::Unknown => "unknown",
        }
    }
}

/// Company size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Enterprise,
    MidMarket,
    Smb,
    Startup,
    #[default]
    Unknown,
}

impl Categorical for CompanySize {
    const LABELS: &'static [&'static str] = &["enterprise", "mid_market", "smb", "startup", "unknown"];

    fn label(&self) -> &'static str {
        match self {
            CompanySize::Enterprise => "enterprise",
            CompanySize::MidMarket => "mid_market",
            CompanySize::Smb => "smb",
            CompanySize::Startup => "startup",
            CompanySize::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemographicFeatures {
    pub has_company: bool,
    pub has_title: bool,
    pub has_phone: bool,
    pub email_domain_type: EmailDomainType,
    pub title_seniority: TitleSeniority,
    pub company_size_estimate: CompanySize,
    /// Lower-cased domain part of the email, if it could be parsed
    pub email_domain: Option<String>,
}

impl FeatureGroup for DemographicFeatures {
    const CATEGORY: FeatureCategory = FeatureCategory::Demographic;

    fn values(&self) -> Vec<NamedValue> {
        vec![
            ("has_company", FeatureValue::Flag(self.has_company)),
            ("has_title", FeatureValue::Flag(self.has_title)),
            ("has_phone", FeatureValue::Flag(self.has_phone)),
            ("email_domain_type", FeatureValue::category(self.email_domain_type)),
            ("title_seniority", FeatureValue::category(self.title_seniority)),
            ("company_size_estimate", FeatureValue::category(self.company_size_estimate)),
            ("email_domain", FeatureValue::Flag(self.email_domain.is_some())),
        ]
    }
}
