//! Demographic feature extraction

use std::collections::HashSet;

use lead_scoring_config::{CompanySizeThresholds, ExtractionConfig};
use lead_scoring_core::{CompanySize, DemographicFeatures, EmailDomainType, LeadProfile, TitleSeniority};

use crate::keywords::KeywordSet;
use crate::ScoringError;

/// Compiled demographic classification rules
#[derive(Debug, Clone)]
pub(crate) struct DemographicRules {
    free_mail: HashSet<String>,
    edu_suffixes: Vec<Vec<String>>,
    government_suffixes: Vec<Vec<String>>,
    seniority: Vec<(TitleSeniority, KeywordSet)>,
    company_size: CompanySizeThresholds,
}

impl DemographicRules {
    pub(crate) fn new(config: &ExtractionConfig) -> Result<Self, ScoringError> {
        let keywords = &config.seniority_keywords;
        let seniority = vec![
            (
                TitleSeniority::CLevel,
                KeywordSet::new("seniority_keywords.c_level", &keywords.c_level)?,
            ),
            (
                TitleSeniority::Vp,
                KeywordSet::new("seniority_keywords.vp", &keywords.vp)?,
            ),
            (
                TitleSeniority::Director,
                KeywordSet::new("seniority_keywords.director", &keywords.director)?,
            ),
            (
                TitleSeniority::Manager,
                KeywordSet::new("seniority_keywords.manager", &keywords.manager)?,
            ),
        ];

        Ok(Self {
            free_mail: config
                .free_mail_domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .collect(),
            edu_suffixes: split_suffixes(&config.edu_suffixes),
            government_suffixes: split_suffixes(&config.government_suffixes),
            seniority,
            company_size: config.company_size.clone(),
        })
    }

    pub(crate) fn extract(&self, profile: &LeadProfile) -> DemographicFeatures {
        let email_domain = profile.email.as_deref().and_then(email_domain);

        DemographicFeatures {
            has_company: present(&profile.company),
            has_title: present(&profile.title),
            has_phone: present(&profile.phone),
            email_domain_type: email_domain
                .as_deref()
                .map_or(EmailDomainType::Unknown, |d| self.classify_domain(d)),
            title_seniority: self.classify_title(profile.title.as_deref()),
            company_size_estimate: self.classify_company_size(profile.employee_count),
            email_domain,
        }
    }

    pub(crate) fn classify_domain(&self, domain: &str) -> EmailDomainType {
        if self.free_mail.contains(domain) {
            return EmailDomainType::Free;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if self.edu_suffixes.iter().any(|s| has_suffix(&labels, s)) {
            EmailDomainType::Edu
        } else if self.government_suffixes.iter().any(|s| has_suffix(&labels, s)) {
            EmailDomainType::Government
        } else {
            EmailDomainType::Corporate
        }
    }

    pub(crate) fn classify_title(&self, title: Option<&str>) -> TitleSeniority {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return TitleSeniority::Unknown,
        };

        self.seniority
            .iter()
            .find(|(_, keywords)| keywords.is_match(title))
            .map_or(TitleSeniority::Individual, |(tier, _)| *tier)
    }

    pub(crate) fn classify_company_size(&self, employees: Option<u32>) -> CompanySize {
        let t = &self.company_size;
        match employees {
            Some(n) if n >= t.enterprise => CompanySize::Enterprise,
            Some(n) if n >= t.mid_market => CompanySize::MidMarket,
            Some(n) if n >= t.smb => CompanySize::Smb,
            Some(n) if n >= t.startup => CompanySize::Startup,
            _ => CompanySize::Unknown,
        }
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Lower-cased domain after the last `@`, if it looks like a hostname
fn email_domain(email: &str) -> Option<String> {
    let (local, domain) = email.trim().rsplit_once('@')?;
    let domain = domain.trim_end_matches('.').to_lowercase();

    let valid = !local.is_empty()
        && domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-')
        });

    valid.then_some(domain)
}

fn split_suffixes(suffixes: &[String]) -> Vec<Vec<String>> {
    suffixes
        .iter()
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .map(|s| s.split('.').map(str::to_string).collect())
        .collect()
}

/// True if the domain ends with the suffix, optionally followed by a
/// two-letter country code (".edu" matches "uni.edu.au")
fn has_suffix(labels: &[&str], suffix: &[String]) -> bool {
    let ends_with = |labels: &[&str]| {
        labels.len() > suffix.len()
            && labels[labels.len() - suffix.len()..]
                .iter()
                .zip(suffix)
                .all(|(label, part)| *label == part.as_str())
    };

    if ends_with(labels) {
        return true;
    }

    match labels.split_last() {
        Some((cc, rest)) if cc.len() == 2 && cc.chars().all(|c| c.is_ascii_alphabetic()) => {
            ends_with(rest)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> DemographicRules {
        DemographicRules::new(&ExtractionConfig::default()).unwrap()
    }

    fn domain_type(email: Option<&str>) -> EmailDomainType {
        let profile = LeadProfile {
            email: email.map(str::to_string),
            ..Default::default()
        };
        rules().extract(&profile).email_domain_type
    }

    #[test]
    fn test_email_domain_types() {
        assert_eq!(domain_type(Some("a@gmail.com")), EmailDomainType::Free);
        assert_eq!(domain_type(Some("a@mit.edu")), EmailDomainType::Edu);
        assert_eq!(domain_type(Some("a@irs.gov")), EmailDomainType::Government);
        assert_eq!(domain_type(Some("a@acme.io")), EmailDomainType::Corporate);
        assert_eq!(domain_type(None), EmailDomainType::Unknown);
        assert_eq!(domain_type(Some("")), EmailDomainType::Unknown);
    }

    #[test]
    fn test_email_domain_country_suffixes() {
        assert_eq!(domain_type(Some("a@unimelb.edu.au")), EmailDomainType::Edu);
        assert_eq!(domain_type(Some("a@ox.ac.uk")), EmailDomainType::Edu);
        assert_eq!(domain_type(Some("a@hmrc.gov.uk")), EmailDomainType::Government);
        assert_eq!(domain_type(Some("a@army.mil")), EmailDomainType::Government);
        assert_eq!(domain_type(Some("a@education.com")), EmailDomainType::Corporate);
    }

    #[test]
    fn test_email_domain_parsing() {
        assert_eq!(email_domain("Jane@Acme.COM").as_deref(), Some("acme.com"));
        assert_eq!(email_domain("odd@name@acme.io").as_deref(), Some("acme.io"));
        assert_eq!(email_domain("no-at-sign"), None);
        assert_eq!(email_domain("@acme.io"), None);
        assert_eq!(email_domain("a@localhost"), None);
        assert_eq!(email_domain("a@bad..domain"), None);
        assert_eq!(domain_type(Some("not an email")), EmailDomainType::Unknown);
    }

    #[test]
    fn test_title_seniority() {
        let rules = rules();
        assert_eq!(rules.classify_title(Some("Chief Revenue Officer")), TitleSeniority::CLevel);
        assert_eq!(rules.classify_title(Some("CEO & Founder")), TitleSeniority::CLevel);
        assert_eq!(rules.classify_title(Some("Vice President, Sales")), TitleSeniority::Vp);
        assert_eq!(rules.classify_title(Some("SVP Engineering")), TitleSeniority::Vp);
        assert_eq!(rules.classify_title(Some("Director of IT")), TitleSeniority::Director);
        assert_eq!(rules.classify_title(Some("Head of Marketing")), TitleSeniority::Director);
        assert_eq!(rules.classify_title(Some("Project Manager")), TitleSeniority::Manager);
        assert_eq!(rules.classify_title(Some("Software Engineer")), TitleSeniority::Individual);
        assert_eq!(rules.classify_title(Some("Product Owner")), TitleSeniority::Individual);
        assert_eq!(rules.classify_title(Some("Business Owner")), TitleSeniority::CLevel);
        assert_eq!(rules.classify_title(Some("Co-Owner")), TitleSeniority::CLevel);
        assert_eq!(rules.classify_title(Some("   ")), TitleSeniority::Unknown);
        assert_eq!(rules.classify_title(None), TitleSeniority::Unknown);
    }

    #[test]
    fn test_title_keywords_match_whole_words() {
        let rules = rules();
        // "cto" inside "director" must not promote to c-level
        assert_eq!(rules.classify_title(Some("Director")), TitleSeniority::Director);
        assert_eq!(rules.classify_title(Some("Leader of Nothing")), TitleSeniority::Individual);
    }

    #[test]
    fn test_company_size() {
        let rules = rules();
        assert_eq!(rules.classify_company_size(Some(5000)), CompanySize::Enterprise);
        assert_eq!(rules.classify_company_size(Some(1000)), CompanySize::Enterprise);
        assert_eq!(rules.classify_company_size(Some(250)), CompanySize::MidMarket);
        assert_eq!(rules.classify_company_size(Some(10)), CompanySize::Smb);
        assert_eq!(rules.classify_company_size(Some(3)), CompanySize::Startup);
        assert_eq!(rules.classify_company_size(Some(0)), CompanySize::Unknown);
        assert_eq!(rules.classify_company_size(None), CompanySize::Unknown);
    }

    #[test]
    fn test_presence_flags() {
        let profile = LeadProfile {
            company: Some("Acme".to_string()),
            title: Some("".to_string()),
            phone: Some("+1 555 0100".to_string()),
            email: Some("jane@acme.io".to_string()),
            ..Default::default()
        };
        let features = rules().extract(&profile);
        assert!(features.has_company);
        assert!(!features.has_title);
        assert!(features.has_phone);
        assert_eq!(features.email_domain.as_deref(), Some("acme.io"));
    }
}
