//! # Company Module
//!
//! Định nghĩa Company và namespace prefix của domain account.
//! - FUTA: `ASIA\`
//! - FUTE: `EUR\`
//! - FUTI: `NA\`
//!
//! The table in [`Company::account_prefix`] is the only place the mapping
//! lives. Adding a company means adding a variant here.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between the namespace token and the account name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Tenant scope of every director assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Company {
    Futa,
    Fute,
    Futi,
}

impl Company {
    pub const ALL: [Company; 3] = [Company::Futa, Company::Fute, Company::Futi];

    /// Trả về code string cho DB
    pub fn as_str(&self) -> &'static str {
        match self {
            Company::Futa => "FUTA",
            Company::Fute => "FUTE",
            Company::Futi => "FUTI",
        }
    }

    /// Namespace token without the separator (`ASIA`, `EUR`, `NA`)
    pub fn namespace(&self) -> &'static str {
        match self {
            Company::Futa => "ASIA",
            Company::Fute => "EUR",
            Company::Futi => "NA",
        }
    }

    /// Required account prefix, separator included (`ASIA\`)
    pub fn account_prefix(&self) -> &'static str {
        match self {
            Company::Futa => "ASIA\\",
            Company::Fute => "EUR\\",
            Company::Futi => "NA\\",
        }
    }

    /// Rewrite `raw` so it carries exactly this company's prefix.
    ///
    /// An account already in the right namespace is returned unchanged.
    /// Otherwise one leading `ASIA\`, `EUR\` or `NA\` is stripped before the
    /// required prefix is prepended. Matching is case-sensitive.
    pub fn normalize_account(&self, raw: &str) -> String {
        let prefix = self.account_prefix();
        if raw.starts_with(prefix) {
            return raw.to_string();
        }

        let bare = match raw.split_once(NAMESPACE_SEPARATOR) {
            Some((token, rest)) if Company::ALL.iter().any(|c| c.namespace() == token) => rest,
            _ => raw,
        };

        format!("{}{}", prefix, bare)
    }
}

impl FromStr for Company {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim() {
            "FUTA" => Ok(Company::Futa),
            "FUTE" => Ok(Company::Fute),
            "FUTI" => Ok(Company::Futi),
            other => Err(CoreError::UnrecognizedCompany(other.to_string())),
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize `raw` for the company named by `company`.
///
/// Fails with [`CoreError::UnrecognizedCompany`] for codes outside the
/// enumerated set.
pub fn normalize_account(company: &str, raw: &str) -> CoreResult<String> {
    let company: Company = company.parse()?;
    Ok(company.normalize_account(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_codes() {
        for company in Company::ALL {
            assert_eq!(company.as_str().parse::<Company>().unwrap(), company);
        }
        assert_eq!(Company::Futa.to_string(), "FUTA");
    }

    #[test]
    fn test_account_prefix_matches_namespace() {
        for company in Company::ALL {
            let expected = format!("{}{}", company.namespace(), NAMESPACE_SEPARATOR);
            assert_eq!(company.account_prefix(), expected);
        }
    }

    #[test]
    fn test_unrecognized_company() {
        let err = "ACME".parse::<Company>().unwrap_err();
        assert_eq!(err, CoreError::UnrecognizedCompany("ACME".to_string()));

        // codes are case-sensitive
        assert!("futa".parse::<Company>().is_err());
        assert!(normalize_account("ACME", "jdoe").is_err());
    }

    #[test]
    fn test_normalize_keeps_matching_prefix() {
        assert_eq!(normalize_account("FUTA", "ASIA\\jdoe").unwrap(), "ASIA\\jdoe");
    }

    #[test]
    fn test_normalize_adds_missing_prefix() {
        assert_eq!(normalize_account("FUTA", "jdoe").unwrap(), "ASIA\\jdoe");
        assert_eq!(normalize_account("FUTI", "jdoe").unwrap(), "NA\\jdoe");
    }

    #[test]
    fn test_normalize_replaces_foreign_prefix() {
        assert_eq!(normalize_account("FUTA", "EUR\\jdoe").unwrap(), "ASIA\\jdoe");
        assert_eq!(normalize_account("FUTE", "NA\\jdoe").unwrap(), "EUR\\jdoe");
        assert_eq!(normalize_account("FUTI", "ASIA\\jdoe").unwrap(), "NA\\jdoe");
    }

    #[test]
    fn test_normalize_strips_only_one_prefix() {
        assert_eq!(
            normalize_account("FUTA", "EUR\\NA\\jdoe").unwrap(),
            "ASIA\\NA\\jdoe"
        );
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_eq!(normalize_account("FUTA", "eur\\jdoe").unwrap(), "ASIA\\eur\\jdoe");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = ["jdoe", "ASIA\\jdoe", "EUR\\jdoe", "NA\\jdoe", "EUR\\NA\\x", ""];
        for company in Company::ALL {
            for raw in samples {
                let once = company.normalize_account(raw);
                assert!(once.starts_with(company.account_prefix()));
                assert_eq!(company.normalize_account(&once), once);
            }
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Company::Fute).unwrap();
        assert_eq!(json, "\"FUTE\"");
        let parsed: Company = serde_json::from_str("\"FUTI\"").unwrap();
        assert_eq!(parsed, Company::Futi);
    }
}
