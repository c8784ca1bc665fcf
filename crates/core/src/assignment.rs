//! Director assignment input and result types.

use crate::company::Company;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Role value stored on every association row written by the registry.
pub const DIRECTOR_ROLE: &str = "director";

/// Internal identifier of a business unit ("group id").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub i64);

impl GroupId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four fields of an assignment request.
///
/// Field names follow the request payload (`businessUnit`, `clazz`,
/// `ntAccount`). Missing and `null` fields deserialize as empty strings and
/// are rejected by [`AssignmentRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub business_unit: String,
    #[serde(rename = "clazz", deserialize_with = "null_as_empty")]
    pub class: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub nt_account: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AssignmentRequest {
    pub fn new(company: &str, business_unit: &str, class: &str, nt_account: &str) -> Self {
        Self {
            company: company.to_string(),
            business_unit: business_unit.to_string(),
            class: class.to_string(),
            nt_account: nt_account.to_string(),
        }
    }

    /// Check required fields, then resolve the company code.
    ///
    /// Blank fields win over an unknown company so that a request with
    /// nothing in it reports what is missing.
    pub fn validate(&self) -> CoreResult<Company> {
        let fields = [
            ("company", &self.company),
            ("businessUnit", &self.business_unit),
            ("clazz", &self.class),
            ("ntAccount", &self.nt_account),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CoreError::missing_field(name));
            }
        }
        self.company.parse()
    }
}

/// Result domain of a director assignment.
///
/// Rejections are ordinary values here, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// Row inserted, or an identical row was already present (`rows_inserted == 0`)
    Assigned { rows_inserted: u64 },
    BusinessUnitNotFound,
    ClassNotFound,
    /// The class already has a director under a different business unit
    ClassBusinessUnitConflict,
    /// The (company, class, business unit) triple already has a director
    DuplicateDirector,
}

impl AssignmentOutcome {
    pub fn rows_inserted(&self) -> u64 {
        match self {
            AssignmentOutcome::Assigned { rows_inserted } => *rows_inserted,
            _ => 0,
        }
    }

    /// Caller-facing message
    pub fn message(&self) -> &'static str {
        match self {
            AssignmentOutcome::Assigned { .. } => "Director assigned.",
            AssignmentOutcome::BusinessUnitNotFound => "Business Unit not found.",
            AssignmentOutcome::ClassNotFound => "Class not found.",
            AssignmentOutcome::ClassBusinessUnitConflict => {
                "Class already associated to a different Business Unit."
            }
            AssignmentOutcome::DuplicateDirector => "A director already exists for this Class.",
        }
    }
}

impl fmt::Display for AssignmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentOutcome::Assigned { rows_inserted } => {
                write!(f, "assigned ({} row(s) inserted)", rows_inserted)
            }
            other => write!(f, "{}", other.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let req = AssignmentRequest::new("FUTE", "Sales", "C100", "jdoe");
        assert_eq!(req.validate().unwrap(), Company::Fute);
    }

    #[test]
    fn test_validate_blank_field() {
        let req = AssignmentRequest::new("FUTA", "  ", "C100", "jdoe");
        assert_eq!(
            req.validate().unwrap_err(),
            CoreError::missing_field("businessUnit")
        );
    }

    #[test]
    fn test_validate_reports_missing_before_company() {
        let req = AssignmentRequest::new("ACME", "Sales", "", "jdoe");
        assert_eq!(req.validate().unwrap_err(), CoreError::missing_field("clazz"));

        let req = AssignmentRequest::new("ACME", "Sales", "C1", "jdoe");
        assert!(req.validate().unwrap_err().is_unrecognized_company());
    }

    #[test]
    fn test_request_payload_names() {
        let req: AssignmentRequest = serde_json::from_str(
            r#"{"company":"FUTA","businessUnit":"Sales","clazz":"C1","ntAccount":"jdoe"}"#,
        )
        .unwrap();
        assert_eq!(req, AssignmentRequest::new("FUTA", "Sales", "C1", "jdoe"));

        let partial: AssignmentRequest = serde_json::from_str(r#"{"company":"FUTA"}"#).unwrap();
        assert!(partial.class.is_empty());
    }

    #[test]
    fn test_null_field_is_missing_field() {
        let req: AssignmentRequest = serde_json::from_str(
            r#"{"company":"FUTA","businessUnit":null,"clazz":"C1","ntAccount":"jdoe"}"#,
        )
        .unwrap();
        assert!(req.business_unit.is_empty());
        assert_eq!(
            req.validate().unwrap_err(),
            CoreError::missing_field("businessUnit")
        );
    }

    #[test]
    fn test_outcome_rows() {
        assert_eq!(AssignmentOutcome::Assigned { rows_inserted: 1 }.rows_inserted(), 1);
        assert_eq!(AssignmentOutcome::DuplicateDirector.rows_inserted(), 0);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            AssignmentOutcome::Assigned { rows_inserted: 0 }.to_string(),
            "assigned (0 row(s) inserted)"
        );
        assert_eq!(AssignmentOutcome::ClassNotFound.to_string(), "Class not found.");
    }
}
