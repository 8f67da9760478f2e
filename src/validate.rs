//! Form completeness checks used before any export is attempted.

use serde::Serialize;

use crate::error::{NoticeError, Result};
use crate::types::{FormData, FormField};

/// Outcome of checking a form for completeness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,
    pub missing_fields: Vec<FormField>,
}

pub fn validate_form_data(form: &FormData) -> Validation {
    let missing_fields = form.missing_fields();
    Validation {
        is_valid: missing_fields.is_empty(),
        missing_fields,
    }
}

/// Fail with [`NoticeError::IncompleteInput`] unless every required field is set.
pub fn ensure_complete(form: &FormData) -> Result<()> {
    let validation = validate_form_data(form);
    if validation.is_valid {
        Ok(())
    } else {
        Err(NoticeError::IncompleteInput {
            missing: validation.missing_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_form_is_missing_everything() {
        let validation = validate_form_data(&FormData::default());
        assert_eq!(
            validation,
            Validation {
                is_valid: false,
                missing_fields: FormField::REQUIRED.to_vec(),
            }
        );
    }

    #[test]
    fn complete_form_passes() {
        let form = FormData {
            place: "Tirur".into(),
            guardian_name: "Ahmed".into(),
            deceased_name: "Fathima".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..FormData::default()
        };
        assert!(ensure_complete(&form).is_ok());
        assert!(validate_form_data(&form).missing_fields.is_empty());
    }

    #[test]
    fn ensure_complete_reports_missing_fields() {
        let form = FormData {
            place: "Tirur".into(),
            ..FormData::default()
        };
        match ensure_complete(&form) {
            Err(NoticeError::IncompleteInput { missing }) => assert_eq!(
                missing,
                vec![FormField::GuardianName, FormField::DeceasedName, FormField::Date]
            ),
            other => panic!("expected IncompleteInput, got {other:?}"),
        }
    }
}
