use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An application as entered on the apply form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// YYYY-MM-DD
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationValidationResult {
    pub passed: bool,
    pub errors: Vec<FieldError>,
}

fn field_error(field: &str, reason: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty())
        }
        None => false,
    }
}

/// Validates an application.
///
/// FAIL conditions:
/// - blank first name, last name or email
/// - email without a plausible `local@domain.tld` shape
/// - date of birth present but not YYYY-MM-DD
pub fn validate_application(application: &JobApplication) -> ApplicationValidationResult {
    let mut errors = Vec::new();

    if application.first_name.trim().is_empty() {
        errors.push(field_error("firstName", "First name is required"));
    }
    if application.last_name.trim().is_empty() {
        errors.push(field_error("lastName", "Last name is required"));
    }
    if application.email.trim().is_empty() {
        errors.push(field_error("email", "Email is required"));
    } else if !is_plausible_email(&application.email) {
        errors.push(field_error("email", "Email address is not valid"));
    }

    if let Some(dob) = application
        .date_of_birth
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
            errors.push(field_error("dateOfBirth", "Date of birth must be YYYY-MM-DD"));
        }
    }

    ApplicationValidationResult {
        passed: errors.is_empty(),
        errors,
    }
}
