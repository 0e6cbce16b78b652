use crate::domain::submission::{FormFields, Variant};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[allow(clippy::unwrap_used)]
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A single user-correctable problem with a submitted form.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("A valid email is required.")]
    InvalidEmail,
    #[error("Message is required.")]
    MessageRequired,
    #[error("Company name is required.")]
    CompanyRequired,
}

/// Syntactic email check: `local@domain.tld`, no whitespace, a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

/// Checks `fields` against the rules of `variant`.
///
/// Errors come back in a fixed order (name, email, then message or company)
/// and an empty list means the form is acceptable.
#[must_use]
pub fn validate(fields: &FormFields, variant: Variant) -> Vec<ValidationError> {
    let keys = variant.field_keys();
    let mut errors = Vec::new();

    if fields.trimmed(keys.name).is_none() {
        errors.push(ValidationError::NameRequired);
    }

    if !fields.trimmed(keys.email).is_some_and(is_valid_email) {
        errors.push(ValidationError::InvalidEmail);
    }

    match variant {
        Variant::Contact => {
            if fields.trimmed(keys.message).is_none() {
                errors.push(ValidationError::MessageRequired);
            }
        }
        Variant::Demo => {
            if keys.company_name.and_then(|k| fields.trimmed(k)).is_none() {
                errors.push(ValidationError::CompanyRequired);
            }
        }
    }

    errors
}

/// Human-readable messages for a list of validation errors, order preserved.
#[must_use]
pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, email: &str, message: &str) -> FormFields {
        FormFields::new().with("Name", name).with("Email", email).with("Message", message)
    }

    #[test]
    fn test_valid_contact_has_no_errors() {
        assert!(validate(&contact("Ann", "ann@x.com", "hi"), Variant::Contact).is_empty());
    }

    #[test]
    fn test_contact_errors_in_check_order() {
        let errors = validate(&contact("", "bad", "hi"), Variant::Contact);
        assert_eq!(messages(&errors), vec!["Name is required.", "A valid email is required."]);

        let errors = validate(&FormFields::new(), Variant::Contact);
        assert_eq!(
            errors,
            vec![ValidationError::NameRequired, ValidationError::InvalidEmail, ValidationError::MessageRequired]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let errors = validate(&contact("   ", "ann@x.com", "\t\n"), Variant::Contact);
        assert_eq!(errors, vec![ValidationError::NameRequired, ValidationError::MessageRequired]);
    }

    #[test]
    fn test_demo_requires_company_not_message() {
        let fields = FormFields::new().with("req-Name-2", "Ann").with("req-Email-2", "ann@x.com");
        assert_eq!(validate(&fields, Variant::Demo), vec![ValidationError::CompanyRequired]);

        let fields = fields.with("req-Company-Name-2", "Acme");
        assert!(validate(&fields, Variant::Demo).is_empty());
    }

    #[test]
    fn test_demo_ignores_contact_keys() {
        let fields = contact("Ann", "ann@x.com", "hi");
        assert_eq!(
            validate(&fields, Variant::Demo),
            vec![ValidationError::NameRequired, ValidationError::InvalidEmail, ValidationError::CompanyRequired]
        );
    }

    #[test]
    fn test_email_pattern() {
        for ok in ["a@b.co", "first.last@sub.example.org", "ANN@X.COM", "a+tag@b.c"] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
        for bad in ["", "bad", "a@b", "@b.co", "a@.co", "a@b.", "a b@c.de", "a@@b.co", "a@b .co"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_email_is_trimmed_before_matching() {
        assert!(validate(&contact("Ann", "  ann@x.com  ", "hi"), Variant::Contact).is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let fields = contact("", "nope", "");
        assert_eq!(validate(&fields, Variant::Contact), validate(&fields, Variant::Contact));
    }
}
