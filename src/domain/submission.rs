use crate::domain::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which of the two website forms a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Contact,
    Demo,
}

/// Wire key names a variant's form uses for each canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeys {
    pub name: &'static str,
    pub email: &'static str,
    pub message: &'static str,
    pub company_name: Option<&'static str>,
    pub number_of_users: Option<&'static str>,
}

const CONTACT_KEYS: FieldKeys =
    FieldKeys { name: "Name", email: "Email", message: "Message", company_name: None, number_of_users: None };

const DEMO_KEYS: FieldKeys = FieldKeys {
    name: "req-Name-2",
    email: "req-Email-2",
    message: "req-Message-2",
    company_name: Some("req-Company-Name-2"),
    number_of_users: Some("Number-of-users-2"),
};

impl Variant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Demo => "demo",
        }
    }

    /// Path of the intake route that accepts this variant.
    #[must_use]
    pub const fn endpoint_path(self) -> &'static str {
        match self {
            Self::Contact => "/api/contact",
            Self::Demo => "/api/demo",
        }
    }

    #[must_use]
    pub const fn field_keys(self) -> &'static FieldKeys {
        match self {
            Self::Contact => &CONTACT_KEYS,
            Self::Demo => &DEMO_KEYS,
        }
    }

    #[must_use]
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Contact => "New Contact Form Submission",
            Self::Demo => "New Demo Request",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw named text fields of one form interaction, keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` with surrounding whitespace removed; `None` when absent or blank.
    #[must_use]
    pub fn trimmed(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'de> Deserialize<'de> for FormFields {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                        return None;
                    }
                };
                Some((key, text))
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSubmission {
    pub name: String,
    pub company_name: String,
    pub email: String,
    pub number_of_users: Option<String>,
    pub additional_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Contact(ContactSubmission),
    Demo(DemoSubmission),
}

impl Submission {
    /// Validates `fields` for `variant` and builds the typed submission.
    ///
    /// # Errors
    /// Returns every failed rule, in check order, if the fields are not acceptable.
    pub fn parse(variant: Variant, fields: &FormFields) -> Result<Self, Vec<ValidationError>> {
        let errors = validation::validate(fields, variant);
        if !errors.is_empty() {
            return Err(errors);
        }

        let keys = variant.field_keys();
        let required = |key: &str| fields.trimmed(key).unwrap_or_default().to_string();
        let optional = |key: Option<&str>| key.and_then(|k| fields.trimmed(k)).map(str::to_string);

        Ok(match variant {
            Variant::Contact => Self::Contact(ContactSubmission {
                name: required(keys.name),
                email: required(keys.email),
                message: required(keys.message),
            }),
            Variant::Demo => Self::Demo(DemoSubmission {
                name: required(keys.name),
                company_name: keys.company_name.map(required).unwrap_or_default(),
                email: required(keys.email),
                number_of_users: optional(keys.number_of_users),
                additional_message: optional(Some(keys.message)),
            }),
        })
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Contact(_) => Variant::Contact,
            Self::Demo(_) => Variant::Demo,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Contact(c) => &c.email,
            Self::Demo(d) => &d.email,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Contact(c) => &c.name,
            Self::Demo(d) => &d.name,
        }
    }
}

/// Outcome of one submission attempt as reported back to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SubmissionResult {
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), errors: Vec::new() }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self { success: false, message: message.into(), errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_fields() -> FormFields {
        FormFields::new()
            .with("req-Name-2", "  Ann  ")
            .with("req-Email-2", "ann@x.com")
            .with("req-Company-Name-2", "Acme")
    }

    #[test]
    fn test_contact_parse_trims_values() {
        let fields =
            FormFields::new().with("Name", " Ann ").with("Email", " ann@x.com").with("Message", "hi\n");

        let submission = Submission::parse(Variant::Contact, &fields).unwrap();
        assert_eq!(
            submission,
            Submission::Contact(ContactSubmission {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
                message: "hi".to_string(),
            })
        );
        assert_eq!(submission.variant(), Variant::Contact);
    }

    #[test]
    fn test_demo_optional_fields_absent_equals_empty() {
        let omitted = Submission::parse(Variant::Demo, &demo_fields()).unwrap();
        let empty = Submission::parse(
            Variant::Demo,
            &demo_fields().with("Number-of-users-2", "").with("req-Message-2", "   "),
        )
        .unwrap();

        assert_eq!(omitted, empty);
        let Submission::Demo(demo) = omitted else { panic!("expected demo submission") };
        assert_eq!(demo.name, "Ann");
        assert_eq!(demo.company_name, "Acme");
        assert_eq!(demo.number_of_users, None);
        assert_eq!(demo.additional_message, None);
    }

    #[test]
    fn test_parse_reports_validation_errors() {
        let fields = FormFields::new().with("Name", "").with("Email", "bad").with("Message", "hi");
        let errors = Submission::parse(Variant::Contact, &fields).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NameRequired, ValidationError::InvalidEmail]);
    }

    #[test]
    fn test_deserialize_coerces_scalars_and_drops_structures() {
        let fields: FormFields = serde_json::from_value(serde_json::json!({
            "req-Name-2": "Ann",
            "Number-of-users-2": 25,
            "flag": true,
            "nothing": null,
            "list": ["a"],
            "nested": {"a": 1}
        }))
        .unwrap();

        assert_eq!(fields.get("req-Name-2"), Some("Ann"));
        assert_eq!(fields.get("Number-of-users-2"), Some("25"));
        assert_eq!(fields.get("flag"), Some("true"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_variant_routing_table() {
        assert_eq!(Variant::Contact.endpoint_path(), "/api/contact");
        assert_eq!(Variant::Demo.endpoint_path(), "/api/demo");
        assert_eq!(Variant::Contact.subject(), "New Contact Form Submission");
        assert_eq!(Variant::Demo.subject(), "New Demo Request");
        assert_eq!(Variant::Demo.field_keys().company_name, Some("req-Company-Name-2"));
    }
}
