use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcceptedResponse {
    pub success: bool,
}

impl AcceptedResponse {
    #[must_use]
    pub const fn new() -> Self {
        Self { success: true }
    }
}

impl Default for AcceptedResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationFailureResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

impl ValidationFailureResponse {
    #[must_use]
    pub fn new(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self { success: false, message: message.into(), errors }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryFailureResponse {
    pub error: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_shape() {
        let body = ValidationFailureResponse::new("Please correct the following errors:", vec!["Name is required.".into()]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "success": false,
                "message": "Please correct the following errors:",
                "errors": ["Name is required."]
            })
        );
    }

    #[test]
    fn test_accepted_shape() {
        assert_eq!(serde_json::to_value(AcceptedResponse::new()).unwrap(), serde_json::json!({"success": true}));
    }
}
