use serde::{Deserialize, Serialize};

/// A single field-level validation failure, surfaced inline and
/// recovered locally by re-entry (never propagated further).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Contact details collected at the user-information step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub emergency_contact: Option<String>,
    pub special_requests: Option<String>,
    pub agree_to_terms: bool,
    pub agree_to_privacy: bool,
}

impl UserInfo {
    /// Required fields non-empty, plausible email and phone shapes,
    /// and both agreement flags set.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(FieldError::new("full_name", "Full name is required"));
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_plausible_email(&self.email) {
            errors.push(FieldError::new("email", "Email address is invalid"));
        }

        if self.phone.trim().is_empty() {
            errors.push(FieldError::new("phone", "Phone number is required"));
        } else if !is_plausible_phone(&self.phone) {
            errors.push(FieldError::new("phone", "Phone number is invalid"));
        }

        if !self.agree_to_terms {
            errors.push(FieldError::new(
                "agree_to_terms",
                "The terms and conditions must be accepted",
            ));
        }

        if !self.agree_to_privacy {
            errors.push(FieldError::new(
                "agree_to_privacy",
                "The privacy policy must be accepted",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// local@domain.tld, no whitespace anywhere
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Optional leading '+', then 10 or more digits/spaces/dashes
fn is_plausible_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.len() >= 10
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
}
