use serde::{Deserialize, Serialize};

use crate::user::FieldError;

/// Card details entered at the payment step. Validated locally only;
/// nothing is ever charged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardDetails {
    /// Digits, optionally space-grouped
    pub card_number: String,
    /// "MM/YY"
    pub expiry: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl CardDetails {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let digits = self.card_number.chars().filter(char::is_ascii_digit).count();
        if digits < 16 {
            errors.push(FieldError {
                field: "card_number".to_string(),
                message: "Card number is invalid".to_string(),
            });
        }

        if !is_valid_expiry(&self.expiry) {
            errors.push(FieldError {
                field: "expiry".to_string(),
                message: "Expiry date is invalid".to_string(),
            });
        }

        if self.cvv.len() < 3 || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            errors.push(FieldError {
                field: "cvv".to_string(),
                message: "Security code is invalid".to_string(),
            });
        }

        if self.cardholder_name.trim().is_empty() {
            errors.push(FieldError {
                field: "cardholder_name".to_string(),
                message: "Cardholder name is required".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Chosen payment method. Card carries its details; PayPal and cash
/// are valid by selection alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentSelection {
    Card(CardDetails),
    Paypal,
    Cash,
}

impl PaymentSelection {
    pub fn is_valid(&self) -> bool {
        match self {
            PaymentSelection::Card(card) => card.validate().is_ok(),
            PaymentSelection::Paypal | PaymentSelection::Cash => true,
        }
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            PaymentSelection::Card(_) => "card",
            PaymentSelection::Paypal => "paypal",
            PaymentSelection::Cash => "cash",
        }
    }
}

/// "MM/YY" with a real month
fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}

/// Regroup a card number into blocks of four digits (input mask)
pub fn format_card_number(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(16)
        .collect();

    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Insert the slash of an "MM/YY" expiry as digits are typed
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}
