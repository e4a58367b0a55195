//! Account and transaction request payloads.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::types::{AccountId, Amount, Currency};

/// Account creation payload. `currency` is an ISO 4217 numeric code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "check_currency_code"))]
pub struct CreateAccountRequest {
    /// Numeric currency code.
    pub currency: i32,
}

impl CreateAccountRequest {
    /// Returns the requested currency, if the code is supported.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_code(self.currency)
    }
}

fn check_currency_code(request: &CreateAccountRequest) -> Result<(), ValidationError> {
    if request.currency().is_some() {
        return Ok(());
    }
    Err(ValidationError::new("currency").with_message(Cow::Owned(format!(
        "Must be one of: {}",
        Currency::ALL
            .iter()
            .map(|c| c.code().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ))))
}

/// Payload or query naming one of the caller's accounts.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct AccountRequest {
    /// Account id.
    pub id: AccountId,
}

/// Deposit or withdraw payload.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct AmountRequest {
    /// Account id.
    pub id: AccountId,
    /// Positive amount.
    pub amount: Amount,
}

/// Transfer payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransferFundsRequest {
    /// Sending account, owned by the caller.
    pub id: AccountId,
    /// Receiving user.
    #[validate(length(min = 1, message = "Receiver username is required"))]
    pub receiver_username: String,
    /// Receiving account, owned by `receiver_username`.
    pub receiver_id: AccountId,
    /// Positive amount.
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(422, true)]
    #[case(840, true)]
    #[case(978, false)]
    #[case(0, false)]
    fn test_currency_code_validation(#[case] code: i32, #[case] valid: bool) {
        let request = CreateAccountRequest { currency: code };
        assert_eq!(request.validate().is_ok(), valid);
        assert_eq!(request.currency().is_some(), valid);
    }

    #[test]
    fn test_amount_request_accepts_number_and_string() {
        let number: AmountRequest = serde_json::from_str(r#"{"id": 3, "amount": 12.5}"#).unwrap();
        let string: AmountRequest =
            serde_json::from_str(r#"{"id": 3, "amount": "12.50"}"#).unwrap();

        assert_eq!(number.id, AccountId::new(3));
        assert_eq!(number.amount.value(), dec!(12.5));
        assert_eq!(string.amount.value(), dec!(12.5));
    }

    #[rstest]
    #[case(r#"{"id": 3, "amount": 0}"#)]
    #[case(r#"{"id": 3, "amount": -1}"#)]
    #[case(r#"{"id": 3}"#)]
    #[case(r#"{"id": "three", "amount": 1}"#)]
    fn test_amount_request_rejects(#[case] body: &str) {
        assert!(serde_json::from_str::<AmountRequest>(body).is_err());
    }

    #[test]
    fn test_transfer_requires_receiver_username() {
        let request: TransferFundsRequest = serde_json::from_str(
            r#"{"id": 1, "receiver_username": "", "receiver_id": 2, "amount": 5}"#,
        )
        .unwrap();

        assert!(request.validate().is_err());
    }
}
