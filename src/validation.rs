use uuid::Uuid;

use crate::server::api::PaymentRequest;

// VALIDATION ERRORS
// ================================================================================================

/// A rejected payment request field.
///
/// The display text of each variant is the exact message returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid user id. Must be a uuid v4")]
    InvalidUserId,
    #[error("Sender and receiver cannot be same")]
    SameAccount,
    #[error("Amount must be greater than 100")]
    InvalidAmount,
}

// VALIDATION
// ================================================================================================

/// Validates a payment request before it reaches the classifier.
///
/// Checks run in a fixed order and the first failure short-circuits.
pub fn validate_payment(request: &PaymentRequest) -> Result<(), ValidationError> {
    let user_id_is_v4 =
        Uuid::try_parse(&request.user_id).is_ok_and(|id| id.get_version_num() == 4);
    if !user_id_is_v4 {
        return Err(ValidationError::InvalidUserId);
    }

    if request.to_account_number == request.from_account_number {
        return Err(ValidationError::SameAccount);
    }

    // The amount travels as a string; numeric means a finite decimal value.
    let amount: f64 =
        request.amount.trim().parse().map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 100.0 {
        return Err(ValidationError::InvalidAmount);
    }

    Ok(())
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// A request that passes every check.
    fn valid_request() -> PaymentRequest {
        PaymentRequest {
            user_id: "bed66608-7b7f-4772-b646-b89cb6d7dc6b".to_string(),
            to_account_number: "111".to_string(),
            from_account_number: "222".to_string(),
            amount: "150".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(validate_payment(&valid_request()), Ok(()));
    }

    #[test]
    fn malformed_user_id_is_rejected() {
        let mut request = valid_request();
        request.user_id = "not-a-uuid".to_string();
        assert_eq!(validate_payment(&request), Err(ValidationError::InvalidUserId));
    }

    /// A syntactically valid UUID of the wrong version fails the v4 requirement.
    #[test]
    fn non_v4_user_id_is_rejected() {
        let mut request = valid_request();
        // Version nibble says v1.
        request.user_id = "c232ab00-9414-11ec-b3c8-9f68deced846".to_string();
        assert_eq!(validate_payment(&request), Err(ValidationError::InvalidUserId));
    }

    #[test]
    fn equal_accounts_are_rejected() {
        let mut request = valid_request();
        request.from_account_number = request.to_account_number.clone();
        assert_eq!(validate_payment(&request), Err(ValidationError::SameAccount));
    }

    /// The boundary itself is rejected; anything strictly above passes.
    #[test]
    fn amount_must_exceed_one_hundred() {
        let mut request = valid_request();

        request.amount = "100".to_string();
        assert_eq!(validate_payment(&request), Err(ValidationError::InvalidAmount));

        request.amount = "101".to_string();
        assert_eq!(validate_payment(&request), Ok(()));

        request.amount = "100.01".to_string();
        assert_eq!(validate_payment(&request), Ok(()));
    }

    /// Amounts must be finite decimals; infinite spellings parse but are rejected.
    #[test]
    fn non_numeric_amounts_are_rejected() {
        let mut request = valid_request();
        for amount in ["abc", "", "12abc", "NaN", "inf", "Infinity", "-150"] {
            request.amount = amount.to_string();
            assert_eq!(
                validate_payment(&request),
                Err(ValidationError::InvalidAmount),
                "amount {amount:?}"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let mut request = valid_request();
        request.amount = " 150 ".to_string();
        assert_eq!(validate_payment(&request), Ok(()));
    }
}
