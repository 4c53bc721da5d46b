// ABOUTME: Validation logic shared across database implementations
// ABOUTME: Turns zero-row writes into NotFound and guards payloads before they are written
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{DatabaseError, DatabaseResult};
use crate::models::NewSubscription;

/// Map the affected-row count of an `UPDATE`/`DELETE` by id to a result
///
/// # Errors
///
/// Returns [`DatabaseError::NotFound`] when no row had the given id
pub fn ensure_subscription_affected(rows_affected: u64, id: i64) -> DatabaseResult<()> {
    if rows_affected == 0 {
        return Err(DatabaseError::subscription_not_found(id));
    }
    Ok(())
}

/// Re-check a write payload at the store boundary
///
/// Handlers validate first; this keeps direct store callers from writing
/// rows the read path cannot map back.
///
/// # Errors
///
/// Returns [`DatabaseError::InvalidData`] naming the offending column
pub fn validate_subscription_write(subscription: &NewSubscription) -> DatabaseResult<()> {
    subscription
        .validate()
        .map_err(|e| DatabaseError::InvalidData {
            column: column_for(&e.message),
            reason: e.message,
        })
}

fn column_for(message: &str) -> &'static str {
    ["service_name", "price", "end_date"]
        .into_iter()
        .find(|column| message.starts_with(column))
        .unwrap_or("subscription")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthYear;
    use uuid::Uuid;

    #[test]
    fn test_zero_rows_is_not_found() {
        let error = ensure_subscription_affected(0, 9).unwrap_err();
        assert!(error.is_not_found());
        assert!(ensure_subscription_affected(1, 9).is_ok());
    }

    #[test]
    fn test_write_validation_names_column() {
        let mut subscription = NewSubscription {
            service_name: "Netflix".to_owned(),
            price: -5,
            user_id: Uuid::new_v4(),
            start_date: MonthYear::new(2024, 1).unwrap(),
            end_date: None,
        };
        let error = validate_subscription_write(&subscription).unwrap_err();
        assert!(matches!(error, DatabaseError::InvalidData { column: "price", .. }));

        subscription.price = 5;
        assert!(validate_subscription_write(&subscription).is_ok());
    }
}
