// ABOUTME: Integration tests for period cost aggregation in the subscription store
// ABOUTME: Checks the overlap rule, optional filters, empty sums, and parity with the in-memory predicate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_database, month, subscription};
use subscription_service::database_plugins::factory::Database;
use subscription_service::database_plugins::SubscriptionStore;
use subscription_service::models::{CostQuery, MonthYear, Subscription};
use uuid::Uuid;

/// Insert `(start, end, price)` rows for one user and return their store copies
async fn seed(
    db: &Database,
    user_id: Uuid,
    rows: &[(MonthYear, Option<MonthYear>, i64)],
) -> Vec<Subscription> {
    let mut stored = Vec::with_capacity(rows.len());
    for (start, end, price) in rows {
        let new = subscription(user_id, "Netflix", *price, *start, *end);
        let id = db.insert_subscription(&new).await.unwrap();
        stored.push(Subscription::from_new(id, new));
    }
    stored
}

fn first_half_2024() -> CostQuery {
    CostQuery::for_period(month(2024, 1), month(2024, 6))
}

#[tokio::test]
async fn test_overlap_matrix_against_first_half_of_2024() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();

    seed(
        &db,
        user_id,
        &[
            // Entirely before the period
            (month(2023, 1), Some(month(2023, 12)), 1),
            // Ends on the first month of the period
            (month(2023, 6), Some(month(2024, 1)), 10),
            // Inside the period
            (month(2024, 2), Some(month(2024, 4)), 100),
            // Starts on the last month of the period
            (month(2024, 6), Some(month(2024, 9)), 1_000),
            // Entirely after the period
            (month(2024, 7), None, 10_000),
            // Open-ended, started before the period
            (month(2022, 3), None, 100_000),
            // Spans the whole period
            (month(2023, 12), Some(month(2024, 7)), 1_000_000),
        ],
    )
    .await;

    let total = db.calculate_total_cost(&first_half_2024()).await.unwrap();
    assert_eq!(total, 10 + 100 + 1_000 + 100_000 + 1_000_000);
}

#[tokio::test]
async fn test_empty_store_sums_to_zero() {
    let db = create_test_database().await.unwrap();
    let total = db.calculate_total_cost(&first_half_2024()).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_no_overlap_sums_to_zero() {
    let db = create_test_database().await.unwrap();
    seed(
        &db,
        Uuid::new_v4(),
        &[(month(2020, 1), Some(month(2020, 12)), 500)],
    )
    .await;

    let total = db.calculate_total_cost(&first_half_2024()).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_single_month_period() {
    let db = create_test_database().await.unwrap();
    seed(
        &db,
        Uuid::new_v4(),
        &[
            (month(2024, 3), Some(month(2024, 3)), 5),
            (month(2024, 4), None, 7),
        ],
    )
    .await;

    let query = CostQuery::for_period(month(2024, 3), month(2024, 3));
    assert_eq!(db.calculate_total_cost(&query).await.unwrap(), 5);
}

#[tokio::test]
async fn test_user_filter() {
    let db = create_test_database().await.unwrap();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    seed(&db, alice, &[(month(2024, 1), None, 300)]).await;
    seed(&db, bob, &[(month(2024, 1), None, 700)]).await;

    let total = db
        .calculate_total_cost(&first_half_2024().with_user(alice))
        .await
        .unwrap();
    assert_eq!(total, 300);

    let everyone = db.calculate_total_cost(&first_half_2024()).await.unwrap();
    assert_eq!(everyone, 1_000);
}

#[tokio::test]
async fn test_service_filter_is_exact_match() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    for (name, price) in [("Netflix", 999), ("Spotify", 499), ("netflix", 1)] {
        db.insert_subscription(&subscription(user_id, name, price, month(2024, 1), None))
            .await
            .unwrap();
    }

    let total = db
        .calculate_total_cost(&first_half_2024().with_service("Netflix"))
        .await
        .unwrap();
    assert_eq!(total, 999);
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let db = create_test_database().await.unwrap();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    db.insert_subscription(&subscription(alice, "Netflix", 999, month(2024, 1), None))
        .await
        .unwrap();
    db.insert_subscription(&subscription(alice, "Spotify", 499, month(2024, 1), None))
        .await
        .unwrap();
    db.insert_subscription(&subscription(bob, "Netflix", 1299, month(2024, 1), None))
        .await
        .unwrap();

    let query = first_half_2024().with_user(alice).with_service("Netflix");
    assert_eq!(db.calculate_total_cost(&query).await.unwrap(), 999);

    let query = first_half_2024().with_user(Uuid::new_v4()).with_service("Netflix");
    assert_eq!(db.calculate_total_cost(&query).await.unwrap(), 0);
}

#[tokio::test]
async fn test_sql_sum_agrees_with_in_memory_predicate() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();

    let mut rows = Vec::new();
    for start_month in 1..=12 {
        for span in [0, 2, 5] {
            let start = month(2023, start_month);
            let end_month = start_month + span;
            let end = if end_month > 12 {
                None
            } else {
                Some(month(2023, end_month))
            };
            rows.push((start, end, i64::from(start_month * 10 + span)));
        }
    }
    let stored = seed(&db, user_id, &rows).await;

    for (from, to) in [(1, 1), (3, 7), (6, 6), (11, 12), (1, 12)] {
        let query = CostQuery::for_period(month(2023, from), month(2023, to)).with_user(user_id);
        let expected: i64 = stored
            .iter()
            .filter(|s| query.matches(s))
            .map(|s| s.price)
            .sum();
        assert_eq!(
            db.calculate_total_cost(&query).await.unwrap(),
            expected,
            "period {from:02}-2023..{to:02}-2023"
        );
    }
}
