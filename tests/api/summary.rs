use uuid::Uuid;

use crate::helpers::{subscription_body, TestApp};
use subscriptions_service::routes::SummaryResult;

async fn total(test_app: &TestApp, query: &[(&str, &str)]) -> i64 {
    let response = test_app.get_summary(query).await;

    assert_eq!(200, response.status().as_u16(), "Query was {:?}", query);

    let summary: SummaryResult = response.json().await.unwrap();

    summary.total
}

#[tokio::test]
async fn summary_bills_every_month_of_a_fully_covered_period() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .create_subscription(subscription_body(
            Uuid::new_v4(),
            "Netflix",
            100,
            "01-2024",
            Some("03-2024"),
        ))
        .await;

    assert_eq!(total(&test_app, &[("from", "01-2024"), ("to", "03-2024")]).await, 300);
    assert_eq!(total(&test_app, &[("from", "02-2024"), ("to", "02-2024")]).await, 100);
}

#[tokio::test]
async fn summary_bills_open_ended_subscriptions_through_the_end_of_the_period() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .create_subscription(subscription_body(
            Uuid::new_v4(),
            "Spotify",
            50,
            "01-2024",
            None,
        ))
        .await;

    assert_eq!(total(&test_app, &[("from", "01-2024"), ("to", "06-2024")]).await, 300);
}

#[tokio::test]
async fn summary_ignores_subscriptions_outside_the_period() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .create_subscription(subscription_body(
            Uuid::new_v4(),
            "Netflix",
            100,
            "05-2024",
            Some("06-2024"),
        ))
        .await;

    assert_eq!(total(&test_app, &[("from", "01-2024"), ("to", "02-2024")]).await, 0);
}

#[tokio::test]
async fn summary_clips_partial_overlaps_and_adds_every_candidate() {
    let test_app = TestApp::spawn_app().await;
    let user_id = Uuid::new_v4();

    // Overlaps 11-2023..12-2023 only: 2 months
    test_app
        .create_subscription(subscription_body(user_id, "Netflix", 100, "01-2023", Some("12-2023")))
        .await;
    // Overlaps 01-2024..02-2024 only: 2 months
    test_app
        .create_subscription(subscription_body(user_id, "Spotify", 10, "01-2024", Some("12-2024")))
        .await;
    // Open ended, whole period: 4 months
    test_app
        .create_subscription(subscription_body(user_id, "Kinopoisk", 1, "06-2020", None))
        .await;

    let summary = total(&test_app, &[("from", "11-2023"), ("to", "02-2024")]).await;

    assert_eq!(summary, 2 * 100 + 2 * 10 + 4);
}

#[tokio::test]
async fn summary_applies_user_and_service_filters() {
    let test_app = TestApp::spawn_app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    for (user_id, service_name, price) in [
        (alice, "Netflix", 100),
        (alice, "Spotify", 10),
        (bob, "Netflix", 1000),
    ] {
        test_app
            .create_subscription(subscription_body(user_id, service_name, price, "01-2024", None))
            .await;
    }

    let alice_id = alice.to_string();
    let period = [("from", "01-2024"), ("to", "01-2024")];
    let test_cases: Vec<(Vec<(&str, &str)>, i64)> = vec![
        (vec![], 1110),
        (vec![("user_id", alice_id.as_str())], 110),
        (vec![("service_name", "Netflix")], 1100),
        (vec![("user_id", alice_id.as_str()), ("service_name", "Netflix")], 100),
        (vec![("user_id", ""), ("service_name", "")], 1110),
    ];

    for (filters, expected) in test_cases {
        let query: Vec<(&str, &str)> = period.iter().copied().chain(filters).collect();

        assert_eq!(total(&test_app, &query).await, expected, "Query was {:?}", query);
    }
}

#[tokio::test]
async fn summary_of_an_inverted_period_is_zero() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .create_subscription(subscription_body(
            Uuid::new_v4(),
            "Netflix",
            100,
            "01-2020",
            None,
        ))
        .await;

    assert_eq!(total(&test_app, &[("from", "06-2024"), ("to", "01-2024")]).await, 0);
}

#[tokio::test]
async fn summary_of_an_empty_store_is_zero() {
    let test_app = TestApp::spawn_app().await;

    assert_eq!(total(&test_app, &[("from", "01-2024"), ("to", "12-2024")]).await, 0);
}

#[tokio::test]
async fn summary_returns_400_for_invalid_parameters() {
    let test_app = TestApp::spawn_app().await;
    let test_cases = vec![
        (vec![("to", "01-2024")], "from must be MM-YYYY"),
        (vec![("from", "2024-01"), ("to", "01-2024")], "from must be MM-YYYY"),
        (vec![("from", "01-2024")], "to must be MM-YYYY"),
        (vec![("from", "01-2024"), ("to", "13-2024")], "to must be MM-YYYY"),
        (
            vec![("from", "01-2024"), ("to", "02-2024"), ("user_id", "42")],
            "user_id must be uuid",
        ),
    ];

    for (query, error_message) in test_cases {
        let response = test_app.get_summary(&query).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when query was {:?}",
            query
        );

        let body: serde_json::Value = response.json().await.unwrap();

        assert_eq!(body["error"], error_message);
    }
}

#[tokio::test]
async fn summary_returns_400_with_json_body_for_a_repeated_parameter() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .get_summary(&[("from", "01-2024"), ("to", "02-2024"), ("to", "03-2024")])
        .await;

    assert_eq!(400, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(body["error"], "invalid query string");
}
