// Integration tests for `RentalClient` using wiremock.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use velodash_api::types::{DiscountTypeResponse, ReviewCreate};
use velodash_api::{Error, RentalClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RentalClient) {
    let server = MockServer::start().await;
    let client = RentalClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_pricing() {
    let (server, client) = setup().await;

    let body = json!({
        "plans": [
            {
                "id": "plan-hourly",
                "name": "Horaire",
                "hourlyRate": 500,
                "dailyRate": 3500,
                "weeklyRate": 18000,
                "monthlyRate": 60000,
                "originalHourlyRate": 625,
                "minimumHours": 1,
                "isActive": true,
                "appliedPromotions": [
                    { "name": "Été", "discountType": "PERCENTAGE", "discountValue": 20.0 }
                ],
                "appliedRule": "heure-creuse"
            },
            {
                "name": "Mensuel",
                "hourlyRate": 300,
                "dailyRate": 2000,
                "weeklyRate": 12000,
                "monthlyRate": 45000,
                "isActive": false
            }
        ],
        "appliedRule": { "name": "heure-pleine" },
        "multiplier": 1.25,
        "nextUpdate": "2026-08-05T15:00:00Z",
        "unlockFee": 100
    });

    Mock::given(method("GET"))
        .and(path("/api/pricing/calculate"))
        .and(query_param("hour", "14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let at = Utc.with_ymd_and_hms(2026, 8, 5, 14, 23, 10).unwrap();
    let snapshot = client.fetch_pricing(at, 14).await.unwrap();

    assert_eq!(snapshot.plans.len(), 2);
    assert_eq!(snapshot.plans[0].name, "Horaire");
    assert_eq!(snapshot.plans[0].hourly_rate, 500);
    assert_eq!(snapshot.plans[0].original_hourly_rate, Some(625));
    assert_eq!(snapshot.plans[0].applied_promotions.len(), 1);
    assert_eq!(
        snapshot.plans[0].applied_promotions[0].discount_type,
        DiscountTypeResponse::Percentage
    );
    assert!(snapshot.plans[0].is_active);
    assert!(!snapshot.plans[1].is_active);
    assert_eq!(snapshot.plans[1].id, None);
    assert_eq!(snapshot.applied_rule.as_ref().map(|r| r.name.as_str()), Some("heure-pleine"));
    assert!((snapshot.multiplier - 1.25).abs() < f64::EPSILON);
    assert_eq!(snapshot.unlock_fee, 100);
    assert!(snapshot.next_update.is_some());
}

#[tokio::test]
async fn test_fetch_pricing_partial_body_defaults_to_empty() {
    let (server, client) = setup().await;

    // No "plans" key at all -- must deserialize to an empty list,
    // not an error.
    Mock::given(method("GET"))
        .and(path("/api/pricing/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unlockFee": 100 })))
        .mount(&server)
        .await;

    let at = Utc.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).unwrap();
    let snapshot = client.fetch_pricing(at, 9).await.unwrap();

    assert!(snapshot.plans.is_empty());
    assert!(snapshot.applied_rule.is_none());
    assert!((snapshot.multiplier - 1.0).abs() < f64::EPSILON);
    assert!(snapshot.next_update.is_none());
}

#[tokio::test]
async fn test_company_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Velocité",
            "slogan": "La ville à vélo",
            "phone": "+221 33 000 00 00"
        })))
        .mount(&server)
        .await;

    let company = client.company_info().await.unwrap();

    assert_eq!(company.name, "Velocité");
    assert_eq!(company.slogan.as_deref(), Some("La ville à vélo"));
    assert_eq!(company.email, None);
}

#[tokio::test]
async fn test_list_and_submit_reviews() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "r1", "author": "Awa", "rating": 5, "comment": "Parfait" },
            { "id": "r2", "author": "Moussa", "rating": 4, "comment": "" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r3", "author": "Fatou", "rating": 5, "comment": "Super vélos"
        })))
        .mount(&server)
        .await;

    let reviews = client.list_reviews().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].author, "Awa");

    let created = client
        .submit_review(&ReviewCreate {
            author: "Fatou".into(),
            rating: 5,
            comment: "Super vélos".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("r3"));
}

#[tokio::test]
async fn test_login() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "role": "admin",
            "displayName": "Admin"
        })))
        .mount(&server)
        .await;

    let session = client.login("admin", "secret").await.unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.role, "admin");
    assert_eq!(session.display_name.as_deref(), Some("Admin"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Identifiants invalides" })),
        )
        .mount(&server)
        .await;

    let result = client.login("admin", "wrong").await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message, "Identifiants invalides");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let at = Utc.with_ymd_and_hms(2026, 8, 5, 10, 0, 0).unwrap();
    let result = client.fetch_pricing(at, 10).await;

    match result {
        Err(Error::Api {
            status, ref code, ..
        }) => {
            assert_eq!(status, 500);
            assert!(code.is_none());
        }
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_422_with_code() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/reviews"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Note hors limites",
            "code": "VALIDATION_ERROR"
        })))
        .mount(&server)
        .await;

    let result = client
        .submit_review(&ReviewCreate {
            author: "X".into(),
            rating: 11,
            comment: String::new(),
        })
        .await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ref code,
        }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Note hors limites");
            assert_eq!(code.as_deref(), Some("VALIDATION_ERROR"));
        }
        other => panic!("expected Api 422 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.company_info().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
