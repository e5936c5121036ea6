//! HTTP client tests against a stub upstream served on a local port.

#![allow(clippy::unwrap_used)]

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use secrecy::SecretString;
use serde_json::json;
use url::Url;

use raving_residents_core::CompanyId;
use raving_residents_dashboard::config::UpstreamConfig;
use raving_residents_dashboard::gateway::{
    BrandingClient, BrandingDirectory, GatewayError, ResidentDirectory, ResidentServiceClient,
};
use raving_residents_integration_tests::{COMPANY_ID, RESIDENT_ID, resident_id};

const TOKEN: &str = "stub-upstream-token-7f3a9c1e";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn resident(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != RESIDENT_ID {
        return (StatusCode::NOT_FOUND, "no such resident").into_response();
    }
    Json(json!({
        "id": RESIDENT_ID,
        "firstName": "Dana",
        "lastName": "Reyes",
        "email": "dana@example.com",
        "companyId": COMPANY_ID,
        "availableServices": ["air-filter"]
    }))
    .into_response()
}

async fn info_cards() -> Response {
    Json(json!([
        { "title": "Filter delivery", "body": "Every 60 days." }
    ]))
    .into_response()
}

async fn branding(Path(company_id): Path<String>) -> Response {
    match company_id.as_str() {
        COMPANY_ID => Json(json!({
            "companyId": COMPANY_ID,
            "name": "Acme Homes",
            "logoSrc": "/logos/acme.png",
            "primaryBrandColor": "#1A73E8",
            "secondaryBrandColor": "#fbbc04"
        }))
        .into_response(),
        "broken-colors" => Json(json!({
            "companyId": "broken-colors",
            "name": "Broken",
            "logoSrc": "/logos/broken.png",
            "primaryBrandColor": "blue",
            "secondaryBrandColor": "#fff"
        }))
        .into_response(),
        "outage" => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serve the stub upstream and return its base URL.
async fn spawn_upstream() -> Url {
    let app = Router::new()
        .route("/api/residents/{id}", get(resident))
        .route("/api/info-cards", get(info_cards))
        .route("/api/companies/{company_id}/branding", get(branding));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}/api/")).unwrap()
}

fn upstream_config(base: Url, token: Option<&str>) -> UpstreamConfig {
    UpstreamConfig {
        resident_service_url: base.clone(),
        branding_service_url: base,
        access_token: token.map(|t| SecretString::from(t.to_string())),
    }
}

#[tokio::test]
async fn test_lookup_resident_decodes_record() {
    let base = spawn_upstream().await;
    let client = ResidentServiceClient::new(&upstream_config(base, Some(TOKEN))).unwrap();

    let resident = client.lookup_resident(&resident_id(RESIDENT_ID)).await.unwrap();
    assert_eq!(resident.full_name(), "Dana Reyes");
    assert_eq!(resident.company_id.as_str(), COMPANY_ID);
    assert_eq!(resident.service_count(), 1);
}

#[tokio::test]
async fn test_lookup_resident_not_found() {
    let base = spawn_upstream().await;
    let client = ResidentServiceClient::new(&upstream_config(base, Some(TOKEN))).unwrap();

    let err = client
        .lookup_resident(&resident_id("9b2e4f0a-1c3d-4e5f-8a6b-7c8d9e0f1a2b"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_missing_token_is_api_error() {
    let base = spawn_upstream().await;
    let client = ResidentServiceClient::new(&upstream_config(base, None)).unwrap();

    let err = client
        .lookup_resident(&resident_id(RESIDENT_ID))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_info_cards_default_optional_fields() {
    let base = spawn_upstream().await;
    let client = ResidentServiceClient::new(&upstream_config(base, None)).unwrap();

    let cards = client.info_cards().await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Filter delivery");
    assert!(cards[0].link_url.is_none());
}

#[tokio::test]
async fn test_lookup_branding_normalizes_colors() {
    let base = spawn_upstream().await;
    let client = BrandingClient::new(&upstream_config(base, None)).unwrap();

    let branding = client
        .lookup_branding(&CompanyId::new(COMPANY_ID))
        .await
        .unwrap();
    assert_eq!(branding.name, "Acme Homes");
    assert_eq!(branding.primary_brand_color.as_str(), "#1a73e8");
}

#[tokio::test]
async fn test_invalid_brand_color_is_parse_error() {
    let base = spawn_upstream().await;
    let client = BrandingClient::new(&upstream_config(base, None)).unwrap();

    let err = client
        .lookup_branding(&CompanyId::new("broken-colors"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Parse(_)));
}

#[tokio::test]
async fn test_upstream_outage_is_api_error() {
    let base = spawn_upstream().await;
    let client = BrandingClient::new(&upstream_config(base, None)).unwrap();

    let err = client
        .lookup_branding(&CompanyId::new("outage"))
        .await
        .unwrap_err();
    match err {
        GatewayError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_company_not_found() {
    let base = spawn_upstream().await;
    let client = BrandingClient::new(&upstream_config(base, None)).unwrap();

    let err = client
        .lookup_branding(&CompanyId::new("nobody"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
