//! Cart and checkout tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use eliminator_integration_tests::TestClient;
use eliminator_storefront::config::{MessagingConfig, StorefrontConfig};

const EMPTY_CART: &str = "Your cart is empty.";
const CHECKOUT_BUTTON: &str = "Checkout on WhatsApp";

async fn signed_in_client(config: StorefrontConfig) -> TestClient {
    let mut client = TestClient::with_config(config);
    client.post_form("/login", "username=Alice").await;
    client
}

fn configured_checkout() -> StorefrontConfig {
    StorefrontConfig {
        messaging: MessagingConfig {
            checkout_number: "2348000000000".to_string(),
            ..MessagingConfig::default()
        },
        ..StorefrontConfig::default()
    }
}

// =============================================================================
// Viewing
// =============================================================================

#[tokio::test]
async fn test_empty_cart() {
    let mut client = TestClient::new();

    let page = client.get("/cart").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(EMPTY_CART));
    assert!(!page.body.contains(CHECKOUT_BUTTON));
    assert!(page.body.contains("Cart (0)"));
}

// =============================================================================
// Adding
// =============================================================================

#[tokio::test]
async fn test_add_products_totals_cart() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;

    let response = client.post_form("/cart/add", "product_id=1").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
    client.post_form("/cart/add", "product_id=2").await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("Cart (2)"));
    assert!(page.body.contains("2 items"));
    assert!(page.body.contains("Basic WhatsApp Bot - ₦5,000"));
    assert!(page.body.contains("Business WhatsApp Bot - ₦15,000"));
    assert!(
        page.body
            .contains("Order: Basic WhatsApp Bot, Business WhatsApp Bot")
    );
    assert!(page.body.contains("Total: ₦20,000"));
    assert!(page.body.contains(CHECKOUT_BUTTON));
    assert!(!page.body.contains(EMPTY_CART));
}

#[tokio::test]
async fn test_duplicate_products_are_separate_lines() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;

    client.post_form("/cart/add", "product_id=3").await;
    client.post_form("/cart/add", "product_id=3").await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("Cart (2)"));
    assert!(page.body.contains("Order: Pro WhatsApp Bot, Pro WhatsApp Bot"));
    assert!(page.body.contains("Total: ₦60,000"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;

    let response = client.post_form("/cart/add", "product_id=99").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let page = client.get("/cart").await;
    assert!(page.body.contains(EMPTY_CART));
}

#[tokio::test]
async fn test_cart_survives_sign_out() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;
    client.post_form("/cart/add", "product_id=1").await;

    client.post_form("/logout", "").await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("Cart (1)"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_all_kept() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;
    client.post_form("/cart/add", "product_id=1").await;
    assert!(client.cookie("evs_session").is_some());

    let responses = client
        .post_form_concurrently("/cart/add", "product_id=1", 20)
        .await;
    assert!(
        responses
            .iter()
            .all(|r| r.status == StatusCode::SEE_OTHER)
    );

    let page = client.get("/cart").await;
    assert!(page.body.contains("Cart (21)"));
    assert!(page.body.contains("21 items"));
    assert!(page.body.contains("Total: ₦105,000"));
}

// =============================================================================
// Removing
// =============================================================================

#[tokio::test]
async fn test_remove_line_by_position() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/add", "product_id=2").await;
    client.post_form("/cart/add", "product_id=1").await;

    let response = client.post_form("/cart/remove", "position=0").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
    let page = client.get("/cart").await;
    assert!(
        page.body
            .contains("Order: Business WhatsApp Bot, Basic WhatsApp Bot")
    );
    assert!(page.body.contains("Total: ₦20,000"));
}

#[tokio::test]
async fn test_remove_past_end_is_ignored() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;
    client.post_form("/cart/add", "product_id=2").await;

    client.post_form("/cart/remove", "position=5").await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("Cart (1)"));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_redirects_to_whatsapp() {
    let mut client = signed_in_client(configured_checkout()).await;
    client.post_form("/cart/add", "product_id=3").await;

    let response = client.get("/checkout").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location(),
        Some(
            "https://wa.me/2348000000000?text=Hello%2C%20I%20want%20to%20buy%3A%20Pro%20WhatsApp%20Bot%20(Total%3A%20%E2%82%A630%2C000)"
        )
    );
}

#[tokio::test]
async fn test_checkout_link_on_cart_page() {
    let mut client = signed_in_client(configured_checkout()).await;
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/add", "product_id=2").await;

    let page = client.get("/cart").await;

    assert!(page.body.contains(
        "https://wa.me/2348000000000?text=Hello%2C%20I%20want%20to%20buy%3A%20Basic%20WhatsApp%20Bot%2C%20Business%20WhatsApp%20Bot%20(Total%3A%20%E2%82%A620%2C000)"
    ));
    assert!(page.body.contains("target=\"_blank\""));
}

#[tokio::test]
async fn test_checkout_with_placeholder_number_still_links() {
    let mut client = signed_in_client(StorefrontConfig::default()).await;
    client.post_form("/cart/add", "product_id=1").await;

    let response = client.get("/checkout").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(
        response
            .location()
            .unwrap()
            .starts_with("https://wa.me/YOUR_PHONE_NUMBER?text=")
    );
}

#[tokio::test]
async fn test_checkout_empty_cart_returns_to_cart() {
    let mut client = signed_in_client(configured_checkout()).await;

    let response = client.get("/checkout").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
}
