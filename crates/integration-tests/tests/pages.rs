//! Page rendering, preferences and the contact form.

use hc_integration_tests::{TestServer, toast_text};

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    assert_eq!(server.page("/health").await, "ok");
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let server = TestServer::start().await;
    let response = server.get("/").await;
    let headers = response.headers();

    assert_eq!(headers.get("x-frame-options").and_then(|v| v.to_str().ok()), Some("DENY"));
    assert_eq!(headers.get("cache-control").and_then(|v| v.to_str().ok()), Some("no-store, max-age=0"));
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let server = TestServer::start().await;
    let response = server.get("/static/css/main.css").await;

    assert_eq!(response.status(), 200);
    assert!(!response.headers().contains_key("cache-control"));
}

#[tokio::test]
async fn test_unknown_page() {
    let server = TestServer::start().await;

    let response = server.get("/nada").await;
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.expect("read body"), "Not found: /nada");

    let response = server.get("/pedido/extra").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_active_nav() {
    let server = TestServer::start().await;

    let html = server.page("/contato").await;
    assert!(html.contains(r#"href="/contato" class="active""#));
    assert!(!html.contains(r#"href="/cardapio" class="active""#));
}

// =============================================================================
// Menu & modal
// =============================================================================

#[tokio::test]
async fn test_menu_lists_dishes() {
    let server = TestServer::start().await;
    let html = server.page("/cardapio").await;

    assert!(html.contains("X-Burger"));
    assert!(html.contains("R$ 25,90"));
    assert!(html.contains(r#"aria-hidden="true""#));
}

#[tokio::test]
async fn test_menu_cards_stagger_per_section() {
    let server = TestServer::start().await;
    let html = server.page("/cardapio").await;

    let sections = html.matches(r#"class="menu-section""#).count();
    assert_eq!(html.matches(r#"data-delay="0""#).count(), sections);
    assert!(html.contains(r#"class="menu-card reveal" data-delay="240""#));
    assert!(!html.contains(r#"data-delay="320""#));
}

#[tokio::test]
async fn test_script_handles_stagger_and_outside_click() {
    let server = TestServer::start().await;
    let script = server.page("/static/js/site.js").await;

    assert!(script.contains("el.dataset.delay"));
    assert!(script.contains("nav.contains(event.target)"));
}

#[tokio::test]
async fn test_modal_opens_for_product() {
    let server = TestServer::start().await;
    let html = server.page("/cardapio?produto=Batata%20Frita").await;

    assert!(html.contains(r#"aria-hidden="false""#));
    assert!(html.contains("<h2>Batata Frita</h2>"));
    assert!(html.contains("R$ 14,00"));
}

#[tokio::test]
async fn test_modal_stays_closed_for_unknown_product() {
    let server = TestServer::start().await;
    let html = server.page("/cardapio?produto=Pizza").await;

    assert!(html.contains(r#"aria-hidden="true""#));
    assert!(!html.contains("Adicionar ao pedido"));
}

// =============================================================================
// Theme
// =============================================================================

#[tokio::test]
async fn test_theme_toggle_round_trip() {
    let server = TestServer::start().await;
    assert!(server.page("/").await.contains(r#"<html lang="pt-BR" class="">"#));

    let html = server.submit("/tema", &[("return_to", "/cardapio")]).await;
    assert!(html.contains(r#"<html lang="pt-BR" class="light">"#));
    assert!(html.contains("<h1>Cardápio</h1>"));

    // Preference sticks across pages.
    assert!(server.page("/pedido").await.contains(r#"class="light""#));

    let html = server.submit("/tema", &[("return_to", "/")]).await;
    assert!(html.contains(r#"<html lang="pt-BR" class="">"#));
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_blank_fields() {
    let server = TestServer::start().await;
    let html = server
        .submit("/contato", &[("name", "Ana"), ("email", ""), ("message", "Oi")])
        .await;

    assert_eq!(toast_text(&html), Some("Preencha todos os campos."));
}

#[tokio::test]
async fn test_contact_bad_email() {
    let server = TestServer::start().await;
    let html = server
        .submit(
            "/contato",
            &[("name", "Ana"), ("email", "ana@localhost"), ("message", "Oi")],
        )
        .await;

    assert_eq!(toast_text(&html), Some("Informe um e-mail válido."));
}

#[tokio::test]
async fn test_contact_sent() {
    let server = TestServer::start().await;
    let html = server
        .submit(
            "/contato",
            &[
                ("name", "Ana"),
                ("email", "ana@example.com"),
                ("message", "Vocês fazem entrega?"),
            ],
        )
        .await;

    assert_eq!(
        toast_text(&html),
        Some("🍔 Mensagem enviada! Responderemos em breve.")
    );

    // Shown once.
    assert_eq!(toast_text(&server.page("/contato").await), None);
}
