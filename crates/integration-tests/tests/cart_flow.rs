//! Cart and checkout flows through the HTTP surface.
//!
//! Each test checks both the rendered pages and the value the cart wrote to
//! its store.

use axum::http::StatusCode;
use goblin_store_core::{MemoryStore, PRODUCTS_KEY, Price, Product};
use goblin_store_integration_tests::{TestContext, product_foo, sample_catalog};
use goblin_store_storefront::catalog::CatalogState;

fn seeded(products: &[Product]) -> TestContext {
    let json = serde_json::to_string(products).unwrap_or_default();
    let store = MemoryStore::new().with_entry(PRODUCTS_KEY, &json);
    TestContext::with(store, CatalogState::ready(sample_catalog()))
}

fn persisted(ctx: &TestContext) -> Vec<Product> {
    ctx.store
        .last_write(PRODUCTS_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

const CHECKOUT_FORM: [(&str, &str); 3] = [
    ("name", "Grub"),
    ("email", "grub@caves.example"),
    ("address", "Under the bridge 3"),
];

#[tokio::test]
async fn add_to_cart_persists_and_redirects() {
    let ctx = TestContext::new();

    let resp = ctx.post_product("/cart/add", &product_foo()).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));
    assert_eq!(
        ctx.store.last_write(PRODUCTS_KEY).as_deref(),
        Some(r#"[{"name":"Product foo","price":55,"image":"/test.jpg"}]"#)
    );
    assert_eq!(ctx.state.cart().products(), vec![product_foo()]);
}

#[tokio::test]
async fn added_products_show_on_cart_page() {
    let ctx = TestContext::new();
    ctx.post_product("/cart/add", &product_foo()).await;
    ctx.post_product("/cart/add", &product_foo()).await;

    let resp = ctx.get("/cart").await;

    assert!(resp.body.contains("Product foo"));
    assert!(resp.body.contains("Total: 110 Zm"));
    assert!(resp.body.contains("Cart (2)"));
}

#[tokio::test]
async fn add_rejects_invalid_price() {
    let ctx = TestContext::new();

    let resp = ctx
        .post_form(
            "/cart/add",
            &[("name", "Product foo"), ("price", "lots"), ("image", "/test.jpg")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(ctx.store.writes().is_empty());
}

#[tokio::test]
async fn add_rejects_oversized_price() {
    let ctx = TestContext::new();
    let fields = [
        ("name", "Product foo"),
        ("price", "79228162514264337593543950335"),
        ("image", "/test.jpg"),
    ];

    for _ in 0..2 {
        let resp = ctx.post_form("/cart/add", &fields).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    assert!(ctx.store.writes().is_empty());
    assert_eq!(ctx.get("/cart").await.status, StatusCode::OK);
    assert_eq!(ctx.get("/checkout").await.status, StatusCode::OK);
}

#[tokio::test]
async fn hydrated_cart_is_shown() {
    let ctx = seeded(&[product_foo()]);

    let resp = ctx.get("/cart").await;

    assert!(resp.body.contains("Product foo"));
    assert!(resp.body.contains("Total: 55 Zm"));
    assert!(ctx.store.writes().is_empty());
}

#[tokio::test]
async fn remove_last_product_persists_empty_list() {
    let ctx = seeded(&[product_foo()]);

    let resp = ctx.post_product("/cart/remove", &product_foo()).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/cart"));
    assert_eq!(ctx.store.last_write(PRODUCTS_KEY).as_deref(), Some("[]"));
    assert!(ctx.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn remove_takes_one_unit_of_duplicates() {
    let potion = Product::new("Potion", Price::whole(21), "/potion.png");
    let ctx = seeded(&[potion.clone(), product_foo(), potion.clone()]);

    ctx.post_product("/cart/remove", &potion).await;

    assert_eq!(persisted(&ctx), vec![product_foo(), potion]);
    assert_eq!(ctx.state.cart().total_price(), Price::whole(76));
}

#[tokio::test]
async fn clear_cart_always_writes_empty_list() {
    let potion = Product::new("Potion", Price::whole(21), "/potion.png");
    let ctx = seeded(&[potion.clone(), potion]);

    ctx.post_form("/cart/clear", &[]).await;
    ctx.post_form("/cart/clear", &[]).await;

    assert!(ctx.state.cart().products().is_empty());
    assert_eq!(
        ctx.store.writes(),
        vec![
            (PRODUCTS_KEY.to_string(), "[]".to_string()),
            (PRODUCTS_KEY.to_string(), "[]".to_string()),
        ]
    );
}

#[tokio::test]
async fn checkout_lists_cart_products() {
    let bar = Product::new("Product bar", Price::whole(10), "/image.png");
    let ctx = seeded(&[product_foo(), bar]);

    let resp = ctx.get("/checkout").await;

    assert!(resp.body.contains("Product foo"));
    assert!(resp.body.contains("Product bar"));
    assert!(resp.body.contains("Total: 65 Zm"));
}

#[tokio::test]
async fn placing_order_clears_cart_and_shows_summary() {
    let ctx = seeded(&[product_foo()]);

    let resp = ctx.post_form("/checkout", &CHECKOUT_FORM).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/order"));
    assert_eq!(ctx.store.last_write(PRODUCTS_KEY).as_deref(), Some("[]"));

    let summary = ctx.get("/order").await;
    assert!(summary.body.contains("Thank you for your order, Grub!"));
    assert!(summary.body.contains("Product foo"));
    assert!(summary.body.contains("Total: 55 Zm"));
    assert!(summary.body.contains("Cart (0)"));
}

#[tokio::test]
async fn checkout_rejects_empty_cart() {
    let ctx = TestContext::new();

    let resp = ctx.post_form("/checkout", &CHECKOUT_FORM).await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Your cart is empty"));
    assert!(ctx.state.last_order().await.is_none());
}

#[tokio::test]
async fn checkout_rejects_invalid_email_and_keeps_cart() {
    let ctx = seeded(&[product_foo()]);

    let resp = ctx
        .post_form(
            "/checkout",
            &[
                ("name", "Grub"),
                ("email", "grub"),
                ("address", "Under the bridge 3"),
            ],
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Invalid email address"));
    assert!(resp.body.contains("value=\"Grub\""));
    assert_eq!(ctx.state.cart().products(), vec![product_foo()]);
    assert!(ctx.store.writes().is_empty());
}

#[tokio::test]
async fn store_failure_is_reported_but_cart_keeps_product() {
    let ctx = TestContext::with(
        MemoryStore::with_quota(8),
        CatalogState::ready(sample_catalog()),
    );

    let resp = ctx.post_product("/cart/add", &product_foo()).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ctx.state.cart().products(), vec![product_foo()]);
    assert!(ctx.store.writes().is_empty());
}
