use axum::Router;

pub mod categories;
pub mod health;
pub mod products;

pub const PRODUCTS_PATH: &str = "/products";
pub const CATEGORIES_PATH: &str = "/category";

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest(PRODUCTS_PATH, products::router(state))
        .nest(CATEGORIES_PATH, categories::router(state))
}

/// Router with the /ready endpoint, which pings the database.
///
/// State is already applied, so it merges with the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
