use axum::Router;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub async fn create_test_app() -> Router {
    std::env::set_var("NODE_ENV", "test");
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    std::env::remove_var("DATABASE_URL");

    cihui_backend_rust::create_app().await
}

pub fn valid_token(user_id: &str) -> String {
    cihui_backend_rust::auth::sign_token(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("token signing failed")
}
