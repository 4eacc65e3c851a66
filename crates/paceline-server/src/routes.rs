//! Route table. Protected handlers take an [`crate::auth::AuthUser`]
//! argument, which is what enforces the bearer token.

use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(handlers::health::ping))
        .route("/metrics", web::get().to(handlers::health::metrics))
        .service(
            web::scope("/v1")
                .route("/register", web::post().to(handlers::auth::register))
                .route("/login", web::post().to(handlers::auth::login))
                .route("/user", web::get().to(handlers::user::profile))
                .route("/user", web::patch().to(handlers::user::update))
                .route("/activity", web::get().to(handlers::activity::list))
                .route("/activity", web::post().to(handlers::activity::create))
                .route("/activity/{activityId}", web::patch().to(handlers::activity::update))
                .route("/activity/{activityId}", web::delete().to(handlers::activity::delete))
                .route("/file", web::post().to(handlers::file::upload)),
        );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use actix_web::{App, web};
    use object_store::ObjectStore;
    use object_store::memory::InMemory;
    use paceline_db::Db;

    use super::*;
    use crate::auth::Jwt;
    use crate::config::S3Config;
    use crate::state::AppState;

    // Pool creation is lazy, so no database needs to be running; these
    // tests only exercise paths that never reach a connection.
    fn test_state(jwt: &Jwt) -> AppState {
        let db = Db::connect("postgres://app:pw@127.0.0.1:5432/paceline_test", 1)
            .expect("pool config");
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        AppState::new(
            db,
            store,
            jwt.clone(),
            &S3Config {
                bucket: "test-bucket".to_string(),
                region: "test-region".to_string(),
            },
        )
    }

    macro_rules! test_app {
        ($jwt:expr) => {
            init_service(
                App::new()
                    .app_data(web::Data::new(test_state(&$jwt)))
                    .app_data(web::Data::new($jwt.clone()))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn ping_responds_ok() {
        let jwt = Jwt::new("test-secret");
        let app = test_app!(jwt);
        let res = call_service(&app, TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn protected_routes_reject_anonymous_requests() {
        let jwt = Jwt::new("test-secret");
        let app = test_app!(jwt);
        let res = call_service(&app, TestRequest::get().uri("/v1/user").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["message"], "Missing authorization header");
    }

    #[actix_web::test]
    async fn register_validates_before_any_io() {
        let jwt = Jwt::new("test-secret");
        let app = test_app!(jwt);
        let req = TestRequest::post()
            .uri("/v1/register")
            .set_json(serde_json::json!({ "email": "nope", "password": "longenough" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["message"], "validation for 'email' failed");
    }

    #[actix_web::test]
    async fn malformed_activity_id_is_not_found() {
        let jwt = Jwt::new("test-secret");
        let app = test_app!(jwt);
        let token = jwt
            .issue(uuid::Uuid::new_v4(), "runner@example.com")
            .unwrap();
        let req = TestRequest::delete()
            .uri("/v1/activity/not-a-uuid")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["message"], "Activity is not found");
    }
}
