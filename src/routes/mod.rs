// Route exports
pub mod api;
pub mod pages;

use crate::config::Settings;
use crate::error::AppError;
use crate::services::DirectoryClient;
use crate::views::ViewContext;
use actix_web::web;
use pages::Pages;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub ctx: ViewContext,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(ctx: ViewContext) -> Result<Self, AppError> {
        Ok(Self {
            ctx,
            pages: Arc::new(Pages::load()?),
        })
    }

    /// Build the directory client and view timings from configuration
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        if settings.directory.results == 0 {
            return Err(AppError::Config("directory.results must be at least 1".into()));
        }

        let directory = DirectoryClient::new(
            settings.directory.base_url.clone(),
            settings.directory.nationality.clone(),
            settings.directory.results,
            settings.directory.timeout(),
        )?;

        let mut ctx = ViewContext::new(Arc::new(directory))
            .with_submit_delay(settings.form.submit_delay())
            .with_toast_duration(settings.toast.duration());
        if let Some(seed) = settings.matching.seed {
            ctx = ctx.with_seed(seed);
        }

        Self::new(ctx)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::configure).service(
        web::scope("/api/v1")
            .configure(api::configure),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchesResponse, MessageResponse};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::time::Duration;

    const PAYLOAD: &str = r#"{"results":[
        {"name":{"first":"Camille","last":"Martin"},"location":{"city":"Nantes","country":"France"},"dob":{"age":30},"picture":{"large":"https://randomuser.me/api/portraits/women/1.jpg"}},
        {"name":{"first":"Inès","last":"Petit"},"location":{"city":"Brest","country":"France"},"dob":{"age":27},"picture":{"large":"https://randomuser.me/api/portraits/women/2.jpg"}}
    ]}"#;

    fn state_for(base_url: String) -> AppState {
        let directory = DirectoryClient::new(base_url, "fr".to_string(), 6, None).unwrap();
        let ctx = ViewContext::new(Arc::new(directory))
            .with_submit_delay(Duration::from_millis(1))
            .with_toast_duration(Duration::from_millis(3000))
            .with_seed(3);
        AppState::new(ctx).unwrap()
    }

    #[actix_web::test]
    async fn test_landing_page() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("http://127.0.0.1:9".to_string())))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("href=\"/form\""));
    }

    #[actix_web::test]
    async fn test_result_without_profile_renders_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create_async().await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(server.url())))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/result").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(body.contains("no profile data"));
        assert!(body.contains("href=\"/form\""));
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_invalid_form_post_keeps_values() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("http://127.0.0.1:9".to_string())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/form")
            .set_form([("name", ""), ("surname", "Léa"), ("age", "17"), ("gender", "female")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(body.contains("Name is required"));
        assert!(body.contains("You must be at least 18 years old"));
        assert!(body.contains("value=\"Léa\""));
    }

    #[actix_web::test]
    async fn test_form_post_accepts_prenom() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::UrlEncoded("gender".into(), "male".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAYLOAD)
            .expect(1)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(server.url())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/form")
            .set_form([("name", "Durand"), ("prenom", "Léa"), ("age", "27"), ("gender", "female")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(body.contains("Hello Léa!"));
        assert!(!body.contains("Surname is required"));
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_valid_form_post_renders_cards() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::UrlEncoded("gender".into(), "female".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAYLOAD)
            .expect(1)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(server.url())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/form")
            .set_form([("name", "Durand"), ("surname", "Paul"), ("age", "31"), ("gender", "male")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(body.contains("Hello Paul!"));
        assert_eq!(body.matches("class=\"card\"").count(), 2);
        assert!(body.contains("Inès Petit"));
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_api_matches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("gender".into(), "male".into()),
                mockito::Matcher::UrlEncoded("results".into(), "6".into()),
                mockito::Matcher::UrlEncoded("nat".into(), "fr".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAYLOAD)
            .expect(1)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for(server.url())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches")
            .set_json(json!({"name": "Durand", "surname": "Léa", "age": 27, "gender": "female"}))
            .to_request();
        let resp: MatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_results, 2);
        assert_eq!(resp.matches[0].first_name, "Camille");
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_api_matches_rejects_invalid_draft() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("http://127.0.0.1:9".to_string())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches")
            .set_json(json!({"name": "Durand", "surname": "Léa", "age": "seventeen", "gender": "female"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_api_validate_lists_errors() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("http://127.0.0.1:9".to_string())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/validate")
            .set_json(json!({"name": " ", "surname": "Léa", "age": "40", "gender": "robot"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["valid"], json!(false));
        assert_eq!(body["errors"]["name"], json!("Name is required"));
        assert_eq!(body["errors"]["gender"], json!("Please select your gender"));
        assert!(body["errors"].get("age").is_none());
    }

    #[actix_web::test]
    async fn test_api_message() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_for("http://127.0.0.1:9".to_string())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/messages")
            .set_json(json!({"firstName": "Chloé"}))
            .to_request();
        let resp: MessageResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.message, "Message sent to Chloé! 💕");
        assert_eq!(resp.visible_for_ms, 3000);
    }
}
