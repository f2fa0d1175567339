use std::time::Duration;

use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use actix_web_flash_messages::{
    FlashMessagesFramework, IncomingFlashMessages, storage::CookieMessageStore,
};

use trachel_storefront::domain::auth::AuthSession;
use trachel_storefront::domain::types::ApiToken;
use trachel_storefront::domain::user::User;
use trachel_storefront::models::auth::AuthenticatedUser;
use trachel_storefront::models::config::ServerConfig;
use trachel_storefront::repository::ApiRepository;
use trachel_storefront::routes::admin_catalog::{self, upload_form_config};

const SECRET: &str = "upload-limits-secret-upload-limits-secret-upload-limits-secret-0001";
const MAX_BYTES: u64 = 1024;
const BOUNDARY: &str = "----trachel-boundary";
const FORM_PATH: &str = "/dashboard/banner/add";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        templates_dir: "./templates/**/*".to_string(),
        secret: SECRET.to_string(),
        api_base_url: "http://127.0.0.1:9/api/v1".to_string(),
        api_key: "unused".to_string(),
        cache_ttl_secs: 5,
        upload_max_bytes: MAX_BYTES,
    }
}

async fn sign_in(req: HttpRequest) -> HttpResponse {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "u-1",
        "name": "Ana",
        "email": "ana@example.com",
        "role": "admin"
    }))
    .unwrap();
    let session = AuthSession {
        user,
        token: ApiToken::new("tok").unwrap(),
    };
    let jwt = AuthenticatedUser::from_session(&session).to_jwt(SECRET).unwrap();
    Identity::login(&req.extensions(), jwt).unwrap();
    HttpResponse::Ok().finish()
}

async fn show_alerts(messages: IncomingFlashMessages) -> HttpResponse {
    let body = messages
        .iter()
        .map(|message| message.content().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    HttpResponse::Ok().body(body)
}

fn banner_body(file_len: usize) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nBali\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"beach.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&vec![b'x'; file_len]);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn keep_cookies(jar: &mut Vec<Cookie<'static>>, resp: &ServiceResponse) {
    for cookie in resp.response().cookies() {
        jar.retain(|kept| kept.name() != cookie.name());
        jar.push(cookie.into_owned());
    }
}

fn with_cookies(mut req: test::TestRequest, jar: &[Cookie<'static>]) -> test::TestRequest {
    for cookie in jar {
        req = req.cookie(cookie.clone());
    }
    req
}

/// Posts a banner with an image of `file_len` bytes and returns the redirect
/// target together with the alerts shown on the next page.
async fn post_banner_image(file_len: usize) -> (StatusCode, String, String) {
    let key = Key::from(&[9u8; 64]);
    let repo = ApiRepository::new("http://127.0.0.1:9/api/v1", "unused", Duration::from_secs(5))
        .unwrap();
    let app = test::init_service(
        App::new()
            .wrap(
                FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
                    .build(),
            )
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
            .app_data(upload_form_config(MAX_BYTES))
            .app_data(web::Data::new(server_config()))
            .app_data(web::Data::new(repo))
            .service(admin_catalog::create_banner)
            .route("/sign-in", web::get().to(sign_in))
            .route(FORM_PATH, web::get().to(show_alerts)),
    )
    .await;

    let mut jar = Vec::new();
    let resp = app
        .call(test::TestRequest::get().uri("/sign-in").to_request())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    keep_cookies(&mut jar, &resp);

    let req = with_cookies(test::TestRequest::post().uri(FORM_PATH), &jar)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(banner_body(file_len))
        .to_request();
    let resp = app.call(req).await.unwrap();
    let status = resp.status();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    keep_cookies(&mut jar, &resp);

    let req = with_cookies(test::TestRequest::get().uri(FORM_PATH), &jar).to_request();
    let alerts = test::call_and_read_body(&app, req).await;

    (status, location, String::from_utf8_lossy(&alerts).into_owned())
}

#[actix_web::test]
async fn image_over_the_upload_limit_is_flashed_back_to_the_form() {
    let (status, location, alerts) = post_banner_image(2 * MAX_BYTES as usize).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, FORM_PATH);
    assert_eq!(alerts, "Image file too large.");
}

#[actix_web::test]
async fn body_over_the_multipart_limit_gets_the_same_flash() {
    let (status, location, alerts) = post_banner_image(200 * 1024).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, FORM_PATH);
    assert_eq!(alerts, "Image file too large.");
}
