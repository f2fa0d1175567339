//! HTTP handlers and the helpers they share.

use std::collections::HashMap;

use actix_identity::IdentityExt;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::domain::transaction::TransactionStatus;
use crate::domain::types::format_idr;
use crate::middleware::LOGIN_PATH;
use crate::models::auth::AuthenticatedUser;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

pub mod admin_catalog;
pub mod admin_transactions;
pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod storefront;
pub mod transactions;
pub mod users;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: alerts, the signed-in user and the
/// navigation entry to highlight.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user.map(AuthenticatedUser::view));
    context.insert("current_page", current_page);
    context
}

/// Inserts every field of `data` into `context`.
pub fn extend_context<T: Serialize>(context: &mut Context, data: &T) {
    match Context::from_serialize(data) {
        Ok(extra) => context.extend(extra),
        Err(err) => log::error!("Failed to serialize page data: {err}"),
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Drops the local identity and sends the user to the login page.
fn expire_session(req: &HttpRequest) -> HttpResponse {
    if let Ok(identity) = req.get_identity() {
        identity.logout();
    }
    FlashMessage::warning(ServiceError::Unauthenticated.user_message()).send();
    redirect(LOGIN_PATH)
}

/// Response for a page that could not be loaded. Missing entries send the
/// user to `fallback`; unexpected failures are a 500.
pub fn page_error(req: &HttpRequest, err: ServiceError, fallback: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(err.user_message()).send();
            redirect("/")
        }
        ServiceError::Unauthenticated => expire_session(req),
        ServiceError::NotFound => {
            FlashMessage::error(err.user_message()).send();
            redirect(fallback)
        }
        err => {
            log::error!("Failed to load {}: {err}", req.path());
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Response for a failed form post: flash the reason and go `back`.
pub fn mutation_error(req: &HttpRequest, err: ServiceError, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error(err.user_message()).send();
            redirect("/")
        }
        ServiceError::Unauthenticated => expire_session(req),
        ServiceError::Repository(ref inner) if !matches!(inner, RepositoryError::Api(_)) => {
            log::error!("{} {} failed: {err}", req.method(), req.path());
            FlashMessage::error(err.user_message()).send();
            redirect(back)
        }
        err => {
            FlashMessage::error(err.user_message()).send();
            redirect(back)
        }
    }
}

/// `{{ amount | idr }}` renders `Rp 1.250.000`.
fn idr_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let amount = value
        .as_i64()
        .or_else(|| value.as_f64().map(|amount| amount as i64))
        .ok_or_else(|| tera::Error::msg("idr filter expects a number"))?;
    Ok(Value::String(format_idr(amount)))
}

fn status_of(value: &Value) -> TransactionStatus {
    TransactionStatus::parse(value.as_str().unwrap_or_default())
}

/// `{{ transaction.status | status_label }}`
fn status_label_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(status_of(value).label()))
}

/// `{{ transaction.status | status_badge }}`
fn status_badge_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(status_of(value).badge_class().to_string()))
}

/// Registers the storefront's custom Tera filters.
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("idr", idr_filter);
    tera.register_filter("status_label", status_label_filter);
    tera.register_filter("status_badge", status_badge_filter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_format_amounts_and_statuses() {
        let mut tera = Tera::default();
        register_filters(&mut tera);
        tera.add_raw_template(
            "t",
            "{{ amount | idr }}|{{ status | status_label }}|{{ status | status_badge }}",
        )
        .unwrap();

        let mut context = Context::new();
        context.insert("amount", &1_250_000);
        context.insert("status", "SUCCESS");

        assert_eq!(
            tera.render("t", &context).unwrap(),
            format!("{}|Success|badge-success", format_idr(1_250_000))
        );
    }

    #[test]
    fn redirect_sets_location() {
        let response = redirect("/login");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
