//! Public storefront pages. A session is optional.

use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::listing::ListParams;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::routes::{base_context, extend_context, page_error, render_template};
use crate::services::catalog as catalog_service;

#[get("/")]
pub async fn show_home(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_home(repo.get_ref()).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "home");
            extend_context(&mut context, &data);
            render_template(&tera, "storefront/home.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}

#[get("/activity")]
pub async fn show_activities(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_activity_catalog(repo.get_ref(), &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "activity");
            extend_context(&mut context, &data);
            render_template(&tera, "storefront/activities.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}

#[get("/activity/{activity_id}")]
pub async fn show_activity(
    req: HttpRequest,
    activity_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_activity(repo.get_ref(), &activity_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "activity");
            extend_context(&mut context, &data);
            render_template(&tera, "storefront/activity.html", &context)
        }
        Err(err) => page_error(&req, err, "/activity"),
    }
}

#[get("/category/{category_id}")]
pub async fn show_category(
    req: HttpRequest,
    category_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_category(repo.get_ref(), &category_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "category");
            extend_context(&mut context, &data);
            render_template(&tera, "storefront/category.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}

#[get("/promo/{promo_id}")]
pub async fn show_promo(
    req: HttpRequest,
    promo_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_promo(repo.get_ref(), &promo_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "promo");
            extend_context(&mut context, &data);
            render_template(&tera, "storefront/promo.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}
