//! Back-office catalog screens. Every kind has a list, an add/edit form,
//! delete and an explicit cache refresh. Add and edit posts are multipart so
//! they can carry new images.

use actix_multipart::MultipartError;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::error::{InternalError, PayloadError};
use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::upload::UploadError;
use crate::forms::catalog::{ActivityForm, CatalogEntryForm, PromoForm};
use crate::listing::ListParams;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{ApiRepository, ListKind};
use crate::routes::{
    base_context, extend_context, mutation_error, page_error, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::admin_catalog as catalog_service;

const BANNER_PATH: &str = "/dashboard/banner";

const CATEGORY_PATH: &str = "/dashboard/category";

const PROMO_PATH: &str = "/dashboard/promo";

const ACTIVITY_PATH: &str = "/dashboard/activity";

/// Files one catalog post may carry before the whole body is refused.
const FILES_PER_POST: u64 = 4;

/// Room for the text fields and multipart framing around the files.
const FORM_HEADROOM_BYTES: u64 = 64 * 1024;

/// Body limits of the multipart catalog forms.
///
/// Single files over `upload_max_bytes` are rejected by the form itself;
/// bodies past the total limit never reach the handler and get the same
/// "file too large" flash, sent back to the form they came from.
pub fn upload_form_config(upload_max_bytes: u64) -> MultipartFormConfig {
    let total = upload_max_bytes
        .saturating_mul(FILES_PER_POST)
        .saturating_add(FORM_HEADROOM_BYTES);
    MultipartFormConfig::default()
        .total_limit(usize::try_from(total).unwrap_or(usize::MAX))
        .error_handler(upload_form_error)
}

fn upload_form_error(err: MultipartError, req: &HttpRequest) -> actix_web::Error {
    let message = if matches!(err, MultipartError::Payload(PayloadError::Overflow)) {
        ServiceError::from(UploadError::FileTooLarge).user_message()
    } else {
        log::warn!("Rejected multipart body on {}: {err}", req.path());
        ServiceError::from(UploadError::Failed).user_message()
    };
    FlashMessage::error(message).send();
    InternalError::from_response(err, redirect(req.path())).into()
}

#[get("/dashboard/banner")]
pub async fn show_banners(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_banners(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "banner");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/banners.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard"),
    }
}

#[get("/dashboard/banner/add")]
pub async fn new_banner(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_banner_form(repo.get_ref(), &user, None).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "banner");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/banner_form.html", &context)
        }
        Err(err) => page_error(&req, err, BANNER_PATH),
    }
}

#[post("/dashboard/banner/add")]
pub async fn create_banner(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<CatalogEntryForm>,
) -> impl Responder {
    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, upload)) => {
            catalog_service::create_banner(repo.get_ref(), &user, input, upload).await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Banner added.").send();
            redirect(BANNER_PATH)
        }
        Err(err) => mutation_error(&req, err, "/dashboard/banner/add"),
    }
}

#[post("/dashboard/banner/refresh")]
pub async fn refresh_banners(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::refresh_list(repo.get_ref(), &user, ListKind::Banners) {
        Ok(()) => redirect(BANNER_PATH),
        Err(err) => mutation_error(&req, err, BANNER_PATH),
    }
}

#[get("/dashboard/banner/{banner_id}")]
pub async fn edit_banner(
    req: HttpRequest,
    banner_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_banner_form(repo.get_ref(), &user, Some(banner_id.as_str()))
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "banner");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/banner_form.html", &context)
        }
        Err(err) => page_error(&req, err, BANNER_PATH),
    }
}

#[post("/dashboard/banner/{banner_id}")]
pub async fn update_banner(
    req: HttpRequest,
    banner_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<CatalogEntryForm>,
) -> impl Responder {
    let back = format!("/dashboard/banner/{banner_id}");

    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, upload)) => {
            catalog_service::update_banner(repo.get_ref(), &user, &banner_id, input, upload)
                .await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Banner updated.").send();
            redirect(BANNER_PATH)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}

#[post("/dashboard/banner/{banner_id}/delete")]
pub async fn delete_banner(
    req: HttpRequest,
    banner_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::delete_banner(repo.get_ref(), &user, &banner_id).await {
        Ok(()) => {
            FlashMessage::success("Banner deleted.").send();
            redirect(BANNER_PATH)
        }
        Err(err) => mutation_error(&req, err, BANNER_PATH),
    }
}

#[get("/dashboard/category")]
pub async fn show_categories(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_categories(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "category");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/categories.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard"),
    }
}

#[get("/dashboard/category/add")]
pub async fn new_category(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_category_form(repo.get_ref(), &user, None).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "category");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/category_form.html", &context)
        }
        Err(err) => page_error(&req, err, CATEGORY_PATH),
    }
}

#[post("/dashboard/category/add")]
pub async fn create_category(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<CatalogEntryForm>,
) -> impl Responder {
    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, upload)) => {
            catalog_service::create_category(repo.get_ref(), &user, input, upload).await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Category added.").send();
            redirect(CATEGORY_PATH)
        }
        Err(err) => mutation_error(&req, err, "/dashboard/category/add"),
    }
}

#[post("/dashboard/category/refresh")]
pub async fn refresh_categories(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::refresh_list(repo.get_ref(), &user, ListKind::Categories) {
        Ok(()) => redirect(CATEGORY_PATH),
        Err(err) => mutation_error(&req, err, CATEGORY_PATH),
    }
}

#[get("/dashboard/category/{category_id}")]
pub async fn edit_category(
    req: HttpRequest,
    category_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_category_form(repo.get_ref(), &user, Some(category_id.as_str()))
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "category");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/category_form.html", &context)
        }
        Err(err) => page_error(&req, err, CATEGORY_PATH),
    }
}

#[post("/dashboard/category/{category_id}")]
pub async fn update_category(
    req: HttpRequest,
    category_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<CatalogEntryForm>,
) -> impl Responder {
    let back = format!("/dashboard/category/{category_id}");

    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, upload)) => {
            catalog_service::update_category(repo.get_ref(), &user, &category_id, input, upload)
                .await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Category updated.").send();
            redirect(CATEGORY_PATH)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}

#[post("/dashboard/category/{category_id}/delete")]
pub async fn delete_category(
    req: HttpRequest,
    category_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::delete_category(repo.get_ref(), &user, &category_id).await {
        Ok(()) => {
            FlashMessage::success("Category deleted.").send();
            redirect(CATEGORY_PATH)
        }
        Err(err) => mutation_error(&req, err, CATEGORY_PATH),
    }
}

#[get("/dashboard/promo")]
pub async fn show_promos(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_promos(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "promo");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/promos.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard"),
    }
}

#[get("/dashboard/promo/add")]
pub async fn new_promo(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_promo_form(repo.get_ref(), &user, None).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "promo");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/promo_form.html", &context)
        }
        Err(err) => page_error(&req, err, PROMO_PATH),
    }
}

#[post("/dashboard/promo/add")]
pub async fn create_promo(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<PromoForm>,
) -> impl Responder {
    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, upload)) => {
            catalog_service::create_promo(repo.get_ref(), &user, input, upload).await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Promo added.").send();
            redirect(PROMO_PATH)
        }
        Err(err) => mutation_error(&req, err, "/dashboard/promo/add"),
    }
}

#[post("/dashboard/promo/refresh")]
pub async fn refresh_promos(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::refresh_list(repo.get_ref(), &user, ListKind::Promos) {
        Ok(()) => redirect(PROMO_PATH),
        Err(err) => mutation_error(&req, err, PROMO_PATH),
    }
}

#[get("/dashboard/promo/{promo_id}")]
pub async fn edit_promo(
    req: HttpRequest,
    promo_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_promo_form(repo.get_ref(), &user, Some(promo_id.as_str()))
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "promo");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/promo_form.html", &context)
        }
        Err(err) => page_error(&req, err, PROMO_PATH),
    }
}

#[post("/dashboard/promo/{promo_id}")]
pub async fn update_promo(
    req: HttpRequest,
    promo_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<PromoForm>,
) -> impl Responder {
    let back = format!("/dashboard/promo/{promo_id}");

    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, upload)) => {
            catalog_service::update_promo(repo.get_ref(), &user, &promo_id, input, upload)
                .await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Promo updated.").send();
            redirect(PROMO_PATH)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}

#[post("/dashboard/promo/{promo_id}/delete")]
pub async fn delete_promo(
    req: HttpRequest,
    promo_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::delete_promo(repo.get_ref(), &user, &promo_id).await {
        Ok(()) => {
            FlashMessage::success("Promo deleted.").send();
            redirect(PROMO_PATH)
        }
        Err(err) => mutation_error(&req, err, PROMO_PATH),
    }
}

#[get("/dashboard/activity")]
pub async fn show_activities(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::list_activities(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "activity");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/activities.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard"),
    }
}

#[get("/dashboard/activity/add")]
pub async fn new_activity(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_activity_form(repo.get_ref(), &user, None).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "activity");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/activity_form.html", &context)
        }
        Err(err) => page_error(&req, err, ACTIVITY_PATH),
    }
}

#[post("/dashboard/activity/add")]
pub async fn create_activity(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<ActivityForm>,
) -> impl Responder {
    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, uploads)) => {
            catalog_service::create_activity(repo.get_ref(), &user, input, uploads).await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Activity added.").send();
            redirect(ACTIVITY_PATH)
        }
        Err(err) => mutation_error(&req, err, "/dashboard/activity/add"),
    }
}

#[post("/dashboard/activity/refresh")]
pub async fn refresh_activities(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::refresh_list(repo.get_ref(), &user, ListKind::Activities) {
        Ok(()) => redirect(ACTIVITY_PATH),
        Err(err) => mutation_error(&req, err, ACTIVITY_PATH),
    }
}

#[get("/dashboard/activity/{activity_id}")]
pub async fn edit_activity(
    req: HttpRequest,
    activity_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_activity_form(repo.get_ref(), &user, Some(activity_id.as_str()))
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "activity");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/activity_form.html", &context)
        }
        Err(err) => page_error(&req, err, ACTIVITY_PATH),
    }
}

#[post("/dashboard/activity/{activity_id}")]
pub async fn update_activity(
    req: HttpRequest,
    activity_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<ActivityForm>,
) -> impl Responder {
    let back = format!("/dashboard/activity/{activity_id}");

    let result = match form.into_parts(server_config.upload_max_bytes) {
        Ok((input, uploads)) => {
            catalog_service::update_activity(repo.get_ref(), &user, &activity_id, input, uploads)
                .await
        }
        Err(err) => Err(ServiceError::from(err)),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Activity updated.").send();
            redirect(ACTIVITY_PATH)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}

#[post("/dashboard/activity/{activity_id}/delete")]
pub async fn delete_activity(
    req: HttpRequest,
    activity_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match catalog_service::delete_activity(repo.get_ref(), &user, &activity_id).await {
        Ok(()) => {
            FlashMessage::success("Activity deleted.").send();
            redirect(ACTIVITY_PATH)
        }
        Err(err) => mutation_error(&req, err, ACTIVITY_PATH),
    }
}
