use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::routes::{base_context, page_error, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/dashboard")]
pub async fn show_dashboard(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard_service::load_metrics(repo.get_ref(), &user).await {
        Ok(metrics) => {
            let mut context = base_context(&flash_messages, Some(&user), "dashboard");
            context.insert("metrics", &metrics);
            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}
