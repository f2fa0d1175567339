use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::user::UserRole;
use crate::forms::users::UserRoleForm;
use crate::listing::ListParams;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, extend_context, mutation_error, page_error, redirect, render_template,
};
use crate::services::users as users_service;

const USERS_PATH: &str = "/dashboard/users";

#[get("/dashboard/users")]
pub async fn show_users(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match users_service::load_users(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "users");
            extend_context(&mut context, &data);
            context.insert("roles", &UserRole::ALL);
            render_template(&tera, "dashboard/users.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard"),
    }
}

#[post("/dashboard/users/{user_id}/role")]
pub async fn update_role(
    req: HttpRequest,
    user_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<UserRoleForm>,
) -> impl Responder {
    match users_service::update_role(repo.get_ref(), &user, &user_id, form).await {
        Ok(()) => {
            FlashMessage::success("Role updated.").send();
            redirect(USERS_PATH)
        }
        Err(err) => mutation_error(&req, err, USERS_PATH),
    }
}
