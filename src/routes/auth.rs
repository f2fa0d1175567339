use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, mutation_error, redirect, render_template};
use crate::services::auth as auth_service;

#[get("/login")]
pub async fn show_login(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }
    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let user = match auth_service::login(repo.get_ref(), form).await {
        Ok(user) => user,
        Err(err) => return mutation_error(&req, err, "/login"),
    };

    let token = match user.to_jwt(&server_config.secret) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Failed to sign session token: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), token) {
        log::error!("Failed to store identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    FlashMessage::success(format!("Welcome back, {}.", user.name)).send();
    redirect(if user.is_admin() { "/dashboard" } else { "/" })
}

#[get("/register")]
pub async fn show_register(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }
    let context = base_context(&flash_messages, None, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match auth_service::register(repo.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("Account created, you can log in now.").send();
            redirect("/login")
        }
        Err(err) => mutation_error(&req, err, "/register"),
    }
}

#[post("/logout")]
pub async fn logout(
    user: Option<AuthenticatedUser>,
    identity: Option<Identity>,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    if let Some(user) = user {
        auth_service::logout(repo.get_ref(), &user).await;
    }
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/")
}
