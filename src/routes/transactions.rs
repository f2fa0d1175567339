use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::listing::ListParams;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, extend_context, mutation_error, page_error, redirect, render_template,
};
use crate::services::transactions as transactions_service;

#[get("/user/transaksi")]
pub async fn show_transactions(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match transactions_service::load_my_transactions(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "transactions");
            extend_context(&mut context, &data);
            render_template(&tera, "transactions/index.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}

#[get("/user/transaksi/{transaction_id}")]
pub async fn show_transaction(
    req: HttpRequest,
    transaction_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match transactions_service::load_my_transaction(repo.get_ref(), &user, &transaction_id).await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "transactions");
            extend_context(&mut context, &data);
            render_template(&tera, "transactions/detail.html", &context)
        }
        Err(err) => page_error(&req, err, "/user/transaksi"),
    }
}

#[post("/user/transaksi/{transaction_id}/cancel")]
pub async fn cancel_transaction(
    req: HttpRequest,
    transaction_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    let back = format!("/user/transaksi/{transaction_id}");

    match transactions_service::cancel_transaction(repo.get_ref(), &user, &transaction_id).await {
        Ok(()) => {
            FlashMessage::success("Transaction cancelled.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}
