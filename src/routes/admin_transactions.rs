use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::transactions::TransactionStatusForm;
use crate::listing::ListParams;
use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, extend_context, mutation_error, page_error, redirect, render_template,
};
use crate::services::admin_transactions as admin_transactions_service;

#[get("/dashboard/transaksi")]
pub async fn show_transactions(
    req: HttpRequest,
    params: web::Query<ListParams>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_transactions_service::load_transactions(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "transaksi");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/transactions.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard"),
    }
}

#[get("/dashboard/transaksi/{transaction_id}")]
pub async fn show_transaction(
    req: HttpRequest,
    transaction_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_transactions_service::load_transaction(repo.get_ref(), &user, &transaction_id)
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "transaksi");
            extend_context(&mut context, &data);
            render_template(&tera, "dashboard/transaction.html", &context)
        }
        Err(err) => page_error(&req, err, "/dashboard/transaksi"),
    }
}

#[post("/dashboard/transaksi/{transaction_id}/status")]
pub async fn update_status(
    req: HttpRequest,
    transaction_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<TransactionStatusForm>,
) -> impl Responder {
    let back = format!("/dashboard/transaksi/{transaction_id}");

    match admin_transactions_service::update_status(repo.get_ref(), &user, &transaction_id, form)
        .await
    {
        Ok(()) => {
            FlashMessage::success("Transaction status updated.").send();
            redirect(&back)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}
