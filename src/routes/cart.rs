use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::cart::{AddToCartForm, CartSelection, CheckoutForm, QuantityForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, extend_context, mutation_error, page_error, redirect, render_template,
};
use crate::services::cart as cart_service;

const CART_PATH: &str = "/user/cart";

#[get("/user/cart")]
pub async fn show_cart(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let selection = CartSelection::parse(req.query_string());

    match cart_service::load_cart(repo.get_ref(), &user, &selection).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "cart");
            extend_context(&mut context, &data);
            render_template(&tera, "cart/index.html", &context)
        }
        Err(err) => page_error(&req, err, "/"),
    }
}

#[post("/cart/add")]
pub async fn add_to_cart(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<AddToCartForm>,
) -> impl Responder {
    let back = format!("/activity/{}", form.activity_id.trim());

    match cart_service::add_to_cart(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Added to cart.").send();
            redirect(CART_PATH)
        }
        Err(err) => mutation_error(&req, err, &back),
    }
}

#[post("/user/cart/{cart_item_id}/quantity")]
pub async fn update_quantity(
    req: HttpRequest,
    cart_item_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<QuantityForm>,
) -> impl Responder {
    match cart_service::update_quantity(repo.get_ref(), &user, &cart_item_id, form).await {
        Ok(()) => redirect(CART_PATH),
        Err(err) => mutation_error(&req, err, CART_PATH),
    }
}

#[post("/user/cart/{cart_item_id}/delete")]
pub async fn remove_from_cart(
    req: HttpRequest,
    cart_item_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match cart_service::remove_from_cart(repo.get_ref(), &user, &cart_item_id).await {
        Ok(()) => {
            FlashMessage::success("Removed from cart.").send();
            redirect(CART_PATH)
        }
        Err(err) => mutation_error(&req, err, CART_PATH),
    }
}

#[post("/user/cart/checkout")]
pub async fn checkout(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = match CheckoutForm::parse(&body) {
        Ok(form) => cart_service::checkout(repo.get_ref(), &user, form).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => {
            FlashMessage::success("Order placed, complete the payment to confirm it.").send();
            redirect("/user/transaksi")
        }
        Err(err) => mutation_error(&req, err, CART_PATH),
    }
}
