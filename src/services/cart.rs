//! Cart and checkout workflows of the signed-in user.

use crate::domain::cart::{CartItem, NewCartItem, UpdateCartQuantity, selected_subtotal};
use crate::domain::transaction::NewTransaction;
use crate::domain::types::CartItemId;
use crate::dto::cart::{CartLine, CartPageData};
use crate::forms::cart::{AddToCartForm, CartSelection, CheckoutForm, QuantityForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CartReader, CartWriter, PaymentMethodReader, TransactionWriter};
use crate::services::{ServiceError, ServiceResult, failed, universe};

/// Loads the cart with the lines ticked in `selection` and their subtotal.
pub async fn load_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    selection: &CartSelection,
) -> ServiceResult<CartPageData>
where
    R: CartReader + PaymentMethodReader + ?Sized,
{
    let cart = universe(repo.list_cart(&user.token).await, "cart")?;
    let payment_methods = universe(repo.list_payment_methods().await, "payment methods")?;

    let selected = selected_ids(&cart.data, selection);
    let subtotal = selected_subtotal(&cart.data, &selected);
    let all_selected = !cart.data.is_empty() && selected.len() == cart.data.len();

    let lines = cart
        .data
        .into_iter()
        .map(|item| CartLine {
            selected: selected.contains(&item.id),
            line_total: item.line_total(),
            item,
        })
        .collect();

    Ok(CartPageData {
        lines,
        payment_methods: payment_methods.data,
        selected_count: selected.len(),
        all_selected,
        subtotal,
        error: cart.error.or(payment_methods.error),
    })
}

/// Ids of the ticked lines still present in the cart, in cart order.
fn selected_ids(items: &[CartItem], selection: &CartSelection) -> Vec<CartItemId> {
    if selection.select_all() {
        return items.iter().map(|item| item.id.clone()).collect();
    }
    let requested = selection.ids();
    items
        .iter()
        .filter(|item| requested.contains(&item.id))
        .map(|item| item.id.clone())
        .collect()
}

fn parse_cart_item_id(id: &str) -> ServiceResult<CartItemId> {
    CartItemId::new(id).map_err(|_| ServiceError::NotFound)
}

pub async fn add_to_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddToCartForm,
) -> ServiceResult<()>
where
    R: CartWriter + ?Sized,
{
    let item = NewCartItem::try_from(form)?;

    repo.add_to_cart(&user.token, &item)
        .await
        .map_err(failed("add to cart"))
}

pub async fn update_quantity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    cart_item_id: &str,
    form: QuantityForm,
) -> ServiceResult<()>
where
    R: CartWriter + ?Sized,
{
    let id = parse_cart_item_id(cart_item_id)?;
    let update = UpdateCartQuantity::try_from(form)?;

    repo.update_cart_quantity(&user.token, &id, &update)
        .await
        .map_err(failed("update cart quantity"))
}

pub async fn remove_from_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    cart_item_id: &str,
) -> ServiceResult<()>
where
    R: CartWriter + ?Sized,
{
    let id = parse_cart_item_id(cart_item_id)?;

    repo.delete_cart_item(&user.token, &id)
        .await
        .map_err(failed("remove cart item"))
}

/// Books the selected cart lines with the chosen payment method.
pub async fn checkout<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CheckoutForm,
) -> ServiceResult<()>
where
    R: TransactionWriter + ?Sized,
{
    let transaction = NewTransaction::try_from(form)?;

    repo.create_transaction(&user.token, &transaction)
        .await
        .map_err(failed("create transaction"))?;

    log::info!(
        "User {} checked out {} cart item(s)",
        user.sub,
        transaction.cart_ids.len()
    );
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::customer;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "quantity": quantity,
            "activity": {"id": format!("a-{id}"), "price": price}
        }))
        .expect("valid cart item")
    }

    fn repo_with_cart() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_list_cart()
            .returning(|_| Ok(vec![item("1", 100, 2), item("2", 50, 1), item("3", 10, 3)]));
        repo.expect_list_payment_methods().returning(|| Ok(vec![]));
        repo
    }

    #[actix_web::test]
    async fn subtotal_follows_selection() {
        let repo = repo_with_cart();
        let selection = CartSelection::parse("selected=1&selected=3&selected=gone");

        let page = load_cart(&repo, &customer(), &selection).await.unwrap();

        assert_eq!(page.selected_count, 2);
        assert_eq!(page.subtotal, 230);
        assert!(!page.all_selected);
        assert!(page.lines[0].selected);
        assert!(!page.lines[1].selected);
    }

    #[actix_web::test]
    async fn select_all_ticks_every_line() {
        let repo = repo_with_cart();

        let page = load_cart(&repo, &customer(), &CartSelection::parse("all=1"))
            .await
            .unwrap();

        assert!(page.all_selected);
        assert_eq!(page.subtotal, 280);
    }

    #[actix_web::test]
    async fn expired_session_aborts_cart() {
        let mut repo = MockRepository::new();
        repo.expect_list_cart()
            .returning(|_| Err(RepositoryError::Unauthorized("jwt expired".into())));
        repo.expect_list_payment_methods().times(0);

        let result = load_cart(&repo, &customer(), &CartSelection::default()).await;

        assert!(matches!(result, Err(ServiceError::Unauthenticated)));
    }

    #[actix_web::test]
    async fn checkout_requires_payment_method() {
        let mut repo = MockRepository::new();
        repo.expect_create_transaction().times(0);
        let form = CheckoutForm::parse(b"cart_ids=1").unwrap();

        let result = checkout(&repo, &customer(), form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn checkout_sends_selected_lines() {
        let mut repo = MockRepository::new();
        repo.expect_create_transaction()
            .withf(|token, transaction| {
                token.as_str() == "token"
                    && transaction.cart_ids.len() == 2
                    && transaction.payment_method_id.as_str() == "bca"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let form = CheckoutForm::parse(b"cart_ids=1&cart_ids=2&payment_method_id=bca").unwrap();

        checkout(&repo, &customer(), form).await.unwrap();
    }

    #[actix_web::test]
    async fn api_rejection_message_reaches_user() {
        let mut repo = MockRepository::new();
        repo.expect_update_cart_quantity()
            .returning(|_, _, _| Err(RepositoryError::Api("Quantity too high".into())));

        let err = update_quantity(&repo, &customer(), "1", QuantityForm { quantity: 99 })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Quantity too high");
    }
}
