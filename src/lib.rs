#[cfg(feature = "data")]
pub mod cache;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod listing;
#[cfg(feature = "data")]
pub mod pagination;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::ApiRepository;
    use crate::routes::{
        admin_catalog, admin_transactions, auth, cart, dashboard, register_filters, storefront,
        transactions, users,
    };

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = ApiRepository::from_config(&server_config).map_err(|e| {
            std::io::Error::other(format!("Failed to build travel API client: {e}"))
        })?;

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let mut tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
        register_filters(&mut tera);

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Starting storefront on {}:{} against {}",
            bind_address.0,
            bind_address.1,
            server_config.api_base_url
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(storefront::show_home)
                .service(storefront::show_activities)
                .service(storefront::show_activity)
                .service(storefront::show_category)
                .service(storefront::show_promo)
                .service(auth::show_login)
                .service(auth::login)
                .service(auth::show_register)
                .service(auth::register)
                .service(auth::logout)
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(cart::add_to_cart)
                        .service(cart::show_cart)
                        .service(cart::checkout)
                        .service(cart::update_quantity)
                        .service(cart::remove_from_cart)
                        .service(transactions::show_transactions)
                        .service(transactions::show_transaction)
                        .service(transactions::cancel_transaction)
                        .service(dashboard::show_dashboard)
                        .service(users::show_users)
                        .service(users::update_role)
                        .service(admin_transactions::show_transactions)
                        .service(admin_transactions::show_transaction)
                        .service(admin_transactions::update_status)
                        .service(admin_catalog::show_banners)
                        .service(admin_catalog::new_banner)
                        .service(admin_catalog::create_banner)
                        .service(admin_catalog::refresh_banners)
                        .service(admin_catalog::edit_banner)
                        .service(admin_catalog::update_banner)
                        .service(admin_catalog::delete_banner)
                        .service(admin_catalog::show_categories)
                        .service(admin_catalog::new_category)
                        .service(admin_catalog::create_category)
                        .service(admin_catalog::refresh_categories)
                        .service(admin_catalog::edit_category)
                        .service(admin_catalog::update_category)
                        .service(admin_catalog::delete_category)
                        .service(admin_catalog::show_promos)
                        .service(admin_catalog::new_promo)
                        .service(admin_catalog::create_promo)
                        .service(admin_catalog::refresh_promos)
                        .service(admin_catalog::edit_promo)
                        .service(admin_catalog::update_promo)
                        .service(admin_catalog::delete_promo)
                        .service(admin_catalog::show_activities)
                        .service(admin_catalog::new_activity)
                        .service(admin_catalog::create_activity)
                        .service(admin_catalog::refresh_activities)
                        .service(admin_catalog::edit_activity)
                        .service(admin_catalog::update_activity)
                        .service(admin_catalog::delete_activity),
                )
                .app_data(admin_catalog::upload_form_config(
                    server_config.upload_max_bytes,
                ))
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
