extern crate actix_web_validator;
extern crate diesel_migrations;
extern crate dotenv;

pub mod api;
pub mod config;
pub mod db;
pub mod response;
pub mod schema;
pub mod seed;
pub mod views;

#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
pub use diesel::sqlite::SqliteConnection;

pub type DBPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DBPooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Register every route of the service, and extractor error handlers that
/// answer with the same `{"detail"}` body as [`response::ApiError`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(response::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(response::query_error_handler))
        .app_data(web::FormConfig::default().error_handler(response::form_error_handler))
        .app_data(
            actix_web_validator::JsonConfig::default()
                .error_handler(response::validation_error_handler),
        );

    cfg.service(api::pages::index)
        .service(api::pages::add)
        .service(api::pages::terms)
        .service(api::pages::edit)
        .service(api::pages::scripts)
        .service(api::term::create)
        .service(api::term::get)
        .service(api::term::update)
        .service(api::term::delete)
        .service(api::search::search_page)
        .service(api::search::search_submit)
        .service(api::relation::add_relation_page)
        .service(api::relation::create)
        .service(api::relation::list)
        .service(api::graph::graph_page)
        .service(api::graph::graph_data)
        .service(api::health::health_check)
        .service(api::health::readiness_check)
        .service(api::health::liveness_check);
}
