use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use termgraph::config::Config;
use termgraph::{db, seed};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info,actix_server=info"))
        .init();

    let config = Config::from_env()?;
    let listen = config.listen_addr();

    // set up database connection pool
    info!("Opening database: {}", config.database_url);
    let pool = db::build_pool(&config.database_url)?;

    // Schema, then fixtures, before accepting any request
    let mut conn = pool.get().context("could not get db connection from pool")?;
    db::run_migrations(&mut conn)?;
    seed::seed(&mut conn).context("failed to load seed data")?;
    drop(conn);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_header()
            .allow_any_origin()
            .allow_any_method();

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(termgraph::configure)
    })
    .bind(&listen)
    .with_context(|| format!("could not bind {}", listen))?
    .run();

    info!("Server running at http://{}", listen);

    server.await?;
    Ok(())
}
