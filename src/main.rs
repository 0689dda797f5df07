use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use chrono::{Datelike, Local};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use workmatrix::config::Config;
use workmatrix::db::init_db;
use workmatrix::docs::ApiDoc;
use workmatrix::routes;
use workmatrix::store::holiday::{HolidayCache, warmup_holiday_cache};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "workmatrix.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let holiday_cache = HolidayCache::new(Duration::from_secs(config.holiday_cache_ttl_secs));
    let protected_limiter = Arc::new(routes::build_limiter(config.rate_protected_per_min)?);

    let pool_for_warmup = pool.clone();
    let cache_for_warmup = holiday_cache.clone();
    actix_web::rt::spawn(async move {
        let year = Local::now().year();
        if let Err(e) = warmup_holiday_cache(&pool_for_warmup, &cache_for_warmup, &[year - 1, year]).await {
            error!(error = %e, "Failed to warm up holiday cache");
        }
    });

    let server_addr = config.server_addr.clone();
    info!(addr = %server_addr, prefix = %config.api_prefix, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                // wildcard {_:.*} so the UI's JS/CSS assets match
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(holiday_cache.clone()))
            .configure(|cfg| routes::configure(cfg, &config.api_prefix, protected_limiter.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
