use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use paceline_server::auth::Jwt;
use paceline_server::config::AppConfig;
use paceline_server::error::ApiError;
use paceline_server::state::AppState;
use paceline_server::{routes, storage, telemetry};
use tracing::info;

mod embedded {
    refinery::embed_migrations!("./migrations");
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;
    let metrics_handle = telemetry::init_metrics()?;

    let db = paceline_db::Db::connect(&config.database_url, config.pool_size)?;
    db.ping().await?;
    db.run_migrations(embedded::migrations::runner()).await?;
    info!("database ready");

    let store = storage::build_store(&config.s3)?;
    let jwt = Jwt::new(&config.jwt_secret);
    let state = AppState::new(db, store, jwt.clone(), &config.s3);

    info!(addr = %config.bind_addr, "starting http server");
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt.clone()))
            .app_data(web::Data::new(metrics_handle.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::bad_request(err.to_string()).into()
            }))
            .wrap(telemetry::RequestMetrics)
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;
    Ok(())
}
