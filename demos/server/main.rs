use actix_cors::Cors;
use actix_web::{
    http::{header, uri::Uri},
    middleware::Logger as ActixLogger,
    web, App, HttpResponse, HttpServer, Responder,
};
use cancel_cloud_subscriptions::{
    logger::setup_logger, Account, CancelCloudSubscriptionsService, Config, StripeClient,
};
use dotenvy::dotenv;
use log::{error, info, warn};
use std::{env as stdenv, path::Path, process::exit};

mod cors;
use crate::cors::*;
mod env;
use crate::env::*;

struct AppState {
    config: Config,
    stripe: StripeClient,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

async fn cancel_cloud_subscriptions(
    state: web::Data<AppState>,
    account: web::Json<Account>,
) -> impl Responder {
    let service =
        CancelCloudSubscriptionsService::new(&account, state.config.deployment, &state.stripe);
    match service.async_perform().await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("account {}: {}", account.id, e);
            HttpResponse::BadGateway().body(format!("Error: {}", e))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    setup_logger();
    load_env_file();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            exit(1);
        }
    };
    info!("{:?}", config);

    let target_server = format!(
        "{}:{}",
        load_env_var("HOST", "127.0.0.1"),
        load_env_var("PORT", "8081")
    );
    let cors_origins = parse_cors_origins(&load_env_var("CORS_ORIGINS", ""));
    info!("Allowed cors_origins: {:?}", cors_origins);

    let state = web::Data::new(AppState {
        stripe: StripeClient::from_config(&config),
        config,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(ActixLogger::default())
            .wrap(build_cors(&cors_origins))
            .route("/health", web::get().to(health))
            .route(
                "/accounts/cancel_cloud_subscriptions",
                web::post().to(cancel_cloud_subscriptions),
            )
    })
    .bind(&target_server)?
    .run();

    info!("Server running at http://{} PID: {}", target_server, std::process::id());
    server.await
}
