mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment; without database credentials the
    // process must not serve traffic at all.
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let db_user = env::var("DB_USER").expect("DB_USER must be set");
    let db_pass = env::var("DB_PASS").expect("DB_PASS must be set");
    env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set");
    env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set");

    let database_url = format!(
        "mongodb+srv://{}:{}@cluster0.ddlv3rx.mongodb.net/?retryWrites=true&w=majority&appName=Cluster0",
        db_user, db_pass
    );

    log::info!("🚀 Starting Asset-Each Service...");

    // Initialize MongoDB connection - one client, reused for process lifetime
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness & health
            .route("/", web::get().to(api::health::liveness))
            .route("/health", web::get().to(api::health::health_check))
            // Token issuance
            .route("/jwt", web::post().to(api::auth::issue_token))
            // Users
            .route("/users/{email}", web::get().to(api::users::get_user_by_email))
            .service(
                web::resource("/users")
                    .route(web::get().to(api::users::list_users))
                    .route(web::post().to(api::users::create_user)),
            )
            .service(
                web::resource("/status_update/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::put().to(api::users::accept_request)),
            )
            .service(
                web::resource("/reject_request/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::delete().to(api::users::reject_request)),
            )
            .route("/my_employees/{email}", web::get().to(api::users::my_employees))
            // Teams
            .service(
                web::resource("/teams")
                    .route(web::get().to(api::teams::list_teams))
                    .route(web::post().to(api::teams::create_team)),
            )
            // Assets - literal segments before the {id} catch-alls
            .route("/assets/productTypes", web::get().to(api::assets::product_types))
            .route("/assets/request/{id}", web::put().to(api::assets::request_asset))
            .route("/assets/cancel/{id}", web::put().to(api::assets::cancel_request))
            .route("/assets/return/{id}", web::put().to(api::assets::return_asset))
            .service(
                web::resource("/assets")
                    .route(web::get().to(api::assets::list_assets))
                    .route(web::post().to(api::assets::create_asset)),
            )
            .service(
                web::resource("/assets/{id}")
                    .route(web::put().to(api::assets::approve_listing))
                    .route(web::delete().to(api::assets::delete_asset)),
            )
            // Payments
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .service(
                web::resource("/payments/{email}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::payments::get_payments)),
            )
            .route("/payments", web::post().to(api::payments::record_payment))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
