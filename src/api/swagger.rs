use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset-Each Service API",
        version = "1.0.0",
        description = "Asset management backend: users, teams, assets, payments.\n\n**Authentication:** privileged endpoints require a JWT Bearer token issued by `POST /jwt` (1h expiry). Accepting/rejecting join requests and creating assets additionally require the hr role.\n\n**Asset lifecycle:** `PUT /assets/request|cancel|return/{id}` drive the request state machine; guard failures return a 200 with a null body."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,

        // Users
        crate::api::users::get_user_by_email,
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::accept_request,
        crate::api::users::reject_request,
        crate::api::users::my_employees,

        // Teams
        crate::api::teams::list_teams,
        crate::api::teams::create_team,

        // Assets
        crate::api::assets::product_types,
        crate::api::assets::list_assets,
        crate::api::assets::create_asset,
        crate::api::assets::approve_listing,
        crate::api::assets::delete_asset,
        crate::api::assets::request_asset,
        crate::api::assets::cancel_request,
        crate::api::assets::return_asset,

        // Payments
        crate::api::payments::create_payment_intent,
        crate::api::payments::get_payments,
        crate::api::payments::record_payment,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::auth::IdentityRequest,
            crate::api::auth::TokenResponse,
            crate::api::users::StatusUpdateRequest,
            crate::api::payments::PaymentIntentRequest,
            crate::api::payments::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health check endpoints."),
        (name = "Auth", description = "Token issuance. Tokens are HS256-signed and expire after one hour."),
        (name = "Users", description = "Self-registration, join-request lifecycle, and employee listings."),
        (name = "Teams", description = "Team listing and creation."),
        (name = "Assets", description = "Asset listings and the request state machine (request/cancel/return)."),
        (name = "Payments", description = "Payment intent delegation to Stripe and append-only payment records."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
