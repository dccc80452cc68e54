use crate::api::error_response;
use crate::database::MongoDB;
use crate::models::Payment;
use crate::services::{payment_service, token_service::Claims};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    /// Price in major currency units; converted to cents before delegation.
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the created intent", body = PaymentIntentResponse)
    )
)]
pub async fn create_payment_intent(request: web::Json<PaymentIntentRequest>) -> HttpResponse {
    match payment_service::create_payment_intent(request.price).await {
        Ok(client_secret) => HttpResponse::Ok().json(PaymentIntentResponse { client_secret }),
        Err(e) => {
            log::error!("❌ Payment intent creation failed: {}", e);
            error_response(e)
        }
    }
}

/// GET /payments/{email} - token-gated; the verified identity must match the
/// path email
#[utoipa::path(
    get,
    path = "/payments/{email}",
    tag = "Payments",
    params(("email" = String, Path, description = "Payer email")),
    responses(
        (status = 200, description = "Payment history for the email"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token email does not match path email")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_payments(
    caller: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    let email = path.into_inner();
    if caller.email != email {
        return HttpResponse::Forbidden()
            .json(serde_json::json!({ "message": "forbidden access" }));
    }

    match payment_service::payments_by_email(&db, &email).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    responses((status = 200, description = "Insert result"))
)]
pub async fn record_payment(db: web::Data<MongoDB>, payment: web::Json<Payment>) -> HttpResponse {
    log::info!("💾 POST /payments - email: {}", payment.email);

    match payment_service::record_payment(&db, payment.into_inner()).await {
        Ok(inserted_id) => HttpResponse::Ok().json(serde_json::json!({
            "paymentResult": { "insertedId": inserted_id }
        })),
        Err(e) => error_response(e),
    }
}
