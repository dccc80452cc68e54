use crate::database::MongoDB;
use crate::models::Payment;
use crate::utils::AppError;
use futures::stream::StreamExt;
use mongodb::bson::doc;
use serde::Deserialize;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: String,
}

/// Stripe amounts are integer minor units. Truncation (not rounding) matches
/// the behavior clients already depend on.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0) as i64
}

/// Delegates intent creation to Stripe; no payment logic lives here.
pub async fn create_payment_intent(price: f64) -> Result<String, AppError> {
    let secret_key = std::env::var("STRIPE_SECRET_KEY")
        .map_err(|_| AppError::PaymentError("STRIPE_SECRET_KEY is not set".to_string()))?;

    let amount = to_minor_units(price);
    log::info!("💳 Creating payment intent for {} minor units", amount);

    let client = reqwest::Client::new();
    let params = [
        ("amount", amount.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let response = client
        .post(STRIPE_API_URL)
        .bearer_auth(&secret_key)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::PaymentError(format!("Stripe request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::PaymentError(format!(
            "Stripe returned {}: {}",
            status, body
        )));
    }

    let intent: PaymentIntent = response
        .json()
        .await
        .map_err(|e| AppError::PaymentError(format!("Invalid Stripe response: {}", e)))?;

    Ok(intent.client_secret)
}

pub async fn payments_by_email(db: &MongoDB, email: &str) -> Result<Vec<Payment>, AppError> {
    let mut cursor = db
        .payments()
        .find(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut payments = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(payment) => payments.push(payment),
            Err(e) => log::error!("Error reading payment: {}", e),
        }
    }

    Ok(payments)
}

/// Append-only: payment records are never mutated after insertion.
pub async fn record_payment(db: &MongoDB, payment: Payment) -> Result<Option<String>, AppError> {
    let result = db
        .payments()
        .insert_one(payment)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.inserted_id.as_object_id().map(|id| id.to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_dollars_to_minor_units() {
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[test]
    fn test_cents_to_minor_units() {
        assert_eq!(to_minor_units(10.5), 1050);
        assert_eq!(to_minor_units(2.25), 225);
    }
}
