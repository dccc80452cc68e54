use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Append-only: inserted once per confirmed payment intent, never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    pub amount: f64,
    #[serde(
        rename = "transactionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
