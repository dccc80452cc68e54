use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Whether stock is restored when an employee gives the asset back.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
pub enum AssetType {
    #[serde(rename = "returnable")]
    Returnable,
    #[serde(rename = "non-returnable")]
    NonReturnable,
}

/// Lifecycle of an individual checkout cycle. Absence of the field means
/// the asset was never requested.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Returned,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Returned => "returned",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

/// Approval of the asset listing itself, distinct from the request status.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Asset {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "productType")]
    pub product_type: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(rename = "assetType")]
    pub asset_type: AssetType,
    #[serde(
        rename = "requestStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_status: Option<RequestStatus>,
    #[serde(default = "default_listing_status")]
    pub status: ListingStatus,
    #[serde(
        rename = "requesterEmail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requester_email: Option<String>,
    #[serde(rename = "addedDate", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub added_date: Option<BsonDateTime>,
}

fn default_listing_status() -> ListingStatus {
    ListingStatus::Pending
}
