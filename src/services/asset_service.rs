use crate::database::MongoDB;
use crate::models::{Asset, RequestStatus};
use crate::utils::AppError;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

// ============================================================================
// REQUEST STATE MACHINE
//
// requestStatus: (absent) -> pending -> { approved, cancelled }
//                approved -> returned        (returnable assets only)
//
// Every transition is ONE conditional update whose filter carries the guard.
// Two racers on the same asset cannot both observe the expected prior state:
// at most one update matches, the loser gets a null (no-match) result and
// must not retry on its own.
// ============================================================================

fn parse_asset_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId("Invalid asset ID".to_string()))
}

/// Request: no guard on prior state. Re-requesting an already-pending or
/// already-approved asset simply resets it to pending, as the API has always
/// allowed.
pub fn request_guard(asset_id: ObjectId) -> Document {
    doc! { "_id": asset_id }
}

pub fn request_update() -> Document {
    doc! { "$set": { "requestStatus": RequestStatus::Pending.as_str() } }
}

/// Cancel: only a pending request may be cancelled.
pub fn cancel_guard(asset_id: ObjectId) -> Document {
    doc! { "_id": asset_id, "requestStatus": RequestStatus::Pending.as_str() }
}

pub fn cancel_update() -> Document {
    doc! { "$set": { "requestStatus": RequestStatus::Cancelled.as_str() } }
}

/// Return: only an approved request on a returnable asset. The quantity
/// increment rides in the same atomic update as the status change, so stock
/// is restored exactly once per successful return.
pub fn return_guard(asset_id: ObjectId) -> Document {
    doc! {
        "_id": asset_id,
        "requestStatus": RequestStatus::Approved.as_str(),
        "assetType": "returnable",
    }
}

pub fn return_update() -> Document {
    doc! {
        "$set": { "requestStatus": RequestStatus::Returned.as_str() },
        "$inc": { "quantity": 1 },
    }
}

async fn transition(
    db: &MongoDB,
    guard: Document,
    update: Document,
) -> Result<Option<Asset>, AppError> {
    db.assets()
        .find_one_and_update(guard, update)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

pub async fn request_asset(db: &MongoDB, id: &str) -> Result<Option<Asset>, AppError> {
    let asset_id = parse_asset_id(id)?;
    transition(db, request_guard(asset_id), request_update()).await
}

pub async fn cancel_request(db: &MongoDB, id: &str) -> Result<Option<Asset>, AppError> {
    let asset_id = parse_asset_id(id)?;
    transition(db, cancel_guard(asset_id), cancel_update()).await
}

pub async fn return_asset(db: &MongoDB, id: &str) -> Result<Option<Asset>, AppError> {
    let asset_id = parse_asset_id(id)?;
    transition(db, return_guard(asset_id), return_update()).await
}

// ============================================================================
// LISTING OPERATIONS
// ============================================================================

/// Optional exact-match productType plus optional case-insensitive substring
/// search on productName; absent parameters impose no constraint.
pub fn asset_filter(product_type: Option<&str>, search_term: Option<&str>) -> Document {
    let mut filter = doc! {};
    if let Some(product_type) = product_type {
        filter.insert("productType", product_type);
    }
    if let Some(search_term) = search_term {
        filter.insert(
            "productName",
            doc! { "$regex": search_term, "$options": "i" },
        );
    }
    filter
}

pub async fn list_assets(
    db: &MongoDB,
    product_type: Option<&str>,
    search_term: Option<&str>,
) -> Result<Vec<Asset>, AppError> {
    let mut cursor = db
        .assets()
        .find(asset_filter(product_type, search_term))
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut assets = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(asset) => assets.push(asset),
            Err(e) => log::error!("Error reading asset: {}", e),
        }
    }

    Ok(assets)
}

/// Distinct productType values across the whole collection.
pub async fn product_types(db: &MongoDB) -> Result<Vec<String>, AppError> {
    let values = db
        .assets()
        .distinct("productType", doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(values
        .iter()
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect())
}

pub async fn create_asset(db: &MongoDB, asset: Asset) -> Result<Option<String>, AppError> {
    if asset.quantity < 0 {
        return Err(AppError::InvalidRequest(
            "quantity must not be negative".to_string(),
        ));
    }

    let result = db
        .assets()
        .insert_one(asset)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.inserted_id.as_object_id().map(|id| id.to_hex()))
}

/// Approves the asset listing itself (status, not requestStatus). Applies to
/// any asset id with no precondition on the prior listing status.
pub async fn approve_listing(db: &MongoDB, id: &str) -> Result<Option<Asset>, AppError> {
    let asset_id = parse_asset_id(id)?;

    db.assets()
        .find_one_and_update(
            doc! { "_id": asset_id },
            doc! { "$set": { "status": "approved" } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

pub async fn delete_asset(db: &MongoDB, id: &str) -> Result<Option<Asset>, AppError> {
    let asset_id = parse_asset_id(id)?;

    db.assets()
        .find_one_and_delete(doc! { "_id": asset_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid() -> ObjectId {
        ObjectId::parse_str("65a1b2c3d4e5f6a7b8c9d0e1").unwrap()
    }

    #[test]
    fn test_request_has_no_prior_state_guard() {
        let guard = request_guard(oid());
        assert_eq!(guard, doc! { "_id": oid() });
        assert_eq!(
            request_update(),
            doc! { "$set": { "requestStatus": "pending" } }
        );
    }

    #[test]
    fn test_cancel_only_from_pending() {
        let guard = cancel_guard(oid());
        assert_eq!(guard.get_str("requestStatus").unwrap(), "pending");
        assert_eq!(
            cancel_update(),
            doc! { "$set": { "requestStatus": "cancelled" } }
        );
    }

    #[test]
    fn test_return_demands_approved_and_returnable() {
        let guard = return_guard(oid());
        assert_eq!(guard.get_str("requestStatus").unwrap(), "approved");
        assert_eq!(guard.get_str("assetType").unwrap(), "returnable");
    }

    #[test]
    fn test_return_restores_stock_in_same_update() {
        // $set and $inc must ride in one document so the compare-and-set
        // covers both effects.
        let update = return_update();
        assert_eq!(
            update.get_document("$set").unwrap().get_str("requestStatus").unwrap(),
            "returned"
        );
        assert_eq!(
            update.get_document("$inc").unwrap().get_i32("quantity").unwrap(),
            1
        );
    }

    #[test]
    fn test_malformed_asset_id_rejected() {
        let err = parse_asset_id("zz").unwrap_err();
        match err {
            AppError::InvalidId(msg) => assert_eq!(msg, "Invalid asset ID"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_asset_filter_empty_without_params() {
        assert_eq!(asset_filter(None, None), doc! {});
    }

    #[test]
    fn test_asset_filter_product_type_exact() {
        assert_eq!(
            asset_filter(Some("Laptop"), None),
            doc! { "productType": "Laptop" }
        );
    }

    #[test]
    fn test_asset_filter_search_term_case_insensitive() {
        let filter = asset_filter(None, Some("mac"));
        let regex = filter.get_document("productName").unwrap();
        assert_eq!(regex.get_str("$regex").unwrap(), "mac");
        assert_eq!(regex.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_asset_filter_combines_both_params() {
        let filter = asset_filter(Some("Laptop"), Some("pro"));
        assert_eq!(filter.get_str("productType").unwrap(), "Laptop");
        assert!(filter.get_document("productName").is_ok());
    }
}
