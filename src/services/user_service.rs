use crate::database::MongoDB;
use crate::models::{Role, User};
use crate::utils::AppError;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateUserResult {
    #[serde(rename = "insertedId")]
    pub inserted_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Optional exact-match status filter; absent means no constraint.
pub fn user_status_filter(status: Option<&str>) -> Document {
    let mut filter = doc! {};
    if let Some(status) = status {
        filter.insert("status", status);
    }
    filter
}

/// Employees assigned to a manager, keyed by the owner email.
pub fn employees_filter(owner_email: &str) -> Document {
    doc! { "owner": owner_email }
}

fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId("Invalid user Id".to_string()))
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    db.users()
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

pub async fn list_users(db: &MongoDB, status: Option<&str>) -> Result<Vec<User>, AppError> {
    let mut cursor = db
        .users()
        .find(user_status_filter(status))
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::error!("Error reading user: {}", e),
        }
    }

    Ok(users)
}

pub async fn my_employees(db: &MongoDB, owner_email: &str) -> Result<Vec<User>, AppError> {
    let mut cursor = db
        .users()
        .find(employees_filter(owner_email))
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut employees = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => employees.push(user),
            Err(e) => log::error!("Error reading user: {}", e),
        }
    }

    Ok(employees)
}

/// Idempotent on email: a second registration with the same email inserts
/// nothing and reports `insertedId: null`.
pub async fn create_user(db: &MongoDB, user: User) -> Result<CreateUserResult, AppError> {
    let existing = find_by_email(db, &user.email).await?;
    if existing.is_some() {
        return Ok(CreateUserResult {
            inserted_id: None,
            message: Some("user already exists".to_string()),
        });
    }

    let result = db
        .users()
        .insert_one(user)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(CreateUserResult {
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
        message: None,
    })
}

/// Manager capability check: the caller holds it iff their user record
/// carries the hr role. Runs before any gated mutation.
pub async fn require_hr_manager(db: &MongoDB, email: &str) -> Result<(), AppError> {
    let user = find_by_email(db, email).await?;
    let is_manager = user.map(|u| u.role == Role::Hr).unwrap_or(false);
    if !is_manager {
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }
    Ok(())
}

/// Accepts a pending join request: sets status=accepted and records the
/// accepting manager as owner. No precondition on prior status (any id may
/// be accepted, matching the request/cancel asymmetry the API has always
/// had).
pub async fn accept_request(
    db: &MongoDB,
    id: &str,
    owner: &str,
) -> Result<Option<User>, AppError> {
    let user_id = parse_user_id(id)?;

    db.users()
        .find_one_and_update(
            doc! { "_id": user_id },
            doc! { "$set": { "status": "accepted", "owner": owner } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// Rejects a join request by deleting the record outright.
pub async fn reject_request(db: &MongoDB, id: &str) -> Result<Option<User>, AppError> {
    let user_id = parse_user_id(id)?;

    db.users()
        .find_one_and_delete(doc! { "_id": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_absent_param_unconstrained() {
        assert_eq!(user_status_filter(None), doc! {});
    }

    #[test]
    fn test_status_filter_exact_match() {
        assert_eq!(
            user_status_filter(Some("pending")),
            doc! { "status": "pending" }
        );
    }

    #[test]
    fn test_employees_filter_keyed_by_owner() {
        assert_eq!(
            employees_filter("hr@example.com"),
            doc! { "owner": "hr@example.com" }
        );
    }

    #[test]
    fn test_malformed_user_id_rejected() {
        let err = parse_user_id("definitely-not-an-oid").unwrap_err();
        match err {
            AppError::InvalidId(msg) => assert_eq!(msg, "Invalid user Id"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_valid_user_id_accepted() {
        assert!(parse_user_id("507f1f77bcf86cd799439011").is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_email_never_double_inserts() {
        use crate::models::UserStatus;

        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let email = format!("dup-{}@example.com", uuid::Uuid::new_v4());
        let user = User {
            id: None,
            email: email.clone(),
            name: None,
            role: Role::Employee,
            status: UserStatus::Pending,
            owner: None,
        };

        let first = create_user(&db, user.clone()).await.unwrap();
        assert!(first.inserted_id.is_some());
        assert!(first.message.is_none());

        let second = create_user(&db, user).await.unwrap();
        assert!(second.inserted_id.is_none());
        assert_eq!(second.message.as_deref(), Some("user already exists"));

        // Exactly one record for the email
        let found = find_by_email(&db, &email).await.unwrap();
        assert!(found.is_some());
        db.users()
            .delete_many(doc! { "email": &email })
            .await
            .unwrap();
    }
}
