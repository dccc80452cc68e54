use crate::database::MongoDB;
use crate::models::Team;
use crate::utils::AppError;
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};

/// Optional exact-match status filter, same shape as the users listing.
pub fn team_status_filter(status: Option<&str>) -> Document {
    let mut filter = doc! {};
    if let Some(status) = status {
        filter.insert("status", status);
    }
    filter
}

pub async fn list_teams(db: &MongoDB, status: Option<&str>) -> Result<Vec<Team>, AppError> {
    let mut cursor = db
        .teams()
        .find(team_status_filter(status))
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut teams = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(team) => teams.push(team),
            Err(e) => log::error!("Error reading team: {}", e),
        }
    }

    Ok(teams)
}

pub async fn create_team(db: &MongoDB, team: Team) -> Result<Option<String>, AppError> {
    let result = db
        .teams()
        .insert_one(team)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.inserted_id.as_object_id().map(|id| id.to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_filter_absent_param_unconstrained() {
        assert_eq!(team_status_filter(None), doc! {});
    }

    #[test]
    fn test_team_filter_exact_match() {
        assert_eq!(
            team_status_filter(Some("active")),
            doc! { "status": "active" }
        );
    }
}
