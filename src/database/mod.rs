use crate::models::{Asset, Payment, Team, User};
use mongodb::{Client, Collection, Database};
use std::error::Error;

const DB_NAME: &str = "assetEachDB";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool reused for process lifetime
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(DB_NAME);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates necessary indexes for the lookup-heavy collections
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // users(email) - every identity lookup goes through the email key
        let users = self.db.collection::<mongodb::bson::Document>("users");
        let email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        match users.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // users(owner) - my_employees listing
        let owner_index = IndexModel::builder().keys(doc! { "owner": 1 }).build();
        match users.create_index(owner_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(owner)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // assets(productType) - listing filter
        let assets = self.db.collection::<mongodb::bson::Document>("assets");
        let product_type_index = IndexModel::builder()
            .keys(doc! { "productType": 1 })
            .build();
        match assets.create_index(product_type_index).await {
            Ok(_) => log::info!("   ✅ Index created: assets(productType)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // payments(email) - per-user payment history
        let payments = self.db.collection::<mongodb::bson::Document>("payments");
        let payment_email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        match payments.create_index(payment_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: payments(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn teams(&self) -> Collection<Team> {
        self.db.collection("teams")
    }

    pub fn assets(&self) -> Collection<Asset> {
        self.db.collection("assets")
    }

    pub fn payments(&self) -> Collection<Payment> {
        self.db.collection("payments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
