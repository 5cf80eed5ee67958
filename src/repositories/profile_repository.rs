use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: UserProfile) -> AppResult<UserProfile>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserProfile>>;
    async fn find_by_display_name(&self, display_name: &str) -> AppResult<Option<UserProfile>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoProfileRepository {
    collection: Collection<UserProfile>,
}

impl MongoProfileRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ProfileRepository for MongoProfileRepository {
    async fn create(&self, profile: UserProfile) -> AppResult<UserProfile> {
        self.collection.insert_one(&profile).await?;
        Ok(profile)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserProfile>> {
        let profile = self.collection.find_one(doc! { "id": id }).await?;
        Ok(profile)
    }

    async fn find_by_display_name(&self, display_name: &str) -> AppResult<Option<UserProfile>> {
        let profile = self
            .collection
            .find_one(doc! { "display_name": display_name })
            .await?;
        Ok(profile)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        let name_index = IndexModel::builder()
            .keys(doc! { "display_name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("display_name_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(name_index).await?;

        log::info!("Created indexes for profiles collection");
        Ok(())
    }
}
