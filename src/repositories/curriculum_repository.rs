use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Curriculum,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    async fn create(&self, curriculum: Curriculum) -> AppResult<Curriculum>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Curriculum>>;
    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Curriculum>, i64)>;
    async fn update(&self, curriculum: Curriculum) -> AppResult<Curriculum>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCurriculumRepository {
    collection: Collection<Curriculum>,
}

impl MongoCurriculumRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl CurriculumRepository for MongoCurriculumRepository {
    async fn create(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        self.collection.insert_one(&curriculum).await?;
        Ok(curriculum)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Curriculum>> {
        let curriculum = self.collection.find_one(doc! { "id": id }).await?;
        Ok(curriculum)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Curriculum>, i64)> {
        let filter = doc! { "owner_id": owner_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<Curriculum> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        let filter = doc! { "id": &curriculum.id };
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(filter, &curriculum)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Curriculum with id '{}' not found",
                curriculum.id
            )));
        }

        Ok(curriculum)
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

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(IndexOptions::builder().name("owner_id".to_string()).build())
            .build();
        self.collection.create_index(owner_index).await?;

        log::info!("Created indexes for curriculums collection");
        Ok(())
    }
}
