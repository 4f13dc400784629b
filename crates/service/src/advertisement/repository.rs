use async_trait::async_trait;
use models::advertisement::{self, Entity as AdvertisementEntity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::error;

use crate::advertisement::service::NewAdvertisement;
use crate::errors::ServiceError;
use crate::pagination::{SortDir, SortKey};

/// Storage operations for advertisements. Callers hand in already-resolved
/// sort constants; this layer does not re-validate them.
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    async fn list_page(
        &self,
        offset: u64,
        limit: u64,
        sort: SortKey,
        dir: SortDir,
    ) -> Result<Vec<advertisement::Model>, ServiceError>;
    async fn list_all(&self) -> Result<Vec<advertisement::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<advertisement::Model>, ServiceError>;
    async fn create(&self, new: NewAdvertisement) -> Result<advertisement::Model, ServiceError>;
    /// Overwrites all caller-mutable fields for `id`. A missing row is a
    /// silent success (zero rows affected).
    async fn update(&self, id: i32, record: &advertisement::Model) -> Result<(), ServiceError>;
    /// Returns whether a row was actually removed; unknown ids are tolerated.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation. The connection is injected at
/// construction time.
pub struct SeaOrmAdvertisementRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdvertisementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdvertisementRepository for SeaOrmAdvertisementRepository {
    async fn list_page(
        &self,
        offset: u64,
        limit: u64,
        sort: SortKey,
        dir: SortDir,
    ) -> Result<Vec<advertisement::Model>, ServiceError> {
        AdvertisementEntity::find()
            .order_by(sort.column(), dir.order())
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, offset, limit, "query paginated advertisements failed");
                ServiceError::Db(e.to_string())
            })
    }

    async fn list_all(&self) -> Result<Vec<advertisement::Model>, ServiceError> {
        AdvertisementEntity::find().all(&self.db).await.map_err(|e| {
            error!(error = %e, "query advertisements failed");
            ServiceError::Db(e.to_string())
        })
    }

    async fn get(&self, id: i32) -> Result<Option<advertisement::Model>, ServiceError> {
        AdvertisementEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, id, "query advertisement by id failed");
                ServiceError::Db(e.to_string())
            })
    }

    async fn create(&self, new: NewAdvertisement) -> Result<advertisement::Model, ServiceError> {
        // id and created_at stay NotSet; storage assigns both.
        let am = advertisement::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            price: Set(new.price),
            is_active: Set(new.is_active),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| {
            error!(error = %e, "insert advertisement failed");
            ServiceError::Db(e.to_string())
        })
    }

    async fn update(&self, id: i32, record: &advertisement::Model) -> Result<(), ServiceError> {
        // update_many keeps the zero-rows-affected tolerance; created_at is
        // never part of the SET list.
        AdvertisementEntity::update_many()
            .set(advertisement::ActiveModel {
                title: Set(record.title.clone()),
                description: Set(record.description.clone()),
                price: Set(record.price),
                is_active: Set(record.is_active),
                ..Default::default()
            })
            .filter(advertisement::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, id, "update advertisement failed");
                ServiceError::Db(e.to_string())
            })?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = AdvertisementEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, id, "delete advertisement failed");
                ServiceError::Db(e.to_string())
            })?;
        Ok(res.rows_affected > 0)
    }
}
