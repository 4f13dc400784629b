use std::sync::Arc;

use models::advertisement;
use tracing::{info, instrument};

use crate::advertisement::repository::AdvertisementRepository;
use crate::errors::ServiceError;
use crate::pagination::{PageRequest, SortDir, SortKey};

/// Input for creating an advertisement. Required-field checks happen in
/// [`AdvertisementService::create`], not at the storage layer.
#[derive(Clone, Debug)]
pub struct NewAdvertisement {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub is_active: bool,
}

/// Partial update. Supplied-but-empty title/description and
/// supplied-but-non-positive price leave the stored value unchanged.
#[derive(Clone, Debug, Default)]
pub struct AdvertisementUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

/// Application service encapsulating advertisement business rules:
/// pagination/sort whitelisting, required-field aggregation, and the
/// load-merge-store partial update.
pub struct AdvertisementService<R: AdvertisementRepository> {
    repo: Arc<R>,
}

impl<R: AdvertisementRepository> AdvertisementService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validates page, sort column and sort order before anything reaches
    /// storage, then delegates with `offset = (page - 1) * page_size`.
    pub async fn list_page(
        &self,
        page: u32,
        page_size: u32,
        sort: &str,
        order: &str,
    ) -> Result<Vec<advertisement::Model>, ServiceError> {
        let (offset, limit) = PageRequest { page, per_page: page_size }.to_offset_limit()?;
        let key = SortKey::parse(sort)?;
        let dir = SortDir::parse(order)?;
        self.repo.list_page(offset, limit, key, dir).await
    }

    pub async fn list_all(&self) -> Result<Vec<advertisement::Model>, ServiceError> {
        self.repo.list_all().await
    }

    /// `Ok(None)` is the not-found signal, distinct from a storage failure.
    pub async fn get(&self, id: i32) -> Result<Option<advertisement::Model>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(
        &self,
        input: NewAdvertisement,
    ) -> Result<advertisement::Model, ServiceError> {
        validate_required(&input)?;
        let created = self.repo.create(input).await?;
        info!(id = created.id, "created advertisement");
        Ok(created)
    }

    /// Loads the existing record, merges only the supplied non-empty /
    /// positive fields, and stores the result. The load and store are
    /// separate statements; concurrent updates to the same row can lose
    /// writes.
    pub async fn update(
        &self,
        id: i32,
        patch: AdvertisementUpdate,
    ) -> Result<advertisement::Model, ServiceError> {
        let Some(mut existing) = self.repo.get(id).await? else {
            return Err(ServiceError::not_found("advertisement"));
        };

        if let Some(title) = patch.title {
            if !title.is_empty() {
                existing.title = title;
            }
        }
        if let Some(description) = patch.description {
            if !description.is_empty() {
                existing.description = description;
            }
        }
        if let Some(price) = patch.price {
            if price > 0.0 {
                existing.price = price;
            }
        }
        if let Some(is_active) = patch.is_active {
            existing.is_active = is_active;
        }

        self.repo.update(id, &existing).await?;
        info!(id, "updated advertisement");
        Ok(existing)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.repo.delete(id).await
    }
}

/// Fixed-order required-field rules; every violation contributes to one
/// aggregated message.
fn validate_required(input: &NewAdvertisement) -> Result<(), ServiceError> {
    let mut violations: Vec<&str> = Vec::new();
    if input.title.is_empty() {
        violations.push("title");
    }
    if input.description.is_empty() {
        violations.push("description");
    }
    if input.price <= 0.0 {
        violations.push("price");
    }
    if violations.is_empty() {
        return Ok(());
    }
    let message = violations
        .iter()
        .map(|field| format!("{} is required", field))
        .collect::<Vec<_>>()
        .join(", ");
    Err(ServiceError::Validation(message))
}
