use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::advertisement::{AdvertisementUpdate, NewAdvertisement};
use service::errors::ServiceError;
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::routes::AppState;

/// Page size is fixed; the endpoint does not let callers change it.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateAdvertisementInput {
    // Missing fields decode to their zero values so the aggregated
    // required-field validation can name every violation at once.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateAdvertisementInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[utoipa::path(
    get, path = "/advertisements", tag = "advertisements",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of advertisements"),
        (status = 400, description = "Invalid page, sort or order parameter"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<models::advertisement::Model>>, JsonApiError> {
    let page = q.page.unwrap_or(1);
    let sort = q.sort.unwrap_or_else(|| "created_at".to_string());
    let order = q.order.unwrap_or_else(|| "asc".to_string());

    match state.ads.list_page(page, PAGE_SIZE, &sort, &order).await {
        Ok(list) => {
            info!(count = list.len(), page, "list advertisements");
            Ok(Json(list))
        }
        Err(e @ ServiceError::Validation(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(e.to_string()),
        )),
        Err(e) => {
            error!(err = %e, "list advertisements failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "List Failed",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    get, path = "/advertisements/{id}", tag = "advertisements",
    params(("id" = i32, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Advertisement"),
        (status = 400, description = "Invalid advertisement ID"),
        (status = 404, description = "Advertisement not found"),
        (status = 500, description = "Lookup Failed")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<models::advertisement::Model>, JsonApiError> {
    if id <= 0 {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid advertisement ID",
            None,
        ));
    }
    match state.ads.get(id).await {
        Ok(Some(ad)) => Ok(Json(ad)),
        Ok(None) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Advertisement not found",
            None,
        )),
        Err(e) => {
            error!(err = %e, id, "get advertisement failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Lookup Failed",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    post, path = "/advertisements", tag = "advertisements",
    request_body = crate::openapi::CreateAdvertisementInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAdvertisementInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), JsonApiError> {
    info!(title = %input.title, price = input.price, "advertisement_create_request");

    let new = NewAdvertisement {
        title: input.title,
        description: input.description,
        price: input.price,
        is_active: input.is_active,
    };
    match state.ads.create(new).await {
        Ok(ad) => {
            info!(id = ad.id, "created advertisement");
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({"message": "Advertisement created successfully"})),
            ))
        }
        Err(e @ ServiceError::Validation(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(e.to_string()),
        )),
        Err(e) => {
            error!(err = %e, "create advertisement failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Create Failed",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    put, path = "/advertisements/{id}", tag = "advertisements",
    params(("id" = i32, Path, description = "Advertisement ID")),
    request_body = crate::openapi::UpdateAdvertisementInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid advertisement ID"),
        (status = 404, description = "Advertisement not found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateAdvertisementInput>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    if id <= 0 {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid advertisement ID",
            None,
        ));
    }
    let patch = AdvertisementUpdate {
        title: input.title,
        description: input.description,
        price: input.price,
        is_active: input.is_active,
    };
    match state.ads.update(id, patch).await {
        Ok(ad) => {
            info!(id = ad.id, "updated advertisement");
            Ok(Json(serde_json::json!({"message": "Advertisement updated successfully"})))
        }
        Err(e @ ServiceError::Validation(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(e.to_string()),
        )),
        Err(e @ ServiceError::NotFound(_)) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Advertisement not found",
            Some(e.to_string()),
        )),
        Err(e) => {
            error!(err = %e, id, "update advertisement failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Update Failed",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    delete, path = "/advertisements/{id}", tag = "advertisements",
    params(("id" = i32, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid advertisement ID"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    if id <= 0 {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid advertisement ID",
            None,
        ));
    }
    match state.ads.delete(id).await {
        // Deleting an id that no longer exists is still a success.
        Ok(removed) => {
            info!(id, removed, "delete advertisement");
            Ok(Json(serde_json::json!({"message": "Advertisement deleted successfully"})))
        }
        Err(e) => {
            error!(err = %e, id, "delete advertisement failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Delete Failed",
                Some(e.to_string()),
            ))
        }
    }
}
