use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct AdvertisementDoc {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub created_at: String,
    pub is_active: bool,
}

#[derive(ToSchema)]
pub struct CreateAdvertisementInputDoc {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub is_active: bool,
}

#[derive(ToSchema)]
pub struct UpdateAdvertisementInputDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::advertisements::list,
        crate::routes::advertisements::create,
        crate::routes::advertisements::get,
        crate::routes::advertisements::update,
        crate::routes::advertisements::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AdvertisementDoc,
            CreateAdvertisementInputDoc,
            UpdateAdvertisementInputDoc,
            MessageResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "advertisements")
    )
)]
pub struct ApiDoc;
