use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, AppState};
use service::advertisement::{AdvertisementService, SeaOrmAdvertisementRepository};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Ensure models prefer env over config file
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");

    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }

    let repo = Arc::new(SeaOrmAdvertisementRepository::new(db));
    let state = AppState { ads: Arc::new(AdvertisementService::new(repo)) };

    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Scan recent pages (newest first) for the advertisement with this title.
async fn find_id_by_title(base_url: &str, title: &str) -> anyhow::Result<i64> {
    let c = client();
    for page in 1..=10 {
        let res = c
            .get(format!(
                "{}/advertisements?page={}&sort=created_at&order=desc",
                base_url, page
            ))
            .send()
            .await?;
        let items = res.json::<Vec<serde_json::Value>>().await?;
        if items.is_empty() {
            break;
        }
        if let Some(hit) = items.iter().find(|ad| ad["title"] == title) {
            return Ok(hit["id"].as_i64().unwrap_or_default());
        }
    }
    Err(anyhow::anyhow!("advertisement '{}' not found in listing", title))
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_page_zero_is_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/advertisements?page=0", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_page_is_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/advertisements?page=abc", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_sort_is_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/advertisements?page=1&sort=title", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_list_defaults_return_at_most_page_size() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/advertisements", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let items = res.json::<Vec<serde_json::Value>>().await?;
    assert!(items.len() <= 10);
    Ok(())
}

#[tokio::test]
async fn e2e_non_numeric_id_is_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/advertisements/abc", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_is_not_found() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/advertisements/999999999", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_create_with_empty_title_names_the_field() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .post(format!("{}/advertisements", app.base_url))
        .json(&json!({"title": "", "description": "d", "price": 5}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.text().await?;
    assert!(body.contains("title is required"), "body: {}", body);
    assert!(!body.contains("description is required"), "body: {}", body);
    Ok(())
}

#[tokio::test]
async fn e2e_create_then_fetch_round_trip() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = client();

    let title = format!("e2e roundtrip {}", Uuid::new_v4());
    let res = c
        .post(format!("{}/advertisements", app.base_url))
        .json(&json!({"title": title, "description": "round trip", "price": 42.5, "is_active": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let id = find_id_by_title(&app.base_url, &title).await?;
    let res = c
        .get(format!("{}/advertisements/{}", app.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let ad = res.json::<serde_json::Value>().await?;
    assert_eq!(ad["title"], title);
    assert_eq!(ad["description"], "round trip");
    assert_eq!(ad["price"], 42.5);
    assert_eq!(ad["is_active"], true);
    assert!(ad["created_at"].is_string());

    // cleanup
    let res = c
        .delete(format!("{}/advertisements/{}", app.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_partial_update_keeps_unsupplied_fields() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = client();

    let title = format!("e2e partial {}", Uuid::new_v4());
    let res = c
        .post(format!("{}/advertisements", app.base_url))
        .json(&json!({"title": title, "description": "original", "price": 9.5, "is_active": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let id = find_id_by_title(&app.base_url, &title).await?;

    // Empty description and zero price must leave the stored values alone.
    let new_title = format!("e2e renamed {}", Uuid::new_v4());
    let res = c
        .put(format!("{}/advertisements/{}", app.base_url, id))
        .json(&json!({"title": new_title, "description": "", "price": 0}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let ad = c
        .get(format!("{}/advertisements/{}", app.base_url, id))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(ad["title"], new_title);
    assert_eq!(ad["description"], "original");
    assert_eq!(ad["price"], 9.5);

    // cleanup
    c.delete(format!("{}/advertisements/{}", app.base_url, id)).send().await?;
    Ok(())
}

#[tokio::test]
async fn e2e_update_unknown_id_is_not_found() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .put(format!("{}/advertisements/999999999", app.base_url))
        .json(&json!({"title": "x", "description": "y", "price": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_delete_is_idempotent() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .delete(format!("{}/advertisements/999999999", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}
