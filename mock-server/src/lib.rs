//! In-memory stand-in for the json-server backend the blog client consumes.
//!
//! Implements the subset the client actually uses: `GET /posts` with the
//! `q`, `author.id`, `publicationDate_lte`, `_sort` and `_order` parameters,
//! `GET /posts/{id}`, `POST` (numeric auto-id), `PUT` (wholesale replace) and
//! `PATCH` (shallow merge). Records are stored as raw JSON documents, exactly
//! as json-server stores them, so seeded data may mix numeric and string ids.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

pub type Db = Arc<RwLock<Vec<Value>>>;

pub fn app() -> Router {
    app_with_posts(Vec::new())
}

/// Build the router over a pre-seeded post collection (json-server's db.json).
pub fn app_with_posts(posts: Vec<Value>) -> Router {
    let db: Db = Arc::new(RwLock::new(posts));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(replace_post).patch(patch_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// A record's id in normalized string form. Ids may be stored as numbers or
/// strings; lookups compare the normalized forms.
fn id_str(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// json-server's full-text search: case-insensitive substring match against
/// every string value anywhere in the document.
fn matches_text(record: &Value, needle: &str) -> bool {
    match record {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| matches_text(item, needle)),
        Value::Object(fields) => fields.values().any(|field| matches_text(field, needle)),
        _ => false,
    }
}

fn publication_date(record: &Value) -> i64 {
    record.get("publicationDate").and_then(Value::as_i64).unwrap_or(0)
}

async fn list_posts(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let posts = db.read().await;
    let mut selected: Vec<Value> = posts.iter().cloned().collect();

    if let Some(needle) = params.get("q").map(|q| q.to_lowercase()) {
        selected.retain(|p| matches_text(p, &needle));
    }
    if let Some(author_id) = params.get("author.id") {
        selected.retain(|p| {
            p.get("author").map(id_str).as_deref() == Some(author_id.as_str())
        });
    }
    if let Some(lte) = params.get("publicationDate_lte").and_then(|v| v.parse::<i64>().ok()) {
        selected.retain(|p| publication_date(p) <= lte);
    }
    if params.get("_sort").map(String::as_str) == Some("publicationDate") {
        selected.sort_by_key(publication_date);
        if params.get("_order").map(String::as_str) == Some("DESC") {
            selected.reverse();
        }
    }

    Json(selected)
}

async fn create_post(
    State(db): State<Db>,
    Json(mut input): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let fields = input.as_object_mut().ok_or(StatusCode::BAD_REQUEST)?;
    let mut posts = db.write().await;
    let next_id = posts
        .iter()
        .filter_map(|p| p.get("id").and_then(Value::as_u64))
        .max()
        .unwrap_or(0)
        + 1;
    fields.insert("id".to_string(), Value::from(next_id));
    let record = Value::Object(fields.clone());
    posts.push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_post(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let posts = db.read().await;
    posts
        .iter()
        .find(|p| id_str(p) == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn replace_post(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut posts = db.write().await;
    let record = posts
        .iter_mut()
        .find(|p| id_str(p) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let existing_id = record.get("id").cloned().unwrap_or(Value::Null);
    let mut replacement = input;
    let fields = replacement.as_object_mut().ok_or(StatusCode::BAD_REQUEST)?;
    fields.insert("id".to_string(), existing_id);
    *record = Value::Object(fields.clone());
    Ok(Json(record.clone()))
}

async fn patch_post(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut posts = db.write().await;
    let record = posts
        .iter_mut()
        .find(|p| id_str(p) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let patch = input.as_object().ok_or(StatusCode::BAD_REQUEST)?;
    let fields = record.as_object_mut().ok_or(StatusCode::NOT_FOUND)?;
    for (key, value) in patch {
        if key != "id" {
            fields.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(record.clone()))
}
