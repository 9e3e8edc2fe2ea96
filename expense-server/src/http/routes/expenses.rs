//! Expense endpoints
//!
//! Bodies are read as raw bytes and bound here rather than through the
//! `Json` extractor, so a parse failure reaches the client as the parser's
//! own text inside the usual `{"message": ...}` body.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::models::expense::parse_path_id;
use crate::models::Expense;
use crate::state::AppState;

/// POST /expenses - record a new expense
async fn create_expense(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = Expense::from_create_json(&body)?;

    let created = state
        .store()
        .create(expense)
        .await
        .map_err(ApiError::write)?;

    tracing::info!(id = created.id, "Created expense");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /expenses/{id} - fetch one expense
async fn get_expense(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    let id = parse_path_id(&raw).map_err(|_| ApiError::LookupId { raw })?;

    state
        .store()
        .get_by_id(id)
        .await
        .map_err(ApiError::scan)?
        .map(Json)
        .ok_or(ApiError::NotFound { id })
}

/// GET /expenses - all expenses in id order
async fn list_expenses(State(state): State<AppState>) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = state.store().list_all().await.map_err(ApiError::list)?;
    Ok(Json(expenses))
}

/// PUT /expenses/{id} - replace an expense's fields
///
/// The path id wins over any id in the body. Responds 201 on success and
/// does not check that the id exists.
async fn update_expense(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let mut expense = Expense::from_json(&body)?;
    expense.id = parse_path_id(&raw)?;

    let updated = state
        .store()
        .update(expense)
        .await
        .map_err(ApiError::write)?;

    tracing::info!(id = updated.id, "Updated expense");
    Ok((StatusCode::CREATED, Json(updated)))
}

/// Expense routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).put(update_expense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    use crate::db::{DbError, ExpenseStore, MemoryExpenseRepo};
    use crate::http::error::ErrorBody;

    const GOOD_EXPENSE_JSON: &str = r#"{
        "title": "title",
        "amount": 1,
        "note": "note",
        "tags": ["tag1", "tag2"]
    }"#;

    const EXPENSE_WITH_ID_JSON: &str = r#"{
        "id": 1,
        "title": "title",
        "amount": 1,
        "note": "note",
        "tags": ["tag1", "tag2"]
    }"#;

    const BAD_EXPENSE_JSON: &str = r#"{
        "title": "title",
        "amount": A,
        "note": "note",
        "tags": ["tag1", "tag2"]
    }"#;

    /// Store whose every call fails like a closed connection pool.
    struct BrokenStore;

    #[async_trait]
    impl ExpenseStore for BrokenStore {
        async fn create(&self, _: Expense) -> Result<Expense, DbError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn get_by_id(&self, _: i64) -> Result<Option<Expense>, DbError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn list_all(&self) -> Result<Vec<Expense>, DbError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn update(&self, _: Expense) -> Result<Expense, DbError> {
            Err(sqlx::Error::PoolClosed.into())
        }
    }

    fn app(store: impl ExpenseStore + 'static) -> Router {
        router().with_state(AppState::new(store))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn message(bytes: &[u8]) -> String {
        serde_json::from_slice::<ErrorBody>(bytes).unwrap().message
    }

    fn expense(bytes: &[u8]) -> Expense {
        serde_json::from_slice(bytes).unwrap()
    }

    fn driver_text() -> String {
        sqlx::Error::PoolClosed.to_string()
    }

    #[tokio::test]
    async fn create_assigns_id_and_echoes_fields() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::POST, "/expenses", GOOD_EXPENSE_JSON).await;

        assert_eq!(status, StatusCode::CREATED);
        let created = expense(&body);
        assert_ne!(created.id, 0);
        assert_eq!(created.title, "title");
        assert_eq!(created.amount, 1.0);
        assert_eq!(created.note, "note");
        assert_eq!(created.tags, vec!["tag1", "tag2"]);
    }

    #[tokio::test]
    async fn create_with_id_is_rejected() {
        let store = MemoryExpenseRepo::new();
        let app = app(store.clone());

        let (status, body) = send(&app, Method::POST, "/expenses", EXPENSE_WITH_ID_JSON).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), "Field ID is invalid");
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_id_and_bad_field_is_rejected_on_id() {
        let store = MemoryExpenseRepo::new();
        let app = app(store.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/expenses",
            r#"{"id":1,"title":"t","amount":"12"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), "Field ID is invalid");
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_empty_body_stores_zero_value() {
        let app = app(MemoryExpenseRepo::new());

        for body in ["", "null"] {
            let (status, bytes) = send(&app, Method::POST, "/expenses", body).await;

            assert_eq!(status, StatusCode::CREATED);
            let created = expense(&bytes);
            assert_ne!(created.id, 0);
            assert_eq!(
                created,
                Expense {
                    id: created.id,
                    ..Expense::default()
                }
            );
        }
    }

    #[tokio::test]
    async fn create_with_malformed_body_is_rejected() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::POST, "/expenses", BAD_EXPENSE_JSON).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let parse_error = serde_json::from_str::<Expense>(BAD_EXPENSE_JSON)
            .unwrap_err()
            .to_string();
        assert_eq!(message(&body), parse_error);
    }

    #[tokio::test]
    async fn create_storage_failure_is_500() {
        let app = app(BrokenStore);

        let (status, body) = send(&app, Method::POST, "/expenses", GOOD_EXPENSE_JSON).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(&body), driver_text());
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let app = app(MemoryExpenseRepo::new());
        let (_, body) = send(
            &app,
            Method::POST,
            "/expenses",
            r#"{"title":"strawberry smoothie","amount":13.26,"note":"night market promotion discount 10 bath","tags":["food","beverage"]}"#,
        )
        .await;
        let created = expense(&body);

        let (status, body) = send(&app, Method::GET, &format!("/expenses/{}", created.id), "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(expense(&body), created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_404() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::GET, "/expenses/999", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message(&body), "Expense not found");
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_500() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::GET, "/expenses/a", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(&body), "ID is invalid");
    }

    #[tokio::test]
    async fn get_storage_failure_is_prefixed() {
        let app = app(BrokenStore);

        let (status, body) = send(&app, Method::GET, "/expenses/2", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            message(&body),
            format!("Unable to scan expense:{}", driver_text())
        );
    }

    #[tokio::test]
    async fn list_empty_store_is_empty_array() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::GET, "/expenses", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn list_returns_rows_in_id_order() {
        let app = app(MemoryExpenseRepo::new());
        for title in ["test-title1", "test-title2"] {
            let body = format!(r#"{{"title":"{title}","amount":13,"note":"n","tags":["tag1"]}}"#);
            send(&app, Method::POST, "/expenses", &body).await;
        }

        let (status, body) = send(&app, Method::GET, "/expenses", "").await;

        assert_eq!(status, StatusCode::OK);
        let all: Vec<Expense> = serde_json::from_slice(&body).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
        assert_eq!(all[0].title, "test-title1");
        assert_eq!(all[1].title, "test-title2");
    }

    #[tokio::test]
    async fn list_storage_failure_is_prefixed() {
        let app = app(BrokenStore);

        let (status, body) = send(&app, Method::GET, "/expenses", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            message(&body),
            format!("Unable to get expenses from database:{}", driver_text())
        );
    }

    #[tokio::test]
    async fn update_uses_path_id_and_returns_201() {
        let store = MemoryExpenseRepo::new();
        let app = app(store.clone());
        send(&app, Method::POST, "/expenses", GOOD_EXPENSE_JSON).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/expenses/1",
            r#"{"id":42,"title":"strawberry","amount":14.65,"note":"night market promotion discount 10THB","tags":["food"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let updated = expense(&body);
        assert_eq!(
            updated,
            Expense {
                id: 1,
                title: "strawberry".into(),
                amount: 14.65,
                note: "night market promotion discount 10THB".into(),
                tags: vec!["food".into()],
            }
        );
        assert_eq!(store.get_by_id(1).await.unwrap(), Some(updated));
        assert_eq!(store.get_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_with_malformed_id_is_400() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::PUT, "/expenses/a", EXPENSE_WITH_ID_JSON).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), "Field ID is invalid");
    }

    #[tokio::test]
    async fn update_with_malformed_body_is_400() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::PUT, "/expenses/3", BAD_EXPENSE_JSON).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message(&body).contains("expected value"));
    }

    #[tokio::test]
    async fn update_with_empty_body_resets_fields() {
        let store = MemoryExpenseRepo::new();
        let app = app(store.clone());
        send(&app, Method::POST, "/expenses", GOOD_EXPENSE_JSON).await;

        let (status, body) = send(&app, Method::PUT, "/expenses/1", "").await;

        assert_eq!(status, StatusCode::CREATED);
        let reset = Expense {
            id: 1,
            ..Expense::default()
        };
        assert_eq!(expense(&body), reset);
        assert_eq!(store.get_by_id(1).await.unwrap(), Some(reset));
    }

    #[tokio::test]
    async fn update_unknown_id_still_201() {
        let app = app(MemoryExpenseRepo::new());

        let (status, body) = send(&app, Method::PUT, "/expenses/7", GOOD_EXPENSE_JSON).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(expense(&body).id, 7);
    }

    #[tokio::test]
    async fn update_storage_failure_is_500() {
        let app = app(BrokenStore);

        let (status, body) = send(&app, Method::PUT, "/expenses/1", GOOD_EXPENSE_JSON).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(&body), driver_text());
    }
}
