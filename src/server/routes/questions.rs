use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::{CategoryTable, NewQuestion, Question};
use crate::pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse};
use crate::server::extract::{ApiJson, ApiPath, ApiQuery};
use crate::telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED};

use super::{listing_page, page_number};

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryTable,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    State(categories): State<Arc<CategoryTable>>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let all = questions::get_all_questions(&pool).await?;
    let current = listing_page(page, &all)?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions: all.len(),
        categories: categories.as_ref().clone(),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiQuery(page): ApiQuery<PageQuery>,
    ApiJson(new_question): ApiJson<NewQuestion>,
) -> ApiResponse<Json<CreatedBody>> {
    // reject a bad page before the insert
    let page = page_number(page)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, category = new_question.category, "Created question");

    let all = questions::get_all_questions(&pool).await?;
    Ok(Json(CreatedBody {
        success: true,
        created: id,
        questions: paginate(page, QUESTIONS_PER_PAGE, &all),
        total_questions: all.len(),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<DeletedBody>> {
    match questions::delete_question(&pool, id).await {
        Ok(true) => {
            QUESTIONS_DELETED.inc();
            tracing::info!(id, "Deleted question");
            Ok(Json(DeletedBody {
                success: true,
                deleted: id,
            }))
        }
        Ok(false) => Err(ApiError::NotFound(format!("question {id}"))),
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to delete question");
            Err(ApiError::NotFound(format!("question {id}")))
        }
    }
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(page): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body
        .search_term
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("searchTerm is required".to_owned()))?;

    let found = questions::search_questions(&pool, &term).await?;
    if found.is_empty() {
        return Err(ApiError::NotFound(format!("no question matches {term:?}")));
    }

    Ok(Json(SearchResults {
        success: true,
        questions: listing_page(page, &found)?,
        total_questions: found.len(),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/search", get(search_questions).post(search_questions))
        .with_state(state)
}
