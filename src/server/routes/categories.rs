use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::questions::get_questions_for_category;
use crate::db::{CategoryTable, Question};
use crate::pagination::PageQuery;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse};
use crate::server::extract::{ApiPath, ApiQuery};

use super::listing_page;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryTable,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(
    State(categories): State<Arc<CategoryTable>>,
) -> ApiResponse<Json<CategoriesBody>> {
    Ok(Json(CategoriesBody {
        success: true,
        categories: categories.as_ref().clone(),
    }))
}

async fn questions_in_category(
    State(pool): State<SqlitePool>,
    State(categories): State<Arc<CategoryTable>>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let current_category = categories
        .get(id)
        .ok_or_else(|| ApiError::NotFound(format!("category {id}")))?
        .to_owned();

    let questions = get_questions_for_category(&pool, id).await?;
    let total_questions = questions.len();

    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: listing_page(page, &questions)?,
        total_questions,
        current_category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_in_category))
        .with_state(state)
}
