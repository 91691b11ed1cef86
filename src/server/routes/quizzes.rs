use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions::{get_all_questions, get_questions_for_category};
use crate::db::{CategoryTable, Question};
use crate::quiz::{select_question, Selection, ALL_CATEGORIES};
use crate::server::app::AppState;
use crate::server::deserializers::{deserialize_lenient_id, deserialize_nullable};
use crate::server::error::{ApiError, ApiResponse};
use crate::server::extract::ApiJson;
use crate::telemetry::{QUIZ_QUESTIONS_SERVED, QUIZ_SESSIONS_EXHAUSTED};

#[derive(Default, Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    id: Option<i64>,
}

#[derive(Deserialize)]
struct QuizRound {
    // missing or null category ends in 404 through the id check
    #[serde(default, deserialize_with = "deserialize_nullable")]
    quiz_category: QuizCategory,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    /// `null` once every question in the pool has been served.
    question: Option<Question>,
    #[serde(rename = "previousQuestion")]
    previous_question: Vec<i64>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    State(categories): State<Arc<CategoryTable>>,
    ApiJson(round): ApiJson<QuizRound>,
) -> ApiResponse<Json<QuizBody>> {
    let category = round
        .quiz_category
        .id
        .ok_or_else(|| ApiError::NotFound("quiz category id is not a number".to_owned()))?;

    let candidates = if category == ALL_CATEGORIES {
        get_all_questions(&pool).await?
    } else if categories.contains(category) {
        get_questions_for_category(&pool, category).await?
    } else {
        return Err(ApiError::NotFound(format!("category {category}")));
    };
    if candidates.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no questions available in category {category}"
        )));
    }

    let previous: HashSet<i64> = round.previous_questions.iter().copied().collect();
    let selection = select_question(candidates, &previous, &mut rand::thread_rng());

    let question = match selection {
        Selection::Next(q) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[category.to_string()])
                .inc();
            Some(q)
        }
        Selection::Exhausted => {
            QUIZ_SESSIONS_EXHAUSTED.inc();
            tracing::debug!(category, served = previous.len(), "Quiz pool exhausted");
            None
        }
    };

    Ok(Json(QuizBody {
        success: true,
        question,
        previous_question: round.previous_questions,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
