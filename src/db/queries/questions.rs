use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE category = ?1
ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match on the question text. SQLite's `LIKE`
/// only folds ASCII, so matching happens on Unicode-lowercased text here.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    Ok(get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect())
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create_question(pool: &SqlitePool, new: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns `false` when no question had that id.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(id) DO UPDATE SET
    question = excluded.question,
    answer = excluded.answer,
    category = excluded.category,
    difficulty = excluded.difficulty
            "#,
        )
        .bind(q.id)
        .bind(q.question)
        .bind(q.answer)
        .bind(q.category)
        .bind(q.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{in_memory, run_migrations};

    async fn pool() -> SqlitePool {
        let pool = in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_owned(),
            answer: "answer".to_owned(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn create_then_get_and_list_in_id_order() {
        let pool = pool().await;
        let first = create_question(&pool, &new_question("first", 1)).await.unwrap();
        let second = create_question(&pool, &new_question("second", 2)).await.unwrap();
        assert!(first > 0);
        assert!(second > first);

        let q = get_question(&pool, second).await.unwrap().unwrap();
        assert_eq!(q.question, "second");
        assert_eq!(q.category, 2);

        let all = get_all_questions(&pool).await.unwrap();
        assert_eq!(all.iter().map(|q| q.id).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(count_questions(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let pool = pool().await;
        let id = create_question(&pool, &new_question("gone soon", 1)).await.unwrap();

        assert!(delete_question(&pool, id).await.unwrap());
        assert!(!delete_question(&pool, id).await.unwrap());
        assert!(get_question(&pool, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_ignores_case_and_treats_wildcards_literally() {
        let pool = pool().await;
        create_question(&pool, &new_question("What is your Name?", 1)).await.unwrap();
        create_question(&pool, &new_question("100% sure?", 1)).await.unwrap();
        create_question(&pool, &new_question("Pick a number", 1)).await.unwrap();

        let hits = search_questions(&pool, "name").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "What is your Name?");

        let hits = search_questions(&pool, "%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "100% sure?");

        assert!(search_questions(&pool, "zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = pool().await;
        create_question(&pool, &new_question("Où est le CAFÉ?", 3)).await.unwrap();
        create_question(&pool, &new_question("ΣΟΦΙΑ means wisdom", 4)).await.unwrap();

        let hits = search_questions(&pool, "café").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "Où est le CAFÉ?");

        assert_eq!(search_questions(&pool, "σοφια").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn filter_by_category() {
        let pool = pool().await;
        create_question(&pool, &new_question("a", 1)).await.unwrap();
        create_question(&pool, &new_question("b", 2)).await.unwrap();
        create_question(&pool, &new_question("c", 1)).await.unwrap();

        let science = get_questions_for_category(&pool, 1).await.unwrap();
        assert_eq!(
            science.iter().map(|q| q.question.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert!(get_questions_for_category(&pool, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn import_keeps_ids() {
        let pool = pool().await;
        import_questions(
            &pool,
            vec![Question {
                id: 77,
                question: "imported".into(),
                answer: "yes".into(),
                category: 3,
                difficulty: 4,
            }],
        )
        .await
        .unwrap();

        let q = get_question(&pool, 77).await.unwrap().unwrap();
        assert_eq!(q.difficulty, 4);
    }
}
