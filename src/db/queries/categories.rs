use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Category id -> label lookup. Serializes as a JSON object keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTable(BTreeMap<i64, String>);

impl CategoryTable {
    pub fn get(&self, id: i64) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Category> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().map(|c| (c.id, c.kind)).collect())
    }
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn load_category_table(pool: &SqlitePool) -> sqlx::Result<CategoryTable> {
    Ok(get_all_categories(pool).await?.into_iter().collect())
}

/// Upserts by id inside one transaction, keeping the ids from the source.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, type) VALUES (?1, ?2)
ON CONFLICT(id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{in_memory, run_migrations};

    #[tokio::test]
    async fn migrations_seed_default_categories() {
        let pool = in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let table = load_category_table(&pool).await.unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get(1), Some("Science"));
        assert_eq!(table.get(6), Some("Sports"));
        assert!(!table.contains(999));
    }

    #[tokio::test]
    async fn import_overwrites_labels_by_id() {
        let pool = in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        import_categories(
            &pool,
            vec![
                Category { id: 1, kind: "Physics".into() },
                Category { id: 42, kind: "Music".into() },
            ],
        )
        .await
        .unwrap();

        let table = load_category_table(&pool).await.unwrap();
        assert_eq!(table.get(1), Some("Physics"));
        assert_eq!(table.get(42), Some("Music"));
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn table_serializes_as_object_keyed_by_id() {
        let table: CategoryTable = vec![
            Category { id: 2, kind: "Art".into() },
            Category { id: 1, kind: "Science".into() },
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!({"1": "Science", "2": "Art"}));
    }
}
