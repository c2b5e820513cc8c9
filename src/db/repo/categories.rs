//! Category operations for the repository.

use crate::domain::{Category, CategoryId, NewCategory};
use crate::store::StoreError;
use sqlx::Row;

use super::{classify_write_error, Repository};

const DUPLICATE_NAME: &str = "duplicate-category-name";

impl Repository {
    /// List all categories ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, name FROM category ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: CategoryId::new(row.get("id")),
                name: row.get("name"),
            })
            .collect())
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, sqlx::Error> {
        let row = sqlx::query("SELECT id, name FROM category WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Category {
            id: CategoryId::new(r.get("id")),
            name: r.get("name"),
        }))
    }

    /// Insert a category after validating its name.
    ///
    /// # Errors
    /// `StoreError::Duplicate` if the name is taken.
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        let category = category.clone().into_validated()?;

        let result = sqlx::query("INSERT INTO category (name) VALUES (?)")
            .bind(category.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| classify_write_error(e, DUPLICATE_NAME, None))?;

        Ok(Category {
            id: CategoryId::new(result.last_insert_rowid()),
            name: category.name,
        })
    }

    /// Rename a category. Returns `None` if it does not exist.
    pub async fn update_category(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> Result<Option<Category>, StoreError> {
        let category = category.clone().into_validated()?;

        let result = sqlx::query("UPDATE category SET name = ? WHERE id = ?")
            .bind(category.name.as_str())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| classify_write_error(e, DUPLICATE_NAME, None))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Category {
            id,
            name: category.name,
        }))
    }

    /// Delete a category. Its questions become uncategorized.
    pub async fn delete_category(&self, id: CategoryId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM category WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::domain::ValidationError;
    use tempfile::TempDir;

    async fn setup() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("quiz.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_get_category() {
        let (repo, _temp) = setup().await;

        let created = repo
            .create_category(&NewCategory::new(" Фантастика "))
            .await
            .unwrap();
        assert_eq!(created.name, "Фантастика");

        let fetched = repo.get_category(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_list_categories_sorted_by_name() {
        let (repo, _temp) = setup().await;
        for name in ["Drama", "Action", "Comedy"] {
            repo.create_category(&NewCategory::new(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Action", "Comedy", "Drama"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let (repo, _temp) = setup().await;
        repo.create_category(&NewCategory::new("Drama")).await.unwrap();

        let err = repo
            .create_category(&NewCategory::new("Drama"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(DUPLICATE_NAME)));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (repo, _temp) = setup().await;
        let err = repo
            .create_category(&NewCategory::new("  "))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::EmptyCategoryName)
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_category() {
        let (repo, _temp) = setup().await;
        let created = repo.create_category(&NewCategory::new("Drama")).await.unwrap();

        let renamed = repo
            .update_category(created.id, &NewCategory::new("Thriller"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Thriller");

        assert!(repo.delete_category(created.id).await.unwrap());
        assert!(!repo.delete_category(created.id).await.unwrap());
        assert!(repo
            .update_category(created.id, &NewCategory::new("Again"))
            .await
            .unwrap()
            .is_none());
    }
}
