//! Category repository
//!
//! Categories form an optional hierarchy through `parent_category_id`.
//! Names are unique across the whole catalog, enforced by the
//! `category_name` index.

use crate::db::catalog::map_create_err;
use crate::db::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

pub const CATEGORY_TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    db: Surreal<Db>,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Create a category with a generated id
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if let Some(parent_id) = &data.parent_category_id {
            self.get_by_id(parent_id).await.map_err(|_| {
                RepoError::Validation(format!("Parent category {parent_id} does not exist"))
            })?;
        }

        let category = Category {
            category_id: Uuid::new_v4().to_string(),
            name: data.name.clone(),
            description: data.description.unwrap_or_default(),
            parent_category_id: data.parent_category_id,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<Category> = self
            .db
            .create((CATEGORY_TABLE, category.category_id.as_str()))
            .content(category)
            .await
            .map_err(|e| map_create_err(&format!("Category '{}'", data.name), e))?;

        created.ok_or_else(|| RepoError::Database("Category creation returned no record".into()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut response = self.db.query("SELECT * FROM category ORDER BY name").await?;
        let categories: Vec<Category> = response.take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, category_id: &str) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self.db.select((CATEGORY_TABLE, category_id)).await?;
        Ok(category)
    }

    pub async fn get_by_id(&self, category_id: &str) -> RepoResult<Category> {
        self.find_by_id(category_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {category_id}")))
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let mut response = self
            .db
            .query("SELECT * FROM category WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let categories: Vec<Category> = response.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Direct children of a category
    pub async fn find_subcategories(&self, parent_id: &str) -> RepoResult<Vec<Category>> {
        let mut response = self
            .db
            .query(
                "SELECT * FROM category \
                 WHERE parent_category_id = $parent \
                 ORDER BY name",
            )
            .bind(("parent", parent_id.to_string()))
            .await?;
        let categories: Vec<Category> = response.take(0)?;
        Ok(categories)
    }

    pub async fn update(&self, category_id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(RepoError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if let Some(parent_id) = &data.parent_category_id {
            if parent_id == category_id {
                return Err(RepoError::Validation(
                    "Category cannot be its own parent".into(),
                ));
            }
            self.get_by_id(parent_id).await.map_err(|_| {
                RepoError::Validation(format!("Parent category {parent_id} does not exist"))
            })?;
        }

        let updated: Option<Category> = self
            .db
            .update((CATEGORY_TABLE, category_id))
            .merge(data)
            .await
            .map_err(|e| map_create_err("Category name", e))?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {category_id}")))
    }

    /// Delete a category; refuses while subcategories still point at it
    pub async fn delete(&self, category_id: &str) -> RepoResult<()> {
        if !self.find_subcategories(category_id).await?.is_empty() {
            return Err(RepoError::Validation(
                "Category still has subcategories".into(),
            ));
        }
        let deleted: Option<Category> = self.db.delete((CATEGORY_TABLE, category_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Category {category_id}")));
        }
        Ok(())
    }
}
