use axum_helpers::{Page, Pageable};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryDraft, CategorySortField};
use crate::repository::CategoryRepository;

/// Service layer for Category operations
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Insert a new category. Any id on the draft is ignored.
    #[instrument(skip(self, draft), fields(category_name = %draft.name))]
    pub async fn create(&self, draft: CategoryDraft) -> CategoryResult<Category> {
        let category = self
            .repository
            .save(CategoryDraft { id: None, ..draft })
            .await?;

        tracing::info!(category_id = category.id, "Created category");
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> CategoryResult<Option<Category>> {
        tracing::debug!(category_id = id, "Fetching category");
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_paged(
        &self,
        pageable: Pageable<CategorySortField>,
    ) -> CategoryResult<Page<Category>> {
        tracing::debug!(page = pageable.page, size = pageable.size, "Listing categories");
        self.repository.find_all_paged(pageable).await
    }

    /// Replace every field of the category stored under `id`.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: i64, draft: CategoryDraft) -> CategoryResult<Category> {
        let category = self
            .repository
            .save(CategoryDraft {
                id: Some(id),
                ..draft
            })
            .await?;

        tracing::info!(category_id = id, "Updated category");
        Ok(category)
    }

    /// Hard delete. Products referencing the category are not checked.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> CategoryResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(category_id = id, "Deleted category");
        Ok(())
    }

    pub async fn exists(&self, id: i64) -> CategoryResult<bool> {
        self.repository.exists_by_id(id).await
    }

    /// Fetch a category or fail with `CategoryError::NotFound`.
    pub async fn require(&self, id: i64) -> CategoryResult<Category> {
        self.get(id).await?.ok_or(CategoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn create_drops_client_supplied_id() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_save()
            .withf(|draft| draft.id.is_none() && draft.name == "Books")
            .returning(|draft| {
                Ok(Category {
                    id: 1,
                    name: draft.name,
                })
            });

        let service = CategoryService::new(mock_repo);
        let created = service
            .create(CategoryDraft {
                id: Some(77),
                name: "Books".into(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn update_uses_path_id() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_save()
            .withf(|draft| draft.id == Some(5))
            .returning(|draft| {
                Ok(Category {
                    id: 5,
                    name: draft.name,
                })
            });

        let service = CategoryService::new(mock_repo);
        let updated = service
            .update(
                5,
                CategoryDraft {
                    id: None,
                    name: "Garden".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Garden");
    }

    #[tokio::test]
    async fn require_maps_missing_to_not_found() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Ok(None));

        let service = CategoryService::new(mock_repo);
        let result = service.require(3).await;

        assert!(matches!(result, Err(CategoryError::NotFound(3))));
    }

    #[tokio::test]
    async fn delete_delegates_without_existence_check() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_delete_by_id()
            .with(eq(8))
            .times(1)
            .returning(|_| Ok(()));
        mock_repo.expect_exists_by_id().never();

        let service = CategoryService::new(mock_repo);
        assert!(service.delete(8).await.is_ok());
    }
}
