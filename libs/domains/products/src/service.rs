use axum_helpers::{Page, Pageable};
use domain_categories::CategoryRepository;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductDraft, ProductFilter, ProductSortField};
use crate::repository::ProductRepository;

/// Service layer for Product operations
///
/// Holds the category repository to resolve category references before a
/// product is written.
pub struct ProductService<R: ProductRepository, C: CategoryRepository> {
    repository: Arc<R>,
    categories: Arc<C>,
}

impl<R: ProductRepository, C: CategoryRepository> Clone for ProductService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            categories: Arc::clone(&self.categories),
        }
    }
}

impl<R: ProductRepository, C: CategoryRepository> ProductService<R, C> {
    pub fn new(repository: R, categories: C) -> Self {
        Self {
            repository: Arc::new(repository),
            categories: Arc::new(categories),
        }
    }

    /// Keeps the category reference only if that category is stored.
    ///
    /// A dangling reference is dropped without error; the HTTP layer rejects
    /// it before it gets here.
    async fn resolve_category(&self, draft: ProductDraft) -> ProductResult<ProductDraft> {
        let Some(category_id) = draft.category_id else {
            return Ok(draft);
        };

        if self.categories.exists_by_id(category_id).await? {
            return Ok(draft);
        }

        tracing::warn!(category_id, "Dropping reference to unknown category");
        Ok(ProductDraft {
            category_id: None,
            ..draft
        })
    }

    /// Insert a new product. Any id on the draft is ignored.
    #[instrument(skip(self, draft), fields(product_name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft) -> ProductResult<Product> {
        let draft = self.resolve_category(ProductDraft { id: None, ..draft }).await?;
        let product = self.repository.save(draft).await?;

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ProductResult<Option<Product>> {
        tracing::debug!(product_id = id, "Fetching product");
        self.repository.find_by_id(id).await
    }

    /// Fetch a product or fail with `ProductError::NotFound`.
    pub async fn require(&self, id: i64) -> ProductResult<Product> {
        self.get(id).await?.ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_paged(
        &self,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        tracing::debug!(page = pageable.page, size = pageable.size, "Listing products");
        self.repository.find_all_paged(pageable).await
    }

    #[instrument(skip(self))]
    pub async fn list_filtered(
        &self,
        filter: ProductFilter,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        tracing::debug!(
            predicates = filter.predicates().len(),
            page = pageable.page,
            "Filtering products"
        );
        self.repository.find_all_filtered(filter, pageable).await
    }

    /// Replace every field of the product stored under `id`.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: i64, draft: ProductDraft) -> ProductResult<Product> {
        let draft = self
            .resolve_category(ProductDraft {
                id: Some(id),
                ..draft
            })
            .await?;
        let product = self.repository.save(draft).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(product_id = id, "Deleted product");
        Ok(())
    }

    pub async fn exists(&self, id: i64) -> ProductResult<bool> {
        self.repository.exists_by_id(id).await
    }

    pub async fn category_exists(&self, category_id: i64) -> ProductResult<bool> {
        Ok(self.categories.exists_by_id(category_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use domain_categories::{Category, CategoryDraft, InMemoryCategoryRepository};
    use mockall::predicate::eq;

    fn draft(category_id: Option<i64>) -> ProductDraft {
        ProductDraft {
            id: None,
            name: "Product 1".into(),
            description: "Product Description".into(),
            price: 100.0,
            quantity: 10,
            category_id,
        }
    }

    fn stored(draft: ProductDraft, category: Option<Category>) -> Product {
        Product {
            id: draft.id.unwrap_or(1),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            category,
        }
    }

    async fn categories_with_electronics() -> (InMemoryCategoryRepository, i64) {
        let categories = InMemoryCategoryRepository::new();
        let category = categories
            .save(CategoryDraft {
                id: None,
                name: "Electronics".into(),
            })
            .await
            .unwrap();
        (categories, category.id)
    }

    #[tokio::test]
    async fn create_keeps_existing_category() {
        let (categories, category_id) = categories_with_electronics().await;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_save()
            .withf(move |d| d.id.is_none() && d.category_id == Some(category_id))
            .returning(|d| Ok(stored(d, None)));

        let service = ProductService::new(mock_repo, categories);
        assert!(service.create(draft(Some(category_id))).await.is_ok());
    }

    #[tokio::test]
    async fn create_silently_drops_unknown_category() {
        let categories = InMemoryCategoryRepository::new();

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_save()
            .withf(|d| d.category_id.is_none())
            .times(1)
            .returning(|d| Ok(stored(d, None)));

        let service = ProductService::new(mock_repo, categories);
        let product = service.create(draft(Some(404))).await.unwrap();

        assert!(product.category.is_none());
    }

    #[tokio::test]
    async fn create_drops_client_supplied_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_save()
            .withf(|d| d.id.is_none())
            .returning(|d| Ok(stored(d, None)));

        let service = ProductService::new(mock_repo, InMemoryCategoryRepository::new());
        let created = service
            .create(ProductDraft {
                id: Some(9),
                ..draft(None)
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn update_uses_path_id_and_resolves_category() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_save()
            .withf(|d| d.id == Some(5) && d.category_id.is_none())
            .returning(|d| Ok(stored(d, None)));

        let service = ProductService::new(mock_repo, InMemoryCategoryRepository::new());
        let updated = service.update(5, draft(Some(12))).await.unwrap();

        assert_eq!(updated.id, 5);
    }

    #[tokio::test]
    async fn require_maps_missing_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo, InMemoryCategoryRepository::new());
        let result = service.require(3).await;

        assert!(matches!(result, Err(ProductError::NotFound(3))));
    }

    #[tokio::test]
    async fn list_filtered_passes_filter_through() {
        let filter = ProductFilter {
            min_price: Some(100.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        let expected = filter.clone();

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all_filtered()
            .withf(move |f, _| *f == expected)
            .returning(|_, pageable| Ok(Page::from_sorted(Vec::new(), &pageable)));
        mock_repo.expect_find_all_paged().never();

        let service = ProductService::new(mock_repo, InMemoryCategoryRepository::new());
        let page = service
            .list_filtered(filter, Pageable::default())
            .await
            .unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }
}
