use async_trait::async_trait;
use axum_helpers::{Page, Pageable};
use domain_categories::entity as category;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SelectTwo, TransactionTrait,
};

use crate::{
    entity::{self, into_product},
    error::{ProductError, ProductResult},
    models::{Product, ProductDraft, ProductFilter, ProductSortField},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: SelectTwo<entity::Entity, category::Entity>,
        pageable: &Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        let total = query.clone().count(&self.db).await?;
        let rows = ordered(query, pageable)
            .offset(pageable.offset())
            .limit(pageable.size)
            .all(&self.db)
            .await?;

        Ok(Page::new(
            rows.into_iter()
                .map(|(model, category)| into_product(model, category))
                .collect(),
            pageable.page,
            pageable.size,
            total,
        ))
    }
}

fn sort_column(field: ProductSortField) -> entity::Column {
    match field {
        ProductSortField::Id => entity::Column::Id,
        ProductSortField::Name => entity::Column::Name,
        ProductSortField::Description => entity::Column::Description,
        ProductSortField::Price => entity::Column::Price,
        ProductSortField::Quantity => entity::Column::Quantity,
    }
}

fn joined() -> SelectTwo<entity::Entity, category::Entity> {
    entity::Entity::find().find_also_related(category::Entity)
}

/// Applies the requested ordering with id as the final tiebreaker.
pub(crate) fn ordered(
    mut query: SelectTwo<entity::Entity, category::Entity>,
    pageable: &Pageable<ProductSortField>,
) -> SelectTwo<entity::Entity, category::Entity> {
    for order in &pageable.sort {
        query = query.order_by(sort_column(order.field), order.direction.into());
    }
    query.order_by_asc(entity::Column::Id)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let row = entity::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await?;
        Ok(row.map(|(model, category)| into_product(model, category)))
    }

    async fn find_all_paged(
        &self,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        self.fetch_page(joined(), &pageable).await
    }

    async fn find_all_filtered(
        &self,
        filter: ProductFilter,
        pageable: Pageable<ProductSortField>,
    ) -> ProductResult<Page<Product>> {
        self.fetch_page(joined().filter(filter.condition()), &pageable)
            .await
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn save(&self, draft: ProductDraft) -> ProductResult<Product> {
        let txn = self.db.begin().await?;

        // Hold the category row until commit so it cannot vanish under the write.
        let category = match draft.category_id {
            Some(category_id) => {
                let found = category::Entity::find_by_id(category_id)
                    .lock_shared()
                    .one(&txn)
                    .await?;
                if found.is_none() {
                    tracing::warn!(category_id, "Category vanished, storing product without it");
                }
                found
            }
            None => None,
        };
        let category_id = category.as_ref().map(|c| c.id);

        let model = match draft.id {
            None => {
                let active = entity::ActiveModel {
                    id: NotSet,
                    name: Set(draft.name),
                    description: Set(draft.description),
                    price: Set(draft.price),
                    quantity: Set(draft.quantity),
                    category_id: Set(category_id),
                };
                let model = active.insert(&txn).await?;
                tracing::info!(product_id = model.id, "Inserted product");
                model
            }
            Some(id) => {
                let active = entity::ActiveModel {
                    id: Unchanged(id),
                    name: Set(draft.name),
                    description: Set(draft.description),
                    price: Set(draft.price),
                    quantity: Set(draft.quantity),
                    category_id: Set(category_id),
                };
                let model = active.update(&txn).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => ProductError::NotFound(id),
                    other => ProductError::Database(other),
                })?;
                tracing::info!(product_id = model.id, "Replaced product");
                model
            }
        };

        txn.commit().await?;
        Ok(into_product(model, category))
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(product_id = id, rows = result.rows_affected, "Deleted product");
        Ok(())
    }
}
