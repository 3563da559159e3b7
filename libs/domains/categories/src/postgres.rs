use async_trait::async_trait;
use axum_helpers::{Page, Pageable};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Select,
};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, CategoryDraft, CategorySortField},
    repository::CategoryRepository,
};

pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: CategorySortField) -> entity::Column {
    match field {
        CategorySortField::Id => entity::Column::Id,
        CategorySortField::Name => entity::Column::Name,
    }
}

/// Applies the requested ordering with id as the final tiebreaker.
pub(crate) fn ordered(
    mut query: Select<entity::Entity>,
    pageable: &Pageable<CategorySortField>,
) -> Select<entity::Entity> {
    for order in &pageable.sort {
        query = query.order_by(sort_column(order.field), order.direction.into());
    }
    query.order_by_asc(entity::Column::Id)
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: i64) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all_paged(
        &self,
        pageable: Pageable<CategorySortField>,
    ) -> CategoryResult<Page<Category>> {
        let total = entity::Entity::find().count(&self.db).await?;
        let models = ordered(entity::Entity::find(), &pageable)
            .offset(pageable.offset())
            .limit(pageable.size)
            .all(&self.db)
            .await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            pageable.page,
            pageable.size,
            total,
        ))
    }

    async fn exists_by_id(&self, id: i64) -> CategoryResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn save(&self, draft: CategoryDraft) -> CategoryResult<Category> {
        let model = match draft.id {
            None => {
                let active = entity::ActiveModel {
                    id: NotSet,
                    name: Set(draft.name),
                };
                let model = active.insert(&self.db).await?;
                tracing::info!(category_id = model.id, "Inserted category");
                model
            }
            Some(id) => {
                let active = entity::ActiveModel {
                    id: Unchanged(id),
                    name: Set(draft.name),
                };
                let model = active.update(&self.db).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => CategoryError::NotFound(id),
                    other => CategoryError::Database(other),
                })?;
                tracing::info!(category_id = model.id, "Replaced category");
                model
            }
        };

        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> CategoryResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(category_id = id, rows = result.rows_affected, "Deleted category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::SortOrder;
    use sea_orm::{DbBackend, MockDatabase, MockExecResult, QueryTrait};
    use std::collections::BTreeMap;

    #[test]
    fn orders_by_requested_fields_then_id() {
        let pageable = Pageable::new(0, 20, vec![SortOrder::desc(CategorySortField::Name)]);
        let sql = ordered(entity::Entity::find(), &pageable)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(
            sql.ends_with(r#"ORDER BY "categories"."name" DESC, "categories"."id" ASC"#),
            "unexpected SQL: {sql}"
        );
    }

    #[tokio::test]
    async fn find_by_id_maps_model() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![entity::Model {
                id: 7,
                name: "Tools".into(),
            }]])
            .into_connection();

        let repo = PgCategoryRepository::new(db);
        let category = repo.find_by_id(7).await.unwrap().unwrap();
        assert_eq!(category.id, 7);
        assert_eq!(category.name, "Tools");
    }

    #[tokio::test]
    async fn replacing_missing_row_is_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let repo = PgCategoryRepository::new(db);
        let result = repo
            .save(CategoryDraft {
                id: Some(99),
                name: "Ghost".into(),
            })
            .await;

        assert!(matches!(result, Err(CategoryError::NotFound(99))));
    }

    #[tokio::test]
    async fn huge_page_number_returns_empty_page() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                sea_orm::Value::BigInt(Some(2)),
            )])]])
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let repo = PgCategoryRepository::new(db);
        let page = repo
            .find_all_paged(Pageable::new(u64::MAX / 10, 2000, vec![]))
            .await
            .unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.page, u64::MAX / 10);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
    }
}
