use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath, JsonBody, Page, PageRequest, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnsupportedMediaTypeResponse,
    },
};
use domain_categories::CategoryRepository;
use std::sync::Arc;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ProductError;
use crate::models::{Product, ProductDraft, ProductDto, ProductFilter, ProductSortField};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

type SharedService<R, C> = State<Arc<ProductService<R, C>>>;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        filter_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductDto),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R, C>(service: ProductService<R, C>) -> Router
where
    R: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/filter", get(filter_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Rejects a category reference that names no stored category.
async fn check_category<R, C>(
    service: &ProductService<R, C>,
    input: &ProductDto,
) -> Result<(), AppError>
where
    R: ProductRepository,
    C: CategoryRepository,
{
    match input.category_id() {
        Some(category_id) if !service.category_exists(category_id).await? => {
            Err(ProductError::UnknownCategory(category_id).into())
        }
        _ => Ok(()),
    }
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageRequest),
    responses(
        (status = 200, description = "Page of products", body = Page<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<R, C>,
    QueryParams(request): QueryParams<PageRequest>,
) -> Result<Json<Page<Product>>, AppError> {
    let pageable = request.resolve::<ProductSortField>()?;
    let page = service.list_paged(pageable).await?;
    Ok(Json(page))
}

/// Search products
///
/// Every given criterion must hold. Text criteria match case-insensitive
/// substrings; bounds are inclusive.
#[utoipa::path(
    get,
    path = "/filter",
    tag = TAG,
    params(ProductFilter, PageRequest),
    responses(
        (status = 200, description = "Page of matching products", body = Page<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_products<R: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<R, C>,
    QueryParams(filter): QueryParams<ProductFilter>,
    QueryParams(request): QueryParams<PageRequest>,
) -> Result<Json<Page<Product>>, AppError> {
    let pageable = request.resolve::<ProductSortField>()?;
    let page = service.list_filtered(filter, pageable).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<R, C>,
    ValidatedJson(input): ValidatedJson<ProductDto>,
) -> Result<impl IntoResponse, AppError> {
    if input.id.is_some() {
        return Err(ProductError::IdOnCreate.into());
    }
    check_category(&service, &input).await?;

    let product = service.create(ProductDraft::from(input)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<R, C>,
    IdPath(id): IdPath,
) -> Result<Json<Product>, AppError> {
    let product = service.require(id).await?;
    Ok(Json(product))
}

/// Replace a product
///
/// The body must repeat the path id, and both the product and any
/// referenced category must already exist.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<R, C>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductDto>,
) -> Result<Json<Product>, AppError> {
    let body_id = input.id.ok_or(ProductError::MissingId)?;
    if body_id != id {
        return Err(ProductError::IdMismatch { path: id, body: body_id }.into());
    }
    if !service.exists(id).await? {
        return Err(ProductError::UnknownId(id).into());
    }
    input.validate()?;
    check_category(&service, &input).await?;

    let product = service.update(id, ProductDraft::from(input)).await?;
    Ok(Json(product))
}

/// Delete a product
///
/// Answers 204 whether or not the product existed.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<R, C>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
