//! Product HTTP Handlers
//!
//! 상품 조회는 공개 엔드포인트이고 등록/수정/삭제는 관리자 전용입니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::errors::AppError;
use crate::services::products::product_service::ProductService;

/// 상품 목록 조회 핸들러 (공개)
///
/// # Endpoint
/// `GET /api/v1/products`
#[get("")]
pub async fn list_products(
    products: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let items = products.list_products().await?;
    let responses: Vec<ProductResponse> = items.into_iter().map(ProductResponse::from).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// 상품 상세 조회 핸들러 (공개)
///
/// # Endpoint
/// `GET /api/v1/products/{id}`
#[get("/{id}")]
pub async fn get_product(
    products: web::Data<ProductService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product = products.get_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// 상품 등록 핸들러 (관리자 전용)
///
/// # Endpoint
/// `POST /api/v1/admin/products`
#[post("")]
pub async fn create_product(
    products: web::Data<ProductService>,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let product = products.create_product(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// 상품 수정 핸들러 (관리자 전용)
///
/// # Endpoint
/// `PATCH /api/v1/admin/products/{id}`
#[patch("/{id}")]
pub async fn update_product(
    products: web::Data<ProductService>,
    path: web::Path<i64>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let product = products
        .update_product(path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// 상품 삭제 핸들러 (관리자 전용)
///
/// # Endpoint
/// `DELETE /api/v1/admin/products/{id}`
#[delete("/{id}")]
pub async fn delete_product(
    products: web::Data<ProductService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    products.delete_product(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "상품이 삭제되었습니다"
    })))
}
