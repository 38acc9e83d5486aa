//! 상품 요청/응답 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::products::product::Product;

/// 상품 생성 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "상품 이름은 1-100자여야 합니다"))]
    pub name: String,

    #[validate(length(max = 2000, message = "상품 설명은 2000자 이하여야 합니다"))]
    pub description: String,

    #[validate(range(min = 0, message = "가격은 0 이상이어야 합니다"))]
    pub price: i64,
}

/// 상품 수정 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "상품 이름은 1-100자여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "상품 설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<i64>,

    pub is_available: Option<bool>,
}

/// 상품 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub is_available: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            is_available: product.is_available,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
