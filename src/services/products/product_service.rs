//! 상품 비즈니스 로직 서비스 구현
//!
//! 읽기 경로는 공개이고 쓰기 경로는 관리자 전용입니다.
//! 캐싱은 리포지토리 계층에서 처리됩니다.

use mongodb::bson::doc;

use crate::domain::dto::products::{CreateProductRequest, UpdateProductRequest};
use crate::domain::entities::products::product::Product;
use crate::errors::AppError;
use crate::repositories::products::product_repo::ProductRepository;

/// 상품 비즈니스 로직 서비스
#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// 판매 중인 상품 목록 조회
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list_available().await
    }

    /// ID로 상품 조회
    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    /// 새 상품 등록 (관리자용)
    pub async fn create_product(&self, request: CreateProductRequest) -> Result<Product, AppError> {
        let product = self
            .repo
            .create(request.name, request.description, request.price)
            .await?;

        log::info!("새 상품 등록: id={}", product.id);

        Ok(product)
    }

    /// 상품 정보 수정 (관리자용)
    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> Result<Product, AppError> {
        let mut update_doc = doc! {};

        if let Some(name) = request.name {
            update_doc.insert("name", name);
        }
        if let Some(description) = request.description {
            update_doc.insert("description", description);
        }
        if let Some(price) = request.price {
            update_doc.insert("price", price);
        }
        if let Some(is_available) = request.is_available {
            update_doc.insert("is_available", is_available);
        }

        if update_doc.is_empty() {
            return self.get_product(id).await;
        }

        self.repo
            .update(id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    /// 상품 삭제 (관리자용)
    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        log::info!("상품 삭제: id={}", id);
        Ok(())
    }
}
