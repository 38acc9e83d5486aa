//! # 상품 리포지토리 구현
//!
//! 상품 엔티티의 데이터 액세스 계층입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 읽기 캐싱을 지원합니다.
//!
//! ## 캐싱 전략
//!
//! * **캐시 키**: 개별 상품 `product:{id}`, 목록 `products:list`
//! * **TTL**: 300초 (5분)
//! * **무효화**: 쓰기 연산 시 관련 키 삭제

use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

use crate::caching::redis::RedisClient;
use crate::db::Database;
use crate::domain::entities::products::product::Product;
use crate::errors::AppError;
use crate::repositories::counters::IdAllocator;

/// 상품 ID 시퀀스 이름
const PRODUCT_ID_SEQUENCE: &str = "products";

/// 캐시 TTL (초)
const CACHE_TTL_SECS: u64 = 300;

/// 목록 캐시 키
const LIST_CACHE_KEY: &str = "products:list";

/// 상품 데이터 액세스 리포지토리
#[derive(Clone)]
pub struct ProductRepository {
    collection: mongodb::Collection<Product>,
    id_allocator: IdAllocator,
    redis: RedisClient,
}

impl ProductRepository {
    pub fn new(db: &Database, redis: RedisClient) -> Self {
        Self {
            collection: db.get_database().collection("products"),
            id_allocator: IdAllocator::new(db),
            redis,
        }
    }

    fn cache_key(id: i64) -> String {
        format!("product:{}", id)
    }

    /// ID로 상품 조회 (캐시 우선)
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let cache_key = Self::cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Product>(&cache_key).await {
            return Ok(Some(cached));
        }

        let product = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref product) = product {
            let _ = self.redis.set_with_expiry(&cache_key, product, CACHE_TTL_SECS).await;
        }

        Ok(product)
    }

    /// 판매 중인 상품 목록 조회 (캐시 우선)
    pub async fn list_available(&self) -> Result<Vec<Product>, AppError> {
        if let Ok(Some(cached)) = self.redis.get::<Vec<Product>>(LIST_CACHE_KEY).await {
            return Ok(cached);
        }

        let cursor = self
            .collection
            .find(doc! { "is_available": true })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let products: Vec<Product> = cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.redis.set_with_expiry(LIST_CACHE_KEY, &products, CACHE_TTL_SECS).await;

        Ok(products)
    }

    /// 새 상품 생성
    pub async fn create(
        &self,
        name: String,
        description: String,
        price: i64,
    ) -> Result<Product, AppError> {
        let id = self.id_allocator.next_id(PRODUCT_ID_SEQUENCE).await?;
        let product = Product::new(id, name, description, price);

        self.collection
            .insert_one(&product)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let _ = self.redis.del(LIST_CACHE_KEY).await;

        Ok(product)
    }

    /// 상품 정보 업데이트
    ///
    /// 갱신 성공 시 개별 캐시와 목록 캐시를 무효화합니다.
    pub async fn update(
        &self,
        id: i64,
        mut update_doc: mongodb::bson::Document,
    ) -> Result<Option<Product>, AppError> {
        update_doc.insert("updated_at", mongodb::bson::DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            let _ = self.redis.del(&Self::cache_key(id)).await;
            let _ = self.redis.del(LIST_CACHE_KEY).await;
        }

        Ok(updated)
    }

    /// 상품 삭제
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            let _ = self.redis.del(&Self::cache_key(id)).await;
            let _ = self.redis.del(LIST_CACHE_KEY).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
