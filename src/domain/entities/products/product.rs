//! Product Entity Implementation
//!
//! 상품 엔티티 구현체입니다. 읽기 경로는 공개되어 있고
//! 쓰기 경로는 관리자 전용입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 상품 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 상품 고유 ID (순차 발급 정수)
    #[serde(rename = "_id")]
    pub id: i64,
    /// 상품 이름
    pub name: String,
    /// 상품 설명
    pub description: String,
    /// 가격 (최소 화폐 단위, 예: 원)
    pub price: i64,
    /// 판매 여부
    pub is_available: bool,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Product {
    /// 새 상품 생성
    pub fn new(id: i64, name: String, description: String, price: i64) -> Self {
        let now = DateTime::now();

        Self {
            id,
            name,
            description,
            price,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }
}
