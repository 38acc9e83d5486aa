//! 순차 ID 발급기
//!
//! MongoDB `counters` 컬렉션을 사용해 엔티티별 순차 정수 ID를 발급합니다.
//! `find_one_and_update` + `$inc`는 원자적이므로 동시 요청에서도
//! 중복 ID가 발급되지 않습니다.

use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::errors::AppError;

/// 카운터 문서
#[derive(Debug, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    name: String,
    seq: i64,
}

/// 순차 ID 발급기
#[derive(Clone)]
pub struct IdAllocator {
    collection: mongodb::Collection<Counter>,
}

impl IdAllocator {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection("counters"),
        }
    }

    /// 지정된 시퀀스의 다음 ID를 원자적으로 발급합니다.
    ///
    /// 시퀀스가 없으면 1부터 시작합니다 (upsert).
    pub async fn next_id(&self, sequence: &str) -> Result<i64, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .collection
            .find_one_and_update(
                doc! { "_id": sequence },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| {
                AppError::DatabaseError(format!("카운터 발급 실패: {}", sequence))
            })?;

        Ok(counter.seq)
    }
}
