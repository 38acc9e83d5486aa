//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용합니다.
//!
//! ## 캐싱하지 않는 이유
//!
//! 사용자 조회는 의도적으로 캐싱하지 않습니다. 인증 가드가 매 요청마다
//! 이 리포지토리를 거치는데, 역할 변경이나 계정 비활성화가 캐시 TTL만큼
//! 지연 반영되면 권한 회수가 즉시 적용되지 않기 때문입니다.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;

use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::subject::{Subject, SubjectStore};
use crate::errors::AppError;
use crate::repositories::counters::IdAllocator;

/// 사용자 ID 시퀀스 이름
const USER_ID_SEQUENCE: &str = "users";

/// 사용자 데이터 액세스 리포지토리
///
/// `users` 컬렉션의 CRUD 연산을 담당합니다.
/// ID는 카운터 컬렉션에서 순차 발급됩니다.
#[derive(Clone)]
pub struct UserRepository {
    collection: mongodb::Collection<User>,
    id_allocator: IdAllocator,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection("users"),
            id_allocator: IdAllocator::new(db),
        }
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// 이메일은 유니크 인덱스가 있어 최대 1개의 결과만 반환됩니다.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자명으로 사용자 조회
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 이메일과 사용자명의 중복 여부를 사전에 검증하고,
    /// 카운터에서 새 ID를 발급받아 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    /// * `AppError::DatabaseError` - 데이터베이스 오류
    pub async fn create(
        &self,
        email: String,
        username: String,
        display_name: String,
        password_hash: String,
    ) -> Result<User, AppError> {
        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_username(&username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let id = self.id_allocator.next_id(USER_ID_SEQUENCE).await?;
        let user = User::new(id, email, username, display_name, password_hash);

        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// 사용자 정보 업데이트
    ///
    /// `$set` 연산으로 지정된 필드만 변경하고 최신 문서를 반환합니다.
    pub async fn update(
        &self,
        id: i64,
        mut update_doc: mongodb::bson::Document,
    ) -> Result<Option<User>, AppError> {
        update_doc.insert("updated_at", mongodb::bson::DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자 삭제
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 삭제됨
    /// * `Ok(false)` - 해당 ID의 사용자가 존재하지 않음
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    /// 사용자 목록 조회 (생성일 내림차순, 페이지네이션)
    pub async fn list(&self, page: u64, limit: i64) -> Result<Vec<User>, AppError> {
        use futures_util::TryStreamExt;

        let skip = (page.saturating_sub(1)) * limit as u64;

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 전체 사용자 수
    pub async fn count(&self) -> Result<u64, AppError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    /// email(unique), username(unique), created_at(desc) 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
            .build();

        self.collection
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// 인증 가드가 사용하는 주체 조회 구현
///
/// 비활성 계정은 존재하지 않는 것으로 취급합니다.
#[async_trait]
impl SubjectStore for UserRepository {
    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, AppError> {
        let user = self.find_by_id(id).await?;
        Ok(user.filter(|u| u.is_active).map(|u| u.to_subject()))
    }
}
