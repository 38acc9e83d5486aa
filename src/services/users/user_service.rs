//! 사용자 비즈니스 로직 서비스 구현
//!
//! 회원가입, 로그인, 프로필 관리, 관리자용 사용자 관리를 담당합니다.

use mongodb::bson::doc;

use crate::config::auth_config::AuthConfig;
use crate::domain::dto::auth::{LoginRequest, RegisterRequest};
use crate::domain::dto::profile::{ChangePasswordRequest, UpdateProfileRequest};
use crate::domain::dto::users::UpdateUserRequest;
use crate::domain::entities::users::user::User;
use crate::errors::AppError;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::token_service::TokenService;

/// 사용자 비즈니스 로직 서비스
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: UserRepository, tokens: TokenService, config: &AuthConfig) -> Self {
        Self {
            repo,
            tokens,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// 새 사용자 회원가입
    ///
    /// 비밀번호는 bcrypt로 해싱되어 저장됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = self
            .repo
            .create(request.email, request.username, request.display_name, password_hash)
            .await?;

        log::info!("새 사용자 가입: id={}", user.id);

        Ok(user)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 성공 시 사용자와 새로 발급된 액세스 토큰을 반환합니다.
    /// 존재하지 않는 이메일과 잘못된 비밀번호는 동일한 오류로 응답하여
    /// 계정 존재 여부를 노출하지 않습니다.
    pub async fn login(&self, request: LoginRequest) -> Result<(User, String), AppError> {
        let invalid =
            || AppError::Unauthenticated("이메일 또는 비밀번호가 올바르지 않습니다".to_string());

        let user = self
            .repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid)?;

        if !user.can_authenticate_with_password() {
            return Err(invalid());
        }

        let password_hash = user.password_hash.as_deref().ok_or_else(invalid)?;
        let matches = bcrypt::verify(&request.password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            return Err(invalid());
        }

        let token = self.tokens.issue_token(user.id)?;

        // 로그인 시간 기록 (실패해도 로그인은 성공 처리)
        let user = match self
            .repo
            .update(user.id, doc! { "last_login_at": mongodb::bson::DateTime::now() })
            .await
        {
            Ok(Some(updated)) => updated,
            Ok(None) => user,
            Err(e) => {
                log::warn!("로그인 시간 기록 실패: {}", e);
                user
            }
        };

        Ok((user, token))
    }

    /// ID로 사용자 조회
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 사용자 목록 조회 (관리자용)
    pub async fn list_users(&self, page: u64, limit: i64) -> Result<(Vec<User>, u64), AppError> {
        let users = self.repo.list(page, limit).await?;
        let total = self.repo.count().await?;
        Ok((users, total))
    }

    /// 사용자 정보 수정 (관리자용)
    pub async fn update_user(&self, id: i64, request: UpdateUserRequest) -> Result<User, AppError> {
        let mut update_doc = doc! {};

        if let Some(display_name) = request.display_name {
            update_doc.insert("display_name", display_name);
        }
        if let Some(role) = request.role {
            update_doc.insert(
                "role",
                mongodb::bson::ser::to_bson(&role)
                    .map_err(|e| AppError::InternalError(format!("역할 직렬화 실패: {}", e)))?,
            );
        }
        if let Some(is_active) = request.is_active {
            update_doc.insert("is_active", is_active);
        }
        if let Some(is_email_verified) = request.is_email_verified {
            update_doc.insert("is_email_verified", is_email_verified);
        }

        if update_doc.is_empty() {
            return self.get_user(id).await;
        }

        self.repo
            .update(id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 사용자 삭제 (관리자용)
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("사용자 삭제: id={}", id);
        Ok(())
    }

    /// 본인 프로필 수정
    pub async fn update_profile(
        &self,
        id: i64,
        request: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let mut update_doc = doc! {};

        if let Some(display_name) = request.display_name {
            update_doc.insert("display_name", display_name);
        }
        if let Some(username) = request.username {
            if let Some(existing) = self.repo.find_by_username(&username).await? {
                if existing.id != id {
                    return Err(AppError::ConflictError(
                        "이미 사용 중인 사용자명입니다".to_string(),
                    ));
                }
            }
            update_doc.insert("username", username);
        }

        if update_doc.is_empty() {
            return self.get_user(id).await;
        }

        self.repo
            .update(id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 본인 비밀번호 변경
    ///
    /// 현재 비밀번호 확인 후 새 비밀번호를 해싱하여 저장합니다.
    pub async fn change_password(
        &self,
        id: i64,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = self.get_user(id).await?;

        let password_hash = user.password_hash.as_deref().ok_or_else(|| {
            AppError::ValidationError("비밀번호가 설정되지 않은 계정입니다".to_string())
        })?;

        let matches = bcrypt::verify(&request.current_password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            return Err(AppError::Unauthenticated(
                "현재 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }

        let new_hash = bcrypt::hash(&request.new_password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        self.repo
            .update(id, doc! { "password_hash": new_hash })
            .await?;

        Ok(())
    }
}
