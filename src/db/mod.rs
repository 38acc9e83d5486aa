//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결 관리를 담당하는 모듈입니다.
//! 연결은 main에서 한 번 생성되어 리포지토리들에 명시적으로 주입됩니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::config::DatabaseConfig;
//! use crate::db::Database;
//!
//! let database = Database::connect(&config.database).await?;
//! let users = database.get_database().collection::<User>("users");
//! ```

use log::info;
use mongodb::{Client, options::ClientOptions};

use crate::config::app_config::DatabaseConfig;

/// MongoDB 데이터베이스 연결 래퍼
///
/// MongoDB 클라이언트와 데이터베이스 연결을 관리하며,
/// 리포지토리 계층에서 데이터베이스 작업을 위한 기본 인터페이스를 제공합니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 설정값으로 새 MongoDB 연결을 생성합니다.
    ///
    /// 연결 후 `ping` 명령으로 서버 가용성을 검증합니다.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        // 모니터링 및 로깅에 표시될 애플리케이션 이름
        client_options.app_name = Some("api_starter".to_string());

        let client = Client::with_options(client_options)?;

        // 연결 테스트
        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    ///
    /// 리포지토리에서 컬렉션에 접근할 때 사용됩니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// MongoDB 클라이언트 인스턴스를 반환합니다.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// 데이터베이스 이름을 반환합니다.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
