//! # Repository Layer
//!
//! MongoDB 컬렉션별 데이터 액세스 계층입니다. 각 리포지토리는
//! `#[repository(name = ..., collection = ...)]`로 레지스트리에 등록되며,
//! 시작 시 `create_indexes`에서 인덱스를 만들고 기본 데이터를 넣습니다.
//!
//! | 리포지토리 | 컬렉션 | 부가 저장소 |
//! |------------|--------|-------------|
//! | `ProductRepository` | `products` | Redis 캐시, 검색 인덱스 |
//! | `CategoryRepository` | `categories` | |
//! | `UserRepository` | `users` | Redis 캐시 |
//! | `RoleRepository` | `roles` | |
//! | `GroupRepository` | `groups` 외 4개 | |
//! | `DonationRepository` | `donations`, `donors`, `addresses` | |
//!
//! id 문자열은 `ObjectId::parse_str`로 해석하며, 형식이 틀리면 ValidationError입니다.

use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Cursor;
use serde::de::DeserializeOwned;

use crate::core::registry::Repository;
use crate::errors::errors::AppError;
use crate::utils::display_terminal::{print_step_complete, print_step_start, print_sub_task};

pub mod products;
pub mod users;
pub mod groups;
pub mod donations;

/// 16진수 id 문자열을 ObjectId로 변환합니다.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 ID 형식입니다: {}", id)))
}

pub(crate) fn db_error(error: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(error.to_string())
}

/// unique 인덱스 위반 (E11000) 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

/// 커서의 모든 문서를 모읍니다.
pub(crate) async fn collect<T>(cursor: Cursor<T>) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    cursor.try_collect().await.map_err(db_error)
}

/// 삽입 결과에서 생성된 ObjectId를 꺼냅니다.
pub(crate) fn inserted_object_id(result: &mongodb::results::InsertOneResult) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("삽입된 문서의 ObjectId를 확인할 수 없습니다".to_string()))
}

/// 모든 리포지토리의 인덱스 생성과 기본 데이터 준비를 순서대로 실행합니다.
///
/// `ServiceLocator::initialize_all()` 이후에 호출해야 합니다.
pub async fn init_all() -> Result<(), AppError> {
    print_step_start(3, "Preparing MongoDB collections");

    let product_repo = products::ProductRepository::instance();
    product_repo.create_indexes().await?;
    print_ready(product_repo.as_ref());

    let category_repo = products::CategoryRepository::instance();
    category_repo.create_indexes().await?;
    print_ready(category_repo.as_ref());

    let user_repo = users::UserRepository::instance();
    user_repo.create_indexes().await?;
    print_ready(user_repo.as_ref());

    let role_repo = users::RoleRepository::instance();
    role_repo.create_indexes().await?;
    print_ready(role_repo.as_ref());

    let group_repo = groups::GroupRepository::instance();
    group_repo.create_indexes().await?;
    print_ready(group_repo.as_ref());

    let donation_repo = donations::DonationRepository::instance();
    donation_repo.create_indexes().await?;
    print_ready(donation_repo.as_ref());

    print_step_complete(3, "Collections ready", 6);

    Ok(())
}

fn print_ready(repository: &dyn Repository) {
    print_sub_task(repository.name(), &format!("✓ {}", repository.collection_name()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_object_id("not-an-id"), Err(AppError::ValidationError(_))));
    }
}
