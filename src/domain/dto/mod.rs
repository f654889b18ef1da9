//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 타입입니다. Spring의 `@RequestBody` / `@ResponseBody`에 해당합니다.
//!
//! ## 규칙
//!
//! - **요청 DTO**: `Deserialize + Validate`. 핸들러는 서비스 호출 전에 `validate()`를 호출합니다.
//! - **응답 DTO**: `Serialize`, 엔티티로부터 `impl From<Entity>`로 변환합니다.
//! - **id**: ObjectId는 hex 문자열로 노출합니다.
//! - **날짜/시간**: RFC 3339 문자열로 노출합니다.
//! - **민감 정보**: 비밀번호 해시는 응답에 포함하지 않습니다.
//!
//! ```text
//! dto/
//! ├── users/       가입, 로그인, 프로필, 친구, 상품 설명, 역할, 클레임
//! ├── products/    상품, 카테고리, 바코드
//! ├── groups/      그룹, 멤버십, 게시판, 댓글, 공유 상품
//! ├── donations/   기부 기록
//! ├── search/      상품 검색 쿼리
//! └── validators   커스텀 validator 함수
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};

pub mod validators;
pub mod users;
pub mod products;
pub mod groups;
pub mod donations;
pub mod search;

pub use validators::*;

/// BSON 시각을 RFC 3339 문자열로 변환합니다.
pub fn format_datetime(value: DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

pub fn format_optional_datetime(value: Option<DateTime>) -> Option<String> {
    value.map(format_datetime)
}

/// 저장된 엔티티의 id를 hex 문자열로 변환합니다.
pub fn id_hex(id: Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}
