use serde::Deserialize;
use validator::Validate;

use crate::domain::dto::validators::validate_not_blank;

/// 그룹 생성/변경 요청
#[derive(Debug, Deserialize, Validate)]
pub struct GroupRequest {
    #[validate(length(min = 1, max = 100, message = "그룹 이름은 1-100자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "그룹 정보는 2000자 이하여야 합니다"))]
    pub information: String,
}

/// 게시판 생성/변경 요청
#[derive(Debug, Deserialize, Validate)]
pub struct BoardRequest {
    #[validate(length(min = 1, max = 100, message = "게시판 이름은 1-100자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "게시판 정보는 2000자 이하여야 합니다"))]
    pub information: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BoardRightsRequest {
    pub granted: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "게시판 id가 필요합니다"))]
    pub board_id: String,

    #[validate(length(min = 1, max = 2000, message = "댓글은 1-2000자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub comment: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "댓글 id가 필요합니다"))]
    pub comment_id: String,

    #[validate(length(min = 1, max = 2000, message = "댓글은 1-2000자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub comment: String,
}

/// 게시판에 카탈로그 상품 공유
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupProductRequest {
    #[validate(length(min = 1, message = "게시판 id가 필요합니다"))]
    pub board_id: String,

    #[validate(length(min = 1, message = "상품 id가 필요합니다"))]
    pub product_id: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "상품 정보는 2000자 이하여야 합니다"))]
    pub information: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGroupProductRequest {
    #[validate(length(min = 1, message = "게시판 id가 필요합니다"))]
    pub board_id: String,

    #[validate(length(min = 1, message = "그룹 상품 id가 필요합니다"))]
    pub group_product_id: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "상품 정보는 2000자 이하여야 합니다"))]
    pub information: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_request_requires_name() {
        let request: GroupRequest = serde_json::from_str(r#"{"name": " ", "information": "x"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: GroupRequest = serde_json::from_str(r#"{"name": "Zero waste Minsk"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.information, "");
    }

    #[test]
    fn test_comment_must_not_be_blank() {
        let request: CreateCommentRequest =
            serde_json::from_str(r#"{"board_id": "65f0c0ffee0000000000beef", "comment": "   "}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
