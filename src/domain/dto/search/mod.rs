//! 상품 검색 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// `GET /api/search/products?query=&fields=&limit=`
///
/// `fields`는 쉼표로 구분된 필드 목록이며, 없으면 name, description, brand입니다.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 200, message = "검색어는 1-200자 사이여야 합니다"))]
    pub query: String,

    pub fields: Option<String>,

    pub limit: Option<usize>,
}

impl SearchQuery {
    /// 쉼표로 구분된 필드 목록. 빈 항목은 무시합니다.
    pub fn field_list(&self) -> Option<Vec<String>> {
        self.fields.as_ref().map(|fields| {
            fields
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_list_parsing() {
        let query = SearchQuery {
            query: "milk".to_string(),
            fields: Some(" name, brand ,,".to_string()),
            limit: None,
        };
        assert_eq!(query.field_list(), Some(vec!["name".to_string(), "brand".to_string()]));

        let query = SearchQuery { fields: None, ..query };
        assert_eq!(query.field_list(), None);
    }
}
