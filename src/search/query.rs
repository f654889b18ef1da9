//! 검색어 → tantivy 불리언 쿼리 변환
//!
//! 검색어의 각 단어마다, 검색 대상 필드마다 두 개의 SHOULD 절을 만듭니다.
//!
//! ```text
//! "Green tea*"  →  green, tea
//!   name:green^2.0   name:/green.*/^2.0   description:green   description:/green.*/ ...
//! ```

use std::collections::HashMap;

use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema};
use tantivy::Term;

use crate::errors::errors::AppError;

/// 검색어를 정리하고 단어 목록으로 나눕니다.
///
/// 소문자로 바꾼 뒤 양 끝의 `*`와 공백을 제거하고, 영숫자가 아닌 문자를
/// 구분자로 사용합니다. 인덱스의 기본 토크나이저와 같은 규칙입니다.
pub fn prepare_terms(query: &str) -> Result<Vec<String>, AppError> {
    let lowered = query.to_lowercase();
    let trimmed = lowered.trim_matches(|c| c == '*' || c == ' ');

    if trimmed.is_empty() {
        return Err(AppError::ValidationError("Search string can't be empty".to_string()));
    }

    let terms: Vec<String> = trimmed
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect();

    if terms.is_empty() {
        return Err(AppError::ValidationError("Search string can't be empty".to_string()));
    }

    Ok(terms)
}

/// 이름으로 필드를 찾습니다. 스키마에 없는 필드는 ValidationError입니다.
pub fn resolve_field(schema: &Schema, name: &str) -> Result<Field, AppError> {
    schema
        .get_field(name)
        .map_err(|_| AppError::ValidationError(format!("Unknown search field: {}", name)))
}

fn boosted(query: Box<dyn Query>, boost: Option<f32>) -> Box<dyn Query> {
    match boost {
        Some(boost) => Box::new(BoostQuery::new(query, boost)),
        None => query,
    }
}

/// 단어 × 필드마다 정확 일치 절과 접두어(`term*`) 절을 가진 불리언 쿼리를 만듭니다.
///
/// `searchable`에 없는 필드(내부 `id`, `payload` 포함)는 ValidationError입니다.
pub fn build_query(
    schema: &Schema,
    searchable: &[&str],
    query: &str,
    fields: &[String],
    boosts: &HashMap<String, f32>,
) -> Result<BooleanQuery, AppError> {
    let terms = prepare_terms(query)?;

    if fields.is_empty() {
        return Err(AppError::ValidationError("Can't search with empty fields".to_string()));
    }

    if let Some(name) = fields.iter().find(|name| !searchable.contains(&name.as_str())) {
        return Err(AppError::ValidationError(format!("Unknown search field: {}", name)));
    }

    let resolved = fields
        .iter()
        .map(|name| resolve_field(schema, name).map(|field| (field, boosts.get(name).copied())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(terms.len() * resolved.len() * 2);

    for term in &terms {
        for (field, boost) in &resolved {
            let exact = TermQuery::new(Term::from_field_text(*field, term), IndexRecordOption::Basic);
            clauses.push((Occur::Should, boosted(Box::new(exact), *boost)));

            let prefix = RegexQuery::from_pattern(&format!("{}.*", term), *field)?;
            clauses.push((Occur::Should, boosted(Box::new(prefix), *boost)));
        }
    }

    Ok(BooleanQuery::new(clauses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::schema::{STORED, STRING, TEXT};

    const SEARCHABLE: &[&str] = &["name", "brand"];

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        builder.add_text_field("id", STRING | STORED);
        builder.add_text_field("name", TEXT | STORED);
        builder.add_text_field("brand", TEXT);
        builder.add_text_field("payload", STORED);
        builder.build()
    }

    #[test]
    fn test_prepare_terms_lowercases_and_trims_wildcards() {
        assert_eq!(prepare_terms("  *Green Tea*  ").unwrap(), vec!["green", "tea"]);
        assert_eq!(prepare_terms("oat-milk").unwrap(), vec!["oat", "milk"]);
    }

    #[test]
    fn test_empty_search_string_is_rejected() {
        for query in ["", "   ", "***", " * "] {
            let result = prepare_terms(query);
            assert!(
                matches!(&result, Err(AppError::ValidationError(msg)) if msg == "Search string can't be empty"),
                "query {:?} should be rejected",
                query
            );
        }
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let result = build_query(&schema(), SEARCHABLE, "milk", &[], &HashMap::new());
        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg == "Can't search with empty fields"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let fields = vec!["name".to_string(), "color".to_string()];
        let result = build_query(&schema(), SEARCHABLE, "milk", &fields, &HashMap::new());
        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("color")));
    }

    #[test]
    fn test_internal_fields_are_not_searchable() {
        for internal in ["payload", "id"] {
            let fields = vec![internal.to_string()];
            let result = build_query(&schema(), SEARCHABLE, "milk", &fields, &HashMap::new());
            assert!(
                matches!(&result, Err(AppError::ValidationError(msg)) if msg.contains(internal)),
                "field {:?} should be rejected",
                internal
            );
        }
    }

    #[test]
    fn test_two_clauses_per_term_and_field() {
        let fields = vec!["name".to_string(), "brand".to_string()];
        let mut boosts = HashMap::new();
        boosts.insert("name".to_string(), 2.0);

        let query = build_query(&schema(), SEARCHABLE, "green tea", &fields, &boosts).unwrap();
        assert_eq!(query.clauses().len(), 2 * 2 * 2);
        assert!(query.clauses().iter().all(|(occur, _)| *occur == Occur::Should));
    }
}
