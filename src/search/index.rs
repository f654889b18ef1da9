//! 엔티티 타입별 전문 검색 인덱스
//!
//! 문서 하나는 다음 필드로 구성됩니다.
//!
//! | 필드 | 옵션 | 내용 |
//! |------|------|------|
//! | `id` | STRING, STORED | 엔티티 id (삭제/갱신 키) |
//! | `payload` | STORED | 엔티티 전체 JSON |
//! | `Searchable::TEXT_FIELDS` | TEXT | 토큰화, 소문자화 |
//! | `Searchable::KEYWORD_FIELDS` | STRING | 원문 그대로 |
//!
//! 쓰기는 하나의 `IndexWriter`를 `Mutex`로 감싸 직렬화하고, 매 쓰기마다
//! 커밋한 뒤 리더를 다시 읽습니다. 검색은 리더의 스냅샷을 사용하므로
//! 쓰기와 서로 막지 않습니다.

use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::{AllQuery, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, STORED, STRING, TEXT};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use crate::config::SearchConfig;
use crate::errors::errors::{AppError, AppResult};
use crate::search::query::{build_query, resolve_field};

const ID_FIELD: &str = "id";
const PAYLOAD_FIELD: &str = "payload";

/// 검색 인덱스에 저장될 수 있는 엔티티
pub trait Searchable: Serialize + DeserializeOwned + Send + Sync {
    /// 토큰화되는 전문 검색 필드
    const TEXT_FIELDS: &'static [&'static str];
    /// 원문 그대로 저장되는 키워드 필드
    const KEYWORD_FIELDS: &'static [&'static str];

    /// 문서 id. 아직 저장되지 않은 엔티티는 None입니다.
    fn document_id(&self) -> Option<String>;

    /// `(필드 이름, 값)` 목록. 값이 없는 필드는 생략합니다.
    fn field_values(&self) -> Vec<(&'static str, String)>;
}

/// `T` 타입 엔티티의 tantivy 인덱스
pub struct SearchRepository<T: Searchable> {
    index: Index,
    schema: Schema,
    id_field: Field,
    payload_field: Field,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Searchable> SearchRepository<T> {
    fn schema() -> Schema {
        let mut builder = Schema::builder();
        builder.add_text_field(ID_FIELD, STRING | STORED);
        builder.add_text_field(PAYLOAD_FIELD, STORED);
        for name in T::TEXT_FIELDS {
            builder.add_text_field(name, TEXT);
        }
        for name in T::KEYWORD_FIELDS {
            builder.add_text_field(name, STRING);
        }
        builder.build()
    }

    /// 디렉토리의 인덱스를 열거나 새로 만듭니다 (CREATE_OR_APPEND).
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let open_error = |e: &dyn std::fmt::Display| {
            AppError::SearchError(format!("Can't open index at {}: {}", path.display(), e))
        };

        fs::create_dir_all(path).map_err(|e| open_error(&e))?;
        let directory = MmapDirectory::open(path).map_err(|e| open_error(&e))?;
        let index = Index::open_or_create(directory, Self::schema()).map_err(|e| open_error(&e))?;

        log::info!("🔎 Search index opened: {}", path.display());
        Self::with_index(index)
    }

    /// 메모리 인덱스 (테스트용)
    pub fn in_memory() -> AppResult<Self> {
        Self::with_index(Index::create_in_ram(Self::schema()))
    }

    /// 인덱스를 연 뒤 모든 문서를 삭제합니다.
    pub fn open_cleared(path: impl AsRef<Path>) -> AppResult<Self> {
        let repository = Self::open(path)?;
        repository.clear()?;
        Ok(repository)
    }

    fn with_index(index: Index) -> AppResult<Self> {
        let schema = index.schema();
        let id_field = resolve_field(&schema, ID_FIELD)?;
        let payload_field = resolve_field(&schema, PAYLOAD_FIELD)?;

        let writer = index
            .writer_with_num_threads(1, SearchConfig::writer_memory_bytes())
            .map_err(|e| AppError::SearchError(format!("Can't open index writer: {}", e)))?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self {
            index,
            schema,
            id_field,
            payload_field,
            reader,
            writer: Mutex::new(writer),
            _entity: PhantomData,
        })
    }

    fn lock_writer(&self) -> MutexGuard<'_, IndexWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn commit(&self, writer: &mut IndexWriter) -> AppResult<()> {
        writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }

    fn to_document(&self, entity: &T, id: &str) -> AppResult<TantivyDocument> {
        let payload = serde_json::to_string(entity)
            .map_err(|e| AppError::SearchError(format!("Can't serialize document {}: {}", id, e)))?;

        let mut document = TantivyDocument::default();
        document.add_text(self.id_field, id);
        document.add_text(self.payload_field, payload);
        for (name, value) in entity.field_values() {
            document.add_text(resolve_field(&self.schema, name)?, value);
        }
        Ok(document)
    }

    fn required_id(entity: &T) -> AppResult<String> {
        entity
            .document_id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::SearchError("Document id is missing".to_string()))
    }

    /// 문서를 추가하고 즉시 커밋합니다.
    pub fn insert(&self, entity: &T) -> AppResult<()> {
        let id = Self::required_id(entity)?;
        let document = self.to_document(entity, &id)?;

        let mut writer = self.lock_writer();
        writer.add_document(document)?;
        self.commit(&mut writer)
    }

    /// 같은 id의 문서가 있으면 교체합니다. 없으면 아무것도 하지 않습니다.
    pub fn update(&self, entity: &T) -> AppResult<()> {
        let id = Self::required_id(entity)?;
        if self.count_term(self.id_field, &id)? == 0 {
            log::debug!("Search update skipped, document {} is not indexed", id);
            return Ok(());
        }
        let document = self.to_document(entity, &id)?;

        let mut writer = self.lock_writer();
        writer.delete_term(Term::from_field_text(self.id_field, &id));
        writer.add_document(document)?;
        self.commit(&mut writer)
    }

    /// id로 문서를 삭제합니다.
    pub fn delete(&self, entity: &T) -> AppResult<()> {
        let id = Self::required_id(entity)?;
        self.delete_by_id(&id)
    }

    pub fn delete_by_id(&self, id: &str) -> AppResult<()> {
        if id.is_empty() {
            return Err(AppError::SearchError("Document id is missing".to_string()));
        }
        let mut writer = self.lock_writer();
        writer.delete_term(Term::from_field_text(self.id_field, id));
        self.commit(&mut writer)
    }

    /// 모든 문서를 삭제합니다.
    pub fn clear(&self) -> AppResult<()> {
        let mut writer = self.lock_writer();
        writer
            .delete_all_documents()
            .and_then(|_| writer.commit())
            .map_err(|e| AppError::SearchError(format!("Can't clear index: {}", e)))?;
        self.reader.reload()?;
        Ok(())
    }

    /// 검색 가능한 세그먼트를 하나로 병합합니다.
    pub fn optimize(&self) -> AppResult<()> {
        let optimize_error = |e: tantivy::TantivyError| AppError::SearchError(format!("Can't optimize index: {}", e));

        let mut writer = self.lock_writer();
        let segment_ids = self.index.searchable_segment_ids().map_err(optimize_error)?;
        if segment_ids.len() > 1 {
            writer.merge(&segment_ids).wait().map_err(optimize_error)?;
        }
        writer.commit().map_err(optimize_error)?;
        writer.garbage_collect_files().wait().map_err(optimize_error)?;
        self.reader.reload()?;
        Ok(())
    }

    /// 인덱스에 있는 문서 수
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// 현재 세그먼트 수
    pub fn segment_count(&self) -> AppResult<usize> {
        Ok(self.index.searchable_segment_ids()?.len())
    }

    fn count_term(&self, field: Field, value: &str) -> AppResult<usize> {
        let query = TermQuery::new(Term::from_field_text(field, value), IndexRecordOption::Basic);
        Ok(self.reader.searcher().search(&query, &tantivy::collector::Count)?)
    }

    fn search(&self, query: &dyn Query, limit: usize) -> AppResult<Vec<T>> {
        let searcher = self.reader.searcher();
        let top_docs = searcher.search(query, &TopDocs::with_limit(limit.max(1)))?;

        top_docs
            .into_iter()
            .map(|(_score, address)| {
                let document: TantivyDocument = searcher.doc(address)?;
                let payload = document
                    .get_first(self.payload_field)
                    .and_then(|value| value.as_str())
                    .ok_or_else(|| AppError::SearchError("Indexed document has no payload".to_string()))?;
                serde_json::from_str(payload)
                    .map_err(|e| AppError::SearchError(format!("Can't read indexed document: {}", e)))
            })
            .collect()
    }

    /// id가 일치하는 첫 문서
    pub fn get_by_id(&self, id: &str) -> AppResult<Option<T>> {
        self.get(id, ID_FIELD)
    }

    /// 지정한 필드의 값이 일치하는 첫 문서
    ///
    /// 텍스트 필드는 토큰화되어 있으므로 값을 소문자로 바꿔 단일 토큰과 비교합니다.
    pub fn get(&self, key_value: &str, key_field: &str) -> AppResult<Option<T>> {
        let field = resolve_field(&self.schema, key_field)?;
        let value = if T::TEXT_FIELDS.contains(&key_field) {
            key_value.to_lowercase()
        } else {
            key_value.to_string()
        };

        let query = TermQuery::new(Term::from_field_text(field, &value), IndexRecordOption::Basic);
        Ok(self.search(&query, 1)?.into_iter().next())
    }

    /// 모든 문서 (`SearchConfig::max_limit()`까지)
    pub fn get_all(&self) -> AppResult<Vec<T>> {
        self.search(&AllQuery, SearchConfig::max_limit())
    }

    /// 검색어와 일치하는 문서를 점수 순으로 반환합니다.
    ///
    /// `boosts`에 없는 필드는 가중치 1.0입니다.
    pub fn get_all_matching(
        &self,
        query: &str,
        searchable_fields: &[String],
        boosts: &HashMap<String, f32>,
        num_results: usize,
    ) -> AppResult<Vec<T>> {
        let searchable: Vec<&str> = T::TEXT_FIELDS.iter().chain(T::KEYWORD_FIELDS).copied().collect();
        let query = build_query(&self.schema, &searchable, query, searchable_fields, boosts)?;
        self.search(&query, num_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        title: String,
        body: Option<String>,
        tag: String,
    }

    impl Searchable for Note {
        const TEXT_FIELDS: &'static [&'static str] = &["title", "body"];
        const KEYWORD_FIELDS: &'static [&'static str] = &["tag"];

        fn document_id(&self) -> Option<String> {
            Some(self.id.clone())
        }

        fn field_values(&self) -> Vec<(&'static str, String)> {
            let mut values = vec![("title", self.title.clone()), ("tag", self.tag.clone())];
            if let Some(body) = &self.body {
                values.push(("body", body.clone()));
            }
            values
        }
    }

    fn note(id: &str, title: &str, body: Option<&str>, tag: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            body: body.map(str::to_string),
            tag: tag.to_string(),
        }
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_insert_and_get_by_id() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        let milk = note("1", "Oat Milk", Some("Plant based"), "Dairy-Free");

        index.insert(&milk).unwrap();

        assert_eq!(index.get_by_id("1").unwrap(), Some(milk));
        assert_eq!(index.get_by_id("2").unwrap(), None);
        assert_eq!(index.num_docs(), 1);
    }

    #[test]
    fn test_get_by_keyword_is_verbatim_and_text_is_lowercased() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        index.insert(&note("1", "Oat Milk", None, "Dairy-Free")).unwrap();

        assert!(index.get("Dairy-Free", "tag").unwrap().is_some());
        assert!(index.get("dairy-free", "tag").unwrap().is_none());
        assert!(index.get("OAT", "title").unwrap().is_some());
        assert!(matches!(index.get("x", "color"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_insert_without_id_fails() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        let result = index.insert(&note("", "Nameless", None, "t"));
        assert!(matches!(result, Err(AppError::SearchError(_))));
    }

    #[test]
    fn test_update_replaces_existing_and_ignores_missing() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        index.insert(&note("1", "Oat Milk", None, "dairy")).unwrap();

        index.update(&note("1", "Almond Milk", None, "dairy")).unwrap();
        index.update(&note("2", "Rice Milk", None, "dairy")).unwrap();

        assert_eq!(index.num_docs(), 1);
        assert_eq!(index.get_by_id("1").unwrap().unwrap().title, "Almond Milk");
        assert!(index.get_by_id("2").unwrap().is_none());
        assert!(index.get("oat", "title").unwrap().is_none());
    }

    #[test]
    fn test_delete_and_clear() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        let first = note("1", "Bread", None, "bakery");
        index.insert(&first).unwrap();
        index.insert(&note("2", "Bagel", None, "bakery")).unwrap();

        index.delete(&first).unwrap();
        assert_eq!(index.get_all().unwrap().len(), 1);

        index.clear().unwrap();
        assert!(index.get_all().unwrap().is_empty());
        assert!(matches!(index.delete_by_id(""), Err(AppError::SearchError(_))));
    }

    #[test]
    fn test_prefix_and_exact_matching_with_boosts() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        index.insert(&note("1", "Green tea", Some("Loose leaf"), "drinks")).unwrap();
        index.insert(&note("2", "Black coffee", Some("Goes well with green tea"), "drinks")).unwrap();
        index.insert(&note("3", "Sparkling water", None, "drinks")).unwrap();

        let mut boosts = HashMap::new();
        boosts.insert("title".to_string(), 5.0);

        let found = index
            .get_all_matching("gree", &fields(&["title", "body"]), &boosts, 10)
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|n| n.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_matching_on_stored_payload_is_a_validation_error() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        index.insert(&note("1", "Milk", None, "dairy")).unwrap();

        for internal in ["payload", "id"] {
            let result = index.get_all_matching("milk", &fields(&[internal]), &HashMap::new(), 10);
            assert!(matches!(result, Err(AppError::ValidationError(_))), "{} should be rejected", internal);
        }

        let by_tag = index.get_all_matching("dairy", &fields(&["tag"]), &HashMap::new(), 10).unwrap();
        assert_eq!(by_tag.len(), 1);
    }

    #[test]
    fn test_num_results_limits_matches() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        for i in 0..5 {
            index.insert(&note(&i.to_string(), &format!("Milk {}", i), None, "dairy")).unwrap();
        }

        let found = index.get_all_matching("milk", &fields(&["title"]), &HashMap::new(), 3).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_optimize_merges_segments() {
        let index = SearchRepository::<Note>::in_memory().unwrap();
        for i in 0..3 {
            index.insert(&note(&i.to_string(), "Yogurt", None, "dairy")).unwrap();
        }
        assert!(index.segment_count().unwrap() > 1);

        index.optimize().unwrap();

        assert_eq!(index.segment_count().unwrap(), 1);
        assert_eq!(index.get_all().unwrap().len(), 3);
    }

    #[test]
    fn test_index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let index = SearchRepository::<Note>::open(dir.path()).unwrap();
            index.insert(&note("1", "Honey", None, "sweet")).unwrap();
        }

        let reopened = SearchRepository::<Note>::open(dir.path()).unwrap();
        assert_eq!(reopened.get_by_id("1").unwrap().unwrap().title, "Honey");

        drop(reopened);
        let cleared = SearchRepository::<Note>::open_cleared(dir.path()).unwrap();
        assert_eq!(cleared.num_docs(), 0);
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("index");

        assert!(SearchRepository::<Note>::open(&nested).is_ok());
        assert!(nested.exists());
    }
}
