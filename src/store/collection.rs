//! # Collection Handle
//!
//! Async operations over a named collection. Each service request performs
//! exactly one of these calls; absence of a matching document is a successful
//! outcome, never an error.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::memory::Engine;
use super::object_id::ObjectId;
use super::results::{DeleteResult, InsertOneResult, UpdateResult};

/// Single-key sort for `find`
#[derive(Debug, Clone)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }
}

/// Options for `find`
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub sort: Option<SortKey>,
}

impl FindOptions {
    /// Sort ascending by a single field
    pub fn sorted_by(field: impl Into<String>) -> Self {
        Self {
            sort: Some(SortKey::ascending(field)),
        }
    }
}

/// Handle to a named collection
#[derive(Debug, Clone)]
pub struct Collection {
    engine: Arc<Engine>,
    name: String,
}

impl Collection {
    pub(crate) fn new(engine: Arc<Engine>, name: &str) -> Self {
        Self {
            engine,
            name: name.to_string(),
        }
    }

    /// The collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All documents matching `filter`, optionally sorted
    pub async fn find(&self, filter: Filter, options: FindOptions) -> StoreResult<Vec<Value>> {
        self.engine.begin_op()?;
        let collections = self.read_lock()?;

        let mut docs: Vec<Value> = match collections.get(&self.name) {
            Some(docs) => docs.iter().filter(|d| filter.matches(d)).cloned().collect(),
            None => Vec::new(),
        };

        if let Some(sort) = &options.sort {
            docs.sort_by(|a, b| {
                let cmp = compare_json_values(a.get(&sort.field), b.get(&sort.field));
                if sort.ascending {
                    cmp
                } else {
                    cmp.reverse()
                }
            });
        }

        Ok(docs)
    }

    /// First document matching `filter`, or `None` when nothing matches
    pub async fn find_one(&self, filter: Filter) -> StoreResult<Option<Value>> {
        self.engine.begin_op()?;
        let collections = self.read_lock()?;

        let doc = collections
            .get(&self.name)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned());

        Ok(doc)
    }

    /// Insert a document verbatim, assigning a fresh `_id`
    ///
    /// Any caller-supplied `_id` is replaced, which keeps identifiers unique
    /// and store-assigned.
    pub async fn insert_one(&self, mut doc: Value) -> StoreResult<InsertOneResult> {
        self.engine.begin_op()?;

        let id = ObjectId::new();
        match doc.as_object_mut() {
            Some(obj) => {
                obj.insert("_id".to_string(), Value::String(id.to_hex()));
            }
            None => {
                return Err(StoreError::Operation(
                    "document must be a JSON object".to_string(),
                ));
            }
        }

        let mut collections = self.write_lock()?;
        collections.entry(self.name.clone()).or_default().push(doc);

        Ok(InsertOneResult::new(id))
    }

    /// Merge the supplied fields into the first document matching `filter`
    ///
    /// Fields absent from `patch` are untouched. Zero matches is a successful
    /// call reporting zero counts; a merge that changes nothing reports
    /// `modified_count` 0.
    pub async fn update_one(&self, filter: Filter, patch: Value) -> StoreResult<UpdateResult> {
        self.engine.begin_op()?;

        let patch = match patch {
            Value::Object(map) => map,
            _ => {
                return Err(StoreError::Operation(
                    "patch must be a JSON object".to_string(),
                ));
            }
        };

        let mut collections = self.write_lock()?;
        let docs = match collections.get_mut(&self.name) {
            Some(docs) => docs,
            None => return Ok(UpdateResult::new(0, 0)),
        };

        let doc = match docs.iter_mut().find(|d| filter.matches(d)) {
            Some(doc) => doc,
            None => return Ok(UpdateResult::new(0, 0)),
        };

        let before = doc.clone();
        if let Some(obj) = doc.as_object_mut() {
            for (key, value) in patch {
                obj.insert(key, value);
            }
        }

        let modified = if *doc == before { 0 } else { 1 };
        Ok(UpdateResult::new(1, modified))
    }

    /// Remove the first document matching `filter`
    ///
    /// Zero deletions is a successful call reporting a zero count.
    pub async fn delete_one(&self, filter: Filter) -> StoreResult<DeleteResult> {
        self.engine.begin_op()?;

        let mut collections = self.write_lock()?;
        let docs = match collections.get_mut(&self.name) {
            Some(docs) => docs,
            None => return Ok(DeleteResult::new(0)),
        };

        match docs.iter().position(|d| filter.matches(d)) {
            Some(idx) => {
                docs.remove(idx);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    fn read_lock(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Vec<Value>>>> {
        self.engine
            .collections
            .read()
            .map_err(|_| StoreError::Lock(self.name.clone()))
    }

    fn write_lock(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Vec<Value>>>> {
        self.engine
            .collections
            .write()
            .map_err(|_| StoreError::Lock(self.name.clone()))
    }
}

/// Compare JSON values for sorting: strings lexicographic, numbers by value,
/// missing keys sort last
fn compare_json_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .unwrap_or(0.0)
            .partial_cmp(&b.as_f64().unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreConfig};
    use serde_json::json;

    async fn movies() -> (Store, Collection) {
        let store = Store::connect(StoreConfig::default()).await.unwrap();
        let movies = store.collection("movies");
        (store, movies)
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let (_store, movies) = movies().await;

        let result = movies.insert_one(json!({"title": "Alien"})).await.unwrap();
        assert!(result.acknowledged);

        let doc = movies
            .find_one(Filter::by_id(result.inserted_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["title"], "Alien");
        assert_eq!(doc["_id"], result.inserted_id.to_hex());
    }

    #[tokio::test]
    async fn test_insert_replaces_caller_supplied_id() {
        let (_store, movies) = movies().await;

        let result = movies
            .insert_one(json!({"_id": "bogus", "title": "Alien"}))
            .await
            .unwrap();

        let doc = movies
            .find_one(Filter::by_id(result.inserted_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["_id"], result.inserted_id.to_hex());
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object() {
        let (_store, movies) = movies().await;
        assert!(movies.insert_one(json!([1, 2, 3])).await.is_err());
    }

    #[tokio::test]
    async fn test_find_one_absent_is_none_not_error() {
        let (_store, movies) = movies().await;
        let doc = movies.find_one(Filter::by_id(ObjectId::new())).await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_find_sorts_ascending_by_field() {
        let (_store, movies) = movies().await;
        for title in ["B", "A", "C"] {
            movies.insert_one(json!({"title": title})).await.unwrap();
        }

        let docs = movies
            .find(Filter::empty(), FindOptions::sorted_by("title"))
            .await
            .unwrap();
        let titles: Vec<&str> = docs.iter().map(|d| d["title"].as_str().unwrap()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_find_sort_puts_missing_fields_last() {
        let (_store, movies) = movies().await;
        movies.insert_one(json!({"year": 1979})).await.unwrap();
        movies.insert_one(json!({"title": "Alien"})).await.unwrap();

        let docs = movies
            .find(Filter::empty(), FindOptions::sorted_by("title"))
            .await
            .unwrap();
        assert_eq!(docs[0]["title"], "Alien");
        assert!(docs[1].get("title").is_none());
    }

    #[tokio::test]
    async fn test_update_merges_only_supplied_fields() {
        let (_store, movies) = movies().await;
        let id = movies
            .insert_one(json!({"title": "Alien", "year": 1978}))
            .await
            .unwrap()
            .inserted_id;

        let result = movies
            .update_one(Filter::by_id(id), json!({"year": 1979}))
            .await
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 1);

        let doc = movies.find_one(Filter::by_id(id)).await.unwrap().unwrap();
        assert_eq!(doc["title"], "Alien");
        assert_eq!(doc["year"], 1979);
    }

    #[tokio::test]
    async fn test_update_with_identical_values_modifies_nothing() {
        let (_store, movies) = movies().await;
        let id = movies
            .insert_one(json!({"title": "Alien"}))
            .await
            .unwrap()
            .inserted_id;

        let result = movies
            .update_one(Filter::by_id(id), json!({"title": "Alien"}))
            .await
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 0);
    }

    #[tokio::test]
    async fn test_update_without_match_reports_zero_counts() {
        let (_store, movies) = movies().await;
        let result = movies
            .update_one(Filter::by_id(ObjectId::new()), json!({"year": 2000}))
            .await
            .unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.modified_count, 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_in_outcome() {
        let (_store, movies) = movies().await;
        let id = movies
            .insert_one(json!({"title": "Alien"}))
            .await
            .unwrap()
            .inserted_id;

        let first = movies.delete_one(Filter::by_id(id)).await.unwrap();
        assert_eq!(first.deleted_count, 1);

        let second = movies.delete_one(Filter::by_id(id)).await.unwrap();
        assert_eq!(second.deleted_count, 0);
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let (store, movies) = movies().await;
        movies.insert_one(json!({"title": "Alien"})).await.unwrap();

        let other = store.collection("shows");
        let docs = other.find(Filter::empty(), FindOptions::default()).await.unwrap();
        assert!(docs.is_empty());
    }
}
