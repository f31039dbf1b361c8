//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use gumby_core::{
  Encounter, Error as SchemaError, GeoPoint, IndexedDocument,
  Individual, Sex, store::DocumentStore,
};
use serde_json::json;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn encounter(day: u32, submitter: &str) -> Encounter {
  Encounter {
    sex: Some(Sex::Male),
    date_occurred: Some(Utc.with_ymd_and_hms(2024, 2, day, 6, 15, 0).unwrap()),
    genus: Some("balaenoptera".into()),
    species: Some("physalus".into()),
    ..Encounter::new(
      Uuid::new_v4(),
      GeoPoint::new(-12.345678, 123.456789).unwrap(),
      submitter,
      false,
    )
  }
}

fn individual(encounters: Vec<Encounter>) -> Individual {
  Individual {
    name: Some("TI-01234".into()),
    alias: Some("zoe".into()),
    sex: Some(Sex::Male),
    last_sighting: encounters.iter().filter_map(|e| e.date_occurred).max(),
    encounters,
    ..Individual::new(Uuid::new_v4())
  }
}

// ─── Raw documents ───────────────────────────────────────────────────────────

#[tokio::test]
async fn put_and_get_raw_document() {
  let s = store().await;
  let doc = json!({ "id": "abc", "nested": [{ "x": 1 }] })
    .as_object()
    .cloned()
    .unwrap();

  s.put("things", "abc".into(), doc.clone()).await.unwrap();
  let fetched = s.get("things", "abc".into()).await.unwrap();
  assert_eq!(fetched, Some(doc));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let result = s.get("things", "nope".into()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn indices_are_separate() {
  let s = store().await;
  let doc = json!({ "a": 1 }).as_object().cloned().unwrap();
  s.put("left", "same".into(), doc).await.unwrap();

  assert!(s.get("right", "same".into()).await.unwrap().is_none());
  assert_eq!(s.count("left").await.unwrap(), 1);
  assert_eq!(s.count("right").await.unwrap(), 0);
}

#[tokio::test]
async fn put_replaces_whole_document() {
  let s = store().await;
  let first = json!({ "a": 1, "b": 2 }).as_object().cloned().unwrap();
  let second = json!({ "a": 3 }).as_object().cloned().unwrap();

  s.put("things", "k".into(), first).await.unwrap();
  s.put("things", "k".into(), second.clone()).await.unwrap();

  assert_eq!(s.get("things", "k".into()).await.unwrap(), Some(second));
  assert_eq!(s.count("things").await.unwrap(), 1);
}

#[tokio::test]
async fn delete_document() {
  let s = store().await;
  let doc = json!({ "a": 1 }).as_object().cloned().unwrap();
  s.put("things", "k".into(), doc).await.unwrap();

  assert!(s.delete("things", "k".into()).await.unwrap());
  assert!(!s.delete("things", "k".into()).await.unwrap());
  assert!(s.get("things", "k".into()).await.unwrap().is_none());
}

// ─── Typed documents ─────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_load_individual() {
  let s = store().await;
  let ind = individual(vec![
    encounter(1, "julia"),
    encounter(9, "alice"),
    encounter(4, "henry"),
  ]);

  s.save(&ind).await.unwrap();
  let loaded: Individual = s.load(ind.id.unwrap()).await.unwrap().unwrap();

  assert_eq!(loaded, ind);
  assert_eq!(loaded.encounters.len(), 3);
  assert_eq!(
    loaded.last_sighting,
    Some(Utc.with_ymd_and_hms(2024, 2, 9, 6, 15, 0).unwrap())
  );
}

#[tokio::test]
async fn saved_body_uses_canonical_wire_shapes() {
  let s = store().await;
  let ind = individual(vec![encounter(2, "fen")]);
  s.save(&ind).await.unwrap();

  let id = ind.document_id().unwrap();
  let raw = s.get(Individual::INDEX, id.clone()).await.unwrap().unwrap();
  assert_eq!(raw["id"], json!(id));
  assert_eq!(raw["sex"], json!("male"));
  assert_eq!(raw["encounters"][0]["submitter_id"], json!("fen"));
  assert_eq!(
    raw["encounters"][0]["point"],
    json!({ "lat": -12.345678, "lon": 123.456789 })
  );
}

#[tokio::test]
async fn load_missing_returns_none() {
  let s = store().await;
  let loaded: Option<Individual> = s.load(Uuid::new_v4()).await.unwrap();
  assert!(loaded.is_none());
}

#[tokio::test]
async fn save_rejects_invalid_individual() {
  let s = store().await;
  let mut bad = encounter(3, "josh");
  bad.submitter_id = None;
  let ind = individual(vec![bad]);

  let err = s.save(&ind).await.unwrap_err();
  match err {
    Error::Schema(SchemaError::Validation(errors)) => {
      assert_eq!(errors.len(), 1);
      assert_eq!(
        errors.violations[0].field().map(ToString::to_string).as_deref(),
        Some("encounters[0].submitter_id")
      );
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert_eq!(s.count(Individual::INDEX).await.unwrap(), 0);
}

#[tokio::test]
async fn load_surfaces_decode_errors() {
  let s = store().await;
  let id = Uuid::new_v4();
  let doc = json!({ "id": id.to_string(), "sex": "martian", "encounters": [] })
    .as_object()
    .cloned()
    .unwrap();
  s.put(Individual::INDEX, id.to_string(), doc).await.unwrap();

  let err = s.load::<Individual>(id).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Schema(ref e) if matches!(e.root_cause(), SchemaError::UnknownEnumMember { .. })
  ));
}

#[tokio::test]
async fn load_all_orders_by_id() {
  let s = store().await;
  let mut saved = Vec::new();
  for i in 0..5 {
    let ind = individual(vec![encounter(i + 1, "margo")]);
    s.save(&ind).await.unwrap();
    saved.push(ind);
  }
  saved.sort_by_key(|ind| ind.document_id().unwrap());

  let all: Vec<Individual> = s.load_all().await.unwrap();
  assert_eq!(all, saved);
}

#[tokio::test]
async fn saving_again_replaces_encounters() {
  let s = store().await;
  let mut ind = individual(vec![encounter(1, "eliot")]);
  s.save(&ind).await.unwrap();

  ind.encounters.push(encounter(5, "quentin"));
  ind.last_sighting = ind.encounters.iter().filter_map(|e| e.date_occurred).max();
  s.save(&ind).await.unwrap();

  let loaded: Individual = s.load(ind.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(loaded.encounters.len(), 2);
  assert_eq!(loaded, ind);
  assert_eq!(s.count(Individual::INDEX).await.unwrap(), 1);
}
