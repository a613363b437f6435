use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{json, Value};

use schema_drift::catalogue::{self, RequestDescriptor};
use schema_drift::fetch::{Fetch, FetchError};
use schema_drift::runner::{Outcome, Runner};
use schema_drift::shapes::ShapeId;
use schema_drift::snapshot::{SnapshotStore, StoreError};

/// Serves canned bodies per path; every other path fails with a transport
/// error, as a live API would for an unreachable endpoint.
struct ScriptedFetcher {
    bodies: RefCell<HashMap<String, String>>,
}

impl ScriptedFetcher {
    fn new(bodies: &[(&str, &str)]) -> Self {
        ScriptedFetcher {
            bodies: RefCell::new(
                bodies
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.to_string()))
                    .collect(),
            ),
        }
    }

    fn set(&self, path: &str, body: &str) {
        self.bodies
            .borrow_mut()
            .insert(path.to_owned(), body.to_owned());
    }
}

impl Fetch for ScriptedFetcher {
    fn fetch(&self, descriptor: &RequestDescriptor) -> Result<String, FetchError> {
        self.bodies
            .borrow()
            .get(&descriptor.path)
            .cloned()
            .ok_or_else(|| FetchError::Network {
                url: descriptor.path.clone(),
                message: "connection refused".to_owned(),
            })
    }
}

#[derive(Default)]
struct MemStore {
    snapshots: RefCell<HashMap<String, Value>>,
}

impl SnapshotStore for MemStore {
    fn load(&self, category: &str, path: &str) -> Result<Value, StoreError> {
        Ok(self
            .snapshots
            .borrow()
            .get(&format!("{category}{path}"))
            .cloned()
            .unwrap_or_else(|| json!({})))
    }

    fn save(&self, category: &str, path: &str, document: &Value) -> Result<(), StoreError> {
        self.snapshots
            .borrow_mut()
            .insert(format!("{category}{path}"), document.clone());
        Ok(())
    }
}

#[test]
fn snapshot_mode_detects_drift_between_runs() {
    let fetcher = ScriptedFetcher::new(&[(
        "/keyword/186447",
        r#"{"id": 186447, "name": "rogue"}"#,
    )]);
    let descriptor = RequestDescriptor::get("Keywords", "/keyword/186447");
    let runner = Runner::new(&fetcher, MemStore::default());

    // First run captures the baseline: everything is new.
    let first = runner.process_snapshot(&descriptor);
    assert!(matches!(first.outcome, Outcome::SnapshotDrift(_)));

    // Nothing changed, so the second run is quiet.
    let second = runner.process_snapshot(&descriptor);
    assert!(matches!(second.outcome, Outcome::NoDifference));

    // The API grows a field and drops another.
    fetcher.set("/keyword/186447", r#"{"id": 186447, "slug": "rogue"}"#);
    let third = runner.process_snapshot(&descriptor);
    match third.outcome {
        Outcome::SnapshotDrift(diff) => {
            assert_eq!(diff.added.keys().collect::<Vec<_>>(), vec!["slug"]);
            assert_eq!(diff.removed.keys().collect::<Vec<_>>(), vec!["name"]);
            assert_eq!(diff.unchanged.keys().collect::<Vec<_>>(), vec!["id"]);
        }
        other => panic!("expected drift, got {other:?}"),
    }
}

#[test]
fn every_catalogue_endpoint_produces_exactly_one_report() {
    // Only two endpoints answer; everything else fails at the transport level.
    let fetcher = ScriptedFetcher::new(&[
        ("/configuration", r#"{"images": {}, "change_keys": []}"#),
        ("/movie/popular", r#"{"page": 1, "results": []}"#),
    ]);
    let runner = Runner::new(fetcher, MemStore::default());
    let endpoints = catalogue::endpoints();

    let reports = runner.run_snapshot(&endpoints);

    assert_eq!(reports.len(), endpoints.len());
    let drifted = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::SnapshotDrift(_)))
        .count();
    let failed = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::FetchFailed(_)))
        .count();
    assert_eq!(drifted, 2);
    assert_eq!(failed, endpoints.len() - 2);
}

#[test]
fn contract_mode_reports_drift_with_normalized_keys() {
    let body = r#"{
        "page": 1,
        "results": [
            {"adult": false, "backdrop_path": null, "genre_ids": [28], "id": 1,
             "original_language": "en", "original_title": "x", "overview": "",
             "popularity": 1.0, "poster_path": null, "release_date": "2009-12-10",
             "title": "x", "video": false, "vote_average": 7.2, "vote_count": 10},
            {"adult": false, "backdrop_path": null, "genre_ids": [28], "id": 2,
             "original_language": "en", "original_title": "y", "overview": "",
             "popularity": 1.0, "poster_path": null, "release_date": "2012-07-20",
             "title": "y", "video": false, "vote_average": 8.1, "vote_count": 20,
             "media_type": "movie"}
        ],
        "total_pages": 1,
        "total_results": 2
    }"#;
    let fetcher = ScriptedFetcher::new(&[("/search/movie", body)]);
    let runner = Runner::new(fetcher, MemStore::default());
    let descriptor = RequestDescriptor::get("Search", "/search/movie")
        .param("query", "james")
        .shaped(ShapeId::MovieList);

    let report = runner.process_contract(&descriptor);

    match report.outcome {
        Outcome::ContractDrift(diff) => {
            assert!(diff.missing.is_empty());
            // One entry despite appearing only in the second element: the key
            // is normalized before deduplication.
            assert_eq!(diff.unknown.len(), 1);
            assert_eq!(diff.unknown[0].key, "results[array]/media_type");
        }
        other => panic!("expected contract drift, got {other:?}"),
    }
}

#[test]
fn contract_mode_without_a_shape_surfaces_the_raw_body() {
    let fetcher = ScriptedFetcher::new(&[("/timezones/list", r#"[{"iso_3166_1": "US"}]"#)]);
    let runner = Runner::new(fetcher, MemStore::default());
    let descriptor = RequestDescriptor::get("Timezones", "/timezones/list");

    let report = runner.process_contract(&descriptor);

    match report.outcome {
        Outcome::ShapeMissing { raw } => assert!(raw.contains("iso_3166_1")),
        other => panic!("expected missing shape, got {other:?}"),
    }
}
