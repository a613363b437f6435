//! The per-endpoint processing loop.
//!
//! Every endpoint is processed independently and in sequence; any failure is
//! caught at the endpoint boundary and recorded as that endpoint's outcome, so
//! one broken endpoint never suppresses the rest of the catalogue.

use serde_json::Value;
use tracing::{info, warn};

use crate::catalogue::RequestDescriptor;
use crate::fetch::{Fetch, FetchError};
use crate::snapshot::{SnapshotStore, StoreError};
use crate::{diff_contract, diff_snapshots, ContractDiff, Error, SnapshotDiff};

/// What happened for one endpoint.
#[derive(Debug)]
pub enum Outcome {
    /// The response matched the previous snapshot or the declared contract.
    NoDifference,
    /// The response's path set differs from the previous snapshot.
    SnapshotDrift(SnapshotDiff),
    /// The response violates its declared contract.
    ContractDrift(ContractDiff),
    /// The descriptor carries no declared shape; the raw body is surfaced for
    /// manual inspection instead of being diffed.
    ShapeMissing {
        /// The raw response body.
        raw: String,
    },
    /// The fetch failed; nothing could be diffed.
    FetchFailed(FetchError),
    /// The response could not be evaluated as a JSON document.
    BadDocument(Error),
    /// The previous snapshot could not be read.
    StoreFailed(StoreError),
}

impl Outcome {
    /// Whether this endpoint needs no attention.
    pub fn is_clean(&self) -> bool {
        matches!(self, Outcome::NoDifference | Outcome::ShapeMissing { .. })
    }
}

/// One endpoint's result, ready for the reporting layer.
#[derive(Debug)]
pub struct EndpointReport {
    /// The descriptor that was processed.
    pub descriptor: RequestDescriptor,
    /// What happened.
    pub outcome: Outcome,
}

/// Drives the catalogue through a fetcher and a snapshot store.
pub struct Runner<F, S> {
    fetcher: F,
    store: S,
}

impl<F: Fetch, S: SnapshotStore> Runner<F, S> {
    /// A runner over the given collaborators.
    pub fn new(fetcher: F, store: S) -> Self {
        Runner { fetcher, store }
    }

    /// Process the whole catalogue against stored snapshots.
    pub fn run_snapshot(&self, catalogue: &[RequestDescriptor]) -> Vec<EndpointReport> {
        catalogue.iter().map(|d| self.process_snapshot(d)).collect()
    }

    /// Process the whole catalogue against declared contracts.
    pub fn run_contract(&self, catalogue: &[RequestDescriptor]) -> Vec<EndpointReport> {
        catalogue.iter().map(|d| self.process_contract(d)).collect()
    }

    /// Diff one endpoint's live response against its stored snapshot, then
    /// persist the response as the new snapshot.
    pub fn process_snapshot(&self, descriptor: &RequestDescriptor) -> EndpointReport {
        info!(method = %descriptor.method, path = %descriptor.path, "processing");

        let outcome = self.snapshot_outcome(descriptor);
        EndpointReport {
            descriptor: descriptor.clone(),
            outcome,
        }
    }

    fn snapshot_outcome(&self, descriptor: &RequestDescriptor) -> Outcome {
        let previous = match self.store.load(descriptor.category, &descriptor.path) {
            Ok(value) => value,
            Err(err) => return Outcome::StoreFailed(err),
        };

        let text = match self.fetcher.fetch(descriptor) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %descriptor.path, error = %err, "fetch failed");
                return Outcome::FetchFailed(err);
            }
        };

        let current: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => return Outcome::BadDocument(Error::Parse(err)),
        };

        let diff = diff_snapshots(&previous, &current);

        // The diff is the product; persistence is best-effort.
        if let Err(err) = self.store.save(descriptor.category, &descriptor.path, &current) {
            warn!(path = %descriptor.path, error = %err, "failed to persist snapshot");
        }

        if diff.is_same() {
            Outcome::NoDifference
        } else {
            Outcome::SnapshotDrift(diff)
        }
    }

    /// Validate one endpoint's live response against its declared contract.
    pub fn process_contract(&self, descriptor: &RequestDescriptor) -> EndpointReport {
        info!(method = %descriptor.method, path = %descriptor.path, "processing");

        let outcome = self.contract_outcome(descriptor);
        EndpointReport {
            descriptor: descriptor.clone(),
            outcome,
        }
    }

    fn contract_outcome(&self, descriptor: &RequestDescriptor) -> Outcome {
        let text = match self.fetcher.fetch(descriptor) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %descriptor.path, error = %err, "fetch failed");
                return Outcome::FetchFailed(err);
            }
        };

        let shape = match descriptor.shape {
            Some(id) => id.shape(),
            None => return Outcome::ShapeMissing { raw: text },
        };

        match diff_contract(&text, &shape) {
            Ok(diff) if diff.is_same() => Outcome::NoDifference,
            Ok(diff) => Outcome::ContractDrift(diff),
            Err(err) => Outcome::BadDocument(err),
        }
    }
}
