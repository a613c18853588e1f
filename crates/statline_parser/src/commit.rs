//! Applying a parsed sheet to character state.
//!
//! A sheet is parsed in full before anything is written. The store sees one
//! [`StatusStore::commit`] call per successful parse and nothing at all for a
//! failed one.

use statline_foundation::{Result, SkillCatalog};
use statline_markup::Document;

use crate::context::SubpointFormula;
use crate::json::StatusJson;
use crate::skills::Anomaly;
use crate::snapshot::CharacterStatusSnapshot;
use crate::status::StatusSnapshotParser;

/// The character state a parsed sheet is written into.
pub trait StatusStore {
    /// Adventures remaining as last committed.
    fn adventures(&self) -> i64;

    /// Replaces the stored status with `snapshot`.
    fn commit(&mut self, snapshot: CharacterStatusSnapshot);

    /// Replaces the three statistics' value and base from a status object.
    fn commit_stat_values(&mut self, stats: &StatusJson);
}

/// Receives gains and losses worked out from a commit.
pub trait ResultProcessor {
    /// Adventures remaining changed by `delta`.
    fn adventures_changed(&mut self, delta: i64);
}

impl<F> ResultProcessor for F
where
    F: FnMut(i64),
{
    fn adventures_changed(&mut self, delta: i64) {
        self(delta);
    }
}

/// What a commit did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// New adventures minus previously stored adventures.
    pub adventures_delta: i64,
    /// Anomalies from the parse.
    pub anomalies: Vec<Anomaly>,
}

/// Commits a snapshot and reports the adventures delta.
///
/// The delta saturates at the `i64` bounds.
pub fn commit_status(
    snapshot: CharacterStatusSnapshot,
    store: &mut impl StatusStore,
    processor: &mut impl ResultProcessor,
) -> i64 {
    let delta = snapshot.adventures.saturating_sub(store.adventures());
    let user_id = snapshot.user_id;
    store.commit(snapshot);
    processor.adventures_changed(delta);
    tracing::info!(user_id, adventures_delta = delta, "committed character status");
    delta
}

/// Parses a sheet and, only if that succeeds, commits it.
///
/// # Errors
///
/// Returns the parse error. Neither `store` nor `processor` is touched.
pub fn parse_and_commit<C, F>(
    parser: &StatusSnapshotParser<'_, C, F>,
    document: &Document,
    store: &mut impl StatusStore,
    processor: &mut impl ResultProcessor,
) -> Result<CommitReport>
where
    C: SkillCatalog,
    F: SubpointFormula,
{
    let parsed = parser.parse(document)?;
    let adventures_delta = commit_status(parsed.snapshot, store, processor);
    Ok(CommitReport {
        adventures_delta,
        anomalies: parsed.anomalies,
    })
}

/// Parses a status object and commits its statistics.
///
/// # Errors
///
/// Returns `MalformedJson` without touching `store`.
pub fn commit_status_json(text: &str, store: &mut impl StatusStore) -> Result<StatusJson> {
    let stats = StatusJson::parse(text)?;
    store.commit_stat_values(&stats);
    tracing::info!("committed status statistics");
    Ok(stats)
}
