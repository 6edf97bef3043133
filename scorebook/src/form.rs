//! Form operations: the interface a presentation layer calls into.
//!
//! Each operation validates raw input before touching the store, recomputes
//! the recommendation from the scores, and reports missing ids distinctly.
//! The currently selected record is an explicit [`Selection`] value owned by
//! the caller.

use tracing::{debug, info, warn};

use crate::core::classifier::classify;
use crate::core::types::{RecordId, ScoreFields, ScoreRecord, Track};
use crate::core::validation::{RawFields, ValidationErrors, validate};
use crate::exit_codes;
use crate::io::store::{Mutation, ScoreStore};

/// Failure of a form operation.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Input was rejected before any store access.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),
    /// Update or delete requested with no record selected.
    #[error("no record selected; pick a record first")]
    NothingSelected,
    /// The referenced record does not exist (any more).
    #[error("record {0} not found")]
    NotFound(RecordId),
    /// The storage engine failed; the operation did not complete.
    #[error("storage failure: {0:#}")]
    Storage(anyhow::Error),
}

impl FormError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            FormError::Invalid(_) | FormError::NothingSelected => exit_codes::INVALID,
            FormError::NotFound(_) => exit_codes::NOT_FOUND,
            FormError::Storage(_) => exit_codes::STORAGE,
        }
    }
}

/// Record currently selected for editing, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(RecordId),
}

impl Selection {
    pub fn id(self) -> Option<RecordId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(id),
        }
    }

    /// Selected id, or [`FormError::NothingSelected`].
    pub fn require(self) -> Result<RecordId, FormError> {
        self.id().ok_or(FormError::NothingSelected)
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub id: RecordId,
    pub track: Track,
}

/// A record loaded for editing, with its values as raw form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub selection: Selection,
    pub fields: RawFields,
    pub record: ScoreRecord,
}

/// Validate, classify and persist a new record.
pub fn submit<S: ScoreStore + ?Sized>(
    store: &mut S,
    raw: &RawFields,
) -> Result<Submitted, FormError> {
    let fields = validated(raw)?;
    let track = recommend(&fields);
    let id = store.create(&fields, track).map_err(FormError::Storage)?;
    info!(%id, %track, "record submitted");
    Ok(Submitted { id, track })
}

/// Validate, reclassify and overwrite the record with `id`.
pub fn update<S: ScoreStore + ?Sized>(
    store: &mut S,
    id: RecordId,
    raw: &RawFields,
) -> Result<Track, FormError> {
    let fields = validated(raw)?;
    let track = recommend(&fields);
    match store.update(id, &fields, track).map_err(FormError::Storage)? {
        Mutation::Applied => {
            info!(%id, %track, "record updated");
            Ok(track)
        }
        Mutation::NotFound => {
            warn!(%id, "update addressed a missing record");
            Err(FormError::NotFound(id))
        }
    }
}

/// Remove the record with `id`.
pub fn delete<S: ScoreStore + ?Sized>(store: &mut S, id: RecordId) -> Result<(), FormError> {
    match store.delete(id).map_err(FormError::Storage)? {
        Mutation::Applied => {
            info!(%id, "record deleted");
            Ok(())
        }
        Mutation::NotFound => {
            warn!(%id, "delete addressed a missing record");
            Err(FormError::NotFound(id))
        }
    }
}

/// All records, newest first.
pub fn refresh<S: ScoreStore + ?Sized>(store: &S) -> Result<Vec<ScoreRecord>, FormError> {
    store.list_all().map_err(FormError::Storage)
}

/// Load the record with `id` for editing.
pub fn select<S: ScoreStore + ?Sized>(store: &S, id: RecordId) -> Result<Selected, FormError> {
    let record = store
        .get(id)
        .map_err(FormError::Storage)?
        .ok_or(FormError::NotFound(id))?;
    Ok(Selected {
        selection: Selection::Selected(id),
        fields: RawFields::from_record(&record),
        record,
    })
}

fn validated(raw: &RawFields) -> Result<ScoreFields, FormError> {
    validate(raw).map_err(|errors| {
        debug!(%errors, "submission rejected");
        FormError::Invalid(errors)
    })
}

fn recommend(fields: &ScoreFields) -> Track {
    classify(fields.biology, fields.physics, fields.english)
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow};

    use super::*;
    use crate::core::validation::ValidationError;
    use crate::io::store::SqliteScoreStore;
    use crate::test_support::raw;

    /// Store whose every operation fails, as a broken disk would.
    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn create(&mut self, _: &ScoreFields, _: Track) -> Result<RecordId> {
            Err(anyhow!("disk I/O error"))
        }
        fn get(&self, _: RecordId) -> Result<Option<ScoreRecord>> {
            Err(anyhow!("disk I/O error"))
        }
        fn update(&mut self, _: RecordId, _: &ScoreFields, _: Track) -> Result<Mutation> {
            Err(anyhow!("disk I/O error"))
        }
        fn delete(&mut self, _: RecordId) -> Result<Mutation> {
            Err(anyhow!("disk I/O error"))
        }
        fn list_all(&self) -> Result<Vec<ScoreRecord>> {
            Err(anyhow!("disk I/O error"))
        }
    }

    fn store() -> SqliteScoreStore {
        SqliteScoreStore::open_in_memory().expect("open")
    }

    #[test]
    fn submit_persists_record_with_computed_track() {
        let mut store = store();
        let submitted = submit(&mut store, &raw("Ana", "60", "95", "60")).expect("submit");
        assert_eq!(submitted.track, Track::Engineering);

        let records = refresh(&store).expect("refresh");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, submitted.id);
        assert_eq!(records[0].student_name, "Ana");
        assert_eq!(records[0].recommended_track, Track::Engineering);
    }

    #[test]
    fn rejected_submission_leaves_store_unchanged() {
        let mut store = store();
        submit(&mut store, &raw("Ana", "1", "2", "3")).expect("seed");
        let before = refresh(&store).expect("before");

        for bad in [
            raw("", "1", "2", "3"),
            raw("Budi", "abc", "2", "3"),
            raw("Budi", "101", "2", "3"),
            raw("Budi", "1", "-1", "3"),
        ] {
            let err = submit(&mut store, &bad).expect_err("rejected");
            assert!(matches!(err, FormError::Invalid(_)));
        }
        assert_eq!(refresh(&store).expect("after"), before);
    }

    #[test]
    fn update_recomputes_track() {
        let mut store = store();
        let id = submit(&mut store, &raw("Ana", "90", "70", "60"))
            .expect("submit")
            .id;
        let track = update(&mut store, id, &raw("Ana B", "10", "10", "90")).expect("update");
        assert_eq!(track, Track::Language);

        let record = store.get(id).expect("get").expect("present");
        assert_eq!(record.student_name, "Ana B");
        assert_eq!(record.recommended_track, Track::Language);
    }

    #[test]
    fn invalid_update_is_rejected_before_lookup() {
        let mut store = store();
        let err =
            update(&mut store, RecordId(5), &raw("Ana", "1", "2", "x")).expect_err("invalid");
        match err {
            FormError::Invalid(errors) => assert!(matches!(
                errors.first(),
                ValidationError::NotANumber { .. }
            )),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn update_and_delete_missing_record_report_not_found() {
        let mut store = store();
        let err =
            update(&mut store, RecordId(3), &raw("Ana", "1", "2", "3")).expect_err("missing");
        assert!(matches!(err, FormError::NotFound(RecordId(3))));
        let err = delete(&mut store, RecordId(3)).expect_err("missing");
        assert!(matches!(err, FormError::NotFound(RecordId(3))));
    }

    #[test]
    fn second_delete_reports_not_found() {
        let mut store = store();
        let id = submit(&mut store, &raw("Ana", "1", "2", "3")).expect("submit").id;
        delete(&mut store, id).expect("first delete");
        let err = delete(&mut store, id).expect_err("second delete");
        assert!(matches!(err, FormError::NotFound(missing) if missing == id));
    }

    #[test]
    fn storage_failures_never_report_success() {
        let mut store = FailingStore;
        let input = raw("Ana", "1", "2", "3");
        assert!(matches!(submit(&mut store, &input), Err(FormError::Storage(_))));
        assert!(matches!(
            update(&mut store, RecordId(1), &input),
            Err(FormError::Storage(_))
        ));
        assert!(matches!(delete(&mut store, RecordId(1)), Err(FormError::Storage(_))));
        assert!(matches!(refresh(&store), Err(FormError::Storage(_))));
        assert!(matches!(select(&store, RecordId(1)), Err(FormError::Storage(_))));
    }

    #[test]
    fn select_prefills_fields_and_selection() {
        let mut store = store();
        let id = submit(&mut store, &raw(" Citra ", "88.5", "91", "42"))
            .expect("submit")
            .id;

        let selected = select(&store, id).expect("select");
        assert_eq!(selected.selection, Selection::Selected(id));
        assert_eq!(selected.fields, raw(" Citra ", "88.5", "91", "42"));
        assert_eq!(selected.record.recommended_track, Track::Engineering);

        let err = select(&store, RecordId(id.0 + 1)).expect_err("missing");
        assert!(matches!(err, FormError::NotFound(_)));
    }

    #[test]
    fn selection_requires_a_record() {
        let mut selection = Selection::default();
        assert!(matches!(selection.require(), Err(FormError::NothingSelected)));

        selection = Selection::Selected(RecordId(4));
        assert_eq!(selection.require().expect("selected"), RecordId(4));
        selection.clear();
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn errors_map_to_exit_codes() {
        assert_eq!(FormError::NothingSelected.exit_code(), exit_codes::INVALID);
        assert_eq!(FormError::NotFound(RecordId(1)).exit_code(), exit_codes::NOT_FOUND);
        assert_eq!(
            FormError::Storage(anyhow!("locked")).exit_code(),
            exit_codes::STORAGE
        );
    }
}
