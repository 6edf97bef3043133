//! Deterministic classification of subject scores into a recommended track.

use crate::core::types::Track;

/// Classify three scores into a [`Track`].
///
/// - A strict maximum picks its own track (biology → `Medicine`,
///   physics → `Engineering`, english → `Language`).
/// - Otherwise the tie among the top scores is broken in the fixed order
///   biology, physics, english.
///
/// Total over all `f64` inputs. Comparisons are exact, with no tolerance.
/// No range is enforced here; callers validate before persisting.
pub fn classify(biology: f64, physics: f64, english: f64) -> Track {
    if biology > physics && biology > english {
        return Track::Medicine;
    }
    if physics > biology && physics > english {
        return Track::Engineering;
    }
    if english > biology && english > physics {
        return Track::Language;
    }

    let max = biology.max(physics).max(english);
    if biology == max {
        Track::Medicine
    } else if physics == max {
        Track::Engineering
    } else {
        Track::Language
    }
}
