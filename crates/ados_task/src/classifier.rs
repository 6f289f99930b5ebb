//! Keyword-based crew classification.
//!
//! Classification is a pure function over the static keyword table in
//! [`Crew::keywords`]: lowercase the text, count keyword substring hits per
//! crew, pick the strictly highest score. Ties break by `Crew::ALL` order.

use crate::crew::Crew;

/// Score every crew against a description.
///
/// Returned in `Crew::ALL` order so callers can rely on the tie-break
/// ordering.
pub fn crew_scores(text: &str) -> Vec<(Crew, usize)> {
    let text = text.to_lowercase();
    Crew::ALL
        .iter()
        .map(|&crew| {
            let score = crew
                .keywords()
                .iter()
                .filter(|keyword| text.contains(*keyword))
                .count();
            (crew, score)
        })
        .collect()
}

/// Map a free-text description to the best-matching crew.
///
/// Falls back to [`Crew::Orchestrator`] when no keyword matches at all.
pub fn classify(text: &str) -> Crew {
    let mut best = Crew::Orchestrator;
    let mut best_score = 0;

    for (crew, score) in crew_scores(text) {
        if score > best_score {
            best = crew;
            best_score = score;
        }
    }

    if best_score == 0 {
        Crew::Orchestrator
    } else {
        best
    }
}

/// All crews with at least one keyword hit, in `Crew::ALL` order.
///
/// The orchestrator is appended for coordination whenever more than one
/// crew is involved; it is also the default when nothing matches.
pub fn involved_crews(text: &str) -> Vec<Crew> {
    let mut crews: Vec<Crew> = crew_scores(text)
        .into_iter()
        .filter(|(_, score)| *score > 0)
        .map(|(crew, _)| crew)
        .collect();

    if crews.len() > 1 && !crews.contains(&Crew::Orchestrator) {
        crews.push(Crew::Orchestrator);
    }

    if crews.is_empty() {
        crews.push(Crew::Orchestrator);
    }

    crews
}
