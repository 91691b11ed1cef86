//! Random question selection for quiz rounds.
//!
//! The server keeps no session: each round the client sends the ids it has
//! already been shown and gets back one question it has not seen yet.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Category id that selects from every category.
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Next(Question),
    /// Every question in the pool has already been served.
    Exhausted,
}

/// Pick one question from `pool` whose id is not in `previous`, uniformly
/// at random. Callers must reject an empty pool before calling; an empty
/// pool is reported as `Exhausted` here.
pub fn select_question<R: Rng + ?Sized>(
    pool: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Selection {
    let candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    match candidates.choose(rng) {
        Some(q) => Selection::Next(q.clone()),
        None => Selection::Exhausted,
    }
}
