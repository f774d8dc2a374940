use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dismissal::{DismissalKind, FieldingCredit};
use crate::scorecard::MatchScorecard;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingTally {
    pub name: String,
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: u32,
    pub total: u32,
}

impl FieldingTally {
    fn empty(name: String) -> Self {
        Self {
            name,
            catches: 0,
            stumpings: 0,
            run_outs: 0,
            total: 0,
        }
    }

    fn record(&mut self, kind: DismissalKind) {
        match kind {
            DismissalKind::Caught | DismissalKind::CaughtAndBowled => self.catches += 1,
            DismissalKind::Stumped => self.stumpings += 1,
            DismissalKind::RunOut => self.run_outs += 1,
        }
    }
}

/// Build the fielding leaderboard from every batting entry in `scorecards`.
///
/// Dismissals are parsed per scorecard in parallel, then folded in input order,
/// so names with equal totals keep the order in which they were first seen.
pub fn aggregate_fielding(scorecards: &[MatchScorecard]) -> Vec<FieldingTally> {
    aggregate_cards(scorecards.par_iter())
}

/// Like [`aggregate_fielding`], skipping scorecards whose result is not in yet.
pub fn aggregate_completed(scorecards: &[MatchScorecard]) -> Vec<FieldingTally> {
    aggregate_cards(scorecards.par_iter().filter(|card| card.is_completed()))
}

fn aggregate_cards<'a>(
    cards: impl ParallelIterator<Item = &'a MatchScorecard>,
) -> Vec<FieldingTally> {
    // Ordered collect: results come back in scorecard order.
    let per_card: Vec<Vec<FieldingCredit>> = cards
        .map(|card| card.batting_entries().flat_map(|e| e.credits()).collect())
        .collect();

    let scorecards = per_card.len();
    let tallies = fold_credits(per_card.into_iter().flatten());
    tracing::debug!(scorecards, fielders = tallies.len(), "fielding aggregation pass");
    tallies
}

pub fn fold_credits(credits: impl IntoIterator<Item = FieldingCredit>) -> Vec<FieldingTally> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<FieldingTally> = Vec::new();

    for credit in credits {
        let slot = match index.get(&credit.name) {
            Some(&slot) => slot,
            None => {
                tallies.push(FieldingTally::empty(credit.name.clone()));
                index.insert(credit.name, tallies.len() - 1);
                tallies.len() - 1
            }
        };
        tallies[slot].record(credit.kind);
    }

    for tally in &mut tallies {
        tally.total = tally.catches + tally.stumpings + tally.run_outs;
    }
    tallies.retain(|t| t.total > 0);
    // Stable: ties stay in first-seen order.
    tallies.sort_by(|a, b| b.total.cmp(&a.total));
    tallies
}

pub fn top_n(mut tallies: Vec<FieldingTally>, limit: Option<usize>) -> Vec<FieldingTally> {
    if let Some(limit) = limit {
        tallies.truncate(limit);
    }
    tallies
}
