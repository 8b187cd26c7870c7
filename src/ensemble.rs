//! Combines several parsers by span-overlap voting.
//!
//! Every voter parses the record with ranges. For each entity kind the
//! distinct proposed spans become candidates, and each candidate collects
//! one vote per proposal that overlaps it. Candidates with more votes than
//! the cutoff are accepted; the rest are reported as outliers.

use std::fmt;

use crate::parser::{Entity, EntityRanges, ExtractionResult, RecordParser};
use crate::span::Span;

pub const DEFAULT_CUTOFF: usize = 1;

/// A proposed span and the votes it collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub span: Span,
    pub text: String,
    pub votes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ballot {
    /// Ordered by votes, most first.
    pub accepted: Vec<Candidate>,
    pub outliers: Vec<Candidate>,
}

impl Ballot {
    pub fn winner(&self) -> Option<&Candidate> {
        self.accepted.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsembleOutcome {
    pub name: Ballot,
    pub country: Ballot,
    pub address: Ballot,
}

impl EnsembleOutcome {
    pub fn ballot(&self, entity: Entity) -> &Ballot {
        match entity {
            Entity::Name => &self.name,
            Entity::Country => &self.country,
            Entity::Address => &self.address,
        }
    }

    fn ballot_mut(&mut self, entity: Entity) -> &mut Ballot {
        match entity {
            Entity::Name => &mut self.name,
            Entity::Country => &mut self.country,
            Entity::Address => &mut self.address,
        }
    }
}

pub struct EnsembleParser {
    voters: Vec<Box<dyn RecordParser>>,
    cutoff: usize,
}

impl EnsembleParser {
    pub fn new(voters: Vec<Box<dyn RecordParser>>, cutoff: usize) -> Self {
        Self { voters, cutoff }
    }

    pub fn voters(&self) -> usize {
        self.voters.len()
    }

    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    pub fn vote(&self, tokens: &[String]) -> EnsembleOutcome {
        let proposals: Vec<EntityRanges> = self
            .voters
            .iter()
            .filter_map(|v| v.parse(tokens, true).ranges)
            .collect();

        let mut outcome = EnsembleOutcome::default();
        for entity in Entity::ALL {
            let spans: Vec<Span> = proposals.iter().filter_map(|r| r.get(entity)).collect();
            let ballot = outcome.ballot_mut(entity);
            for (span, votes) in tally(&spans) {
                let candidate = Candidate {
                    span,
                    text: span.join(tokens),
                    votes,
                };
                if votes > self.cutoff {
                    ballot.accepted.push(candidate);
                } else {
                    ballot.outliers.push(candidate);
                }
            }
        }
        outcome
    }
}

impl fmt::Debug for EnsembleParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnsembleParser")
            .field("voters", &self.voters.len())
            .field("cutoff", &self.cutoff)
            .finish()
    }
}

impl RecordParser for EnsembleParser {
    fn parse(&self, tokens: &[String], include_range: bool) -> ExtractionResult {
        let outcome = self.vote(tokens);
        let winner = |e| outcome.ballot(e).winner().map(|c| c.span);
        let ranges = EntityRanges {
            name: winner(Entity::Name),
            country: winner(Entity::Country),
            address: winner(Entity::Address),
        };
        ExtractionResult::from_ranges(tokens, ranges, include_range)
    }
}

/// Distinct spans with their overlap vote counts, most votes first.
/// Ties keep first-seen order.
fn tally(spans: &[Span]) -> Vec<(Span, usize)> {
    let mut distinct: Vec<Span> = Vec::new();
    for span in spans {
        if !distinct.contains(span) {
            distinct.push(*span);
        }
    }

    let mut counted: Vec<(Span, usize)> = distinct
        .into_iter()
        .map(|c| (c, spans.iter().filter(|s| s.overlaps(&c)).count()))
        .collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted
}
