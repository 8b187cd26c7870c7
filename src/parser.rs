//! Extraction of owner name, country and address from a tokenized founder record.
//!
//! The heuristic parser classifies every token against the name and country
//! gazetteers, gates each entity on the shape of its fingerprint, and takes
//! the longest matching run. The address is whatever follows the country,
//! up to the share-size clause.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::ensemble::EnsembleParser;
use crate::fingerprint::Fingerprint;
use crate::gazetteer::{membership, Gazetteer, Lexicon};
use crate::span::{longest_span, Span};

/// Start of the trailing share-size clause ("розмір внеску ...").
pub const ADDRESS_ANCHOR: &str = "розмір";

// Substring test, so the empty token left by dash stripping also matches.
const PUNCTUATION: &str = ",.;- ";

fn is_punctuation(token: &str) -> bool {
    PUNCTUATION.contains(token)
}

/// Entity kinds reported for a beneficial owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Name,
    Country,
    Address,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Name, Entity::Country, Entity::Address];

    pub fn label(self) -> &'static str {
        match self {
            Entity::Name => "Name",
            Entity::Country => "Country of residence",
            Entity::Address => "Address of residence",
        }
    }
}

/// Token ranges of the extracted entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityRanges {
    #[serde(rename = "name_rng")]
    pub name: Option<Span>,
    #[serde(rename = "country_rng")]
    pub country: Option<Span>,
    #[serde(rename = "address_rng")]
    pub address: Option<Span>,
}

impl EntityRanges {
    pub fn get(&self, entity: Entity) -> Option<Span> {
        match entity {
            Entity::Name => self.name,
            Entity::Country => self.country,
            Entity::Address => self.address,
        }
    }
}

/// Parsed beneficial owner. Fields are `None` when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Country of residence")]
    pub country: Option<String>,
    #[serde(rename = "Address of residence")]
    pub address: Option<String>,
    /// Present only when ranges were requested.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<EntityRanges>,
}

impl ExtractionResult {
    /// Render spans over `tokens`, keeping the spans if `include_range`.
    ///
    /// Spans past the end of `tokens` are clamped by [`Span::join`].
    pub fn from_ranges<S: AsRef<str>>(
        tokens: &[S],
        ranges: EntityRanges,
        include_range: bool,
    ) -> Self {
        let text = |span: Option<Span>| span.map(|s| s.join(tokens));
        Self {
            name: text(ranges.name),
            country: text(ranges.country),
            address: text(ranges.address),
            ranges: include_range.then_some(ranges),
        }
    }

    pub fn text(&self, entity: Entity) -> Option<&str> {
        match entity {
            Entity::Name => self.name.as_deref(),
            Entity::Country => self.country.as_deref(),
            Entity::Address => self.address.as_deref(),
        }
    }

    pub fn span(&self, entity: Entity) -> Option<Span> {
        self.ranges.and_then(|r| r.get(entity))
    }

    pub fn is_empty(&self) -> bool {
        Entity::ALL.iter().all(|&e| self.text(e).is_none())
    }
}

/// A strategy that turns one tokenized founder record into an owner record.
pub trait RecordParser: Send + Sync {
    fn parse(&self, tokens: &[String], include_range: bool) -> ExtractionResult;
}

/// Gazetteer-driven parser.
#[derive(Debug, Clone)]
pub struct HeuristicParser<L = Gazetteer> {
    names: L,
    countries: L,
}

impl<L: Lexicon> HeuristicParser<L> {
    pub fn new(names: L, countries: L) -> Self {
        Self { names, countries }
    }

    /// Longest name run, if the name fingerprint has a run of three or more.
    pub fn name_span<S: AsRef<str>>(&self, tokens: &[S]) -> Option<Span> {
        let vector = membership(&self.names, tokens);
        let fingerprint = Fingerprint::of(&vector);
        let class = fingerprint.class();
        debug!(%fingerprint, %class, "name fingerprint");

        if class.admits_name() {
            longest_span(&vector)
        } else {
            None
        }
    }

    /// The country run, if the record has exactly one run of one to three tokens.
    pub fn country_span<S: AsRef<str>>(&self, tokens: &[S]) -> Option<Span> {
        let vector = membership(&self.countries, tokens);
        let fingerprint = Fingerprint::of(&vector);

        if fingerprint.is_single_run_within(1, 3) {
            longest_span(&vector)
        } else {
            debug!(%fingerprint, "country fingerprint rejected");
            None
        }
    }

    pub fn ranges<S: AsRef<str>>(&self, tokens: &[S]) -> EntityRanges {
        let country = self.country_span(tokens);
        EntityRanges {
            name: self.name_span(tokens),
            country,
            address: country.and_then(|c| address_span(tokens, c)),
        }
    }

    pub fn parse_tokens<S: AsRef<str>>(&self, tokens: &[S], include_range: bool) -> ExtractionResult {
        ExtractionResult::from_ranges(tokens, self.ranges(tokens), include_range)
    }
}

impl<L: Lexicon> RecordParser for HeuristicParser<L> {
    fn parse(&self, tokens: &[String], include_range: bool) -> ExtractionResult {
        self.parse_tokens(tokens, include_range)
    }
}

/// Tokens between the country and the share-size clause (or the record end),
/// with one punctuation token trimmed from each side.
pub fn address_span<S: AsRef<str>>(tokens: &[S], country: Span) -> Option<Span> {
    if country.end >= tokens.len() {
        return None;
    }

    let end = tokens
        .iter()
        .position(|t| t.as_ref() == ADDRESS_ANCHOR)
        .unwrap_or(tokens.len());
    let mut span = Span::new(country.end, end);
    if span.is_empty() {
        return None;
    }

    if is_punctuation(tokens[span.start].as_ref()) {
        span.start += 1;
    }
    if is_punctuation(tokens[span.end - 1].as_ref()) {
        span.end -= 1;
    }

    (!span.is_empty()).then_some(span)
}

/// Parser strategy selected at configuration time.
pub enum Extractor {
    Heuristic(HeuristicParser),
    Ensemble(EnsembleParser),
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::Heuristic(p) => f.debug_tuple("Heuristic").field(p).finish(),
            Extractor::Ensemble(p) => f.debug_tuple("Ensemble").field(p).finish(),
        }
    }
}

impl RecordParser for Extractor {
    fn parse(&self, tokens: &[String], include_range: bool) -> ExtractionResult {
        match self {
            Extractor::Heuristic(p) => p.parse(tokens, include_range),
            Extractor::Ensemble(p) => p.parse(tokens, include_range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split(' ').map(String::from).collect()
    }

    fn parser() -> HeuristicParser {
        HeuristicParser::new(
            Gazetteer::from_entries(["шевчук", "анатолій", "миколайович", "іван", "петро"]),
            Gazetteer::from_entries(["україна", "сполучені", "штати", "америки", "кіпр"]),
        )
    }

    #[test]
    fn test_ideal_name_without_country() {
        let tokens = toks("засновник - шевчук анатолій миколайович , частка 50 %");
        let res = parser().parse(&tokens, false);
        assert_eq!(res.name.as_deref(), Some("шевчук анатолій миколайович"));
        assert_eq!(res.country, None);
        assert_eq!(res.address, None);
        assert_eq!(res.ranges, None);
    }

    #[test]
    fn test_incomplete_name_is_dropped() {
        let tokens = toks("іван петро , україна");
        let res = parser().parse(&tokens, true);
        assert_eq!(res.name, None);
        assert_eq!(res.country.as_deref(), Some("україна"));
        assert_eq!(res.span(Entity::Name), None);
    }

    #[test]
    fn test_country_and_address_up_to_anchor() {
        let tokens =
            toks("шевчук анатолій миколайович , україна , м . київ , вул . хрещатик , розмір частки");
        let res = parser().parse(&tokens, true);
        assert_eq!(res.country.as_deref(), Some("україна"));
        assert_eq!(res.address.as_deref(), Some("м . київ , вул . хрещатик"));
        assert_eq!(res.span(Entity::Name), Some(Span::new(0, 3)));
        assert_eq!(res.span(Entity::Country), Some(Span::new(4, 5)));
        assert_eq!(res.span(Entity::Address), Some(Span::new(6, 13)));
    }

    #[test]
    fn test_multi_word_country_to_record_end() {
        let tokens = toks("джон сміт , сполучені штати америки , нью - йорк .");
        let res = parser().parse(&tokens, false);
        assert_eq!(res.country.as_deref(), Some("сполучені штати америки"));
        assert_eq!(res.address.as_deref(), Some("нью - йорк"));
    }

    #[test]
    fn test_two_country_runs_are_rejected() {
        let tokens = toks("україна , кіпр , лімасол");
        let res = parser().parse(&tokens, false);
        assert_eq!(res.country, None);
        assert_eq!(res.address, None);
    }

    #[test]
    fn test_country_at_end_has_no_address() {
        let res = parser().parse(&toks("громадянин україна"), true);
        assert_eq!(res.country.as_deref(), Some("україна"));
        assert_eq!(res.span(Entity::Address), None);
    }

    #[test]
    fn test_address_empty_after_trim() {
        let tokens = toks("україна , розмір");
        assert_eq!(address_span(&tokens, Span::new(0, 1)), None);

        let tokens = toks("україна розмір");
        assert_eq!(address_span(&tokens, Span::new(0, 1)), None);
    }

    #[test]
    fn test_anchor_before_country_discards_address() {
        let tokens = toks("розмір внеску україна вул");
        assert_eq!(address_span(&tokens, Span::new(2, 3)), None);
    }

    #[test]
    fn test_empty_dash_token_is_trimmed() {
        let tokens: Vec<String> = ["україна", "", "київ", ""].iter().map(|s| s.to_string()).collect();
        assert_eq!(address_span(&tokens, Span::new(0, 1)), Some(Span::new(2, 3)));
    }

    #[test]
    fn test_empty_record() {
        let res = parser().parse(&[], true);
        assert!(res.is_empty());
        assert_eq!(res.ranges, Some(EntityRanges::default()));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let p = parser();
        let tokens = toks("шевчук анатолій миколайович , кіпр , нікосія");
        assert_eq!(p.parse(&tokens, true), p.parse(&tokens, true));
    }

    #[test]
    fn test_from_ranges_clamps_out_of_range_spans() {
        let tokens = toks("іван петро");
        let ranges = EntityRanges {
            name: Some(Span::new(1, 5)),
            country: Some(Span::new(4, 6)),
            address: None,
        };
        let res = ExtractionResult::from_ranges(&tokens, ranges, true);
        assert_eq!(res.name.as_deref(), Some("петро"));
        assert_eq!(res.country.as_deref(), Some(""));
        assert_eq!(res.span(Entity::Name), Some(Span::new(1, 5)));
    }

    #[test]
    fn test_extractor_debug() {
        let voter: Box<dyn RecordParser> = Box::new(parser());
        let ensemble = Extractor::Ensemble(EnsembleParser::new(vec![voter], 0));
        assert_eq!(
            format!("{ensemble:?}"),
            "Ensemble(EnsembleParser { voters: 1, cutoff: 0 })"
        );
        assert!(format!("{:?}", Extractor::Heuristic(parser())).starts_with("Heuristic(HeuristicParser"));
    }
}
