//! Picks founder records that carry beneficial ownership information.
//!
//! Three independent marker lists: records about beneficial ownership,
//! records stating that the owner cannot be established, and records
//! stating that the founder is the owner. Only the first one gates
//! extraction; the other two are advisory.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::gazetteer::Gazetteer;

/// All three marker checks for one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkerSignals {
    pub beneficial_ownership: bool,
    pub absent: bool,
    pub reference: bool,
}

#[derive(Debug, Clone)]
pub struct Categorizer {
    ownership: Gazetteer,
    absent: Gazetteer,
    reference: Gazetteer,
}

impl Categorizer {
    pub fn new(ownership: Gazetteer, absent: Gazetteer, reference: Gazetteer) -> Self {
        Self {
            ownership,
            absent,
            reference,
        }
    }

    pub fn load(
        ownership: impl AsRef<Path>,
        absent: impl AsRef<Path>,
        reference: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self::new(
            Gazetteer::load_markers(ownership)?,
            Gazetteer::load_markers(absent)?,
            Gazetteer::load_markers(reference)?,
        ))
    }

    /// True if the record seems to be about beneficial ownership.
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.ownership.intersects(tokens)
    }

    /// True if the record says the owner is absent or cannot be established.
    pub fn is_absent<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.absent.intersects(tokens)
    }

    /// True if the record says the founder is the beneficial owner.
    pub fn is_reference<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.reference.intersects(tokens)
    }

    pub fn signals<S: AsRef<str>>(&self, tokens: &[S]) -> MarkerSignals {
        MarkerSignals {
            beneficial_ownership: self.classify(tokens),
            absent: self.is_absent(tokens),
            reference: self.is_reference(tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> Categorizer {
        Categorizer::new(
            Gazetteer::from_entries(["кінцевий", "бенефіціарний", "бенефіціарним", "контролер"]),
            Gazetteer::from_entries(["неможливо", "відсутній"]),
            Gazetteer::from_entries(["кінцевим"]),
        )
    }

    fn split(s: &str) -> Vec<&str> {
        s.split(' ').collect()
    }

    #[test]
    fn test_classify() {
        let c = categorizer();
        assert!(!c.classify(&split(
            "єрмак петро костянтинович , розмір внеску до статутного фонду - 495 . 60 грн ."
        )));
        assert!(c.classify(&split(
            "кінцевий бенефіціарний власник ( контролер ) - шевчук анатолій миколайович , київська обл ., білоцерківський район , село шкарівка , вулиця незалежності , будинок 33 ."
        )));
    }

    #[test]
    fn test_is_absent() {
        let c = categorizer();
        let tokens = split(
            "\" кінцевий бенефіціарний власник  бюро сертифікейшен холдінг  встановити неможливо \" , розмір внеску до статутного фонду  0.00 грн .",
        );
        assert!(c.is_absent(&tokens));
        assert!(!c.is_reference(&tokens));
    }

    #[test]
    fn test_signals_may_overlap() {
        let c = categorizer();
        let tokens =
            split("засновник є кінцевим бенефіціарним власником ( контролером ) юридичної особи");
        assert_eq!(
            c.signals(&tokens),
            MarkerSignals {
                beneficial_ownership: true,
                absent: false,
                reference: true,
            }
        );
    }

    #[test]
    fn test_empty_record_matches_nothing() {
        let c = categorizer();
        assert_eq!(c.signals::<&str>(&[]), MarkerSignals::default());
    }
}
