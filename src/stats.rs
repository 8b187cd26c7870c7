//! Aggregate counts over processed founder records.

use std::fmt;

use serde::Serialize;

use crate::parser::Entity;
use crate::pipeline::FounderOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub records: u64,
    pub beneficial_owners: u64,
    pub absent: u64,
    pub reference: u64,
    pub names: u64,
    pub countries: u64,
    pub addresses: u64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &FounderOutcome) {
        self.records += 1;
        self.beneficial_owners += u64::from(outcome.is_beneficial_owner);
        self.absent += u64::from(outcome.is_absent);
        self.reference += u64::from(outcome.is_reference);

        if let Some(owner) = &outcome.owner {
            self.names += u64::from(owner.name.is_some());
            self.countries += u64::from(owner.country.is_some());
            self.addresses += u64::from(owner.address.is_some());
        }
    }

    pub fn merge(&mut self, other: &ExtractionStats) {
        self.records += other.records;
        self.beneficial_owners += other.beneficial_owners;
        self.absent += other.absent;
        self.reference += other.reference;
        self.names += other.names;
        self.countries += other.countries;
        self.addresses += other.addresses;
    }

    pub fn found(&self, entity: Entity) -> u64 {
        match entity {
            Entity::Name => self.names,
            Entity::Country => self.countries,
            Entity::Address => self.addresses,
        }
    }

    /// Percentage of beneficial ownership records where `entity` was found.
    pub fn coverage(&self, entity: Entity) -> f64 {
        if self.beneficial_owners == 0 {
            return 0.0;
        }
        self.found(entity) as f64 / self.beneficial_owners as f64 * 100.0
    }
}

impl<'a> FromIterator<&'a FounderOutcome> for ExtractionStats {
    fn from_iter<I: IntoIterator<Item = &'a FounderOutcome>>(iter: I) -> Self {
        let mut stats = Self::new();
        for outcome in iter {
            stats.record(outcome);
        }
        stats
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records processed: {}, with BO: {}",
            self.records, self.beneficial_owners
        )?;
        for entity in Entity::ALL {
            write!(
                f,
                ", {}: {} ({:.3}%)",
                entity.label(),
                self.found(entity),
                self.coverage(entity)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ExtractionResult;

    fn outcome(bo: bool, owner: Option<ExtractionResult>) -> FounderOutcome {
        FounderOutcome {
            tokens: vec![],
            is_beneficial_owner: bo,
            is_absent: false,
            is_reference: !bo,
            owner,
        }
    }

    #[test]
    fn test_counts_and_coverage() {
        let outcomes = vec![
            outcome(
                true,
                Some(ExtractionResult {
                    name: Some("іван".into()),
                    country: Some("україна".into()),
                    ..Default::default()
                }),
            ),
            outcome(true, Some(ExtractionResult::default())),
            outcome(false, None),
        ];
        let stats: ExtractionStats = outcomes.iter().collect();

        assert_eq!(stats.records, 3);
        assert_eq!(stats.beneficial_owners, 2);
        assert_eq!(stats.reference, 1);
        assert_eq!(stats.names, 1);
        assert_eq!(stats.addresses, 0);
        assert_eq!(stats.coverage(Entity::Country), 50.0);
        assert_eq!(ExtractionStats::new().coverage(Entity::Name), 0.0);
    }

    #[test]
    fn test_merge_and_display() {
        let mut a = ExtractionStats {
            records: 2,
            beneficial_owners: 2,
            names: 1,
            ..Default::default()
        };
        a.merge(&ExtractionStats {
            records: 2,
            beneficial_owners: 2,
            names: 1,
            ..Default::default()
        });
        assert_eq!(a.records, 4);
        assert_eq!(
            a.to_string(),
            "Records processed: 4, with BO: 4, Name: 2 (50.000%), \
             Country of residence: 0 (0.000%), Address of residence: 0 (0.000%)"
        );
    }
}
