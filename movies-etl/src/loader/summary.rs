//! Typed per-row outcomes and their aggregation.

use movies_etl_shared::EntityKind;

/// What happened to a single row handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row was written.
    Inserted,
    /// A row with the same id was already there and was left unchanged.
    AlreadyPresent,
    /// The row violated a uniqueness constraint and was skipped.
    SkippedDuplicate,
    /// The row was rejected for another reason and was skipped.
    SkippedError(String),
}

/// Counts of row outcomes for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub kind: EntityKind,
    pub inserted: usize,
    pub already_present: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl LoadSummary {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            inserted: 0,
            already_present: 0,
            duplicates: 0,
            failed: 0,
        }
    }

    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Inserted => self.inserted += 1,
            RowOutcome::AlreadyPresent => self.already_present += 1,
            RowOutcome::SkippedDuplicate => self.duplicates += 1,
            RowOutcome::SkippedError(_) => self.failed += 1,
        }
    }

    /// Number of rows handed to the loader.
    pub fn total(&self) -> usize {
        self.inserted + self.already_present + self.duplicates + self.failed
    }

    pub fn skipped(&self) -> usize {
        self.duplicates + self.failed
    }
}

/// Summary of a whole run, one entry per kind in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub kinds: Vec<LoadSummary>,
}

impl RunSummary {
    pub fn push(&mut self, summary: LoadSummary) {
        self.kinds.push(summary);
    }

    pub fn get(&self, kind: EntityKind) -> Option<&LoadSummary> {
        self.kinds.iter().find(|summary| summary.kind == kind)
    }

    pub fn inserted(&self) -> usize {
        self.kinds.iter().map(|summary| summary.inserted).sum()
    }

    pub fn already_present(&self) -> usize {
        self.kinds.iter().map(|summary| summary.already_present).sum()
    }

    pub fn skipped(&self) -> usize {
        self.kinds.iter().map(LoadSummary::skipped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_summary_counts_each_outcome() {
        let mut summary = LoadSummary::new(EntityKind::PersonFilmWork);
        for outcome in [
            RowOutcome::Inserted,
            RowOutcome::Inserted,
            RowOutcome::AlreadyPresent,
            RowOutcome::SkippedDuplicate,
            RowOutcome::SkippedError("foreign key".to_string()),
        ] {
            summary.record(&outcome);
        }

        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.already_present, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.skipped(), 2);
    }

    #[test]
    fn test_run_summary_totals() {
        let mut genres = LoadSummary::new(EntityKind::Genre);
        genres.inserted = 3;
        let mut links = LoadSummary::new(EntityKind::PersonFilmWork);
        links.inserted = 2;
        links.duplicates = 1;

        let mut run = RunSummary::default();
        run.push(genres);
        run.push(links);

        assert_eq!(run.inserted(), 5);
        assert_eq!(run.skipped(), 1);
        assert_eq!(run.get(EntityKind::Genre).unwrap().inserted, 3);
        assert!(run.get(EntityKind::Person).is_none());
    }
}
