use std::fmt;

/// The normalized verdict of a single check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub reached: bool,
}

impl CheckOutcome {
    pub fn reached() -> Self {
        CheckOutcome { reached: true }
    }

    pub fn not_reached() -> Self {
        CheckOutcome { reached: false }
    }
}

impl From<bool> for CheckOutcome {
    fn from(reached: bool) -> Self {
        CheckOutcome { reached }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.reached { "reached" } else { "not reached" })
    }
}

/// Totals for one pass over a task batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: usize,
    pub reached: usize,
    pub reported: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: CheckOutcome, reported: bool) {
        self.checked += 1;
        if outcome.reached {
            self.reached += 1;
        }
        if reported {
            self.reported += 1;
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tasks checked, {} reached, {} reported",
            self.checked, self.reached, self.reported
        )
    }
}
