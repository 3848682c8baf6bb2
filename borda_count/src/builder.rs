pub use crate::config::*;
use crate::{select_top, tally_scores};

/// A builder for assembling ballots without going through the CSV reader.
///
/// Useful for callers that already hold structured choices, such as tests
/// or another input frontend.
///
/// ```
/// pub use borda_count::builder::Builder;
/// # use borda_count::TallyErrors;
///
/// let mut builder = Builder::new();
/// builder.add_ballot(&["Anna".to_string(), "Bob".to_string()])?;
/// builder.add_ballot(&["Bob".to_string(), "".to_string()])?;
///
/// let summary = builder.tabulate(5);
/// assert_eq!(summary.ballots_count, 2);
/// assert_eq!(summary.winners[0].name, "Anna");
///
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _ballots: Vec::new(),
        }
    }

    /// Adds one voter's choices, in preference order.
    ///
    /// Blank entries are dropped, like blank rank cells in a CSV row. A
    /// ballot with no remaining choice is not recorded and does not
    /// count towards `ballots_count`.
    pub fn add_ballot(&mut self, choices: &[String]) -> Result<(), TallyErrors> {
        let kept: Vec<String> = choices
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if !kept.is_empty() {
            self.add_ballot_2(&Ballot { choices: kept })?;
        }
        Ok(())
    }

    pub fn add_ballot_2(&mut self, ballot: &Ballot) -> Result<(), TallyErrors> {
        self._ballots.push(ballot.clone());
        Ok(())
    }

    /// Runs the aggregation and selection over the recorded ballots.
    pub fn tabulate(&self, top_x: usize) -> ResultSummary {
        let scores = tally_scores(&self._ballots);
        let winners = select_top(&scores, top_x);
        ResultSummary {
            ballots_count: self._ballots.len(),
            candidates_count: scores.len(),
            winners,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
