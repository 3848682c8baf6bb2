use log::{debug, info, warn};

use borda_count::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use crate::args::Args;

#[derive(Debug, Snafu)]
pub enum BordaError {
    #[snafu(display("could not read the ballot file {path}"))]
    ReadingBallots {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    BadCsv { source: TallyErrors },
    #[snafu(display("could not read the reference summary {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("the reference summary is not valid JSON"))]
    ParsingReference { source: serde_json::Error },
    #[snafu(display("could not render the summary as JSON"))]
    RenderingSummary { source: serde_json::Error },
    #[snafu(display("could not write the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type BordaResult<T> = Result<T, BordaError>;

/// The summary record written with --out and read back with --reference.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryJs {
    pub ballots_count: u64,
    pub candidates_count: u64,
    pub winners: Vec<WinnerJs>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct WinnerJs {
    pub rank: u32,
    pub name: String,
    pub score: u64,
}

fn summary_js(summary: &ResultSummary) -> SummaryJs {
    SummaryJs {
        ballots_count: summary.ballots_count as u64,
        candidates_count: summary.candidates_count as u64,
        winners: summary
            .winners
            .iter()
            .map(|w| WinnerJs {
                rank: w.rank,
                name: w.name.clone(),
                score: w.score,
            })
            .collect(),
    }
}

/// The number of winners to display. Anything that does not read as a
/// positive integer falls back to the default.
fn effective_top_x(raw: Option<&str>) -> usize {
    match raw.map(|s| s.trim().parse::<usize>()) {
        Some(Ok(x)) if x >= 1 => x,
        _ => DEFAULT_TOP_X,
    }
}

fn print_table(summary: &ResultSummary, top_x: usize) {
    println!("Total ballots: {}", summary.ballots_count);
    println!("Candidates scored: {}", summary.candidates_count);
    println!();
    println!("Top {} (Borda):", top_x);
    for w in summary.winners.iter() {
        println!("{}. {}: {}", w.rank, w.name, w.score);
    }
}

fn check_reference(path: String, computed_pretty: &str) -> BordaResult<()> {
    let contents =
        fs::read_to_string(path.clone()).context(OpeningReferenceSnafu { path })?;
    let reference: SummaryJs =
        serde_json::from_str(contents.as_str()).context(ParsingReferenceSnafu {})?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(RenderingSummarySnafu {})?;
    if pretty_reference != computed_pretty {
        warn!("Found differences with the reference summary");
        print_diff(pretty_reference.as_str(), computed_pretty, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn run_tally(args: &Args) -> BordaResult<()> {
    let top_x = effective_top_x(args.top.as_deref());
    info!(
        "run_tally: reading ballots from {:?}, reporting the top {}",
        args.input, top_x
    );
    let raw_text = fs::read_to_string(args.input.clone()).context(ReadingBallotsSnafu {
        path: args.input.clone(),
    })?;

    let summary = run_borda_count(raw_text.as_str(), top_x).context(BadCsvSnafu {})?;
    debug!("run_tally: summary: {:?}", summary);

    print_table(&summary, top_x);

    let result_js = summary_js(&summary);
    let pretty_js = serde_json::to_string_pretty(&result_js).context(RenderingSummarySnafu {})?;

    match args.out.as_deref() {
        Some("stdout") => println!("summary:{}", pretty_js),
        Some(path) => fs::write(path, pretty_js.as_bytes()).context(WritingSummarySnafu {
            path: path.to_string(),
        })?,
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.clone() {
        check_reference(reference_path, pretty_js.as_str())?;
    }

    Ok(())
}

fn run_tally_test(test_name: &str, csv_lpath: &str, summary_lpath: &str, top: Option<&str>) {
    let test_dir = option_env!("BORDA_TEST_DIR").unwrap_or("test_data");
    info!("Running test {}", test_name);
    let args = Args {
        input: format!("{}/{}/{}", test_dir, test_name, csv_lpath),
        top: top.map(|s| s.to_string()),
        out: None,
        reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        verbose: false,
    };
    if let Err(e) = run_tally(&args) {
        warn!("Error occured {:?}", e);
        panic!("test {} failed: {}", test_name, e);
    }
}

pub fn test_wrapper(test_name: &str) {
    run_tally_test(
        test_name,
        format!("{}.csv", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
        None,
    )
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn basic_borda() {
        test_wrapper("basic_borda");
    }

    #[test]
    fn shuffled_rank_columns() {
        test_wrapper("shuffled_rank_columns");
    }

    #[test]
    fn ignored_columns() {
        test_wrapper("ignored_columns");
    }

    #[test]
    fn top_larger_than_candidates() {
        run_tally_test(
            "top_larger_than_candidates",
            "top_larger_than_candidates.csv",
            "top_larger_than_candidates_expected_summary.json",
            Some("10"),
        );
    }

    #[test]
    fn header_only_is_rejected() {
        let args = Args {
            input: format!(
                "{}/header_only/header_only.csv",
                option_env!("BORDA_TEST_DIR").unwrap_or("test_data")
            ),
            top: None,
            out: None,
            reference: None,
            verbose: false,
        };
        let err = run_tally(&args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CSV must have at least a header and one data row"
        );
    }

    #[test]
    fn missing_input_file() {
        let args = Args {
            input: "test_data/no_such_file.csv".to_string(),
            top: None,
            out: None,
            reference: None,
            verbose: false,
        };
        let err = run_tally(&args).unwrap_err();
        assert!(matches!(err, BordaError::ReadingBallots { .. }));
    }

    #[test]
    fn top_x_coercion() {
        assert_eq!(effective_top_x(None), 5);
        assert_eq!(effective_top_x(Some("")), 5);
        assert_eq!(effective_top_x(Some("three")), 5);
        assert_eq!(effective_top_x(Some("0")), 5);
        assert_eq!(effective_top_x(Some("-2")), 5);
        assert_eq!(effective_top_x(Some("3")), 3);
        assert_eq!(effective_top_x(Some(" 12 ")), 12);
    }

    #[test]
    fn summary_round_trips_through_json() {
        let summary = ResultSummary {
            ballots_count: 2,
            candidates_count: 2,
            winners: vec![WinnerEntry {
                rank: 1,
                name: "Alice".to_string(),
                score: 3,
            }],
        };
        let js = summary_js(&summary);
        let text = serde_json::to_string_pretty(&js).unwrap();
        let back: SummaryJs = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(js, back);
        assert_eq!(back.winners[0].name, "Alice");
    }
}
