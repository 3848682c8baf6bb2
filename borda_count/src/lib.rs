mod config;
pub mod builder;
pub mod manual;

use log::{debug, info, warn};

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

pub use crate::config::*;

// **** Private structures ****

/// A preference slot discovered in the header row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct RankColumn {
    /// Position of the column in the header row.
    index: usize,
    /// Numeric suffix of the header: "Rank 3" -> 3.
    rank: u32,
}

lazy_static! {
    static ref RANK_HEADER: Regex = Regex::new(r"(?i)^\s*Rank\s+(\d+)\s*$").unwrap();
}

// Sort position for a rank header whose numeric suffix cannot be read as
// an integer. Such columns go after the regular ranks, in header order.
const UNPARSEABLE_RANK: u32 = 9999;

/// Finds the rank columns in the header row.
///
/// The returned columns are sorted by their rank suffix, so walking them
/// in order yields the voter's preference order regardless of where the
/// columns sit in the file. Headers with equal suffixes keep their header
/// order.
fn discover_rank_columns(header: &[String]) -> Vec<RankColumn> {
    let mut columns: Vec<RankColumn> = header
        .iter()
        .enumerate()
        .filter_map(|(index, field)| {
            RANK_HEADER.captures(field).map(|caps| RankColumn {
                index,
                rank: caps[1].parse::<u32>().unwrap_or(UNPARSEABLE_RANK),
            })
        })
        .collect();
    columns.sort_by_key(|c| c.rank);
    columns
}

/// Splits a data row into its fields: comma-separated, trimmed, with one
/// outer pair of double quotes removed.
fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|value| strip_outer_quotes(value.trim()).to_string())
        .collect()
}

// Removes exactly one leading and one trailing double quote, and only
// when both are present. Embedded quotes and escaped commas are not
// interpreted.
fn strip_outer_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parses raw CSV text into ballots.
///
/// The first non-blank line is the header row; blank lines anywhere in
/// the input are skipped. Columns whose header reads `Rank N`
/// (case-insensitive) are the preference slots, every other column is
/// ignored. Data rows that fill none of the rank columns do not produce
/// a ballot.
///
/// Fails with [TallyErrors::NotEnoughLines] when the input has fewer
/// than two non-blank lines.
pub fn parse_ballots(raw_text: &str) -> Result<Vec<Ballot>, TallyErrors> {
    let lines: Vec<&str> = raw_text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(TallyErrors::NotEnoughLines);
    }

    let header: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();
    let rank_columns = discover_rank_columns(&header);
    debug!(
        "parse_ballots: header: {:?} rank columns: {:?}",
        header, rank_columns
    );

    let mut ballots: Vec<Ballot> = Vec::new();
    for line in lines[1..].iter() {
        let values = split_row(line);
        let mut choices: Vec<String> = Vec::new();
        for column in rank_columns.iter() {
            // A row shorter than the header simply has no value here.
            let value = values.get(column.index).map(|v| v.trim()).unwrap_or("");
            if !value.is_empty() {
                choices.push(value.to_string());
            }
        }
        debug!("parse_ballots: row: {:?} choices: {:?}", line, choices);
        // Rows with no ranked choice at all do not count as ballots.
        if !choices.is_empty() {
            ballots.push(Ballot { choices });
        }
    }
    info!(
        "parse_ballots: {} ballots out of {} data rows",
        ballots.len(),
        lines.len() - 1
    );
    Ok(ballots)
}

/// Accumulates the Borda scores of a collection of ballots.
///
/// A ballot ranking k candidates awards k points to its first choice and
/// 1 point to its last: the points scale with that ballot's own length,
/// not with a global maximum rank. An empty collection yields an empty
/// table.
pub fn tally_scores(ballots: &[Ballot]) -> ScoreTable {
    let mut scores = ScoreTable::new();
    for ballot in ballots.iter() {
        let k = ballot.choices.len() as u64;
        let distinct: HashSet<&String> = ballot.choices.iter().collect();
        if distinct.len() < ballot.choices.len() {
            // Each appearance still scores. See DESIGN.md.
            warn!(
                "tally_scores: ballot ranks a candidate more than once: {:?}",
                ballot.choices
            );
        }
        for (position, candidate) in ballot.choices.iter().enumerate() {
            *scores.entry(candidate.clone()).or_insert(0) += k - position as u64;
        }
    }
    scores
}

/// Picks the `x` highest-scoring candidates.
///
/// Candidates are ordered by descending score, then by ascending name for
/// equal scores. If fewer than `x` candidates were scored, all of them
/// are returned. The caller guarantees `x >= 1`; see [DEFAULT_TOP_X].
pub fn select_top(scores: &ScoreTable, x: usize) -> Vec<WinnerEntry> {
    let mut ranked: Vec<(&String, &u64)> = scores.iter().collect();
    ranked.sort_by(|(name_a, score_a), (name_b, score_b)| {
        score_b.cmp(score_a).then_with(|| name_a.cmp(name_b))
    });
    ranked.truncate(x);
    ranked
        .iter()
        .enumerate()
        .map(|(idx, (name, score))| WinnerEntry {
            rank: (idx + 1) as u32,
            name: (*name).clone(),
            score: **score,
        })
        .collect()
}

/// Runs the full pipeline on raw CSV text: parse, aggregate, select.
pub fn run_borda_count(raw_text: &str, top_x: usize) -> Result<ResultSummary, TallyErrors> {
    let ballots = parse_ballots(raw_text)?;
    let scores = tally_scores(&ballots);
    info!(
        "run_borda_count: {} ballots, {} candidates scored",
        ballots.len(),
        scores.len()
    );
    let winners = select_top(&scores, top_x);
    Ok(ResultSummary {
        ballots_count: ballots.len(),
        candidates_count: scores.len(),
        winners,
    })
}
