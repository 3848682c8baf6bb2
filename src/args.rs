use clap::Parser;

/// This is a ranked ballot tabulation program using the Borda count.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The CSV file with the ranked ballots. The first row is the header row and
    /// must name the preference columns: Rank 1, Rank 2, ...
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (positive integer, default 5) How many of the top candidates to display. Input that
    /// cannot be read as a positive integer falls back to the default.
    #[clap(short, long, value_parser)]
    pub top: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the tabulation will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If
    /// provided, bordatally will check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
