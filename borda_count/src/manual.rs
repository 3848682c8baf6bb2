/*!

This is the long-form manual for `borda_count` and `bordatally`.

## Input format

The input is a comma-delimited CSV text file (UTF-8) whose first row is a
header row. Every column whose header reads `Rank N` (the word `Rank` in
any case, followed by whitespace and a number) is a preference slot; all
other columns are ignored. A typical export from a polling form looks
like this:

```text
Timestamp,Email,Rank 1,Rank 2,Rank 3
2024-05-01,a@example.org,Alice,Bob,Carol
2024-05-02,b@example.org,Bob,,Alice
```

Notes on the accepted shape:
- The rank columns may appear anywhere and in any order in the header;
  ballots always follow the numeric order of the `Rank N` suffixes.
- A blank rank cell is skipped, so the ballot above on the second row is
  `Bob, Alice` with two choices.
- A row that fills none of the rank columns is dropped and does not count
  as a ballot.
- Values may be wrapped in one pair of double quotes (`"Alice"`); there
  is no support for escaped quotes or for commas inside quoted values.
- Blank lines anywhere in the file are tolerated.

## Scoring

The tabulation uses the Borda count: on a ballot ranking k candidates,
the first choice receives k points and the last choice 1 point. Points
are summed over all ballots. The report lists the top-X candidates by
total score, with ties ordered by candidate name.

## Output

`bordatally` prints a plain-text table. With the `--out` flag it also
writes a JSON summary:

```json
{
  "ballots_count": 2,
  "candidates_count": 3,
  "winners": [
    { "rank": 1, "name": "Alice", "score": 4 },
    { "rank": 2, "name": "Bob", "score": 4 }
  ]
}
```

With the `--reference` flag, the computed summary is checked against a
reference summary file in the same JSON format and the program fails on
any difference, printing a line diff.

*/
