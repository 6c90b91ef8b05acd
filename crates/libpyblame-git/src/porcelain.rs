//! Parsing of `git blame --line-porcelain` output.

/// Prefix of the header line naming a line's author
pub const AUTHOR_PREFIX: &str = "author ";

/// One author per blamed line, in file order.
///
/// Source lines are tab-prefixed in porcelain output, so only header
/// lines can match the prefix.
pub fn parse_authors(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix(AUTHOR_PREFIX))
        .map(str::to_string)
        .collect()
}
