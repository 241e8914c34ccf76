use tracing::warn;

/// Parse a comma-separated packet list ("4, 2, 6, 8, 2") into sizes.
///
/// Entries that do not parse as integers are skipped with a warning rather
/// than failing the run; blank entries (including a trailing comma) are
/// ignored silently. The engine never sees the raw text.
pub fn parse_packet_list(input: &str) -> Vec<i64> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping non-numeric packet entry '{}'", entry);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_packet_list;

    #[test]
    fn parses_the_default_input() {
        assert_eq!(parse_packet_list("4, 2, 6, 8, 2"), vec![4, 2, 6, 8, 2]);
    }

    #[test]
    fn skips_non_numeric_entries() {
        assert_eq!(parse_packet_list("4, x, 2, 1.5, 7"), vec![4, 2, 7]);
    }

    #[test]
    fn tolerates_blanks_and_trailing_commas() {
        assert_eq!(parse_packet_list("3,,5, ,2,"), vec![3, 5, 2]);
        assert_eq!(parse_packet_list(""), Vec::<i64>::new());
        assert_eq!(parse_packet_list("  "), Vec::<i64>::new());
    }

    #[test]
    fn keeps_negative_entries() {
        // Filtering of nonsense values is a parsing concern; negative sizes
        // are valid integers and flow through to the engine untouched.
        assert_eq!(parse_packet_list("-3, 4"), vec![-3, 4]);
    }
}
