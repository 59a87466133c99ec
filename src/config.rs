use std::collections::HashSet;

/// Parses the machine user list from its multi-line textual form.
///
/// Every non-empty line contains one username; lines starting with `#` are
/// treated as comments and excluded. Surrounding whitespace is ignored.
pub fn parse_machine_users(input: &str) -> HashSet<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
