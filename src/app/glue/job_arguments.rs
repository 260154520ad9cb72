//! Free-form job-run arguments.
//!
//! The run-job form takes one argument per line, `--flag value`. Flags keep the order of
//! their first appearance; a repeated flag takes the value of its last line.

use std::collections::HashMap;

/// Ordered flag → value mapping. A line with no value token maps its flag to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobArguments {
    entries: Vec<(String, Option<String>)>,
}

impl JobArguments {
    /// Parse argument text. Blank lines are skipped; each other line is split on its first
    /// whitespace run into flag and value.
    pub fn parse(raw: &str) -> Self {
        let mut arguments = Self::default();
        for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (flag, value) = match line.split_once(char::is_whitespace) {
                Some((flag, value)) => (flag, Some(value.trim_start().to_string())),
                None => (line, None),
            };
            arguments.insert(flag, value);
        }
        arguments
    }

    pub fn insert(&mut self, flag: impl Into<String>, value: Option<String>) {
        let flag = flag.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == flag) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((flag, value)),
        }
    }

    /// `None` when the flag is absent, `Some(None)` when present without a value
    pub fn get(&self, flag: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == flag)
            .map(|(_, value)| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(flag, value)| (flag.as_str(), value.as_deref()))
    }

    /// Arguments as sent to Glue. Flags without a value cannot be expressed and are dropped.
    pub fn to_request_arguments(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .filter_map(|(flag, value)| value.as_ref().map(|value| (flag.clone(), value.clone())))
            .collect()
    }
}

/// First whitespace-delimited token of every non-blank line that does not start with `--`.
pub fn invalid_flags(raw: &str) -> Vec<&str> {
    raw.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| !token.starts_with("--"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_preserves_line_order() {
        let args = JobArguments::parse("--arg1 value1\n--arg2 value2");

        assert_eq!(
            args.iter().collect::<Vec<_>>(),
            vec![("--arg1", Some("value1")), ("--arg2", Some("value2"))]
        );
    }

    #[test]
    fn test_parse_splits_on_first_whitespace_run_only() {
        let args = JobArguments::parse("--query   select * from t\n--tabbed\tx");

        assert_eq!(args.get("--query"), Some(Some("select * from t")));
        assert_eq!(args.get("--tabbed"), Some(Some("x")));
    }

    #[test]
    fn test_flag_without_value_is_absent_value() {
        let args = JobArguments::parse("--dry-run\n--env prod");

        assert_eq!(args.get("--dry-run"), Some(None));
        assert_eq!(args.len(), 2);
        let request = args.to_request_arguments();
        assert_eq!(request.len(), 1);
        assert_eq!(request.get("--env").map(String::as_str), Some("prod"));
    }

    #[test]
    fn test_duplicate_flag_last_wins_first_position() {
        let args = JobArguments::parse("--env dev\n--day 1\n--env prod");

        assert_eq!(
            args.iter().collect::<Vec<_>>(),
            vec![("--env", Some("prod")), ("--day", Some("1"))]
        );
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let args = JobArguments::parse("\r\n--a 1\r\n\n   \n--b 2\r\n");

        assert_eq!(
            args.iter().collect::<Vec<_>>(),
            vec![("--a", Some("1")), ("--b", Some("2"))]
        );
    }

    #[test]
    fn test_invalid_flags_lists_every_offender() {
        assert_eq!(
            invalid_flags("arg1 value1\n--ok 1\n-x 2\n\n"),
            vec!["arg1", "-x"]
        );
        assert!(invalid_flags("--a 1\n  --b 2").is_empty());
    }
}
