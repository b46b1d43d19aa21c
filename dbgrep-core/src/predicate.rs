//! SQL predicate construction for the four supported match modes.
//!
//! Every probe compares `CAST([column] AS NVARCHAR(MAX))` against a single
//! bound parameter, so the search value itself never appears in SQL text.
//! Case-insensitive modes force the `Latin1_General_CI_AS` collation on the
//! cast; case-sensitive modes leave the comparison to the cast's native
//! collation.

/// Collation applied to case-insensitive comparisons.
const CI_COLLATION: &str = "Latin1_General_CI_AS";

/// How a column value is compared against the search value.
///
/// The variant is fixed for a whole search run, chosen once from the
/// `--exact` and `--case-sensitive` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPredicate {
    /// Equality under the cast's native collation
    ExactCaseSensitive,
    /// Equality under `Latin1_General_CI_AS`
    ExactCaseInsensitive,
    /// `LIKE '%value%'` under the cast's native collation
    ContainsCaseSensitive,
    /// `LIKE '%value%'` under `Latin1_General_CI_AS`
    ContainsCaseInsensitive,
}

impl MatchPredicate {
    /// Maps the CLI flag pair to a predicate. Substring and case-insensitive
    /// are the defaults.
    pub fn from_flags(exact: bool, case_sensitive: bool) -> Self {
        match (exact, case_sensitive) {
            (true, true) => Self::ExactCaseSensitive,
            (true, false) => Self::ExactCaseInsensitive,
            (false, true) => Self::ContainsCaseSensitive,
            (false, false) => Self::ContainsCaseInsensitive,
        }
    }

    /// Renders the `WHERE` clause body for one column, with the search value
    /// as parameter `@P1`.
    pub fn where_clause(self, column: &str) -> String {
        let cast = format!("CAST([{column}] AS NVARCHAR(MAX))");
        match self {
            Self::ExactCaseSensitive => format!("{cast} = @P1"),
            Self::ExactCaseInsensitive => format!("{cast} COLLATE {CI_COLLATION} = @P1"),
            Self::ContainsCaseSensitive => format!("{cast} LIKE @P1"),
            Self::ContainsCaseInsensitive => format!("{cast} COLLATE {CI_COLLATION} LIKE @P1"),
        }
    }

    /// The value to bind for `@P1`. Substring modes wrap the search value in
    /// `%` wildcards; exact modes bind it unchanged.
    pub fn parameter(self, search_value: &str) -> String {
        match self {
            Self::ExactCaseSensitive | Self::ExactCaseInsensitive => search_value.to_string(),
            Self::ContainsCaseSensitive | Self::ContainsCaseInsensitive => {
                format!("%{search_value}%")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_maps_all_combinations() {
        assert_eq!(
            MatchPredicate::from_flags(false, false),
            MatchPredicate::ContainsCaseInsensitive
        );
        assert_eq!(
            MatchPredicate::from_flags(false, true),
            MatchPredicate::ContainsCaseSensitive
        );
        assert_eq!(
            MatchPredicate::from_flags(true, false),
            MatchPredicate::ExactCaseInsensitive
        );
        assert_eq!(
            MatchPredicate::from_flags(true, true),
            MatchPredicate::ExactCaseSensitive
        );
    }

    #[test]
    fn test_where_clause_exact_case_sensitive() {
        let clause = MatchPredicate::ExactCaseSensitive.where_clause("email");
        assert_eq!(clause, "CAST([email] AS NVARCHAR(MAX)) = @P1");
    }

    #[test]
    fn test_where_clause_exact_case_insensitive() {
        let clause = MatchPredicate::ExactCaseInsensitive.where_clause("email");
        assert_eq!(
            clause,
            "CAST([email] AS NVARCHAR(MAX)) COLLATE Latin1_General_CI_AS = @P1"
        );
    }

    #[test]
    fn test_where_clause_contains_case_sensitive() {
        let clause = MatchPredicate::ContainsCaseSensitive.where_clause("notes");
        assert_eq!(clause, "CAST([notes] AS NVARCHAR(MAX)) LIKE @P1");
    }

    #[test]
    fn test_where_clause_contains_case_insensitive() {
        let clause = MatchPredicate::ContainsCaseInsensitive.where_clause("notes");
        assert_eq!(
            clause,
            "CAST([notes] AS NVARCHAR(MAX)) COLLATE Latin1_General_CI_AS LIKE @P1"
        );
    }

    #[test]
    fn test_parameter_exact_is_unchanged() {
        assert_eq!(MatchPredicate::ExactCaseSensitive.parameter("42"), "42");
        assert_eq!(
            MatchPredicate::ExactCaseInsensitive.parameter("John Doe"),
            "John Doe"
        );
    }

    #[test]
    fn test_parameter_contains_wraps_wildcards() {
        assert_eq!(
            MatchPredicate::ContainsCaseInsensitive.parameter("John"),
            "%John%"
        );
        assert_eq!(
            MatchPredicate::ContainsCaseSensitive.parameter("a%b"),
            "%a%b%"
        );
    }
}
