//! Closed set of operation tokens accepted by the data source.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::errors::DispatchError;

/// Operation requested by a caller.
///
/// Canonical tokens are kebab-case; the camelCase spellings are accepted as
/// aliases. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum Operation {
    /// Browse the ontology for concepts.
    #[strum(to_string = "search-concept", serialize = "searchConcept")]
    SearchConcept,
    /// Browse the ontology for modifiers.
    #[strum(to_string = "search-modifier", serialize = "searchModifier")]
    SearchModifier,
    /// Run an exploratory cohort query.
    #[strum(to_string = "explore-query", serialize = "exploreQuery")]
    ExploreQuery,
    /// List the caller's saved cohorts.
    #[strum(to_string = "get-cohorts", serialize = "getCohorts")]
    GetCohorts,
    /// Save a cohort.
    #[strum(to_string = "add-cohort", serialize = "addCohort")]
    AddCohort,
    /// Remove a saved cohort.
    #[strum(to_string = "delete-cohort", serialize = "deleteCohort")]
    DeleteCohort,
    /// Survival analysis; recognised but not implemented.
    #[strum(to_string = "survival-query", serialize = "survivalQuery")]
    SurvivalQuery,
    /// Free-text ontology search; recognised but not implemented.
    #[strum(to_string = "search-ontology", serialize = "searchOntology")]
    SearchOntology,
}

impl Operation {
    /// Parses an operation token.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] when the token names no
    /// operation.
    pub fn parse(value: &str) -> Result<Self, DispatchError> {
        Self::from_str(value).map_err(|_| DispatchError::unknown_operation(value))
    }

    /// Canonical token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether a handler can be wired for this operation.
    #[must_use]
    pub const fn is_implemented(self) -> bool {
        !matches!(self, Self::SurvivalQuery | Self::SearchOntology)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case::canonical("search-concept", Operation::SearchConcept)]
    #[case::alias("searchConcept", Operation::SearchConcept)]
    #[case::modifier("search-modifier", Operation::SearchModifier)]
    #[case::explore("exploreQuery", Operation::ExploreQuery)]
    #[case::get_cohorts("get-cohorts", Operation::GetCohorts)]
    #[case::add_cohort("addCohort", Operation::AddCohort)]
    #[case::delete_cohort("delete-cohort", Operation::DeleteCohort)]
    #[case::survival("survivalQuery", Operation::SurvivalQuery)]
    #[case::ontology("search-ontology", Operation::SearchOntology)]
    fn parses_tokens(#[case] token: &str, #[case] expected: Operation) {
        assert_eq!(Operation::parse(token).expect("known token"), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::upper_case("SEARCH-CONCEPT")]
    #[case::padded(" search-concept")]
    #[case::underscored("search_concept")]
    #[case::unrelated("drop-table")]
    fn rejects_unknown_tokens(#[case] token: &str) {
        let error = Operation::parse(token).expect_err("unknown token");
        assert!(matches!(error, DispatchError::UnknownOperation { ref operation } if operation == token));
    }

    #[test]
    fn canonical_tokens_round_trip() {
        for operation in Operation::iter() {
            assert_eq!(operation.to_string(), operation.as_str());
            assert_eq!(Operation::parse(operation.as_str()).ok(), Some(operation));
        }
    }

    #[test]
    fn exactly_two_operations_are_reserved() {
        let reserved: Vec<Operation> = Operation::iter().filter(|op| !op.is_implemented()).collect();
        assert_eq!(
            reserved,
            vec![Operation::SurvivalQuery, Operation::SearchOntology]
        );
    }
}
