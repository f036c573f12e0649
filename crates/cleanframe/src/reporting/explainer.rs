//! Plain-language explanations for logged cleaning actions.

use crate::types::{ActionKind, ActionLog, ActionRecord};

const MISSING_VALUES: &str = "The dataset contained missing values. These were replaced using statistical measures to maintain completeness and avoid data loss.";
const DUPLICATES: &str = "Duplicate records were detected and removed to prevent repeated data from biasing analysis results.";
const OUTLIERS: &str = "Outliers were identified using the IQR method and removed to reduce noise and improve data consistency.";
const CORRELATED: &str = "Highly correlated columns were removed to reduce redundancy and improve feature independence.";
const GENERIC: &str = "A data preprocessing operation was applied to improve overall data quality.";

/// Maps action records to canned explanatory sentences, one per record.
pub struct RuleExplainer;

impl RuleExplainer {
    /// Explanation for a record, chosen by its kind.
    pub fn explain(record: &ActionRecord) -> &'static str {
        match record.kind() {
            ActionKind::MissingValues => MISSING_VALUES,
            ActionKind::Duplicates => DUPLICATES,
            ActionKind::Outliers => OUTLIERS,
            ActionKind::Correlation => CORRELATED,
            ActionKind::CorrelationSkipped
            | ActionKind::Constants
            | ActionKind::TextCleaning
            | ActionKind::AutoClean => GENERIC,
        }
    }

    /// Explanation for a free-form log line.
    ///
    /// First match wins: "Missing values", "Duplicate rows", "Outliers",
    /// then "correlated" in any case, then the generic sentence.
    pub fn explain_message(message: &str) -> &'static str {
        if message.contains("Missing values") {
            MISSING_VALUES
        } else if message.contains("Duplicate rows") {
            DUPLICATES
        } else if message.contains("Outliers") {
            OUTLIERS
        } else if message.to_lowercase().contains("correlated") {
            CORRELATED
        } else {
            GENERIC
        }
    }

    /// One explanation per record, in log order.
    pub fn explain_all(log: &ActionLog) -> Vec<String> {
        log.iter().map(|record| Self::explain(record).to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explain_message_first_match_wins() {
        assert_eq!(
            RuleExplainer::explain_message("Missing values and Outliers"),
            MISSING_VALUES
        );
        assert_eq!(RuleExplainer::explain_message("Duplicate rows removed: 3"), DUPLICATES);
        assert_eq!(
            RuleExplainer::explain_message("Outliers handled using IQR method. Rows removed: 0"),
            OUTLIERS
        );
        assert_eq!(
            RuleExplainer::explain_message("No highly CORRELATED columns found."),
            CORRELATED
        );
        assert_eq!(RuleExplainer::explain_message("Removed 1 constant column(s)"), GENERIC);
    }

    #[test]
    fn test_substring_match_is_case_sensitive_except_correlated() {
        assert_eq!(RuleExplainer::explain_message("missing values filled"), GENERIC);
        assert_eq!(RuleExplainer::explain_message("duplicate rows"), GENERIC);
    }

    #[test]
    fn test_kind_and_message_rules_agree_on_stock_records() {
        let records = vec![
            ActionRecord::missing_values(),
            ActionRecord::duplicates(2),
            ActionRecord::outliers(1),
            ActionRecord::correlation_skipped(),
            ActionRecord::correlated_removed(&[]),
            ActionRecord::correlated_removed(&["b".to_string()]),
            ActionRecord::constants_removed(&["c".to_string()]),
            ActionRecord::constants_removed(&[]),
            ActionRecord::text_cleaned(),
            ActionRecord::auto_clean(),
        ];

        for record in &records {
            assert_eq!(
                RuleExplainer::explain(record),
                RuleExplainer::explain_message(record.message()),
                "record: {}",
                record
            );
        }
    }

    #[test]
    fn test_explain_all_keeps_order() {
        let mut log = ActionLog::new();
        log.push(ActionRecord::missing_values());
        log.push(ActionRecord::text_cleaned());
        log.push(ActionRecord::duplicates(0));

        assert_eq!(
            RuleExplainer::explain_all(&log),
            vec![MISSING_VALUES.to_string(), GENERIC.to_string(), DUPLICATES.to_string()]
        );
    }
}
