/*
    This module exchanges grammar snapshots with the persistence layer
*/

use std::fmt::Display;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error_handling::*;
use crate::grammar::{Grammar, ProductionRule};

#[derive(Debug)]
pub enum SnapshotErrorType {
    // There was an issue with reading the file
    FileError(std::io::Error),
    // The document is not a valid grammar snapshot
    InvalidInput,
}

impl ErrorType for SnapshotErrorType {}

impl PartialEq for SnapshotErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let SnapshotErrorType::FileError(a) = self {
            if let SnapshotErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for SnapshotErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotErrorType::FileError(e) => write!(f, "File error: {}", e),
            SnapshotErrorType::InvalidInput => write!(f, "The file does not contain a valid grammar snapshot"),
        }
    }
}

pub type SnapshotError = Error<SnapshotErrorType>;

// Wire form of a production rule, field for field
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSnapshot {
    pub left_side: String,
    pub right_side: Vec<String>,
}

// Structural record of a grammar, order-preserving in every list.
// Building a grammar from a snapshot and serializing it back are
// inverse operations.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GrammarSnapshot {
    pub non_terminal_symbols: Vec<String>,
    pub terminal_symbols: Vec<String>,
    pub production_set_symbol: String,
    pub production_start_symbol: String,
    pub production_rules: Vec<RuleSnapshot>,
}

impl GrammarSnapshot {
    pub fn from_grammar(grammar: &Grammar) -> Self {
        GrammarSnapshot {
            non_terminal_symbols: grammar.non_terminal_symbols.clone(),
            terminal_symbols: grammar.terminal_symbols.clone(),
            production_set_symbol: grammar.production_set_symbol.clone(),
            production_start_symbol: grammar.production_start_symbol.clone(),
            production_rules: grammar.production_rules.iter()
                .map(|rule| RuleSnapshot {
                    left_side: rule.left_side.clone(),
                    right_side: rule.right_side.clone(),
                })
                .collect(),
        }
    }

    pub fn into_grammar(self) -> Grammar {
        Grammar {
            non_terminal_symbols: self.non_terminal_symbols,
            terminal_symbols: self.terminal_symbols,
            production_set_symbol: self.production_set_symbol,
            production_start_symbol: self.production_start_symbol,
            production_rules: self.production_rules.into_iter()
                .map(|rule| ProductionRule {
                    left_side: rule.left_side,
                    right_side: rule.right_side,
                })
                .collect(),
        }
    }
}

// Any way the document can be malformed collapses into the one
// InvalidInput error; no partially filled grammar escapes
pub fn from_json(text: &str) -> Result<Grammar, SnapshotErrorType> {
    serde_json::from_str::<GrammarSnapshot>(text)
        .map(GrammarSnapshot::into_grammar)
        .map_err(|_| SnapshotErrorType::InvalidInput)
}

pub fn to_json(grammar: &Grammar) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&GrammarSnapshot::from_grammar(grammar))
}

pub fn load_file(path: &Path) -> Result<Grammar, SnapshotError> {
    let text = std::fs::read_to_string(path).map_err(|e| SnapshotError {
        file: path.to_path_buf(),
        error: SnapshotErrorType::FileError(e),
    })?;

    from_json(&text).map_err(|error| SnapshotError {
        file: path.to_path_buf(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::analysis::Analysis;
    use crate::grammar::test_grammars::expression;

    use super::*;

    #[test]
    fn round_trip_preserves_grammar() {
        let grammar = expression();

        let json = to_json(&grammar).unwrap();
        let rebuilt = from_json(&json).unwrap();

        assert_eq!(rebuilt, grammar);
    }

    #[test]
    fn round_trip_preserves_derived_results() {
        let grammar = expression();
        let rebuilt = from_json(&to_json(&grammar).unwrap()).unwrap();

        assert_eq!(rebuilt.validate(), grammar.validate());
        assert_eq!(rebuilt.formalism(), grammar.formalism());

        let mut original = Analysis::new(&grammar);
        let mut derived = Analysis::new(&rebuilt);
        assert_eq!(original.first_report(), derived.first_report());
        assert_eq!(original.follow_report(), derived.follow_report());
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let json = to_json(&expression()).unwrap();

        assert!(json.contains("\"nonTerminalSymbols\""));
        assert!(json.contains("\"terminalSymbols\""));
        assert!(json.contains("\"productionSetSymbol\""));
        assert!(json.contains("\"productionStartSymbol\""));
        assert!(json.contains("\"productionRules\""));
        assert!(json.contains("\"leftSide\""));
        assert!(json.contains("\"rightSide\""));
    }

    #[test]
    fn malformed_documents_are_one_error() {
        let documents = vec![
            "",
            "not json at all",
            "{}",
            "{\"nonTerminalSymbols\": \"not a list\"}",
            "[1, 2, 3]",
        ];

        for document in documents {
            assert_eq!(from_json(document).unwrap_err(), SnapshotErrorType::InvalidInput);
        }
    }

    #[test]
    fn load_example_file() {
        let path = PathBuf::from("example_data/expression.json");
        let grammar = load_file(&path).unwrap();

        assert_eq!(grammar, expression());
    }

    #[test]
    fn load_missing_file() {
        let path = PathBuf::from("example_data/no_such_file.json");
        let error = load_file(&path).unwrap_err();

        assert_eq!(error.file, path);
        assert_eq!(
            error.error,
            SnapshotErrorType::FileError(std::io::Error::from(std::io::ErrorKind::NotFound))
        );
    }
}
