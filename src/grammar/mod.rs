/*
    This module is for storing and validating grammars
*/

use std::fmt::Display;

use itertools::Itertools;

// Sentinel for the empty sentence. Member of neither symbol catalog.
pub const EPSILON: &str = "ε";

// Symbol naming the grammar itself in the formalism rendering
const GRAMMAR_SYMBOL: &str = "G";

// Indentation for production rules inside the rendered rule set
const INDENT: &str = "    ";

// One rewrite rule: a left-hand non-terminal and its alternative
// sentences. A sentence is symbols concatenated with no delimiter,
// or EPSILON alone.
#[derive(Debug, PartialEq, Clone)]
pub struct ProductionRule {
    pub left_side: String,
    pub right_side: Vec<String>,
}

impl ProductionRule {
    pub fn is_completed(&self) -> bool {
        !self.left_side.is_empty() && !self.right_side.is_empty()
    }

    // Renders `left -> s1 | s2`, or nothing while the rule is unfinished
    pub fn formalism(&self) -> String {
        if self.is_completed() {
            format!("{} -> {}", self.left_side, self.right_side.iter().join(" | "))
        } else {
            String::new()
        }
    }
}

// The formal 4-tuple plus the rule list. Catalog order is insertion
// order and is significant for display and for the predictive table.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Grammar {
    pub non_terminal_symbols: Vec<String>,
    pub terminal_symbols: Vec<String>,
    pub production_set_symbol: String,
    pub production_start_symbol: String,
    pub production_rules: Vec<ProductionRule>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ValidationError {
    // A symbol appears in both catalogs
    OverlappingSymbols(Vec<String>),
    // The start symbol is set but is not a non-terminal
    StartSymbolNotNonTerminal,
    // The start symbol is set but appears among the terminals
    StartSymbolIsTerminal,
    // No rule rewrites the start symbol
    MissingStartRule,
    // More than one rule for the same left-hand symbol
    DuplicatedRules(Vec<String>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::OverlappingSymbols(symbols) =>
                write!(f, "Some symbols appear in both the terminal and non-terminal catalogs ({})", symbols.iter().join(", ")),
            ValidationError::StartSymbolNotNonTerminal =>
                write!(f, "The start symbol is not among the non-terminal symbols"),
            ValidationError::StartSymbolIsTerminal =>
                write!(f, "The start symbol must not be among the terminal symbols"),
            ValidationError::MissingStartRule =>
                write!(f, "There is no production rule for the start symbol"),
            ValidationError::DuplicatedRules(symbols) =>
                write!(f, "There are duplicated production rules ({})", symbols.iter().join(", ")),
        }
    }
}

impl Grammar {
    // Checks the grammar invariants. Non-fatal: the grammar stays
    // usable, the caller decides what to do with the list.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let overlap: Vec<String> = self.non_terminal_symbols.iter()
            .filter(|symbol| self.terminal_symbols.contains(symbol))
            .cloned()
            .collect();
        if !overlap.is_empty() {
            errors.push(ValidationError::OverlappingSymbols(overlap));
        }

        let start = &self.production_start_symbol;
        if !start.is_empty() && !self.non_terminal_symbols.contains(start) {
            errors.push(ValidationError::StartSymbolNotNonTerminal);
        }
        if !start.is_empty() && self.terminal_symbols.contains(start) {
            errors.push(ValidationError::StartSymbolIsTerminal);
        }

        let mut generators: Vec<&String> = Vec::new();
        let mut duplicated: Vec<String> = Vec::new();
        for rule in &self.production_rules {
            let left = &rule.left_side;
            if left.is_empty() {
                continue;
            }
            if generators.contains(&left) {
                if !duplicated.contains(left) {
                    duplicated.push(left.clone());
                }
            } else {
                generators.push(left);
            }
        }

        if !start.is_empty() && !generators.contains(&start) {
            errors.push(ValidationError::MissingStartRule);
        }
        if !duplicated.is_empty() {
            errors.push(ValidationError::DuplicatedRules(duplicated));
        }

        return errors;
    }

    // A grammar is completed once every component has been filled in
    pub fn is_completed(&self) -> bool {
        !self.non_terminal_symbols.is_empty()
            && !self.terminal_symbols.is_empty()
            && !self.production_set_symbol.is_empty()
            && !self.production_start_symbol.is_empty()
            && !self.production_rules.is_empty()
            && self.production_rules.iter().all(ProductionRule::is_completed)
    }

    // The alternatives of the first rule rewriting `symbol`
    pub fn productions_for(&self, symbol: &str) -> &[String] {
        self.production_rules.iter()
            .find(|rule| rule.left_side == symbol)
            .map(|rule| rule.right_side.as_slice())
            .unwrap_or(&[])
    }

    // Renders `G = ({NT...}, {T...}, P, S)` followed by the rule set.
    // Empty until all four components and at least one rule exist.
    pub fn formalism(&self) -> String {
        let nt = self.non_terminal_symbols.iter().join(", ");
        let t = self.terminal_symbols.iter().join(", ");
        let p = &self.production_set_symbol;
        let s = &self.production_start_symbol;

        let rules = self.production_rules.iter()
            .map(ProductionRule::formalism)
            .filter(|f| !f.is_empty())
            .map(|f| format!("{INDENT}{f}"))
            .join(",\n");

        if nt.is_empty() || t.is_empty() || p.is_empty() || s.is_empty() || rules.is_empty() {
            return String::new();
        }

        format!("{GRAMMAR_SYMBOL} = ({{{nt}}}, {{{t}}}, {p}, {s})\n{p} = {{\n{rules}\n}}")
    }
}

#[cfg(test)]
pub mod test_grammars {
    use super::*;

    fn rule(left: &str, right: &[&str]) -> ProductionRule {
        ProductionRule {
            left_side: left.to_string(),
            right_side: right.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn strings(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    // The classic non-left-recursive expression grammar
    pub fn expression() -> Grammar {
        Grammar {
            non_terminal_symbols: strings(&["E", "E'", "T", "T'", "F"]),
            terminal_symbols: strings(&["+", "*", "(", ")", "id"]),
            production_set_symbol: "P".to_string(),
            production_start_symbol: "E".to_string(),
            production_rules: vec![
                rule("E", &["TE'"]),
                rule("E'", &["+TE'", EPSILON]),
                rule("T", &["FT'"]),
                rule("T'", &["*FT'", EPSILON]),
                rule("F", &["(E)", "id"]),
            ],
        }
    }

    // A grammar whose non-terminals reference each other in a cycle
    pub fn cyclic() -> Grammar {
        Grammar {
            non_terminal_symbols: strings(&["A", "B"]),
            terminal_symbols: strings(&["x", "y"]),
            production_set_symbol: "P".to_string(),
            production_start_symbol: "A".to_string(),
            production_rules: vec![
                rule("A", &["Bx"]),
                rule("B", &["Ay"]),
            ],
        }
    }

    // Two alternatives for S share the lookahead `a`
    pub fn ambiguous() -> Grammar {
        Grammar {
            non_terminal_symbols: strings(&["S"]),
            terminal_symbols: strings(&["a", "b"]),
            production_set_symbol: "P".to_string(),
            production_start_symbol: "S".to_string(),
            production_rules: vec![
                rule("S", &["ab", "a"]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_grammars::*;
    use super::*;

    #[test]
    fn validate_completed_grammar() {
        let grammar = expression();
        assert_eq!(grammar.validate(), vec![]);
        assert!(grammar.is_completed());
    }

    #[test]
    fn validate_is_deterministic() {
        let mut grammar = expression();
        grammar.terminal_symbols.push("E".to_string());
        grammar.production_rules.push(ProductionRule {
            left_side: "T".to_string(),
            right_side: vec!["id".to_string()],
        });

        let first_pass = grammar.validate();
        assert_eq!(first_pass, grammar.validate());
    }

    #[test]
    fn validate_overlapping_catalogs() {
        let mut grammar = expression();
        grammar.terminal_symbols.push("E".to_string());
        grammar.terminal_symbols.push("F".to_string());

        assert_eq!(grammar.validate(), vec![
            ValidationError::OverlappingSymbols(vec!["E".to_string(), "F".to_string()]),
            ValidationError::StartSymbolIsTerminal,
        ]);
    }

    #[test]
    fn validate_start_symbol() {
        let mut grammar = expression();
        grammar.production_start_symbol = "X".to_string();

        assert_eq!(grammar.validate(), vec![
            ValidationError::StartSymbolNotNonTerminal,
            ValidationError::MissingStartRule,
        ]);
    }

    #[test]
    fn validate_duplicated_rules() {
        let mut grammar = expression();
        grammar.production_rules.push(ProductionRule {
            left_side: "F".to_string(),
            right_side: vec!["id".to_string()],
        });

        assert_eq!(grammar.validate(), vec![
            ValidationError::DuplicatedRules(vec!["F".to_string()]),
        ]);
    }

    #[test]
    fn empty_grammar_is_not_completed() {
        let grammar = Grammar::default();
        assert!(!grammar.is_completed());
        // An empty grammar breaks no invariant either
        assert_eq!(grammar.validate(), vec![]);
    }

    #[test]
    fn incomplete_rule_blocks_completion() {
        let mut grammar = expression();
        grammar.production_rules.push(ProductionRule {
            left_side: String::new(),
            right_side: vec!["id".to_string()],
        });
        assert!(!grammar.is_completed());
    }

    #[test]
    fn productions_lookup() {
        let grammar = expression();
        assert_eq!(grammar.productions_for("F"), &["(E)".to_string(), "id".to_string()]);
        assert_eq!(grammar.productions_for("id"), &[] as &[String]);
    }

    #[test]
    fn formalism_rendering() {
        let grammar = expression();
        assert_eq!(grammar.formalism(), concat!(
            "G = ({E, E', T, T', F}, {+, *, (, ), id}, P, E)\n",
            "P = {\n",
            "    E -> TE',\n",
            "    E' -> +TE' | ε,\n",
            "    T -> FT',\n",
            "    T' -> *FT' | ε,\n",
            "    F -> (E) | id\n",
            "}"
        ));
    }

    #[test]
    fn formalism_requires_all_components() {
        let mut grammar = expression();
        grammar.production_set_symbol = String::new();
        assert_eq!(grammar.formalism(), "");

        let mut grammar = expression();
        grammar.production_rules.clear();
        assert_eq!(grammar.formalism(), "");
    }
}
