/*
    This module derives FIRST and FOLLOW sets from a grammar and builds
    the LL(1) predictive table
*/

pub mod table;

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::{Grammar, EPSILON};
use crate::scanner::read_symbol;
use table::{CellEntry, PredictiveTable, END_MARKER};

#[derive(Debug, PartialEq)]
pub enum AnalysisError {
    // Two productions for one non-terminal claim the same lookahead
    AmbiguousGrammar { non_terminal: String, lookahead: String },
    // A production sentence starts with no known symbol
    MalformedSentence(String),
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::AmbiguousGrammar { non_terminal, lookahead } =>
                write!(f, "The grammar is not LL(1): two productions for `{}` share the lookahead `{}`", non_terminal, lookahead),
            AnalysisError::MalformedSentence(sentence) =>
                write!(f, "The sentence `{}` does not start with a known symbol", sentence),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

// FIRST/FOLLOW engine for one grammar version. The borrow ties the
// memo caches to that version: mutating the grammar requires dropping
// this instance and deriving a fresh one.
pub struct Analysis<'a> {
    grammar: &'a Grammar,
    cache_first: HashMap<String, Vec<String>>,
    cache_follow: HashMap<String, Vec<String>>,
}

impl<'a> Analysis<'a> {
    pub fn new(grammar: &'a Grammar) -> Self {
        Analysis {
            grammar,
            cache_first: HashMap::new(),
            cache_follow: HashMap::new(),
        }
    }

    // FIRST of a whole production sentence: the terminal it starts
    // with, or FIRST of the non-terminal it starts with
    pub fn first_from_sentence(&mut self, sentence: &str) -> Result<Vec<String>> {
        let grammar = self.grammar;

        if let Some(terminal) = read_symbol(sentence, &grammar.terminal_symbols) {
            return Ok(vec![terminal.to_string()]);
        }
        if let Some(non_terminal) = read_symbol(sentence, &grammar.non_terminal_symbols) {
            return Ok(self.first(non_terminal));
        }

        Err(AnalysisError::MalformedSentence(sentence.to_string()))
    }

    // Terminals (possibly EPSILON) that can begin a string derived
    // from `symbol`. Memoized; the cache slot is reserved empty before
    // computing, so a reference cycle back to `symbol` sees the
    // partial set and terminates instead of recursing forever.
    pub fn first(&mut self, symbol: &str) -> Vec<String> {
        if let Some(cached) = self.cache_first.get(symbol) {
            return cached.clone();
        }
        self.cache_first.insert(symbol.to_string(), Vec::new());

        let grammar = self.grammar;
        let mut first = Vec::new();

        for sentence in grammar.productions_for(symbol) {
            if sentence == EPSILON {
                first.push(EPSILON.to_string());
                continue;
            }

            // The catalogs are disjoint in a valid grammar, so trying
            // terminals before non-terminals is unambiguous
            if let Some(terminal) = read_symbol(sentence, &grammar.terminal_symbols) {
                first.push(terminal.to_string());
            } else if let Some(head) = read_symbol(sentence, &grammar.non_terminal_symbols) {
                if head != symbol {
                    first.extend(self.first(head));
                }
            }
        }

        let first: Vec<String> = first.into_iter().unique().collect();
        self.cache_first.insert(symbol.to_string(), first.clone());
        first
    }

    // Terminals (and the end marker) that can immediately follow
    // `symbol` in a derivation from the start symbol. Memoized with
    // the same reserved-slot cycle guard as `first`.
    pub fn follow(&mut self, symbol: &str) -> Vec<String> {
        if let Some(cached) = self.cache_follow.get(symbol) {
            return cached.clone();
        }
        self.cache_follow.insert(symbol.to_string(), Vec::new());

        let grammar = self.grammar;
        let mut follow = Vec::new();

        if symbol == grammar.production_start_symbol {
            follow.push(END_MARKER.to_string());
        }

        for rule in &grammar.production_rules {
            let left = rule.left_side.as_str();

            for sentence in &rule.right_side {
                for (index, _) in sentence.match_indices(symbol) {
                    // Only exact occurrences count: re-reading at the
                    // match position must give back `symbol`, not a
                    // longer symbol it is a prefix of (`T` inside `T'`)
                    if read_symbol(&sentence[index..], &grammar.non_terminal_symbols) != Some(symbol) {
                        continue;
                    }

                    self.follow_after_occurrence(sentence, index + symbol.len(), symbol, left, &mut follow);
                }
            }
        }

        let follow: Vec<String> = follow.into_iter()
            .filter(|s| s != EPSILON)
            .unique()
            .collect();
        self.cache_follow.insert(symbol.to_string(), follow.clone());
        follow
    }

    // Collects FOLLOW contributions from whatever trails one exact
    // occurrence of `symbol`, chaining past nullable non-terminals
    fn follow_after_occurrence(
        &mut self,
        sentence: &str,
        start: usize,
        symbol: &str,
        left: &str,
        follow: &mut Vec<String>,
    ) {
        let grammar = self.grammar;
        let mut position = start;

        loop {
            if position >= sentence.len() {
                // The occurrence (or a nullable chain from it) ends
                // the sentence, so everything following the generator
                // can follow `symbol` too
                if symbol != left {
                    follow.extend(self.follow(left));
                }
                return;
            }

            if let Some(terminal) = read_symbol(&sentence[position..], &grammar.terminal_symbols) {
                follow.push(terminal.to_string());
                return;
            }

            let Some(next) = read_symbol(&sentence[position..], &grammar.non_terminal_symbols) else {
                return;
            };

            let first_next = self.first(next);
            let nullable = first_next.iter().any(|s| s == EPSILON);
            follow.extend(first_next);

            if !nullable {
                return;
            }
            position += next.len();
        }
    }

    // Fills the predictive table. Fails on the first cell collision:
    // a partially filled table would be meaningless downstream.
    pub fn build_table(&mut self) -> Result<PredictiveTable> {
        let grammar = self.grammar;
        let mut table = PredictiveTable::new(grammar);

        for rule in &grammar.production_rules {
            let left = &rule.left_side;

            for sentence in &rule.right_side {
                let lookaheads = if sentence == EPSILON {
                    self.follow(left)
                } else {
                    self.first_from_sentence(sentence)?
                };

                for lookahead in &lookaheads {
                    if table.entry(left, lookahead).is_some() {
                        return Err(AnalysisError::AmbiguousGrammar {
                            non_terminal: left.clone(),
                            lookahead: lookahead.clone(),
                        });
                    }
                    table.set(left, lookahead, CellEntry {
                        generator: left.clone(),
                        production: sentence.clone(),
                    });
                }
            }
        }

        Ok(table)
    }

    // `FIRST(X) = ...` lines for every non-terminal, catalog order
    pub fn first_report(&mut self) -> String {
        let grammar = self.grammar;
        let mut report = String::new();
        for symbol in &grammar.non_terminal_symbols {
            report += &format!("FIRST({}) = {}\n", symbol, self.first(symbol).join(", "));
        }
        report
    }

    // `FOLLOW(X) = ...` lines for every non-terminal, catalog order
    pub fn follow_report(&mut self) -> String {
        let grammar = self.grammar;
        let mut report = String::new();
        for symbol in &grammar.non_terminal_symbols {
            report += &format!("FOLLOW({}) = {}\n", symbol, self.follow(symbol).join(", "));
        }
        report
    }
}
