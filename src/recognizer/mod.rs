/*
    This module simulates table-driven predictive parsing of a sentence
*/

use std::mem;

use crate::analysis::table::{PredictiveTable, END_MARKER};
use crate::grammar::{Grammar, EPSILON};
use crate::scanner::read_symbol;

// Action label for popping a terminal that matched the input
const CONSUME_ACTION: &str = "consume terminal";

// One parser configuration: the stack, what is left of the input, and
// the action that was applied to leave this configuration
#[derive(Debug, PartialEq, Clone)]
pub struct RecognitionStep {
    pub stack: Vec<String>,
    pub input: String,
    pub action: String,
}

impl RecognitionStep {
    fn new(stack: Vec<String>, input: String) -> Self {
        RecognitionStep {
            stack,
            input,
            action: String::new(),
        }
    }

    // The accepting configuration: nothing left to rewrite, nothing
    // left to read
    pub fn finished(&self) -> bool {
        self.stack.is_empty() && self.input == END_MARKER
    }

    // Stack rendered bottom-up with the bottom marker, e.g. `$ E' T`
    pub fn stack_display(&self) -> String {
        let mut display = String::from(END_MARKER);
        for symbol in &self.stack {
            display.push(' ');
            display.push_str(symbol);
        }
        display
    }
}

// One finished run: the full trace and the verdict. Owned by the
// caller and discarded after inspection; a new sentence gets a new run.
#[derive(Debug, PartialEq)]
pub struct Recognition {
    pub steps: Vec<RecognitionStep>,
    pub accepted: bool,
}

// Runs the deterministic pushdown procedure over `sentence`. Rejection
// is an ordinary outcome: the trace up to and including the failing
// configuration is kept.
pub fn recognize(grammar: &Grammar, table: &PredictiveTable, sentence: &str) -> Recognition {
    let mut steps = Vec::new();
    let mut step = RecognitionStep::new(
        vec![grammar.production_start_symbol.clone()],
        format!("{sentence}{END_MARKER}"),
    );

    let accepted = loop {
        if step.finished() {
            break true;
        }

        let lookahead = read_symbol(&step.input, &grammar.terminal_symbols);
        let mut stack = step.stack.clone();
        let Some(head) = stack.pop() else {
            // Input left over with nothing on the stack
            break false;
        };

        if grammar.terminal_symbols.contains(&head) {
            if lookahead != Some(head.as_str()) {
                break false;
            }
            let input = step.input[head.len()..].trim_start().to_string();
            step.action = CONSUME_ACTION.to_string();
            steps.push(mem::replace(&mut step, RecognitionStep::new(stack, input)));
        } else {
            // No terminal readable: only the bare end marker is a
            // usable lookahead, anything else is an unknown symbol
            let column = match lookahead {
                Some(terminal) => terminal,
                None if step.input == END_MARKER => END_MARKER,
                None => break false,
            };
            let Some(entry) = table.entry(&head, column) else {
                break false;
            };

            for symbol in sentence_symbols(&entry.production, grammar).into_iter().rev() {
                stack.push(symbol);
            }
            let input = step.input.clone();
            step.action = entry.representation();
            steps.push(mem::replace(&mut step, RecognitionStep::new(stack, input)));
        }
    };

    // The final configuration: accepting, or the one that failed
    steps.push(step);

    Recognition { steps, accepted }
}

// Splits a production sentence back into its symbols. An ε production
// contributes nothing to the stack.
fn sentence_symbols(sentence: &str, grammar: &Grammar) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut rest = sentence;

    while !rest.is_empty() && rest != EPSILON {
        let Some(symbol) = read_symbol(rest, &grammar.terminal_symbols)
            .or_else(|| read_symbol(rest, &grammar.non_terminal_symbols))
        else {
            break;
        };
        symbols.push(symbol.to_string());
        rest = rest[symbol.len()..].trim_start();
    }

    symbols
}
