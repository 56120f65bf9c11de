mod analysis;
mod cli;
mod error_handling;
mod grammar;
mod recognizer;
mod scanner;
mod snapshot;

use clap::Parser;

use analysis::Analysis;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let grammar = match snapshot::load_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    let errors = grammar.validate();
    for error in &errors {
        eprintln!("{error}");
    }

    let formalism = grammar.formalism();
    if !formalism.is_empty() {
        println!("{formalism}");
    }

    if !errors.is_empty() || !grammar.is_completed() {
        eprintln!("The grammar is not complete and valid; no analysis was run");
        std::process::exit(1);
    }

    let mut analysis = Analysis::new(&grammar);

    if cli.sets {
        println!();
        print!("{}", analysis.first_report());
        print!("{}", analysis.follow_report());
    }

    let table = match analysis.build_table() {
        Ok(table) => table,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    if cli.table {
        println!();
        print!("{table}");
    }

    if let Some(sentence) = &cli.sentence {
        let run = recognizer::recognize(&grammar, &table, sentence);

        println!();
        for step in &run.steps {
            println!("{:<24}{:<24}{}", step.stack_display(), step.input, step.action);
        }

        if run.accepted {
            println!("\nThe sentence was recognized");
        } else {
            println!("\nThe sentence was not recognized");
            std::process::exit(1);
        }
    }
}
