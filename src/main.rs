use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use kapian::filter::effective_senses;
use kapian::{
    pleco, Config, FilterSpec, ProgressStore, QueueOptions, StudySession, WordCatalog, WordClass,
};

fn main() -> ExitCode {
    let config = Config::from_env();
    let _log_guard = kapian::logging::init_tracing(&config.log_level);

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => ("study", &[][..]),
    };

    match command {
        "study" => run_study(&config, rest),
        "export-flashcards" => {
            println!("{}", pleco::flashcard_export(WordCatalog::builtin().entries()));
            ExitCode::SUCCESS
        }
        "export-dictionary" => {
            println!("{}", pleco::dictionary_export(WordCatalog::builtin().entries()));
            ExitCode::SUCCESS
        }
        "stats" => run_stats(&config),
        "reset" => run_reset(&config),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            ExitCode::from(2)
        }
    }
}

fn print_usage() {
    println!(
        "kapian - Classical Chinese flashcards\n\
         \n\
         Usage: kapian [COMMAND]\n\
         \n\
         Commands:\n\
         \x20 study              study the word queue (default)\n\
         \x20   --lessons 1,2    restrict the session to these lessons\n\
         \x20   --classes n.,v.  restrict the session to these word classes\n\
         \x20 export-flashcards  print a Pleco flashcard export, grouped by lesson\n\
         \x20 export-dictionary  print a flat Pleco dictionary export\n\
         \x20 stats              show the saved session score\n\
         \x20 reset              discard saved progress\n\
         \x20 help               show this message"
    );
}

/// Build a filter from `--lessons`/`--classes` flags, with the missing
/// dimension staying all-inclusive. `None` when neither flag is given.
fn parse_filter_args(rest: &[String], catalog: &WordCatalog) -> Result<Option<FilterSpec>, String> {
    let mut filter = catalog.all_filter();
    let mut any = false;

    let mut args = rest.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lessons" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--lessons needs a comma-separated list, e.g. 1,2,3".to_string())?;
                filter.lessons = value
                    .split(',')
                    .map(|part| {
                        part.trim()
                            .parse::<u32>()
                            .map_err(|_| format!("not a lesson number: {part}"))
                    })
                    .collect::<Result<_, _>>()?;
                any = true;
            }
            "--classes" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--classes needs a comma-separated list, e.g. n.,t.v.".to_string())?;
                filter.classes = value
                    .split(',')
                    .map(|part| {
                        WordClass::from_abbreviation(part.trim())
                            .ok_or_else(|| format!("not a word class: {part}"))
                    })
                    .collect::<Result<_, _>>()?;
                any = true;
            }
            other => return Err(format!("unknown study option: {other}")),
        }
    }

    Ok(if any { Some(filter) } else { None })
}

fn run_study(config: &Config, rest: &[String]) -> ExitCode {
    let catalog = WordCatalog::builtin().clone();
    let filter = match parse_filter_args(rest, &catalog) {
        Ok(filter) => filter,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let store = ProgressStore::new(config.slot_path());
    let mut session = match StudySession::open(catalog, store, QueueOptions::default()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(filter) = filter {
        if let Err(err) = session.apply_filter(filter) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    let mut input = String::new();
    loop {
        let Some(word) = session.current().cloned() else {
            let score = session.score();
            println!(
                "\nSession complete: {} correct, {} missed.",
                score.correct, score.incorrect
            );
            println!("Run `kapian reset` to start over.");
            break;
        };

        match &word.simplified {
            Some(simplified) => println!("\n{} ({})", word.hanzi, simplified),
            None => println!("\n{}", word.hanzi),
        }
        print!("[enter] flip  [y] correct  [n] wrong  [s] score  [q] quit > ");
        if io::stdout().flush().is_err() {
            break;
        }

        input.clear();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        match input.trim() {
            "" => {
                println!("  {}", word.pinyin);
                for sense in effective_senses(&word) {
                    let mut line = format!("  {} {}", sense.word_class, sense.definition);
                    if sense.pinyin != word.pinyin {
                        line.push_str(&format!(" ({})", sense.pinyin));
                    }
                    println!("{line}");
                }
            }
            "y" => {
                if let Err(err) = session.mark_correct() {
                    eprintln!("{err}");
                }
            }
            "n" => {
                if let Err(err) = session.mark_incorrect() {
                    eprintln!("{err}");
                }
            }
            "s" => print_score(&session),
            "q" => break,
            other => println!("unrecognized input: {other}"),
        }
    }

    ExitCode::SUCCESS
}

fn print_score(session: &StudySession) {
    let score = session.score();
    println!(
        "{} correct, {} missed, {} remaining",
        score.correct, score.incorrect, score.remaining
    );
}

fn run_stats(config: &Config) -> ExitCode {
    let catalog = WordCatalog::builtin();
    let store = ProgressStore::new(config.slot_path());

    match store.load(catalog) {
        Some(state) => {
            let score = state.score();
            println!(
                "{} correct, {} missed, {} remaining",
                score.correct, score.incorrect, score.remaining
            );
            ExitCode::SUCCESS
        }
        None => {
            println!("no saved session");
            ExitCode::SUCCESS
        }
    }
}

fn run_reset(config: &Config) -> ExitCode {
    let store = ProgressStore::new(config.slot_path());
    match store.clear() {
        Ok(()) => {
            println!("saved progress cleared");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to clear saved progress: {err}");
            ExitCode::FAILURE
        }
    }
}
