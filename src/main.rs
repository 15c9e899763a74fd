use std::process;

use wordle_client::cli::parse_cli;
use wordle_client::logging;
use wordle_client::session::run_session;
use wordle_client::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};

fn main() {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let words = match &cli.wordlist {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                process::exit(1);
            }
        },
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    if words.is_empty() {
        eprintln!("Word list is empty; nothing to guess with.");
        process::exit(1);
    }

    match run_session(&cli.session_config(), words) {
        Ok(flag) => println!("{flag}"),
        Err(e) => {
            eprintln!("Game session failed: {e}");
            process::exit(1);
        }
    }
}
