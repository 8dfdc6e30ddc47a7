use anyhow::{Context, Result};
use hangman::cli::{Cli, CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{
    EMBEDDED_WORDBANK, GameState, Tally, WordBank, game_loop, load_wordbank_from_file,
    load_wordbank_from_str,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    match init_logging(cli.log_file.as_deref()) {
        Ok(Some(path)) => log::debug!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: could not set up logging: {e}"),
    }

    match run(&cli) {
        Ok(tally) => {
            log::info!(
                "Session over: won {} of {} rounds",
                tally.rounds_won(),
                tally.rounds_played()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Tally> {
    let words = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)
            .with_context(|| format!("failed to load word bank from '{}'", path.display()))?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    log::info!("Loaded {} words", words.len());
    let mut bank = WordBank::new(words, cli.seed)?;

    let mut game = match &cli.word {
        Some(word) => GameState::new(word.clone(), cli.max_guesses),
        None => GameState::from_source(&mut bank, cli.max_guesses)?,
    };

    let tally = if cli.tui {
        let mut interface = TuiInterface::new().context("failed to start terminal UI")?;
        game_loop(&mut game, &mut bank, &mut interface)?
    } else {
        println!("Loaded {} words. Guess the word one letter at a time.", bank.len());
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut game, &mut bank, &mut interface)?
    };
    Ok(tally)
}
