use clap::Parser;
use flashcards_srs::cli::{Cli, Command};
use flashcards_srs::config::Config;
use flashcards_srs::export::json::{export_json_to_path, import_json};
use flashcards_srs::models::{CardId, CardUpdate, LearningSession, NewCard, Quality};
use flashcards_srs::{Result, ReviewService, SystemClock};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_logging(config: &Config, verbose: bool) {
    // RUST_LOG wins over the config file; --verbose wins over both.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("flashcards: {e}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config, cli.verbose);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("flashcards: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let db_path = cli.db.unwrap_or(config.database.path);
    let service = ReviewService::open(&db_path, Arc::new(SystemClock))?;
    info!(path = %db_path.display(), "using card database");

    match cli.command {
        Command::Add { front, back, deck } => {
            print_json(&service.create_card(NewCard::new(deck, front, back))?)
        }
        Command::Show { id } => print_json(&service.get_card(CardId(id))?),
        Command::List { deck } => print_json(&service.list_cards(deck.as_deref())?),
        Command::Edit {
            id,
            deck,
            front,
            back,
        } => {
            let update = CardUpdate {
                deck_name: deck,
                front,
                back,
            };
            print_json(&service.update_card(CardId(id), update)?)
        }
        Command::Delete { id } => {
            service.delete_card(CardId(id))?;
            println!("Card {id} deleted");
            Ok(())
        }
        Command::Decks => print_json(&service.list_decks()?),
        Command::Due { deck, limit } => print_json(&service.due_cards(deck.as_deref(), limit)?),
        Command::Review { id, score } => print_json(&service.submit_review(CardId(id), score)?),
        Command::Study { deck, limit } => study(&service, deck, limit),
        Command::Import { file } => {
            let deck = import_json(&file)?;
            let cards = service.import_deck(&deck)?;
            println!("Imported {} cards into '{}'", cards.len(), deck.name);
            Ok(())
        }
        Command::Export { deck, file } => {
            let deck = service.export_deck(&deck)?;
            export_json_to_path(&deck, &file)?;
            println!(
                "Exported {} cards from '{}' to {}",
                deck.flashcards.len(),
                deck.name,
                file.display()
            );
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs a terminal study session: show the front, wait for Enter, show the
/// back, read a grade. Failed cards come back in a retry round.
fn study(service: &ReviewService, deck: Option<String>, limit: Option<i64>) -> Result<()> {
    let cards = service.due_cards(deck.as_deref(), limit)?;
    if cards.is_empty() {
        println!("Nothing due. Come back later!");
        return Ok(());
    }

    let mut session = LearningSession::new_from_due_cards(deck, cards);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut last_round = 0;

    while !session.is_completed() {
        if session.round_number != last_round {
            println!("\n== {} ==", session.phase_message());
            last_round = session.round_number;
        }
        println!("{}", session.status_line());
        let Some(current) = session.current_card() else {
            break;
        };
        if let Some(grade) = current.last_grade {
            println!("(last time: {grade})");
        }
        println!("\n{}", current.card.front);
        print!("[Enter] to show the answer ");
        stdout.flush()?;
        if lines.next().transpose()?.is_none() {
            break;
        }

        session.toggle_back();
        if let Some(current) = session.current_card() {
            println!("{}", current.card.back);
        }

        let quality = loop {
            print!("Grade 1=again 2=hard 3=good 4=easy: ");
            stdout.flush()?;
            let Some(line) = lines.next().transpose()? else {
                println!();
                return Ok(());
            };
            match line.trim().parse::<i64>().map(Quality::try_from) {
                Ok(Ok(quality)) => break quality,
                _ => println!("Please enter a number from 1 to 4"),
            }
        };

        session.grade_current_card(service, quality)?;
        session.next_card();
    }

    if session.is_completed() {
        println!("\nSession complete!");
    }
    Ok(())
}
