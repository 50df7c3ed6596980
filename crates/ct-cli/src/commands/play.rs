use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use ct_core::{TrackerConfig, TrackerSession, codec};

pub fn run(
    config: TrackerConfig,
    file: Option<&Path>,
    campaign: Option<&str>,
    slots: usize,
) -> Result<(), String> {
    let mut session = TrackerSession::new(config.with_hero_slots(slots));
    if let Some(path) = file {
        if path.exists() {
            codec::load_into(session.store_mut(), path).map_err(|e| e.to_string())?;
        }
        session = session.with_save_path(path);
    }
    if let Some(name) = campaign {
        let output = session
            .process(&format!("campaign {name}"))
            .map_err(|e| e.to_string())?;
        println!("  {output}");
    }

    println!("  {} Campaign Tracker", "Starting".bold());
    println!(
        "  Players: {} | Scenarios recorded: {}",
        session.store().players().len(),
        session.store().outcome_log().len()
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) if e.is_warning() => {
                println!("{}\n", e.to_string().yellow());
            }
            Err(e) => {
                println!("{}\n", e.to_string().red());
            }
        }
    }

    Ok(())
}
