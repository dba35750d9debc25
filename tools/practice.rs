/// Practice — interactive shell for running practice sessions in a terminal.
///
/// Usage: practice [--catalog <path>] [--seed <n>] [--verbose]
///
/// Commands:
///   next                     — show a new narrative
///   show                     — show the current narrative again
///   record                   — start recording
///   tick [n]                 — advance the recording clock n seconds
///   stop                     — finish recording
///   analyze                  — score the recorded reading
///   score <emotion>          — score an emotion label directly
///   bulk <emotion> <n>       — score n times and print level distribution
///   seed <n>                 — rebuild the session with a new seed
///   reset                    — discard the recording and result
///   help                     — list commands
///   quit                     — exit
///
/// There is no capture device here: `stop` hands the session an empty
/// sample of the recorded length.

use neura_speech::core::catalog::NarrativeCatalog;
use neura_speech::core::scorer::SpeechScorer;
use neura_speech::core::session::{format_elapsed, PracticeSession, RecordingState};
use neura_speech::schema::narrative::NarrativeEntry;
use neura_speech::schema::score::{Level, Metric, Rating, SpeechResult};
use rustc_hash::FxHashMap;
use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut catalog_path = None;
    let mut seed: u64 = 42;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(io::stderr)
        .init();

    let mut session = match build_session(catalog_path.as_deref(), seed) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} narratives", session.catalog().len());
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    print_narrative(session.next_narrative());
    let mut scorer = SpeechScorer::seeded(seed);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("practice> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "next" | "n" => {
                print_narrative(session.next_narrative());
            }
            "show" => match session.narrative() {
                Some(narrative) => print_narrative(narrative),
                None => println!("No narrative selected. Use 'next'."),
            },
            "record" | "r" => match session.start_recording() {
                Ok(()) => println!("Recording started. Begin reading the narrative aloud."),
                Err(e) => println!("ERROR: {}", e),
            },
            "tick" => {
                let secs: u32 = match parts.get(1).map(|s| s.parse::<u32>()) {
                    None => 1,
                    Some(Ok(n)) => n,
                    Some(Err(_)) => {
                        println!("Invalid count: {}", parts[1]);
                        continue;
                    }
                };
                let mut elapsed = None;
                for _ in 0..secs {
                    elapsed = session.tick();
                }
                match elapsed {
                    Some(e) => println!("Recording... {}", format_elapsed(e)),
                    None => println!("Not recording."),
                }
            }
            "stop" | "s" => {
                let elapsed = match session.recording() {
                    RecordingState::Recording { elapsed_secs } => *elapsed_secs,
                    _ => 0,
                };
                match session.stop_recording(Vec::new()) {
                    Ok(_) => println!(
                        "Recording complete ({}). Use 'analyze' to see your results.",
                        format_elapsed(elapsed)
                    ),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "analyze" | "a" => match session.analyze() {
                Ok(result) => {
                    print_result(result);
                    println!("You achieved {} speaker level!", result.level.name().to_uppercase());
                }
                Err(e) => println!("ERROR: {}", e),
            },
            "score" => {
                if parts.len() < 2 {
                    println!("Usage: score <emotion>");
                    println!("  emotion: excitement, sorrow, anger, fear, joy, mixed, or any label");
                    continue;
                }
                print_result(&scorer.score(parts[1]));
            }
            "bulk" => {
                if parts.len() < 3 {
                    println!("Usage: bulk <emotion> <n>");
                    continue;
                }
                let count: usize = match parts[2].parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Invalid count: {}", parts[2]);
                        continue;
                    }
                };
                print_bulk_stats(parts[1], count, seed);
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Current seed: {}", seed);
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(s) => match build_session(catalog_path.as_deref(), s) {
                        Ok(new_session) => {
                            seed = s;
                            session = new_session;
                            scorer = SpeechScorer::seeded(seed);
                            println!("Seed set to {}", seed);
                            print_narrative(session.next_narrative());
                        }
                        Err(e) => println!("ERROR: {}", e),
                    },
                    Err(_) => {
                        println!("Invalid seed: {}", parts[1]);
                    }
                }
            }
            "reset" => {
                session.reset();
                println!("Session reset.");
            }
            other => {
                println!("Unknown command: {}. Type 'help' for commands.", other);
            }
        }
    }
}

fn print_usage() {
    println!("Usage: practice [--catalog <path>] [--seed <n>] [--verbose]");
    println!();
    println!("Options:");
    println!("  --catalog <path>   RON narrative file merged over the built-in narratives");
    println!("  --seed <n>         RNG seed (default: 42)");
    println!("  --verbose, -v      Log session events to stderr");
}

fn print_help() {
    println!("Commands:");
    println!("  next                 Show a new narrative");
    println!("  show                 Show the current narrative again");
    println!("  record               Start recording");
    println!("  tick [n]             Advance the recording clock n seconds");
    println!("  stop                 Finish recording");
    println!("  analyze              Score the recorded reading");
    println!("  score <emotion>      Score an emotion label directly");
    println!("  bulk <emotion> <n>   Score n times and print level distribution");
    println!("  seed <n>             Rebuild the session with a new seed");
    println!("  reset                Discard the recording and result");
    println!("  help                 Show this help");
    println!("  quit                 Exit");
}

fn build_session(
    catalog_path: Option<&str>,
    seed: u64,
) -> Result<PracticeSession, neura_speech::core::session::SessionError> {
    let mut builder = PracticeSession::builder()
        .seed(seed)
        .with_catalog(NarrativeCatalog::builtin());
    if let Some(path) = catalog_path {
        builder = builder.catalog_path(path);
    }
    builder.build()
}

fn print_narrative(narrative: &NarrativeEntry) {
    println!("\n--- Practice Narrative [{}] ---", narrative.emotion.label().to_uppercase());
    println!("{}", narrative.description);
    println!();
    println!("{}", narrative.text);
    println!("--- End ---\n");
}

fn print_result(result: &SpeechResult) {
    println!("\n=== Speech Analysis Report ===");
    println!("Emotion analyzed: {}", result.emotion);
    println!(
        "Speaker level:    {} ({})",
        result.level.title(),
        result.level.description()
    );
    println!("Overall:          {}/100\n", result.overall());

    for (metric, value) in result.scores.iter() {
        println!(
            "  {:<22} {:>3}/100  {}",
            metric.label(),
            value.round() as u32,
            Rating::for_score(value).label()
        );
    }

    println!("\nFeedback:");
    for line in &result.feedback {
        println!("  * {}", line);
    }

    let weak: Vec<&str> = result
        .scores
        .needs_practice()
        .iter()
        .map(Metric::label)
        .collect();
    if !weak.is_empty() {
        println!("\nPractice next: {}", weak.join(", "));
    }
    println!();
}

fn print_bulk_stats(emotion: &str, count: usize, seed: u64) {
    let mut scorer = SpeechScorer::seeded(seed);
    let mut levels: FxHashMap<Level, usize> = FxHashMap::default();
    let mut total_mean = 0.0;
    let mut lowest = f64::MAX;
    let mut highest = f64::MIN;

    for _ in 0..count {
        let result = scorer.score(emotion);
        let mean = result.mean();
        total_mean += mean;
        lowest = lowest.min(mean);
        highest = highest.max(mean);
        *levels.entry(result.level).or_insert(0) += 1;
    }

    println!("\n--- {} runs for '{}' ---", count, emotion);
    println!(
        "Mean score: {:.2} (min {:.2}, max {:.2})",
        total_mean / count as f64,
        lowest,
        highest
    );
    for level in Level::ALL.iter().rev() {
        let n = levels.get(level).copied().unwrap_or(0);
        println!(
            "  {:<14} {:>6}  ({:.1}%)",
            level.title(),
            n,
            100.0 * n as f64 / count as f64
        );
    }
    println!();
}
