//! CLI frontend for the Masterclass drill engine.

mod commands;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "mc",
    about = "Masterclass: English drills for French speakers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory where lesson progress is saved
    #[arg(long, global = true, default_value = ".masterclass")]
    store: PathBuf,

    /// Log more on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a lesson in the terminal
    Play {
        /// Lesson JSON file
        lesson: PathBuf,

        /// RNG seed for reproducible shuffling (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Keep choices and tokens in lesson order
        #[arg(long)]
        no_shuffle: bool,

        /// Offer a fresh instance of a question after a wrong answer
        #[arg(long)]
        retry: bool,

        /// Check a sentence as soon as every token is placed
        #[arg(long)]
        auto_check: bool,

        /// Time limit for the whole lesson, in seconds
        #[arg(long, value_name = "SECS")]
        timer: Option<u64>,

        /// Speech synthesizer program (e.g. espeak-ng)
        #[arg(long, value_name = "PROGRAM")]
        speak: Option<String>,

        /// Accent for spoken prompts (american, british, australian, irish, indian)
        #[arg(long)]
        accent: Option<String>,

        /// Clipboard command reading stdin (e.g. "wl-copy")
        #[arg(long, value_name = "COMMAND")]
        clipboard: Option<String>,

        /// Show feedback in English instead of French
        #[arg(long)]
        english: bool,

        /// Ignore and overwrite saved progress
        #[arg(long)]
        fresh: bool,
    },

    /// Validate a lesson file
    Check {
        /// Lesson JSON file
        lesson: PathBuf,
    },

    /// List the questions of a lesson
    List {
        /// Lesson JSON file
        lesson: PathBuf,
    },

    /// Show one question with its hint and answer
    Show {
        /// Lesson JSON file
        lesson: PathBuf,

        /// Question id
        id: String,
    },

    /// Show saved score and completion
    Stats {
        /// Lesson JSON file
        lesson: PathBuf,
    },

    /// Delete saved progress for a lesson
    Reset {
        /// Lesson JSON file
        lesson: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            lesson,
            seed,
            no_shuffle,
            retry,
            auto_check,
            timer,
            speak,
            accent,
            clipboard,
            english,
            fresh,
        } => commands::play::run(
            &lesson,
            &cli.store,
            commands::play::PlayOptions {
                seed,
                shuffle: !no_shuffle,
                retry,
                auto_check,
                timer,
                speak,
                accent,
                clipboard,
                english,
                fresh,
            },
        ),
        Commands::Check { lesson } => commands::check::run(&lesson),
        Commands::List { lesson } => commands::list::run(&lesson, &cli.store),
        Commands::Show { lesson, id } => commands::show::run(&lesson, &id),
        Commands::Stats { lesson } => commands::stats::run(&lesson, &cli.store),
        Commands::Reset { lesson } => commands::reset::run(&lesson, &cli.store),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
