use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;

use mc_core::{Outcome, QuestionId, QuestionKind};
use mc_drill::{Drill, DrillConfig, DrillInput, LessonSession, RetryPolicy, SessionConfig, Surface};
use mc_host::clipboard::{CommandClipboard, NoClipboard};
use mc_host::microphone::NoMicrophone;
use mc_host::speech::CommandSpeech;
use mc_host::timer::format_clock;
use mc_host::{
    Accent, ClipboardProvider, HelpLanguage, Notice, Recorder, RecorderEvent, SilentSpeech, SpeechAnnouncer, Tick,
    copy_best_effort,
};

use crate::terminal::TerminalSurface;

pub struct PlayOptions {
    pub seed: Option<u64>,
    pub shuffle: bool,
    pub retry: bool,
    pub auto_check: bool,
    pub timer: Option<u64>,
    pub speak: Option<String>,
    pub accent: Option<String>,
    pub clipboard: Option<String>,
    pub english: bool,
    pub fresh: bool,
}

const HELP: &str = "  Commands: :hint :reveal :say :copy :record :undo :clear :check :lang :hints :skip :quit";

/// How one question ended.
enum Step {
    Graded(Outcome),
    Skipped,
    Quit,
    TimeUp,
}

/// Capabilities and I/O shared by every question of a run.
struct Player<R> {
    reader: R,
    surface: TerminalSurface,
    speech: Box<dyn SpeechAnnouncer>,
    clipboard: Box<dyn ClipboardProvider>,
    recorder: Recorder<NoMicrophone>,
    clock: Instant,
}

pub fn run(path: &Path, store: &Path, options: PlayOptions) -> Result<(), String> {
    let lesson = super::load_lesson(path)?;
    if lesson.is_empty() {
        return Err(format!("'{}' has no questions", lesson.title));
    }
    if let Err(errors) = lesson.validate() {
        return Err(format!(
            "'{}' has {} problem{}, run `mc check` for details",
            lesson.title,
            errors.len(),
            super::plural(errors.len())
        ));
    }

    let seed = options.seed.unwrap_or_else(rand::random);
    let drill = DrillConfig::default()
        .with_seed(seed)
        .with_shuffle(options.shuffle)
        .with_auto_check(options.auto_check);
    let retry = if options.retry {
        RetryPolicy::NewInstance
    } else {
        RetryPolicy::Locked
    };
    let mut config = SessionConfig::default().with_drill(drill).with_retry(retry);
    if let Some(secs) = options.timer {
        config = config.with_time_limit(Duration::from_secs(secs));
    }

    let mut session = LessonSession::new(lesson, config);
    let mut store = mc_host::FileStore::new(store);
    if options.fresh {
        session
            .clear_saved(&mut store)
            .map_err(|e| format!("failed to clear saved progress: {e}"))?;
    } else {
        session.load(&store);
    }

    let mut preferences = session.preferences().clone();
    if let Some(name) = &options.accent {
        preferences.accent = Accent::from_name(name).ok_or_else(|| format!("unknown accent: {name}"))?;
    }
    if options.english {
        preferences.help_language = HelpLanguage::English;
    }
    session.set_preferences(preferences);

    let speech: Box<dyn SpeechAnnouncer> = match options.speak {
        Some(program) => Box::new(CommandSpeech::new(program)),
        None => Box::new(SilentSpeech),
    };
    let clipboard: Box<dyn ClipboardProvider> = match options.clipboard.as_deref() {
        Some(line) => Box::new(
            CommandClipboard::from_command_line(line).ok_or_else(|| "empty clipboard command".to_string())?,
        ),
        None => Box::new(NoClipboard),
    };

    let stdin = io::stdin();
    let mut player = Player {
        reader: stdin.lock(),
        surface: TerminalSurface::new(),
        speech,
        clipboard,
        recorder: Recorder::new(NoMicrophone),
        clock: Instant::now(),
    };

    println!("  {} {}", "Lesson".bold(), session.lesson().title);
    if let Some(description) = &session.lesson().description {
        println!("  {}", description.dimmed());
    }
    if let Some(remaining) = session.remaining() {
        println!("  Time limit: {}", format_clock(remaining));
    }
    println!("{HELP}");

    let pending: Vec<QuestionId> = session
        .lesson()
        .questions
        .iter()
        .filter(|q| !session.completed().contains(q.id()))
        .map(|q| q.id().clone())
        .collect();

    if pending.is_empty() {
        println!();
        println!("  Every question is already answered. Use --fresh to start over.");
    }

    let total = session.lesson().len();
    let answered_before = total - pending.len();
    'lesson: for (n, id) in pending.iter().enumerate() {
        let position = answered_before + n + 1;
        loop {
            println!();
            println!("  {}", format!("Question {position}/{total}").dimmed());

            let mut drill = session
                .render(&mut player.surface, id.as_str(), |_, _| {})
                .map_err(|e| e.to_string())?;

            match player.ask(&mut session, &mut drill)? {
                Step::Graded(outcome) => {
                    println!("  Score: {}", session.totals());
                    if outcome == Outcome::Incorrect && session.can_render(id) {
                        println!("  {}", "Try again.".dimmed());
                        continue;
                    }
                    break;
                }
                Step::Skipped => break,
                Step::Quit => break 'lesson,
                Step::TimeUp => {
                    println!("  {}", "Time is up!".yellow().bold());
                    break 'lesson;
                }
            }
        }
    }

    if let Err(e) = session.save(&mut store) {
        eprintln!("  {} {e}", "warning:".yellow());
    }

    println!();
    println!("  {} {}", "Final score:".bold(), session.totals());
    println!(
        "  Completed {}/{} questions ({:.0}%)",
        session.completed().len(),
        total,
        session.progress() * 100.0
    );

    Ok(())
}

impl<R: BufRead> Player<R> {
    /// Read commands until the drill is graded or the learner moves on.
    fn ask(&mut self, session: &mut LessonSession, drill: &mut Drill<'_>) -> Result<Step, String> {
        let mut line = String::new();
        loop {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;

            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Ok(Step::Quit), // EOF
                Err(e) => return Err(e.to_string()),
                _ => {}
            }

            let elapsed = self.clock.elapsed();
            self.clock = Instant::now();
            if matches!(session.tick(elapsed), Some(Tick::Expired | Tick::Idle)) {
                return Ok(Step::TimeUp);
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            if let Some(command) = input.strip_prefix(':') {
                match command.trim() {
                    "skip" => return Ok(Step::Skipped),
                    "quit" | "q" => return Ok(Step::Quit),
                    other => {
                        if let Some(outcome) = self.command(session, drill, other) {
                            return Ok(Step::Graded(outcome));
                        }
                    }
                }
                continue;
            }

            match parse_answer(drill, input) {
                Ok(inputs) => {
                    for input in inputs {
                        if let Some(outcome) = session.handle(drill, &mut self.surface, input) {
                            return Ok(Step::Graded(outcome));
                        }
                    }
                }
                Err(message) => self.surface.show_notice(&Notice::info(message)),
            }
        }
    }

    /// Run a `:command`. Returns the outcome if it graded the drill.
    fn command(&mut self, session: &mut LessonSession, drill: &mut Drill<'_>, command: &str) -> Option<Outcome> {
        match command {
            "check" => return session.handle(drill, &mut self.surface, DrillInput::Submit),
            "clear" => return session.handle(drill, &mut self.surface, DrillInput::ClearTokens),
            "undo" => drill.undo(&mut self.surface),
            "hint" => drill.show_hint(&mut self.surface),
            "reveal" => drill.show_reveal(&mut self.surface),
            "say" => drill.speak_prompt(self.speech.as_mut(), &session.speech_options()),
            "copy" => {
                let text = drill.spec().prompt().speech_text().to_string();
                let notice = copy_best_effort(self.clipboard.as_mut(), &text)
                    .unwrap_or_else(|| Notice::info("Copied"));
                self.surface.show_notice(&notice);
            }
            "record" => {
                let notice = match self.recorder.toggle() {
                    RecorderEvent::Started => Notice::info("Recording, type :record again to stop"),
                    RecorderEvent::Finished(length) => Notice::info(format!("Recorded {:.1}s", length.as_secs_f32())),
                    RecorderEvent::Failed(notice) => notice,
                };
                self.surface.show_notice(&notice);
            }
            "lang" => {
                let mut preferences = session.preferences().clone();
                preferences.help_language = preferences.help_language.toggled();
                let notice = Notice::info(format!("Help in {} from the next question", preferences.help_language));
                session.set_preferences(preferences);
                self.surface.show_notice(&notice);
            }
            "hints" => {
                let mut preferences = session.preferences().clone();
                preferences.show_help = !preferences.show_help;
                let state = if preferences.show_help { "on" } else { "off" };
                session.set_preferences(preferences);
                self.surface
                    .show_notice(&Notice::info(format!("Hints {state} from the next question")));
            }
            "help" => println!("{HELP}"),
            other => self
                .surface
                .show_notice(&Notice::warning(format!("unknown command: :{other}"))),
        }
        None
    }
}

/// Turn a typed line into drill inputs for the question on screen.
fn parse_answer(drill: &Drill<'_>, line: &str) -> Result<Vec<DrillInput>, String> {
    match drill.spec().kind() {
        QuestionKind::MultipleChoice => {
            let count = drill.choice_labels().len();
            match line.parse::<usize>() {
                Ok(number) if (1..=count).contains(&number) => Ok(vec![DrillInput::Choose(number - 1)]),
                _ => Err(format!("Type a number from 1 to {count}.")),
            }
        }
        QuestionKind::FillInText => Ok(vec![DrillInput::Type(line.to_string()), DrillInput::Submit]),
        QuestionKind::WordOrder => line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .map(|n| DrillInput::TapToken(n - 1))
                    .ok_or_else(|| format!("Not a token number: {part}"))
            })
            .collect(),
    }
}
