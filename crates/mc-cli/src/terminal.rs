//! Line-oriented terminal surface for `mc play`.

use colored::Colorize;

use mc_core::{Outcome, Prompt, QuestionKind};
use mc_drill::{Control, ControlId, ControlRole, Feedback, Mark, Surface};
use mc_host::{Notice, NoticeLevel};

/// Prints a drill to stdout as it is rendered and updated.
#[derive(Default)]
pub struct TerminalSurface {
    controls: Vec<(Control, bool)>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn label(&self, id: ControlId) -> Option<String> {
        self.controls
            .iter()
            .find(|(c, _)| c.id == id)
            .map(|(c, _)| match c.role {
                ControlRole::Choice(position) => format!("{}) {}", position + 1, c.label),
                _ => c.label.clone(),
            })
    }

    fn bank_line(&self) -> String {
        self.controls
            .iter()
            .filter_map(|(c, interactive)| match c.role {
                ControlRole::BankToken(slot) if *interactive => Some(format!("[{}] {}", slot + 1, c.label)),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.controls.clear();
        println!();
    }

    fn show_prompt(&mut self, prompt: &Prompt, kind: QuestionKind) {
        println!("  {}", prompt.text().bold());
        let how = match kind {
            QuestionKind::MultipleChoice => "Type the number of your answer.",
            QuestionKind::FillInText => "Type your answer.",
            QuestionKind::WordOrder => "Type token numbers in order, then :check.",
        };
        println!("  {}", how.dimmed());
    }

    fn add_control(&mut self, control: Control) {
        if let ControlRole::Choice(position) = control.role {
            println!("    {}) {}", position + 1, control.label);
        }
        self.controls.push((control, true));
    }

    fn set_interactive(&mut self, id: ControlId, interactive: bool) {
        if let Some((_, flag)) = self.controls.iter_mut().find(|(c, _)| c.id == id) {
            *flag = interactive;
        }
    }

    fn mark(&mut self, id: ControlId, mark: Mark) {
        let Some(label) = self.label(id) else {
            return;
        };
        match mark {
            Mark::Correct => println!("    {} {}", "✓".green(), label.green()),
            Mark::Incorrect => println!("    {} {}", "✗".red(), label.red()),
        }
    }

    fn update_built(&mut self, tokens: &[String]) {
        let sentence = if tokens.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            tokens.join(" ")
        };
        println!("  sentence: {sentence}");
        let bank = self.bank_line();
        if !bank.is_empty() {
            println!("  tokens:   {bank}");
        }
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        match feedback.outcome {
            Outcome::Correct => println!("  {} {}", "✓".green().bold(), feedback.message.green()),
            Outcome::Incorrect => println!("  {} {}", "✗".red().bold(), feedback.message.red()),
        }
        if let Some(answer) = &feedback.answer {
            println!("  answer:   {answer}");
        }
        if let Some(explanation) = &feedback.explanation {
            println!("  {}", explanation.dimmed());
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        match notice.level() {
            NoticeLevel::Info => println!("  » {}", notice.text().cyan()),
            NoticeLevel::Warning => println!("  ! {}", notice.text().yellow()),
        }
    }
}
