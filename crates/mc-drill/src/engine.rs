//! The drill engine: renders question specs into a surface.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use mc_core::{AnswerKey, Outcome, QuestionId, QuestionSpec};
use mc_host::HelpLanguage;

use crate::builder::WordBuilder;
use crate::config::DrillConfig;
use crate::drill::{Drill, DrillState};
use crate::grade::{hint_text, reveal_answer};
use crate::surface::{Control, ControlId, ControlRole, Surface};

/// Renders questions and owns the shuffling RNG.
///
/// One engine serves a whole lesson; each [`render`](Self::render) produces
/// an independent [`Drill`].
pub struct DrillEngine {
    config: DrillConfig,
    rng: StdRng,
}

impl DrillEngine {
    /// Create an engine, seeding its RNG from the config.
    pub fn new(config: DrillConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// The engine configuration.
    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    /// Change the feedback language for drills rendered from now on.
    pub fn set_help_language(&mut self, language: HelpLanguage) {
        self.config.help_language = language;
    }

    /// Show or hide hints for drills rendered from now on.
    pub fn set_show_hints(&mut self, show: bool) {
        self.config.show_hints = show;
    }

    /// Clear `surface` and populate it with the controls for `spec`.
    ///
    /// `on_outcome` is called at most once, from the [`Drill::handle`] call
    /// that grades the returned drill.
    pub fn render<'a>(
        &mut self,
        surface: &mut dyn Surface,
        spec: &QuestionSpec,
        on_outcome: impl FnMut(&QuestionId, Outcome) + 'a,
    ) -> Drill<'a> {
        let mut controls = Vec::new();
        let mut add = |role: ControlRole, label: &str| {
            let id = ControlId::new(controls.len() as u32);
            controls.push(Control::new(id, role, label));
        };

        let state = match spec.answer() {
            AnswerKey::MultipleChoice { choices, .. } => {
                let mut order: Vec<usize> = (0..choices.len()).collect();
                if self.config.shuffle_choices {
                    order.shuffle(&mut self.rng);
                }
                for (position, &original) in order.iter().enumerate() {
                    add(ControlRole::Choice(position), choices[original].as_str());
                }
                DrillState::Choice { order }
            }
            AnswerKey::FillInText { .. } => {
                add(ControlRole::TextEntry, "");
                add(ControlRole::Submit, "Check");
                DrillState::Text {
                    entry: String::new(),
                }
            }
            AnswerKey::WordOrder { target } => {
                let mut bank = target.clone();
                if self.config.shuffle_tokens && bank.len() > 1 {
                    bank.shuffle(&mut self.rng);
                    // never hand out the sentence already solved
                    if bank == *target && bank.iter().any(|t| t != &bank[0]) {
                        bank.rotate_left(1);
                    }
                }
                for (slot, token) in bank.iter().enumerate() {
                    add(ControlRole::BankToken(slot), token.as_str());
                }
                add(ControlRole::Submit, "Check");
                DrillState::Order {
                    builder: WordBuilder::new(bank),
                }
            }
        };
        if self.config.show_hints {
            add(ControlRole::Hint, "Hint");
        }
        add(ControlRole::Reveal, "Reveal");
        add(ControlRole::Speak, "Listen");

        surface.clear();
        surface.show_prompt(spec.prompt(), spec.kind());
        for control in &controls {
            surface.add_control(control.clone());
        }
        if matches!(state, DrillState::Order { .. }) {
            surface.update_built(&[]);
        }

        let drill = Drill::new(
            spec.clone(),
            self.config.clone(),
            controls,
            state,
            Box::new(on_outcome),
        );
        debug!(
            id = %spec.id(),
            kind = %spec.kind(),
            render = %drill.attempt().render_id(),
            "rendered drill"
        );
        drill
    }

    /// The question's hint, or the configured fallback.
    pub fn hint(&self, spec: &QuestionSpec) -> String {
        hint_text(spec, &self.config.hint_fallback)
    }

    /// The canonical answer as display text. Never grades.
    pub fn reveal(&self, spec: &QuestionSpec) -> String {
        reveal_answer(spec.answer())
    }
}
