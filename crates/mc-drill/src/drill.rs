//! A rendered drill: one question instance with a single scored attempt.

use tracing::debug;

use mc_core::{AnswerKey, AttemptState, Outcome, QuestionId, QuestionSpec, ScoreTracker};
use mc_host::{Notice, SpeechAnnouncer, SpeechOptions};

use crate::builder::WordBuilder;
use crate::config::DrillConfig;
use crate::grade;
use crate::input::DrillInput;
use crate::surface::{
    Control, ControlId, ControlRole, Feedback, Mark, Surface, empty_answer_notice, feedback_message,
    hints_off_notice,
};

/// Callback invoked once with the question id and outcome of a graded drill.
pub type OutcomeHandler<'a> = Box<dyn FnMut(&QuestionId, Outcome) + 'a>;

/// Kind-specific interaction state.
#[derive(Debug)]
pub(crate) enum DrillState {
    /// Display position -> original choice index.
    Choice { order: Vec<usize> },
    /// Current contents of the text field.
    Text { entry: String },
    /// Bank and built sentence.
    Order { builder: WordBuilder },
}

/// A grade plus the controls to mark with it.
struct Grade {
    outcome: Outcome,
    marks: Vec<(ControlId, Mark)>,
}

/// One rendered question.
///
/// Created by [`DrillEngine::render`](crate::DrillEngine::render). The first
/// grading-eligible input locks the drill; everything after that is ignored.
pub struct Drill<'a> {
    spec: QuestionSpec,
    config: DrillConfig,
    attempt: AttemptState,
    controls: Vec<Control>,
    state: DrillState,
    on_outcome: OutcomeHandler<'a>,
}

impl<'a> Drill<'a> {
    pub(crate) fn new(
        spec: QuestionSpec,
        config: DrillConfig,
        controls: Vec<Control>,
        state: DrillState,
        on_outcome: OutcomeHandler<'a>,
    ) -> Self {
        Self {
            spec,
            config,
            attempt: AttemptState::new(),
            controls,
            state,
            on_outcome,
        }
    }

    /// Id of the rendered question.
    pub fn id(&self) -> &QuestionId {
        self.spec.id()
    }

    /// The rendered question.
    pub fn spec(&self) -> &QuestionSpec {
        &self.spec
    }

    /// Attempt state of this instance.
    pub fn attempt(&self) -> &AttemptState {
        &self.attempt
    }

    /// Whether the single attempt has been used.
    pub fn is_locked(&self) -> bool {
        self.attempt.is_locked()
    }

    /// The grade, once locked.
    pub fn outcome(&self) -> Option<Outcome> {
        self.attempt.outcome()
    }

    /// Whether the lesson may offer a new instance of this question.
    pub fn can_retry(&self) -> bool {
        self.outcome() == Some(Outcome::Incorrect)
    }

    /// Every control rendered for this drill.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// The control with the given role, if rendered.
    pub fn control(&self, role: ControlRole) -> Option<&Control> {
        self.controls.iter().find(|c| c.role == role)
    }

    /// Multiple-choice labels in display order.
    pub fn choice_labels(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|c| matches!(c.role, ControlRole::Choice(_)))
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Word-order bank in display order; empty for other kinds.
    pub fn bank(&self) -> &[String] {
        match &self.state {
            DrillState::Order { builder } => builder.bank(),
            _ => &[],
        }
    }

    /// The word-order builder, if this is a word-order drill.
    pub fn builder(&self) -> Option<&WordBuilder> {
        match &self.state {
            DrillState::Order { builder } => Some(builder),
            _ => None,
        }
    }

    /// Sentence built so far; empty for other kinds.
    pub fn built(&self) -> Vec<String> {
        self.builder().map(WordBuilder::built).unwrap_or_default()
    }

    /// Text typed so far; empty for other kinds.
    pub fn entry(&self) -> &str {
        match &self.state {
            DrillState::Text { entry } => entry,
            _ => "",
        }
    }

    /// Route one learner input.
    ///
    /// Returns the outcome only for the input that grades the drill. Inputs
    /// on a locked drill, inputs that do not apply to this kind of question,
    /// and empty submissions return `None` and leave the score untouched.
    pub fn handle(
        &mut self,
        surface: &mut dyn Surface,
        tracker: &mut ScoreTracker,
        input: DrillInput,
    ) -> Option<Outcome> {
        if self.attempt.is_locked() {
            debug!(id = %self.spec.id(), ?input, "ignoring input on locked drill");
            return None;
        }

        let grade = match input {
            DrillInput::Choose(position) => self.choose(position),
            DrillInput::Type(text) => {
                self.set_entry(text);
                None
            }
            DrillInput::Submit => self.submit(surface),
            DrillInput::TapToken(slot) => {
                let end = self.builder().map_or(0, WordBuilder::len);
                self.place(surface, slot, end)
            }
            DrillInput::DropToken { slot, position } => self.place(surface, slot, position),
            DrillInput::RemoveToken(position) => {
                self.edit_sentence(surface, |builder| builder.remove(position).into_iter().collect());
                None
            }
            DrillInput::ClearTokens => {
                self.edit_sentence(surface, WordBuilder::clear);
                None
            }
        }?;

        self.finish(surface, tracker, grade)
    }

    /// Take the last placed token back out of the sentence.
    pub fn undo(&mut self, surface: &mut dyn Surface) {
        if self.attempt.is_locked() {
            return;
        }
        self.edit_sentence(surface, |builder| builder.undo().into_iter().collect());
    }

    /// The hint text. Never changes state.
    pub fn hint(&self) -> String {
        grade::hint_text(&self.spec, &self.config.hint_fallback)
    }

    /// The canonical answer. Never grades and never locks.
    pub fn reveal(&self) -> String {
        grade::reveal_answer(self.spec.answer())
    }

    /// Show the hint in the surface's notice area, unless hints are off.
    pub fn show_hint(&self, surface: &mut dyn Surface) {
        if self.config.show_hints {
            surface.show_notice(&Notice::info(self.hint()));
        } else {
            surface.show_notice(&hints_off_notice(self.config.help_language));
        }
    }

    /// Show the answer in the surface's notice area.
    pub fn show_reveal(&self, surface: &mut dyn Surface) {
        surface.show_notice(&Notice::info(self.reveal()));
    }

    /// Read the prompt aloud.
    pub fn speak_prompt(&self, speech: &mut dyn SpeechAnnouncer, options: &SpeechOptions) {
        speech.speak(self.spec.prompt().speech_text(), options);
    }

    /// Read the expected answer aloud.
    pub fn speak_answer(&self, speech: &mut dyn SpeechAnnouncer, options: &SpeechOptions) {
        speech.speak(&self.reveal(), options);
    }

    fn control_id(&self, role: ControlRole) -> Option<ControlId> {
        self.control(role).map(|c| c.id)
    }

    fn choose(&self, position: usize) -> Option<Grade> {
        let (DrillState::Choice { order }, AnswerKey::MultipleChoice { correct_index, .. }) =
            (&self.state, self.spec.answer())
        else {
            debug!(id = %self.spec.id(), "choice input on a non-choice drill");
            return None;
        };

        let picked = order.get(position).copied();
        let outcome = grade::grade_choice(*correct_index, picked);

        let mut marks = Vec::new();
        if let Some(id) = self.control_id(ControlRole::Choice(position)) {
            marks.push((id, Mark::from(outcome)));
        }
        if !outcome.is_correct() {
            let correct_position = order.iter().position(|&original| original == *correct_index);
            if let Some(id) = correct_position.and_then(|p| self.control_id(ControlRole::Choice(p))) {
                marks.push((id, Mark::Correct));
            }
        }
        Some(Grade { outcome, marks })
    }

    fn set_entry(&mut self, text: String) {
        match &mut self.state {
            DrillState::Text { entry } => *entry = text,
            _ => debug!(id = %self.spec.id(), "text input on a non-text drill"),
        }
    }

    fn submit(&self, surface: &mut dyn Surface) -> Option<Grade> {
        let outcome = match (&self.state, self.spec.answer()) {
            (DrillState::Text { entry }, AnswerKey::FillInText { accepted }) => {
                grade::grade_text(accepted, entry)
            }
            (DrillState::Order { builder }, AnswerKey::WordOrder { target }) => {
                grade::grade_sequence(target, &builder.built())
            }
            _ => {
                debug!(id = %self.spec.id(), "submit on a drill without a check button");
                return None;
            }
        };

        let Some(outcome) = outcome else {
            surface.show_notice(&empty_answer_notice(self.config.help_language, self.spec.kind()));
            return None;
        };

        let marks = self
            .control_id(ControlRole::TextEntry)
            .map(|id| vec![(id, Mark::from(outcome))])
            .unwrap_or_default();
        Some(Grade { outcome, marks })
    }

    fn place(&mut self, surface: &mut dyn Surface, slot: usize, position: usize) -> Option<Grade> {
        let DrillState::Order { builder } = &mut self.state else {
            debug!(id = %self.spec.id(), "token input on a non-word-order drill");
            return None;
        };
        if !builder.place(slot, position) {
            debug!(id = %self.spec.id(), slot, "token unavailable");
            return None;
        }
        let complete = builder.is_complete();
        let built = builder.built();

        if let Some(id) = self.control_id(ControlRole::BankToken(slot)) {
            surface.set_interactive(id, false);
        }
        surface.update_built(&built);

        if self.config.auto_check && complete {
            self.submit(surface)
        } else {
            None
        }
    }

    fn edit_sentence(&mut self, surface: &mut dyn Surface, edit: impl FnOnce(&mut WordBuilder) -> Vec<usize>) {
        let DrillState::Order { builder } = &mut self.state else {
            debug!(id = %self.spec.id(), "sentence edit on a non-word-order drill");
            return;
        };
        let freed = edit(builder);
        let built = builder.built();

        for slot in freed {
            if let Some(id) = self.control_id(ControlRole::BankToken(slot)) {
                surface.set_interactive(id, true);
            }
        }
        surface.update_built(&built);
    }

    fn finish(&mut self, surface: &mut dyn Surface, tracker: &mut ScoreTracker, grade: Grade) -> Option<Outcome> {
        if !self.attempt.lock(grade.outcome) {
            return None;
        }
        tracker.record(grade.outcome);
        (self.on_outcome)(self.spec.id(), grade.outcome);

        for (id, mark) in grade.marks {
            surface.mark(id, mark);
        }
        for control in &self.controls {
            surface.set_interactive(control.id, false);
        }

        let outcome = grade.outcome;
        surface.show_feedback(&Feedback {
            outcome,
            message: feedback_message(self.config.help_language, outcome).to_string(),
            answer: (!outcome.is_correct()).then(|| self.reveal()),
            explanation: self.spec.explanation().map(str::to_string),
        });
        debug!(
            id = %self.spec.id(),
            render = %self.attempt.render_id(),
            %outcome,
            "graded drill"
        );
        Some(outcome)
    }
}
