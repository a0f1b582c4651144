//! In-memory surface for tests and embedders without a UI.

use mc_core::{Prompt, QuestionKind};
use mc_host::Notice;

use crate::input::DrillInput;
use crate::surface::{Control, ControlId, ControlRole, Feedback, Mark, Surface};

/// A control as the headless surface currently shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    /// The control as rendered.
    pub control: Control,
    /// Whether it still accepts input.
    pub interactive: bool,
    /// Correctness marker, if any.
    pub mark: Option<Mark>,
}

/// A [`Surface`] that just records what it was told.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    prompt: Option<(Prompt, QuestionKind)>,
    controls: Vec<ControlView>,
    built: Vec<String>,
    feedback: Option<Feedback>,
    notices: Vec<Notice>,
    clears: usize,
}

impl HeadlessSurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current prompt.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref().map(|(prompt, _)| prompt)
    }

    /// Kind of the question on display.
    pub fn kind(&self) -> Option<QuestionKind> {
        self.prompt.as_ref().map(|(_, kind)| *kind)
    }

    /// Controls in the order they were added.
    pub fn controls(&self) -> &[ControlView] {
        &self.controls
    }

    /// Control by id.
    pub fn control(&self, id: ControlId) -> Option<&ControlView> {
        self.controls.iter().find(|c| c.control.id == id)
    }

    /// First control with the given role.
    pub fn find(&self, role: ControlRole) -> Option<&ControlView> {
        self.controls.iter().find(|c| c.control.role == role)
    }

    /// Number of controls that still accept input.
    pub fn interactive_count(&self) -> usize {
        self.controls.iter().filter(|c| c.interactive).count()
    }

    /// The input a click on `role` would produce, if that control exists and
    /// is interactive.
    pub fn click(&self, role: ControlRole) -> Option<DrillInput> {
        self.find(role)
            .filter(|c| c.interactive)
            .and_then(|c| DrillInput::from_role(c.control.role))
    }

    /// Sentence shown in the word-order area.
    pub fn built(&self) -> &[String] {
        &self.built
    }

    /// Feedback block, once graded.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Notices shown since the last clear, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Most recent notice.
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// How many times the surface was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    fn view_mut(&mut self, id: ControlId) -> Option<&mut ControlView> {
        self.controls.iter_mut().find(|c| c.control.id == id)
    }
}

impl Surface for HeadlessSurface {
    fn clear(&mut self) {
        let clears = self.clears + 1;
        *self = Self {
            clears,
            ..Self::default()
        };
    }

    fn show_prompt(&mut self, prompt: &Prompt, kind: QuestionKind) {
        self.prompt = Some((prompt.clone(), kind));
    }

    fn add_control(&mut self, control: Control) {
        self.controls.push(ControlView {
            control,
            interactive: true,
            mark: None,
        });
    }

    fn set_interactive(&mut self, id: ControlId, interactive: bool) {
        if let Some(view) = self.view_mut(id) {
            view.interactive = interactive;
        }
    }

    fn mark(&mut self, id: ControlId, mark: Mark) {
        if let Some(view) = self.view_mut(id) {
            view.mark = Some(mark);
        }
    }

    fn update_built(&mut self, tokens: &[String]) {
        self.built = tokens.to_vec();
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        self.feedback = Some(feedback.clone());
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
