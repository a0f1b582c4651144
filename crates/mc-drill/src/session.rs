//! Lesson session management.
//!
//! `LessonSession` plays the role of the lesson page: it owns the lesson
//! content, the one [`ScoreTracker`] every drill reports to, the set of
//! completed questions, learner preferences, the optional countdown, and the
//! retry policy deciding whether a question may be rendered again.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info};

use mc_core::{CompletionSet, Lesson, Outcome, QuestionId, QuestionSpec, ScoreTotals, ScoreTracker};
use mc_host::{Countdown, KeyValueStore, Preferences, SpeechOptions, Tick};

use crate::config::{RetryPolicy, SessionConfig};
use crate::drill::Drill;
use crate::engine::DrillEngine;
use crate::error::{DrillError, DrillResult};
use crate::input::DrillInput;
use crate::progress::{ProgressSnapshot, storage_key};
use crate::surface::Surface;

/// An interactive lesson.
pub struct LessonSession {
    lesson: Lesson,
    engine: DrillEngine,
    retry: RetryPolicy,
    tracker: ScoreTracker,
    completed: CompletionSet,
    outcomes: BTreeMap<QuestionId, Outcome>,
    preferences: Preferences,
    countdown: Option<Countdown>,
}

impl LessonSession {
    /// Start a session over `lesson` with a zero score.
    pub fn new(lesson: Lesson, config: SessionConfig) -> Self {
        let preferences = Preferences {
            help_language: config.drill.help_language,
            show_help: config.drill.show_hints,
            ..Preferences::default()
        };
        Self {
            lesson,
            engine: DrillEngine::new(config.drill),
            retry: config.retry,
            tracker: ScoreTracker::new(),
            completed: CompletionSet::new(),
            outcomes: BTreeMap::new(),
            preferences,
            countdown: config.time_limit.map(Countdown::new),
        }
    }

    /// The lesson being played.
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    /// The drill engine, for hints and reveals outside a rendered drill.
    pub fn engine(&self) -> &DrillEngine {
        &self.engine
    }

    /// Current score.
    pub fn totals(&self) -> ScoreTotals {
        self.tracker.snapshot()
    }

    /// Questions answered at least once.
    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    /// Fraction of the lesson answered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.completed.progress(self.lesson.len())
    }

    /// Learner preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replace the preferences. Feedback language and hint visibility apply
    /// to drills rendered afterwards.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.engine.set_help_language(preferences.help_language);
        self.engine.set_show_hints(preferences.show_help);
        self.preferences = preferences;
    }

    /// Speech options from the current preferences.
    pub fn speech_options(&self) -> SpeechOptions {
        self.preferences.speech_options()
    }

    /// The retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Last outcome recorded for a question, in this visit or a saved one.
    pub fn outcome(&self, id: &QuestionId) -> Option<Outcome> {
        self.outcomes.get(id).copied()
    }

    /// Whether `id` may be rendered: never answered, or graded wrong under
    /// [`RetryPolicy::NewInstance`].
    ///
    /// A completed question with no recorded outcome counts as answered.
    pub fn can_render(&self, id: &QuestionId) -> bool {
        match self.outcome(id) {
            None => !self.completed.contains(id),
            Some(Outcome::Incorrect) => self.retry == RetryPolicy::NewInstance,
            Some(Outcome::Correct) => false,
        }
    }

    /// First question not yet completed, in lesson order.
    pub fn next_unanswered(&self) -> Option<&QuestionSpec> {
        self.lesson
            .questions
            .iter()
            .find(|q| !self.completed.contains(q.id()))
    }

    /// Render the question `id` into `surface`.
    pub fn render<'a>(
        &mut self,
        surface: &mut dyn Surface,
        id: &str,
        on_outcome: impl FnMut(&QuestionId, Outcome) + 'a,
    ) -> DrillResult<Drill<'a>> {
        let spec = self.lesson.require(id)?;
        if !self.can_render(spec.id()) {
            return Err(DrillError::AlreadyAnswered(spec.id().clone()));
        }
        Ok(self.engine.render(surface, spec, on_outcome))
    }

    /// Forward learner input to `drill`, updating score and completion.
    ///
    /// Once the countdown has expired every input is ignored.
    pub fn handle(&mut self, drill: &mut Drill<'_>, surface: &mut dyn Surface, input: DrillInput) -> Option<Outcome> {
        if self.is_time_up() {
            debug!(id = %drill.id(), "time is up, ignoring input");
            return None;
        }
        let outcome = drill.handle(surface, &mut self.tracker, input)?;
        self.completed.insert(drill.id().clone());
        self.outcomes.insert(drill.id().clone(), outcome);
        Some(outcome)
    }

    /// Advance the countdown, if any.
    pub fn tick(&mut self, delta: Duration) -> Option<Tick> {
        let tick = self.countdown.as_mut()?.tick(delta);
        if tick == Tick::Expired {
            info!(totals = %self.tracker.snapshot(), "lesson time is up");
        }
        Some(tick)
    }

    /// Time left on the countdown.
    pub fn remaining(&self) -> Option<Duration> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    /// Whether the countdown has run out.
    pub fn is_time_up(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_expired)
    }

    /// Zero the score and forget completion. Lesson content is untouched.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.completed.clear();
        self.outcomes.clear();
        if let Some(countdown) = &mut self.countdown {
            countdown.reset();
        }
        info!(lesson = %self.lesson.title, "session reset");
    }

    /// Persistable state of the session.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            totals: self.tracker.snapshot(),
            completed: self.completed.clone(),
            outcomes: self.outcomes.clone(),
            preferences: self.preferences.clone(),
            ..ProgressSnapshot::default()
        }
    }

    /// Resume from a saved snapshot. Ids that no longer exist in the lesson
    /// are dropped.
    pub fn restore(&mut self, snapshot: ProgressSnapshot) {
        let known = self.lesson.question_ids();
        self.tracker.restore(snapshot.totals);
        self.completed = snapshot.completed;
        self.completed.retain_known(&known);
        self.outcomes = snapshot.outcomes;
        self.outcomes.retain(|id, _| known.contains(id));
        self.set_preferences(snapshot.preferences);
    }

    /// Storage key for this lesson.
    pub fn storage_key(&self) -> String {
        storage_key(&self.lesson.slug())
    }

    /// Restore whatever progress `store` holds for this lesson.
    pub fn load(&mut self, store: &dyn KeyValueStore) {
        let snapshot = ProgressSnapshot::load(store, &self.storage_key());
        self.restore(snapshot);
    }

    /// Write the current progress to `store`.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> DrillResult<()> {
        self.snapshot().save(store, &self.storage_key())
    }

    /// Remove this lesson's saved progress from `store`.
    pub fn clear_saved(&self, store: &mut dyn KeyValueStore) -> DrillResult<()> {
        ProgressSnapshot::clear(store, &self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrillConfig;
    use crate::headless::HeadlessSurface;
    use crate::surface::ControlRole;
    use mc_host::{HelpLanguage, MemoryStore};

    fn lesson() -> Lesson {
        Lesson::new("Agreeing")
            .with_question(QuestionSpec::multiple_choice("q1", "Pick", ["I agree", "I am agree"], 0))
            .with_question(QuestionSpec::fill_in_text("q2", "It's ___ cold", ["kind of"]))
    }

    fn session(retry: RetryPolicy) -> LessonSession {
        let config = SessionConfig::default()
            .with_drill(DrillConfig::default().with_shuffle(false))
            .with_retry(retry);
        LessonSession::new(lesson(), config)
    }

    #[test]
    fn graded_input_updates_score_and_completion() {
        let mut session = session(RetryPolicy::Locked);
        let mut surface = HeadlessSurface::new();
        let mut drill = session.render(&mut surface, "q1", |_, _| {}).unwrap();

        let outcome = session.handle(&mut drill, &mut surface, DrillInput::Choose(0));
        assert_eq!(outcome, Some(Outcome::Correct));
        assert_eq!(session.totals(), ScoreTotals::new(1, 1));
        assert!(session.completed().contains(&QuestionId::new("q1")));
        assert_eq!(session.next_unanswered().map(|q| q.id().as_str()), Some("q2"));
        assert_eq!(session.progress(), 0.5);
    }

    #[test]
    fn locked_policy_refuses_second_instance() {
        let mut session = session(RetryPolicy::Locked);
        let mut surface = HeadlessSurface::new();
        let mut drill = session.render(&mut surface, "q1", |_, _| {}).unwrap();
        session.handle(&mut drill, &mut surface, DrillInput::Choose(1));

        let err = session.render(&mut surface, "q1", |_, _| {}).err().unwrap();
        assert!(matches!(err, DrillError::AlreadyAnswered(_)));
    }

    #[test]
    fn new_instance_policy_allows_retry_after_wrong_answer() {
        let mut session = session(RetryPolicy::NewInstance);
        let mut surface = HeadlessSurface::new();
        let mut drill = session.render(&mut surface, "q1", |_, _| {}).unwrap();
        session.handle(&mut drill, &mut surface, DrillInput::Choose(1));
        assert!(drill.can_retry());

        let mut retry = session.render(&mut surface, "q1", |_, _| {}).unwrap();
        assert!(!retry.is_locked());
        session.handle(&mut retry, &mut surface, DrillInput::Choose(0));
        assert_eq!(session.totals(), ScoreTotals::new(1, 2));
        assert!(!session.can_render(&QuestionId::new("q1")));
    }

    #[test]
    fn unknown_question_is_an_error() {
        let mut session = session(RetryPolicy::Locked);
        let mut surface = HeadlessSurface::new();
        assert!(matches!(
            session.render(&mut surface, "nope", |_, _| {}),
            Err(DrillError::Core(_))
        ));
    }

    #[test]
    fn expired_countdown_blocks_input() {
        let config = SessionConfig::default().with_time_limit(Duration::from_secs(30));
        let mut session = LessonSession::new(lesson(), config);
        let mut surface = HeadlessSurface::new();
        let mut drill = session.render(&mut surface, "q2", |_, _| {}).unwrap();

        assert_eq!(session.tick(Duration::from_secs(31)), Some(Tick::Expired));
        assert!(session.is_time_up());
        session.handle(&mut drill, &mut surface, DrillInput::Type("kind of".into()));
        assert_eq!(session.handle(&mut drill, &mut surface, DrillInput::Submit), None);
        assert_eq!(session.totals().attempts(), 0);

        session.reset();
        assert!(!session.is_time_up());
        assert_eq!(session.remaining(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn reset_keeps_content() {
        let mut session = session(RetryPolicy::Locked);
        let mut surface = HeadlessSurface::new();
        let mut drill = session.render(&mut surface, "q1", |_, _| {}).unwrap();
        session.handle(&mut drill, &mut surface, DrillInput::Choose(0));

        session.reset();
        assert_eq!(session.totals(), ScoreTotals::default());
        assert!(session.completed().is_empty());
        assert_eq!(session.lesson().len(), 2);
        let fresh = session.render(&mut surface, "q1", |_, _| {}).unwrap();
        assert!(!fresh.is_locked());
    }

    #[test]
    fn save_and_resume() {
        let mut store = MemoryStore::new();
        let mut first = session(RetryPolicy::Locked);
        let mut surface = HeadlessSurface::new();
        let mut drill = first.render(&mut surface, "q1", |_, _| {}).unwrap();
        first.handle(&mut drill, &mut surface, DrillInput::Choose(0));
        first.set_preferences(Preferences {
            help_language: HelpLanguage::English,
            ..Preferences::default()
        });
        first.save(&mut store).unwrap();

        let mut second = session(RetryPolicy::Locked);
        second.load(&store);
        assert_eq!(second.totals(), ScoreTotals::new(1, 1));
        assert!(second.completed().contains(&QuestionId::new("q1")));
        assert_eq!(second.preferences().help_language, HelpLanguage::English);

        second.clear_saved(&mut store).unwrap();
        let mut third = session(RetryPolicy::Locked);
        third.load(&store);
        assert_eq!(third.totals(), ScoreTotals::default());
    }

    #[test]
    fn resumed_session_refuses_answered_question() {
        let mut store = MemoryStore::new();
        let mut first = session(RetryPolicy::Locked);
        let mut surface = HeadlessSurface::new();
        let mut drill = first.render(&mut surface, "q1", |_, _| {}).unwrap();
        first.handle(&mut drill, &mut surface, DrillInput::Choose(0));
        first.save(&mut store).unwrap();

        let mut second = session(RetryPolicy::Locked);
        second.load(&store);
        assert!(!second.can_render(&QuestionId::new("q1")));
        let err = second.render(&mut surface, "q1", |_, _| {}).err().unwrap();
        assert!(matches!(err, DrillError::AlreadyAnswered(_)));
        assert_eq!(second.totals(), ScoreTotals::new(1, 1));
        assert!(second.can_render(&QuestionId::new("q2")));
    }

    #[test]
    fn resumed_session_keeps_retry_for_wrong_answers() {
        let mut store = MemoryStore::new();
        let mut first = session(RetryPolicy::NewInstance);
        let mut surface = HeadlessSurface::new();
        let mut wrong = first.render(&mut surface, "q1", |_, _| {}).unwrap();
        first.handle(&mut wrong, &mut surface, DrillInput::Choose(1));
        let mut right = first.render(&mut surface, "q2", |_, _| {}).unwrap();
        first.handle(&mut right, &mut surface, DrillInput::Type("kind of".into()));
        first.handle(&mut right, &mut surface, DrillInput::Submit);
        first.save(&mut store).unwrap();

        let mut second = session(RetryPolicy::NewInstance);
        second.load(&store);
        assert_eq!(second.outcome(&QuestionId::new("q1")), Some(Outcome::Incorrect));
        assert!(second.can_render(&QuestionId::new("q1")));
        assert!(!second.can_render(&QuestionId::new("q2")));
    }

    #[test]
    fn completed_without_outcome_counts_as_answered() {
        let mut session = session(RetryPolicy::NewInstance);
        let mut snapshot = ProgressSnapshot::default();
        snapshot.completed.insert(QuestionId::new("q1"));
        session.restore(snapshot);
        assert!(!session.can_render(&QuestionId::new("q1")));
    }

    #[test]
    fn restore_drops_removed_questions() {
        let mut session = session(RetryPolicy::Locked);
        let mut snapshot = ProgressSnapshot::default();
        snapshot.completed.insert(QuestionId::new("q1"));
        snapshot.completed.insert(QuestionId::new("deleted"));
        snapshot.outcomes.insert(QuestionId::new("deleted"), Outcome::Correct);
        session.restore(snapshot);
        assert_eq!(session.completed().len(), 1);
        assert_eq!(session.outcome(&QuestionId::new("deleted")), None);
    }

    #[test]
    fn help_language_reaches_feedback() {
        let mut session = session(RetryPolicy::Locked);
        session.set_preferences(Preferences {
            help_language: HelpLanguage::English,
            ..Preferences::default()
        });
        let mut surface = HeadlessSurface::new();
        let mut drill = session.render(&mut surface, "q1", |_, _| {}).unwrap();
        session.handle(&mut drill, &mut surface, DrillInput::Choose(1));
        assert_eq!(surface.feedback().unwrap().message, "Not quite.");
    }

    #[test]
    fn hidden_hints_preference_reaches_drills() {
        let mut session = session(RetryPolicy::Locked);
        session.set_preferences(Preferences {
            show_help: false,
            ..Preferences::default()
        });
        let mut surface = HeadlessSurface::new();
        let drill = session.render(&mut surface, "q2", |_, _| {}).unwrap();
        assert!(drill.control(ControlRole::Hint).is_none());

        drill.show_hint(&mut surface);
        assert_eq!(
            surface.notices().last().map(|n| n.text()),
            Some("Les indices sont désactivés.")
        );
    }
}
