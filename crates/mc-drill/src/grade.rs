//! Grading rules, as pure functions over an answer key.
//!
//! `None` from a grader means the input is not grading-eligible (nothing was
//! typed or built) and must not consume the attempt.

use mc_core::normalize::answers_match;
use mc_core::{AnswerKey, Outcome, QuestionSpec, join_tokens, normalize};

/// Grade a multiple-choice pick by its original (unshuffled) index.
///
/// A missing or out-of-range pick is incorrect.
pub fn grade_choice(correct_index: usize, picked: Option<usize>) -> Outcome {
    Outcome::from_match(picked == Some(correct_index))
}

/// Grade typed text against the accepted answers.
pub fn grade_text<S: AsRef<str>>(accepted: &[S], input: &str) -> Option<Outcome> {
    if normalize(input).is_empty() {
        return None;
    }
    let matched = accepted
        .iter()
        .any(|expected| answers_match(input, expected.as_ref()));
    Some(Outcome::from_match(matched))
}

/// Grade a built sentence against the target sequence, all or nothing.
pub fn grade_sequence<S: AsRef<str>, T: AsRef<str>>(target: &[S], built: &[T]) -> Option<Outcome> {
    if built.is_empty() {
        return None;
    }
    Some(Outcome::from_match(answers_match(
        &join_tokens(built),
        &join_tokens(target),
    )))
}

/// The canonical answer as display text.
///
/// The correct choice text, the first accepted answer verbatim, or the target
/// tokens joined with spaces. Empty when the key has nothing to show.
pub fn reveal_answer(answer: &AnswerKey) -> String {
    match answer {
        AnswerKey::MultipleChoice {
            choices,
            correct_index,
        } => choices.get(*correct_index).cloned().unwrap_or_default(),
        AnswerKey::FillInText { accepted } => accepted.first().cloned().unwrap_or_default(),
        AnswerKey::WordOrder { target } => join_tokens(target),
    }
}

/// The question's hint, or `fallback` when it has none or only blanks.
pub fn hint_text(spec: &QuestionSpec, fallback: &str) -> String {
    spec.hint()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_by_original_index() {
        assert_eq!(grade_choice(1, Some(1)), Outcome::Correct);
        assert_eq!(grade_choice(1, Some(0)), Outcome::Incorrect);
        assert_eq!(grade_choice(1, None), Outcome::Incorrect);
    }

    #[test]
    fn text_is_normalized_on_both_sides() {
        let accepted = ["kind of", "kinda"];
        assert_eq!(grade_text(&accepted, "KIND   OF"), Some(Outcome::Correct));
        assert_eq!(grade_text(&accepted, "kinda"), Some(Outcome::Correct));
        assert_eq!(grade_text(&accepted, "Kind of."), Some(Outcome::Correct));
        assert_eq!(grade_text(&accepted, "sort of"), Some(Outcome::Incorrect));
        assert_eq!(grade_text(&["I’m fine"], "i'm fine"), Some(Outcome::Correct));
    }

    #[test]
    fn blank_text_is_not_an_attempt() {
        assert_eq!(grade_text(&["kind of"], ""), None);
        assert_eq!(grade_text(&["kind of"], "   "), None);
        assert_eq!(grade_text(&["kind of"], " ?! "), None);
    }

    #[test]
    fn text_without_accepted_answers_is_incorrect() {
        assert_eq!(grade_text::<&str>(&[], "anything"), Some(Outcome::Incorrect));
    }

    #[test]
    fn sequence_is_all_or_nothing() {
        let target = ["I", "agree"];
        assert_eq!(grade_sequence(&target, &["agree", "I"]), Some(Outcome::Incorrect));
        assert_eq!(grade_sequence(&target, &["I"]), Some(Outcome::Incorrect));
        assert_eq!(grade_sequence(&target, &["i", "AGREE"]), Some(Outcome::Correct));
        assert_eq!(grade_sequence::<_, &str>(&target, &[]), None);
    }

    #[test]
    fn reveal_per_kind() {
        let mc = AnswerKey::MultipleChoice {
            choices: vec!["I argue".into(), "I agree".into()],
            correct_index: 1,
        };
        assert_eq!(reveal_answer(&mc), "I agree");

        let fill = AnswerKey::FillInText {
            accepted: vec!["Kind of".into(), "kinda".into()],
        };
        assert_eq!(reveal_answer(&fill), "Kind of");

        let order = AnswerKey::WordOrder {
            target: vec!["I".into(), "totally".into(), "agree".into()],
        };
        assert_eq!(reveal_answer(&order), "I totally agree");
    }

    #[test]
    fn reveal_tolerates_malformed_keys() {
        let mc = AnswerKey::MultipleChoice {
            choices: vec!["a".into()],
            correct_index: 4,
        };
        assert_eq!(reveal_answer(&mc), "");
        assert_eq!(reveal_answer(&AnswerKey::FillInText { accepted: vec![] }), "");
    }

    #[test]
    fn hint_uses_fallback_when_blank() {
        let spec = QuestionSpec::fill_in_text("q", "It's ___ cold", ["kind of"]);
        assert_eq!(hint_text(&spec, "Think."), "Think.");
        assert_eq!(hint_text(&spec.clone().with_hint(" "), "Think."), "Think.");
        assert_eq!(hint_text(&spec.with_hint("Two words."), "Think."), "Two words.");
    }
}
