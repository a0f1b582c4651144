//! Text-to-speech.
//!
//! Speech is fire-and-forget: a [`SpeechAnnouncer`] never reports failure,
//! never blocks on playback, and a new `speak` call cancels whatever is
//! still being said. When no speech engine exists the provider is simply
//! [`SilentSpeech`].

use std::fmt;
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lowest accepted speech rate multiplier.
pub const MIN_RATE: f32 = 0.5;
/// Highest accepted speech rate multiplier.
pub const MAX_RATE: f32 = 2.0;

/// English accents a lesson can be read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    /// United States English.
    #[default]
    American,
    /// British English.
    British,
    /// Australian English.
    Australian,
    /// Irish English.
    Irish,
    /// Indian English.
    Indian,
}

impl Accent {
    /// All accents, in menu order.
    pub const ALL: [Accent; 5] = [
        Self::American,
        Self::British,
        Self::Australian,
        Self::Irish,
        Self::Indian,
    ];

    /// BCP-47 locale tag.
    pub fn locale(self) -> &'static str {
        match self {
            Self::American => "en-US",
            Self::British => "en-GB",
            Self::Australian => "en-AU",
            Self::Irish => "en-IE",
            Self::Indian => "en-IN",
        }
    }

    /// Parse a user-supplied accent name or locale tag.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "us" | "american" | "en-us" => Some(Self::American),
            "uk" | "gb" | "british" | "en-gb" => Some(Self::British),
            "au" | "australian" | "en-au" => Some(Self::Australian),
            "ie" | "irish" | "en-ie" => Some(Self::Irish),
            "in" | "indian" | "en-in" => Some(Self::Indian),
            _ => None,
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::American => write!(f, "American"),
            Self::British => write!(f, "British"),
            Self::Australian => write!(f, "Australian"),
            Self::Irish => write!(f, "Irish"),
            Self::Indian => write!(f, "Indian"),
        }
    }
}

/// How to say something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechOptions {
    /// Accent to pick a voice for.
    pub accent: Accent,
    /// Speed multiplier, 1.0 is the engine default.
    pub rate: f32,
}

impl SpeechOptions {
    /// Options for an accent at normal speed.
    pub fn new(accent: Accent) -> Self {
        Self { accent, rate: 1.0 }
    }

    /// Set the rate, clamped to [`MIN_RATE`]..=[`MAX_RATE`].
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = if rate.is_finite() {
            rate.clamp(MIN_RATE, MAX_RATE)
        } else {
            1.0
        };
        self
    }
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self::new(Accent::default())
    }
}

/// A voice exposed by a speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific voice name.
    pub name: String,
    /// Language tag as reported by the engine (`en-GB`, `en_US`, `en`...).
    pub lang: String,
}

impl Voice {
    /// Create a voice entry.
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn normalized_lang(&self) -> String {
        self.lang.to_lowercase().replace('_', "-")
    }
}

/// Pick the best available voice for an accent.
///
/// Preference order: exact locale, then a prefix match in either direction
/// (`en-gb-x-rp` for `en-GB`), then any voice whose base language is English,
/// then whatever voice exists. Engines differ in what they expose, so this is
/// a heuristic and may return `None`.
pub fn select_voice(voices: &[Voice], accent: Accent) -> Option<&Voice> {
    let locale = accent.locale().to_lowercase();
    let base = locale.split('-').next().unwrap_or("en");

    voices
        .iter()
        .find(|v| v.normalized_lang() == locale)
        .or_else(|| {
            voices.iter().find(|v| {
                let lang = v.normalized_lang();
                !lang.is_empty() && (lang.starts_with(&locale) || locale.starts_with(&lang)) && lang.contains('-')
            })
        })
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.normalized_lang().split('-').next() == Some(base))
        })
        .or_else(|| voices.first())
}

/// A text-to-speech provider.
///
/// All methods are best-effort and infallible from the caller's side.
pub trait SpeechAnnouncer {
    /// Say `text`, cancelling anything still playing.
    fn speak(&mut self, text: &str, options: &SpeechOptions);

    /// Cancel in-flight speech.
    fn stop(&mut self);

    /// Voices the engine offers, empty when unknown.
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }
}

/// Provider for runtimes without speech.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl SpeechAnnouncer for SilentSpeech {
    fn speak(&mut self, _text: &str, _options: &SpeechOptions) {}

    fn stop(&mut self) {}
}

/// Provider that remembers what it was asked to say.
///
/// Useful for tests and for hosts that want to display captions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeech {
    spoken: Vec<(String, SpeechOptions)>,
    current: Option<String>,
    voices: Vec<Voice>,
}

impl RecordingSpeech {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that reports the given voices.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    /// Every utterance requested so far, oldest first.
    pub fn spoken(&self) -> &[(String, SpeechOptions)] {
        &self.spoken
    }

    /// The utterance that would still be playing.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl SpeechAnnouncer for RecordingSpeech {
    fn speak(&mut self, text: &str, options: &SpeechOptions) {
        self.spoken.push((text.to_string(), *options));
        self.current = Some(text.to_string());
    }

    fn stop(&mut self) {
        self.current = None;
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}

/// Words per minute an espeak-compatible engine uses at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Speech through an external synthesizer program (`espeak-ng`, `espeak`).
///
/// Each `speak` kills the previous child process before spawning a new one.
/// If the program cannot be started the provider turns itself silent.
#[derive(Debug)]
pub struct CommandSpeech {
    program: String,
    child: Option<Child>,
    available: bool,
    voice_cache: Option<Vec<Voice>>,
}

impl CommandSpeech {
    /// Use the given synthesizer program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: None,
            available: true,
            voice_cache: None,
        }
    }

    /// Whether the program has not failed to start yet.
    pub fn is_available(&self) -> bool {
        self.available
    }

    fn arguments(&mut self, text: &str, options: &SpeechOptions) -> Vec<String> {
        if self.voice_cache.is_none() {
            self.voice_cache = Some(self.voices());
        }
        let voice = select_voice(self.voice_cache.as_deref().unwrap_or_default(), options.accent)
            .map(|v| v.lang.clone())
            .unwrap_or_else(|| options.accent.locale().to_lowercase());
        let words_per_minute = (BASE_WORDS_PER_MINUTE * options.rate).round() as u32;
        vec![
            "-v".to_string(),
            voice,
            "-s".to_string(),
            words_per_minute.to_string(),
            text.to_string(),
        ]
    }
}

impl SpeechAnnouncer for CommandSpeech {
    fn speak(&mut self, text: &str, options: &SpeechOptions) {
        self.stop();
        if !self.available || text.trim().is_empty() {
            return;
        }
        let arguments = self.arguments(text, options);
        let spawned = Command::new(&self.program)
            .args(arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => self.child = Some(child),
            Err(e) => {
                debug!(program = %self.program, error = %e, "speech program unavailable, going silent");
                self.available = false;
            }
        }
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn voices(&self) -> Vec<Voice> {
        if !self.available {
            return Vec::new();
        }
        Command::new(&self.program)
            .arg("--voices=en")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()
            .filter(|out| out.status.success())
            .map(|out| parse_voice_listing(&String::from_utf8_lossy(&out.stdout)))
            .unwrap_or_default()
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File
///  2  en-gb           --/M      English_(Great_Britain) gmw/en
/// ```
fn parse_voice_listing(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_, lang, _, name, ..] => Some(Voice::new(*name, *lang)),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices(langs: &[&str]) -> Vec<Voice> {
        langs
            .iter()
            .enumerate()
            .map(|(i, lang)| Voice::new(format!("voice-{i}"), *lang))
            .collect()
    }

    #[test]
    fn exact_locale_wins() {
        let available = voices(&["en-US", "en-GB", "fr-FR"]);
        let voice = select_voice(&available, Accent::British).unwrap();
        assert_eq!(voice.lang, "en-GB");
    }

    #[test]
    fn exact_match_ignores_case_and_underscore() {
        let available = voices(&["en_us", "en_gb"]);
        assert_eq!(select_voice(&available, Accent::British).unwrap().lang, "en_gb");
    }

    #[test]
    fn prefix_match_is_second_choice() {
        let available = voices(&["fr-FR", "en-gb-x-rp", "en-US"]);
        assert_eq!(select_voice(&available, Accent::British).unwrap().lang, "en-gb-x-rp");
    }

    #[test]
    fn base_language_is_third_choice() {
        let available = voices(&["fr-FR", "en-US"]);
        assert_eq!(select_voice(&available, Accent::Irish).unwrap().lang, "en-US");
    }

    #[test]
    fn any_voice_is_last_resort() {
        let available = voices(&["fr-FR", "de-DE"]);
        assert_eq!(select_voice(&available, Accent::Australian).unwrap().lang, "fr-FR");
        assert!(select_voice(&[], Accent::Australian).is_none());
    }

    #[test]
    fn accent_names_parse() {
        assert_eq!(Accent::from_name("UK"), Some(Accent::British));
        assert_eq!(Accent::from_name("en_US"), Some(Accent::American));
        assert_eq!(Accent::from_name("klingon"), None);
        for accent in Accent::ALL {
            assert_eq!(Accent::from_name(accent.locale()), Some(accent));
        }
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(SpeechOptions::default().with_rate(9.0).rate, MAX_RATE);
        assert_eq!(SpeechOptions::default().with_rate(0.1).rate, MIN_RATE);
        assert_eq!(SpeechOptions::default().with_rate(f32::NAN).rate, 1.0);
    }

    #[test]
    fn silent_speech_does_nothing() {
        let mut speech = SilentSpeech;
        speech.speak("hello", &SpeechOptions::default());
        speech.stop();
        assert!(speech.voices().is_empty());
    }

    #[test]
    fn recording_speech_last_call_wins() {
        let mut speech = RecordingSpeech::new();
        speech.speak("first", &SpeechOptions::default());
        speech.speak("second", &SpeechOptions::default());
        assert_eq!(speech.current(), Some("second"));
        assert_eq!(speech.spoken().len(), 2);
        speech.stop();
        assert_eq!(speech.current(), None);
    }

    #[test]
    fn missing_program_goes_silent() {
        let mut speech = CommandSpeech::new("masterclass-no-such-synthesizer");
        speech.speak("hello", &SpeechOptions::default());
        assert!(!speech.is_available());
        speech.speak("again", &SpeechOptions::default());
        assert!(speech.voices().is_empty());
    }

    #[test]
    fn parses_espeak_voice_table() {
        let listing = "Pty Language       Age/Gender VoiceName          File                 Other Languages\n \
                       2  en-gb           --/M      English_(Great_Britain) gmw/en               (en 2)\n \
                       2  en-us           --/M      English_(America)  gmw/en-US            (en 3)\n";
        let parsed = parse_voice_listing(listing);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].lang, "en-gb");
        assert_eq!(parsed[1].name, "English_(America)");
    }
}
