//! Preference progress reported by `GET /session/{id}`.

use serde::{Deserialize, Serialize};

/// Number of preferences the backend collects before recommending
pub const PREFERENCE_COUNT: usize = 4;

/// Server-side session record. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStatus {
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub tempo: Option<String>,
    pub artist_or_song: Option<String>,
    pub no_pref_genre: Option<bool>,
    pub no_pref_mood: Option<bool>,
    pub no_pref_tempo: Option<bool>,
    pub no_pref_artist_or_song: Option<bool>,
}

impl SessionStatus {
    /// Each preference paired with whether it counts as filled.
    /// A preference is filled when it has a value or the user opted out of it.
    pub fn preferences(&self) -> [(&'static str, bool); PREFERENCE_COUNT] {
        [
            ("genre", is_filled(&self.genre, self.no_pref_genre)),
            ("mood", is_filled(&self.mood, self.no_pref_mood)),
            ("tempo", is_filled(&self.tempo, self.no_pref_tempo)),
            (
                "artist",
                is_filled(&self.artist_or_song, self.no_pref_artist_or_song),
            ),
        ]
    }

    pub fn filled_count(&self) -> usize {
        self.preferences().iter().filter(|(_, filled)| *filled).count()
    }

    /// Fraction of preferences filled, in `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        self.filled_count() as f32 / PREFERENCE_COUNT as f32
    }

    pub fn label(&self) -> String {
        format!("{}/{} preferences", self.filled_count(), PREFERENCE_COUNT)
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == PREFERENCE_COUNT
    }
}

/// Same rule the backend uses: any value that is not null counts, even an
/// empty one.
fn is_filled(value: &Option<String>, no_pref: Option<bool>) -> bool {
    value.is_some() || no_pref.unwrap_or(false)
}
