use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minimum number of characters a trimmed scenario must contain.
pub const MIN_SCENARIO_CHARS: usize = 10;

/// Presentation style requested for the generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Cinematic,
    Clips,
    Timelapse,
    Explainer,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Cinematic,
        Style::Clips,
        Style::Timelapse,
        Style::Explainer,
    ];

    /// Stable identifier used on the command line and in logs.
    pub fn id(self) -> &'static str {
        match self {
            Style::Cinematic => "cinematic",
            Style::Clips => "clips",
            Style::Timelapse => "timelapse",
            Style::Explainer => "explainer",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Style::Cinematic => "Cinematic Trailer",
            Style::Clips => "Clips",
            Style::Timelapse => "Time-Lapse",
            Style::Explainer => "Explainer Video",
        }
    }

    /// Small glyph shown next to history rows.
    pub fn badge(self) -> &'static str {
        match self {
            Style::Cinematic => "🎬",
            Style::Clips => "📹",
            Style::Timelapse => "⏱️",
            Style::Explainer => "📊",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown video style `{0}` (expected cinematic, clips, timelapse or explainer)")]
pub struct ParseStyleError(pub String);

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseStyleError(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Scenario description must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },
}

/// A validated submission. Only [`submit`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    scenario: String,
    style: Style,
}

impl GenerationRequest {
    /// Scenario text exactly as the user typed it.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Character count of the trimmed scenario, the figure validation checks.
    pub fn scenario_chars(&self) -> usize {
        self.scenario.trim().chars().count()
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

/// Validates a scenario submission. `style` falls back to [`Style::Cinematic`].
pub fn submit(
    scenario_text: &str,
    style: Option<Style>,
) -> Result<GenerationRequest, ValidationError> {
    let actual = scenario_text.trim().chars().count();
    if actual < MIN_SCENARIO_CHARS {
        return Err(ValidationError::TooShort {
            min: MIN_SCENARIO_CHARS,
            actual,
        });
    }
    Ok(GenerationRequest {
        scenario: scenario_text.to_string(),
        style: style.unwrap_or_default(),
    })
}

/// Text and style currently entered in the scenario form.
///
/// The draft survives a successful submit; clearing it is left to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScenarioDraft {
    pub text: String,
    pub style: Style,
}

impl ScenarioDraft {
    pub fn submit(&self) -> Result<GenerationRequest, ValidationError> {
        submit(&self.text, Some(self.style))
    }
}
