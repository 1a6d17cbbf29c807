//! Gradient colorizer.
//!
//! Maps a value and a reference maximum onto one of seven severity tiers and
//! wraps the value's text in the escape codes of the selected color profile.
//! A negative maximum marks an inverted scale, where a growing value is worse.

use crate::error::{Result, StatusError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorTier {
    Satisfied,
    HighHigh,
    HighLow,
    MediumHigh,
    MediumLow,
    LowHigh,
    LowLow,
}

impl ColorTier {
    pub const ALL: [ColorTier; 7] = [
        ColorTier::Satisfied,
        ColorTier::HighHigh,
        ColorTier::HighLow,
        ColorTier::MediumHigh,
        ColorTier::MediumLow,
        ColorTier::LowHigh,
        ColorTier::LowLow,
    ];

    /// Picks the tier for a percent-of-maximum. Thresholds are inclusive lower
    /// bounds checked highest first; anything below 15 (NaN included) is LowLow.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            ColorTier::Satisfied
        } else if percent >= 80.0 {
            ColorTier::HighHigh
        } else if percent >= 60.0 {
            ColorTier::HighLow
        } else if percent >= 45.0 {
            ColorTier::MediumHigh
        } else if percent >= 30.0 {
            ColorTier::MediumLow
        } else if percent >= 15.0 {
            ColorTier::LowHigh
        } else {
            ColorTier::LowLow
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Foreground colour and weight this tier is drawn with.
    pub fn style(self) -> TierStyle {
        PALETTE[self.index()]
    }
}

/// A 256-colour foreground index plus a bold flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    pub colour: u8,
    pub bold: bool,
}

const PALETTE: [TierStyle; 7] = [
    TierStyle { colour: 51, bold: true },  // cyan
    TierStyle { colour: 46, bold: true },  // bright green
    TierStyle { colour: 28, bold: true },  // dark green
    TierStyle { colour: 226, bold: true }, // yellow
    TierStyle { colour: 3, bold: true },   // orange
    TierStyle { colour: 1, bold: true },   // dark red
    TierStyle { colour: 196, bold: true }, // bright red
];

/// Which escape dialect to render with, as chosen by `-C/--color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorChoice {
    #[default]
    Ansi,
    Tmux,
    None,
}

impl ColorChoice {
    pub const NAMES: [&'static str; 3] = ["ANSI", "TMUX", "NONE"];
}

impl FromStr for ColorChoice {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANSI" => Ok(ColorChoice::Ansi),
            "TMUX" => Ok(ColorChoice::Tmux),
            "NONE" => Ok(ColorChoice::None),
            other => Err(StatusError::config(format!(
                "unknown color choice '{}', expected one of ANSI, TMUX, NONE",
                other
            ))),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorChoice::Ansi => "ANSI",
            ColorChoice::Tmux => "TMUX",
            ColorChoice::None => "NONE",
        };
        f.write_str(name)
    }
}

/// Text placed before and after a styled value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePair {
    pub prefix: String,
    pub suffix: String,
}

/// Immutable tier -> style table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorProfile {
    choice: ColorChoice,
    styles: [StylePair; 7],
}

impl ColorProfile {
    pub fn new(choice: ColorChoice) -> Self {
        let styles = ColorTier::ALL.map(|tier| match choice {
            ColorChoice::Ansi => ansi_pair(tier.style()),
            ColorChoice::Tmux => tmux_pair(tier.style()),
            ColorChoice::None => StylePair::default(),
        });

        Self { choice, styles }
    }

    pub fn ansi() -> Self {
        Self::new(ColorChoice::Ansi)
    }

    pub fn tmux() -> Self {
        Self::new(ColorChoice::Tmux)
    }

    pub fn plain() -> Self {
        Self::new(ColorChoice::None)
    }

    pub fn choice(&self) -> ColorChoice {
        self.choice
    }

    pub fn style(&self, tier: ColorTier) -> &StylePair {
        &self.styles[tier.index()]
    }

    /// Wrap `text` in the style of `tier`.
    pub fn paint(&self, tier: ColorTier, text: &str) -> String {
        let style = self.style(tier);
        let mut out = String::with_capacity(style.prefix.len() + text.len() + style.suffix.len());
        out.push_str(&style.prefix);
        out.push_str(text);
        out.push_str(&style.suffix);
        out
    }
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self::ansi()
    }
}

fn ansi_pair(style: TierStyle) -> StylePair {
    let bold = if style.bold { "\x1b[1m" } else { "" };
    StylePair {
        prefix: format!("\x1b[38;5;{}m{}", style.colour, bold),
        suffix: "\x1b[0m".to_string(),
    }
}

fn tmux_pair(style: TierStyle) -> StylePair {
    let bold = if style.bold { "#[bold]" } else { "" };
    StylePair {
        prefix: format!("#[fg=colour{}]{}", style.colour, bold),
        suffix: "#[none fg=default]".to_string(),
    }
}

/// Whether a bigger raw value is good news or bad news
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    HigherIsWorse,
}

/// A value measured against a reference maximum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricReading {
    pub value: f64,
    pub maximum: f64,
    pub polarity: Polarity,
}

impl MetricReading {
    /// `maximum` is taken as a magnitude; the polarity decides its sign.
    pub fn new(value: f64, maximum: f64, polarity: Polarity) -> Self {
        Self {
            value,
            maximum: maximum.abs(),
            polarity,
        }
    }

    /// The maximum in the colorizer's convention: negative means inverted.
    pub fn signed_maximum(&self) -> f64 {
        match self.polarity {
            Polarity::HigherIsBetter => self.maximum,
            Polarity::HigherIsWorse => -self.maximum,
        }
    }

    pub fn tier(&self) -> Result<ColorTier> {
        tier_for(self.value, self.signed_maximum())
    }

    /// Render `text` styled by this reading's tier.
    pub fn render(&self, text: &str, profile: &ColorProfile) -> Result<String> {
        colorize(text, self.value, self.signed_maximum(), profile)
    }
}

/// Percent-of-maximum used for tier selection.
///
/// For a negative maximum the scale is inverted: `(value / maximum + 1) * 100`,
/// so zero maps to 100 and `|maximum|` maps to 0.
pub fn percent_of(value: f64, maximum: f64) -> Result<f64> {
    if maximum == 0.0 || maximum.is_nan() {
        return Err(StatusError::InvalidMaximum(maximum));
    }

    let percent = if maximum < 0.0 {
        (value / maximum + 1.0) * 100.0
    } else {
        value / maximum * 100.0
    };

    Ok(percent)
}

pub fn tier_for(value: f64, maximum: f64) -> Result<ColorTier> {
    percent_of(value, maximum).map(ColorTier::from_percent)
}

/// Style `text` according to where `value` falls against `maximum`.
pub fn colorize(text: &str, value: f64, maximum: f64, profile: &ColorProfile) -> Result<String> {
    let tier = tier_for(value, maximum)?;
    Ok(profile.paint(tier, text))
}
