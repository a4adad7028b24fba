//! Shareable score card.
//!
//! The card is a 300x300 square with a dark-blue vertical gradient, a
//! headline at the top, the score in large type in the middle, and a
//! challenge line at the bottom. It is shared together with an invite
//! message.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const CARD_SIZE: u32 = 300;
pub const HEADLINE: &str = "My Score Is";
pub const TAGLINE: &str = "Think you can beat me?";
pub const DEFAULT_INVITE_MESSAGE: &str = "Download ZeroScreen from example.com to compete now!";

const GRADIENT_TOP: &str = "#00008B";
const GRADIENT_BOTTOM: &str = "#000064";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareCard {
    pub points: i64,
    pub headline: String,
    pub tagline: String,
    pub invite_message: String,
}

impl ShareCard {
    pub fn from_points(points: i64) -> Self {
        Self {
            points,
            headline: HEADLINE.into(),
            tagline: TAGLINE.into(),
            invite_message: DEFAULT_INVITE_MESSAGE.into(),
        }
    }

    pub fn with_invite_message(mut self, message: impl Into<String>) -> Self {
        self.invite_message = message.into();
        self
    }

    /// Render the card as an SVG document.
    pub fn to_svg(&self) -> String {
        let size = CARD_SIZE;
        let center = size / 2;
        let mut svg = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        );
        let _ = writeln!(
            svg,
            r#"  <defs><linearGradient id="bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{GRADIENT_TOP}"/><stop offset="1" stop-color="{GRADIENT_BOTTOM}"/></linearGradient></defs>"#
        );
        let _ = writeln!(svg, r#"  <rect width="{size}" height="{size}" fill="url(#bg)"/>"#);
        let _ = writeln!(
            svg,
            r#"  <text x="{center}" y="38" fill="white" font-family="sans-serif" font-weight="bold" font-size="18" text-anchor="middle">{}</text>"#,
            escape_xml(&self.headline)
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{center}" y="{center}" fill="white" font-family="sans-serif" font-weight="bold" font-size="50" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.points
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{center}" y="268" fill="white" font-family="sans-serif" font-weight="bold" font-size="18" text-anchor="middle">{}</text>"#,
            escape_xml(&self.tagline)
        );
        svg.push_str("</svg>\n");
        svg
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let score = self.points.to_string();
        let width = [self.headline.len(), score.len(), self.tagline.len()]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 4;
        let border = format!("+{}+", "-".repeat(width));
        let line = |text: &str| format!("|{:^width$}|", text, width = width);

        [
            border.clone(),
            line(&self.headline),
            line(""),
            line(&score),
            line(""),
            line(&self.tagline),
            border,
            self.invite_message.clone(),
        ]
        .join("\n")
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
