//! Best-effort extraction of a structured review from free-form message text.
//!
//! The format is a loose convention, not a grammar: the first line is the
//! title, scores sit behind fixed labels, and each section body is the line
//! after its heading. Extraction never fails — absent or malformed fields
//! come back as `None`, collected into a [`ParseReport`].

use std::fmt;

/// A single parsed snack review. One per webhook request; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub title: String,
    pub taste: Option<f64>,
    pub presentation: Option<f64>,
    pub value_for_money: Option<f64>,
    pub taste_body: Option<String>,
    pub presentation_body: Option<String>,
    pub value_for_money_body: Option<String>,
    pub author: String,
}

impl Review {
    /// URL-safe path segment derived from the title.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Which review field could not be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    TasteScore,
    PresentationScore,
    ValueForMoneyScore,
    TasteBody,
    PresentationBody,
    ValueForMoneyBody,
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReviewField::TasteScore => "taste score",
            ReviewField::PresentationScore => "presentation score",
            ReviewField::ValueForMoneyScore => "value-for-money score",
            ReviewField::TasteBody => "taste body",
            ReviewField::PresentationBody => "presentation body",
            ReviewField::ValueForMoneyBody => "value-for-money body",
        };
        write!(f, "{}", name)
    }
}

/// Fields the parser could not extract, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub missing: Vec<ReviewField>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    fn record<T>(&mut self, field: ReviewField, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.missing.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

const TASTE_LABEL: &str = "taste: ";
const PRESENTATION_LABEL: &str = "presentation: ";
const VFM_LABEL: &str = "value for money: ";

const TASTE_HEADING: &str = "Taste";
const PRESENTATION_HEADING: &str = "Presentation";
const VFM_HEADING: &str = "Value for Money";

/// Parse a review out of cleaned message text.
///
/// Expects bold markers to already be stripped (see
/// [`crate::slack::SlackPayload::cleaned_text`]).
pub fn parse_review(text: &str, author: &str) -> (Review, ParseReport) {
    let mut report = ParseReport::default();

    // First line before anything else is the title; every colon is dropped,
    // not just a trailing one.
    let title = text.lines().next().unwrap_or("").replace(':', "");

    let taste = report.record(ReviewField::TasteScore, extract_score(text, TASTE_LABEL));
    let presentation = report.record(
        ReviewField::PresentationScore,
        extract_score(text, PRESENTATION_LABEL),
    );
    let value_for_money =
        report.record(ReviewField::ValueForMoneyScore, extract_score(text, VFM_LABEL));

    let lines: Vec<&str> = text.lines().collect();
    let taste_body = report.record(ReviewField::TasteBody, extract_body(&lines, TASTE_HEADING));
    let presentation_body = report.record(
        ReviewField::PresentationBody,
        extract_body(&lines, PRESENTATION_HEADING),
    );
    let value_for_money_body = report.record(
        ReviewField::ValueForMoneyBody,
        extract_body(&lines, VFM_HEADING),
    );

    let review = Review {
        title,
        taste,
        presentation,
        value_for_money,
        taste_body,
        presentation_body,
        value_for_money_body,
        author: author.to_string(),
    };
    (review, report)
}

/// Case-insensitive label search; the two characters after the label form
/// the score window. A window that doesn't trim to a number (e.g. `8/` out
/// of `8/10`) yields `None`.
fn extract_score(text: &str, label: &str) -> Option<f64> {
    let haystack = text.to_lowercase();
    let pos = haystack.find(label)?;
    let window: String = haystack[pos + label.len()..].chars().take(2).collect();
    window.trim().parse::<f64>().ok()
}

/// The body for a section is the line immediately following a line that is
/// exactly the heading. A missing heading, or a heading on the last line,
/// yields `None`.
fn extract_body(lines: &[&str], heading: &str) -> Option<String> {
    let idx = lines.iter().position(|line| *line == heading)?;
    lines.get(idx + 1).map(|line| line.to_string())
}

/// Convert a title to a URL-safe, lowercase, hyphenated slug.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
