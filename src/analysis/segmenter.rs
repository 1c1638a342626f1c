use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FailureRecord;

/// Start of a numbered failure, e.g. `  3) `. Only positive numbers count;
/// leading zeros are allowed.
static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(0*[1-9][0-9]*)\)").expect("boundary pattern is valid"));

/// What follows the `)` on a boundary line when the runner printed a title.
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]+(\S.*?)[ \t]*\r?$").expect("title pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub records: Vec<FailureRecord>,
    /// Boundaries that carried no usable title and were left out.
    pub dropped_markers: usize,
}

/// Splits a runner log into one record per numbered failure.
///
/// A record's body starts after its title line and stops right before the
/// next boundary line, whether or not that boundary has a title, so a body
/// never contains another record's marker.
pub fn segment(text: &str) -> Segmentation {
    let boundaries: Vec<Boundary> = BOUNDARY
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let line_end = text[whole.end..]
                .find('\n')
                .map(|i| whole.end + i)
                .unwrap_or(text.len());
            Boundary {
                line_start: whole.start,
                line_end,
                number: caps.get(1).and_then(|m| m.as_str().parse().ok()),
                title: TITLE
                    .captures(&text[whole.end..line_end])
                    .and_then(|t| t.get(1))
                    .map(|t| t.as_str().to_string()),
            }
        })
        .collect();

    let mut records = Vec::with_capacity(boundaries.len());
    let mut dropped_markers = 0;

    for (i, boundary) in boundaries.iter().enumerate() {
        let (number, title) = match (boundary.number, &boundary.title) {
            (Some(number), Some(title)) => (number, title.clone()),
            _ => {
                dropped_markers += 1;
                continue;
            }
        };

        let body_start = (boundary.line_end + 1).min(text.len());
        let body_end = boundaries
            .get(i + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len())
            .max(body_start);

        records.push(FailureRecord::new(number, title, &text[body_start..body_end]));
    }

    if dropped_markers > 0 {
        tracing::warn!(
            "Found {} failure markers but only {} titles; truncated to {} records",
            boundaries.len(),
            records.len(),
            records.len()
        );
    }

    tracing::debug!("Segmented {} failure records", records.len());

    Segmentation {
        records,
        dropped_markers,
    }
}

struct Boundary {
    line_start: usize,
    /// Index of the terminating `\n`, or the end of the text.
    line_end: usize,
    number: Option<u32>,
    title: Option<String>,
}
