//! Parsing of oracle answers.
//!
//! Oracle output is untrusted text. The answer is expected to carry a
//! `SLOT: <number>` line and a `REASON: <text>` line; anything else is noise.

/// Outcome of reading an oracle answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleAnswer {
    /// A slot number was found. `number` is 1-based and not yet range-checked.
    Choice { number: i64, reason: Option<String> },
    /// No usable `SLOT:` line.
    Unparseable,
}

const SLOT_MARKER: &str = "SLOT:";
const REASON_MARKER: &str = "REASON:";

/// Scan `text` line by line.
///
/// The last line containing `SLOT:` decides the slot; if its value is not a
/// number the whole answer is unparseable. The last line containing
/// `REASON:` gives the reason (text after the first colon). A line carrying
/// both markers counts as a slot line.
pub fn parse_answer(text: &str) -> OracleAnswer {
    let mut slot: Option<Option<i64>> = None;
    let mut reason: Option<String> = None;

    for line in text.lines() {
        if line.contains(SLOT_MARKER) {
            slot = Some(slot_value(line));
        } else if line.contains(REASON_MARKER) {
            reason = line
                .split_once(':')
                .map(|(_, rest)| clean(rest).to_string())
                .filter(|r| !r.is_empty());
        }
    }

    match slot {
        Some(Some(number)) => OracleAnswer::Choice { number, reason },
        _ => OracleAnswer::Unparseable,
    }
}

impl OracleAnswer {
    /// 0-based index if the choice falls inside `0..len`.
    pub fn index_within(&self, len: usize) -> Option<usize> {
        match self {
            Self::Choice { number, .. } => {
                let index = number.checked_sub(1)?;
                usize::try_from(index).ok().filter(|i| *i < len)
            }
            Self::Unparseable => None,
        }
    }
}

/// The value between the first and second colon, as a number.
fn slot_value(line: &str) -> Option<i64> {
    let value = line.split(':').nth(1)?;
    clean(value)
        .trim_matches(|c| c == '[' || c == ']')
        .trim()
        .parse()
        .ok()
}

/// Strip whitespace and markdown emphasis a model tends to add.
fn clean(s: &str) -> &str {
    s.trim().trim_matches('*').trim()
}
