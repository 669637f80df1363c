//! Response parser — turns raw completion text into numbered questions.
//!
//! A line counts as a question only when it ends in "?". The model's output
//! window can cut the last line off mid-sentence, and that line is dropped.
//! The finish reason of the choice is not consulted.

use crate::interview::models::Question;
use crate::interview::random::RandomSource;
use crate::interview::shuffle::shuffle;

/// Highest byte position a leading enumeration marker may sit at ("99)" → 2).
const MAX_MARKER_POSITION: usize = 2;

/// Parses one choice's text into questions indexed 1..N in returned order,
/// then shuffles the whole list when asked. Empty when nothing usable came back.
pub fn parse_questions(
    raw_text: &str,
    shuffle_questions: bool,
    rng: &dyn RandomSource,
) -> Vec<Question> {
    if raw_text.is_empty() {
        return Vec::new();
    }

    let mut questions: Vec<Question> = raw_text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && line.ends_with('?'))
        .map(clean_line)
        .enumerate()
        .map(|(i, question)| Question {
            index: i + 1,
            question,
        })
        .collect();

    if shuffle_questions {
        shuffle(&mut questions, rng);
    }

    questions
}

/// Trims, drops one leading "-" bullet, then strips enumeration markers.
fn clean_line(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix('-').unwrap_or(line);
    strip_enumeration(line)
}

/// Removes a leading "3." and then a leading "3)" marker, e.g.
/// "3. What NAS Solutions (enterprise and scale-out) are you familiar with?"
pub fn strip_enumeration(question: &str) -> String {
    let stripped = strip_marker(question, '.');
    strip_marker(&stripped, ')')
}

/// Drops everything through the first `punctuation` when it sits within the
/// first three bytes and is preceded only by an integer. Always trims.
pub fn strip_marker(question: &str, punctuation: char) -> String {
    let text = match question.find(punctuation) {
        Some(pos) if pos <= MAX_MARKER_POSITION && question[..pos].parse::<u32>().is_ok() => {
            &question[pos + punctuation.len_utf8()..]
        }
        _ => question,
    };
    text.trim().to_string()
}
