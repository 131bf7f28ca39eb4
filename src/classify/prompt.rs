//! Request builder: serializes an ordered title list into one prompt and
//! declares the output contract to the model. Pure, no side effects.

use std::fmt::Write as _;

/// Build the classification prompt for `titles`.
///
/// Each title is prefixed with its 1-based position, one per line, in input
/// order. The instruction block pins the reply to a single JSON object with a
/// `summary` string and a `details` array of exactly `titles.len()` elements.
/// Titles are embedded as-is; instruction-like text inside a title is an
/// accepted residual risk.
pub fn build_prompt(titles: &[String]) -> String {
    let mut numbered = String::new();
    for (i, title) in titles.iter().enumerate() {
        let _ = writeln!(numbered, "{}. {}", i + 1, title);
    }

    format!(
        "You are a professional real-estate market analyst. Classify each of \
         the {n} forum post titles below.\n\
         \n\
         Titles:\n\
         {numbered}\n\
         Reply with a single JSON object and nothing else, in this shape:\n\
         {{\"summary\": \"<one short paragraph on the overall mood>\", \
         \"details\": [{{\"sentiment\": \"<e.g. positive, negative, neutral, \
         anxious, watching, not-applicable>\", \"keyword\": \"<comma-separated \
         key topics, or none>\"}}]}}\n\
         The details array must contain exactly {n} elements, one per title, \
         in the same order as the titles. Do not wrap the JSON in markdown \
         code fences or add any text outside it.",
        n = titles.len(),
    )
}
