//! The parsing module
//! Turn tab-separated embedding records into model entries
//!
//! Each record is one line with at least three tab-separated fields:
//! a leading field that is ignored, the word, and a JSON-encoded numeric
//! array holding the raw embedding. Blank lines are skipped.

use crate::model::Model;

/// Parses tab-separated embedding records into raw `(word, vector)` entries.
///
/// The entries keep the input order and are not normalized here; that
/// happens in [`Model::from_entries`].
///
/// # Returns
///
/// * `Ok(Vec<(String, Vec<f32>)>)` - One entry per non-blank line
/// * `Err(String)` - Error if a line has too few fields or a malformed array
///
/// # Examples
///
/// ```
/// use wordvec::parse::parse_entries;
///
/// let tsv = "0\tcat\t[1.0, 0.0]\n1\tdog\t[0.0, 1.0]\n";
/// let entries = parse_entries(tsv).unwrap();
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].0, "cat");
/// assert_eq!(entries[0].1, vec![1.0, 0.0]);
/// ```
pub fn parse_entries(tsv: &str) -> Result<Vec<(String, Vec<f32>)>, String> {
    let mut entries = Vec::new();

    for (line_number, line) in tsv.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(format!(
                "Line {}: expected 3 tab-separated fields, got {}",
                line_number + 1,
                fields.len()
            ));
        }

        let word = fields[1].to_string();
        let values: Vec<f32> = serde_json::from_str(fields[2])
            .map_err(|e| format!("Line {}: malformed vector array: {}", line_number + 1, e))?;

        entries.push((word, values));
    }

    Ok(entries)
}

/// Parses tab-separated embedding records straight into a [`Model`].
///
/// Convenience wrapper: [`parse_entries`] followed by
/// [`Model::from_entries`], so every vector comes out unit-normalized.
pub fn parse_model(tsv: &str) -> Result<Model, String> {
    let entries = parse_entries(tsv)?;
    Model::from_entries(entries)
}
