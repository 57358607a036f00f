//! Stamp Codes - Pseudo-Authentication Markers
//!
//! A stamp is `<PREFIX>-<id fragment>-<day of year>`. It marks a document
//! as issued; it proves nothing cryptographically.

use chrono::{Datelike, NaiveDate};

/// Trailing fragment of a student id used in stamp codes: the last four
/// characters, or the whole id when shorter.
pub fn id_fragment(student_id: &str) -> &str {
    let chars = student_id.char_indices().rev().take(4).last();
    match chars {
        Some((idx, _)) => &student_id[idx..],
        None => student_id,
    }
}

/// Compose a stamp code for a student id on a given date.
///
/// The trailing component is the ordinal day of the year (1..=366).
pub fn stamp_code(prefix: &str, student_id: &str, issue_date: NaiveDate) -> String {
    format!("{}-{}-{}", prefix, id_fragment(student_id), issue_date.ordinal())
}
