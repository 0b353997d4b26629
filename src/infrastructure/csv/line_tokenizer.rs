// ============================================================
// CSV LINE TOKENIZER
// ============================================================
// Split a single CSV line into trimmed fields

/// Fields of one CSV line, trimmed, in column order.
pub type ParsedLine = Vec<String>;

const QUOTE: char = '"';
const SEPARATOR: char = ',';

/// Split one line into fields.
///
/// A `"` toggles quoted mode and is never emitted; commas inside quotes stay
/// part of the field. Doubled quotes are not treated as an escape, and an
/// unbalanced quote simply leaves the rest of the line quoted. The final
/// field is always pushed, so an empty line yields a single empty field.
pub fn tokenize(line: &str) -> ParsedLine {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            SEPARATOR if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
