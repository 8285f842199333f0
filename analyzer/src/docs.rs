/// Extract the leading comment documentation for a top-level form.
///
/// Scans the raw text strictly between the previous top-level form's end
/// offset (`None` for the first form, meaning the start of the document) and
/// the current form's start offset. Lines whose trimmed content begins with
/// `;;` or `;` are stripped of the comment prefix, trimmed, and joined with
/// `\n` in source order. Absence of documentation is not a failure: the
/// result is simply empty. Offsets are clamped, so the function is total.
pub fn extract_docs(text: &str, prev_end: Option<usize>, start: usize) -> String {
    let lo = prev_end.unwrap_or(0).min(text.len());
    let hi = start.min(text.len());
    if lo >= hi {
        return String::new();
    }
    let Some(gap) = text.get(lo..hi) else {
        // Offsets landing inside a UTF-8 sequence; treat as undocumented.
        return String::new();
    };

    let mut lines: Vec<&str> = Vec::new();
    for line in gap.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(';') {
            lines.push(trimmed.trim_start_matches(';').trim());
        }
    }
    lines.join("\n")
}
