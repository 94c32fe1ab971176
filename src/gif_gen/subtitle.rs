/// Breaks a paragraph into caption lines.
///
/// The text is cut into sentences at every `.`, and any sentence longer than
/// `max_len` characters is wrapped at the last whitespace that keeps the line
/// within `max_len`. A sentence with no such whitespace is cut hard at
/// `max_len`. Empty sentences (e.g. after a trailing period) produce no line.
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut lines = Vec::default();

    for sentence in text.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        let mut rest = sentence;

        while rest.chars().count() > max_len {
            let (line, tail) = rest.split_at(break_point(rest, max_len));
            lines.push(line.trim_end().to_owned());
            rest = tail.trim_start();
        }

        lines.push(rest.to_owned());
    }

    lines
}

/// Byte offset to cut `text` at. `text` must be longer than `max_len` chars
/// and must not start with whitespace.
fn break_point(text: &str, max_len: usize) -> usize {
    let window: Vec<(usize, char)> = text.char_indices().take(max_len + 1).collect();

    window
        .iter()
        .skip(1)
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, _)| *idx)
        .unwrap_or(window[max_len].0)
}
