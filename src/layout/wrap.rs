use super::document::Font;
use super::metrics::text_width;

/// Splits `text` into lines no wider than `max_width` millimetres.
///
/// Explicit newlines always start a new line (blank ones are kept). Words are
/// packed greedily; a single word wider than the line is broken between
/// characters. Empty input yields one empty line.
pub fn wrap_text(text: &str, max_width: f32, font: Font, size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if !current.is_empty() {
                let candidate = format!("{current} {word}");
                if text_width(&candidate, font, size) <= max_width {
                    current = candidate;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, font, size) <= max_width {
                current.push_str(word);
            } else {
                let mut pieces = break_word(word, max_width, font, size);
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current = last;
                }
            }
        }

        lines.push(current);
    }

    lines
}

fn break_word(word: &str, max_width: f32, font: Font, size: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && text_width(&piece, font, size) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 170.0;

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("Desenvolvimento de software", WIDTH, Font::Helvetica, 10.0);
        assert_eq!(lines, vec!["Desenvolvimento de software"]);
    }

    #[test]
    fn test_long_text_respects_width() {
        let text = "Prestação de serviços de manutenção elétrica predial ".repeat(12);
        let lines = wrap_text(&text, WIDTH, Font::Helvetica, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Helvetica, 10.0) <= WIDTH);
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_newlines_are_preserved() {
        let lines = wrap_text("primeira\n\nterceira", WIDTH, Font::Helvetica, 10.0);
        assert_eq!(lines, vec!["primeira", "", "terceira"]);
    }

    #[test]
    fn test_oversized_word_is_broken() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 50.0, Font::Helvetica, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, Font::Helvetica, 10.0) <= 50.0);
        }
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap_text("", WIDTH, Font::Helvetica, 10.0), vec![String::new()]);
    }
}
