//! Static text-width estimates for the report font.
//!
//! Widths are in em units (relative to font size). Hangul, CJK and other
//! full-width characters count as 1em; ASCII uses a coarse per-class table.
//! The estimates err wide so wrapped lines stay inside the margins.

// ────────────────────────────────────────────────────────────────────────────
// Page layout
// ────────────────────────────────────────────────────────────────────────────

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Geometry of a report page. Defaults: A4, 10mm margins, 12pt text on 10mm lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    /// Content never extends into this band at the bottom of the page.
    pub bottom_margin_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    /// Space after a heading.
    pub heading_gap_mm: f32,
    /// Space after a body paragraph.
    pub paragraph_gap_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 20.0,
            font_size_pt: 12.0,
            line_height_mm: 10.0,
            heading_gap_mm: 5.0,
            paragraph_gap_mm: 10.0,
        }
    }
}

impl PageLayout {
    pub fn em_mm(&self) -> f32 {
        self.font_size_pt * MM_PER_PT
    }

    /// Usable text width in em units.
    pub fn text_width_em(&self) -> f32 {
        (self.page_width_mm - 2.0 * self.margin_mm) / self.em_mm()
    }

    /// Lowest y (from the top) a line may end at.
    pub fn content_bottom_mm(&self) -> f32 {
        self.page_height_mm - self.bottom_margin_mm
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

pub const SPACE_WIDTH: f32 = 0.30;

pub fn char_width(c: char) -> f32 {
    match c {
        ' ' => SPACE_WIDTH,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | '`' => 0.30,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '{' | '}' | '-' | '/' | '\\' | '"' => 0.40,
        'm' | 'w' | '%' | '@' => 0.85,
        'M' | 'W' => 0.90,
        'A'..='Z' | '&' | '#' => 0.70,
        '0'..='9' | 'a'..='z' | '$' | '+' | '=' | '<' | '>' | '?' | '*' | '~' | '_' | '^' => 0.56,
        c if c.is_ascii() => 0.56,
        _ => 1.0,
    }
}

pub fn measure_str(s: &str) -> f32 {
    s.chars().map(char_width).sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap at `max_width_em`. Words wider than a full line are broken
/// between characters. Blank input yields no lines.
pub fn wrap(text: &str, max_width_em: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = measure_str(word);

        if word_w > max_width_em {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for c in word.chars() {
                let w = char_width(c);
                if !current.is_empty() && current_width + w > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + SPACE_WIDTH + word_w > max_width_em {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += SPACE_WIDTH + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_is_wider_than_ascii() {
        assert!(measure_str("가나다") > measure_str("abc"));
        assert_eq!(measure_str("가나다"), 3.0);
    }

    #[test]
    fn test_default_layout_sanity() {
        let layout = PageLayout::default();
        let width = layout.text_width_em();
        assert!(width > 40.0 && width < 50.0, "got {width}");
        assert!((layout.em_mm() - 4.233).abs() < 0.01);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap("짧은 문장입니다", 40.0), vec!["짧은 문장입니다".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width_and_keeps_words() {
        let text = "추천된 직무에 필요한 핵심 기술 및 능력을 꾸준히 개발하고 \
                    다음 단계에서 성과를 추적할 수 있는 방법을 함께 정리해 보세요";
        let lines = wrap(text, 20.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(measure_str(line) <= 20.0, "line too wide: {line:?}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_overlong_word_is_hard_broken() {
        let word = "가".repeat(25);
        let lines = wrap(&word, 10.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 10);
        assert_eq!(lines[2].chars().count(), 5);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap("   ", 10.0).is_empty());
    }
}
