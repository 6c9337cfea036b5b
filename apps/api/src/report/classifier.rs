//! Tagged-line classifier for generated report text.
//!
//! A line is a section heading when it starts with `N.` and `1 <= N <= max_heading`.
//! Every other non-blank line is body text. Blank lines carry no content and are dropped.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ReportLine {
    Heading(String),
    Body(String),
}

/// A heading and the body lines that follow it up to the next heading.
/// Body text before the first heading lands in a section with no heading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReportSection {
    pub heading: Option<String>,
    pub body: Vec<String>,
}

pub fn is_section_heading(line: &str, max_heading: u8) -> bool {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 3 || line.as_bytes().get(digits) != Some(&b'.') {
        return false;
    }
    match line[..digits].parse::<u16>() {
        Ok(n) => n >= 1 && n <= u16::from(max_heading),
        Err(_) => false,
    }
}

pub fn classify(text: &str, max_heading: u8) -> Vec<ReportLine> {
    text.lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if is_section_heading(line, max_heading) {
                ReportLine::Heading(line.to_string())
            } else {
                ReportLine::Body(line.to_string())
            }
        })
        .collect()
}

pub fn sections(lines: &[ReportLine]) -> Vec<ReportSection> {
    let mut out: Vec<ReportSection> = Vec::new();
    for line in lines {
        match line {
            ReportLine::Heading(text) => out.push(ReportSection {
                heading: Some(text.clone()),
                body: Vec::new(),
            }),
            ReportLine::Body(text) => match out.last_mut() {
                Some(section) => section.body.push(text.clone()),
                None => out.push(ReportSection {
                    heading: None,
                    body: vec![text.clone()],
                }),
            },
        }
    }
    out
}
