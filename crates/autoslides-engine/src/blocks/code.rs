use std::fmt;

use super::{CompositeBlock, Head};
use crate::components::CodeLine;

const FENCE: &str = "```";

/// A fenced code block, split line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    language: String,
    lines: Vec<CodeLine>,
}

impl CodeBlock {
    pub fn new(language: &str, code: &str) -> Self {
        // The parser keeps the newline that precedes the closing fence.
        let body = code.strip_suffix('\n').unwrap_or(code);
        let lines = if code.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(CodeLine::new).collect()
        };
        Self {
            language: language.to_string(),
            lines,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn fenced(&self, lines: &[CodeLine]) -> String {
        let mut md = format!("{FENCE}{}\n", self.language);
        for line in lines {
            md.push_str(&format!("{line}\n"));
        }
        md.push_str(FENCE);
        md
    }
}

impl CompositeBlock for CodeBlock {
    type Part = CodeLine;

    fn components(&self) -> &[CodeLine] {
        &self.lines
    }

    fn slide_content(&self, components: &[CodeLine], head: &Head) -> String {
        head.heading_line() + &self.fenced(components)
    }
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fenced(&self.lines))
    }
}
