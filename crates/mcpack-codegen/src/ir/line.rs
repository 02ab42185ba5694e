//! Rendered command lines.
//!
//! A [`Line`] is one line of a function file. References to other functions
//! are kept as [`Segment::Ref`] keys instead of identifier text, so renaming
//! never rewrites strings and reference counting matches whole references
//! only. Adjacent text segments are always merged, which keeps shape checks
//! like "exactly `function <id>`" a plain slice match.

use std::fmt::Write;

use mcpack_common::Identifier;

const EXECUTE_PREFIX: &str = "execute ";
const RUN_FUNCTION_SUFFIX: &str = " run function ";
const FUNCTION_KEYWORD: &str = "function ";

/// Identity of a function declaration within one build, assigned in
/// discovery order starting from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionKey(pub u32);

impl FunctionKey {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Ref(FunctionKey),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut line = Self::new();
        line.push_text(text);
        line
    }

    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Text(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Text(text.to_string())),
        }
    }

    pub fn push_ref(&mut self, key: FunctionKey) {
        self.segments.push(Segment::Ref(key));
    }

    pub fn push_segment(&mut self, segment: &Segment) {
        match segment {
            Segment::Text(text) => self.push_text(text),
            Segment::Ref(key) => self.push_ref(*key),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every function referenced by this line, in order, with repeats.
    pub fn references(&self) -> impl Iterator<Item = FunctionKey> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Ref(key) => Some(*key),
            Segment::Text(_) => None,
        })
    }

    pub fn count_references(&self, key: FunctionKey) -> usize {
        self.references().filter(|k| *k == key).count()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        matches!(self.segments.first(), Some(Segment::Text(text)) if text.starts_with(prefix))
    }

    pub fn is_comment(&self) -> bool {
        self.starts_with("#")
    }

    /// True for lines holding nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Text(text) if text.trim().is_empty()))
    }

    /// The target of a line that is exactly `function <id>`.
    pub fn call_target(&self) -> Option<FunctionKey> {
        match self.segments.as_slice() {
            [Segment::Text(text), Segment::Ref(key)] if text == FUNCTION_KEYWORD => Some(*key),
            _ => None,
        }
    }

    /// The target of a line shaped `execute <anything> run function <id>`.
    pub fn execute_call_target(&self) -> Option<FunctionKey> {
        let (Segment::Ref(key), rest) = self.segments.split_last()? else {
            return None;
        };
        let Some(Segment::Text(tail)) = rest.last() else {
            return None;
        };
        let Some(Segment::Text(head)) = rest.first() else {
            return None;
        };
        if !tail.ends_with(RUN_FUNCTION_SUFFIX) || !head.starts_with(EXECUTE_PREFIX) {
            return None;
        }
        // With a single text segment the prefix and suffix must not overlap.
        if rest.len() == 1 && head.len() < EXECUTE_PREFIX.len() + RUN_FUNCTION_SUFFIX.len() {
            return None;
        }
        Some(*key)
    }

    /// Rewrite `execute <anything> run function <key>` into
    /// `execute <anything> run <body>`. Returns `None` when this line is not
    /// an execute call of `key`.
    pub fn inline_execute_call(&self, key: FunctionKey, body: &Line) -> Option<Line> {
        if self.execute_call_target()? != key {
            return None;
        }
        let split = self.segments.len() - 2;
        let mut line = Line::new();
        for segment in &self.segments[..split] {
            line.push_segment(segment);
        }
        if let Segment::Text(tail) = &self.segments[split] {
            line.push_text(&tail[..tail.len() - FUNCTION_KEYWORD.len()]);
        }
        for segment in body.trimmed().segments() {
            line.push_segment(segment);
        }
        Some(line)
    }

    /// Copy of this line with leading and trailing whitespace removed.
    pub fn trimmed(&self) -> Line {
        let mut segments = self.segments.clone();
        if let Some(Segment::Text(first)) = segments.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(Segment::Text(last)) = segments.last_mut() {
            *last = last.trim_end().to_string();
        }
        segments.retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
        Line { segments }
    }

    /// Produce the final text, resolving each reference through `name_of`.
    pub fn render<'a>(&self, name_of: impl Fn(FunctionKey) -> &'a Identifier) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Ref(key) => {
                    let _ = write!(out, "{}", name_of(*key));
                }
            }
        }
        out
    }
}

/// Strip leading and trailing blank lines, then trim the remaining edges.
pub fn trim_body(lines: &[Line]) -> Vec<Line> {
    let Some(start) = lines.iter().position(|line| !line.is_blank()) else {
        return Vec::new();
    };
    let end = lines
        .iter()
        .rposition(|line| !line.is_blank())
        .unwrap_or(start);
    let mut body: Vec<Line> = lines[start..=end].to_vec();
    let last = body.len() - 1;
    for (i, line) in body.iter_mut().enumerate() {
        let mut segments = std::mem::take(&mut line.segments);
        if i == 0 {
            if let Some(Segment::Text(first)) = segments.first_mut() {
                *first = first.trim_start().to_string();
            }
        }
        if i == last {
            if let Some(Segment::Text(text)) = segments.last_mut() {
                *text = text.trim_end().to_string();
            }
        }
        segments.retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
        line.segments = segments;
    }
    body
}
