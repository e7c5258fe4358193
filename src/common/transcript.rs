//! Structured record of one demonstration run.
//!
//! A demonstration appends [`Step`]s while it executes intrinsics; the runner
//! renders the finished [`Transcript`] through its `Display` impl, and tests
//! look lane values up by label.
//!
//! Rendering follows the console helpers the tour is modelled on:
//!
//! - [`Step::Register`]: the label, then `Values: a b c d`
//! - [`Step::Array`]: the label directly followed by `a, b, c`
//! - [`Step::Vector`]: `label: [ a, b, c ]`
//! - [`Step::Listing`]: `label: a b c`

use crate::common::lanes::Lanes;
use std::fmt;

/// One line (or pair of lines) of demonstration output.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Section header, rendered as a blank line then `[title]`
    Heading(String),
    /// Free-form explanatory line
    Note(String),
    /// Register contents, `print_m128` style
    Register { label: String, lanes: Lanes },
    /// Memory contents, `print_array` style
    Array { label: String, lanes: Lanes },
    /// Byte-vector contents in brackets
    Vector { label: String, lanes: Lanes },
    /// Space-separated listing of lanes
    Listing { label: String, lanes: Lanes },
    /// Mask register bits, lane 0 rightmost
    Mask { label: String, bits: u64, width: u32 },
}

impl Step {
    /// The label of a lane-carrying step.
    pub fn label(&self) -> Option<&str> {
        match self {
            Step::Register { label, .. }
            | Step::Array { label, .. }
            | Step::Vector { label, .. }
            | Step::Listing { label, .. }
            | Step::Mask { label, .. } => Some(label),
            Step::Heading(_) | Step::Note(_) => None,
        }
    }

    /// The lanes of a lane-carrying step.
    pub fn lanes(&self) -> Option<&Lanes> {
        match self {
            Step::Register { lanes, .. }
            | Step::Array { lanes, .. }
            | Step::Vector { lanes, .. }
            | Step::Listing { lanes, .. } => Some(lanes),
            _ => None,
        }
    }
}

/// Everything one demonstration printed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    title: String,
    steps: Vec<Step>,
}

impl Transcript {
    /// Start an empty transcript.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn heading(&mut self, title: impl Into<String>) -> &mut Self {
        let title = title.into();
        log::debug!("{}: {}", self.title, title);
        self.steps.push(Step::Heading(title));
        self
    }

    pub fn note(&mut self, text: impl Into<String>) -> &mut Self {
        self.steps.push(Step::Note(text.into()));
        self
    }

    pub fn register(&mut self, label: impl Into<String>, lanes: impl Into<Lanes>) -> &mut Self {
        self.steps.push(Step::Register {
            label: label.into(),
            lanes: lanes.into(),
        });
        self
    }

    pub fn array(&mut self, label: impl Into<String>, lanes: impl Into<Lanes>) -> &mut Self {
        self.steps.push(Step::Array {
            label: label.into(),
            lanes: lanes.into(),
        });
        self
    }

    pub fn vector(&mut self, label: impl Into<String>, lanes: impl Into<Lanes>) -> &mut Self {
        self.steps.push(Step::Vector {
            label: label.into(),
            lanes: lanes.into(),
        });
        self
    }

    pub fn listing(&mut self, label: impl Into<String>, lanes: impl Into<Lanes>) -> &mut Self {
        self.steps.push(Step::Listing {
            label: label.into(),
            lanes: lanes.into(),
        });
        self
    }

    pub fn mask(&mut self, label: impl Into<String>, bits: u64, width: u32) -> &mut Self {
        self.steps.push(Step::Mask {
            label: label.into(),
            bits,
            width,
        });
        self
    }

    /// Lanes of the first step whose label matches, ignoring surrounding whitespace.
    pub fn lanes(&self, label: &str) -> Option<&Lanes> {
        self.steps
            .iter()
            .find(|step| step.label().is_some_and(|l| l.trim() == label))
            .and_then(Step::lanes)
    }

    /// Lanes of the last step whose label matches.
    pub fn last_lanes(&self, label: &str) -> Option<&Lanes> {
        self.steps
            .iter()
            .rev()
            .find(|step| step.label().is_some_and(|l| l.trim() == label))
            .and_then(Step::lanes)
    }

    /// Bits of the first mask step whose label matches.
    pub fn mask_bits(&self, label: &str) -> Option<u64> {
        self.steps.iter().find_map(|step| match step {
            Step::Mask { label: l, bits, .. } if l.trim() == label => Some(*bits),
            _ => None,
        })
    }

    /// Whether any heading or note contains `text`.
    pub fn mentions(&self, text: &str) -> bool {
        self.steps.iter().any(|step| match step {
            Step::Heading(s) | Step::Note(s) => s.contains(text),
            _ => false,
        })
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.title)?;
        let mut buf = String::with_capacity(128);
        for step in &self.steps {
            buf.clear();
            match step {
                Step::Heading(title) => {
                    buf.push('\n');
                    buf.push('[');
                    buf.push_str(title);
                    buf.push(']');
                },
                Step::Note(text) => buf.push_str(text),
                Step::Register { label, lanes } => {
                    if !label.is_empty() {
                        buf.push_str(label);
                        buf.push('\n');
                    }
                    buf.push_str("Values: ");
                    lanes.write_joined(&mut buf, " ");
                },
                Step::Array { label, lanes } => {
                    buf.push_str(label);
                    lanes.write_joined(&mut buf, ", ");
                },
                Step::Vector { label, lanes } => {
                    buf.push_str(label);
                    buf.push_str(": [ ");
                    lanes.write_joined(&mut buf, ", ");
                    buf.push_str(" ]");
                },
                Step::Listing { label, lanes } => {
                    buf.push_str(label);
                    buf.push_str(": ");
                    lanes.write_joined(&mut buf, " ");
                },
                Step::Mask { label, bits, width } => {
                    buf.push_str(label);
                    buf.push_str(": 0b");
                    for lane in (0..*width).rev() {
                        buf.push(if (*bits >> lane) & 1 == 1 { '1' } else { '0' });
                    }
                },
            }
            writeln!(f, "{}", buf)?;
        }
        Ok(())
    }
}
