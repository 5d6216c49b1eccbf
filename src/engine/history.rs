//! The reasoning history: cycle guard and derivation trace of one query.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{HprError, HprResult, NodeId};

use super::answer::TraceLine;

/// Every inference the reasoner can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Inference {
    /// Direct lookup followed by the operator fan-out.
    Recall,
    /// Argument generalization.
    Agen,
    Aspec,
    Asim,
    Adis,
    Asyn,
    Rgen,
    Rspec,
    Rsim,
    Rdis,
    Rsyn,
    Dgen,
    Dspec,
    Dsim,
    Ddis,
    Dsyn,
    /// Marked dependency on the descriptor.
    Ddep,
    /// Two-hop dependency closure.
    Tdep,
    /// Dependency-based analogy.
    Depa,
    /// Implication, full and partial.
    Dimp,
    Inverse,
    Ambiguation,
    Disambiguation,
    Abduction,
    Causality,
    Attribute,
}

impl Inference {
    /// Operators a configuration can switch on or off.
    ///
    /// TDEP only gates the transitive closures inside DEPA, DIMP and CAUSALITY.
    pub const OPERATORS: &'static [Inference] = &[
        Inference::Agen,
        Inference::Aspec,
        Inference::Asim,
        Inference::Adis,
        Inference::Asyn,
        Inference::Rgen,
        Inference::Rspec,
        Inference::Rsim,
        Inference::Rdis,
        Inference::Rsyn,
        Inference::Dgen,
        Inference::Dspec,
        Inference::Dsim,
        Inference::Ddis,
        Inference::Dsyn,
        Inference::Ddep,
        Inference::Tdep,
        Inference::Depa,
        Inference::Dimp,
        Inference::Inverse,
        Inference::Ambiguation,
        Inference::Disambiguation,
        Inference::Abduction,
        Inference::Causality,
        Inference::Attribute,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Recall => "RECALL",
            Self::Agen => "AGEN",
            Self::Aspec => "ASPEC",
            Self::Asim => "ASIM",
            Self::Adis => "ADIS",
            Self::Asyn => "ASYN",
            Self::Rgen => "RGEN",
            Self::Rspec => "RSPEC",
            Self::Rsim => "RSIM",
            Self::Rdis => "RDIS",
            Self::Rsyn => "RSYN",
            Self::Dgen => "DGEN",
            Self::Dspec => "DSPEC",
            Self::Dsim => "DSIM",
            Self::Ddis => "DDIS",
            Self::Dsyn => "DSYN",
            Self::Ddep => "DDEP",
            Self::Tdep => "TDEP",
            Self::Depa => "DEPA",
            Self::Dimp => "DIMP",
            Self::Inverse => "INVERSE",
            Self::Ambiguation => "AMBIGUATION",
            Self::Disambiguation => "DISAMBIGUATION",
            Self::Abduction => "ABDUCTION",
            Self::Causality => "CAUSALITY",
            Self::Attribute => "ATTRIBUTE",
        }
    }

    /// Parse a name as printed by [`Inference::name`], case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        std::iter::once(Self::Recall)
            .chain(Self::OPERATORS.iter().copied())
            .find(|i| i.name() == upper)
    }

    /// The inference that walks the same focus in the opposite vertical direction.
    pub fn turnover(&self) -> Option<Self> {
        match self {
            Self::Agen => Some(Self::Aspec),
            Self::Aspec => Some(Self::Agen),
            Self::Rgen => Some(Self::Rspec),
            Self::Rspec => Some(Self::Rgen),
            Self::Dgen => Some(Self::Dspec),
            Self::Dspec => Some(Self::Dgen),
            _ => None,
        }
    }
}

impl fmt::Display for Inference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Inference> for String {
    fn from(value: Inference) -> Self {
        value.name().to_string()
    }
}

impl TryFrom<String> for Inference {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Inference::from_name(&value).ok_or_else(|| format!("unknown inference '{value}'"))
    }
}

/// Identity of one active inference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    pub inference: Inference,
    pub descriptor: Option<NodeId>,
    pub argument: Option<NodeId>,
    pub referent: Option<NodeId>,
}

impl HistoryKey {
    pub fn new(
        inference: Inference,
        descriptor: Option<NodeId>,
        argument: Option<NodeId>,
        referent: Option<NodeId>,
    ) -> Self {
        Self {
            inference,
            descriptor,
            argument,
            referent,
        }
    }
}

/// Stack of active inference frames plus the derivation lines of the current path.
///
/// Trace lines beyond the configured cap are counted but not stored, so
/// pushes and pops stay balanced on deep paths.
#[derive(Debug, Clone)]
pub struct ReasoningHistory {
    frames: Vec<HistoryKey>,
    lines: Vec<TraceLine>,
    overflow: usize,
    max_lines: usize,
}

impl ReasoningHistory {
    pub fn new(max_lines: usize) -> Self {
        Self {
            frames: Vec::new(),
            lines: Vec::new(),
            overflow: 0,
            max_lines,
        }
    }

    /// Forget every frame and line.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.lines.clear();
        self.overflow = 0;
    }

    pub fn push(&mut self, key: HistoryKey) {
        self.frames.push(key);
    }

    /// Pop the top frame, which must be `key`.
    pub fn pop(&mut self, key: HistoryKey) -> HprResult<()> {
        match self.frames.last() {
            Some(top) if *top == key => {
                self.frames.pop();
                Ok(())
            }
            Some(top) => Err(HprError::InvariantViolation(format!(
                "history pop of {} while {} is on top",
                key.inference, top.inference
            ))),
            None => Err(HprError::InvariantViolation(format!(
                "history pop of {} on an empty stack",
                key.inference
            ))),
        }
    }

    /// Whether the exact frame is already active.
    pub fn contains(&self, key: &HistoryKey) -> bool {
        self.frames.iter().any(|f| f == key)
    }

    /// Whether any active frame uses `inference`.
    pub fn contains_kind(&self, inference: Inference) -> bool {
        self.frames.iter().any(|f| f.inference == inference)
    }

    /// Number of active frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push_line(&mut self, line: TraceLine) {
        if self.lines.len() >= self.max_lines {
            self.overflow += 1;
        } else {
            log::trace!("{}", line);
            self.lines.push(line);
        }
    }

    pub fn pop_lines(&mut self, count: usize) {
        for _ in 0..count {
            if self.overflow > 0 {
                self.overflow -= 1;
            } else {
                self.lines.pop();
            }
        }
    }

    /// The stored derivation lines of the current path.
    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }
}
