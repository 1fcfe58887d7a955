#![forbid(unsafe_code)]

//! JSONL trace of applied intro cues.
//!
//! [`IntroTrace`] records every cue the sequencer applies, with the host
//! time it was due and the table that scheduled it. Two runs of the page
//! with the same inputs produce byte-identical traces, which makes the trace
//! a cheap golden file for timeline regressions.
//!
//! # Schema (`folio-intro-trace-v1`)
//!
//! - **header**: schema version and word cloud seed. Always first.
//! - **cue**: `at_ms`, `cue`, `mode`. One per applied cue.
//! - **summary**: cue count. Always last; written by [`IntroTrace::to_jsonl`].

use std::fmt;

use folio_intro::Transition;
use serde::{Deserialize, Serialize};

/// Schema version written in the header record.
pub const SCHEMA_VERSION: &str = "folio-intro-trace-v1";

/// One line of the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceRecord {
    /// First line.
    Header {
        /// Always [`SCHEMA_VERSION`].
        schema_version: String,
        /// Seed the word cloud was generated from.
        seed: u64,
    },
    /// An applied cue.
    Cue {
        /// Host milliseconds since mount the cue was due.
        at_ms: u64,
        /// `Cue::as_str` of the applied cue.
        cue: String,
        /// `TimelineMode::as_str` of the scheduling table.
        mode: String,
    },
    /// Last line.
    Summary {
        /// Number of cue records.
        cues: u64,
    },
}

/// Recorded intro cues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroTrace {
    seed: u64,
    cues: Vec<TraceRecord>,
}

impl IntroTrace {
    /// Empty trace for a page seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            cues: Vec::new(),
        }
    }

    /// Append an applied cue.
    pub fn record(&mut self, transition: &Transition) {
        self.cues.push(TraceRecord::Cue {
            at_ms: u64::try_from(transition.at.as_millis()).unwrap_or(u64::MAX),
            cue: transition.cue.as_str().to_owned(),
            mode: transition.mode.as_str().to_owned(),
        });
    }

    /// Word cloud seed from the header.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of recorded cues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether no cue was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cue names in application order.
    #[must_use]
    pub fn cue_names(&self) -> Vec<&str> {
        self.cues
            .iter()
            .filter_map(|record| match record {
                TraceRecord::Cue { cue, .. } => Some(cue.as_str()),
                _ => None,
            })
            .collect()
    }

    /// `(at_ms, cue)` pairs in application order.
    #[must_use]
    pub fn timings(&self) -> Vec<(u64, &str)> {
        self.cues
            .iter()
            .filter_map(|record| match record {
                TraceRecord::Cue { at_ms, cue, .. } => Some((*at_ms, cue.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Serialize as JSONL, header first and summary last.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures (not expected for these records).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let header = TraceRecord::Header {
            schema_version: SCHEMA_VERSION.to_owned(),
            seed: self.seed,
        };
        let summary = TraceRecord::Summary {
            cues: self.cues.len() as u64,
        };
        let mut out = String::new();
        for record in std::iter::once(&header)
            .chain(&self.cues)
            .chain(std::iter::once(&summary))
        {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse and validate a JSONL trace.
    ///
    /// # Errors
    ///
    /// [`TraceParseError`] with the 1-based line number of the first bad
    /// record, or line 0 for whole-trace problems (missing summary).
    pub fn from_jsonl(input: &str) -> Result<Self, TraceParseError> {
        let mut seed = None;
        let mut cues = Vec::new();
        let mut summary = None;
        for (idx, line) in input.lines().enumerate() {
            let line_num = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if summary.is_some() {
                return Err(TraceParseError::new(line_num, "record after summary"));
            }
            let record: TraceRecord = serde_json::from_str(line)
                .map_err(|e| TraceParseError::new(line_num, e.to_string()))?;
            match record {
                TraceRecord::Header {
                    schema_version,
                    seed: s,
                } => {
                    if seed.is_some() || !cues.is_empty() {
                        return Err(TraceParseError::new(line_num, "header is not first"));
                    }
                    if schema_version != SCHEMA_VERSION {
                        return Err(TraceParseError::new(
                            line_num,
                            format!("unsupported schema {schema_version}"),
                        ));
                    }
                    seed = Some(s);
                }
                cue @ TraceRecord::Cue { .. } => {
                    if seed.is_none() {
                        return Err(TraceParseError::new(line_num, "missing header"));
                    }
                    cues.push(cue);
                }
                TraceRecord::Summary { cues: n } => {
                    if n != cues.len() as u64 {
                        return Err(TraceParseError::new(
                            line_num,
                            format!("summary counts {n} cues, trace has {}", cues.len()),
                        ));
                    }
                    summary = Some(n);
                }
            }
        }
        let seed = seed.ok_or_else(|| TraceParseError::new(0, "missing header"))?;
        if summary.is_none() {
            return Err(TraceParseError::new(0, "missing summary"));
        }
        Ok(Self { seed, cues })
    }
}

/// Error parsing a JSONL trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParseError {
    /// 1-based line, or 0 when the trace as a whole is malformed.
    pub line: usize,
    /// What went wrong.
    pub message: String,
}

impl TraceParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for TraceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for TraceParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_intro::{AnimationStage, Cue, TimelineMode};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn sample() -> IntroTrace {
        let mut trace = IntroTrace::new(7);
        trace.record(&Transition {
            at: Duration::from_millis(5000),
            cue: Cue::Advance(AnimationStage::FadingOut),
            mode: TimelineMode::Autoplay,
        });
        trace.record(&Transition {
            at: Duration::from_millis(9300),
            cue: Cue::Aurora,
            mode: TimelineMode::Autoplay,
        });
        trace
    }

    #[test]
    fn jsonl_layout() {
        let text = sample().to_jsonl().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(r#""event":"header""#));
        assert!(lines[0].contains(SCHEMA_VERSION));
        assert!(lines[1].contains(r#""at_ms":5000"#));
        assert!(lines[3].contains(r#""cues":2"#));
    }

    #[test]
    fn parse_accepts_own_output() {
        let trace = sample();
        let parsed = IntroTrace::from_jsonl(&trace.to_jsonl().unwrap()).unwrap();
        assert_eq!(parsed, trace);
        assert_eq!(parsed.seed(), 7);
    }

    #[test]
    fn parse_rejects_count_mismatch() {
        let text = sample().to_jsonl().unwrap().replace(r#""cues":2"#, r#""cues":3"#);
        let err = IntroTrace::from_jsonl(&text).unwrap_err();
        assert_eq!(err.line, 4);
    }

    #[test]
    fn parse_rejects_missing_summary() {
        let text = sample().to_jsonl().unwrap();
        let truncated: String = text.lines().take(3).map(|l| format!("{l}\n")).collect();
        let err = IntroTrace::from_jsonl(&truncated).unwrap_err();
        assert_eq!(err.to_string(), "line 0: missing summary");
    }

    #[test]
    fn parse_rejects_cue_before_header() {
        let text = r#"{"event":"cue","at_ms":0,"cue":"fading_out","mode":"skip"}"#;
        let err = IntroTrace::from_jsonl(text).unwrap_err();
        assert_eq!(err.line, 1);
    }
}
