//! Result sink: the answer as a bare integer, or one JSON object per line.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::input::Puzzle;

/// A computed answer, tagged with what was asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub puzzle: Puzzle,
    /// Which quantity `answer` is, e.g. `lowest-location` or `enclosed-area`.
    pub question: &'static str,
    pub answer: i64,
}

impl Answer {
    /// Build from any unsigned count, failing if it does not fit in `i64`.
    pub fn from_count(puzzle: Puzzle, question: &'static str, count: usize) -> Result<Self> {
        let answer = i64::try_from(count)
            .with_context(|| format!("{puzzle} {question} {count} does not fit in i64"))?;
        Ok(Self {
            puzzle,
            question,
            answer,
        })
    }
}

pub fn render(answer: &Answer, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(answer).context("serialize answer");
    }
    Ok(answer.answer.to_string())
}

pub fn emit(out: &mut impl Write, answer: &Answer, json: bool) -> Result<()> {
    let line = render(answer, json)?;
    writeln!(out, "{line}").context("write answer")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer() -> Answer {
        Answer {
            puzzle: Puzzle::Almanac,
            question: "lowest-location",
            answer: 35,
        }
    }

    #[test]
    fn renders_bare_number_by_default() {
        assert_eq!(render(&answer(), false).expect("render"), "35");
    }

    #[test]
    fn renders_json_object() {
        assert_eq!(
            render(&answer(), true).expect("render"),
            r#"{"puzzle":"almanac","question":"lowest-location","answer":35}"#
        );
    }

    #[test]
    fn emit_appends_newline() {
        let mut out = Vec::new();
        emit(&mut out, &answer(), false).expect("emit");
        assert_eq!(out, b"35\n");
    }
}
