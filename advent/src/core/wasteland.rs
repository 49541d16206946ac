//! Left/right instruction walks over a named node network.
//!
//! [`Network::traverse_parallel`] runs one thread per walker in lock-step
//! rounds. Each worker owns its walker; the only shared state is one arrival
//! flag per walker plus an abort flag, read between two barrier waits so every
//! worker sees the same termination decision in the same round.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Barrier, LazyLock};
use std::thread;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::WastelandError;

/// One instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// The two successors of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fork {
    pub left: String,
    pub right: String,
}

/// Instructions plus nodes keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    instructions: Vec<Turn>,
    nodes: BTreeMap<String, Fork>,
}

static NODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*=\s*\((\w+),\s*(\w+)\)$").unwrap());

impl Network {
    /// Parse an `LR...` instruction line followed by `AAA = (BBB, CCC)` lines.
    pub fn parse(input: &str) -> Result<Self, WastelandError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()));

        let instructions = match lines.next() {
            Some((_, line)) if !line.is_empty() => parse_instructions(line)?,
            _ => return Err(WastelandError::MissingInstructions),
        };

        let mut nodes = BTreeMap::new();
        for (number, line) in lines {
            if line.is_empty() {
                continue;
            }
            let caps = NODE_RE
                .captures(line)
                .ok_or_else(|| WastelandError::InvalidNode {
                    line: number,
                    text: line.to_string(),
                })?;
            nodes.insert(
                caps[1].to_string(),
                Fork {
                    left: caps[2].to_string(),
                    right: caps[3].to_string(),
                },
            );
        }

        debug!(
            instructions = instructions.len(),
            nodes = nodes.len(),
            "parsed network"
        );
        Ok(Self {
            instructions,
            nodes,
        })
    }

    pub fn instructions(&self) -> &[Turn] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn fork(&self, name: &str) -> Option<&Fork> {
        self.nodes.get(name)
    }

    /// Steps from `start` to `end`, following instructions cyclically.
    pub fn traverse_single(
        &self,
        start: &str,
        end: &str,
        max_steps: usize,
    ) -> Result<usize, WastelandError> {
        let start = self.node(start)?;
        if start == end {
            return Ok(0);
        }
        self.steps_until(start, max_steps, |name| name == end)
    }

    /// Walk every node ending in `start_suffix` at once, one thread per walker.
    ///
    /// Returns the first round after which every walker stands on a node ending
    /// in `end_suffix`. Walkers always take at least one step.
    pub fn traverse_parallel(
        &self,
        start_suffix: &str,
        end_suffix: &str,
        max_steps: usize,
    ) -> Result<usize, WastelandError> {
        let starts = self.starts(start_suffix)?;
        debug!(walkers = starts.len(), "starting parallel walk");

        let barrier = Barrier::new(starts.len());
        let arrived: Vec<AtomicBool> = starts.iter().map(|_| AtomicBool::new(false)).collect();
        let aborted = AtomicBool::new(false);
        let shared = Lockstep {
            barrier: &barrier,
            arrived: &arrived,
            aborted: &aborted,
        };

        let outcomes: Vec<Result<Option<usize>, WastelandError>> = thread::scope(|scope| {
            let workers: Vec<_> = starts
                .iter()
                .enumerate()
                .map(|(index, start)| {
                    let shared = &shared;
                    scope.spawn(move || self.walk(index, start, end_suffix, max_steps, shared))
                })
                .collect();
            workers
                .into_iter()
                .map(|worker| match worker.join() {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut finished = None;
        for outcome in outcomes {
            if let Some(steps) = outcome? {
                finished = Some(steps);
            }
        }
        finished.ok_or(WastelandError::StepLimit { limit: max_steps })
    }

    /// Steps until all walkers align, combining each walker's first arrival by
    /// least common multiple.
    ///
    /// Matches [`Network::traverse_parallel`] when every walker cycles back to
    /// its first end node with a period equal to its first arrival, which holds
    /// for puzzle inputs.
    pub fn cycle_steps(
        &self,
        start_suffix: &str,
        end_suffix: &str,
        max_steps: usize,
    ) -> Result<usize, WastelandError> {
        let mut combined = 1usize;
        for start in self.starts(start_suffix)? {
            let steps = self.steps_until(start, max_steps, |name| name.ends_with(end_suffix))?;
            trace!(start, steps, "walker first arrival");
            combined = lcm(combined, steps).ok_or(WastelandError::CycleOverflow)?;
        }
        Ok(combined)
    }

    /// One lock-step worker. `Ok(None)` means the walk ended without this worker
    /// finding the answer.
    fn walk(
        &self,
        index: usize,
        start: &str,
        end_suffix: &str,
        max_steps: usize,
        shared: &Lockstep<'_>,
    ) -> Result<Option<usize>, WastelandError> {
        let mut current = start;
        for step in 0..max_steps {
            let failure = match self.next(current, step) {
                Ok(next) => {
                    current = next;
                    shared.arrived[index].store(next.ends_with(end_suffix), Ordering::Release);
                    None
                }
                Err(err) => {
                    shared.aborted.store(true, Ordering::Release);
                    Some(err)
                }
            };

            shared.barrier.wait();
            let done = shared
                .arrived
                .iter()
                .all(|flag| flag.load(Ordering::Acquire));
            let aborted = shared.aborted.load(Ordering::Acquire);
            shared.barrier.wait();

            if let Some(err) = failure {
                return Err(err);
            }
            if aborted {
                return Ok(None);
            }
            if done {
                if index == 0 {
                    debug!(steps = step + 1, "all walkers arrived");
                }
                return Ok(Some(step + 1));
            }
        }
        Ok(None)
    }

    fn starts(&self, suffix: &str) -> Result<Vec<&str>, WastelandError> {
        let starts: Vec<&str> = self
            .nodes
            .keys()
            .filter(|name| name.ends_with(suffix))
            .map(String::as_str)
            .collect();
        if starts.is_empty() {
            return Err(WastelandError::NoWalkers {
                suffix: suffix.to_string(),
            });
        }
        Ok(starts)
    }

    fn steps_until<'a>(
        &'a self,
        start: &'a str,
        max_steps: usize,
        done: impl Fn(&str) -> bool,
    ) -> Result<usize, WastelandError> {
        let mut current = start;
        for step in 0..max_steps {
            current = self.next(current, step)?;
            if done(current) {
                return Ok(step + 1);
            }
        }
        Err(WastelandError::StepLimit { limit: max_steps })
    }

    /// Name of the node reached from `from` by the instruction for `step`.
    fn next<'a>(&'a self, from: &str, step: usize) -> Result<&'a str, WastelandError> {
        let fork = self
            .nodes
            .get(from)
            .ok_or_else(|| WastelandError::NodeNotFound {
                name: from.to_string(),
            })?;
        let target = match self.instructions[step % self.instructions.len()] {
            Turn::Left => &fork.left,
            Turn::Right => &fork.right,
        };
        self.node(target)
    }

    fn node(&self, name: &str) -> Result<&str, WastelandError> {
        self.nodes
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| WastelandError::NodeNotFound {
                name: name.to_string(),
            })
    }
}

/// State shared by the lock-step workers.
struct Lockstep<'a> {
    barrier: &'a Barrier,
    arrived: &'a [AtomicBool],
    aborted: &'a AtomicBool,
}

fn parse_instructions(line: &str) -> Result<Vec<Turn>, WastelandError> {
    line.chars()
        .enumerate()
        .map(|(column, symbol)| match symbol {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            _ => Err(WastelandError::InvalidInstruction { column, symbol }),
        })
        .collect()
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: usize, b: usize) -> Option<usize> {
    (a / gcd(a, b)).checked_mul(b)
}
