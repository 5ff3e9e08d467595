//! Tracing infrastructure for debugging grammar evaluation.
//!
//! The evaluator is generic over [`Tracer`]. With [`NoopTracer`] every hook
//! is an `#[inline(always)]` empty function and the calls compile away, so
//! plain parsing pays nothing for the debugger. [`DebugTracer`] records a
//! tree of frames (one per evaluated expectation, plus one per `either`
//! branch and `repeated` iteration) and renders it as indented text.
//!
//! The tracer only observes. Results are passed to it by reference after
//! the evaluator has already decided them.

use crate::error::ParseError;
use crate::eval::ExpectationResult;
use crate::expectation::Expectation;
use crate::value::short_type_name;

/// Verbosity level for rendered trees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Titles, outcomes and stored values.
    #[default]
    Default,
    /// Also the token index each expectation started at.
    Verbose,
}

/// Escape sequences used by [`DebugTracer::render`], keyed by what they mark.
///
/// [`Colors::OFF`] (the default) leaves every slot empty, so rendered text
/// carries no escapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub title: &'static str,
    pub matched: &'static str,
    pub failed: &'static str,
    pub value: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const ON: Self = Self {
        title: "\x1b[34m",
        matched: "\x1b[32m",
        failed: "\x1b[31m",
        value: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        title: "",
        matched: "",
        failed: "",
        value: "",
        reset: "",
    };
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

/// A nested evaluation that is not itself an expectation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    /// One alternative of an `either`, numbered from 1.
    Branch(usize),
    /// One pass over a `repeated` body, numbered from 1.
    Iteration(usize),
}

/// Hooks called by the evaluator.
///
/// Every `trace_enter` is matched by a `trace_exit` and every
/// `trace_enter_group` by a `trace_exit_group`, unless the parse aborts, in
/// which case `trace_abort` is called once with the fatal error.
pub trait Tracer {
    fn trace_enter(&mut self, expectation: &Expectation, index: usize);

    fn trace_exit(&mut self, expectation: &Expectation, result: &ExpectationResult);

    fn trace_enter_group(&mut self, group: Group, index: usize);

    fn trace_exit_group(&mut self, result: &ExpectationResult);

    fn trace_abort(&mut self, error: &ParseError);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _expectation: &Expectation, _index: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _expectation: &Expectation, _result: &ExpectationResult) {}

    #[inline(always)]
    fn trace_enter_group(&mut self, _group: Group, _index: usize) {}

    #[inline(always)]
    fn trace_exit_group(&mut self, _result: &ExpectationResult) {}

    #[inline(always)]
    fn trace_abort(&mut self, _error: &ParseError) {}
}

struct Frame {
    title: String,
    index: usize,
    children: Vec<Frame>,
    lines: Vec<String>,
}

/// Tracer that records the evaluation tree for display.
pub struct DebugTracer {
    verbosity: Verbosity,
    colors: Colors,
    /// Frames still being evaluated, innermost last.
    stack: Vec<Frame>,
    /// Completed top-level frames.
    roots: Vec<Frame>,
}

impl Default for DebugTracer {
    fn default() -> Self {
        Self::new(Verbosity::Default, Colors::OFF)
    }
}

impl DebugTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Render everything recorded so far, two spaces per nesting level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for frame in &self.roots {
            self.render_frame(frame, 0, &mut out);
        }
        out
    }

    /// Print the rendered tree to stderr.
    pub fn print(&self) {
        eprint!("{}", self.render());
    }

    fn render_frame(&self, frame: &Frame, depth: usize, out: &mut String) {
        let c = &self.colors;
        let indent = "  ".repeat(depth);
        out.push_str(&format!("{indent}{}{}{}", c.title, frame.title, c.reset));
        if self.verbosity == Verbosity::Verbose {
            out.push_str(&format!(" {}@{}{}", c.value, frame.index, c.reset));
        }
        out.push('\n');

        for child in &frame.children {
            self.render_frame(child, depth + 1, out);
        }
        for line in &frame.lines {
            out.push_str(&format!("{indent}  {line}\n"));
        }
    }

    fn open(&mut self, title: String, index: usize) {
        self.stack.push(Frame {
            title,
            index,
            children: Vec::new(),
            lines: Vec::new(),
        });
    }

    fn close(&mut self, lines: Vec<String>) {
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        frame.lines = lines;
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(frame),
            None => self.roots.push(frame),
        }
    }

    fn summary(&self, result: &ExpectationResult, with_stored: bool) -> Vec<String> {
        let c = &self.colors;
        match result {
            ExpectationResult::Success(success) => {
                let mut lines = vec![format!(
                    "{}✔{} matched tokens {}..{}",
                    c.matched, c.reset, success.matched.start, success.matched.end
                )];
                if with_stored {
                    for (key, value) in success.stored.iter() {
                        lines.push(format!(
                            "{}{}: {} = {:?}{}",
                            c.value,
                            key.name(),
                            short_type_name(value.type_name()),
                            value,
                            c.reset
                        ));
                    }
                }
                lines
            }
            ExpectationResult::DidNotMatch { message, index } => {
                vec![format!("{}✘{} {message} (at token {index})", c.failed, c.reset)]
            }
        }
    }
}

impl Tracer for DebugTracer {
    fn trace_enter(&mut self, expectation: &Expectation, index: usize) {
        self.open(expectation.to_string(), index);
    }

    fn trace_exit(&mut self, _expectation: &Expectation, result: &ExpectationResult) {
        let lines = self.summary(result, true);
        self.close(lines);
    }

    fn trace_enter_group(&mut self, group: Group, index: usize) {
        let title = match group {
            Group::Branch(n) => format!("Branch {n}"),
            Group::Iteration(n) => format!("Iteration {n}"),
        };
        self.open(title, index);
    }

    fn trace_exit_group(&mut self, result: &ExpectationResult) {
        let lines = self.summary(result, false);
        self.close(lines);
    }

    fn trace_abort(&mut self, error: &ParseError) {
        let c = self.colors;
        while !self.stack.is_empty() {
            self.close(vec![format!("{}✘{} aborted: {error}", c.failed, c.reset)]);
        }
    }
}
