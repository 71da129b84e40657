use super::Stack;
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::{Error, Ident, LineKey};
use std::cell::Cell;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Where execution continues. A whole line, or one statement of a
/// colon separated list or inline IF branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    Line(LineKey),
    List {
        line: LineKey,
        list: Rc<[Statement]>,
        index: usize,
    },
}

impl Context {
    pub fn line(&self) -> LineKey {
        match self {
            Context::Line(line) | Context::List { line, .. } => *line,
        }
    }
}

#[derive(Debug)]
pub struct ForFrame {
    pub condition: bool,
    pub var: Ident,
    pub count: f64,
    pub to: f64,
    pub step: f64,
    pub start: Option<Context>,
}

impl ForFrame {
    pub fn in_range(&self) -> bool {
        (self.step > 0.0 && self.count <= self.to) || (self.step < 0.0 && self.count >= self.to)
    }
}

#[derive(Debug)]
pub struct WhileFrame {
    pub condition: bool,
    pub guard: Rc<Expression>,
    pub start: Option<Context>,
}

#[derive(Debug)]
pub struct IfFrame {
    pub condition: bool,
    pub seen_else: bool,
}

#[derive(Debug)]
pub enum Frame {
    For(ForFrame),
    While(WhileFrame),
    If(IfFrame),
}

impl Frame {
    pub fn condition(&self) -> bool {
        match self {
            Frame::For(f) => f.condition,
            Frame::While(f) => f.condition,
            Frame::If(f) => f.condition,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Frame::For(_) => "FOR",
            Frame::While(_) => "WHILE",
            Frame::If(_) => "IF",
        }
    }
}

/// ## Block structure stack
///
/// Statements outside flow control run only while every frame holds a
/// true condition. The conjunction is cached until the next push, pop
/// or ELSE.

#[derive(Debug)]
pub struct ExecStack {
    frames: Stack<Frame>,
    condition: Cell<Option<bool>>,
}

impl Default for ExecStack {
    fn default() -> ExecStack {
        ExecStack {
            frames: Stack::new("BLOCKS NESTED TOO DEEPLY"),
            condition: Cell::new(Some(true)),
        }
    }
}

impl ExecStack {
    pub fn new() -> ExecStack {
        ExecStack::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn exec_condition(&self) -> bool {
        match self.condition.get() {
            Some(c) => c,
            None => {
                let c = self.frames.iter().all(Frame::condition);
                self.condition.set(Some(c));
                c
            }
        }
    }

    pub fn push(&mut self, frame: Frame) -> Result<()> {
        self.condition.set(None);
        self.frames.push(frame)
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.condition.set(None);
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    /// Depth of the FOR frame for `var` among the FOR frames on top of
    /// the stack. Zero is the top frame.
    pub fn find_for(&self, var: &Ident) -> Option<usize> {
        for (depth, frame) in self.frames.iter().enumerate() {
            match frame {
                Frame::For(f) if &f.var == var => return Some(depth),
                Frame::For(_) => continue,
                _ => return None,
            }
        }
        None
    }

    pub fn handle_else(&mut self) -> Result<()> {
        self.condition.set(None);
        match self.frames.last_mut() {
            Some(Frame::If(f)) => {
                if f.seen_else {
                    return Err(error!(SyntaxError; "DUPLICATE ELSE"));
                }
                f.seen_else = true;
                f.condition = !f.condition;
                Ok(())
            }
            Some(frame) => Err(error!(SyntaxError; format!("ELSE IN UNTERMINATED {}", frame.describe()))),
            None => Err(error!(SyntaxError; "ELSE WITHOUT IF")),
        }
    }

    pub fn end_if(&mut self) -> Result<()> {
        match self.frames.last() {
            Some(Frame::If(_)) => {
                self.pop();
                Ok(())
            }
            Some(frame) => Err(error!(SyntaxError; format!("END IF IN UNTERMINATED {}", frame.describe()))),
            None => Err(error!(SyntaxError; "END IF WITHOUT IF")),
        }
    }

    /// Error for a NEXT or WEND that found the wrong frame on top.
    pub fn mismatch(&self, statement: &str) -> Option<String> {
        self.top()
            .map(|frame| format!("{} IN UNTERMINATED {} STATEMENT", statement, frame.describe()))
    }
}
