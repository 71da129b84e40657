/*!
## Rust Machine Module

This Rust module loads, compiles and runs BASIC programs.

*/

use crate::lang::LineNumber;

mod control;
mod file;
mod format;
mod function;
mod listing;
mod mbf;
mod operation;
mod program;
mod runtime;
mod screen;
mod stack;
mod using;
mod val;
mod var;

pub use control::Context;
pub use file::Files;
pub use format::format_float;
pub use function::Function;
pub use listing::Listing;
pub use mbf::MbfFloat;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use screen::{Coord, Headless, Screen};
pub(crate) use stack::Stack;
pub use using::PrintUsing;
pub use val::Val;
pub use var::Var;

/// Tab stops used by PRINT with commas.
pub const DEFAULT_TABS: [usize; 4] = [14, 28, 42, 56];

/// Settings a front end passes to the runtime.
#[derive(Debug, Clone)]
pub struct Config {
    pub tabs: Vec<usize>,
    pub break_line: Option<LineNumber>,
    pub cycles: usize,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tabs: DEFAULT_TABS.to_vec(),
            break_line: None,
            cycles: 5000,
            seed: 0,
        }
    }
}
