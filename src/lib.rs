//! # MININEC BASIC
//!
//! A GW-BASIC compatible interpreter for running legacy line-numbered
//! programs, in particular the MININEC antenna analysis code, without
//! a DOS emulator.
//!
//! Run a program with `mbasic program.bas`. Console input can be
//! scripted with `-i answers.txt`, in which case each prompt and
//! answer is echoed to the output so a run can be compared against a
//! reference transcript.
//!
//! The interpreter is also usable as a library:
//! ```
//! use mbasic::mach::{Config, Event, Headless, Listing, Program, Runtime};
//!
//! let mut listing = Listing::new();
//! listing.load_str("10 PRINT 1+1\n");
//! let program = Program::compile(&listing);
//! let screen = Headless::new(Box::new(std::io::sink()));
//! let mut runtime = Runtime::new(program, Box::new(screen), Config::default());
//! while runtime.execute(100) != Event::Stopped {}
//! assert!(!runtime.is_failed());
//! ```

pub mod lang;
pub mod mach;
pub mod term;
