extern crate ansi_term;
extern crate clap;
extern crate ctrlc;
extern crate linefeed;
use crate::error;
use crate::lang::Error;
use crate::mach::{Config, Event, Headless, Listing, Program, Runtime, Screen};
use ansi_term::Style;
use clap::Parser;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::fs::File;
use std::io::{BufReader, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runs a GW-BASIC program from a file.
#[derive(Parser, Debug)]
#[command(name = "mbasic", version, about)]
struct Args {
    /// BASIC source file
    program: PathBuf,

    /// Read INPUT lines from this file and echo them
    #[arg(short = 'i', long = "input-file")]
    input_file: Option<PathBuf>,

    /// Write console output to this file
    #[arg(long = "output-file")]
    output_file: Option<PathBuf>,

    /// Print the variables each time this line is reached
    #[arg(short = 'L', long = "break-line")]
    break_line: Option<u16>,

    /// Tab stop column for PRINT commas, may be repeated
    #[arg(short = 't', long = "tab")]
    tab: Vec<usize>,

    /// Console device
    #[arg(long, default_value = "none", value_parser = ["none"])]
    screen: String,
}

pub fn main() {
    let args = Args::parse();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let code = match main_loop(args, interrupted) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            1
        }
    };
    std::process::exit(code);
}

/// True when the program ended without a fatal error.
fn main_loop(args: Args, interrupted: Arc<AtomicBool>) -> Result<bool, Error> {
    let mut listing = Listing::new();
    listing.load_file(&args.program)?;
    let program = Program::compile(&listing);
    let mut config = Config::default();
    if !args.tab.is_empty() {
        config.tabs = args.tab.clone();
    }
    config.break_line = args.break_line;
    let cycles = config.cycles;
    let mut runtime = Runtime::new(program, console(&args)?, config);
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(cycles) {
            Event::Errors(errors) => {
                for error in errors.iter() {
                    eprintln!("{}", Style::new().bold().paint(error.to_string()));
                }
            }
            Event::Running => {}
            Event::Break(line) => {
                eprintln!("{}", Style::new().bold().paint(format!("BREAK AT {}", line)));
                for (name, val) in runtime.scalars() {
                    eprintln!("  {} = {}", name, val);
                }
            }
            Event::Stopped => break,
        }
    }
    Ok(!runtime.is_failed())
}

fn console(args: &Args) -> Result<Box<dyn Screen>, Error> {
    let out: Box<dyn Write> = match &args.output_file {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    if let Some(path) = &args.input_file {
        let input = BufReader::new(File::open(path)?);
        return Ok(Box::new(Headless::with_input(out, Box::new(input), true)));
    }
    if args.output_file.is_none() && std::io::stdin().is_terminal() {
        return Ok(Box::new(LineEditor::new()?));
    }
    let input = BufReader::new(std::io::stdin());
    Ok(Box::new(Headless::with_input(out, Box::new(input), false)))
}

/// Interactive console with line editing for INPUT.
struct LineEditor {
    interface: Interface<DefaultTerminal>,
    row: usize,
}

impl LineEditor {
    fn new() -> Result<LineEditor, Error> {
        let interface = Interface::new("mbasic")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(LineEditor { interface, row: 1 })
    }
}

impl Screen for LineEditor {
    fn print(&mut self, text: &str, end: &str) -> Result<(), Error> {
        self.row += text.matches('\n').count() + end.matches('\n').count();
        let mut out = std::io::stdout();
        out.write_all(text.as_bytes())?;
        out.write_all(end.as_bytes())?;
        Ok(())
    }

    fn input(&mut self, prompt: &str) -> Result<String, Error> {
        std::io::stdout().flush()?;
        self.interface.set_prompt(prompt)?;
        match self.interface.read_line()? {
            ReadResult::Input(string) => {
                self.row += 1;
                if !string.is_empty() {
                    self.interface.add_history_unique(string.clone());
                }
                Ok(string)
            }
            ReadResult::Signal(_) => Err(error!(Break)),
            ReadResult::Eof => Err(error!(InputPastEnd)),
        }
    }

    fn locate(&mut self, row: Option<usize>, _col: Option<usize>) -> Result<(), Error> {
        if let Some(row) = row {
            self.row = row;
        }
        std::io::stdout().write_all(b"\r")?;
        Ok(())
    }

    fn cls(&mut self, _mode: Option<i32>) -> Result<(), Error> {
        self.row = 1;
        Ok(())
    }

    fn csrlin(&self) -> usize {
        self.row
    }

    fn flush(&mut self) -> Result<(), Error> {
        std::io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let args =
            Args::try_parse_from(["mbasic", "-L", "100", "-t", "10", "-t", "20", "prog.bas"])
                .unwrap();
        assert_eq!(args.break_line, Some(100));
        assert_eq!(args.tab, vec![10, 20]);
        assert_eq!(args.screen, "none");
        assert!(Args::try_parse_from(["mbasic", "--screen", "vga", "prog.bas"]).is_err());
    }
}
