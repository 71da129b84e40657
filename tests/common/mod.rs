use mbasic::mach::{Config, Event, Headless, Listing, Program, Runtime};
use std::cell::RefCell;
use std::io::{Cursor, Write};
use std::rc::Rc;

/// Console output captured for assertions.
#[derive(Clone, Default)]
pub struct Shared(Rc<RefCell<Vec<u8>>>);

impl Shared {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct Run {
    pub runtime: Runtime,
    pub output: String,
    pub errors: Vec<String>,
}

pub fn runtime(source: &str, input: Option<&str>, config: Config) -> (Runtime, Shared) {
    let mut listing = Listing::new();
    listing.load_str(source);
    let program = Program::compile(&listing);
    let shared = Shared::default();
    let screen = match input {
        Some(text) => Headless::with_input(
            Box::new(shared.clone()),
            Box::new(Cursor::new(text.as_bytes().to_vec())),
            true,
        ),
        None => Headless::new(Box::new(shared.clone())),
    };
    (Runtime::new(program, Box::new(screen), config), shared)
}

/// Runs to the end, collecting every diagnostic. Panics if the program
/// does not stop within a generous number of steps.
pub fn finish(mut runtime: Runtime, shared: Shared) -> Run {
    let mut errors = vec![];
    for _ in 0..10_000 {
        match runtime.execute(1000) {
            Event::Stopped => {
                return Run {
                    runtime,
                    output: shared.text(),
                    errors,
                }
            }
            Event::Errors(list) => errors.extend(list.iter().map(|e| e.to_string())),
            Event::Running | Event::Break(_) => {}
        }
    }
    panic!("program did not stop");
}

pub fn run(source: &str) -> Run {
    let (runtime, shared) = runtime(source, None, Config::default());
    finish(runtime, shared)
}

pub fn run_with_input(source: &str, input: &str) -> Run {
    let (runtime, shared) = runtime(source, Some(input), Config::default());
    finish(runtime, shared)
}

pub fn output(source: &str) -> String {
    let r = run(source);
    assert!(r.errors.is_empty(), "unexpected errors {:?}", r.errors);
    r.output
}
