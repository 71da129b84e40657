use crate::error;
use crate::lang::Error;
use std::io::{BufRead, Write};

type Result<T> = std::result::Result<T, Error>;

pub type Coord = (f64, f64);

/// ## Console device
///
/// Text output and line input are required. Graphics and keyboard
/// statements default to doing nothing so a device without them
/// still runs programs that use them.

pub trait Screen {
    fn print(&mut self, text: &str, end: &str) -> Result<()>;
    fn input(&mut self, prompt: &str) -> Result<String>;

    fn locate(&mut self, _row: Option<usize>, _col: Option<usize>) -> Result<()> {
        Ok(())
    }
    fn cls(&mut self, _mode: Option<i32>) -> Result<()> {
        Ok(())
    }
    fn color(&mut self, _args: &[Option<i32>]) -> Result<()> {
        Ok(())
    }
    fn width(&mut self, _args: &[Option<i32>]) -> Result<()> {
        Ok(())
    }
    fn screen(&mut self, _args: &[Option<i32>]) -> Result<()> {
        Ok(())
    }
    fn window(&mut self, _screen: bool, _view: Option<(Coord, Coord)>) -> Result<()> {
        Ok(())
    }
    fn key(&mut self, _n: i32, _text: &str) -> Result<()> {
        Ok(())
    }
    fn key_display(&mut self, _on: bool) -> Result<()> {
        Ok(())
    }
    fn circle(&mut self, _center: Coord, _radius: f64, _args: &[Option<f64>]) -> Result<()> {
        Ok(())
    }
    fn line(
        &mut self,
        _from: Option<Coord>,
        _to: Coord,
        _color: Option<i32>,
        _style: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }
    fn pset(&mut self, _at: Coord, _color: Option<i32>) -> Result<()> {
        Ok(())
    }
    fn get_graphics(&mut self, _from: Coord, _to: Coord) -> Result<Vec<f64>> {
        Ok(vec![])
    }
    fn put_graphics(&mut self, _at: Coord, _data: &[f64], _action: Option<&str>) -> Result<()> {
        Ok(())
    }
    fn csrlin(&self) -> usize {
        1
    }
    fn inkey(&mut self) -> String {
        String::new()
    }
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Screen for batch runs and tests. Output goes to any writer. Input
/// comes from an optional reader and is echoed after its prompt.
pub struct Headless {
    out: Box<dyn Write>,
    input: Option<Box<dyn BufRead>>,
    echo: bool,
    row: usize,
}

impl Headless {
    pub fn new(out: Box<dyn Write>) -> Headless {
        Headless {
            out,
            input: None,
            echo: false,
            row: 1,
        }
    }

    pub fn with_input(out: Box<dyn Write>, input: Box<dyn BufRead>, echo: bool) -> Headless {
        Headless {
            out,
            input: Some(input),
            echo,
            row: 1,
        }
    }
}

impl Screen for Headless {
    fn print(&mut self, text: &str, end: &str) -> Result<()> {
        self.row += text.matches('\n').count() + end.matches('\n').count();
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(end.as_bytes())?;
        Ok(())
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let reader = match &mut self.input {
            Some(reader) => reader,
            None => return Err(error!(InputPastEnd; "NO INPUT")),
        };
        self.out.write_all(prompt.as_bytes())?;
        self.out.flush()?;
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(error!(InputPastEnd));
        }
        let line = line.trim_end_matches(|c| c == '\n' || c == '\r').to_string();
        if self.echo {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.row += 1;
        Ok(line)
    }

    fn locate(&mut self, row: Option<usize>, _col: Option<usize>) -> Result<()> {
        if let Some(row) = row {
            self.row = row;
        }
        self.out.write_all(b"\r")?;
        Ok(())
    }

    fn cls(&mut self, _mode: Option<i32>) -> Result<()> {
        self.row = 1;
        Ok(())
    }

    fn csrlin(&self) -> usize {
        self.row
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
