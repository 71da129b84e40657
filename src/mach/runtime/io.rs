use super::{file_number, parse_number, Result, Runtime};
use crate::error;
use crate::lang::ast::{Expression, Point, PrintItem, Statement, VarType, Variable};
use crate::mach::file::MAX_RECORD_LEN;
use crate::mach::screen::Coord;
use crate::mach::val::{latin1_bytes, latin1_string};
use crate::mach::{PrintUsing, Val};
use std::convert::TryFrom;
use std::rc::Rc;

impl Runtime {
    pub(super) fn io_statement(&mut self, statement: &Statement) -> Result<()> {
        use Statement::*;
        match statement {
            Circle(center, radius, args) => {
                let center = self.point(center)?;
                let radius = self.number(radius)?;
                let mut rest = vec![];
                for arg in args {
                    rest.push(Some(self.number(arg)?));
                }
                self.screen.circle(center, radius, &rest)
            }
            Close(handles) => self.close(handles),
            Cls(mode) => {
                let mode = self.maybe_int(mode.as_ref())?;
                self.column = 0;
                self.screen.cls(mode)
            }
            Color(args) => {
                let args = self.ints(args)?;
                self.screen.color(&args)
            }
            Field(handle, fields) => {
                let handle = self.handle(handle)?;
                let mut v = vec![];
                for (len, var) in fields {
                    let len = self.number(len)?.trunc();
                    if len < 0.0 {
                        return Err(error!(IllegalFunctionCall));
                    }
                    if len > MAX_RECORD_LEN as f64 {
                        return Err(error!(FieldOverflow));
                    }
                    v.push((len as usize, var.clone()));
                }
                self.files.set_fields(handle, v.clone())?;
                for (len, var) in &v {
                    self.store(var, Val::from(" ".repeat(*len)))?;
                }
                Ok(())
            }
            Get(handle, record) => self.get(handle, record.as_ref()),
            GetGraphics(from, to, ident) => {
                let from = self.point(from)?;
                let to = self.point(to)?;
                let data = self.screen.get_graphics(from, to)?;
                for (i, n) in data.into_iter().enumerate() {
                    let index = Val::Float(i as f64);
                    self.var.store_array(ident, &[index], Val::Float(n))?;
                }
                Ok(())
            }
            Input(handle, prompt, vars) => self.input(handle.as_ref(), prompt, vars),
            Key(n, text) => {
                let n = self.int(n)?;
                let text = self.string(text)?;
                self.screen.key(n, &text)
            }
            KeySwitch(on) => self.screen.key_display(*on),
            Line(from, to, color, style) => {
                let from = match from {
                    Some(from) => Some(self.point(from)?),
                    None => None,
                };
                let to = self.point(to)?;
                let color = self.maybe_int(color.as_ref())?;
                self.screen.line(from, to, color, style.as_deref())
            }
            LineInput(handle, prompt, var) => self.line_input(handle.as_ref(), prompt, var),
            Locate(row, col) => {
                let row = self.maybe_int(row.as_ref())?.map(|n| n.max(1) as usize);
                let col = self.maybe_int(col.as_ref())?.map(|n| n.max(1) as usize);
                if let Some(col) = col {
                    self.column = col - 1;
                }
                self.screen.locate(row, col)
            }
            Lset(var, expr) => self.justify(var, expr, true),
            Mid(var, pos, len, expr) => self.mid(var, pos, len.as_ref(), expr),
            Open(name, mode, handle, len) => {
                let name = self.string(name)?;
                let handle = self.handle(handle)?;
                let len = match len {
                    Some(len) => Some(self.number(len)?.max(0.0) as usize),
                    None => None,
                };
                self.files.open(handle, &name, *mode, len)
            }
            Print(handle, using, items) => self.print(handle.as_ref(), using.as_ref(), items),
            Pset(at, color) => {
                let at = self.point(at)?;
                let color = self.maybe_int(color.as_ref())?;
                self.screen.pset(at, color)
            }
            Put(handle, record) => self.put(handle, record.as_ref()),
            PutGraphics(at, ident, action) => {
                let at = self.point(at)?;
                let data = self.var.array_floats(ident);
                let action = action.as_ref().map(|a| a.name().to_string());
                self.screen.put_graphics(at, &data, action.as_deref())
            }
            Rset(var, expr) => self.justify(var, expr, false),
            Screen(args) => {
                let args = self.ints(args)?;
                self.screen.screen(&args)
            }
            Width(args) => {
                let args = self.ints(args)?;
                self.screen.width(&args)
            }
            Window(screen, view) => {
                let view = match view {
                    Some((from, to)) => Some((self.point(from)?, self.point(to)?)),
                    None => None,
                };
                self.screen.window(*screen, view)
            }
            Write(handle, exprs) => self.write(handle.as_ref(), exprs),
            _ => Err(error!(InternalError; "UNHANDLED STATEMENT")),
        }
    }

    pub(super) fn column(&self, target: Option<u16>) -> usize {
        match target {
            Some(handle) => self.files.column(handle),
            None => self.column,
        }
    }

    fn set_column(&mut self, target: Option<u16>, column: usize) {
        match target {
            Some(handle) => self.files.set_column(handle, column),
            None => self.column = column,
        }
    }

    fn handle(&mut self, expr: &Expression) -> Result<u16> {
        let val = self.eval(expr)?;
        file_number(&val)
    }

    fn maybe_handle(&mut self, expr: Option<&Expression>) -> Result<Option<u16>> {
        match expr {
            Some(expr) => Ok(Some(self.handle(expr)?)),
            None => Ok(None),
        }
    }

    fn maybe_int(&mut self, expr: Option<&Expression>) -> Result<Option<i32>> {
        match expr {
            Some(expr) => Ok(Some(self.int(expr)?)),
            None => Ok(None),
        }
    }

    fn ints(&mut self, exprs: &[Expression]) -> Result<Vec<Option<i32>>> {
        let mut v = vec![];
        for expr in exprs {
            v.push(Some(self.int(expr)?));
        }
        Ok(v)
    }

    fn point(&mut self, point: &Point) -> Result<Coord> {
        Ok((self.number(&point.0)?, self.number(&point.1)?))
    }

    fn record_number(&mut self, expr: Option<&Expression>) -> Result<Option<usize>> {
        match expr {
            Some(expr) => {
                let n = self.number(expr)?.trunc();
                if n < 1.0 {
                    return Err(error!(BadRecordNumber));
                }
                Ok(Some(n as usize))
            }
            None => Ok(None),
        }
    }

    /// Sends text to the console or an open file.
    fn emit(&mut self, target: Option<u16>, text: &str, end: &str) -> Result<()> {
        match target {
            Some(handle) if !self.files.is_screen(handle)? => {
                self.files.write(handle, &format!("{}{}", text, end))
            }
            _ => self.screen.print(text, end),
        }
    }

    fn print(
        &mut self,
        handle: Option<&Expression>,
        using: Option<&Expression>,
        items: &[PrintItem],
    ) -> Result<()> {
        let target = self.maybe_handle(handle)?;
        if let Some(handle) = target {
            self.files.is_screen(handle)?;
        }
        let mut using = match using {
            Some(expr) => Some(PrintUsing::parse(&self.string(expr)?)),
            None => None,
        };
        let start = self.column(target);
        self.target = target;
        let result = self.print_items(target, &mut using, items);
        self.target = None;
        match result {
            Ok((text, newline)) => {
                if newline {
                    self.set_column(target, 0);
                }
                self.emit(target, &text, if newline { "\n" } else { "" })
            }
            Err(error) => {
                self.set_column(target, start);
                Err(error)
            }
        }
    }

    /// Builds the output of one PRINT. The column is kept current so
    /// TAB sees it.
    fn print_items(
        &mut self,
        target: Option<u16>,
        using: &mut Option<PrintUsing>,
        items: &[PrintItem],
    ) -> Result<(String, bool)> {
        let mut out = String::new();
        let mut newline = true;
        for item in items {
            let mut col = self.column(target);
            match item {
                PrintItem::Expr(expr) => {
                    newline = true;
                    let val = self.eval(expr)?;
                    let text = match (using.as_mut(), &val) {
                        (Some(using), Val::Integer(_)) | (Some(using), Val::Float(_)) => {
                            using.format(f64::try_from(&val)?)?
                        }
                        _ => val.to_string(),
                    };
                    col += text.chars().count();
                    out.push_str(&text);
                }
                PrintItem::Semicolon => newline = false,
                PrintItem::Comma => {
                    newline = false;
                    if using.is_none() {
                        if let Some(&stop) = self.config.tabs.iter().find(|&&stop| stop > col) {
                            out.push_str(&" ".repeat(stop - col));
                            col = stop;
                        }
                    }
                }
            }
            self.set_column(target, col);
        }
        Ok((out, newline))
    }

    /// Strings are quoted and numbers lose their sign column.
    fn write(&mut self, handle: Option<&Expression>, exprs: &[Expression]) -> Result<()> {
        let target = self.maybe_handle(handle)?;
        let mut parts = vec![];
        for expr in exprs {
            parts.push(match self.eval(expr)? {
                Val::String(s) => format!("\"{}\"", s),
                val => val.to_trimmed_string(),
            });
        }
        let end = match target {
            Some(handle) if !self.files.is_screen(handle)? => "\r\n",
            _ => "\n",
        };
        self.set_column(target, 0);
        self.emit(target, &parts.join(","), end)
    }

    fn read_text(&mut self, handle: Option<&Expression>, prompt: &str) -> Result<String> {
        match self.maybe_handle(handle)? {
            Some(handle) => self.files.read_line(handle),
            None => {
                let text = self.screen.input(prompt)?;
                self.column = 0;
                Ok(text)
            }
        }
    }

    /// Several variables take comma separated values. A single variable
    /// takes the whole line.
    fn input(&mut self, handle: Option<&Expression>, prompt: &str, vars: &[Variable]) -> Result<()> {
        let text = self.read_text(handle, prompt)?;
        let items: Vec<&str> = if vars.len() > 1 {
            text.split(',').collect()
        } else {
            vec![text.as_str()]
        };
        for (var, item) in vars.iter().zip(items) {
            let val = if self.var.var_type(var.ident()) == VarType::String {
                let item = item.trim();
                let item = match item.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
                    Some(inner) => inner,
                    None => item,
                };
                Val::from(item)
            } else {
                Val::Float(parse_number(item)?)
            };
            self.store(var, val)?;
        }
        Ok(())
    }

    fn line_input(&mut self, handle: Option<&Expression>, prompt: &str, var: &Variable) -> Result<()> {
        if self.var.var_type(var.ident()) != VarType::String {
            return Err(error!(TypeMismatch; "LINE INPUT NEEDS A STRING VARIABLE"));
        }
        let text = self.read_text(handle, prompt)?;
        self.store(var, Val::from(text))
    }

    fn close(&mut self, handles: &[Expression]) -> Result<()> {
        if handles.is_empty() {
            return self.files.close_all();
        }
        for expr in handles {
            let handle = self.handle(expr)?;
            if !self.files.close(handle)? {
                self.warn(format!("FILE #{} NOT OPEN", handle));
            }
        }
        Ok(())
    }

    fn get(&mut self, handle: &Expression, record: Option<&Expression>) -> Result<()> {
        let handle = self.handle(handle)?;
        let record = self.record_number(record)?;
        let bytes = self.files.get_record(handle, record)?;
        let mut offset = 0;
        for (len, var) in self.files.fields(handle)? {
            let start = offset.min(bytes.len());
            let end = (offset + len).min(bytes.len());
            self.store(&var, Val::from(latin1_string(&bytes[start..end])))?;
            offset += len;
        }
        Ok(())
    }

    fn put(&mut self, handle: &Expression, record: Option<&Expression>) -> Result<()> {
        let handle = self.handle(handle)?;
        let record = self.record_number(record)?;
        let mut data = vec![];
        for (len, var) in self.files.fields(handle)? {
            let text = Rc::<str>::try_from(&self.fetch_var(&var)?)?;
            let mut bytes = latin1_bytes(&text);
            bytes.resize(len, b' ');
            data.extend(bytes);
        }
        self.files.put_record(handle, record, data)
    }

    /// LSET and RSET keep the current length of the variable. A variable
    /// never assigned takes the length of the value.
    fn justify(&mut self, var: &Variable, expr: &Expression, left: bool) -> Result<()> {
        let value = match self.eval(expr)? {
            Val::String(s) => s,
            _ => return Err(error!(TypeMismatch; "NON-STRING EXPRESSION")),
        };
        if self.var.var_type(var.ident()) != VarType::String {
            return Err(error!(TypeMismatch; "NON-STRING VARIABLE"));
        }
        let len = value.chars().count();
        let width = match self.lookup_var(var)? {
            Some(Val::String(current)) => current.chars().count(),
            Some(_) => return Err(error!(TypeMismatch; "NON-STRING VARIABLE")),
            None => len,
        };
        let text: String = if len >= width {
            value.chars().take(width).collect()
        } else if left {
            format!("{}{}", value, " ".repeat(width - len))
        } else {
            format!("{}{}", " ".repeat(width - len), value)
        };
        self.store(var, Val::from(text))
    }

    /// MID$ as a statement overwrites characters in place and never
    /// changes the length of the variable.
    fn mid(
        &mut self,
        var: &Variable,
        pos: &Expression,
        len: Option<&Expression>,
        expr: &Expression,
    ) -> Result<()> {
        let current = match self.fetch_var(var)? {
            Val::String(s) => s,
            _ => return Err(error!(TypeMismatch; "NON-STRING VARIABLE")),
        };
        let pos = self.number(pos)?.trunc();
        let chars: Vec<char> = current.chars().collect();
        if pos < 1.0 || pos > chars.len() as f64 {
            return Err(error!(IllegalFunctionCall));
        }
        let start = pos as usize - 1;
        let replacement: Vec<char> = self.string(expr)?.chars().collect();
        let mut count = replacement.len().min(chars.len() - start);
        if let Some(len) = len {
            let len = self.number(len)?;
            if len < 0.0 {
                return Err(error!(IllegalFunctionCall));
            }
            count = count.min(len as usize);
        }
        let mut chars = chars;
        chars[start..start + count].copy_from_slice(&replacement[..count]);
        self.store(var, Val::from(chars.into_iter().collect::<String>()))
    }
}
