use super::control::{Context, ExecStack, ForFrame, Frame, IfFrame, WhileFrame};
use super::function::Function;
use super::program::{Compiled, Program};
use super::screen::Screen;
use super::{Config, Files, Operation, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{self, Branch, Datum, Expression, Statement, VarType, Variable};
use crate::lang::{Error, ErrorCode, Ident, LineKey, LineNumber};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::convert::TryFrom;
use std::rc::Rc;

mod io;

type Result<T> = std::result::Result<T, Error>;

/// ## Program execution
///
/// The runtime steps through statements in line order. Each step
/// records where it is and where it would go next, then lets the
/// statement redirect the next location.

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Errors(Vec<Error>),
    Running,
    Break(LineKey),
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Running,
    Halted,
    Failed,
}

/// Location of the error being handled.
#[derive(Debug, Clone)]
struct Trap {
    resume: Context,
    resume_next: Option<Context>,
}

pub struct Runtime {
    program: Rc<Program>,
    config: Config,
    state: State,
    pc: Option<Context>,
    here: Option<Context>,
    fallthrough: Option<Context>,
    stack: ExecStack,
    gosub: Stack<Option<Context>>,
    var: Var,
    files: Files,
    screen: Box<dyn Screen>,
    column: usize,
    target: Option<u16>,
    data_index: usize,
    handler: Option<LineNumber>,
    trap: Option<Trap>,
    last_error: Option<(u16, LineKey)>,
    pending: Vec<Error>,
    rng: StdRng,
    last_rnd: f64,
    at_break: bool,
    shut_down: bool,
}

impl Runtime {
    pub fn new(program: Program, screen: Box<dyn Screen>, config: Config) -> Runtime {
        let pending = program.errors().to_vec();
        let pc = program.first().map(Context::Line);
        let rng = StdRng::seed_from_u64(config.seed);
        let mut runtime = Runtime {
            program: Rc::new(program),
            config,
            state: State::Running,
            pc,
            here: None,
            fallthrough: None,
            stack: ExecStack::new(),
            gosub: Stack::new("GOSUB NESTED TOO DEEPLY"),
            var: Var::new(),
            files: Files::new(),
            screen,
            column: 0,
            target: None,
            data_index: 0,
            handler: None,
            trap: None,
            last_error: None,
            pending,
            rng,
            last_rnd: 0.0,
            at_break: false,
            shut_down: false,
        };
        runtime.preset_clock();
        runtime
    }

    fn preset_clock(&mut self) {
        let now = chrono::Local::now();
        let date = now.format("%Y-%m-%d").to_string();
        let time = now.format("%H:%M:%S").to_string();
        let _ = self.var.store(&Ident::new("DATE$"), Val::from(date));
        let _ = self.var.store(&Ident::new("TIME$"), Val::from(time));
    }

    /// Runs up to `cycles` statements. Diagnostics are returned before
    /// anything else. `Stopped` repeats once the program has ended.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if !self.pending.is_empty() {
            return Event::Errors(std::mem::take(&mut self.pending));
        }
        if self.state == State::Running {
            for _ in 0..cycles {
                let pc = match self.pc.take() {
                    Some(pc) => pc,
                    None => {
                        self.state = State::Halted;
                        break;
                    }
                };
                if self.is_break_point(&pc) && !self.at_break {
                    self.at_break = true;
                    let line = pc.line();
                    self.pc = Some(pc);
                    return Event::Break(line);
                }
                self.at_break = false;
                self.step(pc);
                if self.state != State::Running || !self.pending.is_empty() {
                    break;
                }
            }
        }
        if self.state != State::Running && !self.shut_down {
            self.shutdown();
        }
        if !self.pending.is_empty() {
            Event::Errors(std::mem::take(&mut self.pending))
        } else if self.state == State::Running {
            Event::Running
        } else {
            Event::Stopped
        }
    }

    /// Stops the program with a BREAK error at the next step.
    pub fn interrupt(&mut self) {
        if self.state == State::Running {
            self.raise(error!(Break));
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state == State::Failed
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn fetch(&self, name: &str) -> Val {
        self.var.fetch(&Ident::new(name))
    }

    pub fn scalars(&self) -> Vec<(Rc<str>, Val)> {
        self.var.scalars()
    }

    fn is_break_point(&self, pc: &Context) -> bool {
        match (pc, self.config.break_line) {
            (Context::Line(key), Some(number)) => key.number == number && key.sub == 0,
            _ => false,
        }
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
        if let Err(error) = self.files.close_all() {
            self.pending.push(error);
        }
        if let Err(error) = self.screen.flush() {
            self.pending.push(error);
        }
    }

    fn step(&mut self, pc: Context) {
        let program = Rc::clone(&self.program);
        let here = match pc {
            Context::Line(key) => match program.get(key) {
                Some(Some(Compiled::List(list))) => Context::List {
                    line: key,
                    list: Rc::clone(list),
                    index: 0,
                },
                Some(Some(Compiled::Single(_))) => Context::Line(key),
                Some(None) => {
                    self.here = Some(Context::Line(key));
                    self.fatal(error!(SyntaxError; "UNCOMPILED LINE"));
                    return;
                }
                None => {
                    self.here = Some(Context::Line(key));
                    self.fatal(error!(UndefinedLine));
                    return;
                }
            },
            pc => pc,
        };
        match &here {
            Context::Line(key) => {
                if let Some(Some(Compiled::Single(statement))) = program.get(*key) {
                    let next = program.successor(*key).map(Context::Line);
                    self.run(here.clone(), statement, next);
                }
            }
            Context::List { line, list, index } => {
                let list = Rc::clone(list);
                let next = if index + 1 < list.len() {
                    Some(Context::List {
                        line: *line,
                        list: Rc::clone(&list),
                        index: index + 1,
                    })
                } else {
                    program.successor(*line).map(Context::Line)
                };
                match list.get(*index) {
                    Some(statement) => self.run(here.clone(), statement, next),
                    None => self.pc = next,
                }
            }
        }
    }

    fn run(&mut self, here: Context, statement: &Statement, next: Option<Context>) {
        self.pc = next.clone();
        self.fallthrough = next;
        self.here = Some(here);
        if self.stack.exec_condition() || statement.is_flow_control() {
            if let Err(error) = self.statement(statement) {
                self.raise(error);
            }
        }
    }

    fn locate_error(&self, error: Error) -> Error {
        match &self.here {
            Some(here) => {
                let line = here.line();
                error
                    .in_line(line)
                    .in_source_line(self.program.source_line(line))
            }
            None => error,
        }
    }

    fn warn(&mut self, message: String) {
        let error = self.locate_error(error!(Warning; message));
        self.pending.push(error);
    }

    fn fatal(&mut self, error: Error) {
        let error = self.locate_error(error);
        self.pending.push(error);
        self.state = State::Failed;
        self.pc = None;
    }

    /// Reports the error, then enters the ON ERROR handler if one is set
    /// and not already running.
    fn raise(&mut self, error: Error) {
        let error = self.locate_error(error);
        if error.is_warning() {
            self.pending.push(error);
            return;
        }
        let code = error.code();
        match (self.handler, self.trap.is_none(), self.here.clone()) {
            (Some(number), true, Some(here)) if code != ErrorCode::Break as u16 => {
                self.pending.push(error);
                self.last_error = Some((code, here.line()));
                self.trap = Some(Trap {
                    resume: here,
                    resume_next: self.fallthrough.clone(),
                });
                if let Err(error) = self.jump(number) {
                    self.fatal(error);
                }
            }
            _ => self.fatal(error),
        }
    }

    fn jump(&mut self, number: LineNumber) -> Result<()> {
        if !self.program.contains(number) {
            return Err(error!(UndefinedLine; format!("LINE {}", number)));
        }
        self.pc = Some(Context::Line(LineKey::head(number)));
        Ok(())
    }

    fn branch(&mut self, branch: &Branch) -> Result<()> {
        match branch {
            Branch::Line(number) => self.jump(*number),
            Branch::Statements(list) => {
                if let (false, Some(here)) = (list.is_empty(), &self.here) {
                    self.pc = Some(Context::List {
                        line: here.line(),
                        list: Rc::clone(list),
                        index: 0,
                    });
                }
                Ok(())
            }
        }
    }

    fn statement(&mut self, statement: &Statement) -> Result<()> {
        use Statement::*;
        match statement {
            Assign(var, expr) => {
                let val = self.eval(expr)?;
                self.store(var, val)
            }
            Data(_) | Rem => Ok(()),
            Def(var_type, targets) => self.var.define(*var_type, targets),
            Dim(vars) => {
                for var in vars {
                    if let Variable::Array(ident, exprs) = var {
                        let bounds = self.eval_list(exprs)?;
                        self.var.dimension(ident, &bounds)?;
                    }
                }
                Ok(())
            }
            Else => self.stack.handle_else(),
            End => {
                self.state = State::Halted;
                self.pc = None;
                Ok(())
            }
            EndIf => self.stack.end_if(),
            Error(expr) => {
                let code = i16::try_from(&self.eval(expr)?)?;
                if code < 1 || code > 255 {
                    return Err(error!(IllegalFunctionCall));
                }
                Err(crate::lang::Error::from_code(code as u16))
            }
            For(var, from, to, step) => self.r#for(var, from, to, step.as_ref()),
            Gosub(number) => self.gosub(*number),
            Goto(number) => self.jump(*number),
            If(predicate, then, otherwise) => {
                if self.eval(predicate)?.is_true()? {
                    self.branch(then)
                } else if let Some(otherwise) = otherwise {
                    self.branch(otherwise)
                } else {
                    Ok(())
                }
            }
            IfStart(predicate) => {
                let condition = self.stack.exec_condition() && self.eval(predicate)?.is_true()?;
                self.stack.push(Frame::If(IfFrame {
                    condition,
                    seen_else: false,
                }))
            }
            Next(vars) => {
                if vars.is_empty() {
                    self.next(None)?;
                }
                for var in vars {
                    if self.next(Some(var))? {
                        break;
                    }
                }
                Ok(())
            }
            OnErrorGoto(number) => {
                self.handler = if *number == 0 { None } else { Some(*number) };
                Ok(())
            }
            OnGosub(expr, numbers) => match self.select(expr, numbers)? {
                Some(number) => self.gosub(number),
                None => Ok(()),
            },
            OnGoto(expr, numbers) => match self.select(expr, numbers)? {
                Some(number) => self.jump(number),
                None => Ok(()),
            },
            Randomize(expr) => {
                let seed = match expr {
                    Some(expr) => self.number(expr)?.to_bits(),
                    None => {
                        let now = chrono::Local::now();
                        now.timestamp() as u64 ^ now.timestamp_subsec_nanos() as u64
                    }
                };
                self.rng = StdRng::seed_from_u64(seed);
                Ok(())
            }
            Read(vars) => self.read(vars),
            Restore(None) => {
                self.data_index = 0;
                Ok(())
            }
            Restore(Some(_)) => Err(error!(AdvancedFeature; "RESTORE TO A LINE")),
            Resume(resume) => self.resume(*resume),
            Return(number) => {
                let context = match self.gosub.pop() {
                    Some(context) => context,
                    None => return Err(error!(ReturnWithoutGosub)),
                };
                match number {
                    Some(number) => self.jump(*number),
                    None => {
                        self.pc = context;
                        Ok(())
                    }
                }
            }
            Wend => self.wend(),
            While(guard) => {
                let condition = self.stack.exec_condition() && self.eval(guard)?.is_true()?;
                self.stack.push(Frame::While(WhileFrame {
                    condition,
                    guard: Rc::clone(guard),
                    start: self.fallthrough.clone(),
                }))
            }
            _ => self.io_statement(statement),
        }
    }

    fn gosub(&mut self, number: LineNumber) -> Result<()> {
        let next = self.fallthrough.clone();
        self.jump(number)?;
        self.gosub.push(next)
    }

    /// ON ... GOTO and GOSUB ignore indexes outside the list.
    fn select(&mut self, expr: &Expression, numbers: &[LineNumber]) -> Result<Option<LineNumber>> {
        let index = self.number(expr)?.trunc();
        if index >= 1.0 && index <= numbers.len() as f64 {
            Ok(Some(numbers[index as usize - 1]))
        } else {
            Ok(None)
        }
    }

    fn resume(&mut self, resume: ast::Resume) -> Result<()> {
        let trap = match self.trap.take() {
            Some(trap) => trap,
            None => return Err(error!(ResumeWithoutError)),
        };
        match resume {
            ast::Resume::Retry => {
                self.pc = Some(trap.resume);
                Ok(())
            }
            ast::Resume::Next => {
                self.pc = trap.resume_next;
                Ok(())
            }
            ast::Resume::Line(number) => self.jump(number),
        }
    }

    /// A FOR that names the variable of a loop already open discards
    /// that loop and every loop inside it.
    fn r#for(
        &mut self,
        var: &Ident,
        from: &Expression,
        to: &Expression,
        step: Option<&Expression>,
    ) -> Result<()> {
        if let Some(depth) = self.stack.find_for(var) {
            for _ in 0..=depth {
                self.stack.pop();
            }
        }
        let mut condition = self.stack.exec_condition();
        let (mut count, mut limit, mut increment) = (0.0, 0.0, 1.0);
        if condition {
            count = self.number(from)?;
            limit = self.number(to)?;
            if let Some(step) = step {
                increment = self.number(step)?;
            }
            self.var.store(var, Val::Float(count))?;
        }
        let frame = ForFrame {
            condition,
            var: var.clone(),
            count,
            to: limit,
            step: increment,
            start: self.fallthrough.clone(),
        };
        condition = condition && frame.in_range();
        self.stack.push(Frame::For(ForFrame { condition, ..frame }))
    }

    /// True when control went back to the top of the loop.
    fn next(&mut self, var: Option<&Ident>) -> Result<bool> {
        match self.stack.top() {
            Some(Frame::For(frame)) => {
                if let Some(var) = var {
                    if var != &frame.var {
                        return Err(error!(NextWithoutFor; format!("NEXT {} IN FOR {}", var, frame.var)));
                    }
                }
            }
            Some(_) => {
                let message = self.stack.mismatch("NEXT").unwrap_or_default();
                return Err(error!(NextWithoutFor; message));
            }
            None => return Err(error!(NextWithoutFor)),
        }
        let (ident, count, again, start) = match self.stack.top_mut() {
            Some(Frame::For(frame)) if frame.condition => {
                frame.count += frame.step;
                (frame.var.clone(), frame.count, frame.in_range(), frame.start.clone())
            }
            _ => {
                self.stack.pop();
                return Ok(false);
            }
        };
        self.var.store(&ident, Val::Float(count))?;
        if again {
            self.pc = start;
            Ok(true)
        } else {
            self.stack.pop();
            Ok(false)
        }
    }

    fn wend(&mut self) -> Result<()> {
        let guard = match self.stack.top() {
            Some(Frame::While(frame)) => Rc::clone(&frame.guard),
            Some(_) => {
                let message = self.stack.mismatch("WEND").unwrap_or_default();
                return Err(error!(WendWithoutWhile; message));
            }
            None => return Err(error!(WendWithoutWhile)),
        };
        if self.stack.exec_condition() && self.eval(&guard)?.is_true()? {
            if let Some(Frame::While(frame)) = self.stack.top() {
                self.pc = frame.start.clone();
            }
        } else {
            self.stack.pop();
        }
        Ok(())
    }

    fn read(&mut self, vars: &[Variable]) -> Result<()> {
        for var in vars {
            let datum = match self.program.data().get(self.data_index) {
                Some(datum) => datum.clone(),
                None => return Err(error!(OutOfData)),
            };
            self.data_index += 1;
            let is_string = self.var.var_type(var.ident()) == VarType::String;
            let val = match (datum, is_string) {
                (Datum::String(s), true) | (Datum::Number(s), true) => Val::String(s),
                (Datum::Number(s), false) => Val::Float(parse_number(&s)?),
                (Datum::String(s), false) if s.is_empty() => Val::Float(0.0),
                (Datum::String(s), false) => {
                    return Err(error!(SyntaxError; format!("NON-NUMERIC DATA {:?}", s)));
                }
            };
            self.store(var, val)?;
        }
        Ok(())
    }

    fn store(&mut self, var: &Variable, val: Val) -> Result<()> {
        match var {
            Variable::Unary(ident) => self.var.store(ident, val),
            Variable::Array(ident, exprs) => {
                let indices = self.eval_list(exprs)?;
                self.var.store_array(ident, &indices, val)
            }
        }
    }

    fn fetch_var(&mut self, var: &Variable) -> Result<Val> {
        match var {
            Variable::Unary(ident) => Ok(self.var.fetch(ident)),
            Variable::Array(ident, exprs) => {
                let indices = self.eval_list(exprs)?;
                self.var.fetch_array(ident, &indices)
            }
        }
    }

    /// `None` for a scalar that was never assigned.
    fn lookup_var(&mut self, var: &Variable) -> Result<Option<Val>> {
        match var {
            Variable::Unary(ident) => Ok(self.var.lookup(ident)),
            Variable::Array(..) => self.fetch_var(var).map(Some),
        }
    }

    fn eval_list(&mut self, exprs: &[Expression]) -> Result<Vec<Val>> {
        let mut vals = Vec::with_capacity(exprs.len());
        for expr in exprs {
            vals.push(self.eval(expr)?);
        }
        Ok(vals)
    }

    fn number(&mut self, expr: &Expression) -> Result<f64> {
        f64::try_from(&self.eval(expr)?)
    }

    fn int(&mut self, expr: &Expression) -> Result<i32> {
        Ok(i16::try_from(&self.eval(expr)?)? as i32)
    }

    fn string(&mut self, expr: &Expression) -> Result<Rc<str>> {
        Rc::<str>::try_from(&self.eval(expr)?)
    }

    fn eval(&mut self, expr: &Expression) -> Result<Val> {
        match expr {
            Expression::Integer(n) => Ok(Val::Integer(*n)),
            Expression::Float(n) => Ok(Val::Float(*n)),
            Expression::String(s) => Ok(Val::String(Rc::clone(s))),
            Expression::Variable(var) => self.fetch_var(var),
            Expression::Function(function, args) => self.call(*function, args),
            Expression::Negation(expr) => {
                let val = self.eval(expr)?;
                Operation::negate(val)
            }
            Expression::Not(expr) => {
                let val = self.eval(expr)?;
                Operation::not(val)
            }
            Expression::Power(l, r) => self.binary(l, r, Operation::power),
            Expression::Multiply(l, r) => self.binary(l, r, Operation::multiply),
            Expression::Divide(l, r) => self.binary(l, r, Operation::divide),
            Expression::DivideInt(l, r) => self.binary(l, r, Operation::divide_int),
            Expression::Modulus(l, r) => self.binary(l, r, Operation::modulus),
            Expression::Add(l, r) => self.binary(l, r, Operation::sum),
            Expression::Subtract(l, r) => self.binary(l, r, Operation::subtract),
            Expression::Equal(l, r) => self.binary(l, r, Operation::equal),
            Expression::NotEqual(l, r) => self.binary(l, r, Operation::not_equal),
            Expression::Less(l, r) => self.binary(l, r, Operation::less),
            Expression::LessEqual(l, r) => self.binary(l, r, Operation::less_equal),
            Expression::Greater(l, r) => self.binary(l, r, Operation::greater),
            Expression::GreaterEqual(l, r) => self.binary(l, r, Operation::greater_equal),
            Expression::And(l, r) => {
                let lhs = self.eval(l)?;
                if lhs.is_true()? {
                    self.eval(r)
                } else {
                    Ok(lhs)
                }
            }
            Expression::Or(l, r) => {
                let lhs = self.eval(l)?;
                if lhs.is_true()? {
                    Ok(lhs)
                } else {
                    self.eval(r)
                }
            }
        }
    }

    fn binary(
        &mut self,
        lhs: &Expression,
        rhs: &Expression,
        op: fn(Val, Val) -> Result<Val>,
    ) -> Result<Val> {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        op(lhs, rhs)
    }

    fn call(&mut self, function: ast::Function, args: &[Expression]) -> Result<Val> {
        use ast::Function as F;
        let mut vals = self.eval_list(args)?.into_iter();
        let vals = &mut vals;
        match function {
            F::Abs => Function::abs(arg(vals)?),
            F::Asc => Function::asc(arg(vals)?),
            F::Atn => Function::atn(arg(vals)?),
            F::Chr => Function::chr(arg(vals)?),
            F::Cos => Function::cos(arg(vals)?),
            F::Csrlin => Ok(Val::Integer(self.screen.csrlin() as i16)),
            F::Cvi => Function::cvi(arg(vals)?),
            F::Cvs => Function::cvs(arg(vals)?),
            F::Eof => {
                let handle = file_number(&arg(vals)?)?;
                Ok(Val::from_bool(self.files.eof(handle)?))
            }
            F::Erl => Ok(Val::Float(
                self.last_error.map(|(_, line)| line.number).unwrap_or(0) as f64,
            )),
            F::Err => Ok(Val::Integer(
                self.last_error.map(|(code, _)| code).unwrap_or(0) as i16,
            )),
            F::Exp => Function::exp(arg(vals)?),
            F::Fix => Function::fix(arg(vals)?),
            F::Frp => Function::frp(arg(vals)?),
            F::Inkey => Ok(Val::from(self.screen.inkey())),
            F::Int => Function::int(arg(vals)?),
            F::Left => Function::left(arg(vals)?, arg(vals)?),
            F::Len => Function::len(arg(vals)?),
            F::Log => Function::log(arg(vals)?),
            F::Mid => Function::mid(arg(vals)?, arg(vals)?, vals.next()),
            F::Mki => Function::mki(arg(vals)?),
            F::Mks => Function::mks(arg(vals)?),
            F::Right => Function::right(arg(vals)?, arg(vals)?),
            F::Rnd => self.rnd(vals.next()),
            F::Sgn => Function::sgn(arg(vals)?),
            F::Sin => Function::sin(arg(vals)?),
            F::Space => Function::space(arg(vals)?),
            F::Sqr => Function::sqr(arg(vals)?),
            F::Str => Function::str(arg(vals)?),
            F::String => Function::string(arg(vals)?, arg(vals)?),
            F::Tab => {
                let n = i16::try_from(&arg(vals)?)? as i64;
                let col = self.column(self.target) as i64;
                Ok(Val::from(" ".repeat((n - 1 - col).max(0) as usize)))
            }
            F::Tan => Function::tan(arg(vals)?),
            F::Val => Function::val(arg(vals)?),
        }
    }

    /// RND(0) repeats the last number. A negative argument reseeds.
    fn rnd(&mut self, val: Option<Val>) -> Result<Val> {
        let n = match &val {
            Some(val) => f64::try_from(val)?,
            None => 1.0,
        };
        if n < 0.0 {
            self.rng = StdRng::seed_from_u64(n.to_bits());
        }
        if n != 0.0 {
            self.last_rnd = self.rng.gen::<f64>();
        }
        Ok(Val::Float(self.last_rnd))
    }
}

fn arg(vals: &mut std::vec::IntoIter<Val>) -> Result<Val> {
    match vals.next() {
        Some(val) => Ok(val),
        None => Err(error!(SyntaxError; "MISSING ARGUMENT")),
    }
}

fn file_number(val: &Val) -> Result<u16> {
    let n = i16::try_from(val)?;
    if n < 1 || n > 255 {
        return Err(error!(BadFileNumber));
    }
    Ok(n as u16)
}

/// Numeric text from DATA or INPUT. Type sigils are ignored and `D`
/// exponents read as `E`.
pub fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let upper = s.to_ascii_uppercase();
    if let Some(hex) = upper.strip_prefix("&H") {
        return match u16::from_str_radix(hex, 16) {
            Ok(n) => Ok(n as i16 as f64),
            Err(_) => Err(error!(TypeMismatch; format!("BAD NUMBER {:?}", s))),
        };
    }
    let digits = upper
        .trim_end_matches(|c| c == '!' || c == '#' || c == '%')
        .replace('D', "E");
    match digits.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(error!(TypeMismatch; format!("BAD NUMBER {:?}", s))),
    }
}
