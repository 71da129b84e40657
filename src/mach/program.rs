use super::Listing;
use crate::error;
use crate::lang::ast::{AcceptVisitor, Branch, Datum, Statement, Visitor};
use crate::lang::{Error, LineKey, LineNumber};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

/// Parsed form of one physical line.
#[derive(Debug, Clone)]
pub enum Compiled {
    Single(Statement),
    List(Rc<[Statement]>),
}

/// ## Compiled program
///
/// Built once from a listing and never modified. Lines that failed to
/// parse are kept as `None` so reaching one is a runtime error.

#[derive(Debug, Default)]
pub struct Program {
    lines: BTreeMap<LineKey, Option<Compiled>>,
    successor: HashMap<LineKey, LineKey>,
    source_lines: HashMap<LineKey, usize>,
    numbers: HashSet<LineNumber>,
    data: Vec<Datum>,
    errors: Vec<Error>,
}

impl Program {
    pub fn compile(listing: &Listing) -> Program {
        let mut program = Program::default();
        for (key, entry) in listing.lines() {
            program.source_lines.insert(*key, entry.source_line);
            if key.sub == 0 {
                program.numbers.insert(key.number);
            }
            for warning in entry.line.illegal_characters() {
                program.push_error(warning, *key, entry.source_line);
            }
            let compiled = match entry.line.ast() {
                Ok(mut statements) => {
                    if statements.len() == 1 {
                        statements.pop().map(Compiled::Single)
                    } else {
                        Some(Compiled::List(statements.into()))
                    }
                }
                Err(error) => {
                    program.push_error(error, *key, entry.source_line);
                    None
                }
            };
            program.lines.insert(*key, compiled);
        }
        let keys: Vec<LineKey> = program.lines.keys().copied().collect();
        for pair in keys.windows(2) {
            program.successor.insert(pair[0], pair[1]);
        }
        program.collect_data();
        program.link();
        program
    }

    fn push_error(&mut self, error: Error, key: LineKey, source_line: usize) {
        self.errors
            .push(error.in_line(key).in_source_line(Some(source_line)));
    }

    /// DATA items of every line in program order.
    fn collect_data(&mut self) {
        let mut visitor = DataVisitor::default();
        for compiled in self.lines.values().flatten() {
            compiled.accept(&mut visitor);
        }
        self.data = visitor.data;
    }

    /// Jump targets that name no line only warn here. Taking the jump
    /// raises the error.
    fn link(&mut self) {
        let mut warnings = vec![];
        for (key, compiled) in &self.lines {
            if let Some(compiled) = compiled {
                let mut visitor = LinkVisitor::default();
                compiled.accept(&mut visitor);
                for number in visitor.targets {
                    if !self.numbers.contains(&number) {
                        let source_line = self.source_lines.get(key).copied();
                        warnings.push(
                            error!(Warning; format!("UNDEFINED LINE {}", number))
                                .in_line(*key)
                                .in_source_line(source_line),
                        );
                    }
                }
            }
        }
        self.errors.append(&mut warnings);
    }

    pub fn first(&self) -> Option<LineKey> {
        self.lines.keys().next().copied()
    }

    pub fn get(&self, key: LineKey) -> Option<&Option<Compiled>> {
        self.lines.get(&key)
    }

    pub fn successor(&self, key: LineKey) -> Option<LineKey> {
        self.successor.get(&key).copied()
    }

    pub fn contains(&self, number: LineNumber) -> bool {
        self.numbers.contains(&number)
    }

    pub fn source_line(&self, key: LineKey) -> Option<usize> {
        self.source_lines.get(&key).copied()
    }

    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    /// Parse errors and warnings, each tagged with its line.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

impl AcceptVisitor for Compiled {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        match self {
            Compiled::Single(statement) => statement.accept(visitor),
            Compiled::List(statements) => statements.accept(visitor),
        }
    }
}

#[derive(Default)]
struct DataVisitor {
    data: Vec<Datum>,
}

impl Visitor for DataVisitor {
    fn visit_statement(&mut self, statement: &Statement) {
        if let Statement::Data(items) = statement {
            self.data.extend(items.iter().cloned());
        }
    }
}

#[derive(Default)]
struct LinkVisitor {
    targets: Vec<LineNumber>,
}

impl Visitor for LinkVisitor {
    fn visit_statement(&mut self, statement: &Statement) {
        use Statement::*;
        match statement {
            Gosub(n) | Goto(n) | Restore(Some(n)) | Return(Some(n)) => self.targets.push(*n),
            Resume(crate::lang::ast::Resume::Line(n)) => self.targets.push(*n),
            OnErrorGoto(n) if *n != 0 => self.targets.push(*n),
            OnGosub(_, numbers) | OnGoto(_, numbers) => self.targets.extend(numbers),
            If(_, then, otherwise) => {
                for branch in std::iter::once(then).chain(otherwise) {
                    if let Branch::Line(n) = branch {
                        self.targets.push(*n);
                    }
                }
            }
            _ => {}
        }
    }
}
