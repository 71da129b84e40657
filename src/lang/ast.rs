use super::{token::Word, Ident, LineNumber};
use std::ops::RangeInclusive;
use std::rc::Rc;

pub type Point = (Expression, Expression);

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assign(Variable, Expression),
    Circle(Point, Expression, Vec<Expression>),
    Close(Vec<Expression>),
    Cls(Option<Expression>),
    Color(Vec<Expression>),
    Data(Vec<Datum>),
    Def(VarType, Vec<DefTarget>),
    Dim(Vec<Variable>),
    Else,
    End,
    EndIf,
    Error(Expression),
    Field(Expression, Vec<(Expression, Variable)>),
    For(Ident, Expression, Expression, Option<Expression>),
    Get(Expression, Option<Expression>),
    GetGraphics(Point, Point, Ident),
    Gosub(LineNumber),
    Goto(LineNumber),
    If(Expression, Branch, Option<Branch>),
    IfStart(Expression),
    Input(Option<Expression>, Rc<str>, Vec<Variable>),
    Key(Expression, Expression),
    KeySwitch(bool),
    Line(Option<Point>, Point, Option<Expression>, Option<Rc<str>>),
    LineInput(Option<Expression>, Rc<str>, Variable),
    Locate(Option<Expression>, Option<Expression>),
    Lset(Variable, Expression),
    Mid(Variable, Expression, Option<Expression>, Expression),
    Next(Vec<Ident>),
    OnErrorGoto(LineNumber),
    OnGosub(Expression, Vec<LineNumber>),
    OnGoto(Expression, Vec<LineNumber>),
    Open(Expression, OpenMode, Expression, Option<Expression>),
    Print(Option<Expression>, Option<Expression>, Vec<PrintItem>),
    Pset(Point, Option<Expression>),
    Put(Expression, Option<Expression>),
    PutGraphics(Point, Ident, Option<Ident>),
    Randomize(Option<Expression>),
    Read(Vec<Variable>),
    Rem,
    Restore(Option<LineNumber>),
    Resume(Resume),
    Return(Option<LineNumber>),
    Rset(Variable, Expression),
    Screen(Vec<Expression>),
    Wend,
    While(Rc<Expression>),
    Width(Vec<Expression>),
    Window(bool, Option<(Point, Point)>),
    Write(Option<Expression>, Vec<Expression>),
}

impl Statement {
    /// Statements that manage the control stack. They run even while
    /// the execution condition is false.
    pub fn is_flow_control(&self) -> bool {
        use Statement::*;
        matches!(
            self,
            IfStart(_) | Else | EndIf | For(..) | Next(_) | While(_) | Wend
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Branch {
    Line(LineNumber),
    Statements(Rc<[Statement]>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum PrintItem {
    Expr(Expression),
    Comma,
    Semicolon,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Datum {
    Number(Rc<str>),
    String(Rc<str>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum VarType {
    Integer,
    Single,
    Double,
    String,
}

#[derive(Debug, PartialEq, Clone)]
pub enum DefTarget {
    Letters(char, char),
    Name(Ident),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OpenMode {
    Input,
    Output,
    Append,
    Random,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Resume {
    Retry,
    Next,
    Line(LineNumber),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Unary(Ident),
    Array(Ident, Vec<Expression>),
}

impl Variable {
    pub fn ident(&self) -> &Ident {
        match self {
            Variable::Unary(ident) | Variable::Array(ident, _) => ident,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i16),
    Float(f64),
    String(Rc<str>),
    Variable(Variable),
    Function(Function, Vec<Expression>),
    Negation(Box<Expression>),
    Not(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    DivideInt(Box<Expression>, Box<Expression>),
    Modulus(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    LessEqual(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
    GreaterEqual(Box<Expression>, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Function {
    Abs,
    Asc,
    Atn,
    Chr,
    Cos,
    Csrlin,
    Cvi,
    Cvs,
    Eof,
    Erl,
    Err,
    Exp,
    Fix,
    Frp,
    Inkey,
    Int,
    Left,
    Len,
    Log,
    Mid,
    Mki,
    Mks,
    Right,
    Rnd,
    Sgn,
    Sin,
    Space,
    Sqr,
    Str,
    String,
    Tab,
    Tan,
    Val,
}

impl Function {
    pub fn for_word(word: &Word) -> Option<Function> {
        use Function::*;
        Some(match word {
            Word::Abs => Abs,
            Word::Asc => Asc,
            Word::Atn => Atn,
            Word::Chr => Chr,
            Word::Cos => Cos,
            Word::Csrlin => Csrlin,
            Word::Cvi => Cvi,
            Word::Cvs => Cvs,
            Word::Eof => Eof,
            Word::Erl => Erl,
            Word::Err => Err,
            Word::Exp => Exp,
            Word::Fix => Fix,
            Word::Frp => Frp,
            Word::Inkey => Inkey,
            Word::Int => Int,
            Word::Left => Left,
            Word::Len => Len,
            Word::Log => Log,
            Word::Mid => Mid,
            Word::Mki => Mki,
            Word::Mks => Mks,
            Word::Right => Right,
            Word::Rnd => Rnd,
            Word::Sgn => Sgn,
            Word::Sin => Sin,
            Word::Space => Space,
            Word::Sqr => Sqr,
            Word::Str => Str,
            Word::String => String,
            Word::Tab => Tab,
            Word::Tan => Tan,
            Word::Val => Val,
            _ => return None,
        })
    }

    /// Number of arguments accepted. Functions whose range starts at
    /// zero may be written without parentheses.
    pub fn arity(&self) -> RangeInclusive<usize> {
        use Function::*;
        match self {
            Csrlin | Erl | Err | Inkey => 0..=0,
            Rnd => 0..=1,
            Left | Right | String => 2..=2,
            Mid => 2..=3,
            _ => 1..=1,
        }
    }
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_variable(&mut self, _: &Variable) {}
    fn visit_ident(&mut self, _: &Ident) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Ident {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_ident(self)
    }
}

impl AcceptVisitor for Variable {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Variable::*;
        match self {
            Unary(ident) => {
                ident.accept(visitor);
            }
            Array(ident, vec_expr) => {
                ident.accept(visitor);
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
        }
        visitor.visit_variable(self)
    }
}

impl<T: AcceptVisitor> AcceptVisitor for Option<T> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        if let Some(t) = self {
            t.accept(visitor);
        }
    }
}

impl<T: AcceptVisitor> AcceptVisitor for [T] {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        for t in self {
            t.accept(visitor);
        }
    }
}

impl<T: AcceptVisitor> AcceptVisitor for Vec<T> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        self.as_slice().accept(visitor)
    }
}

impl AcceptVisitor for Branch {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        if let Branch::Statements(stmts) = self {
            stmts.accept(visitor);
        }
    }
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            Data(_) | Def(..) | Else | End | EndIf | Gosub(_) | Goto(_) | KeySwitch(_)
            | OnErrorGoto(_) | Rem | Restore(_) | Resume(_) | Return(_) | Wend => {}
            Assign(var, expr) | Lset(var, expr) | Rset(var, expr) => {
                var.accept(visitor);
                expr.accept(visitor);
            }
            Circle((x, y), r, vec_expr) => {
                x.accept(visitor);
                y.accept(visitor);
                r.accept(visitor);
                vec_expr.accept(visitor);
            }
            Close(vec_expr) | Color(vec_expr) | Screen(vec_expr) | Width(vec_expr) => {
                vec_expr.accept(visitor);
            }
            Cls(expr) | Randomize(expr) => expr.accept(visitor),
            Dim(vec_var) | Read(vec_var) => vec_var.accept(visitor),
            Error(expr) | OnGosub(expr, _) | OnGoto(expr, _) | IfStart(expr) => {
                expr.accept(visitor);
            }
            Field(fh, fields) => {
                fh.accept(visitor);
                for (len, var) in fields {
                    len.accept(visitor);
                    var.accept(visitor);
                }
            }
            For(ident, from, to, step) => {
                ident.accept(visitor);
                from.accept(visitor);
                to.accept(visitor);
                step.accept(visitor);
            }
            Get(fh, rec) | Put(fh, rec) => {
                fh.accept(visitor);
                rec.accept(visitor);
            }
            GetGraphics((x1, y1), (x2, y2), ident) => {
                x1.accept(visitor);
                y1.accept(visitor);
                x2.accept(visitor);
                y2.accept(visitor);
                ident.accept(visitor);
            }
            If(predicate, then, otherwise) => {
                predicate.accept(visitor);
                then.accept(visitor);
                otherwise.accept(visitor);
            }
            Input(fh, _, vec_var) => {
                fh.accept(visitor);
                vec_var.accept(visitor);
            }
            Key(n, text) => {
                n.accept(visitor);
                text.accept(visitor);
            }
            Line(from, (x2, y2), color, _) => {
                if let Some((x1, y1)) = from {
                    x1.accept(visitor);
                    y1.accept(visitor);
                }
                x2.accept(visitor);
                y2.accept(visitor);
                color.accept(visitor);
            }
            LineInput(fh, _, var) => {
                fh.accept(visitor);
                var.accept(visitor);
            }
            Locate(row, col) => {
                row.accept(visitor);
                col.accept(visitor);
            }
            Mid(var, pos, len, expr) => {
                var.accept(visitor);
                pos.accept(visitor);
                len.accept(visitor);
                expr.accept(visitor);
            }
            Next(vec_ident) => vec_ident.accept(visitor),
            Open(name, _, fh, len) => {
                name.accept(visitor);
                fh.accept(visitor);
                len.accept(visitor);
            }
            Print(fh, using, items) => {
                fh.accept(visitor);
                using.accept(visitor);
                for item in items {
                    if let PrintItem::Expr(expr) = item {
                        expr.accept(visitor);
                    }
                }
            }
            Pset((x, y), color) => {
                x.accept(visitor);
                y.accept(visitor);
                color.accept(visitor);
            }
            PutGraphics((x, y), ident, _) => {
                x.accept(visitor);
                y.accept(visitor);
                ident.accept(visitor);
            }
            While(expr) => expr.accept(visitor),
            Window(_, coords) => {
                if let Some(((x1, y1), (x2, y2))) = coords {
                    x1.accept(visitor);
                    y1.accept(visitor);
                    x2.accept(visitor);
                    y2.accept(visitor);
                }
            }
            Write(fh, vec_expr) => {
                fh.accept(visitor);
                vec_expr.accept(visitor);
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Integer(_) | Float(_) | String(_) => {}
            Variable(var) => var.accept(visitor),
            Function(_, vec_expr) => vec_expr.accept(visitor),
            Negation(expr) | Not(expr) => expr.accept(visitor),
            Power(expr1, expr2)
            | Multiply(expr1, expr2)
            | Divide(expr1, expr2)
            | DivideInt(expr1, expr2)
            | Modulus(expr1, expr2)
            | Add(expr1, expr2)
            | Subtract(expr1, expr2)
            | Equal(expr1, expr2)
            | NotEqual(expr1, expr2)
            | Less(expr1, expr2)
            | LessEqual(expr1, expr2)
            | Greater(expr1, expr2)
            | GreaterEqual(expr1, expr2)
            | And(expr1, expr2)
            | Or(expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
