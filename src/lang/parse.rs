use super::{ast::*, token::*, Column, Error, LineNumber};
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parses the tokens of one physical line. Empty lines and remarks
/// become a single `Rem` so they can still be a jump target.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>> {
    let mut v = Parser::parse(tokens)?;
    if v.is_empty() {
        v.push(Statement::Rem);
    }
    Ok(v)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        match parse.statement_list(false) {
            Ok(r) => Ok(r),
            Err(e) => Err(e.in_column(&parse.col)),
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) | Token::Unknown(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn at_end(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Colon) | Some(Token::Word(Word::Else))
                | Some(Token::Word(Word::Rem1))
                | Some(Token::Word(Word::Rem2))
        )
    }

    /// Colon separated statements. Inside an inline IF the list stops
    /// at ELSE, otherwise it runs to the end of the line.
    fn statement_list(&mut self, inline: bool) -> Result<Vec<Statement>> {
        let mut v: Vec<Statement> = vec![];
        loop {
            match self.peek() {
                None => return Ok(v),
                Some(Token::Colon) => {
                    self.next();
                    continue;
                }
                Some(Token::Word(Word::Else)) if inline => return Ok(v),
                _ => {}
            }
            let statement = self.statement()?;
            let free = matches!(statement, Statement::Else | Statement::EndIf);
            v.push(statement);
            match self.peek() {
                None | Some(Token::Colon) => {}
                Some(Token::Word(Word::Rem1)) | Some(Token::Word(Word::Rem2)) => {}
                Some(Token::Word(Word::Else)) if inline => return Ok(v),
                _ if free => {}
                _ => return Err(error!(SyntaxError; "EXPECTED END OF STATEMENT")),
            }
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Ident(_)) => Statement::r#let(self),
            Some(Token::Word(word)) => {
                let word = *word;
                self.next();
                Statement::for_word(self, &word)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Operator(Operator::Minus)) => {
                    Expression::Negation(Box::new(parse(this, 5)?))
                }
                Some(Token::Operator(Operator::Plus)) => parse(this, 5)?,
                Some(Token::Operator(Operator::Not)) => Expression::Not(Box::new(parse(this, 2)?)),
                Some(Token::Ident(i)) => match this.peek() {
                    Some(&&Token::LParen) => {
                        Expression::Variable(Variable::Array(i.clone(), this.expression_list()?))
                    }
                    _ => Expression::Variable(Variable::Unary(i.clone())),
                },
                Some(Token::Literal(l)) => Expression::for_literal(l)?,
                Some(Token::Word(word)) => match Function::for_word(word) {
                    Some(f) => this.function(f)?,
                    None => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
                },
                _ => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
            };
            while let Some(Token::Operator(op)) = this.peek() {
                let op_precedence = Expression::op_precedence(op);
                if op_precedence == 0 || op_precedence < precedence {
                    break;
                }
                let op = *op;
                this.next();
                let rhs = parse(this, op_precedence + 1)?;
                lhs = Expression::for_binary_op(&op, lhs, rhs);
            }
            Ok(lhs)
        }
        parse(self, 1)
    }

    fn function(&mut self, function: Function) -> Result<Expression> {
        let arity = function.arity();
        let args = if *arity.start() == 0 && self.peek() != Some(&&Token::LParen) {
            vec![]
        } else {
            self.expression_list()?
        };
        if !arity.contains(&args.len()) {
            return Err(error!(SyntaxError; "WRONG NUMBER OF ARGUMENTS"));
        }
        Ok(Expression::Function(function, args))
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn comma_expressions(&mut self) -> Result<Vec<Expression>> {
        let mut v: Vec<Expression> = vec![];
        if self.at_end() {
            return Ok(v);
        }
        loop {
            v.push(self.expression()?);
            if self.maybe(Token::Comma) {
                continue;
            }
            return Ok(v);
        }
    }

    fn printer_list(&mut self) -> Result<Vec<PrintItem>> {
        let mut v: Vec<PrintItem> = vec![];
        loop {
            if self.at_end() {
                return Ok(v);
            }
            match self.peek() {
                Some(Token::Semicolon) => {
                    self.next();
                    v.push(PrintItem::Semicolon);
                }
                Some(Token::Comma) => {
                    self.next();
                    v.push(PrintItem::Comma);
                }
                _ => v.push(PrintItem::Expr(self.expression()?)),
            }
        }
    }

    fn point(&mut self) -> Result<Point> {
        self.expect(Token::LParen)?;
        let x = self.expression()?;
        self.expect(Token::Comma)?;
        let y = self.expression()?;
        self.expect(Token::RParen)?;
        Ok((x, y))
    }

    fn ident(&mut self) -> Result<Ident> {
        match self.next() {
            Some(Token::Ident(i)) => Ok(i.clone()),
            _ => Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let ident = self.ident()?;
        if let Some(&&Token::LParen) = self.peek() {
            Ok(Variable::Array(ident, self.expression_list()?))
        } else {
            Ok(Variable::Unary(ident))
        }
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while self.maybe(Token::Comma) {
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn line_number(&mut self) -> Result<LineNumber> {
        match self.next() {
            Some(t) => LineNumber::try_from(t),
            None => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        }
    }

    fn line_number_list(&mut self) -> Result<Vec<LineNumber>> {
        let mut v = vec![self.line_number()?];
        while self.maybe(Token::Comma) {
            v.push(self.line_number()?);
        }
        Ok(v)
    }

    /// A file number as `#n`, `# expr` or a bare expression.
    fn file_handle(&mut self) -> Result<Expression> {
        match self.peek() {
            Some(Token::Handle(_)) => {
                if let Some(Token::Handle(s)) = self.next() {
                    return s
                        .parse::<i16>()
                        .map(Expression::Integer)
                        .map_err(|_| error!(BadFileNumber));
                }
                Err(error!(InternalError))
            }
            Some(Token::Hash) => {
                self.next();
                self.expression()
            }
            _ => self.expression(),
        }
    }

    fn maybe_file_handle(&mut self) -> Result<Option<Expression>> {
        match self.peek() {
            Some(Token::Handle(_)) | Some(Token::Hash) => {
                let fh = self.file_handle()?;
                self.expect(Token::Comma)?;
                Ok(Some(fh))
            }
            _ => Ok(None),
        }
    }

    fn prompt(&mut self) -> Result<Option<(Rc<str>, bool)>> {
        if let Some(Token::Literal(Literal::String(s))) = self.peek() {
            let s: Rc<str> = s.as_str().into();
            self.next();
            return match self.next() {
                Some(Token::Semicolon) => Ok(Some((s, true))),
                Some(Token::Comma) => Ok(Some((s, false))),
                _ => Err(error!(SyntaxError; "EXPECTED SEPARATOR")),
            };
        }
        Ok(None)
    }

    fn maybe(&mut self, token: Token) -> bool {
        if let Some(t) = self.peek() {
            if **t == token {
                self.next();
                return true;
            }
        }
        false
    }

    fn maybe_word(&mut self, word: Word) -> bool {
        self.maybe(Token::Word(word))
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Unknown(_) | Whitespace(_) | Remark(_) => {"UNEXPECTED TOKEN"}
                Literal(_) => {"EXPECTED LITERAL"}
                Word(_) => {"EXPECTED RESERVED WORD"}
                Operator(_) => {"EXPECTED OPERATOR"}
                Ident(_) => {"EXPECTED IDENTIFIER"}
                Handle(_) | Hash => {"EXPECTED FILE NUMBER"}
                LParen => {"EXPECTED LEFT PARENTHESIS"}
                RParen => {"EXPECTED RIGHT PARENTHESIS"}
                Comma => {"EXPECTED COMMA"}
                Colon => {"EXPECTED COLON"}
                Semicolon => {"EXPECTED SEMICOLON"}
            }
        ))
    }
}

impl Expression {
    fn for_binary_op(op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(lhs, rhs),
            Multiply => Expression::Multiply(lhs, rhs),
            Divide => Expression::Divide(lhs, rhs),
            DivideInt => Expression::DivideInt(lhs, rhs),
            Modulus => Expression::Modulus(lhs, rhs),
            Plus => Expression::Add(lhs, rhs),
            Minus => Expression::Subtract(lhs, rhs),
            Equal => Expression::Equal(lhs, rhs),
            NotEqual => Expression::NotEqual(lhs, rhs),
            Less => Expression::Less(lhs, rhs),
            LessEqual => Expression::LessEqual(lhs, rhs),
            Greater => Expression::Greater(lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(lhs, rhs),
            And => Expression::And(lhs, rhs),
            Or => Expression::Or(lhs, rhs),
            Not => Expression::Not(rhs),
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Caret => 5,
            Multiply | Divide | DivideInt | Modulus => 4,
            Plus | Minus => 3,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 2,
            And | Or => 1,
            Not => 0,
        }
    }

    fn for_literal(lit: &Literal) -> Result<Expression> {
        fn clean(s: &str) -> String {
            let mut s = s.replace("D", "E");
            if let Some('!') | Some('#') | Some('%') = s.chars().last() {
                s.pop();
            }
            s
        }
        fn radix(s: &str, radix: u32) -> Result<Expression> {
            if s.is_empty() {
                return Ok(Expression::Integer(0));
            }
            match u16::from_str_radix(s, radix) {
                Ok(n) => Ok(Expression::Integer(n as i16)),
                Err(_) => Err(error!(Overflow)),
            }
        }
        match lit {
            Literal::Integer(s) => match clean(s).parse() {
                Ok(n) => Ok(Expression::Integer(n)),
                Err(_) => Err(error!(SyntaxError; "INVALID NUMBER")),
            },
            Literal::Float(s) => match clean(s).parse() {
                Ok(n) => Ok(Expression::Float(n)),
                Err(_) => Err(error!(SyntaxError; "INVALID NUMBER")),
            },
            Literal::Hex(s) => radix(s, 16),
            Literal::Octal(s) => radix(s, 8),
            Literal::String(s) => Ok(Expression::String(s.as_str().into())),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: &Word) -> Result<Statement> {
        use Word::*;
        match word {
            Circle => Self::r#circle(parse),
            Close => Self::r#close(parse),
            Cls => Self::r#cls(parse),
            Color => Ok(Statement::Color(parse.comma_expressions()?)),
            Data => Self::r#data(parse),
            Defdbl => Self::r#def(parse, VarType::Double),
            Defint => Self::r#def(parse, VarType::Integer),
            Defsng => Self::r#def(parse, VarType::Single),
            Defstr => Self::r#def(parse, VarType::String),
            Dim => Self::r#dim(parse),
            Else => Ok(Statement::Else),
            End | Stop | System => Ok(Statement::End),
            Endif => Ok(Statement::EndIf),
            Error => Ok(Statement::Error(parse.expression()?)),
            Field => Self::r#field(parse),
            For => Self::r#for(parse),
            Get => Self::r#get(parse),
            Gosub => Ok(Statement::Gosub(parse.line_number()?)),
            Goto => Ok(Statement::Goto(parse.line_number()?)),
            If => Self::r#if(parse),
            Input => Self::r#input(parse),
            Key => Self::r#key(parse),
            Let => Self::r#let(parse),
            Line => Self::r#line(parse),
            Locate => Self::r#locate(parse),
            Lset => Self::r#lset(parse),
            Mid => Self::r#mid(parse),
            Next => Self::r#next(parse),
            On => Self::r#on(parse),
            Open => Self::r#open(parse),
            Print1 | Print2 => Self::r#print(parse),
            Pset => Self::r#pset(parse),
            Put => Self::r#put(parse),
            Randomize => Self::r#randomize(parse),
            Read => Ok(Statement::Read(parse.variable_list()?)),
            Rem1 | Rem2 => Self::r#rem(parse),
            Restore => Self::r#restore(parse),
            Resume => Self::r#resume(parse),
            Return => Self::r#return(parse),
            Rset => Self::r#rset(parse),
            Screen => Ok(Statement::Screen(parse.comma_expressions()?)),
            Wend => Ok(Statement::Wend),
            While => Ok(Statement::While(Rc::new(parse.expression()?))),
            Width => Ok(Statement::Width(parse.comma_expressions()?)),
            Window => Self::r#window(parse),
            Write => Self::r#write(parse),
            _ => Result::Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn r#let(parse: &mut Parser) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Assign(var, parse.expression()?))
    }

    fn r#circle(parse: &mut Parser) -> Result<Statement> {
        let center = parse.point()?;
        parse.expect(Token::Comma)?;
        let radius = parse.expression()?;
        let mut rest = vec![];
        if parse.maybe(Token::Comma) {
            rest = parse.comma_expressions()?;
        }
        Ok(Statement::Circle(center, radius, rest))
    }

    fn r#close(parse: &mut Parser) -> Result<Statement> {
        let mut v = vec![];
        if parse.at_end() {
            return Ok(Statement::Close(v));
        }
        loop {
            v.push(parse.file_handle()?);
            if !parse.maybe(Token::Comma) {
                return Ok(Statement::Close(v));
            }
        }
    }

    fn r#cls(parse: &mut Parser) -> Result<Statement> {
        if parse.at_end() {
            Ok(Statement::Cls(None))
        } else {
            Ok(Statement::Cls(Some(parse.expression()?)))
        }
    }

    fn r#data(parse: &mut Parser) -> Result<Statement> {
        let mut v = vec![];
        let mut item: Option<Datum> = None;
        loop {
            match parse.peek() {
                None | Some(Token::Colon) => break,
                Some(Token::Comma) => {
                    parse.next();
                    v.push(item.take().unwrap_or_else(|| Datum::String("".into())));
                }
                Some(Token::Literal(Literal::String(s))) => {
                    item = Some(Datum::String(s.as_str().into()));
                    parse.next();
                }
                Some(Token::Remark(s)) => {
                    let s = s.trim();
                    let number = s.trim_end_matches(|c| c == '!' || c == '#' || c == '%');
                    item = if number.replace("D", "E").parse::<f64>().is_ok() {
                        Some(Datum::Number(s.into()))
                    } else {
                        Some(Datum::String(s.into()))
                    };
                    parse.next();
                }
                _ => return Err(error!(SyntaxError; "INVALID DATA")),
            }
        }
        v.push(item.unwrap_or_else(|| Datum::String("".into())));
        Ok(Statement::Data(v))
    }

    fn r#def(parse: &mut Parser, var_type: VarType) -> Result<Statement> {
        fn letter(ident: &Ident) -> Option<char> {
            let name = ident.name();
            if name.len() == 1 {
                name.chars().next()
            } else {
                None
            }
        }
        let mut v = vec![];
        loop {
            let from = parse.ident()?;
            if parse.maybe(Token::Operator(Operator::Minus)) {
                let to = parse.ident()?;
                match (letter(&from), letter(&to)) {
                    (Some(a), Some(b)) if a <= b => v.push(DefTarget::Letters(a, b)),
                    _ => return Err(error!(SyntaxError; "INVALID LETTER RANGE")),
                }
            } else {
                match letter(&from) {
                    Some(a) => v.push(DefTarget::Letters(a, a)),
                    None => v.push(DefTarget::Name(from)),
                }
            }
            if !parse.maybe(Token::Comma) {
                return Ok(Statement::Def(var_type, v));
            }
        }
    }

    fn r#dim(parse: &mut Parser) -> Result<Statement> {
        let mut v = vec![];
        loop {
            let ident = parse.ident()?;
            v.push(Variable::Array(ident, parse.expression_list()?));
            if !parse.maybe(Token::Comma) {
                return Ok(Statement::Dim(v));
            }
        }
    }

    fn r#field(parse: &mut Parser) -> Result<Statement> {
        let fh = parse.file_handle()?;
        let mut v = vec![];
        while parse.maybe(Token::Comma) {
            let len = parse.expression()?;
            parse.expect(Token::Word(Word::As))?;
            v.push((len, parse.variable()?));
        }
        Ok(Statement::Field(fh, v))
    }

    fn r#for(parse: &mut Parser) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = if parse.maybe_word(Word::Step) {
            Some(parse.expression()?)
        } else {
            None
        };
        Ok(Statement::For(ident, from, to, step))
    }

    fn r#get(parse: &mut Parser) -> Result<Statement> {
        if let Some(&&Token::LParen) = parse.peek() {
            let from = parse.point()?;
            parse.expect(Token::Operator(Operator::Minus))?;
            let to = parse.point()?;
            parse.expect(Token::Comma)?;
            return Ok(Statement::GetGraphics(from, to, parse.ident()?));
        }
        let fh = parse.file_handle()?;
        let rec = if parse.maybe(Token::Comma) {
            Some(parse.expression()?)
        } else {
            None
        };
        Ok(Statement::Get(fh, rec))
    }

    fn r#if(parse: &mut Parser) -> Result<Statement> {
        let predicate = parse.expression()?;
        let then = match parse.next() {
            Some(Token::Word(Word::Then)) => {
                if let None | Some(Token::Word(Word::Rem1)) | Some(Token::Word(Word::Rem2)) =
                    parse.peek()
                {
                    return Ok(Statement::IfStart(predicate));
                }
                Self::branch(parse)?
            }
            Some(Token::Word(Word::Goto)) => Branch::Line(parse.line_number()?),
            _ => return Err(error!(SyntaxError; "EXPECTED THEN")),
        };
        let otherwise = if parse.maybe_word(Word::Else) {
            Some(Self::branch(parse)?)
        } else {
            None
        };
        Ok(Statement::If(predicate, then, otherwise))
    }

    fn branch(parse: &mut Parser) -> Result<Branch> {
        if let Some(Token::Literal(_)) = parse.peek() {
            return Ok(Branch::Line(parse.line_number()?));
        }
        let v = parse.statement_list(true)?;
        if v.is_empty() {
            return Err(error!(SyntaxError; "EXPECTED STATEMENT"));
        }
        Ok(Branch::Statements(v.into()))
    }

    fn r#input(parse: &mut Parser) -> Result<Statement> {
        if let Some(fh) = parse.maybe_file_handle()? {
            return Ok(Statement::Input(Some(fh), "".into(), parse.variable_list()?));
        }
        let prompt: Rc<str> = match parse.prompt()? {
            Some((s, true)) => format!("{}? ", s).into(),
            Some((s, false)) => s,
            None => "? ".into(),
        };
        Ok(Statement::Input(None, prompt, parse.variable_list()?))
    }

    fn r#key(parse: &mut Parser) -> Result<Statement> {
        if parse.maybe_word(Word::On) {
            return Ok(Statement::KeySwitch(true));
        }
        if let Some(Token::Ident(i)) = parse.peek() {
            if &**i.name() == "OFF" {
                parse.next();
                return Ok(Statement::KeySwitch(false));
            }
        }
        let n = parse.expression()?;
        parse.expect(Token::Comma)?;
        Ok(Statement::Key(n, parse.expression()?))
    }

    fn r#line(parse: &mut Parser) -> Result<Statement> {
        if parse.maybe_word(Word::Input) {
            let fh = parse.maybe_file_handle()?;
            let prompt: Rc<str> = match parse.prompt()? {
                Some((s, _)) => s,
                None => "".into(),
            };
            return Ok(Statement::LineInput(fh, prompt, parse.variable()?));
        }
        let from = match parse.peek() {
            Some(Token::LParen) => Some(parse.point()?),
            _ => None,
        };
        parse.expect(Token::Operator(Operator::Minus))?;
        let to = parse.point()?;
        let mut color = None;
        let mut style = None;
        if parse.maybe(Token::Comma) {
            if parse.peek() != Some(&&Token::Comma) {
                color = Some(parse.expression()?);
            }
            if parse.maybe(Token::Comma) {
                style = Some(parse.ident()?.name().clone());
            }
        }
        Ok(Statement::Line(from, to, color, style))
    }

    fn r#locate(parse: &mut Parser) -> Result<Statement> {
        let mut row = None;
        let mut col = None;
        if !parse.at_end() && parse.peek() != Some(&&Token::Comma) {
            row = Some(parse.expression()?);
        }
        if parse.maybe(Token::Comma) && !parse.at_end() && parse.peek() != Some(&&Token::Comma) {
            col = Some(parse.expression()?);
        }
        while parse.maybe(Token::Comma) {
            if !parse.at_end() && parse.peek() != Some(&&Token::Comma) {
                parse.expression()?;
            }
        }
        Ok(Statement::Locate(row, col))
    }

    fn r#lset(parse: &mut Parser) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Lset(var, parse.expression()?))
    }

    fn r#rset(parse: &mut Parser) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Rset(var, parse.expression()?))
    }

    fn r#mid(parse: &mut Parser) -> Result<Statement> {
        parse.expect(Token::LParen)?;
        let var = parse.variable()?;
        parse.expect(Token::Comma)?;
        let pos = parse.expression()?;
        let len = if parse.maybe(Token::Comma) {
            Some(parse.expression()?)
        } else {
            None
        };
        parse.expect(Token::RParen)?;
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Mid(var, pos, len, parse.expression()?))
    }

    fn r#next(parse: &mut Parser) -> Result<Statement> {
        let mut v = vec![];
        if parse.at_end() {
            return Ok(Statement::Next(v));
        }
        loop {
            v.push(parse.ident()?);
            if !parse.maybe(Token::Comma) {
                return Ok(Statement::Next(v));
            }
        }
    }

    fn r#on(parse: &mut Parser) -> Result<Statement> {
        if parse.maybe_word(Word::Error) {
            parse.expect(Token::Word(Word::Goto))?;
            return Ok(Statement::OnErrorGoto(parse.line_number()?));
        }
        let expr = parse.expression()?;
        match parse.next() {
            Some(Token::Word(Word::Goto)) => {
                Ok(Statement::OnGoto(expr, parse.line_number_list()?))
            }
            Some(Token::Word(Word::Gosub)) => {
                Ok(Statement::OnGosub(expr, parse.line_number_list()?))
            }
            _ => Err(error!(SyntaxError; "EXPECTED GOTO OR GOSUB")),
        }
    }

    fn r#open(parse: &mut Parser) -> Result<Statement> {
        let name = parse.expression()?;
        let mut mode = OpenMode::Random;
        if parse.maybe_word(Word::For) {
            mode = match parse.next() {
                Some(Token::Word(Word::Input)) => OpenMode::Input,
                Some(Token::Word(Word::Output)) => OpenMode::Output,
                Some(Token::Word(Word::Append)) => OpenMode::Append,
                Some(Token::Word(Word::Random)) => OpenMode::Random,
                _ => return Err(error!(SyntaxError; "EXPECTED FILE MODE")),
            };
        }
        parse.expect(Token::Word(Word::As))?;
        let fh = parse.file_handle()?;
        let len = if parse.maybe_word(Word::Len) {
            parse.expect(Token::Operator(Operator::Equal))?;
            Some(parse.expression()?)
        } else {
            None
        };
        if mode == OpenMode::Random && len.is_none() {
            return Err(error!(SyntaxError; "EXPECTED LEN"));
        }
        Ok(Statement::Open(name, mode, fh, len))
    }

    fn r#print(parse: &mut Parser) -> Result<Statement> {
        let fh = parse.maybe_file_handle()?;
        let using = if parse.maybe_word(Word::Using) {
            let expr = parse.expression()?;
            if !parse.maybe(Token::Semicolon) {
                parse.expect(Token::Comma)?;
            }
            Some(expr)
        } else {
            None
        };
        Ok(Statement::Print(fh, using, parse.printer_list()?))
    }

    fn r#pset(parse: &mut Parser) -> Result<Statement> {
        let point = parse.point()?;
        let color = if parse.maybe(Token::Comma) {
            Some(parse.expression()?)
        } else {
            None
        };
        Ok(Statement::Pset(point, color))
    }

    fn r#put(parse: &mut Parser) -> Result<Statement> {
        if let Some(&&Token::LParen) = parse.peek() {
            let point = parse.point()?;
            parse.expect(Token::Comma)?;
            let ident = parse.ident()?;
            let action = if parse.maybe(Token::Comma) {
                Some(parse.ident()?)
            } else {
                None
            };
            return Ok(Statement::PutGraphics(point, ident, action));
        }
        let fh = parse.file_handle()?;
        let rec = if parse.maybe(Token::Comma) {
            Some(parse.expression()?)
        } else {
            None
        };
        Ok(Statement::Put(fh, rec))
    }

    fn r#randomize(parse: &mut Parser) -> Result<Statement> {
        if parse.at_end() {
            Ok(Statement::Randomize(None))
        } else {
            Ok(Statement::Randomize(Some(parse.expression()?)))
        }
    }

    fn r#rem(parse: &mut Parser) -> Result<Statement> {
        if let Some(Token::Remark(_)) = parse.peek() {
            parse.next();
        }
        Ok(Statement::Rem)
    }

    fn r#restore(parse: &mut Parser) -> Result<Statement> {
        if parse.at_end() {
            Ok(Statement::Restore(None))
        } else {
            Ok(Statement::Restore(Some(parse.line_number()?)))
        }
    }

    fn r#resume(parse: &mut Parser) -> Result<Statement> {
        if parse.at_end() {
            return Ok(Statement::Resume(Resume::Retry));
        }
        if parse.maybe_word(Word::Next) {
            return Ok(Statement::Resume(Resume::Next));
        }
        match parse.line_number()? {
            0 => Ok(Statement::Resume(Resume::Retry)),
            n => Ok(Statement::Resume(Resume::Line(n))),
        }
    }

    fn r#return(parse: &mut Parser) -> Result<Statement> {
        if parse.at_end() {
            Ok(Statement::Return(None))
        } else {
            Ok(Statement::Return(Some(parse.line_number()?)))
        }
    }

    fn r#window(parse: &mut Parser) -> Result<Statement> {
        let screen = parse.maybe_word(Word::Screen);
        if parse.at_end() {
            return Ok(Statement::Window(screen, None));
        }
        let from = parse.point()?;
        parse.expect(Token::Operator(Operator::Minus))?;
        let to = parse.point()?;
        Ok(Statement::Window(screen, Some((from, to))))
    }

    fn r#write(parse: &mut Parser) -> Result<Statement> {
        let fh = parse.maybe_file_handle()?;
        Ok(Statement::Write(fh, parse.comma_expressions()?))
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex::*;
    use super::*;

    fn parse_str(s: &str) -> Vec<Statement> {
        let (_, tokens) = lex(s);
        match parse(&tokens) {
            Ok(v) => v,
            Err(e) => panic!("{} : {:?}", e, e),
        }
    }

    fn var(s: &str) -> Expression {
        Expression::Variable(Variable::Unary(Ident::new(s)))
    }

    #[test]
    fn test_let() {
        assert_eq!(
            parse_str("LET A=B"),
            vec![Statement::Assign(Variable::Unary(Ident::new("A")), var("B"))]
        );
        assert_eq!(
            parse_str("X(I,2)=1"),
            vec![Statement::Assign(
                Variable::Array(Ident::new("X"), vec![var("I"), Expression::Integer(2)]),
                Expression::Integer(1)
            )]
        );
    }

    #[test]
    fn test_precedence_and_paren() {
        assert_eq!(
            parse_str("A=(2-(3+B)*4)"),
            vec![Statement::Assign(
                Variable::Unary(Ident::new("A")),
                Expression::Subtract(
                    Box::new(Expression::Integer(2)),
                    Box::new(Expression::Multiply(
                        Box::new(Expression::Add(
                            Box::new(Expression::Integer(3)),
                            Box::new(var("B")),
                        )),
                        Box::new(Expression::Integer(4)),
                    )),
                ),
            )]
        );
    }

    #[test]
    fn test_unary_minus_below_power() {
        assert_eq!(
            parse_str("A=-2^2"),
            vec![Statement::Assign(
                Variable::Unary(Ident::new("A")),
                Expression::Negation(Box::new(Expression::Power(
                    Box::new(Expression::Integer(2)),
                    Box::new(Expression::Integer(2)),
                ))),
            )]
        );
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            parse_str("A=8-4-2"),
            vec![Statement::Assign(
                Variable::Unary(Ident::new("A")),
                Expression::Subtract(
                    Box::new(Expression::Subtract(
                        Box::new(Expression::Integer(8)),
                        Box::new(Expression::Integer(4)),
                    )),
                    Box::new(Expression::Integer(2)),
                ),
            )]
        );
    }

    #[test]
    fn test_relational_below_arithmetic() {
        assert_eq!(
            parse_str("IF A+1<B AND C THEN 100"),
            vec![Statement::If(
                Expression::And(
                    Box::new(Expression::Less(
                        Box::new(Expression::Add(
                            Box::new(var("A")),
                            Box::new(Expression::Integer(1))
                        )),
                        Box::new(var("B")),
                    )),
                    Box::new(var("C")),
                ),
                Branch::Line(100),
                None
            )]
        );
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            parse_str("A$=LEFT$(B$,2)"),
            vec![Statement::Assign(
                Variable::Unary(Ident::new("A$")),
                Expression::Function(Function::Left, vec![var("B$"), Expression::Integer(2)]),
            )]
        );
        let (_, tokens) = lex("A=SIN(1,2)");
        assert!(parse(&tokens).is_err());
        assert_eq!(
            parse_str("A$=INKEY$"),
            vec![Statement::Assign(
                Variable::Unary(Ident::new("A$")),
                Expression::Function(Function::Inkey, vec![]),
            )]
        );
    }

    #[test]
    fn test_if_forms() {
        assert_eq!(
            parse_str("IF A THEN"),
            vec![Statement::IfStart(var("A"))]
        );
        assert_eq!(
            parse_str("IF A THEN ' comment"),
            vec![Statement::IfStart(var("A")), Statement::Rem]
        );
        assert_eq!(
            parse_str("IF A GOTO 20"),
            vec![Statement::If(var("A"), Branch::Line(20), None)]
        );
        assert_eq!(
            parse_str("IF A THEN B=1:C=2 ELSE 30"),
            vec![Statement::If(
                var("A"),
                Branch::Statements(
                    vec![
                        Statement::Assign(Variable::Unary(Ident::new("B")), Expression::Integer(1)),
                        Statement::Assign(Variable::Unary(Ident::new("C")), Expression::Integer(2)),
                    ]
                    .into()
                ),
                Some(Branch::Line(30))
            )]
        );
    }

    #[test]
    fn test_else_and_endif_without_colon() {
        assert_eq!(
            parse_str("ELSE PRINT"),
            vec![Statement::Else, Statement::Print(None, None, vec![])]
        );
        assert_eq!(parse_str("END IF"), vec![Statement::EndIf]);
    }

    #[test]
    fn test_printer_list() {
        assert_eq!(
            parse_str("? 1 2,3;:PRINT"),
            vec![
                Statement::Print(
                    None,
                    None,
                    vec![
                        PrintItem::Expr(Expression::Integer(1)),
                        PrintItem::Expr(Expression::Integer(2)),
                        PrintItem::Comma,
                        PrintItem::Expr(Expression::Integer(3)),
                        PrintItem::Semicolon,
                    ]
                ),
                Statement::Print(None, None, vec![]),
            ]
        );
        assert_eq!(
            parse_str("PRINT #2, USING \"##.#\";X"),
            vec![Statement::Print(
                Some(Expression::Integer(2)),
                Some(Expression::String("##.#".into())),
                vec![PrintItem::Expr(var("X"))]
            )]
        );
    }

    #[test]
    fn test_on_statements() {
        assert_eq!(
            parse_str("ON I GOSUB 10,20"),
            vec![Statement::OnGosub(var("I"), vec![10, 20])]
        );
        assert_eq!(parse_str("ON ERROR GOTO 0"), vec![Statement::OnErrorGoto(0)]);
    }

    #[test]
    fn test_resume_forms() {
        assert_eq!(parse_str("RESUME"), vec![Statement::Resume(Resume::Retry)]);
        assert_eq!(parse_str("RESUME 0"), vec![Statement::Resume(Resume::Retry)]);
        assert_eq!(parse_str("RESUME NEXT"), vec![Statement::Resume(Resume::Next)]);
        assert_eq!(parse_str("RESUME 40"), vec![Statement::Resume(Resume::Line(40))]);
    }

    #[test]
    fn test_input_prompts() {
        assert_eq!(
            parse_str("INPUT \"NAME\";A$"),
            vec![Statement::Input(
                None,
                "NAME? ".into(),
                vec![Variable::Unary(Ident::new("A$"))]
            )]
        );
        assert_eq!(
            parse_str("INPUT 'X',A"),
            vec![Statement::Input(None, "X".into(), vec![Variable::Unary(Ident::new("A"))])]
        );
    }

    #[test]
    fn test_open_forms() {
        assert_eq!(
            parse_str("OPEN F$ FOR OUTPUT AS #1"),
            vec![Statement::Open(
                var("F$"),
                OpenMode::Output,
                Expression::Integer(1),
                None
            )]
        );
        assert_eq!(
            parse_str("OPEN \"X.DAT\" AS #2 LEN=16"),
            vec![Statement::Open(
                Expression::String("X.DAT".into()),
                OpenMode::Random,
                Expression::Integer(2),
                Some(Expression::Integer(16))
            )]
        );
    }

    #[test]
    fn test_def_ranges() {
        assert_eq!(
            parse_str("DEFINT I-N,X"),
            vec![Statement::Def(
                VarType::Integer,
                vec![DefTarget::Letters('I', 'N'), DefTarget::Letters('X', 'X')]
            )]
        );
    }

    #[test]
    fn test_data() {
        assert_eq!(
            parse_str("DATA 1.5, \"A,B\", HELLO WORLD"),
            vec![Statement::Data(vec![
                Datum::Number("1.5".into()),
                Datum::String("A,B".into()),
                Datum::String("HELLO WORLD".into()),
            ])]
        );
    }

    #[test]
    fn test_rem_and_empty() {
        assert_eq!(parse_str(""), vec![Statement::Rem]);
        assert_eq!(parse_str("REM anything: at all"), vec![Statement::Rem]);
        assert_eq!(
            parse_str("A=1 ' trailing"),
            vec![
                Statement::Assign(Variable::Unary(Ident::new("A")), Expression::Integer(1)),
                Statement::Rem
            ]
        );
    }

    #[test]
    fn test_keyword_that_is_not_a_statement() {
        let (_, tokens) = lex("THEN 10");
        match parse(&tokens) {
            Err(e) => {
                assert_eq!(e.code(), 2);
                assert!(e.to_string().ends_with("EXPECTED STATEMENT"), "{}", e);
            }
            Ok(v) => panic!("{:?}", v),
        }
    }

    #[test]
    fn test_syntax_error_column() {
        let (_, tokens) = lex("PRINT 1+");
        match parse(&tokens) {
            Err(e) => assert_eq!(e.column(), 8..8),
            Ok(_) => panic!(),
        }
    }
}
