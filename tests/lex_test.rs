use mbasic::lang::ast::{Expression, PrintItem, Statement, Variable};
use mbasic::lang::token::{Literal, Operator, Token};
use mbasic::lang::{lex, parse, Ident, Line, Tokenizer};

fn words(s: &str) -> Vec<Token> {
    let mut t = Tokenizer::new();
    t.feed(s);
    let mut v = vec![];
    while let Some(token) = t.next_token() {
        if !matches!(token, Token::Whitespace(_)) {
            v.push(token);
        }
    }
    v
}

#[test]
fn test_tokenizer_feed() {
    assert_eq!(
        words("A$=\"X\""),
        vec![
            Token::Ident(Ident::new("A$")),
            Token::Operator(Operator::Equal),
            Token::Literal(Literal::String("X".into())),
        ]
    );
    assert_eq!(
        words("'A'+'B'"),
        vec![
            Token::Literal(Literal::String("A".into())),
            Token::Operator(Operator::Plus),
            Token::Literal(Literal::String("B".into())),
        ]
    );
}

#[test]
fn test_hex_literal_expression() {
    let (_, tokens) = lex("PRINT &HFF");
    assert_eq!(
        parse(&tokens).unwrap(),
        vec![Statement::Print(None, None, vec![PrintItem::Expr(Expression::Integer(255))])]
    );
}

#[test]
fn test_lowercase_is_illegal() {
    let line = Line::from_str("10 print 1");
    assert!(!line.illegal_characters().is_empty());
}

#[test]
fn test_colon_list() {
    let (number, tokens) = lex("100 GOSUB 200:GOSUB 300:GOTO 900");
    assert_eq!(number, Some(100));
    assert_eq!(
        parse(&tokens).unwrap(),
        vec![Statement::Gosub(200), Statement::Gosub(300), Statement::Goto(900)]
    );
}

#[test]
fn test_assign_array() {
    let (_, tokens) = lex("A(1,J)=B");
    assert_eq!(
        parse(&tokens).unwrap(),
        vec![Statement::Assign(
            Variable::Array(
                Ident::new("A"),
                vec![
                    Expression::Integer(1),
                    Expression::Variable(Variable::Unary(Ident::new("J")))
                ]
            ),
            Expression::Variable(Variable::Unary(Ident::new("B")))
        )]
    );
}
