// Used in both Token and Ast

use std::rc::Rc;

/// A variable name. The variant records the type suffix.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
    Single(Rc<str>),
    Double(Rc<str>),
    Integer(Rc<str>),
}

impl Ident {
    pub fn new(s: &str) -> Ident {
        let name: Rc<str> = s.into();
        match s.chars().last() {
            Some('$') => Ident::String(name),
            Some('!') => Ident::Single(name),
            Some('#') => Ident::Double(name),
            Some('%') => Ident::Integer(name),
            _ => Ident::Plain(name),
        }
    }

    pub fn name(&self) -> &Rc<str> {
        use Ident::*;
        match self {
            Plain(s) | String(s) | Single(s) | Double(s) | Integer(s) => s,
        }
    }

    pub fn initial(&self) -> char {
        self.name().chars().next().unwrap_or('A')
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
