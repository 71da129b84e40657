use super::val::round_i16;
use super::Val;
use crate::error;
use crate::lang::ast::{DefTarget, VarType};
use crate::lang::{Error, Ident};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Scalars and arrays live in separate name spaces. A name without a
/// type suffix takes its type from a DEFxxx statement, first by exact
/// name and then by initial letter.

#[derive(Debug)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    dims: HashMap<Rc<str>, Array>,
    letters: [VarType; 26],
    names: HashMap<Rc<str>, VarType>,
}

#[derive(Debug)]
struct Array {
    bounds: Vec<usize>,
    vals: Vec<Val>,
}

/// Default upper bound of an array used before any DIM.
const AUTO_BOUND: usize = 10;

impl Default for Var {
    fn default() -> Var {
        Var {
            vars: HashMap::default(),
            dims: HashMap::default(),
            letters: [VarType::Single; 26],
            names: HashMap::default(),
        }
    }
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn var_type(&self, ident: &Ident) -> VarType {
        match ident {
            Ident::String(_) => VarType::String,
            Ident::Integer(_) => VarType::Integer,
            Ident::Single(_) => VarType::Single,
            Ident::Double(_) => VarType::Double,
            Ident::Plain(name) => match self.names.get(name) {
                Some(t) => *t,
                None => {
                    let initial = ident.initial().to_ascii_uppercase();
                    if initial.is_ascii_uppercase() {
                        self.letters[(initial as u8 - b'A') as usize]
                    } else {
                        VarType::Single
                    }
                }
            },
        }
    }

    pub fn define(&mut self, var_type: VarType, targets: &[DefTarget]) -> Result<()> {
        for target in targets {
            match target {
                DefTarget::Letters(from, to) => {
                    let (from, to) = (from.to_ascii_uppercase(), to.to_ascii_uppercase());
                    if !from.is_ascii_uppercase() || !to.is_ascii_uppercase() || from > to {
                        return Err(error!(SyntaxError; "BAD LETTER RANGE"));
                    }
                    for letter in from..=to {
                        self.letters[(letter as u8 - b'A') as usize] = var_type;
                    }
                }
                DefTarget::Name(ident) => {
                    self.names.insert(ident.name().clone(), var_type);
                    let default = default_val(var_type);
                    self.vars.insert(ident.name().clone(), default);
                }
            }
        }
        Ok(())
    }

    pub fn fetch(&self, ident: &Ident) -> Val {
        match self.vars.get(ident.name()) {
            Some(val) => val.clone(),
            None => default_val(self.var_type(ident)),
        }
    }

    /// Like fetch but `None` when never assigned.
    pub fn lookup(&self, ident: &Ident) -> Option<Val> {
        self.vars.get(ident.name()).cloned()
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        let value = coerce(self.var_type(ident), value)?;
        self.vars.insert(ident.name().clone(), value);
        Ok(())
    }

    pub fn dimension(&mut self, ident: &Ident, bounds: &[Val]) -> Result<()> {
        if self.dims.contains_key(ident.name()) {
            return Err(error!(RedimensionedArray));
        }
        let mut dims = vec![];
        for bound in bounds {
            let n = f64::try_from(bound)?.trunc();
            if n < 0.0 || n > u16::max_value() as f64 {
                return Err(error!(IllegalFunctionCall));
            }
            dims.push(n as usize + 1);
        }
        self.create(ident, dims)
    }

    pub fn fetch_array(&mut self, ident: &Ident, indices: &[Val]) -> Result<Val> {
        let offset = self.offset(ident, indices)?;
        match self.dims.get(ident.name()) {
            Some(array) => Ok(array.vals[offset].clone()),
            None => Err(error!(InternalError; "ARRAY VANISHED")),
        }
    }

    pub fn store_array(&mut self, ident: &Ident, indices: &[Val], value: Val) -> Result<()> {
        let offset = self.offset(ident, indices)?;
        let value = coerce(self.var_type(ident), value)?;
        match self.dims.get_mut(ident.name()) {
            Some(array) => {
                array.vals[offset] = value;
                Ok(())
            }
            None => Err(error!(InternalError; "ARRAY VANISHED")),
        }
    }

    /// Every element of an array in storage order, for graphics PUT.
    pub fn array_floats(&self, ident: &Ident) -> Vec<f64> {
        match self.dims.get(ident.name()) {
            Some(array) => array
                .vals
                .iter()
                .filter_map(|v| f64::try_from(v).ok())
                .collect(),
            None => vec![],
        }
    }

    /// Scalars sorted by name.
    pub fn scalars(&self) -> Vec<(Rc<str>, Val)> {
        let mut v: Vec<(Rc<str>, Val)> = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        v.sort_by(|a, b| a.0.cmp(&b.0));
        v
    }

    fn create(&mut self, ident: &Ident, bounds: Vec<usize>) -> Result<()> {
        let len = bounds
            .iter()
            .try_fold(1usize, |len, &bound| len.checked_mul(bound))
            .filter(|&len| len <= u16::max_value() as usize);
        let len = match len {
            Some(len) => len,
            None => return Err(error!(OutOfMemory)),
        };
        let vals = vec![default_val(self.var_type(ident)); len];
        self.dims
            .insert(ident.name().clone(), Array { bounds, vals });
        Ok(())
    }

    fn offset(&mut self, ident: &Ident, indices: &[Val]) -> Result<usize> {
        if !self.dims.contains_key(ident.name()) {
            self.create(ident, vec![AUTO_BOUND + 1; indices.len()])?;
        }
        let array = match self.dims.get(ident.name()) {
            Some(array) => array,
            None => return Err(error!(InternalError; "ARRAY VANISHED")),
        };
        if array.bounds.len() != indices.len() {
            return Err(error!(SubscriptOutOfRange));
        }
        let mut offset = 0;
        for (index, bound) in indices.iter().zip(&array.bounds) {
            let n = f64::try_from(index)?.trunc();
            if n < 0.0 || n >= *bound as f64 {
                return Err(error!(SubscriptOutOfRange));
            }
            offset = offset * bound + n as usize;
        }
        Ok(offset)
    }
}

pub fn default_val(var_type: VarType) -> Val {
    match var_type {
        VarType::String => Val::String("".into()),
        VarType::Integer => Val::Integer(0),
        VarType::Single | VarType::Double => Val::Float(0.0),
    }
}

fn coerce(var_type: VarType, value: Val) -> Result<Val> {
    match (var_type, value) {
        (VarType::String, val @ Val::String(_)) => Ok(val),
        (VarType::String, _) | (_, Val::String(_)) => Err(error!(TypeMismatch)),
        (VarType::Integer, Val::Float(n)) => Ok(Val::Integer(round_i16(n)?)),
        (VarType::Integer, val) => Ok(val),
        (_, Val::Integer(n)) => Ok(Val::Float(n as f64)),
        (_, val) => Ok(val),
    }
}
