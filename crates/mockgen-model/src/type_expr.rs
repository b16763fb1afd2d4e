//! Type expressions.
//!
//! Member models carry their types as source text. The emitter needs to ask
//! structural questions about that text (is it optional, is it a closure,
//! what does the closure receive), so each string is parsed once into a
//! `TypeExpr` and the answers are read off the tree.
//!
//! Parsing never fails: text that does not fit the grammar becomes
//! `TypeExpr::Opaque` holding the trimmed input.

use std::fmt;

/// One `Name<Args>` component of a dotted type path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub args: Vec<TypeExpr>,
}

/// An element of a tuple or of a function parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleElement {
    /// Label as written, e.g. `data` or `_ data`.
    pub label: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub params: Vec<TupleElement>,
    /// Effect keywords in source order (`async`, `throws`, `rethrows`, `throws(E)`).
    pub effects: Vec<String>,
    pub result: Box<TypeExpr>,
}

impl FunctionType {
    pub fn is_throwing(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.starts_with("throws") || e == "rethrows")
    }

    pub fn is_async(&self) -> bool {
        self.effects.iter().any(|e| e == "async")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Foo`, `Swift.Result<A, B>`, `Foo.Type`
    Named(Vec<PathSegment>),
    /// `T?`
    Optional(Box<TypeExpr>),
    /// `T!`
    ImplicitlyUnwrapped(Box<TypeExpr>),
    /// `[T]`
    Array(Box<TypeExpr>),
    /// `[K: V]`
    Dictionary(Box<TypeExpr>, Box<TypeExpr>),
    /// `()`, `(A, b: B)`
    Tuple(Vec<TupleElement>),
    /// `(A) async throws -> R`
    Function(FunctionType),
    /// `A & B`
    Composition(Vec<TypeExpr>),
    /// `@escaping T`, `inout T`, `any P`
    Attributed {
        specifiers: Vec<String>,
        inner: Box<TypeExpr>,
    },
    /// `T...`
    Variadic(Box<TypeExpr>),
    /// Text the grammar does not cover.
    Opaque(String),
}

/// Specifiers that only affect how an argument is passed, not its value type.
const PASSING_SPECIFIERS: &[&str] = &["@escaping", "@autoclosure", "inout"];

const KEYWORD_SPECIFIERS: &[&str] = &[
    "inout",
    "some",
    "any",
    "borrowing",
    "consuming",
    "isolated",
    "sending",
    "__owned",
    "__shared",
];

/// A closure found at the top of a type, possibly behind specifiers or an optional.
#[derive(Debug, Clone, Copy)]
pub struct ClosureShape<'a> {
    pub function: &'a FunctionType,
    /// The closure itself is optional, so calls need `?`.
    pub optional: bool,
}

impl TypeExpr {
    pub fn parse(text: &str) -> TypeExpr {
        let trimmed = text.trim();
        let mut parser = TypeParser::new(trimmed);
        match parser.parse_type() {
            Some(ty) if parser.at_end() => ty,
            _ => TypeExpr::Opaque(trimmed.to_string()),
        }
    }

    pub fn named(name: &str) -> TypeExpr {
        TypeExpr::Named(vec![PathSegment {
            name: name.to_string(),
            args: Vec::new(),
        }])
    }

    /// Last path component name, if this is a plain named type.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(segments) => segments.last().map(|s| s.name.as_str()),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, TypeExpr::Opaque(_))
    }

    /// `T?` or `Optional<T>`.
    pub fn is_optional(&self) -> bool {
        match self {
            TypeExpr::Optional(_) => true,
            TypeExpr::Named(segments) => {
                segments.len() == 1 && segments[0].name == "Optional" && segments[0].args.len() == 1
            }
            _ => false,
        }
    }

    pub fn is_void(&self) -> bool {
        match self {
            TypeExpr::Tuple(elems) => elems.is_empty(),
            TypeExpr::Named(segments) => {
                segments.len() == 1 && segments[0].name == "Void" && segments[0].args.is_empty()
            }
            _ => false,
        }
    }

    pub fn has_specifier(&self, specifier: &str) -> bool {
        match self {
            TypeExpr::Attributed { specifiers, inner } => {
                specifiers.iter().any(|s| s == specifier) || inner.has_specifier(specifier)
            }
            _ => false,
        }
    }

    /// Drop `@escaping`, `@autoclosure` and `inout`, keeping every other specifier.
    pub fn without_passing_specifiers(&self) -> TypeExpr {
        match self {
            TypeExpr::Attributed { specifiers, inner } => {
                let inner = inner.without_passing_specifiers();
                let kept: Vec<String> = specifiers
                    .iter()
                    .filter(|s| !PASSING_SPECIFIERS.contains(&s.as_str()))
                    .cloned()
                    .collect();
                if kept.is_empty() {
                    inner
                } else {
                    TypeExpr::Attributed {
                        specifiers: kept,
                        inner: Box::new(inner),
                    }
                }
            }
            other => other.clone(),
        }
    }

    /// The closure at the top of this type, looking through specifiers and one optional.
    pub fn closure_shape(&self) -> Option<ClosureShape<'_>> {
        match self {
            TypeExpr::Function(function) => Some(ClosureShape {
                function,
                optional: false,
            }),
            TypeExpr::Attributed { inner, .. } => inner.closure_shape(),
            TypeExpr::Optional(inner) | TypeExpr::ImplicitlyUnwrapped(inner) => {
                inner.closure_shape().map(|shape| ClosureShape {
                    function: shape.function,
                    optional: true,
                })
            }
            _ => None,
        }
    }

    /// Whether a type name appears anywhere in this expression.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            TypeExpr::Named(segments) => segments
                .iter()
                .any(|s| s.name == name || s.args.iter().any(|a| a.mentions(name))),
            TypeExpr::Optional(inner)
            | TypeExpr::ImplicitlyUnwrapped(inner)
            | TypeExpr::Array(inner)
            | TypeExpr::Variadic(inner) => inner.mentions(name),
            TypeExpr::Attributed { inner, .. } => inner.mentions(name),
            TypeExpr::Dictionary(key, value) => key.mentions(name) || value.mentions(name),
            TypeExpr::Tuple(elems) => elems.iter().any(|e| e.ty.mentions(name)),
            TypeExpr::Function(function) => {
                function.params.iter().any(|e| e.ty.mentions(name))
                    || function.result.mentions(name)
            }
            TypeExpr::Composition(parts) => parts.iter().any(|p| p.mentions(name)),
            TypeExpr::Opaque(text) => text.contains(name),
        }
    }

    fn needs_parens_before_suffix(&self) -> bool {
        matches!(
            self,
            TypeExpr::Function(_) | TypeExpr::Composition(_) | TypeExpr::Attributed { .. }
        )
    }
}

impl fmt::Display for TupleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&segment.name)?;
                    if !segment.args.is_empty() {
                        f.write_str("<")?;
                        write_joined(f, &segment.args, ", ")?;
                        f.write_str(">")?;
                    }
                }
                Ok(())
            }
            TypeExpr::Optional(inner) | TypeExpr::ImplicitlyUnwrapped(inner) => {
                let suffix = if matches!(self, TypeExpr::Optional(_)) {
                    "?"
                } else {
                    "!"
                };
                if inner.needs_parens_before_suffix() {
                    write!(f, "({inner}){suffix}")
                } else {
                    write!(f, "{inner}{suffix}")
                }
            }
            TypeExpr::Array(inner) => write!(f, "[{inner}]"),
            TypeExpr::Dictionary(key, value) => write!(f, "[{key}: {value}]"),
            TypeExpr::Tuple(elems) => {
                f.write_str("(")?;
                write_joined(f, elems, ", ")?;
                f.write_str(")")
            }
            TypeExpr::Function(function) => {
                f.write_str("(")?;
                write_joined(f, &function.params, ", ")?;
                f.write_str(")")?;
                for effect in &function.effects {
                    write!(f, " {effect}")?;
                }
                write!(f, " -> {}", function.result)
            }
            TypeExpr::Composition(parts) => write_joined(f, parts, " & "),
            TypeExpr::Attributed { specifiers, inner } => {
                for specifier in specifiers {
                    write!(f, "{specifier} ")?;
                }
                write!(f, "{inner}")
            }
            TypeExpr::Variadic(inner) => write!(f, "{inner}..."),
            TypeExpr::Opaque(text) => f.write_str(text),
        }
    }
}

// =============================================================================
// Parser
// =============================================================================

struct TypeParser {
    chars: Vec<char>,
    pos: usize,
}

impl TypeParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_arrow(&mut self) -> bool {
        self.skip_ws();
        self.peek() == Some('-') && self.peek_at(1) == Some('>')
    }

    fn is_ident_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$'
    }

    fn ident(&mut self) -> Option<String> {
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(Self::is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(self.chars[start..self.pos].iter().collect())
        }
    }

    /// Raw text of a balanced `( ... )` group starting at the cursor.
    fn balanced_parens(&mut self) -> Option<String> {
        if self.peek() != Some('(') {
            return None;
        }
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(ch) = self.peek() {
            self.pos += 1;
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(self.chars[start..self.pos].iter().collect());
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn parse_specifiers(&mut self) -> Option<Vec<String>> {
        let mut specifiers = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('@') {
                self.pos += 1;
                let name = self.ident()?;
                let mut specifier = format!("@{name}");
                if self.peek() == Some('(') {
                    specifier.push_str(&self.balanced_parens()?);
                }
                specifiers.push(specifier);
                continue;
            }
            let save = self.pos;
            match self.ident() {
                Some(word)
                    if KEYWORD_SPECIFIERS.contains(&word.as_str())
                        && self.peek().is_some_and(char::is_whitespace) =>
                {
                    specifiers.push(word);
                }
                _ => {
                    self.pos = save;
                    return Some(specifiers);
                }
            }
        }
    }

    fn parse_type(&mut self) -> Option<TypeExpr> {
        let specifiers = self.parse_specifiers()?;
        let mut ty = self.parse_postfix()?;

        if !matches!(ty, TypeExpr::Function(_)) {
            let mut parts = Vec::new();
            while self.eat('&') {
                parts.push(self.parse_postfix()?);
            }
            if !parts.is_empty() {
                parts.insert(0, ty);
                ty = TypeExpr::Composition(parts);
            }
        }

        if specifiers.is_empty() {
            Some(ty)
        } else {
            Some(TypeExpr::Attributed {
                specifiers,
                inner: Box::new(ty),
            })
        }
    }

    fn parse_effects(&mut self) -> Option<Vec<String>> {
        let mut effects = Vec::new();
        loop {
            let save = self.pos;
            match self.ident() {
                Some(word) if word == "async" || word == "rethrows" => effects.push(word),
                Some(word) if word == "throws" => {
                    if self.peek() == Some('(') {
                        let typed = self.balanced_parens()?;
                        effects.push(format!("throws{typed}"));
                    } else {
                        effects.push(word);
                    }
                }
                _ => {
                    self.pos = save;
                    return Some(effects);
                }
            }
        }
    }

    fn parse_postfix(&mut self) -> Option<TypeExpr> {
        self.skip_ws();
        let mut ty = match self.peek()? {
            '(' => {
                let elems = self.parse_paren_list()?;
                let save = self.pos;
                let effects = self.parse_effects()?;
                if self.at_arrow() {
                    self.pos += 2;
                    let result = self.parse_type()?;
                    return Some(TypeExpr::Function(FunctionType {
                        params: elems,
                        effects,
                        result: Box::new(result),
                    }));
                }
                self.pos = save;
                if elems.len() == 1 && elems[0].label.is_none() {
                    elems.into_iter().next()?.ty
                } else {
                    TypeExpr::Tuple(elems)
                }
            }
            '[' => {
                self.pos += 1;
                let key = self.parse_type()?;
                if self.eat(':') {
                    let value = self.parse_type()?;
                    if !self.eat(']') {
                        return None;
                    }
                    TypeExpr::Dictionary(Box::new(key), Box::new(value))
                } else if self.eat(']') {
                    TypeExpr::Array(Box::new(key))
                } else {
                    return None;
                }
            }
            _ => TypeExpr::Named(vec![self.parse_segment()?]),
        };

        loop {
            match self.peek() {
                Some('?') => {
                    self.pos += 1;
                    ty = TypeExpr::Optional(Box::new(ty));
                }
                Some('!') => {
                    self.pos += 1;
                    ty = TypeExpr::ImplicitlyUnwrapped(Box::new(ty));
                }
                Some('.') if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') => {
                    self.pos += 3;
                    ty = TypeExpr::Variadic(Box::new(ty));
                }
                Some('.') => {
                    self.pos += 1;
                    let segment = self.parse_segment()?;
                    match &mut ty {
                        TypeExpr::Named(segments) => segments.push(segment),
                        _ => return None,
                    }
                }
                _ => return Some(ty),
            }
        }
    }

    fn parse_segment(&mut self) -> Option<PathSegment> {
        let name = self.ident()?;
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.parse_type()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return None;
            }
        }
        Some(PathSegment { name, args })
    }

    fn parse_paren_list(&mut self) -> Option<Vec<TupleElement>> {
        if !self.eat('(') {
            return None;
        }
        let mut elems = Vec::new();
        if self.eat(')') {
            return Some(elems);
        }
        loop {
            let label = self.parse_label();
            let ty = self.parse_type()?;
            elems.push(TupleElement { label, ty });
            if self.eat(',') {
                continue;
            }
            if self.eat(')') {
                return Some(elems);
            }
            return None;
        }
    }

    /// `name:` or `_ name:` ahead of an element type; restores the cursor otherwise.
    fn parse_label(&mut self) -> Option<String> {
        let save = self.pos;
        let Some(first) = self.ident() else {
            self.pos = save;
            return None;
        };
        if self.eat(':') {
            return Some(first);
        }
        if let Some(second) = self.ident() {
            if self.eat(':') {
                return Some(format!("{first} {second}"));
            }
        }
        self.pos = save;
        None
    }
}
