//! Fixed-schema ratio families
//!
//! A ratio family is an enum of predicate classes. Counts are kept in a
//! zero-initialized slot per class, so every class is always reported, with
//! `0.0` when nothing matched.

use super::frequency::Keyword;
use super::record::Scalar;
use super::table::OrderedTable;
use std::fmt;
use std::marker::PhantomData;

/// One family of predicate classes
pub trait RatioClass: Copy + 'static {
    /// What the predicates are applied to
    type Item: ?Sized;

    /// Every class of the family, in output order
    const ALL: &'static [Self];

    /// Position of this class in [`RatioClass::ALL`]
    fn index(self) -> usize;

    /// Key suffix in the ratio table
    fn label(self) -> &'static str;

    /// Check if `item` satisfies this class
    fn matches(self, item: &Self::Item) -> bool;
}

/// Per-class match counts of one family
pub struct ClassCounts<C: RatioClass> {
    counts: Vec<usize>,
    _class: PhantomData<C>,
}

impl<C: RatioClass> Default for ClassCounts<C> {
    fn default() -> Self {
        Self {
            counts: vec![0; C::ALL.len()],
            _class: PhantomData,
        }
    }
}

impl<C: RatioClass> Clone for ClassCounts<C> {
    fn clone(&self) -> Self {
        Self {
            counts: self.counts.clone(),
            _class: PhantomData,
        }
    }
}

impl<C: RatioClass> fmt::Debug for ClassCounts<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(C::ALL.iter().map(|c| (c.label(), self.counts[c.index()])))
            .finish()
    }
}

impl<C: RatioClass> ClassCounts<C> {
    /// Create counts with every class at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `item`, counting it `multiplicity` times for each match
    pub fn observe(&mut self, item: &C::Item, multiplicity: usize) {
        for &class in C::ALL {
            if class.matches(item) {
                self.counts[class.index()] += multiplicity;
            }
        }
    }

    /// Matches recorded for `class`
    pub fn get(&self, class: C) -> usize {
        self.counts[class.index()]
    }

    /// `get(class) / normalizer`, or 0.0 when the normalizer is zero
    pub fn ratio(&self, class: C, normalizer: usize) -> f64 {
        if normalizer == 0 {
            0.0
        } else {
            self.get(class) as f64 / normalizer as f64
        }
    }

    /// Write `prefix + label -> ratio` for every class of the family
    pub fn write_ratios(&self, prefix: &str, normalizer: usize, out: &mut OrderedTable<String, f64>) {
        for &class in C::ALL {
            out.insert(
                format!("{}{}", prefix, class.label()),
                self.ratio(class, normalizer),
            );
        }
    }
}

/// Type classes of captured values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// Exactly `true`
    True,
    /// Exactly `false`
    False,
    /// Any number or boolean
    Numeric,
    /// Any string
    String,
    /// A string containing a line feed
    Newlines,
}

impl RatioClass for ValueClass {
    type Item = Scalar;

    const ALL: &'static [Self] = &[
        ValueClass::True,
        ValueClass::False,
        ValueClass::Numeric,
        ValueClass::String,
        ValueClass::Newlines,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            ValueClass::True => "true",
            ValueClass::False => "false",
            ValueClass::Numeric => "numeric",
            ValueClass::String => "string",
            ValueClass::Newlines => "newlines",
        }
    }

    fn matches(self, item: &Scalar) -> bool {
        match self {
            ValueClass::True => matches!(item, Scalar::Bool(true)),
            ValueClass::False => matches!(item, Scalar::Bool(false)),
            ValueClass::Numeric => item.is_numeric() || matches!(item, Scalar::Bool(_)),
            ValueClass::String => matches!(item, Scalar::Str(_)),
            ValueClass::Newlines => item
                .as_str()
                .is_some_and(|s| memchr::memchr(b'\n', s.as_bytes()).is_some()),
        }
    }
}

/// Identifiers commonly abused by obfuscated scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedName {
    /// `toString`
    ToString,
    /// `eval`
    Eval,
    /// `escape`
    Escape,
    /// `unescape`
    Unescape,
    /// `fromCharCode`
    FromCharCode,
    /// `charCodeAt`
    CharCodeAt,
    /// `charAt`
    CharAt,
    /// `indexOf`
    IndexOf,
    /// `valueOf`
    ValueOf,
    /// `undefined`
    Undefined,
}

impl RatioClass for ReservedName {
    type Item = str;

    const ALL: &'static [Self] = &[
        ReservedName::ToString,
        ReservedName::Eval,
        ReservedName::Escape,
        ReservedName::Unescape,
        ReservedName::FromCharCode,
        ReservedName::CharCodeAt,
        ReservedName::CharAt,
        ReservedName::IndexOf,
        ReservedName::ValueOf,
        ReservedName::Undefined,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            ReservedName::ToString => "toString",
            ReservedName::Eval => "eval",
            ReservedName::Escape => "escape",
            ReservedName::Unescape => "unescape",
            ReservedName::FromCharCode => "fromCharCode",
            ReservedName::CharCodeAt => "charCodeAt",
            ReservedName::CharAt => "charAt",
            ReservedName::IndexOf => "indexOf",
            ReservedName::ValueOf => "valueOf",
            ReservedName::Undefined => "undefined",
        }
    }

    fn matches(self, item: &str) -> bool {
        item == self.label()
    }
}

/// Raw literal classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawClass {
    /// The `null` literal
    Null,
}

impl RatioClass for RawClass {
    type Item = str;

    const ALL: &'static [Self] = &[RawClass::Null];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            RawClass::Null => "null",
        }
    }

    fn matches(self, item: &str) -> bool {
        item == self.label()
    }
}

/// Operator classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    /// `instanceof`
    Instanceof,
    /// `typeof`
    Typeof,
}

impl RatioClass for OperatorClass {
    type Item = str;

    const ALL: &'static [Self] = &[OperatorClass::Instanceof, OperatorClass::Typeof];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            OperatorClass::Instanceof => "instanceof",
            OperatorClass::Typeof => "typeof",
        }
    }

    fn matches(self, item: &str) -> bool {
        item == self.label()
    }
}

impl RatioClass for Keyword {
    type Item = Keyword;

    const ALL: &'static [Self] = Keyword::ALL;

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        self.as_str()
    }

    fn matches(self, item: &Keyword) -> bool {
        self == *item
    }
}
