//! Type system definitions for math expression values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type information for values and function parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeInfo {
    /// True / False; counts as 0 / 1 in arithmetic
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// Double precision float
    Float,
    /// Complex number
    Complex,
    /// Any non-complex number
    Real,
    /// An integer, a boolean, or a float with no fractional part
    Integral,
    /// Any value
    Any,
}

impl TypeInfo {
    /// Lowercase name used in messages and schemas
    pub const fn name(self) -> &'static str {
        match self {
            TypeInfo::Boolean => "bool",
            TypeInfo::Integer => "int",
            TypeInfo::Float => "float",
            TypeInfo::Complex => "complex",
            TypeInfo::Real => "real",
            TypeInfo::Integral => "integral",
            TypeInfo::Any => "any",
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
