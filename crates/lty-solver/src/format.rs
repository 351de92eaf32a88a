//! Type display.

use crate::types::Ty;
use std::fmt;

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Unknown => f.write_str("unknown"),
            Ty::Any => f.write_str("any"),
            Ty::Nil => f.write_str("nil"),
            Ty::Primitive(kind) => f.write_str(kind.name()),
            Ty::Class(cls) => f.write_str(cls.display_name()),
            Ty::Array(element) => match element.as_ref() {
                // `(A|B)[]`, not `A|B[]`
                Ty::Union(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Ty::Generic { base, params } => {
                write!(f, "{base}<")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(">")
            }
            Ty::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}
