//! Type descriptors and the type identity predicate.
//!
//! Named types compare nominally by `(package, name)`. Structural types
//! compare by kind and constituent types, never by unfolding a named type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A canonical type descriptor as produced by the source introspector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// Predeclared type such as `int`, `string` or `error`.
    Basic { name: String },
    /// Declared type identified by its declaring package path and name.
    Named { package: String, name: String },
    Pointer { elem: Box<Type> },
    Slice { elem: Box<Type> },
    Array { len: u64, elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    /// Function type. When `variadic` is set the last parameter is a slice.
    Signature {
        params: Vec<Type>,
        results: Vec<Type>,
        #[serde(default)]
        variadic: bool,
    },
}

impl Type {
    pub fn basic(name: impl Into<String>) -> Self {
        Type::Basic { name: name.into() }
    }

    /// A declared type. An empty package denotes a universe-scope type
    /// (`error`, `comparable`), which is represented as [`Type::Basic`].
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        let package = package.into();
        if package.is_empty() {
            return Type::basic(name);
        }
        Type::Named {
            package,
            name: name.into(),
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: Type) -> Self {
        Type::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn signature(params: Vec<Type>, results: Vec<Type>) -> Self {
        Type::Signature {
            params,
            results,
            variadic: false,
        }
    }

    /// Rewrite package-less named types to their basic form, recursively.
    ///
    /// Introspectors disagree on whether `error` is basic or named with no
    /// package; both spellings must compare identical.
    pub fn normalize(&mut self) {
        match self {
            Type::Named { package, name } if package.is_empty() => {
                let name = std::mem::take(name);
                *self = Type::Basic { name };
            }
            Type::Basic { .. } | Type::Named { .. } => {}
            Type::Pointer { elem }
            | Type::Slice { elem }
            | Type::Array { elem, .. }
            | Type::Chan { elem, .. } => elem.normalize(),
            Type::Map { key, value } => {
                key.normalize();
                value.normalize();
            }
            Type::Signature {
                params, results, ..
            } => {
                params.iter_mut().for_each(Type::normalize);
                results.iter_mut().for_each(Type::normalize);
            }
        }
    }
}

/// Report whether `a` and `b` denote the same type.
pub fn identical(a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Basic { name: x }, Type::Basic { name: y }) => x == y,
        (
            Type::Named {
                package: xp,
                name: xn,
            },
            Type::Named {
                package: yp,
                name: yn,
            },
        ) => xp == yp && xn == yn,
        (Type::Pointer { elem: x }, Type::Pointer { elem: y }) => identical(x, y),
        (Type::Slice { elem: x }, Type::Slice { elem: y }) => identical(x, y),
        (Type::Array { len: xl, elem: x }, Type::Array { len: yl, elem: y }) => {
            xl == yl && identical(x, y)
        }
        (Type::Map { key: xk, value: xv }, Type::Map { key: yk, value: yv }) => {
            identical(xk, yk) && identical(xv, yv)
        }
        (Type::Chan { dir: xd, elem: x }, Type::Chan { dir: yd, elem: y }) => {
            xd == yd && identical(x, y)
        }
        (
            Type::Signature {
                params: xp,
                results: xr,
                variadic: xv,
            },
            Type::Signature {
                params: yp,
                results: yr,
                variadic: yv,
            },
        ) => xv == yv && identical_list(xp, yp) && identical_list(xr, yr),
        _ => false,
    }
}

fn identical_list(xs: &[Type], ys: &[Type]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| identical(x, y))
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic { name } => f.write_str(name),
            Type::Named { package, name } => write!(f, "{}.{}", package, name),
            Type::Pointer { elem } => write!(f, "*{}", elem),
            Type::Slice { elem } => write!(f, "[]{}", elem),
            Type::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Chan { dir, elem } => match dir {
                // `chan <-chan T` would parse as `chan<- chan T`
                ChanDir::Both if matches!(**elem, Type::Chan { dir: ChanDir::Recv, .. }) => {
                    write!(f, "chan ({})", elem)
                }
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            Type::Signature {
                params,
                results,
                variadic,
            } => {
                f.write_str("func(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match param {
                        Type::Slice { elem } if *variadic && i + 1 == params.len() => {
                            write!(f, "...{}", elem)?
                        }
                        _ => write!(f, "{}", param)?,
                    }
                }
                f.write_str(")")?;
                match results.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " {}", single),
                    _ => {
                        f.write_str(" (")?;
                        for (i, result) in results.iter().enumerate() {
                            if i > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}", result)?;
                        }
                        f.write_str(")")
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> Type {
        Type::basic("int")
    }

    #[test]
    fn test_named_types_compare_nominally() {
        let a = Type::named("example.com/a", "ID");
        let b = Type::named("example.com/b", "ID");
        assert!(identical(&a, &a.clone()));
        assert!(!identical(&a, &b));
        // A named type is never its underlying basic type
        assert!(!identical(&a, &int()));
    }

    #[test]
    fn test_array_length_matters() {
        assert!(identical(&Type::array(4, int()), &Type::array(4, int())));
        assert!(!identical(&Type::array(4, int()), &Type::array(5, int())));
        assert!(!identical(&Type::array(4, int()), &Type::slice(int())));
    }

    #[test]
    fn test_channel_direction_matters() {
        let both = Type::chan(ChanDir::Both, int());
        let recv = Type::chan(ChanDir::Recv, int());
        assert!(!identical(&both, &recv));
        assert!(identical(&recv, &Type::chan(ChanDir::Recv, int())));
    }

    #[test]
    fn test_signature_arity_and_variadic() {
        let f1 = Type::signature(vec![int()], vec![Type::basic("error")]);
        let f2 = Type::signature(vec![int(), int()], vec![Type::basic("error")]);
        assert!(!identical(&f1, &f2));

        let Type::Signature {
            params, results, ..
        } = f1.clone()
        else {
            unreachable!()
        };
        let variadic = Type::Signature {
            params,
            results,
            variadic: true,
        };
        assert!(!identical(&f1, &variadic));
    }

    #[test]
    fn test_map_key_and_value() {
        let m = Type::map(Type::basic("string"), int());
        assert!(identical(&m, &Type::map(Type::basic("string"), int())));
        assert!(!identical(&m, &Type::map(int(), int())));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(
            Type::pointer(Type::named("example.com/x", "T")).to_string(),
            "*example.com/x.T"
        );
        assert_eq!(
            Type::map(Type::basic("string"), Type::slice(int())).to_string(),
            "map[string][]int"
        );
        assert_eq!(Type::chan(ChanDir::Send, int()).to_string(), "chan<- int");
        assert_eq!(Type::chan(ChanDir::Recv, int()).to_string(), "<-chan int");
        assert_eq!(Type::array(3, int()).to_string(), "[3]int");

        let sig = Type::Signature {
            params: vec![int(), Type::slice(Type::basic("string"))],
            results: vec![Type::basic("bool"), Type::basic("error")],
            variadic: true,
        };
        assert_eq!(sig.to_string(), "func(int, ...string) (bool, error)");
        assert_eq!(Type::signature(vec![], vec![int()]).to_string(), "func() int");
    }

    #[test]
    fn test_nested_channel_display_is_unambiguous() {
        let recv = Type::chan(ChanDir::Recv, int());
        assert_eq!(
            Type::chan(ChanDir::Both, recv.clone()).to_string(),
            "chan (<-chan int)"
        );
        assert_eq!(
            Type::chan(ChanDir::Send, Type::chan(ChanDir::Both, int())).to_string(),
            "chan<- chan int"
        );
        assert_eq!(Type::chan(ChanDir::Recv, recv).to_string(), "<-chan <-chan int");
    }

    #[test]
    fn test_packageless_named_is_basic() {
        assert_eq!(Type::named("", "error"), Type::basic("error"));

        let mut t = Type::signature(
            vec![Type::Named {
                package: String::new(),
                name: "error".into(),
            }],
            vec![Type::map(
                Type::basic("string"),
                Type::pointer(Type::Named {
                    package: String::new(),
                    name: "comparable".into(),
                }),
            )],
        );
        t.normalize();
        assert_eq!(
            t,
            Type::signature(
                vec![Type::basic("error")],
                vec![Type::map(
                    Type::basic("string"),
                    Type::pointer(Type::basic("comparable"))
                )],
            )
        );

        let mut qualified = Type::named("example.com/x", "T");
        qualified.normalize();
        assert_eq!(qualified, Type::named("example.com/x", "T"));
    }

    #[test]
    fn test_serde_shape() {
        let t = Type::pointer(Type::named("example.com/x", "T"));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["kind"], "pointer");
        assert_eq!(json["elem"]["kind"], "named");
        let back: Type = serde_json::from_value(json).unwrap();
        assert!(identical(&t, &back));
    }
}
