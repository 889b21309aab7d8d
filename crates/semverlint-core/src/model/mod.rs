//! The exported API surface of one project version.

pub mod decl;
pub mod package;
pub mod types;

pub use decl::{Const, Field, Func, Interface, Param, Struct, TypeDef, Var};
pub use package::{Api, Package};
pub use types::{identical, ChanDir, Type};
