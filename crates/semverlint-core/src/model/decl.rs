//! Exported declarations, one struct per category.

use crate::model::types::Type;
use serde::{Deserialize, Serialize};

/// Exported constant. `value` is the canonical exact textual value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Const {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    pub value: String,
}

impl Const {
    pub fn new(name: impl Into<String>, ty: Type, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            value: value.into(),
        }
    }
}

/// Exported package-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function parameter. `name` is empty for unnamed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self::new("", ty)
    }
}

/// Free function or method. Argument and result order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Type>,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.args.push(Param::new(name, ty));
        self
    }

    pub fn result(mut self, ty: Type) -> Self {
        self.results.push(ty);
        self
    }
}

/// Struct field, identified by name and position within its struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Exported struct. `methods` is the merged value and pointer receiver set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Func>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    pub fn method(mut self, method: Func) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Func>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: Func) -> Self {
        self.methods.push(method);
        self
    }
}

/// `type A B` (defined type) or `type A = B` (alias).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub alias: bool,
}

impl TypeDef {
    pub fn defined(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            alias: false,
        }
    }

    pub fn alias(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            alias: true,
        }
    }
}
