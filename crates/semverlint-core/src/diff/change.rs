//! Change tree produced by the differencer.
//!
//! Every node renders to the stable human-readable form used in reports, and
//! [`Change::is_breaking`] classifies it. Both are exhaustive matches, so a
//! new variant must be handled by every consumer.

use crate::model::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of declaration a [`Change::Decl`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Var,
    Const,
    Func,
    Interface,
    Struct,
    TypeDef,
    Package,
    /// A method nested inside a struct or interface change.
    Method,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclKind::Var => "package-level variable",
            DeclKind::Const => "package-level constant",
            DeclKind::Func => "function",
            DeclKind::Interface => "interface",
            DeclKind::Struct => "struct",
            DeclKind::TypeDef => "type definition",
            DeclKind::Package => "package",
            DeclKind::Method => "method",
        })
    }
}

/// One node of the change tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    Removed,
    Added,
    ValueChanged {
        from: String,
        to: String,
    },
    TypeChanged {
        from: Type,
        to: Type,
    },
    PositionChanged {
        from: usize,
        to: usize,
    },
    /// A type definition switched between alias and defined type.
    AliasChanged {
        from: bool,
        to: bool,
    },
    FieldChanged {
        pos: usize,
        name: String,
        changes: Vec<Change>,
    },
    ArgumentChanged {
        pos: usize,
        name: String,
        #[serde(rename = "type")]
        ty: Type,
        changes: Vec<Change>,
    },
    ResultChanged {
        pos: usize,
        #[serde(rename = "type")]
        ty: Type,
        changes: Vec<Change>,
    },
    Decl {
        name: String,
        kind: DeclKind,
        changes: Vec<Change>,
    },
}

impl Change {
    pub fn decl(name: impl Into<String>, kind: DeclKind, changes: Vec<Change>) -> Self {
        Change::Decl {
            name: name.into(),
            kind,
            changes,
        }
    }

    pub fn type_changed(from: &Type, to: &Type) -> Self {
        Change::TypeChanged {
            from: from.clone(),
            to: to.clone(),
        }
    }

    /// Whether this change can break existing client code.
    ///
    /// `Added` and `ValueChanged` never are. A `Decl` is breaking only through
    /// a breaking child.
    pub fn is_breaking(&self) -> bool {
        match self {
            Change::Removed
            | Change::PositionChanged { .. }
            | Change::TypeChanged { .. }
            | Change::AliasChanged { .. }
            | Change::FieldChanged { .. }
            | Change::ResultChanged { .. }
            | Change::ArgumentChanged { .. } => true,
            Change::Added | Change::ValueChanged { .. } => false,
            Change::Decl { changes, .. } => changes.iter().any(Change::is_breaking),
        }
    }

    /// Nested changes, empty for leaf nodes.
    pub fn children(&self) -> &[Change] {
        match self {
            Change::FieldChanged { changes, .. }
            | Change::ArgumentChanged { changes, .. }
            | Change::ResultChanged { changes, .. }
            | Change::Decl { changes, .. } => changes,
            _ => &[],
        }
    }
}

/// Free-function form of [`Change::is_breaking`].
pub fn is_breaking(change: &Change) -> bool {
    change.is_breaking()
}

struct Joined<'a>(&'a [Change]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, change) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", change)?;
        }
        Ok(())
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Removed => f.write_str("was removed"),
            Change::Added => f.write_str("was added"),
            Change::ValueChanged { from, to } => {
                write!(f, "value changed from {} to {}", from, to)
            }
            Change::TypeChanged { from, to } => write!(
                f,
                "type changed from {:?} to {:?}",
                from.to_string(),
                to.to_string()
            ),
            Change::PositionChanged { from, to } => {
                write!(f, "position changed from {} to {}", from, to)
            }
            Change::AliasChanged { from: true, .. } => {
                f.write_str("changed from alias to defined type")
            }
            Change::AliasChanged { .. } => f.write_str("changed from defined type to alias"),
            Change::FieldChanged { pos, name, changes } => write!(
                f,
                "field {:?} at position {}: {}",
                name,
                pos,
                Joined(changes)
            ),
            Change::ArgumentChanged {
                pos,
                name,
                ty,
                changes,
            } => write!(
                f,
                "argument {} with type {} at position {}: {}",
                name,
                ty,
                pos,
                Joined(changes)
            ),
            Change::ResultChanged { pos, ty, changes } => write!(
                f,
                "result with type {} at position {}: {}",
                ty,
                pos,
                Joined(changes)
            ),
            Change::Decl {
                name,
                kind,
                changes,
            } => write!(f, "{} {}: {}", kind, name, Joined(changes)),
        }
    }
}

/// All changes found in one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageChanges {
    pub name: String,
    pub path: String,
    pub changes: Vec<Change>,
}

impl PackageChanges {
    pub fn new(name: impl Into<String>, path: impl Into<String>, changes: Vec<Change>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            changes,
        }
    }

    pub fn is_breaking(&self) -> bool {
        self.changes.iter().any(Change::is_breaking)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Result of comparing two API snapshots, one entry per package path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiChanges {
    pub packages: Vec<PackageChanges>,
}

impl ApiChanges {
    pub fn is_breaking(&self) -> bool {
        self.packages.iter().any(PackageChanges::is_breaking)
    }

    /// True when no package has any change.
    pub fn is_empty(&self) -> bool {
        self.packages.iter().all(PackageChanges::is_empty)
    }

    pub fn change_count(&self) -> usize {
        self.packages.iter().map(|p| p.changes.len()).sum()
    }

    /// Top-level breaking changes paired with their package path.
    pub fn breaking_changes(&self) -> impl Iterator<Item = (&str, &Change)> {
        self.packages.iter().flat_map(|p| {
            p.changes
                .iter()
                .filter(|c| c.is_breaking())
                .map(move |c| (p.path.as_str(), c))
        })
    }

    /// One rendered line per top-level change, `<path>: <change>`.
    pub fn render_lines(&self) -> Vec<String> {
        self.packages
            .iter()
            .flat_map(|p| p.changes.iter().map(move |c| format!("{}: {}", p.path, c)))
            .collect()
    }
}
