//! Category-specific comparisons applied to name-matched declaration pairs.

use crate::diff::change::{Change, DeclKind};
use crate::model::{
    identical, Const, Field, Func, Interface, Param, Struct, Type, TypeDef, Var,
};
use std::collections::{BTreeMap, BTreeSet};

/// A name-keyed declaration with a structural comparison.
pub(crate) trait Declaration {
    fn name(&self) -> &str;

    /// Sub-changes between two versions of the same declaration, empty when
    /// they are equivalent.
    fn structural_changes(&self, current: &Self) -> Vec<Change>;
}

/// Match `prev` and `current` by name and report Added / Removed / changed
/// declarations of `kind`, in ascending name order.
///
/// A removed declaration is reported as `[Removed]` and nothing else.
pub(crate) fn diff_decls<T: Declaration>(prev: &[T], current: &[T], kind: DeclKind) -> Vec<Change> {
    let prev_index = index(prev);
    let current_index = index(current);
    let names: BTreeSet<&str> = prev_index
        .keys()
        .chain(current_index.keys())
        .copied()
        .collect();

    names
        .into_iter()
        .filter_map(|name| match (prev_index.get(name), current_index.get(name)) {
            (Some(_), None) => Some(Change::decl(name, kind, vec![Change::Removed])),
            (None, Some(_)) => Some(Change::decl(name, kind, vec![Change::Added])),
            (Some(p), Some(c)) => {
                let changes = p.structural_changes(c);
                (!changes.is_empty()).then(|| Change::decl(name, kind, changes))
            }
            (None, None) => None,
        })
        .collect()
}

fn index<T: Declaration>(decls: &[T]) -> BTreeMap<&str, &T> {
    decls.iter().map(|d| (d.name(), d)).collect()
}

impl Declaration for Const {
    fn name(&self) -> &str {
        &self.name
    }

    fn structural_changes(&self, current: &Self) -> Vec<Change> {
        let mut changes = Vec::new();
        if !identical(&self.ty, &current.ty) {
            changes.push(Change::type_changed(&self.ty, &current.ty));
        }
        if self.value != current.value {
            changes.push(Change::ValueChanged {
                from: self.value.clone(),
                to: current.value.clone(),
            });
        }
        changes
    }
}

impl Declaration for Var {
    fn name(&self) -> &str {
        &self.name
    }

    fn structural_changes(&self, current: &Self) -> Vec<Change> {
        if identical(&self.ty, &current.ty) {
            Vec::new()
        } else {
            vec![Change::type_changed(&self.ty, &current.ty)]
        }
    }
}

impl Declaration for Func {
    fn name(&self) -> &str {
        &self.name
    }

    fn structural_changes(&self, current: &Self) -> Vec<Change> {
        let mut changes = arg_changes(&self.args, &current.args);
        changes.extend(result_changes(&self.results, &current.results));
        changes
    }
}

impl Declaration for Struct {
    fn name(&self) -> &str {
        &self.name
    }

    fn structural_changes(&self, current: &Self) -> Vec<Change> {
        let mut changes = field_changes(&self.fields, &current.fields);
        changes.extend(diff_decls(
            &self.methods,
            &current.methods,
            DeclKind::Method,
        ));
        changes
    }
}

impl Declaration for Interface {
    fn name(&self) -> &str {
        &self.name
    }

    fn structural_changes(&self, current: &Self) -> Vec<Change> {
        diff_decls(&self.methods, &current.methods, DeclKind::Method)
    }
}

impl Declaration for TypeDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn structural_changes(&self, current: &Self) -> Vec<Change> {
        let mut changes = Vec::new();
        if !identical(&self.ty, &current.ty) {
            changes.push(Change::type_changed(&self.ty, &current.ty));
        }
        if self.alias != current.alias {
            changes.push(Change::AliasChanged {
                from: self.alias,
                to: current.alias,
            });
        }
        changes
    }
}

fn has_name(param: &Param) -> bool {
    !param.name.is_empty() && param.name != "_"
}

/// Pair each previous argument with its current counterpart.
///
/// Named arguments pair by name wherever they sit. Arguments left over pair
/// positionally when at least one side of that slot is unnamed.
fn match_args(prev: &[Param], current: &[Param]) -> (Vec<Option<usize>>, Vec<bool>) {
    let mut current_by_name: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (j, p) in current.iter().enumerate().filter(|(_, p)| has_name(p)) {
        current_by_name.entry(p.name.as_str()).or_default().push(j);
    }

    let mut counterpart = vec![None; prev.len()];
    let mut taken = vec![false; current.len()];

    // Same name at the same position first, so repeated names stay put.
    for (i, param) in prev.iter().enumerate().filter(|(_, p)| has_name(p)) {
        if current.get(i).is_some_and(|c| c.name == param.name) {
            counterpart[i] = Some(i);
            taken[i] = true;
        }
    }

    for (i, param) in prev.iter().enumerate().filter(|(_, p)| has_name(p)) {
        if counterpart[i].is_some() {
            continue;
        }
        let free = current_by_name
            .get(param.name.as_str())
            .and_then(|js| js.iter().copied().find(|&j| !taken[j]));
        if let Some(j) = free {
            counterpart[i] = Some(j);
            taken[j] = true;
        }
    }

    for (i, param) in prev.iter().enumerate() {
        if counterpart[i].is_some() || i >= current.len() || taken[i] {
            continue;
        }
        if !has_name(param) || !has_name(&current[i]) {
            counterpart[i] = Some(i);
            taken[i] = true;
        }
    }

    (counterpart, taken)
}

fn arg_changes(prev: &[Param], current: &[Param]) -> Vec<Change> {
    let (counterpart, taken) = match_args(prev, current);
    let mut changes = Vec::new();

    for (i, param) in prev.iter().enumerate() {
        let sub = match counterpart[i] {
            None => vec![Change::Removed],
            Some(j) => {
                let mut sub = Vec::new();
                if i != j {
                    sub.push(Change::PositionChanged { from: i, to: j });
                }
                if !identical(&param.ty, &current[j].ty) {
                    sub.push(Change::type_changed(&param.ty, &current[j].ty));
                }
                sub
            }
        };
        if !sub.is_empty() {
            changes.push(Change::ArgumentChanged {
                pos: i,
                name: param.name.clone(),
                ty: param.ty.clone(),
                changes: sub,
            });
        }
    }

    for (j, param) in current.iter().enumerate().filter(|(j, _)| !taken[*j]) {
        changes.push(Change::ArgumentChanged {
            pos: j,
            name: param.name.clone(),
            ty: param.ty.clone(),
            changes: vec![Change::Added],
        });
    }

    changes
}

fn result_changes(prev: &[Type], current: &[Type]) -> Vec<Change> {
    let len = prev.len().max(current.len());
    (0..len)
        .filter_map(|pos| {
            let (ty, sub) = match (prev.get(pos), current.get(pos)) {
                (Some(p), Some(c)) if identical(p, c) => return None,
                (Some(p), Some(c)) => (p, Change::type_changed(p, c)),
                (Some(p), None) => (p, Change::Removed),
                (None, Some(c)) => (c, Change::Added),
                (None, None) => return None,
            };
            Some(Change::ResultChanged {
                pos,
                ty: ty.clone(),
                changes: vec![sub],
            })
        })
        .collect()
}

fn field_changes(prev: &[Field], current: &[Field]) -> Vec<Change> {
    let current_pos: BTreeMap<&str, usize> = current
        .iter()
        .enumerate()
        .map(|(j, f)| (f.name.as_str(), j))
        .collect();
    let prev_names: BTreeSet<&str> = prev.iter().map(|f| f.name.as_str()).collect();
    let mut changes = Vec::new();

    for (i, field) in prev.iter().enumerate() {
        let sub = match current_pos.get(field.name.as_str()) {
            None => vec![Change::Removed],
            Some(&j) => {
                let mut sub = Vec::new();
                if i != j {
                    sub.push(Change::PositionChanged { from: i, to: j });
                }
                if !identical(&field.ty, &current[j].ty) {
                    sub.push(Change::type_changed(&field.ty, &current[j].ty));
                }
                sub
            }
        };
        if !sub.is_empty() {
            changes.push(Change::FieldChanged {
                pos: i,
                name: field.name.clone(),
                changes: sub,
            });
        }
    }

    for (j, field) in current.iter().enumerate() {
        if !prev_names.contains(field.name.as_str()) {
            changes.push(Change::FieldChanged {
                pos: j,
                name: field.name.clone(),
                changes: vec![Change::Added],
            });
        }
    }

    changes
}
