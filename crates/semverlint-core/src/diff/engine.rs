//! API diff computation engine.
//!
//! The entry point is [`diff`], which compares two snapshots package by
//! package and returns an [`ApiChanges`].

use crate::diff::change::{ApiChanges, Change, DeclKind, PackageChanges};
use crate::diff::structural::diff_decls;
use crate::model::{Api, Package};
use crate::{log_op_end, log_op_start};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// Compute the structured difference from `prev` to `current`.
///
/// Packages are matched by path and reported in ascending path order, one
/// entry per path present in either snapshot. Unchanged packages carry an
/// empty change list. Never fails.
pub fn diff(prev: &Api, current: &Api) -> ApiChanges {
    let start = Instant::now();
    log_op_start!(
        "diff",
        prev_pkg_count = prev.packages.len(),
        current_pkg_count = current.packages.len()
    );

    let prev_index = packages_index(prev);
    let current_index = packages_index(current);
    let paths: BTreeSet<&str> = prev_index
        .keys()
        .chain(current_index.keys())
        .copied()
        .collect();

    let packages: Vec<PackageChanges> = paths
        .into_iter()
        .filter_map(|path| {
            let changes = match (prev_index.get(path), current_index.get(path)) {
                (Some(p), None) => whole_package(p, Change::Removed),
                (None, Some(c)) => whole_package(c, Change::Added),
                (Some(p), Some(c)) => package_diff(p, c),
                (None, None) => return None,
            };
            tracing::debug!(
                package_path = path,
                change_count = changes.changes.len(),
                breaking = changes.is_breaking(),
                "package compared"
            );
            Some(changes)
        })
        .collect();

    let result = ApiChanges { packages };
    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        pkg_count = result.packages.len(),
        change_count = result.change_count(),
        breaking = result.is_breaking()
    );
    result
}

fn whole_package(pkg: &Package, change: Change) -> PackageChanges {
    PackageChanges::new(
        &pkg.name,
        &pkg.path,
        vec![Change::decl(&pkg.name, DeclKind::Package, vec![change])],
    )
}

/// Diff the six declaration categories of a package present in both
/// snapshots. The reported name is the current one.
pub fn package_diff(prev: &Package, current: &Package) -> PackageChanges {
    let mut changes = Vec::new();
    changes.extend(diff_decls(&prev.consts, &current.consts, DeclKind::Const));
    changes.extend(diff_decls(&prev.vars, &current.vars, DeclKind::Var));
    changes.extend(diff_decls(&prev.funcs, &current.funcs, DeclKind::Func));
    changes.extend(diff_decls(&prev.structs, &current.structs, DeclKind::Struct));
    changes.extend(diff_decls(
        &prev.interfaces,
        &current.interfaces,
        DeclKind::Interface,
    ));
    changes.extend(diff_decls(
        &prev.typedefs,
        &current.typedefs,
        DeclKind::TypeDef,
    ));
    PackageChanges::new(&current.name, &current.path, changes)
}

fn packages_index(api: &Api) -> BTreeMap<&str, &Package> {
    api.packages.iter().map(|p| (p.path.as_str(), p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Const, Func, Type};

    fn pkg(path: &str) -> Package {
        Package::new(path.rsplit('/').next().unwrap_or(path), path)
    }

    #[test]
    fn test_package_removed_and_added() {
        let prev = Api::new(vec![pkg("example.com/old")]);
        let current = Api::new(vec![pkg("example.com/new")]);
        let changes = diff(&prev, &current);
        assert_eq!(
            changes.packages,
            vec![
                PackageChanges::new(
                    "new",
                    "example.com/new",
                    vec![Change::decl("new", DeclKind::Package, vec![Change::Added])],
                ),
                PackageChanges::new(
                    "old",
                    "example.com/old",
                    vec![Change::decl("old", DeclKind::Package, vec![Change::Removed])],
                ),
            ]
        );
        assert!(changes.is_breaking());
    }

    #[test]
    fn test_unchanged_package_is_listed_empty() {
        let a = Api::new(vec![pkg("example.com/a").with_func(Func::new("F"))]);
        let changes = diff(&a, &a.clone());
        assert_eq!(changes.packages.len(), 1);
        assert!(changes.packages[0].is_empty());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_categories_follow_fixed_order() {
        let prev = pkg("example.com/a")
            .with_func(Func::new("A"))
            .with_const(Const::new("Z", Type::basic("int"), "1"));
        let current = pkg("example.com/a");
        let result = package_diff(&prev, &current);
        let rendered: Vec<String> = result.changes.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "package-level constant Z: was removed",
                "function A: was removed",
            ]
        );
    }

    #[test]
    fn test_renamed_package_reports_current_name() {
        let prev = Api::new(vec![Package::new("old", "example.com/a")]);
        let current = Api::new(vec![Package::new("renamed", "example.com/a")]);
        let changes = diff(&prev, &current);
        assert_eq!(changes.packages[0].name, "renamed");
        assert!(changes.packages[0].is_empty());
    }
}
