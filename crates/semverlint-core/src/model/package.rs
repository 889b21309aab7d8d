use crate::model::decl::{Const, Func, Interface, Struct, TypeDef, Var};
use crate::model::types::Type;
use serde::{Deserialize, Serialize};

/// One version's entire exported surface.
///
/// Produced once per version by the introspector. Snapshots are
/// [normalized](Api::normalize) on load and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Api {
    pub packages: Vec<Package>,
}

impl Api {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// Canonicalize every type descriptor (see [`Type::normalize`]).
    pub fn normalize(&mut self) {
        self.packages.iter_mut().for_each(Package::normalize);
    }
}

impl FromIterator<Package> for Api {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A package with all its exported members.
///
/// `path` is the identity across versions; `name` is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub consts: Vec<Const>,
    #[serde(default)]
    pub vars: Vec<Var>,
    #[serde(default)]
    pub funcs: Vec<Func>,
    #[serde(default)]
    pub structs: Vec<Struct>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub typedefs: Vec<TypeDef>,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_const(mut self, c: Const) -> Self {
        self.consts.push(c);
        self
    }

    pub fn with_var(mut self, v: Var) -> Self {
        self.vars.push(v);
        self
    }

    pub fn with_func(mut self, f: Func) -> Self {
        self.funcs.push(f);
        self
    }

    pub fn with_struct(mut self, s: Struct) -> Self {
        self.structs.push(s);
        self
    }

    pub fn with_interface(mut self, i: Interface) -> Self {
        self.interfaces.push(i);
        self
    }

    pub fn with_typedef(mut self, t: TypeDef) -> Self {
        self.typedefs.push(t);
        self
    }

    pub fn normalize(&mut self) {
        let funcs = self
            .funcs
            .iter_mut()
            .chain(self.structs.iter_mut().flat_map(|s| s.methods.iter_mut()))
            .chain(self.interfaces.iter_mut().flat_map(|i| i.methods.iter_mut()));
        for func in funcs {
            func.args.iter_mut().for_each(|p| p.ty.normalize());
            func.results.iter_mut().for_each(Type::normalize);
        }

        let types = self
            .consts
            .iter_mut()
            .map(|c| &mut c.ty)
            .chain(self.vars.iter_mut().map(|v| &mut v.ty))
            .chain(
                self.structs
                    .iter_mut()
                    .flat_map(|s| s.fields.iter_mut().map(|f| &mut f.ty)),
            )
            .chain(self.typedefs.iter_mut().map(|t| &mut t.ty));
        types.for_each(Type::normalize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Func, Var};

    fn packageless(name: &str) -> Type {
        Type::Named {
            package: String::new(),
            name: name.into(),
        }
    }

    #[test]
    fn test_normalize_reaches_every_declaration() {
        let mut api: Api = vec![Package::new("a", "example.com/a")
            .with_var(Var::new("E", packageless("error")))
            .with_func(Func::new("F").arg("e", packageless("error")))
            .with_struct(
                Struct::new("S")
                    .field("Err", Type::slice(packageless("error")))
                    .method(Func::new("M").result(packageless("error"))),
            )
            .with_typedef(TypeDef::defined("T", packageless("error")))]
        .into_iter()
        .collect();
        api.normalize();

        let pkg = &api.packages[0];
        let error = Type::basic("error");
        assert_eq!(pkg.vars[0].ty, error);
        assert_eq!(pkg.funcs[0].args[0].ty, error);
        assert_eq!(pkg.structs[0].fields, vec![Field::new("Err", Type::slice(error.clone()))]);
        assert_eq!(pkg.structs[0].methods[0].results, vec![error.clone()]);
        assert_eq!(pkg.typedefs[0].ty, error);
    }

    #[test]
    fn test_missing_categories_deserialize_empty() {
        let json = r#"[{"name": "a", "path": "example.com/a",
                        "vars": [{"name": "V", "type": {"kind": "basic", "name": "int"}}]}]"#;
        let api: Api = serde_json::from_str(json).unwrap();
        let pkg = &api.packages[0];
        assert_eq!(pkg.vars.len(), 1);
        assert_eq!(pkg.vars[0].ty, Type::basic("int"));
        assert!(pkg.funcs.is_empty());
        assert!(pkg.typedefs.is_empty());
    }
}
