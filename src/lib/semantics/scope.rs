use crate::semantics::*;
use crate::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// The type parameters declared directly in one module or class body.
#[derive(Debug, Default, Serialize)]
pub struct Scope {
    type_parameters: BTreeMap<String, TypeParameter>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope::default()
    }

    /// Binds the parameter under its name. A later declaration of the
    /// same name replaces the earlier one, like a constant reassignment.
    pub fn register(&mut self, type_parameter: TypeParameter) -> Option<TypeParameter> {
        self.type_parameters
            .insert(type_parameter.name.clone(), type_parameter)
    }

    pub fn get(&self, name: &str) -> Option<&TypeParameter> {
        self.type_parameters.get(name)
    }

    pub fn type_parameters(&self) -> impl Iterator<Item = &TypeParameter> {
        self.type_parameters.values()
    }

    pub fn len(&self) -> usize {
        self.type_parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_parameters.is_empty()
    }
}

/// Scopes by qualified name (`A`, `A::B`). Declarations outside of
/// any module or class belong to the root scope, named `""`.
#[derive(Debug, Default, Serialize)]
pub struct SymbolTable {
    scopes: BTreeMap<String, Scope>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.get(name)
    }

    pub fn scope_mut(&mut self, name: &str) -> &mut Scope {
        self.scopes.entry(name.into()).or_insert_with(Scope::new)
    }

    pub fn register(&mut self, scope: &str, type_parameter: TypeParameter) {
        let name = type_parameter.name.clone();
        if let Some(previous) = self.scope_mut(scope).register(type_parameter) {
            debug!(
                "{}::{} redeclared, replacing declaration at {}",
                scope, name, previous.decl_span
            );
        }
    }

    pub fn lookup(&self, scope: &str, name: &str) -> Option<&TypeParameter> {
        self.scope(scope)?.get(name)
    }

    pub fn scopes(&self) -> impl Iterator<Item = (&String, &Scope)> {
        self.scopes.iter()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, scope) in self.scopes.iter() {
            writeln!(f, "{}", if name.is_empty() { "<root>" } else { name })?;
            for param in scope.type_parameters() {
                writeln!(f, "  {}", param)?;
            }
        }
        Ok(())
    }
}
