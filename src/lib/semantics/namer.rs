use crate::semantics::*;
use crate::syntax::*;
use crate::*;
use rayon::prelude::*;

/// Walks module and class bodies, classifies every type parameter
/// declaration and binds the results into a [`SymbolTable`].
pub struct Namer {
    resolver: BoundsResolver,
}

/// Everything naming produced for a set of files.
pub struct Naming {
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Namer {
    pub fn new() -> Namer {
        Namer {
            resolver: BoundsResolver::new(),
        }
    }

    /// Names the parsed files in order. Each file's parse diagnostics are
    /// merged with its naming diagnostics, and reach the reporter grouped
    /// by file and ordered by source position within each file.
    pub fn run(&self, parsed: Vec<(Arc<Tree>, Vec<Diagnostic>)>, reporter: &mut dyn Reporter) -> SymbolTable {
        let mut symbols = SymbolTable::new();

        for (tree, mut diagnostics) in parsed {
            for (scope, _) in tree.scopes() {
                symbols.scope_mut(&scope);
            }

            let declarations = tree.declarations();
            let classified: Vec<_> = declarations
                .par_iter()
                .map(|(_, declaration)| self.resolver.classify(declaration).into_parts())
                .collect();

            for ((scope, declaration), (param, d)) in declarations.iter().zip(classified) {
                diagnostics.extend(d);
                match param {
                    Some(param) => symbols.register(scope, param),
                    None => warn!("No type parameter for {} at {}", declaration.name, declaration.name_span),
                }
            }
            diagnostics.sort_by_key(|d| d.span().start.offset);

            debug!(
                "Named {} declaration(s) in {} with {} diagnostic(s)",
                declarations.len(),
                tree.source,
                diagnostics.len()
            );
            reporter.report_all(diagnostics);
        }

        symbols
    }

    pub fn name(&self, parsed: Vec<(Arc<Tree>, Vec<Diagnostic>)>) -> Naming {
        let mut diagnostics = vec![];
        let symbols = self.run(parsed, &mut diagnostics);
        Naming {
            symbols,
            diagnostics,
        }
    }
}

impl Default for Namer {
    fn default() -> Self {
        Namer::new()
    }
}
