mod arguments;
pub use self::arguments::*;

mod declaration_call;
pub use self::declaration_call::*;

mod declaration;
pub use self::declaration::*;

mod scope;
pub use self::scope::*;

use crate::*;

/// The parsed form of one source file: the statements this phase cares
/// about, nested by the module and class bodies they appear in.
#[derive(Debug)]
pub struct Tree {
    pub source: Arc<Source>,
    pub statements: Vec<Statement>,
}

impl Tree {
    pub fn new(source: Arc<Source>, statements: Vec<Statement>) -> Tree {
        Tree { source, statements }
    }

    /// All declarations in the file, in source order, paired with
    /// the qualified name of the scope they are declared in.
    pub fn declarations(&self) -> Vec<(String, &Declaration)> {
        let mut out = vec![];
        collect_declarations(&self.statements, "", &mut out);
        out
    }

    /// All scopes in the file in depth-first order, by qualified name.
    pub fn scopes(&self) -> Vec<(String, &ScopeNode)> {
        let mut out = vec![];
        collect_scopes(&self.statements, "", &mut out);
        out
    }
}

fn collect_declarations<'a>(
    statements: &'a [Statement],
    scope: &str,
    out: &mut Vec<(String, &'a Declaration)>,
) {
    for statement in statements {
        match statement {
            Statement::Declaration(ref d) => out.push((scope.into(), d)),
            Statement::Scope(ref s) => {
                collect_declarations(&s.body, &s.qualified_name(scope), out)
            }
        }
    }
}

fn collect_scopes<'a>(statements: &'a [Statement], scope: &str, out: &mut Vec<(String, &'a ScopeNode)>) {
    for statement in statements {
        if let Statement::Scope(ref s) = statement {
            let name = s.qualified_name(scope);
            out.push((name.clone(), s));
            collect_scopes(&s.body, &name, out);
        }
    }
}

#[derive(Debug)]
pub enum Statement {
    Scope(ScopeNode),
    Declaration(Declaration),
}
