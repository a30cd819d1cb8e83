use crate::semantics::*;
use crate::syntax::*;
use crate::*;

pub fn declaration(source: &Arc<Source>) -> Declaration {
    let mut parser = Parser::new(source.clone());
    assert_diagnose!(parser.parse_declaration())
}

pub fn classify(code: &str) -> (TypeParameter, Vec<Diagnostic>) {
    let declaration = declaration(&Source::test(code));
    match BoundsResolver::new().classify(&declaration) {
        Just(param) => (param, vec![]),
        Diagnosis(param, diagnostics) => (param, diagnostics),
        Failure(diagnostics) => panic!("Classification failed: {:?}", diagnostics),
    }
}

pub fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(ToString::to_string).collect()
}

/// The source text under a diagnostic's primary span.
pub fn covered<'a>(code: &'a str, diagnostic: &Diagnostic) -> &'a str {
    let span = diagnostic.span();
    &code[span.start.offset..span.end.offset]
}

pub fn deprecated(keywords: &[BoundKeyword]) -> BoundKind {
    BoundKind::Deprecated(keywords.iter().cloned().collect())
}

pub fn parse(code: &str) -> Arc<Tree> {
    let (tree, diagnostics) = Parser::new(Source::test(code)).parse();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    Arc::new(tree)
}

pub fn name(trees: &[Arc<Tree>]) -> Naming {
    Namer::new().name(trees.iter().cloned().map(|tree| (tree, vec![])).collect())
}
