use crate::golden::{compare, expectations};
use crate::*;
use log::LevelFilter;
use serde::Deserialize;

extern crate serde_yaml;
extern crate simple_logging;

#[derive(Deserialize)]
struct FixtureConfig {
    expected: FixtureExpectations,
}

#[derive(Deserialize)]
struct FixtureExpectations {
    success: bool,
}

#[test]
fn fixtures() {
    simple_logging::log_to_stderr(LevelFilter::Debug);

    let mut failures = vec![];
    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/src/__fixtures__/*");

    for entry in glob::glob(fixtures).unwrap() {
        let entry = entry.unwrap();

        let fixture_name = entry
            .file_name()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap()
            .to_string();
        if fixture_name.starts_with('_') {
            continue;
        }

        let mut fixture_config_path = entry.clone();
        fixture_config_path.push("fixture.yml");

        let fixture_config: FixtureConfig =
            serde_yaml::from_reader(std::fs::File::open(fixture_config_path).unwrap()).unwrap();

        let mut source_files_path = entry.clone();
        source_files_path.push("**");
        source_files_path.push("*.rb");

        let mut diagnostics = vec![];
        let mut expected = vec![];

        let sources = Source::files(source_files_path.to_str().unwrap()).unwrap();
        assert!(!sources.is_empty(), "{} has no sources", fixture_name);

        let parsed: Vec<_> = sources
            .into_iter()
            .map(syntax::Parser::new)
            .map(syntax::Parser::parse_with_test_comments)
            .map(|(t, d, c)| {
                expected.extend(expectations(&t.source, &c));
                (Arc::new(t), d)
            })
            .collect();

        semantics::Namer::new().run(parsed, &mut diagnostics);

        let actual_success = !Diagnostic::failed(&diagnostics);

        for mismatch in compare(&expected, &diagnostics) {
            failures.push(format!("{}: {}", fixture_name, mismatch));
        }

        if fixture_config.expected.success != actual_success {
            failures.push(format!(
                "Expected {} to {}",
                fixture_name,
                if fixture_config.expected.success {
                    "be successful"
                } else {
                    "fail"
                }
            ));
        }
    }

    assert!(failures.is_empty(), "\n\n{}", failures.join("\n\n"));
}

#[test]
fn eager_bounds_fixture_binds_every_declaration() {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/src/__fixtures__/type_member_eager_to_lazy/generic.rb"
    );
    let source = Source::file(path.into()).unwrap();
    let (tree, diagnostics) = syntax::Parser::new(source).parse();

    let naming = semantics::Namer::new().name(vec![(Arc::new(tree), diagnostics)]);
    let scope = naming.symbols.scope("A").unwrap();
    assert_eq!(scope.len(), 20);

    let deprecated = scope
        .type_parameters()
        .filter(|p| p.bound_kind.is_deprecated())
        .count();
    assert_eq!(deprecated, 16);

    let covariant = scope
        .type_parameters()
        .filter(|p| p.variance == semantics::Variance::Covariant)
        .count();
    assert_eq!(covariant, 10);

    assert_eq!(naming.diagnostics.len(), 16 + 8);
}
