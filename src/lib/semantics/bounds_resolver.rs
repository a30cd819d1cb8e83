use crate::semantics::*;
use crate::syntax::*;
use crate::*;
use std::str::FromStr;

/// Turns a `type_member`/`type_template` declaration into a
/// [`TypeParameter`], validating its arguments along the way.
///
/// Classification never fails. Every declaration yields a best-effort
/// type parameter so later phases have something to bind, together with
/// whatever diagnostics the declaration earned. It holds no state, so
/// declarations can be classified in any order and on any thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsResolver;

impl BoundsResolver {
    pub fn new() -> BoundsResolver {
        BoundsResolver
    }

    pub fn classify(&self, declaration: &Declaration) -> Diagnosed<TypeParameter> {
        let call = &declaration.call;
        let mut diagnostics = vec![];

        let (variance, marker) = self.variance(call, &mut diagnostics);
        let bound_kind = self.bounds(call, marker, &mut diagnostics);

        trace!(
            "Classified {} as {:?} {:?} with {} diagnostic(s)",
            declaration.name,
            variance,
            bound_kind,
            diagnostics.len()
        );

        Diagnosed::maybe_diagnosis(
            TypeParameter {
                name: declaration.name.clone(),
                kind: call.callee,
                variance,
                bound_kind,
                decl_span: declaration.span(),
            },
            diagnostics,
        )
    }

    /// The declared variance, and the argument it was read from when
    /// it was given explicitly.
    fn variance<'a>(
        &self,
        call: &'a DeclarationCall,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (Variance, Option<&'a PositionalArg>) {
        match call.positional_args.as_slice() {
            [] => (Variance::Invariant, None),
            [arg] => match marker_variance(arg) {
                Some(variance) => (variance, Some(arg)),
                None => {
                    diagnostics.push(invalid_marker(arg));
                    (Variance::Invariant, None)
                }
            },
            [first, rest @ ..] => {
                if marker_variance(first).is_none() {
                    diagnostics.push(invalid_marker(first));
                }
                diagnostics.extend(rest.iter().map(invalid_marker));
                (Variance::Invariant, None)
            }
        }
    }

    fn bounds(
        &self,
        call: &DeclarationCall,
        marker: Option<&PositionalArg>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> BoundKind {
        let bounds: Vec<_> = call
            .keyword_args
            .iter()
            .filter_map(|arg| BoundKeyword::from_str(&arg.keyword).ok().map(|k| (k, arg)))
            .collect();

        let (first, last) = match (bounds.first(), bounds.last()) {
            (Some((_, first)), Some((_, last))) => (*first, *last),
            _ => return BoundKind::None,
        };

        diagnostics.push(Diagnostic::DeprecatedBoundsSyntax {
            span: call.span.clone(),
            callee: call.callee,
            bounds: bounds
                .iter()
                .map(|(keyword, arg)| (*keyword, arg.value.text.clone()))
                .collect(),
            arguments: call.arguments.clone(),
            positional: call.positional_args.iter().map(PositionalArg::lexeme).collect(),
        });

        if let Some(marker) = marker {
            diagnostics.push(Diagnostic::ExcessArguments {
                span: first.span().through(&last.span()),
                marker: marker.span.clone(),
                callee: call.callee,
                got: call.positional_args.len() + 1,
            });
        }

        BoundKind::Deprecated(bounds.into_iter().map(|(keyword, _)| keyword).collect())
    }
}

fn marker_variance(arg: &PositionalArg) -> Option<Variance> {
    match arg.kind {
        PositionalArgKind::Symbol(ref s) => Variance::from_marker(s),
        PositionalArgKind::Other(_) => None,
    }
}

fn invalid_marker(arg: &PositionalArg) -> Diagnostic {
    Diagnostic::InvalidVarianceMarker(arg.span.clone(), arg.lexeme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::test_utils::*;

    #[test]
    fn empty_call_is_valid() {
        for code in &["A1 = type_member()", "B1 = type_member"] {
            let (param, diagnostics) = classify(code);
            assert!(diagnostics.is_empty(), "{}: {:?}", code, diagnostics);
            assert_eq!(param.variance, Variance::Invariant);
            assert_eq!(param.bound_kind, BoundKind::None);
            assert_eq!(param.kind, Callee::Member);
        }
    }

    #[test]
    fn fixed_bound_is_deprecated() {
        let code = "A2 = type_member(fixed: Integer)";
        let (param, diagnostics) = classify(code);

        assert_eq!(messages(&diagnostics), vec!["syntax for bounds has changed"]);
        assert_eq!(covered(code, &diagnostics[0]), "type_member(fixed: Integer)");
        assert_eq!(param.bound_kind, deprecated(&[BoundKeyword::Fixed]));
        assert_eq!(param.variance, Variance::Invariant);
    }

    #[test]
    fn explicit_variance_with_bound_reports_excess_arguments() {
        let code = "C2 = type_member(:out, fixed: Integer)";
        let (param, diagnostics) = classify(code);

        assert_eq!(
            messages(&diagnostics),
            vec!["syntax for bounds has changed", "Too many arguments"]
        );
        assert_eq!(covered(code, &diagnostics[0]), "type_member(:out, fixed: Integer)");
        assert_eq!(covered(code, &diagnostics[1]), "fixed: Integer");
        assert_matches!(
            diagnostics[1],
            Diagnostic::ExcessArguments { ref marker, got: 2, .. } if marker.start.offset == 17
        );
        assert_eq!(param.variance, Variance::Covariant);
        assert_eq!(param.bound_kind, deprecated(&[BoundKeyword::Fixed]));
    }

    #[test]
    fn bare_word_variance_is_valid() {
        let (param, diagnostics) = classify("D1 = type_member :out");
        assert!(diagnostics.is_empty());
        assert_eq!(param.variance, Variance::Covariant);
        assert_eq!(param.bound_kind, BoundKind::None);
    }

    #[test]
    fn contravariant_template() {
        let (param, diagnostics) = classify("X = type_template(:in)");
        assert!(diagnostics.is_empty());
        assert_eq!(param.variance, Variance::Contravariant);
        assert_eq!(param.kind, Callee::Template);
    }

    #[test]
    fn lower_and_upper_are_reported_once() {
        let (param, diagnostics) = classify("A5 = type_member(lower: Integer, upper: Integer)");
        assert_eq!(messages(&diagnostics), vec!["syntax for bounds has changed"]);
        assert_eq!(
            param.bound_kind,
            deprecated(&[BoundKeyword::Lower, BoundKeyword::Upper])
        );
    }

    #[test]
    fn excess_arguments_cover_every_bound_keyword() {
        let code = "D5 = type_member :out, lower: Integer, upper: Integer";
        let (_, diagnostics) = classify(code);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(covered(code, &diagnostics[0]), "type_member :out, lower: Integer, upper: Integer");
        assert_eq!(covered(code, &diagnostics[1]), "lower: Integer, upper: Integer");
    }

    #[test]
    fn all_three_bounds_are_one_deprecation() {
        let (param, diagnostics) =
            classify("A = type_member(fixed: Integer, lower: Integer, upper: Integer)");
        assert_eq!(messages(&diagnostics), vec!["syntax for bounds has changed"]);
        assert_eq!(
            param.bound_kind,
            deprecated(&[BoundKeyword::Fixed, BoundKeyword::Lower, BoundKeyword::Upper])
        );
    }

    #[test]
    fn unknown_keywords_are_not_bounds() {
        let (param, diagnostics) = classify("A = type_member(:out, sealed: true)");
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(param.bound_kind, BoundKind::None);
        assert_eq!(param.variance, Variance::Covariant);
    }

    #[test]
    fn excess_arguments_span_only_bound_keywords() {
        let code = "A = type_member(:in, upper: Integer, sealed: true)";
        let (_, diagnostics) = classify(code);
        assert_eq!(covered(code, &diagnostics[1]), "upper: Integer");
    }

    #[test]
    fn invalid_variance_marker_falls_back_to_invariant() {
        let code = "A = type_member(:inout)";
        let (param, diagnostics) = classify(code);
        assert_eq!(
            messages(&diagnostics),
            vec!["Invalid variance kind `:inout`, only `:out` and `:in` are supported"]
        );
        assert_eq!(covered(code, &diagnostics[0]), ":inout");
        assert_eq!(param.variance, Variance::Invariant);
    }

    #[test]
    fn non_symbol_variance_marker() {
        let code = "A = type_member(Integer)";
        let (_, diagnostics) = classify(code);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(covered(code, &diagnostics[0]), "Integer");
    }

    #[test]
    fn extra_positional_arguments_are_invalid_markers() {
        let code = "A = type_member(:out, :in)";
        let (param, diagnostics) = classify(code);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(covered(code, &diagnostics[0]), ":in");
        assert_eq!(param.variance, Variance::Invariant);
    }

    #[test]
    fn shape_error_and_deprecation_are_independent() {
        let code = "A = type_member(:sideways, fixed: Integer)";
        let (param, diagnostics) = classify(code);

        assert_eq!(diagnostics.len(), 2);
        assert_matches!(diagnostics[0], Diagnostic::InvalidVarianceMarker(_, ref s) if s == ":sideways");
        assert_matches!(diagnostics[1], Diagnostic::DeprecatedBoundsSyntax { .. });
        assert_eq!(param.variance, Variance::Invariant);
        assert!(param.bound_kind.is_deprecated());
    }

    #[test]
    fn parens_do_not_change_classification() {
        let pairs = [
            ("X = type_member()", "X = type_member"),
            ("X = type_member(fixed: Integer)", "X = type_member fixed: Integer"),
            ("X = type_member(lower: Integer)", "X = type_member lower: Integer"),
            ("X = type_member(upper: Integer)", "X = type_member upper: Integer"),
            (
                "X = type_member(lower: Integer, upper: Integer)",
                "X = type_member lower: Integer, upper: Integer",
            ),
            ("X = type_member(:out)", "X = type_member :out"),
            ("X = type_member(:out, fixed: Integer)", "X = type_member :out, fixed: Integer"),
            (
                "X = type_member(:out, lower: Integer, upper: Integer)",
                "X = type_member :out, lower: Integer, upper: Integer",
            ),
            ("X = type_member(:bogus)", "X = type_member :bogus"),
        ];

        for (parens, bare) in pairs.iter() {
            let (parens_param, parens_diagnostics) = classify(parens);
            let (bare_param, bare_diagnostics) = classify(bare);

            assert_eq!(parens_param.variance, bare_param.variance, "{}", parens);
            assert_eq!(parens_param.bound_kind, bare_param.bound_kind, "{}", parens);
            assert_eq!(messages(&parens_diagnostics), messages(&bare_diagnostics), "{}", parens);

            for (p, b) in parens_diagnostics.iter().zip(bare_diagnostics.iter()) {
                match p {
                    Diagnostic::DeprecatedBoundsSyntax { .. } => {
                        assert_eq!(covered(parens, p).len(), covered(bare, b).len() + 1, "{}", parens);
                    }
                    _ => assert_eq!(covered(parens, p), covered(bare, b), "{}", parens),
                }
            }
        }
    }

    #[test]
    fn deprecation_suggests_block_form() {
        let cases = [
            ("A2 = type_member(fixed: Integer)", "A2 = type_member {{fixed: Integer}}"),
            ("B2 = type_member fixed: Integer", "B2 = type_member {{fixed: Integer}}"),
            (
                "C5 = type_member(:out, lower: Integer, upper: Integer)",
                "C5 = type_member(:out) {{lower: Integer, upper: Integer}}",
            ),
            (
                "D5 = type_member :out, lower: Integer, upper: Integer",
                "D5 = type_member(:out) {{lower: Integer, upper: Integer}}",
            ),
        ];

        for (code, fixed) in cases.iter() {
            let source = Source::test(code);
            let declaration = declaration(&source);
            let (_, diagnostics) = BoundsResolver::new().classify(&declaration).into_parts();

            let autocorrects: Vec<_> = diagnostics.iter().flat_map(Diagnostic::autocorrects).collect();
            assert_eq!(autocorrects.len(), 1, "{}", code);
            assert_eq!(autocorrects[0].preview(&source).as_deref(), Some(*fixed));
        }
    }

    #[test]
    fn invalid_marker_has_no_autocorrect() {
        let (_, diagnostics) = classify("A = type_member(:bogus)");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].autocorrects().is_empty());
    }

    #[test]
    fn classification_is_idempotent() {
        let source = Source::test("C5 = type_member(:out, lower: Integer, upper: Integer)");
        let declaration = declaration(&source);
        let resolver = BoundsResolver::new();

        let (first, first_diagnostics) = resolver.classify(&declaration).into_parts();
        let (second, second_diagnostics) = resolver.classify(&declaration).into_parts();

        assert_eq!(first, second);
        assert_eq!(first_diagnostics, second_diagnostics);
    }

    #[test]
    fn declaration_span_covers_assignment() {
        let code = "A1 = type_member(:in)";
        let (param, _) = classify(code);
        assert_eq!(param.name, "A1");
        assert_eq!(param.decl_span.start.offset, 0);
        assert_eq!(param.decl_span.end.offset, code.len());
    }
}
