//! End-to-end pipeline tests over whole documents
//!
//! These run the real parse -> normalize -> serialize flow with the
//! passthrough canonicalizer, so they exercise exactly what
//! `mathml-norm --no-canonicalize` does without depending on a JVM.

use mathml_norm::mathml::{Passthrough, Pipeline, PipelineError};

fn pipeline() -> Pipeline {
    Pipeline::new(Box::new(Passthrough))
}

#[test]
fn merges_identifiers_and_collapses_grouping() {
    let output = pipeline()
        .run("<math><mrow><mi>x</mi><mi>y</mi></mrow></math>")
        .unwrap();
    assert_eq!(output, "<math><mi>xy</mi></math>");
}

#[test]
fn unwraps_a_trivial_table() {
    let output = pipeline()
        .run("<math><mtable><mtr><mtd><mi>x</mi></mtd></mtr></mtable></math>")
        .unwrap();
    assert_eq!(output, "<math><mi>x</mi></math>");
}

#[test]
fn prunes_empty_columns_from_a_document() {
    let input = "<math><mtable>\
                 <mtr><mtd><mi>a</mi></mtd><mtd></mtd></mtr>\
                 <mtr><mtd><mi>b</mi></mtd><mtd></mtd></mtr>\
                 </mtable></math>";
    let output = pipeline().run(input).unwrap();
    assert_eq!(
        output,
        "<math><mtable>\
         <mtr><mtd><mi>a</mi></mtd></mtr>\
         <mtr><mtd><mi>b</mi></mtd></mtr>\
         </mtable></math>"
    );
}

#[test]
fn strips_annotations_and_unwraps_semantics() {
    let input = "<math><semantics>\
                 <mfrac><mi>x</mi><mn>2</mn></mfrac>\
                 <annotation encoding=\"application/x-tex\">\\frac{x}{2}</annotation>\
                 </semantics></math>";
    let output = pipeline().run(input).unwrap();
    assert_eq!(output, "<math><mfrac><mi>x</mi><mn>2</mn></mfrac></math>");
}

#[test]
fn substitutes_lookalike_characters() {
    let output = pipeline()
        .run("<math><mo>\u{2212}</mo><mn>3</mn></math>")
        .unwrap();
    assert_eq!(output, "<math><mo>-</mo><mn>3</mn></math>");
}

#[test]
fn function_application_marker_is_emptied() {
    let output = pipeline()
        .run("<math><mi>f</mi><mo>\u{2061}</mo><mi>x</mi></math>")
        .unwrap();
    assert_eq!(output, "<math><mi>f</mi><mo></mo><mi>x</mi></math>");
}

#[test]
fn pretty_printed_input_normalizes_like_compact_input() {
    let compact = pipeline()
        .run("<math><mrow><mi>x</mi><mi>y</mi></mrow></math>")
        .unwrap();
    let pretty = pipeline()
        .run("<math>\n  <mrow>\n    <mi>x</mi>\n    <mi>y</mi>\n  </mrow>\n</math>")
        .unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn pretty_output_is_indented() {
    let output = pipeline()
        .pretty(true)
        .run("<math><mfrac><mi>x</mi><mn>2</mn></mfrac></math>")
        .unwrap();
    assert_eq!(
        output,
        "<math>\n  <mfrac>\n    <mi>x</mi>\n    <mn>2</mn>\n  </mfrac>\n</math>"
    );
}

#[test]
fn prefixed_markup_without_a_declaration_is_accepted() {
    // add_namespace injects the declaration before parsing
    let output = pipeline()
        .run("<mml:math><mml:mi>x</mml:mi></mml:math>")
        .unwrap();
    assert_eq!(output, "<math><mi>x</mi></math>");
}

#[test]
fn arity_violations_surface_the_offending_tag() {
    let err = pipeline()
        .run("<math><msub><mi>x</mi></msub></math>")
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("msub"), "message was: {}", message);
    assert!(message.contains("expected 2"), "message was: {}", message);
    assert!(message.contains("found 1"), "message was: {}", message);
}

#[test]
fn malformed_tables_surface_a_structural_error() {
    let err = pipeline()
        .run("<math><mtable><mi>x</mi></mtable></math>")
        .unwrap_err();
    assert!(matches!(err, PipelineError::NormalizeError(_)));
    assert!(err.to_string().contains("mtable"));
}

#[test]
fn invalid_xml_surfaces_a_parse_error() {
    let err = pipeline().run("<math><mi>x</math>").unwrap_err();
    assert!(matches!(err, PipelineError::ParseError(_)));
}

#[test]
fn output_is_a_fixed_point_of_the_pipeline() {
    let input = "<math><semantics><mrow>\
                 <mtable><mtr><mtd><mi>s</mi></mtd></mtr></mtable>\
                 <mo>+</mo><mi>a</mi><mi>b</mi>\
                 </mrow><annotation>src</annotation></semantics></math>";
    let once = pipeline().run(input).unwrap();
    let twice = pipeline().run(&once).unwrap();
    assert_eq!(once, twice);
}
