mod common;

use common::{
    assert_confidence, assert_type, assert_type_in, binding_at, first_span, inferencer, last_span,
};
use groovyscope_api::{Confidence, LookupOrigin};
use groovyscope_core::GroovyLevel;

#[test]
fn test_literal_types() {
    assert_type("def x = 1\nx", "x", "java.lang.Integer");
    assert_type("def x = 1L\nx", "x", "java.lang.Long");
    assert_type("def x = 1.5\nx", "x", "java.math.BigDecimal");
    assert_type("def x = 1.5d\nx", "x", "java.lang.Double");
    assert_type("def x = 'a'\nx", "x", "java.lang.String");
    assert_type("def n = 1\ndef x = \"a${n}\"\nx", "x", "groovy.lang.GString");
    assert_type("def x = true\nx", "x", "java.lang.Boolean");
}

#[test]
fn test_numeric_promotion() {
    assert_type("def x = 1 + 2L\nx", "x", "java.lang.Long");
    assert_type("def x = 1 / 2\nx", "x", "java.math.BigDecimal");
    assert_type("def x = 1.0d / 2\nx", "x", "java.lang.Double");
    assert_type("def x = 2 * 1.5\nx", "x", "java.math.BigDecimal");
    assert_type("def x = 1 << 2\nx", "x", "java.lang.Integer");
}

#[test]
fn test_operator_results() {
    assert_type("def x = 'a' + 1\nx", "x", "java.lang.String");
    assert_type("def x = 1 <=> 2\nx", "x", "java.lang.Integer");
    assert_type("def x = 1 == 2\nx", "x", "java.lang.Boolean");
    assert_type("def x = 'a' =~ /a/\nx", "x", "java.util.regex.Matcher");
    assert_type("def x = ~'a'\nx", "x", "java.util.regex.Pattern");
    assert_type("def x = 1..3\nx", "x", "groovy.lang.Range<java.lang.Integer>");
    assert_type("def x = !1\nx", "x", "java.lang.Boolean");
}

#[test]
fn test_collection_literals() {
    assert_type("def x = [1, 2]\nx", "x", "java.util.List<java.lang.Integer>");
    assert_type(
        "def x = [a: 1]\nx",
        "x",
        "java.util.LinkedHashMap<java.lang.String,java.lang.Integer>",
    );
    assert_type("def m = [a: 1]\nm.a", "a", "java.lang.Integer");
}

#[test]
fn test_declared_members() {
    assert_type("String s = 'a'\ns.length()", "length", "int");
    assert_type("String s = 'a'\ns.empty", "empty", "boolean");
    assert_type(
        "class Foo { String name }\nnew Foo().name",
        "name",
        "java.lang.String",
    );
    assert_type(
        "class Foo { List<String> names }\ndef f = new Foo()\nf.names.get(0)",
        "get",
        "java.lang.String",
    );
}

#[test]
fn test_declaring_type_of_jdk_method() {
    let source = "'a'.toUpperCase()";
    let binding = binding_at(source, last_span(source, "toUpperCase"));
    assert_eq!(binding.declaring_type, "java.lang.String");
    assert_eq!(binding.origin, LookupOrigin::Declared);
    assert_eq!(binding.confidence, Confidence::Exact);
}

#[test]
fn test_class_reference() {
    assert_type("def x = String\nx", "x", "java.lang.Class<java.lang.String>");
    assert_type("Integer.valueOf(1)", "valueOf", "java.lang.Integer");
}

#[test]
fn test_binding_variables() {
    assert_type("count = 1\ncount", "count", "java.lang.Integer");
}

#[test]
fn test_unresolvable_name_is_unknown() {
    let source = "foo.bar()";
    let binding = binding_at(source, last_span(source, "bar"));
    assert_eq!(binding.confidence, Confidence::Unknown);
    assert_eq!(binding.type_name(), "java.lang.Object");
}

#[test]
fn test_untyped_declaration_without_value() {
    assert_type("def x\nx", "x", "java.lang.Object");
}

#[test]
fn test_closure_return_feeds_collect() {
    let source = "[1].collect { 'x' }";
    assert_type_in(
        source,
        first_span(source, "collect"),
        "java.util.List<java.lang.String>",
    );
}

#[test]
fn test_closure_params_inferred() {
    assert_confidence("[1].each { it }", "it", Confidence::Inferred);
    assert_type("[1].each { it }", "it", "java.lang.Integer");
    assert_type("['a'].eachWithIndex { s, i -> i }", "i", "java.lang.Integer");
}

#[test]
fn test_declared_closure_params_are_exact() {
    assert_type("[1].each { Number n -> n }", "n", "java.lang.Number");
    assert_confidence("[1].each { Number n -> n }", "n", Confidence::Exact);
}

#[test]
fn test_lambda_style_closure_for_functional_interface() {
    assert_type("[1].stream().map { it }", "it", "java.lang.Integer");
}

#[test]
fn test_local_closure_call() {
    assert_type(
        "def c = { 'x' }\ndef r = c()\nr",
        "r",
        "java.lang.String",
    );
}

#[test]
fn test_script_method_call() {
    assert_type(
        "String greet(String who) { 'hi ' + who }\ngreet('x')",
        "greet",
        "java.lang.String",
    );
}

#[test]
fn test_method_as_property_is_inferred() {
    assert_confidence("'a'.eachLine", "eachLine", Confidence::Inferred);
}

#[test]
fn test_use_category() {
    let source = "use(groovy.time.TimeCategory) {\n  def d = 1.days\n  d\n}\n";
    assert_type(source, "days", "groovy.time.Duration");
    let binding = binding_at(source, last_span(source, "days"));
    assert_eq!(binding.origin, LookupOrigin::Category);
    assert_eq!(binding.declaring_type, "groovy.time.TimeCategory");
}

#[test]
fn test_category_outside_use_is_unknown() {
    let source = "use(groovy.time.TimeCategory) { }\n1.days";
    let binding = binding_at(source, last_span(source, "days"));
    assert_eq!(binding.confidence, Confidence::Unknown);
}

#[test]
fn test_metaclass_addition() {
    let source = "String.metaClass.shout = { -> 'x' }\n'a'.shout()";
    assert_type(source, "shout", "java.lang.String");
    let binding = binding_at(source, last_span(source, "shout"));
    assert_eq!(binding.origin, LookupOrigin::Category);
    assert_eq!(binding.confidence, Confidence::Inferred);
}

#[test]
fn test_static_metaclass_addition() {
    let source = "Integer.metaClass.static.zero = { 0 }\nInteger.zero()";
    assert_type(source, "zero", "java.lang.Integer");
}

#[test]
fn test_syntax_errors_are_reported_not_fatal() {
    let source = "def x = 1\ndef y = (\nx";
    let analysis = inferencer(GroovyLevel::V2_5).analyze(source);
    assert!(!analysis.parse_errors().is_empty());
    let binding = analysis.type_at(first_span(source, "x"));
    assert_eq!(binding.type_name(), "java.lang.Integer");
}

#[test]
fn test_deeply_nested_source_degrades() {
    let depth = 10_000;
    let source = format!("def x = 1\n{}x{}\nx", "(".repeat(depth), ")".repeat(depth));
    let analysis = inferencer(GroovyLevel::V2_5).analyze(&source);
    assert!(!analysis.parse_errors().is_empty());
    let binding = analysis.type_at(last_span(&source, "x"));
    assert_eq!(binding.type_name(), "java.lang.Integer");

    let source = "[1].each { ".repeat(depth);
    let analysis = inferencer(GroovyLevel::V2_5).analyze(&source);
    assert!(!analysis.parse_errors().is_empty());
    let _ = analysis.type_at(first_span(&source, "each"));
}

#[test]
fn test_answers_do_not_depend_on_query_order() {
    let source = "def xs = [1]\nxs.collect { it }\n";
    let analysis = inferencer(GroovyLevel::V2_5).analyze(source);
    let it_first = analysis.type_at(last_span(source, "it"));
    let call = analysis.type_at(first_span(source, "collect"));
    assert_eq!(analysis.type_at(last_span(source, "it")), it_first);
    assert_eq!(analysis.type_at(first_span(source, "collect")), call);
    assert_eq!(it_first.type_name(), "java.lang.Integer");
}
