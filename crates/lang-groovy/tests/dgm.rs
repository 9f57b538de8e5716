//! Closure parameters and results of default Groovy methods.

mod common;

use common::{assert_declaring, assert_type, assert_type_in, first_span};
use groovyscope_api::Span;
use groovyscope_core::GroovyLevel;

const STRING: &str = "java.lang.String";
const INTEGER: &str = "java.lang.Integer";

fn map_closure(method: &str) -> String {
    format!("[key:1].{method} {{ key, value -> key.toUpperCase() + value.intValue() }}")
}

fn assert_entry_params(method: &str) {
    let source = map_closure(method);
    assert_type(&source, "key", STRING);
    assert_type(&source, "value", INTEGER);
}

#[test]
fn test_collect_nested_element() {
    assert_type("[1].collectNested { it }", "it", INTEGER);
    assert_type("[1].collectNested { it.intValue() }", "it", INTEGER);
}

#[test]
fn test_with_passes_receiver() {
    assert_type("1.with { it.intValue() }", "it", INTEGER);
}

#[test]
fn test_shutdown_hook_passes_receiver() {
    assert_type("1.addShutdownHook { it.intValue() }", "it", INTEGER);
}

#[test]
fn test_map_predicates_take_key_and_value() {
    assert_entry_params("every");
    assert_entry_params("any");
}

#[test]
fn test_map_find_results() {
    assert_entry_params("findResult(1)");
    assert_entry_params("findResults");
    assert_entry_params("findAll");
}

#[test]
fn test_map_grouping() {
    assert_entry_params("groupBy");
    assert_entry_params("groupEntriesBy");
}

#[test]
fn test_map_inject_and_default() {
    assert_entry_params("inject(1)");
    assert_entry_params("withDefault");
}

#[test]
fn test_collect_many_element() {
    assert_type("[1].collectMany { [it.intValue()] }", "it", INTEGER);
}

#[test]
fn test_collect_entries_named_param() {
    assert_type(
        "([1] ).collectEntries { index -> index.intValue() }",
        "index",
        INTEGER,
    );
}

#[test]
fn test_find_results_on_list() {
    assert_type("[1].findResults { it.intValue() }", "it", INTEGER);
}

#[test]
fn test_single_param_over_map_is_entry() {
    assert_type(
        "[key:1].findResults { it.getKey().toUpperCase() + it.getValue().intValue() }",
        "it",
        "java.util.Map$Entry<java.lang.String,java.lang.Integer>",
    );
}

#[test]
fn test_count_by_element() {
    assert_type("([1]).countBy { it.intValue() }", "it", INTEGER);
}

#[test]
fn test_with_stream_passes_stream_type() {
    assert_type(
        "new FileOutputStream().withStream { it }",
        "it",
        "java.io.OutputStream",
    );
}

#[test]
fn test_file_match_closures() {
    assert_type(
        "new File(\"test\").eachFileMatch(FileType.FILES, 1) { it.getName() }",
        "it",
        "java.io.File",
    );
    // no overload takes a file type; the first candidate still types `it`
    assert_type(
        "new File(\"test\").eachDirMatch(FileType.FILES, 1) { it.getName() }",
        "it",
        "java.io.File",
    );
}

#[test]
fn test_file_resource_closures() {
    let cases = [
        ("withReader", "java.io.BufferedReader"),
        ("withOutputStream", "java.io.OutputStream"),
        ("withInputStream", "java.io.InputStream"),
        ("withDataOutputStream", "java.io.DataOutputStream"),
        ("withDataInputStream", "java.io.DataInputStream"),
        ("withWriter", "java.io.BufferedWriter"),
        ("withWriterAppend", "java.io.BufferedWriter"),
        ("withPrintWriter", "java.io.PrintWriter"),
    ];
    for (method, expected) in cases {
        let source = format!("new File(\"test\").{method} {{ it }}");
        assert_type(&source, "it", expected);
    }
}

#[test]
fn test_reader_line_filters() {
    for method in ["filterLine", "transformChar", "transformLine"] {
        let source = format!(
            "new FileReader(new File(\"test\")).{method}(new FileWriter(new File(\"test\"))) {{ it.toUpperCase() }}"
        );
        assert_type(&source, "it", STRING);
    }
}

#[test]
fn test_each_match_on_string() {
    assert_type("\"\".eachMatch(\"\") { it.toLowerCase() }", "it", STRING);
}

#[test]
fn test_sorted_list_keeps_element_type() {
    let sorted = "List<String> myList = new ArrayList<String>()\n\
                  myList.toSorted { a, b ->\n  a.trim() <=> b.trim()\n}.each {\n  it\n}\n";
    assert_type(sorted, "it", STRING);

    let sort = "List<String> myList = new ArrayList<String>()\n\
                myList.sort { a, b ->\n  a.trim() <=> b.trim()\n}.each {\n  it\n}\n";
    assert_type(sort, "it", STRING);
    let a = sort.find("a.trim").unwrap();
    assert_type_in(sort, Span::new(a, a + 1), STRING);
}

#[test]
fn test_each_with_index_on_array() {
    let source = "java.util.regex.Pattern[] pats = [~/one/, ~/two/]\n\
                  pats.eachWithIndex { pat, idx ->\n  \n}\n";
    assert_type_in(
        source,
        first_span(source, "eachWithIndex"),
        "java.util.regex.Pattern[]",
    );
    assert_type(source, "pat", "java.util.regex.Pattern");
    assert_type(source, "idx", INTEGER);
}

#[test]
fn test_collect_after_each_with_index() {
    let source = "java.util.regex.Pattern[] pats = [~/one/, ~/two/]\n\
                  pats.eachWithIndex { pat, idx ->\n  \n}.collect {\n  it\n}\n";
    assert_type_in(source, first_span(source, "collect"), "java.util.List<T>");
}

#[test]
fn test_primitive_array_argument_overloads() {
    let object_first = "int[] ints = [1, 2, 3]\n\
                        String dgm(Object[] arr) { null }\n\
                        Object dgm(Object obj) { null }\n\
                        def result = dgm(ints)\n";
    assert_type_in(
        object_first,
        first_span(object_first, "result"),
        "java.lang.Object",
    );

    let object_last = "int[] ints = [1, 2, 3]\n\
                       Object dgm(Object obj) { null }\n\
                       String dgm(Object[] arr) { null }\n\
                       def result = dgm(ints)\n";
    assert_type_in(
        object_last,
        first_span(object_last, "result"),
        "java.lang.Object",
    );

    let boxed = "int[] ints = [1, 2, 3]\n\
                 Integer dgm(Integer[] arr) { null }\n\
                 Object dgm(Object obj) { null }\n\
                 def result = dgm(ints)\n";
    assert_type_in(boxed, first_span(boxed, "result"), "java.lang.Object");
}

#[test]
fn test_only_candidate_used_when_nothing_applies() {
    let source = "int[] ints = [1, 2, 3]\n\
                  Number dgm(Number[] arr) { null }\n\
                  def result = dgm(ints)\n";
    assert_type_in(source, first_span(source, "result"), "java.lang.Number");

    let boxed = "Integer[] ints = [1, 2, 3]\n\
                 Number dgm(Number[] arr) { null }\n\
                 def result = dgm(ints)\n";
    assert_type_in(boxed, first_span(boxed, "result"), "java.lang.Number");
}

#[test]
fn test_declaring_class_follows_groovy_level() {
    assert_declaring(
        "\"\".eachLine",
        "eachLine",
        GroovyLevel::V2_5,
        "org.codehaus.groovy.runtime.StringGroovyMethods",
    );
    assert_declaring(
        "\"\".eachLine",
        "eachLine",
        GroovyLevel::V1_8,
        "org.codehaus.groovy.runtime.DefaultGroovyMethods",
    );
}

#[test]
fn test_declaring_class_of_io_methods() {
    assert_declaring(
        "new File().eachLine",
        "eachLine",
        GroovyLevel::V2_5,
        "org.codehaus.groovy.runtime.ResourceGroovyMethods",
    );
    assert_declaring(
        "Writer w\nw.leftShift",
        "leftShift",
        GroovyLevel::V2_5,
        "org.codehaus.groovy.runtime.IOGroovyMethods",
    );
}
