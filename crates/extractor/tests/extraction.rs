use cxtract_extractor::{extract_file, extract_str, Chunk, TraceOptions};
use pretty_assertions::assert_eq;
use std::io::Write;

fn extract(source: &str) -> Vec<Chunk> {
    extract_str("test.c", source, TraceOptions::default())
        .expect("extraction failed")
        .into_items()
}

const HEADER: &str = r#"/*
 ..module:: mxcore

 Core allocation routines.
*/
#include <stddef.h>

/* Opaque arena handle. */
typedef struct mx_arena mx_arena_t;

// Create an arena with the given capacity in bytes.
// Returns NULL when the allocation fails.
mx_arena_t *mx_arena_create(size_t capacity);

/* Release the arena and everything allocated from it. */
void mx_arena_destroy(mx_arena_t *arena);

static int internal_counter;

/* Convenience wrapper used by the test harness. */
#define MX_ALLOC(arena, type) \
    ((type *)mx_arena_alloc((arena), sizeof(type)))
"#;

#[test]
fn test_header_chunk_inventory() {
    let chunks = extract(HEADER);
    assert_eq!(chunks.len(), 5);

    // Module banner pairs with the #include that follows it
    assert_eq!(chunks[0].directives.get("module").unwrap(), "mxcore");
    assert_eq!(chunks[0].doc_text(), "Core allocation routines.\n");

    assert!(chunks[1].is_typedef());
    assert_eq!(chunks[1].display_name(), Some("mx_arena_t"));

    assert!(chunks[2].is_function());
    assert_eq!(chunks[2].display_name(), Some("mx_arena_create"));

    assert!(chunks[3].is_function());

    assert!(chunks[4].is_macro());
    assert!(chunks[4].code_text().contains("mx_arena_alloc"));
}

#[test]
fn test_undocumented_declarations_never_publish() {
    let chunks = extract(HEADER);
    assert!(chunks
        .iter()
        .all(|c| !c.code_text().contains("internal_counter")));
}

#[test]
fn test_line_numbers_point_at_the_comment() {
    let chunks = extract("\n\n/* doc */\nint x;\n");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].line_num, 3);
}

#[test]
fn test_two_line_comment_doc_merges() {
    let chunks = extract("// top\n// bottom\nint x;\n");
    assert_eq!(chunks[0].doc_text(), "top\nbottom\n");
}

#[test]
fn test_function_definition_body_stays_in_code() {
    let chunks = extract("/* doc */\nint add(int a, int b)\n{\n  return a + b;\n}\n");
    assert_eq!(chunks.len(), 1);
    let code = chunks[0].code_text();
    assert!(code.starts_with("int add("));
    assert!(code.contains("return a + b;"));
    // Parameter and body identifiers stay out of the name list
    assert_eq!(chunks[0].names, vec!["int", "add"]);
}

#[test]
fn test_cpp_class_extraction() {
    let chunks = extract(
        "/* A bounded queue. */\nclass BoundedQueue {\npublic:\n  void push(int v);\n};\n",
    );
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].types, vec!["class"]);
    assert_eq!(chunks[0].display_name(), Some("BoundedQueue"));
}

#[test]
fn test_directive_overrides_display_name() {
    let chunks = extract("/*\n ..name:: frame_drawer\n Draws.\n*/\nvoid draw(void);\n");
    assert_eq!(chunks[0].display_name(), Some("frame_drawer"));
}

#[test]
fn test_chunks_serialize_to_json() {
    let chunks = extract("/* doc */\nint x;\n");
    let json = serde_json::to_string(&chunks[0]).unwrap();
    assert!(json.contains("\"line_num\":1"));
    assert!(json.contains("\"docs\""));
}

#[test]
fn test_extract_file_round() {
    let mut file = tempfile::Builder::new().suffix(".h").tempfile().unwrap();
    write!(file, "/* from disk */\nint on_disk;\n").unwrap();
    let chunks = extract_file(file.path(), TraceOptions::default()).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks.read().next().unwrap().doc_text(), "from disk\n");
}

#[test]
fn test_stray_comment_close_is_an_error() {
    let err = extract_str("bad.c", "int x; */\n", TraceOptions::default()).unwrap_err();
    assert!(err.to_string().contains("none is open"));
}
