use super::*;

#[test]
fn test_global_type_name() {
    assert_eq!(global_type_name("Foo"), "$Foo");
    assert_eq!(global_type_name(GLOBAL_ROOT_NAME), "_G");
}

#[test]
fn test_positional_names() {
    assert_eq!(anonymous_type_name("a.lua", 12), "12@a.lua");
    assert_eq!(table_literal_name("a.lua", 42), "a.lua@(42)table");
    assert_eq!(doc_table_name("a.lua", 42), "10|a.lua|42");
}

#[test]
fn test_parse_doc_table_name() {
    assert_eq!(parse_doc_table_name("10|a.lua|42"), Some(("a.lua", "42")));
    assert_eq!(
        parse_doc_table_name(&doc_table_name("dir/b.lua", 7)),
        Some(("dir/b.lua", "7"))
    );
}

#[test]
fn test_parse_doc_table_name_rejects_other_shapes() {
    assert_eq!(parse_doc_table_name("11|a.lua|42"), None);
    assert_eq!(parse_doc_table_name("Foo"), None);
    assert_eq!(parse_doc_table_name("10|a.lua"), None);
    assert_eq!(parse_doc_table_name("x|a.lua|42"), None);
}

#[test]
fn test_number_key_member() {
    assert_eq!(number_key_member("5"), "[5]");
    assert_eq!(NUMBER_INDEX_MEMBER, "[number]");
    assert_eq!(STRING_INDEX_MEMBER, "[string]");
}
