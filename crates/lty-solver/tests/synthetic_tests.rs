use super::*;
use crate::class_type::LazyState;
use crate::test_fixtures::field;

#[test]
fn test_anonymous_type() {
    let cls = create_anonymous_type(&DeclSite::new("main.lua", 120, "point"));
    assert_eq!(cls.class_name(), "120@main.lua");
    assert_eq!(cls.var_name(), "point");
    assert_eq!(cls.display_name(), "point");
    assert!(cls.is_anonymous());
    assert!(matches!(cls.kind(), ClassKind::Serialized));
    assert_eq!(cls.super_class_name(), None);
}

#[test]
fn test_anonymous_types_differ_by_site() {
    let a = create_anonymous_type(&DeclSite::new("main.lua", 1, "t"));
    let b = create_anonymous_type(&DeclSite::new("main.lua", 2, "t"));
    let c = create_anonymous_type(&DeclSite::new("main.lua", 1, "other"));
    assert_ne!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_global_type_on_store() {
    let ty = create_global_type("Config", true, ResolverOptions::default());
    let cls = ty.as_class().expect("single class");
    assert_eq!(cls.class_name(), "$Config");
    assert_eq!(cls.var_name(), "Config");
    assert!(cls.is_global());
}

#[test]
fn test_global_type_on_read_is_union() {
    let ty = create_global_type("Config", false, ResolverOptions::default());
    let Ty::Union(members) = ty else {
        panic!("expected a union, got {ty:?}");
    };
    let names: Vec<&str> = members
        .iter()
        .filter_map(Ty::as_class)
        .map(|cls| cls.class_name())
        .collect();
    assert_eq!(names, vec!["$Config", "Config"]);
    assert!(members.iter().filter_map(Ty::as_class).all(|cls| cls.is_global()));
}

#[test]
fn test_global_type_without_name_recognition() {
    let options = ResolverOptions::default().with_recognize_global_name_as_type(false);
    let ty = create_global_type("Config", false, options);
    assert_eq!(ty.as_class().map(|cls| cls.class_name()), Some("$Config"));
}

#[test]
fn test_global_root_keeps_its_name() {
    let ty = create_global_type("_G", true, ResolverOptions::default());
    assert_eq!(ty.as_class().map(|cls| cls.class_name()), Some("_G"));
}

#[test]
fn test_table_literal() {
    let cls = create_table_literal("a.lua", 40, vec![field("x", "number"), field("y", "number")]);
    assert_eq!(cls.class_name(), "a.lua@(40)table");
    assert!(cls.is_anonymous());
    assert!(cls.is_table_literal());
    assert!(cls.flags().contains(ClassFlags::ANONYMOUS_TABLE));
    assert_eq!(cls.state(), LazyState::Ready);

    let fields = cls.kind().fixed_fields().expect("literal fields");
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.owner == "a.lua@(40)table"));
}

#[test]
fn test_doc_table() {
    let cls = create_doc_table("a.lua", 7, vec![field("x", "number")]);
    assert_eq!(cls.class_name(), "10|a.lua|7");
    assert_eq!(cls.flags(), ClassFlags::ANONYMOUS);
    assert!(!cls.is_table_literal());
    assert!(matches!(cls.kind(), ClassKind::DocTable { fields } if fields.len() == 1));
}

#[test]
fn test_serialized_dispatch() {
    let doc = create_serialized_class("10|a.lua|7", None, None, None, ClassFlags::ANONYMOUS);
    assert!(matches!(doc.kind(), ClassKind::DocTableRef));
    assert_eq!(doc.var_name(), "10|a.lua|7");
    assert_eq!(doc.state(), LazyState::Ready);

    let plain = create_serialized_class("Foo", Some("foo"), Some("Base"), None, ClassFlags::empty());
    assert!(matches!(plain.kind(), ClassKind::Serialized));
    assert_eq!(plain.super_class_name().as_deref(), Some("Base"));
    assert_eq!(plain.state(), LazyState::Uninitialized);
}

#[test]
fn test_declared_and_lazy() {
    let declared = create_declared_class(&ClassDecl::new("Foo").with_super("Base"));
    let lazy = create_lazy_class("Foo");
    assert_eq!(declared, lazy);
    assert!(matches!(declared.kind(), ClassKind::Declared));
    assert!(matches!(lazy.kind(), ClassKind::Lazy));
}
