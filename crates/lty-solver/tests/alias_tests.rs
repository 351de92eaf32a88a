use super::*;
use crate::test_fixtures::{class, context, context_with, declare};
use crate::types::{AliasDecl, ClassDecl, ClassFlags, TypeExpr};
use crate::{DeclSite, MemoryIndex, create_anonymous_type, create_serialized_class};
use lty_common::ResolverOptions;

/// Wraps every recovered type in an array.
struct ArrayOf;

impl TypeSubstitutor for ArrayOf {
    fn substitute(&self, ty: Ty) -> Ty {
        Ty::array(ty)
    }
}

fn aliased_index() -> MemoryIndex {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Foo").with_alias("Bar"), &[]);
    declare(&index, ClassDecl::new("Same").with_alias("Same"), &[]);
    declare(&index, ClassDecl::new("Plain"), &[]);
    index
}

#[test]
fn test_alias_names_include_global_name() {
    let index = aliased_index();
    let ctx = context(&index);

    let names = alias_names(&class(&ctx, "Foo"), &ctx);
    assert_eq!(names.as_slice(), ["Bar".to_string(), "$Foo".to_string()]);
}

#[test]
fn test_alias_names_without_global_recognition() {
    let index = aliased_index();
    let options = ResolverOptions::default().with_recognize_global_name_as_type(false);
    let ctx = context_with(&index, options);

    let names = alias_names(&class(&ctx, "Foo"), &ctx);
    assert_eq!(names.as_slice(), ["Bar".to_string()]);
}

#[test]
fn test_no_alias_names() {
    let index = aliased_index();
    let ctx = context(&index);

    assert!(alias_names(&class(&ctx, "Same"), &ctx).is_empty());
    assert!(alias_names(&class(&ctx, "Plain"), &ctx).is_empty());
}

#[test]
fn test_anonymous_alias_has_no_global_name() {
    let index = MemoryIndex::new();
    let ctx = context(&index);

    let local = create_serialized_class("3@a.lua", Some("t"), None, Some("Shape"), ClassFlags::ANONYMOUS);
    assert_eq!(alias_names(&local, &ctx).as_slice(), ["Shape".to_string()]);
}

#[test]
fn test_process_alias_stops_early() {
    let index = aliased_index();
    let ctx = context(&index);

    let mut seen = Vec::new();
    let completed = process_alias(&class(&ctx, "Foo"), &ctx, |name| {
        seen.push(name.to_string());
        false
    });
    assert!(!completed);
    assert_eq!(seen, vec!["Bar"]);
}

#[test]
fn test_recover_alias() {
    let index = MemoryIndex::new();
    index.register_alias(AliasDecl::new(
        "Id",
        TypeExpr::Union {
            union: vec![TypeExpr::named("number"), TypeExpr::named("string")],
        },
    ));
    let ctx = context(&index);

    let id = crate::create_lazy_class("Id");
    assert_eq!(
        recover_alias(&id, &ctx, &NoSubstitution),
        Ty::union([Ty::NUMBER, Ty::STRING])
    );
    assert_eq!(
        recover_alias(&id, &ctx, &ArrayOf),
        Ty::array(Ty::union([Ty::NUMBER, Ty::STRING]))
    );
}

#[test]
fn test_recover_alias_without_declaration() {
    let index = MemoryIndex::new();
    let ctx = context(&index);

    let foo = crate::create_lazy_class("Foo");
    assert_eq!(recover_alias(&foo, &ctx, &ArrayOf), Ty::Class(foo.clone()));
}

#[test]
fn test_recover_alias_skips_synthetic_types() {
    let index = MemoryIndex::new();
    index.register_alias(AliasDecl::new("10|a.lua|4", TypeExpr::named("number")));
    index.register_alias(AliasDecl::new("4@a.lua", TypeExpr::named("number")));
    let ctx = context(&index);

    let doc = create_serialized_class("10|a.lua|4", None, None, None, ClassFlags::empty());
    assert_eq!(recover_alias(&doc, &ctx, &NoSubstitution), Ty::Class(doc.clone()));

    let local = create_anonymous_type(&DeclSite::new("a.lua", 4, "t"));
    assert_eq!(recover_alias(&local, &ctx, &NoSubstitution), Ty::Class(local.clone()));
}
