use super::*;
use crate::test_fixtures::{class, context, declare, names};
use crate::types::ClassDecl;
use crate::MemoryIndex;

fn chain_index() -> MemoryIndex {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Base"), &[]);
    declare(&index, ClassDecl::new("Animal").with_super("Base"), &[]);
    declare(&index, ClassDecl::new("Dog").with_super("Animal"), &[]);
    index
}

#[test]
fn test_super_class_chain() {
    let index = chain_index();
    let ctx = context(&index);
    let dog = class(&ctx, "Dog");

    let parent = super_class(&dog, &ctx).expect("Dog has a superclass");
    assert_eq!(parent.class_name(), "Animal");
    assert_eq!(names(&ancestors(&dog, &ctx)), vec!["Animal", "Base"]);
    assert!(ancestors(&class(&ctx, "Base"), &ctx).is_empty());
}

#[test]
fn test_missing_super_ends_walk() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Orphan").with_super("Nowhere"), &[]);
    let ctx = context(&index);

    let orphan = class(&ctx, "Orphan");
    assert!(super_class(&orphan, &ctx).is_none());
    assert!(process_super_class(&orphan, &ctx, |_| true));
    assert!(ancestors(&orphan, &ctx).is_empty());
}

#[test]
fn test_self_inheritance_has_no_super() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("A").with_super("A").with_interfaces(["A"]), &[]);
    let ctx = context(&index);

    let a = class(&ctx, "A");
    assert!(super_class(&a, &ctx).is_none());
    assert!(interfaces(&a, &ctx).is_empty());
    assert!(ancestors(&a, &ctx).is_empty());
}

#[test]
fn test_cycle_visits_each_class_once() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("A").with_super("B"), &[]);
    declare(&index, ClassDecl::new("B").with_super("A"), &[]);
    let ctx = context(&index);

    let mut visited = Vec::new();
    let result = process_super_class(&class(&ctx, "A"), &ctx, |cls| {
        visited.push(cls.class_name().to_string());
        true
    });
    assert!(result);
    assert_eq!(visited, vec!["B"]);
}

#[test]
fn test_longer_cycle_terminates() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("A").with_super("B"), &[]);
    declare(&index, ClassDecl::new("B").with_super("C"), &[]);
    declare(&index, ClassDecl::new("C").with_super("B"), &[]);
    let ctx = context(&index);

    assert_eq!(names(&ancestors(&class(&ctx, "A"), &ctx)), vec!["B", "C"]);
}

#[test]
fn test_interface_ends_climb() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Root"), &[]);
    declare(&index, ClassDecl::new("Shape").with_super("Root").interface(), &[]);
    declare(&index, ClassDecl::new("Square").with_super("Shape"), &[]);
    let ctx = context(&index);

    assert_eq!(names(&ancestors(&class(&ctx, "Square"), &ctx)), vec!["Shape"]);
}

#[test]
fn test_interfaces_depth_first_and_deduplicated() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Comparable").interface(), &[]);
    declare(
        &index,
        ClassDecl::new("Ordered").with_interfaces(["Comparable"]).interface(),
        &[],
    );
    declare(
        &index,
        ClassDecl::new("Hashable").with_interfaces(["Comparable"]).interface(),
        &[],
    );
    declare(
        &index,
        ClassDecl::new("Key").with_interfaces(["Ordered", "Hashable"]),
        &[],
    );
    let ctx = context(&index);

    let mut visited = Vec::new();
    assert!(process_interface(&class(&ctx, "Key"), &ctx, |iface| {
        visited.push(iface.class_name().to_string());
        true
    }));
    assert_eq!(visited, vec!["Ordered", "Comparable", "Hashable"]);
}

#[test]
fn test_supers_then_interfaces() {
    let index = chain_index();
    declare(&index, ClassDecl::new("Pet").interface(), &[]);
    declare(
        &index,
        ClassDecl::new("Puppy").with_super("Dog").with_interfaces(["Pet"]),
        &[],
    );
    let ctx = context(&index);

    assert_eq!(
        names(&ancestors(&class(&ctx, "Puppy"), &ctx)),
        vec!["Dog", "Animal", "Base", "Pet"]
    );
}

#[test]
fn test_visitor_can_abort() {
    let index = chain_index();
    let ctx = context(&index);

    let mut visited = Vec::new();
    let result = process_super_class(&class(&ctx, "Dog"), &ctx, |cls| {
        visited.push(cls.class_name().to_string());
        false
    });
    assert!(!result);
    assert_eq!(visited, vec!["Animal"]);
}

#[test]
fn test_abort_still_walks_start_interfaces() {
    let index = chain_index();
    declare(&index, ClassDecl::new("Pet").interface(), &[]);
    declare(
        &index,
        ClassDecl::new("Puppy").with_super("Dog").with_interfaces(["Pet"]),
        &[],
    );
    let ctx = context(&index);

    let mut visited = Vec::new();
    let result = process_super_class(&class(&ctx, "Puppy"), &ctx, |cls| {
        visited.push(cls.class_name().to_string());
        cls.class_name() != "Dog"
    });
    assert!(!result);
    assert_eq!(visited, vec!["Dog", "Pet"]);
}

#[test]
fn test_cycle_skips_start_interfaces() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Pet").interface(), &[]);
    declare(
        &index,
        ClassDecl::new("X").with_super("Y").with_interfaces(["Pet"]),
        &[],
    );
    declare(&index, ClassDecl::new("Y").with_super("X"), &[]);
    let ctx = context(&index);

    let mut visited = Vec::new();
    let result = process_super_class(&class(&ctx, "X"), &ctx, |cls| {
        visited.push(cls.class_name().to_string());
        true
    });
    assert!(result);
    assert_eq!(visited, vec!["Y"]);
}

#[test]
fn test_is_inherited_from() {
    let index = chain_index();
    let ctx = context(&index);
    let dog = class(&ctx, "Dog");

    assert!(is_inherited_from(&dog, "Base", &ctx));
    assert!(is_inherited_from(&dog, "Animal", &ctx));
    assert!(!is_inherited_from(&dog, "Dog", &ctx));
    assert!(!is_inherited_from(&dog, "Cat", &ctx));
}

#[test]
fn test_lazy_start_resolves_through_index() {
    let index = chain_index();
    let ctx = context(&index);

    let dog = crate::create_lazy_class("Dog");
    assert_eq!(names(&ancestors(&dog, &ctx)), vec!["Animal", "Base"]);
}
