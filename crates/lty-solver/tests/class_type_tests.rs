use super::*;
use crate::index::{ClassIndex, DeclaredTypeInferrer, IndexResult};
use crate::test_fixtures::{context, declare};
use crate::types::AliasDecl;
use crate::{MemoryIndex, create_serialized_class, create_table_literal};
use lty_common::ResolverOptions;

/// Counts `find_class` calls made through it.
struct CountingIndex<'a> {
    inner: &'a MemoryIndex,
    find_class_calls: Cell<usize>,
}

impl ClassIndex for CountingIndex<'_> {
    fn find_class(&self, name: &str) -> IndexResult<Option<ClassDecl>> {
        self.find_class_calls.set(self.find_class_calls.get() + 1);
        self.inner.find_class(name)
    }

    fn get_class_members(&self, name: &str) -> IndexResult<Vec<MemberInfo>> {
        self.inner.get_class_members(name)
    }

    fn find_member(&self, class_name: &str, member: &str) -> IndexResult<Option<MemberInfo>> {
        self.inner.find_member(class_name, member)
    }

    fn find_alias(&self, name: &str) -> IndexResult<Option<AliasDecl>> {
        self.inner.find_alias(name)
    }
}

#[test]
fn test_equality_is_name_and_flags() {
    let a = ClassType::lazy("Foo");
    let b = ClassType::declared(&ClassDecl::new("Foo").with_super("Base"));
    assert_eq!(a, b);

    let global = ClassType::serialized("Foo", "Foo", None, None, ClassFlags::GLOBAL);
    assert_ne!(a, global);
    assert_ne!(a, ClassType::lazy("Bar"));
}

#[test]
fn test_declared_class_is_ready() {
    let cls = ClassType::declared(
        &ClassDecl::new("Dog")
            .with_super("Animal")
            .with_interfaces(["Pet"])
            .enumeration(),
    );
    assert_eq!(cls.state(), LazyState::Ready);
    assert_eq!(cls.super_class_name().as_deref(), Some("Animal"));
    assert_eq!(cls.interface_names(), vec!["Pet".to_string()]);
    assert!(cls.is_enum());
    assert!(!cls.is_interface());
}

#[test]
fn test_serialized_lazy_init_runs_once() {
    let index = MemoryIndex::new();
    declare(
        &index,
        ClassDecl::new("Dog")
            .with_super("Animal")
            .with_interfaces(["Pet"])
            .with_alias("Hound"),
        &[],
    );
    let counting = CountingIndex {
        inner: &index,
        find_class_calls: Cell::new(0),
    };
    let ctx = SearchContext::new(
        &counting,
        &index,
        &DeclaredTypeInferrer,
        ResolverOptions::default(),
    );

    let cls = ClassType::serialized("Dog", "Dog", None, None, ClassFlags::empty());
    assert_eq!(cls.state(), LazyState::Uninitialized);
    assert_eq!(cls.super_class_name(), None);

    cls.lazy_init(&ctx);
    assert_eq!(cls.state(), LazyState::Ready);
    assert_eq!(cls.super_class_name().as_deref(), Some("Animal"));
    assert_eq!(cls.interface_names(), vec!["Pet".to_string()]);
    assert_eq!(cls.alias_name().as_deref(), Some("Hound"));

    cls.lazy_init(&ctx);
    assert_eq!(counting.find_class_calls.get(), 1);
}

#[test]
fn test_serialized_keeps_fields_without_declaration() {
    let index = MemoryIndex::new();
    let ctx = context(&index);

    let cls = ClassType::serialized(
        "Ghost",
        "ghost",
        Some("Base".to_string()),
        Some("Spirit".to_string()),
        ClassFlags::empty(),
    );
    cls.lazy_init(&ctx);
    assert_eq!(cls.state(), LazyState::Ready);
    assert_eq!(cls.super_class_name().as_deref(), Some("Base"));
    assert_eq!(cls.alias_name().as_deref(), Some("Spirit"));
    assert_eq!(cls.var_name(), "ghost");
}

#[test]
fn test_lazy_placeholder_resolves_interface_flag() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Sized").interface(), &[]);
    let ctx = context(&index);

    let cls = ClassType::lazy("Sized");
    assert!(!cls.is_interface());
    cls.lazy_init(&ctx);
    assert!(cls.is_interface());
}

#[test]
fn test_display_name() {
    let table = create_table_literal("a.lua", 3, Vec::new());
    assert_eq!(table.display_name(), "table");
    assert_eq!(table.class_name(), "a.lua@(3)table");

    let local = create_serialized_class("12@a.lua", Some("point"), None, None, ClassFlags::ANONYMOUS);
    assert_eq!(local.display_name(), "point");
}

#[test]
fn test_failed_lookup_degrades() {
    let index = MemoryIndex::new();
    declare(&index, ClassDecl::new("Dog").with_super("Animal"), &[]);
    index.mark_unavailable("Dog");
    let ctx = context(&index);

    let cls = ClassType::lazy("Dog");
    cls.lazy_init(&ctx);
    assert_eq!(cls.state(), LazyState::Ready);
    assert_eq!(cls.super_class_name(), None);
}
