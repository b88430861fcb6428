use jolie_core::{
    Cardinality, NativeType, TypeChoiceDefinition, TypeDefinition, TypeDefinitionLink,
    TypeInlineDefinition, TypeMap, native_type_map,
};

use super::{contains_path, is_equivalent};

fn type_map(defs: impl IntoIterator<Item = TypeDefinition>) -> TypeMap {
    let mut types = native_type_map();
    for def in defs {
        types.insert(def.id().to_owned(), def);
    }
    types
}

fn inline(id: &str, native: NativeType) -> TypeInlineDefinition {
    TypeInlineDefinition::new(id, native)
}

fn link(id: &str, target: &str, cardinality: Cardinality) -> TypeDefinition {
    TypeDefinition::from(TypeDefinitionLink::new(id, target)).with_cardinality(cardinality)
}

/// `type <id>: void { next?: <id>  value: int }`
fn list(id: &str) -> TypeDefinition {
    inline(id, NativeType::Void)
        .sub_type(link("next", id, Cardinality::OPTIONAL))
        .sub_type(inline("value", NativeType::Int))
        .into()
}

fn request() -> TypeDefinition {
    inline("Req", NativeType::Void)
        .sub_type(inline("sid", NativeType::String))
        .sub_type(inline("user", NativeType::Void).sub_type(inline("name", NativeType::String)))
        .into()
}

#[test]
fn inline_types_with_same_structure() {
    let types = native_type_map();
    let a = request();
    let b = request();

    assert!(is_equivalent(&types, &a, &b));
}

#[test]
fn inline_types_differ() {
    let types = native_type_map();
    let base: TypeDefinition = inline("T", NativeType::Void)
        .sub_type(inline("a", NativeType::Int))
        .into();
    let other_key: TypeDefinition = inline("T", NativeType::Void)
        .sub_type(inline("b", NativeType::Int))
        .into();
    let other_native: TypeDefinition = inline("T", NativeType::String)
        .sub_type(inline("a", NativeType::Int))
        .into();
    let untyped: TypeDefinition = inline("T", NativeType::Void)
        .sub_type(inline("a", NativeType::Int))
        .untyped()
        .into();
    let extra: TypeDefinition = inline("T", NativeType::Void)
        .sub_type(inline("a", NativeType::Int))
        .sub_type(inline("b", NativeType::Int))
        .into();

    assert!(!is_equivalent(&types, &base, &other_key));
    assert!(!is_equivalent(&types, &base, &other_native));
    assert!(!is_equivalent(&types, &base, &untyped));
    assert!(!is_equivalent(&types, &base, &extra));
}

#[test]
fn cardinality_is_part_of_the_structure() {
    let types = native_type_map();
    let one: TypeDefinition = inline("a", NativeType::Int).into();
    let many = one.clone().with_cardinality(Cardinality::ANY);

    assert!(!is_equivalent(&types, &one, &many));
}

#[test]
fn recursive_types_with_same_shape() {
    let types = type_map([list("List"), list("Chain")]);
    let a = TypeDefinition::named("List");
    let b = TypeDefinition::named("Chain");

    assert!(is_equivalent(&types, &a, &b));
}

#[test]
fn recursive_types_with_different_shape() {
    let tree = inline("Tree", NativeType::Void)
        .sub_type(link("next", "Tree", Cardinality::ANY))
        .sub_type(inline("value", NativeType::Int))
        .into();
    let types = type_map([list("List"), tree]);
    let a = TypeDefinition::named("List");
    let b = TypeDefinition::named("Tree");

    assert!(!is_equivalent(&types, &a, &b));
}

#[test]
fn link_and_inline_compare_by_target() {
    let types = type_map([inline("Page", NativeType::String).into()]);
    let page = TypeDefinition::named("Page");
    let string: TypeDefinition = inline("body", NativeType::String).into();
    let int: TypeDefinition = inline("body", NativeType::Int).into();

    assert!(is_equivalent(&types, &page, &string));
    assert!(is_equivalent(&types, &string, &page));
    assert!(!is_equivalent(&types, &page, &int));
}

#[test]
fn link_cycle_terminates() {
    let types = type_map([
        link("A", "B", Cardinality::ONE),
        link("B", "A", Cardinality::ONE),
    ]);
    let a = TypeDefinition::named("A");
    let int: TypeDefinition = inline("x", NativeType::Int).into();

    assert!(!is_equivalent(&types, &a, &int));
    assert!(!contains_path(&types, &a, &["x"]));
}

#[test]
fn unresolved_links_are_not_equivalent() {
    let types = native_type_map();
    let a = TypeDefinition::named("Missing");
    let b = TypeDefinition::named("Absent");

    assert!(!is_equivalent(&types, &a, &b));
    // Same name is equivalent without resolution
    assert!(is_equivalent(&types, &a, &a.clone()));
}

#[test]
fn choices_compare_side_by_side() {
    let types = native_type_map();
    let choice = |left: NativeType, right: NativeType| -> TypeDefinition {
        TypeChoiceDefinition::new("C", inline("C", left), inline("C", right)).into()
    };
    let a = choice(NativeType::Int, NativeType::String);

    assert!(is_equivalent(
        &types,
        &a,
        &choice(NativeType::Int, NativeType::String)
    ));
    assert!(!is_equivalent(
        &types,
        &a,
        &choice(NativeType::String, NativeType::Int)
    ));
}

#[test]
fn contains_path_in_inline_tree() {
    let types = native_type_map();
    let req = request();

    assert!(contains_path(&types, &req, &["sid"]));
    assert!(contains_path(&types, &req, &["user", "name"]));
    assert!(!contains_path(&types, &req, &["user"]));
    assert!(!contains_path(&types, &req, &["missing"]));
    assert!(!contains_path(&types, &req, &[]));
}

#[test]
fn contains_path_through_links() {
    let types = type_map([list("List"), request()]);
    let list = TypeDefinition::named("List");
    let req = TypeDefinition::named("Req");

    assert!(contains_path(&types, &list, &["next", "next", "value"]));
    assert!(contains_path(&types, &req, &["sid"]));
    assert!(!contains_path(&types, &list, &["next", "other"]));
}

#[test]
fn contains_path_in_untyped_tree() {
    let types = native_type_map();
    let undefined = TypeDefinition::named("undefined");

    assert!(contains_path(&types, &undefined, &["any", "key"]));
}

#[test]
fn contains_path_in_either_choice_side() {
    let types = native_type_map();
    let choice: TypeDefinition = TypeChoiceDefinition::new(
        "C",
        inline("C", NativeType::Void).sub_type(inline("a", NativeType::Int)),
        inline("C", NativeType::Void).sub_type(inline("b", NativeType::Int)),
    )
    .into();

    assert!(contains_path(&types, &choice, &["a"]));
    assert!(contains_path(&types, &choice, &["b"]));
    assert!(!contains_path(&types, &choice, &["c"]));
}
