use std::path::PathBuf;

use catalog::{Catalog, CatalogError};
use types::{EncodingWidth, InstructionId};

fn demo_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/rv32imc.json")
}

const TWO_ARCHS: &str = r#"{
  "architectures": [
    { "name": "toy", "subsets": [
        { "name": "base", "instructions": [
            { "id": 1, "name": "a", "bits": 16, "opcode": 0, "mask": 15 },
            { "id": 2, "name": "b", "bits": 16, "opcode": 4, "mask": 15 } ] },
        { "name": "ext", "instructions": [
            { "id": 3, "name": "c", "bits": 32, "opcode": 8, "mask": 15, "subset": "custom" } ] } ] },
    { "name": "empty", "subsets": [ { "name": "none", "instructions": [] } ] }
  ]
}"#;

#[test]
fn architecture_preserves_subset_then_instruction_order() {
    let catalog: Catalog = TWO_ARCHS.parse().expect("parse catalog");
    let toy = catalog.architecture("toy").expect("toy exists");
    let names: Vec<&str> = toy.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(toy.len(), 3);
    assert_eq!(toy.name(), "toy");
}

#[test]
fn subset_name_is_inherited_unless_set() {
    let catalog: Catalog = TWO_ARCHS.parse().unwrap();
    let toy = catalog.architecture("toy").unwrap();
    assert_eq!(toy.get(InstructionId(1)).unwrap().subset, "base");
    assert_eq!(toy.get(InstructionId(3)).unwrap().subset, "custom");
}

#[test]
fn slice_is_contiguous_and_clamped() {
    let catalog: Catalog = TWO_ARCHS.parse().unwrap();
    let toy = catalog.architecture("toy").unwrap();
    let ids: Vec<u32> = toy.slice(1..3).iter().map(|i| i.id.get()).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(toy.slice(3..3).is_empty());
    assert_eq!(toy.slice(2..10).len(), 1);
}

#[test]
fn unknown_architecture_is_an_error() {
    let catalog: Catalog = TWO_ARCHS.parse().unwrap();
    let err = catalog.architecture("mips").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownArchitecture(name) if name == "mips"));
}

#[test]
fn architecture_without_instructions_is_an_error() {
    let catalog: Catalog = TWO_ARCHS.parse().unwrap();
    let err = catalog.architecture("empty").unwrap_err();
    assert!(matches!(err, CatalogError::NoInstructions(_)));
}

#[test]
fn opcode_bits_outside_mask_are_rejected() {
    let text = r#"{ "architectures": [ { "name": "x", "subsets": [ { "name": "s", "instructions": [
        { "id": 1, "name": "bad", "bits": 16, "opcode": 17, "mask": 15 } ] } ] } ] }"#;
    let err = text.parse::<Catalog>().unwrap_err();
    assert!(matches!(err, CatalogError::OpcodeOutsideMask { opcode: 17, .. }));
}

#[test]
fn operand_mask_wider_than_encoding_is_rejected() {
    let text = r#"{ "architectures": [ { "name": "x", "subsets": [ { "name": "s", "instructions": [
        { "id": 1, "name": "wide", "bits": 16, "opcode": 0, "mask": 3,
          "operands": [ { "optype": "gpr", "mask": 65536 } ] } ] } ] } ] }"#;
    let err = text.parse::<Catalog>().unwrap_err();
    assert!(matches!(err, CatalogError::OutsideWidth { what: "operand mask", .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let text = r#"{ "architectures": [
        { "name": "x", "subsets": [ { "name": "s", "instructions": [
            { "id": 1, "name": "a", "bits": 16, "opcode": 0, "mask": 3 } ] } ] },
        { "name": "y", "subsets": [ { "name": "s", "instructions": [
            { "id": 1, "name": "b", "bits": 16, "opcode": 1, "mask": 3 } ] } ] } ] }"#;
    let err = text.parse::<Catalog>().unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(InstructionId(1))));
}

#[test]
fn unsupported_width_is_a_parse_error() {
    let text = r#"{ "architectures": [ { "name": "x", "subsets": [ { "name": "s", "instructions": [
        { "id": 1, "name": "a", "bits": 64, "opcode": 0, "mask": 3 } ] } ] } ] }"#;
    assert!(matches!(text.parse::<Catalog>(), Err(CatalogError::Parse(_))));
}

#[test]
fn demo_catalog_loads() {
    let catalog = Catalog::open(demo_catalog_path()).expect("open demo catalog");
    let arch = catalog.architecture("rv32imc").expect("rv32imc");
    assert_eq!(arch.len(), 11);
    assert!(arch.iter().any(|i| i.bits == EncodingWidth::Half));
    assert!(arch.get(InstructionId(2)).unwrap().is_control_transfer());
}

#[test]
fn missing_file_reports_path() {
    let err = Catalog::open("/nonexistent/catalog.json").unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/catalog.json"));
}
