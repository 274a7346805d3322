use assert_matches::assert_matches;

use super::{lookup, SubjectKind, OPCODES, REGISTERS};
use crate::diagram::Error;

#[test]
fn test_lookup_known_opcode() {
    let set = lookup(SubjectKind::Opcode, "add").unwrap();
    assert_eq!(set.width().bits(), 32);
    assert_eq!(set.fields().first().unwrap().name.as_deref(), Some("sf"));
}

#[test]
fn test_lookup_known_register() {
    let set = lookup(SubjectKind::Register, "hcr_el2").unwrap();
    assert_eq!(set.width().bits(), 64);
    assert!(set.fields().iter().any(|f| f.name.as_deref() == Some("VM")));
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_matches!(
        lookup(SubjectKind::Opcode, "ADD"),
        Err(Error::UnknownSubjectName { .. })
    );
}

#[test]
fn test_unknown_name() {
    assert_matches!(
        lookup(SubjectKind::Register, "xyzzy"),
        Err(Error::UnknownSubjectName { kind: "register", name }) if name == "xyzzy"
    );
}

/// Every embedded entry must survive the same validation as user input.
#[test]
fn test_every_entry_validates() {
    for name in OPCODES.keys() {
        lookup(SubjectKind::Opcode, name).unwrap();
    }
    for name in REGISTERS.keys() {
        lookup(SubjectKind::Register, name).unwrap();
    }
}
