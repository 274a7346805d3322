//! Embedded instruction and register databases.
//!
//! Lookups are case-sensitive. Entries carry their architectural width and
//! resolve through [`FieldSet::new`], so a bad database entry fails the same
//! way a bad manual field spec does.

use std::{collections::HashMap, sync::LazyLock};

use serde::Deserialize;

use crate::diagram::{Error, FieldSet, FieldSpec, Width};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Opcode,
    Register,
}
impl SubjectKind {
    pub fn noun(self) -> &'static str {
        match self {
            SubjectKind::Opcode => "instruction",
            SubjectKind::Register => "register",
        }
    }

    /// Output file prefix for anonymous manually-described subjects.
    pub fn default_prefix(self) -> &'static str {
        match self {
            SubjectKind::Opcode => "opcode",
            SubjectKind::Register => "register",
        }
    }

    fn database(self) -> &'static HashMap<String, EntryDef> {
        match self {
            SubjectKind::Opcode => &OPCODES,
            SubjectKind::Register => &REGISTERS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EntryDef {
    width: u8,
    fields: Vec<FieldDef>,
}

#[derive(Debug, Deserialize)]
struct FieldDef {
    name: Option<String>,
    hi: u8,
    lo: u8,
    value: Option<u64>,
}

static OPCODES: LazyLock<HashMap<String, EntryDef>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/opcodes.json")).expect("valid opcode database")
});

static REGISTERS: LazyLock<HashMap<String, EntryDef>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/registers.json")).expect("valid register database")
});

pub fn lookup(kind: SubjectKind, name: &str) -> Result<FieldSet, Error> {
    let entry = kind
        .database()
        .get(name)
        .ok_or_else(|| Error::UnknownSubjectName {
            kind: kind.noun(),
            name: name.to_owned(),
        })?;
    let width = Width::from_bits(entry.width).expect("database width is 8, 16, 32, or 64");
    let fields = entry
        .fields
        .iter()
        .map(|f| FieldSpec {
            name: f.name.clone(),
            hi: f.hi,
            lo: f.lo,
            value: f.value,
        })
        .collect();
    FieldSet::new(width, fields)
}
