//! Field validation and geometric layout.
//!
//! [`FieldSet::new`] is the single validation gate: both the field-spec
//! parser and the subject database resolve through it, so everything
//! downstream operates on known-good data.

use std::fmt;

use itertools::Itertools;

use super::{Error, Width};


/// A named or anonymous contiguous bit range, optionally carrying a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: Option<String>,
    pub hi: u8,
    pub lo: u8,
    pub value: Option<u64>,
}
impl FieldSpec {
    /// Width of the field in bits. Meaningless unless `hi >= lo`.
    pub fn bits(&self) -> u8 {
        self.hi - self.lo + 1
    }
}
impl fmt::Display for FieldSpec {
    /// Canonical token form: re-parsing the output yields an equal spec.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}")?;
        }
        write!(f, "[{}", self.hi)?;
        if self.lo != self.hi {
            write!(f, ":{}", self.lo)?;
        }
        write!(f, "]")?;
        if let Some(value) = self.value {
            write!(f, "={value:#x}")?;
        }
        Ok(())
    }
}

/// An ordered, validated set of non-overlapping fields over a total width.
///
/// Fields are held in descending `hi` order regardless of input order.
#[derive(Debug, Clone)]
pub struct FieldSet {
    width: Width,
    fields: Vec<FieldSpec>,
}
impl FieldSet {
    pub fn new(width: Width, mut fields: Vec<FieldSpec>) -> Result<Self, Error> {
        for field in &fields {
            if field.lo > field.hi || field.hi >= width.bits() {
                return Err(Error::OutOfRangeField {
                    field: field.to_string(),
                    width: width.bits(),
                });
            }
            if let Some(value) = field.value {
                if value > span_mask(field.bits()) {
                    return Err(Error::ValueOutOfRange {
                        value,
                        bits: field.bits(),
                    });
                }
            }
        }
        fields.sort_by(|a, b| b.hi.cmp(&a.hi));
        for (upper, lower) in fields.iter().tuple_windows() {
            if lower.hi >= upper.lo {
                return Err(Error::FieldOverlap {
                    first: upper.to_string(),
                    second: lower.to_string(),
                });
            }
        }
        Ok(Self { width, fields })
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

fn span_mask(bits: u8) -> u64 {
    u64::MAX >> (64 - u32::from(bits))
}

/// One visual cell: a field's span, or a run of uncovered bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub hi: u8,
    pub lo: u8,
    pub name: Option<String>,
    /// Display-ready value text, when the cell has a value to show.
    pub value: Option<String>,
}
impl Cell {
    fn covered(field: &FieldSpec, overlay: Option<u64>) -> Self {
        // The overlay wins over any per-field value.
        let value = overlay
            .map(|v| (v >> field.lo) & span_mask(field.bits()))
            .or(field.value)
            .map(|v| value_label(v, field.bits()));
        Cell {
            hi: field.hi,
            lo: field.lo,
            name: field.name.clone(),
            value,
        }
    }

    fn unnamed(hi: u8, lo: u8, overlay: Option<u64>) -> Self {
        let bits = hi - lo + 1;
        Cell {
            hi,
            lo,
            name: None,
            value: overlay.map(|v| value_label((v >> lo) & span_mask(bits), bits)),
        }
    }

    pub fn bits(&self) -> u8 {
        self.hi - self.lo + 1
    }

    pub fn label(&self) -> String {
        match (&self.name, &self.value) {
            (Some(name), Some(value)) => format!("{name}={value}"),
            (Some(name), None) => name.clone(),
            (None, Some(value)) => value.clone(),
            (None, None) => String::new(),
        }
    }
}

/// A single-bit field shows a bare binary digit; anything wider shows hex
/// zero-padded to the field width rounded up to a whole nibble.
fn value_label(value: u64, bits: u8) -> String {
    if bits == 1 {
        value.to_string()
    } else {
        let nibbles = usize::from(bits.div_ceil(4));
        format!("{value:#0width$x}", width = nibbles + 2)
    }
}

/// One fixed-width horizontal strip of the diagram, cells ordered MSB first.
#[derive(Debug, Clone)]
pub struct Row {
    cells: Vec<Cell>,
}
impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Read-only geometric view over a [`FieldSet`], shared by every renderer.
#[derive(Debug, Clone)]
pub struct Layout {
    width: Width,
    rows: Vec<Row>,
    col_chars: usize,
}
impl Layout {
    /// Walks bit positions from `W-1` down to `0`, grouping contiguous
    /// positions with the same owner into cells. Uncovered runs coalesce
    /// into unnamed cells, so every bit lands in exactly one cell.
    pub fn build(set: &FieldSet, overlay: Option<u64>) -> Layout {
        let width = set.width();
        let mut cells = vec![];
        let mut next = width.bits();
        for field in set.fields() {
            if field.hi + 1 < next {
                cells.push(Cell::unnamed(next - 1, field.hi + 1, overlay));
            }
            cells.push(Cell::covered(field, overlay));
            next = field.lo;
        }
        if next > 0 {
            cells.push(Cell::unnamed(next - 1, 0, overlay));
        }
        let col_chars = col_chars(&cells);
        Layout {
            width,
            rows: vec![Row { cells }],
            col_chars,
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Characters per bit column, uniform across the whole diagram.
    pub fn col_chars(&self) -> usize {
        self.col_chars
    }
}

/// Narrowest column width such that every cell fits its label and its
/// boundary bit indices.
fn col_chars(cells: &[Cell]) -> usize {
    const MIN: usize = 4;
    cells
        .iter()
        .map(|cell| {
            let indices = if cell.bits() == 1 {
                digits(cell.hi)
            } else {
                digits(cell.hi) + digits(cell.lo) + 1
            };
            let need = cell.label().chars().count().max(indices) + 1;
            need.div_ceil(usize::from(cell.bits()))
        })
        .fold(MIN, usize::max)
}

fn digits(index: u8) -> usize {
    if index >= 10 {
        2
    } else {
        1
    }
}
