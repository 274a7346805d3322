use super::render;
use crate::diagram::layout::{FieldSet, FieldSpec, Layout};
use crate::diagram::Width;

/// Shorthand field constructor.
fn field(name: Option<&str>, hi: u8, lo: u8, value: Option<u64>) -> FieldSpec {
    FieldSpec {
        name: name.map(str::to_owned),
        hi,
        lo,
        value,
    }
}

fn layout(width: Width, fields: Vec<FieldSpec>, overlay: Option<u64>) -> Layout {
    Layout::build(&FieldSet::new(width, fields).unwrap(), overlay)
}

#[test]
fn test_golden_byte_diagram() {
    let layout = layout(
        Width::W8,
        vec![
            field(Some("a"), 7, 4, Some(0x3)),
            field(Some("b"), 3, 0, None),
        ],
        None,
    );
    let expected = "\
+---------------+---------------+
|     a=0x3     |       b       |
|7             4|3             0|
+---------------+---------------+
";
    assert_eq!(render(&layout), expected);
}

#[test]
fn test_byte_identical_on_equal_layouts() {
    let layout = layout(
        Width::W32,
        vec![
            field(Some("sf"), 31, 31, None),
            field(Some("Rm"), 20, 16, None),
            field(Some("Rn"), 9, 5, None),
            field(Some("Rd"), 4, 0, None),
        ],
        Some(0x8b02_0020),
    );
    assert_eq!(render(&layout), render(&layout));
}

#[test]
fn test_single_bit_index_centered() {
    let layout = layout(Width::W32, vec![field(Some("sf"), 31, 31, None)], None);
    let lines: Vec<_> = render(&layout).lines().map(str::to_owned).collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("|sf |"));
    assert!(lines[2].starts_with("|31 |"));
}

#[test]
fn test_overlay_labels_present() {
    let layout = layout(
        Width::W32,
        vec![
            field(Some("sf"), 31, 31, None),
            field(Some("imm"), 30, 0, None),
        ],
        Some(0x8000_0001),
    );
    let text = render(&layout);
    assert!(text.contains("sf=1"));
    assert!(text.contains("imm=0x00000001"));
}

#[test]
fn test_grid_is_rectangular() {
    let layout = layout(
        Width::W16,
        vec![
            field(Some("opc"), 15, 12, Some(0xa)),
            field(Some("imm8"), 11, 4, None),
            field(Some("Rd"), 3, 0, None),
        ],
        None,
    );
    let text = render(&layout);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    assert_eq!(lines[0], lines[3]);
    assert!(lines[0].starts_with('+') && lines[0].ends_with('+'));
    assert!(lines[1].starts_with('|') && lines[1].ends_with('|'));
}
