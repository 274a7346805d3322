//! ASCII diagram rendering.

use itertools::Itertools;

use super::layout::{Layout, Row};

#[cfg(test)]
mod tests;

/// Renders a layout as a monospace text grid.
///
/// Pure function of the layout: equal layouts produce byte-identical text.
pub fn render(layout: &Layout) -> String {
    let mut out = String::new();
    for row in layout.rows() {
        render_row(&mut out, row, layout.col_chars());
    }
    out
}

fn render_row(out: &mut String, row: &Row, col_chars: usize) {
    let border = border(row, col_chars);

    out.push_str(&border);
    out.push('\n');

    out.push('|');
    for cell in row.cells() {
        let inner = inner_width(cell.bits(), col_chars);
        out.push_str(&format!("{:^inner$}", cell.label()));
        out.push('|');
    }
    out.push('\n');

    out.push('|');
    for cell in row.cells() {
        let inner = inner_width(cell.bits(), col_chars);
        if cell.bits() == 1 {
            out.push_str(&format!("{:^inner$}", cell.hi));
        } else {
            let hi = cell.hi.to_string();
            let lo = cell.lo.to_string();
            out.push_str(&hi);
            out.push_str(&" ".repeat(inner - hi.len() - lo.len()));
            out.push_str(&lo);
        }
        out.push('|');
    }
    out.push('\n');

    out.push_str(&border);
    out.push('\n');
}

fn inner_width(bits: u8, col_chars: usize) -> usize {
    usize::from(bits) * col_chars - 1
}

fn border(row: &Row, col_chars: usize) -> String {
    let spans = row
        .cells()
        .iter()
        .map(|cell| "-".repeat(inner_width(cell.bits(), col_chars)))
        .join("+");
    format!("+{spans}+")
}
