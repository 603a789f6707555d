//! ASCII table rendering for `crtsync list`.

use crate::index::Index;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = ["Name", "File", "Key", "Loop", "Delay"];

/// Render the index as a boxed table, each column as wide as its widest cell.
///
/// ```text
///  _________________________________________
/// | Name  |   File    | Key | Loop  | Delay |
/// |-------|-----------|-----|-------|-------|
/// | Pulse | pulse.gif | up  | false | 0ms   |
///  ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
/// ```
pub fn render(index: &Index) -> String {
    let rows: Vec<[String; 5]> = index
        .iter()
        .map(|c| {
            [
                c.name.clone(),
                c.file.clone(),
                c.key.to_string(),
                c.looped.to_string(),
                format!("{}ms", c.loop_delay),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    // "| a | b | c | d | e |" minus the two outer corners
    let inner = widths.iter().sum::<usize>() + 3 * widths.len() - 1;

    let mut out = String::new();
    out.push_str(&format!(" {} \n", "_".repeat(inner)));

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| center(h, w))
        .collect();
    out.push_str(&format!("| {} |\n", header.join(" | ")));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("|-{}-|\n", rule.join("-|-")));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| pad_right(cell, w))
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    out.push_str(&format!(" {} ", "‾".repeat(inner)));
    out
}

fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

/// Center `s`; an odd remainder goes on the right.
fn center(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    let left = fill / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(fill - left))
}
