use std::fmt::Write as _;

use pubadmin_console::list::{EMPTY_HINT, EMPTY_TITLE, ListView, Row};

fn render_row(out: &mut String, row: &Row) {
    let _ = writeln!(
        out,
        "{:>3}. [{}] {} ({})",
        row.position, row.id, row.title, row.release_date
    );
    let _ = writeln!(out, "     {}", row.description.text);
    if let Some(toggle) = row.description.toggle {
        let _ = writeln!(out, "     ({toggle}: --expand {})", row.id);
    }
    let _ = writeln!(out, "     cover: {}", row.cover_url);
}

/// Numbered text table of publications or empty state message
pub fn render_list(view: &ListView) -> String {
    let mut out = String::new();
    match view {
        ListView::Empty => {
            let _ = writeln!(out, "{EMPTY_TITLE}");
            let _ = writeln!(out, "{EMPTY_HINT}");
        }
        ListView::Table(rows) => {
            for row in rows {
                render_row(&mut out, row);
            }
        }
    }
    out
}
