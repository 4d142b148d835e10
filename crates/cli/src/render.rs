//! Plain-text product table.

use std::fmt::Write as _;

use product_dashboard::{ListState, Notice, ProductRow};
use tokio::time::Instant;

use crate::commands::Dashboard;

const NAME_WIDTH: usize = 24;
const PRICE_WIDTH: usize = 10;
const DESCRIPTION_WIDTH: usize = 32;
const COLOR_WIDTH: usize = 10;

/// Print the notice banner and the visible rows to stdout.
#[allow(clippy::print_stdout)]
pub fn print(dashboard: &Dashboard) {
    print!("{}", render(dashboard, Instant::now()));
}

fn render(dashboard: &Dashboard, now: Instant) -> String {
    let mut out = String::new();

    if let Some(notice) = dashboard.notice() {
        let marker = match notice {
            Notice::Success(_) => "ok",
            Notice::Error(_) => "error",
        };
        let _ = writeln!(out, "[{marker}] {}\n", notice.message());
    }

    match dashboard.state() {
        ListState::Idle | ListState::Loading => return out,
        ListState::Error(message) => {
            let _ = writeln!(out, "{message}");
            return out;
        }
        ListState::Loaded => {}
    }

    let rows = dashboard.visible_rows(now);
    if rows.is_empty() {
        out.push_str("No products found\n");
        return out;
    }

    out.push_str(&header());
    for row in &rows {
        out.push_str(&line(row));
    }
    out
}

fn header() -> String {
    format!(
        "{:<6} {:<NAME_WIDTH$} {:>PRICE_WIDTH$} {:<DESCRIPTION_WIDTH$} {:<COLOR_WIDTH$}\n",
        "ID", "Name", "Price", "Description", "Color"
    )
}

fn line(row: &ProductRow<'_>) -> String {
    let product = row.product;
    let tag = if row.is_new {
        " [new]"
    } else if row.is_updated {
        " [updated]"
    } else {
        ""
    };
    format!(
        "{:<6} {:<NAME_WIDTH$} {:>PRICE_WIDTH$} {:<DESCRIPTION_WIDTH$} {:<COLOR_WIDTH$}{tag}\n",
        product.id.to_string(),
        truncate(product.display_name(), NAME_WIDTH),
        product.display_price(),
        truncate(product.display_description(), DESCRIPTION_WIDTH),
        truncate(product.display_color(), COLOR_WIDTH),
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use product_dashboard_core::{Product, ProductId};

    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_line_marks_new_rows() {
        let product = Product {
            id: ProductId::from(7),
            name: Some("Lamp".to_string()),
            price: Some(19.5),
            description: None,
            color: None,
        };
        let row = ProductRow {
            product: &product,
            is_new: true,
            is_updated: false,
        };

        let text = line(&row);
        assert!(text.starts_with("7 "));
        assert!(text.contains("Lamp"));
        assert!(text.contains("$19.50"));
        assert!(text.contains("No description"));
        assert!(text.trim_end().ends_with("[new]"));
    }
}
