//! Table rendering for formatted output.

use console::measure_text_width;

/// A simple titled table for formatted output.
///
/// Cell widths are measured without ANSI escapes, so styled cells line up.
#[derive(Debug)]
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            title: None,
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Set a title rendered above the header row.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a row to the table.
    pub fn add_row<S: AsRef<str>>(&mut self, row: Vec<S>) {
        let row: Vec<String> = row.iter().map(|s| s.as_ref().to_string()).collect();

        // Update column widths
        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(measure_text_width(cell));
            }
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let widths = self.widths_for_title();
        let mut output = String::new();

        if let Some(title) = &self.title {
            let inner = Self::inner_width(&widths);
            output.push('┌');
            output.push_str(&"─".repeat(inner));
            output.push('┐');
            output.push('\n');

            output.push_str("│ ");
            output.push_str(&pad(title, inner - 2));
            output.push_str(" │");
            output.push('\n');

            output.push_str(&Self::render_border(&widths, '├', '┬', '┤'));
        } else {
            output.push_str(&Self::render_border(&widths, '┌', '┬', '┐'));
        }
        output.push('\n');

        // Header row
        output.push_str(&Self::render_row(&widths, &self.headers));
        output.push('\n');

        // Header separator
        output.push_str(&Self::render_border(&widths, '├', '┼', '┤'));
        output.push('\n');

        // Data rows
        for row in &self.rows {
            output.push_str(&Self::render_row(&widths, row));
            output.push('\n');
        }

        // Bottom border
        output.push_str(&Self::render_border(&widths, '└', '┴', '┘'));

        output
    }

    /// Column widths, with the last column stretched to fit the title.
    fn widths_for_title(&self) -> Vec<usize> {
        let mut widths = self.column_widths.clone();
        if let (Some(title), Some(last)) = (&self.title, widths.len().checked_sub(1)) {
            let needed = measure_text_width(title) + 2;
            let inner = Self::inner_width(&widths);
            if needed > inner {
                widths[last] += needed - inner;
            }
        }
        widths
    }

    /// Width between the outer borders.
    fn inner_width(widths: &[usize]) -> usize {
        let cells: usize = widths.iter().map(|w| w + 2).sum();
        cells + widths.len().saturating_sub(1)
    }

    fn render_border(widths: &[usize], left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        s.push(left);

        for (i, width) in widths.iter().enumerate() {
            s.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                s.push(mid);
            }
        }

        s.push(right);
        s
    }

    fn render_row(widths: &[usize], row: &[String]) -> String {
        let mut s = String::from("│");

        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(|s| s.as_str()).unwrap_or("");
            s.push(' ');
            s.push_str(&pad(cell, *width));
            s.push_str(" │");
        }

        s
    }
}

/// Right-pad `text` with spaces to `width` visible columns.
fn pad(text: &str, width: usize) -> String {
    let visible = measure_text_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(visible)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(vec!["A", "B"]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);

        let output = table.render();
        assert!(output.contains("A"));
        assert!(output.contains("B"));
    }

    #[test]
    fn table_with_rows() {
        let mut table = Table::new(vec!["name", "source"]);
        table.add_row(vec!["number-one", "component-one/main.wasm"]);
        table.add_row(vec!["number-two", "https://ghcr.io/fermyon/x"]);

        assert_eq!(table.row_count(), 2);

        let output = table.render();
        assert!(output.contains("number-one"));
        assert!(output.contains("component-one/main.wasm"));
        assert!(output.contains("number-two"));
    }

    #[test]
    fn table_accepts_owned_rows() {
        let mut table = Table::new(vec!["A"]);
        table.add_row(vec![String::from("owned")]);
        assert!(table.render().contains("owned"));
    }

    #[test]
    fn table_uses_box_drawing() {
        let table = Table::new(vec!["Test"]);
        let output = table.render();

        assert!(output.contains("┌"));
        assert!(output.contains("┐"));
        assert!(output.contains("└"));
        assert!(output.contains("┘"));
        assert!(output.contains("│"));
        assert!(output.contains("─"));
    }

    #[test]
    fn table_handles_missing_cells() {
        let mut table = Table::new(vec!["A", "B", "C"]);
        table.add_row(vec!["only", "two"]);

        let output = table.render();
        assert!(output.contains("only"));
        assert!(output.contains("two"));
    }

    #[test]
    fn table_render_consistency() {
        let mut table = Table::new(vec!["Route", "Executor"]);
        table.add_row(vec!["/a", "spin"]);
        table.add_row(vec!["/b", "spin"]);
        table.add_row(vec!["Private", "wagi"]);

        let output = table.render();
        let lines: Vec<_> = output.lines().collect();

        // Should have: top border, header, separator, 3 data rows, bottom border
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn titled_table_adds_title_rows() {
        let mut table = Table::new(vec!["Type"]).with_title("Other Triggers");
        table.add_row(vec!["cron"]);

        let output = table.render();
        let lines: Vec<_> = output.lines().collect();

        // top border, title, title separator, header, separator, 1 row, bottom border
        assert_eq!(lines.len(), 7);
        assert!(lines[1].contains("Other Triggers"));
    }

    #[test]
    fn all_lines_have_equal_width() {
        let mut table = Table::new(vec!["T"]).with_title("A much longer title than the column");
        table.add_row(vec!["x"]);

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{}", output);
    }

    #[test]
    fn styled_cells_align_with_plain_cells() {
        let styled = format!("{}", console::style("red").red().force_styling(true));
        let mut table = Table::new(vec!["value"]);
        table.add_row(vec![styled.as_str()]);
        table.add_row(vec!["plain"]);

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
