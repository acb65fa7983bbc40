//! Table rendering for formatted output.

/// A simple table for formatted output.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| display_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row.iter().map(|s| s.to_string()).collect();

        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(display_width(cell));
            }
        }

        self.rows.push(row);
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut output = String::new();

        // Top border
        output.push_str(&self.render_border('┌', '┬', '┐'));
        output.push('\n');

        // Header row
        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        // Header separator
        output.push_str(&self.render_border('├', '┼', '┤'));
        output.push('\n');

        // Data rows
        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        // Bottom border
        output.push_str(&self.render_border('└', '┴', '┘'));

        output
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        s.push(left);

        for (i, width) in self.column_widths.iter().enumerate() {
            s.push_str(&"─".repeat(width + 2));
            if i < self.column_widths.len() - 1 {
                s.push(mid);
            }
        }

        s.push(right);
        s
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(|s| s.as_str()).unwrap_or("");
            let padding = width - display_width(cell);
            s.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
        }

        s
    }
}

/// Width of a cell in characters.
fn display_width(cell: &str) -> usize {
    cell.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(vec!["Name", "Path"]);
        let output = table.render();
        assert!(output.contains("Name"));
        assert!(output.contains("Path"));
    }

    #[test]
    fn table_with_rows() {
        let mut table = Table::new(vec!["Name", "Description", "Path"]);
        table.add_row(vec!["python-pkg", "Python package", "/templates/python"]);
        table.add_row(vec!["rust-cli", "No description", "/templates/rust"]);

        let output = table.render();
        assert!(output.contains("python-pkg"));
        assert!(output.contains("Python package"));
        assert!(output.contains("/templates/rust"));
    }

    #[test]
    fn table_adjusts_column_width() {
        let mut table = Table::new(vec!["A"]);
        table.add_row(vec!["longer_value"]);

        let output = table.render();
        let header_line = output.lines().nth(1).unwrap();
        assert_eq!(header_line, "│ A            │");
    }

    #[test]
    fn table_uses_box_drawing() {
        let table = Table::new(vec!["Test"]);
        let output = table.render();

        assert!(output.contains("┌"));
        assert!(output.contains("┘"));
        assert!(output.contains("│"));
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
    fn table_render_line_count() {
        let mut table = Table::new(vec!["Name", "Description", "Path"]);
        table.add_row(vec!["a", "b", "c"]);
        table.add_row(vec!["d", "e", "f"]);

        // top border, header, separator, 2 rows, bottom border
        assert_eq!(table.render().lines().count(), 6);
    }
}
