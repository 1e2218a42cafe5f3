use glimt_core::model::Table;

/// Format a table as aligned text columns with a header separator.
pub fn format_table(table: &Table) -> String {
    if table.column_count() == 0 {
        return "(empty table)".to_string();
    }

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .map(|c| {
            c.values
                .iter()
                .map(|v| v.to_string().len())
                .chain(std::iter::once(c.name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<width$}", c.name, width = w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("  "));
    out.push('\n');

    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c.values[row].to_string(), width = w))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    out
}
