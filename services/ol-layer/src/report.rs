//! Console output for the layer list view.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use ol_common::admin::{field_label, SUMMARY_FIELDS};
use ol_common::LayerSummary;

/// Format list view rows as a console table.
pub fn format_summary_table(rows: &[LayerSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(SUMMARY_FIELDS.iter().map(|f| field_label(f)).collect::<Vec<_>>());

    for row in rows {
        table.add_row(row.cells());
    }

    table.to_string()
}
