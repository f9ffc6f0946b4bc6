use crate::grid::POSITION_BIAS;
use crate::pattern::PatternTable;

/// Human-readable dump of the weighted order for every byte value
pub fn show_table(table: &PatternTable) -> String {
    let mut output = String::new();

    output.push_str("Directional Pattern Table\n");
    output.push_str("=========================\n\n");

    output.push_str("Position bias:\n");
    for row in POSITION_BIAS {
        output.push_str(&format!("  {} {} {}\n", row[0], row[1], row[2]));
    }
    output.push_str("Weight: 10 for a 1 bit, 5 for a 0 bit, plus bias\n\n");

    output.push_str(&table.to_string());
    output
}
