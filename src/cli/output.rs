//! Terminal formatting for the `wumpus-agent` subcommands

const SECTION_WIDTH: usize = 64;

/// Print a titled banner between two rules.
pub fn print_section(title: &str) {
    let rule = "=".repeat(SECTION_WIDTH);
    println!("\n{rule}\n{title}\n{rule}");
}

/// Print a title underlined to its own length.
pub fn print_subsection(title: &str) {
    println!("\n{title}\n{}", "-".repeat(title.chars().count().max(8)));
}

/// Group digits in threes, e.g. `65536` becomes `65,536`.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.char_indices() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Print an indented `label: value` line with aligned values.
pub fn print_kv(key: &str, value: &str) {
    let label = format!("{key}:");
    println!("  {label:<20} {value}");
}

/// One decoded state with its greedy action and value.
pub fn print_state_row(state: u32, description: &str, action: &str, value: f64) {
    println!("  {state:>5}  {description:<44} {action:<8} {value:>12.3}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(256), "256");
        assert_eq!(format_number(4096), "4,096");
        assert_eq!(format_number(65536), "65,536");
        assert_eq!(format_number(1048576), "1,048,576");
    }
}
