use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Format an amount as dollars with color
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount).yellow().to_string()
}

/// Shorten a long path for table output, keeping the tail
pub fn truncate_left(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width || width < 4 {
        text.to_string()
    } else {
        let tail: String = text.chars().skip(count - (width - 3)).collect();
        format!("...{}", tail)
    }
}

/// Prompt for a line of input on stderr; returns it trimmed
pub fn prompt(label: &str) -> io::Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for optional input; empty answers become `None`
pub fn prompt_optional(label: &str) -> io::Result<Option<String>> {
    let answer = prompt(label)?;
    Ok(if answer.is_empty() { None } else { Some(answer) })
}

/// Prompt user for yes/no confirmation
pub fn confirm_action(prompt_text: &str) -> io::Result<bool> {
    let answer = prompt(&format!("{} (y/N): ", prompt_text))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_from_the_left() {
        assert_eq!(truncate_left("short.jpg", 20), "short.jpg");
        assert_eq!(truncate_left("receipts/2024/march/ticket.jpg", 13), "...ticket.jpg");
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[test]
    fn amount_has_two_decimals() {
        colored::control::set_override(false);
        assert_eq!(format_amount(4.5), "$4.50");
    }
}
