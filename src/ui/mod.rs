//! Terminal output helpers
//!
//! Operator-facing lines share one look: numbered step headers, indented
//! detail lines, dimmed "nothing to do" notices.

use console::Style;

/// Numbered step header
pub fn step(n: usize, total: usize, msg: &str) {
    println!(
        "{} {}",
        Style::new().green().bold().apply_to(format!("[{n}/{total}]")),
        Style::new().bold().apply_to(msg)
    );
}

/// Progress line under a step
pub fn detail(msg: &str) {
    println!("      {msg}");
}

/// The host already matched; nothing was changed
pub fn kept(msg: &str) {
    println!("      {}", Style::new().dim().apply_to(msg));
}

/// Non-fatal problem the operator should still see
pub fn warn(msg: &str) {
    println!("      {}", Style::new().yellow().apply_to(msg));
}

/// Final success banner
pub fn success(msg: &str) {
    println!();
    println!("{}", Style::new().green().bold().apply_to(msg));
}

/// Dry-run tagged line
pub fn would(msg: &str) {
    println!(
        "{} {}",
        Style::new().yellow().bold().apply_to("[DRY RUN]"),
        msg
    );
}
