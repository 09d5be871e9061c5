//! Console rendering for gathered indicators

use crate::indicator::{Color, Indicator};
use owo_colors::OwoColorize;

/// Print one indicator to the console.
///
/// Green gets a single quiet line; everything else gets a loud red block
/// with the upstream message and a pointer to the service's status page.
pub fn render_indicator(indicator: &Indicator) {
    if indicator.color == Color::Green {
        println!("{}", format!("{}: OK", indicator.label).green());
    } else {
        println!("{}", "vvvvvvv".red().bold());
        println!("{}", format!("{}: NOT OK", indicator.label).red());
        println!("{}", format!("Message: {}", indicator.message).red());
        println!(
            "{}",
            format!("More information: {}", indicator.more_info_url).red()
        );
        println!("{}", "^^^^^^^".red().bold());
    }
}
