//! User-facing status lines. Diagnostics go through `tracing` instead.

use ansi_term::{Colour, Style};
use std::fmt;
use std::sync::LazyLock;

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// Honour the NO_COLOR convention (https://no-color.org).
static COLOR: LazyLock<bool> = LazyLock::new(|| std::env::var_os("NO_COLOR").is_none());

fn style(colour: Colour) -> Style {
    if *COLOR {
        colour.bold()
    } else {
        Style::new()
    }
}

fn line<T: fmt::Display>(colour: Colour, icon: &str, msg: T) -> String {
    format!("{} {}", style(colour).paint(icon), msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Colour::Blue, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Colour::Green, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Colour::Yellow, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Colour::Red, ICON_ERR, msg));
}

/// Section header, e.g. one timeline day.
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}",
        style(Colour::Blue).paint(format!("====================== {}", msg))
    );
}
