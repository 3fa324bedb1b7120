use console::Style;
use once_cell::sync::Lazy;

pub static MATCH: Lazy<Style> = Lazy::new(|| Style::new().black().on_yellow().bold());
pub static REMOVED: Lazy<Style> = Lazy::new(|| Style::new().red().strikethrough());
pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
