use colored::Colorize;
use jotter::api::{CmdMessage, MessageLevel};
use jotter::commands::replace::Progress;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_progress(progress: Progress) {
    println!(
        "{}",
        format!("  updated {}/{}", progress.completed, progress.total).dimmed()
    );
}
