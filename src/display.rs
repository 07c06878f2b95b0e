use anyhow::Result;
use crossterm::{
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::{
    io::{stderr, stdout, Write},
    sync::mpsc::Receiver,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Prompt,
    Value(String),
    Items(Vec<String>),
    Error(String),
    Dump(String),
}

/// Renders the `[a, b, c]` form used for `list` replies.
pub fn format_items(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

pub fn run_display(display_event_receiver: Receiver<DisplayEvent>) -> Result<()> {
    for display_event in display_event_receiver {
        match display_event {
            DisplayEvent::Prompt => {
                execute!(stdout(), Print("> "))?;
            }
            DisplayEvent::Value(value) => {
                execute!(stdout(), Print(value), Print("\n"))?;
            }
            DisplayEvent::Items(items) => {
                execute!(stdout(), Print(format_items(&items)), Print("\n"))?;
            }
            DisplayEvent::Error(message) => {
                let mut stdout = stdout();
                queue!(
                    stdout,
                    SetForegroundColor(Color::Red),
                    Print(message),
                    ResetColor,
                    Print("\n")
                )?;
                stdout.flush()?;
            }
            DisplayEvent::Dump(dump) => {
                execute!(stderr(), Print(dump))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::format_items;

    #[test]
    fn test_format_items() {
        assert_eq!(format_items(&[]), "[]");
        assert_eq!(
            format_items(&["a".to_owned(), "b c".to_owned()]),
            "[a, b c]"
        );
    }
}
