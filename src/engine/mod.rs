mod command;

pub use command::{Command, CommandError};

use anyhow::Result;
use log::debug;
use std::sync::mpsc::{Receiver, Sender};

use crate::{display::DisplayEvent, dlist::DList};

const EMPTY: &str = "(empty)";

#[derive(PartialEq, Eq)]
enum EngineState {
    Running,
    Quit,
}

/// Drives a `DList<String>` from text commands.
pub struct Engine {
    state: EngineState,
    list: DList<String>,
}

fn value_or_empty(value: Option<&String>) -> DisplayEvent {
    DisplayEvent::Value(value.cloned().unwrap_or_else(|| EMPTY.to_owned()))
}

fn check_index(index: usize, len: usize) -> Result<(), CommandError> {
    if index >= len {
        return Err(CommandError::OutOfRange { index, len });
    }
    Ok(())
}

impl Engine {
    pub fn init(hint: usize) -> Self {
        Self {
            state: EngineState::Running,
            list: DList::with_capacity(hint),
        }
    }

    pub fn list(&self) -> &DList<String> {
        &self.list
    }

    /// Applies one command. Indices are checked here so the list's own
    /// bounds assertions never fire from user input.
    pub fn apply(&mut self, command: Command) -> Result<Option<DisplayEvent>> {
        debug!("Applying {command:?}.");
        let display_event = match command {
            Command::Append(value) => {
                self.list.append(value);
                None
            }
            Command::Prepend(value) => {
                self.list.prepend(value);
                None
            }
            Command::Get(index) => {
                check_index(index, self.list.len())?;
                Some(DisplayEvent::Value(self.list.get(index).clone()))
            }
            Command::Set(index, value) => {
                // Setting one past the end appends.
                check_index(index, self.list.len() + 1)?;
                self.list.set(index, value);
                None
            }
            Command::First => Some(value_or_empty(self.list.first())),
            Command::Last => Some(value_or_empty(self.list.last())),
            Command::Len => Some(DisplayEvent::Value(self.list.len().to_string())),
            Command::Cap => Some(DisplayEvent::Value(format!(
                "{} ({} spare)",
                self.list.capacity(),
                self.list.spare()
            ))),
            Command::Remove(index) => {
                check_index(index, self.list.len())?;
                Some(DisplayEvent::Value(self.list.remove(index)))
            }
            Command::Hi => Some(value_or_empty(self.list.remove_hi().as_ref())),
            Command::Lo => Some(value_or_empty(self.list.remove_lo().as_ref())),
            Command::Shrink => {
                self.list.shrink_to_fit();
                None
            }
            Command::Clear => {
                self.list.clear();
                None
            }
            Command::List => Some(DisplayEvent::Items(self.list.to_vec())),
            Command::Dump => {
                let mut buf = Vec::new();
                self.list.dump(&mut buf)?;
                Some(DisplayEvent::Dump(String::from_utf8(buf)?))
            }
            Command::Quit => {
                self.state = EngineState::Quit;
                None
            }
        };
        Ok(display_event)
    }

    fn handle_line(
        &mut self,
        line: &str,
        display_event_sender: &Sender<DisplayEvent>,
    ) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let reply = line
            .parse::<Command>()
            .map_err(anyhow::Error::from)
            .and_then(|command| self.apply(command));
        match reply {
            Ok(Some(display_event)) => display_event_sender.send(display_event)?,
            Ok(None) => (),
            Err(err) => {
                // Only command errors are recoverable.
                let err = err.downcast::<CommandError>()?;
                display_event_sender.send(DisplayEvent::Error(err.to_string()))?;
            }
        }
        Ok(())
    }

    pub fn run(
        &mut self,
        input_event_receiver: &Receiver<String>,
        display_event_sender: &Sender<DisplayEvent>,
    ) -> Result<()> {
        display_event_sender.send(DisplayEvent::Prompt)?;
        for line in input_event_receiver {
            self.handle_line(&line, display_event_sender)?;
            if self.state == EngineState::Quit {
                break;
            }
            display_event_sender.send(DisplayEvent::Prompt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::{Command, Engine};
    use crate::display::DisplayEvent;

    fn value(s: &str) -> Option<DisplayEvent> {
        Some(DisplayEvent::Value(s.to_owned()))
    }

    #[test]
    fn test_apply() {
        let mut engine = Engine::init(2);
        engine.apply(Command::Append("x".to_owned())).unwrap();
        engine.apply(Command::Append("y".to_owned())).unwrap();
        engine.apply(Command::Append("z".to_owned())).unwrap();
        engine.apply(Command::Prepend("w".to_owned())).unwrap();
        assert_eq!(engine.apply(Command::Len).unwrap(), value("4"));
        assert_eq!(engine.apply(Command::Cap).unwrap(), value("4 (0 spare)"));
        assert_eq!(engine.apply(Command::Get(2)).unwrap(), value("y"));
        assert_eq!(
            engine.apply(Command::List).unwrap(),
            Some(DisplayEvent::Items(vec![
                "w".to_owned(),
                "x".to_owned(),
                "y".to_owned(),
                "z".to_owned()
            ]))
        );
        assert_eq!(engine.apply(Command::Remove(1)).unwrap(), value("x"));
        assert_eq!(engine.apply(Command::Hi).unwrap(), value("z"));
        assert_eq!(engine.apply(Command::Lo).unwrap(), value("w"));
        assert_eq!(engine.apply(Command::First).unwrap(), value("y"));
        assert_eq!(engine.apply(Command::Cap).unwrap(), value("4 (3 spare)"));
        engine.apply(Command::Shrink).unwrap();
        assert_eq!(engine.list().capacity(), 1);
        engine.apply(Command::Clear).unwrap();
        assert_eq!(engine.apply(Command::Last).unwrap(), value("(empty)"));
        assert_eq!(engine.apply(Command::Hi).unwrap(), value("(empty)"));
    }

    #[test]
    fn test_set_bounds() {
        let mut engine = Engine::init(0);
        engine.apply(Command::Set(0, "a".to_owned())).unwrap();
        engine.apply(Command::Set(0, "b".to_owned())).unwrap();
        assert_eq!(engine.list().to_vec(), vec!["b".to_owned()]);
        assert!(engine.apply(Command::Set(2, "c".to_owned())).is_err());
        assert!(engine.apply(Command::Get(1)).is_err());
        assert!(engine.apply(Command::Remove(1)).is_err());
    }

    #[test]
    fn test_dump() {
        let mut engine = Engine::init(3);
        engine.apply(Command::Append("a".to_owned())).unwrap();
        match engine.apply(Command::Dump).unwrap() {
            Some(DisplayEvent::Dump(dump)) => {
                assert!(dump.contains("len:  1"));
                assert!(dump.contains("cap:  3"));
            }
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_run() {
        let (input_event_sender, input_event_receiver) = mpsc::channel();
        let (display_event_sender, display_event_receiver) = mpsc::channel();
        for line in [
            "append a",
            "",
            "prepend b",
            "get 9",
            "bogus",
            "list",
            "quit",
            "append never",
        ] {
            input_event_sender.send(line.to_owned()).unwrap();
        }
        drop(input_event_sender);

        let mut engine = Engine::init(1);
        engine
            .run(&input_event_receiver, &display_event_sender)
            .unwrap();
        drop(display_event_sender);

        let replies: Vec<DisplayEvent> = display_event_receiver
            .into_iter()
            .filter(|display_event| *display_event != DisplayEvent::Prompt)
            .collect();
        assert_eq!(
            replies,
            vec![
                DisplayEvent::Error("Index 9 is out of range for length 2".to_owned()),
                DisplayEvent::Error("Unknown command `bogus`".to_owned()),
                DisplayEvent::Items(vec!["b".to_owned(), "a".to_owned()]),
            ]
        );
        assert_eq!(engine.list().len(), 2);
    }
}
