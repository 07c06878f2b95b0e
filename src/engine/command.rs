use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Append(String),
    Prepend(String),
    Get(usize),
    Set(usize, String),
    First,
    Last,
    Len,
    Cap,
    Remove(usize),
    Hi,
    Lo,
    Shrink,
    Clear,
    List,
    Dump,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    UnexpectedArgument(&'static str),
    InvalidIndex(String),
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(name) => write!(f, "Unknown command `{name}`"),
            CommandError::MissingArgument(name) => write!(f, "`{name}` needs an argument"),
            CommandError::UnexpectedArgument(name) => write!(f, "`{name}` takes no argument"),
            CommandError::InvalidIndex(arg) => write!(f, "`{arg}` is not an index"),
            CommandError::OutOfRange { index, len } => {
                write!(f, "Index {index} is out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

fn value(name: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    Ok(rest.to_owned())
}

fn index(name: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    arg.parse().map_err(|_| CommandError::InvalidIndex(arg.to_owned()))
}

fn bare(name: &'static str, rest: &str, command: Command) -> Result<Command, CommandError> {
    if !rest.is_empty() {
        return Err(CommandError::UnexpectedArgument(name));
    }
    Ok(command)
}

/// Splits off the first whitespace-separated word, trimming what remains.
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line.trim());
        match name {
            "append" => Ok(Command::Append(value("append", rest)?)),
            "prepend" => Ok(Command::Prepend(value("prepend", rest)?)),
            "get" => Ok(Command::Get(index("get", rest)?)),
            "remove" => Ok(Command::Remove(index("remove", rest)?)),
            "set" => {
                let (arg, rest) = split_word(rest);
                let at = index("set", arg)?;
                Ok(Command::Set(at, value("set", rest)?))
            }
            "first" => bare("first", rest, Command::First),
            "last" => bare("last", rest, Command::Last),
            "len" => bare("len", rest, Command::Len),
            "cap" => bare("cap", rest, Command::Cap),
            "hi" => bare("hi", rest, Command::Hi),
            "lo" => bare("lo", rest, Command::Lo),
            "shrink" => bare("shrink", rest, Command::Shrink),
            "clear" => bare("clear", rest, Command::Clear),
            "list" => bare("list", rest, Command::List),
            "dump" => bare("dump", rest, Command::Dump),
            "quit" | "exit" => bare("quit", rest, Command::Quit),
            _ => Err(CommandError::Unknown(name.to_owned())),
        }
    }
}
