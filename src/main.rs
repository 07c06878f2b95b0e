use anyhow::{Context, Result};
use std::{
    io::stdin,
    sync::mpsc::{self, Receiver, Sender},
    thread::JoinHandle,
};

use poolist::{
    display::{run_display, DisplayEvent},
    engine::Engine,
};

fn run_input_reader_thread(input_event_sender: Sender<String>) {
    std::thread::spawn(move || {
        for line in stdin().lines() {
            let Ok(line) = line else { break };
            if input_event_sender.send(line).is_err() {
                break;
            }
        }
    });
}

fn run_display_thread(display_event_receiver: Receiver<DisplayEvent>) -> JoinHandle<Result<()>> {
    std::thread::spawn(move || run_display(display_event_receiver))
}

fn main() -> Result<()> {
    env_logger::init();
    let hint = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("Invalid capacity hint `{arg}`."))?,
        None => 0,
    };
    let (input_event_sender, input_event_receiver) = mpsc::channel();
    let (display_event_sender, display_event_receiver) = mpsc::channel();
    run_input_reader_thread(input_event_sender);
    let display = run_display_thread(display_event_receiver);
    Engine::init(hint).run(&input_event_receiver, &display_event_sender)?;
    drop(display_event_sender);
    display
        .join()
        .map_err(|_| anyhow::anyhow!("Display thread panicked."))?
}
