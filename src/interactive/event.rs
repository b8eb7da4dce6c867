use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::logging::log_error;

pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let (sender, receiver) = mpsc::channel();
        let timeout = Duration::from_millis(tick_rate.max(1));

        thread::spawn(move || {
            pump(&sender, || event::poll(timeout), event::read);
        });

        Self { receiver }
    }

    pub fn recv(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

/// Forward terminal input and a tick per poll until the receiver hangs up
/// or polling fails. Dropping the sender on return ends the UI loop.
fn pump<P, R>(sender: &mpsc::Sender<Event>, mut poll: P, mut read: R)
where
    P: FnMut() -> io::Result<bool>,
    R: FnMut() -> io::Result<CrosstermEvent>,
{
    loop {
        match poll() {
            Ok(true) => {
                let forwarded = match read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(width, height)) => Some(Event::Resize(width, height)),
                    _ => None,
                };
                if let Some(event) = forwarded {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                log_error(&format!("Event poll failed: {}", e));
                break;
            }
        }
        if sender.send(Event::Tick).is_err() {
            break;
        }
    }
}
