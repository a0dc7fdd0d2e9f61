// ABOUTME: Editor synchronisation for the lazy-slides application
// ABOUTME: Single-threaded session loop applying edits, keys and cursor moves to the presentation

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;

use crate::keys::{self, Key};
use crate::presentation::PresentationController;
use crate::render::{render_view, MarkdownRenderer, View};
use crate::slides::{slide_at_line, SlideParser};
use crate::theme::ThemeRegistry;

/// Messages sent by a connected editor/presenter page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Request the current document and state
    Hello,
    Key {
        key: String,
        #[serde(default)]
        editor_focused: bool,
    },
    Edit {
        text: String,
    },
    Cursor {
        line: usize,
    },
}

/// Messages pushed to every connected page. Pages ignore anything older
/// than the newest revision they have applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    State { revision: u64, view: View },
    Document { revision: u64, text: String },
    Scroll { slide: usize, line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Client(ClientMessage),
    FileChanged(String),
    Shutdown,
}

/// Collapse runs of back-to-back document replacements down to the last one.
/// Only whole-text events are merged, so the settled state is the same as
/// applying every event in order.
pub fn coalesce(events: Vec<SessionEvent>) -> Vec<SessionEvent> {
    let mut out: Vec<SessionEvent> = Vec::with_capacity(events.len());
    for event in events {
        let superseded = matches!(
            (out.last(), &event),
            (
                Some(SessionEvent::Client(ClientMessage::Edit { .. })),
                SessionEvent::Client(ClientMessage::Edit { .. })
            ) | (Some(SessionEvent::FileChanged(_)), SessionEvent::FileChanged(_))
        );
        if superseded {
            out.pop();
        }
        out.push(event);
    }
    out
}

pub struct Session {
    controller: PresentationController,
    renderer: Box<dyn MarkdownRenderer>,
    document: String,
    revision: u64,
}

impl Session {
    pub fn new(
        parser: SlideParser,
        themes: ThemeRegistry,
        renderer: Box<dyn MarkdownRenderer>,
        document: String,
    ) -> Self {
        Self {
            controller: PresentationController::new(parser, themes, &document),
            renderer,
            document,
            revision: 0,
        }
    }

    pub fn controller(&self) -> &PresentationController {
        &self.controller
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view(&self) -> View {
        render_view(&self.controller, self.renderer.as_ref())
    }

    pub fn handle(&mut self, event: SessionEvent) -> Vec<ServerMessage> {
        match event {
            SessionEvent::Client(message) => self.handle_client(message),
            SessionEvent::FileChanged(text) => {
                if text == self.document {
                    debug!("File change left the document untouched");
                    return Vec::new();
                }
                self.replace_document(text);
                let state = self.changed();
                vec![self.document_message(), state]
            }
            SessionEvent::Shutdown => Vec::new(),
        }
    }

    fn handle_client(&mut self, message: ClientMessage) -> Vec<ServerMessage> {
        match message {
            ClientMessage::Hello => vec![self.document_message(), self.state_message()],
            ClientMessage::Key {
                key,
                editor_focused,
            } => {
                let key = Key::from_dom(&key);
                if editor_focused && key.consumed_by_editor() {
                    return Vec::new();
                }
                match keys::dispatch(&key) {
                    Some(command) => {
                        debug!("Key {} -> {:?}", key, command);
                        self.controller.apply(command);
                        vec![self.changed()]
                    }
                    None => Vec::new(),
                }
            }
            ClientMessage::Edit { text } => {
                self.replace_document(text);
                vec![self.changed()]
            }
            ClientMessage::Cursor { line } => {
                let slide = slide_at_line(self.controller.slides(), line);
                let start = self.controller.slides()[slide].line;
                let moved = self.controller.state().current_index != slide;
                self.controller.go_to(slide);

                let mut out = vec![ServerMessage::Scroll { slide, line: start }];
                if moved {
                    out.push(self.changed());
                }
                out
            }
        }
    }

    fn replace_document(&mut self, text: String) {
        self.controller.set_document(&text);
        self.document = text;
    }

    fn changed(&mut self) -> ServerMessage {
        self.revision += 1;
        self.state_message()
    }

    fn state_message(&self) -> ServerMessage {
        ServerMessage::State {
            revision: self.revision,
            view: self.view(),
        }
    }

    fn document_message(&self) -> ServerMessage {
        ServerMessage::Document {
            revision: self.revision,
            text: self.document.clone(),
        }
    }

    /// Drive the session until a shutdown event arrives or every sender is gone.
    /// Pending events are drained and coalesced before being applied.
    pub fn run<F>(mut self, events: Receiver<SessionEvent>, mut publish: F)
    where
        F: FnMut(&ServerMessage),
    {
        while let Ok(first) = events.recv() {
            let mut batch = vec![first];
            batch.extend(events.try_iter());

            for event in coalesce(batch) {
                if event == SessionEvent::Shutdown {
                    info!("Session shutting down at revision {}", self.revision);
                    return;
                }
                for message in self.handle(event) {
                    publish(&message);
                }
            }
        }
        info!("All event sources closed, session ending");
    }
}
