use std::sync::Arc;

use crate::simulation::{ParseError, SpeedSet, SpeedSetParser, SpeedStore};

struct Session {
    buffer: String,
    /// Set that was current when editing began; restored on cancel
    original: Arc<SpeedSet>,
    last_error: Option<ParseError>,
}

/// In-window editing of the speed list.
///
/// Every change to the text is parsed immediately and published to the store
/// when it is valid, so the diagrams follow the text as it is typed. Invalid
/// intermediate text leaves the last good set in place.
#[derive(Default)]
pub struct SpeedEditor {
    session: Option<Session>,
}

impl SpeedEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Current text, if editing
    pub fn buffer(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.buffer.as_str())
    }

    /// Why the current text was rejected, if it was
    pub fn last_error(&self) -> Option<ParseError> {
        self.session.as_ref().and_then(|s| s.last_error)
    }

    /// Start editing, prefilled with the serialized current set
    pub fn open(&mut self, store: &SpeedStore) {
        if self.is_open() {
            return;
        }
        let original = store.current();
        self.session = Some(Session {
            buffer: original.to_string(),
            original,
            last_error: None,
        });
    }

    /// Replace the text being edited and publish it if it parses.
    ///
    /// Control characters are dropped. Unchanged text is not re-parsed.
    pub fn set_text(&mut self, text: &str, store: &SpeedStore, parser: &SpeedSetParser) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
        if cleaned == session.buffer {
            return;
        }
        session.buffer = cleaned;
        Self::publish(session, store, parser);
    }

    /// Finish editing, keeping whatever was last published
    pub fn commit(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Finished editing wave speeds: {:?}", session.buffer);
        }
    }

    /// Abandon editing and restore the set from before the edit
    pub fn cancel(&mut self, store: &SpeedStore) {
        if let Some(session) = self.session.take() {
            store.replace(session.original);
            log::info!("Speed edit cancelled, restored {}", store.current());
        }
    }

    fn publish(session: &mut Session, store: &SpeedStore, parser: &SpeedSetParser) {
        session.last_error = store.apply(parser, &session.buffer).err();
    }
}
