//! Pluggable content-decoder registry.
//!
//! A decoder turns raw body text into a structured [`serde_json::Value`].
//! Two independent key namespaces exist: full media types
//! (`application/json`) and file extensions (`.json`) — a leading dot
//! selects the extension namespace. Lookups run concurrently during
//! request processing; registration happens during startup wiring and is
//! serialized by the caller.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::error::Error;

/// A content decoder: raw body text in, structured value out.
pub type Decoder = Arc<dyn Fn(&str) -> Result<Value, Error> + Send + Sync>;

/// Registry of content decoders.
///
/// `new()` comes pre-wired with the strict JSON decoder under both
/// `application/json` and `.json`; `empty()` starts blank.
pub struct DecoderRegistry {
    media_types: RwLock<HashMap<String, Decoder>>,
    extensions: RwLock<HashMap<String, Decoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register("application/json", Arc::new(decode_json));
        registry.register(".json", Arc::new(decode_json));
        registry
    }

    pub fn empty() -> Self {
        Self {
            media_types: RwLock::new(HashMap::new()),
            extensions: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `decoder` under a media-type or extension key.
    ///
    /// Keys starting with `.` land in the extension namespace, everything
    /// else in the media-type namespace. A repeated key replaces the
    /// previous decoder.
    pub fn register(&self, key: &str, decoder: Decoder) {
        self.table_for(key)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), decoder);
    }

    /// Looks up the decoder for a media-type or extension key.
    ///
    /// A miss fails with [`Error::UnsupportedType`] — callers that want
    /// the permissive degrade-to-text behavior check [`contains`](Self::contains)
    /// instead.
    pub fn lookup(&self, key: &str) -> Result<Decoder, Error> {
        self.table_for(key)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| Error::UnsupportedType(key.to_owned()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table_for(key)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn table_for(&self, key: &str) -> &RwLock<HashMap<String, Decoder>> {
        if key.starts_with('.') {
            &self.extensions
        } else {
            &self.media_types
        }
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The default decoder: strict JSON text.
fn decode_json(text: &str) -> Result<Value, Error> {
    serde_json::from_str(text).map_err(|e| Error::Decode(e.to_string()))
}
