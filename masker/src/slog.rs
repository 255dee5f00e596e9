//! Adapters for emitting masked values through `slog`.
//!
//! This module exists to connect the mask engine with `slog` by providing
//! `slog::Value` implementations that serialize masked outputs as structured
//! JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from a masked copy, never
//!   from the original value.
//! - Honoring the ambient policy installed by [`crate::context::with_policy`]
//!   at the call site, since logging happens at exactly the kind of boundary
//!   the ambient carrier exists for.
//! - Avoiding fallible logging APIs: serialization failures are represented
//!   as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog`, define strategies, or attempt to validate
//! that a `Maskable` implementation masks correctly.

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::masking::{MaskEngine, Maskable};

/// A `slog::Value` that emits an owned masked payload as structured JSON.
///
/// The payload is stored as a `serde_json::Value` and emitted via `slog`'s
/// nested-value support.
///
/// This type does not return serialization errors to `slog`; if converting
/// the masked output into a JSON value fails, it falls back to a JSON string
/// value.
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their masked form as JSON.
///
/// Calling `into_masked_json` consumes the value, masks it in place through
/// the engine under the ambient policy, and stores the result as a
/// `serde_json::Value`. The original (unmasked) value is not serialized.
///
/// ## Example
/// ```ignore
/// use masker::slog::IntoMaskedJson;
///
/// info!(logger, "event"; "data" => event.into_masked_json(&engine));
/// ```
pub trait IntoMaskedJson: Maskable + fmt::Debug + Serialize + Sized {
    /// Masks `self` and returns a `slog::Value` that serializes as structured
    /// JSON.
    ///
    /// If converting the masked output into `serde_json::Value` fails, the
    /// returned value stores a JSON string with the message
    /// `"Failed to serialize masked value"`.
    fn into_masked_json(mut self, engine: &MaskEngine) -> MaskedJson {
        engine.mask_scoped(&mut self);
        let json_value = serde_json::to_value(self)
            .unwrap_or_else(|_| JsonValue::String("Failed to serialize masked value".to_string()));
        MaskedJson::new(json_value)
    }
}

impl<T> IntoMaskedJson for T where T: Maskable + fmt::Debug + Serialize {}
