//! # Body Encoding
//!
//! Compression and JSON shaping for request and response bodies.
//!
//! ## Encodings
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Upload (document bodies)                                               │
//! │    payload ─► JSON value ─► prune defaults ─► bytes ─► gzip            │
//! │                                                                         │
//! │  Download (Content-Encoding, case-insensitive)                         │
//! │    "gzip"     ─► GzDecoder                                             │
//! │    "deflate"  ─► DeflateDecoder (raw, no zlib header)                  │
//! │    anything   ─► body as-is                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;

// =============================================================================
// Upload
// =============================================================================

/// Serializes `payload` to JSON, omitting default-valued object fields.
pub fn document_json<P: Serialize + ?Sized>(payload: &P) -> ClientResult<Vec<u8>> {
    let value = serde_json::to_value(payload)?;
    Ok(serde_json::to_vec(&prune_defaults(value))?)
}

pub fn gzip_encode(bytes: &[u8]) -> ClientResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Drops object fields holding null, `""`, `0`, `false` or an empty
/// container. Array elements are never removed so positions reported back
/// as error locations still line up with the caller's records.
pub fn prune_defaults(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (key, prune_defaults(child)))
                .filter(|(_, child)| !is_default(child))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(prune_defaults).collect()),
        other => other,
    }
}

fn is_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

// =============================================================================
// Download
// =============================================================================

/// Wraps `body` in the decoder named by `content_encoding`.
pub fn decoder_for(content_encoding: Option<&str>, body: Box<dyn Read + Send>) -> Box<dyn Read + Send> {
    let encoding = content_encoding.map(|e| e.trim().to_ascii_lowercase());
    match encoding.as_deref() {
        Some("gzip") => Box::new(GzDecoder::new(body)),
        Some("deflate") => Box::new(DeflateDecoder::new(body)),
        _ => body,
    }
}

/// Reads the whole stream as UTF-8 text.
pub fn read_text(mut reader: impl Read) -> ClientResult<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::DeflateEncoder;
    use serde_json::json;
    use std::io::Cursor;

    const BODY: &str = r#"{"result":"SUCCESS","result_code":"SUCCESS"}"#;

    fn boxed(bytes: Vec<u8>) -> Box<dyn Read + Send> {
        Box::new(Cursor::new(bytes))
    }

    #[test]
    fn test_all_encodings_decode_to_same_text() {
        let gzip = gzip_encode(BODY.as_bytes()).unwrap();

        let mut deflater = DeflateEncoder::new(Vec::new(), Compression::default());
        deflater.write_all(BODY.as_bytes()).unwrap();
        let deflate = deflater.finish().unwrap();

        let identity = read_text(decoder_for(None, boxed(BODY.as_bytes().to_vec()))).unwrap();
        let gunzipped = read_text(decoder_for(Some("gzip"), boxed(gzip))).unwrap();
        let inflated = read_text(decoder_for(Some("Deflate"), boxed(deflate))).unwrap();

        assert_eq!(identity, BODY);
        assert_eq!(gunzipped, BODY);
        assert_eq!(inflated, BODY);
    }

    #[test]
    fn test_unknown_encoding_is_identity() {
        let text = read_text(decoder_for(Some("br"), boxed(BODY.as_bytes().to_vec()))).unwrap();
        assert_eq!(text, BODY);
    }

    #[test]
    fn test_corrupt_gzip_is_io_error() {
        let err = read_text(decoder_for(Some("gzip"), boxed(b"not gzip".to_vec()))).unwrap_err();
        assert_eq!(err.result_code(), tradelink_core::codes::ERROR_IO);
    }

    #[test]
    fn test_prune_keeps_array_positions() {
        let pruned = prune_defaults(json!({
            "resultStatus": 0,
            "message": "",
            "configs": {},
            "dataRecords": [
                { "keyOrderID": "A", "lines": [ { "quantity": 0 }, { "quantity": 2 } ] },
                {},
                null
            ]
        }));

        assert_eq!(
            pruned,
            json!({
                "dataRecords": [
                    { "keyOrderID": "A", "lines": [ {}, { "quantity": 2 } ] },
                    {},
                    null
                ]
            })
        );
    }

    #[test]
    fn test_prune_keeps_non_defaults() {
        let pruned = prune_defaults(json!({ "flag": true, "price": 0.5, "name": "x", "none": false }));
        assert_eq!(pruned, json!({ "flag": true, "price": 0.5, "name": "x" }));
    }
}
