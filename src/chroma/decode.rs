//! Decoding of "get collection" responses.
//!
//! The reply is a JSON object; only its top-level `id` and `name` keys are of
//! interest. Each is kept when it holds a JSON string that fits its field and
//! treated as absent otherwise. Numbers are never stringified. Unknown keys
//! and nested values are skipped.

use super::{CollectionRef, Error, MAX_RESPONSE_LEN};
use core::fmt;
use core::marker::PhantomData;
use heapless::String;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// Parses a collection object, failing when `body` is not a well-formed JSON
/// object.
///
/// String values are unescaped through a scratch buffer of
/// [`MAX_RESPONSE_LEN`] bytes, so a single escaped string longer than that
/// also fails to decode.
pub fn parse_collection(body: &[u8]) -> Result<CollectionRef, Error> {
    let mut scratch = [0u8; MAX_RESPONSE_LEN];
    let (collection, _) = serde_json_core::from_slice_escaped::<CollectionRef>(body, &mut scratch)
        .map_err(|_| Error::Decode)?;
    // serde-json-core skips scalars it is not asked to keep without looking at them.
    if !scalars_are_valid(body) {
        return Err(Error::Decode);
    }
    Ok(collection)
}

/// Parses a collection object, logging and returning an empty record when
/// `body` is not a JSON object.
///
/// Callers can tell a failed decode apart with [`CollectionRef::is_complete`].
pub fn decode_collection(body: &[u8]) -> CollectionRef {
    match parse_collection(body) {
        Ok(collection) => collection,
        Err(e) => {
            warn!("collection response is not a well-formed JSON object: {:?}", e);
            CollectionRef::default()
        }
    }
}

/// Checks every value that is neither a string nor a container against the
/// JSON literal and number grammar.
///
/// Structure is left to the deserializer, which has already accepted `body`
/// by the time this runs. A value starts after `:`, `[` or `,` and runs to the
/// next `,`, `}` or `]`.
fn scalars_are_valid(body: &[u8]) -> bool {
    let mut i = 0;
    let mut value_next = false;

    while let Some(&b) = body.get(i) {
        match b {
            b' ' | b'\t' | b'\n' | b'\r' => i += 1,
            b'"' => {
                i = string_end(body, i + 1);
                value_next = false;
            }
            b':' | b'[' | b',' => {
                value_next = true;
                i += 1;
            }
            b'{' | b'}' | b']' => {
                value_next = false;
                i += 1;
            }
            _ if value_next => {
                let end = body[i..]
                    .iter()
                    .position(|c| matches!(c, b',' | b'}' | b']'))
                    .map_or(body.len(), |n| i + n);
                if !is_literal(body[i..end].trim_ascii_end()) {
                    return false;
                }
                value_next = false;
                i = end;
            }
            _ => i += 1,
        }
    }
    true
}

/// Index just past the closing quote of a string whose contents start at `i`.
fn string_end(body: &[u8], mut i: usize) -> usize {
    while let Some(&b) = body.get(i) {
        match b {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    body.len()
}

fn is_literal(token: &[u8]) -> bool {
    matches!(token, b"true" | b"false" | b"null") || is_number(token)
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_number(token: &[u8]) -> bool {
    fn digits(s: &[u8]) -> usize {
        s.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let s = token.strip_prefix(b"-").unwrap_or(token);
    let int_len = digits(s);
    if int_len == 0 || (int_len > 1 && s[0] == b'0') {
        return false;
    }
    let mut rest = &s[int_len..];

    if let Some(frac) = rest.strip_prefix(b".") {
        let n = digits(frac);
        if n == 0 {
            return false;
        }
        rest = &frac[n..];
    }
    if let Some(exp) = rest.strip_prefix(b"e").or_else(|| rest.strip_prefix(b"E")) {
        let exp = exp
            .strip_prefix(b"+")
            .or_else(|| exp.strip_prefix(b"-"))
            .unwrap_or(exp);
        let n = digits(exp);
        if n == 0 {
            return false;
        }
        rest = &exp[n..];
    }
    rest.is_empty()
}

enum Field {
    Id,
    Name,
    Other,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object key")
            }

            fn visit_str<E: de::Error>(self, key: &str) -> Result<Field, E> {
                Ok(match key {
                    "id" => Field::Id,
                    "name" => Field::Name,
                    _ => Field::Other,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// A value that is `Some` only when it was a JSON string fitting in `N` bytes.
struct Lenient<const N: usize>(Option<String<N>>);

impl<'de, const N: usize> Deserialize<'de> for Lenient<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LenientVisitor<const N: usize>(PhantomData<[u8; N]>);

        impl<'de, const N: usize> Visitor<'de> for LenientVisitor<N> {
            type Value = Lenient<N>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("any JSON value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Lenient(String::try_from(v).ok()))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(Lenient(None))
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
                Ok(Lenient(None))
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
                Ok(Lenient(None))
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
                Ok(Lenient(None))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Lenient(None))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Lenient(None))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Lenient(None))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Lenient(None))
            }
        }

        // serde-json-core dispatches ignored values on their first byte: strings
        // reach `visit_str`, containers are walked, scalars arrive as unit.
        deserializer.deserialize_ignored_any(LenientVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for CollectionRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = CollectionRef;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a collection object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<CollectionRef, A::Error> {
                // The first occurrence of a key decides, even if it was not a string.
                let mut id: Option<Lenient<{ super::MAX_ID_LEN }>> = None;
                let mut name: Option<Lenient<{ super::MAX_NAME_LEN }>> = None;

                while let Some(field) = map.next_key::<Field>()? {
                    match field {
                        Field::Id if id.is_none() => id = Some(map.next_value()?),
                        Field::Name if name.is_none() => name = Some(map.next_value()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }

                Ok(CollectionRef {
                    id: id.and_then(|v| v.0).unwrap_or_default(),
                    name: name.and_then(|v| v.0).unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(json: &str) -> (String<64>, String<64>) {
        let c = decode_collection(json.as_bytes());
        (c.id, c.name)
    }

    #[test]
    fn keeps_string_fields() {
        let c = decode_collection(br#"{"id":"abc","name":"foo"}"#);
        assert_eq!(c.id.as_str(), "abc");
        assert_eq!(c.name.as_str(), "foo");
        assert!(c.is_complete());
    }

    #[test]
    fn numeric_id_is_absent_not_stringified() {
        let (id, name) = decoded(r#"{"id":123,"name":"foo"}"#);
        assert_eq!(id.as_str(), "");
        assert_eq!(name.as_str(), "foo");
    }

    #[test]
    fn invalid_json_yields_empty_record() {
        assert_eq!(parse_collection(b"not json"), Err(Error::Decode));
        assert_eq!(decode_collection(b"not json"), CollectionRef::default());
    }

    #[test]
    fn empty_object_yields_empty_record() {
        assert_eq!(parse_collection(b"{}"), Ok(CollectionRef::default()));
    }

    #[test]
    fn non_object_top_level_is_a_decode_error() {
        for body in [&b""[..], b"[]", b"\"abc\"", b"42", b"null"] {
            assert_eq!(parse_collection(body), Err(Error::Decode));
        }
    }

    #[test]
    fn skips_unknown_and_nested_values() {
        let c = decode_collection(
            br#"{
                "metadata": {"hnsw:space": "cosine", "tags": ["a", {"b": null}]},
                "dimension": 384,
                "tenant": "default_tenant",
                "name": "docs",
                "database": "default_database",
                "id": "8ecf0f7e-0b36-4ba1-8b3a-5e5b6e8a2a11"
            }"#,
        );
        assert_eq!(c.id.as_str(), "8ecf0f7e-0b36-4ba1-8b3a-5e5b6e8a2a11");
        assert_eq!(c.name.as_str(), "docs");
    }

    #[test]
    fn wrong_types_are_ignored() {
        for json in [
            r#"{"id":null,"name":true}"#,
            r#"{"id":["abc"],"name":{"value":"foo"}}"#,
            r#"{"id":-1.5e3,"name":false}"#,
        ] {
            let (id, name) = decoded(json);
            assert!(id.is_empty() && name.is_empty(), "{json}");
        }
    }

    #[test]
    fn keys_are_case_sensitive() {
        let (id, name) = decoded(r#"{"ID":"abc","Name":"foo","name":"bar"}"#);
        assert_eq!(id.as_str(), "");
        assert_eq!(name.as_str(), "bar");
    }

    #[test]
    fn first_duplicate_key_wins() {
        let (id, name) = decoded(r#"{"id":1,"id":"late","name":"first","name":"second"}"#);
        assert_eq!(id.as_str(), "");
        assert_eq!(name.as_str(), "first");
    }

    #[test]
    fn string_values_are_unescaped() {
        let (id, name) = decoded(r#"{"id":"a\"b","name":"x\ny\u0041\/"}"#);
        assert_eq!(id.as_str(), "a\"b");
        assert_eq!(name.as_str(), "x\nyA/");
    }

    #[test]
    fn escaped_keys_are_matched_after_unescaping() {
        let (id, _) = decoded(r#"{"\u0069d":"abc"}"#);
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn invalid_escape_is_a_decode_error() {
        assert_eq!(parse_collection(br#"{"id":"a\qb","name":"foo"}"#), Err(Error::Decode));
    }

    #[test]
    fn malformed_scalars_are_decode_errors() {
        for json in [
            r#"{"id":bogus,"name":"foo"}"#,
            r#"{"id":12abc!!,"name":"foo"}"#,
            r#"{"id":12abc,"name":"foo"}"#,
            r#"{"id":tru,"name":"foo"}"#,
            r#"{"id":01,"name":"foo"}"#,
            r#"{"id":1.,"name":"foo"}"#,
            r#"{"id":-,"name":"foo"}"#,
            r#"{"id":1e,"name":"foo"}"#,
            r#"{"id":12 34,"name":"foo"}"#,
            r#"{"id":null "x","name":"foo"}"#,
            r#"{"name":"foo","metadata":{"space":cosine}}"#,
            r#"{"name":"foo","tags":[1,two,3]}"#,
        ] {
            assert_eq!(parse_collection(json.as_bytes()), Err(Error::Decode), "{json}");
            assert_eq!(decode_collection(json.as_bytes()), CollectionRef::default(), "{json}");
        }
    }

    #[test]
    fn well_formed_scalars_are_accepted() {
        let c = decode_collection(
            br#"{ "dimension" : -0.5e+10 , "flags":[0, 1.25, 3E-2, true, false, null ], "name":"docs", "id" : "a:b,c]" }"#,
        );
        assert_eq!(c.id.as_str(), "a:b,c]");
        assert_eq!(c.name.as_str(), "docs");
    }

    #[test]
    fn oversized_string_is_absent() {
        let long = "x".repeat(65);
        let json = format!(r#"{{"id":"{long}","name":"ok"}}"#);
        let (id, name) = decoded(&json);
        assert_eq!(id.as_str(), "");
        assert_eq!(name.as_str(), "ok");
    }
}
