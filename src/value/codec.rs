//! Codec boundary: building values from JSON/YAML and encoding them back.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

use super::opaque::Opaque;
use super::value::{Map, Value};
use crate::error::{DecodeError, Error, Result};

// Integral numbers below this magnitude are written without a fraction.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            // The sentinel has no encoded form of its own.
            Value::Absence | Value::Null => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Opaque(o) => o
                .encode()
                .map_err(ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON or YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Opaque(Opaque::new(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Absence)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Absence)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            map.set(k, v);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Parse a value from JSON text.
pub fn from_json(json: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a value from JSON bytes.
pub fn from_slice(bytes: &[u8]) -> Result<Value, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse a value from a JSON byte stream.
pub fn from_reader<R: Read>(reader: R) -> Result<Value, DecodeError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a value from a JSON file.
pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Value, DecodeError> {
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}

/// Parse a value from YAML text.
pub fn from_yaml(yaml: &str) -> Result<Value, DecodeError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(Error::encode)
}

/// Serialize a value to indented JSON.
pub fn to_json_pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Error::encode)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).map_err(Error::encode)
}

/// Encode a value to JSON bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::encode)
}

/// Copies an opaque value by pushing it through the codec.
pub(crate) fn round_trip(opaque: &Opaque) -> Result<Value> {
    let encoded = opaque.encode().map_err(Error::encode)?;
    let bytes = serde_json::to_vec(&encoded).map_err(Error::encode)?;
    Ok(from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_null_decodes_to_absence() {
        let v = from_json(r#"{"a": null, "b": [null]}"#).unwrap();
        let map = v.as_object().unwrap();
        assert!(map.get("a").unwrap().is_absent());
        assert!(map.get("b").unwrap().as_array().unwrap()[0].is_absent());
    }

    #[test]
    fn test_json_booleans_are_opaque() {
        let v = from_json("true").unwrap();
        assert_eq!(v.as_opaque().and_then(|o| o.downcast_ref::<bool>()), Some(&true));
        assert_eq!(to_json(&v).unwrap(), "true");
    }

    #[test]
    fn test_json_roundtrip() {
        let text = r#"{"count":42,"name":"test","ratio":0.5,"tags":["a",null]}"#;
        let value = from_json(text).unwrap();
        assert_eq!(to_json(&value).unwrap(), text);
        assert_eq!(from_slice(&encode(&value).unwrap()).unwrap(), value);
    }

    #[test]
    fn test_yaml_decode() {
        let yaml = "name: test\nitems:\n  - 1\n  - two\nempty: ~\n";
        let value = from_yaml(yaml).unwrap();
        let expected = from_json(r#"{"name":"test","items":[1,"two"],"empty":null}"#).unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_sentinel_encodes_as_null() {
        let v = Value::Array(vec![Value::Null, Value::Absence]);
        assert_eq!(to_json(&v).unwrap(), "[null,null]");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(from_json("{"), Err(DecodeError::Json(_))));
        assert!(matches!(from_yaml("a: [1"), Err(DecodeError::Yaml(_))));
        assert!(matches!(
            from_file("/nonexistent/docdelta/input.json"),
            Err(DecodeError::Io(_))
        ));
    }

    #[test]
    fn test_from_reader() {
        let bytes: &[u8] = br#"["x", 1]"#;
        let v = from_reader(bytes).unwrap();
        assert_eq!(v, Value::Array(vec![Value::from("x"), Value::from(1)]));
    }
}
