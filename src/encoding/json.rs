use super::{EncodeError, Encoder};

const CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncoder {
    pub pretty_print: bool,
}

impl JsonEncoder {
    pub fn new(pretty_print: bool) -> Self {
        Self { pretty_print }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, data: &dyn erased_serde::Serialize) -> Result<Vec<u8>, EncodeError> {
        let bytes = if self.pretty_print {
            serde_json::to_vec_pretty(data)?
        } else {
            serde_json::to_vec(data)?
        };
        Ok(bytes)
    }

    fn content_type(&self) -> &str {
        CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Unit {
        name: String,
        replicas: u32,
        tags: Vec<String>,
    }

    fn unit() -> Unit {
        Unit {
            name: "api".to_string(),
            replicas: 3,
            tags: vec!["edge".to_string()],
        }
    }

    struct Unsupported;

    impl Serialize for Unsupported {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("unsupported field type"))
        }
    }

    #[test]
    fn compact_output_round_trips() {
        let bytes = JsonEncoder::new(false).encode(&unit()).expect("encode");
        assert_eq!(
            bytes,
            br#"{"name":"api","replicas":3,"tags":["edge"]}"#.to_vec()
        );

        let decoded: Unit = serde_json::from_slice(&bytes).expect("decode");
        assert_eq!(decoded, unit());
    }

    #[test]
    fn pretty_output_is_indented() {
        let bytes = JsonEncoder::new(true)
            .encode(&serde_json::json!({ "status": "ok" }))
            .expect("encode");
        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            "{\n  \"status\": \"ok\"\n}"
        );
    }

    #[test]
    fn content_type_ignores_configuration() {
        let compact = JsonEncoder::new(false);
        let pretty = JsonEncoder::new(true);
        assert_eq!(compact.content_type(), compact.content_type());
        assert_eq!(compact.content_type(), pretty.content_type());
        assert_eq!(compact.content_type(), "application/json; charset=utf-8");
    }

    #[test]
    fn unsupported_value_is_a_serialization_error() {
        let err = JsonEncoder::new(false)
            .encode(&Unsupported)
            .expect_err("expected serialization failure");
        assert!(matches!(err, EncodeError::Json(_)));
        assert!(err.to_string().contains("unsupported field type"));
    }
}
