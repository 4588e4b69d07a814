//! Encoding of persisted state values.
//!
//! Lists are comma-joined and sorted; camera vectors are three comma-joined
//! decimals using shortest round-trip float formatting.

use foundation::math::Vec3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A vector did not have exactly three components.
    Arity { found: usize },
    /// A component did not parse as a number.
    Number { token: String },
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Arity { found } => {
                write!(f, "expected 3 vector components, found {found}")
            }
            CodecError::Number { token } => write!(f, "invalid number: {token:?}"),
        }
    }
}

impl std::error::Error for CodecError {}

pub fn encode_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    items.sort();
    items.join(",")
}

/// Split on commas, trimming tokens and dropping empty ones.
pub fn decode_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn encode_vec3(v: Vec3) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

pub fn decode_vec3(raw: &str) -> Result<Vec3, CodecError> {
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [x, y, z] = tokens[..] else {
        return Err(CodecError::Arity {
            found: tokens.len(),
        });
    };
    let v = Vec3::new(parse_component(x)?, parse_component(y)?, parse_component(z)?);
    if !v.is_finite() {
        return Err(CodecError::Number {
            token: raw.to_string(),
        });
    }
    Ok(v)
}

fn parse_component(token: &str) -> Result<f64, CodecError> {
    token.parse::<f64>().map_err(|_| CodecError::Number {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{CodecError, decode_list, decode_vec3, encode_list, encode_vec3};
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_is_sorted_on_encode() {
        assert_eq!(encode_list(["TAC", "EARTH", "SEC"]), "EARTH,SEC,TAC");
        assert_eq!(encode_list(Vec::<String>::new()), "");
    }

    #[test]
    fn empty_string_decodes_to_empty_list() {
        assert!(decode_list("").is_empty());
        assert!(decode_list(",,").is_empty());
    }

    #[test]
    fn decode_list_trims_tokens() {
        assert_eq!(decode_list("KSFO, KJFK ,"), vec!["KSFO", "KJFK"]);
    }

    #[test]
    fn list_round_trip_normalizes_order() {
        let raw = "SEC,CLASS_B,EARTH";
        assert_eq!(encode_list(decode_list(raw)), "CLASS_B,EARTH,SEC");
    }

    #[test]
    fn vec3_round_trip_is_exact() {
        let v = Vec3::new(-2_694_045.123_456_789, -4_297_105.5, 3_854_884.000_000_1);
        assert_eq!(decode_vec3(&encode_vec3(v)), Ok(v));
        assert_eq!(encode_vec3(Vec3::new(1.0, 2.0, 3.0)), "1,2,3");
    }

    #[test]
    fn decode_vec3_accepts_plain_triples() {
        assert_eq!(decode_vec3("0,0,-1"), Ok(Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(decode_vec3("1e3, 2.5, -0"), Ok(Vec3::new(1000.0, 2.5, -0.0)));
    }

    #[test]
    fn decode_vec3_rejects_malformed() {
        assert_eq!(decode_vec3("1,2"), Err(CodecError::Arity { found: 2 }));
        assert_eq!(decode_vec3("1,2,3,4"), Err(CodecError::Arity { found: 4 }));
        assert_eq!(
            decode_vec3("1,north,3"),
            Err(CodecError::Number {
                token: "north".to_string()
            })
        );
    }

    #[test]
    fn decode_vec3_rejects_non_finite() {
        assert_eq!(
            decode_vec3("NaN,0,1"),
            Err(CodecError::Number {
                token: "NaN,0,1".to_string()
            })
        );
        assert!(decode_vec3("0,inf,0").is_err());
    }
}
