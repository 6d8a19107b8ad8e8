//! Parsing of the `{prefix}_{ulid}` id form.

use ulid::Ulid;

use crate::IdError;

/// Splits `s` at the first `_`, checks the prefix against `expected`, and
/// decodes the rest as a ULID.
///
/// Used by every type declared with [`define_id!`](crate::define_id).
pub fn parse_prefixed(s: &str, expected: &'static str) -> Result<Ulid, IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }

    let (prefix, encoded) = s.split_once('_').ok_or(IdError::MissingSeparator)?;
    if prefix != expected {
        return Err(IdError::InvalidPrefix {
            expected,
            actual: prefix.to_string(),
        });
    }

    encoded
        .parse::<Ulid>()
        .map_err(|e| IdError::InvalidUlid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed() {
        let ulid = parse_prefixed("cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D", "cmd").unwrap();
        assert_eq!(ulid.to_string(), "01HV4Z2WQXKJNM8GPQY6VBKC3D");
    }

    #[test]
    fn test_only_first_separator_splits() {
        let err = parse_prefixed("cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D_x", "cmd").unwrap_err();
        assert!(matches!(err, IdError::InvalidUlid(_)));

        let err = parse_prefixed("my_cmd_01HV4Z2WQXKJNM8GPQY6VBKC3D", "cmd").unwrap_err();
        assert!(err.is_prefix_error());
    }
}
