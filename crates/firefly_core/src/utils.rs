use std::fmt;

/// Writes `key = value` lines with keys padded to the longest one.
pub(crate) fn write_kv_block(f: &mut fmt::Formatter<'_>, pairs: &[(&str, String)]) -> fmt::Result {
    let longest = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        write!(f, "\n\t{key:<longest$} = {value}")?;
    }
    Ok(())
}

pub(crate) fn parse_bool(name: &str, value: &str) -> crate::Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(crate::Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::{parse_bool, write_kv_block};

    struct Pairs(Vec<(&'static str, String)>);

    impl fmt::Display for Pairs {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_kv_block(f, &self.0)
        }
    }

    #[test]
    fn kv_block_aligns_keys() {
        let pairs = Pairs(vec![("seed", "7".to_string()), ("generations", "200".to_string())]);
        assert_eq!(pairs.to_string(), "\n\tseed        = 7\n\tgenerations = 200");
    }

    #[test]
    fn parse_bool_accepts_common_true_values() {
        assert!(parse_bool("x", "true").expect("parse"));
        assert!(parse_bool("x", "1").expect("parse"));
        assert!(parse_bool("x", "YES").expect("parse"));
        assert!(parse_bool("x", "ON").expect("parse"));
    }

    #[test]
    fn parse_bool_accepts_common_false_values() {
        assert!(!parse_bool("x", "false").expect("parse"));
        assert!(!parse_bool("x", "0").expect("parse"));
        assert!(!parse_bool("x", "NO").expect("parse"));
        assert!(!parse_bool("x", "off").expect("parse"));
    }

    #[test]
    fn parse_bool_rejects_unknown_values() {
        let err = parse_bool("log-timestamp", "maybe").expect_err("invalid bool should fail");
        assert!(
            err.to_string()
                .contains("Invalid boolean for --log-timestamp: maybe")
        );
    }
}
