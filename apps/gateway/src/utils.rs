//! Gateway utility functions.

/// Expand `${VAR}` patterns in a string with environment variable
/// values.
///
/// Unset variables expand to the empty string; an unterminated `${` is
/// kept as-is.
pub fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Ok(value) = std::env::var(&after[..end]) {
                    result.push_str(&value);
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
