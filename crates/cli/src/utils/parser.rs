/// Parse a `-D KEY=VALUE` system property. The value may be empty and may
/// itself contain `=`.
pub fn parse_property(arg: &str) -> Result<(String, String), String> {
    let Some((key, value)) = arg.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got '{arg}'"));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing property name in '{arg}'"));
    }

    Ok((key.to_string(), value.to_string()))
}
