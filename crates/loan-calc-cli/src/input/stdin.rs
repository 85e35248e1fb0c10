use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a JSON document piped on stdin.
/// Returns None when stdin is a terminal or the pipe is empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    log::debug!("read {} bytes of input from stdin", trimmed.len());
    Ok(Some(serde_json::from_str(trimmed)?))
}
