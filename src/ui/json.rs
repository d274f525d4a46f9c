use crate::errors::AppResult;
use serde::Serialize;

/// Pretty JSON on stdout, used by every command in `--json` mode.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
