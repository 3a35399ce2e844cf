use crate::domain::models::JsonOut;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(json: bool, data: T, row: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Failure rendering for `main`: JSON envelope on stdout in `--json` mode,
/// a plain line on stderr otherwise.
pub fn print_error(json: bool, code: &str, message: &str) {
    if json {
        println!(
            "{}",
            serde_json::json!({"ok": false, "error": {"code": code, "message": message}})
        );
    } else {
        eprintln!("error: {message}");
    }
}
