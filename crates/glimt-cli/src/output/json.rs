use glimt_core::error::GlimtError;
use serde::Serialize;
use std::path::Path;

pub fn print(value: &impl Serialize) -> Result<(), GlimtError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn write(path: &Path, value: &impl Serialize) -> Result<(), GlimtError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
