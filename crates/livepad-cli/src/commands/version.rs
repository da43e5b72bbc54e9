use livepad_core::version::version_string;
use livepad_core::{SDK_VERSION, VERSION};
use miette::{IntoDiagnostic, Result};

pub fn run(json: bool) -> Result<()> {
    if json {
        let info = serde_json::json!({
            "version": VERSION,
            "sdk_version": SDK_VERSION,
        });
        println!("{}", serde_json::to_string(&info).into_diagnostic()?);
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
