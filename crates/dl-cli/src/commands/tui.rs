//! Launch the drawlots-tui standalone binary.

use std::path::Path;

use dl_core::Lang;

/// Launch the drawlots-tui binary, forwarding the global flags.
pub fn run(config: Option<&Path>, seed: Option<u64>, lang: Lang) -> Result<(), String> {
    let mut cmd = std::process::Command::new("drawlots-tui");
    if let Some(path) = config {
        cmd.arg("--config").arg(path);
    }
    if let Some(seed) = seed {
        cmd.arg("--seed").arg(seed.to_string());
    }
    cmd.arg("--lang").arg(lang.to_string());

    match cmd.status() {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("drawlots-tui exited with {s}")),
        Err(_) => Err(
            "drawlots-tui binary not found. Install with: cargo install --path crates/dl-tui"
                .into(),
        ),
    }
}
