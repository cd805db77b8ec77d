use anyhow::{Context, Result};
use genreg::api::{Params, SearchStats};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run metadata recorded next to every graph artifact.
#[derive(Debug, Serialize)]
pub struct Payload {
    pub params: Value,
    pub stats: Option<Value>,
    /// Pre-check verdict and other free-form remarks.
    pub notes: Vec<String>,
}

impl Payload {
    pub fn new(params: Params) -> Self {
        Self {
            params: serde_json::json!({ "n": params.n, "k": params.k, "g": params.g }),
            stats: None,
            notes: Vec::new(),
        }
    }

    pub fn with_stats(mut self, s: &SearchStats) -> Self {
        self.stats = Some(serde_json::json!({
            "edges_added": s.edges_added,
            "edges_removed": s.edges_removed,
            "cycles_closed": s.cycles_closed,
            "cycle_backtracks": s.cycle_backtracks,
            "validity_checks": s.validity_checks,
        }));
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    genreg_version: &'static str,
    callsite: Callsite,
    #[serde(flatten)]
    payload: &'a Payload,
    outputs: Vec<String>,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Write `<artifact stem>.provenance.json` beside `artifact`; returns its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        genreg_version: genreg::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        payload,
        outputs: vec![artifact.to_string_lossy().into_owned()],
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("graph"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit hash from `GIT_COMMIT` (build or run time), else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            if !out.status.success() {
                return None;
            }
            String::from_utf8(out.stdout).ok().map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
