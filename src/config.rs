use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Clone)]
#[command(name = "ascii-pet")]
#[command(about = "A tiny always-there terminal pet that gets hungry, dirty and sleepy")]
pub(crate) struct Args {
    /// Frames per second of the main loop
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// RNG seed (0 picks a fresh one every launch)
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Pet name (random when not set)
    #[arg(long)]
    pub(crate) name: Option<String>,

    /// Draw without colors
    #[arg(long, default_value_t = false)]
    pub(crate) no_color: bool,

    /// Do not mirror the pet into the terminal title
    #[arg(long, default_value_t = false)]
    pub(crate) no_tray: bool,

    /// Ring the terminal bell on button presses
    #[arg(long, default_value_t = false)]
    pub(crate) bell: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) enable_color: bool,
    pub(crate) tray_mirror: bool,
    pub(crate) bell: bool,
    pub(crate) seed: u64,
    pub(crate) pet_name: Option<String>,
    pub(crate) key_bindings: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 60,
            enable_color: true,
            tray_mirror: true,
            bell: false,
            seed: 0,
            pet_name: None,
            key_bindings: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub(crate) fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(fps) = args.fps {
            self.fps_cap = fps;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            self.pet_name = Some(name.to_string());
        }
        if args.no_color {
            self.enable_color = false;
        }
        if args.no_tray {
            self.tray_mirror = false;
        }
        if args.bell {
            self.bell = true;
        }
        self
    }

    pub(crate) fn fps(&self) -> u32 {
        self.fps_cap.clamp(10, 240)
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "ascii-pet", "AsciiPet")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("ascii-pet.log"),
    })
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    if let Ok(s) = fs::read_to_string(path) {
        match serde_json::from_str::<Settings>(&s) {
            Ok(v) => return v,
            Err(e) => tracing::warn!(path = %path.display(), %e, "ignoring bad settings file"),
        }
    }
    Settings::default()
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename-over-existing fails on Windows
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
        .with_context(|| format!("renaming {} to {}", from.display(), to.display()))?;
    Ok(())
}
