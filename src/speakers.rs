use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SPEAKERS_FILE: &str = "speakers.json";

fn default_temperature() -> f32 {
    0.7
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeakerConfig {
    pub name: String,
    pub prompt_template: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Deserialize)]
struct SpeakersFile {
    speakers: Vec<SpeakerConfig>,
}

pub type Speakers = HashMap<String, SpeakerConfig>;

/// Candidate locations for `speakers.json`, most specific first.
pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = explicit.into_iter().map(Path::to_path_buf).collect();

    paths.push(PathBuf::from(SPEAKERS_FILE));
    paths.push(Path::new("..").join(SPEAKERS_FILE));
    paths.push(Path::new("..").join("..").join(SPEAKERS_FILE));

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join(SPEAKERS_FILE));
        paths.push(exe_dir.join("..").join(SPEAKERS_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(env!("CARGO_PKG_NAME")).join(SPEAKERS_FILE));
    }

    paths
}

pub fn load(explicit: Option<&Path>) -> Speakers {
    load_from(&candidate_paths(explicit))
}

/// Returns the speakers of the first candidate that parses, or an empty map.
pub fn load_from(candidates: &[PathBuf]) -> Speakers {
    for path in candidates {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                debug!("Skipping {}: {error}", path.display());
                continue;
            }
        };

        match serde_json::from_str::<SpeakersFile>(&contents) {
            Ok(file) => {
                info!("Loaded speakers from {}", path.display());
                return file
                    .speakers
                    .into_iter()
                    .map(|speaker| (speaker.name.clone(), speaker))
                    .collect();
            }
            Err(error) => warn!("Invalid speakers JSON in {}: {error}", path.display()),
        }
    }

    warn!(
        "{SPEAKERS_FILE} not found in any of the expected locations: {:?}",
        candidates
    );
    Speakers::new()
}
