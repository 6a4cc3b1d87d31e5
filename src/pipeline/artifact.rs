use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MANIFEST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";
pub const SEGMENT_CONTENT_TYPE: &str = "video/mp2t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Manifest,
    Segment,
}

/// One file the transcoder produced that must be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub local_path: PathBuf,
    pub role: ArtifactRole,
}

impl Artifact {
    pub fn content_type(&self) -> &'static str {
        match self.role {
            ArtifactRole::Manifest => MANIFEST_CONTENT_TYPE,
            ArtifactRole::Segment => SEGMENT_CONTENT_TYPE,
        }
    }

    pub fn file_name(&self) -> &str {
        self.local_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Scans one directory level and picks out the HLS output. Anything that is
/// not a segment or a manifest (e.g. the source copy) is skipped. Sorted by
/// path so repeated scans of the same directory yield the same order.
pub fn classify(dir: &Path) -> io::Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let role = if name.ends_with(".m3u8") {
            ArtifactRole::Manifest
        } else if name.ends_with(".ts") {
            ArtifactRole::Segment
        } else {
            continue;
        };

        artifacts.push(Artifact {
            local_path: path,
            role,
        });
    }

    artifacts.sort_by(|a, b| a.local_path.cmp(&b.local_path));
    Ok(artifacts)
}
