use std::path::Path;
use std::sync::Arc;
use tracing::warn;

pub const DEMO_SCRIPT: &str = include_str!("../scripts/demo.jsonl");

/// Frames replayed to every client, in file order.
///
/// Lines are kept verbatim, including ones that are not valid JSON, so the
/// dashboard's handling of bad payloads can be exercised on purpose.
#[derive(Clone, Debug, Default)]
pub struct ReplayScript {
    frames: Arc<Vec<String>>,
}

impl ReplayScript {
    pub fn parse(text: &str) -> Self {
        let frames: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect();

        for (idx, frame) in frames.iter().enumerate() {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(frame) {
                warn!("frame {idx} is not valid JSON and will be sent as-is: {e}");
            }
        }

        Self {
            frames: Arc::new(frames),
        }
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("read script {}: {e}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn demo() -> Self {
        Self::parse(DEMO_SCRIPT)
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}
