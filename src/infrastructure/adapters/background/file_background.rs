//! File Background Track - 从固定文件加载背景音乐
//!
//! 每次请求重新读取，文件可以在服务运行期间被替换。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{AudioDecoderPort, BackgroundTrackPort, BackgroundUnavailable};
use crate::domain::audio::PcmTrack;

pub struct FileBackgroundTrack {
    path: PathBuf,
    decoder: Arc<dyn AudioDecoderPort>,
}

impl FileBackgroundTrack {
    pub fn new(path: impl Into<PathBuf>, decoder: Arc<dyn AudioDecoderPort>) -> Self {
        Self {
            path: path.into(),
            decoder,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackgroundTrackPort for FileBackgroundTrack {
    fn load(&self) -> Result<Option<PcmTrack>, BackgroundUnavailable> {
        if !self.path.is_file() {
            tracing::info!(path = %self.path.display(), "No background track, mixing narration only");
            return Ok(None);
        }

        let raw = self.decoder.decode_file(&self.path)?;
        let track = PcmTrack::from_interleaved(&raw.samples, raw.channels, raw.sample_rate);
        if track.is_empty() {
            return Err(BackgroundUnavailable::Empty);
        }

        tracing::debug!(
            path = %self.path.display(),
            sample_rate = track.sample_rate(),
            channels = raw.channels,
            duration_secs = track.duration_seconds(),
            "Background track loaded"
        );

        Ok(Some(track))
    }
}
