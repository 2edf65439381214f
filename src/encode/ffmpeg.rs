//! MP4 export through the system `ffmpeg` binary.
//!
//! Frames are flattened onto an opaque matte and streamed as raw RGBA over stdin; the
//! encoder writes H.264 in a `yuv420p` MP4. Nothing is linked; `ffmpeg` must be on `PATH`.

use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BoardError, BoardResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Opaque colour behind transparent pixels.
    pub matte_rgb: [u8; 3],
    /// x264 constant rate factor; lower is larger and sharper.
    pub crf: u8,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            matte_rgb: [0, 0, 0],
            crf: 20,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_matte(mut self, rgb: [u8; 3]) -> Self {
        self.matte_rgb = rgb;
        self
    }

    pub fn with_crf(mut self, crf: u8) -> Self {
        self.crf = crf.min(51);
        self
    }
}

/// A running `ffmpeg` child and the bookkeeping for one export.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    cfg: SinkConfig,
    last: Option<FrameIndex>,
    opaque: Vec<u8>,
}

impl Encoder {
    fn spawn(opts: &FfmpegSinkOpts, cfg: SinkConfig) -> BoardResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(encoder_args(opts, &cfg))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BoardError::export(format!("could not start ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf).map(|_| buf)
            })
        });
        if stdin.is_none() {
            let _ = child.kill();
            return Err(BoardError::export("ffmpeg stdin is not piped"));
        }

        let opaque = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        Ok(Self {
            child,
            stdin,
            stderr,
            cfg,
            last: None,
            opaque,
        })
    }

    fn write(&mut self, idx: FrameIndex, frame: &FrameRGBA, matte: [u8; 3]) -> BoardResult<()> {
        if self.last.is_some_and(|last| idx <= last) {
            return Err(BoardError::export(format!(
                "frame {} arrived after frame {}",
                idx.0,
                self.last.map_or(0, |l| l.0)
            )));
        }
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(BoardError::validation(format!(
                "frame is {}x{}, export is {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.premultiplied {
            flatten_onto_matte(&mut self.opaque, &frame.data, matte)?;
        } else {
            flatten_onto_matte(&mut self.opaque, &premultiply(&frame.data), matte)?;
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| BoardError::export("ffmpeg input already closed"))?;
        stdin
            .write_all(&self.opaque)
            .map_err(|e| BoardError::export(format!("writing frame {} to ffmpeg: {e}", idx.0)))?;
        self.last = Some(idx);
        Ok(())
    }

    fn finish(mut self) -> BoardResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| BoardError::export(format!("waiting for ffmpeg: {e}")))?;
        let log = self.collect_stderr();
        if status.success() {
            return Ok(());
        }
        Err(BoardError::export(format!(
            "ffmpeg exited with {status}: {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }

    fn kill(mut self) {
        drop(self.stdin.take());
        if let Err(e) = self.child.kill() {
            tracing::warn!(error = %e, "could not stop ffmpeg");
        }
        let _ = self.child.wait();
        self.collect_stderr();
    }

    fn collect_stderr(&mut self) -> Vec<u8> {
        match self.stderr.take().map(JoinHandle::join) {
            Some(Ok(Ok(bytes))) => bytes,
            Some(Ok(Err(e))) => {
                tracing::warn!(error = %e, "reading ffmpeg stderr");
                Vec::new()
            }
            Some(Err(_)) => {
                tracing::warn!("ffmpeg stderr reader panicked");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

/// [`FrameSink`] that encodes to MP4 with `ffmpeg`.
///
/// An aborted export removes the partial output file.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
        }
    }

    pub fn opts(&self) -> &FfmpegSinkOpts {
        &self.opts
    }

    fn remove_partial_output(&self) {
        let path = &self.opts.out_path;
        if path.exists()
            && let Err(e) = std::fs::remove_file(path)
        {
            tracing::warn!(error = %e, out = %path.display(), "could not remove partial video");
        }
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip_all, fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> BoardResult<()> {
        validate_config(&cfg)?;
        if let Some(stale) = self.encoder.take() {
            stale.kill();
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(BoardError::validation(format!(
                "'{}' exists and overwrite is off",
                self.opts.out_path.display()
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(BoardError::export("ffmpeg was not found on PATH"));
        }

        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            frames = cfg.frame_count,
            "starting ffmpeg"
        );
        self.encoder = Some(Encoder::spawn(&self.opts, cfg)?);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BoardResult<()> {
        let matte = self.opts.matte_rgb;
        self.encoder
            .as_mut()
            .ok_or_else(|| BoardError::export("video export has not started"))?
            .write(idx, frame, matte)
    }

    fn end(&mut self) -> BoardResult<()> {
        self.encoder
            .take()
            .ok_or_else(|| BoardError::export("video export has not started"))?
            .finish()
    }

    fn abort(&mut self) {
        if let Some(enc) = self.encoder.take() {
            enc.kill();
        }
        self.remove_partial_output();
    }
}

/// Reject sizes and rates an `yuv420p` MP4 cannot hold.
pub(crate) fn validate_config(cfg: &SinkConfig) -> BoardResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(BoardError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(BoardError::validation("video size must be non-zero"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(BoardError::validation(format!(
            "video size {}x{} must be even",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// Command line for one encode. The input rate goes before `-i` so rawvideo picks it up.
pub(crate) fn encoder_args(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Vec<String> {
    let mut args: Vec<String> = vec![
        (if opts.overwrite { "-y" } else { "-n" }).into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgba".into(),
        "-s".into(),
        format!("{}x{}", cfg.width, cfg.height),
        "-r".into(),
        format!("{}/{}", cfg.fps.num, cfg.fps.den),
        "-i".into(),
        "pipe:0".into(),
        "-an".into(),
        "-c:v".into(),
        "libx264".into(),
        "-crf".into(),
        opts.crf.to_string(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-movflags".into(),
        "+faststart".into(),
    ];
    args.push(opts.out_path.to_string_lossy().into_owned());
    args
}

/// Composite premultiplied RGBA8 over an opaque matte.
pub(crate) fn flatten_onto_matte(dst: &mut [u8], premul: &[u8], matte: [u8; 3]) -> BoardResult<()> {
    if dst.len() != premul.len() || !dst.len().is_multiple_of(4) {
        return Err(BoardError::validation(format!(
            "frame holds {} bytes, expected {}",
            premul.len(),
            dst.len()
        )));
    }
    for (out, px) in dst.chunks_exact_mut(4).zip(premul.chunks_exact(4)) {
        let inv = 255 - u16::from(px[3]);
        for c in 0..3 {
            let v = u16::from(px[c]) + mul_div255_u16(u16::from(matte[c]), inv);
            out[c] = v.min(255) as u8;
        }
        out[3] = 255;
    }
    Ok(())
}

fn premultiply(straight: &[u8]) -> Vec<u8> {
    let mut out = straight.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255_u16(u16::from(*c), a) as u8;
        }
    }
    out
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> BoardResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating '{}'", dir.display()))?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Whether `ffmpeg -version` runs.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
