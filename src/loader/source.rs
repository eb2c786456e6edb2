use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};
use crate::loader::decode::{DecodedFrame, decode_frame};

/// Naming pattern of a baked frame sequence: `<base><zero-padded index>.<extension>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FramePattern {
    /// Prefix, usually a directory plus a file stem (`"bg_photos/bg_photo_"`).
    pub base: String,
    /// Width of the zero-padded number.
    pub pad_width: usize,
    /// File extension without the dot.
    pub extension: String,
    /// Number of the first file; sequences exported as `000001..` use `1`.
    pub index_base: usize,
}

impl Default for FramePattern {
    fn default() -> Self {
        Self {
            base: "frames/".to_owned(),
            pad_width: 6,
            extension: "webp".to_owned(),
            index_base: 0,
        }
    }
}

impl FramePattern {
    /// Relative path of the frame at 0-based `index`.
    pub fn path_for(&self, index: usize) -> String {
        format!(
            "{}{:0width$}.{}",
            self.base,
            index + self.index_base,
            self.extension,
            width = self.pad_width
        )
    }

    /// Reject patterns that cannot name a file.
    pub fn validate(&self) -> ReelResult<()> {
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(ReelError::validation(
                "frame pattern extension must be non-empty and dot-free",
            ));
        }
        Ok(())
    }
}

/// Produces the decoded bitmap for one frame index.
///
/// Implementations are called concurrently from the loader pool. A fetch either yields a bitmap or
/// an error; the loader never retries.
pub trait FrameSource: Send + Sync {
    /// Fetch and decode the frame at 0-based `index`.
    fn fetch(&self, index: usize) -> ReelResult<DecodedFrame>;
}

impl<F> FrameSource for F
where
    F: Fn(usize) -> ReelResult<DecodedFrame> + Send + Sync,
{
    fn fetch(&self, index: usize) -> ReelResult<DecodedFrame> {
        self(index)
    }
}

/// Reads whole frame files from a directory tree.
#[derive(Clone, Debug)]
pub struct DirFrameSource {
    root: PathBuf,
    pattern: FramePattern,
}

impl DirFrameSource {
    /// Resolve `pattern` paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>, pattern: FramePattern) -> ReelResult<Self> {
        pattern.validate()?;
        Ok(Self {
            root: root.into(),
            pattern,
        })
    }

    /// Absolute-or-relative file path for `index`.
    pub fn file_path(&self, index: usize) -> PathBuf {
        self.root.join(self.pattern.path_for(index))
    }

    /// Directory the pattern is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for DirFrameSource {
    fn fetch(&self, index: usize) -> ReelResult<DecodedFrame> {
        let path = self.file_path(index);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
        decode_frame(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/source.rs"]
mod tests;
