use std::{
    fs,
    path::{Path, PathBuf},
};

use image::ImageFormat;

use crate::error::{StoryError, StoryResult};

/// The directory frame images are written to and read back from.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    pub fn prepare(dir: impl Into<PathBuf>) -> StoryResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Workspace { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, idx: usize) -> PathBuf {
        self.dir.join(format!("{idx}.png"))
    }

    /// Frame images already on disk: `0.png`, `1.png`, ... up to the first gap.
    pub fn existing_frames(&self) -> Vec<PathBuf> {
        (0..)
            .map(|idx| self.frame_path(idx))
            .take_while(|path| path.is_file())
            .collect()
    }

    /// Removes everything inside the directory, keeping the directory itself.
    pub fn clear(&self) -> StoryResult<()> {
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            // `file_type` does not follow symlinks, so links are unlinked, not traversed.
            let removed = if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };

            if let Err(err) = removed {
                tracing::warn!("failed to delete {}: {err}", path.display());
                return Err(err.into());
            }
        }

        Ok(())
    }

    /// Decodes a generated image and stores it as the RGBA PNG for frame `idx`.
    pub fn save_png(&self, idx: usize, bytes: &[u8]) -> StoryResult<PathBuf> {
        let path = self.frame_path(idx);
        let image = image::load_from_memory(bytes)
            .map_err(|err| StoryError::resource(&path, err))?
            .to_rgba8();

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|err| StoryError::resource(&path, err))?;

        Ok(path)
    }

    /// Converts every `.jpg`/`.jpeg` file in the directory to an RGBA `.png`
    /// with the same stem. Returns the written paths.
    pub fn convert_images(&self) -> StoryResult<Vec<PathBuf>> {
        let mut converted = Vec::default();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_jpeg = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
                .unwrap_or(false);

            if !is_jpeg || !path.is_file() {
                continue;
            }

            let image = image::open(&path)
                .map_err(|err| StoryError::resource(&path, err))?
                .to_rgba8();
            let target = path.with_extension("png");

            image
                .save_with_format(&target, ImageFormat::Png)
                .map_err(|err| StoryError::resource(&target, err))?;

            tracing::debug!("converted {} to png", path.display());
            converted.push(target);
        }

        converted.sort();
        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ColorType, Rgb, RgbImage};

    use super::*;

    fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(10, 10, Rgb([120, 30, 200]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    #[test]
    fn prepare_creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::prepare(root.path().join("a/b/output")).unwrap();

        assert!(ws.dir().is_dir());
        assert_eq!(ws.frame_path(3), ws.dir().join("3.png"));
    }

    #[test]
    fn clear_removes_files_and_subdirectories() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::prepare(root.path()).unwrap();
        fs::write(root.path().join("0.jpg"), b"x").unwrap();
        fs::create_dir_all(root.path().join("nested/deeper")).unwrap();
        fs::write(root.path().join("nested/deeper/file"), b"y").unwrap();

        ws.clear().unwrap();

        assert!(root.path().is_dir());
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_png_normalizes_to_rgba() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::prepare(root.path()).unwrap();

        let path = ws.save_png(0, &jpeg_bytes()).unwrap();

        let image = image::open(&path).unwrap();
        assert_eq!(path, ws.frame_path(0));
        assert_eq!(image.color(), ColorType::Rgba8);
        assert_eq!(image.width(), 10);
    }

    #[test]
    fn save_png_rejects_garbage() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::prepare(root.path()).unwrap();

        assert!(matches!(
            ws.save_png(0, b"<html>rate limited</html>"),
            Err(StoryError::Resource { .. })
        ));
    }

    #[test]
    fn existing_frames_stop_at_the_first_gap() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::prepare(root.path()).unwrap();
        for name in ["0.png", "1.png", "3.png"] {
            fs::write(root.path().join(name), b"x").unwrap();
        }

        assert_eq!(ws.existing_frames(), vec![ws.frame_path(0), ws.frame_path(1)]);
    }

    #[test]
    fn converts_only_jpegs() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::prepare(root.path()).unwrap();
        fs::write(root.path().join("0.jpg"), jpeg_bytes()).unwrap();
        fs::write(root.path().join("1.JPEG"), jpeg_bytes()).unwrap();
        fs::write(root.path().join("notes.txt"), b"keep me").unwrap();

        let converted = ws.convert_images().unwrap();

        assert_eq!(converted, vec![ws.frame_path(0), root.path().join("1.png")]);
        for path in &converted {
            assert_eq!(image::open(path).unwrap().color(), ColorType::Rgba8);
        }
        assert!(root.path().join("notes.txt").exists());
    }
}
