// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo file loading.
//!
//! This module decodes image files into RGBA previews and runs uploads on a
//! background thread. Each upload remembers the month and slot it was
//! requested for; its result is only ever applied there.

use crate::error::{EditorError, EditorResult};
use crate::models::month::ImageSource;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// File extensions offered by the photo picker.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff"];

/// Decode an image file into an RGBA buffer no larger than `max_dimension`
/// on its longest side.
pub fn load_image(path: &Path, max_dimension: u32) -> EditorResult<image::RgbaImage> {
    let decoded = image::open(path)
        .map_err(|e| EditorError::image_read(format!("{}: {}", path.display(), e)))?;

    let decoded = if decoded.width() > max_dimension || decoded.height() > max_dimension {
        decoded.resize(max_dimension, max_dimension, FilterType::Triangle)
    } else {
        decoded
    };
    Ok(decoded.to_rgba8())
}

/// Where an upload's result goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTarget {
    pub month: usize,
    pub slot: usize,
}

/// An image read in flight.
pub struct PendingUpload {
    pub target: UploadTarget,
    pub path: PathBuf,
    receiver: Receiver<EditorResult<ImageSource>>,
}

impl PendingUpload {
    /// Poll for completion without blocking.
    ///
    /// Returns `None` while the read is still running.
    pub fn poll(&self) -> Option<EditorResult<ImageSource>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(EditorError::image_read(format!(
                "{}: loader stopped before finishing",
                self.path.display()
            )))),
        }
    }
}

/// Start reading `path` on a background thread.
pub fn spawn_upload(path: PathBuf, target: UploadTarget, max_dimension: u32) -> PendingUpload {
    let (sender, receiver) = channel();
    let worker_path = path.clone();

    log::info!(
        "Loading {} into month {} slot {}",
        path.display(),
        target.month,
        target.slot
    );

    std::thread::spawn(move || {
        let result = load_image(&worker_path, max_dimension).map(|pixels| {
            let name = worker_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| worker_path.display().to_string());
            log::info!("Decoded {} ({}x{})", name, pixels.width(), pixels.height());
            ImageSource::new(name, pixels)
        });

        let _ = sender.send(result);
    });

    PendingUpload {
        target,
        path,
        receiver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("collage-studio-{}-{}", std::process::id(), name))
    }

    fn wait(upload: &PendingUpload) -> EditorResult<ImageSource> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = upload.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "upload did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn load_image_downscales_large_images() {
        let path = temp_path("large.png");
        image::RgbaImage::new(400, 200).save(&path).unwrap();

        let pixels = load_image(&path, 100).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(pixels.dimensions(), (100, 50));
    }

    #[test]
    fn load_image_reports_missing_files() {
        let err = load_image(Path::new("/definitely/not/here.png"), 100).unwrap_err();
        assert!(matches!(err, EditorError::ImageRead(_)));
    }

    #[test]
    fn upload_delivers_named_source_for_its_target() {
        let path = temp_path("upload.png");
        image::RgbaImage::new(3, 2).save(&path).unwrap();

        let target = UploadTarget { month: 4, slot: 2 };
        let upload = spawn_upload(path.clone(), target, 1600);
        let source = wait(&upload).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(upload.target, target);
        assert_eq!(source.size(), (3, 2));
        assert!(source.name().ends_with("upload.png"));
    }

    #[test]
    fn upload_failure_is_reported() {
        let upload = spawn_upload(temp_path("missing.png"), UploadTarget { month: 0, slot: 0 }, 1600);
        assert!(wait(&upload).is_err());
    }
}
