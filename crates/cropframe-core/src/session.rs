//! A crop session: one loaded image, one controller, one result.
//!
//! The session is what a host dialog holds while it is open. Confirming
//! exports and delivers the result through [`CropHandler::on_crop_complete`];
//! a failed export leaves the session open so the user can retry. Cancelling
//! consumes the session.

use image::RgbaImage;

use crate::config::CropConfig;
use crate::decode::{load_image, SourceImage};
use crate::encode::encode_png;
use crate::error::CropError;
use crate::export::export_crop;
use crate::geometry::{AspectRatio, Size};
use crate::interaction::CropController;
use crate::render::{preview_transform, PreviewTransform};

/// The finished crop delivered to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedImage {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded RGBA bytes.
    pub png: Vec<u8>,
}

/// Host callbacks for the end of a session.
pub trait CropHandler {
    fn on_crop_complete(&mut self, image: CroppedImage);

    fn on_cancel(&mut self) {}
}

/// State of an open crop dialog.
#[derive(Debug, Clone)]
pub struct CropSession {
    source: SourceImage,
    controller: CropController,
}

impl CropSession {
    /// Start a session for an already-loaded image.
    pub fn new(
        source: SourceImage,
        container: Size,
        aspect: AspectRatio,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        let controller = CropController::new(source.size(), container, aspect, config)?;
        tracing::debug!(
            width = source.size().width(),
            height = source.size().height(),
            aspect = aspect.value(),
            "crop session opened"
        );
        Ok(Self { source, controller })
    }

    /// Decode `bytes` and start a session for the result.
    ///
    /// # Errors
    ///
    /// Propagates `CropError::ImageLoadFailed` before any layout runs.
    pub fn open(
        bytes: &[u8],
        container: Size,
        aspect: AspectRatio,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        let source = load_image(bytes)?;
        Self::new(source, container, aspect, config)
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn controller(&self) -> &CropController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CropController {
        &mut self.controller
    }

    pub fn preview(&self) -> PreviewTransform {
        preview_transform(self.controller.layout(), self.controller.viewport())
    }

    /// Rasterize the current framing.
    pub fn export(&self) -> Result<RgbaImage, CropError> {
        export_crop(
            &self.source,
            self.controller.viewport(),
            self.controller.layout(),
            self.controller.config(),
        )
    }

    /// Export, encode and hand the result to `handler`.
    ///
    /// On error nothing is delivered and the session remains usable.
    pub fn confirm<H: CropHandler>(&self, handler: &mut H) -> Result<(), CropError> {
        let raster = self.export().inspect_err(|e| {
            tracing::warn!(error = %e, "crop export failed");
        })?;
        let png = encode_png(&raster)?;
        let (width, height) = raster.dimensions();
        handler.on_crop_complete(CroppedImage { width, height, png });
        Ok(())
    }

    /// Close the session without producing output.
    pub fn cancel<H: CropHandler>(self, handler: &mut H) {
        tracing::debug!("crop session cancelled");
        handler.on_cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::interaction::InputEvent;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    #[derive(Default)]
    struct Recorder {
        completed: Vec<CroppedImage>,
        cancelled: usize,
    }

    impl CropHandler for Recorder {
        fn on_crop_complete(&mut self, image: CroppedImage) {
            self.completed.push(image);
        }

        fn on_cancel(&mut self) {
            self.cancelled += 1;
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_fn(80, 60, |x, _| {
            if x < 40 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn session() -> CropSession {
        CropSession::open(
            &png_bytes(),
            Size::new(78.0, 78.0),
            AspectRatio::SQUARE,
            CropConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_open_rejects_bad_bytes() {
        let err = CropSession::open(
            b"not an image",
            Size::new(100.0, 100.0),
            AspectRatio::SQUARE,
            CropConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CropError::ImageLoadFailed(_)));
    }

    #[test]
    fn test_confirm_delivers_png_once() {
        let session = session();
        let mut recorder = Recorder::default();
        session.confirm(&mut recorder).unwrap();

        assert_eq!(recorder.completed.len(), 1);
        let done = &recorder.completed[0];
        assert_eq!((done.width, done.height), (30, 30));
        let decoded = image::load_from_memory(&done.png).unwrap().into_rgba8();
        assert_eq!(decoded.as_raw(), session.export().unwrap().as_raw());
    }

    #[test]
    fn test_failed_export_keeps_session_open() {
        let mut config = CropConfig::default();
        config.max_surface_dimension = 8;
        let mut session = CropSession::open(
            &png_bytes(),
            Size::new(78.0, 78.0),
            AspectRatio::SQUARE,
            config,
        )
        .unwrap();
        let mut recorder = Recorder::default();

        let err = session.confirm(&mut recorder).unwrap_err();
        assert!(matches!(err, CropError::RenderSurfaceUnavailable(_)));
        assert!(recorder.completed.is_empty());

        // Shrinking the container yields a surface that fits.
        session
            .controller_mut()
            .handle(InputEvent::ContainerResized(Size::new(54.0, 54.0)));
        session.confirm(&mut recorder).unwrap();
        assert_eq!(recorder.completed.len(), 1);
        assert_eq!(recorder.completed[0].width, 6);
    }

    #[test]
    fn test_preview_tracks_controller() {
        let mut session = session();
        session.controller_mut().pointer_down(Point::ORIGIN);
        session.controller_mut().pointer_move(Point::new(3.0, 0.0));
        let preview = session.preview();
        assert!((preview.image_rect.left - -2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cancel_notifies_handler() {
        let mut recorder = Recorder::default();
        session().cancel(&mut recorder);
        assert_eq!(recorder.cancelled, 1);
        assert!(recorder.completed.is_empty());
    }
}
