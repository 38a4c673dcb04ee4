//! Interactive keying session
//!
//! Holds the current target color and tolerance on behalf of a front end
//! (a picker, a slider) and re-renders after every change. Each render
//! starts from the untouched source image, so loosening and then tightening
//! the tolerance restores pixels made transparent in between.

use std::path::Path;

use tracing::{debug, info};

use crate::image_pipeline::color_key::{ColorKeyParams, ColorKeyer, SerialKeyer, TargetColor};
use crate::image_pipeline::common::error::{KeyingError, Result};
use crate::image_pipeline::raster::{RasterImage, RasterReader};

/// A discrete edit coming from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterChange {
    Target(TargetColor),
    Tolerance(u8),
    /// Back to the parameters the session was opened with
    Reset,
}

pub struct KeyingSession {
    source: RasterImage,
    initial: ColorKeyParams,
    params: ColorKeyParams,
    keyer: Box<dyn ColorKeyer + Send + Sync>,
    rendered: RasterImage,
}

impl KeyingSession {
    pub fn new(source: RasterImage, params: ColorKeyParams) -> Self {
        Self::with_keyer(source, params, Box::new(SerialKeyer))
    }

    pub fn with_keyer(
        source: RasterImage,
        params: ColorKeyParams,
        keyer: Box<dyn ColorKeyer + Send + Sync>,
    ) -> Self {
        let rendered = keyer.key(&source, &params);
        Self {
            source,
            initial: params,
            params,
            keyer,
            rendered,
        }
    }

    /// Opens the file the user picked. `None` means the picker was dismissed.
    pub fn open<R: RasterReader>(
        selection: Option<&Path>,
        reader: &R,
        params: ColorKeyParams,
    ) -> Result<Self> {
        let path = selection.ok_or(KeyingError::UserCancelled)?;
        let bytes = std::fs::read(path)
            .map_err(|e| KeyingError::ImageLoadError(format!("{}: {}", path.display(), e)))?;
        let source = reader.read_raster(&bytes)?;

        info!(
            path = %path.display(),
            width = source.width,
            height = source.height,
            "Opened keying session"
        );
        Ok(Self::new(source, params))
    }

    /// Applies one change and returns the fresh rendering.
    pub fn apply(&mut self, change: ParameterChange) -> &RasterImage {
        let next = match change {
            ParameterChange::Target(target) => ColorKeyParams { target, ..self.params },
            ParameterChange::Tolerance(tolerance) => ColorKeyParams { tolerance, ..self.params },
            ParameterChange::Reset => self.initial,
        };

        if next != self.params {
            debug!(
                "Re-keying on {} (tolerance {})",
                next.target, next.tolerance
            );
            self.params = next;
            self.rendered = self.keyer.key(&self.source, &self.params);
        }
        &self.rendered
    }

    pub fn rendered(&self) -> &RasterImage {
        &self.rendered
    }

    pub fn source(&self) -> &RasterImage {
        &self.source
    }

    pub fn params(&self) -> ColorKeyParams {
        self.params
    }
}
