//! Strategy table mapping shape kinds to geometry functions.

use std::{collections::HashMap, sync::OnceLock};

use log::{debug, trace};
use thiserror::Error;

use super::{ShapeGeometry, ShapeKind, ShapeStyle, catalog};
use crate::geometry::Size;

/// A geometry-producing function. Receives a sanitized, positive size.
pub type GeometryFn = fn(Size, &ShapeStyle) -> ShapeGeometry;

static STANDARD: OnceLock<ShapeRegistry> = OnceLock::new();

/// Errors raised while building a [`ShapeRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no geometry registered for shape kind `{0}`")]
    MissingKind(ShapeKind),

    #[error("no fallback geometry registered")]
    MissingFallback,
}

/// A validated lookup table from [`ShapeKind`] to [`GeometryFn`].
///
/// A registry always covers every kind and carries a fallback entry for tags
/// that resolve to no kind; [`ShapeRegistryBuilder::build`] refuses to produce
/// one otherwise.
#[derive(Debug)]
pub struct ShapeRegistry {
    entries: HashMap<ShapeKind, GeometryFn>,
    fallback: GeometryFn,
}

impl ShapeRegistry {
    /// Starts an empty registry
    pub fn builder() -> ShapeRegistryBuilder {
        ShapeRegistryBuilder::default()
    }

    /// The built-in table shared by [`render_shape`](super::render_shape)
    pub fn standard() -> &'static ShapeRegistry {
        STANDARD.get_or_init(|| {
            Self::standard_builder()
                .build()
                .expect("the built-in shape catalog covers every kind")
        })
    }

    /// A builder pre-populated with the built-in catalog, for callers that
    /// want to override individual kinds.
    pub fn standard_builder() -> ShapeRegistryBuilder {
        Self::builder()
            .register(ShapeKind::Rectangle, catalog::rectangle)
            .register(ShapeKind::Circle, catalog::circle)
            .register(ShapeKind::Diamond, catalog::diamond)
            .register(ShapeKind::Triangle, catalog::triangle)
            .register(ShapeKind::Hexagon, catalog::hexagon)
            .register(ShapeKind::Star, catalog::star)
            .register(ShapeKind::Pentagon, catalog::pentagon)
            .register(ShapeKind::Parallelogram, catalog::parallelogram)
            .register(ShapeKind::Database, catalog::database)
            .register(ShapeKind::Cloud, catalog::cloud)
            .register(ShapeKind::Document, catalog::document)
            .register(ShapeKind::Terminator, catalog::terminator)
            .register(ShapeKind::Heart, catalog::heart)
            .register(ShapeKind::ArrowUp, catalog::arrow_up)
            .register(ShapeKind::ArrowDown, catalog::arrow_down)
            .register(ShapeKind::ArrowLeft, catalog::arrow_left)
            .register(ShapeKind::ArrowRight, catalog::arrow_right)
            .register(ShapeKind::Text, catalog::text)
            .register(ShapeKind::Image, catalog::image)
            .register(ShapeKind::MindmapNode, catalog::mindmap_node)
            .fallback(catalog::rectangle)
    }

    /// Renders a kind at the given size.
    pub fn render(&self, kind: ShapeKind, size: Size, style: &ShapeStyle) -> ShapeGeometry {
        let size = size.sanitized(kind.default_size());
        trace!(kind:% = kind, width = size.width(), height = size.height(); "Rendering shape");
        let geometry_fn = self.entries.get(&kind).copied().unwrap_or(self.fallback);
        geometry_fn(size, style)
    }

    /// Renders a free-form tag; tags naming no kind use the fallback entry.
    pub fn render_tag(&self, tag: &str, size: Size, style: &ShapeStyle) -> ShapeGeometry {
        match ShapeKind::parse(tag) {
            Some(kind) => self.render(kind, size, style),
            None => {
                debug!(tag; "Unknown shape tag, using fallback geometry");
                let size = size.sanitized(ShapeKind::default().default_size());
                (self.fallback)(size, style)
            }
        }
    }
}

/// Collects geometry functions before validation.
#[derive(Debug, Default)]
pub struct ShapeRegistryBuilder {
    entries: HashMap<ShapeKind, GeometryFn>,
    fallback: Option<GeometryFn>,
}

impl ShapeRegistryBuilder {
    /// Registers (or replaces) the geometry for `kind`
    pub fn register(mut self, kind: ShapeKind, geometry: GeometryFn) -> Self {
        self.entries.insert(kind, geometry);
        self
    }

    /// Sets the geometry used for unrecognized tags
    pub fn fallback(mut self, geometry: GeometryFn) -> Self {
        self.fallback = Some(geometry);
        self
    }

    /// Validates coverage of every [`ShapeKind`] and the fallback entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingKind`] for the first uncovered kind, or
    /// [`RegistryError::MissingFallback`] when no fallback was set.
    pub fn build(self) -> Result<ShapeRegistry, RegistryError> {
        if let Some(kind) = ShapeKind::ALL
            .into_iter()
            .find(|kind| !self.entries.contains_key(kind))
        {
            return Err(RegistryError::MissingKind(kind));
        }
        let fallback = self.fallback.ok_or(RegistryError::MissingFallback)?;
        Ok(ShapeRegistry {
            entries: self.entries,
            fallback,
        })
    }
}
