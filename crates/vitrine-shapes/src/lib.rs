use serde::Serialize;
use thiserror::Error;
use vitrine_base::AccentColor;
use vitrine_catalog::{Catalog, ProductCategory, ProductDescriptor};
use vitrine_geometry::{Transform, Vec3};

mod builders;
mod primitive;

pub use builders::{ShapeBuilderFn, shape_builder};
pub use primitive::Primitive;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("product index {index} out of range (catalog has {len} products)")]
    ProductOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Lit, with specular highlights.
    Phong,
    /// Unlit flat color.
    Basic,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: AccentColor,
    pub shininess: f64,
}

impl Material {
    pub const fn phong(color: AccentColor, shininess: f64) -> Self {
        Self {
            kind: MaterialKind::Phong,
            color,
            shininess,
        }
    }

    pub const fn basic(color: AccentColor) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            shininess: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Part {
    pub name: String,
    pub primitive: Primitive,
    pub transform: Transform,
    pub material: Material,
}

impl Part {
    pub fn new(
        name: impl Into<String>,
        primitive: Primitive,
        transform: Transform,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            primitive,
            transform,
            material,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: AccentColor,
}

/// Composite, engine-neutral description of one product renderable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeDescription {
    pub category: ProductCategory,
    pub parts: Vec<Part>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl ShapeDescription {
    pub fn for_product(product: &ProductDescriptor) -> Result<Self> {
        let build = shape_builder(product.category);
        Ok(Self {
            category: product.category,
            parts: build(product.accent_color)?,
            cast_shadow: true,
            receive_shadow: true,
        })
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Line segments of every part in group space.
    pub fn wireframe(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        for part in &self.parts {
            let color = part.material.color;
            for [a, b] in part.primitive.edges() {
                segments.push(Segment {
                    start: part.transform.apply(a),
                    end: part.transform.apply(b),
                    color,
                });
            }
        }
        segments
    }
}

pub fn build_renderable(catalog: &Catalog, index: usize) -> Result<ShapeDescription> {
    let product = catalog.get(index).ok_or(Error::ProductOutOfRange {
        index,
        len: catalog.len(),
    })?;
    ShapeDescription::for_product(product)
}
