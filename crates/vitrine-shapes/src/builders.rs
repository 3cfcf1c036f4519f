use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};
use vitrine_base::AccentColor;
use vitrine_catalog::ProductCategory;
use vitrine_geometry::{Rotation, Transform, Vec3};

use crate::{Material, Part, Primitive, Result};

pub type ShapeBuilderFn = fn(AccentColor) -> Result<Vec<Part>>;

const CUP_COLOR: AccentColor = AccentColor::from_hex(0x1f2937);
const STRAP_COLOR: AccentColor = AccentColor::from_hex(0x374151);

pub fn shape_builder(category: ProductCategory) -> ShapeBuilderFn {
    match category {
        ProductCategory::Headphones => headphones,
        ProductCategory::Phone => phone,
        ProductCategory::Watch => watch,
        ProductCategory::Laptop => laptop,
    }
}

fn headphones(accent: AccentColor) -> Result<Vec<Part>> {
    let cup = Primitive::cylinder(0.4, 0.2, 16)?;
    let cup_material = Material::phong(CUP_COLOR, 50.0);
    let cup_rotation = Rotation::about_z(FRAC_PI_2);
    Ok(vec![
        Part::new(
            "headband",
            Primitive::torus(1.2, 0.1, 8, 16, PI)?,
            Transform::from_rotation(Rotation::about_x(PI)),
            Material::phong(accent, 100.0),
        ),
        Part::new(
            "left_cup",
            cup,
            Transform::new(Vec3::new(-1.0, 0.0, 0.0), cup_rotation),
            cup_material,
        ),
        Part::new(
            "right_cup",
            cup,
            Transform::new(Vec3::new(1.0, 0.0, 0.0), cup_rotation),
            cup_material,
        ),
    ])
}

fn phone(accent: AccentColor) -> Result<Vec<Part>> {
    Ok(vec![
        Part::new(
            "body",
            Primitive::cuboid(1.0, 2.0, 0.2)?,
            Transform::IDENTITY,
            Material::phong(accent, 100.0),
        ),
        Part::new(
            "screen",
            Primitive::plane(0.9, 1.8)?,
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.11)),
            Material::basic(AccentColor::BLACK),
        ),
    ])
}

fn watch(accent: AccentColor) -> Result<Vec<Part>> {
    Ok(vec![
        Part::new(
            "case",
            Primitive::cylinder(0.6, 0.3, 8)?,
            Transform::IDENTITY,
            Material::phong(accent, 100.0),
        ),
        Part::new(
            "band",
            Primitive::torus(0.8, 0.1, 4, 16, std::f64::consts::TAU)?,
            Transform::from_rotation(Rotation::about_x(FRAC_PI_2)),
            Material::phong(STRAP_COLOR, 30.0),
        ),
    ])
}

fn laptop(accent: AccentColor) -> Result<Vec<Part>> {
    let material = Material::phong(accent, 100.0);
    Ok(vec![
        Part::new(
            "base",
            Primitive::cuboid(2.5, 0.1, 1.8)?,
            Transform::IDENTITY,
            material,
        ),
        Part::new(
            "lid",
            Primitive::cuboid(2.4, 0.1, 1.5)?,
            Transform::new(Vec3::new(0.0, 0.75, -0.75), Rotation::about_x(-FRAC_PI_6)),
            material,
        ),
    ])
}
