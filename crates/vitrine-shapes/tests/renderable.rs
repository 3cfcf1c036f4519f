use vitrine_base::AccentColor;
use vitrine_catalog::{Catalog, ProductCategory};
use vitrine_shapes::{MaterialKind, Primitive, Result, ShapeDescription, build_renderable};

#[test]
fn same_index_builds_the_same_shape() -> Result<()> {
    let catalog = Catalog::builtin();
    let first = build_renderable(&catalog, 2)?;
    let second = build_renderable(&catalog, 2)?;
    assert_eq!(first, second);
    assert_eq!(first.category, ProductCategory::Watch);
    Ok(())
}

#[test]
fn primary_surfaces_use_the_accent_color() -> Result<()> {
    let catalog = Catalog::builtin();
    let expectations = [
        (0, "headband"),
        (1, "body"),
        (2, "case"),
        (3, "base"),
        (3, "lid"),
    ];
    for (index, part_name) in expectations {
        let product = catalog.get(index).ok_or(vitrine_shapes::Error::ProductOutOfRange {
            index,
            len: catalog.len(),
        })?;
        let shape = ShapeDescription::for_product(product)?;
        let part = shape.part(part_name);
        assert_eq!(
            part.map(|p| p.material.color),
            Some(product.accent_color),
            "{part_name}"
        );
    }
    Ok(())
}

#[test]
fn headphones_have_band_and_two_cups() -> Result<()> {
    let shape = build_renderable(&Catalog::builtin(), 0)?;
    assert_eq!(shape.parts.len(), 3);
    assert!(matches!(
        shape.part("headband").map(|p| p.primitive),
        Some(Primitive::Torus { .. })
    ));
    let left = shape.part("left_cup").map(|p| p.transform.translation.x);
    let right = shape.part("right_cup").map(|p| p.transform.translation.x);
    assert_eq!(left, Some(-1.0));
    assert_eq!(right, Some(1.0));
    Ok(())
}

#[test]
fn phone_screen_is_a_dark_unlit_inset() -> Result<()> {
    let shape = build_renderable(&Catalog::builtin(), 1)?;
    let screen = shape
        .part("screen")
        .ok_or(vitrine_shapes::Error::InvalidParameter("no screen".into()))?;
    assert_eq!(screen.material.kind, MaterialKind::Basic);
    assert_eq!(screen.material.color, AccentColor::BLACK);
    assert!(screen.transform.translation.z > 0.1);
    Ok(())
}

#[test]
fn laptop_lid_is_hinged_at_an_angle() -> Result<()> {
    let shape = build_renderable(&Catalog::builtin(), 3)?;
    let lid = shape
        .part("lid")
        .ok_or(vitrine_shapes::Error::InvalidParameter("no lid".into()))?;
    assert!(lid.transform.rotation.x < 0.0);
    assert!(shape.cast_shadow && shape.receive_shadow);
    Ok(())
}
