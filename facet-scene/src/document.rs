//! Constructors for the glTF objects a packed scene is made of.

use crate::blob::BlobRange;
use facet_data::Rgba;
use glam::Vec3;
use gltf::json;
use gltf::json::validation::{Checked::Valid, USize64};
use std::collections::BTreeMap;

/// Extension name for flat-shaded materials.
pub const KHR_MATERIALS_UNLIT: &str = "KHR_materials_unlit";

/// Asset header naming this crate as the generator.
pub fn asset() -> json::Asset {
    json::Asset {
        generator: Some(concat!("facet ", env!("CARGO_PKG_VERSION")).to_string()),
        ..Default::default()
    }
}

/// Tightly packed vertex-attribute view into buffer 0.
pub fn attribute_view(range: BlobRange) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64::from(range.length),
        byte_offset: Some(USize64::from(range.offset)),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        target: Some(Valid(json::buffer::Target::ArrayBuffer)),
    }
}

/// `VEC3` float accessor over a whole view. Positions carry `bounds`.
pub fn vec3_accessor(
    view: json::Index<json::buffer::View>,
    count: usize,
    bounds: Option<(Vec3, Vec3)>,
) -> json::Accessor {
    let (min, max) = match bounds {
        Some((min, max)) => (
            Some(json::Value::from(min.to_array().to_vec())),
            Some(json::Value::from(max.to_array().to_vec())),
        ),
        None => (None, None),
    };
    json::Accessor {
        buffer_view: Some(view),
        byte_offset: None,
        count: USize64::from(count),
        component_type: Valid(json::accessor::GenericComponentType(
            json::accessor::ComponentType::F32,
        )),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(json::accessor::Type::Vec3),
        min,
        max,
        name: None,
        normalized: false,
        sparse: None,
    }
}

/// Non-indexed triangle list with positions and normals.
pub fn triangle_primitive(
    positions: json::Index<json::Accessor>,
    normals: json::Index<json::Accessor>,
    material: json::Index<json::Material>,
) -> json::mesh::Primitive {
    let mut attributes = BTreeMap::new();
    attributes.insert(Valid(json::mesh::Semantic::Positions), positions);
    attributes.insert(Valid(json::mesh::Semantic::Normals), normals);
    json::mesh::Primitive {
        attributes,
        extensions: Default::default(),
        extras: Default::default(),
        indices: None,
        material: Some(material),
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    }
}

/// Material `color{index}` with `colour` as its base colour factor.
pub fn colour_material(index: usize, colour: Rgba, unlit: bool) -> json::Material {
    json::Material {
        name: Some(format!("color{}", index)),
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor(colour.to_array()),
            ..Default::default()
        },
        extensions: unlit.then(|| json::extensions::material::Material {
            unlit: Some(json::extensions::material::Unlit {}),
            ..Default::default()
        }),
        ..Default::default()
    }
}
