// Host-side tests for GLB decoding against hand-built binaries.

#![allow(dead_code)]
mod mesh {
    include!("../src/mesh.rs");
}

use glam::Vec3;
use mesh::*;

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

fn triangle_bin() -> Vec<u8> {
    triangle_bin_with_indices([0, 1, 2])
}

fn triangle_bin_with_indices(indices: [u16; 3]) -> Vec<u8> {
    let mut bin = Vec::new();
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin
}

const TRIANGLE_PARTS: &str = r#"
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1, "material": 0}]}],
  "materials": [{"pbrMetallicRoughness": {"baseColorFactor": [0.5, 0.25, 1.0, 1.0]}}],
  "buffers": [{"byteLength": 44}],
  "bufferViews": [
    {"buffer": 0, "byteOffset": 0, "byteLength": 36},
    {"buffer": 0, "byteOffset": 36, "byteLength": 6}
  ],
  "accessors": [
    {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
     "min": [0, 0, 0], "max": [1, 1, 0]},
    {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
  ]"#;

fn triangle_glb(nodes: &str) -> Vec<u8> {
    let json = format!(
        r#"{{"asset": {{"version": "2.0"}}, "scene": 0, "scenes": [{{"nodes": [0]}}],
  "nodes": {nodes}, {TRIANGLE_PARTS}}}"#
    );
    glb(&json, &triangle_bin())
}

#[test]
fn bakes_node_hierarchy_into_vertices() {
    let bytes = triangle_glb(
        r#"[{"children": [1], "translation": [1, 2, 3]}, {"mesh": 0, "scale": [2, 2, 2]}]"#,
    );
    let mesh = load_glb(&bytes, "tri.glb").expect("parse");
    assert_eq!(mesh.vertices.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.bounds.min, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(mesh.bounds.max, Vec3::new(3.0, 4.0, 3.0));
    assert_eq!(mesh.vertices[1].position, [3.0, 2.0, 3.0]);
}

#[test]
fn missing_normals_default_up_and_color_comes_from_material() {
    let bytes = triangle_glb(r#"[{"mesh": 0}]"#);
    let mesh = load_glb(&bytes, "tri.glb").expect("parse");
    for v in &mesh.vertices {
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        assert_eq!(v.color, [0.5, 0.25, 1.0]);
    }
}

#[test]
fn mesh_instanced_twice_is_emitted_twice() {
    let bytes = triangle_glb(
        r#"[{"children": [1, 2]}, {"mesh": 0}, {"mesh": 0, "translation": [0, 0, -4]}]"#,
    );
    let mesh = load_glb(&bytes, "tri.glb").expect("parse");
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.bounds.min.z, -4.0);
    assert_eq!(mesh.bounds.max.z, 0.0);
    // Each copy indexes its own vertices.
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    assert_eq!(mesh.indices.iter().filter(|&&i| i >= 3).count(), 3);
}

#[test]
fn scene_without_meshes_is_rejected() {
    let bytes = triangle_glb(r#"[{"translation": [0, 0, 0]}]"#);
    let err = load_glb(&bytes, "empty.glb").expect_err("no triangles");
    assert!(format!("{err:#}").contains("no triangles"));
}

#[test]
fn garbage_is_rejected() {
    assert!(load_glb(b"definitely not a glb", "junk.glb").is_err());
}

#[test]
fn out_of_range_index_is_rejected() {
    let json = format!(
        r#"{{"asset": {{"version": "2.0"}}, "scene": 0, "scenes": [{{"nodes": [0]}}],
  "nodes": [{{"mesh": 0}}], {TRIANGLE_PARTS}}}"#
    );
    let bytes = glb(&json, &triangle_bin_with_indices([0, 1, 7]));
    let err = load_glb(&bytes, "bad.glb").expect_err("index past the vertex list");
    assert!(format!("{err:#}").contains("out of range"));
}
