// GLB decoding into a single baked triangle list.

use anyhow::{bail, Context};
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use viewer_core::normalize::Aabb;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Flattens every mesh reachable from the default scene, with node
/// transforms applied, into model-space vertices.
pub fn load_glb(bytes: &[u8], name: &str) -> anyhow::Result<MeshData> {
    let gltf = gltf::Gltf::from_slice(bytes).with_context(|| format!("parsing {name}"))?;
    let blob = gltf.blob.as_deref();
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .with_context(|| format!("{name} has no scene"))?;

    let mut out = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        bounds: Aabb::empty(),
    };
    let mut stack: Vec<(gltf::Node, Mat4)> =
        scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
    while let Some((node, parent)) = stack.pop() {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            append_mesh(&mut out, &mesh, world, blob, name)?;
        }
        stack.extend(node.children().map(|c| (c, world)));
    }
    if out.indices.is_empty() {
        bail!("{name} contains no triangles");
    }
    Ok(out)
}

fn append_mesh(
    out: &mut MeshData,
    mesh: &gltf::Mesh,
    world: Mat4,
    blob: Option<&[u8]>,
    name: &str,
) -> anyhow::Result<()> {
    let normal_mat = Mat3::from_mat4(world).inverse().transpose();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("[load] {name}: skipping non-triangle primitive");
            continue;
        }
        let reader = primitive.reader(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => blob,
            gltf::buffer::Source::Uri(_) => None,
        });
        let Some(positions) = reader.read_positions() else {
            log::warn!("[load] {name}: primitive without POSITION");
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| world.transform_point3(Vec3::from_array(p)))
            .collect();
        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(n) => n
                .map(|n| (normal_mat * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => vec![Vec3::Y; positions.len()],
        };
        if normals.len() != positions.len() {
            bail!(
                "{name}: {} normals but {} positions",
                normals.len(),
                positions.len()
            );
        }
        let base = primitive.material().pbr_metallic_roughness().base_color_factor();
        let color = [base[0], base[1], base[2]];

        let start = out.vertices.len() as u32;
        for (p, n) in positions.iter().zip(&normals) {
            out.bounds.include(*p);
            out.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                color,
            });
        }
        let count = positions.len() as u32;
        match reader.read_indices() {
            Some(idx) => {
                for i in idx.into_u32() {
                    if i >= count {
                        bail!("{name}: index {i} out of range for {count} vertices");
                    }
                    out.indices.push(start + i);
                }
            }
            None => out.indices.extend(start..start + count),
        }
    }
    Ok(())
}
