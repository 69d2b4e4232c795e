use crate::camera::Ray;
use crate::markers::MarkerInstance;
use glam::Vec3;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest marker hit by `ray`, with its distance along the ray.
pub fn pick_nearest<'a, I>(ray: &Ray, markers: I) -> Option<(&'a MarkerInstance, f32)>
where
    I: IntoIterator<Item = &'a MarkerInstance>,
{
    let mut best: Option<(&MarkerInstance, f32)> = None;
    for m in markers {
        if let Some(t) = ray_sphere(ray.origin, ray.dir, m.position, m.radius) {
            match best {
                Some((_, best_t)) if t >= best_t => {}
                _ => best = Some((m, t)),
            }
        }
    }
    best
}
