use foundation::math::{LatLon, Vec3, central_angle, lat_lon_to_cartesian};
use scene::PerspectiveCamera;
use scene::components::Orientation;

/// World position of a surface coordinate on a rotated globe.
pub fn globe_position(at: LatLon, radius: f64, altitude: f64, orientation: &Orientation) -> Vec3 {
    lat_lon_to_cartesian(at, radius, altitude)
        .rotate_yaw_pitch(orientation.yaw_rad, orientation.pitch_rad)
}

/// Project a world position to surface pixels (origin top-left).
///
/// Returns `None` for positions at or behind the camera plane.
pub fn project(world: Vec3, camera: &PerspectiveCamera, width_px: f64, height_px: f64) -> Option<[f64; 2]> {
    let depth = camera.position.z - world.z;
    if depth <= camera.near {
        return None;
    }
    let focal = camera.focal_px(height_px);
    let x = 0.5 * width_px + world.x * focal / depth;
    let y = 0.5 * height_px - world.y * focal / depth;
    Some([x, y])
}

/// Whether a point on a sphere centered at the origin faces the camera.
pub fn faces_camera(world: Vec3, camera: &PerspectiveCamera) -> bool {
    world.dot(camera.position - world) > 0.0
}

/// Apparent radius of a sphere at the origin, in pixels.
pub fn projected_radius(radius: f64, camera: &PerspectiveCamera, height_px: f64) -> f64 {
    let d = camera.distance();
    if d <= radius {
        return height_px;
    }
    // Tangent-cone half angle gives the silhouette edge.
    let half = (radius / d).asin();
    camera.focal_px(height_px) * half.tan()
}

/// Sample a great-circle arc lifted into a parabola-like bow.
///
/// Apex altitude (fraction of radius) is half the central angle times
/// `altitude_scale`, so longer hops rise higher.
pub fn arc_path(start: LatLon, end: LatLon, radius: f64, altitude_scale: f64, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    let a = lat_lon_to_cartesian(start, 1.0, 0.0);
    let b = lat_lon_to_cartesian(end, 1.0, 0.0);
    let omega = central_angle(start, end);
    let apex = 0.5 * omega * altitude_scale;

    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let dir = if omega < 1e-9 {
                a
            } else {
                let sin_omega = omega.sin();
                if sin_omega.abs() < 1e-9 {
                    // Antipodal: fall back to linear blend, then normalize.
                    (a.scale(1.0 - t) + b.scale(t)).normalize()
                } else {
                    a.scale(((1.0 - t) * omega).sin() / sin_omega) + b.scale((t * omega).sin() / sin_omega)
                }
            };
            let lift = 1.0 + apex * (std::f64::consts::PI * t).sin();
            dir.normalize().scale(radius * lift)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{arc_path, faces_camera, globe_position, project, projected_radius};
    use foundation::math::{LatLon, Vec3};
    use scene::PerspectiveCamera;
    use scene::components::Orientation;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(90.0, 1.0, 1.0, 1000.0).at_distance(300.0)
    }

    #[test]
    fn origin_projects_to_center() {
        let p = project(Vec3::ZERO, &camera(), 800.0, 600.0).unwrap();
        assert_eq!(p, [400.0, 300.0]);
    }

    #[test]
    fn up_is_toward_top_of_surface() {
        let p = project(Vec3::new(0.0, 50.0, 0.0), &camera(), 800.0, 600.0).unwrap();
        assert!(p[1] < 300.0);
    }

    #[test]
    fn behind_camera_is_not_projected() {
        assert!(project(Vec3::new(0.0, 0.0, 400.0), &camera(), 800.0, 600.0).is_none());
    }

    #[test]
    fn far_hemisphere_is_hidden() {
        let cam = camera();
        assert!(faces_camera(Vec3::new(0.0, 0.0, 100.0), &cam));
        assert!(!faces_camera(Vec3::new(0.0, 0.0, -100.0), &cam));
    }

    #[test]
    fn yaw_moves_points_around_the_globe() {
        let at = LatLon::new(0.0, 0.0);
        let still = globe_position(at, 100.0, 0.0, &Orientation::identity());
        let mut o = Orientation::identity();
        o.rotate(std::f64::consts::PI, 0.0);
        let turned = globe_position(at, 100.0, 0.0, &o);
        assert!((still.z - 100.0).abs() < 1e-9);
        assert!((turned.z + 100.0).abs() < 1e-9);
    }

    #[test]
    fn arc_endpoints_sit_on_surface_and_bow_outward() {
        let path = arc_path(LatLon::new(0.0, 0.0), LatLon::new(0.0, 90.0), 100.0, 0.5, 16);
        assert_eq!(path.len(), 17);
        assert!((path[0].length() - 100.0).abs() < 1e-9);
        assert!((path[16].length() - 100.0).abs() < 1e-9);
        assert!(path[8].length() > 100.0);
    }

    #[test]
    fn silhouette_is_smaller_when_farther() {
        let near = projected_radius(100.0, &camera(), 600.0);
        let far = projected_radius(100.0, &camera().at_distance(600.0), 600.0);
        assert!(far < near);
    }
}
