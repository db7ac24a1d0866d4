//! Scene setup shared by the live viewer and the snapshot renderer
//!
//! Points are drawn as one instanced sphere mesh lit by an ambient and a
//! directional light. The camera sits on the Z axis looking at the origin.

use three_d::*;

use crate::camera::CameraState;

/// Sphere radius of a single point marker
const POINT_RADIUS: f32 = 0.025;
const SPHERE_SUBDIVISIONS: u32 = 16;
const POINT_COLOR: [u8; 3] = [0x00, 0x77, 0xff];

/// Light arriving from (5, 5, 10) towards the origin
const LIGHT_DIRECTION: [f32; 3] = [-5.0, -5.0, -10.0];

pub type PointMesh = Gm<InstancedMesh, PhysicalMaterial>;

pub struct Lights {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Lights {
    pub fn new(context: &Context) -> Self {
        Self {
            ambient: AmbientLight::new(context, 0.6, Srgba::WHITE),
            directional: DirectionalLight::new(
                context,
                0.8,
                Srgba::WHITE,
                vec3(LIGHT_DIRECTION[0], LIGHT_DIRECTION[1], LIGHT_DIRECTION[2]),
            ),
        }
    }

    pub fn as_slice(&self) -> [&dyn Light; 2] {
        [&self.ambient, &self.directional]
    }
}

/// One translation + uniform scale per committed point
pub fn point_instances(positions: &[[f32; 3]]) -> Instances {
    Instances {
        transformations: positions
            .iter()
            .map(|p| Mat4::from_translation(vec3(p[0], p[1], p[2])) * Mat4::from_scale(POINT_RADIUS))
            .collect(),
        ..Default::default()
    }
}

/// Build the instanced sphere mesh for the given points
pub fn point_mesh(context: &Context, positions: &[[f32; 3]]) -> PointMesh {
    let material = PhysicalMaterial::new_opaque(
        context,
        &CpuMaterial {
            albedo: Srgba::new_opaque(POINT_COLOR[0], POINT_COLOR[1], POINT_COLOR[2]),
            roughness: 0.4,
            metallic: 0.3,
            ..Default::default()
        },
    );

    Gm::new(
        InstancedMesh::new(
            context,
            &point_instances(positions),
            &CpuMesh::sphere(SPHERE_SUBDIVISIONS),
        ),
        material,
    )
}

pub fn new_camera(viewport: Viewport, state: &CameraState) -> Camera {
    Camera::new_perspective(
        viewport,
        vec3(0.0, 0.0, state.z),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
        degrees(state.fov_degrees),
        state.near,
        state.far,
    )
}

/// Copy controller output onto the render camera
pub fn apply_camera(camera: &mut Camera, state: &CameraState) {
    camera.set_view(
        vec3(0.0, 0.0, state.z),
        vec3(0.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    );
    camera.set_perspective_projection(degrees(state.fov_degrees), state.near, state.far);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_instances() {
        let instances = point_instances(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
        assert_eq!(instances.transformations.len(), 2);
        assert!(instances.colors.is_none());

        let t = instances.transformations[1];
        assert_eq!(t.w.truncate(), vec3(1.0, 2.0, 3.0));
        assert!((t.x.x - POINT_RADIUS).abs() < 1e-6);
    }
}
