use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective { fov_y_radians: f32 },
    /// Axis-aligned box of `width` x `height` world units centred on the view axis.
    Orthographic { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraType {
    Perspective,
    Orthographic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn perspective(eye: Vec3, target: Vec3, fov_y_radians: f32) -> Self {
        Self {
            eye,
            target,
            projection: Projection::Perspective { fov_y_radians },
            ..Self::default()
        }
    }

    /// Camera that maps a `width` x `height` quad at the origin onto the
    /// whole viewport. Used by every synthesized full-screen pass.
    pub fn full_screen(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Orthographic {
                width: width as f32,
                height: height as f32,
            },
            near: 0.0,
            far: 2.0,
        }
    }

    pub fn camera_type(&self) -> CameraType {
        match self.projection {
            Projection::Perspective { .. } => CameraType::Perspective,
            Projection::Orthographic { .. } => CameraType::Orthographic,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn proj(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y_radians } => {
                Mat4::perspective_rh(fov_y_radians, aspect, self.near, self.far)
            }
            Projection::Orthographic { width, height } => {
                let half_w = width * 0.5;
                let half_h = height * 0.5;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.proj(aspect) * self.view()
    }

    /// False for cameras that would produce a singular view or projection.
    pub fn is_valid(&self) -> bool {
        let forward = self.target - self.eye;
        let finite = self.eye.is_finite() && self.target.is_finite() && self.up.is_finite();
        let projection_ok = match self.projection {
            Projection::Perspective { fov_y_radians } => {
                fov_y_radians > 0.0 && fov_y_radians < std::f32::consts::PI && self.near > 0.0
            }
            Projection::Orthographic { width, height } => width > 0.0 && height > 0.0,
        };
        finite
            && projection_ok
            && self.far > self.near
            && forward.length_squared() > f32::EPSILON
            && forward.cross(self.up).length_squared() > f32::EPSILON
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::Perspective {
                fov_y_radians: 60f32.to_radians(),
            },
            near: 0.1,
            far: 100.0,
        }
    }
}
