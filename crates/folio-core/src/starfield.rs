//! Layered particle starfield.
//!
//! Each layer is an immutable point cloud generated once at construction and
//! rotated as a whole every frame; differing spin rates between layers give
//! the parallax. The glow layer adds per-point size and intensity scalars
//! consumed by the shader's twinkle stage.

use glam::{EulerRot, Mat4, Vec2, Vec3};
use rand::prelude::*;
use thiserror::Error;

use crate::camera::CameraRig;
use crate::constants::{GLOW_SIZE_SCALE, MAX_LAYER_POINTS};

/// Static description of one particle layer. Configuration data.
#[derive(Clone, Debug)]
pub struct LayerSpec {
    pub name: &'static str,
    pub count: usize,
    pub radius: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    /// Billboard half-extent in world units.
    pub point_size: f32,
    /// Angular velocity around x/y, radians per second.
    pub spin: Vec2,
    /// Static roll applied before the animated rotation.
    pub tilt: f32,
}

/// The four plain star layers, back to front. The accent layer re-renders the
/// main layer's point set under its own material and never spins.
pub const STAR_LAYERS: [LayerSpec; 4] = [
    LayerSpec {
        name: "main",
        count: 3000,
        radius: 1.2,
        color: [1.0, 1.0, 1.0],
        opacity: 0.9,
        point_size: 0.002,
        spin: Vec2::new(-1.0 / 20.0, -1.0 / 30.0),
        tilt: std::f32::consts::PI / 4.0,
    },
    LayerSpec {
        name: "distant",
        count: 2000,
        radius: 2.0,
        color: [0.42, 0.478, 1.0],
        opacity: 0.4,
        point_size: 0.0008,
        spin: Vec2::new(1.0 / 60.0, -1.0 / 70.0),
        tilt: std::f32::consts::PI / 6.0,
    },
    LayerSpec {
        name: "nebula",
        count: 1500,
        radius: 1.5,
        color: [1.0, 0.431, 0.78],
        opacity: 0.7,
        point_size: 0.0015,
        spin: Vec2::new(-1.0 / 40.0, -1.0 / 50.0),
        tilt: std::f32::consts::PI / 3.0,
    },
    LayerSpec {
        name: "accent",
        count: 3000,
        radius: 1.2,
        color: [0.718, 0.58, 0.965],
        opacity: 0.6,
        point_size: 0.0012,
        spin: Vec2::new(0.0, 0.0),
        tilt: std::f32::consts::PI / 5.0,
    },
];

// Glow layer tuning: few, large, individually twinkling stars.
pub const GLOW_COUNT: usize = 80;
pub const GLOW_RADIUS: f32 = 1.3;
pub const GLOW_SIZE_MIN: f32 = 6.0;
pub const GLOW_SIZE_SPAN: f32 = 8.0;
pub const GLOW_INTENSITY_MIN: f32 = 0.4;
pub const GLOW_INTENSITY_SPAN: f32 = 0.6;
pub const GLOW_SPIN: Vec2 = Vec2::new(-1.0 / 25.0, -1.0 / 35.0);

#[derive(Debug, Error)]
pub enum LayerError {
    #[error("point count {0} exceeds the layer limit {MAX_LAYER_POINTS}")]
    TooManyPoints(usize),
    #[error("layer radius must be finite and positive, got {0}")]
    BadRadius(f32),
}

/// GPU-facing instance record shared by every star pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub glow: f32,
}

/// Per-layer uniform block shared by the web and native renderers.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarUniforms {
    pub model_view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// rgb + layer opacity.
    pub color: [f32; 4],
    /// x = shader time (seconds), y = instance size scale, z/w unused.
    pub params: [f32; 4],
}

impl StarUniforms {
    pub fn new(
        model_view: Mat4,
        proj: Mat4,
        color: [f32; 3],
        opacity: f32,
        time: f32,
        size_scale: f32,
    ) -> Self {
        Self {
            model_view: model_view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            color: [color[0], color[1], color[2], opacity],
            params: [time, size_scale, 0.0, 0.0],
        }
    }
}

/// Uniform-density sampling inside a sphere: uniform azimuth, `acos(2u - 1)`
/// polar angle (uniform over the sphere surface, no pole clustering), and
/// cube-root radius (uniform volumetric density, no surface clustering).
pub fn sample_sphere(count: usize, radius: f32, rng: &mut StdRng) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let theta = rng.gen::<f32>() * std::f32::consts::TAU;
        let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
        let r = rng.gen::<f32>().cbrt() * radius;
        let p = Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        );
        // Float edge cases at the sampling boundaries must not reach the GPU.
        points.push(scrub_non_finite(p));
    }
    points
}

#[inline]
fn scrub_non_finite(p: Vec3) -> Vec3 {
    Vec3::new(
        finite_or_zero(p.x),
        finite_or_zero(p.y),
        finite_or_zero(p.z),
    )
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

// Derive per-layer RNGs from one base seed so layers stay independent.
fn layer_rng(base_seed: u64, layer_index: usize) -> StdRng {
    let mix = base_seed ^ (layer_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

fn validate(count: usize, radius: f32) -> Result<(), LayerError> {
    if count > MAX_LAYER_POINTS {
        return Err(LayerError::TooManyPoints(count));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(LayerError::BadRadius(radius));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct ParticleLayer {
    pub spec: LayerSpec,
    pub positions: Vec<Vec3>,
    /// Accumulated animated rotation around x/y.
    pub rotation: Vec2,
}

impl ParticleLayer {
    pub fn try_generate(
        spec: &LayerSpec,
        base_seed: u64,
        layer_index: usize,
    ) -> Result<Self, LayerError> {
        validate(spec.count, spec.radius)?;
        let mut rng = layer_rng(base_seed, layer_index);
        Ok(Self {
            spec: spec.clone(),
            positions: sample_sphere(spec.count, spec.radius, &mut rng),
            rotation: Vec2::ZERO,
        })
    }

    /// Generation never takes the scene down: a malformed spec degrades to an
    /// empty point set for this layer only.
    pub fn generate(spec: &LayerSpec, base_seed: u64, layer_index: usize) -> Self {
        match Self::try_generate(spec, base_seed, layer_index) {
            Ok(layer) => layer,
            Err(e) => {
                log::error!("star layer '{}' failed to generate: {e}", spec.name);
                Self {
                    spec: spec.clone(),
                    positions: Vec::new(),
                    rotation: Vec2::ZERO,
                }
            }
        }
    }

    /// Build a layer over an existing point set (the accent layer shares the
    /// main layer's points).
    pub fn from_positions(spec: &LayerSpec, positions: Vec<Vec3>) -> Self {
        Self {
            spec: spec.clone(),
            positions,
            rotation: Vec2::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.rotation += self.spec.spin * dt_sec;
    }

    /// Static tilt first, then the accumulated animated rotation.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.spec.tilt)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }

    pub fn instances(&self) -> Vec<StarInstance> {
        self.positions
            .iter()
            .map(|p| StarInstance {
                pos: p.to_array(),
                size: self.spec.point_size,
                glow: 1.0,
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct GlowLayer {
    pub positions: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub glow_intensities: Vec<f32>,
    pub rotation: Vec2,
}

impl GlowLayer {
    pub fn generate(base_seed: u64, layer_index: usize) -> Self {
        let mut rng = layer_rng(base_seed, layer_index);
        let positions = sample_sphere(GLOW_COUNT, GLOW_RADIUS, &mut rng);
        let sizes = (0..GLOW_COUNT)
            .map(|_| GLOW_SIZE_MIN + rng.gen::<f32>() * GLOW_SIZE_SPAN)
            .collect();
        let glow_intensities = (0..GLOW_COUNT)
            .map(|_| GLOW_INTENSITY_MIN + rng.gen::<f32>() * GLOW_INTENSITY_SPAN)
            .collect();
        Self {
            positions,
            sizes,
            glow_intensities,
            rotation: Vec2::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.rotation += GLOW_SPIN * dt_sec;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }

    pub fn instances(&self) -> Vec<StarInstance> {
        self.positions
            .iter()
            .zip(self.sizes.iter().zip(&self.glow_intensities))
            .map(|(p, (size, glow))| StarInstance {
                pos: p.to_array(),
                size: *size,
                glow: *glow,
            })
            .collect()
    }
}

/// Host-side mirror of the glow shader's twinkle term, for tests and tuning.
/// Both sine phases are seeded by the point's own coordinates, so each star
/// flickers on its own stable schedule instead of blinking in unison.
pub fn twinkle(time: f32, glow_intensity: f32, pos: Vec3) -> f32 {
    let t1 = (time * glow_intensity * 1.5 + pos.x * 20.0).sin();
    let t2 = (time * glow_intensity * 2.3 + pos.y * 15.0).sin();
    let flash = smoothstep(0.3, 1.0, t1 * t2 * 0.5 + 0.5);
    flash * glow_intensity
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The full scene: plain layers, the glow layer, the camera rig and the
/// shader clock.
pub struct StarScene {
    pub layers: Vec<ParticleLayer>,
    pub glow: GlowLayer,
    pub camera: CameraRig,
    elapsed: f32,
}

impl StarScene {
    /// Construction degrades partially: a failed layer renders as empty, the
    /// rest of the scene still comes up.
    pub fn new(base_seed: u64) -> Self {
        let main = ParticleLayer::generate(&STAR_LAYERS[0], base_seed, 0);
        let distant = ParticleLayer::generate(&STAR_LAYERS[1], base_seed, 1);
        let nebula = ParticleLayer::generate(&STAR_LAYERS[2], base_seed, 2);
        let accent = ParticleLayer::from_positions(&STAR_LAYERS[3], main.positions.clone());
        let glow = GlowLayer::generate(base_seed, STAR_LAYERS.len());
        Self {
            layers: vec![main, distant, nebula, accent],
            glow,
            camera: CameraRig::new(),
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        for layer in &mut self.layers {
            layer.advance(dt_sec);
        }
        self.glow.advance(dt_sec);
        self.elapsed += dt_sec;
        self.camera.step();
    }

    pub fn retarget_camera(&mut self, section_index: usize) {
        self.camera.retarget(section_index);
    }

    /// Render-clock seconds, fed to the glow shader's time uniform.
    pub fn time(&self) -> f32 {
        self.elapsed
    }

    pub fn total_points(&self) -> usize {
        self.layers.iter().map(ParticleLayer::len).sum::<usize>() + self.glow.len()
    }

    /// Scale factor applied to glow instance sizes by the renderer.
    pub fn glow_size_scale(&self) -> f32 {
        GLOW_SIZE_SCALE
    }
}
