// Shared animation tuning constants used by the web and native frontends.

// ---- Glyph pressure ----

// Font-weight range for variable-weight glyphs
pub const WEIGHT_MIN: f32 = 100.0;
pub const WEIGHT_MAX: f32 = 900.0;
pub const WEIGHT_SPAN: f32 = WEIGHT_MAX - WEIGHT_MIN;

// Distance (page units) beyond which a glyph stays at minimum weight
pub const PRESSURE_MAX_RADIUS: f32 = 140.0;

// Fraction of the remaining cursor distance closed per frame
pub const CURSOR_EASE_DIVISOR: f32 = 5.0;

// Below this remaining distance (page units, per axis) the glyph pass is skipped
pub const CURSOR_SETTLE_EPSILON: f32 = 0.5;

// The intro sweep starts/ends this far outside the container so it clears it
pub const SWEEP_OVERSHOOT: f32 = 100.0;

// Visibility fraction that arms the one-shot intro
pub const DEFAULT_TRIGGER_THRESHOLD: f64 = 0.8;

// Sweep starts this long after the fade-in begins, not after it finishes
pub const INTRO_DELAY_MS: u64 = 300;
pub const INTRO_DURATION_MS: u64 = 1800;

pub const DEFAULT_MIN_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

// ---- Scene / camera ----

// Per-frame fractional approach toward the camera target
pub const CAMERA_EASE: f32 = 0.04;

pub const CAMERA_FOV_Y: f32 = std::f32::consts::PI * 75.0 / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Initial section resolve waits this long for layout to settle
pub const SECTION_SETTLE_DELAY_MS: i32 = 200;

// Hard cap on a single particle layer; anything above this is malformed input
pub const MAX_LAYER_POINTS: usize = 1 << 20;

// Glow star point sizes are authored in pixel-ish units and scaled to world
// units by the renderer through this factor
pub const GLOW_SIZE_SCALE: f32 = 0.001;
