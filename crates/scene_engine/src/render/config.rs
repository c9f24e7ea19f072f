//! Per-frame render configuration shared with every object's draw code

use crate::foundation::math::Mat4;

/// Per-render-call statistics, reset at the start of every `Scene::render`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Objects that received a draw call this frame
    pub objects_drawn: u32,
    /// Objects rejected by the frustum test this frame
    pub objects_culled: u32,
}

/// Wireframe rendering modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireframeMode {
    /// Solid rendering
    #[default]
    None,
    /// Single-pass wireframe done in the shader
    GlslSinglePass,
    /// Line-primitive wireframe
    GlLines,
}

impl WireframeMode {
    /// Cycle to the next mode, wrapping back to [`WireframeMode::None`]
    pub fn toggle(&mut self) {
        *self = match self {
            Self::None => Self::GlslSinglePass,
            Self::GlslSinglePass => Self::GlLines,
            Self::GlLines => Self::None,
        };
    }
}

/// Mutable per-frame configuration owned by the scene.
///
/// This is the sole channel by which the core communicates per-frame intent
/// to object draw implementations and to the shadow-map pass: matrices are
/// set by camera logic before `Scene::render`, and the shadow pass swaps
/// them for light-space matrices while `drawing_shadow_map` is raised.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Camera (or light-space) projection matrix
    pub projection_matrix: Mat4,
    /// Inverse camera transform, i.e. the view matrix
    pub inv_camera_view_mat: Mat4,
    /// True while a depth-only shadow pass is in flight; draw code switches
    /// to depth-only shading when set
    pub drawing_shadow_map: bool,
    /// Enable the per-object frustum test during `Scene::render`
    pub frustum_culling: bool,
    /// Draw debug bounding spheres
    pub render_bounding_spheres: bool,
    /// Draw debug collision shells
    pub render_collision_shells: bool,
    /// Current wireframe mode
    pub wireframe_mode: WireframeMode,
    /// Statistics for the most recent render call
    pub stats: RenderStats,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            projection_matrix: Mat4::identity(),
            inv_camera_view_mat: Mat4::identity(),
            drawing_shadow_map: false,
            frustum_culling: false,
            render_bounding_spheres: false,
            render_collision_shells: false,
            wireframe_mode: WireframeMode::None,
            stats: RenderStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wireframe_toggle_cycles_through_all_modes() {
        let mut mode = WireframeMode::None;
        mode.toggle();
        assert_eq!(mode, WireframeMode::GlslSinglePass);
        mode.toggle();
        assert_eq!(mode, WireframeMode::GlLines);
        mode.toggle();
        assert_eq!(mode, WireframeMode::None);
    }

    #[test]
    fn test_default_config_has_zeroed_stats() {
        let config = RenderConfig::default();
        assert_eq!(config.stats, RenderStats::default());
        assert!(!config.drawing_shadow_map);
    }
}
