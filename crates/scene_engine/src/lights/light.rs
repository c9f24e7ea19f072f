//! Light sources

use super::shadow_map::ShadowMap;
use crate::foundation::math::Vec3;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
///
/// Carries enough pose to derive a light-space view for shadowing, and
/// optionally owns the shadow map rendered from its point of view. The
/// shadow map's GPU resources must be torn down through
/// [`ShadowMap::delete_data`] before the light is discarded.
pub struct Light {
    /// Light type
    pub kind: LightKind,
    /// Light position (for point lights)
    pub position: Vec3,
    /// Direction the light shines in
    pub direction: Vec3,
    /// Shadow map rendered from this light, if it casts shadows
    pub shadow_map: Option<ShadowMap>,
}

impl Light {
    /// Create a directional light
    pub fn directional(direction: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            position: Vec3::zeros(),
            direction: direction.normalize(),
            shadow_map: None,
        }
    }

    /// Create a point light shining toward the origin
    pub fn point(position: Vec3) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            direction: (-position).normalize(),
            shadow_map: None,
        }
    }

    /// Attach a shadow map, making this a shadow-casting light
    pub fn attach_shadow_map(&mut self, shadow_map: ShadowMap) {
        self.shadow_map = Some(shadow_map);
    }
}
