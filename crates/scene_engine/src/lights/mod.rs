//! Lights and the depth-only shadow-map pipeline

mod light;
mod projection;
mod shadow_map;

pub use light::{Light, LightKind};
pub use projection::{simple_shadowmap_projection, ShadowmapFit};
pub use shadow_map::{
    ShadowMap, ShadowMapError, ShadowMapPool, ShadowMapSlot, MAX_SHADOW_MAPS, SHADOW_MAP_SIZE,
};
