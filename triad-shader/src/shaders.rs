//! Backend-neutral shader sources embedded at compile time.
//!
//! These are written in the neutral surface syntax (`attribute`, `varying`,
//! `texture2D`, `gl_FragColor`) and are meant to be run through a
//! [`crate::ShaderProcessor`] before compilation.

/// Fullscreen blit vertex shader.
pub const BLIT_VERTEX: &str = include_str!("../shaders/blit.vert");

/// Fullscreen blit fragment shader - single texture lookup.
pub const BLIT_FRAGMENT: &str = include_str!("../shaders/blit.frag");

/// Skybox fragment shader - cube map sampling with optional explicit LOD.
pub const SKYBOX_FRAGMENT: &str = include_str!("../shaders/skybox.frag");

/// G-buffer fragment shader - writes two render targets.
pub const GBUFFER_FRAGMENT: &str = include_str!("../shaders/gbuffer.frag");

/// Look up a built-in shader by name, as used by the command line tool.
pub fn by_name(name: &str) -> Option<&'static str> {
    match name {
        "blit.vert" => Some(BLIT_VERTEX),
        "blit.frag" => Some(BLIT_FRAGMENT),
        "skybox.frag" => Some(SKYBOX_FRAGMENT),
        "gbuffer.frag" => Some(GBUFFER_FRAGMENT),
        _ => None,
    }
}
