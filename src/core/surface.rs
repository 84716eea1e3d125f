// Backend and surface choices for the background renderer. Kept apart from
// the browser glue so the fallbacks can be checked on the host.

/// WebGPU where the browser can hand out an adapter, WebGL2 otherwise.
/// Pass to `wgpu::util::new_instance_with_webgpu_detection`, which drops
/// `BROWSER_WEBGPU` when `navigator.gpu` exists but yields no adapter.
pub fn instance_descriptor() -> wgpu::InstanceDescriptor {
    wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    }
}

/// First non-sRGB format, else the first offered. The shader writes
/// display-referred colour.
pub fn choose_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Prefer straight (post-multiplied) output, then premultiplied, then
/// whatever the surface offers first; `Auto` if it lists none.
pub fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    [
        wgpu::CompositeAlphaMode::PostMultiplied,
        wgpu::CompositeAlphaMode::PreMultiplied,
        wgpu::CompositeAlphaMode::Inherit,
    ]
    .into_iter()
    .find(|m| modes.contains(m))
    .or_else(|| modes.first().copied())
    .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
