//! Pure dimension arithmetic for the derived images.

/// Output size for a `width`x`height` source whose longer side should
/// become `target`.
///
/// The shorter side is `round(short * target / long)`, never below 1.
/// Without `allow_upscale`, a source whose longer side is already at or
/// below `target` keeps its own size.
#[must_use]
pub fn target_dimensions(width: u32, height: u32, target: u32, allow_upscale: bool) -> (u32, u32) {
    let long = width.max(height);
    if long == 0 {
        return (width, height);
    }
    if !allow_upscale && long <= target {
        return (width, height);
    }

    let short = width.min(height);
    // Round half up in integer arithmetic
    let scaled = (u64::from(short) * u64::from(target) * 2 + u64::from(long)) / (2 * u64::from(long));
    let scaled = u32::try_from(scaled).unwrap_or(u32::MAX).max(1);

    if width >= height {
        (target, scaled)
    } else {
        (scaled, target)
    }
}

/// True when scaling a `width`x`height` source to `target` would enlarge it.
#[must_use]
pub fn needs_upscale(width: u32, height: u32, target: u32) -> bool {
    width.max(height) < target
}
