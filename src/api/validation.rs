use crate::error::{NavigatorError, NavigatorResult};

use super::NavigatorConfig;

pub(super) fn validate_navigator_config(config: NavigatorConfig) -> NavigatorResult<NavigatorConfig> {
    if config.materialize.attempt_budget == 0 {
        return Err(NavigatorError::InvalidConfig(
            "materialize attempt budget must be >= 1".to_owned(),
        ));
    }

    let stability = config.stability;
    if !stability.pixel_threshold.is_finite() || stability.pixel_threshold <= 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "stability pixel threshold must be finite and > 0".to_owned(),
        ));
    }
    if stability.required_stable_frames == 0 {
        return Err(NavigatorError::InvalidConfig(
            "stability required frames must be >= 1".to_owned(),
        ));
    }
    if !stability.max_wait_seconds.is_finite() || stability.max_wait_seconds < 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "stability max wait must be finite and >= 0".to_owned(),
        ));
    }

    let convergence = config.convergence;
    if !convergence.damping.is_finite() || convergence.damping <= 0.0 || convergence.damping > 1.0
    {
        return Err(NavigatorError::InvalidConfig(
            "convergence damping must be in (0, 1]".to_owned(),
        ));
    }
    if !convergence.settle_tolerance_px.is_finite() || convergence.settle_tolerance_px <= 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "convergence settle tolerance must be finite and > 0".to_owned(),
        ));
    }
    if !convergence.max_duration_seconds.is_finite() || convergence.max_duration_seconds < 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "convergence max duration must be finite and >= 0".to_owned(),
        ));
    }
    if !convergence.offset_viewport_fraction.is_finite()
        || !(0.0..=1.0).contains(&convergence.offset_viewport_fraction)
    {
        return Err(NavigatorError::InvalidConfig(
            "convergence offset fraction must be in [0, 1]".to_owned(),
        ));
    }
    if !convergence.min_offset_px.is_finite() || convergence.min_offset_px < 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "convergence min offset must be finite and >= 0".to_owned(),
        ));
    }

    let zoom = config.zoom;
    if !zoom.min_scale.is_finite()
        || !zoom.max_scale.is_finite()
        || zoom.min_scale <= 0.0
        || zoom.min_scale > zoom.max_scale
    {
        return Err(NavigatorError::InvalidConfig(
            "zoom bounds must be finite with 0 < min <= max".to_owned(),
        ));
    }
    if !zoom.step.is_finite() || zoom.step <= 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "zoom step must be finite and > 0".to_owned(),
        ));
    }

    let auto_fetch = config.auto_fetch;
    if !auto_fetch.prefetch_distance_px.is_finite() || auto_fetch.prefetch_distance_px < 0.0 {
        return Err(NavigatorError::InvalidConfig(
            "auto-fetch prefetch distance must be finite and >= 0".to_owned(),
        ));
    }

    Ok(config)
}

pub(super) fn validate_frame_delta(delta_seconds: f64) -> NavigatorResult<()> {
    if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
        return Err(NavigatorError::InvalidData(
            "frame delta seconds must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_zoom_scale(scale: f64) -> NavigatorResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(NavigatorError::InvalidData(
            "zoom scale must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
