// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for the animation core.
//!
//! Every effect reads its constants from a small `Copy` struct. The values
//! returned by [`EffectConfig::standard`] are the reference tuning; lower
//! easing factors trade responsiveness for smoothness.

/// Scroll smoothing and idle detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalConfig {
    /// Fraction of the remaining distance to `raw` covered per frame.
    /// `1.0` disables smoothing.
    pub easing: f64,
    /// Milliseconds without a scroll event before the page counts as idle.
    pub settle_delay_ms: u64,
}

/// Reveal band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Fraction of the viewport height an element's top edge must rise
    /// above to count as revealed.
    pub band: f64,
}

/// Depth-tiered parallax.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    /// Offset per unit of center distance, multiplied by the depth tier.
    pub base_factor: f64,
    /// Absolute bound on the published offset.
    pub max_offset: f64,
    /// Per-frame interpolation factor.
    pub ease: f64,
}

/// Proximity glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    /// Per-frame interpolation factor.
    pub ease: f64,
    /// Intensity above which the glow marker is active.
    pub active_threshold: f64,
}

/// Vertical float drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatConfig {
    /// Multiplier applied to the viewport-normalized distance.
    pub scale: f64,
    /// Absolute bound on the published offset.
    pub limit: f64,
    /// Per-frame interpolation factor.
    pub ease: f64,
}

/// Text skew.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpConfig {
    /// Absolute bound on scroll progress before scaling.
    pub progress_limit: f64,
    /// Multiplier turning progress into warp amount.
    pub scale: f64,
    /// Per-frame interpolation factor.
    pub ease: f64,
    /// Magnitude above which the warp marker is active.
    pub active_threshold: f64,
}

/// Group-identifying markers: the selection contract with the host page.
///
/// An element belongs to a group when it carries the group's marker. Parallax
/// depth is read from three mutually exclusive sub-markers; an element
/// carrying none of them is tier 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Reveal group.
    pub reveal: &'static str,
    /// Parallax group.
    pub parallax: &'static str,
    /// Parallax tier 1 (smallest multiplier).
    pub parallax_depth_1: &'static str,
    /// Parallax tier 2.
    pub parallax_depth_2: &'static str,
    /// Parallax tier 3 (largest multiplier, also the default).
    pub parallax_depth_3: &'static str,
    /// Glow group.
    pub glow: &'static str,
    /// Float group.
    pub float: &'static str,
    /// Text-warp group.
    pub text_warp: &'static str,
    /// Pointer-tilt cards.
    pub tilt_card: &'static str,
}

/// Pointer-tilt card tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Rotation at the card edge, in degrees.
    pub max_tilt_deg: f64,
    /// Scale while the pointer is over the card.
    pub hover_scale: f64,
    /// Per-frame interpolation factor.
    pub ease: f64,
}

/// Ambient particle field tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Number of particles.
    pub count: usize,
    /// Smallest particle radius.
    pub min_radius: f64,
    /// Largest particle radius.
    pub max_radius: f64,
    /// Largest per-frame speed along either axis.
    pub max_speed: f64,
    /// Seed for the deterministic generator.
    pub seed: u64,
}

/// Tuning for the auxiliary interactive effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientConfig {
    /// Pointer-tilt cards.
    pub tilt: TiltConfig,
    /// Particle field.
    pub particles: ParticleConfig,
}

/// Complete configuration for an animation session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectConfig {
    /// Scroll smoothing.
    pub signal: SignalConfig,
    /// Reveal band.
    pub reveal: RevealConfig,
    /// Parallax.
    pub parallax: ParallaxConfig,
    /// Glow.
    pub glow: GlowConfig,
    /// Float.
    pub float: FloatConfig,
    /// Text warp.
    pub warp: WarpConfig,
    /// Group markers.
    pub markers: Markers,
    /// Auxiliary effects.
    pub ambient: AmbientConfig,
}

impl EffectConfig {
    /// Reference tuning.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            signal: SignalConfig {
                easing: 0.12,
                settle_delay_ms: 150,
            },
            reveal: RevealConfig { band: 0.8 },
            parallax: ParallaxConfig {
                base_factor: 0.05,
                max_offset: 5.0,
                ease: 0.1,
            },
            glow: GlowConfig {
                ease: 0.15,
                active_threshold: 0.1,
            },
            float: FloatConfig {
                scale: 3.0,
                limit: 2.0,
                ease: 0.12,
            },
            warp: WarpConfig {
                progress_limit: 0.5,
                scale: 3.0,
                ease: 0.1,
                active_threshold: 0.01,
            },
            markers: Markers {
                reveal: "reveal-on-scroll",
                parallax: "parallax-layer",
                parallax_depth_1: "parallax-depth-1",
                parallax_depth_2: "parallax-depth-2",
                parallax_depth_3: "parallax-depth-3",
                glow: "glow-on-scroll",
                float: "float-on-scroll",
                text_warp: "text-warp",
                tilt_card: "tilt-card",
            },
            ambient: AmbientConfig {
                tilt: TiltConfig {
                    max_tilt_deg: 8.0,
                    hover_scale: 1.02,
                    ease: 0.1,
                },
                particles: ParticleConfig {
                    count: 40,
                    min_radius: 0.6,
                    max_radius: 2.2,
                    max_speed: 0.25,
                    seed: 0x5C20_11F0,
                },
            },
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Panics unless `factor` is a usable per-frame interpolation factor.
pub(crate) fn assert_ease(factor: f64, what: &str) {
    assert!(
        factor > 0.0 && factor <= 1.0,
        "{what} easing factor must be in (0, 1], got {factor}"
    );
}
