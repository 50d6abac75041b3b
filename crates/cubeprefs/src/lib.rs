//! User preferences.
//!
//! Preferences are layered from the embedded `default.yaml` and an optional
//! user file. Missing keys in the user file fall back to the defaults.

#![allow(missing_docs)] // fields are described in default.yaml

use std::path::Path;

use cubepuzzle_core::CubeParams;
use eyre::{Result, WrapErr, bail};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
mod schema;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences = serde_norway::from_str::<schema::AnyVersion>(DEFAULT_PREFS_STR)
        .expect("error loading default preferences")
        .into_current();
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub cube: CubeParams,
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub highlight: HighlightPreferences,
    /// Log every input event and state transition.
    pub debug: bool,
}

impl Preferences {
    /// Loads preferences from `user_file`, layered over the defaults. If
    /// loading fails, logs a warning and returns the default preferences.
    pub fn load(user_file: Option<&Path>) -> Self {
        Self::try_load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences from `user_file`, layered over the defaults.
    pub fn try_load(user_file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default_config()?;
        if let Some(path) = user_file {
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }
        Self::build(config).wrap_err_with(|| match user_file {
            Some(path) => format!("error loading preferences from {}", path.display()),
            None => "error loading default preferences".to_owned(),
        })
    }

    /// Loads preferences from a config source, layered over the defaults.
    pub fn try_load_from_source(
        user_config_source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::build(Self::default_config()?.add_source(user_config_source))
    }

    fn default_config() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        lazy_static::initialize(&DEFAULT_PREFS);

        Ok(config::Config::builder()
            .set_default("version", schema::CURRENT_VERSION)?
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT)))
    }

    fn build(config: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let prefs = config
            .build()?
            .try_deserialize::<schema::AnyVersion>()?
            .into_current();
        prefs.validate()?;
        log::debug!("loaded preferences: {prefs:?}");
        Ok(prefs)
    }

    /// Returns an error if any preference breaks an invariant that the rest
    /// of the program relies on.
    pub fn validate(&self) -> Result<()> {
        self.cube.validate().wrap_err("invalid cube preferences")?;

        let anim = &self.animation;
        if !(anim.twist_duration.is_finite() && anim.twist_duration >= 0.0) {
            bail!("twist duration must be non-negative; got {}", anim.twist_duration);
        }

        let interaction = &self.interaction;
        if !(interaction.layer_eps_ratio > 0.0 && interaction.layer_eps_ratio < 0.5) {
            bail!(
                "layer tolerance ratio must be between 0 and 0.5; got {}",
                interaction.layer_eps_ratio,
            );
        }
        if !(interaction.drag_threshold_ratio.is_finite() && interaction.drag_threshold_ratio >= 0.0) {
            bail!(
                "drag threshold ratio must be non-negative; got {}",
                interaction.drag_threshold_ratio,
            );
        }
        if !(interaction.tangent_fallback_cos > 0.0 && interaction.tangent_fallback_cos < 1.0) {
            bail!(
                "tangent fallback cosine must be between 0 and 1; got {}",
                interaction.tangent_fallback_cos,
            );
        }

        if !(0.0..=1.0).contains(&self.highlight.blend) {
            bail!("highlight blend must be between 0 and 1; got {}", self.highlight.blend);
        }
        Ok(())
    }

    /// Serializes the preferences to YAML, including the version tag.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(&schema::AnyVersion::V1(Box::new(self.clone())))?)
    }
}

#[cfg(test)]
mod tests {
    use cubepuzzle_core::Rgb;
    use pretty_assertions::assert_eq;

    use super::*;

    fn from_yaml(s: &str) -> Result<Preferences> {
        Preferences::try_load_from_source(config::File::from_str(s, PREFS_FILE_FORMAT))
    }

    #[test]
    fn test_default_prefs() {
        let prefs = &*DEFAULT_PREFS;
        assert_eq!(prefs.cube, CubeParams::default());
        assert_eq!(prefs.animation, AnimationPreferences::default());
        assert_eq!(prefs.interaction, InteractionPreferences::default());
        assert_eq!(prefs.highlight, HighlightPreferences::default());
        assert!(!prefs.debug);
        prefs.validate().expect("default preferences are valid");
        assert_eq!(Preferences::try_load(None).expect("defaults load"), *prefs);
    }

    #[test]
    fn test_user_prefs_are_layered() {
        let prefs = from_yaml(
            "cube:\n  size: 4\nhighlight:\n  color: '#f00'\nanimation:\n  twist_interpolation: cosine\n",
        )
        .expect("valid preferences");
        assert_eq!(prefs.cube.size, 4);
        assert_eq!(prefs.cube.cubelet, 0.95);
        assert_eq!(prefs.highlight.color, Rgb::from_u32(0xff0000));
        assert_eq!(prefs.highlight.blend, 0.4);
        assert_eq!(prefs.animation.twist_interpolation, InterpolateFn::Cosine);
    }

    #[test]
    fn test_invalid_prefs_are_rejected() {
        assert!(from_yaml("interaction:\n  layer_eps_ratio: 0.5\n").is_err());
        assert!(from_yaml("cube:\n  size: 0\n").is_err());
        assert!(from_yaml("highlight:\n  blend: 1.5\n").is_err());
        assert!(from_yaml("version: v0\n").is_err());
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let missing = Path::new("no/such/dir/prefs.yaml");
        assert!(Preferences::try_load(Some(missing)).is_err());
        assert_eq!(Preferences::load(Some(missing)), *DEFAULT_PREFS);
        assert_eq!(Preferences::load(None), *DEFAULT_PREFS);
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = DEFAULT_PREFS.to_yaml().expect("serializable");
        assert_eq!(from_yaml(&yaml).expect("valid preferences"), *DEFAULT_PREFS);
    }
}
