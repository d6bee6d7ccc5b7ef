use anyhow::{Context, Result};
use bgr_markup::{CheckOptions, FuzzyPolicy, GameProfile, RenderOptions, RenderTables, TagComparator};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::trace;

/// Config definition.
///
/// Every field is optional, an empty file is the same as no config.
///
/// ```toml
/// profile = "MIR4"
/// fuzzy = true
/// compare = ["Icon", "param"]
///
/// [render]
/// show_hidden_chars = true
///
/// [tables]
/// player_name = "Hero"
///
/// [tables.icon_keys]
/// WeaponSkill_Slot_Basic = "Z"
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Game profile name.
    pub(crate) profile: Option<String>,

    /// Use [FuzzyPolicy::TruncatedSuffix] when comparing tags.
    pub(crate) fuzzy: bool,

    /// Self-closing families to compare between source and target.
    pub(crate) compare: Vec<String>,

    /// Default render switches, command line flags can only turn more on.
    pub(crate) render: RenderOptions,

    /// Lookup tables replacing the built-in ones.
    pub(crate) tables: RenderTables,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: None,
            fuzzy: false,
            compare: vec![String::from("Icon")],
            render: RenderOptions::default(),
            tables: RenderTables::default(),
        }
    }
}

impl Config {
    /// Load config from `path`, or the default config if no path given.
    pub(crate) async fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = fs::read_to_string(path)
            .await
            .with_context(|| format!("when reading config file {path}"))?;
        let config: Config = toml::from_str(data.as_str()).context("invalid config")?;
        trace!("{config:#?}");
        Ok(config)
    }

    /// Build check options, `profile` and `fuzzy` from command line take priority.
    pub(crate) fn check_options(
        &self,
        profile: Option<GameProfile>,
        fuzzy: bool,
    ) -> Result<CheckOptions> {
        let profile = match (profile, self.profile.as_deref()) {
            (Some(v), _) => v,
            (None, Some(name)) => name
                .parse::<GameProfile>()
                .context("invalid profile in config")?,
            (None, None) => GameProfile::default(),
        };

        let policy = if fuzzy || self.fuzzy {
            FuzzyPolicy::TruncatedSuffix
        } else {
            FuzzyPolicy::Exact
        };

        let comparators = self
            .compare
            .iter()
            .map(|name| {
                TagComparator::self_closing(name.as_str())
                    .map(|x| x.with_policy(policy))
                    .with_context(|| format!("invalid compared tag family {name:?} in config"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CheckOptions {
            profile,
            comparators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.compare, vec!["Icon"]);
        assert!(!config.fuzzy);
        let options = config.check_options(None, false).unwrap();
        assert_eq!(options.profile, GameProfile::ArcheAge);
        assert_eq!(options.comparators.len(), 1);
        assert_eq!(options.comparators[0].policy(), FuzzyPolicy::Exact);
    }

    #[test]
    fn test_config_fields() {
        let config: Config = toml::from_str(
            r#"
profile = "MIR4"
fuzzy = true
compare = ["Icon", "param"]

[render]
show_line_breaks = true

[tables]
player_name = "Hero"
"#,
        )
        .unwrap();
        assert!(config.render.show_line_breaks);
        assert_eq!(config.tables.player_name, "Hero");

        let options = config.check_options(None, false).unwrap();
        assert_eq!(options.profile, GameProfile::Mir4);
        let families = options
            .comparators
            .iter()
            .map(|x| x.family())
            .collect::<Vec<_>>();
        assert_eq!(families, vec!["Icon", "param"]);
        assert_eq!(options.comparators[1].policy(), FuzzyPolicy::TruncatedSuffix);
    }

    #[test]
    fn test_command_line_overrides_profile() {
        let config: Config = toml::from_str(r#"profile = "MIR4""#).unwrap();
        let options = config.check_options(Some(GameProfile::ArcheAge), true).unwrap();
        assert_eq!(options.profile, GameProfile::ArcheAge);
        assert_eq!(options.comparators[0].policy(), FuzzyPolicy::TruncatedSuffix);
    }

    #[test]
    fn test_invalid_config_values() {
        let config: Config = toml::from_str(r#"compare = ["FontStyle"]"#).unwrap();
        assert!(config.check_options(None, false).is_err());

        let config: Config = toml::from_str(r#"profile = "Lineage""#).unwrap();
        assert!(config.check_options(None, false).is_err());
    }
}
