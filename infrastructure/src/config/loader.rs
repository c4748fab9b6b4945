//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["pid-insight.toml", ".pid-insight.toml"];
const ENV_PREFIX: &str = "PID_INSIGHT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// `$XDG_CONFIG_HOME/pid-insight/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pid-insight").join("config.toml"))
    }

    /// The project-level config file in the working directory, if any
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./pid-insight.toml or ./.pid-insight.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_names_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("pid-insight/config.toml"));
        }
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(
            &global,
            "[gemini]\nmodel = \"gemini-2.0-flash\"\ntimeout_secs = 30\n\n[output]\ncolor = false\n",
        )
        .unwrap();
        fs::write(&project, "[gemini]\nmodel = \"gemini-2.5-pro\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(&global), Some(&project), None)
            .extract()
            .unwrap();

        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.timeout_secs, 30);
        assert!(!config.output.color);
        assert_eq!(config.gemini.api_key_env, "API_KEY");
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&project, "[output]\nformat = \"raw\"\n").unwrap();
        fs::write(&explicit, "[output]\nformat = \"json\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_missing_global_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), None, None)
            .extract()
            .unwrap();

        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_env_overrides_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("pid.toml", "[gemini]\nmodel = \"gemini-2.0-flash\"\n")?;
            jail.set_env("PID_INSIGHT_GEMINI__MODEL", "gemini-2.5-pro");
            jail.set_env("PID_INSIGHT_LOGGING__CONVERSATION_LOG", "true");

            let config: FileConfig =
                ConfigLoader::figment(None, Some(Path::new("pid.toml")), None).extract()?;

            assert_eq!(config.gemini.model, "gemini-2.5-pro");
            assert!(config.logging.conversation_log);
            Ok(())
        });
    }
}
