//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - Opening alignment files as panels at startup
//! - Overriding the default gutter width
//! - Overriding the default color scheme

use clap::Parser;
use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::gutter::clamp_label_width;
use crate::msa::ColorScheme;

/// A fast multiple sequence alignment viewer
#[derive(Parser, Debug)]
#[command(
    name = "msaboard",
    version,
    about = "A fast multiple sequence alignment viewer"
)]
pub struct CliArgs {
    /// FASTA alignment files to open
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Default label gutter width in pixels (40-400)
    #[arg(long, value_name = "PX")]
    pub label_width: Option<u32>,

    /// Default color scheme
    #[arg(long, value_name = "NAME")]
    pub scheme: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Files to open, in order
    pub files: Vec<PathBuf>,
    pub label_width: Option<u32>,
    pub scheme: Option<ColorScheme>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let (dirs, files): (Vec<_>, Vec<_>) = self.files.into_iter().partition(|p| p.is_dir());
        if let Some(dir) = dirs.first() {
            return Err(format!("{} is a directory", dir.display()));
        }

        let scheme = match self.scheme {
            Some(name) => Some(parse_scheme(&name)?),
            None => None,
        };

        Ok(StartupConfig {
            files,
            label_width: self.label_width.map(|w| clamp_label_width(w as f64)),
            scheme,
        })
    }
}

fn parse_scheme(name: &str) -> Result<ColorScheme, String> {
    ColorScheme::ALL
        .iter()
        .copied()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let known: Vec<&str> = ColorScheme::ALL.iter().map(|s| s.name()).collect();
            format!(
                "unknown color scheme '{}' (expected one of: {})",
                name,
                known.join(", ")
            )
        })
}

impl StartupConfig {
    /// Apply command-line overrides on top of the loaded config file
    pub fn apply_to(&self, config: &mut ViewerConfig) {
        if let Some(width) = self.label_width {
            config.default_label_width = width;
        }
        if let Some(scheme) = self.scheme {
            config.color_scheme = scheme.name().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(files: &[&str], label_width: Option<u32>, scheme: Option<&str>) -> CliArgs {
        CliArgs {
            files: files.iter().map(PathBuf::from).collect(),
            label_width,
            scheme: scheme.map(String::from),
        }
    }

    #[test]
    fn test_empty_args() {
        let config = args(&[], None, None).into_config().unwrap();
        assert!(config.files.is_empty());
        assert_eq!(config.label_width, None);
        assert_eq!(config.scheme, None);
    }

    #[test]
    fn test_files_keep_order() {
        let config = args(&["b.fasta", "a.fasta"], None, None)
            .into_config()
            .unwrap();
        assert_eq!(
            config.files,
            vec![PathBuf::from("b.fasta"), PathBuf::from("a.fasta")]
        );
    }

    #[test]
    fn test_label_width_is_clamped() {
        let config = args(&[], Some(5000), None).into_config().unwrap();
        assert_eq!(config.label_width, Some(400));
        let config = args(&[], Some(3), None).into_config().unwrap();
        assert_eq!(config.label_width, Some(40));
    }

    #[test]
    fn test_unknown_scheme_is_an_error() {
        assert!(args(&[], None, Some("rainbow")).into_config().is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let startup = args(&[], Some(150), Some("plain")).into_config().unwrap();
        let mut config = ViewerConfig::default();
        startup.apply_to(&mut config);
        assert_eq!(config.default_label_width, 150);
        assert_eq!(config.scheme(), ColorScheme::Plain);
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = std::env::temp_dir();
        let err = CliArgs {
            files: vec![dir],
            label_width: None,
            scheme: None,
        }
        .into_config()
        .unwrap_err();
        assert!(err.contains("directory"));
    }
}
