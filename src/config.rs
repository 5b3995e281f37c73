use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

pub const CONFIG_FILE: &str = "bookfinder.toml";
pub const ENV_PREFIX: &str = "BOOKFINDER_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

/// How one kind of value is laid out on the terminal:
/// `{prefix}{description} {content}{suffix}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub separator:         String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_separator:   StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let description = self.description.style(&self.style_description);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            format!("{prefix}{content}{suffix}")
        } else {
            format!("{prefix}{description} {content}{suffix}")
        }
    }

    pub fn format_vec<T: ToString>(&self, content: &[T]) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let description = self.description.style(&self.style_description);
        let separator = self.separator.style(&self.style_separator);
        let mut s = format!("{prefix}{description} ");
        let mut i = content.iter().peekable();
        while let Some(x) = i.next() {
            s.push_str(&x.to_string().style(&self.style_content));
            if i.peek().is_some() {
                s.push_str(&separator);
            }
        }
        s.push_str(&suffix);
        s
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            separator:         ", ".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_separator:   StyleConfig::default(),
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the book API, without a trailing slash.
    pub api_base:            String,
    pub api_key:             String,
    /// `number` sent with free-text searches.
    pub search_limit:        u32,
    /// `number` sent with genre searches.
    pub genre_limit:         u32,
    /// Cards revealed per "Load More".
    pub page_size:           usize,
    /// File backing the session store. `~` and `$VARS` are expanded.
    pub session_location:    PathBuf,
    pub log_level:           String,
    pub output_index:        OutputConfig,
    pub output_title:        OutputConfig,
    pub output_author:       OutputConfig,
    pub output_genre:        OutputConfig,
    pub output_rating:       OutputConfig,
    pub output_isbn:         OutputConfig,
    pub output_page_count:   OutputConfig,
    pub output_publish_date: OutputConfig,
    pub output_image:        OutputConfig,
    pub output_description:  OutputConfig,
    pub output_status:       OutputConfig,
    pub output_category:     OutputConfig,
    pub output_error:        OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Self::figment()
            .extract()
            .context("Failed to read configuration")
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn session_path(&self) -> Result<PathBuf> {
        Ok(shellexpand::path::full(&self.session_location)
            .with_context(|| {
                format!(
                    "Couldn't expand session location {}",
                    self.session_location.display()
                )
            })?
            .into_owned())
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log level '{}'", self.log_level))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base:            "https://api.bigbookapi.com".into(),
            api_key:             "".into(),
            search_limit:        24,
            genre_limit:         36,
            page_size:           4,
            session_location:    std::env::temp_dir()
                .join("bookfinder")
                .join("session.json"),
            log_level:           "warn".into(),
            output_index:        OutputConfig {
                prefix: "[".into(),
                suffix: "]".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_title:        OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_TITLE,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:       OutputConfig {
                description: "Authors:".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_genre:        OutputConfig {
                description: "Genres:".into(),
                separator: " ".into(),
                style_content: StyleConfig {
                    color: COLOR_GENRE,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_rating:       OutputConfig {
                description: "Rating:".into(),
                style_content: StyleConfig {
                    color: COLOR_RATING,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_isbn:         OutputConfig {
                description: "ISBN:".into(),
                style_content: StyleConfig {
                    color: COLOR_ISBN,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_page_count:   OutputConfig {
                description: "Pages:".into(),
                style_content: StyleConfig {
                    color: COLOR_PAGE_COUNT,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_publish_date: OutputConfig {
                description: "Published:".into(),
                style_content: StyleConfig::default(),
                ..OutputConfig::default()
            },
            output_image:        OutputConfig {
                description: "Cover:".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_description:  OutputConfig {
                style_content: StyleConfig::default(),
                ..OutputConfig::default()
            },
            output_status:       OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_STATUS,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_category:     OutputConfig {
                description: "Current Category:".into(),
                style_content: StyleConfig {
                    color: COLOR_CATEGORY,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:        OutputConfig {
                description: "Error:".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let s = Config::default_as_string().unwrap();
        let config: Config = Figment::new()
            .merge(Toml::string(&s))
            .extract()
            .unwrap();
        assert_eq!(config.search_limit, 24);
        assert_eq!(config.genre_limit, 36);
        assert_eq!(config.page_size, 4);
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BOOKFINDER_API_KEY", "secret");
            jail.set_env("BOOKFINDER_PAGE_SIZE", "6");
            let config = Config::read_config().unwrap();
            assert_eq!(config.api_key, "secret");
            assert_eq!(config.page_size, 6);
            Ok(())
        });
    }

    #[test]
    fn log_level_parses() {
        let config = Config {
            log_level: "debug".into(),
            ..Config::default()
        };
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
    }
}
