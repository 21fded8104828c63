use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::consts::THEME_CLASS_PREFIX;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
    /// A value the page does not offer. It is still applied, yielding a class
    /// no stylesheet matches.
    Unrecognized(String),
}

impl Theme {
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            "system" => Theme::System,
            other => Theme::Unrecognized(other.to_string()),
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
            Theme::Unrecognized(value) => value,
        }
    }

    pub fn class_name(&self) -> String {
        format!("{THEME_CLASS_PREFIX}{}", self.as_value())
    }

    pub fn is_offered(&self) -> bool {
        !matches!(self, Theme::Unrecognized(_))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

impl FromStr for Theme {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_value(value))
    }
}

/// Rewrites a class attribute so it carries exactly one theme class.
pub fn swap_theme_class(class_attr: &str, theme: &Theme) -> String {
    let mut classes: Vec<String> = class_attr
        .split_whitespace()
        .filter(|class| !class.starts_with(THEME_CLASS_PREFIX))
        .map(str::to_string)
        .collect();
    classes.push(theme.class_name());
    classes.join(" ")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeOption {
    pub theme: Theme,
    pub label: String,
}

/// Open/closed state and option labels of the custom theme dropdown.
#[derive(Clone, Debug, Default)]
pub struct ThemeDropdown {
    open: bool,
    options: Vec<ThemeOption>,
}

impl ThemeDropdown {
    pub fn new(options: Vec<ThemeOption>) -> Self {
        Self {
            open: false,
            options,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn label_for(&self, theme: &Theme) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.theme == *theme)
            .map(|option| option.label.as_str())
    }
}
