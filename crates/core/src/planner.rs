//! Assembly of the target alphabet for one subsetting run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CharSet, FontConfig, inventory::base_chars, scanner::scan_document};

/// Descriptive data about one poster.
///
/// Every field is optional; an absent field contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterContext {
    #[serde(default)]
    pub years: Option<Vec<i32>>,
    #[serde(default)]
    pub type_list: Option<Vec<String>>,
    #[serde(default)]
    pub units: Option<String>,
}

impl PosterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = Some(years.into_iter().collect());
        self
    }

    pub fn with_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.type_list = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Characters of the decimal years, type names and unit string.
    pub fn chars(&self) -> CharSet {
        let mut chars = CharSet::new();
        if let Some(years) = &self.years {
            for year in years {
                chars.add_str(&year.to_string());
            }
        }
        if let Some(types) = &self.type_list {
            chars.add_words(types);
        }
        if let Some(units) = &self.units {
            chars.add_str(units);
        }
        chars
    }
}

/// Accumulates the characters a subset font has to cover.
///
/// Contributions are only ever unioned. Unless the config asks for exact
/// characters only, the baseline alphabet is always part of the result.
#[derive(Debug, Clone)]
pub struct SubsetPlanner {
    chars: CharSet,
}

impl SubsetPlanner {
    /// Starts from the baseline (unless `exact_chars_only`) plus the
    /// declared characters of `config`.
    pub fn new(config: &FontConfig) -> Self {
        let mut chars = if config.exact_chars_only { CharSet::new() } else { base_chars() };
        chars.union_with(&config.declared_chars());
        Self { chars }
    }

    /// Adds caller-supplied characters.
    pub fn add_chars(&mut self, text: &str) -> &mut Self {
        self.chars.add_str(text);
        self
    }

    pub fn add_poster(&mut self, poster: &PosterContext) -> &mut Self {
        self.chars.union_with(&poster.chars());
        self
    }

    /// Adds the characters rendered by an SVG document; missing files add nothing.
    pub fn add_document(&mut self, path: &Path) -> &mut Self {
        self.chars.union_with(&scan_document(path));
        self
    }

    pub fn build(self) -> CharSet {
        self.chars
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    fn exact_config(custom: &str) -> FontConfig {
        FontConfig {
            custom_chars: custom.into(),
            exact_chars_only: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_poster_chars() {
        let poster = PosterContext::new().with_years([2023]).with_types(["Run"]).with_units("km");
        assert_eq!(poster.chars(), CharSet::from("2023Runkm"));
    }

    #[test]
    fn test_absent_fields_contribute_nothing() {
        assert!(PosterContext::new().chars().is_empty());
        let poster = PosterContext {
            units: Some("mi".into()),
            ..Default::default()
        };
        assert_eq!(poster.chars(), CharSet::from("mi"));
    }

    #[test]
    fn test_negative_year_keeps_sign() {
        let poster = PosterContext::new().with_years([-45]);
        assert_eq!(poster.chars(), CharSet::from("-45"));
    }

    #[test]
    fn test_default_includes_baseline() {
        let alphabet = SubsetPlanner::new(&FontConfig::default()).build();
        assert_eq!(alphabet, base_chars());
    }

    #[test]
    fn test_union_of_all_sources() {
        let config = FontConfig {
            custom_chars: "张".into(),
            additional_words: vec!["三".into()],
            ..Default::default()
        };
        let poster = PosterContext::new().with_types(["骑行"]);
        let mut planner = SubsetPlanner::new(&config);
        planner.add_poster(&poster).add_chars("李");
        let alphabet = planner.build();

        assert!(alphabet.is_superset(&base_chars()));
        assert!(alphabet.contains_all("张三李骑行"));
        assert_eq!(alphabet.len(), base_chars().len() + 5);
    }

    #[test]
    fn test_exact_chars_only_skips_baseline() {
        let poster = PosterContext::new().with_years([2024]);
        let mut planner = SubsetPlanner::new(&exact_config("张"));
        planner.add_chars("x").add_poster(&poster);
        assert_eq!(planner.build(), CharSet::from("张2024x"));
    }

    #[test]
    fn test_planner_adds_documents() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("poster.svg");
        write(&svg, "<text>四川</text>").unwrap();

        let mut planner = SubsetPlanner::new(&exact_config(""));
        planner.add_document(&svg).add_document(&dir.path().join("missing.svg"));
        assert_eq!(planner.build(), CharSet::from("四川"));
    }

    #[test]
    fn test_poster_from_json() {
        let poster: PosterContext =
            serde_json::from_str(r#"{ "years": [2022, 2023], "units": "km" }"#).unwrap();
        assert_eq!(poster.years, Some(vec![2022, 2023]));
        assert_eq!(poster.type_list, None);
        assert_eq!(poster.units.as_deref(), Some("km"));
    }
}
