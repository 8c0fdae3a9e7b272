use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::MdccError;
use crate::MdccResult;

/// Tag identifier given to every replacement element unless configured.
pub const DEFAULT_TAG_NAME: &str = "custom-component";

/// Directive identifier searched for unless configured.
pub const DEFAULT_MATCH_NAME: &str = "CustomComponent";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["mdcc.toml", ".mdcc.toml", ".config/mdcc.toml"];

/// The attribute payload grammar a directive is read with.
///
/// Only one syntax is active per [`MdccConfig`]. A directive written in the
/// other syntax is left untouched as literal text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AttributeSyntax {
	/// `name="button"` followed by an optional JSON object literal.
	///
	/// ```md
	/// <CustomComponent name="button" {"type": "primary"} />
	/// ```
	#[default]
	Json,
	/// Free-form element attributes: `key="value"`, `key=value` or a bare
	/// `key` flag.
	///
	/// ```md
	/// <CustomComponent name="button" disabled size=large />
	/// ```
	Attributes,
}

impl fmt::Display for AttributeSyntax {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Json => write!(f, "json"),
			Self::Attributes => write!(f, "attributes"),
		}
	}
}

/// Configuration loaded from an `mdcc.toml` file.
///
/// ```toml
/// tag_name = "custom-component"
/// match_name = "CustomComponent"
/// syntax = "json"
/// ```
///
/// Both names are used verbatim. The match name is compared literally against
/// the text following `<`, so it is case sensitive and never interpreted as a
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdccConfig {
	/// Tag identifier assigned to every replacement element.
	#[serde(default = "default_tag_name")]
	pub tag_name: String,
	/// Directive identifier to recognize, e.g. `CustomComponent` for
	/// `<CustomComponent ... />`.
	#[serde(default = "default_match_name")]
	pub match_name: String,
	/// Attribute payload grammar.
	#[serde(default)]
	pub syntax: AttributeSyntax,
}

impl Default for MdccConfig {
	fn default() -> Self {
		Self {
			tag_name: default_tag_name(),
			match_name: default_match_name(),
			syntax: AttributeSyntax::default(),
		}
	}
}

fn default_tag_name() -> String {
	DEFAULT_TAG_NAME.to_string()
}

fn default_match_name() -> String {
	DEFAULT_MATCH_NAME.to_string()
}

impl MdccConfig {
	#[must_use]
	pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
		self.tag_name = tag_name.into();
		self
	}

	#[must_use]
	pub fn with_match_name(mut self, match_name: impl Into<String>) -> Self {
		self.match_name = match_name.into();
		self
	}

	#[must_use]
	pub fn with_syntax(mut self, syntax: AttributeSyntax) -> Self {
		self.syntax = syntax;
		self
	}

	/// Resolve the config file path from the supported candidate locations in
	/// precedence order.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from `root`. Returns `Ok(None)` when no config file
	/// exists.
	pub fn load(root: &Path) -> MdccResult<Option<MdccConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse a config from TOML source.
	pub fn from_toml(content: &str) -> MdccResult<MdccConfig> {
		toml::from_str(content).map_err(|e| MdccError::ConfigParse(e.to_string()))
	}
}
