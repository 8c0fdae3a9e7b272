use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdccError {
	#[error(transparent)]
	#[diagnostic(code(mdcc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdcc::markdown))]
	Markdown(String),

	#[error("invalid props for component `{name}`: {reason}")]
	#[diagnostic(
		code(mdcc::invalid_props),
		help("the `{{...}}` payload after `name=\"{name}\"` must be a valid JSON object")
	)]
	InvalidProps { name: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdcc::config_parse),
		help("check that mdcc.toml is valid TOML with `tag_name`, `match_name` and `syntax` keys")
	)]
	ConfigParse(String),

	#[error(transparent)]
	#[diagnostic(code(mdcc::json))]
	Json(#[from] serde_json::Error),
}

pub type MdccResult<T> = Result<T, MdccError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
