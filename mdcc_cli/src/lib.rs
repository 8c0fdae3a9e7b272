use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use mdcc_core::AttributeSyntax;
use mdcc_core::MdccConfig;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Turn inline component shortcodes in markdown into structured elements.",
	long_about = "mdcc (markdown custom components) finds self-closing shortcodes such as\n\n  \
	              <CustomComponent name=\"button\" {\"type\": \"primary\"} />\n\nin the text of a \
	              markdown document and replaces each one with an element carrying a name and \
	              typed props.\n\nQuick start:\n  mdcc init              Create an mdcc.toml\n  \
	              mdcc scan README.md     List the shortcodes in a file\n  mdcc transform \
	              README.md Print the rewritten tree as JSON"
)]
pub struct MdccCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory to look for `mdcc.toml` in. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Tag identifier given to every replacement element.
	#[arg(long, global = true)]
	pub tag_name: Option<String>,

	/// Directive identifier to search for, e.g. `CustomComponent`.
	#[arg(long, global = true)]
	pub match_name: Option<String>,

	/// Attribute payload syntax.
	#[arg(long, value_enum, global = true)]
	pub syntax: Option<SyntaxArg>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

impl MdccCli {
	/// Layer the command line overrides on top of a loaded config.
	pub fn apply_overrides(&self, mut config: MdccConfig) -> MdccConfig {
		if let Some(tag_name) = &self.tag_name {
			config = config.with_tag_name(tag_name);
		}

		if let Some(match_name) = &self.match_name {
			config = config.with_match_name(match_name);
		}

		if let Some(syntax) = self.syntax {
			config = config.with_syntax(syntax.into());
		}

		config
	}
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `mdcc.toml` in the project directory.
	///
	/// Leaves an existing config file untouched.
	Init,
	/// List every shortcode found in a markdown file.
	///
	/// Prints the line, name and props of each directive without modifying
	/// the file. Exits with an error if a matched JSON payload is invalid.
	Scan {
		/// The markdown file to scan.
		file: PathBuf,

		/// Output format. Use `text` for a human-readable list or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Rewrite the shortcodes in a markdown file and print the resulting
	/// mdast tree as JSON.
	Transform {
		/// The markdown file to transform.
		file: PathBuf,

		/// Print the JSON on a single line.
		#[arg(long, default_value_t = false)]
		compact: bool,
	},
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SyntaxArg {
	/// `name="value"` followed by an optional JSON object.
	Json,
	/// `key="value"`, `key=value` and bare `key` attributes.
	Attributes,
}

impl From<SyntaxArg> for AttributeSyntax {
	fn from(value: SyntaxArg) -> Self {
		match value {
			SyntaxArg::Json => Self::Json,
			SyntaxArg::Attributes => Self::Attributes,
		}
	}
}
