use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdcc_cli::Commands;
use mdcc_cli::MdccCli;
use mdcc_cli::OutputFormat;
use mdcc_core::MdccConfig;
use mdcc_core::Rewriter;
use mdcc_core::collect_components;
use mdcc_core::parse_markdown;
use mdcc_core::transform;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,cyan) => {
		if color_enabled() {
			format!("{}", $text.cyan())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = "# mdcc configuration\n\n# Tag identifier given to every replacement \
                             element.\ntag_name = \"custom-component\"\n\n# Directive identifier \
                             to search for in text, e.g. <CustomComponent ... />.\nmatch_name = \
                             \"CustomComponent\"\n\n# Attribute syntax: \"json\" for `name=\"x\" \
                             {...}` or \"attributes\" for `key=\"value\" flag`.\nsyntax = \
                             \"json\"\n";

fn main() {
	let args = MdccCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Scan { file, format }) => run_scan(&args, file, *format),
		Some(Commands::Transform { file, compact }) => run_transform(&args, file, *compact),
		None => {
			eprintln!("No subcommand specified. Run `mdcc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<mdcc_core::MdccError>() {
			Ok(mdcc_err) => {
				let report: miette::Report = (*mdcc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so they never mix with JSON on stdout. `RUST_LOG` wins
/// over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &MdccCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_rewriter(args: &MdccCli) -> Result<Rewriter, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = MdccConfig::load(&root)?.unwrap_or_default();
	let config = args.apply_overrides(config);
	tracing::debug!(
		tag_name = %config.tag_name,
		match_name = %config.match_name,
		syntax = %config.syntax,
		"resolved config"
	);

	Ok(Rewriter::new(config))
}

fn read_markdown(file: &Path) -> Result<String, Box<dyn std::error::Error>> {
	let content = std::fs::read_to_string(file).map_err(mdcc_core::MdccError::from)?;
	Ok(content)
}

fn run_init(args: &MdccCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = MdccConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("mdcc.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());

	Ok(())
}

fn run_scan(
	args: &MdccCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let rewriter = load_rewriter(args)?;
	let content = read_markdown(file)?;
	let tree = parse_markdown(&content)?;
	let found = collect_components(&tree, &rewriter)?;

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&found)?);
		}
		OutputFormat::Text => {
			if found.is_empty() {
				println!("No components found in {}", file.display());
				return Ok(());
			}

			for item in &found {
				let location = match item.line {
					Some(line) => format!("{}:{line}", file.display()),
					None => file.display().to_string(),
				};
				let props = serde_json::to_string(&item.component.props)?;
				println!(
					"{} {} {}",
					colored!(location, dimmed),
					colored!(item.component.name, cyan),
					props
				);
			}

			println!();
			println!(
				"{}",
				colored!(format!("{} component(s) found", found.len()), bold)
			);
		}
	}

	Ok(())
}

fn run_transform(
	args: &MdccCli,
	file: &Path,
	compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let rewriter = load_rewriter(args)?;
	let content = read_markdown(file)?;
	let mut tree = parse_markdown(&content)?;
	let summary = transform(&mut tree, &rewriter)?;
	tracing::info!(
		components = summary.components,
		nodes_rewritten = summary.nodes_rewritten,
		"transformed {}",
		file.display()
	);

	let output = if compact {
		serde_json::to_string(&tree)?
	} else {
		serde_json::to_string_pretty(&tree)?
	};
	println!("{output}");

	Ok(())
}
