use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use csscope_cli::Commands;
use csscope_cli::CsscopeCli;
use csscope_cli::OptionOverrides;
use csscope_cli::OutputFormat;
use csscope_core::CsscopeConfig;
use csscope_core::LocalizeOptions;
use csscope_core::ScopeWarning;
use csscope_core::ScopeWarningKind;
use csscope_core::is_build_artifact;
use csscope_core::project::BuildResult;
use csscope_core::project::collect_markup_files;
use csscope_core::project::compute_builds;
use csscope_core::project::write_builds;
use owo_colors::OwoColorize;
use serde::Serialize;
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
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
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

const SAMPLE_CONFIG: &str = r#"# csscope configuration

# Number of characters in each generated salt.
# salt_length = 4

# Marker inserted before the extension of build artifacts.
# post_fix = ".build"

# File name suffixes that identify markup templates.
# markup_extensions = [".html"]

# Root that include paths are appended to. When unset, includes resolve
# next to each template.
# include_path = "styles/"

# Wrap scoped names written into markup in double quotes.
# quote_class_values = false

# Fixed seed for reproducible salts.
# seed = 42

# Gitignore-style patterns skipped while walking the project.
# [exclude]
# patterns = ["dist/"]
"#;

fn main() {
	let args = CsscopeCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

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

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Build {
			overrides,
			dry_run,
			watch,
			format,
		}) => run_build(&args, overrides, *dry_run, *watch, *format),
		Some(Commands::List { overrides, format }) => run_list(&args, overrides, *format),
		None => {
			eprintln!("No subcommand specified. Run `csscope --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		print_error(e);
		process::exit(2);
	}
}

/// Log engine events to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let fallback = if verbose {
		"csscope_core=debug"
	} else {
		"csscope_core=error"
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn print_error(e: Box<dyn std::error::Error>) {
	// Try to render through miette for rich diagnostics with help text
	// and error codes.
	match e.downcast::<csscope_core::CsscopeError>() {
		Ok(csscope_err) => {
			let report: miette::Report = (*csscope_err).into();
			eprintln!("{report:?}");
		}
		Err(e) => {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn resolve_root(args: &CsscopeCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// The directory holding the config file. A single-file root uses its
/// parent directory.
fn project_dir(root: &Path) -> &Path {
	if root.is_file() {
		root.parent().unwrap_or(root)
	} else {
		root
	}
}

/// Layer defaults, the discovered config file and command line overrides.
fn resolve_options(
	root: &Path,
	overrides: &OptionOverrides,
) -> Result<LocalizeOptions, Box<dyn std::error::Error>> {
	let config = CsscopeConfig::load(project_dir(root))?;
	let mut options = LocalizeOptions::from_config(config.as_ref());
	overrides.apply(&mut options);
	options.validate()?;
	Ok(options)
}

fn run_init(args: &CsscopeCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = CsscopeConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("csscope.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Start a template with `{{include styles.css}}`");
	println!("  2. Mark classes as `class={{card}}`");
	println!("  3. Run `csscope build` to write the scoped build artifacts");

	Ok(())
}

fn run_build(
	args: &CsscopeCli,
	overrides: &OptionOverrides,
	dry_run: bool,
	watch: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	// Run the initial build.
	run_build_once(args, overrides, dry_run, format)?;

	if !watch || dry_run {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = resolve_root(args);
	let post_fix = resolve_options(&root, overrides)?.post_fix;
	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				// Writing the build artifacts must not trigger another build.
				let is_source_change = matches!(
					event.kind,
					notify::EventKind::Modify(_)
						| notify::EventKind::Create(_)
						| notify::EventKind::Remove(_)
				) && event
					.paths
					.iter()
					.any(|path| !is_build_artifact(path, &post_fix));

				if is_source_change {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, rebuilding...");
		if let Err(e) = run_build_once(args, overrides, false, format) {
			print_error(e);
		}
	}
}

fn run_build_once(
	args: &CsscopeCli,
	overrides: &OptionOverrides,
	dry_run: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let options = resolve_options(&root, overrides)?;
	let result = compute_builds(&root, &options)?;

	if !dry_run {
		write_builds(&result)?;
	}

	let display_root = project_dir(&root);

	if let OutputFormat::Json = format {
		let report = BuildReport::new(&result, display_root, dry_run);
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	// Warnings never change the exit code.
	print_warnings(&result, display_root);

	if result.documents.is_empty() {
		println!("No markup templates found.");
		return Ok(());
	}

	if dry_run {
		let paths = result.output_paths();
		println!("Dry run: would write {} file(s):", paths.len());
		for path in paths {
			println!("  {}", make_relative(path, display_root));
		}
		return Ok(());
	}

	println!(
		"{} {} class(es) in {} template(s).",
		colored!("Scoped", green),
		result.class_count(),
		result.documents.len()
	);

	if args.verbose {
		for document in &result.documents {
			println!(
				"  {} {}",
				make_relative(&document.markup_output, display_root),
				make_relative(&document.style_output, display_root)
			);
			for class in &document.classes {
				println!("    {} → {}", class.class, class.scoped_name);
			}
		}
	}

	Ok(())
}

fn run_list(
	args: &CsscopeCli,
	overrides: &OptionOverrides,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let options = resolve_options(&root, overrides)?;
	let files = collect_markup_files(&root, &options)?;
	let display_root = project_dir(&root);
	let relative: Vec<String> = files
		.iter()
		.map(|file| make_relative(file, display_root))
		.collect();

	if let OutputFormat::Json = format {
		println!("{}", serde_json::to_string_pretty(&relative)?);
		return Ok(());
	}

	if relative.is_empty() {
		println!("No markup templates found.");
		return Ok(());
	}

	println!("{}", colored!("Templates:", bold));
	for file in &relative {
		println!("  {file}");
	}
	println!();
	println!("{} template(s)", relative.len());

	Ok(())
}

#[derive(Serialize)]
struct BuildReport {
	dry_run: bool,
	documents: Vec<DocumentReport>,
	warnings: Vec<WarningReport>,
}

#[derive(Serialize)]
struct DocumentReport {
	markup: String,
	markup_output: String,
	style: String,
	style_output: String,
	namespace: String,
	classes: Vec<ClassReport>,
}

#[derive(Serialize)]
struct ClassReport {
	class: String,
	scoped_name: String,
	selector_renamed: bool,
}

#[derive(Serialize)]
struct WarningReport {
	file: String,
	line: usize,
	column: usize,
	code: &'static str,
	message: String,
}

impl BuildReport {
	fn new(result: &BuildResult, root: &Path, dry_run: bool) -> Self {
		let documents = result
			.documents
			.iter()
			.map(|document| {
				DocumentReport {
					markup: make_relative(&document.markup_path, root),
					markup_output: make_relative(&document.markup_output, root),
					style: make_relative(&document.style_path, root),
					style_output: make_relative(&document.style_output, root),
					namespace: document.namespace.clone(),
					classes: document
						.classes
						.iter()
						.map(|class| {
							ClassReport {
								class: class.class.clone(),
								scoped_name: class.scoped_name.clone(),
								selector_renamed: class.selector_renamed,
							}
						})
						.collect(),
				}
			})
			.collect();
		let warnings = result
			.all_warnings()
			.map(|warning| {
				WarningReport {
					file: make_relative(&warning.file, root),
					line: warning.line,
					column: warning.column,
					code: warning.code(),
					message: warning.message(),
				}
			})
			.collect();

		Self {
			dry_run,
			documents,
			warnings,
		}
	}
}

fn print_warnings(result: &BuildResult, root: &Path) {
	for warning in result.all_warnings() {
		let rel = make_relative(&warning.file, root);
		let report = warning_to_report(warning, &rel);
		eprintln!("{report:?}");
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

/// Convert a `ScopeWarning` into a `miette::Report` with warning severity,
/// error code, and help text for rich terminal display.
fn warning_to_report(warning: &ScopeWarning, rel_path: &str) -> miette::Report {
	let location = format!("{rel_path}:{}:{}", warning.line, warning.column);
	let message = format!("[{location}] {}", warning.message());
	let help = match &warning.kind {
		ScopeWarningKind::UnresolvedSelector { class } => {
			format!("add a `.{class}` rule to the included stylesheet or remove the tag")
		}
		ScopeWarningKind::DuplicateClass { .. } => {
			"each occurrence gets its own salt and renames the next remaining `.class` selector; \
			 add a selector per occurrence or give repeated elements distinct class tags"
				.to_string()
		}
		ScopeWarningKind::SharedStylesheet { .. } => {
			"give each template its own stylesheet so the build artifacts do not collide"
				.to_string()
		}
		_ => warning.message(),
	};

	let diag_value = miette::MietteDiagnostic::new(message)
		.with_code(warning.code())
		.with_help(help)
		.with_severity(miette::Severity::Warning);
	miette::Report::new(diag_value)
}
