use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use csscope_core::LocalizeOptions;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Scope CSS class names used in markup templates.",
	long_about = "csscope rewrites the class tags in markup templates into collision-resistant \
	              scoped names and renames the matching selectors in the paired stylesheet.\n\nA \
	              template starts with `{include styles.css}` and marks classes as `{name}`. \
	              Results are written next to the sources as build artifacts \
	              (`index.html` → `index.build.html`).\n\nQuick start:\n  csscope init   Create \
	              a csscope.toml\n  csscope list   Show the templates that would be built\n  \
	              csscope build  Write the build artifacts"
)]
pub struct CsscopeCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the directory (or single markup file) to process.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `csscope.toml` in the project root.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Localize every markup template and write the build artifacts.
	///
	/// Each template's first tag must be `{include <stylesheet>}`. Every other
	/// `{class}` tag is replaced with `{namespace}__{class}__{salt}` and the
	/// first matching `.class` selector in the stylesheet is renamed to match.
	/// Both files are written with the postfix inserted before their
	/// extension. Nothing is written if any template fails.
	Build {
		#[command(flatten)]
		overrides: OptionOverrides,

		/// Compute everything but only print the files that would be written.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Watch for file changes and rebuild automatically. Changes to build
		/// artifacts are ignored.
		#[arg(long, default_value_t = false)]
		watch: bool,

		/// Output format for the build summary.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the markup templates that `build` would process.
	List {
		#[command(flatten)]
		overrides: OptionOverrides,

		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

/// Command line overrides for values otherwise taken from `csscope.toml`.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionOverrides {
	/// Number of characters in each generated salt.
	#[arg(long)]
	pub salt_length: Option<usize>,

	/// Marker inserted before the extension of build artifacts.
	#[arg(long)]
	pub post_fix: Option<String>,

	/// Extension identifying markup files. Repeat to accept several; replaces
	/// the configured list.
	#[arg(long = "ext", value_name = "EXTENSION")]
	pub markup_extensions: Vec<String>,

	/// Root that include paths are appended to, instead of resolving them
	/// next to each template.
	#[arg(long)]
	pub include_path: Option<PathBuf>,

	/// Wrap scoped names written into markup in double quotes.
	#[arg(long, default_value_t = false)]
	pub quote: bool,

	/// Seed salt generation so repeated builds produce identical output.
	#[arg(long)]
	pub seed: Option<u64>,

	/// Gitignore-style pattern to skip. Repeat to add several.
	#[arg(long, value_name = "PATTERN")]
	pub exclude: Vec<String>,
}

impl OptionOverrides {
	/// Layer these overrides on top of `options`.
	pub fn apply(&self, options: &mut LocalizeOptions) {
		if let Some(salt_length) = self.salt_length {
			options.salt_length = salt_length;
		}
		if let Some(post_fix) = &self.post_fix {
			options.post_fix.clone_from(post_fix);
		}
		if !self.markup_extensions.is_empty() {
			options
				.markup_extensions
				.clone_from(&self.markup_extensions);
		}
		if self.include_path.is_some() {
			options.include_path.clone_from(&self.include_path);
		}
		if self.quote {
			options.quote_class_values = true;
		}
		if self.seed.is_some() {
			options.seed = self.seed;
		}
		options
			.exclude_patterns
			.extend(self.exclude.iter().cloned());
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
