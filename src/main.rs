use anyhow::Result;
use clap::Parser;

use mk_cli::cli::commands::{build, install, push, quality, revendor, test, version};
use mk_cli::cli::{Args, Command};
use mk_cli::config::Settings;
use mk_cli::exec::ToolFailure;
use mk_cli::output::{self, OutputConfig};
use mk_cli::ui::Style;

fn main() {
    let args = Args::parse();
    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
    });

    if let Err(err) = run(args) {
        eprintln!("{} {err:#}", Style::error("error:"));
        // A failing abort-on-failure step exits with the child's own code.
        let code = err
            .downcast_ref::<ToolFailure>()
            .map_or(exitcode::SOFTWARE, |failure| failure.code);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::from_environment();

    match args.command {
        Some(Command::Version { json }) => version::run_version(&settings, json),
        Some(Command::Fmt) => quality::run_fmt(&settings),
        Some(Command::Vet) => quality::run_vet(&settings),
        Some(Command::Lint) => quality::run_lint(&settings),
        Some(Command::Gen) => {
            build::run_gen();
            Ok(())
        }
        Some(Command::Build { name }) => build::run_build(&settings, name.as_deref()),
        Some(Command::Push { name }) => push::run_push(&settings, name.as_deref()),
        Some(Command::UpdateRegistry) => push::run_update_registry(&settings),
        Some(Command::Install) => install::run_install(&settings),
        Some(Command::Test { kind, args }) => test::run_test(&settings, &kind, &args),
        Some(Command::Revendor) => revendor::run_revendor(&settings),
        None => {
            // Default pipeline: gen, fmt, install.
            build::run_gen();
            quality::run_fmt(&settings)?;
            install::run_install(&settings)
        }
    }
}
