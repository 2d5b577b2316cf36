use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mk")]
#[command(about = "Build and release harness for the service-broker repository")]
#[command(version)]
pub struct Args {
    /// Suppress command echo and status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// The closed set of harness operations.
//
// Running with no operation executes the default pipeline
// (gen, fmt, install).
//
// (Plain comment, not a doc comment: clap's derive would otherwise use
// it as the parent command's about text, overriding the explicit
// `about` on `Args`.)
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print build metadata as key=value lines
    Version {
        /// Emit the metadata map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize imports and reformat Go sources in place
    Fmt,
    /// Run go vet over the source trees (advisory)
    Vet,
    /// Run golint over the source trees (advisory)
    Lint,
    /// Run code generation (reserved; currently does nothing)
    Gen,
    /// Cross-compile binaries into dist/
    Build {
        /// Binary to build (all registered binaries if omitted)
        name: Option<String>,
    },
    /// Upload dist/ artifacts to cloud storage
    Push {
        /// Binary whose artifacts to upload (all of dist/ if omitted)
        name: Option<String>,
    },
    /// Publish a registry entry for the current version
    UpdateRegistry,
    /// Compile and install all packages in the repository
    Install,
    /// Install, then run a test suite
    Test {
        /// Test kind: unit or e2e
        kind: String,

        /// Extra arguments forwarded to the test runner
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Re-vendor dependencies
    Revendor,
}
