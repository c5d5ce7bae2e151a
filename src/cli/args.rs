/// CLI argument definitions via clap derive.
///
/// `Cli` only holds the global flags; everything after the command name is
/// handed to the route table in `commands`, which parses it with the
/// per-command structs below.
use clap::{Args, Parser};

/// deis: manage Deis Workflow applications from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "deis",
    about = "Manage annotations, tolerations and builds of Deis Workflow apps",
    version
)]
pub struct Cli {
    /// Client profile name, or path to a profile file. Defaults to
    /// $DEIS_PROFILE, then `client`.
    #[arg(short = 'c', long, value_name = "PROFILE")]
    pub config: Option<String>,

    /// Print results and errors as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log controller requests and timings to stderr.
    #[arg(long)]
    pub debug: bool,

    /// Never show the progress indicator.
    #[arg(long)]
    pub no_progress: bool,

    /// Command followed by its arguments, e.g. `annotation:list -a myapp`.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Application and process type targeted by a write.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// The uniquely identifiable name for the application.
    #[arg(short, long, value_name = "APP")]
    pub app: Option<String>,

    /// The process type as defined in your Procfile, such as 'web' or 'worker'.
    /// Dockerfile apps have a default 'cmd' process type.
    #[arg(short = 't', long = "type", value_name = "APP_TYPE", default_value = "cmd")]
    pub proc_type: String,
}

/// Arguments for `annotation:list` and `toleration:list`.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// The uniquely identifiable name of the application.
    #[arg(short, long, value_name = "APP")]
    pub app: Option<String>,

    /// Print output on one line per process type.
    #[arg(long)]
    pub oneline: bool,

    /// Print one `key=value` line per entry, grouped by process type.
    #[arg(long, conflicts_with = "oneline")]
    pub diff: bool,
}

/// Arguments for `annotation:set`.
#[derive(Debug, Parser)]
pub struct AnnotationSetArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Annotations to set, as `key=value`. Tokens starting with `#` are ignored.
    #[arg(value_name = "KEY=VALUE", required = true)]
    pub pairs: Vec<String>,
}

/// Arguments for `annotation:unset`.
#[derive(Debug, Parser)]
pub struct AnnotationUnsetArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// The annotations to remove from the application's pods.
    #[arg(value_name = "KEY", required = true)]
    pub keys: Vec<String>,
}

/// Arguments for `toleration:set`.
#[derive(Debug, Parser)]
pub struct TolerationSetArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// A unique identifier for this toleration.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// The key to check in this toleration.
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// The value of the key to check. If not set, will match any value.
    #[arg(long, value_name = "VALUE")]
    pub value: Option<String>,

    /// The operator used to compare the key's value. Default: Equal.
    #[arg(long, value_name = "OPERATOR")]
    pub operator: Option<String>,

    /// The effect that should happen on a toleration match. Default: NoSchedule.
    #[arg(long, value_name = "EFFECT")]
    pub effect: Option<String>,

    /// Seconds to wait before evicting a running pod from a newly tainted node.
    #[arg(long, value_name = "SECONDS")]
    pub toleration_seconds: Option<i64>,
}

/// Arguments for `toleration:unset`.
#[derive(Debug, Parser)]
pub struct TolerationUnsetArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Identifiers of the tolerations to remove.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

/// Arguments for `builds:list`.
#[derive(Debug, Parser)]
pub struct BuildsListArgs {
    /// The uniquely identifiable name for the application.
    #[arg(short, long, value_name = "APP")]
    pub app: Option<String>,

    /// The maximum number of builds to show. Defaults to the profile's
    /// response limit.
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u32>,
}

/// Arguments for `builds:create`.
#[derive(Debug, Parser)]
pub struct BuildsCreateArgs {
    /// A fully-qualified docker image, on Docker Hub or a private registry.
    #[arg(value_name = "IMAGE")]
    pub image: String,

    /// The uniquely identifiable name for the application.
    #[arg(short, long, value_name = "APP")]
    pub app: Option<String>,

    /// Inline Procfile YAML. Defaults to ./Procfile when present.
    #[arg(long, value_name = "YAML", allow_hyphen_values = true)]
    pub procfile: Option<String>,

    /// Inline Sidecarfile YAML. Defaults to ./Sidecarfile when present.
    #[arg(long, value_name = "YAML", allow_hyphen_values = true)]
    pub sidecarfile: Option<String>,
}
