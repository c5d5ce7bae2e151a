//! Command dispatch.
//!
//! Routing is a declarative table: each [`Route`] names a subcommand, its
//! one-line description (used for topic usage), its help text, and its
//! handler. A bare topic such as `annotation` runs `annotation:list`; an
//! unrecognized command prints the general usage and succeeds.

pub mod annotation;
pub mod builds;
pub mod toleration;

use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;

use crate::api::{ConfigUpdate, Controller, HttpController};
use crate::cli::{OutputCtx, with_progress};
use crate::errors::CliError;
use crate::settings::{self, DEFAULT_LIMIT, Settings};

/// Handler of one subcommand. `argv[0]` is the subcommand name.
pub type Handler = fn(&Route, &[String], &mut Session<'_>) -> Result<(), CliError>;

/// One entry of the routing table.
pub struct Route {
    pub name: &'static str,
    /// Short description shown in usage listings.
    pub about: &'static str,
    /// Description shown by `deis help <name>`.
    pub help: &'static str,
    pub run: Handler,
}

/// Every subcommand the client knows.
pub static ROUTES: &[Route] = &[
    Route {
        name: "annotation:list",
        about: "list annotations for an app",
        help: "Lists annotations for the pods of an application.",
        run: annotation::list,
    },
    Route {
        name: "annotation:set",
        about: "set annotations for an app",
        help: "Sets annotations for the pods of an application.",
        run: annotation::set,
    },
    Route {
        name: "annotation:unset",
        about: "unset annotations for an app",
        help: "Unsets annotations for the pods of an application.",
        run: annotation::unset,
    },
    Route {
        name: "toleration:list",
        about: "list tolerations for an app",
        help: "Lists tolerations for the pods of an application.",
        run: toleration::list,
    },
    Route {
        name: "toleration:set",
        about: "set a toleration for an app",
        help: "Sets a toleration for the pods of an application. See \
               https://kubernetes.io/docs/concepts/configuration/taint-and-toleration/",
        run: toleration::set,
    },
    Route {
        name: "toleration:unset",
        about: "unset tolerations for an app",
        help: "Unsets tolerations for the pods of an application.",
        run: toleration::unset,
    },
    Route {
        name: "builds:list",
        about: "list build history for an app",
        help: "Lists build history for an application.",
        run: builds::list,
    },
    Route {
        name: "builds:create",
        about: "imports an image and deploys as a new release",
        help: "Creates a new build of an application from a docker image.",
        run: builds::create,
    },
];

/// Width of the command column in usage listings.
const USAGE_COLUMN: usize = 23;

/// State shared by the handlers of one invocation: output sink, output
/// options, and a controller connected on first use.
pub struct Session<'a> {
    pub ctx: &'a OutputCtx,
    pub out: &'a mut dyn Write,
    profile: Option<String>,
    controller: Option<Box<dyn Controller + 'a>>,
    limit: u32,
    detect_app: fn() -> Option<String>,
}

impl<'a> Session<'a> {
    /// A session that loads `profile` and connects when a command first
    /// needs the controller.
    pub fn new(ctx: &'a OutputCtx, out: &'a mut dyn Write, profile: Option<String>) -> Self {
        Self {
            ctx,
            out,
            profile,
            controller: None,
            limit: DEFAULT_LIMIT,
            detect_app: settings::detect_app,
        }
    }

    /// A session bound to an already constructed controller.
    #[cfg(test)]
    pub fn with_controller(
        ctx: &'a OutputCtx,
        out: &'a mut dyn Write,
        controller: Box<dyn Controller + 'a>,
    ) -> Self {
        Self {
            ctx,
            out,
            profile: None,
            controller: Some(controller),
            limit: DEFAULT_LIMIT,
            detect_app: || None,
        }
    }

    /// The controller, connecting from the client profile if needed.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the profile is missing or malformed.
    pub fn controller(&mut self) -> Result<&dyn Controller, CliError> {
        let controller = match self.controller.take() {
            Some(controller) => controller,
            None => self.connect()?,
        };
        Ok(&**self.controller.insert(controller))
    }

    fn connect(&mut self) -> Result<Box<dyn Controller + 'a>, CliError> {
        let path = settings::profile_path(self.profile.as_deref())?;
        let settings = Settings::load(&path)?;
        tracing::debug!(
            controller = %settings.controller,
            user = %settings.username,
            "connecting"
        );
        self.limit = settings.limit();
        Ok(Box::new(HttpController::new(&settings)?))
    }

    /// Page size for list commands, from the profile once connected.
    #[must_use]
    pub fn default_limit(&self) -> u32 {
        self.limit
    }

    /// Resolve the target app from `-a` or the `deis` git remote.
    ///
    /// # Errors
    ///
    /// Returns `CliError::AppNotSpecified` when neither is available.
    pub fn app(&self, explicit: Option<&str>) -> Result<String, CliError> {
        explicit
            .filter(|app| !app.is_empty())
            .map(str::to_owned)
            .or_else(self.detect_app)
            .ok_or(CliError::AppNotSpecified)
    }
}

/// Route `argv` to its handler.
///
/// # Errors
///
/// Returns whatever the selected handler returns. Unknown commands are not
/// an error.
pub fn dispatch(argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(name) = argv.first() else {
        return write_usage(session);
    };

    if let Some(route) = find_route(name) {
        tracing::debug!(command = route.name, "dispatch");
        return (route.run)(route, argv, session);
    }

    if name == "help" {
        return help(&argv[1..], session);
    }

    if is_topic(name) {
        if argv.iter().any(|a| a == "-h" || a == "--help") {
            write!(session.out, "{}", topic_usage(name))?;
            return Ok(());
        }
        if let Some(route) = find_route(&format!("{name}:list")) {
            let mut forwarded = argv.to_vec();
            forwarded[0] = route.name.to_owned();
            return (route.run)(route, &forwarded, session);
        }
    }

    tracing::debug!(command = %name, "unrecognized command");
    write_usage(session)
}

fn help(args: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    match args.first() {
        Some(name) if is_topic(name) => {
            write!(session.out, "{}", topic_usage(name))?;
            Ok(())
        }
        Some(name) if find_route(name).is_some() => {
            dispatch(&[name.clone(), "--help".to_owned()], session)
        }
        _ => write_usage(session),
    }
}

fn find_route(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

fn topic_of(name: &str) -> &str {
    name.split_once(':').map_or(name, |(topic, _)| topic)
}

fn is_topic(name: &str) -> bool {
    !name.contains(':') && ROUTES.iter().any(|r| topic_of(r.name) == name)
}

/// Usage listing for one topic, generated from the routing table.
#[must_use]
pub fn topic_usage(topic: &str) -> String {
    let mut usage = format!("\nValid commands for {topic}:\n\n");
    for route in ROUTES.iter().filter(|r| topic_of(r.name) == topic) {
        usage.push_str(&format!("{:<USAGE_COLUMN$}{}\n", route.name, route.about));
    }
    usage.push_str("\nUse 'deis help [command]' to learn more.\n");
    usage
}

fn write_usage(session: &mut Session<'_>) -> Result<(), CliError> {
    let out = &mut *session.out;
    writeln!(
        out,
        "Usage: deis [-c <profile>] [--json] [--debug] [--no-progress] <command> [<args>...]"
    )?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out)?;
    for route in ROUTES {
        writeln!(out, "{:<USAGE_COLUMN$}{}", route.name, route.about)?;
    }
    writeln!(out)?;
    writeln!(out, "Use 'deis help [command]' to learn more.")?;
    Ok(())
}

/// Parse a handler's arguments with clap. Returns `None` when help was
/// requested and has already been printed.
fn parse_args<T: Parser>(
    route: &Route,
    argv: &[String],
    session: &mut Session<'_>,
) -> Result<Option<T>, CliError> {
    let command = T::command()
        .name(route.name)
        .bin_name(format!("deis {}", route.name))
        .about(route.help);
    match command.try_get_matches_from(argv) {
        Ok(matches) => Ok(Some(T::from_arg_matches(&matches)?)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(session.out, "{}", err.render())?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Submit a partial config update, framed by `<action>... done`.
///
/// The profile is loaded before anything is printed, so a missing login
/// fails without a dangling progress line.
fn submit_config(
    session: &mut Session<'_>,
    app: &str,
    update: &ConfigUpdate,
    action: &str,
) -> Result<(), CliError> {
    let ctx = session.ctx;
    session.controller()?;

    if !ctx.json {
        write!(session.out, "{action}... ")?;
        session.out.flush()?;
    }

    let controller = session.controller()?;
    let timer = ctx.timer("config_set");
    with_progress(ctx.show_progress(), || controller.config_set(app, update))?;
    drop(timer);

    if !ctx.json {
        write!(session.out, "done\n\n")?;
    }
    Ok(())
}

/// Dispatch `argv` against `controller`, capturing everything written to stdout.
#[cfg(test)]
pub(crate) fn run_captured(
    ctx: &OutputCtx,
    argv: &[&str],
    controller: &dyn Controller,
) -> (Result<(), CliError>, String) {
    let mut out = Vec::new();
    let result = {
        let mut session = Session::with_controller(ctx, &mut out, Box::new(controller));
        let argv: Vec<String> = argv.iter().map(|s| (*s).to_owned()).collect();
        dispatch(&argv, &mut session)
    };
    (result, String::from_utf8(out).unwrap_or_default())
}
