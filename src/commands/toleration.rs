/// `toleration:*` commands: list, set and unset pod tolerations.
use super::{Route, Session, parse_args, submit_config};
use crate::api::{ConfigUpdate, Toleration};
use crate::cli::args::{ListArgs, TolerationSetArgs, TolerationUnsetArgs};
use crate::cli::output::write_json;
use crate::errors::CliError;
use crate::render::{ListFormat, render_tolerations};

/// Run `deis toleration:list`.
///
/// # Errors
///
/// Returns `CliError` on bad arguments, a missing profile, or API failure.
pub fn list(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<ListArgs>(route, argv, session)? else {
        return Ok(());
    };
    let app = session.app(args.app.as_deref())?;
    show(session, &app, ListFormat::from_flags(args.oneline, args.diff))
}

/// Run `deis toleration:set`.
///
/// # Errors
///
/// Returns `CliError::TolerationIdentifierMissing` before any request when
/// no identifier is given, otherwise as [`list`].
pub fn set(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<TolerationSetArgs>(route, argv, session)? else {
        return Ok(());
    };
    let identifier = args
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(CliError::TolerationIdentifierMissing)?;
    let toleration = toleration_from_args(&args);
    let app = session.app(args.target.app.as_deref())?;

    let update = ConfigUpdate::set_toleration(&args.target.proc_type, identifier, toleration);
    submit_config(session, &app, &update, "Creating Tolerations")?;
    show(session, &app, ListFormat::Pretty)
}

/// Run `deis toleration:unset`.
///
/// # Errors
///
/// As [`list`].
pub fn unset(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<TolerationUnsetArgs>(route, argv, session)? else {
        return Ok(());
    };
    let app = session.app(args.target.app.as_deref())?;

    let update = ConfigUpdate::unset_tolerations(&args.target.proc_type, &args.names);
    submit_config(session, &app, &update, "Removing Tolerations")?;
    show(session, &app, ListFormat::Pretty)
}

/// Unset flags stay empty so the controller applies its own defaults.
fn toleration_from_args(args: &TolerationSetArgs) -> Toleration {
    Toleration {
        key: args.key.clone().unwrap_or_default(),
        operator: args.operator.clone().unwrap_or_default(),
        value: args.value.clone().unwrap_or_default(),
        effect: args.effect.clone().unwrap_or_default(),
        toleration_seconds: args.toleration_seconds,
    }
}

fn show(session: &mut Session<'_>, app: &str, format: ListFormat) -> Result<(), CliError> {
    let ctx = session.ctx;
    let config = {
        let _t = ctx.timer("config_list");
        session.controller()?.config_list(app)?
    };

    if ctx.json {
        write_json(&mut *session.out, &config.tolerations)?;
    } else {
        write!(session.out, "{}", render_tolerations(&config.tolerations, format))?;
    }
    Ok(())
}
