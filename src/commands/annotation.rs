/// `annotation:*` commands: list, set and unset pod annotations.
use super::{Route, Session, parse_args, submit_config};
use crate::api::ConfigUpdate;
use crate::cli::args::{AnnotationSetArgs, AnnotationUnsetArgs, ListArgs};
use crate::cli::output::write_json;
use crate::errors::CliError;
use crate::parse::parse_key_values;
use crate::render::{ListFormat, render_annotations};

/// Run `deis annotation:list`.
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

/// Run `deis annotation:set`.
///
/// All tokens are validated before anything is sent, so one malformed token
/// aborts the whole update.
///
/// # Errors
///
/// Returns `CliError::Parse` for a malformed `key=value` token, otherwise as
/// [`list`].
pub fn set(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<AnnotationSetArgs>(route, argv, session)? else {
        return Ok(());
    };
    let annotations = parse_key_values(&args.pairs)?;
    let app = session.app(args.target.app.as_deref())?;

    let update = ConfigUpdate::set_annotations(&args.target.proc_type, annotations);
    submit_config(session, &app, &update, "Creating Annotations")?;
    show(session, &app, ListFormat::Pretty)
}

/// Run `deis annotation:unset`.
///
/// # Errors
///
/// As [`list`].
pub fn unset(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<AnnotationUnsetArgs>(route, argv, session)? else {
        return Ok(());
    };
    let app = session.app(args.target.app.as_deref())?;

    let update = ConfigUpdate::unset_annotations(&args.target.proc_type, &args.keys);
    submit_config(session, &app, &update, "Removing Annotations")?;
    show(session, &app, ListFormat::Pretty)
}

fn show(session: &mut Session<'_>, app: &str, format: ListFormat) -> Result<(), CliError> {
    let ctx = session.ctx;
    let config = {
        let _t = ctx.timer("config_list");
        session.controller()?.config_list(app)?
    };
    let annotations = config.annotation_set()?;

    if ctx.json {
        write_json(&mut *session.out, &annotations)?;
    } else {
        write!(session.out, "{}", render_annotations(&annotations, format))?;
    }
    Ok(())
}
