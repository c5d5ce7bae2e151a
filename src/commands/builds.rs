/// `builds:*` commands: list builds and create one from an image.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Route, Session, parse_args};
use crate::api::{Build, CreateBuildRequest, Page};
use crate::cli::args::{BuildsCreateArgs, BuildsListArgs};
use crate::cli::output::write_json;
use crate::cli::with_progress;
use crate::errors::CliError;
use crate::parse::{parse_procfile, parse_sidecarfile};

const PROCFILE: &str = "Procfile";
const SIDECARFILE: &str = "Sidecarfile";

/// Run `deis builds:list`.
///
/// # Errors
///
/// Returns `CliError` on bad arguments, a missing profile, or API failure.
pub fn list(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<BuildsListArgs>(route, argv, session)? else {
        return Ok(());
    };
    let app = session.app(args.app.as_deref())?;
    let ctx = session.ctx;

    // Connecting loads the profile's page size.
    session.controller()?;
    let limit = args.limit.unwrap_or_else(|| session.default_limit());
    let page = {
        let _t = ctx.timer("builds_list");
        session.controller()?.builds_list(&app, limit)?
    };

    if ctx.json {
        write_json(&mut *session.out, &page)?;
        return Ok(());
    }
    writeln!(session.out, "=== {app} Builds{}", limit_count(&page))?;
    for build in &page.results {
        writeln!(session.out, "{} {}", build.uuid, build.created)?;
    }
    Ok(())
}

/// Run `deis builds:create`.
///
/// # Errors
///
/// Returns `CliError::Parse` for malformed manifests and `CliError::ReadManifest`
/// when a local manifest exists but cannot be read.
pub fn create(route: &Route, argv: &[String], session: &mut Session<'_>) -> Result<(), CliError> {
    let Some(args) = parse_args::<BuildsCreateArgs>(route, argv, session)? else {
        return Ok(());
    };
    let app = session.app(args.app.as_deref())?;
    let request = build_request(&args, Path::new("."))?;
    let ctx = session.ctx;

    session.controller()?;
    if !ctx.json {
        write!(session.out, "Creating build... ")?;
        session.out.flush()?;
    }
    let build = {
        let controller = session.controller()?;
        with_progress(ctx.show_progress(), || controller.builds_create(&app, &request))?
    };

    if ctx.json {
        write_json(&mut *session.out, &build)?;
    } else {
        writeln!(session.out, "done")?;
    }
    Ok(())
}

/// ` (<shown> of <total>)` when the controller holds more than one page.
fn limit_count(page: &Page<Build>) -> String {
    let shown = page.results.len();
    if u64::try_from(shown).is_ok_and(|shown| shown < page.count) {
        format!(" ({shown} of {})", page.count)
    } else {
        String::new()
    }
}

/// Inline YAML wins over `Procfile` and `Sidecarfile` found in `dir`.
fn build_request(args: &BuildsCreateArgs, dir: &Path) -> Result<CreateBuildRequest, CliError> {
    let procfile = match &args.procfile {
        Some(yaml) => Some(yaml.clone()),
        None => read_optional(&dir.join(PROCFILE))?,
    };
    let sidecarfile = match &args.sidecarfile {
        Some(yaml) => Some(yaml.clone()),
        None => read_optional(&dir.join(SIDECARFILE))?,
    };

    Ok(CreateBuildRequest {
        image: args.image.clone(),
        procfile: procfile.as_deref().map(parse_procfile).transpose()?.unwrap_or_default(),
        sidecarfile: sidecarfile
            .as_deref()
            .map(parse_sidecarfile)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, CliError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "read manifest");
            Ok(Some(content))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CliError::ReadManifest {
            path: PathBuf::from(path),
            source,
        }),
    }
}
