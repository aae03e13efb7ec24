// SPDX-License-Identifier: MPL-2.0
//! Command-line flags and commands.

use crate::application::query::ViewerEvent;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
folio_lens - inspect portfolio galleries

USAGE:
    folio_lens [FLAGS] <COMMAND> [ARGS]

FLAGS:
    --config-dir <dir>   Directory holding settings.toml and layouts.toml
    --export <file>      Read projects from a JSON export instead of the CMS
    -v, --verbose        Log at debug level
    -h, --help           Print this help

COMMANDS:
    classify <project>                     Classify every gallery asset
    plan <project> <sub-project>           Show the resolved layout
    walk <project> <sub-project> [steps]   Drive the viewer over the first
                                           sequential section; steps are
                                           next, prev, open[=N], lnext,
                                           lprev, close
    embed <url>                            Print the embeddable player URL
";

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FOLIO_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Offline content export to read instead of querying the CMS.
    pub export: Option<PathBuf>,
    pub verbose: bool,
}

/// One step of a `walk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    Event(ViewerEvent),
    /// Open the lightbox on the asset the main viewer shows.
    OpenCurrent,
}

impl WalkStep {
    /// Parses `next`, `prev`, `open`, `open=N`, `lnext`, `lprev` or `close`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] for anything else.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        let step = match raw.as_str() {
            "next" => WalkStep::Event(ViewerEvent::Next),
            "prev" | "previous" => WalkStep::Event(ViewerEvent::Previous),
            "open" => WalkStep::OpenCurrent,
            "lnext" => WalkStep::Event(ViewerEvent::LightboxNext),
            "lprev" => WalkStep::Event(ViewerEvent::LightboxPrevious),
            "close" => WalkStep::Event(ViewerEvent::CloseLightbox),
            other => {
                let index = other
                    .strip_prefix("open=")
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| Error::Usage(format!("unknown walk step: {other}")))?;
                WalkStep::Event(ViewerEvent::OpenLightbox(index))
            }
        };
        Ok(step)
    }
}

/// What to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Classify {
        project: String,
    },
    Plan {
        project: String,
        sub_project: String,
    },
    Walk {
        project: String,
        sub_project: String,
        steps: Vec<WalkStep>,
    },
    Embed {
        url: String,
    },
    Help,
}

impl Command {
    /// Whether the command reads CMS content.
    #[must_use]
    pub fn needs_content(&self) -> bool {
        matches!(
            self,
            Command::Classify { .. } | Command::Plan { .. } | Command::Walk { .. }
        )
    }
}

/// Parses process arguments.
///
/// # Errors
///
/// Returns [`Error::Usage`] on unknown commands, missing operands or
/// malformed flag values.
pub fn parse_args(mut args: pico_args::Arguments) -> Result<(Flags, Command)> {
    let help = args.contains(["-h", "--help"]);
    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        export: args.opt_value_from_os_str("--export", |s| {
            Ok::<PathBuf, std::convert::Infallible>(PathBuf::from(s))
        })?,
        verbose: args.contains(["-v", "--verbose"]),
    };

    let rest: Vec<String> = args
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| Error::Usage(format!("argument is not UTF-8: {raw:?}")))
        })
        .collect::<Result<_>>()?;

    if help {
        return Ok((flags, Command::Help));
    }
    if let Some(flag) = rest.iter().find(|arg| arg.starts_with('-')) {
        return Err(Error::Usage(format!("unknown flag: {flag}")));
    }

    let mut rest = rest.into_iter();
    let mut operand = |name: &str| {
        rest.next()
            .ok_or_else(|| Error::Usage(format!("missing <{name}>")))
    };

    let command = match operand("command")?.as_str() {
        "classify" => Command::Classify {
            project: operand("project")?,
        },
        "plan" => Command::Plan {
            project: operand("project")?,
            sub_project: operand("sub-project")?,
        },
        "walk" => {
            let project = operand("project")?;
            let sub_project = operand("sub-project")?;
            let steps = rest
                .by_ref()
                .map(|raw| WalkStep::parse(&raw))
                .collect::<Result<Vec<_>>>()?;
            Command::Walk {
                project,
                sub_project,
                steps,
            }
        }
        "embed" => Command::Embed {
            url: operand("url")?,
        },
        "help" => Command::Help,
        other => return Err(Error::Usage(format!("unknown command: {other}"))),
    };

    if let Some(extra) = rest.next() {
        return Err(Error::Usage(format!("unexpected argument: {extra}")));
    }
    Ok((flags, command))
}

/// Parses the arguments of the running process.
///
/// # Errors
///
/// See [`parse_args`].
pub fn from_env() -> Result<(Flags, Command)> {
    parse_args(pico_args::Arguments::from_env())
}

/// Parses an explicit argument list (without the program name).
///
/// # Errors
///
/// See [`parse_args`].
pub fn from_vec<I, S>(args: I) -> Result<(Flags, Command)>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    parse_args(pico_args::Arguments::from_vec(
        args.into_iter().map(Into::into).collect(),
    ))
}
