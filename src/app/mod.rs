// SPDX-License-Identifier: MPL-2.0
//! Command orchestration for the `folio_lens` binary.
//!
//! [`run`] wires configuration, logging, the content source and the layout
//! registry together, then renders the command result as text. Policy
//! decisions (which source, which registry, how failures degrade) live here
//! so they are easy to audit.

pub mod command;
pub mod config;
pub mod paths;
pub mod view;

pub use command::{Command, Flags, WalkStep, USAGE};

use crate::application::port::ContentSource;
use crate::application::query::{
    GallerySequence, GalleryViewer, LayoutPlan, LayoutRegistry, ViewerEvent,
};
use crate::application::service::ContentService;
use crate::content::Project;
use crate::error::Result;
use crate::infrastructure::{ExportSource, SanityClient};
use crate::media;
use config::{Config, VERBOSE_LOG_LEVEL};

/// Everything a command needs, assembled once at startup.
pub struct Context {
    pub config: Config,
    pub layouts: LayoutRegistry,
    pub content: Option<ContentService<Box<dyn ContentSource>>>,
}

impl Context {
    /// Builds the context for `command`.
    ///
    /// Only commands that read content open a source: `--export` selects the
    /// offline export, otherwise the CMS client is built from `[cms]`.
    ///
    /// # Errors
    ///
    /// Fails when the export cannot be read, the CMS coordinates are
    /// missing, or the user layout file is invalid.
    pub async fn open(flags: &Flags, command: &Command, config: Config) -> Result<Self> {
        let layouts = match paths::get_app_config_dir() {
            Some(dir) => LayoutRegistry::load(&dir)?,
            None => LayoutRegistry::builtin()?,
        };

        let content = if command.needs_content() {
            let source: Box<dyn ContentSource> = match &flags.export {
                Some(path) => Box::new(ExportSource::open(path).await?),
                None => Box::new(SanityClient::new(&config.cms.endpoint()?)?),
            };
            tracing::debug!(source = source.name(), "content source ready");
            Some(ContentService::new(source))
        } else {
            None
        };

        Ok(Self {
            config,
            layouts,
            content,
        })
    }

    async fn project(&self, slug: &str) -> Option<Project> {
        match &self.content {
            Some(content) => content.project(slug).await,
            None => None,
        }
    }
}

/// Loads configuration and installs logging for `flags`.
///
/// Returns the config; load problems are logged, never fatal.
pub fn startup(flags: &Flags) -> Config {
    paths::init_cli_overrides(flags.config_dir.clone());
    let (config, warning) = config::load();

    let level = if flags.verbose {
        Some(VERBOSE_LOG_LEVEL)
    } else {
        config.logging.level.as_deref()
    };
    crate::logging::init(level);

    if let Some(key) = warning {
        tracing::info!(key = %key, "settings file could not be read, using defaults");
    }
    config
}

/// Runs one command and returns what it prints.
///
/// # Errors
///
/// Propagates failures from [`Context::open`]. Missing content is reported
/// in the output, not as an error.
pub async fn run(flags: &Flags, command: &Command, config: Config) -> Result<String> {
    match command {
        Command::Help => return Ok(USAGE.to_string()),
        Command::Embed { url } => {
            return Ok(embed(url));
        }
        _ => {}
    }

    let context = Context::open(flags, command, config).await?;
    Ok(execute(&context, command).await)
}

/// Runs a content command against an already opened context.
pub async fn execute(context: &Context, command: &Command) -> String {
    let images = context.config.image_builder();
    match command {
        Command::Classify { project } => match context.project(project).await {
            Some(project) => view::classification(&project, &images),
            None => no_content(project),
        },
        Command::Plan {
            project,
            sub_project,
        } => match plan_for(context, project, sub_project).await {
            Ok(plan) => view::plan(&plan),
            Err(message) => message,
        },
        Command::Walk {
            project,
            sub_project,
            steps,
        } => walk(context, project, sub_project, steps).await,
        Command::Embed { url } => embed(url),
        Command::Help => USAGE.to_string(),
    }
}

fn embed(url: &str) -> String {
    media::embed_url(url).unwrap_or_else(|| "no embeddable URL".to_string())
}

fn no_content(project: &str) -> String {
    format!("no content for project {project}")
}

async fn plan_for(
    context: &Context,
    project_slug: &str,
    segment: &str,
) -> std::result::Result<LayoutPlan, String> {
    let project = context
        .project(project_slug)
        .await
        .ok_or_else(|| no_content(project_slug))?;
    let sub_project = project
        .find_sub_project(segment)
        .ok_or_else(|| format!("no sub-project {segment} in {project_slug}"))?;

    let entry = context
        .layouts
        .resolve(&project.slug(), sub_project, Some(segment));
    Ok(LayoutPlan::build(
        entry,
        sub_project,
        &context.config.image_builder(),
    ))
}

async fn walk(context: &Context, project: &str, sub_project: &str, steps: &[WalkStep]) -> String {
    let plan = match plan_for(context, project, sub_project).await {
        Ok(plan) => plan,
        Err(message) => return message,
    };

    let mut lines = Vec::new();
    let sequence: Option<GallerySequence> = match plan.first_sequential() {
        Some(section) => Some(section.sequence.clone()),
        None => {
            lines.push(format!(
                "layout {} has no sequential section, walking the whole gallery",
                plan.layout
            ));
            let all: Vec<_> = plan
                .sections
                .iter()
                .flat_map(|s| s.sequence.items().iter().cloned())
                .collect();
            GallerySequence::from_resolved(all)
        }
    };
    let Some(sequence) = sequence else {
        lines.push("nothing to show".to_string());
        return lines.join("\n");
    };

    let mut viewer = GalleryViewer::new(sequence, context.config.gallery.viewer_options());
    lines.push(format!(
        "start {} {}",
        view::viewer_state(&viewer),
        view::load(&viewer.initial_load())
    ));

    for step in steps {
        let event = match step {
            WalkStep::Event(event) => *event,
            WalkStep::OpenCurrent => ViewerEvent::OpenLightbox(viewer.current_index()),
        };
        let outcome = match viewer.apply(event) {
            Some(load) => view::load(&load),
            None => "no change".to_string(),
        };
        lines.push(format!("{event:?} -> {} {outcome}", view::viewer_state(&viewer)));
    }
    lines.join("\n")
}
