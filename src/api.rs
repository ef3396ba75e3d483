use crate::{
    blueprint::{self, BUILTIN},
    catalog::{Catalog, CatalogError},
    manifest::{Manifest, ManifestError},
    preview::preview_as_tree,
    prompt::{self, PromptError},
    report::{print_summary, ConsoleObserver},
    scaffold::{ScaffoldError, ScaffoldOptions, ScaffoldReport, Scaffolder},
};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum HakoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] PromptError),

    #[error("Template not found with name: {name}")]
    #[diagnostic(
        code(hako::template_not_found),
        help("Available templates: {available}. Run `hako list` for details")
    )]
    TemplateNotFound { name: String, available: String },

    #[error("No destination directory given")]
    #[diagnostic(
        code(hako::missing_destination),
        help("Pass a destination argument or set `root` in the manifest")
    )]
    MissingDestination,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub scaffold: ScaffoldOptions,
    /// Show the preview tree and stop.
    pub dry_run: bool,
    /// Prompt for the destination and confirm before writing.
    pub interactive: bool,
}

/// How a run ended. Only [`Outcome::Scaffolded`] touched the disk.
#[derive(Debug)]
pub enum Outcome {
    Scaffolded(ScaffoldReport),
    Previewed { destination: PathBuf },
    Canceled,
}

/// Creates a new project from one of the built-in blueprints.
///
/// The destination defaults to the blueprint's own root directory name.
///
/// # Errors
///
/// Returns a [`HakoError`] if:
///
/// - No built-in blueprint is named `template`.
/// - User prompts fail or the user cancels the input.
/// - A directory or file cannot be created or written to.
pub fn new_project(
    template: &str,
    destination: Option<&str>,
    options: RunOptions,
) -> Result<Outcome, HakoError> {
    let blueprint = blueprint::find(template).ok_or_else(|| HakoError::TemplateNotFound {
        name: template.to_string(),
        available: BUILTIN
            .iter()
            .map(|blueprint| blueprint.name)
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    log::debug!("using built-in blueprint '{}'", blueprint.name);

    let catalog = blueprint.catalog()?;

    run(
        &catalog,
        destination,
        Some(blueprint.default_root),
        Some(blueprint.description),
        blueprint.next_steps,
        options,
    )
}

/// Creates a project from a TOML manifest on disk.
///
/// # Errors
///
/// Returns a [`HakoError`] if:
///
/// - The manifest cannot be read or parsed, or one of its paths is invalid.
/// - Neither `destination` nor the manifest's `root` names a directory.
/// - User prompts fail or the user cancels the input.
/// - A directory or file cannot be created or written to.
pub fn apply_manifest(
    manifest_path: &str,
    destination: Option<&str>,
    options: RunOptions,
) -> Result<Outcome, HakoError> {
    let manifest = Manifest::from_file(manifest_path)?;

    let catalog = manifest.catalog()?;

    run(
        &catalog,
        destination,
        manifest.root.as_deref(),
        manifest.description.as_deref(),
        manifest.next_steps.as_slice(),
        options,
    )
}

/// Names and descriptions of every built-in blueprint.
pub fn list_templates() -> Vec<(&'static str, &'static str)> {
    BUILTIN
        .iter()
        .map(|blueprint| (blueprint.name, blueprint.description))
        .collect()
}

fn run<S: AsRef<str>>(
    catalog: &Catalog,
    destination: Option<&str>,
    default_root: Option<&str>,
    description: Option<&str>,
    next_steps: &[S],
    options: RunOptions,
) -> Result<Outcome, HakoError> {
    let destination = match destination {
        Some(destination) => destination.to_string(),
        None if options.interactive => prompt::get_destination(default_root)?,
        None => default_root
            .map(str::to_string)
            .ok_or(HakoError::MissingDestination)?,
    };

    let destination = PathBuf::from(destination);

    if options.dry_run || options.interactive {
        if let Some(description) = description {
            println!("{}", description.bold());
        }

        preview_as_tree(catalog, &destination);
    }

    if options.dry_run {
        return Ok(Outcome::Previewed { destination });
    }

    if options.interactive && !prompt::apply_changes()? {
        log::info!("canceled, nothing written");

        return Ok(Outcome::Canceled);
    }

    let mut observer = ConsoleObserver;

    let report = Scaffolder::new(options.scaffold)
        .observe(&mut observer)
        .run(&destination, catalog)?;

    print_summary(&report, next_steps);

    Ok(Outcome::Scaffolded(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::OverwritePolicy;
    use std::fs;

    #[test]
    fn new_project_writes_builtin_blueprint() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("shop");

        let outcome = new_project(
            "arbarea-mobile-app",
            root.to_str(),
            RunOptions::default(),
        )
        .unwrap();

        let Outcome::Scaffolded(report) = outcome else {
            panic!("expected files to be written");
        };
        assert_eq!(report.written.len(), 9);
        assert!(root.join("public/manifest.json").is_file());
        assert!(fs::read_to_string(root.join("index.html"))
            .unwrap()
            .contains("Столярная мастерская"));
    }

    #[test]
    fn unknown_template_lists_available_ones() {
        let error = new_project("nope", Some("unused"), RunOptions::default()).unwrap_err();

        let HakoError::TemplateNotFound { name, available } = error else {
            panic!("expected TemplateNotFound");
        };
        assert_eq!(name, "nope");
        assert!(available.contains("arbarea-mobile-app"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("shop");
        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };

        let outcome = new_project("arbarea-mobile-app", root.to_str(), options).unwrap();

        assert!(matches!(outcome, Outcome::Previewed { .. }));
        assert!(!root.exists());
    }

    #[test]
    fn manifest_root_is_the_default_destination() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("from-manifest");
        let manifest_path = dir.path().join("hako.toml");
        fs::write(
            &manifest_path,
            format!(
                "root = {:?}\n\n[[files]]\npath = \"a/b.txt\"\ncontent = \"hello\"\n",
                root.to_str().unwrap()
            ),
        )
        .unwrap();

        apply_manifest(manifest_path.to_str().unwrap(), None, RunOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(root.join("a/b.txt")).unwrap(), "hello");
    }

    #[test]
    fn manifest_without_root_needs_a_destination() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("hako.toml");
        fs::write(&manifest_path, "[[files]]\npath = \"a.txt\"\ncontent = \"a\"\n").unwrap();

        let error =
            apply_manifest(manifest_path.to_str().unwrap(), None, RunOptions::default())
                .unwrap_err();

        assert!(matches!(error, HakoError::MissingDestination));
    }

    #[test]
    fn no_overwrite_is_forwarded_to_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("shop");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("package.json"), "mine").unwrap();
        let options = RunOptions {
            scaffold: ScaffoldOptions {
                overwrite: OverwritePolicy::FailIfExists,
            },
            ..RunOptions::default()
        };

        let error = new_project("arbarea-mobile-app", root.to_str(), options).unwrap_err();

        assert!(matches!(
            error,
            HakoError::Scaffold(ScaffoldError::AlreadyExists { .. })
        ));
        assert_eq!(fs::read_to_string(root.join("package.json")).unwrap(), "mine");
    }

    #[test]
    fn lists_builtin_templates() {
        let templates = list_templates();

        assert!(templates
            .iter()
            .any(|(name, _)| *name == "arbarea-mobile-app"));
    }
}
