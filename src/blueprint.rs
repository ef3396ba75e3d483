//! Built-in blueprints.
//!
//! Blueprint files are embedded at compile time from the `blueprints/` directory, so the
//! scaffold engine only ever sees them as plain catalog data.

use crate::catalog::{Catalog, CatalogError};

/// A named, statically embedded project template.
#[derive(Debug)]
pub struct Blueprint {
    pub name: &'static str,
    pub description: &'static str,
    /// Directory the project is created in when no destination is given.
    pub default_root: &'static str,
    pub files: &'static [(&'static str, &'static str)],
    /// Shown after scaffolding. `{root}` is replaced by the destination directory name.
    pub next_steps: &'static [&'static str],
}
impl Blueprint {
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_pairs(self.files.iter().copied())
    }
}

macro_rules! blueprint_file {
    ($blueprint:literal, $path:literal) => {
        (
            $path,
            include_str!(concat!("../blueprints/", $blueprint, "/", $path)),
        )
    };
}

const ARBAREA_MOBILE_APP: Blueprint = Blueprint {
    name: "arbarea-mobile-app",
    description: "React + Vite + Tailwind mobile web app (PWA manifest included)",
    default_root: "arbarea-mobile-app",
    files: &[
        blueprint_file!("arbarea-mobile-app", "package.json"),
        blueprint_file!("arbarea-mobile-app", "vite.config.js"),
        blueprint_file!("arbarea-mobile-app", "index.html"),
        blueprint_file!("arbarea-mobile-app", "public/manifest.json"),
        blueprint_file!("arbarea-mobile-app", "src/main.jsx"),
        blueprint_file!("arbarea-mobile-app", "src/index.css"),
        blueprint_file!("arbarea-mobile-app", "postcss.config.js"),
        blueprint_file!("arbarea-mobile-app", "tailwind.config.js"),
        blueprint_file!("arbarea-mobile-app", "src/App.jsx"),
    ],
    next_steps: &[
        "Enter the project directory: cd {root}",
        "Install dependencies: npm install",
        "Start the dev server: npm run dev",
    ],
};

/// All blueprints compiled into the binary.
pub const BUILTIN: &[Blueprint] = &[ARBAREA_MOBILE_APP];

pub fn find(name: &str) -> Option<&'static Blueprint> {
    BUILTIN.iter().find(|blueprint| blueprint.name == name)
}
