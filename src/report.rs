use crate::scaffold::{Observer, ScaffoldEvent, ScaffoldReport};
use colored::Colorize;
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Prints one line per created directory and written file, as they happen.
#[derive(Debug, Default)]
pub struct ConsoleObserver;
impl Observer for ConsoleObserver {
    fn notify(&mut self, event: &ScaffoldEvent) {
        log::debug!("{:?}", event);

        match event {
            ScaffoldEvent::RootCreated { path } | ScaffoldEvent::DirectoryCreated { path } => {
                println!("{} {}", "mkdir".blue(), path.display());
            }
            ScaffoldEvent::FileWritten { relative, .. } => {
                println!("{} {}", "create".green(), relative);
            }
            ScaffoldEvent::Finished { .. } => {}
        }
    }
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string())
}

/// Substitutes `{root}` in every step and numbers them from 1.
pub fn format_next_steps<S: AsRef<str>>(root: &Path, steps: &[S]) -> Vec<String> {
    let name = root_name(root);

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step.as_ref().replace("{root}", &name)))
        .collect()
}

/// Prints the closing banner: where the project went and what to do next.
pub fn print_summary<S: AsRef<str>>(report: &ScaffoldReport, next_steps: &[S]) {
    let rule = "=".repeat(RULE_WIDTH);

    println!("\n{}", rule.bright_blue());
    println!(
        "{} Project created in '{}' ({} file(s))",
        "Done!".bold().green(),
        root_name(&report.root),
        report.written.len()
    );
    println!("{}", rule.bright_blue());

    if next_steps.is_empty() {
        return;
    }

    println!("{}", "Next steps:".bold());
    for line in format_next_steps(&report.root, next_steps) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_steps_are_numbered_and_substituted() {
        let steps = ["cd {root}", "npm install", "npm run dev"];

        let lines = format_next_steps(Path::new("/tmp/work/my-app"), &steps);

        assert_eq!(
            lines,
            vec!["1. cd my-app", "2. npm install", "3. npm run dev"]
        );
    }

    #[test]
    fn no_steps_no_lines() {
        let steps: [&str; 0] = [];

        assert!(format_next_steps(Path::new("proj"), &steps).is_empty());
    }
}
