use crate::catalog::Catalog;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// One printable row of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Indentation plus the connector, e.g. `"│   ├── "`.
    pub prefix: String,
    pub name: String,
    pub is_file: bool,
}
impl TreeLine {
    pub fn to_plain(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

/// Build the directory tree from the catalog entries, returning the root node.
///
/// Directories are never listed in a catalog, so a node is synthesized for every parent
/// the first time an entry needs it.
fn build_tree(catalog: &Catalog, destination: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // keyed by the `/`-joined relative path, "" being the root itself
    let mut lookup: HashMap<String, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(String::new(), Rc::clone(&root));

    for entry in catalog.entries() {
        let mut parent_key = String::new();

        for dir in entry.path.parents() {
            let key = dir.to_string();

            if !lookup.contains_key(&key) {
                let node = Rc::new(RefCell::new(TreeNode::new(
                    dir.file_name().to_string(),
                    false,
                )));

                if let Some(parent) = lookup.get(&parent_key) {
                    parent.borrow_mut().children.push(Rc::clone(&node));
                }

                lookup.insert(key.clone(), node);
            }

            parent_key = key;
        }

        let file = Rc::new(RefCell::new(TreeNode::new(
            entry.path.file_name().to_string(),
            true,
        )));

        if let Some(parent) = lookup.get(&parent_key) {
            parent.borrow_mut().children.push(file);
        }
    }

    root
}

fn collect_lines(
    node: &Rc<RefCell<TreeNode>>,
    prefix: &str,
    is_last: bool,
    out: &mut Vec<TreeLine>,
) {
    let node_borrow = node.borrow();

    let connector = if is_last { "└── " } else { "├── " };

    out.push(TreeLine {
        prefix: format!("{}{}", prefix, connector),
        name: node_borrow.name.clone(),
        is_file: node_borrow.is_file,
    });

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        let last = i == len - 1;
        collect_lines(child, &child_prefix, last, out);
    }
}

/// Lays out `catalog` as it would appear under `destination`, one row per node.
pub fn render_tree(catalog: &Catalog, destination: &Path) -> Vec<TreeLine> {
    let tree_root = build_tree(catalog, destination);

    let mut lines = Vec::new();
    collect_lines(&tree_root, "", true, &mut lines);

    lines
}

/// Print the tree with a nice ASCII style.
pub fn preview_as_tree(catalog: &Catalog, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    for line in render_tree(catalog, destination) {
        let name = if line.is_file {
            line.name.green()
        } else {
            line.name.blue()
        };

        println!("{}{}", line.prefix.yellow(), name);
    }

    println!(
        "\n{} {} file(s)\n",
        "└─".bold().bright_blue(),
        catalog.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_catalog_with_synthesized_directories() {
        let catalog = Catalog::from_pairs([
            ("package.json", "{}"),
            ("src/main.jsx", ""),
            ("public/manifest.json", "{}"),
            ("src/App.jsx", ""),
        ])
        .unwrap();

        let lines: Vec<String> = render_tree(&catalog, Path::new("apps/proj"))
            .iter()
            .map(TreeLine::to_plain)
            .collect();

        assert_eq!(
            lines,
            vec![
                "└── proj",
                "    ├── package.json",
                "    ├── src",
                "    │   ├── main.jsx",
                "    │   └── App.jsx",
                "    └── public",
                "        └── manifest.json",
            ]
        );
    }

    #[test]
    fn marks_files_and_directories() {
        let catalog = Catalog::from_pairs([("a/b.txt", "hello")]).unwrap();

        let lines = render_tree(&catalog, Path::new("proj"));

        let kinds: Vec<bool> = lines.iter().map(|line| line.is_file).collect();
        assert_eq!(kinds, vec![false, false, true]);
    }

    #[test]
    fn empty_catalog_is_just_the_root() {
        let lines = render_tree(&Catalog::new(), Path::new("proj"));

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_plain(), "└── proj");
    }
}
