use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

/// separator used between folder names when rendering a breadcrumb path
pub static PATH_SEPARATOR: &str = " / ";

/// represents a folder in the Folders table of the database.
///
/// Folders form a strict tree, but a folder only ever holds the _id_ of its parent.
/// Every structural question (depth, ancestors, descendants, path) is answered by scanning
/// the full collection of folders passed in by the caller, so the caller must supply a complete
/// snapshot for the results to be meaningful
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Folder {
    /// generated when the folder is created, never changes
    pub id: String,
    /// the display name of the folder
    pub name: String,
    pub description: Option<String>,
    /// `None` means this is a top-level folder
    pub parent_id: Option<String>,
    /// hex color in the form `#RRGGBB`
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// soft-delete flag. deleted folders are never part of the collection handed to the hierarchy functions
    pub deleted: bool,
    /// position among siblings, lower comes first
    pub sort_order: i64,
    /// cached count of notes filed directly in this folder
    pub note_count: u32,
}

impl Folder {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// returns how many parent links need to be followed to reach a root folder.
    ///
    /// A folder whose parent can't be found in `all_folders` is treated as a root, so this
    /// returns the number of ancestors that could actually be resolved
    pub fn depth(&self, all_folders: &[Folder]) -> usize {
        self.ancestors(all_folders).len()
    }

    /// returns the chain of parent folders, starting with the immediate parent and ending with the
    /// top-most folder that can be resolved.
    ///
    /// The walk stops as soon as a parent id can't be found in `all_folders`. That case is logged,
    /// since it means a folder points at a parent that was removed without moving its children
    pub fn ancestors<'a>(&self, all_folders: &'a [Folder]) -> Vec<&'a Folder> {
        let mut ancestors: Vec<&'a Folder> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([self.id.as_str()]);
        let mut current_parent = self.parent_id.as_deref();
        while let Some(parent_id) = current_parent {
            let Some(parent) = find_folder(parent_id, all_folders) else {
                let child = ancestors.last().map_or(self.id.as_str(), |f| f.id.as_str());
                log::warn!(
                    "Folder {child} references parent {parent_id} which does not exist. Treating it as a root folder"
                );
                break;
            };
            if !seen.insert(parent.id.as_str()) {
                log::error!(
                    "Cycle detected in the parents of folder {}, stopping at {}",
                    self.id,
                    parent.id
                );
                break;
            }
            ancestors.push(parent);
            current_parent = parent.parent_id.as_deref();
        }
        ancestors
    }

    /// returns every folder that lives somewhere underneath this folder, in depth-first order.
    ///
    /// Folders are visited at most once, so a corrupted collection containing a cycle still terminates
    pub fn descendants<'a>(&self, all_folders: &'a [Folder]) -> Vec<&'a Folder> {
        let mut children_by_parent: HashMap<&str, Vec<&'a Folder>> = HashMap::new();
        for folder in all_folders {
            if let Some(parent_id) = folder.parent_id.as_deref() {
                children_by_parent.entry(parent_id).or_default().push(folder);
            }
        }
        let mut descendants: Vec<&'a Folder> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([self.id.as_str()]);
        collect_descendants(
            self.id.as_str(),
            &children_by_parent,
            &mut visited,
            &mut descendants,
        );
        descendants
    }

    /// renders the breadcrumb for this folder, e.g. `Work / Projects / Rust`
    pub fn path(&self, all_folders: &[Folder]) -> String {
        let mut names: Vec<&str> = self
            .ancestors(all_folders)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        names.reverse();
        names.push(self.name.as_str());
        names.join(PATH_SEPARATOR)
    }

    /// checks whether this folder can be moved underneath the folder with `target_folder_id`.
    ///
    /// `None` means moving to the top level, which is always allowed. A folder can never be its own
    /// parent, and can never be moved into one of its descendants since that would create a cycle.
    /// Every code path that changes `parent_id` must go through this check first
    pub fn can_move_to(&self, target_folder_id: Option<&str>, all_folders: &[Folder]) -> bool {
        let Some(target_folder_id) = target_folder_id else {
            return true;
        };
        if target_folder_id == self.id {
            return false;
        }
        !self
            .descendants(all_folders)
            .iter()
            .any(|f| f.id == target_folder_id)
    }
}

fn find_folder<'a>(id: &str, all_folders: &'a [Folder]) -> Option<&'a Folder> {
    all_folders.iter().find(|f| f.id == id)
}

fn collect_descendants<'a: 'v, 'v>(
    parent_id: &str,
    children_by_parent: &HashMap<&str, Vec<&'a Folder>>,
    visited: &mut HashSet<&'v str>,
    descendants: &mut Vec<&'a Folder>,
) {
    let Some(children) = children_by_parent.get(parent_id) else {
        return;
    };
    for &child in children {
        if !visited.insert(child.id.as_str()) {
            log::error!(
                "Folder {} was reached twice while collecting descendants, the folder tree contains a cycle",
                child.id
            );
            continue;
        }
        descendants.push(child);
        collect_descendants(child.id.as_str(), children_by_parent, visited, descendants);
    }
}
