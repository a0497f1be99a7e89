use crate::folders::service::{
    create_folder, delete_folder, get_folder, get_folder_tree, get_root_folder,
    hard_delete_folder, move_folder, restore_folder, update_folder,
};
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, GetFolderError, RestoreFolderError, UpdateFolderError,
};
use crate::model::request::folder_requests::{
    CreateFolderRequest, MoveFolderRequest, UpdateFolderRequest,
};
use crate::notes::repository::get_by_id as get_note_by_id;
use crate::repository::open_connection;
use crate::test::{
    cleanup, create_folder_db_entry, create_note_db_entry, current_thread_name,
    get_folder_db_entry, refresh_db,
};

fn create_request(name: &str, parent_id: Option<&str>) -> CreateFolderRequest {
    CreateFolderRequest {
        name: name.to_string(),
        parent_id: parent_id.map(str::to_string),
        ..Default::default()
    }
}

fn move_request(parent_id: Option<&str>) -> MoveFolderRequest {
    MoveFolderRequest {
        parent_id: parent_id.map(str::to_string),
        sort_order: None,
    }
}

mod get_folder_tests {
    use super::*;

    #[test]
    fn get_folder_not_found() {
        refresh_db();
        assert_eq!(GetFolderError::NotFound, get_folder("nothing").unwrap_err());
        cleanup();
    }

    #[test]
    fn get_folder_includes_path_depth_and_contents() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("b"));
        create_note_db_entry("n", "note", Some("b"));
        let res = get_folder("b").unwrap();
        assert_eq!("A / B", res.path);
        assert_eq!(1, res.depth);
        assert_eq!(1, res.folders.len());
        assert_eq!("c", res.folders[0].id);
        assert_eq!(1, res.notes.len());
        assert_eq!(1, res.folder.note_count);
        cleanup();
    }

    #[test]
    fn get_deleted_folder_not_found() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        delete_folder("a").unwrap();
        assert_eq!(GetFolderError::NotFound, get_folder("a").unwrap_err());
        cleanup();
    }

    #[test]
    fn get_root_folder_contains_top_level_folders_and_unfiled_notes() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_note_db_entry("filed", "filed", Some("a"));
        create_note_db_entry("unfiled", "unfiled", None);
        let res = get_root_folder().unwrap();
        assert_eq!(1, res.folders.len());
        assert_eq!("a", res.folders[0].id);
        assert_eq!(1, res.notes.len());
        assert_eq!("unfiled", res.notes[0].id);
        cleanup();
    }

    #[test]
    fn get_folder_tree_is_nested_and_ordered() {
        refresh_db();
        create_folder(&create_request("Zebra", None)).unwrap();
        let apple = create_folder(&create_request("Apple", None)).unwrap();
        create_folder(&create_request("Seed", Some(&apple.id))).unwrap();
        let tree = get_folder_tree().unwrap();
        // sort order comes before name
        let names: Vec<&str> = tree.iter().map(|n| n.folder.name.as_str()).collect();
        assert_eq!(vec!["Zebra", "Apple"], names);
        assert!(tree[0].children.is_empty());
        assert_eq!(1, tree[1].children.len());
        assert_eq!("Seed", tree[1].children[0].folder.name);
        cleanup();
    }

    #[test]
    fn get_folder_tree_shows_orphans_at_top_level() {
        refresh_db();
        create_folder_db_entry("orphan", "Orphan", Some("gone"));
        let tree = get_folder_tree().unwrap();
        assert_eq!(1, tree.len());
        assert_eq!("orphan", tree[0].folder.id);
        cleanup();
    }
}

mod root_folder_tests {
    use super::*;

    #[test]
    fn get_root_folder_lists_orphans() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("orphan", "Orphan", Some("gone"));
        create_folder_db_entry("b", "B", Some("a"));
        let res = get_root_folder().unwrap();
        let ids: Vec<&str> = res.folders.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(vec!["a", "orphan"], ids);
        cleanup();
    }
}

mod create_folder_tests {
    use super::*;

    #[test]
    fn create_folder_at_top_level() {
        refresh_db();
        let created = create_folder(&create_request("  Work  ", None)).unwrap();
        assert_eq!("Work", created.name);
        assert_eq!(None, created.parent_id);
        assert_eq!(0, created.sort_order);
        assert_eq!(0, created.note_count);
        let second = create_folder(&create_request("Home", None)).unwrap();
        assert_eq!(1, second.sort_order);
        cleanup();
    }

    #[test]
    fn create_folder_in_parent() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        let created = create_folder(&create_request("B", Some("a"))).unwrap();
        assert_eq!(Some("a".to_string()), created.parent_id);
        assert_eq!("A / B", get_folder(&created.id).unwrap().path);
        cleanup();
    }

    #[test]
    fn create_folder_parent_not_found() {
        refresh_db();
        assert_eq!(
            CreateFolderError::ParentNotFound,
            create_folder(&create_request("B", Some("nothing"))).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn create_folder_deleted_parent() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        delete_folder("a").unwrap();
        assert_eq!(
            CreateFolderError::ParentNotFound,
            create_folder(&create_request("B", Some("a"))).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn create_folder_already_exists() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "Notes", Some("a"));
        assert_eq!(
            CreateFolderError::AlreadyExists,
            create_folder(&create_request("notes", Some("a"))).unwrap_err()
        );
        // same name in a different parent is fine
        assert!(create_folder(&create_request("Notes", None)).is_ok());
        cleanup();
    }

    #[test]
    fn create_folder_invalid_name() {
        refresh_db();
        assert_eq!(
            CreateFolderError::InvalidName,
            create_folder(&create_request("   ", None)).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn create_folder_invalid_color() {
        refresh_db();
        let request = CreateFolderRequest {
            name: "A".to_string(),
            color: Some("red".to_string()),
            ..Default::default()
        };
        assert_eq!(CreateFolderError::InvalidColor, create_folder(&request).unwrap_err());
        let request = CreateFolderRequest {
            name: "A".to_string(),
            color: Some("#00aaFF".to_string()),
            ..Default::default()
        };
        assert_eq!(Some("#00aaFF".to_string()), create_folder(&request).unwrap().color);
        cleanup();
    }
}

mod update_folder_tests {
    use super::*;

    fn update_request(id: &str, name: &str, parent_id: Option<&str>) -> UpdateFolderRequest {
        UpdateFolderRequest {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn update_folder_fields() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        let request = UpdateFolderRequest {
            description: Some("desc".to_string()),
            color: Some("#123456".to_string()),
            icon: Some("star".to_string()),
            ..update_request("a", "Renamed", None)
        };
        let updated = update_folder(&request).unwrap();
        assert_eq!("Renamed", updated.name);
        let saved = get_folder_db_entry("a");
        assert_eq!("Renamed", saved.name);
        assert_eq!(Some("desc".to_string()), saved.description);
        assert_eq!(Some("#123456".to_string()), saved.color);
        assert_eq!(Some("star".to_string()), saved.icon);
        cleanup();
    }

    #[test]
    fn update_folder_not_found() {
        refresh_db();
        assert_eq!(
            UpdateFolderError::NotFound,
            update_folder(&update_request("nothing", "A", None)).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn update_folder_into_descendant_not_allowed() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("b"));
        assert_eq!(
            UpdateFolderError::NotAllowed,
            update_folder(&update_request("a", "A", Some("c"))).unwrap_err()
        );
        assert_eq!(None, get_folder_db_entry("a").parent_id);
        cleanup();
    }

    #[test]
    fn update_folder_already_exists() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", None);
        assert_eq!(
            UpdateFolderError::AlreadyExists,
            update_folder(&update_request("b", "a", None)).unwrap_err()
        );
        // renaming a folder to a different case of its own name is fine
        assert!(update_folder(&update_request("a", "a", None)).is_ok());
        cleanup();
    }

    #[test]
    fn update_folder_parent_not_found() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        assert_eq!(
            UpdateFolderError::ParentNotFound,
            update_folder(&update_request("a", "A", Some("nothing"))).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn update_folder_with_missing_parent_keeps_parent() {
        refresh_db();
        create_folder_db_entry("orphan", "Orphan", Some("gone"));
        let request = UpdateFolderRequest {
            color: Some("#abcdef".to_string()),
            ..update_request("orphan", "Renamed", Some("gone"))
        };
        let updated = update_folder(&request).unwrap();
        assert_eq!("Renamed", updated.name);
        assert_eq!(Some("gone".to_string()), get_folder_db_entry("orphan").parent_id);
        cleanup();
    }

    #[test]
    fn update_folder_invalid_name_and_color() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        assert_eq!(
            UpdateFolderError::InvalidName,
            update_folder(&update_request("a", "", None)).unwrap_err()
        );
        let request = UpdateFolderRequest {
            color: Some("#12345".to_string()),
            ..update_request("a", "A", None)
        };
        assert_eq!(UpdateFolderError::InvalidColor, update_folder(&request).unwrap_err());
        cleanup();
    }
}

mod move_folder_tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;

    #[test]
    fn move_folder_to_other_parent() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("b"));
        create_folder_db_entry("d", "D", None);
        let moved = move_folder("b", &move_request(Some("d"))).unwrap();
        assert_eq!(Some("d".to_string()), moved.parent_id);
        assert_eq!("D / B / C", get_folder("c").unwrap().path);
        assert_eq!(2, get_folder("c").unwrap().depth);
        cleanup();
    }

    #[test]
    fn move_folder_to_top_level() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        let moved = move_folder("b", &move_request(None)).unwrap();
        assert_eq!(None, moved.parent_id);
        assert_eq!(0, get_folder("b").unwrap().depth);
        cleanup();
    }

    #[test]
    fn move_folder_into_self_not_allowed() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        assert_eq!(
            UpdateFolderError::NotAllowed,
            move_folder("a", &move_request(Some("a"))).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn move_folder_into_descendant_not_allowed() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("b"));
        assert_eq!(
            UpdateFolderError::NotAllowed,
            move_folder("a", &move_request(Some("c"))).unwrap_err()
        );
        assert_eq!(
            UpdateFolderError::NotAllowed,
            move_folder("b", &move_request(Some("c"))).unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn move_folder_places_after_new_siblings() {
        refresh_db();
        create_folder(&create_request("A", None)).unwrap();
        create_folder(&create_request("B", None)).unwrap();
        let parent = create_folder(&create_request("Parent", None)).unwrap();
        let child = create_folder(&create_request("Child", Some(&parent.id))).unwrap();
        assert_eq!(0, child.sort_order);
        let moved = move_folder(&child.id, &move_request(None)).unwrap();
        assert_eq!(3, moved.sort_order);
        let explicit = MoveFolderRequest {
            parent_id: Some(parent.id.clone()),
            sort_order: Some(7),
        };
        assert_eq!(7, move_folder(&child.id, &explicit).unwrap().sort_order);
        cleanup();
    }

    #[test]
    fn concurrent_opposite_moves_never_create_a_cycle() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", None);
        // threads with the same name share a database
        let thread_name = current_thread_name();
        for _ in 0..25 {
            move_folder("a", &move_request(None)).unwrap();
            move_folder("b", &move_request(None)).unwrap();
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = [("a", "b"), ("b", "a")]
                .into_iter()
                .map(|(id, parent_id)| {
                    let barrier = Arc::clone(&barrier);
                    thread::Builder::new()
                        .name(thread_name.clone())
                        .spawn(move || {
                            barrier.wait();
                            move_folder(id, &move_request(Some(parent_id)))
                        })
                        .unwrap()
                })
                .collect();
            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(1, results.iter().filter(|res| res.is_ok()).count());
            assert!(results.contains(&Err(UpdateFolderError::NotAllowed)));
            let a = get_folder_db_entry("a");
            let b = get_folder_db_entry("b");
            assert!(a.parent_id.is_none() || b.parent_id.is_none());
        }
        cleanup();
    }

    #[test]
    fn move_folder_not_found() {
        refresh_db();
        assert_eq!(
            UpdateFolderError::NotFound,
            move_folder("nothing", &move_request(None)).unwrap_err()
        );
        cleanup();
    }
}

mod delete_folder_tests {
    use super::*;

    #[test]
    fn delete_folder_cascades_to_descendants() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("b"));
        create_folder_db_entry("d", "D", None);
        delete_folder("a").unwrap();
        assert!(get_folder_db_entry("a").deleted);
        assert!(get_folder_db_entry("b").deleted);
        assert!(get_folder_db_entry("c").deleted);
        assert!(!get_folder_db_entry("d").deleted);
        cleanup();
    }

    #[test]
    fn delete_folder_not_found() {
        refresh_db();
        assert_eq!(DeleteFolderError::FolderNotFound, delete_folder("nothing").unwrap_err());
        cleanup();
    }

    #[test]
    fn restore_folder_restores_descendants() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        delete_folder("a").unwrap();
        let restored = restore_folder("a").unwrap();
        assert_eq!(None, restored.parent_id);
        assert_eq!("A / B", get_folder("b").unwrap().path);
        cleanup();
    }

    #[test]
    fn restore_folder_with_deleted_parent_goes_to_top_level() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("b"));
        delete_folder("a").unwrap();
        let restored = restore_folder("b").unwrap();
        assert_eq!(None, restored.parent_id);
        assert_eq!("B / C", get_folder("c").unwrap().path);
        // the parent stays deleted
        assert_eq!(GetFolderError::NotFound, get_folder("a").unwrap_err());
        cleanup();
    }

    #[test]
    fn restore_folder_not_deleted() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        assert_eq!(RestoreFolderError::NotDeleted, restore_folder("a").unwrap_err());
        assert_eq!(RestoreFolderError::FolderNotFound, restore_folder("nothing").unwrap_err());
        cleanup();
    }

    #[test]
    fn hard_delete_folder_removes_subtree_and_unfiles_notes() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("d", "D", None);
        create_note_db_entry("n", "note", Some("b"));
        hard_delete_folder("a").unwrap();
        assert_eq!(GetFolderError::NotFound, get_folder("a").unwrap_err());
        assert_eq!(GetFolderError::NotFound, get_folder("b").unwrap_err());
        assert!(get_folder("d").is_ok());
        let con = open_connection();
        let note = get_note_by_id("n", &con).unwrap();
        con.close().unwrap();
        assert_eq!(None, note.folder_id);
        cleanup();
    }

    #[test]
    fn restore_folder_name_taken() {
        refresh_db();
        let original = create_folder(&create_request("Work", None)).unwrap();
        delete_folder(&original.id).unwrap();
        create_folder(&create_request("work", None)).unwrap();
        assert_eq!(
            RestoreFolderError::AlreadyExists,
            restore_folder(&original.id).unwrap_err()
        );
        assert!(get_folder_db_entry(&original.id).deleted);
        assert_eq!(1, get_root_folder().unwrap().folders.len());
        cleanup();
    }

    #[test]
    fn restore_folder_to_top_level_name_taken() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "Work", Some("a"));
        delete_folder("a").unwrap();
        create_folder_db_entry("c", "Work", None);
        assert_eq!(RestoreFolderError::AlreadyExists, restore_folder("b").unwrap_err());
        cleanup();
    }

    #[test]
    fn restore_folder_leaves_separately_deleted_descendants() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        create_folder_db_entry("b", "B", Some("a"));
        create_folder_db_entry("c", "C", Some("a"));
        delete_folder("b").unwrap();
        delete_folder("a").unwrap();
        restore_folder("a").unwrap();
        assert!(!get_folder_db_entry("a").deleted);
        assert!(!get_folder_db_entry("c").deleted);
        assert!(get_folder_db_entry("b").deleted);
        cleanup();
    }

    #[test]
    fn hard_delete_works_on_soft_deleted_folder() {
        refresh_db();
        create_folder_db_entry("a", "A", None);
        delete_folder("a").unwrap();
        hard_delete_folder("a").unwrap();
        assert_eq!(RestoreFolderError::FolderNotFound, restore_folder("a").unwrap_err());
        cleanup();
    }
}
