#[macro_use]
extern crate rocket;

use std::backtrace::Backtrace;

use rocket::{Build, Rocket};

use api::handler::{api_version, set_password};
use folders::handler::{
    create_folder, delete_folder, get_folder, get_folder_tree, get_root_folder, move_folder,
    restore_folder, update_folder,
};
use notes::handler::{create_note, delete_note, get_note, update_note};

use crate::repository::initialize_db;

mod api;
mod config;
mod db_migrations;
mod folders;
mod guard;
mod logging;
mod model;
mod notes;
mod repository;
#[cfg(test)]
mod test;

#[launch]
fn rocket() -> Rocket<Build> {
    init_logging();
    if let Err(e) = initialize_db() {
        log::error!(
            "Failed to initialize the database: {e:?}\n{}",
            Backtrace::force_capture()
        );
        panic!("Failed to initialize the database: {e}");
    }
    rocket::build()
        .mount("/api", routes![api_version, set_password])
        .mount(
            "/folders",
            routes![
                get_root_folder,
                get_folder_tree,
                get_folder,
                create_folder,
                update_folder,
                move_folder,
                restore_folder,
                delete_folder
            ],
        )
        .mount(
            "/notes",
            routes![get_note, create_note, update_note, delete_note],
        )
}

/// tests leave the logger alone, since every test builds its own rocket instance
#[cfg(not(test))]
fn init_logging() {
    if let Err(e) = logging::init_logger(&config::NOTES_SERVER_CONFIG.logging) {
        eprintln!("Failed to initialize logger: {e}");
    }
}

#[cfg(test)]
fn init_logging() {}
