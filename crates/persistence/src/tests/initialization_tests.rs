// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use std::path::PathBuf;

use karat_registry::{RecordQuery, RecordStore};

use super::{create_test_actor, create_test_new_record};
use crate::{Persistence, PersistenceError};

fn temp_db_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "karat_registry_{name}_{}.db",
        std::process::id()
    ))
}

fn remove_db_files(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.insert_record(&create_test_new_record("K18", "D1"), &create_test_actor())
        .unwrap();

    let count1: u64 = db1.query_records(&RecordQuery::default()).unwrap().total_count;
    let count2: u64 = db2.query_records(&RecordQuery::default()).unwrap().total_count;

    assert_eq!(count1, 1, "db1 should have 1 karat");
    assert_eq!(count2, 0, "db2 should have 0 karats (isolated)");
}

#[test]
fn test_file_database_survives_reopen() {
    let path: PathBuf = temp_db_path("reopen");
    remove_db_files(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .insert_record(&create_test_new_record("K18", "D1"), &create_test_actor())
            .unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let count: u64 = reopened
        .query_records(&RecordQuery::default())
        .unwrap()
        .total_count;
    assert_eq!(count, 1, "Migrations must not wipe existing rows");

    drop(reopened);
    remove_db_files(&path);
}
