//! Test doubles for the storage layer.

use eyre::eyre;

pub use crate::store::MockDocumentStore;

/// A store whose every operation fails, for exercising error paths.
pub fn unavailable_store() -> MockDocumentStore {
    let mut store = MockDocumentStore::new();
    store
        .expect_insert_one()
        .returning(|_, _| Err(eyre!("store unavailable")));
    store
        .expect_find_one()
        .returning(|_, _| Err(eyre!("store unavailable")));
    store
        .expect_find_many()
        .returning(|_, _| Err(eyre!("store unavailable")));
    store
        .expect_count()
        .returning(|_, _| Err(eyre!("store unavailable")));
    store
        .expect_update_one()
        .returning(|_, _, _| Err(eyre!("store unavailable")));
    store
        .expect_delete_one()
        .returning(|_, _| Err(eyre!("store unavailable")));
    store
        .expect_count_by()
        .returning(|_, _, _, _| Err(eyre!("store unavailable")));
    store
}
