//! Populate phase: fill an entry tree from the store.
//!
//! Containers are opened depth-first in declaration order and every handle
//! this phase opens is closed before the call that opened it returns, on
//! success and on error alike. Embedded containers reuse their parent's
//! handle and never open or close anything.

use tracing::{debug, warn};

use regbind_schema::{ContainerEntry, Entry, ValueEntry};
use regbind_store::Store;
use regbind_types::{Handle, PATH_SEPARATOR};

use crate::error::{DecodeError, DecodeResult};

/// Join a store path and a child name.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    match (parent.is_empty(), name.is_empty()) {
        (_, true) => parent.to_string(),
        (true, false) => name.to_string(),
        (false, false) => format!("{parent}{PATH_SEPARATOR}{name}"),
    }
}

/// Populate `entry` against the container `parent`.
///
/// `parent_path` is the display path of `parent`, used in errors and logs.
/// Missing optional containers and values are marked skipped; missing
/// required ones fail with [`DecodeError::RequiredMissing`].
pub fn populate<S: Store + ?Sized>(
    store: &S,
    entry: &mut Entry,
    parent: Handle,
    parent_path: &str,
) -> DecodeResult<()> {
    match entry {
        Entry::Container(container) => populate_container(store, container, parent, parent_path),
        Entry::Value(value) => populate_value(store, value, parent, parent_path),
    }
}

fn populate_children<S: Store + ?Sized>(
    store: &S,
    subentries: &mut [Entry],
    handle: Handle,
    path: &str,
) -> DecodeResult<()> {
    for entry in subentries {
        populate(store, entry, handle, path)?;
    }
    Ok(())
}

fn populate_container<S: Store + ?Sized>(
    store: &S,
    entry: &mut ContainerEntry,
    parent: Handle,
    parent_path: &str,
) -> DecodeResult<()> {
    if entry.spec.embedded {
        entry.handle = Some(parent);
        let result = populate_children(store, &mut entry.subentries, parent, parent_path);
        entry.handle = None;
        return result;
    }

    let path = join_path(parent_path, &entry.spec.name);
    let handle = match store.open_container(parent, &entry.spec.name) {
        Ok(handle) => handle,
        Err(source) if entry.spec.required => {
            return Err(DecodeError::RequiredMissing { path, source });
        }
        Err(source) => {
            debug!(%path, error = %source, "optional container missing, skipping");
            entry.skipped = true;
            return Ok(());
        }
    };

    debug!(%path, %handle, "opened container");
    entry.handle = Some(handle);
    let result = populate_children(store, &mut entry.subentries, handle, &path);
    entry.handle = None;

    match (result, store.close_container(handle)) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(source)) => Err(DecodeError::Release { path, source }),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(source)) => {
            warn!(%path, error = %source, "failed to release container while unwinding");
            Err(err)
        }
    }
}

fn populate_value<S: Store + ?Sized>(
    store: &S,
    entry: &mut ValueEntry,
    container: Handle,
    container_path: &str,
) -> DecodeResult<()> {
    let name = entry.spec.name.as_str();
    let read = store.probe_value(container, name).and_then(|probe| {
        let data = store.read_value(container, name, probe.size)?;
        Ok((data, probe.value_type))
    });

    match read {
        Ok((data, value_type)) => {
            debug!(path = %join_path(container_path, name), %value_type, len = data.len(), "read value");
            entry.raw = Some(data);
            entry.value_type = Some(value_type);
            Ok(())
        }
        Err(source) if entry.spec.required => Err(DecodeError::RequiredMissing {
            path: join_path(container_path, name),
            source,
        }),
        Err(source) => {
            debug!(path = %join_path(container_path, name), error = %source, "optional value missing, skipping");
            entry.skipped = true;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regbind_schema::{build_root, record, MAX_SCHEMA_DEPTH};
    use regbind_store::InMemoryStore;
    use regbind_types::{RootKey, ValueType};

    const ROOT: &str = "HKEY_LOCAL_MACHINE";

    #[derive(Debug, Default)]
    struct Leaf {
        count: u32,
        label: String,
    }

    record!(Leaf {
        count: u32 => "Count,required",
        label: String => "Label",
    });

    #[derive(Debug, Default)]
    struct Tree {
        title: String,
        child: Leaf,
        flat: Leaf,
    }

    record!(Tree {
        title: String => "Title",
        child: Leaf => "Child",
        #[embedded] flat: Leaf => "",
    });

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.set_string(RootKey::LocalMachine, "App", "Title", "t");
        store.set_dword(RootKey::LocalMachine, "App", "Count", 1);
        store.set_dword(RootKey::LocalMachine, "App\\Child", "Count", 2);
        store.set_string(RootKey::LocalMachine, "App\\Child", "Label", "c");
        store
    }

    fn populate_tree(store: &InMemoryStore) -> (Entry, DecodeResult<()>) {
        let mut entry = build_root::<Tree>("App", MAX_SCHEMA_DEPTH).unwrap();
        let root = store.root(RootKey::LocalMachine).unwrap();
        let result = populate(store, &mut entry, root, ROOT);
        (entry, result)
    }

    fn container(entry: &Entry) -> &ContainerEntry {
        match entry {
            Entry::Container(c) => c,
            Entry::Value(_) => panic!("expected container"),
        }
    }

    fn value(entry: &Entry) -> &ValueEntry {
        match entry {
            Entry::Value(v) => v,
            Entry::Container(_) => panic!("expected value"),
        }
    }

    #[test]
    fn join_path_cases() {
        assert_eq!(join_path("A", "B"), "A\\B");
        assert_eq!(join_path("A", ""), "A");
        assert_eq!(join_path("", "B"), "B");
    }

    #[test]
    fn populates_values_and_children() {
        let store = store();
        let (entry, result) = populate_tree(&store);
        result.unwrap();

        let root = container(&entry);
        let title = value(&root.subentries[0]);
        assert_eq!(title.value_type, Some(ValueType::SZ));
        assert_eq!(title.raw.as_deref(), Some(&[b't', 0, 0, 0][..]));

        let child = container(&root.subentries[1]);
        assert!(!child.skipped);
        assert_eq!(value(&child.subentries[0]).raw.as_deref(), Some(&2u32.to_le_bytes()[..]));
        assert!(child.handle.is_none());
    }

    #[test]
    fn embedded_reads_from_parent_container() {
        let store = store();
        let (entry, result) = populate_tree(&store);
        result.unwrap();

        let flat = container(&container(&entry).subentries[2]);
        assert_eq!(value(&flat.subentries[0]).raw.as_deref(), Some(&1u32.to_le_bytes()[..]));
        assert!(value(&flat.subentries[1]).skipped);
        // App and App\Child only.
        assert_eq!(store.opens(), 2);
    }

    #[test]
    fn optional_container_is_skipped() {
        let store = InMemoryStore::new();
        store.set_dword(RootKey::LocalMachine, "App", "Count", 1);
        let (entry, result) = populate_tree(&store);
        result.unwrap();

        let child = container(&container(&entry).subentries[1]);
        assert!(child.skipped);
        // Subentries stay untouched.
        assert!(child.subentries.iter().all(|e| !e.is_skipped()));
        assert!(value(&child.subentries[0]).raw.is_none());
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn required_value_missing_names_full_path() {
        let store = InMemoryStore::new();
        store.set_dword(RootKey::LocalMachine, "App", "Count", 1);
        store.create_container(RootKey::LocalMachine, "App\\Child");

        let (_, result) = populate_tree(&store);
        match result.unwrap_err() {
            DecodeError::RequiredMissing { path, .. } => {
                assert_eq!(path, "HKEY_LOCAL_MACHINE\\App\\Child\\Count");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn required_root_missing() {
        let store = InMemoryStore::new();
        let (_, result) = populate_tree(&store);
        assert!(matches!(
            result,
            Err(DecodeError::RequiredMissing { ref path, .. }) if path == "HKEY_LOCAL_MACHINE\\App"
        ));
    }

    #[test]
    fn optional_value_type_is_recorded_verbatim() {
        let store = store();
        store.set_value(RootKey::LocalMachine, "App", "Title", ValueType::LINK, vec![1, 2]);
        let (entry, result) = populate_tree(&store);
        result.unwrap();
        let title = value(&container(&entry).subentries[0]);
        assert_eq!(title.value_type, Some(ValueType::LINK));
        assert_eq!(title.raw.as_deref(), Some(&[1u8, 2][..]));
    }
}
