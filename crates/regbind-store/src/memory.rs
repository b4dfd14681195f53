use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use tracing::debug;

use regbind_types::{Handle, RootKey, ValueType, PATH_SEPARATOR};

use crate::error::{StoreError, StoreResult};
use crate::traits::{Store, ValueProbe};

/// Raw handle values of the predefined roots.
const CURRENT_USER_HANDLE: u64 = 0x8000_0001;
const LOCAL_MACHINE_HANDLE: u64 = 0x8000_0002;

/// First raw value issued for opened containers, above every root handle.
const FIRST_OPEN_HANDLE: u64 = 0x1_0000_0000;

#[derive(Clone, Debug, Default)]
struct Container {
    children: BTreeMap<String, Container>,
    values: BTreeMap<String, StoredValue>,
}

#[derive(Clone, Debug)]
struct StoredValue {
    value_type: ValueType,
    data: Vec<u8>,
}

impl Container {
    fn descend(&self, path: &[String]) -> Option<&Container> {
        path.iter()
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    fn descend_or_create(&mut self, path: &[String]) -> &mut Container {
        path.iter().fold(self, |node, segment| {
            node.children.entry(segment.clone()).or_default()
        })
    }
}

/// An open container: which root it hangs off and its lowercased path.
#[derive(Clone, Debug)]
struct OpenContainer {
    root: RootKey,
    path: Vec<String>,
}

/// In-memory, tree-of-maps store.
///
/// Intended for tests and embedding. Names are folded to lowercase on the way
/// in, so lookups are case-insensitive. Handles issued by
/// [`Store::open_container`] are tracked until closed, which makes leaks
/// observable through [`InMemoryStore::open_handles`].
pub struct InMemoryStore {
    roots: RwLock<HashMap<RootKey, Container>>,
    handles: Mutex<HashMap<u64, OpenContainer>>,
    next_handle: AtomicU64,
    opens: AtomicUsize,
    probes: AtomicUsize,
}

fn split_path(path: &str) -> Vec<String> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn display_path(root: RootKey, path: &[String]) -> String {
    let mut out = root.full_name().to_string();
    for segment in path {
        out.push(PATH_SEPARATOR);
        out.push_str(segment);
    }
    out
}

/// UTF-16LE encoding with a trailing null unit.
fn encode_utf16z(s: &str, out: &mut Vec<u8>) {
    for unit in s.encode_utf16().chain(std::iter::once(0)) {
        out.extend_from_slice(&unit.to_le_bytes());
    }
}

impl InMemoryStore {
    /// Create a store with both roots present and empty.
    pub fn new() -> Self {
        let roots = RootKey::ALL
            .iter()
            .map(|root| (*root, Container::default()))
            .collect();
        Self {
            roots: RwLock::new(roots),
            handles: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(FIRST_OPEN_HANDLE),
            opens: AtomicUsize::new(0),
            probes: AtomicUsize::new(0),
        }
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    /// Create a container (and any missing ancestors) below `root`.
    pub fn create_container(&self, root: RootKey, path: &str) {
        let mut roots = self.roots.write().expect("lock poisoned");
        roots
            .entry(root)
            .or_default()
            .descend_or_create(&split_path(path));
    }

    /// Store a value with explicit type tag and raw bytes, creating the
    /// container path as needed.
    pub fn set_value(
        &self,
        root: RootKey,
        path: &str,
        name: &str,
        value_type: ValueType,
        data: impl Into<Vec<u8>>,
    ) {
        let mut roots = self.roots.write().expect("lock poisoned");
        let container = roots
            .entry(root)
            .or_default()
            .descend_or_create(&split_path(path));
        container.values.insert(
            name.to_lowercase(),
            StoredValue {
                value_type,
                data: data.into(),
            },
        );
    }

    /// Store a null-terminated string value.
    pub fn set_string(&self, root: RootKey, path: &str, name: &str, value: &str) {
        let mut data = Vec::new();
        encode_utf16z(value, &mut data);
        self.set_value(root, path, name, ValueType::SZ, data);
    }

    /// Store a multi-string value: each string null-terminated, followed by
    /// one extra null.
    pub fn set_multi_string(&self, root: RootKey, path: &str, name: &str, values: &[&str]) {
        let mut data = Vec::new();
        for value in values {
            encode_utf16z(value, &mut data);
        }
        data.extend_from_slice(&[0, 0]);
        self.set_value(root, path, name, ValueType::MULTI_SZ, data);
    }

    /// Store a little-endian 32-bit value.
    pub fn set_dword(&self, root: RootKey, path: &str, name: &str, value: u32) {
        self.set_value(root, path, name, ValueType::DWORD, value.to_le_bytes());
    }

    /// Store a little-endian 64-bit value.
    pub fn set_qword(&self, root: RootKey, path: &str, name: &str, value: u64) {
        self.set_value(root, path, name, ValueType::QWORD, value.to_le_bytes());
    }

    /// Store an opaque binary value.
    pub fn set_binary(&self, root: RootKey, path: &str, name: &str, value: &[u8]) {
        self.set_value(root, path, name, ValueType::BINARY, value);
    }

    // -----------------------------------------------------------------------
    // Accounting
    // -----------------------------------------------------------------------

    /// Number of handles opened and not yet closed.
    pub fn open_handles(&self) -> usize {
        self.handles.lock().expect("lock poisoned").len()
    }

    /// Total successful `open_container` calls.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }

    /// Total `probe_value` calls, successful or not.
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn resolve(&self, handle: Handle) -> StoreResult<OpenContainer> {
        match handle.as_raw() {
            CURRENT_USER_HANDLE => Ok(OpenContainer {
                root: RootKey::CurrentUser,
                path: Vec::new(),
            }),
            LOCAL_MACHINE_HANDLE => Ok(OpenContainer {
                root: RootKey::LocalMachine,
                path: Vec::new(),
            }),
            raw => self
                .handles
                .lock()
                .expect("lock poisoned")
                .get(&raw)
                .cloned()
                .ok_or(StoreError::InvalidHandle(handle)),
        }
    }

    fn with_value<T>(
        &self,
        container: Handle,
        name: &str,
        f: impl FnOnce(&StoredValue) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let open = self.resolve(container)?;
        let roots = self.roots.read().expect("lock poisoned");
        let missing = || {
            StoreError::ValueNotFound(format!(
                "{}{}{}",
                display_path(open.root, &open.path),
                PATH_SEPARATOR,
                name
            ))
        };
        let node = roots
            .get(&open.root)
            .and_then(|root| root.descend(&open.path))
            .ok_or_else(missing)?;
        let value = node.values.get(&name.to_lowercase()).ok_or_else(missing)?;
        f(value)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for InMemoryStore {
    fn root(&self, root: RootKey) -> StoreResult<Handle> {
        let roots = self.roots.read().expect("lock poisoned");
        if !roots.contains_key(&root) {
            return Err(StoreError::RootUnavailable(root.full_name().to_string()));
        }
        Ok(Handle::from_raw(match root {
            RootKey::CurrentUser => CURRENT_USER_HANDLE,
            RootKey::LocalMachine => LOCAL_MACHINE_HANDLE,
        }))
    }

    fn open_container(&self, parent: Handle, name: &str) -> StoreResult<Handle> {
        let mut open = self.resolve(parent)?;
        open.path.extend(split_path(name));

        let exists = {
            let roots = self.roots.read().expect("lock poisoned");
            roots
                .get(&open.root)
                .and_then(|root| root.descend(&open.path))
                .is_some()
        };
        if !exists {
            return Err(StoreError::ContainerNotFound(display_path(
                open.root, &open.path,
            )));
        }

        let raw = self.next_handle.fetch_add(1, Ordering::Relaxed);
        debug!(handle = raw, path = %display_path(open.root, &open.path), "opened container");
        self.handles.lock().expect("lock poisoned").insert(raw, open);
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(Handle::from_raw(raw))
    }

    fn close_container(&self, handle: Handle) -> StoreResult<()> {
        if matches!(handle.as_raw(), CURRENT_USER_HANDLE | LOCAL_MACHINE_HANDLE) {
            return Ok(());
        }
        self.handles
            .lock()
            .expect("lock poisoned")
            .remove(&handle.as_raw())
            .map(|_| ())
            .ok_or(StoreError::InvalidHandle(handle))
    }

    fn probe_value(&self, container: Handle, name: &str) -> StoreResult<ValueProbe> {
        self.probes.fetch_add(1, Ordering::Relaxed);
        self.with_value(container, name, |value| {
            Ok(ValueProbe {
                size: value.data.len(),
                value_type: value.value_type,
            })
        })
    }

    fn read_value(
        &self,
        container: Handle,
        name: &str,
        size_hint: usize,
    ) -> StoreResult<Vec<u8>> {
        self.with_value(container, name, |value| {
            if value.data.len() > size_hint {
                return Err(StoreError::BufferTooSmall {
                    needed: value.data.len(),
                    provided: size_hint,
                });
            }
            Ok(value.data.clone())
        })
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("open_handles", &self.open_handles())
            .finish()
    }
}
