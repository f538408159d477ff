//! Integration Tests for the file-backed store
//!
//! Opens stores on real files and checks what survives a reopen.

use std::fs;
use std::time::Duration;

use persistent_kv::persistence::FileStore;
use persistent_kv::store::codec;
use persistent_kv::{Config, Iterate, KeyValueStoreBase, PersistentKeyValueStore};
use tempfile::tempdir;

fn config_for(path: std::path::PathBuf, flush_interval_ms: u64) -> Config {
    Config {
        data_file: path,
        flush_interval_ms,
        server_port: 0,
        verify_iteration: true,
    }
}

#[test]
fn test_missing_file_opens_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kv.dat");

    let store = KeyValueStoreBase::open(FileStore::new(&path), Duration::ZERO).unwrap();
    assert!(store.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_reopen_sees_flushed_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kv.dat");

    {
        let mut store = KeyValueStoreBase::open(FileStore::new(&path), Duration::ZERO).unwrap();
        store.add_or_update("plain", "text");
        store.add_or_update(b"bin\n".to_vec(), vec![0u8, 255, 10, 13]);
        store.add_or_update("empty", "");
        store.remove(b"plain");
    }

    let store = KeyValueStoreBase::open(FileStore::new(&path), Duration::ZERO).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(b"bin\n"), Some(&[0u8, 255, 10, 13][..]));
    assert_eq!(store.get(b"empty"), Some(&b""[..]));
    assert_eq!(store.get(b"plain"), None);
}

#[test]
fn test_corrupted_tail_keeps_prefix() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kv.dat");

    let mut contents = codec::encode([(&b"good"[..], &b"entry"[..])]);
    contents.extend_from_slice(b"3\nbad100\ntoo short");
    fs::write(&path, &contents).unwrap();

    let mut store = KeyValueStoreBase::open(FileStore::new(&path), Duration::ZERO).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(b"good"), Some(&b"entry"[..]));

    // the next flush rewrites the file from what was recovered
    store.add_or_update("new", "1");
    let reopened = KeyValueStoreBase::open(FileStore::new(&path), Duration::ZERO).unwrap();
    assert_eq!(reopened.len(), 2);
}

#[test]
fn test_unreadable_path_is_an_error() {
    let dir = tempdir().unwrap();
    // a directory cannot be read as a file
    let result = KeyValueStoreBase::open(FileStore::new(dir.path()), Duration::ZERO);
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_config_store_flushes_on_timer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("kv.dat");
    let config = config_for(path.clone(), 200);

    let store = PersistentKeyValueStore::from_config(&config).unwrap();
    store.add_or_update("a", "1").await;
    store.add_or_update("b", "2").await;
    assert!(!path.exists());

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(path.exists());

    let reopened = KeyValueStoreBase::open(FileStore::new(&path), Duration::ZERO).unwrap();
    let mut keys = Vec::new();
    reopened.iterate(|key, _| {
        keys.push(key.to_vec());
        Iterate::Continue
    });
    keys.sort();
    assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec()]);
}

#[tokio::test]
async fn test_config_store_zero_interval_writes_immediately() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kv.dat");
    let config = config_for(path.clone(), 0);

    let store = PersistentKeyValueStore::from_config(&config).unwrap();
    assert!(!store.has_flush_timer());

    store.add_or_update("k", "v").await;
    assert_eq!(fs::read(&path).unwrap(), b"1\nk1\nv");
}
