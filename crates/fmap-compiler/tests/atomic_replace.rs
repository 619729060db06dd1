//! Recompilaciones concurrentes sobre la misma ruta: con `WriteMode::Atomic`
//! ningún lector ve un artefacto a medio escribir.

use std::fs;
use std::sync::Arc;
use std::thread;

use fmap_compiler::{load_artifact, CompiledFactoryMap, WriteMode};
use fmap_core::{ConstructorRegistry, Factory, InMemoryFactoryMap};
use serde_json::json;
use tempfile::tempdir;

fn big_map() -> InMemoryFactoryMap {
    (0..200).map(|i| (format!("svc.{i:03}"), Factory::constant(json!({"index": i, "pad": "x".repeat(64)}))))
            .collect()
}

#[test]
fn concurrent_writers_and_readers_never_see_partial_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("factories.json");
    let registry = Arc::new(ConstructorRegistry::new());
    CompiledFactoryMap::new(big_map(), true, &path, registry.clone()).factories().unwrap();

    let writers: Vec<_> = (0..4).map(|_| {
                                    let path = path.clone();
                                    let registry = registry.clone();
                                    thread::spawn(move || {
                                        let compiled = CompiledFactoryMap::new(big_map(), false, &path, registry).with_write_mode(WriteMode::Atomic);
                                        for _ in 0..10 {
                                            assert_eq!(compiled.factories().unwrap().len(), 200);
                                        }
                                    })
                                })
                                .collect();
    let readers: Vec<_> = (0..4).map(|_| {
                                    let path = path.clone();
                                    let registry = registry.clone();
                                    thread::spawn(move || {
                                        for _ in 0..25 {
                                            assert_eq!(load_artifact(&path, &registry).unwrap().len(), 200);
                                        }
                                    })
                                })
                                .collect();
    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    // Sólo queda el artefacto: ningún temporal huérfano.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn overwrite_mode_writes_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("factories.json");
    let compiled = CompiledFactoryMap::new(big_map(), false, &path, Arc::new(ConstructorRegistry::new())).with_write_mode(WriteMode::Overwrite);
    assert_eq!(compiled.factories().unwrap().len(), 200);
    assert_eq!(compiled.factories().unwrap().len(), 200);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
