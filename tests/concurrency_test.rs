/// Concurrency tests
///
/// Many tasks write overlapping elements through one shared store; counters
/// must still agree with the listings afterwards.

use std::sync::Arc;
use tempfile::TempDir;
use vert::{EdgeId, GraphStore, MemoryStore, RocksDbStore, SharedStore, VertexId};

const TASKS: i64 = 8;
const RING: i64 = 40;

fn stores() -> (TempDir, Vec<(&'static str, SharedStore)>) {
    let temp_dir = TempDir::new().unwrap();
    let rocks = RocksDbStore::new(temp_dir.path(), "concurrent_graph").unwrap();
    let stores: Vec<(&'static str, SharedStore)> = vec![
        ("memory", Arc::new(MemoryStore::new())),
        ("rocksdb", Arc::new(rocks)),
    ];
    (temp_dir, stores)
}

/// Every task writes the same rings, so most adds collide; odd tasks add
/// self-loops while even tasks discard them
async fn run_writers(store: &SharedStore) {
    let mut handles = Vec::new();
    for task in 0..TASKS {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let label = format!("t{}", task);
            store.add_vertex(&VertexId::from(1000 + task)).await.unwrap();
            for i in 0..RING {
                let next = (i + 1) % RING;
                store.add_edge(&EdgeId::directed(i, next)).await.unwrap();
                store.add_edge(&EdgeId::undirected(next, i)).await.unwrap();
                store.add_vertex_label(&VertexId::from(i), "ring").await.unwrap();
                store
                    .add_edge_label(&EdgeId::directed(i, next), &label)
                    .await
                    .unwrap();
                if task % 2 == 1 {
                    store.add_edge(&EdgeId::directed(i, i)).await.unwrap();
                } else {
                    store.discard_edge(&EdgeId::directed(i, i)).await.unwrap();
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_keep_counts_consistent() {
    let (_dir, stores) = stores();
    for (name, store) in stores {
        run_writers(&store).await;

        let vertices = store.vertices().await.unwrap();
        let edges = store.edges().await.unwrap();
        assert_eq!(store.count_vertices().await.unwrap(), vertices.len(), "{}", name);
        assert_eq!(store.count_edges().await.unwrap(), edges.len(), "{}", name);
        assert_eq!(vertices.len() as i64, RING + TASKS, "{}", name);

        let ring_edges = edges.iter().filter(|eid| !eid.is_self_loop()).count() as i64;
        assert_eq!(ring_edges, 2 * RING, "{}", name);

        for i in 0..RING {
            let eid = EdgeId::directed(i, (i + 1) % RING);
            assert_eq!(
                store.count_edge_labels(&eid).await.unwrap() as i64,
                TASKS,
                "{}: {}",
                name,
                eid
            );
            assert!(store.has_vertex_label(&VertexId::from(i), "ring").await.unwrap());
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_discard_vertex_leaves_no_dangling_edges() {
    let (_dir, stores) = stores();
    for (name, store) in stores {
        let mut handles = Vec::new();
        for task in 0..TASKS {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..RING {
                    if task % 2 == 0 {
                        store.add_edge(&EdgeId::directed(0, i)).await.unwrap();
                        store.add_edge(&EdgeId::undirected(i, 0)).await.unwrap();
                    } else {
                        store.discard_vertex(&VertexId::from(0)).await.unwrap();
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let edges = store.edges().await.unwrap();
        assert_eq!(store.count_edges().await.unwrap(), edges.len(), "{}", name);
        assert_eq!(
            store.count_vertices().await.unwrap(),
            store.vertices().await.unwrap().len(),
            "{}",
            name
        );
        for eid in edges {
            let (a, b) = eid.vertices();
            assert!(store.has_vertex(a).await.unwrap(), "{}: {}", name, eid);
            assert!(store.has_vertex(b).await.unwrap(), "{}: {}", name, eid);
        }
    }
}
