/// Differential tests: the memory and RocksDB stores must agree
///
/// A seeded random operation sequence is applied to both stores; every
/// return value and the final contents are compared.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tempfile::TempDir;
use vert::tools::export_document;
use vert::{EdgeId, GraphStore, MemoryStore, RocksDbStore, VertexId};

const LABELS: [&str; 3] = ["red", "green", "blue"];
const KEYS: [&str; 2] = ["weight", "name"];

fn random_vertex(rng: &mut StdRng) -> VertexId {
    match rng.gen_range(0..10) {
        0 => VertexId::from("s"),
        1 => VertexId::from(vec![7u8]),
        n => VertexId::from(n as i64),
    }
}

fn random_edge(rng: &mut StdRng) -> EdgeId {
    let a = random_vertex(rng);
    let b = random_vertex(rng);
    if rng.gen_bool(0.5) {
        EdgeId::directed(a, b)
    } else {
        EdgeId::undirected(a, b)
    }
}

async fn run_sequence(seed: u64, steps: usize) {
    let temp_dir = TempDir::new().unwrap();
    let memory = MemoryStore::new();
    let rocks = RocksDbStore::new(temp_dir.path(), "diff").unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    for step in 0..steps {
        let op = rng.gen_range(0..10);
        let context = format!("seed {} step {} op {}", seed, step, op);
        match op {
            0 => {
                let vid = random_vertex(&mut rng);
                assert_eq!(
                    memory.add_vertex(&vid).await.unwrap(),
                    rocks.add_vertex(&vid).await.unwrap(),
                    "{}",
                    context
                );
            }
            1 | 2 => {
                let eid = random_edge(&mut rng);
                assert_eq!(
                    memory.add_edge(&eid).await.unwrap(),
                    rocks.add_edge(&eid).await.unwrap(),
                    "{}",
                    context
                );
            }
            3 => {
                let vid = random_vertex(&mut rng);
                assert_eq!(
                    memory.discard_vertex(&vid).await.unwrap(),
                    rocks.discard_vertex(&vid).await.unwrap(),
                    "{}",
                    context
                );
            }
            4 => {
                let eid = random_edge(&mut rng);
                assert_eq!(
                    memory.discard_edge(&eid).await.unwrap(),
                    rocks.discard_edge(&eid).await.unwrap(),
                    "{}",
                    context
                );
            }
            5 => {
                let vid = random_vertex(&mut rng);
                let label = LABELS[rng.gen_range(0..LABELS.len())];
                assert_eq!(
                    memory.add_vertex_label(&vid, label).await.unwrap(),
                    rocks.add_vertex_label(&vid, label).await.unwrap(),
                    "{}",
                    context
                );
            }
            6 => {
                let eid = random_edge(&mut rng);
                let label = LABELS[rng.gen_range(0..LABELS.len())];
                if rng.gen_bool(0.5) {
                    assert_eq!(
                        memory.add_edge_label(&eid, label).await.unwrap(),
                        rocks.add_edge_label(&eid, label).await.unwrap(),
                        "{}",
                        context
                    );
                } else {
                    assert_eq!(
                        memory.discard_edge_label(&eid, label).await.unwrap(),
                        rocks.discard_edge_label(&eid, label).await.unwrap(),
                        "{}",
                        context
                    );
                }
            }
            7 => {
                let vid = random_vertex(&mut rng);
                let key = KEYS[rng.gen_range(0..KEYS.len())];
                let value = json!(rng.gen_range(0..100));
                assert_eq!(
                    memory.set_vertex_data(&vid, key, value.clone()).await.unwrap(),
                    rocks.set_vertex_data(&vid, key, value).await.unwrap(),
                    "{}",
                    context
                );
            }
            8 => {
                let eid = random_edge(&mut rng);
                let key = KEYS[rng.gen_range(0..KEYS.len())];
                if rng.gen_bool(0.5) {
                    let value = json!({"n": rng.gen_range(0..100)});
                    assert_eq!(
                        memory.set_edge_data(&eid, key, value.clone()).await.unwrap(),
                        rocks.set_edge_data(&eid, key, value).await.unwrap(),
                        "{}",
                        context
                    );
                } else {
                    assert_eq!(
                        memory.discard_edge_data(&eid, key).await.unwrap(),
                        rocks.discard_edge_data(&eid, key).await.unwrap(),
                        "{}",
                        context
                    );
                }
            }
            _ => {
                let vid = random_vertex(&mut rng);
                let mut m_sinks = memory.sinks(&vid).await.unwrap();
                let mut r_sinks = rocks.sinks(&vid).await.unwrap();
                m_sinks.sort();
                r_sinks.sort();
                assert_eq!(m_sinks, r_sinks, "{}", context);

                let mut m_neighbors = memory.neighbors(&vid).await.unwrap();
                let mut r_neighbors = rocks.neighbors(&vid).await.unwrap();
                m_neighbors.sort();
                r_neighbors.sort();
                assert_eq!(m_neighbors, r_neighbors, "{}", context);

                assert_eq!(
                    memory.count_sources(&vid).await.unwrap(),
                    rocks.count_sources(&vid).await.unwrap(),
                    "{}",
                    context
                );
            }
        }

        assert_eq!(
            memory.count_vertices().await.unwrap(),
            rocks.count_vertices().await.unwrap(),
            "{}",
            context
        );
        assert_eq!(
            memory.count_edges().await.unwrap(),
            rocks.count_edges().await.unwrap(),
            "{}",
            context
        );
    }

    assert_eq!(
        export_document(&memory).await.unwrap(),
        export_document(&rocks).await.unwrap(),
        "seed {}",
        seed
    );

    // Path lengths agree even if tie-breaking picks different routes
    let from = VertexId::from(2);
    for to in 2..10i64 {
        let to = VertexId::from(to);
        let m_path = memory.shortest_path(&from, &to).await.unwrap();
        let r_path = rocks.shortest_path(&from, &to).await.unwrap();
        assert_eq!(
            m_path.as_ref().map(|p| p.len()),
            r_path.as_ref().map(|p| p.len()),
            "seed {} path to {}",
            seed,
            to
        );
    }
}

#[tokio::test]
async fn test_stores_agree_on_random_sequences() {
    for seed in [1, 7, 42, 2024] {
        run_sequence(seed, 400).await;
    }
}
