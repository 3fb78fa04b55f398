//! Micro-operation benchmarks for `SlotList`.
//!
//! Run with: `cargo bench --bench slot_list`
//!
//! Measures per-operation latency for pushes, handle inserts, removals,
//! cursor walks and the compaction pass.

use std::hint::black_box;
use std::time::Instant;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nodekit::ds::SlotList;

const OPS: u64 = 100_000;
const SIZES: [usize; 3] = [1_024, 16_384, 262_144];

fn filled(len: usize) -> SlotList<u64> {
    let mut list = SlotList::new(len);
    for v in 0..len as u64 {
        list.push_back(v).unwrap();
    }
    list
}

// ============================================================================
// Push latency (ns/op)
// ============================================================================

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("push_back_presized", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let mut list = SlotList::new(OPS as usize);
                for i in 0..OPS {
                    black_box(list.push_back(i).unwrap());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("push_back_growing", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let mut list = SlotList::new(4);
                for i in 0..OPS {
                    black_box(list.push_back(i).unwrap());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("push_front_growing", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let mut list = SlotList::new(4);
                for i in 0..OPS {
                    black_box(list.push_front(i).unwrap());
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Handle-based edits
// ============================================================================

fn bench_insert_after_cursor(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_after_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("insert_after_head", |b| {
        b.iter_batched(
            || filled(1_024),
            |mut list| {
                let head = list.head().unwrap();
                for i in 0..OPS {
                    black_box(list.insert_after(head, i).unwrap());
                }
                list
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_ns");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("drain_from_head", size), &size, |b, &size| {
            b.iter_batched(
                || filled(size),
                |mut list| {
                    let mut cursor = list.head().unwrap();
                    while !cursor.is_null() {
                        cursor = list.remove(cursor).unwrap();
                    }
                    list
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("drain_from_tail", size), &size, |b, &size| {
            b.iter_batched(
                || filled(size),
                |mut list| {
                    while list.pop_back().unwrap().is_some() {}
                    list
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Traversal and compaction
// ============================================================================

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let sequential = filled(size);
        group.bench_with_input(BenchmarkId::new("iter_sequential", size), &size, |b, _| {
            b.iter(|| black_box(sequential.iter().unwrap().copied().sum::<u64>()))
        });

        // front pushes leave logical order reversed against slot order
        let mut scattered = SlotList::new(size);
        for v in 0..size as u64 {
            scattered.push_front(v).unwrap();
        }
        group.bench_with_input(BenchmarkId::new("iter_reversed_slots", size), &size, |b, _| {
            b.iter(|| black_box(scattered.iter().unwrap().copied().sum::<u64>()))
        });

        group.bench_with_input(BenchmarkId::new("cursor_walk", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                let mut cursor = sequential.head().unwrap();
                while let Some(v) = sequential.value(cursor).unwrap() {
                    sum += *v;
                    cursor = sequential.next(cursor).unwrap();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

fn bench_compaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_node_memory_addresses");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("reversed", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut list = SlotList::new(size);
                    for v in 0..size as u64 {
                        list.push_front(v).unwrap();
                    }
                    list
                },
                |mut list| {
                    black_box(list.sort_node_memory_addresses().unwrap());
                    list
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("already_sorted", size), &size, |b, &size| {
            b.iter_batched(
                || filled(size),
                |mut list| {
                    black_box(list.sort_node_memory_addresses().unwrap());
                    list
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let source = filled(size);
        group.bench_with_input(BenchmarkId::new("insert_list_after_head", size), &size, |b, _| {
            b.iter_batched(
                || filled(1_024),
                |mut dest| {
                    let head = dest.head().unwrap();
                    black_box(dest.insert_list_after(head, &source).unwrap());
                    dest
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(micro_ops, bench_push, bench_insert_after_cursor, bench_remove);
criterion_group!(bulk_ops, bench_traversal, bench_compaction, bench_splice);
criterion_main!(micro_ops, bulk_ops);
