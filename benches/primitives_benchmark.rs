use arch_atomics::{
    compiler_fence, decrement, increment, load_load_fence, memory_barrier_after_lock,
    store_load_fence, store_store_fence, weak_compare_and_swap, weak_compare_and_swap_uintptr,
};
use core::sync::atomic::{AtomicI32, AtomicU32, AtomicUsize, Ordering};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::thread;

fn bench_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter");

    group.bench_function("increment_decrement", |b| {
        let counter = AtomicI32::new(0);
        b.iter(|| {
            black_box(increment(&counter));
            black_box(decrement(&counter));
        })
    });

    group.bench_function("std_fetch_add_sub", |b| {
        let counter = AtomicI32::new(0);
        b.iter(|| {
            black_box(counter.fetch_add(1, Ordering::SeqCst));
            black_box(counter.fetch_sub(1, Ordering::SeqCst));
        })
    });

    group.bench_function("contended_increment_4_threads", |b| {
        const PER_THREAD: usize = 1_000;
        let counter = AtomicI32::new(0);
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..4 {
                    let counter = &counter;
                    s.spawn(move || {
                        for _ in 0..PER_THREAD {
                            increment(counter);
                        }
                    });
                }
            });
        })
    });

    group.finish();
}

fn bench_cas(c: &mut Criterion) {
    let mut group = c.benchmark_group("weak_cas");

    group.bench_function("u32_success", |b| {
        let word = AtomicU32::new(0);
        let mut current = 0u32;
        b.iter(|| {
            let next = current.wrapping_add(1);
            if weak_compare_and_swap(&word, current, next) {
                current = next;
            }
        })
    });

    group.bench_function("u32_mismatch", |b| {
        let word = AtomicU32::new(1);
        b.iter(|| black_box(weak_compare_and_swap(&word, black_box(0), 2)))
    });

    group.bench_function("uintptr_success", |b| {
        let word = AtomicUsize::new(0);
        let mut current = 0usize;
        b.iter(|| {
            let next = current.wrapping_add(1);
            if weak_compare_and_swap_uintptr(&word, current, next) {
                current = next;
            }
        })
    });

    group.bench_function("std_compare_exchange_weak", |b| {
        let word = AtomicU32::new(0);
        let mut current = 0u32;
        b.iter(|| {
            let next = current.wrapping_add(1);
            if word
                .compare_exchange_weak(current, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                current = next;
            }
        })
    });

    group.finish();
}

fn bench_fences(c: &mut Criterion) {
    let mut group = c.benchmark_group("fences");

    group.bench_function("compiler", |b| b.iter(compiler_fence));
    group.bench_function("load_load", |b| b.iter(load_load_fence));
    group.bench_function("store_store", |b| b.iter(store_store_fence));
    group.bench_function("store_load", |b| b.iter(store_load_fence));
    group.bench_function("after_lock", |b| b.iter(memory_barrier_after_lock));

    group.finish();
}

criterion_group!(benches, bench_counter, bench_cas, bench_fences);
criterion_main!(benches);
