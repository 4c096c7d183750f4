//! Benchmarks for FolioStore storage operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use foliostore::{CacheBudget, Compression, FileStore, MemoryBoundCache, Page, Store, StoreConfig};
use tempfile::TempDir;

fn store_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(StoreConfig::builder().dir(temp_dir.path()).build()).unwrap();
    let page = Page::new(vec![0x5A; 4096]);
    store.put("hot", &page).unwrap();

    c.bench_function("put_4k_sync", |b| {
        b.iter(|| store.put(black_box("bench"), black_box(&page)).unwrap())
    });

    c.bench_function("get_4k_sync", |b| {
        b.iter(|| black_box(store.get_if_exists("hot").unwrap()))
    });

    store.set_write_compression(Compression::Deflate);
    c.bench_function("put_4k_sync_deflate", |b| {
        b.iter(|| store.put(black_box("bench-z"), black_box(&page)).unwrap())
    });
}

fn cache_benchmarks(c: &mut Criterion) {
    c.bench_function("cache_put_get", |b| {
        let mut cache = MemoryBoundCache::new(CacheBudget::Bytes(1 << 20));
        let page = Page::new(vec![0x5A; 1024]);
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("k{}", i % 512);
            cache.put(key.clone(), page.copy());
            black_box(cache.get(&key));
            i += 1;
        })
    });
}

criterion_group!(benches, store_benchmarks, cache_benchmarks);
criterion_main!(benches);
